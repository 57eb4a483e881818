use layout_core::DisplayMode;
use wasm_bindgen::JsValue;

/// Log a message to the browser console.
pub fn log(s: &str) {
    web_sys::console::log_1(&JsValue::from_str(s));
}

/// Simple query string parser used at start-up.
pub fn get_query_param(search: &str, key: &str) -> Option<String> {
    let s = search.trim_start_matches('?');
    for pair in s.split('&') {
        let mut it = pair.splitn(2, '=');
        let k = it.next()?;
        let v = it.next().unwrap_or("");
        if k == key {
            return Some(url_decode(v));
        }
    }
    None
}

fn url_decode(s: &str) -> String {
    // '+' is a space in form-encoded query strings.
    let s = s.replace('+', " ");
    let decoded = percent_encoding::percent_decode_str(&s)
        .decode_utf8()
        .map(|c| c.into_owned());
    decoded.unwrap_or(s)
}

/// Display mode from the page URL: `?compare=USA,CHN` selects comparison,
/// otherwise `?country=USA` selects a single country. `compare` wins when
/// both are present.
pub fn mode_from_query(search: &str) -> Option<DisplayMode> {
    if let Some(v) = get_query_param(search, "compare") {
        let codes: Vec<&str> = v.split(',').collect();
        let mode = DisplayMode::comparison(codes.as_slice());
        if mode != DisplayMode::Comparison(Vec::new()) {
            return Some(mode);
        }
    }
    let code = get_query_param(search, "country")?;
    match DisplayMode::single(&code) {
        DisplayMode::Single(c) if c.is_empty() => None,
        mode => Some(mode),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_param() {
        assert_eq!(get_query_param("?a=1&b=two", "b"), Some("two".into()));
        assert_eq!(get_query_param("a=1&flag", "flag"), Some(String::new()));
        assert_eq!(get_query_param("?a=1", "b"), None);
        assert_eq!(get_query_param("?n=C%C3%B4te+d%27Ivoire", "n"), Some("Côte d'Ivoire".into()));
    }

    #[test]
    fn test_mode_from_query() {
        assert_eq!(mode_from_query("?country=chn"), Some(DisplayMode::Single("CHN".into())));
        assert_eq!(
            mode_from_query("?country=CHN&compare=usa%2Cchn,ind"),
            Some(DisplayMode::Comparison(vec!["USA".into(), "CHN".into(), "IND".into()]))
        );
        assert_eq!(mode_from_query("?compare=,&country=FRA"), Some(DisplayMode::Single("FRA".into())));
        assert_eq!(mode_from_query("?country="), None);
        assert_eq!(mode_from_query(""), None);
    }
}
