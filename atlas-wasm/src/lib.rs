//! Browser bridge. The host page hands over the dataset once, then asks for
//! scene layouts as JSON whenever the selection changes and feeds them to
//! its 3D renderer.

use wasm_bindgen::prelude::*;

use layout_core::{Dataset, DisplayMode, LayoutConfig, SceneLayout, build_plan_svg, build_scene};

mod state;
mod utils;

pub use state::State;
use state::{with_state, with_state_mut};
pub use utils::{get_query_param, log, mode_from_query};

fn load_dataset_json(json: &str) -> Result<usize, String> {
    let dataset = Dataset::from_json_str(json).map_err(|e| e.to_string())?;
    let n = dataset.len();
    with_state_mut(|s| s.dataset = dataset);
    Ok(n)
}

fn configure_toml(toml: &str) -> Result<(), String> {
    let config = LayoutConfig::from_toml_str(toml).map_err(|e| e.to_string())?;
    with_state_mut(|s| s.config = config);
    Ok(())
}

fn scene_for(mode: &DisplayMode) -> SceneLayout {
    with_state(|s| build_scene(&s.dataset, mode, &s.config))
}

fn scene_json(mode: &DisplayMode) -> Result<String, String> {
    serde_json::to_string(&scene_for(mode)).map_err(|e| e.to_string())
}

fn query_mode(search: &str) -> Result<DisplayMode, String> {
    mode_from_query(search).ok_or_else(|| format!("no country selected in '{search}'"))
}

#[wasm_bindgen(js_name = loadDataset)]
pub fn load_dataset(json: &str) -> Result<usize, JsValue> {
    let n = load_dataset_json(json).map_err(|e| JsValue::from_str(&e))?;
    log(&format!("Loaded consumption data for {n} countries"));
    Ok(n)
}

/// Replace the layout configuration with TOML overrides over the defaults.
#[wasm_bindgen]
pub fn configure(toml: &str) -> Result<(), JsValue> {
    configure_toml(toml).map_err(|e| JsValue::from_str(&e))
}

#[wasm_bindgen(js_name = layoutSingle)]
pub fn layout_single(code: &str) -> Result<String, JsValue> {
    scene_json(&DisplayMode::single(code)).map_err(|e| JsValue::from_str(&e))
}

#[wasm_bindgen(js_name = layoutComparison)]
pub fn layout_comparison(codes: Vec<String>) -> Result<String, JsValue> {
    scene_json(&DisplayMode::comparison(codes.as_slice())).map_err(|e| JsValue::from_str(&e))
}

#[wasm_bindgen(js_name = layoutFromQuery)]
pub fn layout_from_query(search: &str) -> Result<String, JsValue> {
    let mode = query_mode(search).map_err(|e| JsValue::from_str(&e))?;
    scene_json(&mode).map_err(|e| JsValue::from_str(&e))
}

/// Plan-view blueprint SVG for the selection in `search`.
#[wasm_bindgen(js_name = planSvg)]
pub fn plan_svg(search: &str, px_per_unit: f64) -> Result<String, JsValue> {
    let mode = query_mode(search).map_err(|e| JsValue::from_str(&e))?;
    let (svg, _w, _h) = build_plan_svg(&scene_for(&mode), px_per_unit);
    Ok(svg)
}

#[wasm_bindgen(js_name = categoryColor)]
pub fn category_color(name: &str) -> String {
    atlas_core::category_color(name).to_string()
}

/// General purpose proportional scale for props not tied to a category.
#[wasm_bindgen(js_name = scaleFromVolume)]
pub fn scale_from_volume(volume: Option<f64>) -> f64 {
    with_state(|s| atlas_core::scale_from_volume(volume, s.config.scale))
}
