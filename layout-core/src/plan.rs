//! Plan-view blueprint of a scene: a top view (X/Z footprints) above a front
//! elevation (X/Y heights), drawn to SVG and optionally rasterized to PNG.

use std::sync::Arc;

use atlas_core::format_volume;
use png::{BitDepth, ColorType, Encoder};

use crate::error::{AtlasError, Result};
use crate::scene::SceneLayout;

const PAD: f64 = 0.6;
const PANEL_GAP: f64 = 1.2;
const HUMAN_FILL: &str = "#7f8c8d";

/// Axis-aligned rectangle in scene units.
#[derive(Clone, Copy, Debug)]
struct Rect {
    x0: f64,
    y0: f64,
    x1: f64,
    y1: f64,
}

impl Rect {
    fn centered(cx: f64, cy: f64, half_w: f64, half_h: f64) -> Self {
        Rect {
            x0: cx - half_w,
            y0: cy - half_h,
            x1: cx + half_w,
            y1: cy + half_h,
        }
    }
}

fn bounds_of(rects: &[Rect]) -> (f64, f64, f64, f64) {
    let (mut minx, mut miny, mut maxx, mut maxy) = (
        f64::INFINITY,
        f64::INFINITY,
        f64::NEG_INFINITY,
        f64::NEG_INFINITY,
    );
    for r in rects {
        minx = minx.min(r.x0);
        miny = miny.min(r.y0);
        maxx = maxx.max(r.x1);
        maxy = maxy.max(r.y1);
    }
    (minx, miny, maxx, maxy)
}

fn svg_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

fn rect_element(r: (f64, f64, f64, f64), fill: &str, opacity: f64) -> String {
    let (x0, y0, x1, y1) = r;
    format!(
        "<rect x=\"{:.2}\" y=\"{:.2}\" width=\"{:.2}\" height=\"{:.2}\" fill=\"{}\" fill-opacity=\"{:.2}\"/>\n",
        x0.min(x1),
        y0.min(y1),
        (x1 - x0).abs(),
        (y1 - y0).abs(),
        fill,
        opacity
    )
}

/// Build the blueprint SVG for `scene` at `px_per_unit` pixels per scene
/// unit. Returns the document and its pixel size.
pub fn build_plan_svg(scene: &SceneLayout, px_per_unit: f64) -> (String, u32, u32) {
    // Top view rects use (x, z); elevation rects use (x, y).
    let mut top: Vec<(Rect, &str, f64)> = Vec::new();
    let mut front: Vec<(Rect, &str, f64)> = Vec::new();
    // Back countries are drawn first and lighter so the front row stays legible.
    let n = scene.countries.len();
    for (idx, country) in scene.countries.iter().enumerate().rev() {
        let opacity = if n > 1 {
            1.0 - 0.5 * idx as f64 / (n - 1) as f64
        } else {
            1.0
        };
        let o = country.origin;
        let h = &country.human;
        top.push((
            Rect::centered(o.x + h.position.x, o.z, h.half_width, h.half_width),
            HUMAN_FILL,
            opacity,
        ));
        front.push((
            Rect {
                x0: o.x + h.position.x - h.half_width,
                y0: 0.0,
                x1: o.x + h.position.x + h.half_width,
                y1: h.height,
            },
            HUMAN_FILL,
            opacity,
        ));
        for s in &country.shapes {
            let p = country.to_world(s.position);
            top.push((
                Rect::centered(p.x, p.z, s.half_width, s.footprint.depth / 2.0),
                s.color,
                opacity,
            ));
            front.push((
                Rect {
                    x0: p.x - s.half_width,
                    y0: 0.0,
                    x1: p.x + s.half_width,
                    y1: s.dimension,
                },
                s.color,
                opacity,
            ));
        }
    }

    let all: Vec<Rect> = top.iter().chain(front.iter()).map(|(r, _, _)| *r).collect();
    let (minx, _, maxx, _) = if all.is_empty() {
        (0.0, 0.0, 1.0, 0.0)
    } else {
        bounds_of(&all)
    };
    let top_rects: Vec<Rect> = top.iter().map(|(r, _, _)| *r).collect();
    let (_, minz, _, maxz) = if top_rects.is_empty() {
        (0.0, 0.0, 0.0, 0.0)
    } else {
        bounds_of(&top_rects)
    };
    let max_h = front.iter().map(|(r, _, _)| r.y1).fold(0.0, f64::max);

    let top_h = maxz - minz;
    let total_w = (maxx - minx) + PAD * 2.0;
    let total_h = PAD + top_h + PANEL_GAP + max_h + PAD;
    let w_px = (total_w * px_per_unit).ceil().max(1.0) as u32;
    let h_px = (total_h * px_per_unit).ceil().max(1.0) as u32;

    // Top view: nearer countries (larger z) toward the bottom of the panel.
    let top_px = |x: f64, z: f64| {
        (
            (x - minx + PAD) * px_per_unit,
            (z - minz + PAD) * px_per_unit,
        )
    };
    let floor_y = PAD + top_h + PANEL_GAP + max_h;
    let front_px = |x: f64, y: f64| ((x - minx + PAD) * px_per_unit, (floor_y - y) * px_per_unit);

    let mut s = String::new();
    s.push_str("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
    s.push_str(&format!(
        "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{}\" height=\"{}\" viewBox=\"0 0 {} {}\" stroke=\"#333\" stroke-width=\"1\" font-family=\"sans-serif\" font-size=\"{:.0}\">\n",
        w_px,
        h_px,
        w_px,
        h_px,
        (px_per_unit * 0.3).max(8.0)
    ));
    s.push_str("<rect x=\"0\" y=\"0\" width=\"100%\" height=\"100%\" fill=\"#ffffff\" stroke=\"none\"/>\n");

    for (r, fill, opacity) in &top {
        let (x0, y0) = top_px(r.x0, r.y0);
        let (x1, y1) = top_px(r.x1, r.y1);
        s.push_str(&rect_element((x0, y0, x1, y1), fill, *opacity));
    }

    // Floor line between the panels.
    let (fx0, fy) = front_px(minx - PAD / 2.0, 0.0);
    let (fx1, _) = front_px(maxx + PAD / 2.0, 0.0);
    s.push_str(&format!(
        "<path d=\"M {:.2} {:.2} L {:.2} {:.2}\" stroke=\"#ddd\"/>\n",
        fx0, fy, fx1, fy
    ));
    for (r, fill, opacity) in &front {
        let (x0, y0) = front_px(r.x0, r.y0);
        let (x1, y1) = front_px(r.x1, r.y1);
        s.push_str(&rect_element((x0, y0, x1, y1), fill, *opacity));
    }

    for country in &scene.countries {
        let (lx, ly) = top_px(country.origin.x - country.human.half_width, country.origin.z);
        s.push_str(&format!(
            "<text x=\"{:.2}\" y=\"{:.2}\" text-anchor=\"end\" fill=\"#333\" stroke=\"none\" dx=\"-4\">{}</text>\n",
            lx,
            ly,
            svg_escape(&country.human.label)
        ));
    }
    if let Some(front_country) = scene.countries.first() {
        for shape in &front_country.shapes {
            let p = front_country.to_world(shape.label_position);
            let (tx, ty) = front_px(p.x, p.y);
            s.push_str(&format!(
                "<text x=\"{:.2}\" y=\"{:.2}\" text-anchor=\"middle\" fill=\"#333\" stroke=\"none\">{}: {}</text>\n",
                tx,
                ty,
                shape.category.display_name(),
                svg_escape(&format_volume(shape.volume))
            ));
        }
    }
    s.push_str("</svg>\n");
    (s, w_px, h_px)
}

// Shared PNG encoder: RGBA -> PNG bytes (deterministic for same input)
pub fn encode_rgba_to_png_bytes(width: u32, height: u32, rgba: &[u8]) -> Result<Vec<u8>> {
    let mut buf = Vec::new();
    {
        let mut enc = Encoder::new(&mut buf, width, height);
        enc.set_color(ColorType::Rgba);
        enc.set_depth(BitDepth::Eight);
        let mut writer = enc.write_header()?;
        writer.write_image_data(rgba)?;
    }
    Ok(buf)
}

/// Rasterize a blueprint SVG. Labels use whatever system fonts are
/// available; without any, shapes still render and text is dropped.
pub fn render_png(svg: &str, w_px: u32, h_px: u32) -> Result<Vec<u8>> {
    let mut opt = usvg::Options::default();
    let mut fontdb = usvg::fontdb::Database::new();
    fontdb.load_system_fonts();
    opt.fontdb = Arc::new(fontdb);
    let tree = usvg::Tree::from_str(svg, &opt)?;
    let mut pixmap = tiny_skia::Pixmap::new(w_px, h_px).ok_or(AtlasError::Pixmap(w_px, h_px))?;
    resvg::render(&tree, tiny_skia::Transform::identity(), &mut pixmap.as_mut());
    encode_rgba_to_png_bytes(w_px, h_px, pixmap.data())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LayoutConfig;
    use crate::model::{ConsumptionRecord, Volumes};
    use crate::scene::{compose_comparison, compose_single};
    use atlas_core::Category;

    fn chn() -> ConsumptionRecord {
        ConsumptionRecord::new(
            "CHN",
            Volumes::default()
                .with(Category::Water, 72.46)
                .with(Category::Energy, 10.0)
                .with(Category::Concrete, 2.84)
                .with(Category::Food, 0.43)
                .with(Category::Waste, 0.14),
        )
    }

    #[test]
    fn test_svg_has_one_rect_per_shape_per_view() {
        let scene = compose_single(&chn(), &LayoutConfig::default());
        let (svg, w, h) = build_plan_svg(&scene, 20.0);
        // background + (human + 5 shapes) * 2 views
        assert_eq!(svg.matches("<rect").count(), 1 + 6 * 2);
        assert!(svg.contains(">CHN</text>"));
        assert!(svg.contains("Water: 72.46 m³/year"));
        assert!(svg.contains("#3498db"));
        assert!(w > 0 && h > 0);
    }

    #[test]
    fn test_scale_grows_canvas() {
        let usa = ConsumptionRecord::new("USA", Volumes::default().with(Category::Water, 27.0));
        let binding = chn();
        let scene = compose_comparison(&[&binding, &usa], &LayoutConfig::default());
        let (_, w1, h1) = build_plan_svg(&scene, 10.0);
        let (_, w2, h2) = build_plan_svg(&scene, 20.0);
        assert!(w2 > w1 && h2 > h1);
    }

    #[test]
    fn test_empty_scene_still_valid() {
        let (svg, w, h) = build_plan_svg(&SceneLayout::empty(), 10.0);
        assert!(svg.ends_with("</svg>\n"));
        assert!(w >= 1 && h >= 1);
    }

    #[test]
    fn test_escape() {
        assert_eq!(svg_escape("A&B<C>"), "A&amp;B&lt;C&gt;");
    }

    #[test]
    fn test_png_signature() {
        let scene = compose_single(&chn(), &LayoutConfig::default());
        let (svg, w, h) = build_plan_svg(&scene, 8.0);
        let png = render_png(&svg, w, h).unwrap();
        assert_eq!(&png[..8], &[0x89, b'P', b'N', b'G', 0x0d, 0x0a, 0x1a, 0x0a]);
    }
}
