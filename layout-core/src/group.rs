//! Single-country row: the human figure first, then food, waste, concrete,
//! energy and water, left to right on the floor plane.

use atlas_core::{Category, Footprint, ShapeKind};
use serde::Serialize;

use crate::config::LayoutConfig;
use crate::geometry::Vec3;
use crate::model::ConsumptionRecord;
use crate::sizing::{SizedShape, max_depth, size_volumes};

/// A placed category shape. Positions are local to the owning country's
/// origin.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ShapeDescriptor {
    pub category: Category,
    pub kind: ShapeKind,
    pub footprint: Footprint,
    pub dimension: f64,
    pub half_width: f64,
    /// Centre of the shape; `y` is half its height so the base sits on y = 0.
    pub position: Vec3,
    /// Anchor above the shape's top for a label or tooltip.
    pub label_position: Vec3,
    pub color: &'static str,
    pub volume: f64,
}

impl ShapeDescriptor {
    fn place(shape: SizedShape, center_x: f64, label_offset: f64) -> Self {
        ShapeDescriptor {
            category: shape.category,
            kind: shape.kind,
            footprint: shape.footprint,
            dimension: shape.dimension,
            half_width: shape.half_width(),
            position: Vec3::new(center_x, shape.dimension / 2.0, 0.0),
            label_position: Vec3::new(center_x, shape.dimension + label_offset, 0.0),
            color: shape.category.color(),
            volume: shape.volume,
        }
    }

    /// X of the face nearest the human figure.
    pub fn leading_edge(&self) -> f64 {
        self.position.x - self.half_width
    }

    pub fn trailing_edge(&self) -> f64 {
        self.position.x + self.half_width
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct HumanAnchor {
    pub position: Vec3,
    pub half_width: f64,
    pub height: f64,
    pub label: String,
    pub label_position: Vec3,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct CountryLayout {
    pub code: String,
    pub name: String,
    /// `(start_x, 0, start_z)`; every local position is relative to it.
    pub origin: Vec3,
    pub human: HumanAnchor,
    pub shapes: Vec<ShapeDescriptor>,
    /// Depth-axis extent used to separate neighbouring countries.
    pub max_depth: f64,
    /// Local X of the row's trailing edge.
    pub extent_x: f64,
}

impl CountryLayout {
    pub fn shape(&self, category: Category) -> Option<&ShapeDescriptor> {
        self.shapes.iter().find(|s| s.category == category)
    }

    /// Translate a local point into scene space.
    pub fn to_world(&self, local: Vec3) -> Vec3 {
        local.translate(self.origin)
    }
}

/// Lay out one country's row with its origin at `(start_x, 0, start_z)`.
///
/// A running cursor starts at the human's trailing edge. Each rendered shape
/// advances it by `min_spacing`, centres itself one half-width further on
/// and leaves the cursor at its own trailing edge. Skipped categories
/// consume no space.
pub fn layout_country(
    record: &ConsumptionRecord,
    start_x: f64,
    start_z: f64,
    config: &LayoutConfig,
) -> CountryLayout {
    let sized = size_volumes(&record.volumes, config);

    let mut cursor = config.human.half_width;
    let mut shapes = Vec::with_capacity(sized.len());
    for shape in &sized {
        cursor += config.min_spacing;
        let center_x = cursor + shape.half_width();
        cursor = center_x + shape.half_width();
        shapes.push(ShapeDescriptor::place(*shape, center_x, config.label_offset));
    }

    let human = HumanAnchor {
        position: Vec3::ORIGIN,
        half_width: config.human.half_width,
        height: config.human.height,
        label: record.code.clone(),
        label_position: Vec3::new(0.0, config.human.label_height, 0.0),
    };
    let max_depth = max_depth(&sized, config);

    tracing::debug!(
        code = %record.code,
        start_x,
        start_z,
        shapes = shapes.len(),
        extent_x = cursor,
        max_depth,
        "laid out country"
    );

    CountryLayout {
        code: record.code.clone(),
        name: record.name.clone(),
        origin: Vec3::new(start_x, 0.0, start_z),
        human,
        shapes,
        max_depth,
        extent_x: cursor,
    }
}
