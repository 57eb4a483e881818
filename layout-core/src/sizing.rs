//! Per-category shape sizing.
//!
//! | category | kind | footprint      | size function          |
//! |----------|------|----------------|------------------------|
//! | concrete | box  | 1.0 × 0.25     | `height_from_volume`   |
//! | food     | box  | 0.5 × 0.25     | `height_from_volume`   |
//! | waste    | box  | 0.5 × 0.25     | `height_from_volume`   |
//! | energy   | cube | edge × edge    | `cube_size_from_volume`|
//! | water    | cube | edge × edge    | `cube_size_from_volume`|
//!
//! Box footprints come from [`LayoutConfig::footprints`].

use atlas_core::{Category, Footprint, ShapeKind, cube_size_from_volume, height_from_volume};

use crate::config::LayoutConfig;
use crate::model::Volumes;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SizedShape {
    pub category: Category,
    pub kind: ShapeKind,
    pub footprint: Footprint,
    /// Height for boxes, edge length for cubes.
    pub dimension: f64,
    pub volume: f64,
}

impl SizedShape {
    pub fn half_width(&self) -> f64 {
        self.footprint.width / 2.0
    }

    pub fn half_depth(&self) -> f64 {
        self.footprint.depth / 2.0
    }
}

/// Size one category, or `None` when the volume is absent or not positive.
pub fn size_shape(category: Category, volume: Option<f64>, config: &LayoutConfig) -> Option<SizedShape> {
    let volume = volume.filter(|v| *v > 0.0)?;
    let kind = category.kind();
    let (footprint, dimension) = match kind {
        ShapeKind::Cube => {
            let edge = cube_size_from_volume(Some(volume), config.cube);
            (Footprint::square(edge), edge)
        }
        ShapeKind::Box => {
            let footprint = config.footprints.get(category)?;
            let height = height_from_volume(
                Some(volume),
                footprint,
                config.height_scale_factor,
                config.height,
            );
            (footprint, height)
        }
    };
    Some(SizedShape {
        category,
        kind,
        footprint,
        dimension,
        volume,
    })
}

/// Sized shapes for every rendered category, in row order.
pub fn size_volumes(volumes: &Volumes, config: &LayoutConfig) -> Vec<SizedShape> {
    Category::ROW_ORDER
        .into_iter()
        .filter_map(|c| size_shape(c, volumes.get(c), config))
        .collect()
}

/// Depth-axis extent of a set of shapes: the largest cube edge or the box
/// depth constant, whichever is larger. Box depths are taken from the
/// footprint table rather than the shapes present. No shapes, no depth.
pub fn max_depth(shapes: &[SizedShape], config: &LayoutConfig) -> f64 {
    if shapes.is_empty() {
        return 0.0;
    }
    let max_cube = shapes
        .iter()
        .filter(|s| s.kind == ShapeKind::Cube)
        .map(|s| s.dimension)
        .fold(0.0, f64::max);
    max_cube.max(config.footprints.max_depth())
}
