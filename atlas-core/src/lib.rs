//! Scaling primitives for the consumption atlas: the category table and the
//! volume to length mappings every layout is built from.

pub mod category;
pub mod scale;

pub use category::{Category, ShapeKind, UNKNOWN_COLOR, UnknownCategory, category_color, format_volume};
pub use scale::{Bounds, Footprint, cube_size_from_volume, height_from_volume, scale_from_volume};
