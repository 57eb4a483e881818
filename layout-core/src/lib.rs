//! Layout engine for the consumption atlas.
//!
//! Turns per-country consumption records into floor-plane geometry: sized
//! category shapes in a row beside a human figure, and rows of several
//! countries stacked along the depth axis. Everything here is pure and
//! deterministic; only dataset/config loading and blueprint export can fail.

pub mod config;
pub mod error;
pub mod geometry;
pub mod group;
pub mod model;
pub mod plan;
pub mod scene;
pub mod sizing;

pub use config::{BoxFootprints, HumanFigure, LayoutConfig};
pub use error::{AtlasError, Result};
pub use geometry::Vec3;
pub use group::{CountryLayout, HumanAnchor, ShapeDescriptor, layout_country};
pub use model::{ConsumptionRecord, Dataset, DisplayMode, Volumes, normalize_code};
pub use plan::{build_plan_svg, encode_rgba_to_png_bytes, render_png};
pub use scene::{
    SceneLayout, SceneMode, build_scene, compose_comparison, compose_single, country_gap,
    country_max_depth,
};
pub use sizing::{SizedShape, size_shape, size_volumes};
