//! Volume to dimension mappings.
//!
//! Volumes are yearly per-capita amounts in m³. Every mapping returns a
//! finite, non-negative length inside its inclusive clamp bounds; missing,
//! zero, negative and NaN volumes collapse to the lower bound.

use serde::{Deserialize, Serialize};

/// Inclusive `[min, max]` range applied to a computed dimension.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub min: f64,
    pub max: f64,
}

impl Bounds {
    /// General purpose scale factor range.
    pub const SCALE: Bounds = Bounds::new(0.1, 10.0);
    /// Edge length range for isotropic shapes.
    pub const CUBE: Bounds = Bounds::new(0.1, 10.0);
    /// Height range for fixed-footprint shapes.
    pub const HEIGHT: Bounds = Bounds::new(0.1, 20.0);

    pub const fn new(min: f64, max: f64) -> Self {
        Bounds { min, max }
    }

    /// Clamp `v` into the range. NaN maps to `min`; with inverted bounds the
    /// lower bound wins.
    pub fn clamp(self, v: f64) -> f64 {
        if v.is_nan() {
            return self.min;
        }
        self.min.max(self.max.min(v))
    }

    pub fn contains(self, v: f64) -> bool {
        v >= self.min && v <= self.max
    }
}

/// Horizontal cross-section of a shape: X extent by Z extent.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Footprint {
    pub width: f64,
    pub depth: f64,
}

impl Footprint {
    pub const fn new(width: f64, depth: f64) -> Self {
        Footprint { width, depth }
    }

    pub const fn square(edge: f64) -> Self {
        Footprint {
            width: edge,
            depth: edge,
        }
    }

    pub fn area(self) -> f64 {
        self.width * self.depth
    }
}

fn positive(volume: Option<f64>) -> Option<f64> {
    volume.filter(|v| *v > 0.0)
}

/// Proportional scale factor: the cube root keeps rendered volume linear in
/// the input volume under uniform scaling.
pub fn scale_from_volume(volume: Option<f64>, bounds: Bounds) -> f64 {
    match positive(volume) {
        Some(v) => bounds.clamp(v.cbrt()),
        None => bounds.min,
    }
}

/// Height of an extrusion over a fixed footprint so that
/// `footprint.area() * height ≈ volume * scale_factor`.
pub fn height_from_volume(
    volume: Option<f64>,
    footprint: Footprint,
    scale_factor: f64,
    bounds: Bounds,
) -> f64 {
    match positive(volume) {
        Some(v) => bounds.clamp(v / footprint.area() * scale_factor),
        None => bounds.min,
    }
}

/// Edge length of a cube holding `volume`.
pub fn cube_size_from_volume(volume: Option<f64>, bounds: Bounds) -> f64 {
    match positive(volume) {
        Some(v) => bounds.clamp(v.cbrt()),
        None => bounds.min,
    }
}
