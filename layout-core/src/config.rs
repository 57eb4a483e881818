//! Layout constants gathered in one place.
//!
//! Every value has a default matching the reference scene, so an empty TOML
//! document (or `LayoutConfig::default()`) reproduces it exactly. Partial
//! documents only override the keys they name.
//!
//! ```toml
//! min_spacing = 0.5
//!
//! [cube]
//! min = 0.2
//! max = 8.0
//!
//! [footprints.concrete]
//! width = 1.2
//! depth = 0.3
//! ```

use std::path::Path;

use atlas_core::{Bounds, Category, Footprint};
use serde::{Deserialize, Serialize};

use crate::error::{AtlasError, Result, read_file};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// Bounds for the general purpose proportional scale.
    pub scale: Bounds,
    /// Bounds for cube edges (water, energy).
    pub cube: Bounds,
    /// Bounds for box heights (concrete, food, waste).
    pub height: Bounds,
    pub height_scale_factor: f64,
    /// Gap between neighbouring shapes in one country row.
    pub min_spacing: f64,
    /// Gap between the depth extents of stacked countries.
    pub min_country_gap: f64,
    /// Vertical distance from a shape's top to its label anchor.
    pub label_offset: f64,
    pub footprints: BoxFootprints,
    pub human: HumanFigure,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        LayoutConfig {
            scale: Bounds::SCALE,
            cube: Bounds::CUBE,
            height: Bounds::HEIGHT,
            height_scale_factor: 1.0,
            min_spacing: 0.3,
            min_country_gap: 1.0,
            label_offset: 0.5,
            footprints: BoxFootprints::default(),
            human: HumanFigure::default(),
        }
    }
}

/// Fixed cross-sections of the box-kind categories.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoxFootprints {
    pub concrete: Footprint,
    pub food: Footprint,
    pub waste: Footprint,
}

impl Default for BoxFootprints {
    fn default() -> Self {
        BoxFootprints {
            concrete: Footprint::new(1.0, 0.25),
            food: Footprint::new(0.5, 0.25),
            waste: Footprint::new(0.5, 0.25),
        }
    }
}

impl BoxFootprints {
    /// Footprint for a box category; cubes have none.
    pub fn get(&self, category: Category) -> Option<Footprint> {
        match category {
            Category::Concrete => Some(self.concrete),
            Category::Food => Some(self.food),
            Category::Waste => Some(self.waste),
            Category::Water | Category::Energy => None,
        }
    }

    /// Depth shared by box shapes when estimating a country's depth extent.
    pub fn max_depth(&self) -> f64 {
        self.concrete.depth.max(self.food.depth).max(self.waste.depth)
    }
}

/// Placeholder dimensions of the human figure that heads every row.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HumanFigure {
    pub half_width: f64,
    pub height: f64,
    pub label_height: f64,
}

impl Default for HumanFigure {
    fn default() -> Self {
        HumanFigure {
            half_width: 0.25,
            height: 1.70,
            label_height: 2.2,
        }
    }
}

fn check_bounds(name: &str, b: Bounds) -> Result<()> {
    if !b.min.is_finite() || !b.max.is_finite() {
        return Err(AtlasError::InvalidConfig(format!("{name} bounds must be finite")));
    }
    if b.min < 0.0 {
        return Err(AtlasError::InvalidConfig(format!(
            "{name}.min must not be negative (got {})",
            b.min
        )));
    }
    if b.min > b.max {
        return Err(AtlasError::InvalidConfig(format!(
            "{name}.min ({}) exceeds {name}.max ({})",
            b.min, b.max
        )));
    }
    Ok(())
}

fn check_non_negative(name: &str, v: f64) -> Result<()> {
    if !v.is_finite() || v < 0.0 {
        return Err(AtlasError::InvalidConfig(format!(
            "{name} must be a finite, non-negative number (got {v})"
        )));
    }
    Ok(())
}

fn check_positive(name: &str, v: f64) -> Result<()> {
    if !v.is_finite() || v <= 0.0 {
        return Err(AtlasError::InvalidConfig(format!(
            "{name} must be a finite, positive number (got {v})"
        )));
    }
    Ok(())
}

impl LayoutConfig {
    pub fn from_toml_str(txt: &str) -> Result<Self> {
        let config: LayoutConfig = toml::from_str(txt)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let txt = read_file(path)?;
        let config = Self::from_toml_str(&txt)?;
        tracing::debug!(path = %path.display(), "loaded layout config");
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        check_bounds("scale", self.scale)?;
        check_bounds("cube", self.cube)?;
        check_bounds("height", self.height)?;
        check_positive("height_scale_factor", self.height_scale_factor)?;
        check_non_negative("min_spacing", self.min_spacing)?;
        check_non_negative("min_country_gap", self.min_country_gap)?;
        check_non_negative("label_offset", self.label_offset)?;
        for category in [Category::Concrete, Category::Food, Category::Waste] {
            if let Some(fp) = self.footprints.get(category) {
                check_positive(&format!("footprints.{category}.width"), fp.width)?;
                check_positive(&format!("footprints.{category}.depth"), fp.depth)?;
            }
        }
        check_non_negative("human.half_width", self.human.half_width)?;
        check_non_negative("human.height", self.human.height)?;
        check_non_negative("human.label_height", self.human.label_height)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_empty_document_is_default() {
        let config = LayoutConfig::from_toml_str("").unwrap();
        assert_eq!(config, LayoutConfig::default());
        assert_eq!(config.footprints.max_depth(), 0.25);
        assert_eq!(config.human.half_width, 0.25);
    }

    #[test]
    fn test_partial_override() {
        let config = LayoutConfig::from_toml_str(
            "min_spacing = 0.5\n[cube]\nmin = 0.2\nmax = 8.0\n[footprints.concrete]\nwidth = 1.2\ndepth = 0.4\n",
        )
        .unwrap();
        assert_eq!(config.min_spacing, 0.5);
        assert_eq!(config.cube, Bounds::new(0.2, 8.0));
        assert_eq!(config.footprints.concrete, Footprint::new(1.2, 0.4));
        assert_eq!(config.footprints.food, Footprint::new(0.5, 0.25));
        assert_eq!(config.footprints.max_depth(), 0.4);
        assert_eq!(config.min_country_gap, 1.0);
    }

    #[test]
    fn test_rejects_inverted_bounds() {
        let err = LayoutConfig::from_toml_str("[height]\nmin = 30.0\nmax = 20.0\n").unwrap_err();
        assert!(matches!(err, AtlasError::InvalidConfig(_)));
        assert!(err.to_string().contains("height.min"));
    }

    #[test]
    fn test_rejects_bad_values() {
        assert!(LayoutConfig::from_toml_str("min_spacing = -0.1").is_err());
        assert!(LayoutConfig::from_toml_str("height_scale_factor = 0.0").is_err());
        assert!(LayoutConfig::from_toml_str("[footprints.food]\nwidth = 0.0\ndepth = 0.25\n").is_err());
        assert!(matches!(
            LayoutConfig::from_toml_str("min_spacing = \"wide\""),
            Err(AtlasError::Toml(_))
        ));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "min_country_gap = 2.5").unwrap();
        let config = LayoutConfig::load(file.path()).unwrap();
        assert_eq!(config.min_country_gap, 2.5);

        let missing = LayoutConfig::load("/definitely/not/here.toml").unwrap_err();
        assert!(matches!(missing, AtlasError::Io { .. }));
    }
}
