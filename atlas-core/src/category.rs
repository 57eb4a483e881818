use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Color used for names that are not one of the tracked categories.
pub const UNKNOWN_COLOR: &str = "#ffffff";

/// The five tracked consumption types.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Water,
    Energy,
    Concrete,
    Food,
    Waste,
}

/// Geometric family of a category. Cubes scale isotropically; boxes keep a
/// fixed footprint and only grow in height.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShapeKind {
    Cube,
    Box,
}

impl Category {
    /// Canonical listing order (statistics, legends).
    pub const ALL: [Category; 5] = [
        Category::Water,
        Category::Energy,
        Category::Concrete,
        Category::Food,
        Category::Waste,
    ];

    /// Order in which shapes are placed next to the human figure.
    pub const ROW_ORDER: [Category; 5] = [
        Category::Food,
        Category::Waste,
        Category::Concrete,
        Category::Energy,
        Category::Water,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Category::Water => "water",
            Category::Energy => "energy",
            Category::Concrete => "concrete",
            Category::Food => "food",
            Category::Waste => "waste",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            Category::Water => "Water",
            Category::Energy => "Energy",
            Category::Concrete => "Concrete",
            Category::Food => "Food",
            Category::Waste => "Waste",
        }
    }

    pub fn kind(self) -> ShapeKind {
        match self {
            Category::Water | Category::Energy => ShapeKind::Cube,
            Category::Concrete | Category::Food | Category::Waste => ShapeKind::Box,
        }
    }

    pub fn color(self) -> &'static str {
        match self {
            Category::Water => "#3498db",    // blue
            Category::Energy => "#f39c12",   // orange
            Category::Concrete => "#95a5a6", // gray
            Category::Food => "#e74c3c",     // red
            Category::Waste => "#9b59b6",    // purple
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("unknown consumption category '{0}'")]
pub struct UnknownCategory(pub String);

impl FromStr for Category {
    type Err = UnknownCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .into_iter()
            .find(|c| c.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| UnknownCategory(s.to_string()))
    }
}

/// Color lookup by exact lowercase category name. Anything else maps to
/// white.
pub fn category_color(name: &str) -> &'static str {
    Category::ALL
        .into_iter()
        .find(|c| c.name() == name)
        .map_or(UNKNOWN_COLOR, Category::color)
}

/// Tooltip text for a yearly volume, switching to thousands above 1000 m³.
pub fn format_volume(volume: f64) -> String {
    if volume >= 1000.0 {
        format!("{:.2}k m³/year", volume / 1000.0)
    } else {
        format!("{:.2} m³/year", volume)
    }
}
