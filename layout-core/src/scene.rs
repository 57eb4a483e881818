//! Scene composition: one country at the origin, or several stacked toward
//! negative Z with gaps wide enough that their depth extents never touch.

use serde::Serialize;

use crate::config::LayoutConfig;
use crate::group::{CountryLayout, layout_country};
use crate::model::{ConsumptionRecord, Dataset, DisplayMode};
use crate::sizing::{max_depth, size_volumes};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SceneMode {
    Single,
    Comparison,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SceneLayout {
    pub mode: SceneMode,
    pub countries: Vec<CountryLayout>,
}

impl SceneLayout {
    pub fn empty() -> Self {
        SceneLayout {
            mode: SceneMode::Single,
            countries: Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.countries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.countries.len()
    }

    pub fn country(&self, code: &str) -> Option<&CountryLayout> {
        self.countries.iter().find(|c| c.code == code)
    }
}

/// Depth-axis footprint of a country: its largest cube edge, or the box
/// depth constant if that is larger. Zero when nothing is rendered.
pub fn country_max_depth(record: &ConsumptionRecord, config: &LayoutConfig) -> f64 {
    max_depth(&size_volumes(&record.volumes, config), config)
}

/// Centre-to-centre Z distance between two neighbouring countries.
pub fn country_gap(depth: f64, next_depth: f64, config: &LayoutConfig) -> f64 {
    config.min_country_gap + depth / 2.0 + next_depth / 2.0
}

pub fn compose_single(record: &ConsumptionRecord, config: &LayoutConfig) -> SceneLayout {
    SceneLayout {
        mode: SceneMode::Single,
        countries: vec![layout_country(record, 0.0, 0.0, config)],
    }
}

/// Stack records front to back in input order. Fewer than two records
/// degrade to a single (or empty) scene without any gap computation.
pub fn compose_comparison(records: &[&ConsumptionRecord], config: &LayoutConfig) -> SceneLayout {
    match records {
        [] => return SceneLayout::empty(),
        [only] => return compose_single(only, config),
        _ => {}
    }

    let depths: Vec<f64> = records.iter().map(|r| country_max_depth(r, config)).collect();
    let mut countries = Vec::with_capacity(records.len());
    let mut start_z = 0.0;
    for (idx, record) in records.iter().enumerate() {
        countries.push(layout_country(record, 0.0, start_z, config));
        if let Some(next_depth) = depths.get(idx + 1) {
            start_z -= country_gap(depths[idx], *next_depth, config);
        }
    }
    SceneLayout {
        mode: SceneMode::Comparison,
        countries,
    }
}

/// Resolve a display mode against the dataset and lay out the result.
/// Unknown codes yield no country: an empty scene in single mode, a shorter
/// stack in comparison mode.
pub fn build_scene(dataset: &Dataset, mode: &DisplayMode, config: &LayoutConfig) -> SceneLayout {
    match mode {
        DisplayMode::Single(code) => match dataset.get(code) {
            Some(record) => compose_single(record, config),
            None => {
                tracing::warn!(code = %code, "no data for country");
                SceneLayout::empty()
            }
        },
        DisplayMode::Comparison(codes) => compose_comparison(&dataset.comparison(codes), config),
    }
}
