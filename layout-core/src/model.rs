use std::path::Path;

use atlas_core::Category;
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::{Result, read_file};

/// Read a number, treating `null`, strings and other non-numeric JSON values
/// as absent. Literals beyond the f64 range read as infinite so they clamp
/// to the upper bound later.
fn lenient_number<'de, D>(d: D) -> std::result::Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let v = Option::<serde_json::Value>::deserialize(d)?;
    Ok(match v {
        Some(serde_json::Value::Number(n)) => n.as_f64().or_else(|| n.to_string().parse().ok()),
        _ => None,
    })
}

fn lenient_year<'de, D>(d: D) -> std::result::Result<Option<u16>, D::Error>
where
    D: Deserializer<'de>,
{
    let v = Option::<serde_json::Value>::deserialize(d)?;
    Ok(match v {
        Some(serde_json::Value::Number(n)) => n.as_u64().and_then(|y| u16::try_from(y).ok()),
        Some(serde_json::Value::String(s)) => s.trim().parse().ok(),
        _ => None,
    })
}

fn null_as_default<'de, D, T>(d: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(d)?.unwrap_or_default())
}

/// Yearly per-capita volumes in m³. Any field may be missing.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Volumes {
    #[serde(default, deserialize_with = "lenient_number", skip_serializing_if = "Option::is_none")]
    pub water: Option<f64>,
    #[serde(default, deserialize_with = "lenient_number", skip_serializing_if = "Option::is_none")]
    pub energy: Option<f64>,
    #[serde(default, deserialize_with = "lenient_number", skip_serializing_if = "Option::is_none")]
    pub concrete: Option<f64>,
    #[serde(default, deserialize_with = "lenient_number", skip_serializing_if = "Option::is_none")]
    pub food: Option<f64>,
    #[serde(default, deserialize_with = "lenient_number", skip_serializing_if = "Option::is_none")]
    pub waste: Option<f64>,
    /// Informational sum; never drives geometry.
    #[serde(default, deserialize_with = "lenient_number", skip_serializing_if = "Option::is_none")]
    pub total: Option<f64>,
}

impl Volumes {
    pub fn get(&self, category: Category) -> Option<f64> {
        match category {
            Category::Water => self.water,
            Category::Energy => self.energy,
            Category::Concrete => self.concrete,
            Category::Food => self.food,
            Category::Waste => self.waste,
        }
    }

    pub fn set(&mut self, category: Category, volume: Option<f64>) {
        let slot = match category {
            Category::Water => &mut self.water,
            Category::Energy => &mut self.energy,
            Category::Concrete => &mut self.concrete,
            Category::Food => &mut self.food,
            Category::Waste => &mut self.waste,
        };
        *slot = volume;
    }

    pub fn with(mut self, category: Category, volume: f64) -> Self {
        self.set(category, Some(volume));
        self
    }

    /// The volume if the category should be drawn at all: present and
    /// strictly positive. NaN fails the comparison and is dropped too.
    pub fn rendered(&self, category: Category) -> Option<f64> {
        self.get(category).filter(|v| *v > 0.0)
    }

    pub fn has_rendered(&self) -> bool {
        Category::ALL.iter().any(|c| self.rendered(*c).is_some())
    }
}

/// One country's row in the dataset.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ConsumptionRecord {
    pub code: String,
    #[serde(default)]
    pub name: String,
    #[serde(default, deserialize_with = "lenient_number", skip_serializing_if = "Option::is_none")]
    pub population: Option<f64>,
    #[serde(default, deserialize_with = "lenient_year", skip_serializing_if = "Option::is_none")]
    pub year: Option<u16>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub volumes: Volumes,
}

impl ConsumptionRecord {
    pub fn new(code: impl Into<String>, volumes: Volumes) -> Self {
        let code = code.into();
        ConsumptionRecord {
            name: code.clone(),
            code,
            volumes,
            ..Default::default()
        }
    }
}

/// The static dataset shipped with the application: `{ "data": [...] }`.
/// Unknown top-level keys (sources, units, notes) are ignored.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Dataset {
    #[serde(default, deserialize_with = "null_as_default")]
    pub data: Vec<ConsumptionRecord>,
}

impl Dataset {
    pub fn new(data: Vec<ConsumptionRecord>) -> Self {
        Dataset { data }
    }

    pub fn from_json_str(txt: &str) -> Result<Self> {
        Ok(serde_json::from_str(txt)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let dataset = Self::from_json_str(&read_file(path)?)?;
        tracing::debug!(path = %path.display(), countries = dataset.data.len(), "loaded dataset");
        Ok(dataset)
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// First record carrying `code`.
    pub fn get(&self, code: &str) -> Option<&ConsumptionRecord> {
        self.data.iter().find(|c| c.code == code)
    }

    /// Records for a comparison request, in request order. Codes that are not
    /// in the dataset are dropped.
    pub fn comparison<S: AsRef<str>>(&self, codes: &[S]) -> Vec<&ConsumptionRecord> {
        codes
            .iter()
            .filter_map(|code| {
                let hit = self.get(code.as_ref());
                if hit.is_none() {
                    tracing::warn!(code = code.as_ref(), "country not in dataset, skipped");
                }
                hit
            })
            .collect()
    }

    /// Countries offered for selection: those with a positive total, by name.
    pub fn selectable(&self) -> Vec<&ConsumptionRecord> {
        let mut out: Vec<&ConsumptionRecord> = self
            .data
            .iter()
            .filter(|c| c.volumes.total.is_some_and(|t| t > 0.0))
            .collect();
        out.sort_by(|a, b| a.name.cmp(&b.name));
        out
    }
}

/// What the viewer is showing.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", content = "codes", rename_all = "lowercase")]
pub enum DisplayMode {
    Single(String),
    Comparison(Vec<String>),
}

/// Canonical form of a country code as it appears in the dataset.
pub fn normalize_code(code: &str) -> String {
    code.trim().to_ascii_uppercase()
}

impl DisplayMode {
    pub fn single(code: &str) -> Self {
        DisplayMode::Single(normalize_code(code))
    }

    /// Blank entries are dropped.
    pub fn comparison<S: AsRef<str>>(codes: &[S]) -> Self {
        DisplayMode::Comparison(
            codes
                .iter()
                .map(|c| normalize_code(c.as_ref()))
                .filter(|c| !c.is_empty())
                .collect(),
        )
    }
}
