use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::{Error, Result};

/// Cartesian galactic coordinates in light years.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Coordinates {
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Calculate the Euclidean distance to another position.
    pub fn distance_to(&self, other: &Self) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        let dz = self.z - other.z;
        (dx * dx + dy * dy + dz * dz).sqrt()
    }

    fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }
}

/// A named star system as seen by the routing core.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StarSystem {
    pub name: String,
    pub coords: Coordinates,
}

impl StarSystem {
    pub fn new(name: impl Into<String>, coords: Coordinates) -> Self {
        Self {
            name: name.into(),
            coords,
        }
    }
}

/// Presence of a minor faction in a system.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FactionPresence {
    pub name: String,
    pub influence: f64,
}

/// Validated dataset record.
///
/// Serializes to the same shape the dataset uses, so faction caches can be
/// read back through [`SystemRecord::from_value`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SystemRecord {
    pub name: String,
    pub coords: Coordinates,
    #[serde(default)]
    pub factions: Vec<FactionPresence>,
}

impl SystemRecord {
    /// Validate a loosely-typed JSON record.
    ///
    /// Returns `None` when the record lacks a usable name or coordinates.
    /// Individual faction entries that are malformed are skipped.
    pub fn from_value(value: serde_json::Value) -> Option<Self> {
        let raw: RawSystemRecord = serde_json::from_value(value).ok()?;
        let name = raw.name?.trim().to_string();
        if name.is_empty() {
            return None;
        }

        let coords = raw.coords?;
        let coords = Coordinates::new(coords.x?, coords.y?, coords.z?);
        if !coords.is_finite() {
            return None;
        }

        let factions = raw
            .factions
            .unwrap_or_default()
            .into_iter()
            .filter_map(|faction| {
                let faction: RawFaction = serde_json::from_value(faction).ok()?;
                Some(FactionPresence {
                    name: faction.name?,
                    influence: faction.influence.filter(|v| v.is_finite())?,
                })
            })
            .collect();

        Some(Self {
            name,
            coords,
            factions,
        })
    }
}

impl From<SystemRecord> for StarSystem {
    fn from(record: SystemRecord) -> Self {
        StarSystem::new(record.name, record.coords)
    }
}

#[derive(Debug, Deserialize)]
struct RawSystemRecord {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    coords: Option<RawCoordinates>,
    #[serde(default)]
    factions: Option<Vec<serde_json::Value>>,
}

#[derive(Debug, Deserialize)]
struct RawCoordinates {
    #[serde(default)]
    x: Option<f64>,
    #[serde(default)]
    y: Option<f64>,
    #[serde(default)]
    z: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct RawFaction {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    influence: Option<f64>,
}

/// Validate a batch of raw records, dropping (and logging) the malformed ones.
pub fn validate_records(values: Vec<serde_json::Value>) -> Vec<SystemRecord> {
    let total = values.len();
    let records: Vec<SystemRecord> = values
        .into_iter()
        .enumerate()
        .filter_map(|(index, value)| {
            let record = SystemRecord::from_value(value);
            if record.is_none() {
                warn!(index, "dropping malformed system record");
            }
            record
        })
        .collect();

    let dropped = total - records.len();
    if dropped > 0 {
        warn!(dropped, total, "skipped malformed system records");
    }
    records
}

/// Return up to `limit` system names that look similar to `name`.
pub fn fuzzy_system_matches(systems: &[StarSystem], name: &str, limit: usize) -> Vec<String> {
    const MIN_SIMILARITY: f64 = 0.7;

    let needle = name.to_lowercase();
    let mut scored: Vec<(f64, &str)> = systems
        .iter()
        .map(|system| {
            let score = strsim::jaro_winkler(&needle, &system.name.to_lowercase());
            (score, system.name.as_str())
        })
        .filter(|(score, _)| *score >= MIN_SIMILARITY)
        .collect();

    scored.sort_by(|a, b| b.0.total_cmp(&a.0).then_with(|| a.1.cmp(b.1)));
    scored
        .into_iter()
        .take(limit)
        .map(|(_, name)| name.to_string())
        .collect()
}

/// Look up a system by exact name, suggesting close matches on failure.
pub fn resolve_system<'a>(systems: &'a [StarSystem], name: &str) -> Result<&'a StarSystem> {
    systems
        .iter()
        .find(|system| system.name == name)
        .ok_or_else(|| Error::UnknownSystem {
            name: name.to_string(),
            suggestions: fuzzy_system_matches(systems, name, 3),
        })
}
