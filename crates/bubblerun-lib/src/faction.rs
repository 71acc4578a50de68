//! Minor-faction filtering, per-faction caches and the influence report.

use std::env;
use std::fmt::Write as _;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use serde::Serialize;
use tracing::{debug, info};

use crate::dataset::{dataset_path, load_systems, write_atomic};
use crate::error::{Error, Result};
use crate::system::{validate_records, SystemRecord};

const CACHE_DIR_ENV: &str = "BUBBLERUN_CACHE_DIR";

/// Systems where the faction sits below this influence count as "pro".
pub const PRO_INFLUENCE_THRESHOLD: f64 = 0.5;

/// Systems where the faction sits above this influence count as "anti".
pub const ANTI_INFLUENCE_THRESHOLD: f64 = 0.6;

/// Influence of `faction` in `record`, or `None` when the faction is absent.
pub fn faction_influence(record: &SystemRecord, faction: &str) -> Option<f64> {
    record
        .factions
        .iter()
        .find(|presence| presence.name == faction)
        .map(|presence| presence.influence)
}

/// True when `faction` is present in `record` with positive influence.
pub fn matches_minor_faction(faction: &str, record: &SystemRecord) -> bool {
    record
        .factions
        .iter()
        .any(|presence| presence.name == faction && presence.influence > 0.0)
}

/// True when `faction` is present in `record` with influence above `threshold`.
pub fn influence_exceeds(record: &SystemRecord, faction: &str, threshold: f64) -> bool {
    faction_influence(record, faction).is_some_and(|influence| influence > threshold)
}

/// The records in which `faction` is present.
pub fn faction_systems(records: &[SystemRecord], faction: &str) -> Vec<SystemRecord> {
    records
        .iter()
        .filter(|record| matches_minor_faction(faction, record))
        .cloned()
        .collect()
}

/// Resolve the cache directory: `BUBBLERUN_CACHE_DIR`, else the platform cache dir.
pub fn default_cache_dir() -> Result<PathBuf> {
    if let Some(dir) = env::var_os(CACHE_DIR_ENV) {
        return Ok(PathBuf::from(dir));
    }

    let dirs =
        ProjectDirs::from("net", "bubblerun", "bubblerun").ok_or(Error::CacheDirsUnavailable)?;
    Ok(dirs.cache_dir().to_path_buf())
}

/// Location of the cached working set for `faction`.
pub fn cache_file_path(cache_dir: &Path, faction: &str) -> PathBuf {
    cache_dir.join(format!("{}.json", sanitize_component(faction)))
}

fn sanitize_component(raw: &str) -> String {
    raw.chars()
        .map(|c| match c {
            'a'..='z' | 'A'..='Z' | '0'..='9' | '.' | '-' | '_' | ' ' => c,
            _ => '_',
        })
        .collect()
}

/// Write `records` to `path` as pretty-printed JSON, replacing it atomically.
pub fn write_faction_cache(path: &Path, records: &[SystemRecord]) -> Result<()> {
    let json = serde_json::to_vec_pretty(records)?;
    write_atomic(path, json.as_slice())
}

/// Read a cache written by [`write_faction_cache`].
pub fn read_faction_cache(path: &Path) -> Result<Vec<SystemRecord>> {
    if !path.exists() {
        return Err(Error::DatasetNotFound {
            path: path.to_path_buf(),
        });
    }

    let reader = BufReader::new(File::open(path)?);
    let values: Vec<serde_json::Value> = serde_json::from_reader(reader)?;
    Ok(validate_records(values))
}

/// Working set for `faction`, served from the cache when possible.
///
/// With `refresh` set, or without a cache file, the full dump in `data_dir`
/// is scanned and the cache rewritten.
pub fn load_faction_systems(
    data_dir: &Path,
    cache_dir: &Path,
    faction: &str,
    refresh: bool,
) -> Result<Vec<SystemRecord>> {
    let cache = cache_file_path(cache_dir, faction);
    if cache.exists() && !refresh {
        let records = read_faction_cache(&cache)?;
        debug!(path = %cache.display(), systems = records.len(), "using faction cache");
        return Ok(records);
    }

    let records = faction_systems(&load_systems(&dataset_path(data_dir))?, faction);
    write_faction_cache(&cache, &records)?;
    info!(
        faction,
        systems = records.len(),
        path = %cache.display(),
        "wrote faction cache"
    );
    Ok(records)
}

/// One system in the influence report.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InfluenceEntry {
    pub name: String,
    pub influence: f64,
}

/// Systems where a faction is dominant ("anti") or weak ("pro").
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InfluenceReport {
    pub faction: String,
    pub anti: Vec<InfluenceEntry>,
    pub pro: Vec<InfluenceEntry>,
}

impl InfluenceReport {
    pub fn build(records: &[SystemRecord], faction: &str) -> Self {
        let select = |keep: &dyn Fn(&SystemRecord) -> bool| {
            let mut entries: Vec<InfluenceEntry> = records
                .iter()
                .filter(|record| keep(*record))
                .filter_map(|record| {
                    faction_influence(record, faction).map(|influence| InfluenceEntry {
                        name: record.name.clone(),
                        influence,
                    })
                })
                .collect();
            entries.sort_by(|a, b| {
                b.influence
                    .total_cmp(&a.influence)
                    .then_with(|| a.name.cmp(&b.name))
            });
            entries
        };

        let weak = |record: &SystemRecord| {
            faction_influence(record, faction)
                .is_some_and(|influence| influence < PRO_INFLUENCE_THRESHOLD)
        };

        Self {
            faction: faction.to_string(),
            anti: select(&|record: &SystemRecord| influence_exceeds(record, faction, ANTI_INFLUENCE_THRESHOLD)),
            pro: select(&weak),
        }
    }

    pub fn render_text(&self) -> String {
        let mut buffer = String::new();
        for (label, entries) in [("Anti", &self.anti), ("Pro", &self.pro)] {
            let _ = writeln!(buffer, "{label}");
            if entries.is_empty() {
                let _ = writeln!(buffer, "  (none)");
            }
            for entry in entries {
                let _ = writeln!(buffer, "  {}: {:.2}", entry.name, entry.influence);
            }
        }
        buffer
    }
}
