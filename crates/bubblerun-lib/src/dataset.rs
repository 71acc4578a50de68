use std::env;
use std::fs::{self, File};
use std::io::{self, BufReader, Read, Write};
use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::ProjectDirs;
use flate2::read::GzDecoder;
use reqwest::blocking::Client;
use tempfile::NamedTempFile;
use tracing::{debug, info};

use crate::error::{Error, Result};
use crate::system::{validate_records, SystemRecord};

/// Nightly dump of every populated system published by EDSM.
pub const DATASET_URL: &str = "https://www.edsm.net/dump/systemsPopulated.json.gz";

/// Filename of the decompressed dump inside the data directory.
pub const DATASET_FILENAME: &str = "systemsPopulated.json";

const DATA_DIR_ENV: &str = "BUBBLERUN_DATA_DIR";
const DATASET_SOURCE_ENV: &str = "BUBBLERUN_DATASET_SOURCE";
const DOWNLOAD_TIMEOUT: Duration = Duration::from_secs(60);

/// Resolve the data directory: `BUBBLERUN_DATA_DIR`, else the platform data dir.
pub fn default_data_dir() -> Result<PathBuf> {
    if let Some(dir) = env::var_os(DATA_DIR_ENV) {
        return Ok(PathBuf::from(dir));
    }

    let dirs =
        ProjectDirs::from("net", "bubblerun", "bubblerun").ok_or(Error::ProjectDirsUnavailable)?;
    Ok(dirs.data_dir().to_path_buf())
}

/// Location of the decompressed dump within `data_dir`.
pub fn dataset_path(data_dir: &Path) -> PathBuf {
    data_dir.join(DATASET_FILENAME)
}

/// Download the populated-systems dump, decompress it and store it at `target`.
///
/// `BUBBLERUN_DATASET_SOURCE` replaces the remote dump with a local `.json` or
/// `.json.gz` file.
pub fn download_populated_systems(target: &Path) -> Result<()> {
    if let Some(source) = env::var_os(DATASET_SOURCE_ENV) {
        let source = PathBuf::from(source);
        info!(
            target = %target.display(),
            override = %source.display(),
            "using local dataset override"
        );
        return download_from_source(target, &source);
    }

    let client = build_client()?;
    info!(url = DATASET_URL, target = %target.display(), "downloading populated systems");
    let response = client.get(DATASET_URL).send()?.error_for_status()?;
    write_atomic(target, GzDecoder::new(response))
}

/// Install a local dump at `target` as if it had been downloaded.
///
/// Gzip sources are decompressed. Exposed so tests can avoid the global
/// `BUBBLERUN_DATASET_SOURCE` variable.
pub fn download_from_source(target: &Path, source: &Path) -> Result<()> {
    if !source.exists() {
        return Err(Error::DatasetNotFound {
            path: source.to_path_buf(),
        });
    }
    write_atomic(target, open_maybe_gzip(source)?)
}

/// Make sure the dump exists inside `data_dir`, downloading it when missing or
/// when `refresh` is set. Returns the dump location.
pub fn ensure_dataset(data_dir: &Path, refresh: bool) -> Result<PathBuf> {
    let path = dataset_path(data_dir);
    if path.exists() && !refresh {
        debug!(path = %path.display(), "using existing dataset");
        return Ok(path);
    }

    download_populated_systems(&path)?;
    Ok(path)
}

/// Read and validate every record of the dump at `path`.
///
/// Files ending in `.gz` are decompressed on the fly. Malformed records are
/// dropped; a missing file is reported rather than downloaded.
pub fn load_systems(path: &Path) -> Result<Vec<SystemRecord>> {
    if !path.exists() {
        return Err(Error::DatasetNotFound {
            path: path.to_path_buf(),
        });
    }

    let reader = BufReader::new(open_maybe_gzip(path)?);
    let values: Vec<serde_json::Value> = serde_json::from_reader(reader)?;
    let records = validate_records(values);
    info!(
        path = %path.display(),
        systems = records.len(),
        "loaded populated systems"
    );
    Ok(records)
}

fn is_gzip(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.eq_ignore_ascii_case("gz"))
        .unwrap_or(false)
}

fn open_maybe_gzip(path: &Path) -> Result<Box<dyn Read>> {
    let file = File::open(path)?;
    if is_gzip(path) {
        Ok(Box::new(GzDecoder::new(file)))
    } else {
        Ok(Box::new(file))
    }
}

/// Stream `reader` into a temporary file beside `destination`, then move it
/// into place.
pub(crate) fn write_atomic(destination: &Path, mut reader: impl Read) -> Result<()> {
    let parent = destination.parent().unwrap_or_else(|| Path::new("."));
    fs::create_dir_all(parent)?;
    let mut tmp = NamedTempFile::new_in(parent)?;
    io::copy(&mut reader, tmp.as_file_mut())?;
    tmp.flush()?;
    if destination.exists() {
        fs::remove_file(destination)?;
    }
    tmp.persist(destination).map_err(|err| err.error)?;
    Ok(())
}

fn build_client() -> Result<Client> {
    Client::builder()
        .timeout(DOWNLOAD_TIMEOUT)
        .user_agent(user_agent())
        .build()
        .map_err(Error::Http)
}

fn user_agent() -> String {
    format!("bubblerun-lib/{version}", version = env!("CARGO_PKG_VERSION"))
}
