// Module exports for CLI subcommands
//
// Each module handles one subcommand. main.rs parses arguments, resolves the
// shared context and dispatches to these handlers.

pub mod download;
pub mod find;
pub mod report;
pub mod run;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use bubblerun_lib::{dataset_path, default_cache_dir, default_data_dir, Error as LibError};

use crate::output::OutputFormat;

/// Settings shared by every subcommand.
#[derive(Debug, Clone)]
pub struct CommandContext {
    pub data_dir: PathBuf,
    pub cache_dir: PathBuf,
    pub format: OutputFormat,
}

impl CommandContext {
    /// Layer explicit flags over the environment and platform defaults.
    pub fn resolve(
        data_dir: Option<PathBuf>,
        cache_dir: Option<PathBuf>,
        format: OutputFormat,
    ) -> Result<Self> {
        let data_dir = match data_dir {
            Some(dir) => dir,
            None => default_data_dir().context("failed to resolve the data directory")?,
        };
        let cache_dir = match cache_dir {
            Some(dir) => dir,
            None => default_cache_dir().context("failed to resolve the cache directory")?,
        };
        Ok(Self {
            data_dir,
            cache_dir,
            format,
        })
    }

    pub fn dataset_path(&self) -> PathBuf {
        dataset_path(&self.data_dir)
    }
}

/// Attach a download hint when the dump has not been fetched yet.
pub(crate) fn dataset_context<T>(result: bubblerun_lib::Result<T>, data_dir: &Path) -> Result<T> {
    match result {
        Err(LibError::DatasetNotFound { path }) => Err(anyhow::anyhow!(
            "dataset not found at {}; run `bubblerun download` first",
            path.display()
        )),
        other => other.with_context(|| format!("failed to load data from {}", data_dir.display())),
    }
}
