//! Download command handler for fetching the populated-systems dump.

use anyhow::{Context, Result};

use bubblerun_lib::ensure_dataset;

use super::CommandContext;
use crate::output::DownloadOutput;

/// Handle the download subcommand.
///
/// Fetches the dump into the data directory (unless already present and
/// `refresh` is unset) and reports its location.
pub fn handle_download(ctx: &CommandContext, refresh: bool) -> Result<()> {
    let path = ensure_dataset(&ctx.data_dir, refresh)
        .context("failed to locate or download the populated systems dump")?;

    let output = DownloadOutput {
        dataset_path: path.display().to_string(),
    };
    ctx.format.render_download(&output)?;
    Ok(())
}
