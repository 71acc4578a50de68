//! Anagram search command handler.

use anyhow::Result;

use bubblerun_lib::{find_anagram_systems, load_systems};

use super::{dataset_context, CommandContext};
use crate::output::FindOutput;

pub fn handle_find(ctx: &CommandContext, letters: &str) -> Result<()> {
    let records = dataset_context(load_systems(&ctx.dataset_path()), &ctx.data_dir)?;

    let output = FindOutput {
        letters: letters.to_string(),
        systems: find_anagram_systems(&records, letters)
            .into_iter()
            .map(|record| record.name.clone())
            .collect(),
    };
    ctx.format.render_find(&output)?;
    Ok(())
}
