//! Influence report command handler.

use anyhow::Result;

use bubblerun_lib::{load_faction_systems, InfluenceReport};

use super::{dataset_context, CommandContext};

pub fn handle_report(ctx: &CommandContext, faction: &str, refresh: bool) -> Result<()> {
    let records = dataset_context(
        load_faction_systems(&ctx.data_dir, &ctx.cache_dir, faction, refresh),
        &ctx.data_dir,
    )?;

    let report = InfluenceReport::build(&records, faction);
    ctx.format.render_report(&report)?;
    Ok(())
}
