//! Bubble run command handler.

use anyhow::{bail, Context, Result};
use clap::Args;
use tracing::{info, warn};

use bubblerun_lib::{
    default_description, load_faction_systems, plan_bubble_run, BruteForceOptions, RouteMethod,
    RunRequest, RunSummary, StarSystem,
};

use super::{dataset_context, CommandContext};

/// Faction planned for when `--faction` is omitted.
pub const DEFAULT_FACTION: &str = "EDA Kunti League";

#[derive(Args, Debug, Clone)]
pub struct RunArgs {
    /// Minor faction whose systems the run visits.
    #[arg(long, default_value = DEFAULT_FACTION)]
    pub faction: String,

    /// Route search method.
    #[arg(long, default_value_t = RouteMethod::Genetic, value_parser = parse_method)]
    pub method: RouteMethod,

    /// Only route the first N systems of the working set.
    #[arg(long)]
    pub limit: Option<usize>,

    /// Pin the starting system (exhaustive search only).
    #[arg(long)]
    pub start: Option<String>,

    /// Rescan the full dump instead of using the faction cache.
    #[arg(long)]
    pub refresh: bool,

    /// Allow exhaustive search over more systems than the safety limit.
    #[arg(long)]
    pub allow_large: bool,

    /// Override the description printed before the route.
    #[arg(long)]
    pub description: Option<String>,
}

fn parse_method(value: &str) -> std::result::Result<RouteMethod, String> {
    value.parse()
}

impl RunArgs {
    fn request(&self) -> RunRequest {
        RunRequest {
            method: self.method,
            brute_force: BruteForceOptions {
                allow_large: self.allow_large,
                start: self.start.clone(),
                ..BruteForceOptions::default()
            },
            ..RunRequest::default()
        }
    }
}

/// Handle the run subcommand.
pub fn handle_run(ctx: &CommandContext, args: &RunArgs) -> Result<()> {
    if args.start.is_some() && args.method != RouteMethod::BruteForce {
        bail!("--start requires --method brute-force");
    }

    let records = dataset_context(
        load_faction_systems(&ctx.data_dir, &ctx.cache_dir, &args.faction, args.refresh),
        &ctx.data_dir,
    )?;

    let mut systems: Vec<StarSystem> = records.into_iter().map(StarSystem::from).collect();
    if let Some(limit) = args.limit {
        if limit < systems.len() {
            info!(limit, available = systems.len(), "truncating working set");
            systems.truncate(limit);
        }
    }
    if systems.is_empty() {
        warn!(faction = %args.faction, "no systems found");
        bail!("no systems with {} presence", args.faction);
    }

    let run = plan_bubble_run(&systems, &args.request())
        .with_context(|| format!("failed to plan a {} bubble run", args.method))?;

    let description = args
        .description
        .clone()
        .unwrap_or_else(|| default_description(&args.faction));
    ctx.format
        .render_run(&RunSummary::from_run(description, &run))?;
    Ok(())
}
