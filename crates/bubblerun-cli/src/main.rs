use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use bubblerun_cli::commands::download::handle_download;
use bubblerun_cli::commands::find::handle_find;
use bubblerun_cli::commands::report::handle_report;
use bubblerun_cli::commands::run::{handle_run, RunArgs, DEFAULT_FACTION};
use bubblerun_cli::commands::CommandContext;
use bubblerun_cli::output::OutputFormat;

#[derive(Parser, Debug)]
#[command(author, version, about = "Plan Elite Dangerous bubble runs")]
struct Cli {
    /// Directory holding the populated-systems dump.
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Directory holding per-faction caches.
    #[arg(long, global = true)]
    cache_dir: Option<PathBuf>,

    /// Output format.
    #[arg(long, global = true, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Ensure the populated-systems dump is downloaded and report its location.
    Download {
        /// Download again even when the dump is already present.
        #[arg(long)]
        refresh: bool,
    },
    /// Plan a route through every system where a minor faction is present.
    Run(RunArgs),
    /// List systems where a minor faction is dominant or weak.
    Report {
        #[arg(long, default_value = DEFAULT_FACTION)]
        faction: String,
        /// Rescan the full dump instead of using the faction cache.
        #[arg(long)]
        refresh: bool,
    },
    /// Find systems whose name is an anagram of the given letters.
    Find {
        letters: String,
    },
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();
    let ctx = CommandContext::resolve(cli.data_dir, cli.cache_dir, cli.format)?;

    match cli.command {
        Command::Download { refresh } => handle_download(&ctx, refresh),
        Command::Run(args) => handle_run(&ctx, &args),
        Command::Report { faction, refresh } => handle_report(&ctx, &faction, refresh),
        Command::Find { letters } => handle_find(&ctx, &letters),
    }
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .finish();

    let _ = tracing::subscriber::set_global_default(subscriber);
}
