//! Output formatting for command results.
//!
//! Every handler produces a serialisable value; this module turns it into
//! either human-readable text or pretty JSON on stdout.

use std::io::{self, Write};

use clap::ValueEnum;
use serde::Serialize;

use bubblerun_lib::faction::InfluenceReport;
use bubblerun_lib::RunSummary;

/// Output style selected with `--format`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable lines.
    #[default]
    Text,
    /// Pretty-printed JSON.
    Json,
}

/// Location of the dump after the `download` command.
#[derive(Debug, Clone, Serialize)]
pub struct DownloadOutput {
    pub dataset_path: String,
}

/// Systems matched by the `find` command.
#[derive(Debug, Clone, Serialize)]
pub struct FindOutput {
    pub letters: String,
    pub systems: Vec<String>,
}

/// Write `value` to stdout as pretty JSON followed by a newline.
///
/// # Errors
///
/// Returns an error if JSON serialization or writing fails.
pub fn render_json<T: Serialize + ?Sized>(value: &T) -> io::Result<()> {
    let mut stdout = io::stdout();
    serde_json::to_writer_pretty(&mut stdout, value).map_err(io::Error::other)?;
    stdout.write_all(b"\n")?;
    Ok(())
}

fn write_text(text: &str) -> io::Result<()> {
    let mut stdout = io::stdout();
    stdout.write_all(text.as_bytes())?;
    stdout.flush()
}

impl OutputFormat {
    pub fn render_run(self, summary: &RunSummary) -> io::Result<()> {
        match self {
            OutputFormat::Text => write_text(&summary.render_text()),
            OutputFormat::Json => render_json(summary),
        }
    }

    pub fn render_report(self, report: &InfluenceReport) -> io::Result<()> {
        match self {
            OutputFormat::Text => write_text(&report.render_text()),
            OutputFormat::Json => render_json(report),
        }
    }

    pub fn render_download(self, output: &DownloadOutput) -> io::Result<()> {
        match self {
            OutputFormat::Text => {
                write_text(&format!("Dataset available at {}\n", output.dataset_path))
            }
            OutputFormat::Json => render_json(output),
        }
    }

    pub fn render_find(self, output: &FindOutput) -> io::Result<()> {
        match self {
            OutputFormat::Text => {
                if output.systems.is_empty() {
                    return write_text(&format!("No systems spell '{}'\n", output.letters));
                }
                let mut text = String::new();
                for name in &output.systems {
                    text.push_str(name);
                    text.push('\n');
                }
                write_text(&text)
            }
            OutputFormat::Json => render_json(output),
        }
    }
}
