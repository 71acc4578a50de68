use std::fmt::Write;

use serde::Serialize;

use crate::error::Result;
use crate::route::{BubbleRun, RouteMethod};

/// Description used when the caller does not provide one.
pub fn default_description(faction: &str) -> String {
    format!("Visit all systems with {faction} presence (\"bubble run\")")
}

/// Longest hop of a run, reduced to names for display.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct JumpSummary {
    pub from: String,
    pub to: String,
    pub distance: f64,
}

/// Structured representation of a planned run that consumers can serialise.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct RunSummary {
    pub description: String,
    pub method: RouteMethod,
    pub systems: Vec<String>,
    pub distance: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub longest_jump: Option<JumpSummary>,
}

impl RunSummary {
    pub fn from_run(description: impl Into<String>, run: &BubbleRun) -> Self {
        Self {
            description: description.into(),
            method: run.method,
            systems: run
                .route
                .names()
                .into_iter()
                .map(str::to_string)
                .collect(),
            distance: run.route.distance,
            longest_jump: run.longest_jump.as_ref().map(|jump| JumpSummary {
                from: jump.from.name.clone(),
                to: jump.to.name.clone(),
                distance: jump.distance,
            }),
        }
    }

    /// Two-line plain text rendering: the route, then its longest jump.
    pub fn render_text(&self) -> String {
        let mut buffer = String::new();
        let _ = writeln!(
            buffer,
            "{}: {}: {:.2} LY",
            self.description,
            self.systems.join(" -> "),
            self.distance
        );
        match &self.longest_jump {
            Some(jump) => {
                let _ = writeln!(
                    buffer,
                    "Longest jump is {:.2} LY between {} and {}",
                    jump.distance, jump.from, jump.to
                );
            }
            None => {
                let _ = writeln!(buffer, "No jumps in route");
            }
        }
        buffer
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
