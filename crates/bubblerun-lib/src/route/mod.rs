//! Route planning for bubble runs.
//!
//! This module provides:
//! - [`ScoredRoute`] - An ordered visit of every system with its total distance
//! - [`RouteMethod`] - Supported search methods (exhaustive, genetic)
//! - [`RunRequest`] / [`BubbleRun`] - Planning request and result
//! - [`plan_bubble_run`] - Main entry point for computing a run
//!
//! # Strategy Pattern
//!
//! Heuristic search goes through the [`TspSolver`] trait. The genetic solver
//! is the default implementation, but any solver that turns a
//! [`DistanceMatrix`] into a visiting order can be plugged in without touching
//! the rest of the planner.
//!
//! # Example
//!
//! ```ignore
//! use bubblerun_lib::{plan_bubble_run, RunRequest, RouteMethod};
//!
//! let request = RunRequest::new(RouteMethod::BruteForce);
//! let run = plan_bubble_run(&systems, &request)?;
//! println!("{:.2} LY", run.route.distance);
//! ```

mod brute_force;
mod genetic;
mod heuristic;
mod reverse;

pub use brute_force::{
    calc_shortest_route, calc_shortest_route_brute_force, worker_count, BruteForceOptions,
    BRUTE_FORCE_LIMIT,
};
pub use genetic::{GeneticConfig, GeneticSolver};
pub use heuristic::{
    calc_distances, calc_shortest_route_heuristic, DistanceMatrix, TspSolution, TspSolver,
};
pub use reverse::{remove_reverse_routes, route_key, system_names, RouteKey};

use std::fmt;
use std::str::FromStr;
use std::time::Instant;

use serde::Serialize;
use tracing::info;

use crate::analysis::{find_longest_jump, Jump};
use crate::distance::total_distance;
use crate::error::Result;
use crate::system::StarSystem;

/// A route paired with its total distance.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoredRoute {
    pub systems: Vec<StarSystem>,
    pub distance: f64,
}

impl ScoredRoute {
    /// Score `systems` in the given order.
    pub fn new(systems: Vec<StarSystem>) -> Self {
        let distance = total_distance(&systems);
        Self { systems, distance }
    }

    /// Names of the visited systems, in order.
    pub fn names(&self) -> Vec<&str> {
        system_names(&self.systems)
    }

    /// Number of jumps in the route.
    pub fn hop_count(&self) -> usize {
        self.systems.len().saturating_sub(1)
    }
}

/// Supported route search methods.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum RouteMethod {
    /// Exhaustive permutation search; exact but factorial in the system count.
    BruteForce,
    /// Genetic-algorithm TSP heuristic.
    #[default]
    Genetic,
}

impl fmt::Display for RouteMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let value = match self {
            RouteMethod::BruteForce => "brute-force",
            RouteMethod::Genetic => "genetic",
        };
        f.write_str(value)
    }
}

impl FromStr for RouteMethod {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "brute-force" | "brute_force" | "bruteforce" | "exhaustive" => {
                Ok(RouteMethod::BruteForce)
            }
            "genetic" | "ga" => Ok(RouteMethod::Genetic),
            other => Err(format!("unknown route method: {other}")),
        }
    }
}

/// High-level bubble run planning request.
#[derive(Debug, Clone, Default)]
pub struct RunRequest {
    pub method: RouteMethod,
    pub brute_force: BruteForceOptions,
    pub genetic: GeneticConfig,
}

impl RunRequest {
    pub fn new(method: RouteMethod) -> Self {
        Self {
            method,
            ..Self::default()
        }
    }
}

/// Planned bubble run returned by the library.
#[derive(Debug, Clone, Serialize)]
pub struct BubbleRun {
    pub method: RouteMethod,
    pub route: ScoredRoute,
    pub longest_jump: Option<Jump>,
}

/// Plan a route visiting every system in `systems` exactly once.
pub fn plan_bubble_run(systems: &[StarSystem], request: &RunRequest) -> Result<BubbleRun> {
    let started = Instant::now();
    info!(
        method = %request.method,
        systems = systems.len(),
        "planning bubble run"
    );

    let route = match request.method {
        RouteMethod::BruteForce => calc_shortest_route_brute_force(systems, &request.brute_force)?,
        RouteMethod::Genetic => {
            let solver = GeneticSolver::new(request.genetic.clone());
            calc_shortest_route_heuristic(systems, &solver)?
        }
    };
    let longest_jump = find_longest_jump(&route.systems);

    info!(
        method = %request.method,
        distance = route.distance,
        elapsed_ms = started.elapsed().as_millis() as u64,
        "bubble run planned"
    );

    Ok(BubbleRun {
        method: request.method,
        route,
        longest_jump,
    })
}
