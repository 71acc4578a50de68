//! Bubble run library entry points.
//!
//! This crate exposes helpers to load the populated-systems dataset, filter it
//! down to the systems where a minor faction is present, and plan a route that
//! visits every one of them. Route search is either exhaustive (small working
//! sets, parallel over starting systems) or delegated to a pluggable TSP
//! solver. Higher-level consumers (the CLI) should only depend on the
//! functions exported here instead of reimplementing behavior.
//!

#![deny(warnings)]

pub mod analysis;
pub mod dataset;
pub mod distance;
pub mod error;
pub mod faction;
pub mod output;
pub mod permute;
pub mod route;
pub mod search;
pub mod system;

pub use analysis::{find_longest_jump, Jump};
pub use dataset::{
    dataset_path, default_data_dir, download_populated_systems, ensure_dataset, load_systems,
};
pub use distance::{distance, total_distance};
pub use error::{Error, Result};
pub use faction::{
    default_cache_dir, faction_influence, faction_systems, load_faction_systems,
    matches_minor_faction, InfluenceReport,
};
pub use output::{default_description, RunSummary};
pub use permute::permute;
pub use route::{
    calc_distances, calc_shortest_route, calc_shortest_route_brute_force,
    calc_shortest_route_heuristic, plan_bubble_run, remove_reverse_routes, BruteForceOptions,
    BubbleRun, DistanceMatrix, GeneticConfig, GeneticSolver, RouteMethod, RunRequest,
    ScoredRoute, TspSolution, TspSolver,
};
pub use search::find_anagram_systems;
pub use system::{Coordinates, FactionPresence, StarSystem, SystemRecord};
