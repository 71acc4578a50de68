//! Exhaustive route search.
//!
//! Every permutation is scored, so this is only practical for small working
//! sets. The search space is sharded by head: one task per starting system,
//! run on a dedicated thread pool and folded to the global minimum.

use std::panic::{catch_unwind, AssertUnwindSafe};

use rayon::prelude::*;
use rayon::ThreadPoolBuilder;
use tracing::debug;

use crate::distance::path_length;
use crate::error::{Error, Result};
use crate::permute::permute;
use crate::system::{resolve_system, StarSystem};

use super::ScoredRoute;

/// Largest working set exhaustive search accepts without an explicit opt-in.
pub const BRUTE_FORCE_LIMIT: usize = 10;

/// Tuning for [`calc_shortest_route_brute_force`].
#[derive(Debug, Clone, Default)]
pub struct BruteForceOptions {
    /// Accept working sets above [`BRUTE_FORCE_LIMIT`].
    pub allow_large: bool,
    /// Override the worker count; defaults to [`worker_count`].
    pub workers: Option<usize>,
    /// Pin the route to start at the named system instead of trying every head.
    pub start: Option<String>,
}

/// Default worker pool size: every core but one, and never fewer than one.
pub fn worker_count() -> usize {
    num_cpus::get().saturating_sub(1).max(1)
}

/// Shortest route that starts at `head` and visits every system in `systems`.
///
/// Systems equal to `head` are skipped. Ties keep the first candidate found.
pub fn calc_shortest_route(head: &StarSystem, systems: &[StarSystem]) -> ScoredRoute {
    let candidates: Vec<&StarSystem> = systems.iter().collect();

    let mut best: Option<(Vec<&StarSystem>, f64)> = None;
    for route in permute(&head, &candidates) {
        let distance = path_length(route.iter().map(|system| &system.coords));
        let improves = best
            .as_ref()
            .map_or(true, |(_, best_distance)| distance < *best_distance);
        if improves {
            best = Some((route, distance));
        }
    }

    match best {
        Some((route, distance)) => ScoredRoute {
            systems: route.into_iter().cloned().collect(),
            distance,
        },
        None => ScoredRoute::new(vec![head.clone()]),
    }
}

/// Shortest route over all choices of starting system.
///
/// Runs [`calc_shortest_route`] once per system on a worker pool and keeps the
/// overall minimum. When several heads tie, the earliest head wins. With
/// [`BruteForceOptions::start`] set only that head is searched.
pub fn calc_shortest_route_brute_force(
    systems: &[StarSystem],
    options: &BruteForceOptions,
) -> Result<ScoredRoute> {
    if systems.is_empty() {
        return Err(Error::EmptyWorkingSet);
    }
    if systems.len() > BRUTE_FORCE_LIMIT && !options.allow_large {
        return Err(Error::WorkingSetTooLarge {
            count: systems.len(),
            limit: BRUTE_FORCE_LIMIT,
        });
    }

    if let Some(start) = options.start.as_deref() {
        let head = resolve_system(systems, start)?;
        debug!(head = %head.name, "searching from pinned start");
        return Ok(calc_shortest_route(head, systems));
    }

    let workers = options.workers.unwrap_or_else(worker_count).max(1);
    let pool = ThreadPoolBuilder::new()
        .num_threads(workers)
        .thread_name(|index| format!("bubblerun-worker-{index}"))
        .build()
        .map_err(|err| Error::WorkerPool {
            message: err.to_string(),
        })?;
    debug!(workers, systems = systems.len(), "starting exhaustive search");

    let per_head: Vec<ScoredRoute> = catch_unwind(AssertUnwindSafe(|| {
        pool.install(|| {
            systems
                .par_iter()
                .map(|head| {
                    let best = calc_shortest_route(head, systems);
                    debug!(head = %head.name, distance = best.distance, "head finished");
                    best
                })
                .collect::<Vec<_>>()
        })
    }))
    .map_err(|panic| Error::WorkerPool {
        message: panic_message(panic.as_ref()),
    })?;

    // Strict `<`: on ties the earliest head wins, unlike a later-wins reduce.
    per_head
        .into_iter()
        .reduce(|best, candidate| {
            if candidate.distance < best.distance {
                candidate
            } else {
                best
            }
        })
        .ok_or(Error::EmptyWorkingSet)
}

fn panic_message(panic: &(dyn std::any::Any + Send)) -> String {
    if let Some(message) = panic.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = panic.downcast_ref::<String>() {
        message.clone()
    } else {
        "worker panicked".to_string()
    }
}
