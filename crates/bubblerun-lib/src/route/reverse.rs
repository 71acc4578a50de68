//! Reverse-route pruning.
//!
//! Total distance is direction-agnostic, so a route and its exact reverse are
//! interchangeable. Pruning keeps one of each pair.

use std::cmp::Ordering;
use std::collections::hash_map::Entry;
use std::collections::HashMap;

use crate::system::StarSystem;

/// Canonical key for a route and its reverse: the lexicographically smaller
/// of the two name sequences.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RouteKey(Vec<String>);

impl RouteKey {
    pub fn names(&self) -> &[String] {
        &self.0
    }
}

/// Names of the systems in `route`, in order.
pub fn system_names(route: &[StarSystem]) -> Vec<&str> {
    route.iter().map(|system| system.name.as_str()).collect()
}

/// Which way a route reads relative to its canonical key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Direction {
    Forward,
    Backward,
    /// The route reads the same both ways.
    Symmetric,
}

fn oriented_key(route: &[StarSystem]) -> (RouteKey, Direction) {
    let forward = system_names(route);
    let backward: Vec<&str> = forward.iter().rev().copied().collect();
    let (canonical, direction) = match backward.cmp(&forward) {
        Ordering::Less => (backward, Direction::Backward),
        Ordering::Equal => (forward, Direction::Symmetric),
        Ordering::Greater => (forward, Direction::Forward),
    };
    let key = RouteKey(canonical.into_iter().map(str::to_string).collect());
    (key, direction)
}

/// Build the direction-independent key of `route`.
pub fn route_key(route: &[StarSystem]) -> RouteKey {
    oriented_key(route).0
}

/// Drop every route that is the exact reverse of a route already kept.
///
/// The first route seen in input order fixes the direction kept for its key.
/// Repeats in that direction are kept; a repeated symmetric route is its own
/// reverse and is dropped.
pub fn remove_reverse_routes<R>(routes: impl IntoIterator<Item = R>) -> Vec<R>
where
    R: AsRef<[StarSystem]>,
{
    let mut kept: HashMap<RouteKey, Direction> = HashMap::new();
    routes
        .into_iter()
        .filter(|route| {
            let (key, direction) = oriented_key(route.as_ref());
            match kept.entry(key) {
                Entry::Vacant(entry) => {
                    entry.insert(direction);
                    true
                }
                Entry::Occupied(entry) => {
                    direction != Direction::Symmetric && *entry.get() == direction
                }
            }
        })
        .collect()
}
