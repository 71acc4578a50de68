use serde::Serialize;

use crate::distance::distance;
use crate::system::StarSystem;

/// A single hop between two adjacent systems of a route.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Jump {
    pub from: StarSystem,
    pub to: StarSystem,
    pub distance: f64,
}

/// Find the longest hop in `route`.
///
/// Returns `None` for routes with fewer than two systems. When several hops
/// share the maximum length the earliest one is returned.
pub fn find_longest_jump(route: &[StarSystem]) -> Option<Jump> {
    let mut longest: Option<(usize, f64)> = None;
    for (index, pair) in route.windows(2).enumerate() {
        let hop = distance(&pair[0].coords, &pair[1].coords);
        if longest.map_or(true, |(_, best)| hop > best) {
            longest = Some((index, hop));
        }
    }

    longest.map(|(index, distance)| Jump {
        from: route[index].clone(),
        to: route[index + 1].clone(),
        distance,
    })
}
