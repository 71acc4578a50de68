//! Distance model shared by every route search.

use crate::system::{Coordinates, StarSystem};

/// Euclidean distance between two points, in light years.
pub fn distance(a: &Coordinates, b: &Coordinates) -> f64 {
    a.distance_to(b)
}

/// Sum of the distances between consecutive systems of `route`.
///
/// Empty and single-system routes have a total distance of zero. The result
/// is the same for a route and its reverse.
pub fn total_distance(route: &[StarSystem]) -> f64 {
    path_length(route.iter().map(|system| &system.coords))
}

/// Length of the open path through `points`, visited in order.
pub fn path_length<'a>(points: impl IntoIterator<Item = &'a Coordinates>) -> f64 {
    let mut total = 0.0;
    let mut previous: Option<&Coordinates> = None;
    for point in points {
        if let Some(prev) = previous {
            total += distance(prev, point);
        }
        previous = Some(point);
    }
    total
}
