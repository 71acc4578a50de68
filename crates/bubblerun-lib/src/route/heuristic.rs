//! Heuristic route search behind a pluggable TSP solver.

use tracing::debug;

use crate::distance::distance;
use crate::error::{Error, Result};
use crate::system::StarSystem;

use super::ScoredRoute;

/// Every directed pair `(i, j)` with `i != j` and the distance between them.
///
/// Pairs are listed row by row: all targets of system 0 first, then system 1,
/// and so on.
pub fn calc_distances(systems: &[StarSystem]) -> Vec<(usize, usize, f64)> {
    let n = systems.len();
    let mut pairs = Vec::with_capacity(n * n.saturating_sub(1));
    for (i, source) in systems.iter().enumerate() {
        for (j, target) in systems.iter().enumerate() {
            if i != j {
                pairs.push((i, j, distance(&source.coords, &target.coords)));
            }
        }
    }
    pairs
}

/// Complete pairwise distances of a working set, indexed by position.
#[derive(Debug, Clone, PartialEq)]
pub struct DistanceMatrix {
    size: usize,
    pairs: Vec<(usize, usize, f64)>,
    dense: Vec<f64>,
}

impl DistanceMatrix {
    pub fn from_systems(systems: &[StarSystem]) -> Self {
        Self::from_pairs(systems.len(), calc_distances(systems))
    }

    /// Build from directed `(source, target, distance)` triples.
    ///
    /// Pairs that are not listed keep a distance of zero.
    pub fn from_pairs(size: usize, pairs: Vec<(usize, usize, f64)>) -> Self {
        let mut dense = vec![0.0; size * size];
        for &(i, j, d) in &pairs {
            if i < size && j < size {
                dense[i * size + j] = d;
            }
        }
        Self { size, pairs, dense }
    }

    pub fn len(&self) -> usize {
        self.size
    }

    pub fn pairs(&self) -> &[(usize, usize, f64)] {
        &self.pairs
    }

    pub fn get(&self, from: usize, to: usize) -> f64 {
        self.dense[from * self.size + to]
    }

    /// Length of the open path that visits `order` front to back.
    pub fn path_cost(&self, order: &[usize]) -> f64 {
        order
            .windows(2)
            .map(|pair| self.get(pair[0], pair[1]))
            .sum()
    }
}

/// Visiting order proposed by a solver and its cost.
#[derive(Debug, Clone, PartialEq)]
pub struct TspSolution {
    pub order: Vec<usize>,
    pub cost: f64,
}

/// A TSP heuristic that turns a distance matrix into a visiting order.
pub trait TspSolver {
    /// Short identifier used in logs.
    fn name(&self) -> &'static str {
        "custom"
    }

    /// Propose an order visiting every index of `matrix` exactly once.
    fn solve(&self, matrix: &DistanceMatrix) -> Result<TspSolution>;
}

/// Approximate the shortest route through `systems` using `solver`.
///
/// The solver's order is checked to be a permutation of the input and the
/// route is re-scored with the shared distance model.
pub fn calc_shortest_route_heuristic(
    systems: &[StarSystem],
    solver: &dyn TspSolver,
) -> Result<ScoredRoute> {
    match systems.len() {
        0 => return Err(Error::EmptyWorkingSet),
        1 => return Ok(ScoredRoute::new(systems.to_vec())),
        _ => {}
    }

    let matrix = DistanceMatrix::from_systems(systems);
    let solution = solver.solve(&matrix)?;
    validate_order(&solution.order, systems.len())?;
    debug!(
        solver = solver.name(),
        cost = solution.cost,
        "solver finished"
    );

    let ordered = solution
        .order
        .iter()
        .map(|&index| systems[index].clone())
        .collect();
    Ok(ScoredRoute::new(ordered))
}

fn validate_order(order: &[usize], expected: usize) -> Result<()> {
    let mut seen = vec![false; expected];
    let valid = order.len() == expected
        && order.iter().all(|&index| {
            index < expected && !std::mem::replace(&mut seen[index], true)
        });
    if valid {
        Ok(())
    } else {
        Err(Error::InvalidSolverOrder {
            expected,
            order: order.to_vec(),
        })
    }
}
