//! Genetic-algorithm TSP solver.
//!
//! Individuals are visiting orders over matrix indices. Each generation keeps
//! the best individual, breeds the rest from tournament-selected parents with
//! ordered crossover, and applies swap mutation. The search stops once the
//! best cost has not improved for `max_attempts` generations, or after
//! `max_iters` generations when a cap is set.

use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_xoshiro::Xoshiro256PlusPlus;
use tracing::{debug, trace};

use crate::error::{Error, Result};

use super::heuristic::{DistanceMatrix, TspSolution, TspSolver};

/// Tuning knobs for [`GeneticSolver`].
#[derive(Debug, Clone, PartialEq)]
pub struct GeneticConfig {
    pub population_size: usize,
    /// Probability that a child has two of its stops swapped.
    pub mutation_prob: f64,
    /// Generations without improvement before giving up.
    pub max_attempts: usize,
    /// Hard cap on generations; `None` runs until `max_attempts` is hit.
    pub max_iters: Option<usize>,
    pub seed: u64,
    pub tournament_size: usize,
}

impl Default for GeneticConfig {
    fn default() -> Self {
        Self {
            population_size: 200,
            mutation_prob: 0.1,
            max_attempts: 20,
            max_iters: None,
            seed: 20,
            tournament_size: 3,
        }
    }
}

impl GeneticConfig {
    fn validate(&self) -> Result<()> {
        if self.population_size < 2 {
            return Err(Error::Solver {
                message: format!(
                    "population size must be at least 2, got {}",
                    self.population_size
                ),
            });
        }
        if !(0.0..=1.0).contains(&self.mutation_prob) {
            return Err(Error::Solver {
                message: format!(
                    "mutation probability must be within [0, 1], got {}",
                    self.mutation_prob
                ),
            });
        }
        if self.tournament_size == 0 {
            return Err(Error::Solver {
                message: "tournament size must be at least 1".to_string(),
            });
        }
        Ok(())
    }
}

/// Seeded genetic solver; the same config and matrix always give the same order.
#[derive(Debug, Clone, Default)]
pub struct GeneticSolver {
    config: GeneticConfig,
}

#[derive(Debug, Clone)]
struct Individual {
    order: Vec<usize>,
    cost: f64,
}

impl GeneticSolver {
    pub fn new(config: GeneticConfig) -> Self {
        Self { config }
    }

    fn evaluate(matrix: &DistanceMatrix, order: Vec<usize>) -> Individual {
        let cost = matrix.path_cost(&order);
        Individual { order, cost }
    }

    fn tournament<'a>(&self, population: &'a [Individual], rng: &mut impl Rng) -> &'a Individual {
        let mut winner = &population[rng.gen_range(0..population.len())];
        for _ in 1..self.config.tournament_size {
            let challenger = &population[rng.gen_range(0..population.len())];
            if challenger.cost < winner.cost {
                winner = challenger;
            }
        }
        winner
    }
}

fn fittest(population: &[Individual]) -> Option<&Individual> {
    population.iter().reduce(|best, candidate| {
        if candidate.cost < best.cost {
            candidate
        } else {
            best
        }
    })
}

/// Copy a random slice of `first`, then fill the gaps with the remaining
/// stops in the order they appear in `second`.
fn ordered_crossover(first: &[usize], second: &[usize], rng: &mut impl Rng) -> Vec<usize> {
    let len = first.len();
    let mut start = rng.gen_range(0..len);
    let mut end = rng.gen_range(0..len);
    if start > end {
        std::mem::swap(&mut start, &mut end);
    }

    let mut taken = vec![false; len];
    for &gene in &first[start..=end] {
        taken[gene] = true;
    }
    let mut fill = second.iter().copied().filter(|gene| !taken[*gene]);

    (0..len)
        .map(|position| {
            if (start..=end).contains(&position) {
                first[position]
            } else {
                // Both parents are permutations of 0..len, so the filler never runs dry.
                fill.next().unwrap_or(first[position])
            }
        })
        .collect()
}

fn swap_mutation(order: &mut [usize], rng: &mut impl Rng) {
    let a = rng.gen_range(0..order.len());
    let b = rng.gen_range(0..order.len());
    order.swap(a, b);
}

impl TspSolver for GeneticSolver {
    fn name(&self) -> &'static str {
        "genetic"
    }

    fn solve(&self, matrix: &DistanceMatrix) -> Result<TspSolution> {
        self.config.validate()?;
        let n = matrix.len();
        if n < 3 {
            let order: Vec<usize> = (0..n).collect();
            return Ok(TspSolution {
                cost: matrix.path_cost(&order),
                order,
            });
        }

        let mut rng = Xoshiro256PlusPlus::seed_from_u64(self.config.seed);
        let mut population: Vec<Individual> = (0..self.config.population_size)
            .map(|_| {
                let mut order: Vec<usize> = (0..n).collect();
                order.shuffle(&mut rng);
                Self::evaluate(matrix, order)
            })
            .collect();

        let mut best = fittest(&population)
            .cloned()
            .ok_or_else(|| Error::Solver {
                message: "empty population".to_string(),
            })?;
        let mut stale = 0usize;
        let mut generation = 0usize;

        while stale < self.config.max_attempts
            && self.config.max_iters.map_or(true, |cap| generation < cap)
        {
            generation += 1;

            let mut next = Vec::with_capacity(population.len());
            next.push(best.clone());
            while next.len() < population.len() {
                let mother = self.tournament(&population, &mut rng);
                let father = self.tournament(&population, &mut rng);
                let mut child = ordered_crossover(&mother.order, &father.order, &mut rng);
                if rng.gen_bool(self.config.mutation_prob) {
                    swap_mutation(&mut child, &mut rng);
                }
                next.push(Self::evaluate(matrix, child));
            }
            population = next;

            match fittest(&population) {
                Some(candidate) if candidate.cost < best.cost => {
                    trace!(generation, cost = candidate.cost, "improved");
                    best = candidate.clone();
                    stale = 0;
                }
                _ => stale += 1,
            }
        }

        debug!(generations = generation, cost = best.cost, "genetic search finished");
        Ok(TspSolution {
            order: best.order,
            cost: best.cost,
        })
    }
}
