//! Parent selection.
//!
//! Fitness here is maximized: larger values win. Selection reads a
//! snapshot of the current generation (chromosomes plus their fitness
//! values) and never mutates it.
//!
//! # References
//!
//! - Goldberg (1989), *Genetic Algorithms in Search, Optimization, and
//!   Machine Learning*, ch. 1 (roulette wheel)
//! - Blickle & Thiele (1996), "A Comparison of Selection Schemes used in
//!   Evolutionary Algorithms"

use rand::Rng;

use super::chromosome::Chromosome;

/// Selection strategy for choosing parents.
///
/// # Examples
///
/// ```
/// use team_ga::ga::{Chromosome, Selection};
/// use rand::SeedableRng;
///
/// let population = vec![
///     Chromosome::new([0, 1, 2, 3, 4, 5]),
///     Chromosome::new([5, 4, 3, 2, 1, 0]),
/// ];
/// let mut rng = rand::rngs::StdRng::seed_from_u64(1);
/// // The second chromosome holds the whole wheel.
/// let parent = Selection::Roulette.select(&population, &[0, 10], &mut rng);
/// assert_eq!(parent, &population[1]);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Selection {
    /// Fitness-proportionate (roulette wheel) selection.
    ///
    /// Draws `pick` uniformly in `[0, total)` and returns the first
    /// individual whose cumulative fitness exceeds it. When the total is
    /// zero every individual is equally likely.
    ///
    /// # Complexity
    /// O(n) per selection
    #[default]
    Roulette,

    /// Tournament selection: draw `k` individuals with replacement, keep the
    /// fittest (first drawn on ties).
    ///
    /// # Complexity
    /// O(k) per selection
    Tournament(usize),
}

impl Selection {
    /// Selects one parent from `population`.
    ///
    /// # Panics
    /// Panics if `population` is empty or `fitness` has a different length.
    pub fn select<'a, R: Rng>(
        &self,
        population: &'a [Chromosome],
        fitness: &[u64],
        rng: &mut R,
    ) -> &'a Chromosome {
        &population[self.select_index(fitness, rng)]
    }

    /// Selects a parent index given the fitness of every individual.
    ///
    /// # Panics
    /// Panics if `fitness` is empty.
    pub fn select_index<R: Rng>(&self, fitness: &[u64], rng: &mut R) -> usize {
        assert!(!fitness.is_empty(), "cannot select from empty population");

        match self {
            Selection::Roulette => roulette(fitness, rng),
            Selection::Tournament(k) => tournament(fitness, *k, rng),
        }
    }
}

/// Sum of fitness values without overflow.
pub(crate) fn total_fitness(fitness: &[u64]) -> u128 {
    fitness.iter().map(|&f| u128::from(f)).sum()
}

fn roulette<R: Rng>(fitness: &[u64], rng: &mut R) -> usize {
    let n = fitness.len();
    let total = total_fitness(fitness);
    if total == 0 {
        return rng.random_range(0..n);
    }

    let pick = rng.random_range(0..total);
    let mut cumulative = 0u128;
    for (i, &f) in fitness.iter().enumerate() {
        cumulative += u128::from(f);
        if cumulative > pick {
            return i;
        }
    }

    // Unreachable: cumulative reaches `total > pick` on the last element.
    n - 1
}

fn tournament<R: Rng>(fitness: &[u64], k: usize, rng: &mut R) -> usize {
    let n = fitness.len();
    let mut best = rng.random_range(0..n);
    for _ in 1..k.max(1) {
        let idx = rng.random_range(0..n);
        if fitness[idx] > fitness[best] {
            best = idx;
        }
    }
    best
}
