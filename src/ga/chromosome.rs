//! Chromosome encoding and fitness evaluation.
//!
//! A [`Chromosome`] is six roster indices read positionally: genes `0..3`
//! form team A (scored by `skill_a`), genes `3..6` form team B (scored by
//! `skill_b`). Fitness is `product(team A skill_a) + product(team B skill_b)`.
//!
//! Chromosomes with repeated or out-of-range genes are not rejected; they
//! score zero and are driven out by selection pressure.

use rand::seq::index;
use rand::Rng;

use crate::roster::{product, Roster};

/// Members per team.
pub const TEAM_SIZE: usize = 3;

/// Genes per chromosome (two teams).
pub const CHROMOSOME_LEN: usize = 2 * TEAM_SIZE;

/// Six roster indices, team A first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Chromosome([usize; CHROMOSOME_LEN]);

impl Chromosome {
    pub fn new(genes: [usize; CHROMOSOME_LEN]) -> Self {
        Self(genes)
    }

    pub fn genes(&self) -> &[usize; CHROMOSOME_LEN] {
        &self.0
    }

    pub(crate) fn genes_mut(&mut self) -> &mut [usize; CHROMOSOME_LEN] {
        &mut self.0
    }

    pub fn team_a(&self) -> &[usize] {
        &self.0[..TEAM_SIZE]
    }

    pub fn team_b(&self) -> &[usize] {
        &self.0[TEAM_SIZE..]
    }

    /// True when no gene repeats.
    pub fn has_distinct_genes(&self) -> bool {
        self.0
            .iter()
            .enumerate()
            .all(|(i, g)| !self.0[i + 1..].contains(g))
    }

    /// True when genes are pairwise distinct and all below `roster_size`.
    pub fn is_valid_for(&self, roster_size: usize) -> bool {
        self.0.iter().all(|&g| g < roster_size) && self.has_distinct_genes()
    }
}

impl From<[usize; CHROMOSOME_LEN]> for Chromosome {
    fn from(genes: [usize; CHROMOSOME_LEN]) -> Self {
        Self(genes)
    }
}

impl Roster {
    /// Product-sum fitness of a chromosome; zero when the chromosome is
    /// invalid for this roster.
    ///
    /// ```
    /// use team_ga::ga::Chromosome;
    /// use team_ga::roster::{Candidate, Roster};
    ///
    /// let roster = Roster::load(
    ///     (0..6u32)
    ///         .map(|i| Candidate::new(format!("c{i}"), 2 * i + 2, 2 * i + 3))
    ///         .collect(),
    /// )
    /// .unwrap();
    /// assert_eq!(roster.fitness(&Chromosome::new([0, 1, 2, 3, 4, 5])), 48 + 1287);
    /// assert_eq!(roster.fitness(&Chromosome::new([0, 0, 1, 2, 3, 4])), 0);
    /// ```
    pub fn fitness(&self, chromosome: &Chromosome) -> u64 {
        if !chromosome.is_valid_for(self.size()) {
            return 0;
        }
        let candidates = self.candidates();
        let strength_a = product(chromosome.team_a().iter().map(|&i| candidates[i].skill_a));
        let strength_b = product(chromosome.team_b().iter().map(|&i| candidates[i].skill_b));
        strength_a.saturating_add(strength_b)
    }
}

/// Samples six distinct indices uniformly from `0..roster_size`.
///
/// # Panics
/// Panics if `roster_size < CHROMOSOME_LEN`; a loaded [`Roster`] always
/// satisfies this.
pub fn random_chromosome<R: Rng>(roster_size: usize, rng: &mut R) -> Chromosome {
    let picks = index::sample(rng, roster_size, CHROMOSOME_LEN);
    let mut genes = [0usize; CHROMOSOME_LEN];
    for (slot, pick) in genes.iter_mut().zip(picks.iter()) {
        *slot = pick;
    }
    Chromosome(genes)
}

/// Builds `population_size` independent random chromosomes.
pub fn initialize_population<R: Rng>(
    roster: &Roster,
    population_size: usize,
    rng: &mut R,
) -> Vec<Chromosome> {
    (0..population_size)
        .map(|_| random_chromosome(roster.size(), rng))
        .collect()
}
