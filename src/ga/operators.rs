//! Crossover and mutation for team chromosomes.
//!
//! # Crossover
//!
//! [`single_point_crossover`] cuts both parents at a point `k` in `1..=5`
//! and exchanges tails. A cut can pull a candidate into a chromosome that
//! already holds it; such a child is repaired according to
//! [`RepairPolicy`], so crossover never emits a chromosome with repeated
//! genes.
//!
//! # Mutation
//!
//! [`swap_mutation`] exchanges two distinct positions. A swap only moves
//! candidates between (or within) teams, so it cannot break distinctness.
//!
//! [`replace_mutation`] overwrites one position with a candidate drawn from
//! outside the chromosome, the only operator that brings new candidates
//! into a lineage.

use rand::seq::{index, IndexedRandom};
use rand::Rng;

use super::chromosome::{Chromosome, CHROMOSOME_LEN};

/// How crossover handles a child with repeated genes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum RepairPolicy {
    /// Each invalid child is replaced by its own first parent
    /// (`child1 <- parent1`, `child2 <- parent2`); a valid sibling is kept.
    #[default]
    PerChild,

    /// If either child is invalid, both parents are returned unchanged.
    BothParents,
}

/// Mutation operator applied to every offspring.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Mutation {
    /// Exchange two positions ([`swap_mutation`]).
    #[default]
    Swap,

    /// Replace one member with a non-member ([`replace_mutation`]).
    Replace,
}

impl Mutation {
    /// Applies this operator with probability `rate`.
    ///
    /// Returns whether the chromosome changed.
    pub fn apply<R: Rng>(
        &self,
        chromosome: &mut Chromosome,
        roster_size: usize,
        rate: f64,
        rng: &mut R,
    ) -> bool {
        match self {
            Mutation::Swap => swap_mutation(chromosome, rate, rng),
            Mutation::Replace => replace_mutation(chromosome, roster_size, rate, rng),
        }
    }
}

/// Single-point crossover with a uniformly random cut in `1..CHROMOSOME_LEN`.
pub fn single_point_crossover<R: Rng>(
    parent1: &Chromosome,
    parent2: &Chromosome,
    policy: RepairPolicy,
    rng: &mut R,
) -> (Chromosome, Chromosome) {
    let point = rng.random_range(1..CHROMOSOME_LEN);
    crossover_at(parent1, parent2, point, policy)
}

/// Crossover at a fixed cut point.
///
/// `child1 = parent1[..point] ++ parent2[point..]` and
/// `child2 = parent2[..point] ++ parent1[point..]`, then repaired.
///
/// # Panics
/// Panics if `point` is not in `1..CHROMOSOME_LEN`.
pub fn crossover_at(
    parent1: &Chromosome,
    parent2: &Chromosome,
    point: usize,
    policy: RepairPolicy,
) -> (Chromosome, Chromosome) {
    assert!(
        (1..CHROMOSOME_LEN).contains(&point),
        "crossover point {point} outside 1..{CHROMOSOME_LEN}"
    );

    let child1 = splice(parent1, parent2, point);
    let child2 = splice(parent2, parent1, point);

    match policy {
        RepairPolicy::PerChild => (
            if child1.has_distinct_genes() { child1 } else { *parent1 },
            if child2.has_distinct_genes() { child2 } else { *parent2 },
        ),
        RepairPolicy::BothParents => {
            if child1.has_distinct_genes() && child2.has_distinct_genes() {
                (child1, child2)
            } else {
                (*parent1, *parent2)
            }
        }
    }
}

/// Head of `head` up to `point`, tail of `tail` from `point`.
fn splice(head: &Chromosome, tail: &Chromosome, point: usize) -> Chromosome {
    let mut genes = *tail.genes();
    genes[..point].copy_from_slice(&head.genes()[..point]);
    Chromosome::new(genes)
}

/// With probability `rate`, swaps two distinct positions in place.
///
/// Returns whether a swap happened.
///
/// # Panics
/// Panics if `rate` is outside `[0, 1]`; [`GaConfig::validate`] rejects such
/// rates up front.
///
/// [`GaConfig::validate`]: super::GaConfig::validate
pub fn swap_mutation<R: Rng>(chromosome: &mut Chromosome, rate: f64, rng: &mut R) -> bool {
    if !rng.random_bool(rate) {
        return false;
    }
    let picks = index::sample(rng, CHROMOSOME_LEN, 2);
    chromosome.genes_mut().swap(picks.index(0), picks.index(1));
    true
}

/// With probability `rate`, replaces a random position with a candidate
/// from `0..roster_size` that the chromosome does not already hold.
///
/// Returns whether a replacement happened; a roster with no outsiders
/// leaves the chromosome unchanged.
///
/// # Panics
/// Panics if `rate` is outside `[0, 1]`.
pub fn replace_mutation<R: Rng>(
    chromosome: &mut Chromosome,
    roster_size: usize,
    rate: f64,
    rng: &mut R,
) -> bool {
    if !rng.random_bool(rate) {
        return false;
    }
    let outsiders: Vec<usize> = (0..roster_size)
        .filter(|i| !chromosome.genes().contains(i))
        .collect();
    let Some(&newcomer) = outsiders.choose(rng) else {
        return false;
    };
    let position = rng.random_range(0..CHROMOSOME_LEN);
    chromosome.genes_mut()[position] = newcomer;
    true
}
