//! GA evolutionary loop execution.
//!
//! [`GaRunner`] orchestrates the complete evolutionary process:
//! initialization → evaluation → selection → crossover → mutation →
//! replacement → evaluation → ...
//!
//! Generation 0 is the initial population. Each of the
//! [`GaConfig::generations`] iterations breeds a fresh population from the
//! previous one and evaluates it. The best chromosome ever evaluated is
//! tracked across the run and only replaced on strict improvement.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use log::{debug, info, warn};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
#[cfg(feature = "parallel")]
use rayon::prelude::*;

use super::chromosome::{initialize_population, Chromosome};
use super::config::GaConfig;
use super::operators::single_point_crossover;
use super::selection::total_fitness;
use crate::error::Result;
use crate::roster::Roster;

/// Result of a GA run.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GaResult {
    /// The best chromosome evaluated during the run.
    pub best: Chromosome,

    /// Fitness of `best`.
    pub best_fitness: u64,

    /// Generation at which `best_fitness` was first reached.
    pub found_at_generation: usize,

    /// Number of breeding iterations executed.
    pub generations: usize,

    /// Whether the run was cancelled externally.
    pub cancelled: bool,

    /// Best-so-far fitness after each evaluated generation, starting with
    /// the initial population.
    pub fitness_history: Vec<u64>,
}

/// Per-generation progress event.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationStats {
    pub generation: usize,
    /// Best fitness within this generation.
    pub best_fitness: u64,
    pub mean_fitness: f64,
    /// Chromosomes scoring zero (repeated genes).
    pub invalid_count: usize,
    /// Best fitness across all generations so far.
    pub best_so_far: u64,
}

/// Executes the GA evolutionary loop.
///
/// # Usage
///
/// ```
/// use team_ga::ga::{GaConfig, GaRunner};
/// use team_ga::roster::{builtin_candidates, Roster};
///
/// let roster = Roster::load(builtin_candidates()).unwrap();
/// let config = GaConfig::default().with_population_size(50).with_seed(42);
/// let result = GaRunner::run(&roster, &config).unwrap();
/// assert_eq!(result.best_fitness, roster.fitness(&result.best));
/// ```
pub struct GaRunner;

impl GaRunner {
    /// Runs the GA to completion.
    pub fn run(roster: &Roster, config: &GaConfig) -> Result<GaResult> {
        Self::run_with_cancel(roster, config, None, |_| {})
    }

    /// Runs the GA, reporting each evaluated generation to `on_generation`.
    pub fn run_with_progress<F>(
        roster: &Roster,
        config: &GaConfig,
        on_generation: F,
    ) -> Result<GaResult>
    where
        F: FnMut(&GenerationStats),
    {
        Self::run_with_cancel(roster, config, None, on_generation)
    }

    /// Runs the GA with an optional cancellation token.
    ///
    /// The flag is checked before each breeding iteration. When set, the
    /// run stops and returns the best chromosome found so far.
    pub fn run_with_cancel<F>(
        roster: &Roster,
        config: &GaConfig,
        cancel: Option<Arc<AtomicBool>>,
        mut on_generation: F,
    ) -> Result<GaResult>
    where
        F: FnMut(&GenerationStats),
    {
        config.validate()?;

        let seed = config.seed.unwrap_or_else(rand::random);
        let mut rng = StdRng::seed_from_u64(seed);
        debug!(
            "starting GA: roster={} population={} generations={} mutation_rate={} seed={}",
            roster.size(),
            config.population_size,
            config.generations,
            config.mutation_rate,
            seed
        );

        // 1. Initialize and evaluate generation 0
        let mut population = initialize_population(roster, config.population_size, &mut rng);
        let mut fitness = evaluate_population(roster, &population, config.parallel);

        let (idx, &initial_best) = generation_best(&fitness);
        let mut tracker = BestTracker {
            best: population[idx],
            best_fitness: initial_best,
            found_at_generation: 0,
            history: Vec::with_capacity(config.generations + 1),
        };
        on_generation(&tracker.observe(0, &population, &fitness));

        // 2. Evolutionary loop
        let mut completed = 0;
        let mut cancelled = false;
        for gen in 1..=config.generations {
            if let Some(ref flag) = cancel {
                if flag.load(Ordering::Relaxed) {
                    cancelled = true;
                    break;
                }
            }

            population = breed(&population, &fitness, roster.size(), config, &mut rng);
            fitness = evaluate_population(roster, &population, config.parallel);
            on_generation(&tracker.observe(gen, &population, &fitness));
            completed = gen;
        }

        info!(
            "GA finished: best fitness {} found at generation {}{}",
            tracker.best_fitness,
            tracker.found_at_generation,
            if cancelled { " (cancelled)" } else { "" }
        );

        Ok(GaResult {
            best: tracker.best,
            best_fitness: tracker.best_fitness,
            found_at_generation: tracker.found_at_generation,
            generations: completed,
            cancelled,
            fitness_history: tracker.history,
        })
    }
}

/// Best-so-far bookkeeping across generations.
struct BestTracker {
    best: Chromosome,
    best_fitness: u64,
    found_at_generation: usize,
    history: Vec<u64>,
}

impl BestTracker {
    /// Records one evaluated generation and builds its progress event.
    fn observe(
        &mut self,
        generation: usize,
        population: &[Chromosome],
        fitness: &[u64],
    ) -> GenerationStats {
        let (idx, &gen_best) = generation_best(fitness);
        if gen_best > self.best_fitness {
            self.best = population[idx];
            self.best_fitness = gen_best;
            self.found_at_generation = generation;
        }
        self.history.push(self.best_fitness);

        let total = total_fitness(fitness);
        if total == 0 {
            warn!("generation {generation}: total fitness is zero");
        }
        info!(
            "generation {generation}: best fitness {gen_best} (best so far {})",
            self.best_fitness
        );

        GenerationStats {
            generation,
            best_fitness: gen_best,
            mean_fitness: total as f64 / fitness.len() as f64,
            invalid_count: fitness.iter().filter(|&&f| f == 0).count(),
            best_so_far: self.best_fitness,
        }
    }
}

/// Breeds the next population: `population_size / 2` rounds of
/// select → crossover → mutate, two children per round.
fn breed<R: Rng>(
    population: &[Chromosome],
    fitness: &[u64],
    roster_size: usize,
    config: &GaConfig,
    rng: &mut R,
) -> Vec<Chromosome> {
    let mut next = Vec::with_capacity(population.len());
    for _ in 0..population.len() / 2 {
        let parent1 = config.selection.select(population, fitness, rng);
        let parent2 = config.selection.select(population, fitness, rng);

        let (mut child1, mut child2) =
            single_point_crossover(parent1, parent2, config.repair_policy, rng);

        let rate = config.mutation_rate;
        config.mutation.apply(&mut child1, roster_size, rate, rng);
        config.mutation.apply(&mut child2, roster_size, rate, rng);

        next.push(child1);
        next.push(child2);
    }
    next
}

/// Evaluate all chromosomes in the population.
#[cfg(feature = "parallel")]
fn evaluate_population(roster: &Roster, population: &[Chromosome], parallel: bool) -> Vec<u64> {
    if parallel {
        population.par_iter().map(|c| roster.fitness(c)).collect()
    } else {
        population.iter().map(|c| roster.fitness(c)).collect()
    }
}

/// Evaluate all chromosomes in the population.
#[cfg(not(feature = "parallel"))]
fn evaluate_population(roster: &Roster, population: &[Chromosome], _parallel: bool) -> Vec<u64> {
    population.iter().map(|c| roster.fitness(c)).collect()
}

/// Index and value of the first maximum.
fn generation_best(fitness: &[u64]) -> (usize, &u64) {
    let mut best = 0;
    for (i, f) in fitness.iter().enumerate().skip(1) {
        if *f > fitness[best] {
            best = i;
        }
    }
    (best, &fitness[best])
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TeamError;
    use crate::ga::{Mutation, RepairPolicy, Selection};
    use crate::roster::Candidate;
    use crate::roster::builtin_candidates;

    /// Best achievable fitness on the built-in roster.
    const BUILTIN_OPTIMUM: u64 = 1_915_800;

    fn builtin_roster() -> Roster {
        Roster::load(builtin_candidates()).unwrap()
    }

    fn sample_config() -> GaConfig {
        GaConfig::default()
            .with_population_size(50)
            .with_generations(10)
            .with_mutation_rate(0.1)
            .with_seed(42)
    }

    #[test]
    fn test_end_to_end_builtin_roster() {
        let roster = builtin_roster();
        let result = GaRunner::run(&roster, &sample_config()).unwrap();

        assert!(result.best.is_valid_for(11), "invalid best {:?}", result.best);
        assert_eq!(result.best_fitness, roster.fitness(&result.best));
        assert!(result.best_fitness <= BUILTIN_OPTIMUM);
        assert_eq!(result.generations, 10);
        assert!(!result.cancelled);
        assert_eq!(result.fitness_history.len(), 11);
    }

    #[test]
    fn test_optimum_matches_brute_force() {
        let roster = builtin_roster();
        let n = roster.size();
        let mut optimum = 0;
        for a in 0..n {
            for b in 0..n {
                for c in 0..n {
                    for d in 0..n {
                        for e in 0..n {
                            for f in 0..n {
                                let chromosome = Chromosome::new([a, b, c, d, e, f]);
                                optimum = optimum.max(roster.fitness(&chromosome));
                            }
                        }
                    }
                }
            }
        }
        assert_eq!(optimum, BUILTIN_OPTIMUM);
    }

    #[test]
    fn test_converges_near_optimum() {
        let roster = builtin_roster();
        let config = GaConfig::default()
            .with_population_size(100)
            .with_generations(50)
            .with_seed(42);
        let result = GaRunner::run(&roster, &config).unwrap();
        assert!(
            result.best_fitness as f64 >= 0.85 * BUILTIN_OPTIMUM as f64,
            "expected near-optimal fitness, got {}",
            result.best_fitness
        );
    }

    #[test]
    fn test_seeded_runs_are_identical() {
        let roster = builtin_roster();
        let a = GaRunner::run(&roster, &sample_config()).unwrap();
        let b = GaRunner::run(&roster, &sample_config()).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_history_is_monotonic() {
        let roster = builtin_roster();
        let config = sample_config().with_generations(40).with_mutation_rate(0.5);
        let result = GaRunner::run(&roster, &config).unwrap();
        for window in result.fitness_history.windows(2) {
            assert!(window[1] >= window[0], "best-so-far decreased: {window:?}");
        }
        assert_eq!(result.fitness_history.last(), Some(&result.best_fitness));
    }

    #[test]
    fn test_found_at_generation_is_first_hit() {
        let roster = builtin_roster();
        let result = GaRunner::run(&roster, &sample_config().with_generations(30)).unwrap();
        let found = result.found_at_generation;
        assert_eq!(result.fitness_history[found], result.best_fitness);
        if found > 0 {
            assert!(result.fitness_history[found - 1] < result.best_fitness);
        }
    }

    #[test]
    fn test_progress_events() {
        let roster = builtin_roster();
        let mut events = Vec::new();
        let result = GaRunner::run_with_progress(&roster, &sample_config(), |stats| {
            events.push(stats.clone());
        })
        .unwrap();

        assert_eq!(events.len(), 11);
        for (i, stats) in events.iter().enumerate() {
            assert_eq!(stats.generation, i);
            assert!(stats.best_fitness <= stats.best_so_far);
            assert!(stats.mean_fitness <= stats.best_fitness as f64);
            assert_eq!(stats.best_so_far, result.fitness_history[i]);
        }
        assert_eq!(events[0].invalid_count, 0, "initial population is always valid");
    }

    #[test]
    fn test_zero_generations_returns_initial_best() {
        let roster = builtin_roster();
        let result = GaRunner::run(&roster, &sample_config().with_generations(0)).unwrap();
        assert_eq!(result.generations, 0);
        assert_eq!(result.found_at_generation, 0);
        assert_eq!(result.fitness_history, vec![result.best_fitness]);
    }

    #[test]
    fn test_every_offspring_stays_valid() {
        // Mutation rate 1 with both repair policies exercises every operator path.
        let roster = builtin_roster();
        let n = roster.size();
        for policy in [RepairPolicy::PerChild, RepairPolicy::BothParents] {
            for mutation in [Mutation::Swap, Mutation::Replace] {
                let config = sample_config()
                    .with_mutation_rate(1.0)
                    .with_mutation(mutation)
                    .with_repair_policy(policy);
                let mut rng = StdRng::seed_from_u64(9);
                let mut population =
                    initialize_population(&roster, config.population_size, &mut rng);
                for _ in 0..20 {
                    let fitness = evaluate_population(&roster, &population, false);
                    population = breed(&population, &fitness, n, &config, &mut rng);
                    assert_eq!(population.len(), config.population_size);
                    for c in &population {
                        assert!(c.is_valid_for(n), "{policy:?}/{mutation:?}: {c:?}");
                    }
                }
            }
        }
    }

    #[test]
    fn test_breed_with_zero_fitness_population() {
        let roster = builtin_roster();
        let config = sample_config();
        let mut rng = StdRng::seed_from_u64(1);
        let population = initialize_population(&roster, 10, &mut rng);
        let next = breed(&population, &[0; 10], roster.size(), &config, &mut rng);
        assert_eq!(next.len(), 10);
    }

    #[test]
    fn test_zero_fitness_roster_runs_to_completion() {
        let roster = Roster::load(
            (0..8)
                .map(|i| Candidate::new(format!("c{i}"), 0, 0))
                .collect(),
        )
        .unwrap();
        let config = GaConfig::default()
            .with_population_size(10)
            .with_generations(3)
            .with_seed(1);

        let mut events = Vec::new();
        let result = GaRunner::run_with_progress(&roster, &config, |stats| {
            events.push(stats.clone());
        })
        .unwrap();

        assert_eq!(events.len(), 4);
        for stats in &events {
            assert_eq!(stats.best_fitness, 0);
            assert_eq!(stats.best_so_far, 0);
            assert_eq!(stats.mean_fitness, 0.0);
        }
        assert_eq!(result.generations, 3);
        assert_eq!(result.best_fitness, 0);
        assert_eq!(result.found_at_generation, 0);
        assert!(result.best.is_valid_for(8));
        assert_eq!(result.fitness_history, vec![0; 4]);
    }

    #[test]
    fn test_replace_mutation_run() {
        let roster = builtin_roster();
        let config = sample_config()
            .with_mutation(Mutation::Replace)
            .with_mutation_rate(0.3);
        let a = GaRunner::run(&roster, &config).unwrap();
        let b = GaRunner::run(&roster, &config).unwrap();
        assert_eq!(a, b);
        assert!(a.best.is_valid_for(roster.size()));
        assert_eq!(a.best_fitness, roster.fitness(&a.best));
    }

    #[test]
    fn test_tournament_selection_run() {
        let roster = builtin_roster();
        let config = sample_config().with_selection(Selection::Tournament(3));
        let result = GaRunner::run(&roster, &config).unwrap();
        assert_eq!(result.best_fitness, roster.fitness(&result.best));
    }

    #[test]
    fn test_parallel_flag_does_not_change_result() {
        let roster = builtin_roster();
        let sequential = GaRunner::run(&roster, &sample_config()).unwrap();
        let parallel = GaRunner::run(&roster, &sample_config().with_parallel(true)).unwrap();
        assert_eq!(sequential, parallel);
    }

    #[test]
    fn test_cancellation_before_first_generation() {
        let roster = builtin_roster();
        let cancel = Arc::new(AtomicBool::new(true));
        let config = sample_config().with_generations(1000);
        let result = GaRunner::run_with_cancel(&roster, &config, Some(cancel), |_| {}).unwrap();
        assert!(result.cancelled);
        assert_eq!(result.generations, 0);
        assert_eq!(result.fitness_history.len(), 1);
    }

    #[test]
    fn test_cancellation_mid_run() {
        let roster = builtin_roster();
        let cancel = Arc::new(AtomicBool::new(false));
        let flag = cancel.clone();
        let result = GaRunner::run_with_cancel(
            &roster,
            &sample_config().with_generations(1000),
            Some(cancel),
            |stats| {
                if stats.generation == 5 {
                    flag.store(true, Ordering::Relaxed);
                }
            },
        )
        .unwrap();
        assert!(result.cancelled);
        assert_eq!(result.generations, 5);
    }

    #[test]
    fn test_invalid_config_rejected() {
        let roster = builtin_roster();
        let err = GaRunner::run(&roster, &sample_config().with_population_size(7)).unwrap_err();
        assert!(matches!(err, TeamError::InvalidConfiguration(_)));
    }

    #[test]
    fn test_generation_best_prefers_first() {
        assert_eq!(generation_best(&[3, 9, 9, 1]), (1, &9));
        assert_eq!(generation_best(&[0, 0]), (0, &0));
    }
}
