//! GA configuration.
//!
//! [`GaConfig`] holds all parameters that control the evolutionary loop.

use super::operators::{Mutation, RepairPolicy};
use super::selection::Selection;
use crate::error::{Result, TeamError};

/// Configuration for the team-selection GA.
///
/// # Defaults
///
/// ```
/// use team_ga::ga::GaConfig;
///
/// let config = GaConfig::default();
/// assert_eq!(config.population_size, 100);
/// assert_eq!(config.generations, 20);
/// ```
///
/// # Builder Pattern
///
/// ```
/// use team_ga::ga::{GaConfig, RepairPolicy, Selection};
///
/// let config = GaConfig::default()
///     .with_population_size(50)
///     .with_generations(10)
///     .with_mutation_rate(0.1)
///     .with_repair_policy(RepairPolicy::BothParents)
///     .with_seed(42);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GaConfig {
    /// Number of chromosomes per generation. Must be positive and even:
    /// offspring are bred in pairs.
    pub population_size: usize,

    /// Number of breeding iterations after the initial population.
    pub generations: usize,

    /// Per-offspring probability of mutation (0.0–1.0).
    pub mutation_rate: f64,

    /// Mutation operator applied to each offspring.
    pub mutation: Mutation,

    /// Selection strategy for choosing parents.
    pub selection: Selection,

    /// How crossover repairs children with repeated genes.
    pub repair_policy: RepairPolicy,

    /// Evaluate fitness with rayon. Only honored with the `parallel`
    /// feature; results are identical either way.
    pub parallel: bool,

    /// Random seed for reproducibility.
    ///
    /// `None` uses a random seed.
    pub seed: Option<u64>,
}

impl Default for GaConfig {
    fn default() -> Self {
        Self {
            population_size: 100,
            generations: 20,
            mutation_rate: 0.1,
            mutation: Mutation::default(),
            selection: Selection::default(),
            repair_policy: RepairPolicy::default(),
            parallel: false,
            seed: None,
        }
    }
}

impl GaConfig {
    /// Sets the population size.
    pub fn with_population_size(mut self, n: usize) -> Self {
        self.population_size = n;
        self
    }

    /// Sets the number of generations.
    pub fn with_generations(mut self, n: usize) -> Self {
        self.generations = n;
        self
    }

    /// Sets the mutation rate. Not clamped; see [`validate`](Self::validate).
    pub fn with_mutation_rate(mut self, rate: f64) -> Self {
        self.mutation_rate = rate;
        self
    }

    /// Sets the mutation operator.
    pub fn with_mutation(mut self, mutation: Mutation) -> Self {
        self.mutation = mutation;
        self
    }

    /// Sets the selection strategy.
    pub fn with_selection(mut self, sel: Selection) -> Self {
        self.selection = sel;
        self
    }

    pub fn with_repair_policy(mut self, policy: RepairPolicy) -> Self {
        self.repair_policy = policy;
        self
    }

    /// Enables or disables parallel evaluation.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Sets the random seed for reproducibility.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<()> {
        if self.population_size == 0 {
            return Err(invalid("population_size must be positive"));
        }
        if self.population_size % 2 != 0 {
            return Err(invalid(format!(
                "population_size must be even, got {}",
                self.population_size
            )));
        }
        if !(0.0..=1.0).contains(&self.mutation_rate) {
            return Err(invalid(format!(
                "mutation_rate must be within [0, 1], got {}",
                self.mutation_rate
            )));
        }
        if self.selection == Selection::Tournament(0) {
            return Err(invalid("tournament size must be at least 1"));
        }
        Ok(())
    }
}

fn invalid(msg: impl Into<String>) -> TeamError {
    TeamError::InvalidConfiguration(msg.into())
}
