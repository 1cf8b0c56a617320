//! Genetic Algorithm for two-team selection.
//!
//! A chromosome is six distinct roster indices: the first three form team A,
//! the last three team B. Fitness is the product of team A's `skill_a`
//! values plus the product of team B's `skill_b` values, maximized.
//!
//! # Key Types
//!
//! - [`Chromosome`]: Index encoding of a team pair
//! - [`GaConfig`]: Algorithm parameters (population size, generations, rates)
//! - [`GaRunner`]: Executes the evolutionary loop
//! - [`GaResult`]: Best chromosome, its fitness, and when it was found
//!
//! # Submodules
//!
//! - [`operators`]: Single-point crossover with repair, swap and replace
//!   mutation
//!
//! # References
//!
//! - Holland (1975), *Adaptation in Natural and Artificial Systems*
//! - Goldberg (1989), *Genetic Algorithms in Search, Optimization, and Machine Learning*

mod chromosome;
mod config;
pub mod operators;
mod runner;
mod selection;

pub use chromosome::{
    initialize_population, random_chromosome, Chromosome, CHROMOSOME_LEN, TEAM_SIZE,
};
pub use config::GaConfig;
pub use operators::{Mutation, RepairPolicy};
pub use runner::{GaResult, GaRunner, GenerationStats};
pub use selection::Selection;
