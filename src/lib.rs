//! Evolutionary team selection.
//!
//! Picks two disjoint three-member teams from a roster of scored candidates
//! so that `product(team A skill_a) + product(team B skill_b)` is as large
//! as possible, using a genetic algorithm instead of exhaustive search.
//!
//! - [`roster`]: Immutable candidate registry and team rendering
//! - [`ga`]: Chromosome encoding, fitness, operators, and the generational
//!   loop
//! - [`error`]: Fatal construction errors
//!
//! # Example
//!
//! ```
//! use team_ga::ga::GaConfig;
//! use team_ga::roster::builtin_candidates;
//!
//! let config = GaConfig::default()
//!     .with_population_size(50)
//!     .with_generations(10)
//!     .with_seed(7);
//! let result = team_ga::run(builtin_candidates(), &config).unwrap();
//! assert!(result.best.is_valid_for(11));
//! ```

pub mod error;
pub mod ga;
pub mod roster;

pub use error::{Result, TeamError};

use ga::{GaConfig, GaResult, GaRunner};
use roster::{Candidate, Roster};

/// Loads `candidates` and runs the GA once.
pub fn run(candidates: Vec<Candidate>, config: &GaConfig) -> Result<GaResult> {
    let roster = Roster::load(candidates)?;
    GaRunner::run(&roster, config)
}
