//! Error taxonomy.
//!
//! Both variants are fatal and surface at construction time. A generation
//! whose total fitness is zero is not an error: selection falls back to
//! uniform sampling and the runner logs a warning.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum TeamError {
    #[error("invalid roster: {found} candidates supplied, at least {required} required")]
    InvalidRoster { found: usize, required: usize },

    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),
}

pub type Result<T> = std::result::Result<T, TeamError>;
