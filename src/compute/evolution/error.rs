//! Precondition failures of the evolutionary pipeline.
//!
//! None of these are operating conditions: each one means a caller broke a
//! buffer or sizing contract, and the run must stop.

use crate::schema::{ConfigError, InvariantError};

#[derive(Debug, thiserror::Error)]
pub enum EvolutionError {
    #[error("Cannot allocate {requested} slots: {len} of {capacity} already in use")]
    CapacityExceeded {
        requested: usize,
        len: usize,
        capacity: usize,
    },
    #[error("Index {index} out of range for population of {len}")]
    IndexOutOfRange { index: usize, len: usize },
    #[error("Cannot select {requested} survivors from a population of {len}")]
    TooManySurvivors { requested: usize, len: usize },
    #[error("Ranking holds {len} entries but {required} survivors are required")]
    RankingTooShort { len: usize, required: usize },
    #[error("Reproduction target must be empty, found {len} candidates")]
    TargetNotEmpty { len: usize },
    #[error("Cannot breed offspring without survivors")]
    NoSurvivors,
    #[error("Population is empty")]
    EmptyPopulation,
    #[error(transparent)]
    Invariant(#[from] InvariantError),
    #[error("Invalid configuration: {0}")]
    Config(#[from] ConfigError),
}
