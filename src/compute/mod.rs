//! Compute module - The evolutionary optimizer.

pub mod evolution;

pub use evolution::{EvolutionEngine, EvolutionError, Individual, Population, ResidenceRng};
