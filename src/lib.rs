//! Residence GA - Evolutionary search for comfortable bathroom configurations.
//!
//! A small genetic algorithm looks for the combination of bathing fixture
//! and amenities with the highest comfort score. Amenity points are capped
//! at twice the fixture's own points, so piling extras onto a plain shower
//! stops paying off quickly.
//!
//! # Architecture
//!
//! The crate is split into two main modules:
//!
//! - `schema`: Configuration, feature vector and report types
//! - `compute`: The optimizer (population store, fitness, selection, reproduction, engine)
//!
//! # Example
//!
//! ```rust,no_run
//! use residence_ga::{EvolutionConfig, EvolutionEngine};
//!
//! let mut engine = EvolutionEngine::new(EvolutionConfig::default())?;
//! let result = engine.run()?;
//!
//! println!("{}", result.best);
//! # Ok::<(), residence_ga::EvolutionError>(())
//! ```

pub mod compute;
pub mod schema;

// Re-export commonly used types
pub use compute::{EvolutionEngine, EvolutionError, Individual, Population, ResidenceRng};
pub use schema::{Amenity, EvolutionConfig, EvolutionResult, Fixture, Residence};
