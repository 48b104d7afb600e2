//! Evolutionary search for comfortable residence configurations.
//!
//! # Overview
//!
//! The evolutionary search system consists of:
//!
//! - **Population** (`population`): Fixed-capacity candidate arena, reset and reused every generation
//! - **Fitness** (`fitness`): Capped comfort score and informational cost
//! - **Selection** (`selection`): Full sort by fitness, truncated to the survivor count
//! - **Genome Operations** (`genome`): Seedable random generation, uniform crossover, and bit-flip mutation
//! - **Reproduction** (`reproduce`): Elitism plus crossover restricted to the elite set
//! - **Search** (`search`): The double-buffered generation loop
//!
//! # Example
//!
//! ```rust,no_run
//! use residence_ga::schema::EvolutionConfig;
//! use residence_ga::compute::evolution::EvolutionEngine;
//!
//! let config = EvolutionConfig {
//!     random_seed: Some(42),
//!     ..Default::default()
//! };
//!
//! let mut engine = EvolutionEngine::new(config)?;
//! let result = engine.run_with_callback(|progress| {
//!     println!("Generation {}: best fitness = {:.2}",
//!         progress.generation, progress.best_fitness);
//! })?;
//!
//! println!("{}", result.best);
//! # Ok::<(), residence_ga::compute::evolution::EvolutionError>(())
//! ```

mod error;
mod fitness;
mod genome;
mod population;
mod reproduce;
mod search;
mod selection;

pub use error::EvolutionError;
pub use fitness::{Evaluation, evaluate, evaluate_population};
pub use genome::ResidenceRng;
pub use population::{Individual, Population};
pub use reproduce::reproduce;
pub use search::EvolutionEngine;
pub use selection::{Ranked, select, select_into};
