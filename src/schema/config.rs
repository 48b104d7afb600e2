//! Configuration types for evolutionary residence search.

use serde::{Deserialize, Serialize};

/// Tunable constants for one evolutionary run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvolutionConfig {
    /// Total individuals per generation.
    #[serde(default = "default_population_size")]
    pub population_size: usize,
    /// Number of evolutionary cycles before the final selection.
    #[serde(default = "default_generations")]
    pub generations: usize,
    /// Elite count retained verbatim and used as the parent pool.
    #[serde(default = "default_survivors")]
    pub survivors: usize,
    /// Per-flag flip probability (0.0-1.0).
    #[serde(default = "default_mutation_rate")]
    pub mutation_rate: f32,
    /// Random seed for reproducibility. Seeded from entropy when absent.
    #[serde(default)]
    pub random_seed: Option<u64>,
}

impl Default for EvolutionConfig {
    fn default() -> Self {
        Self {
            population_size: default_population_size(),
            generations: default_generations(),
            survivors: default_survivors(),
            mutation_rate: default_mutation_rate(),
            random_seed: None,
        }
    }
}

fn default_population_size() -> usize {
    32
}
fn default_generations() -> usize {
    4
}
fn default_survivors() -> usize {
    16
}
fn default_mutation_rate() -> f32 {
    0.05
}

impl EvolutionConfig {
    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.population_size == 0 {
            return Err(ConfigError::EmptyPopulation);
        }
        if self.survivors == 0 {
            return Err(ConfigError::NoSurvivors);
        }
        if self.survivors > self.population_size {
            return Err(ConfigError::TooManySurvivors {
                survivors: self.survivors,
                population_size: self.population_size,
            });
        }
        if !self.mutation_rate.is_finite() || !(0.0..=1.0).contains(&self.mutation_rate) {
            return Err(ConfigError::InvalidMutationRate(self.mutation_rate));
        }
        Ok(())
    }
}

/// Configuration validation errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Population size must be non-zero")]
    EmptyPopulation,
    #[error("Survivor count must be non-zero")]
    NoSurvivors,
    #[error("Survivor count {survivors} exceeds population size {population_size}")]
    TooManySurvivors {
        survivors: usize,
        population_size: usize,
    },
    #[error("Mutation rate must be within [0, 1], got {0}")]
    InvalidMutationRate(f32),
}
