//! Progress and result types reported by the evolution engine.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::Residence;

/// Serializable view of an evaluated candidate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CandidateReport {
    /// Feature vector.
    pub residence: Residence,
    /// Fitness as used for ranking.
    pub fitness: f32,
    /// Comfort points recomputed from the feature vector.
    pub points: f32,
    /// Installation cost. Informational only, never used for ranking.
    pub cost: f32,
}

impl fmt::Display for CandidateReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Fitness: {:.2}", self.fitness)?;
        writeln!(f, "Cost: {:.2}", self.cost)?;
        writeln!(f, "Residence features: ")?;
        write!(f, "{}", self.residence)
    }
}

/// Engine state machine position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EvolutionPhase {
    /// Buffers allocated and filled with random candidates.
    Initializing,
    /// Computing fitness of the current buffer.
    Evaluating,
    /// Ranking the current buffer.
    Selecting,
    /// Breeding the next buffer.
    Reproducing,
    /// Exchanging current and next buffers.
    Swapping,
    /// Final evaluation and selection.
    Finalizing,
    /// Run complete.
    Done,
}

/// Per-generation fitness statistics.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EvolutionHistory {
    /// Best fitness per evaluated generation.
    pub best_fitness: Vec<f32>,
    /// Mean fitness per evaluated generation.
    pub mean_fitness: Vec<f32>,
    /// Fitness standard deviation per evaluated generation.
    pub fitness_std: Vec<f32>,
}

impl EvolutionHistory {
    /// Empty history with room for `generations` entries per series.
    pub fn with_capacity(generations: usize) -> Self {
        Self {
            best_fitness: Vec::with_capacity(generations),
            mean_fitness: Vec::with_capacity(generations),
            fitness_std: Vec::with_capacity(generations),
        }
    }

    /// Number of recorded generations.
    pub fn len(&self) -> usize {
        self.best_fitness.len()
    }

    pub fn is_empty(&self) -> bool {
        self.best_fitness.is_empty()
    }
}

/// Snapshot passed to progress callbacks.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvolutionProgress {
    /// Completed generations.
    pub generation: usize,
    /// Generations configured for the run.
    pub total_generations: usize,
    /// Best fitness seen in any evaluated generation.
    pub best_fitness: f32,
    /// Mean fitness of the most recently evaluated generation.
    pub mean_fitness: f32,
    /// Best candidate of the most recently evaluated generation.
    pub best_candidate: Option<CandidateReport>,
    /// Current state.
    pub phase: EvolutionPhase,
}

/// Summary statistics of a finished run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvolutionStats {
    pub generations: usize,
    /// Fitness evaluations performed, final pass included.
    pub total_evaluations: u64,
    pub best_fitness: f32,
    pub final_mean_fitness: f32,
    pub elapsed_seconds: f64,
}

/// Output of a complete run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvolutionResult {
    /// Fittest candidate of the final generation.
    pub best: CandidateReport,
    pub stats: EvolutionStats,
    pub history: EvolutionHistory,
}
