//! Generation loop driving evaluation, selection and reproduction.

use std::mem;
use std::time::Instant;

use crate::schema::{
    EvolutionConfig, EvolutionHistory, EvolutionPhase, EvolutionProgress, EvolutionResult,
    EvolutionStats,
};

use super::error::EvolutionError;
use super::fitness::evaluate_population;
use super::genome::ResidenceRng;
use super::population::{Individual, Population};
use super::reproduce::reproduce;
use super::selection::{Ranked, select_into};

/// Evolution engine that runs the search.
///
/// Owns two population buffers of equal capacity. Each generation the
/// `current` buffer is evaluated and ranked, offspring are written into
/// `next`, and the two swap roles. Neither buffer is reallocated after
/// construction.
pub struct EvolutionEngine {
    config: EvolutionConfig,
    rng: ResidenceRng,
    /// `None` once a caller-supplied random source replaced the seeded one.
    seed: Option<u64>,
    current: Population,
    next: Population,
    ranking: Vec<Ranked>,
    history: EvolutionHistory,
    generation: usize,
    evaluations: u64,
    best_fitness: f32,
    best_candidate: Option<Individual>,
    phase: EvolutionPhase,
}

impl EvolutionEngine {
    /// Create a new evolution engine.
    pub fn new(config: EvolutionConfig) -> Result<Self, EvolutionError> {
        config.validate()?;

        let seed = config.random_seed.unwrap_or_else(rand::random);

        Ok(Self {
            rng: ResidenceRng::new(seed),
            seed: Some(seed),
            current: Population::new(config.population_size),
            next: Population::new(config.population_size),
            ranking: Vec::with_capacity(config.population_size),
            history: EvolutionHistory::default(),
            generation: 0,
            evaluations: 0,
            best_fitness: f32::NEG_INFINITY,
            best_candidate: None,
            phase: EvolutionPhase::Initializing,
            config,
        })
    }

    /// Replace the random source.
    pub fn with_rng(mut self, rng: ResidenceRng) -> Self {
        self.rng = rng;
        self.seed = None;
        self
    }

    /// Seed of the random source, unless one was injected with `with_rng`.
    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    pub fn config(&self) -> &EvolutionConfig {
        &self.config
    }

    /// The buffer holding the live generation.
    pub fn current(&self) -> &Population {
        &self.current
    }

    pub fn generation(&self) -> usize {
        self.generation
    }

    pub fn phase(&self) -> EvolutionPhase {
        self.phase
    }

    pub fn history(&self) -> &EvolutionHistory {
        &self.history
    }

    /// Initialize the population with random residences.
    pub fn initialize(&mut self) -> Result<(), EvolutionError> {
        self.phase = EvolutionPhase::Initializing;
        self.current.reset();
        self.next.reset();
        // One entry per generation plus the final evaluation.
        self.history = EvolutionHistory::with_capacity(self.config.generations + 1);
        self.generation = 0;
        self.evaluations = 0;
        self.best_fitness = f32::NEG_INFINITY;
        self.best_candidate = None;

        match self.seed {
            Some(seed) => log::info!("random seed: {}", seed),
            None => log::info!("random seed: injected random source"),
        }

        for slot in self.current.allocate(self.config.population_size)? {
            *slot = Individual::new(self.rng.random_residence());
        }

        log::info!("Starting population: {}", self.current.len());
        Ok(())
    }

    /// Evaluate all candidates in the current buffer and record statistics.
    fn evaluate(&mut self) {
        self.phase = EvolutionPhase::Evaluating;
        evaluate_population(&mut self.current);
        self.evaluations += self.current.len() as u64;

        let gen_best = self
            .current
            .iter()
            .map(|c| c.fitness)
            .fold(f32::NEG_INFINITY, f32::max);
        self.best_fitness = self.best_fitness.max(gen_best);

        self.history.best_fitness.push(gen_best);
        self.history.mean_fitness.push(self.current.mean_fitness());
        self.history.fitness_std.push(self.current.fitness_std());
    }

    /// Rank the current buffer, keeping the top `count`.
    fn select(&mut self, count: usize) -> Result<(), EvolutionError> {
        self.phase = EvolutionPhase::Selecting;
        select_into(&self.current, count, &mut self.ranking)?;

        if let Some(top) = self.ranking.first() {
            self.best_candidate = Some(*self.current.get(top.index)?);
        }
        Ok(())
    }

    /// Run a single generation step.
    pub fn step_generation(&mut self) -> Result<(), EvolutionError> {
        self.evaluate();
        self.select(self.config.survivors)?;

        self.phase = EvolutionPhase::Reproducing;
        reproduce(
            &self.current,
            &self.ranking,
            &mut self.next,
            &self.config,
            &mut self.rng,
        )?;

        self.phase = EvolutionPhase::Swapping;
        mem::swap(&mut self.current, &mut self.next);
        self.next.reset();

        self.generation += 1;
        Ok(())
    }

    /// Evaluate the final generation and return its fittest candidate.
    pub fn finalize(&mut self) -> Result<Individual, EvolutionError> {
        if self.current.is_empty() {
            return Err(EvolutionError::EmptyPopulation);
        }
        self.evaluate();
        self.phase = EvolutionPhase::Finalizing;
        self.select(1)?;

        let top = self.ranking.first().ok_or(EvolutionError::EmptyPopulation)?;
        let best = *self.current.get(top.index)?;

        self.phase = EvolutionPhase::Done;
        Ok(best)
    }

    /// Get current progress.
    pub fn progress(&self) -> EvolutionProgress {
        EvolutionProgress {
            generation: self.generation,
            total_generations: self.config.generations,
            best_fitness: self.best_fitness,
            mean_fitness: self.history.mean_fitness.last().copied().unwrap_or(0.0),
            best_candidate: self.best_candidate.as_ref().map(Individual::to_report),
            phase: self.phase,
        }
    }

    /// Run evolution with progress callback.
    ///
    /// The callback fires once after initialization, once per completed
    /// generation, and once after the final selection.
    pub fn run_with_callback<F>(&mut self, mut callback: F) -> Result<EvolutionResult, EvolutionError>
    where
        F: FnMut(&EvolutionProgress),
    {
        let start_time = Instant::now();

        self.initialize()?;
        callback(&self.progress());

        for generation in 0..self.config.generations {
            log::info!("Generation {} starting...", generation + 1);
            self.step_generation()?;
            log::info!(
                "Generation {} complete: best={:.2} mean={:.2}",
                generation + 1,
                self.history.best_fitness.last().copied().unwrap_or(0.0),
                self.history.mean_fitness.last().copied().unwrap_or(0.0),
            );
            callback(&self.progress());
        }

        log::info!("Final population reached, selecting fittest individual");
        let best = self.finalize()?;
        callback(&self.progress());

        let elapsed = start_time.elapsed().as_secs_f64();

        Ok(EvolutionResult {
            best: best.to_report(),
            stats: EvolutionStats {
                generations: self.generation,
                total_evaluations: self.evaluations,
                best_fitness: self.best_fitness,
                final_mean_fitness: self.current.mean_fitness(),
                elapsed_seconds: elapsed,
            },
            history: self.history.clone(),
        })
    }

    /// Run evolution (blocking).
    pub fn run(&mut self) -> Result<EvolutionResult, EvolutionError> {
        self.run_with_callback(|_| {})
    }
}
