//! Fixed-capacity candidate storage reused across generations.

use std::fmt;

use crate::schema::{CandidateReport, Residence};

use super::error::EvolutionError;
use super::fitness;

/// A candidate configuration and its most recent fitness.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Individual {
    /// The feature vector. Never changed after the candidate is written.
    pub residence: Residence,
    /// Comfort points. Only meaningful after the current generation's evaluation.
    pub fitness: f32,
}

impl Individual {
    pub fn new(residence: Residence) -> Self {
        Self {
            residence,
            fitness: 0.0,
        }
    }

    /// Convert to report for display or serialization.
    pub fn to_report(&self) -> CandidateReport {
        let evaluation = fitness::evaluate(&self.residence);
        CandidateReport {
            residence: self.residence,
            fitness: self.fitness,
            points: evaluation.points,
            cost: evaluation.cost,
        }
    }
}

impl fmt::Display for Individual {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Fitness: {:.2}", self.fitness)?;
        writeln!(f, "Residence features: ")?;
        write!(f, "{}", self.residence)
    }
}

/// Contiguous arena of candidates with a fill cursor.
///
/// All slots are allocated up front. `allocate` hands out the next `k`
/// slots and `reset` rewinds the cursor without releasing memory, so a
/// population can be refilled every generation without touching the heap.
/// Slot contents past the cursor are unspecified.
#[derive(Debug, Clone)]
pub struct Population {
    slots: Vec<Individual>,
    len: usize,
}

impl Population {
    /// Create an empty population holding at most `capacity` candidates.
    pub fn new(capacity: usize) -> Self {
        Self {
            slots: vec![Individual::default(); capacity],
            len: 0,
        }
    }

    /// Reserve `count` contiguous slots and return them for writing.
    pub fn allocate(&mut self, count: usize) -> Result<&mut [Individual], EvolutionError> {
        if count > self.remaining() {
            return Err(EvolutionError::CapacityExceeded {
                requested: count,
                len: self.len,
                capacity: self.capacity(),
            });
        }

        let start = self.len;
        self.len += count;
        Ok(&mut self.slots[start..self.len])
    }

    /// Append a single candidate.
    pub fn push(&mut self, individual: Individual) -> Result<(), EvolutionError> {
        self.allocate(1)?[0] = individual;
        Ok(())
    }

    pub fn get(&self, index: usize) -> Result<&Individual, EvolutionError> {
        self.as_slice()
            .get(index)
            .ok_or(EvolutionError::IndexOutOfRange {
                index,
                len: self.len,
            })
    }

    pub fn get_mut(&mut self, index: usize) -> Result<&mut Individual, EvolutionError> {
        let len = self.len;
        self.as_mut_slice()
            .get_mut(index)
            .ok_or(EvolutionError::IndexOutOfRange { index, len })
    }

    /// Rewind the fill cursor. Storage is kept for reuse.
    pub fn reset(&mut self) {
        self.len = 0;
    }

    /// Number of allocated candidates.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Slots still available before the population is full.
    pub fn remaining(&self) -> usize {
        self.capacity() - self.len
    }

    pub fn as_slice(&self) -> &[Individual] {
        &self.slots[..self.len]
    }

    pub fn as_mut_slice(&mut self) -> &mut [Individual] {
        &mut self.slots[..self.len]
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Individual> {
        self.as_slice().iter()
    }

    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, Individual> {
        self.as_mut_slice().iter_mut()
    }

    /// Mean fitness of the allocated candidates, 0 when empty.
    pub fn mean_fitness(&self) -> f32 {
        if self.is_empty() {
            return 0.0;
        }
        self.iter().map(|c| c.fitness).sum::<f32>() / self.len as f32
    }

    /// Fitness standard deviation of the allocated candidates.
    pub fn fitness_std(&self) -> f32 {
        if self.is_empty() {
            return 0.0;
        }
        let mean = self.mean_fitness();
        let variance = self
            .iter()
            .map(|c| (c.fitness - mean).powi(2))
            .sum::<f32>()
            / self.len as f32;
        variance.sqrt()
    }
}

impl<'a> IntoIterator for &'a Population {
    type Item = &'a Individual;
    type IntoIter = std::slice::Iter<'a, Individual>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
