//! Genome manipulation utilities for evolutionary search.
//!
//! Provides random generation, uniform crossover, and bit-flip mutation of
//! residences. Every operator that writes a residence draws its fixture from
//! [`Fixture::ALL`], so the one-fixture invariant holds by construction.

use crate::schema::{Amenities, Amenity, Fixture, Residence};
use rand::prelude::*;

/// Random number generator wrapper for genome operations.
pub struct ResidenceRng {
    rng: StdRng,
}

impl ResidenceRng {
    /// Create from seed.
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Create with random seed.
    pub fn random() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Restart the stream from `seed`.
    pub fn reseed(&mut self, seed: u64) {
        self.rng = StdRng::seed_from_u64(seed);
    }

    /// Fair coin.
    pub fn coin_flip(&mut self) -> bool {
        self.rng.gen_bool(0.5)
    }

    /// Uniform float in [0, 1).
    pub fn unit(&mut self) -> f32 {
        self.rng.r#gen::<f32>()
    }

    /// Uniform index in `0..len`. `len` must be non-zero.
    pub fn pick_index(&mut self, len: usize) -> usize {
        self.rng.gen_range(0..len)
    }

    /// One of the three fixtures, uniformly.
    pub fn random_fixture(&mut self) -> Fixture {
        Fixture::ALL[self.pick_index(Fixture::ALL.len())]
    }

    /// Random residence: uniform fixture, each amenity present with probability 0.5.
    pub fn random_residence(&mut self) -> Residence {
        let fixture = self.random_fixture();
        let amenities = Amenity::ALL
            .iter()
            .fold(Amenities::NONE, |acc, &a| acc.with(a, self.coin_flip()));
        Residence::new(fixture, amenities)
    }

    /// Breed a child from two parents.
    ///
    /// The fixture is drawn fresh rather than inherited. Each amenity comes
    /// from either parent with equal probability and is then flipped with
    /// probability `mutation_rate`.
    pub fn crossover(
        &mut self,
        parent1: &Residence,
        parent2: &Residence,
        mutation_rate: f32,
    ) -> Residence {
        let fixture = self.random_fixture();
        let amenities = Amenity::ALL.iter().fold(Amenities::NONE, |acc, &a| {
            let inherited = if self.coin_flip() {
                parent1.has(a)
            } else {
                parent2.has(a)
            };
            acc.with(a, self.mutate(inherited, mutation_rate))
        });
        Residence::new(fixture, amenities)
    }

    /// Bit-flip mutation.
    pub fn mutate(&mut self, value: bool, mutation_rate: f32) -> bool {
        if self.unit() < mutation_rate {
            !value
        } else {
            value
        }
    }
}
