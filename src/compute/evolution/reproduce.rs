//! Next-generation construction: elitism followed by crossover and mutation.

use crate::schema::EvolutionConfig;

use super::error::EvolutionError;
use super::genome::ResidenceRng;
use super::population::{Individual, Population};
use super::selection::Ranked;

/// Fill `target` with `config.population_size` candidates bred from `parents`.
///
/// The first `config.survivors` entries of `ranking` are copied verbatim, in
/// rank order. The remaining slots are children of two parents drawn
/// uniformly from that same elite set; their fitness is zero until the next
/// evaluation pass.
pub fn reproduce(
    parents: &Population,
    ranking: &[Ranked],
    target: &mut Population,
    config: &EvolutionConfig,
    rng: &mut ResidenceRng,
) -> Result<(), EvolutionError> {
    let survivors = config.survivors;

    if survivors > parents.len() {
        return Err(EvolutionError::TooManySurvivors {
            requested: survivors,
            len: parents.len(),
        });
    }
    let offspring = config
        .population_size
        .checked_sub(survivors)
        .ok_or(EvolutionError::TooManySurvivors {
            requested: survivors,
            len: config.population_size,
        })?;
    if ranking.len() < survivors {
        return Err(EvolutionError::RankingTooShort {
            len: ranking.len(),
            required: survivors,
        });
    }
    if !target.is_empty() {
        return Err(EvolutionError::TargetNotEmpty { len: target.len() });
    }
    if target.capacity() < config.population_size {
        return Err(EvolutionError::CapacityExceeded {
            requested: config.population_size,
            len: target.len(),
            capacity: target.capacity(),
        });
    }
    if offspring > 0 && survivors == 0 {
        return Err(EvolutionError::NoSurvivors);
    }

    let elite = &ranking[..survivors];

    for (slot, ranked) in target.allocate(survivors)?.iter_mut().zip(elite) {
        *slot = *parents.get(ranked.index)?;
    }

    for child in target.allocate(offspring)?.iter_mut() {
        let parent1 = parents.get(elite[rng.pick_index(survivors)].index)?;
        let parent2 = parents.get(elite[rng.pick_index(survivors)].index)?;
        *child = Individual::new(rng.crossover(
            &parent1.residence,
            &parent2.residence,
            config.mutation_rate,
        ));
    }

    log::debug!(
        "reproduced {} elites and {} offspring (mutation rate {})",
        survivors,
        offspring,
        config.mutation_rate
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compute::evolution::fitness::evaluate_population;
    use crate::compute::evolution::selection::select;
    use crate::schema::{Amenities, Amenity, Fixture, Residence};
    use proptest::prelude::*;

    fn config(population_size: usize, survivors: usize, mutation_rate: f32) -> EvolutionConfig {
        EvolutionConfig {
            population_size,
            survivors,
            mutation_rate,
            ..Default::default()
        }
    }

    fn random_population(size: usize, rng: &mut ResidenceRng) -> Population {
        let mut population = Population::new(size);
        for slot in population.allocate(size).unwrap() {
            *slot = Individual::new(rng.random_residence());
        }
        evaluate_population(&mut population);
        population
    }

    #[test]
    fn test_elites_copied_in_rank_order() {
        let mut rng = ResidenceRng::new(1);
        let parents = random_population(16, &mut rng);
        let ranking = select(&parents, 6).unwrap();
        let mut target = Population::new(16);

        reproduce(&parents, &ranking, &mut target, &config(16, 6, 0.05), &mut rng).unwrap();

        assert_eq!(target.len(), 16);
        for (i, ranked) in ranking.iter().enumerate() {
            let elite = target.get(i).unwrap();
            let parent = parents.get(ranked.index).unwrap();
            assert_eq!(elite.residence, parent.residence);
            assert_eq!(elite.fitness.to_bits(), parent.fitness.to_bits());
        }
    }

    #[test]
    fn test_offspring_fitness_reset() {
        let mut rng = ResidenceRng::new(2);
        let parents = random_population(10, &mut rng);
        let ranking = select(&parents, 4).unwrap();
        let mut target = Population::new(10);

        reproduce(&parents, &ranking, &mut target, &config(10, 4, 0.05), &mut rng).unwrap();

        assert!(target.iter().skip(4).all(|c| c.fitness == 0.0));
    }

    #[test]
    fn test_parents_drawn_from_elite_only() {
        // Elites carry no amenities and every other candidate carries all of
        // them; without mutation, no child can inherit an amenity.
        let mut population = Population::new(8);
        for (i, slot) in population.allocate(8).unwrap().iter_mut().enumerate() {
            let elite = i < 3;
            *slot = Individual {
                residence: Residence::new(
                    Fixture::Bath,
                    if elite { Amenities::NONE } else { Amenities::all() },
                ),
                fitness: if elite { 10.0 } else { 1.0 },
            };
        }
        let ranking = select(&population, 3).unwrap();
        let mut target = Population::new(8);
        let mut rng = ResidenceRng::new(3);

        reproduce(&population, &ranking, &mut target, &config(8, 3, 0.0), &mut rng).unwrap();

        assert!(target.iter().all(|c| c.residence.amenities == Amenities::NONE));
    }

    #[test]
    fn test_full_mutation_negates_inherited_genes() {
        let mut population = Population::new(4);
        for slot in population.allocate(4).unwrap() {
            *slot = Individual {
                residence: Residence::new(
                    Fixture::Shower,
                    [Amenity::Sink, Amenity::Closet].into_iter().collect(),
                ),
                fitness: 5.0,
            };
        }
        let ranking = select(&population, 2).unwrap();
        let mut target = Population::new(4);
        let mut rng = ResidenceRng::new(4);

        reproduce(&population, &ranking, &mut target, &config(4, 2, 1.0), &mut rng).unwrap();

        for child in target.iter().skip(2) {
            for a in Amenity::ALL {
                let inherited = matches!(a, Amenity::Sink | Amenity::Closet);
                assert_eq!(child.residence.has(a), !inherited);
            }
        }
    }

    #[test]
    fn test_all_survivors_means_no_offspring() {
        let mut rng = ResidenceRng::new(5);
        let parents = random_population(4, &mut rng);
        let ranking = select(&parents, 4).unwrap();
        let mut target = Population::new(4);

        reproduce(&parents, &ranking, &mut target, &config(4, 4, 0.05), &mut rng).unwrap();

        assert_eq!(target.len(), 4);
        assert_eq!(target.get(0).unwrap(), parents.get(ranking[0].index).unwrap());
    }

    #[test]
    fn test_non_empty_target_rejected() {
        let mut rng = ResidenceRng::new(6);
        let parents = random_population(4, &mut rng);
        let ranking = select(&parents, 2).unwrap();
        let mut target = Population::new(4);
        target.allocate(1).unwrap();

        let result = reproduce(&parents, &ranking, &mut target, &config(4, 2, 0.05), &mut rng);
        assert!(matches!(result, Err(EvolutionError::TargetNotEmpty { len: 1 })));
    }

    #[test]
    fn test_small_target_rejected() {
        let mut rng = ResidenceRng::new(7);
        let parents = random_population(4, &mut rng);
        let ranking = select(&parents, 2).unwrap();
        let mut target = Population::new(3);

        let result = reproduce(&parents, &ranking, &mut target, &config(4, 2, 0.05), &mut rng);
        assert!(matches!(
            result,
            Err(EvolutionError::CapacityExceeded {
                requested: 4,
                capacity: 3,
                ..
            })
        ));
        assert!(target.is_empty());
    }

    #[test]
    fn test_survivors_exceeding_parents_rejected() {
        let mut rng = ResidenceRng::new(8);
        let parents = random_population(4, &mut rng);
        let ranking = select(&parents, 4).unwrap();
        let mut target = Population::new(8);

        let result = reproduce(&parents, &ranking, &mut target, &config(8, 5, 0.05), &mut rng);
        assert!(matches!(
            result,
            Err(EvolutionError::TooManySurvivors {
                requested: 5,
                len: 4
            })
        ));
    }

    #[test]
    fn test_short_ranking_rejected() {
        let mut rng = ResidenceRng::new(9);
        let parents = random_population(4, &mut rng);
        let ranking = select(&parents, 1).unwrap();
        let mut target = Population::new(4);

        let result = reproduce(&parents, &ranking, &mut target, &config(4, 2, 0.05), &mut rng);
        assert!(matches!(
            result,
            Err(EvolutionError::RankingTooShort {
                len: 1,
                required: 2
            })
        ));
    }

    #[test]
    fn test_zero_survivors_rejected() {
        let mut rng = ResidenceRng::new(10);
        let parents = random_population(4, &mut rng);
        let mut target = Population::new(4);

        let result = reproduce(&parents, &[], &mut target, &config(4, 0, 0.05), &mut rng);
        assert!(matches!(result, Err(EvolutionError::NoSurvivors)));
    }

    proptest! {
        #[test]
        fn prop_reproduction_preserves_invariants(
            seed in any::<u64>(),
            size in 1usize..40,
            survivor_seed in any::<usize>(),
            rate in 0.0f32..=1.0,
        ) {
            let survivors = 1 + survivor_seed % size;
            let mut rng = ResidenceRng::new(seed);
            let parents = random_population(size, &mut rng);
            let ranking = select(&parents, survivors).unwrap();
            let mut target = Population::new(size);

            reproduce(&parents, &ranking, &mut target, &config(size, survivors, rate), &mut rng)
                .unwrap();

            prop_assert_eq!(target.len(), size);
            for candidate in &target {
                prop_assert_eq!(candidate.residence.flags().fixture_count(), 1);
            }
            for (i, ranked) in ranking.iter().enumerate() {
                prop_assert_eq!(target.get(i).unwrap(), parents.get(ranked.index).unwrap());
            }
        }
    }
}
