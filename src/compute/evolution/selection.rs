//! Rank-based truncation selection.

use serde::{Deserialize, Serialize};

use super::error::EvolutionError;
use super::population::Population;

/// A candidate's fitness and its index in the ranked population.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Ranked {
    pub fitness: f32,
    pub index: usize,
}

/// Write the `count` fittest candidates of `population` into `ranking`.
///
/// The whole population is sorted by descending fitness, ties keeping
/// ascending index order, and the result truncated to `count`. `ranking` is
/// cleared first so the same buffer can be reused every generation.
pub fn select_into(
    population: &Population,
    count: usize,
    ranking: &mut Vec<Ranked>,
) -> Result<(), EvolutionError> {
    if count > population.len() {
        return Err(EvolutionError::TooManySurvivors {
            requested: count,
            len: population.len(),
        });
    }

    ranking.clear();
    ranking.extend(
        population
            .iter()
            .enumerate()
            .map(|(index, c)| Ranked {
                fitness: c.fitness,
                index,
            }),
    );
    ranking.sort_by(|a, b| b.fitness.total_cmp(&a.fitness));
    ranking.truncate(count);

    log::debug!(
        "selected {} of {} (top fitness {:?})",
        count,
        population.len(),
        ranking.first().map(|r| r.fitness)
    );

    Ok(())
}

/// Allocating variant of [`select_into`].
pub fn select(population: &Population, count: usize) -> Result<Vec<Ranked>, EvolutionError> {
    let mut ranking = Vec::with_capacity(population.len());
    select_into(population, count, &mut ranking)?;
    Ok(ranking)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compute::evolution::population::Individual;
    use crate::schema::Residence;
    use proptest::prelude::*;

    fn population_with(fitness: &[f32]) -> Population {
        let mut population = Population::new(fitness.len());
        for &f in fitness {
            population
                .push(Individual {
                    residence: Residence::default(),
                    fitness: f,
                })
                .unwrap();
        }
        population
    }

    #[test]
    fn test_select_top_two() {
        let population = population_with(&[4.0, 6.0, 7.0, 4.5]);
        let ranking = select(&population, 2).unwrap();
        assert_eq!(
            ranking,
            vec![
                Ranked {
                    fitness: 7.0,
                    index: 2
                },
                Ranked {
                    fitness: 6.0,
                    index: 1
                },
            ]
        );
    }

    #[test]
    fn test_ties_keep_index_order() {
        let population = population_with(&[5.0, 8.0, 5.0, 8.0]);
        let indices: Vec<usize> = select(&population, 4)
            .unwrap()
            .iter()
            .map(|r| r.index)
            .collect();
        assert_eq!(indices, vec![1, 3, 0, 2]);
    }

    #[test]
    fn test_select_more_than_population_fails() {
        let population = population_with(&[1.0, 2.0]);
        assert!(matches!(
            select(&population, 3),
            Err(EvolutionError::TooManySurvivors {
                requested: 3,
                len: 2
            })
        ));
    }

    #[test]
    fn test_select_zero() {
        let population = population_with(&[1.0]);
        assert!(select(&population, 0).unwrap().is_empty());
    }

    #[test]
    fn test_buffer_reuse_clears_previous_ranking() {
        let population = population_with(&[3.0, 1.0, 2.0]);
        let mut ranking = Vec::new();
        select_into(&population, 3, &mut ranking).unwrap();
        select_into(&population, 1, &mut ranking).unwrap();
        assert_eq!(ranking.len(), 1);
        assert_eq!(ranking[0].index, 0);
    }

    #[test]
    fn test_population_untouched() {
        let population = population_with(&[1.0, 3.0, 2.0]);
        let before: Vec<Individual> = population.iter().copied().collect();
        select(&population, 2).unwrap();
        let after: Vec<Individual> = population.iter().copied().collect();
        assert_eq!(before, after);
    }

    proptest! {
        #[test]
        fn prop_selects_highest_fitness(
            fitness in prop::collection::vec(-100.0f32..100.0, 1..40),
            k_seed in any::<usize>(),
        ) {
            let k = k_seed % (fitness.len() + 1);
            let population = population_with(&fitness);
            let ranking = select(&population, k).unwrap();

            prop_assert_eq!(ranking.len(), k);
            for pair in ranking.windows(2) {
                prop_assert!(pair[0].fitness >= pair[1].fitness);
            }

            let mut sorted = fitness.clone();
            sorted.sort_by(|a, b| b.total_cmp(a));
            let selected: Vec<f32> = ranking.iter().map(|r| r.fitness).collect();
            prop_assert_eq!(&selected[..], &sorted[..k]);

            for r in &ranking {
                prop_assert_eq!(fitness[r.index], r.fitness);
            }
        }
    }
}
