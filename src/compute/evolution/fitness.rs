//! Comfort scoring of residences.

use crate::schema::Residence;

use super::population::Population;

/// Score and cost of a single feature vector.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Evaluation {
    /// Comfort points, capped at twice the fixture's base points.
    pub points: f32,
    /// Sum of amenity costs.
    pub cost: f32,
}

/// Evaluate a residence.
///
/// Amenities add to the fixture's base points, but the total never exceeds
/// twice the base: a shower-only bathroom (base 4) tops out at 8 no matter
/// how many amenities it carries.
pub fn evaluate(residence: &Residence) -> Evaluation {
    let base = residence.fixture.base_points();
    let amenity_points: f32 = residence.amenities.iter().map(|a| a.points()).sum();
    let cost: f32 = residence.amenities.iter().map(|a| a.cost()).sum();

    Evaluation {
        points: (base + amenity_points).min(base * 2.0),
        cost,
    }
}

/// Overwrite every candidate's fitness with its comfort points.
pub fn evaluate_population(population: &mut Population) {
    for candidate in population.iter_mut() {
        let evaluation = evaluate(&candidate.residence);
        log::trace!(
            "evaluated {:?}: points={:.2} cost={:.2}",
            candidate.residence.flags(),
            evaluation.points,
            evaluation.cost
        );
        candidate.fitness = evaluation.points;
    }
}
