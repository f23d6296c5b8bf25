//! Selection operators
//!
//! Fitness-proportionate (roulette wheel) selection with replacement.

use rand::Rng;
use rand_distr::{Distribution, WeightedIndex};

use crate::error::OperatorError;
use crate::fitness::traits::FitnessMap;
use crate::operators::traits::SelectionOperator;

/// Roulette wheel selection (fitness proportionate)
///
/// Index `i` is drawn with probability `fitness[i] / Σ fitness`. Negative
/// and non-finite scores carry no weight. If nothing carries weight the
/// distribution is degenerate and selection fails.
#[derive(Clone, Debug, Default)]
pub struct RouletteSelection;

impl RouletteSelection {
    /// Create a new roulette selection
    pub fn new() -> Self {
        Self
    }

    /// Build the sampling distribution once for many draws
    pub fn wheel(&self, fitness: &FitnessMap) -> Result<RouletteWheel, OperatorError> {
        let weights: Vec<f64> = fitness
            .scores()
            .iter()
            .map(|&f| if f.is_finite() && f > 0.0 { f } else { 0.0 })
            .collect();

        let dist =
            WeightedIndex::new(&weights).map_err(|_| OperatorError::DegenerateDistribution)?;
        Ok(RouletteWheel { dist })
    }
}

impl SelectionOperator for RouletteSelection {
    fn select<R: Rng>(&self, fitness: &FitnessMap, rng: &mut R) -> Result<usize, OperatorError> {
        Ok(self.wheel(fitness)?.spin(rng))
    }

    fn select_pair<R: Rng>(
        &self,
        fitness: &FitnessMap,
        rng: &mut R,
    ) -> Result<(usize, usize), OperatorError> {
        Ok(self.wheel(fitness)?.spin_pair(rng))
    }
}

/// A prepared fitness-proportionate distribution over population indices
#[derive(Clone, Debug)]
pub struct RouletteWheel {
    dist: WeightedIndex<f64>,
}

impl RouletteWheel {
    /// Draw one index
    pub fn spin<R: Rng>(&self, rng: &mut R) -> usize {
        self.dist.sample(rng)
    }

    /// Draw two independent indices; both may be equal
    pub fn spin_pair<R: Rng>(&self, rng: &mut R) -> (usize, usize) {
        (self.spin(rng), self.spin(rng))
    }
}
