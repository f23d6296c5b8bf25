//! Operator traits
//!
//! This module defines the core operator traits for the genetic algorithm.

use rand::Rng;

use crate::error::OperatorError;
use crate::fitness::traits::FitnessMap;
use crate::genome::traits::BinaryGenome;
use crate::population::population::PairMut;

/// Selection operator trait
///
/// Picks population indices for reproduction from the current fitness
/// mapping.
pub trait SelectionOperator: Send + Sync {
    /// Select a single index
    fn select<R: Rng>(&self, fitness: &FitnessMap, rng: &mut R) -> Result<usize, OperatorError>;

    /// Select a parent pair with two independent draws
    fn select_pair<R: Rng>(
        &self,
        fitness: &FitnessMap,
        rng: &mut R,
    ) -> Result<(usize, usize), OperatorError> {
        Ok((self.select(fitness, rng)?, self.select(fitness, rng)?))
    }
}

/// Crossover operator trait
///
/// Recombines the two chromosomes of a selected pair in place.
pub trait CrossoverOperator: Send + Sync {
    /// Maybe recombine the pair, returning the cut point when it did
    fn crossover<R: Rng>(
        &self,
        pair: &mut PairMut<'_>,
        rng: &mut R,
    ) -> Result<Option<usize>, OperatorError>;

    /// Get the probability of crossover being applied
    fn crossover_probability(&self) -> f64 {
        1.0
    }
}

/// Mutation operator trait
///
/// Applies random changes to a genome.
pub trait MutationOperator<G: BinaryGenome>: Send + Sync {
    /// Apply mutation in place, returning how many genes changed
    fn mutate<R: Rng>(&self, genome: &mut G, rng: &mut R) -> usize;

    /// Get the mutation probability per gene
    fn mutation_probability(&self) -> f64 {
        1.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::genome::chromosome::Chromosome;
    use crate::population::population::Population;

    // Always picks the last index
    struct LastSelection;

    impl SelectionOperator for LastSelection {
        fn select<R: Rng>(
            &self,
            fitness: &FitnessMap,
            _rng: &mut R,
        ) -> Result<usize, OperatorError> {
            fitness
                .len()
                .checked_sub(1)
                .ok_or(OperatorError::DegenerateDistribution)
        }
    }

    // Swaps whole chromosomes
    struct SwapCrossover;

    impl CrossoverOperator for SwapCrossover {
        fn crossover<R: Rng>(
            &self,
            pair: &mut PairMut<'_>,
            _rng: &mut R,
        ) -> Result<Option<usize>, OperatorError> {
            if let PairMut::Distinct(a, b) = pair {
                std::mem::swap(*a, *b);
                return Ok(Some(0));
            }
            Ok(None)
        }
    }

    // Sets every bit
    struct SaturateMutation;

    impl MutationOperator<Chromosome> for SaturateMutation {
        fn mutate<R: Rng>(&self, genome: &mut Chromosome, _rng: &mut R) -> usize {
            let bits = genome.bits_mut();
            let changed = bits.iter().filter(|b| !**b).count();
            bits.iter_mut().for_each(|b| *b = true);
            changed
        }
    }

    #[test]
    fn test_default_select_pair() {
        let mut rng = rand::thread_rng();
        let fitness = FitnessMap::from_scores(vec![1.0, 2.0, 3.0]);
        assert_eq!(LastSelection.select_pair(&fitness, &mut rng), Ok((2, 2)));
        assert!(LastSelection
            .select_pair(&FitnessMap::new(), &mut rng)
            .is_err());
    }

    #[test]
    fn test_mock_crossover_on_pair() {
        let mut rng = rand::thread_rng();
        let mut pop: Population = [Chromosome::zeros(4), Chromosome::ones(4)]
            .into_iter()
            .collect();
        {
            let mut pair = pop.pair_mut(0, 1).unwrap();
            assert_eq!(SwapCrossover.crossover(&mut pair, &mut rng), Ok(Some(0)));
        }
        assert_eq!(pop[0], Chromosome::ones(4));
        assert_eq!(SwapCrossover.crossover_probability(), 1.0);
    }

    #[test]
    fn test_mock_mutation() {
        let mut rng = rand::thread_rng();
        let mut genome: Chromosome = "0101".parse().unwrap();
        assert_eq!(SaturateMutation.mutate(&mut genome, &mut rng), 2);
        assert_eq!(genome, Chromosome::ones(4));
    }
}
