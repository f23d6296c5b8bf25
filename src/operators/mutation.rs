//! Mutation operators
//!
//! Independent per-bit flips.

use rand::Rng;

use crate::genome::chromosome::Chromosome;
use crate::genome::traits::BinaryGenome;
use crate::operators::traits::MutationOperator;
use crate::population::population::PairMut;

/// Bit-flip mutation for binary genomes
///
/// Each bit is flipped independently with probability `rate`.
#[derive(Clone, Debug)]
pub struct BitFlipMutation {
    /// Per-bit mutation probability
    pub rate: f64,
}

impl BitFlipMutation {
    /// Create a new bit-flip mutation
    pub fn new(rate: f64) -> Self {
        assert!((0.0..=1.0).contains(&rate), "Rate must be in [0, 1]");
        Self { rate }
    }

    /// Mutate both chromosomes of a pair, or the single one if it was drawn twice
    pub fn mutate_pair<R: Rng>(&self, pair: &mut PairMut<'_>, rng: &mut R) -> usize {
        let mut flipped = 0;
        pair.for_each_mut(|c: &mut Chromosome| flipped += self.mutate(c, rng));
        flipped
    }
}

impl Default for BitFlipMutation {
    fn default() -> Self {
        Self::new(0.001)
    }
}

impl<G: BinaryGenome> MutationOperator<G> for BitFlipMutation {
    fn mutate<R: Rng>(&self, genome: &mut G, rng: &mut R) -> usize {
        let mut flipped = 0;
        for bit in genome.bits_mut() {
            if rng.gen::<f64>() < self.rate {
                *bit = !*bit;
                flipped += 1;
            }
        }
        flipped
    }

    fn mutation_probability(&self) -> f64 {
        self.rate
    }
}
