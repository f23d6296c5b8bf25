//! Crossover operators
//!
//! Single-point tail exchange between the two chromosomes of a selected pair.

use rand::Rng;

use crate::error::{GenomeError, OperatorError};
use crate::operators::traits::CrossoverOperator;
use crate::population::population::PairMut;

/// One-point crossover
///
/// With probability `rate`, a cut point is drawn as `randint(0, L) / 2`
/// (integer division) and every bit from the cut point onwards is swapped
/// between the two chromosomes. Cut points therefore only fall in the first
/// half of the chromosome. A pair made of one chromosome drawn twice is left
/// untouched.
#[derive(Clone, Debug)]
pub struct OnePointCrossover {
    /// Probability that a pair is recombined
    pub rate: f64,
}

impl OnePointCrossover {
    /// Create a new one-point crossover
    pub fn new(rate: f64) -> Self {
        assert!((0.0..=1.0).contains(&rate), "Rate must be in [0, 1]");
        Self { rate }
    }

    /// Draw a cut point for a chromosome of `length` bits
    pub fn cut_point<R: Rng>(&self, length: usize, rng: &mut R) -> usize {
        rng.gen_range(0..=length) / 2
    }

    /// Exchange the tails of the pair from `point` onwards
    pub fn crossover_at(&self, pair: &mut PairMut<'_>, point: usize) -> Result<(), OperatorError> {
        match pair {
            PairMut::Distinct(a, b) => a.swap_tail(b, point).map_err(|e| match e {
                GenomeError::DimensionMismatch { expected, actual } => {
                    OperatorError::DimensionMismatch {
                        left: expected,
                        right: actual,
                    }
                }
                _ => OperatorError::DimensionMismatch {
                    left: a.len(),
                    right: b.len(),
                },
            }),
            PairMut::Same(_) => Ok(()),
        }
    }
}

impl Default for OnePointCrossover {
    fn default() -> Self {
        Self::new(0.7)
    }
}

impl CrossoverOperator for OnePointCrossover {
    fn crossover<R: Rng>(
        &self,
        pair: &mut PairMut<'_>,
        rng: &mut R,
    ) -> Result<Option<usize>, OperatorError> {
        if rng.gen::<f64>() >= self.rate {
            return Ok(None);
        }

        let length = match pair {
            PairMut::Distinct(a, _) => a.len(),
            PairMut::Same(c) => c.len(),
        };
        let point = self.cut_point(length, rng);
        self.crossover_at(pair, point)?;
        Ok(Some(point))
    }

    fn crossover_probability(&self) -> f64 {
        self.rate
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::genome::chromosome::Chromosome;
    use crate::genome::traits::BinaryGenome;
    use crate::population::population::Population;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn pair_population() -> Population {
        [Chromosome::ones(8), Chromosome::zeros(8)]
            .into_iter()
            .collect()
    }

    #[test]
    fn test_crossover_at_fixed_point() {
        let mut pop = pair_population();
        let crossover = OnePointCrossover::new(1.0);
        {
            let mut pair = pop.pair_mut(0, 1).unwrap();
            crossover.crossover_at(&mut pair, 3).unwrap();
        }
        assert_eq!(pop[0].to_string(), "11100000");
        assert_eq!(pop[1].to_string(), "00011111");
    }

    #[test]
    fn test_crossover_at_zero_swaps_everything() {
        let mut pop = pair_population();
        {
            let mut pair = pop.pair_mut(0, 1).unwrap();
            OnePointCrossover::new(1.0)
                .crossover_at(&mut pair, 0)
                .unwrap();
        }
        assert_eq!(pop[0], Chromosome::zeros(8));
        assert_eq!(pop[1], Chromosome::ones(8));
    }

    #[test]
    fn test_crossover_preserves_lengths_and_bits() {
        let mut rng = StdRng::seed_from_u64(7);
        let crossover = OnePointCrossover::new(1.0);
        let mut pop: Population = ["110100101100", "001011010011"]
            .iter()
            .map(|s| s.parse::<Chromosome>().unwrap())
            .collect();
        let ones_before: usize = pop.iter().map(|c| c.count_ones()).sum();

        for _ in 0..50 {
            let mut pair = pop.pair_mut(0, 1).unwrap();
            crossover.crossover(&mut pair, &mut rng).unwrap();
        }

        assert!(pop.check_lengths(12).is_ok());
        let ones_after: usize = pop.iter().map(|c| c.count_ones()).sum();
        assert_eq!(ones_before, ones_after);
    }

    #[test]
    fn test_cut_point_in_first_half() {
        let mut rng = rand::thread_rng();
        let crossover = OnePointCrossover::default();
        for _ in 0..500 {
            assert!(crossover.cut_point(48, &mut rng) <= 24);
        }
    }

    #[test]
    fn test_rate_zero_never_crosses() {
        let mut rng = rand::thread_rng();
        let crossover = OnePointCrossover::new(0.0);
        let mut pop = pair_population();
        for _ in 0..100 {
            let mut pair = pop.pair_mut(0, 1).unwrap();
            assert_eq!(crossover.crossover(&mut pair, &mut rng), Ok(None));
        }
        assert_eq!(pop, pair_population());
    }

    #[test]
    fn test_same_chromosome_unchanged() {
        let mut rng = rand::thread_rng();
        let crossover = OnePointCrossover::new(1.0);
        let mut pop = pair_population();
        {
            let mut pair = pop.pair_mut(1, 1).unwrap();
            assert!(crossover.crossover(&mut pair, &mut rng).unwrap().is_some());
        }
        assert_eq!(pop, pair_population());
    }

    #[test]
    fn test_seeded_crossover_is_reproducible() {
        let crossover = OnePointCrossover::default();
        let run = |seed| {
            let mut rng = StdRng::seed_from_u64(seed);
            let mut pop: Population = ["101010101010", "000111000111"]
                .iter()
                .map(|s| s.parse::<Chromosome>().unwrap())
                .collect();
            for _ in 0..10 {
                let mut pair = pop.pair_mut(0, 1).unwrap();
                crossover.crossover(&mut pair, &mut rng).unwrap();
            }
            pop
        };
        assert_eq!(run(3), run(3));
    }

    #[test]
    fn test_length_mismatch_is_an_error() {
        let mut pop: Population = [Chromosome::ones(6), Chromosome::zeros(4)]
            .into_iter()
            .collect();
        let mut pair = pop.pair_mut(0, 1).unwrap();
        assert_eq!(
            OnePointCrossover::new(1.0).crossover_at(&mut pair, 1),
            Err(OperatorError::DimensionMismatch { left: 6, right: 4 })
        );
    }
}
