//! Population type
//!
//! This module provides the Population container. Fitness scores live in a
//! separate [`FitnessMap`](crate::fitness::FitnessMap) keyed by position, so
//! the order of chromosomes here is significant.

use serde::{Deserialize, Serialize};

use crate::error::{GenomeError, OperatorError};
use crate::genome::chromosome::Chromosome;

/// An ordered population of chromosomes
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Population {
    chromosomes: Vec<Chromosome>,
}

/// Mutable access to the two chromosomes an operator works on.
///
/// Selection draws with replacement, so both indices may be the same.
#[derive(Debug)]
pub enum PairMut<'a> {
    /// Two different chromosomes
    Distinct(&'a mut Chromosome, &'a mut Chromosome),
    /// One chromosome drawn twice
    Same(&'a mut Chromosome),
}

impl PairMut<'_> {
    /// Visit each distinct chromosome of the pair once
    pub fn for_each_mut<F: FnMut(&mut Chromosome)>(&mut self, mut f: F) {
        match self {
            PairMut::Distinct(a, b) => {
                f(a);
                f(b);
            }
            PairMut::Same(c) => f(c),
        }
    }
}

impl Population {
    /// Create an empty population
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a population with the given capacity
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            chromosomes: Vec::with_capacity(capacity),
        }
    }

    /// Create a population from chromosomes
    pub fn from_chromosomes(chromosomes: Vec<Chromosome>) -> Self {
        Self { chromosomes }
    }

    /// Get the population size
    pub fn len(&self) -> usize {
        self.chromosomes.len()
    }

    /// Check if the population is empty
    pub fn is_empty(&self) -> bool {
        self.chromosomes.is_empty()
    }

    /// Get a chromosome by index
    pub fn get(&self, index: usize) -> Option<&Chromosome> {
        self.chromosomes.get(index)
    }

    /// Add a chromosome to the population
    pub fn push(&mut self, chromosome: Chromosome) {
        self.chromosomes.push(chromosome);
    }

    /// Drop chromosomes beyond `size`
    pub fn truncate(&mut self, size: usize) {
        self.chromosomes.truncate(size);
    }

    /// Get an iterator over the chromosomes
    pub fn iter(&self) -> impl Iterator<Item = &Chromosome> {
        self.chromosomes.iter()
    }

    /// Get the underlying chromosomes
    pub fn chromosomes(&self) -> &[Chromosome] {
        &self.chromosomes
    }

    /// Borrow the two chromosomes at `a` and `b` mutably, and nothing else
    pub fn pair_mut(&mut self, a: usize, b: usize) -> Result<PairMut<'_>, OperatorError> {
        let len = self.chromosomes.len();
        for index in [a, b] {
            if index >= len {
                return Err(OperatorError::IndexOutOfRange { index, len });
            }
        }

        if a == b {
            return Ok(PairMut::Same(&mut self.chromosomes[a]));
        }

        let (low, high) = if a < b { (a, b) } else { (b, a) };
        let (head, tail) = self.chromosomes.split_at_mut(high);
        let (low_ref, high_ref) = (&mut head[low], &mut tail[0]);
        if a < b {
            Ok(PairMut::Distinct(low_ref, high_ref))
        } else {
            Ok(PairMut::Distinct(high_ref, low_ref))
        }
    }

    /// Check that every chromosome has exactly `length` bits
    pub fn check_lengths(&self, length: usize) -> Result<(), GenomeError> {
        match self.chromosomes.iter().find(|c| c.len() != length) {
            Some(bad) => Err(GenomeError::DimensionMismatch {
                expected: length,
                actual: bad.len(),
            }),
            None => Ok(()),
        }
    }

    /// Average pairwise Hamming distance
    pub fn diversity(&self) -> f64 {
        if self.len() < 2 {
            return 0.0;
        }

        let mut total_distance = 0usize;
        let mut count = 0usize;

        for i in 0..self.len() {
            for j in (i + 1)..self.len() {
                total_distance += self.chromosomes[i].hamming_distance(&self.chromosomes[j]);
                count += 1;
            }
        }

        total_distance as f64 / count as f64
    }
}

impl std::ops::Index<usize> for Population {
    type Output = Chromosome;

    fn index(&self, index: usize) -> &Self::Output {
        &self.chromosomes[index]
    }
}

impl IntoIterator for Population {
    type Item = Chromosome;
    type IntoIter = std::vec::IntoIter<Chromosome>;

    fn into_iter(self) -> Self::IntoIter {
        self.chromosomes.into_iter()
    }
}

impl FromIterator<Chromosome> for Population {
    fn from_iter<I: IntoIterator<Item = Chromosome>>(iter: I) -> Self {
        Self::from_chromosomes(iter.into_iter().collect())
    }
}
