//! Core genome traits
//!
//! Operators act on anything that exposes its bits through
//! [`BinaryGenome`], not on a concrete chromosome type.

use crate::error::GenomeError;

/// Trait for genomes that can be represented as bit strings
pub trait BinaryGenome: Clone + Send + Sync {
    /// Get the bits as a slice
    fn bits(&self) -> &[bool];

    /// Get the bits as a mutable slice
    fn bits_mut(&mut self) -> &mut [bool];

    /// Create from a vector of bits
    fn from_bits(bits: Vec<bool>) -> Result<Self, GenomeError>;

    /// Number of bits
    fn dimension(&self) -> usize {
        self.bits().len()
    }

    /// Count the number of true bits (ones)
    fn count_ones(&self) -> usize {
        self.bits().iter().filter(|&&b| b).count()
    }

    /// Count the number of false bits (zeros)
    fn count_zeros(&self) -> usize {
        self.bits().iter().filter(|&&b| !b).count()
    }
}
