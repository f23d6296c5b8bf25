//! Chromosome genome
//!
//! A fixed-length bit string holding one candidate melody. On disk and in
//! reports a chromosome is written as a string of '0' and '1' characters.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::GenomeError;
use crate::genome::traits::BinaryGenome;

/// Bit-string chromosome
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct Chromosome {
    bits: Vec<bool>,
}

impl Chromosome {
    /// Create a chromosome with the given bits
    pub fn new(bits: Vec<bool>) -> Self {
        Self { bits }
    }

    /// Create an all-zeros chromosome of the given length
    pub fn zeros(length: usize) -> Self {
        Self {
            bits: vec![false; length],
        }
    }

    /// Create an all-ones chromosome of the given length
    pub fn ones(length: usize) -> Self {
        Self {
            bits: vec![true; length],
        }
    }

    /// Build a chromosome from gene codes, most significant bit first
    pub fn from_codes(codes: &[u32], gene_size: usize) -> Self {
        let bits = codes
            .iter()
            .flat_map(|&code| (0..gene_size).rev().map(move |i| (code >> i) & 1 == 1))
            .collect();
        Self { bits }
    }

    /// Get the length in bits
    pub fn len(&self) -> usize {
        self.bits.len()
    }

    /// Check if the chromosome is empty
    pub fn is_empty(&self) -> bool {
        self.bits.is_empty()
    }

    /// Get a specific bit
    pub fn get(&self, index: usize) -> Option<bool> {
        self.bits.get(index).copied()
    }

    /// Flip a specific bit
    pub fn flip(&mut self, index: usize) {
        if let Some(bit) = self.bits.get_mut(index) {
            *bit = !*bit;
        }
    }

    /// Split into consecutive gene codes of `gene_size` bits, left to right.
    ///
    /// Fails when the length is not an exact multiple of the gene size.
    pub fn gene_codes(&self, gene_size: usize) -> Result<Vec<u32>, GenomeError> {
        if gene_size == 0 || self.bits.len() % gene_size != 0 {
            return Err(GenomeError::Structural {
                length: self.bits.len(),
                gene_size,
            });
        }
        Ok(self
            .bits
            .chunks(gene_size)
            .map(|chunk| chunk.iter().fold(0u32, |acc, &b| (acc << 1) | b as u32))
            .collect())
    }

    /// Hamming distance to another chromosome
    pub fn hamming_distance(&self, other: &Self) -> usize {
        self.bits
            .iter()
            .zip(other.bits.iter())
            .filter(|(a, b)| a != b)
            .count()
    }

    /// Exchange every bit from `point` onwards with `other`
    pub fn swap_tail(&mut self, other: &mut Self, point: usize) -> Result<(), GenomeError> {
        if self.bits.len() != other.bits.len() {
            return Err(GenomeError::DimensionMismatch {
                expected: self.bits.len(),
                actual: other.bits.len(),
            });
        }
        let point = point.min(self.bits.len());
        self.bits[point..].swap_with_slice(&mut other.bits[point..]);
        Ok(())
    }
}

impl BinaryGenome for Chromosome {
    fn bits(&self) -> &[bool] {
        &self.bits
    }

    fn bits_mut(&mut self) -> &mut [bool] {
        &mut self.bits
    }

    fn from_bits(bits: Vec<bool>) -> Result<Self, GenomeError> {
        Ok(Self { bits })
    }
}

impl std::ops::Index<usize> for Chromosome {
    type Output = bool;

    fn index(&self, index: usize) -> &Self::Output {
        &self.bits[index]
    }
}

impl From<Vec<bool>> for Chromosome {
    fn from(bits: Vec<bool>) -> Self {
        Self { bits }
    }
}

impl<const N: usize> From<[bool; N]> for Chromosome {
    fn from(arr: [bool; N]) -> Self {
        Self { bits: arr.to_vec() }
    }
}

impl FromStr for Chromosome {
    type Err = GenomeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bits = s
            .chars()
            .map(|c| match c {
                '0' => Ok(false),
                '1' => Ok(true),
                other => Err(GenomeError::InvalidBit(other)),
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { bits })
    }
}

impl TryFrom<String> for Chromosome {
    type Error = GenomeError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<Chromosome> for String {
    fn from(chromosome: Chromosome) -> Self {
        chromosome.to_string()
    }
}

impl std::fmt::Display for Chromosome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for bit in &self.bits {
            write!(f, "{}", if *bit { '1' } else { '0' })?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chromosome_parse_and_display() {
        let c: Chromosome = "000000000001".parse().unwrap();
        assert_eq!(c.len(), 12);
        assert_eq!(c.to_string(), "000000000001");
        assert_eq!(c.count_ones(), 1);
    }

    #[test]
    fn test_chromosome_parse_rejects_garbage() {
        let err = "0102".parse::<Chromosome>().unwrap_err();
        assert_eq!(err, GenomeError::InvalidBit('2'));
    }

    #[test]
    fn test_gene_codes_msb_first() {
        let c: Chromosome = "000000000001100010".parse().unwrap();
        assert_eq!(c.gene_codes(6).unwrap(), vec![0, 1, 0b100010]);
    }

    #[test]
    fn test_gene_codes_structural_error() {
        let c = Chromosome::zeros(13);
        assert_eq!(
            c.gene_codes(6),
            Err(GenomeError::Structural {
                length: 13,
                gene_size: 6
            })
        );
    }

    #[test]
    fn test_from_codes_inverts_gene_codes() {
        let c = Chromosome::from_codes(&[5, 63, 0, 34], 6);
        assert_eq!(c.len(), 24);
        assert_eq!(c.gene_codes(6).unwrap(), vec![5, 63, 0, 34]);
    }

    #[test]
    fn test_flip() {
        let mut c = Chromosome::zeros(3);
        c.flip(1);
        assert_eq!(c.bits(), &[false, true, false]);
        c.flip(10);
        assert_eq!(c.len(), 3);
    }

    #[test]
    fn test_swap_tail() {
        let mut a = Chromosome::ones(6);
        let mut b = Chromosome::zeros(6);
        a.swap_tail(&mut b, 2).unwrap();
        assert_eq!(a.to_string(), "110000");
        assert_eq!(b.to_string(), "001111");
    }

    #[test]
    fn test_swap_tail_length_mismatch() {
        let mut a = Chromosome::ones(6);
        let mut b = Chromosome::zeros(5);
        assert!(a.swap_tail(&mut b, 2).is_err());
    }

    #[test]
    fn test_hamming_distance() {
        let a: Chromosome = "1010".parse().unwrap();
        let b: Chromosome = "1100".parse().unwrap();
        assert_eq!(a.hamming_distance(&b), 2);
    }

    #[test]
    fn test_serializes_as_bit_text() {
        let c: Chromosome = "101".parse().unwrap();
        let serialized = serde_json::to_string(&c).unwrap();
        assert_eq!(serialized, "\"101\"");
        let deserialized: Chromosome = serde_json::from_str(&serialized).unwrap();
        assert_eq!(c, deserialized);
        assert!(serde_json::from_str::<Chromosome>("\"10x\"").is_err());
    }

    #[test]
    fn test_indexing() {
        let c = Chromosome::from([true, false, true]);
        assert!(c[0]);
        assert!(!c[1]);
    }
}
