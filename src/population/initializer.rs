//! Random population initialization
//!
//! Chromosomes are drawn bit by bit with a bias towards repeating the
//! previous bit, which favours repeated notes and rests. A draw whose
//! decoded expression is not well-formed is discarded whole and redrawn.

use log::debug;
use rand::Rng;

use crate::config::EvolutionConfig;
use crate::error::EvolutionError;
use crate::genome::chromosome::Chromosome;
use crate::genome::codec::ChromosomeCodec;
use crate::population::population::Population;

/// Upper bound on redraws for a single chromosome
const MAX_ATTEMPTS: usize = 100_000;

/// Generates well-formed random chromosomes
#[derive(Clone, Debug)]
pub struct PopulationInitializer {
    codec: ChromosomeCodec,
    chromosome_size: usize,
    repetition_rate: f64,
    min_expression_len: usize,
}

impl PopulationInitializer {
    pub fn new(config: &EvolutionConfig, codec: ChromosomeCodec) -> Self {
        Self {
            codec,
            chromosome_size: config.chromosome_size(),
            repetition_rate: config.repetition_rate,
            min_expression_len: config.min_expression_len,
        }
    }

    /// Draw one candidate bit string without checking it
    pub fn draw<R: Rng>(&self, rng: &mut R) -> Chromosome {
        let mut bits: Vec<bool> = Vec::with_capacity(self.chromosome_size);
        for _ in 0..self.chromosome_size {
            let bit = match bits.last() {
                Some(&prev) if rng.gen::<f64>() < self.repetition_rate => prev,
                _ => rng.gen(),
            };
            bits.push(bit);
        }
        Chromosome::new(bits)
    }

    /// Whether a chromosome decodes to a well-formed expression
    pub fn is_well_formed(&self, chromosome: &Chromosome) -> bool {
        self.codec
            .decode(chromosome)
            .map(|e| e.is_well_formed(self.min_expression_len))
            .unwrap_or(false)
    }

    /// Generate one chromosome whose expression is well-formed
    pub fn generate_one<R: Rng>(&self, rng: &mut R) -> Result<Chromosome, EvolutionError> {
        let genes = self.chromosome_size / self.codec.gene_size().max(1);
        if genes <= self.min_expression_len {
            return Err(EvolutionError::Configuration(format!(
                "A melody of {} genes can never exceed {} symbols",
                genes, self.min_expression_len
            )));
        }

        for attempt in 1..=MAX_ATTEMPTS {
            let candidate = self.draw(rng);
            if self.is_well_formed(&candidate) {
                if attempt > 1 {
                    debug!("Initializer accepted a chromosome after {} draws", attempt);
                }
                return Ok(candidate);
            }
        }
        Err(EvolutionError::Configuration(format!(
            "No well-formed chromosome after {} draws; check melody length and gene table",
            MAX_ATTEMPTS
        )))
    }

    /// Generate `size` independent well-formed chromosomes
    pub fn generate_population<R: Rng>(
        &self,
        size: usize,
        rng: &mut R,
    ) -> Result<Population, EvolutionError> {
        (0..size).map(|_| self.generate_one(rng)).collect()
    }
}
