//! Evolution configuration
//!
//! All tunable constants of a run live in one [`EvolutionConfig`] that is
//! handed to each component when it is built. Configs can be loaded from
//! and saved to TOML files.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::checkpoint::CheckpointFormat;
use crate::error::EvolutionError;

/// Configuration for one evolutionary search
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EvolutionConfig {
    /// Number of chromosomes in every generation
    pub population_size: usize,
    /// Bits per gene
    pub gene_size: usize,
    /// Genes per chromosome
    pub melody_length: usize,
    /// Probability that a selected pair undergoes crossover
    pub crossover_rate: f64,
    /// Per-bit flip probability
    pub mutation_rate: f64,
    /// Probability that the initializer repeats the previous bit
    pub repetition_rate: f64,
    /// An expression must be longer than this to be well-formed
    pub min_expression_len: usize,
    /// Lowest score any chromosome can receive
    pub fitness_floor: f64,
    /// Evaluate chromosomes on the rayon pool
    pub parallel_evaluation: bool,
    /// Directory holding the checkpoint artifacts
    pub checkpoint_dir: PathBuf,
    /// On-disk encoding of new checkpoints
    pub checkpoint_format: CheckpointFormat,
    /// Stop after this many generations (None runs until killed)
    pub max_generations: Option<usize>,
}

impl Default for EvolutionConfig {
    fn default() -> Self {
        Self {
            population_size: 500,
            gene_size: 6,
            melody_length: 8,
            crossover_rate: 0.7,
            mutation_rate: 0.001,
            repetition_rate: 0.4,
            min_expression_len: 3,
            fitness_floor: 0.01,
            parallel_evaluation: true,
            checkpoint_dir: PathBuf::from("checkpoints"),
            checkpoint_format: CheckpointFormat::Json,
            max_generations: None,
        }
    }
}

impl EvolutionConfig {
    /// Length of every chromosome in bits (gene size times melody length)
    pub fn chromosome_size(&self) -> usize {
        self.gene_size * self.melody_length
    }

    /// Set the population size
    pub fn with_population_size(mut self, size: usize) -> Self {
        self.population_size = size;
        self
    }

    /// Set the crossover rate
    pub fn with_crossover_rate(mut self, rate: f64) -> Self {
        self.crossover_rate = rate;
        self
    }

    /// Set the mutation rate
    pub fn with_mutation_rate(mut self, rate: f64) -> Self {
        self.mutation_rate = rate;
        self
    }

    /// Set the checkpoint directory
    pub fn with_checkpoint_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.checkpoint_dir = dir.into();
        self
    }

    /// Set the checkpoint format
    pub fn with_checkpoint_format(mut self, format: CheckpointFormat) -> Self {
        self.checkpoint_format = format;
        self
    }

    /// Enable or disable parallel evaluation
    pub fn with_parallel_evaluation(mut self, enabled: bool) -> Self {
        self.parallel_evaluation = enabled;
        self
    }

    /// Limit the number of generations
    pub fn with_max_generations(mut self, max: usize) -> Self {
        self.max_generations = Some(max);
        self
    }

    pub fn validate(&self) -> Result<(), EvolutionError> {
        if self.population_size == 0 {
            return Err(EvolutionError::Configuration(
                "Population size must be at least 1".to_string(),
            ));
        }
        if self.gene_size == 0 || self.gene_size > 16 {
            return Err(EvolutionError::Configuration(
                "Gene size must be between 1 and 16 bits".to_string(),
            ));
        }
        if self.melody_length == 0 {
            return Err(EvolutionError::Configuration(
                "Melody length must be at least 1 gene".to_string(),
            ));
        }
        for (name, rate) in [
            ("Crossover rate", self.crossover_rate),
            ("Mutation rate", self.mutation_rate),
            ("Repetition rate", self.repetition_rate),
        ] {
            if !(0.0..=1.0).contains(&rate) {
                return Err(EvolutionError::Configuration(format!(
                    "{} must be between 0 and 1",
                    name
                )));
            }
        }
        if !self.fitness_floor.is_finite() || self.fitness_floor <= 0.0 {
            return Err(EvolutionError::Configuration(
                "Fitness floor must be a positive finite number".to_string(),
            ));
        }
        Ok(())
    }

    /// Read and validate a config from a TOML file
    pub fn from_toml_file<P: AsRef<Path>>(path: P) -> Result<Self, EvolutionError> {
        let contents = std::fs::read_to_string(path).map_err(|e| {
            EvolutionError::Configuration(format!("Failed to read config: {}", e))
        })?;

        let config: Self = toml::from_str(&contents).map_err(|e| {
            EvolutionError::Configuration(format!("Failed to parse config: {}", e))
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Write this config as TOML
    pub fn to_toml_file<P: AsRef<Path>>(&self, path: P) -> Result<(), EvolutionError> {
        let toml_str = toml::to_string_pretty(self).map_err(|e| {
            EvolutionError::Configuration(format!("Failed to serialize: {}", e))
        })?;

        std::fs::write(path, toml_str).map_err(|e| {
            EvolutionError::Configuration(format!("Failed to write config: {}", e))
        })?;

        Ok(())
    }
}
