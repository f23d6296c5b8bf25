//! Diagnostics and statistics
//!
//! This module provides per-generation reports and run-level statistics,
//! plus the reporters that publish them.

pub mod reporter;

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::fitness::traits::FitnessMap;
use crate::genome::chromosome::Chromosome;
use crate::genome::codec::ChromosomeCodec;
use crate::population::population::Population;

pub use reporter::{ConsoleReporter, Reporter, SilentReporter};

/// One chromosome as it appears in a generation report
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct IndividualReport {
    /// Position in the population
    pub index: usize,
    pub chromosome: Chromosome,
    /// Decoded expression text, or the decode error
    pub expression: String,
    pub fitness: f64,
}

impl IndividualReport {
    fn new(
        index: usize,
        population: &Population,
        fitness: f64,
        codec: &ChromosomeCodec,
    ) -> Option<Self> {
        let chromosome = population.get(index)?.clone();
        let expression = match codec.decode(&chromosome) {
            Ok(expression) => expression.to_string(),
            Err(e) => format!("<{}>", e),
        };
        Some(Self {
            index,
            chromosome,
            expression,
            fitness,
        })
    }
}

/// Timing statistics
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct TimingStats {
    /// Time spent on fitness evaluation (ms)
    pub evaluation_ms: f64,
    /// Time spent on selection, crossover and mutation (ms)
    pub breeding_ms: f64,
    /// Total generation time (ms)
    pub total_ms: f64,
}

impl TimingStats {
    /// Create new timing stats
    pub fn new() -> Self {
        Self::default()
    }

    /// Set evaluation time
    pub fn with_evaluation(mut self, duration: Duration) -> Self {
        self.evaluation_ms = duration.as_secs_f64() * 1000.0;
        self
    }

    /// Set breeding time
    pub fn with_breeding(mut self, duration: Duration) -> Self {
        self.breeding_ms = duration.as_secs_f64() * 1000.0;
        self
    }

    /// Set total time
    pub fn with_total(mut self, duration: Duration) -> Self {
        self.total_ms = duration.as_secs_f64() * 1000.0;
        self
    }
}

/// Summary of one evaluated generation
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GenerationReport {
    /// Generation number, starting at 1
    pub generation: usize,
    /// First highest-scoring chromosome
    pub best: IndividualReport,
    /// First lowest-scoring chromosome
    pub worst: IndividualReport,
    /// Mean fitness
    pub mean_fitness: f64,
    /// Average pairwise Hamming distance
    pub diversity: f64,
    /// Timing information
    pub timing: TimingStats,
}

impl GenerationReport {
    /// Build a report from a population and its fitness mapping.
    ///
    /// Returns `None` when there is nothing to report.
    pub fn from_evaluation(
        generation: usize,
        population: &Population,
        fitness: &FitnessMap,
        codec: &ChromosomeCodec,
    ) -> Option<Self> {
        let (best_index, best_fitness) = fitness.best()?;
        let (worst_index, worst_fitness) = fitness.worst()?;

        Some(Self {
            generation,
            best: IndividualReport::new(best_index, population, best_fitness, codec)?,
            worst: IndividualReport::new(worst_index, population, worst_fitness, codec)?,
            mean_fitness: fitness.mean()?,
            diversity: population.diversity(),
            timing: TimingStats::default(),
        })
    }

    /// Set timing information
    pub fn with_timing(mut self, timing: TimingStats) -> Self {
        self.timing = timing;
        self
    }
}

/// Statistics collector for a bounded run
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct EvolutionStats {
    /// Report per generation
    pub generations: Vec<GenerationReport>,
    /// Total runtime in milliseconds
    pub total_runtime_ms: f64,
}

impl EvolutionStats {
    /// Create a new stats collector
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a generation's report
    pub fn record(&mut self, report: GenerationReport) {
        self.generations.push(report);
    }

    /// Get the number of generations recorded
    pub fn num_generations(&self) -> usize {
        self.generations.len()
    }

    /// Get the best report across all generations
    pub fn best(&self) -> Option<&GenerationReport> {
        self.generations.iter().fold(None, |acc, r| match acc {
            Some(best) if r.best.fitness <= best.best.fitness => Some(best),
            _ => Some(r),
        })
    }

    /// Get the final report
    pub fn last(&self) -> Option<&GenerationReport> {
        self.generations.last()
    }

    /// Get the history of best fitness values
    pub fn best_fitness_history(&self) -> Vec<f64> {
        self.generations.iter().map(|g| g.best.fitness).collect()
    }

    /// Get the history of mean fitness values
    pub fn mean_fitness_history(&self) -> Vec<f64> {
        self.generations.iter().map(|g| g.mean_fitness).collect()
    }

    /// Set the total runtime
    pub fn set_runtime(&mut self, duration: Duration) {
        self.total_runtime_ms = duration.as_secs_f64() * 1000.0;
    }

    /// Get a summary of the run
    pub fn summary(&self) -> String {
        match self.best() {
            Some(best) => format!(
                "Evolution Summary:\n\
                 - Generations: {}\n\
                 - Best fitness: {:.6} (generation {})\n\
                 - Best melody: {}\n\
                 - Runtime: {:.2}ms",
                self.num_generations(),
                best.best.fitness,
                best.generation,
                best.best.expression,
                self.total_runtime_ms
            ),
            None => "Evolution Summary:\n - Generations: 0".to_string(),
        }
    }
}

/// Prelude for diagnostics
pub mod prelude {
    pub use super::reporter::*;
    pub use super::{EvolutionStats, GenerationReport, IndividualReport, TimingStats};
}
