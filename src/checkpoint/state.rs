//! Checkpoint state structures
//!
//! The saved state of a run is two artifacts: the population entering
//! evaluation and the most recent fitness mapping. Each records the format
//! version and the generation it belongs to.

use serde::{Deserialize, Serialize};

use crate::fitness::traits::FitnessMap;
use crate::population::population::Population;

/// Current checkpoint format version
pub const CHECKPOINT_VERSION: u32 = 1;

/// File name of the population artifact inside the checkpoint directory
pub const POPULATION_FILE: &str = "population";

/// File name of the fitness artifact inside the checkpoint directory
pub const FITNESS_FILE: &str = "fitnesses";

/// On-disk form of the population
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PopulationArtifact {
    /// Schema version for forward compatibility
    pub version: u32,
    /// Generation this population is about to be evaluated in
    pub generation: usize,
    pub population: Population,
}

/// On-disk form of the fitness mapping
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FitnessArtifact {
    /// Schema version for forward compatibility
    pub version: u32,
    /// Generation whose evaluation produced these scores, 0 if none yet
    pub generation: usize,
    pub fitness: FitnessMap,
}

/// Evolution state restored from, or written to, a checkpoint
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Checkpoint {
    /// Generation to resume at
    pub generation: usize,
    /// Population entering evaluation
    pub population: Population,
    /// Scores of the previous generation; may be empty
    pub fitness: FitnessMap,
}

impl Checkpoint {
    /// Create a new checkpoint
    pub fn new(generation: usize, population: Population, fitness: FitnessMap) -> Self {
        Self {
            generation,
            population,
            fitness,
        }
    }

    /// Split into the two on-disk artifacts
    pub fn to_artifacts(&self) -> (PopulationArtifact, FitnessArtifact) {
        let fitness_generation = if self.fitness.is_empty() {
            0
        } else {
            self.generation.saturating_sub(1)
        };
        (
            PopulationArtifact {
                version: CHECKPOINT_VERSION,
                generation: self.generation,
                population: self.population.clone(),
            },
            FitnessArtifact {
                version: CHECKPOINT_VERSION,
                generation: fitness_generation,
                fitness: self.fitness.clone(),
            },
        )
    }
}
