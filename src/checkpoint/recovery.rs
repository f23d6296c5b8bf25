//! Checkpoint recovery and persistence
//!
//! Provides serialization of the population and fitness artifacts to and
//! from a checkpoint directory, with format detection and versioning.

use log::debug;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use super::state::{
    Checkpoint, FitnessArtifact, PopulationArtifact, CHECKPOINT_VERSION, FITNESS_FILE,
    POPULATION_FILE,
};
use crate::config::EvolutionConfig;
use crate::error::CheckpointError;
use crate::fitness::traits::FitnessMap;

/// Magic bytes of a binary population artifact
const POPULATION_MAGIC: &[u8; 4] = b"MEVP";
/// Magic bytes of a binary fitness artifact
const FITNESS_MAGIC: &[u8; 4] = b"MEVF";

/// Format for checkpoint serialization
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CheckpointFormat {
    /// JSON format (human-readable, larger)
    #[default]
    Json,
    /// Binary format (compact, fast)
    Binary,
}

/// Write one artifact to `path`
fn save_artifact<T: Serialize>(
    artifact: &T,
    path: &Path,
    format: CheckpointFormat,
    magic: &[u8; 4],
) -> Result<(), CheckpointError> {
    // Written to a sibling file, then renamed over the target
    let tmp_path = path.with_extension("tmp");
    {
        let file = File::create(&tmp_path)?;
        let mut writer = BufWriter::new(file);

        match format {
            CheckpointFormat::Json => {
                serde_json::to_writer_pretty(&mut writer, artifact)
                    .map_err(|e| CheckpointError::Serialization(e.to_string()))?;
            }
            CheckpointFormat::Binary => {
                writer.write_all(&CHECKPOINT_VERSION.to_le_bytes())?;
                writer.write_all(magic)?;
                bincode::serialize_into(&mut writer, artifact)
                    .map_err(|e| CheckpointError::Serialization(e.to_string()))?;
            }
        }

        writer.flush()?;
    }
    std::fs::rename(&tmp_path, path)?;
    Ok(())
}

/// Load one artifact from `path`, detecting its format
fn load_artifact<T: DeserializeOwned>(path: &Path, magic: &[u8; 4]) -> Result<T, CheckpointError> {
    if !path.exists() {
        return Err(CheckpointError::NotFound(path.display().to_string()));
    }

    let bytes = std::fs::read(path)?;

    if bytes.len() >= 8 && &bytes[4..8] == magic {
        check_version(u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]))?;
        bincode::deserialize(&bytes[8..])
            .map_err(|e| CheckpointError::Deserialization(e.to_string()))
    } else if bytes.len() >= 8 && (&bytes[4..8] == POPULATION_MAGIC || &bytes[4..8] == FITNESS_MAGIC)
    {
        Err(CheckpointError::Corrupted(format!(
            "{} holds the wrong kind of artifact",
            path.display()
        )))
    } else {
        serde_json::from_slice(&bytes).map_err(|e| CheckpointError::Deserialization(e.to_string()))
    }
}

/// Reject artifacts written by a newer format version
fn check_version(found: u32) -> Result<(), CheckpointError> {
    if found > CHECKPOINT_VERSION {
        return Err(CheckpointError::VersionMismatch {
            expected: CHECKPOINT_VERSION,
            found,
        });
    }
    Ok(())
}

/// Reads and writes the checkpoint of a run
///
/// A checkpoint is a directory holding a `population` file and a
/// `fitnesses` file. Either format is read regardless of the format the
/// store writes.
#[derive(Clone, Debug)]
pub struct CheckpointStore {
    /// Directory for checkpoint files
    directory: PathBuf,
    /// Serialization format used when saving
    format: CheckpointFormat,
}

impl CheckpointStore {
    /// Create a new checkpoint store
    pub fn new(directory: impl Into<PathBuf>) -> Self {
        Self {
            directory: directory.into(),
            format: CheckpointFormat::default(),
        }
    }

    /// Create a store from the checkpoint settings of a config
    pub fn from_config(config: &EvolutionConfig) -> Self {
        Self::new(config.checkpoint_dir.clone()).with_format(config.checkpoint_format)
    }

    /// Set the serialization format
    pub fn with_format(mut self, format: CheckpointFormat) -> Self {
        self.format = format;
        self
    }

    pub fn directory(&self) -> &Path {
        &self.directory
    }

    pub fn format(&self) -> CheckpointFormat {
        self.format
    }

    pub fn population_path(&self) -> PathBuf {
        self.directory.join(POPULATION_FILE)
    }

    pub fn fitness_path(&self) -> PathBuf {
        self.directory.join(FITNESS_FILE)
    }

    /// Whether a population artifact is present
    pub fn exists(&self) -> bool {
        self.population_path().exists()
    }

    /// Save both artifacts, replacing any previous checkpoint
    pub fn save(&self, checkpoint: &Checkpoint) -> Result<(), CheckpointError> {
        std::fs::create_dir_all(&self.directory)?;

        let (population, fitness) = checkpoint.to_artifacts();
        save_artifact(&population, &self.population_path(), self.format, POPULATION_MAGIC)?;
        save_artifact(&fitness, &self.fitness_path(), self.format, FITNESS_MAGIC)?;

        debug!(
            "Saved generation {} checkpoint ({} chromosomes, {} scores) to {}",
            checkpoint.generation,
            checkpoint.population.len(),
            checkpoint.fitness.len(),
            self.directory.display()
        );
        Ok(())
    }

    /// Load the checkpoint if one exists.
    ///
    /// Returns `Ok(None)` when there is no population artifact. A missing
    /// fitness artifact loads as an empty mapping. The population must hold
    /// exactly `population_size` chromosomes of `chromosome_size` bits, and
    /// the fitness mapping must be empty or match the population in size.
    pub fn load(
        &self,
        chromosome_size: usize,
        population_size: usize,
    ) -> Result<Option<Checkpoint>, CheckpointError> {
        let population_path = self.population_path();
        if !population_path.exists() {
            debug!("No checkpoint found in {}", self.directory.display());
            return Ok(None);
        }

        let population: PopulationArtifact = load_artifact(&population_path, POPULATION_MAGIC)?;
        check_version(population.version)?;

        let fitness_path = self.fitness_path();
        let fitness = if fitness_path.exists() {
            let artifact: FitnessArtifact = load_artifact(&fitness_path, FITNESS_MAGIC)?;
            check_version(artifact.version)?;
            artifact.fitness
        } else {
            FitnessMap::new()
        };

        let PopulationArtifact {
            generation,
            population,
            ..
        } = population;

        if population.len() != population_size {
            return Err(CheckpointError::Corrupted(format!(
                "expected {} chromosomes, found {}",
                population_size,
                population.len()
            )));
        }
        population
            .check_lengths(chromosome_size)
            .map_err(|e| CheckpointError::Corrupted(e.to_string()))?;

        if !fitness.is_empty() && fitness.len() != population.len() {
            return Err(CheckpointError::Inconsistent {
                population: population.len(),
                fitness: fitness.len(),
            });
        }

        debug!(
            "Loaded generation {} checkpoint from {}",
            generation,
            self.directory.display()
        );
        Ok(Some(Checkpoint::new(generation.max(1), population, fitness)))
    }
}
