//! Error types for melody-evo
//!
//! This module defines all error types used throughout the library.

use thiserror::Error;

/// Error type for chromosome and gene operations
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GenomeError {
    /// Chromosome length is not a multiple of the gene size
    #[error("Structural error: chromosome length {length} is not a multiple of gene size {gene_size}")]
    Structural { length: usize, gene_size: usize },

    /// No gene of the chromosome maps to a symbol
    #[error("Chromosome decodes to no symbols")]
    NoGenes,

    /// A textual bit-string contained something other than '0' or '1'
    #[error("Invalid bit character: {0:?}")]
    InvalidBit(char),

    /// Dimension mismatch
    #[error("Dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },
}

/// Error type for operator failures
#[derive(Debug, Error, Clone, PartialEq)]
pub enum OperatorError {
    /// Every fitness is zero or negative, so no weighting exists
    #[error("Degenerate distribution: no individual has positive fitness")]
    DegenerateDistribution,

    /// An operator was handed an index outside the population
    #[error("Index {index} out of range for population of {len}")]
    IndexOutOfRange { index: usize, len: usize },

    /// Parents of different lengths
    #[error("Parent dimensions do not match: {left} vs {right}")]
    DimensionMismatch { left: usize, right: usize },
}

/// Error type for checkpoint operations
#[derive(Debug, Error)]
pub enum CheckpointError {
    /// IO error during checkpoint
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Deserialization error
    #[error("Deserialization error: {0}")]
    Deserialization(String),

    /// Checkpoint version is newer than this build understands
    #[error("Version mismatch: expected {expected}, found {found}")]
    VersionMismatch { expected: u32, found: u32 },

    /// Checkpoint file not found
    #[error("Checkpoint not found: {0}")]
    NotFound(String),

    /// Corrupted checkpoint data
    #[error("Corrupted checkpoint: {0}")]
    Corrupted(String),

    /// Population and fitness artifacts disagree
    #[error("Inconsistent checkpoint: {population} chromosomes but {fitness} fitness entries")]
    Inconsistent { population: usize, fitness: usize },
}

/// Failure reported by the analysis collaborator
#[derive(Debug, Error, Clone, PartialEq)]
#[error("Analysis failed: {0}")]
pub struct AnalysisError(pub String);

/// Failure reported by the rendering collaborator
#[derive(Debug, Error)]
pub enum RenderError {
    /// IO error while writing rendered output
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Encoder failure
    #[error("Encoding error: {0}")]
    Encode(String),

    /// Nothing to render
    #[error("Nothing to render: {0}")]
    Empty(String),
}

/// Top-level error type for evolution operations
#[derive(Debug, Error)]
pub enum EvolutionError {
    /// Genome error
    #[error("Genome error: {0}")]
    Genome(#[from] GenomeError),

    /// Operator error
    #[error("Operator error: {0}")]
    Operator(#[from] OperatorError),

    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    Configuration(String),

    /// Checkpoint error
    #[error("Checkpoint error: {0}")]
    Checkpoint(#[from] CheckpointError),

    /// Empty population
    #[error("Empty population")]
    EmptyPopulation,
}

/// Result type alias for evolution operations
pub type EvoResult<T> = Result<T, EvolutionError>;
