//! Fitness evaluation
//!
//! This module provides the analysis collaborator abstraction, the
//! population evaluator and a built-in heuristic scorer.

pub mod evaluator;
pub mod heuristic;
pub mod traits;

pub use evaluator::FitnessEvaluator;
pub use traits::{AnalysisCollaborator, FitnessMap};

pub mod prelude {
    pub use super::evaluator::*;
    pub use super::heuristic::*;
    pub use super::traits::*;
}
