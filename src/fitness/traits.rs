//! Fitness traits
//!
//! The analysis collaborator that scores a decoded expression, and the
//! per-generation mapping from population index to score.

use serde::{Deserialize, Serialize};

use crate::error::AnalysisError;
use crate::genome::codec::Expression;

/// Scores a decoded expression.
///
/// Implementations must return a non-negative score where higher is better,
/// and should return the same score for the same expression. Calls are
/// independent, so one collaborator may be shared across evaluation threads.
pub trait AnalysisCollaborator: Send + Sync {
    /// Score an expression, or report why it cannot be analysed
    fn score(&self, expression: &Expression) -> Result<f64, AnalysisError>;
}

impl<A: AnalysisCollaborator + ?Sized> AnalysisCollaborator for Box<A> {
    fn score(&self, expression: &Expression) -> Result<f64, AnalysisError> {
        (**self).score(expression)
    }
}

impl<A: AnalysisCollaborator + ?Sized> AnalysisCollaborator for std::sync::Arc<A> {
    fn score(&self, expression: &Expression) -> Result<f64, AnalysisError> {
        (**self).score(expression)
    }
}

/// A simple function wrapper for analysis
#[derive(Clone)]
pub struct FnAnalysis<F>
where
    F: Fn(&Expression) -> Result<f64, AnalysisError>,
{
    f: F,
}

impl<F> FnAnalysis<F>
where
    F: Fn(&Expression) -> Result<f64, AnalysisError>,
{
    /// Create a new function-based collaborator
    pub fn new(f: F) -> Self {
        Self { f }
    }
}

impl<F> AnalysisCollaborator for FnAnalysis<F>
where
    F: Fn(&Expression) -> Result<f64, AnalysisError> + Send + Sync,
{
    fn score(&self, expression: &Expression) -> Result<f64, AnalysisError> {
        (self.f)(expression)
    }
}

/// Fitness score of every chromosome in the current population, by index
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FitnessMap {
    scores: Vec<f64>,
}

impl FitnessMap {
    /// Create an empty mapping
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a mapping where `scores[i]` belongs to chromosome `i`
    pub fn from_scores(scores: Vec<f64>) -> Self {
        Self { scores }
    }

    pub fn len(&self) -> usize {
        self.scores.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }

    /// Score of chromosome `index`
    pub fn get(&self, index: usize) -> Option<f64> {
        self.scores.get(index).copied()
    }

    pub fn scores(&self) -> &[f64] {
        &self.scores
    }

    /// Index and score of the first highest-scoring chromosome
    pub fn best(&self) -> Option<(usize, f64)> {
        self.scores
            .iter()
            .copied()
            .enumerate()
            .fold(None, |acc, (i, f)| match acc {
                Some((_, best)) if f <= best => acc,
                _ => Some((i, f)),
            })
    }

    /// Index and score of the first lowest-scoring chromosome
    pub fn worst(&self) -> Option<(usize, f64)> {
        self.scores
            .iter()
            .copied()
            .enumerate()
            .fold(None, |acc, (i, f)| match acc {
                Some((_, worst)) if f >= worst => acc,
                _ => Some((i, f)),
            })
    }

    /// Mean score
    pub fn mean(&self) -> Option<f64> {
        if self.scores.is_empty() {
            return None;
        }
        Some(self.scores.iter().sum::<f64>() / self.scores.len() as f64)
    }

    /// Whether at least one score is positive
    pub fn has_positive(&self) -> bool {
        self.scores.iter().any(|&f| f > 0.0)
    }
}

impl FromIterator<f64> for FitnessMap {
    fn from_iter<I: IntoIterator<Item = f64>>(iter: I) -> Self {
        Self::from_scores(iter.into_iter().collect())
    }
}
