//! Built-in melodic heuristics
//!
//! A small, deterministic stand-in for a full music-theory analysis. It
//! rewards longer melodies, some use of rests, singable intervals and a
//! melody that returns to its opening pitch class.

use crate::error::AnalysisError;
use crate::fitness::traits::AnalysisCollaborator;
use crate::genome::codec::Expression;

/// Weights for [`HeuristicScorer`]
#[derive(Clone, Debug, PartialEq)]
pub struct HeuristicWeights {
    /// Quarter notes of duration worth one point
    pub duration_divisor: f64,
    /// Bonus when the melody uses at least one rest
    pub rest_bonus: f64,
    /// Penalty when rests make up more than half of the melody
    pub rest_heavy_penalty: f64,
    /// Bonus per consecutive note pair a step, third, fourth or fifth apart
    pub interval_bonus: f64,
    /// Bonus when the last note shares the first note's pitch class
    pub return_bonus: f64,
}

impl Default for HeuristicWeights {
    fn default() -> Self {
        Self {
            duration_divisor: 32.0,
            rest_bonus: 0.1,
            rest_heavy_penalty: 0.1,
            interval_bonus: 0.05,
            return_bonus: 0.2,
        }
    }
}

/// Semitone distances that count as consonant melodic motion
const CONSONANT_INTERVALS: [u8; 5] = [2, 3, 4, 5, 7];

/// Rule-based scorer over an expression's notes and rests
#[derive(Clone, Debug, Default)]
pub struct HeuristicScorer {
    weights: HeuristicWeights,
}

impl HeuristicScorer {
    pub fn new(weights: HeuristicWeights) -> Self {
        Self { weights }
    }

    pub fn weights(&self) -> &HeuristicWeights {
        &self.weights
    }
}

impl AnalysisCollaborator for HeuristicScorer {
    fn score(&self, expression: &Expression) -> Result<f64, AnalysisError> {
        if expression.is_empty() {
            return Err(AnalysisError(
                "cannot analyse an empty expression".to_string(),
            ));
        }
        let w = &self.weights;
        let mut score = expression.quarter_length() / w.duration_divisor;

        let rests = expression.rest_count();
        if rests > 0 {
            score += w.rest_bonus;
        }
        if rests as f64 / expression.len() as f64 > 0.5 {
            score -= w.rest_heavy_penalty;
        }

        let pitches: Vec<u8> = expression
            .symbols()
            .iter()
            .filter_map(|s| s.pitch())
            .map(|p| p.midi_key())
            .collect();

        let consonant_steps = pitches
            .windows(2)
            .filter(|pair| CONSONANT_INTERVALS.contains(&pair[0].abs_diff(pair[1])))
            .count();
        score += consonant_steps as f64 * w.interval_bonus;

        if let (Some(first), Some(last)) = (pitches.first(), pitches.last()) {
            if pitches.len() > 1 && first % 12 == last % 12 {
                score += w.return_bonus;
            }
        }

        Ok(score.max(0.0))
    }
}
