//! Population evaluation
//!
//! Decodes every chromosome, asks the analysis collaborator for a score and
//! collects the scores into a fresh [`FitnessMap`]. Failures never escape:
//! an undecodable chromosome or a collaborator error scores the floor, and
//! every score is raised to at least the floor so selection always has a
//! positive weight to work with.

use log::{debug, warn};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::fitness::traits::{AnalysisCollaborator, FitnessMap};
use crate::genome::chromosome::Chromosome;
use crate::genome::codec::ChromosomeCodec;
use crate::population::population::Population;

/// Outcome of scoring a single chromosome
#[derive(Clone, Copy, Debug, PartialEq)]
enum Scored {
    Analysed(f64),
    Floored,
}

/// Maps a population to its fitness scores
#[derive(Clone, Debug)]
pub struct FitnessEvaluator<A> {
    codec: ChromosomeCodec,
    analysis: A,
    floor: f64,
    parallel: bool,
}

impl<A: AnalysisCollaborator> FitnessEvaluator<A> {
    pub fn new(codec: ChromosomeCodec, analysis: A, floor: f64) -> Self {
        Self {
            codec,
            analysis,
            floor,
            parallel: false,
        }
    }

    /// Enable or disable parallel evaluation
    pub fn parallel(mut self, enabled: bool) -> Self {
        self.parallel = enabled;
        self
    }

    /// The minimum score any chromosome receives
    pub fn floor(&self) -> f64 {
        self.floor
    }

    pub fn analysis(&self) -> &A {
        &self.analysis
    }

    /// Score one chromosome, applying the floor policy
    pub fn score_one(&self, chromosome: &Chromosome) -> f64 {
        match self.score_inner(chromosome) {
            Scored::Analysed(f) => f,
            Scored::Floored => self.floor,
        }
    }

    fn score_inner(&self, chromosome: &Chromosome) -> Scored {
        let expression = match self.codec.decode(chromosome) {
            Ok(e) if !e.is_empty() => e,
            Ok(_) => return Scored::Floored,
            Err(e) => {
                debug!("Chromosome {} scored at floor: {}", chromosome, e);
                return Scored::Floored;
            }
        };

        match self.analysis.score(&expression) {
            Ok(f) if f.is_finite() => Scored::Analysed(f.max(self.floor)),
            Ok(f) => {
                debug!("Analysis returned non-finite score {} for {}", f, expression);
                Scored::Floored
            }
            Err(e) => {
                debug!("{} for {}", e, expression);
                Scored::Floored
            }
        }
    }

    /// Build a new fitness mapping for the whole population.
    ///
    /// The result has one entry per chromosome, in population order,
    /// whether or not evaluation ran in parallel.
    pub fn evaluate(&self, population: &Population) -> FitnessMap {
        let outcomes = self.score_all(population.chromosomes());

        let floored = outcomes.iter().filter(|o| **o == Scored::Floored).count();
        if floored == outcomes.len() && !outcomes.is_empty() {
            warn!("Every chromosome in the population scored the floor");
        } else if floored > 0 {
            debug!("{} of {} chromosomes scored the floor", floored, outcomes.len());
        }

        outcomes
            .into_iter()
            .map(|o| match o {
                Scored::Analysed(f) => f,
                Scored::Floored => self.floor,
            })
            .collect()
    }

    #[cfg(feature = "parallel")]
    fn score_all(&self, chromosomes: &[Chromosome]) -> Vec<Scored> {
        if self.parallel {
            chromosomes.par_iter().map(|c| self.score_inner(c)).collect()
        } else {
            chromosomes.iter().map(|c| self.score_inner(c)).collect()
        }
    }

    #[cfg(not(feature = "parallel"))]
    fn score_all(&self, chromosomes: &[Chromosome]) -> Vec<Scored> {
        chromosomes.iter().map(|c| self.score_inner(c)).collect()
    }
}
