//! Progress reporting
//!
//! Reporters receive a callback at the start of each generation and the
//! finished [`GenerationReport`] once evaluation is done.

use super::GenerationReport;

/// Receives progress callbacks from the evolution loop
pub trait Reporter: Send {
    fn on_generation_start(&mut self, _generation: usize) {}

    fn on_generation_complete(&mut self, report: &GenerationReport);
}

impl<R: Reporter + ?Sized> Reporter for Box<R> {
    fn on_generation_start(&mut self, generation: usize) {
        (**self).on_generation_start(generation)
    }

    fn on_generation_complete(&mut self, report: &GenerationReport) {
        (**self).on_generation_complete(report)
    }
}

/// Prints the best and worst chromosome of each generation to stdout
#[derive(Clone, Debug, Default)]
pub struct ConsoleReporter;

impl ConsoleReporter {
    /// The two lines printed for a report
    pub fn format_lines(report: &GenerationReport) -> [String; 2] {
        [
            format!(
                "Gen. {}: Best chromosome is {} ({}) with a fitness of {}",
                report.generation, report.best.chromosome, report.best.expression, report.best.fitness
            ),
            format!(
                "Gen. {}: Worst chromosome is {} ({}) with a fitness of {}",
                report.generation,
                report.worst.chromosome,
                report.worst.expression,
                report.worst.fitness
            ),
        ]
    }
}

impl Reporter for ConsoleReporter {
    fn on_generation_complete(&mut self, report: &GenerationReport) {
        for line in Self::format_lines(report) {
            println!("{}", line);
        }
    }
}

/// Discards every report
#[derive(Clone, Debug, Default)]
pub struct SilentReporter;

impl Reporter for SilentReporter {
    fn on_generation_complete(&mut self, _report: &GenerationReport) {}
}
