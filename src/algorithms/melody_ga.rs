//! Melody Genetic Algorithm
//!
//! This module implements the generational loop that evolves melodies:
//! checkpoint, evaluate, report, render, breed, repeat.

use std::sync::Arc;
use std::time::Instant;

use log::{info, warn};
use rand::Rng;

use crate::checkpoint::{Checkpoint, CheckpointStore};
use crate::config::EvolutionConfig;
use crate::diagnostics::{EvolutionStats, GenerationReport, Reporter, SilentReporter, TimingStats};
use crate::error::{EvoResult, EvolutionError};
use crate::fitness::traits::{AnalysisCollaborator, FitnessMap};
use crate::fitness::FitnessEvaluator;
use crate::genome::codec::ChromosomeCodec;
use crate::genome::gene_table::GeneTable;
use crate::operators::crossover::OnePointCrossover;
use crate::operators::mutation::BitFlipMutation;
use crate::operators::selection::RouletteSelection;
use crate::operators::traits::CrossoverOperator;
use crate::population::initializer::PopulationInitializer;
use crate::population::population::Population;
use crate::render::{NullRenderer, Renderer};

/// Builder for MelodyGA
pub struct MelodyGABuilder<A> {
    config: EvolutionConfig,
    table: GeneTable,
    analysis: Option<A>,
    renderer: Box<dyn Renderer>,
    reporter: Box<dyn Reporter>,
    checkpointing: bool,
}

impl MelodyGABuilder<()> {
    /// Create a new builder with default configuration
    pub fn new() -> Self {
        Self {
            config: EvolutionConfig::default(),
            table: GeneTable::standard(),
            analysis: None,
            renderer: Box::new(NullRenderer),
            reporter: Box::new(SilentReporter),
            checkpointing: true,
        }
    }
}

impl Default for MelodyGABuilder<()> {
    fn default() -> Self {
        Self::new()
    }
}

impl<A> MelodyGABuilder<A> {
    /// Set the configuration
    pub fn config(mut self, config: EvolutionConfig) -> Self {
        self.config = config;
        self
    }

    /// Set the gene table
    pub fn gene_table(mut self, table: GeneTable) -> Self {
        self.table = table;
        self
    }

    /// Set the rendering collaborator
    pub fn renderer<R: Renderer + 'static>(mut self, renderer: R) -> Self {
        self.renderer = Box::new(renderer);
        self
    }

    /// Set the progress reporter
    pub fn reporter<R: Reporter + 'static>(mut self, reporter: R) -> Self {
        self.reporter = Box::new(reporter);
        self
    }

    /// Enable or disable reading and writing checkpoints
    pub fn checkpointing(mut self, enabled: bool) -> Self {
        self.checkpointing = enabled;
        self
    }

    /// Set the analysis collaborator
    pub fn analysis<NewA>(self, analysis: NewA) -> MelodyGABuilder<NewA>
    where
        NewA: AnalysisCollaborator,
    {
        MelodyGABuilder {
            config: self.config,
            table: self.table,
            analysis: Some(analysis),
            renderer: self.renderer,
            reporter: self.reporter,
            checkpointing: self.checkpointing,
        }
    }
}

impl<A: AnalysisCollaborator> MelodyGABuilder<A> {
    /// Build the MelodyGA instance
    pub fn build(self) -> EvoResult<MelodyGA<A>> {
        if let Err(e) = self.config.validate() {
            warn!("Rejected configuration: {}", e);
            return Err(e);
        }

        if self.table.gene_size() != self.config.gene_size {
            return Err(EvolutionError::Configuration(format!(
                "Gene table uses {}-bit codes but the configuration asks for {}",
                self.table.gene_size(),
                self.config.gene_size
            )));
        }

        let analysis = self.analysis.ok_or_else(|| {
            EvolutionError::Configuration("Analysis collaborator must be specified".to_string())
        })?;

        let codec = ChromosomeCodec::new(Arc::new(self.table));
        let config = self.config;

        Ok(MelodyGA {
            initializer: PopulationInitializer::new(&config, codec.clone()),
            evaluator: FitnessEvaluator::new(codec.clone(), analysis, config.fitness_floor)
                .parallel(config.parallel_evaluation),
            selection: RouletteSelection::new(),
            crossover: OnePointCrossover::new(config.crossover_rate),
            mutation: BitFlipMutation::new(config.mutation_rate),
            store: self
                .checkpointing
                .then(|| CheckpointStore::from_config(&config)),
            renderer: self.renderer,
            reporter: self.reporter,
            codec,
            config,
            state: None,
        })
    }
}

/// Mutable state of a running search
#[derive(Clone, Debug, PartialEq)]
pub struct EvolutionState {
    /// Generation about to run, starting at 1
    pub generation: usize,
    /// Population entering evaluation
    pub population: Population,
    /// Scores from the previous generation; empty before the first
    pub fitness: FitnessMap,
}

/// Melody Genetic Algorithm
///
/// A generational GA over fixed-length bit-string melodies with roulette
/// selection, one-point crossover and bit-flip mutation. The population is
/// checkpointed at the top of every generation so a stopped run resumes
/// from the population that was about to be evaluated.
pub struct MelodyGA<A> {
    config: EvolutionConfig,
    codec: ChromosomeCodec,
    initializer: PopulationInitializer,
    evaluator: FitnessEvaluator<A>,
    selection: RouletteSelection,
    crossover: OnePointCrossover,
    mutation: BitFlipMutation,
    store: Option<CheckpointStore>,
    renderer: Box<dyn Renderer>,
    reporter: Box<dyn Reporter>,
    state: Option<EvolutionState>,
}

impl MelodyGA<()> {
    /// Create a builder for MelodyGA
    pub fn builder() -> MelodyGABuilder<()> {
        MelodyGABuilder::new()
    }
}

impl<A: AnalysisCollaborator> MelodyGA<A> {
    pub fn config(&self) -> &EvolutionConfig {
        &self.config
    }

    pub fn codec(&self) -> &ChromosomeCodec {
        &self.codec
    }

    /// Current state, once bootstrapped
    pub fn state(&self) -> Option<&EvolutionState> {
        self.state.as_ref()
    }

    /// Generation that will run next, 0 before bootstrapping
    pub fn generation(&self) -> usize {
        self.state.as_ref().map_or(0, |s| s.generation)
    }

    /// Population that will be evaluated next
    pub fn population(&self) -> Option<&Population> {
        self.state.as_ref().map(|s| &s.population)
    }

    /// Resume from the checkpoint, or initialize a fresh population.
    ///
    /// A checkpoint that cannot be read or does not fit this configuration
    /// is reported and replaced by a fresh population. Does nothing once
    /// bootstrapped.
    pub fn bootstrap<R: Rng>(&mut self, rng: &mut R) -> EvoResult<()> {
        if self.state.is_some() {
            return Ok(());
        }

        let restored = match &self.store {
            Some(store) => {
                match store.load(self.config.chromosome_size(), self.config.population_size) {
                    Ok(checkpoint) => checkpoint,
                    Err(e) => {
                        warn!(
                            "Failed to load checkpoint from {}: {}; starting from a fresh population",
                            store.directory().display(),
                            e
                        );
                        None
                    }
                }
            }
            None => None,
        };

        let state = match restored {
            Some(checkpoint) => {
                info!(
                    "Resuming at generation {} from {} chromosomes",
                    checkpoint.generation,
                    checkpoint.population.len()
                );
                EvolutionState {
                    generation: checkpoint.generation,
                    population: checkpoint.population,
                    fitness: checkpoint.fitness,
                }
            }
            None => {
                let population = self
                    .initializer
                    .generate_population(self.config.population_size, rng)?;
                info!("Initialized {} chromosomes", population.len());
                EvolutionState {
                    generation: 1,
                    population,
                    fitness: FitnessMap::new(),
                }
            }
        };

        self.state = Some(state);
        Ok(())
    }

    /// Run one generation and return its report
    pub fn step<R: Rng>(&mut self, rng: &mut R) -> EvoResult<GenerationReport> {
        self.bootstrap(rng)?;
        let state = self.state.as_mut().ok_or(EvolutionError::EmptyPopulation)?;
        let gen_start = Instant::now();

        self.reporter.on_generation_start(state.generation);

        if let Some(store) = &self.store {
            store.save(&Checkpoint::new(
                state.generation,
                state.population.clone(),
                state.fitness.clone(),
            ))?;
        }

        // Evaluate into a fresh mapping
        let eval_start = Instant::now();
        let fitness = self.evaluator.evaluate(&state.population);
        let eval_time = eval_start.elapsed();

        let report =
            GenerationReport::from_evaluation(state.generation, &state.population, &fitness, &self.codec)
                .ok_or(EvolutionError::EmptyPopulation)?;

        info!(
            "Generation {}: best {:.4}, worst {:.4}, mean {:.4}",
            report.generation, report.best.fitness, report.worst.fitness, report.mean_fitness
        );

        match self.codec.decode(&report.best.chromosome) {
            Ok(expression) => {
                if let Err(e) = self.renderer.render(&expression, state.generation) {
                    warn!("Rendering generation {} failed: {}", state.generation, e);
                }
            }
            Err(e) => warn!("Best chromosome of generation {} is undecodable: {}", state.generation, e),
        }

        // Breed the next population
        let breed_start = Instant::now();
        let size = self.config.population_size;
        let wheel = self.selection.wheel(&fitness)?;
        let mut next = Population::with_capacity(size + 1);

        while next.len() < size {
            let (a, b) = wheel.spin_pair(rng);
            {
                let mut pair = state.population.pair_mut(a, b)?;
                self.crossover.crossover(&mut pair, rng)?;
                self.mutation.mutate_pair(&mut pair, rng);
            }
            next.push(state.population[a].clone());
            next.push(state.population[b].clone());
        }
        next.truncate(size);
        let breed_time = breed_start.elapsed();

        state.population = next;
        state.fitness = fitness;
        state.generation += 1;

        let report = report.with_timing(
            TimingStats::new()
                .with_evaluation(eval_time)
                .with_breeding(breed_time)
                .with_total(gen_start.elapsed()),
        );
        self.reporter.on_generation_complete(&report);
        Ok(report)
    }

    /// Run exactly `generations` cycles
    pub fn run_for<R: Rng>(&mut self, generations: usize, rng: &mut R) -> EvoResult<EvolutionStats> {
        let start_time = Instant::now();
        let mut stats = EvolutionStats::new();

        for _ in 0..generations {
            stats.record(self.step(rng)?);
        }

        stats.set_runtime(start_time.elapsed());
        Ok(stats)
    }

    /// Run until the configured generation limit, or forever without one.
    ///
    /// Only returns early on an error.
    pub fn run<R: Rng>(&mut self, rng: &mut R) -> EvoResult<EvolutionStats> {
        if let Some(max) = self.config.max_generations {
            return self.run_for(max, rng);
        }

        loop {
            self.step(rng)?;
        }
    }
}
