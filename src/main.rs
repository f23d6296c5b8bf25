use std::path::PathBuf;

use clap::Parser;
use log::info;
use rand::rngs::StdRng;
use rand::SeedableRng;

use melody_evo::prelude::*;

/// Evolve short melodies with a bit-string genetic algorithm.
#[derive(Parser, Debug)]
#[command(name = "melody-evo", version, about, long_about = None)]
struct Args {
    /// TOML configuration file; defaults are used when omitted
    config: Option<PathBuf>,

    /// Seed for the random number generator
    #[arg(long)]
    seed: Option<u64>,

    /// Directory receiving the best melody of each generation
    #[arg(long, default_value = "midi")]
    midi_dir: PathBuf,

    /// Stop after this many generations instead of running indefinitely
    #[arg(long)]
    generations: Option<usize>,

    /// Tempo of rendered melodies in beats per minute
    #[arg(long, default_value_t = 120)]
    tempo: u32,

    /// General MIDI program of rendered melodies
    #[arg(long, default_value_t = 0, value_parser = clap::value_parser!(u8).range(0..=127))]
    program: u8,
}

fn main() -> Result<(), EvolutionError> {
    env_logger::init();
    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => {
            info!("Loading configuration from {}", path.display());
            EvolutionConfig::from_toml_file(path)?
        }
        None => EvolutionConfig::default(),
    };
    if let Some(generations) = args.generations {
        config = config.with_max_generations(generations);
    }

    let mut rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let renderer = MidiRenderer::new(args.midi_dir)
        .with_tempo(args.tempo)
        .with_program(args.program);

    let mut ga = MelodyGA::builder()
        .config(config)
        .analysis(HeuristicScorer::default())
        .renderer(renderer)
        .reporter(ConsoleReporter)
        .build()?;

    let stats = ga.run(&mut rng)?;
    println!("{}", stats.summary());
    Ok(())
}
