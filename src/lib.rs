//! # melody-evo
//!
//! Evolves short melodies with a genetic algorithm.
//!
//! A population of fixed-length bit strings is decoded into notes and rests
//! through a gene table, scored by an analysis collaborator and improved
//! generation by generation with roulette selection, one-point crossover
//! and bit-flip mutation. The population is checkpointed at the top of
//! every generation so a run survives restarts.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use melody_evo::prelude::*;
//! use rand::SeedableRng;
//!
//! let mut rng = rand::rngs::StdRng::seed_from_u64(42);
//!
//! let stats = MelodyGA::builder()
//!     .config(EvolutionConfig::default().with_max_generations(50))
//!     .analysis(HeuristicScorer::default())
//!     .renderer(MidiRenderer::new("midi"))
//!     .reporter(ConsoleReporter)
//!     .build()?
//!     .run(&mut rng)?;
//! ```

pub mod algorithms;
pub mod checkpoint;
pub mod config;
pub mod diagnostics;
pub mod error;
pub mod fitness;
pub mod genome;
pub mod operators;
pub mod population;
pub mod render;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::algorithms::prelude::*;
    pub use crate::checkpoint::prelude::*;
    pub use crate::config::EvolutionConfig;
    pub use crate::diagnostics::prelude::*;
    pub use crate::error::*;
    pub use crate::fitness::prelude::*;
    pub use crate::genome::prelude::*;
    pub use crate::operators::prelude::*;
    pub use crate::population::prelude::*;
    pub use crate::render::*;
}
