//! Checkpointing support for evolution state persistence
//!
//! This module saves the population and fitness mapping at the top of every
//! generation so an interrupted run resumes where it stopped.

mod recovery;
mod state;

pub use recovery::*;
pub use state::*;

/// Prelude for checkpoint module
pub mod prelude {
    pub use super::recovery::*;
    pub use super::state::*;
}
