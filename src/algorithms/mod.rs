//! Evolutionary algorithms
//!
//! This module provides the generational melody GA.

pub mod melody_ga;

pub mod prelude {
    pub use super::melody_ga::*;
}
