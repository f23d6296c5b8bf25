//! Population management
//!
//! This module provides the Population container and its random initializer.

pub mod initializer;
#[allow(clippy::module_inception)]
pub mod population;

pub mod prelude {
    pub use super::initializer::*;
    pub use super::population::*;
}
