//! Genome abstractions and implementations
//!
//! This module provides the gene table, the bit-string chromosome and the
//! codec that decodes one into the other.

pub mod chromosome;
pub mod codec;
pub mod gene_table;
pub mod traits;

pub mod prelude {
    pub use super::chromosome::*;
    pub use super::codec::*;
    pub use super::gene_table::*;
    pub use super::traits::*;
}
