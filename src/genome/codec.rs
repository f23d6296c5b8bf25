//! Chromosome decoding
//!
//! Turns a chromosome into an [`Expression`]: the ordered symbols of its
//! mapped genes, with leading and trailing rests stripped. Decoding is one
//! way; nothing encodes an expression back into bits.

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::error::GenomeError;
use crate::genome::chromosome::Chromosome;
use crate::genome::gene_table::{GeneTable, Symbol};

/// Decoded, strip-normalized sequence of symbols
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Expression {
    symbols: Vec<Symbol>,
}

impl Expression {
    /// Wrap symbols without stripping
    pub fn new(symbols: Vec<Symbol>) -> Self {
        Self { symbols }
    }

    /// Drop all leading rests, then all trailing rests
    pub fn strip(mut self) -> Self {
        let start = self
            .symbols
            .iter()
            .position(Symbol::is_note)
            .unwrap_or(self.symbols.len());
        self.symbols.drain(..start);
        let end = self
            .symbols
            .iter()
            .rposition(Symbol::is_note)
            .map_or(0, |i| i + 1);
        self.symbols.truncate(end);
        self
    }

    /// True when the expression has more than `min_len` symbols
    pub fn is_well_formed(&self, min_len: usize) -> bool {
        self.symbols.len() > min_len
    }

    pub fn symbols(&self) -> &[Symbol] {
        &self.symbols
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    /// Number of rest symbols
    pub fn rest_count(&self) -> usize {
        self.symbols.iter().filter(|s| s.is_rest()).count()
    }

    /// Total playback length in quarter notes
    pub fn quarter_length(&self) -> f64 {
        self.symbols.iter().map(Symbol::quarter_length).sum()
    }
}

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (i, symbol) in self.symbols.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", symbol)?;
        }
        write!(f, "]")
    }
}

/// Decodes chromosomes through a shared gene table
#[derive(Clone, Debug)]
pub struct ChromosomeCodec {
    table: Arc<GeneTable>,
}

impl ChromosomeCodec {
    pub fn new(table: Arc<GeneTable>) -> Self {
        Self { table }
    }

    /// Codec over the reference table
    pub fn standard() -> Self {
        Self::new(Arc::new(GeneTable::standard()))
    }

    pub fn table(&self) -> &GeneTable {
        &self.table
    }

    pub fn gene_size(&self) -> usize {
        self.table.gene_size()
    }

    /// Decode a chromosome.
    ///
    /// Fails with [`GenomeError::Structural`] when the length is not a
    /// multiple of the gene size and with [`GenomeError::NoGenes`] when no
    /// gene maps to a symbol. Unmapped genes are dropped. The stripped
    /// result may be empty.
    pub fn decode(&self, chromosome: &Chromosome) -> Result<Expression, GenomeError> {
        let symbols: Vec<Symbol> = chromosome
            .gene_codes(self.gene_size())?
            .into_iter()
            .filter_map(|code| self.table.lookup(code))
            .collect();

        if symbols.is_empty() {
            return Err(GenomeError::NoGenes);
        }

        Ok(Expression::new(symbols).strip())
    }
}

impl Default for ChromosomeCodec {
    fn default() -> Self {
        Self::standard()
    }
}
