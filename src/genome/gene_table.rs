//! Gene table
//!
//! Fixed lookup from gene codes to musical symbols. Several codes share a
//! symbol, and a custom table may leave codes unmapped.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::GenomeError;

const PITCH_NAMES: [&str; 12] = [
    "C", "C#", "D", "D#", "E", "F", "F#", "G", "G#", "A", "A#", "B",
];

/// A sounding pitch, stored as its MIDI key number
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Pitch(u8);

impl Pitch {
    /// Create a pitch from a MIDI key number (clamped to 0..=127)
    pub fn from_midi(key: u8) -> Self {
        Self(key.min(127))
    }

    /// MIDI key number
    pub fn midi_key(&self) -> u8 {
        self.0
    }

    /// Octave in scientific pitch notation (middle C is C4)
    pub fn octave(&self) -> i8 {
        (self.0 / 12) as i8 - 1
    }

    /// Pitch class, 0 = C through 11 = B
    pub fn pitch_class(&self) -> u8 {
        self.0 % 12
    }

    /// Letter name with optional sharp, e.g. "A#"
    pub fn name(&self) -> &'static str {
        PITCH_NAMES[self.pitch_class() as usize]
    }

    /// Whether this pitch carries a sharp
    pub fn is_sharp(&self) -> bool {
        self.name().len() > 1
    }
}

impl fmt::Display for Pitch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.name(), self.octave())
    }
}

/// Nominal duration class of a rest
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RestDuration {
    Whole,
    Half,
    Quarter,
    Eighth,
    Sixteenth,
}

impl RestDuration {
    /// Note value denominator, e.g. 4 for a quarter rest
    pub fn denominator(&self) -> u8 {
        match self {
            Self::Whole => 1,
            Self::Half => 2,
            Self::Quarter => 4,
            Self::Eighth => 8,
            Self::Sixteenth => 16,
        }
    }

    /// Length in quarter notes when played back.
    ///
    /// Whole and half rests are far too long for an eight-gene melody, so
    /// they play back as a quarter and an eighth.
    pub fn playback_quarter_length(&self) -> f64 {
        match self {
            Self::Whole | Self::Quarter => 1.0,
            Self::Half | Self::Eighth => 0.5,
            Self::Sixteenth => 0.25,
        }
    }
}

/// One decoded musical event
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Symbol {
    /// A sounding note
    Note(Pitch),
    /// A rest of some nominal duration
    Rest(RestDuration),
}

impl Symbol {
    /// Shorthand for a note from a MIDI key
    pub fn note(key: u8) -> Self {
        Self::Note(Pitch::from_midi(key))
    }

    pub fn is_rest(&self) -> bool {
        matches!(self, Self::Rest(_))
    }

    pub fn is_note(&self) -> bool {
        matches!(self, Self::Note(_))
    }

    /// The pitch, if this is a note
    pub fn pitch(&self) -> Option<Pitch> {
        match self {
            Self::Note(p) => Some(*p),
            Self::Rest(_) => None,
        }
    }

    /// Playback length in quarter notes (notes last one quarter)
    pub fn quarter_length(&self) -> f64 {
        match self {
            Self::Note(_) => 1.0,
            Self::Rest(d) => d.playback_quarter_length(),
        }
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Note(p) => write!(f, "{}", p),
            Self::Rest(d) => write!(f, "R{}", d.denominator()),
        }
    }
}

/// Lookup table from gene codes to symbols
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GeneTable {
    gene_size: usize,
    entries: Vec<Option<Symbol>>,
}

impl GeneTable {
    /// Build a table for `gene_size`-bit codes from (code, symbol) pairs.
    ///
    /// Codes that are not listed decode to nothing.
    pub fn new(
        gene_size: usize,
        mapping: impl IntoIterator<Item = (u32, Symbol)>,
    ) -> Result<Self, GenomeError> {
        if gene_size == 0 || gene_size > 16 {
            return Err(GenomeError::DimensionMismatch {
                expected: 16,
                actual: gene_size,
            });
        }
        let capacity = 1usize << gene_size;
        let mut entries = vec![None; capacity];
        for (code, symbol) in mapping {
            let slot = entries
                .get_mut(code as usize)
                .ok_or(GenomeError::DimensionMismatch {
                    expected: capacity,
                    actual: code as usize,
                })?;
            *slot = Some(symbol);
        }
        Ok(Self { gene_size, entries })
    }

    /// The reference 6-bit table.
    ///
    /// Codes 0..=31 run chromatically from A3 to E6, codes 32..=36 are the
    /// five rests, and 37..=63 climb to G#7 while repeating A#5 through G#6.
    pub fn standard() -> Self {
        let mut entries = Vec::with_capacity(64);
        for code in 0u8..64 {
            let symbol = match code {
                0..=31 => Symbol::note(57 + code),
                32 => Symbol::Rest(RestDuration::Whole),
                33 => Symbol::Rest(RestDuration::Half),
                34 => Symbol::Rest(RestDuration::Quarter),
                35 => Symbol::Rest(RestDuration::Eighth),
                36 => Symbol::Rest(RestDuration::Sixteenth),
                37..=40 => Symbol::note(89 + (code - 37)),
                41..=47 => Symbol::note(82 + (code - 41)),
                _ => Symbol::note(89 + (code - 48)),
            };
            entries.push(Some(symbol));
        }
        Self {
            gene_size: 6,
            entries,
        }
    }

    /// Bits per gene code
    pub fn gene_size(&self) -> usize {
        self.gene_size
    }

    /// Symbol for a code, or None when unmapped
    pub fn lookup(&self, code: u32) -> Option<Symbol> {
        self.entries.get(code as usize).copied().flatten()
    }

    /// Number of codes that map to a symbol
    pub fn mapped_count(&self) -> usize {
        self.entries.iter().filter(|e| e.is_some()).count()
    }

    /// Number of codes that map to a rest
    pub fn rest_count(&self) -> usize {
        self.entries
            .iter()
            .filter(|e| matches!(e, Some(Symbol::Rest(_))))
            .count()
    }

    /// Number of codes that map to a note
    pub fn note_count(&self) -> usize {
        self.entries
            .iter()
            .filter(|e| matches!(e, Some(Symbol::Note(_))))
            .count()
    }
}

impl Default for GeneTable {
    fn default() -> Self {
        Self::standard()
    }
}
