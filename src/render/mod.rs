//! Rendering collaborators
//!
//! A renderer turns the best expression of a generation into something
//! that can be listened to. Rendering failures never stop a run.

use std::path::{Path, PathBuf};

use midly::{
    num::{u15, u24, u28, u4, u7},
    Format, Header, MetaMessage, MidiMessage, Smf, Timing, Track, TrackEvent, TrackEventKind,
};

use crate::error::RenderError;
use crate::genome::codec::Expression;
use crate::genome::gene_table::Symbol;

/// Ticks per quarter note in MIDI output.
const TICKS_PER_QUARTER: u16 = 480;

/// Slowest tempo whose quarter-note length still fits a 24-bit tempo event.
const MIN_TEMPO_BPM: u32 = 4;

/// Renders the best expression of a generation
pub trait Renderer: Send + Sync {
    fn render(&self, expression: &Expression, generation: usize) -> Result<(), RenderError>;
}

impl<R: Renderer + ?Sized> Renderer for Box<R> {
    fn render(&self, expression: &Expression, generation: usize) -> Result<(), RenderError> {
        (**self).render(expression, generation)
    }
}

/// Renders nothing
#[derive(Clone, Debug, Default)]
pub struct NullRenderer;

impl Renderer for NullRenderer {
    fn render(&self, _expression: &Expression, _generation: usize) -> Result<(), RenderError> {
        Ok(())
    }
}

/// Writes each rendered expression as a single-track Standard MIDI File
#[derive(Clone, Debug)]
pub struct MidiRenderer {
    output_dir: PathBuf,
    tempo_bpm: u32,
    velocity: u8,
    program: u8,
}

impl MidiRenderer {
    /// Render into `output_dir` at 120 bpm on an acoustic grand piano
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
            tempo_bpm: 120,
            velocity: 80,
            program: 0,
        }
    }

    /// Set the tempo in beats per minute, no slower than 4 bpm
    pub fn with_tempo(mut self, bpm: u32) -> Self {
        self.tempo_bpm = bpm.max(MIN_TEMPO_BPM);
        self
    }

    /// Set the General MIDI program (0..=127)
    pub fn with_program(mut self, program: u8) -> Self {
        self.program = program.min(127);
        self
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// File written for `generation`
    pub fn path_for(&self, generation: usize) -> PathBuf {
        self.output_dir
            .join(format!("best_gen_{:04}.mid", generation))
    }

    /// Convert an expression to an in-memory SMF.
    ///
    /// Rests add silence before the next note; every note sounds for its
    /// full quarter length.
    pub fn to_smf(&self, expression: &Expression) -> Smf<'static> {
        let mut smf = Smf::new(Header::new(
            Format::SingleTrack,
            Timing::Metrical(u15::new(TICKS_PER_QUARTER)),
        ));

        let channel = u4::new(0);
        let mut track: Track<'static> = Vec::new();

        let tempo_microseconds = 60_000_000 / self.tempo_bpm;
        track.push(TrackEvent {
            delta: u28::new(0),
            kind: TrackEventKind::Meta(MetaMessage::Tempo(u24::new(tempo_microseconds))),
        });
        track.push(TrackEvent {
            delta: u28::new(0),
            kind: TrackEventKind::Meta(MetaMessage::TrackName(b"Melody")),
        });
        track.push(TrackEvent {
            delta: u28::new(0),
            kind: TrackEventKind::Midi {
                channel,
                message: MidiMessage::ProgramChange {
                    program: u7::new(self.program),
                },
            },
        });

        // Ticks of silence owed before the next event
        let mut pending: u32 = 0;
        for symbol in expression.symbols() {
            let ticks = (symbol.quarter_length() * TICKS_PER_QUARTER as f64).round() as u32;
            match symbol {
                Symbol::Rest(_) => pending += ticks,
                Symbol::Note(pitch) => {
                    let key = u7::new(pitch.midi_key().min(127));
                    track.push(TrackEvent {
                        delta: u28::new(pending),
                        kind: TrackEventKind::Midi {
                            channel,
                            message: MidiMessage::NoteOn {
                                key,
                                vel: u7::new(self.velocity),
                            },
                        },
                    });
                    track.push(TrackEvent {
                        delta: u28::new(ticks),
                        kind: TrackEventKind::Midi {
                            channel,
                            message: MidiMessage::NoteOff { key, vel: u7::new(0) },
                        },
                    });
                    pending = 0;
                }
            }
        }

        track.push(TrackEvent {
            delta: u28::new(pending),
            kind: TrackEventKind::Meta(MetaMessage::EndOfTrack),
        });
        smf.tracks.push(track);
        smf
    }
}

impl Renderer for MidiRenderer {
    fn render(&self, expression: &Expression, generation: usize) -> Result<(), RenderError> {
        if expression.is_empty() {
            return Err(RenderError::Empty(format!(
                "generation {} has an empty best expression",
                generation
            )));
        }

        let smf = self.to_smf(expression);
        let mut buf = Vec::new();
        smf.write(&mut buf)
            .map_err(|e| RenderError::Encode(e.to_string()))?;

        std::fs::create_dir_all(&self.output_dir)?;
        std::fs::write(self.path_for(generation), &buf)?;
        Ok(())
    }
}
