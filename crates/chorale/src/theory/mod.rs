//! Pitch arithmetic, voices, chord qualities and scale degrees.
//!
//! Everything here is immutable table data keyed by small enums. Pitches
//! are MIDI note numbers; a pitch class is a pitch modulo 12.

pub mod degree;
pub mod quality;
pub mod voice;

use chorale_solver::ValueSet;

pub use degree::{ChordState, Degree};
pub use quality::{ChordMember, ChordQuality};
pub use voice::{Voice, VoicePair};

pub const OCTAVE: i64 = 12;

pub const UNISON: i64 = 0;
pub const MINOR_SECOND: i64 = 1;
pub const MAJOR_SECOND: i64 = 2;
pub const MINOR_THIRD: i64 = 3;
pub const MAJOR_THIRD: i64 = 4;
pub const PERFECT_FOURTH: i64 = 5;
pub const TRITONE: i64 = 6;
pub const PERFECT_FIFTH: i64 = 7;
pub const MINOR_SIXTH: i64 = 8;
pub const MAJOR_SIXTH: i64 = 9;
pub const MINOR_SEVENTH: i64 = 10;
pub const MAJOR_SEVENTH: i64 = 11;

/// Lowest representable pitch.
pub const MIN_PITCH: i64 = 0;
/// Highest representable pitch.
pub const MAX_PITCH: i64 = 127;

const NOTE_NAMES: [&str; 12] = [
    "C", "C#", "D", "D#", "E", "F", "F#", "G", "G#", "A", "A#", "B",
];

/// The pitch class of a pitch or interval, always in `0..12`.
pub fn pitch_class(pitch: i64) -> i64 {
    pitch.rem_euclid(OCTAVE)
}

/// The name of a pitch class, using sharps.
pub fn pitch_class_name(pc: i64) -> &'static str {
    NOTE_NAMES[pitch_class(pc) as usize]
}

/// Scientific pitch notation, middle C (60) being `C4`.
///
/// # Examples
///
/// ```
/// use chorale::theory::note_name;
///
/// assert_eq!(note_name(60), "C4");
/// assert_eq!(note_name(43), "G2");
/// assert_eq!(note_name(70), "A#4");
/// ```
pub fn note_name(pitch: i64) -> String {
    format!("{}{}", pitch_class_name(pitch), pitch.div_euclid(OCTAVE) - 1)
}

/// Every pitch in `MIN_PITCH..=MAX_PITCH` whose class is in `classes`.
pub fn all_octaves(classes: impl IntoIterator<Item = i64>) -> ValueSet {
    let mut wanted = [false; OCTAVE as usize];
    for pc in classes {
        wanted[pitch_class(pc) as usize] = true;
    }
    (MIN_PITCH..=MAX_PITCH)
        .filter(|&p| wanted[pitch_class(p) as usize])
        .collect()
}
