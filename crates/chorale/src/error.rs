//! Construction-time errors.
//!
//! These describe input that cannot be turned into a model at all. A
//! model that has no solution is not an error; the search reports it as
//! an empty outcome.

use thiserror::Error;

use chorale_core::ChoraleError;

use crate::theory::{ChordQuality, ChordState, Degree};

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ModelError {
    #[error("progression has no chords")]
    EmptyProgression,

    #[error("{field} has {found} entries, expected {expected}")]
    LengthMismatch {
        field: &'static str,
        expected: usize,
        found: usize,
    },

    #[error("tonic {0} is not a pitch class in 0..=11")]
    InvalidTonic(i64),

    #[error("scale {0:?} must be seven positive steps summing to 12")]
    InvalidScale(Vec<i64>),

    #[error("chord {position}: a {quality} chord has no {state}")]
    InvalidState {
        position: usize,
        quality: ChordQuality,
        state: ChordState,
    },

    #[error("chord {position}: degree {degree} cannot be voiced in {state}")]
    UnsupportedState {
        position: usize,
        degree: Degree,
        state: ChordState,
    },

    #[error("chord {position}: degree {degree} cannot take a {quality} quality")]
    UnsupportedCombination {
        position: usize,
        degree: Degree,
        quality: ChordQuality,
    },

    #[error("scale has no default chord on degree {0}")]
    NoDefaultQuality(Degree),

    #[error("undefined degree id {0}")]
    UndefinedDegree(u8),

    #[error("undefined chord quality id {0}")]
    UndefinedQuality(u8),

    #[error("undefined chord state id {0}")]
    UndefinedState(u8),

    #[error("a {quality} chord has no member {member}")]
    UndefinedMember { quality: ChordQuality, member: usize },

    #[error("invalid section layout: {0}")]
    InvalidSection(String),

    #[error("cannot parse progression: {0}")]
    Parse(String),
}

impl From<ModelError> for ChoraleError {
    fn from(err: ModelError) -> Self {
        ChoraleError::Model(err.to_string())
    }
}
