//! Chorale - four-voice harmonization as a constraint model
//!
//! Given a chord progression (degrees, qualities and inversions in a key),
//! finds bass, tenor, alto and soprano pitches for every chord that obey
//! classical harmony and voice-leading rules, minimizing a five-level
//! lexicographic cost.
//!
//! # Example
//!
//! ```rust
//! use chorale::prelude::*;
//!
//! let spec = ProgressionSpec::major(0, vec![
//!     ChordSpec::root(Degree::First),
//!     ChordSpec::root(Degree::Fourth),
//!     ChordSpec::root(Degree::Fifth),
//!     ChordSpec::root(Degree::First),
//! ]);
//! let outcome = harmonize(&spec, SolverConfig::new().with_termination_seconds(30)).unwrap();
//! let best = outcome.best().unwrap();
//! assert_eq!(best.chord_count(), 4);
//! // chord 2 is V: the bass sings G
//! assert_eq!(best.pitch(2, Voice::Bass) % 12, 7);
//! ```

pub mod error;
pub mod harmonization;
pub mod harmonize;
pub mod piece;
pub mod preferences;
pub mod progression;
pub mod rules;
pub mod theory;
pub mod tonality;
pub mod voicing;

pub use chorale_core::{ChoraleError, CostVector, Result};
pub use error::ModelError;
pub use harmonization::{Harmonization, HarmonizationOutcome};
pub use harmonize::{harmonize, HarmonyModel, Harmonizer};
pub use piece::{ModulationKind, Piece, PieceSpec};
pub use progression::{Chord, ChordSpec, Progression, ProgressionSpec};
pub use tonality::{Mode, Tonality};
pub use voicing::Voicing;

/// Everything needed to describe and harmonize a progression.
pub mod prelude {
    pub use crate::theory::{ChordQuality, ChordState, Degree, Voice};
    pub use crate::{
        harmonize, ChordSpec, CostVector, Harmonization, HarmonizationOutcome, Harmonizer,
        ModulationKind, PieceSpec, ProgressionSpec,
    };
    pub use chorale_config::SolverConfig;
}
