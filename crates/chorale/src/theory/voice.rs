//! The four voices and their pairings.

use std::fmt;

/// One of the four voices, lowest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Voice {
    Bass,
    Tenor,
    Alto,
    Soprano,
}

impl Voice {
    pub const ALL: [Voice; 4] = [Voice::Bass, Voice::Tenor, Voice::Alto, Voice::Soprano];

    /// The voices above the bass.
    pub const UPPER: [Voice; 3] = [Voice::Tenor, Voice::Alto, Voice::Soprano];

    pub const COUNT: usize = 4;

    /// Position within a chord, bass first.
    pub fn index(self) -> usize {
        self as usize
    }

    /// The inclusive pitch range the voice may sing.
    pub fn register(self) -> (i64, i64) {
        match self {
            Voice::Bass => (40, 60),
            Voice::Tenor => (48, 69),
            Voice::Alto => (55, 75),
            Voice::Soprano => (60, 84),
        }
    }

    /// Weight of keeping a note in this voice across two chords.
    /// A held note counts double in the tenor and alto.
    pub fn common_tone_weight(self) -> i64 {
        match self {
            Voice::Bass | Voice::Soprano => 1,
            Voice::Tenor | Voice::Alto => 2,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Voice::Bass => "bass",
            Voice::Tenor => "tenor",
            Voice::Alto => "alto",
            Voice::Soprano => "soprano",
        }
    }
}

impl fmt::Display for Voice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// An ordered pair of voices, `lower` strictly below `upper`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct VoicePair {
    pub lower: Voice,
    pub upper: Voice,
}

impl VoicePair {
    pub const ALL: [VoicePair; 6] = [
        VoicePair::new(Voice::Bass, Voice::Tenor),
        VoicePair::new(Voice::Bass, Voice::Alto),
        VoicePair::new(Voice::Bass, Voice::Soprano),
        VoicePair::new(Voice::Tenor, Voice::Alto),
        VoicePair::new(Voice::Tenor, Voice::Soprano),
        VoicePair::new(Voice::Alto, Voice::Soprano),
    ];

    pub const fn new(lower: Voice, upper: Voice) -> Self {
        Self { lower, upper }
    }

    /// Position in [`VoicePair::ALL`].
    pub fn index(self) -> usize {
        match (self.lower, self.upper) {
            (Voice::Bass, Voice::Tenor) => 0,
            (Voice::Bass, Voice::Alto) => 1,
            (Voice::Bass, Voice::Soprano) => 2,
            (Voice::Tenor, Voice::Alto) => 3,
            (Voice::Tenor, Voice::Soprano) => 4,
            _ => 5,
        }
    }

    /// Widest allowed distance in semitones between the two voices.
    ///
    /// Adjacent upper voices stay within an octave, the tenor within a
    /// twelfth of the bass.
    pub fn max_spread(self) -> i64 {
        match self.index() {
            0 => 19,
            1 => 31,
            2 => 43,
            3 => 12,
            4 => 24,
            _ => 12,
        }
    }
}

impl fmt::Display for VoicePair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.lower, self.upper)
    }
}
