//! Scale degrees, chromatic chord functions and inversions.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::quality::ChordMember;

/// The function of a chord within its key.
///
/// The seven diatonic degrees come first. The remaining variants are
/// chromatic functions whose roots are derived from the tonic rather than
/// read off the scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Degree {
    First,
    Second,
    Third,
    Fourth,
    Fifth,
    Sixth,
    Seventh,
    /// The cadential six-four: a tonic chord in second inversion standing
    /// for the dominant it delays.
    FifthAppoggiatura,
    FiveOfTwo,
    FiveOfThree,
    FiveOfFour,
    FiveOfFive,
    FiveOfSix,
    FiveOfSeven,
    /// The Neapolitan chord, a major triad on the lowered second degree.
    FlatTwo,
    /// The Italian augmented sixth chord on the lowered sixth degree.
    AugmentedSixth,
}

impl Degree {
    pub const ALL: [Degree; 16] = [
        Degree::First,
        Degree::Second,
        Degree::Third,
        Degree::Fourth,
        Degree::Fifth,
        Degree::Sixth,
        Degree::Seventh,
        Degree::FifthAppoggiatura,
        Degree::FiveOfTwo,
        Degree::FiveOfThree,
        Degree::FiveOfFour,
        Degree::FiveOfFive,
        Degree::FiveOfSix,
        Degree::FiveOfSeven,
        Degree::FlatTwo,
        Degree::AugmentedSixth,
    ];

    /// Numeric id, the position in [`Degree::ALL`].
    pub fn id(self) -> u8 {
        self as u8
    }

    pub fn from_id(id: u8) -> Option<Self> {
        Self::ALL.get(id as usize).copied()
    }

    /// The diatonic degree with the given zero-based scale index.
    pub fn diatonic(index: usize) -> Option<Self> {
        Self::ALL[..7].get(index).copied()
    }

    /// Zero-based scale index for the seven diatonic degrees.
    pub fn scale_index(self) -> Option<usize> {
        let id = self as usize;
        (id < 7).then_some(id)
    }

    pub fn is_diatonic(self) -> bool {
        self.scale_index().is_some()
    }

    /// The degree a secondary dominant resolves to.
    pub fn secondary_target(self) -> Option<Degree> {
        match self {
            Degree::FiveOfTwo => Some(Degree::Second),
            Degree::FiveOfThree => Some(Degree::Third),
            Degree::FiveOfFour => Some(Degree::Fourth),
            Degree::FiveOfFive => Some(Degree::Fifth),
            Degree::FiveOfSix => Some(Degree::Sixth),
            Degree::FiveOfSeven => Some(Degree::Seventh),
            _ => None,
        }
    }

    pub fn is_secondary_dominant(self) -> bool {
        self.secondary_target().is_some()
    }

    /// Roman-numeral label.
    pub fn label(self) -> &'static str {
        match self {
            Degree::First => "I",
            Degree::Second => "II",
            Degree::Third => "III",
            Degree::Fourth => "IV",
            Degree::Fifth => "V",
            Degree::Sixth => "VI",
            Degree::Seventh => "VII",
            Degree::FifthAppoggiatura => "Vda",
            Degree::FiveOfTwo => "V/II",
            Degree::FiveOfThree => "V/III",
            Degree::FiveOfFour => "V/IV",
            Degree::FiveOfFive => "V/V",
            Degree::FiveOfSix => "V/VI",
            Degree::FiveOfSeven => "V/VII",
            Degree::FlatTwo => "bII",
            Degree::AugmentedSixth => "It+6",
        }
    }
}

impl fmt::Display for Degree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Which chord member sits in the bass.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum ChordState {
    #[default]
    Fundamental,
    FirstInversion,
    SecondInversion,
    ThirdInversion,
}

impl ChordState {
    pub const ALL: [ChordState; 4] = [
        ChordState::Fundamental,
        ChordState::FirstInversion,
        ChordState::SecondInversion,
        ChordState::ThirdInversion,
    ];

    pub fn id(self) -> u8 {
        self as u8
    }

    pub fn from_id(id: u8) -> Option<Self> {
        Self::ALL.get(id as usize).copied()
    }

    /// The chord member the bass must sing.
    pub fn bass_member(self) -> ChordMember {
        ChordMember::ALL[self as usize]
    }
}

impl fmt::Display for ChordState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ChordState::Fundamental => "root position",
            ChordState::FirstInversion => "first inversion",
            ChordState::SecondInversion => "second inversion",
            ChordState::ThirdInversion => "third inversion",
        };
        f.write_str(name)
    }
}
