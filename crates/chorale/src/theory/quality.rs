//! The chord-quality registry.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A chord member, counted from the root in stacked thirds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ChordMember {
    Root,
    Third,
    Fifth,
    Seventh,
}

impl ChordMember {
    pub const ALL: [ChordMember; 4] = [
        ChordMember::Root,
        ChordMember::Third,
        ChordMember::Fifth,
        ChordMember::Seventh,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }
}

impl fmt::Display for ChordMember {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ChordMember::Root => "root",
            ChordMember::Third => "third",
            ChordMember::Fifth => "fifth",
            ChordMember::Seventh => "seventh",
        };
        f.write_str(name)
    }
}

/// A named interval pattern stacked on a root.
///
/// The augmented sixth is the Italian sixth: root, major third and
/// augmented sixth, the latter taking the fifth's slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChordQuality {
    Major,
    Minor,
    Diminished,
    Augmented,
    AugmentedSixth,
    DominantSeventh,
    MajorSeventh,
    MinorSeventh,
    DiminishedSeventh,
    HalfDiminishedSeventh,
    MinorMajorSeventh,
}

impl ChordQuality {
    pub const ALL: [ChordQuality; 11] = [
        ChordQuality::Major,
        ChordQuality::Minor,
        ChordQuality::Diminished,
        ChordQuality::Augmented,
        ChordQuality::AugmentedSixth,
        ChordQuality::DominantSeventh,
        ChordQuality::MajorSeventh,
        ChordQuality::MinorSeventh,
        ChordQuality::DiminishedSeventh,
        ChordQuality::HalfDiminishedSeventh,
        ChordQuality::MinorMajorSeventh,
    ];

    /// Numeric id, the position in [`ChordQuality::ALL`].
    pub fn id(self) -> u8 {
        self as u8
    }

    pub fn from_id(id: u8) -> Option<Self> {
        Self::ALL.get(id as usize).copied()
    }

    /// Semitones between successive members.
    pub fn intervals(self) -> &'static [i64] {
        match self {
            ChordQuality::Major => &[4, 3],
            ChordQuality::Minor => &[3, 4],
            ChordQuality::Diminished => &[3, 3],
            ChordQuality::Augmented => &[4, 4],
            ChordQuality::AugmentedSixth => &[4, 6],
            ChordQuality::DominantSeventh => &[4, 3, 3],
            ChordQuality::MajorSeventh => &[4, 3, 4],
            ChordQuality::MinorSeventh => &[3, 4, 3],
            ChordQuality::DiminishedSeventh => &[3, 3, 3],
            ChordQuality::HalfDiminishedSeventh => &[3, 3, 4],
            ChordQuality::MinorMajorSeventh => &[3, 4, 4],
        }
    }

    pub fn member_count(self) -> usize {
        self.intervals().len() + 1
    }

    pub fn has_seventh(self) -> bool {
        self.member_count() == 4
    }

    /// Semitones from the root to `member`, if the chord has it.
    pub fn member_offset(self, member: ChordMember) -> Option<i64> {
        let index = member.index();
        if index >= self.member_count() {
            return None;
        }
        Some(self.intervals()[..index].iter().sum())
    }

    /// Offsets of all members from the root, root first.
    pub fn offsets(self) -> Vec<i64> {
        let mut offsets = vec![0];
        let mut acc = 0;
        for step in self.intervals() {
            acc += step;
            offsets.push(acc);
        }
        offsets
    }

    /// The members the chord has, root first.
    pub fn members(self) -> &'static [ChordMember] {
        &ChordMember::ALL[..self.member_count()]
    }

    /// Recognises a triad from its two stacked intervals.
    pub fn triad_from_intervals(lower: i64, upper: i64) -> Option<Self> {
        match (lower, upper) {
            (4, 3) => Some(ChordQuality::Major),
            (3, 4) => Some(ChordQuality::Minor),
            (3, 3) => Some(ChordQuality::Diminished),
            (4, 4) => Some(ChordQuality::Augmented),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            ChordQuality::Major => "major",
            ChordQuality::Minor => "minor",
            ChordQuality::Diminished => "diminished",
            ChordQuality::Augmented => "augmented",
            ChordQuality::AugmentedSixth => "augmented sixth",
            ChordQuality::DominantSeventh => "dominant seventh",
            ChordQuality::MajorSeventh => "major seventh",
            ChordQuality::MinorSeventh => "minor seventh",
            ChordQuality::DiminishedSeventh => "diminished seventh",
            ChordQuality::HalfDiminishedSeventh => "half-diminished seventh",
            ChordQuality::MinorMajorSeventh => "minor-major seventh",
        }
    }
}

impl fmt::Display for ChordQuality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
