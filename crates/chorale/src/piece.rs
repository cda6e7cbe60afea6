//! Pieces made of several sections joined by modulations.
//!
//! Every section is a progression in its own key. All sections share one
//! voicing: section `k + 1` starts right after section `k`, or on its last
//! chord when the two are joined by a pivot chord.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::ModelError;
use crate::progression::{Chord, Progression, ProgressionSpec};
use crate::rules::Section;

/// How one section leads into the next.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModulationKind {
    /// The new key starts after a full cadence in the old one.
    PerfectCadence,
    /// The new key is reached by altering notes of the old one.
    Alteration,
    /// One chord belongs to both keys and is voiced once.
    PivotChord,
    /// The new leading tone is approached by a semitone in the same voice.
    Chromatic,
}

impl ModulationKind {
    /// Number of chords shared by the two sections.
    pub fn overlap(self) -> usize {
        match self {
            Self::PivotChord => 1,
            _ => 0,
        }
    }
}

impl fmt::Display for ModulationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::PerfectCadence => "perfect cadence",
            Self::Alteration => "alteration",
            Self::PivotChord => "pivot chord",
            Self::Chromatic => "chromatic",
        };
        f.write_str(name)
    }
}

/// Input for a piece: the sections and one modulation between each
/// neighbouring pair.
///
/// # Examples
///
/// ```
/// use chorale::theory::Degree;
/// use chorale::{ChordSpec, ModulationKind, PieceSpec, ProgressionSpec};
///
/// let home = ProgressionSpec::major(0, vec![
///     ChordSpec::root(Degree::First),
///     ChordSpec::root(Degree::Fifth),
///     ChordSpec::root(Degree::First),
/// ]);
/// let away = ProgressionSpec::major(7, vec![
///     ChordSpec::root(Degree::Fifth),
///     ChordSpec::root(Degree::First),
/// ]);
/// let piece = PieceSpec::single(home)
///     .then(ModulationKind::PerfectCadence, away)
///     .resolve()
///     .unwrap();
/// assert_eq!(piece.len(), 5);
/// assert_eq!(piece.start(1), 3);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PieceSpec {
    pub sections: Vec<ProgressionSpec>,
    #[serde(default)]
    pub modulations: Vec<ModulationKind>,
}

impl PieceSpec {
    pub fn single(section: ProgressionSpec) -> Self {
        Self {
            sections: vec![section],
            modulations: Vec::new(),
        }
    }

    /// Appends a section reached through `modulation`.
    pub fn then(mut self, modulation: ModulationKind, section: ProgressionSpec) -> Self {
        self.modulations.push(modulation);
        self.sections.push(section);
        self
    }

    pub fn from_toml_str(s: &str) -> Result<Self, ModelError> {
        toml::from_str(s).map_err(|e| ModelError::Parse(e.to_string()))
    }

    /// Validates every section and the way they are joined.
    pub fn resolve(&self) -> Result<Piece, ModelError> {
        if self.sections.is_empty() {
            return Err(ModelError::EmptyProgression);
        }
        if self.modulations.len() + 1 != self.sections.len() {
            return Err(ModelError::LengthMismatch {
                field: "modulations",
                expected: self.sections.len() - 1,
                found: self.modulations.len(),
            });
        }

        let sections = self
            .sections
            .iter()
            .map(ProgressionSpec::resolve)
            .collect::<Result<Vec<_>, _>>()?;

        let mut starts = Vec::with_capacity(sections.len());
        let mut next = 0;
        for (k, section) in sections.iter().enumerate() {
            let overlap = match k.checked_sub(1) {
                Some(previous) => {
                    let modulation = self.modulations[previous];
                    if modulation == ModulationKind::PivotChord {
                        check_pivot(previous, &sections[previous], section)?;
                    }
                    modulation.overlap()
                }
                None => 0,
            };
            let start = next - overlap;
            starts.push(start);
            next = start + section.len();
        }

        Ok(Piece {
            sections,
            modulations: self.modulations.clone(),
            starts,
            len: next,
        })
    }
}

impl From<ProgressionSpec> for PieceSpec {
    fn from(section: ProgressionSpec) -> Self {
        Self::single(section)
    }
}

fn check_pivot(index: usize, before: &Progression, after: &Progression) -> Result<(), ModelError> {
    let last = before.chords()[before.len() - 1];
    let first = after.chords()[0];
    let mut a = last.pitch_classes();
    let mut b = first.pitch_classes();
    a.sort_unstable();
    b.sort_unstable();
    if a != b || last.bass_pitch_class() != first.bass_pitch_class() {
        return Err(ModelError::InvalidSection(format!(
            "pivot between sections {index} and {}: {} in {} is not {} in {}",
            index + 1,
            last.degree,
            before.tonality(),
            first.degree,
            after.tonality(),
        )));
    }
    Ok(())
}

/// A validated piece with every section placed on the shared voicing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Piece {
    sections: Vec<Progression>,
    modulations: Vec<ModulationKind>,
    starts: Vec<usize>,
    len: usize,
}

impl Piece {
    pub fn sections(&self) -> &[Progression] {
        &self.sections
    }

    pub fn modulations(&self) -> &[ModulationKind] {
        &self.modulations
    }

    /// Position of the first chord of section `k`.
    pub fn start(&self, k: usize) -> usize {
        self.starts[k]
    }

    /// Number of chords actually voiced.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Section `k` as placed on the voicing.
    pub fn section(&self, k: usize) -> Section<'_> {
        let progression = &self.sections[k];
        Section::new(progression.tonality(), progression.chords(), self.starts[k])
    }

    pub fn section_views(&self) -> impl Iterator<Item = Section<'_>> + '_ {
        (0..self.sections.len()).map(|k| self.section(k))
    }

    /// The chord voiced at `position`, read from the first section that
    /// contains it.
    pub fn chord_at(&self, position: usize) -> &Chord {
        let k = self
            .starts
            .iter()
            .rposition(|&start| start <= position)
            .unwrap_or(0);
        // a pivot belongs to the earlier section first
        let pivot = k > 0
            && self.starts[k] == position
            && self.modulations[k - 1] == ModulationKind::PivotChord;
        let k = if pivot { k - 1 } else { k };
        let progression = &self.sections[k];
        &progression.chords()[position - self.starts[k]]
    }

    /// One chord per voiced position.
    pub fn chords(&self) -> Vec<Chord> {
        (0..self.len).map(|p| *self.chord_at(p)).collect()
    }

    /// The joins between sections: the modulation, the section it leads
    /// to and the last position of the section it leaves.
    pub fn joins(&self) -> impl Iterator<Item = Join<'_>> + '_ {
        self.modulations.iter().enumerate().map(move |(k, &kind)| {
            let before = self.section(k);
            Join {
                kind,
                from: before,
                to: self.section(k + 1),
                last: before.end() - 1,
            }
        })
    }
}

impl From<Progression> for Piece {
    fn from(progression: Progression) -> Self {
        let len = progression.len();
        Self {
            sections: vec![progression],
            modulations: Vec::new(),
            starts: vec![0],
            len,
        }
    }
}

/// Two neighbouring sections.
#[derive(Debug, Clone, Copy)]
pub struct Join<'a> {
    pub kind: ModulationKind,
    pub from: Section<'a>,
    pub to: Section<'a>,
    /// Last position of `from`.
    pub last: usize,
}
