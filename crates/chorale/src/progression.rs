//! Progression input and its validated, resolved form.

use serde::{Deserialize, Serialize};

use crate::error::ModelError;
use crate::theory::{pitch_class, ChordMember, ChordQuality, ChordState, Degree};
use crate::tonality::{Mode, Tonality};

/// One chord of the input: a degree, an optional quality and a state.
///
/// Without a quality the key's default quality for the degree is used.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChordSpec {
    pub degree: Degree,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quality: Option<ChordQuality>,
    #[serde(default)]
    pub state: ChordState,
}

impl ChordSpec {
    pub fn new(degree: Degree, state: ChordState) -> Self {
        Self {
            degree,
            quality: None,
            state,
        }
    }

    /// A root-position chord with the default quality.
    pub fn root(degree: Degree) -> Self {
        Self::new(degree, ChordState::Fundamental)
    }

    pub fn with_quality(mut self, quality: ChordQuality) -> Self {
        self.quality = Some(quality);
        self
    }
}

/// A chord progression in one key.
///
/// # Examples
///
/// ```
/// use chorale::theory::Degree;
/// use chorale::{ChordSpec, ProgressionSpec};
///
/// let spec = ProgressionSpec::major(
///     0,
///     vec![
///         ChordSpec::root(Degree::First),
///         ChordSpec::root(Degree::Fifth),
///         ChordSpec::root(Degree::First),
///     ],
/// );
/// let progression = spec.resolve().unwrap();
/// assert_eq!(progression.chord(1).bass_pitch_class(), 7);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgressionSpec {
    pub tonic: i64,
    #[serde(default = "major_steps")]
    pub mode_intervals: Vec<i64>,
    pub chords: Vec<ChordSpec>,
}

fn major_steps() -> Vec<i64> {
    Tonality::MAJOR_STEPS.to_vec()
}

impl ProgressionSpec {
    pub fn new(tonic: i64, mode_intervals: Vec<i64>, chords: Vec<ChordSpec>) -> Self {
        Self {
            tonic,
            mode_intervals,
            chords,
        }
    }

    pub fn major(tonic: i64, chords: Vec<ChordSpec>) -> Self {
        Self::new(tonic, Mode::Major.steps().to_vec(), chords)
    }

    pub fn minor(tonic: i64, chords: Vec<ChordSpec>) -> Self {
        Self::new(tonic, Mode::Minor.steps().to_vec(), chords)
    }

    /// Builds a progression from parallel degree, quality and state lists.
    pub fn from_parts(
        tonic: i64,
        mode_intervals: Vec<i64>,
        degrees: &[Degree],
        qualities: &[ChordQuality],
        states: &[ChordState],
    ) -> Result<Self, ModelError> {
        check_length("qualities", degrees.len(), qualities.len())?;
        check_length("states", degrees.len(), states.len())?;
        let chords = degrees
            .iter()
            .zip(qualities)
            .zip(states)
            .map(|((&degree, &quality), &state)| ChordSpec {
                degree,
                quality: Some(quality),
                state,
            })
            .collect();
        Ok(Self::new(tonic, mode_intervals, chords))
    }

    /// Like [`ProgressionSpec::from_parts`], from numeric ids.
    pub fn from_ids(
        tonic: i64,
        mode_intervals: Vec<i64>,
        degrees: &[u8],
        qualities: &[u8],
        states: &[u8],
    ) -> Result<Self, ModelError> {
        let degrees = degrees
            .iter()
            .map(|&id| Degree::from_id(id).ok_or(ModelError::UndefinedDegree(id)))
            .collect::<Result<Vec<_>, _>>()?;
        let qualities = qualities
            .iter()
            .map(|&id| ChordQuality::from_id(id).ok_or(ModelError::UndefinedQuality(id)))
            .collect::<Result<Vec<_>, _>>()?;
        let states = states
            .iter()
            .map(|&id| ChordState::from_id(id).ok_or(ModelError::UndefinedState(id)))
            .collect::<Result<Vec<_>, _>>()?;
        Self::from_parts(tonic, mode_intervals, &degrees, &qualities, &states)
    }

    pub fn from_toml_str(s: &str) -> Result<Self, ModelError> {
        toml::from_str(s).map_err(|e| ModelError::Parse(e.to_string()))
    }

    pub fn len(&self) -> usize {
        self.chords.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chords.is_empty()
    }

    /// Validates the input and fills in default qualities.
    pub fn resolve(&self) -> Result<Progression, ModelError> {
        if self.chords.is_empty() {
            return Err(ModelError::EmptyProgression);
        }
        let tonality = Tonality::from_steps(self.tonic, &self.mode_intervals)?;
        let chords = self
            .chords
            .iter()
            .enumerate()
            .map(|(position, spec)| Chord::resolve(&tonality, position, spec))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Progression { tonality, chords })
    }
}

fn check_length(field: &'static str, expected: usize, found: usize) -> Result<(), ModelError> {
    if expected == found {
        Ok(())
    } else {
        Err(ModelError::LengthMismatch {
            field,
            expected,
            found,
        })
    }
}

/// Whether a degree may carry a quality.
pub fn is_supported(degree: Degree, quality: ChordQuality) -> bool {
    match degree {
        Degree::AugmentedSixth => quality == ChordQuality::AugmentedSixth,
        Degree::FlatTwo => quality == ChordQuality::Major,
        Degree::FifthAppoggiatura => {
            matches!(quality, ChordQuality::Major | ChordQuality::Minor)
        }
        d if d.is_secondary_dominant() => {
            matches!(quality, ChordQuality::Major | ChordQuality::DominantSeventh)
        }
        _ => quality != ChordQuality::AugmentedSixth,
    }
}

/// A validated chord with its root resolved against the key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Chord {
    pub degree: Degree,
    pub quality: ChordQuality,
    pub state: ChordState,
    pub root: i64,
}

impl Chord {
    fn resolve(tonality: &Tonality, position: usize, spec: &ChordSpec) -> Result<Self, ModelError> {
        let quality = match spec.quality {
            Some(q) => q,
            None => tonality.default_quality(spec.degree)?,
        };
        if !is_supported(spec.degree, quality) {
            return Err(ModelError::UnsupportedCombination {
                position,
                degree: spec.degree,
                quality,
            });
        }
        if spec.state.id() as usize >= quality.member_count() {
            return Err(ModelError::InvalidState {
                position,
                quality,
                state: spec.state,
            });
        }
        if spec.degree == Degree::FifthAppoggiatura && spec.state != ChordState::SecondInversion {
            return Err(ModelError::UnsupportedState {
                position,
                degree: spec.degree,
                state: spec.state,
            });
        }
        Ok(Self {
            degree: spec.degree,
            quality,
            state: spec.state,
            root: tonality.root_of(spec.degree),
        })
    }

    /// Pitch class of `member`, if the chord has it.
    pub fn member(&self, member: ChordMember) -> Option<i64> {
        self.quality
            .member_offset(member)
            .map(|o| pitch_class(self.root + o))
    }

    /// The chord's pitch classes, root first.
    pub fn pitch_classes(&self) -> Vec<i64> {
        self.quality
            .offsets()
            .into_iter()
            .map(|o| pitch_class(self.root + o))
            .collect()
    }

    pub fn bass_pitch_class(&self) -> i64 {
        // resolve() guarantees the state names an existing member
        self.member(self.state.bass_member()).unwrap_or(self.root)
    }

    pub fn has_seventh(&self) -> bool {
        self.quality.has_seventh()
    }

    pub fn is_root_position(&self) -> bool {
        self.state == ChordState::Fundamental
    }

    /// V or a secondary dominant.
    pub fn is_dominant(&self) -> bool {
        self.degree == Degree::Fifth || self.degree.is_secondary_dominant()
    }
}

/// A validated progression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Progression {
    tonality: Tonality,
    chords: Vec<Chord>,
}

impl Progression {
    pub fn tonality(&self) -> &Tonality {
        &self.tonality
    }

    pub fn chords(&self) -> &[Chord] {
        &self.chords
    }

    pub fn chord(&self, position: usize) -> &Chord {
        &self.chords[position]
    }

    pub fn len(&self) -> usize {
        self.chords.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chords.is_empty()
    }
}

#[cfg(test)]
mod tests;
