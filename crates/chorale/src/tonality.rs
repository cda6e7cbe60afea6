//! Keys: tonic, scale and the chords they imply.

use std::fmt;

use chorale_solver::ValueSet;

use crate::error::ModelError;
use crate::theory::{
    all_octaves, pitch_class, pitch_class_name, ChordMember, ChordQuality, Degree, MAJOR_SEVENTH,
    MINOR_SECOND, MINOR_SEVENTH, MINOR_SIXTH, PERFECT_FIFTH, PERFECT_FOURTH,
};

/// Major or minor, read off the scale's third.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mode {
    Major,
    Minor,
}

impl Mode {
    /// The scale steps the mode uses. Minor is the harmonic minor.
    pub fn steps(self) -> [i64; 7] {
        match self {
            Mode::Major => Tonality::MAJOR_STEPS,
            Mode::Minor => Tonality::MINOR_STEPS,
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mode::Major => f.write_str("major"),
            Mode::Minor => f.write_str("minor"),
        }
    }
}

/// A key: a tonic pitch class and a seven-step scale.
///
/// # Examples
///
/// ```
/// use chorale::theory::Degree;
/// use chorale::{Mode, Tonality};
///
/// let c_major = Tonality::new(0, Mode::Major).unwrap();
/// assert_eq!(c_major.root_of(Degree::Fifth), 7);
/// assert_eq!(c_major.chord_pitch_classes(Degree::Fifth, c_major.default_quality(Degree::Fifth).unwrap()), vec![7, 11, 2]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tonality {
    tonic: i64,
    mode: Mode,
    steps: [i64; 7],
    scale: [i64; 7],
}

impl Tonality {
    pub const MAJOR_STEPS: [i64; 7] = [2, 2, 1, 2, 2, 2, 1];
    pub const MINOR_STEPS: [i64; 7] = [2, 1, 2, 2, 1, 3, 1];

    pub fn new(tonic: i64, mode: Mode) -> Result<Self, ModelError> {
        Self::from_steps(tonic, &mode.steps())
    }

    /// Builds a key from explicit scale steps.
    ///
    /// The mode is major when the third degree lies a major third above
    /// the tonic, minor otherwise.
    pub fn from_steps(tonic: i64, steps: &[i64]) -> Result<Self, ModelError> {
        if !(0..12).contains(&tonic) {
            return Err(ModelError::InvalidTonic(tonic));
        }
        let valid = steps.len() == 7
            && steps.iter().all(|&s| s > 0)
            && steps.iter().sum::<i64>() == 12;
        if !valid {
            return Err(ModelError::InvalidScale(steps.to_vec()));
        }

        let mut fixed = [0; 7];
        fixed.copy_from_slice(steps);
        let mut scale = [0; 7];
        let mut acc = tonic;
        for (slot, step) in scale.iter_mut().zip(fixed) {
            *slot = pitch_class(acc);
            acc += step;
        }
        let mode = if fixed[0] + fixed[1] == 4 {
            Mode::Major
        } else {
            Mode::Minor
        };

        Ok(Self {
            tonic,
            mode,
            steps: fixed,
            scale,
        })
    }

    pub fn tonic(&self) -> i64 {
        self.tonic
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn steps(&self) -> &[i64; 7] {
        &self.steps
    }

    /// Pitch class of the diatonic degree with zero-based `index`.
    pub fn scale_note(&self, index: usize) -> i64 {
        self.scale[index % 7]
    }

    /// Pitch class of a degree's root.
    ///
    /// Secondary dominants sit a perfect fifth above their target's root;
    /// the chromatic degrees are fixed offsets from the tonic.
    pub fn root_of(&self, degree: Degree) -> i64 {
        if let Some(index) = degree.scale_index() {
            return self.scale[index];
        }
        if let Some(target) = degree.secondary_target() {
            return pitch_class(self.root_of(target) + PERFECT_FIFTH);
        }
        match degree {
            Degree::FlatTwo => pitch_class(self.tonic + MINOR_SECOND),
            Degree::AugmentedSixth => pitch_class(self.tonic + MINOR_SIXTH),
            _ => self.tonic,
        }
    }

    /// The quality a degree takes when none is given.
    ///
    /// Diatonic degrees stack two scale thirds.
    pub fn default_quality(&self, degree: Degree) -> Result<ChordQuality, ModelError> {
        if let Some(index) = degree.scale_index() {
            let root = self.scale_note(index);
            let third = self.scale_note(index + 2);
            let fifth = self.scale_note(index + 4);
            return ChordQuality::triad_from_intervals(
                pitch_class(third - root),
                pitch_class(fifth - third),
            )
            .ok_or(ModelError::NoDefaultQuality(degree));
        }
        if degree.is_secondary_dominant() {
            return Ok(ChordQuality::DominantSeventh);
        }
        match degree {
            Degree::FlatTwo => Ok(ChordQuality::Major),
            Degree::AugmentedSixth => Ok(ChordQuality::AugmentedSixth),
            _ => self.default_quality(Degree::First),
        }
    }

    /// The pitch classes of a chord, root first.
    pub fn chord_pitch_classes(&self, degree: Degree, quality: ChordQuality) -> Vec<i64> {
        let root = self.root_of(degree);
        quality
            .offsets()
            .into_iter()
            .map(|o| pitch_class(root + o))
            .collect()
    }

    /// Every pitch, in all octaves, of a chord on `degree`.
    pub fn chord_pitch_set(&self, degree: Degree, quality: ChordQuality) -> ValueSet {
        all_octaves(self.chord_pitch_classes(degree, quality))
    }

    /// Every pitch, in all octaves, of the default chord on `degree`.
    pub fn pitch_class_set_for_degree(&self, degree: Degree) -> Result<ValueSet, ModelError> {
        let quality = self.default_quality(degree)?;
        Ok(self.chord_pitch_set(degree, quality))
    }

    /// The raised seventh degree, a semitone below the tonic.
    pub fn leading_tone(&self) -> i64 {
        pitch_class(self.tonic + MAJOR_SEVENTH)
    }

    /// The fourth degree, the upper note of the dominant's tritone.
    pub fn subdominant(&self) -> i64 {
        pitch_class(self.tonic + PERFECT_FOURTH)
    }

    /// Degrees I, IV and V.
    pub fn tonal_notes(&self) -> [i64; 3] {
        [self.scale[0], self.scale[3], self.scale[4]]
    }

    /// Degrees III, VI and VII, plus the lowered seventh in minor.
    pub fn modal_notes(&self) -> Vec<i64> {
        let mut notes = vec![self.scale[2], self.scale[5], self.scale[6]];
        if self.mode == Mode::Minor {
            notes.push(pitch_class(self.tonic + MINOR_SEVENTH));
        }
        notes
    }

    pub fn is_tonal_note(&self, pc: i64) -> bool {
        self.tonal_notes().contains(&pitch_class(pc))
    }
}

impl fmt::Display for Tonality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", pitch_class_name(self.tonic), self.mode)
    }
}

/// Semitones from the root of a `quality` chord to its member at
/// `member` (0 = root, 3 = seventh).
pub fn chord_member_offset(quality: ChordQuality, member: usize) -> Result<i64, ModelError> {
    ChordMember::from_index(member)
        .and_then(|m| quality.member_offset(m))
        .ok_or(ModelError::UndefinedMember { quality, member })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(tonic: i64, mode: Mode) -> Tonality {
        Tonality::new(tonic, mode).unwrap()
    }

    #[test]
    fn test_c_major_scale() {
        let c = key(0, Mode::Major);
        let notes: Vec<i64> = (0..7).map(|i| c.scale_note(i)).collect();
        assert_eq!(notes, vec![0, 2, 4, 5, 7, 9, 11]);
        assert_eq!(c.to_string(), "C major");
    }

    #[test]
    fn test_mode_is_read_from_the_third() {
        assert_eq!(key(9, Mode::Minor).mode(), Mode::Minor);
        let dorian = Tonality::from_steps(2, &[2, 1, 2, 2, 2, 1, 2]).unwrap();
        assert_eq!(dorian.mode(), Mode::Minor);
    }

    #[test]
    fn test_invalid_keys_are_rejected() {
        assert_eq!(
            Tonality::new(12, Mode::Major),
            Err(ModelError::InvalidTonic(12))
        );
        assert!(matches!(
            Tonality::from_steps(0, &[2, 2, 1, 2, 2, 2]),
            Err(ModelError::InvalidScale(_))
        ));
        assert!(matches!(
            Tonality::from_steps(0, &[2, 2, 1, 2, 2, 3, 0]),
            Err(ModelError::InvalidScale(_))
        ));
    }

    #[test]
    fn test_default_qualities_in_major() {
        let c = key(0, Mode::Major);
        let qualities: Vec<ChordQuality> = (0..7)
            .map(|i| c.default_quality(Degree::diatonic(i).unwrap()).unwrap())
            .collect();
        use ChordQuality::*;
        assert_eq!(
            qualities,
            vec![Major, Minor, Minor, Major, Major, Minor, Diminished]
        );
    }

    #[test]
    fn test_harmonic_minor_has_major_dominant() {
        let a = key(9, Mode::Minor);
        assert_eq!(a.default_quality(Degree::Fifth), Ok(ChordQuality::Major));
        assert_eq!(a.default_quality(Degree::Third), Ok(ChordQuality::Augmented));
        assert_eq!(a.leading_tone(), 8);
        assert_eq!(a.modal_notes(), vec![0, 5, 8, 7]);
    }

    #[test]
    fn test_chromatic_roots() {
        let c = key(0, Mode::Major);
        assert_eq!(c.root_of(Degree::FiveOfFive), 2);
        assert_eq!(c.root_of(Degree::FiveOfTwo), 9);
        assert_eq!(c.root_of(Degree::FlatTwo), 1);
        assert_eq!(c.root_of(Degree::AugmentedSixth), 8);
        assert_eq!(c.root_of(Degree::FifthAppoggiatura), 0);
        assert_eq!(
            c.chord_pitch_classes(Degree::AugmentedSixth, ChordQuality::AugmentedSixth),
            vec![8, 0, 6]
        );
    }

    #[test]
    fn test_pitch_set_for_degree() {
        let c = key(0, Mode::Major);
        let set = c.pitch_class_set_for_degree(Degree::Fifth).unwrap();
        assert!(set.contains(67));
        assert!(set.contains(71));
        assert!(set.contains(62));
        assert!(!set.contains(60));
    }

    #[test]
    fn test_member_offsets() {
        assert_eq!(chord_member_offset(ChordQuality::Minor, 1), Ok(3));
        assert_eq!(chord_member_offset(ChordQuality::DominantSeventh, 3), Ok(10));
        assert_eq!(
            chord_member_offset(ChordQuality::Major, 3),
            Err(ModelError::UndefinedMember {
                quality: ChordQuality::Major,
                member: 3
            })
        );
    }

    #[test]
    fn test_tonal_notes() {
        let g = key(7, Mode::Major);
        assert_eq!(g.tonal_notes(), [7, 0, 2]);
        assert!(g.is_tonal_note(26));
        assert!(!g.is_tonal_note(11));
    }
}
