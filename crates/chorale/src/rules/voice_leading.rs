//! Rules between consecutive chords.
//!
//! For each pair of neighbouring chords in a section:
//! - parallel unisons, fifths and octaves are forbidden unless the degree
//!   repeats or both voices hold their notes
//! - the dominant's tritone resolves when V or the diminished vii moves to I
//! - at most one cadential exception applies (interrupted cadence,
//!   secondary dominant, Italian sixth, cadential six-four), checked in
//!   that order
//! - without an exception, sevenths of non-dominant seventh chords are
//!   prepared and stepwise root-position bass motion gets contrary motion
//!   in the upper voices

use std::fmt;

use chorale_solver::ValueSet;
use tracing::trace;

use super::{Rules, Section};
use crate::progression::Chord;
use crate::theory::{
    pitch_class, ChordMember, ChordQuality, ChordState, Degree, Voice, VoicePair, MAJOR_THIRD,
    MINOR_SEVENTH, OCTAVE, PERFECT_FIFTH, UNISON,
};
use crate::tonality::Mode;

/// Interval classes that may not be approached in parallel motion.
pub const PARALLEL_RESIDUES: [i64; 2] = [UNISON, PERFECT_FIFTH];

/// A cadential pattern whose resolution overrides the generic rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CadentialException {
    /// V to vi, both in root position.
    Interrupted,
    /// A secondary dominant resolving anywhere but to a cadential six-four.
    SecondaryDominant,
    /// The Italian augmented sixth.
    ItalianSixth,
    /// A tonic six-four resolving to V.
    CadentialSixFour,
}

impl CadentialException {
    /// The exception governing `current -> next`, if any.
    pub fn classify(current: &Chord, next: &Chord) -> Option<Self> {
        if current.degree == Degree::Fifth
            && current.is_root_position()
            && next.degree == Degree::Sixth
            && next.is_root_position()
        {
            Some(Self::Interrupted)
        } else if current.degree.is_secondary_dominant()
            && next.degree != Degree::FifthAppoggiatura
        {
            Some(Self::SecondaryDominant)
        } else if current.degree == Degree::AugmentedSixth {
            Some(Self::ItalianSixth)
        } else if is_tonic_six_four(current) && next.degree == Degree::Fifth {
            Some(Self::CadentialSixFour)
        } else {
            None
        }
    }
}

impl fmt::Display for CadentialException {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Interrupted => "interrupted cadence",
            Self::SecondaryDominant => "secondary dominant",
            Self::ItalianSixth => "Italian sixth",
            Self::CadentialSixFour => "cadential six-four",
        };
        f.write_str(name)
    }
}

fn is_tonic_six_four(chord: &Chord) -> bool {
    chord.degree == Degree::FifthAppoggiatura
        || (chord.degree == Degree::First && chord.state == ChordState::SecondInversion)
}

/// Posts the rules between every pair of neighbouring chords.
pub fn post(rules: &mut Rules<'_>, section: &Section<'_>) {
    for local in 0..section.len().saturating_sub(1) {
        let (current, next) = (section.chords[local], section.chords[local + 1]);
        let p = section.position(local);

        if current.degree != next.degree {
            forbid_parallels(rules, p);
        }
        tritone_resolution(rules, section, local);

        match CadentialException::classify(&current, &next) {
            Some(exception) => {
                trace!(event = "cadential_exception", position = p, kind = %exception);
                match exception {
                    CadentialException::Interrupted => interrupted_cadence(rules, section, local),
                    CadentialException::SecondaryDominant => secondary_dominant(rules, section, local),
                    CadentialException::ItalianSixth => italian_sixth(rules, section, local),
                    CadentialException::CadentialSixFour => cadential_six_four(rules, section, local),
                }
            }
            None => {
                seventh_preparation(rules, section, local);
                contrary_motion(rules, section, local);
            }
        }
    }
}

/// Forbids parallel unisons, fifths and octaves from chord `p` to `p + 1`
/// between every pair of voices.
pub fn forbid_parallels(rules: &mut Rules<'_>, p: usize) {
    let voicing = rules.voicing();
    for pair in VoicePair::ALL {
        let unchanged = rules.all(&[
            voicing.held(pair.lower, p).lit(),
            voicing.held(pair.upper, p).lit(),
        ]);
        for residue in PARALLEL_RESIDUES {
            let before = rules.is(voicing.harmonic_class(pair, p), residue);
            let after = rules.is(voicing.harmonic_class(pair, p + 1), residue);
            let parallel = rules.all(&[before.lit(), after.lit()]);
            rules.implies(parallel, unchanged, false);
        }
    }
}

/// Chromatic modulation from chord `p` into a key whose leading tone is
/// `leading_tone`: a voice reaching the leading tone comes from a semitone
/// below, and a voice on that approach note that does not rise falls.
pub fn chromatic_approach(rules: &mut Rules<'_>, p: usize, leading_tone: i64) {
    let approach = pitch_class(leading_tone - 1);
    for voice in Voice::ALL {
        let arrives = rules.sings(p + 1, voice, leading_tone);
        let prepared = rules.sings(p, voice, approach);
        rules.implies(arrives, prepared, false);

        let stays_away = rules.all(&[prepared.lit(), !arrives]);
        let falls = rules.moves(voice, p, -OCTAVE, -1);
        rules.implies(stays_away, falls, false);
    }
}

fn tritone_resolution(rules: &mut Rules<'_>, section: &Section<'_>, local: usize) {
    let (current, next) = (section.chords[local], section.chords[local + 1]);
    let dominant = current.degree == Degree::Fifth || is_leading_tone_triad(&current);
    if !dominant || next.degree != Degree::First {
        return;
    }
    let p = section.position(local);
    let tonality = section.tonality;

    let rising_fourth = next.state == ChordState::FirstInversion
        && ((current.degree == Degree::Seventh && current.state == ChordState::FirstInversion)
            || (current.degree == Degree::Fifth
                && current.quality == ChordQuality::DominantSeventh
                && current.state == ChordState::SecondInversion));
    let (lo, hi) = if rising_fourth { (1, 2) } else { (-2, -1) };

    rules.resolve(p, &Voice::ALL, tonality.subdominant(), lo, hi);
    rules.resolve(p, &Voice::ALL, tonality.leading_tone(), 1, 1);
}

fn is_leading_tone_triad(chord: &Chord) -> bool {
    chord.degree == Degree::Seventh && chord.quality == ChordQuality::Diminished
}

fn interrupted_cadence(rules: &mut Rules<'_>, section: &Section<'_>, local: usize) {
    let p = section.position(local);
    let leading_tone = section.tonality.leading_tone();
    // in minor the leading tone rises from any upper voice
    let voices: &[Voice] = match section.tonality.mode() {
        Mode::Major => &[Voice::Soprano],
        Mode::Minor => &Voice::UPPER,
    };
    for &voice in voices {
        let sings = rules.sings(p, voice, leading_tone);
        let rises = rules.moves(voice, p, 1, 1);
        rules.implies(sings, rises, false);
        for other in Voice::UPPER.into_iter().filter(|&v| v != voice) {
            let falls = rules.moves(other, p, -OCTAVE, -1);
            rules.implies(sings, falls, false);
        }
    }
}

fn secondary_dominant(rules: &mut Rules<'_>, section: &Section<'_>, local: usize) {
    let current = section.chords[local];
    let p = section.position(local);
    let third = pitch_class(current.root + MAJOR_THIRD);
    let seventh = pitch_class(current.root + MINOR_SEVENTH);
    rules.resolve(p, &Voice::ALL, third, 1, 1);
    if current.has_seventh() {
        rules.resolve(p, &Voice::ALL, seventh, -2, -1);
    }
}

fn italian_sixth(rules: &mut Rules<'_>, section: &Section<'_>, local: usize) {
    let (current, next) = (section.chords[local], section.chords[local + 1]);
    let p = section.position(local);
    let third = current.member(ChordMember::Third).unwrap_or(current.root);
    let sixth = current.member(ChordMember::Fifth).unwrap_or(current.root);

    // the augmented sixth expands to the octave
    rules.resolve(p, &Voice::ALL, current.root, -1, -1);
    rules.resolve(p, &Voice::ALL, sixth, 1, 1);
    if next.degree == Degree::Fifth {
        let voicing = rules.voicing();
        let down_or_up: ValueSet = [-1, 2].into_iter().collect();
        for voice in Voice::ALL {
            let sings = rules.sings(p, voice, third);
            let resolves = rules.is_in(voicing.melodic(voice, p), down_or_up.clone());
            rules.implies(sings, resolves, false);
        }
    }
}

fn cadential_six_four(rules: &mut Rules<'_>, section: &Section<'_>, local: usize) {
    let p = section.position(local);
    let tonic = section.tonality.tonic();
    let mediant = section.tonality.scale_note(2);

    rules.resolve(p, &Voice::UPPER, tonic, -1, -1);
    rules.resolve(p, &Voice::UPPER, mediant, -2, -1);

    // a rising bass into the six-four: the tonic is approached by
    // oblique or contrary motion
    if local > 0 {
        let bass_rises = rules.moves(Voice::Bass, p - 1, 0, OCTAVE);
        for voice in Voice::UPPER {
            let sings = rules.sings(p, voice, tonic);
            let approach = rules.all(&[bass_rises.lit(), sings.lit()]);
            let from_above = rules.moves(voice, p - 1, -OCTAVE, 0);
            rules.implies(approach, from_above, false);
        }
    }
}

fn seventh_preparation(rules: &mut Rules<'_>, section: &Section<'_>, local: usize) {
    let next = section.chords[local + 1];
    // leading-tone sevenths act as dominants and need no preparation
    let prepared = next.degree.is_diatonic()
        && next.degree != Degree::Seventh
        && next.has_seventh()
        && !matches!(
            next.quality,
            ChordQuality::DominantSeventh
                | ChordQuality::DiminishedSeventh
                | ChordQuality::HalfDiminishedSeventh
        );
    let Some(seventh) = next.member(ChordMember::Seventh).filter(|_| prepared) else {
        return;
    };
    let p = section.position(local);
    for voice in Voice::ALL {
        let arrives = rules.sings(p + 1, voice, seventh);
        let held = rules.sings(p, voice, seventh);
        rules.implies(arrives, held, false);
    }
}

fn contrary_motion(rules: &mut Rules<'_>, section: &Section<'_>, local: usize) {
    let (current, next) = (section.chords[local], section.chords[local + 1]);
    let both_root = current.is_root_position() && next.is_root_position();
    let step = matches!(pitch_class(next.root - current.root), 1 | 2 | 10 | 11);
    let two_five = current.degree == Degree::Second && next.degree == Degree::Fifth;
    if !(both_root && (step || two_five)) {
        return;
    }
    let p = section.position(local);
    let bass_up = rules.moves(Voice::Bass, p, 1, OCTAVE);
    let bass_down = rules.moves(Voice::Bass, p, -OCTAVE, -1);
    for voice in Voice::UPPER {
        let down = rules.moves(voice, p, -OCTAVE, -1);
        let up = rules.moves(voice, p, 1, OCTAVE);
        rules.implies(bass_up, down, true);
        rules.implies(bass_down, up, true);
    }
}

#[cfg(test)]
mod tests;
