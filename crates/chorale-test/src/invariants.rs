//! Re-checks a solved voicing against the hard rules, without going
//! through the constraint model.

use std::fmt;

use chorale::rules::voice_leading::PARALLEL_RESIDUES;
use chorale::theory::{pitch_class, Voice, VoicePair};
use chorale::Chord;

/// A broken rule in a flat pitch array.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Violation {
    Length { expected: usize, found: usize },
    Register { position: usize, voice: Voice, pitch: i64 },
    Crossing { position: usize, pair: VoicePair },
    Spread { position: usize, pair: VoicePair },
    ForeignNote { position: usize, voice: Voice, pitch: i64 },
    WrongBass { position: usize, expected: i64, found: i64 },
    Parallel { position: usize, pair: VoicePair, residue: i64 },
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Length { expected, found } => {
                write!(f, "expected {expected} pitches, found {found}")
            }
            Self::Register { position, voice, pitch } => {
                write!(f, "chord {position}: {voice} pitch {pitch} is out of range")
            }
            Self::Crossing { position, pair } => {
                write!(f, "chord {position}: {pair} cross")
            }
            Self::Spread { position, pair } => {
                write!(f, "chord {position}: {pair} are too far apart")
            }
            Self::ForeignNote { position, voice, pitch } => {
                write!(f, "chord {position}: {voice} pitch {pitch} is not a chord tone")
            }
            Self::WrongBass { position, expected, found } => {
                write!(f, "chord {position}: bass sings class {found}, expected {expected}")
            }
            Self::Parallel { position, pair, residue } => {
                write!(f, "chords {position}-{}: parallel {residue} in {pair}", position + 1)
            }
        }
    }
}

/// Every hard-rule violation of `pitches` as a voicing of `chords`.
///
/// Parallels are checked between chords of different degrees only.
pub fn check_invariants(pitches: &[i64], chords: &[Chord]) -> Vec<Violation> {
    let expected = chords.len() * Voice::COUNT;
    if pitches.len() != expected {
        return vec![Violation::Length {
            expected,
            found: pitches.len(),
        }];
    }

    let mut violations = Vec::new();
    let voicings: Vec<&[i64]> = pitches.chunks(Voice::COUNT).collect();
    for (position, (chord, voicing)) in chords.iter().zip(&voicings).enumerate() {
        check_chord(position, chord, voicing, &mut violations);
    }
    for position in 0..chords.len().saturating_sub(1) {
        if chords[position].degree == chords[position + 1].degree {
            continue;
        }
        check_parallels(position, voicings[position], voicings[position + 1], &mut violations);
    }
    violations
}

fn check_chord(position: usize, chord: &Chord, voicing: &[i64], out: &mut Vec<Violation>) {
    let classes = chord.pitch_classes();
    for voice in Voice::ALL {
        let pitch = voicing[voice.index()];
        let (lo, hi) = voice.register();
        if pitch < lo || pitch > hi {
            out.push(Violation::Register { position, voice, pitch });
        }
        if !classes.contains(&pitch_class(pitch)) {
            out.push(Violation::ForeignNote { position, voice, pitch });
        }
    }
    for pair in VoicePair::ALL {
        let interval = voicing[pair.upper.index()] - voicing[pair.lower.index()];
        if interval < 0 {
            out.push(Violation::Crossing { position, pair });
        } else if interval > pair.max_spread() {
            out.push(Violation::Spread { position, pair });
        }
    }
    let bass = pitch_class(voicing[Voice::Bass.index()]);
    if bass != chord.bass_pitch_class() {
        out.push(Violation::WrongBass {
            position,
            expected: chord.bass_pitch_class(),
            found: bass,
        });
    }
}

fn check_parallels(position: usize, before: &[i64], after: &[i64], out: &mut Vec<Violation>) {
    for pair in VoicePair::ALL {
        let (l, u) = (pair.lower.index(), pair.upper.index());
        if before[l] == after[l] && before[u] == after[u] {
            continue;
        }
        let first = pitch_class(before[u] - before[l]);
        let second = pitch_class(after[u] - after[l]);
        if first == second && PARALLEL_RESIDUES.contains(&first) {
            out.push(Violation::Parallel {
                position,
                pair,
                residue: first,
            });
        }
    }
}
