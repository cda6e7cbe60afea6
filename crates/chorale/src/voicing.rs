//! The variable scaffold every rule is posted against.
//!
//! One pitch variable per chord and voice, plus the derived variables the
//! rules reason about: pitch classes, melodic intervals per voice, harmonic
//! intervals per voice pair and distinct-value counts per chord. All of
//! them are tied to the pitches by equalities posted here, so the rules
//! never recompute an interval from raw pitches.

use chorale_solver::{BoolVar, IntVar, Model, Rel, ValueSet};

use crate::theory::{Voice, VoicePair, MAX_PITCH, MIN_PITCH, OCTAVE};

#[derive(Debug, Clone)]
pub struct Voicing {
    chords: usize,
    /// `position * 4 + voice`
    pitches: Vec<IntVar>,
    classes: Vec<IntVar>,
    /// `voice * (chords - 1) + position`
    melodic: Vec<IntVar>,
    held: Vec<BoolVar>,
    /// `pair * chords + position`
    harmonic: Vec<IntVar>,
    harmonic_classes: Vec<IntVar>,
    distinct_pitches: Vec<IntVar>,
    distinct_classes: Vec<IntVar>,
}

impl Voicing {
    /// Allocates the scaffold for `chords` chords and posts registers,
    /// voice order and interval links.
    pub fn new(model: &mut Model, chords: usize) -> Self {
        let mut pitches = Vec::with_capacity(chords * Voice::COUNT);
        let mut classes = Vec::with_capacity(chords * Voice::COUNT);
        for _ in 0..chords {
            for voice in Voice::ALL {
                let pitch = model.int_var(MIN_PITCH, MAX_PITCH);
                let (lo, hi) = voice.register();
                model.restrict_range(pitch, lo, hi);
                classes.push(model.modulo_var(pitch, OCTAVE));
                pitches.push(pitch);
            }
        }

        for chord in pitches.chunks(Voice::COUNT) {
            for pair in chord.windows(2) {
                model.linear(&[(1, pair[0]), (-1, pair[1])], Rel::Le, 0);
            }
        }

        let steps = chords.saturating_sub(1);
        let mut melodic = Vec::with_capacity(Voice::COUNT * steps);
        let mut held = Vec::with_capacity(Voice::COUNT * steps);
        for voice in Voice::ALL {
            for position in 0..steps {
                let from = pitches[position * Voice::COUNT + voice.index()];
                let to = pitches[(position + 1) * Voice::COUNT + voice.index()];
                let interval = model.int_var(-OCTAVE, OCTAVE);
                model.linear(&[(1, to), (-1, from), (-1, interval)], Rel::Eq, 0);
                held.push(model.reify_in(interval, &ValueSet::singleton(0)));
                melodic.push(interval);
            }
        }

        let mut harmonic = Vec::with_capacity(VoicePair::ALL.len() * chords);
        let mut harmonic_classes = Vec::with_capacity(VoicePair::ALL.len() * chords);
        for pair in VoicePair::ALL {
            for position in 0..chords {
                let lower = pitches[position * Voice::COUNT + pair.lower.index()];
                let upper = pitches[position * Voice::COUNT + pair.upper.index()];
                let interval = model.int_var(0, pair.max_spread());
                model.linear(&[(1, upper), (-1, lower), (-1, interval)], Rel::Eq, 0);
                harmonic_classes.push(model.modulo_var(interval, OCTAVE));
                harmonic.push(interval);
            }
        }

        let distinct_pitches = pitches
            .chunks(Voice::COUNT)
            .map(|chord| model.n_values_var(chord))
            .collect();
        let distinct_classes = classes
            .chunks(Voice::COUNT)
            .map(|chord| model.n_values_var(chord))
            .collect();

        Self {
            chords,
            pitches,
            classes,
            melodic,
            held,
            harmonic,
            harmonic_classes,
            distinct_pitches,
            distinct_classes,
        }
    }

    /// Branches chord by chord, bass to soprano. Each pitch is hinted by
    /// the same voice in the previous chord.
    pub fn branch(&self, model: &mut Model) {
        for position in 0..self.chords {
            for voice in Voice::ALL {
                let hint = position
                    .checked_sub(1)
                    .map(|previous| self.pitch(previous, voice));
                model.branch_on(self.pitch(position, voice), hint);
            }
        }
    }

    pub fn chord_count(&self) -> usize {
        self.chords
    }

    /// All pitches, chord by chord in voice order.
    pub fn pitches(&self) -> &[IntVar] {
        &self.pitches
    }

    pub fn pitch(&self, position: usize, voice: Voice) -> IntVar {
        self.pitches[position * Voice::COUNT + voice.index()]
    }

    pub fn chord(&self, position: usize) -> &[IntVar] {
        &self.pitches[position * Voice::COUNT..(position + 1) * Voice::COUNT]
    }

    pub fn pitch_class(&self, position: usize, voice: Voice) -> IntVar {
        self.classes[position * Voice::COUNT + voice.index()]
    }

    pub fn chord_classes(&self, position: usize) -> &[IntVar] {
        &self.classes[position * Voice::COUNT..(position + 1) * Voice::COUNT]
    }

    /// Motion of `voice` from chord `position` to the next one.
    pub fn melodic(&self, voice: Voice, position: usize) -> IntVar {
        self.melodic[voice.index() * self.steps() + position]
    }

    /// Every melodic interval of one voice.
    pub fn melodic_line(&self, voice: Voice) -> &[IntVar] {
        let steps = self.steps();
        &self.melodic[voice.index() * steps..(voice.index() + 1) * steps]
    }

    pub fn all_melodic(&self) -> &[IntVar] {
        &self.melodic
    }

    /// True when `voice` keeps its pitch from `position` to the next chord.
    pub fn held(&self, voice: Voice, position: usize) -> BoolVar {
        self.held[voice.index() * self.steps() + position]
    }

    pub fn harmonic(&self, pair: VoicePair, position: usize) -> IntVar {
        self.harmonic[pair.index() * self.chords + position]
    }

    /// The harmonic interval reduced to one octave.
    pub fn harmonic_class(&self, pair: VoicePair, position: usize) -> IntVar {
        self.harmonic_classes[pair.index() * self.chords + position]
    }

    /// Number of distinct pitches sounding in chord `position`.
    pub fn distinct_pitches(&self, position: usize) -> IntVar {
        self.distinct_pitches[position]
    }

    /// Number of distinct pitch classes sounding in chord `position`.
    pub fn distinct_classes(&self, position: usize) -> IntVar {
        self.distinct_classes[position]
    }

    fn steps(&self) -> usize {
        self.chords.saturating_sub(1)
    }
}
