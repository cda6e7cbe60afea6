//! Harmonic and voice-leading rules.
//!
//! Rules are posted section by section against a shared [`Voicing`]. They
//! are phrased as implications between reified predicates on the scaffold
//! variables; [`Rules::implies`] is the single primitive they all go
//! through.

pub mod harmonic;
pub mod voice_leading;

use std::collections::HashMap;

use chorale_solver::{BoolVar, IntVar, Literal, Model, Rel, ValueSet};

use crate::progression::Chord;
use crate::theory::Voice;
use crate::tonality::Tonality;
use crate::voicing::Voicing;

/// A progression placed on the shared voicing, starting at chord `start`.
#[derive(Debug, Clone, Copy)]
pub struct Section<'a> {
    pub tonality: &'a Tonality,
    pub chords: &'a [Chord],
    pub start: usize,
}

impl<'a> Section<'a> {
    pub fn new(tonality: &'a Tonality, chords: &'a [Chord], start: usize) -> Self {
        Self {
            tonality,
            chords,
            start,
        }
    }

    pub fn len(&self) -> usize {
        self.chords.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chords.is_empty()
    }

    /// Position on the shared voicing of the section's chord `local`.
    pub fn position(&self, local: usize) -> usize {
        self.start + local
    }

    pub fn end(&self) -> usize {
        self.start + self.chords.len()
    }
}

/// Posting context: the model, the scaffold and a memo of the reified
/// predicates created so far.
pub struct Rules<'a> {
    model: &'a mut Model,
    voicing: &'a Voicing,
    predicates: HashMap<(IntVar, ValueSet), BoolVar>,
    counts: HashMap<(usize, i64), IntVar>,
}

impl<'a> Rules<'a> {
    pub fn new(model: &'a mut Model, voicing: &'a Voicing) -> Self {
        Self {
            model,
            voicing,
            predicates: HashMap::new(),
            counts: HashMap::new(),
        }
    }

    pub fn model(&mut self) -> &mut Model {
        self.model
    }

    pub fn voicing(&self) -> &'a Voicing {
        self.voicing
    }

    /// `condition -> consequence`, or `condition <-> consequence` when
    /// `bidirectional`.
    pub fn implies(
        &mut self,
        condition: impl Into<Literal>,
        consequence: impl Into<Literal>,
        bidirectional: bool,
    ) {
        if bidirectional {
            self.model.equiv(condition, consequence);
        } else {
            self.model.imply(condition, consequence);
        }
    }

    /// A boolean equivalent to `x in values`, shared between rules.
    pub fn is_in(&mut self, x: IntVar, values: ValueSet) -> BoolVar {
        if let Some(&b) = self.predicates.get(&(x, values.clone())) {
            return b;
        }
        let b = self.model.reify_in(x, &values);
        self.predicates.insert((x, values), b);
        b
    }

    pub fn is(&mut self, x: IntVar, value: i64) -> BoolVar {
        self.is_in(x, ValueSet::singleton(value))
    }

    pub fn all(&mut self, literals: &[Literal]) -> BoolVar {
        self.model.and(literals)
    }

    /// True when `voice` sings pitch class `pc` in chord `position`.
    pub fn sings(&mut self, position: usize, voice: Voice, pc: i64) -> BoolVar {
        let class = self.voicing.pitch_class(position, voice);
        self.is(class, pc)
    }

    /// True when `voice` moves by `lo..=hi` semitones after `position`.
    pub fn moves(&mut self, voice: Voice, position: usize, lo: i64, hi: i64) -> BoolVar {
        let interval = self.voicing.melodic(voice, position);
        self.is_in(interval, ValueSet::range(lo, hi))
    }

    /// Number of voices singing pitch class `pc` in chord `position`.
    pub fn count(&mut self, position: usize, pc: i64) -> IntVar {
        if let Some(&n) = self.counts.get(&(position, pc)) {
            return n;
        }
        let n = self
            .model
            .count_var(self.voicing.chord_classes(position), &ValueSet::singleton(pc));
        self.counts.insert((position, pc), n);
        n
    }

    /// Requires `count(position, pc) rel n`.
    pub fn require_count(&mut self, position: usize, pc: i64, rel: Rel, n: i64) {
        let count = self.count(position, pc);
        self.model.linear(&[(1, count)], rel, n);
    }

    /// A boolean equivalent to `count(position, pc) == n`.
    pub fn count_is(&mut self, position: usize, pc: i64, n: i64) -> BoolVar {
        let count = self.count(position, pc);
        self.is(count, n)
    }

    /// For every voice: singing `pc` in chord `position` forces a motion
    /// in `lo..=hi` to the next chord.
    pub fn resolve(&mut self, position: usize, voices: &[Voice], pc: i64, lo: i64, hi: i64) {
        for &voice in voices {
            let sings = self.sings(position, voice, pc);
            let moves = self.moves(voice, position, lo, hi);
            self.implies(sings, moves, false);
        }
    }
}
