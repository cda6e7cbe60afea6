//! The five-level cost vector minimized by the search.
//!
//! Levels, highest priority first:
//! 1. chords with fewer distinct pitch classes than their quality has
//! 2. root-position diminished chords sounding four distinct pitches
//! 3. chords sounding fewer than four distinct pitches
//! 4. weighted size of every melodic interval
//! 5. minus the weighted number of notes held in the same voice
//!
//! Every level is a counting or summing aggregate over scaffold variables.

use chorale_solver::{IntVar, Model, ValueSet};

use crate::progression::Chord;
use crate::theory::{ChordQuality, ChordState, Voice, OCTAVE};
use crate::voicing::Voicing;

pub const COST_LEVELS: usize = 5;

pub const LEVEL_NAMES: [&str; COST_LEVELS] = [
    "incomplete chords",
    "spread diminished chords",
    "chords with doubled pitches",
    "melodic motion",
    "common tones",
];

const UNISON_COST: i64 = 0;
const SECOND_COST: i64 = 1;
const THIRD_COST: i64 = 3;
const FOURTH_COST: i64 = 6;
const TRITONE_COST: i64 = 12;
const FIFTH_COST: i64 = 6;
const SIXTH_COST: i64 = 12;
const SEVENTH_COST: i64 = 18;
const OCTAVE_COST: i64 = 6;

/// Cost of a melodic interval `i` at index `i + 12`.
pub const MELODIC_COSTS: [i64; 25] = [
    OCTAVE_COST,
    SEVENTH_COST,
    SEVENTH_COST,
    SIXTH_COST,
    SIXTH_COST,
    FIFTH_COST,
    TRITONE_COST,
    FOURTH_COST,
    THIRD_COST,
    THIRD_COST,
    SECOND_COST,
    SECOND_COST,
    UNISON_COST,
    SECOND_COST,
    SECOND_COST,
    THIRD_COST,
    THIRD_COST,
    FOURTH_COST,
    TRITONE_COST,
    FIFTH_COST,
    SIXTH_COST,
    SIXTH_COST,
    SEVENTH_COST,
    SEVENTH_COST,
    OCTAVE_COST,
];

/// Cost of moving by `interval` semitones.
pub fn melodic_cost(interval: i64) -> i64 {
    MELODIC_COSTS[(interval.clamp(-OCTAVE, OCTAVE) + OCTAVE) as usize]
}

/// The cost variables of a model.
#[derive(Debug, Clone, Copy)]
pub struct CostTerms {
    pub incomplete_chords: IntVar,
    pub spread_diminished: IntVar,
    pub doubled_pitches: IntVar,
    pub melodic_motion: IntVar,
    pub common_tones: IntVar,
}

impl CostTerms {
    /// Derives the cost levels. `chords[p]` is the chord sounding at
    /// position `p` of the voicing.
    pub fn post(model: &mut Model, voicing: &Voicing, chords: &[Chord]) -> Self {
        let incomplete: Vec<(i64, IntVar)> = chords
            .iter()
            .enumerate()
            .map(|(p, chord)| {
                let fewer =
                    ValueSet::range(0, chord.quality.member_count() as i64 - 1);
                (1, model.reify_in(voicing.distinct_classes(p), &fewer).as_int())
            })
            .collect();
        let incomplete_chords = model.sum_var(&incomplete);

        let spread: Vec<(i64, IntVar)> = chords
            .iter()
            .enumerate()
            .filter(|(_, chord)| {
                chord.quality == ChordQuality::Diminished && chord.state == ChordState::Fundamental
            })
            .map(|(p, _)| {
                let four = ValueSet::singleton(Voice::COUNT as i64);
                (1, model.reify_in(voicing.distinct_pitches(p), &four).as_int())
            })
            .collect();
        let spread_diminished = model.sum_var(&spread);

        let distinct: Vec<IntVar> = (0..chords.len())
            .map(|p| voicing.distinct_pitches(p))
            .collect();
        let doubled_pitches = model.count_var(&distinct, &ValueSet::range(1, 3));

        let motion: Vec<(i64, IntVar)> = voicing
            .all_melodic()
            .iter()
            .map(|&interval| (1, model.element_var(&MELODIC_COSTS, interval, OCTAVE)))
            .collect();
        let melodic_motion = model.sum_var(&motion);

        let held: Vec<(i64, IntVar)> = Voice::ALL
            .iter()
            .map(|&voice| {
                let n = model.count_var(voicing.melodic_line(voice), &ValueSet::singleton(0));
                (-voice.common_tone_weight(), n)
            })
            .collect();
        let common_tones = model.sum_var(&held);

        Self {
            incomplete_chords,
            spread_diminished,
            doubled_pitches,
            melodic_motion,
            common_tones,
        }
    }

    /// The objective, highest priority first.
    pub fn levels(&self) -> Vec<IntVar> {
        vec![
            self.incomplete_chords,
            self.spread_diminished,
            self.doubled_pitches,
            self.melodic_motion,
            self.common_tones,
        ]
    }
}

/// Recomputes the cost levels from a flat pitch array, chord by chord in
/// voice order.
pub fn evaluate(pitches: &[i64], chords: &[Chord]) -> [i64; COST_LEVELS] {
    let chord_pitches: Vec<&[i64]> = pitches.chunks(Voice::COUNT).collect();
    let distinct = |values: &mut Vec<i64>| {
        values.sort_unstable();
        values.dedup();
        values.len()
    };

    let mut costs = [0; COST_LEVELS];
    for (chord, voicing) in chords.iter().zip(&chord_pitches) {
        let mut classes: Vec<i64> = voicing.iter().map(|p| p.rem_euclid(OCTAVE)).collect();
        let mut values = voicing.to_vec();
        let (n_classes, n_values) = (distinct(&mut classes), distinct(&mut values));
        if n_classes < chord.quality.member_count() {
            costs[0] += 1;
        }
        if chord.quality == ChordQuality::Diminished
            && chord.state == ChordState::Fundamental
            && n_values == Voice::COUNT
        {
            costs[1] += 1;
        }
        if n_values < Voice::COUNT {
            costs[2] += 1;
        }
    }
    for pair in chord_pitches.windows(2) {
        for voice in Voice::ALL {
            let interval = pair[1][voice.index()] - pair[0][voice.index()];
            costs[3] += melodic_cost(interval);
            if interval == 0 {
                costs[4] -= voice.common_tone_weight();
            }
        }
    }
    costs
}
