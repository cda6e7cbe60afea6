//! Per-chord rules: which pitch classes may sound and how often.

use chorale_solver::{Rel, ValueSet};

use super::{Rules, Section};
use crate::progression::Chord;
use crate::theory::{all_octaves, ChordMember, ChordQuality, ChordState, Degree, Voice};

/// Pitch classes of a chord's members.
#[derive(Debug, Clone, Copy)]
struct Members {
    root: i64,
    third: i64,
    fifth: i64,
    seventh: Option<i64>,
}

impl Members {
    fn of(chord: &Chord) -> Self {
        Self {
            root: chord.root,
            third: chord.member(ChordMember::Third).unwrap_or(chord.root),
            fifth: chord.member(ChordMember::Fifth).unwrap_or(chord.root),
            seventh: chord.member(ChordMember::Seventh),
        }
    }
}

/// Posts pitch-class domains and doubling rules for every chord of the
/// section.
pub fn post(rules: &mut Rules<'_>, section: &Section<'_>) {
    for local in 0..section.len() {
        restrict_pitch_classes(rules, section, local);
    }
    for local in 0..section.len() {
        let chord = section.chords[local];
        let members = Members::of(&chord);
        match chord.state {
            ChordState::Fundamental => root_position(rules, section, local, members),
            ChordState::FirstInversion => first_inversion(rules, section, local, members),
            ChordState::SecondInversion => second_inversion(rules, section, local, members),
            ChordState::ThirdInversion => {
                let p = section.position(local);
                exactly(rules, p, members.root, 1);
                exactly(rules, p, members.third, 1);
                at_least(rules, p, members.fifth, 1);
                if let Some(seventh) = members.seventh {
                    exactly(rules, p, seventh, 1);
                }
            }
        }
    }
}

fn restrict_pitch_classes(rules: &mut Rules<'_>, section: &Section<'_>, local: usize) {
    let chord = section.chords[local];
    let p = section.position(local);
    let voicing = rules.voicing();
    let classes: ValueSet = chord.pitch_classes().into_iter().collect();
    let pitches = all_octaves(chord.pitch_classes());
    let bass = chord.bass_pitch_class();

    let model = rules.model();
    for voice in Voice::ALL {
        model.restrict(voicing.pitch(p, voice), &pitches);
        model.restrict(voicing.pitch_class(p, voice), &classes);
    }
    model.restrict(voicing.pitch(p, Voice::Bass), &all_octaves([bass]));
    model.restrict(
        voicing.pitch_class(p, Voice::Bass),
        &ValueSet::singleton(bass),
    );
}

fn exactly(rules: &mut Rules<'_>, position: usize, pc: i64, n: i64) {
    rules.require_count(position, pc, Rel::Eq, n);
}

fn at_least(rules: &mut Rules<'_>, position: usize, pc: i64, n: i64) {
    rules.require_count(position, pc, Rel::Ge, n);
}

fn at_most(rules: &mut Rules<'_>, position: usize, pc: i64, n: i64) {
    rules.require_count(position, pc, Rel::Le, n);
}

fn is_diminished_leading_chord(chord: &Chord) -> bool {
    chord.degree == Degree::Seventh && chord.quality == ChordQuality::Diminished
}

fn root_position(rules: &mut Rules<'_>, section: &Section<'_>, local: usize, m: Members) {
    let chord = section.chords[local];
    let p = section.position(local);
    let follows_root_dominant = local
        .checked_sub(1)
        .map(|l| section.chords[l])
        .is_some_and(|c| c.degree == Degree::Fifth && c.is_root_position());

    if is_diminished_leading_chord(&chord) {
        for pc in [m.root, m.third, m.fifth] {
            at_least(rules, p, pc, 1);
        }
        // four distinct pitches means one class sounds in two octaves
        let distinct = rules.voicing().distinct_pitches(p);
        let spread = rules.is(distinct, 4);
        let doubled_third = rules.count_is(p, m.third, 2);
        rules.implies(spread, doubled_third, false);
    } else if matches!(chord.degree, Degree::FlatTwo | Degree::AugmentedSixth) {
        exactly(rules, p, m.root, 1);
        exactly(rules, p, m.third, 2);
        exactly(rules, p, m.fifth, 1);
    } else if chord.degree == Degree::Sixth && follows_root_dominant && !chord.has_seventh() {
        exactly(rules, p, m.root, 1);
        exactly(rules, p, m.third, 2);
        exactly(rules, p, m.fifth, 1);
    } else if chord.is_dominant() {
        at_least(rules, p, m.root, 1);
        exactly(rules, p, m.third, 1);
        at_most(rules, p, m.fifth, 1);
        if let Some(seventh) = m.seventh {
            exactly(rules, p, seventh, 1);
            // an incomplete dominant seventh drops the fifth and doubles the root
            let classes = rules.voicing().distinct_classes(p);
            let incomplete = rules.is_in(classes, ValueSet::range(0, 3));
            let doubled_root = rules.count_is(p, m.root, 2);
            rules.implies(incomplete, doubled_root, true);
        }
    } else if chord.degree == Degree::First && !chord.has_seventh() {
        at_least(rules, p, m.root, 1);
        exactly(rules, p, m.third, 1);
        at_most(rules, p, m.fifth, 1);
        let classes = rules.voicing().distinct_classes(p);
        let incomplete = rules.is_in(classes, ValueSet::range(0, 2));
        let tripled_root = rules.count_is(p, m.root, 3);
        rules.implies(incomplete, tripled_root, true);
    } else {
        at_least(rules, p, m.root, 1);
        exactly(rules, p, m.third, 1);
        exactly(rules, p, m.fifth, 1);
        if let Some(seventh) = m.seventh {
            exactly(rules, p, seventh, 1);
        }
    }
}

fn first_inversion(rules: &mut Rules<'_>, section: &Section<'_>, local: usize, m: Members) {
    let chord = section.chords[local];
    let p = section.position(local);

    if let Some(seventh) = m.seventh {
        for pc in [m.root, m.third, m.fifth, seventh] {
            exactly(rules, p, pc, 1);
        }
        return;
    }

    let doubles_bass = matches!(chord.degree, Degree::FlatTwo | Degree::AugmentedSixth)
        || is_diminished_leading_chord(&chord)
        || section.tonality.is_tonal_note(m.third);
    if doubles_bass {
        exactly(rules, p, m.root, 1);
        exactly(rules, p, m.third, 2);
        exactly(rules, p, m.fifth, 1);
        return;
    }

    for pc in [m.root, m.third, m.fifth] {
        at_least(rules, p, pc, 1);
    }
    let interior = local > 0 && local + 1 < section.len();
    if !interior {
        exactly(rules, p, m.third, 1);
        return;
    }

    // stepwise bass rising under a stepwise falling soprano on both sides
    let window = [
        rules.moves(Voice::Bass, p - 1, 1, 2).lit(),
        rules.moves(Voice::Bass, p, 1, 2).lit(),
        rules.moves(Voice::Soprano, p - 1, -2, -1).lit(),
        rules.moves(Voice::Soprano, p, -2, -1).lit(),
    ];
    let passing = rules.all(&window);
    let doubled_fifth = rules.count_is(p, m.fifth, 2);
    let doubled_root = rules.count_is(p, m.root, 2);
    rules.implies(passing, doubled_fifth, false);
    rules.implies(!passing, doubled_root, false);
}

fn second_inversion(rules: &mut Rules<'_>, section: &Section<'_>, local: usize, m: Members) {
    let chord = section.chords[local];
    let p = section.position(local);

    if is_diminished_leading_chord(&chord) {
        exactly(rules, p, m.root, 1);
        exactly(rules, p, m.third, 2);
        exactly(rules, p, m.fifth, 1);
        return;
    }
    exactly(rules, p, m.root, 1);
    exactly(rules, p, m.third, 1);
    at_least(rules, p, m.fifth, 1);
    if let Some(seventh) = m.seventh {
        exactly(rules, p, seventh, 1);
    }
}
