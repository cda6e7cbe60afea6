use chorale_config::{ExplorationType, SolverConfig};
use chorale_solver::{Model, SearchStatus, Solver};

use super::*;
use crate::progression::{ChordSpec, Progression, ProgressionSpec};
use crate::voicing::Voicing;

fn c_major(chords: Vec<ChordSpec>) -> Progression {
    ProgressionSpec::major(0, chords).resolve().unwrap()
}

fn fix(model: &mut Model, voicing: &Voicing, position: usize, voice: Voice, pitch: i64) {
    model.restrict(voicing.pitch(position, voice), &ValueSet::singleton(pitch));
}

/// Posts the rules between the chords of `progression` on a fresh model.
fn posted(progression: &Progression) -> (Model, Voicing) {
    let mut model = Model::new();
    let voicing = Voicing::new(&mut model, progression.len());
    {
        let mut rules = Rules::new(&mut model, &voicing);
        let section = Section::new(progression.tonality(), progression.chords(), 0);
        post(&mut rules, &section);
    }
    (model, voicing)
}

#[test]
fn test_exceptions_are_classified_in_priority_order() {
    let progression = c_major(vec![
        ChordSpec::root(Degree::Fifth),
        ChordSpec::root(Degree::Sixth),
        ChordSpec::root(Degree::FiveOfFive),
        ChordSpec::new(Degree::FifthAppoggiatura, ChordState::SecondInversion),
        ChordSpec::root(Degree::Fifth),
        ChordSpec::root(Degree::AugmentedSixth),
        ChordSpec::new(Degree::First, ChordState::SecondInversion),
        ChordSpec::root(Degree::First),
    ]);
    let c = progression.chords();

    assert_eq!(
        CadentialException::classify(&c[0], &c[1]),
        Some(CadentialException::Interrupted)
    );
    assert_eq!(
        CadentialException::classify(&c[2], &c[4]),
        Some(CadentialException::SecondaryDominant)
    );
    // a secondary dominant into the cadential six-four is left alone
    assert_eq!(CadentialException::classify(&c[2], &c[3]), None);
    assert_eq!(
        CadentialException::classify(&c[3], &c[4]),
        Some(CadentialException::CadentialSixFour)
    );
    assert_eq!(
        CadentialException::classify(&c[6], &c[4]),
        Some(CadentialException::CadentialSixFour)
    );
    assert_eq!(
        CadentialException::classify(&c[5], &c[4]),
        Some(CadentialException::ItalianSixth)
    );
    assert_eq!(CadentialException::classify(&c[4], &c[7]), None);
    assert_eq!(CadentialException::classify(&c[6], &c[7]), None);
}

#[test]
fn test_parallel_fifths_and_octaves_are_excluded() {
    let mut model = Model::new();
    let voicing = Voicing::new(&mut model, 2);
    {
        let mut rules = Rules::new(&mut model, &voicing);
        forbid_parallels(&mut rules, 0);
    }
    for (voice, pitch) in Voice::ALL.into_iter().zip([48, 55, 64, 72]) {
        fix(&mut model, &voicing, 0, voice, pitch);
    }
    fix(&mut model, &voicing, 1, Voice::Bass, 43);
    let options = [
        (Voice::Tenor, [55, 59, 62]),
        (Voice::Alto, [62, 67, 67]),
        (Voice::Soprano, [67, 71, 74]),
    ];
    for (voice, pitches) in options {
        model.restrict(voicing.pitch(1, voice), &pitches.into_iter().collect::<ValueSet>());
    }
    voicing.branch(&mut model);

    let config = SolverConfig::new().with_exploration_type(ExplorationType::DepthFirst);
    let outcome = Solver::new(config).solve(model);
    assert_eq!(outcome.status(), SearchStatus::Complete);
    assert!(!outcome.solutions().is_empty());
    for solution in outcome.solutions() {
        let chord = solution.values_of(voicing.chord(1));
        // octave with the bass, then fifth with the bass
        assert_ne!(chord[3], 67, "{chord:?}");
        assert_ne!(chord[1], 62, "{chord:?}");
    }
}

#[test]
fn test_held_voices_may_keep_a_perfect_interval() {
    let mut model = Model::new();
    let voicing = Voicing::new(&mut model, 2);
    {
        let mut rules = Rules::new(&mut model, &voicing);
        forbid_parallels(&mut rules, 0);
    }
    for (voice, pitch) in Voice::ALL.into_iter().zip([48, 55, 64, 72]) {
        fix(&mut model, &voicing, 0, voice, pitch);
    }
    for (voice, pitch) in Voice::ALL.into_iter().zip([48, 55, 65, 69]) {
        fix(&mut model, &voicing, 1, voice, pitch);
    }
    assert!(model.propagate());
}

#[test]
fn test_dominant_tritone_resolves() {
    let progression = c_major(vec![
        ChordSpec::root(Degree::Fifth).with_quality(ChordQuality::DominantSeventh),
        ChordSpec::root(Degree::First),
    ]);
    let (mut model, voicing) = posted(&progression);
    fix(&mut model, &voicing, 0, Voice::Alto, 65);
    fix(&mut model, &voicing, 0, Voice::Soprano, 71);
    assert!(model.propagate());

    assert_eq!(model.value(voicing.pitch(1, Voice::Soprano)), Some(72));
    let alto = voicing.pitch(1, Voice::Alto);
    assert!(model.min(alto) >= 63 && model.max(alto) <= 64);
}

#[test]
fn test_stepwise_bass_gets_contrary_motion() {
    let progression = c_major(vec![
        ChordSpec::root(Degree::Fourth),
        ChordSpec::root(Degree::Fifth),
    ]);
    let (mut model, voicing) = posted(&progression);
    fix(&mut model, &voicing, 0, Voice::Bass, 53);
    fix(&mut model, &voicing, 1, Voice::Bass, 55);
    fix(&mut model, &voicing, 0, Voice::Soprano, 72);
    assert!(model.propagate());

    assert!(model.max(voicing.pitch(1, Voice::Soprano)) <= 71);
    assert!(model.max(voicing.melodic(Voice::Tenor, 0)) <= -1);
}

#[test]
fn test_interrupted_cadence_lifts_the_leading_tone() {
    let progression = c_major(vec![
        ChordSpec::root(Degree::Fifth),
        ChordSpec::root(Degree::Sixth),
    ]);
    let (mut model, voicing) = posted(&progression);
    fix(&mut model, &voicing, 0, Voice::Alto, 67);
    fix(&mut model, &voicing, 0, Voice::Soprano, 71);
    assert!(model.propagate());

    assert_eq!(model.value(voicing.pitch(1, Voice::Soprano)), Some(72));
    assert!(model.max(voicing.pitch(1, Voice::Alto)) <= 66);
}

#[test]
fn test_chromatic_approach_to_new_leading_tone() {
    let mut model = Model::new();
    let voicing = Voicing::new(&mut model, 2);
    {
        let mut rules = Rules::new(&mut model, &voicing);
        // into G major: F# is approached from F
        chromatic_approach(&mut rules, 0, 6);
    }
    fix(&mut model, &voicing, 1, Voice::Soprano, 66);
    fix(&mut model, &voicing, 0, Voice::Alto, 65);
    model.restrict(voicing.pitch(1, Voice::Alto), &[64, 67].into_iter().collect::<ValueSet>());
    assert!(model.propagate());

    assert_eq!(model.value(voicing.pitch_class(0, Voice::Soprano)), Some(5));
    assert_eq!(model.value(voicing.pitch(1, Voice::Alto)), Some(64));
}

#[test]
fn test_secondary_dominant_resolves_its_third_and_seventh() {
    let progression = c_major(vec![
        ChordSpec::root(Degree::FiveOfFive),
        ChordSpec::root(Degree::Fifth),
    ]);
    let (mut model, voicing) = posted(&progression);
    // F sharp in the tenor, C in the alto
    fix(&mut model, &voicing, 0, Voice::Tenor, 54);
    fix(&mut model, &voicing, 0, Voice::Alto, 72);
    assert!(model.propagate());

    assert_eq!(model.value(voicing.pitch(1, Voice::Tenor)), Some(55));
    let alto = voicing.pitch(1, Voice::Alto);
    assert!(model.min(alto) >= 70 && model.max(alto) <= 71);
}

#[test]
fn test_italian_sixth_expands_to_the_octave() {
    let progression = c_major(vec![
        ChordSpec::root(Degree::AugmentedSixth),
        ChordSpec::root(Degree::Fifth),
    ]);
    let (mut model, voicing) = posted(&progression);
    // A flat in the bass, F sharp in the soprano, C in the alto
    fix(&mut model, &voicing, 0, Voice::Bass, 44);
    fix(&mut model, &voicing, 0, Voice::Soprano, 78);
    fix(&mut model, &voicing, 0, Voice::Alto, 72);
    assert!(model.propagate());

    assert_eq!(model.value(voicing.pitch(1, Voice::Bass)), Some(43));
    assert_eq!(model.value(voicing.pitch(1, Voice::Soprano)), Some(79));
    let alto = model.domain(voicing.pitch(1, Voice::Alto));
    assert!(alto.iter().all(|p| p == 71 || p == 74));
}

#[test]
fn test_major_seventh_is_prepared() {
    let progression = c_major(vec![
        ChordSpec::root(Degree::First),
        ChordSpec::root(Degree::Fourth).with_quality(ChordQuality::MajorSeventh),
    ]);
    let (mut model, voicing) = posted(&progression);
    // the E of IV7 in the soprano
    fix(&mut model, &voicing, 1, Voice::Soprano, 76);
    assert!(model.propagate());
    assert_eq!(model.value(voicing.pitch_class(0, Voice::Soprano)), Some(4));

    let (mut model, voicing) = posted(&progression);
    fix(&mut model, &voicing, 1, Voice::Soprano, 76);
    fix(&mut model, &voicing, 0, Voice::Soprano, 79);
    assert!(!model.propagate());
}

#[test]
fn test_leading_tone_sevenths_need_no_preparation() {
    // A minor: i to vii7, the F arriving from E
    let minor = ProgressionSpec::minor(
        9,
        vec![
            ChordSpec::root(Degree::First),
            ChordSpec::root(Degree::Seventh).with_quality(ChordQuality::DiminishedSeventh),
        ],
    )
    .resolve()
    .unwrap();
    let (mut model, voicing) = posted(&minor);
    fix(&mut model, &voicing, 0, Voice::Alto, 64);
    fix(&mut model, &voicing, 1, Voice::Alto, 65);
    assert!(model.propagate());

    // C major: I to the half-diminished vii7, the A arriving from G
    let major = c_major(vec![
        ChordSpec::root(Degree::First),
        ChordSpec::root(Degree::Seventh).with_quality(ChordQuality::HalfDiminishedSeventh),
    ]);
    let (mut model, voicing) = posted(&major);
    fix(&mut model, &voicing, 0, Voice::Soprano, 79);
    fix(&mut model, &voicing, 1, Voice::Soprano, 81);
    assert!(model.propagate());
}

#[test]
fn test_tritone_rises_into_a_first_inversion_tonic() {
    let inversions = [
        ChordSpec::new(Degree::Seventh, ChordState::FirstInversion),
        ChordSpec::new(Degree::Fifth, ChordState::SecondInversion)
            .with_quality(ChordQuality::DominantSeventh),
    ];
    for chord in inversions {
        let progression = c_major(vec![
            chord,
            ChordSpec::new(Degree::First, ChordState::FirstInversion),
        ]);
        let (mut model, voicing) = posted(&progression);
        fix(&mut model, &voicing, 0, Voice::Alto, 65);
        fix(&mut model, &voicing, 0, Voice::Tenor, 59);
        assert!(model.propagate());

        let alto = voicing.pitch(1, Voice::Alto);
        assert!(model.min(alto) >= 66 && model.max(alto) <= 67);
        assert_eq!(model.value(voicing.pitch(1, Voice::Tenor)), Some(60));
    }
}

#[test]
fn test_six_four_opening_a_section_ignores_the_previous_one() {
    let progression = c_major(vec![
        ChordSpec::root(Degree::First),
        ChordSpec::new(Degree::FifthAppoggiatura, ChordState::SecondInversion),
        ChordSpec::root(Degree::Fifth),
    ]);
    let six_four = &progression.chords()[1..];
    let mut model = Model::new();
    let voicing = Voicing::new(&mut model, 3);
    {
        let mut rules = Rules::new(&mut model, &voicing);
        let section = Section::new(progression.tonality(), six_four, 1);
        post(&mut rules, &section);
    }
    // bass and alto both rise into the six-four
    fix(&mut model, &voicing, 0, Voice::Bass, 48);
    fix(&mut model, &voicing, 1, Voice::Bass, 55);
    fix(&mut model, &voicing, 0, Voice::Alto, 67);
    fix(&mut model, &voicing, 1, Voice::Alto, 72);
    assert!(model.propagate());

    // the same motion inside one section is rejected
    let (mut model, voicing) = posted(&progression);
    fix(&mut model, &voicing, 0, Voice::Bass, 48);
    fix(&mut model, &voicing, 1, Voice::Bass, 55);
    fix(&mut model, &voicing, 0, Voice::Alto, 67);
    fix(&mut model, &voicing, 1, Voice::Alto, 72);
    assert!(!model.propagate());
}
