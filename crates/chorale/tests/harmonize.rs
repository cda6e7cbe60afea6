//! End-to-end harmonization of single progressions.

use std::sync::atomic::AtomicBool;
use std::sync::Arc;

use chorale::preferences::{evaluate, COST_LEVELS};
use chorale::theory::{ChordQuality, ChordState, Degree, Voice};
use chorale::{
    ChoraleError, ChordSpec, CostVector, Harmonizer, ModelError, PieceSpec, ProgressionSpec,
};
use chorale_config::{ExplorationType, SolverConfig};
use chorale_solver::SearchStatus;
use chorale_test::progressions::{
    authentic_cadence, cadential_six_four, leading_tone_chord, minor_cadence,
    tonic_dominant_tonic,
};
use chorale_test::{check_invariants, quick_config};

fn harmonizer() -> Harmonizer {
    Harmonizer::new(quick_config(30)).unwrap()
}

/// Solves `spec` and checks the best voicing against the hard rules and
/// the cost it reports.
fn solve_and_check(spec: &ProgressionSpec) -> chorale::Harmonization {
    let progression = spec.resolve().unwrap();
    let outcome = harmonizer().harmonize(spec).unwrap();
    let best = outcome.best().expect("a voicing within the time limit").clone();

    let violations = check_invariants(best.pitches(), progression.chords());
    assert!(violations.is_empty(), "{violations:?}\n{best}");
    assert_eq!(
        best.costs().levels(),
        &evaluate(best.pitches(), progression.chords())
    );
    best
}

#[test]
fn test_tonic_dominant_tonic() {
    let best = solve_and_check(&tonic_dominant_tonic());
    assert_eq!(best.chord_count(), 3);
    assert_eq!(best.pitch(1, Voice::Bass) % 12, 7);
    for position in [0, 2] {
        assert!(best.chord(position).iter().all(|p| [0, 4, 7].contains(&(p % 12))));
    }
    assert!(best.chord(1).iter().all(|p| [7, 11, 2].contains(&(p % 12))));
}

#[test]
fn test_authentic_cadence() {
    let best = solve_and_check(&authentic_cadence());
    assert_eq!(best.costs().levels_count(), COST_LEVELS);
}

#[test]
fn test_minor_cadence_raises_the_leading_tone() {
    let best = solve_and_check(&minor_cadence());
    // E7 in A minor sounds G sharp, never G
    assert!(best.chord(2).iter().any(|p| p % 12 == 8));
    assert!(best.chord(2).iter().all(|p| p % 12 != 7));
}

#[test]
fn test_cadential_six_four_resolves_down() {
    let best = solve_and_check(&cadential_six_four());
    // G major: the six-four's G and B fall to F sharp and A
    for voice in Voice::UPPER {
        let before = best.pitch(2, voice);
        let after = best.pitch(3, voice);
        match before % 12 {
            7 => assert_eq!(after - before, -1),
            11 => assert!((-2..=-1).contains(&(after - before))),
            _ => {}
        }
    }
}

#[test]
fn test_leading_tone_chord_doubles_its_third_when_spread() {
    let best = solve_and_check(&leading_tone_chord());
    let chord = best.chord(1);
    let mut distinct = chord.to_vec();
    distinct.dedup();
    if distinct.len() == 4 {
        assert_eq!(chord.iter().filter(|&&p| p % 12 == 2).count(), 2);
    }
}

#[test]
fn test_unsupported_combination_fails_before_solving() {
    let spec = ProgressionSpec::major(
        0,
        vec![
            ChordSpec::root(Degree::First),
            ChordSpec::root(Degree::FlatTwo).with_quality(ChordQuality::Minor),
        ],
    );
    let err = harmonizer().harmonize(&spec).unwrap_err();
    assert!(matches!(err, ChoraleError::Model(_)), "{err}");

    let third_inversion = ProgressionSpec::major(
        0,
        vec![ChordSpec::new(Degree::First, ChordState::ThirdInversion)],
    );
    assert!(matches!(
        harmonizer().harmonize(&third_inversion),
        Err(ChoraleError::Model(_))
    ));
}

#[test]
fn test_mismatched_inputs_are_rejected() {
    let err = ProgressionSpec::from_parts(
        0,
        vec![2, 2, 1, 2, 2, 2, 1],
        &[Degree::First, Degree::Fifth],
        &[ChordQuality::Major],
        &[ChordState::Fundamental, ChordState::Fundamental],
    )
    .unwrap_err();
    assert_eq!(
        err,
        ModelError::LengthMismatch {
            field: "qualities",
            expected: 2,
            found: 1,
        }
    );

    let bad_scale = ProgressionSpec::new(
        0,
        vec![2, 2, 2, 2, 2, 2],
        vec![ChordSpec::root(Degree::First)],
    );
    assert!(harmonizer().harmonize(&bad_scale).is_err());
}

#[test]
fn test_branch_and_bound_finds_the_enumerated_optimum() {
    let spec = ProgressionSpec::major(
        0,
        vec![ChordSpec::root(Degree::First), ChordSpec::root(Degree::Fourth)],
    );

    let optimum = Harmonizer::new(SolverConfig::new().with_termination_seconds(60))
        .unwrap()
        .harmonize(&spec)
        .unwrap();
    assert!(optimum.is_proven_optimal());

    // every improvement is strictly cheaper than the one before
    for pair in optimum.trail().windows(2) {
        assert!(pair[1].costs() < pair[0].costs());
    }

    let config = SolverConfig::new()
        .with_termination_seconds(60)
        .with_exploration_type(ExplorationType::DepthFirst);
    let all = Harmonizer::new(config).unwrap().harmonize(&spec).unwrap();
    assert_eq!(all.status(), SearchStatus::Complete);
    assert!(!all.is_proven_optimal());

    let cheapest = all.trail().iter().map(|h| h.costs()).min().unwrap();
    assert_eq!(cheapest, optimum.best().unwrap().costs());
}

#[test]
fn test_node_limit_reports_optimality_not_proven() {
    let config = SolverConfig::new().with_node_count_limit(40);
    let outcome = Harmonizer::new(config)
        .unwrap()
        .harmonize(&authentic_cadence())
        .unwrap();
    assert_eq!(outcome.status(), SearchStatus::Stopped);
    assert!(!outcome.is_proven_optimal());
    assert!(!outcome.is_unsatisfiable());
}

#[test]
fn test_terminate_flag_stops_before_searching() {
    let flag = Arc::new(AtomicBool::new(true));
    let outcome = harmonizer()
        .with_terminate_flag(flag)
        .harmonize(&authentic_cadence())
        .unwrap();
    assert_eq!(outcome.status(), SearchStatus::Stopped);
    assert!(outcome.best().is_none());
    assert!(!outcome.is_unsatisfiable());
}

#[test]
fn test_unsatisfiable_bound_is_an_empty_outcome() {
    let spec = PieceSpec::single(tonic_dominant_tonic());
    let impossible = CostVector::of(vec![0, 0, 0, 0, -100]);
    let outcome = harmonizer().near_optimal(&spec, &impossible, 0.0).unwrap();
    assert!(outcome.is_unsatisfiable());
    assert!(outcome.best().is_none());
    assert!(outcome.to_string().contains("no voicing"));
}

#[test]
fn test_minor_diminished_seventh_between_tonics() {
    for quality in [ChordQuality::DiminishedSeventh, ChordQuality::HalfDiminishedSeventh] {
        let spec = ProgressionSpec::minor(
            9,
            vec![
                ChordSpec::root(Degree::First),
                ChordSpec::root(Degree::Seventh).with_quality(quality),
                ChordSpec::root(Degree::First),
            ],
        );
        let best = solve_and_check(&spec);
        // G sharp sounds in the middle chord
        assert!(best.chord(1).iter().any(|p| p % 12 == 8), "{best}");
    }
}
