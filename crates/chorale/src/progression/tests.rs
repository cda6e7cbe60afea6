use super::*;

fn c_major(chords: Vec<ChordSpec>) -> ProgressionSpec {
    ProgressionSpec::major(0, chords)
}

#[test]
fn test_default_qualities_are_filled_in() {
    let progression = c_major(vec![
        ChordSpec::root(Degree::Second),
        ChordSpec::root(Degree::Fifth),
        ChordSpec::root(Degree::FiveOfFive),
    ])
    .resolve()
    .unwrap();

    assert_eq!(progression.chord(0).quality, ChordQuality::Minor);
    assert_eq!(progression.chord(1).quality, ChordQuality::Major);
    assert_eq!(progression.chord(2).quality, ChordQuality::DominantSeventh);
    assert_eq!(progression.chord(2).pitch_classes(), vec![2, 6, 9, 0]);
}

#[test]
fn test_bass_follows_the_state() {
    let progression = c_major(vec![
        ChordSpec::new(Degree::First, ChordState::FirstInversion),
        ChordSpec::new(Degree::Fifth, ChordState::ThirdInversion)
            .with_quality(ChordQuality::DominantSeventh),
    ])
    .resolve()
    .unwrap();

    assert_eq!(progression.chord(0).bass_pitch_class(), 4);
    assert_eq!(progression.chord(1).bass_pitch_class(), 5);
}

#[test]
fn test_empty_progression_is_rejected() {
    assert_eq!(c_major(vec![]).resolve(), Err(ModelError::EmptyProgression));
}

#[test]
fn test_third_inversion_needs_a_seventh() {
    let err = c_major(vec![ChordSpec::new(Degree::Fourth, ChordState::ThirdInversion)])
        .resolve()
        .unwrap_err();
    assert_eq!(
        err,
        ModelError::InvalidState {
            position: 0,
            quality: ChordQuality::Major,
            state: ChordState::ThirdInversion,
        }
    );
}

#[test]
fn test_unsupported_combinations() {
    let cases = [
        (Degree::FlatTwo, ChordQuality::Minor),
        (Degree::AugmentedSixth, ChordQuality::Major),
        (Degree::First, ChordQuality::AugmentedSixth),
        (Degree::FiveOfSix, ChordQuality::MinorSeventh),
    ];
    for (degree, quality) in cases {
        let err = c_major(vec![ChordSpec::root(degree).with_quality(quality)])
            .resolve()
            .unwrap_err();
        assert!(
            matches!(err, ModelError::UnsupportedCombination { .. }),
            "{degree} {quality}: {err}"
        );
    }
}

#[test]
fn test_cadential_six_four_must_be_in_second_inversion() {
    let err = c_major(vec![ChordSpec::root(Degree::FifthAppoggiatura)])
        .resolve()
        .unwrap_err();
    assert!(matches!(err, ModelError::UnsupportedState { .. }));
}

#[test]
fn test_from_parts_checks_lengths() {
    let err = ProgressionSpec::from_parts(
        0,
        Tonality::MAJOR_STEPS.to_vec(),
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
            found: 1
        }
    );
}

#[test]
fn test_from_ids_rejects_undefined_ids() {
    let steps = Tonality::MAJOR_STEPS.to_vec();
    assert_eq!(
        ProgressionSpec::from_ids(0, steps.clone(), &[0, 42], &[0, 0], &[0, 0]),
        Err(ModelError::UndefinedDegree(42))
    );
    assert_eq!(
        ProgressionSpec::from_ids(0, steps.clone(), &[0], &[11], &[0]),
        Err(ModelError::UndefinedQuality(11))
    );
    assert_eq!(
        ProgressionSpec::from_ids(0, steps.clone(), &[0], &[0], &[7]),
        Err(ModelError::UndefinedState(7))
    );

    let spec = ProgressionSpec::from_ids(0, steps, &[0, 4, 0], &[0, 5, 0], &[0, 0, 1]).unwrap();
    assert_eq!(spec.chords[1].quality, Some(ChordQuality::DominantSeventh));
    assert_eq!(spec.chords[2].state, ChordState::FirstInversion);
}

#[test]
fn test_parse_from_toml() {
    let spec = ProgressionSpec::from_toml_str(
        r#"
        tonic = 9
        mode_intervals = [2, 1, 2, 2, 1, 3, 1]

        [[chords]]
        degree = "first"

        [[chords]]
        degree = "fifth"
        quality = "dominant_seventh"
        state = "first_inversion"
        "#,
    )
    .unwrap();

    assert_eq!(spec.tonic, 9);
    assert_eq!(spec.len(), 2);
    assert_eq!(spec.chords[0].state, ChordState::Fundamental);
    let progression = spec.resolve().unwrap();
    assert_eq!(progression.tonality().mode(), Mode::Minor);
    assert_eq!(progression.chord(1).bass_pitch_class(), 8);
}

#[test]
fn test_parse_error_is_reported() {
    let err = ProgressionSpec::from_toml_str("tonic = \"C\"").unwrap_err();
    assert!(matches!(err, ModelError::Parse(_)));
}
