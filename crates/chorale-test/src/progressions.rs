//! Reference progressions.

use chorale::theory::{ChordQuality, ChordState, Degree};
use chorale::{ChordSpec, ProgressionSpec};
use chorale_config::SolverConfig;

/// A solver configuration bounded to `seconds`, with a fixed seed.
pub fn quick_config(seconds: u64) -> SolverConfig {
    SolverConfig::new()
        .with_termination_seconds(seconds)
        .with_random_seed(7)
}

fn roots(degrees: &[Degree]) -> Vec<ChordSpec> {
    degrees.iter().map(|&d| ChordSpec::root(d)).collect()
}

/// I - V - I in C major, root position.
pub fn tonic_dominant_tonic() -> ProgressionSpec {
    ProgressionSpec::major(0, roots(&[Degree::First, Degree::Fifth, Degree::First]))
}

/// I - IV - V - I in C major, root position.
pub fn authentic_cadence() -> ProgressionSpec {
    ProgressionSpec::major(
        0,
        roots(&[Degree::First, Degree::Fourth, Degree::Fifth, Degree::First]),
    )
}

/// I - vii° - I in C major, the diminished chord in root position.
pub fn leading_tone_chord() -> ProgressionSpec {
    ProgressionSpec::major(0, roots(&[Degree::First, Degree::Seventh, Degree::First]))
}

/// i - iv - V7 - i in A minor.
pub fn minor_cadence() -> ProgressionSpec {
    ProgressionSpec::minor(
        9,
        vec![
            ChordSpec::root(Degree::First),
            ChordSpec::root(Degree::Fourth),
            ChordSpec::root(Degree::Fifth).with_quality(ChordQuality::DominantSeventh),
            ChordSpec::root(Degree::First),
        ],
    )
}

/// I - ii6 - I6/4 - V - I in G major, with the cadential six-four.
pub fn cadential_six_four() -> ProgressionSpec {
    ProgressionSpec::major(
        7,
        vec![
            ChordSpec::root(Degree::First),
            ChordSpec::new(Degree::Second, ChordState::FirstInversion),
            ChordSpec::new(Degree::FifthAppoggiatura, ChordState::SecondInversion),
            ChordSpec::root(Degree::Fifth),
            ChordSpec::root(Degree::First),
        ],
    )
}

/// I - V - vi: an interrupted cadence in D major.
pub fn interrupted_cadence() -> ProgressionSpec {
    ProgressionSpec::major(2, roots(&[Degree::First, Degree::Fifth, Degree::Sixth]))
}

/// I - V/V - V - I in C major.
pub fn secondary_dominant() -> ProgressionSpec {
    ProgressionSpec::major(
        0,
        roots(&[
            Degree::First,
            Degree::FiveOfFive,
            Degree::Fifth,
            Degree::First,
        ]),
    )
}
