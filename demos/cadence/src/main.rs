//! Cadence Example
//!
//! Harmonizes a perfect cadence in C major, with a cadential six-four
//! before the dominant seventh, and prints the cheapest voicing found. A
//! piece description in TOML can be passed as the first argument instead:
//!
//! ```text
//! cargo run -p cadence -- piece.toml
//! ```
//!
//! Solver settings are read from `solver.toml` when it exists. Set
//! `RUST_LOG=chorale=debug` to follow every improving voicing.

use std::path::Path;
use std::{env, fs, process};

use chorale::prelude::*;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

const CONFIG_FILE: &str = "solver.toml";

fn main() {
    init_tracing();

    if let Err(message) = run() {
        eprintln!("error: {message}");
        process::exit(1);
    }
}

fn init_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("chorale=info"));
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .try_init();
}

fn run() -> Result<(), String> {
    let spec = match env::args().nth(1) {
        Some(path) => {
            let text = fs::read_to_string(&path).map_err(|e| format!("{path}: {e}"))?;
            PieceSpec::from_toml_str(&text).map_err(|e| format!("{path}: {e}"))?
        }
        None => PieceSpec::single(perfect_cadence()),
    };

    let harmonizer = if Path::new(CONFIG_FILE).exists() {
        Harmonizer::from_config_file(CONFIG_FILE)
    } else {
        Harmonizer::new(SolverConfig::new().with_termination_seconds(30))
    }
    .map_err(|e| e.to_string())?;

    let outcome = harmonizer.harmonize_piece(&spec).map_err(|e| e.to_string())?;
    println!("{outcome}");
    if let Some(best) = outcome.best() {
        println!();
        println!("{best}");
    }
    Ok(())
}

/// I - IV - I64 - V7 - I in C major.
fn perfect_cadence() -> ProgressionSpec {
    ProgressionSpec::major(
        0,
        vec![
            ChordSpec::root(Degree::First),
            ChordSpec::root(Degree::Fourth),
            ChordSpec::new(Degree::FifthAppoggiatura, ChordState::SecondInversion),
            ChordSpec::root(Degree::Fifth).with_quality(ChordQuality::DominantSeventh),
            ChordSpec::root(Degree::First),
        ],
    )
}
