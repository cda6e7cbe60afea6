//! Solve drivers: single pieces, streaming, batches and near-optimal
//! enumeration.

use std::path::Path;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

use chorale_config::{ExplorationType, SolverConfig};
use chorale_core::{ChoraleError, CostVector, Result};
use chorale_solver::Solver;
use rayon::prelude::*;
use tokio::sync::mpsc;
use tracing::{debug, info};

use super::model::HarmonyModel;
use crate::harmonization::{Harmonization, HarmonizationOutcome};
use crate::piece::{Piece, PieceSpec};
use crate::preferences::COST_LEVELS;
use crate::progression::ProgressionSpec;

/// Harmonizes progressions with a fixed solver configuration.
///
/// # Examples
///
/// ```
/// use chorale::theory::Degree;
/// use chorale::{ChordSpec, Harmonizer, ProgressionSpec};
/// use chorale_config::SolverConfig;
///
/// let spec = ProgressionSpec::major(0, vec![
///     ChordSpec::root(Degree::First),
///     ChordSpec::root(Degree::Fifth),
///     ChordSpec::root(Degree::First),
/// ]);
/// let harmonizer = Harmonizer::new(SolverConfig::new().with_termination_seconds(10)).unwrap();
/// let outcome = harmonizer.harmonize(&spec).unwrap();
/// let best = outcome.best().unwrap();
/// assert_eq!(best.pitches().len(), 12);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Harmonizer {
    config: SolverConfig,
    terminate_flag: Option<Arc<AtomicBool>>,
}

impl Harmonizer {
    pub fn new(config: SolverConfig) -> Result<Self> {
        config
            .validate()
            .map_err(|e| ChoraleError::Config(e.to_string()))?;
        Ok(Self {
            config,
            terminate_flag: None,
        })
    }

    /// Loads the solver configuration from a TOML file.
    pub fn from_config_file(path: impl AsRef<Path>) -> Result<Self> {
        let config =
            SolverConfig::load(path).map_err(|e| ChoraleError::Config(e.to_string()))?;
        Self::new(config)
    }

    /// Adds a flag that stops every search of this harmonizer when set.
    pub fn with_terminate_flag(mut self, flag: Arc<AtomicBool>) -> Self {
        self.terminate_flag = Some(flag);
        self
    }

    pub fn config(&self) -> &SolverConfig {
        &self.config
    }

    /// Harmonizes one progression.
    pub fn harmonize(&self, spec: &ProgressionSpec) -> Result<HarmonizationOutcome> {
        let piece = Piece::from(spec.resolve()?);
        Ok(self.solve_piece(&piece))
    }

    /// Harmonizes a piece of one or more sections.
    pub fn harmonize_piece(&self, spec: &PieceSpec) -> Result<HarmonizationOutcome> {
        let piece = spec.resolve()?;
        Ok(self.solve_piece(&piece))
    }

    /// Harmonizes a validated piece.
    pub fn solve_piece(&self, piece: &Piece) -> HarmonizationOutcome {
        self.run(piece, &self.config, None, |_| {})
    }

    /// Like [`Harmonizer::harmonize_piece`], also sending every improving
    /// voicing into `sender` as soon as it is found.
    pub fn harmonize_with_sender(
        &self,
        spec: &PieceSpec,
        sender: &mpsc::UnboundedSender<Harmonization>,
    ) -> Result<HarmonizationOutcome> {
        let piece = spec.resolve()?;
        Ok(self.run(&piece, &self.config, None, |found| {
            let _ = sender.send(found.clone());
        }))
    }

    /// Harmonizes independent progressions in parallel, one model each.
    /// Results keep the order of `specs`.
    pub fn harmonize_batch(&self, specs: &[ProgressionSpec]) -> Vec<Result<HarmonizationOutcome>> {
        info!(event = "batch_start", progressions = specs.len());
        let results: Vec<_> = specs.par_iter().map(|spec| self.harmonize(spec)).collect();
        info!(
            event = "batch_end",
            progressions = specs.len(),
            failed = results.iter().filter(|r| r.is_err()).count(),
        );
        results
    }

    /// Enumerates every voicing of `spec` whose cost levels are each
    /// within `margin` of `reference`, as given by
    /// [`CostVector::relaxed`].
    pub fn near_optimal(
        &self,
        spec: &PieceSpec,
        reference: &CostVector,
        margin: f64,
    ) -> Result<HarmonizationOutcome> {
        if reference.levels_count() != COST_LEVELS {
            return Err(ChoraleError::InvalidState(format!(
                "reference has {} cost levels, expected {COST_LEVELS}",
                reference.levels_count()
            )));
        }
        if !margin.is_finite() || margin < 0.0 {
            return Err(ChoraleError::Config(format!(
                "margin must be a non-negative number, got {margin}"
            )));
        }
        let piece = spec.resolve()?;
        let bound = reference.relaxed(margin);
        let config = self
            .config
            .clone()
            .with_exploration_type(ExplorationType::DepthFirst);
        Ok(self.run(&piece, &config, Some(&bound), |_| {}))
    }

    fn solver(&self, config: &SolverConfig) -> Solver {
        let solver = Solver::new(config.clone());
        match &self.terminate_flag {
            Some(flag) => solver.with_terminate_flag(Arc::clone(flag)),
            None => solver,
        }
    }

    fn run(
        &self,
        piece: &Piece,
        config: &SolverConfig,
        bound: Option<&CostVector>,
        mut on_found: impl FnMut(&Harmonization),
    ) -> HarmonizationOutcome {
        let mut harmony = HarmonyModel::build(piece);
        if let Some(bound) = bound {
            harmony.bound_costs(bound);
        }
        let (model, decoder) = harmony.into_parts();

        info!(
            event = "solve_start",
            chords = piece.len(),
            sections = piece.sections().len(),
            variables = model.var_count(),
            propagators = model.propagator_count(),
            bound = ?bound,
        );

        let mut trail = Vec::new();
        let outcome = self.solver(config).solve_with_listener(model, |solution| {
            let found = decoder.decode(solution);
            debug!(event = "voicing_found", index = trail.len(), costs = %found.costs());
            on_found(&found);
            trail.push(found);
        });

        // only an unbounded branch-and-bound run proves its best optimal
        let exhaustive = bound.is_none()
            && config.search.exploration_type == ExplorationType::BranchAndBound
            && outcome.is_proven_optimal();
        let result = HarmonizationOutcome::new(
            trail,
            outcome.status(),
            outcome.statistics().clone(),
            exhaustive,
        );

        let stats = result.statistics();
        info!(
            event = "solve_end",
            status = ?result.status(),
            voicings = result.trail().len(),
            best = ?result.best().map(|b| b.costs()),
            proven_optimal = result.is_proven_optimal(),
            duration_ms = stats.duration.as_millis() as u64,
            nodes = stats.node_count,
            failures = stats.failure_count,
        );
        result
    }
}

/// Harmonizes `spec` with `config`.
pub fn harmonize(spec: &ProgressionSpec, config: SolverConfig) -> Result<HarmonizationOutcome> {
    Harmonizer::new(config)?.harmonize(spec)
}
