//! Configured solving.

use std::sync::atomic::AtomicBool;
use std::sync::Arc;

use tokio::sync::mpsc;

use chorale_config::{ExplorationType, SolverConfig};

use crate::model::Model;
use crate::search::{Search, SearchStatus, Solution};
use crate::statistics::SolverStatistics;
use crate::termination::{self, ConfiguredTermination};

/// Runs searches described by a [`SolverConfig`].
///
/// # Examples
///
/// ```
/// use chorale_config::SolverConfig;
/// use chorale_solver::{Model, Rel, Solver};
///
/// let mut model = Model::new();
/// let x = model.int_var(0, 5);
/// let y = model.int_var(0, 5);
/// model.linear(&[(1, x), (1, y)], Rel::Ge, 4);
/// let cost = model.sum_var(&[(2, x), (1, y)]);
/// model.minimize_lex(vec![cost]);
///
/// let outcome = Solver::new(SolverConfig::default()).solve(model);
/// assert!(outcome.is_proven_optimal());
/// let best = outcome.best().unwrap();
/// assert_eq!((best.value(x), best.value(y)), (0, 4));
/// ```
#[derive(Debug, Clone, Default)]
pub struct Solver {
    config: SolverConfig,
    terminate_flag: Option<Arc<AtomicBool>>,
}

impl Solver {
    pub fn new(config: SolverConfig) -> Self {
        Self {
            config,
            terminate_flag: None,
        }
    }

    /// Adds a flag that stops the search when set from another thread.
    pub fn with_terminate_flag(mut self, flag: Arc<AtomicBool>) -> Self {
        self.terminate_flag = Some(flag);
        self
    }

    pub fn config(&self) -> &SolverConfig {
        &self.config
    }

    /// Returns the lazy search for `model`.
    pub fn search(&self, model: Model) -> Search<ConfiguredTermination> {
        let termination = termination::from_config(
            self.config.termination.as_ref(),
            self.terminate_flag.clone(),
        );
        Search::new(
            model,
            &self.config.search,
            self.config.random_seed,
            termination,
        )
    }

    /// Runs the search to completion or termination.
    pub fn solve(&self, model: Model) -> SolveOutcome {
        self.solve_with_listener(model, |_| {})
    }

    /// Like [`Solver::solve`], also pushing every solution into `sender` as
    /// soon as it is found. A closed channel does not stop the search.
    pub fn solve_with_sender(
        &self,
        model: Model,
        sender: &mpsc::UnboundedSender<Solution>,
    ) -> SolveOutcome {
        self.solve_with_listener(model, |solution| {
            let _ = sender.send(solution.clone());
        })
    }

    /// Runs the search, calling `on_solution` for every solution found.
    pub fn solve_with_listener(
        &self,
        model: Model,
        mut on_solution: impl FnMut(&Solution),
    ) -> SolveOutcome {
        let mut search = self.search(model);
        let mut solutions = Vec::new();
        for solution in search.by_ref() {
            on_solution(&solution);
            solutions.push(solution);
        }
        SolveOutcome {
            solutions,
            status: search.status(),
            exploration: search.exploration(),
            statistics: search.statistics(),
        }
    }
}

/// Everything a finished search produced.
#[derive(Debug, Clone)]
pub struct SolveOutcome {
    solutions: Vec<Solution>,
    status: SearchStatus,
    exploration: ExplorationType,
    statistics: SolverStatistics,
}

impl SolveOutcome {
    /// All reported solutions, in the order they were found. Under
    /// branch-and-bound this is the improvement trail.
    pub fn solutions(&self) -> &[Solution] {
        &self.solutions
    }

    pub fn into_solutions(self) -> Vec<Solution> {
        self.solutions
    }

    pub fn status(&self) -> SearchStatus {
        self.status
    }

    pub fn statistics(&self) -> &SolverStatistics {
        &self.statistics
    }

    /// The solution with the smallest objective.
    pub fn best(&self) -> Option<&Solution> {
        match self.exploration {
            ExplorationType::BranchAndBound => self.solutions.last(),
            ExplorationType::DepthFirst => self
                .solutions
                .iter()
                .enumerate()
                .min_by(|(i, a), (j, b)| a.objective().cmp(&b.objective()).then(i.cmp(j)))
                .map(|(_, s)| s),
        }
    }

    /// The tree was exhausted, so `best` is optimal.
    pub fn is_proven_optimal(&self) -> bool {
        self.status == SearchStatus::Complete && !self.solutions.is_empty()
    }

    /// The tree was exhausted without any solution.
    pub fn is_unsatisfiable(&self) -> bool {
        self.status == SearchStatus::Complete && self.solutions.is_empty()
    }
}
