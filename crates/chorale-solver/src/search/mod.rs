//! Depth-first and branch-and-bound search.
//!
//! The search copies the domain store at every branching point and makes a
//! binary choice `x = v` / `x != v`, exploring the equality first. Under
//! branch-and-bound every node is propagated against the best objective
//! found so far, so each reported solution is lexicographically strictly
//! better than the previous one and the last one is optimal once the tree
//! is exhausted.
//!
//! # Restarts
//!
//! With a restart policy the tree is abandoned after a failure budget and
//! explored again from the root, keeping the incumbent bound. Combined with
//! random value selection this varies the early decisions. The budget grows
//! geometrically so the final run is always allowed to finish.

mod branch;

use std::fmt;
use std::sync::Arc;

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::{debug, info, trace, warn};

use chorale_config::{ExplorationType, SearchConfig, ValueSelection};
use chorale_core::CostVector;

use crate::domain::DomainStore;
use crate::engine::{fixpoint, watchers, ObjectiveBound, Watchers};
use crate::model::{BranchVar, Model};
use crate::propagator::Propagator;
use crate::scope::SearchScope;
use crate::statistics::SolverStatistics;
use crate::termination::Termination;
use crate::var::{BoolVar, IntVar};

/// A complete assignment.
#[derive(Clone, PartialEq, Eq)]
pub struct Solution {
    values: Vec<i64>,
    objective: Option<CostVector>,
}

impl Solution {
    pub fn value(&self, var: IntVar) -> i64 {
        self.values[var.index()]
    }

    pub fn bool_value(&self, var: BoolVar) -> bool {
        self.value(var.as_int()) != 0
    }

    pub fn values_of(&self, vars: &[IntVar]) -> Vec<i64> {
        vars.iter().map(|&v| self.value(v)).collect()
    }

    /// The objective levels, if the model registered an objective.
    pub fn objective(&self) -> Option<&CostVector> {
        self.objective.as_ref()
    }
}

impl fmt::Debug for Solution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Solution")
            .field("variables", &self.values.len())
            .field("objective", &self.objective)
            .finish()
    }
}

/// Progress of a search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchStatus {
    NotStarted,
    Running,
    /// The tree was exhausted.
    Complete,
    /// A termination fired before the tree was exhausted.
    Stopped,
}

struct Node {
    store: DomainStore,
    depth: usize,
    full: bool,
}

#[derive(Debug)]
struct RestartSchedule {
    limit: f64,
    growth_factor: f64,
    failures_at_start: u64,
}

/// Immutable part of a model shared by all nodes.
struct Problem {
    propagators: Vec<Box<dyn Propagator>>,
    watchers: Watchers,
    branching: Vec<BranchVar>,
    objective: Vec<IntVar>,
}

/// A lazy search over the solutions of a model.
///
/// Iterating yields solutions until the tree is exhausted or the
/// termination fires; [`Search::status`] tells the two apart.
pub struct Search<T: Termination> {
    problem: Arc<Problem>,
    root: Option<DomainStore>,
    stack: Vec<Node>,
    exploration: ExplorationType,
    value_selection: ValueSelection,
    restart: Option<RestartSchedule>,
    rng: ChaCha8Rng,
    termination: T,
    scope: SearchScope,
    incumbent: Option<Vec<i64>>,
    status: SearchStatus,
}

impl<T: Termination> Search<T> {
    pub fn new(model: Model, config: &SearchConfig, seed: Option<u64>, termination: T) -> Self {
        let failed = model.is_failed();
        let Model {
            store,
            propagators,
            branching,
            objective,
            ..
        } = model;
        let watchers = watchers(&propagators, store.var_count());

        let restart = match (&config.restart, config.exploration_type) {
            (Some(r), ExplorationType::BranchAndBound) => Some(RestartSchedule {
                limit: r.base_failure_limit as f64,
                growth_factor: r.growth_factor,
                failures_at_start: 0,
            }),
            (Some(_), ExplorationType::DepthFirst) => {
                warn!(
                    event = "restart_ignored",
                    reason = "depth-first enumeration would repeat solutions"
                );
                None
            }
            (None, _) => None,
        };
        let rng = match seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_rng(&mut rand::rng()),
        };

        Self {
            problem: Arc::new(Problem {
                propagators,
                watchers,
                branching,
                objective,
            }),
            root: if failed { None } else { Some(store) },
            stack: Vec::new(),
            exploration: config.exploration_type,
            value_selection: config.value_selection,
            restart,
            rng,
            termination,
            scope: SearchScope::new(),
            incumbent: None,
            status: SearchStatus::NotStarted,
        }
    }

    pub fn status(&self) -> SearchStatus {
        self.status
    }

    pub fn exploration(&self) -> ExplorationType {
        self.exploration
    }

    pub fn scope(&self) -> &SearchScope {
        &self.scope
    }

    pub fn statistics(&self) -> SolverStatistics {
        SolverStatistics::from_scope(&self.scope)
    }

    fn start(&mut self) {
        self.scope.start_solving();
        self.status = SearchStatus::Running;
        info!(
            event = "search_start",
            variables = self.root.as_ref().map_or(0, |r| r.var_count()),
            propagators = self.problem.propagators.len(),
            objective_levels = self.problem.objective.len(),
            exploration = ?self.exploration,
            value_selection = ?self.value_selection,
        );
        if let Some(root) = &self.root {
            self.stack.push(Node {
                store: root.clone(),
                depth: 0,
                full: true,
            });
        }
    }

    fn finish(&mut self, status: SearchStatus) {
        self.status = status;
        self.stack.clear();
        let stats = self.statistics();
        info!(
            event = "search_end",
            status = ?status,
            duration_ms = stats.duration.as_millis() as u64,
            nodes = stats.node_count,
            failures = stats.failure_count,
            solutions = stats.solution_count,
            restarts = stats.restart_count,
            speed = stats.nodes_per_second(),
        );
    }

    fn restart_due(&self) -> bool {
        self.restart.as_ref().is_some_and(|r| {
            (self.scope.failure_count() - r.failures_at_start) as f64 >= r.limit
        })
    }

    fn restart(&mut self) {
        let failures = self.scope.failure_count();
        if let (Some(schedule), Some(root)) = (self.restart.as_mut(), self.root.as_ref()) {
            schedule.failures_at_start = failures;
            schedule.limit *= schedule.growth_factor;
            self.stack.clear();
            self.stack.push(Node {
                store: root.clone(),
                depth: 0,
                full: true,
            });
            self.scope.record_restart();
            debug!(
                event = "restart",
                restarts = self.scope.restart_count(),
                next_failure_limit = schedule.limit as u64,
            );
        }
    }

    fn extract(&self, store: &DomainStore) -> Solution {
        let values: Vec<i64> = (0..store.var_count() as u32)
            .map(|i| store.min(IntVar(i)))
            .collect();
        let objective = if self.problem.objective.is_empty() {
            None
        } else {
            Some(CostVector::of(
                self.problem
                    .objective
                    .iter()
                    .map(|v| values[v.index()])
                    .collect(),
            ))
        };
        Solution { values, objective }
    }
}

impl<T: Termination> Iterator for Search<T> {
    type Item = Solution;

    fn next(&mut self) -> Option<Solution> {
        match self.status {
            SearchStatus::NotStarted => self.start(),
            SearchStatus::Running => {}
            SearchStatus::Complete | SearchStatus::Stopped => return None,
        }

        loop {
            if self.termination.is_terminated(&self.scope) {
                self.finish(SearchStatus::Stopped);
                return None;
            }
            if self.restart_due() {
                self.restart();
            }
            let Some(mut node) = self.stack.pop() else {
                self.finish(SearchStatus::Complete);
                return None;
            };
            self.scope.increment_node_count(node.depth);

            let problem = Arc::clone(&self.problem);
            let bound = match (self.exploration, &self.incumbent) {
                (ExplorationType::BranchAndBound, Some(values)) => Some(ObjectiveBound {
                    vars: &problem.objective,
                    values,
                }),
                _ => None,
            };
            if fixpoint(
                &problem.propagators,
                &problem.watchers,
                &mut node.store,
                node.full,
                bound,
                self.scope.propagation_counter(),
            )
            .is_err()
            {
                self.scope.record_failure();
                continue;
            }

            let Some(branch) = branch::select_variable(&problem.branching, &node.store) else {
                let solution = self.extract(&node.store);
                self.scope.record_solution();
                if self.exploration == ExplorationType::BranchAndBound {
                    self.incumbent = solution.objective().map(|c| c.levels().to_vec());
                }
                debug!(
                    event = "solution",
                    nodes = self.scope.node_count(),
                    objective = %solution
                        .objective()
                        .map_or_else(|| "none".to_string(), |c| c.to_string()),
                );
                return Some(solution);
            };

            let value =
                branch::select_value(self.value_selection, branch, &node.store, &mut self.rng);
            trace!(event = "branch", var = branch.var.index(), value, depth = node.depth);

            let mut right = node.store.clone();
            if right.remove(branch.var, value).is_ok() {
                self.stack.push(Node {
                    store: right,
                    depth: node.depth + 1,
                    full: false,
                });
            }
            let mut left = node.store;
            if left.assign(branch.var, value).is_ok() {
                self.stack.push(Node {
                    store: left,
                    depth: node.depth + 1,
                    full: false,
                });
            }
        }
    }
}

#[cfg(test)]
mod tests;
