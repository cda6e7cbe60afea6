//! Solver statistics reporting.

use std::fmt;
use std::time::Duration;

use crate::scope::SearchScope;

/// Complete statistics for a search run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SolverStatistics {
    /// Total time spent searching.
    pub duration: Duration,
    /// Search nodes popped from the stack, failed ones included.
    pub node_count: u64,
    /// Nodes whose propagation failed.
    pub failure_count: u64,
    /// Propagator executions.
    pub propagation_count: u64,
    /// Solutions reported.
    pub solution_count: u64,
    pub restart_count: u64,
    pub max_depth: usize,
}

impl SolverStatistics {
    pub fn from_scope(scope: &SearchScope) -> Self {
        Self {
            duration: scope.elapsed().unwrap_or_default(),
            node_count: scope.node_count(),
            failure_count: scope.failure_count(),
            propagation_count: scope.propagation_count(),
            solution_count: scope.solution_count(),
            restart_count: scope.restart_count(),
            max_depth: scope.max_depth(),
        }
    }

    /// Returns the number of nodes explored per second.
    pub fn nodes_per_second(&self) -> u64 {
        let secs = self.duration.as_secs_f64();
        if secs > 0.0 {
            (self.node_count as f64 / secs) as u64
        } else {
            0
        }
    }
}

impl fmt::Display for SolverStatistics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} nodes, {} failures, {} propagations, {} solutions, {} restarts, depth {} in {}ms",
            self.node_count,
            self.failure_count,
            self.propagation_count,
            self.solution_count,
            self.restart_count,
            self.max_depth,
            self.duration.as_millis()
        )
    }
}
