//! Node- and solution-count terminations.

use super::Termination;
use crate::scope::SearchScope;

/// Terminates after a number of search nodes.
#[derive(Debug, Clone)]
pub struct NodeCountTermination {
    limit: u64,
}

impl NodeCountTermination {
    pub fn new(limit: u64) -> Self {
        Self { limit }
    }
}

impl Termination for NodeCountTermination {
    fn is_terminated(&self, scope: &SearchScope) -> bool {
        scope.node_count() >= self.limit
    }
}

/// Terminates once a number of solutions has been reported.
///
/// Under branch-and-bound every reported solution improves on the last one.
#[derive(Debug, Clone)]
pub struct SolutionCountTermination {
    limit: u64,
}

impl SolutionCountTermination {
    pub fn new(limit: u64) -> Self {
        Self { limit }
    }
}

impl Termination for SolutionCountTermination {
    fn is_terminated(&self, scope: &SearchScope) -> bool {
        scope.solution_count() >= self.limit
    }
}
