//! Search-level scope.

use std::time::{Duration, Instant};

/// Counters for one search run, read by terminations and statistics.
#[derive(Debug, Clone, Default)]
pub struct SearchScope {
    start_time: Option<Instant>,
    node_count: u64,
    failure_count: u64,
    propagation_count: u64,
    solution_count: u64,
    restart_count: u64,
    max_depth: usize,
}

impl SearchScope {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn start_solving(&mut self) {
        self.start_time = Some(Instant::now());
    }

    pub fn elapsed(&self) -> Option<Duration> {
        self.start_time.map(|t| t.elapsed())
    }

    pub fn node_count(&self) -> u64 {
        self.node_count
    }

    pub fn failure_count(&self) -> u64 {
        self.failure_count
    }

    pub fn propagation_count(&self) -> u64 {
        self.propagation_count
    }

    pub fn solution_count(&self) -> u64 {
        self.solution_count
    }

    pub fn restart_count(&self) -> u64 {
        self.restart_count
    }

    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    pub fn increment_node_count(&mut self, depth: usize) -> u64 {
        self.node_count += 1;
        self.max_depth = self.max_depth.max(depth);
        self.node_count
    }

    pub fn record_failure(&mut self) {
        self.failure_count += 1;
    }

    pub fn record_solution(&mut self) {
        self.solution_count += 1;
    }

    pub fn record_restart(&mut self) {
        self.restart_count += 1;
    }

    pub(crate) fn propagation_counter(&mut self) -> &mut u64 {
        &mut self.propagation_count
    }
}
