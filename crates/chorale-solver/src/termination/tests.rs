//! Tests for termination conditions.

use std::sync::atomic::Ordering;
use std::time::Duration;

use super::*;

#[test]
fn test_node_count_termination() {
    let mut scope = SearchScope::new();
    let term = NodeCountTermination::new(3);

    assert!(!term.is_terminated(&scope));
    scope.increment_node_count(1);
    scope.increment_node_count(2);
    assert!(!term.is_terminated(&scope));
    scope.increment_node_count(3);
    assert!(term.is_terminated(&scope));
    assert_eq!(scope.max_depth(), 3);
}

#[test]
fn test_solution_count_termination() {
    let mut scope = SearchScope::new();
    let term = SolutionCountTermination::new(1);
    assert!(!term.is_terminated(&scope));
    scope.record_solution();
    assert!(term.is_terminated(&scope));
}

#[test]
fn test_time_termination_before_start() {
    let scope = SearchScope::new();
    assert!(!TimeTermination::millis(0).is_terminated(&scope));
}

#[test]
fn test_time_termination_elapsed() {
    let mut scope = SearchScope::new();
    scope.start_solving();
    assert!(TimeTermination::new(Duration::ZERO).is_terminated(&scope));
    assert!(!TimeTermination::seconds(3600).is_terminated(&scope));
}

#[test]
fn test_external_termination() {
    let scope = SearchScope::new();
    let flag = Arc::new(AtomicBool::new(false));
    let term = ExternalTermination::new(flag.clone());
    assert!(!term.is_terminated(&scope));
    flag.store(true, Ordering::SeqCst);
    assert!(term.is_terminated(&scope));
}

#[test]
fn test_or_termination() {
    let mut scope = SearchScope::new();
    let term = OrTermination((
        NodeCountTermination::new(100),
        SolutionCountTermination::new(2),
    ));
    scope.record_solution();
    assert!(!term.is_terminated(&scope));
    scope.record_solution();
    assert!(term.is_terminated(&scope));
}

#[test]
fn test_from_config() {
    let config = TerminationConfig {
        node_count_limit: Some(2),
        ..TerminationConfig::default()
    };
    let term = from_config(Some(&config), None);
    let mut scope = SearchScope::new();
    scope.start_solving();
    scope.increment_node_count(0);
    assert!(!term.is_terminated(&scope));
    scope.increment_node_count(0);
    assert!(term.is_terminated(&scope));

    let never = from_config(None, None);
    assert!(!never.is_terminated(&scope));
}
