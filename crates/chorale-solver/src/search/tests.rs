//! Search tests on small models with known answers.

use tokio::sync::mpsc;

use chorale_config::{ExplorationType, RestartConfig, SolverConfig, ValueSelection};

use crate::domain::ValueSet;
use crate::model::Model;
use crate::propagator::Rel;
use crate::search::SearchStatus;
use crate::solver::Solver;
use crate::var::IntVar;

fn sum_model() -> (Model, IntVar, IntVar) {
    let mut model = Model::new();
    let x = model.int_var(0, 4);
    let y = model.int_var(0, 4);
    model.linear(&[(1, x), (1, y)], Rel::Eq, 4);
    model.branch_on(x, None);
    model.branch_on(y, None);
    (model, x, y)
}

/// Three variables with a two-level objective whose optimum is not the
/// first solution in tree order.
fn objective_model() -> (Model, [IntVar; 3]) {
    let mut model = Model::new();
    let a = model.int_var(0, 4);
    let b = model.int_var(0, 4);
    let c = model.int_var(0, 4);
    model.linear(&[(1, a), (1, b), (1, c)], Rel::Eq, 6);
    let same = model.reify_eq(a, b);
    model.require(!same);
    let zeros = model.count_var(&[a, b, c], &ValueSet::singleton(0));
    let weighted = model.sum_var(&[(1, a), (-2, b), (3, c)]);
    model.minimize_lex(vec![zeros, weighted]);
    for v in [a, b, c] {
        model.branch_on(v, None);
    }
    (model, [a, b, c])
}

fn depth_first() -> SolverConfig {
    SolverConfig::new()
        .with_exploration_type(ExplorationType::DepthFirst)
        .with_value_selection(ValueSelection::Min)
}

#[test]
fn test_enumerates_every_solution() {
    let (model, x, y) = sum_model();
    let outcome = Solver::new(depth_first()).solve(model);

    assert_eq!(outcome.status(), SearchStatus::Complete);
    let pairs: Vec<(i64, i64)> = outcome
        .solutions()
        .iter()
        .map(|s| (s.value(x), s.value(y)))
        .collect();
    assert_eq!(pairs, vec![(0, 4), (1, 3), (2, 2), (3, 1), (4, 0)]);
    assert!(outcome.solutions().iter().all(|s| s.objective().is_none()));
}

#[test]
fn test_branch_and_bound_matches_exhaustive_minimum() {
    let (model, _) = objective_model();
    let all = Solver::new(depth_first()).solve(model);
    let expected = all
        .solutions()
        .iter()
        .filter_map(|s| s.objective().cloned())
        .min()
        .unwrap();

    for selection in [
        ValueSelection::Min,
        ValueSelection::Max,
        ValueSelection::Nearest,
        ValueSelection::Random,
    ] {
        let (model, vars) = objective_model();
        let config = SolverConfig::new()
            .with_value_selection(selection)
            .with_random_seed(3);
        let outcome = Solver::new(config).solve(model);

        assert!(outcome.is_proven_optimal());
        let best = outcome.best().unwrap();
        assert_eq!(best.objective(), Some(&expected));
        let values = best.values_of(&vars);
        assert_eq!(values.iter().sum::<i64>(), 6);
        assert_ne!(values[0], values[1]);

        let trail: Vec<_> = outcome
            .solutions()
            .iter()
            .filter_map(|s| s.objective().cloned())
            .collect();
        assert!(trail.windows(2).all(|w| w[1] < w[0]));
    }
}

#[test]
fn test_depth_first_best_is_minimum() {
    let (model, _) = objective_model();
    let outcome = Solver::new(depth_first()).solve(model);
    let best = outcome.best().unwrap().objective().cloned().unwrap();
    assert!(outcome
        .solutions()
        .iter()
        .all(|s| s.objective().is_some_and(|c| *c >= best)));
    assert!(outcome.is_proven_optimal());
}

#[test]
fn test_failed_model_is_unsatisfiable() {
    let mut model = Model::new();
    let x = model.int_var(0, 3);
    model.restrict(x, &ValueSet::range(10, 12));
    assert!(model.is_failed());

    let outcome = Solver::default().solve(model);
    assert!(outcome.is_unsatisfiable());
    assert!(!outcome.is_proven_optimal());
    assert!(outcome.best().is_none());
}

#[test]
fn test_root_failure_is_unsatisfiable() {
    let mut model = Model::new();
    let x = model.int_var(0, 3);
    let y = model.int_var(0, 3);
    model.linear(&[(1, x), (1, y)], Rel::Ge, 7);
    let outcome = Solver::default().solve(model);
    assert!(outcome.is_unsatisfiable());
    assert_eq!(outcome.statistics().failure_count, 1);
}

#[test]
fn test_node_limit_stops_without_proof() {
    let (model, _) = objective_model();
    let outcome = Solver::new(SolverConfig::new().with_node_count_limit(3)).solve(model);
    assert_eq!(outcome.status(), SearchStatus::Stopped);
    assert!(!outcome.is_proven_optimal());
    assert!(!outcome.is_unsatisfiable());
}

#[test]
fn test_solution_limit() {
    let (model, _, _) = sum_model();
    let outcome = Solver::new(depth_first().with_solution_count_limit(2)).solve(model);
    assert_eq!(outcome.solutions().len(), 2);
    assert_eq!(outcome.status(), SearchStatus::Stopped);
}

#[test]
fn test_restarts_keep_optimum() {
    let (model, _) = objective_model();
    let plain = Solver::default().solve(model);

    let (model, _) = objective_model();
    let config = SolverConfig::new()
        .with_value_selection(ValueSelection::Random)
        .with_random_seed(11)
        .with_restart(RestartConfig {
            base_failure_limit: 1,
            growth_factor: 2.0,
        });
    let restarted = Solver::new(config).solve(model);

    assert!(restarted.is_proven_optimal());
    assert_eq!(
        restarted.best().and_then(|s| s.objective()),
        plain.best().and_then(|s| s.objective())
    );
}

#[test]
fn test_seeded_search_is_reproducible() {
    let config = SolverConfig::new()
        .with_value_selection(ValueSelection::Random)
        .with_random_seed(5);
    let (first, _) = objective_model();
    let (second, _) = objective_model();
    let a = Solver::new(config.clone()).solve(first);
    let b = Solver::new(config).solve(second);
    assert_eq!(a.solutions(), b.solutions());
}

#[test]
fn test_solutions_are_streamed() {
    let (model, _, _) = sum_model();
    let (sender, mut receiver) = mpsc::unbounded_channel();
    let outcome = Solver::new(depth_first()).solve_with_sender(model, &sender);
    drop(sender);

    let mut received = 0;
    while receiver.try_recv().is_ok() {
        received += 1;
    }
    assert_eq!(received, outcome.solutions().len());
}

#[test]
fn test_lazy_search_reports_status() {
    let (model, _, _) = sum_model();
    let mut search = Solver::new(depth_first()).search(model);
    assert_eq!(search.status(), SearchStatus::NotStarted);
    assert!(search.next().is_some());
    assert_eq!(search.status(), SearchStatus::Running);
    assert_eq!(search.by_ref().count(), 4);
    assert_eq!(search.status(), SearchStatus::Complete);
    assert!(search.next().is_none());
}
