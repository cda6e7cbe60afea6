//! Tests for solver configuration.

use super::*;

#[test]
fn test_toml_parsing() {
    let toml = r#"
        random_seed = 42

        [termination]
        seconds_spent_limit = 30
        node_count_limit = 5000

        [search]
        exploration_type = "depth_first"
        value_selection = "max"
    "#;

    let config = SolverConfig::from_toml_str(toml).unwrap();
    assert_eq!(config.random_seed, Some(42));
    let termination = config.termination.unwrap();
    assert_eq!(termination.seconds_spent_limit, Some(30));
    assert_eq!(termination.node_count_limit, Some(5000));
    assert_eq!(config.search.exploration_type, ExplorationType::DepthFirst);
    assert_eq!(config.search.value_selection, ValueSelection::Max);
    assert!(config.search.restart.is_none());
}

#[test]
fn test_yaml_parsing() {
    let yaml = r#"
        random_seed: 42
        termination:
          millis_spent_limit: 250
          solution_count_limit: 3
        search:
          value_selection: random
          restart:
            base_failure_limit: 32
    "#;

    let config = SolverConfig::from_yaml_str(yaml).unwrap();
    assert_eq!(config.random_seed, Some(42));
    assert_eq!(config.time_limit(), Some(Duration::from_millis(250)));
    assert_eq!(config.search.value_selection, ValueSelection::Random);
    let restart = config.search.restart.unwrap();
    assert_eq!(restart.base_failure_limit, 32);
    assert_eq!(restart.growth_factor, 2.0);
}

#[test]
fn test_defaults() {
    let config = SolverConfig::from_toml_str("").unwrap();
    assert_eq!(config, SolverConfig::default());
    assert_eq!(
        config.search.exploration_type,
        ExplorationType::BranchAndBound
    );
    assert_eq!(config.search.value_selection, ValueSelection::Nearest);
    assert_eq!(config.time_limit(), None);
}

#[test]
fn test_builder() {
    let config = SolverConfig::new()
        .with_random_seed(123)
        .with_termination_seconds(60)
        .with_solution_count_limit(10)
        .with_exploration_type(ExplorationType::DepthFirst)
        .with_restart(RestartConfig::default());

    assert_eq!(config.random_seed, Some(123));
    let termination = config.termination.as_ref().unwrap();
    assert_eq!(termination.seconds_spent_limit, Some(60));
    assert_eq!(termination.solution_count_limit, Some(10));
    assert_eq!(config.search.restart.as_ref().unwrap().base_failure_limit, 64);
}

#[test]
fn test_time_limit_sums_units() {
    let termination = TerminationConfig {
        minutes_spent_limit: Some(1),
        seconds_spent_limit: Some(2),
        millis_spent_limit: Some(3),
        ..TerminationConfig::default()
    };
    assert_eq!(termination.time_limit(), Some(Duration::from_millis(62_003)));
}

#[test]
fn test_invalid_restart_rejected() {
    let toml = r#"
        [search.restart]
        base_failure_limit = 10
        growth_factor = 0.5
    "#;
    assert!(matches!(
        SolverConfig::from_toml_str(toml),
        Err(ConfigError::Invalid(_))
    ));

    let toml = r#"
        [search.restart]
        base_failure_limit = 0
    "#;
    assert!(matches!(
        SolverConfig::from_toml_str(toml),
        Err(ConfigError::Invalid(_))
    ));
}

#[test]
fn test_unknown_enum_value_is_parse_error() {
    let toml = r#"
        [search]
        value_selection = "median"
    "#;
    assert!(matches!(
        SolverConfig::from_toml_str(toml),
        Err(ConfigError::Toml(_))
    ));
}

#[test]
fn test_missing_file() {
    assert!(matches!(
        SolverConfig::load("/nonexistent/chorale.toml"),
        Err(ConfigError::Io(_))
    ));
}
