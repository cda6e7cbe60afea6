//! Shared test fixtures for chorale crates.
//!
//! - [`progressions`] - reference progressions and solver configurations
//! - [`invariants`] - an independent checker for solved voicings
//!
//! # Usage
//!
//! Add as a dev-dependency in your crate's `Cargo.toml`:
//!
//! ```toml
//! [dev-dependencies]
//! chorale-test = { workspace = true }
//! ```
//!
//! Then import the fixtures you need:
//!
//! ```ignore
//! use chorale_test::progressions::{authentic_cadence, quick_config};
//! use chorale_test::invariants::check_invariants;
//! ```

pub mod invariants;
pub mod progressions;

pub use invariants::{check_invariants, Violation};
pub use progressions::quick_config;
