//! Chorale Core - shared types for the four-voice harmonizer
//!
//! This crate provides:
//! - The lexicographic [`CostVector`] that ranks harmonizations
//! - The crate-wide [`ChoraleError`] and `Result` alias

pub mod cost;
pub mod error;

pub use cost::{CostParseError, CostVector};
pub use error::{ChoraleError, Result};
