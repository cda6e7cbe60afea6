//! Chorale Solver - finite-domain propagation and search
//!
//! A small constraint solver sized for the harmonization model:
//! - Explicit bitset domains copied at every branching point
//! - Propagators for linear relations, counting, distinct values,
//!   table lookup, remainders, reified membership/equality and clauses
//! - Depth-first enumeration and lexicographic branch-and-bound
//! - Seeded value selection, geometric restarts and pluggable terminations

pub mod domain;
mod engine;
pub mod model;
pub mod propagator;
pub mod scope;
pub mod search;
pub mod solver;
pub mod statistics;
pub mod termination;
pub mod var;

pub use domain::{DomainStore, Failure, ValueSet};
pub use model::{BranchVar, Model};
pub use propagator::{Propagator, Rel};
pub use scope::SearchScope;
pub use search::{Search, SearchStatus, Solution};
pub use solver::{SolveOutcome, Solver};
pub use statistics::SolverStatistics;
pub use termination::Termination;
pub use var::{BoolVar, IntVar, Literal};
