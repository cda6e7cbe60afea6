//! Propagators: the constraints of a model.
//!
//! A propagator removes values that cannot take part in any solution of its
//! constraint, given the current domains. Propagators are stateless; all
//! state lives in the [`DomainStore`] so that a cloned store is a complete
//! search node. A propagator is rerun whenever one of its variables shrinks,
//! so a single pass need not reach its own fixpoint.

mod clause;
mod count;
mod element;
mod linear;
mod modulo;
mod nvalues;
mod reified;

use std::fmt::Debug;

use crate::domain::{DomainStore, Failure};
use crate::var::IntVar;

pub use clause::Clause;
pub use count::Count;
pub use element::Element;
pub use linear::{Linear, Rel};
pub use modulo::Modulo;
pub use nvalues::NValues;
pub use reified::{ReifiedEq, ReifiedIn};

/// Result of running a propagator.
pub type PropagationResult = Result<(), Failure>;

/// A constraint in propagator form.
pub trait Propagator: Send + Sync + Debug {
    /// Short name used in trace output.
    fn name(&self) -> &'static str;

    /// Variables whose changes must reschedule this propagator.
    fn variables(&self) -> Vec<IntVar>;

    /// Prunes the store. Returns `Err(Failure)` when the constraint cannot
    /// be satisfied any more.
    fn propagate(&self, store: &mut DomainStore) -> PropagationResult;
}
