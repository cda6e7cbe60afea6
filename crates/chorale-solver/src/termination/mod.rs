//! Termination conditions for a search.

mod composite;
mod count;
mod external;
mod time;

use std::fmt::Debug;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

use chorale_config::TerminationConfig;

use crate::scope::SearchScope;

pub use composite::OrTermination;
pub use count::{NodeCountTermination, SolutionCountTermination};
pub use external::ExternalTermination;
pub use time::TimeTermination;

/// Trait for determining when to stop searching.
pub trait Termination: Send + Debug {
    /// Returns true if searching should terminate.
    fn is_terminated(&self, scope: &SearchScope) -> bool;
}

/// An absent termination never fires.
impl<T: Termination> Termination for Option<T> {
    fn is_terminated(&self, scope: &SearchScope) -> bool {
        self.as_ref().is_some_and(|t| t.is_terminated(scope))
    }
}

/// Termination assembled from a [`TerminationConfig`] and an optional
/// cancellation flag.
pub type ConfiguredTermination = OrTermination<(
    Option<TimeTermination>,
    Option<NodeCountTermination>,
    Option<SolutionCountTermination>,
    Option<ExternalTermination>,
)>;

/// Builds the termination described by `config`.
pub fn from_config(
    config: Option<&TerminationConfig>,
    flag: Option<Arc<AtomicBool>>,
) -> ConfiguredTermination {
    OrTermination((
        config
            .and_then(|c| c.time_limit())
            .map(TimeTermination::new),
        config
            .and_then(|c| c.node_count_limit)
            .map(NodeCountTermination::new),
        config
            .and_then(|c| c.solution_count_limit)
            .map(SolutionCountTermination::new),
        flag.map(ExternalTermination::new),
    ))
}

#[cfg(test)]
mod tests;
