//! External termination via AtomicBool flag.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use super::Termination;
use crate::scope::SearchScope;

/// Terminates when an external flag is set.
///
/// # Example
///
/// ```
/// use std::sync::atomic::{AtomicBool, Ordering};
/// use std::sync::Arc;
/// use chorale_solver::termination::ExternalTermination;
///
/// let flag = Arc::new(AtomicBool::new(false));
/// let term = ExternalTermination::new(flag.clone());
///
/// // Later, from any thread:
/// flag.store(true, Ordering::SeqCst);
/// ```
#[derive(Debug, Clone)]
pub struct ExternalTermination {
    flag: Arc<AtomicBool>,
}

impl ExternalTermination {
    pub fn new(flag: Arc<AtomicBool>) -> Self {
        Self { flag }
    }
}

impl Termination for ExternalTermination {
    fn is_terminated(&self, _scope: &SearchScope) -> bool {
        self.flag.load(Ordering::Relaxed)
    }
}
