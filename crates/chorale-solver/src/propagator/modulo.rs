//! Euclidean remainder.

use super::{PropagationResult, Propagator};
use crate::domain::{DomainStore, ValueSet};
use crate::var::IntVar;

/// `y == x mod m` with the Euclidean (non-negative) remainder.
#[derive(Debug, Clone)]
pub struct Modulo {
    x: IntVar,
    m: i64,
    y: IntVar,
}

impl Modulo {
    /// # Panics
    /// Panics if `m` is not positive.
    pub fn new(x: IntVar, m: i64, y: IntVar) -> Self {
        assert!(m > 0, "modulus must be positive, got {m}");
        Self { x, m, y }
    }
}

impl Propagator for Modulo {
    fn name(&self) -> &'static str {
        "modulo"
    }

    fn variables(&self) -> Vec<IntVar> {
        vec![self.x, self.y]
    }

    fn propagate(&self, store: &mut DomainStore) -> PropagationResult {
        let remainders = store.to_set(self.y);
        store.retain(self.x, |v| remainders.contains(v.rem_euclid(self.m)))?;
        let reachable: ValueSet = store
            .values(self.x)
            .map(|v| v.rem_euclid(self.m))
            .collect();
        store.restrict_to(self.y, &reachable)?;
        Ok(())
    }
}
