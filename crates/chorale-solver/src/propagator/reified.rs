//! Reified membership and equality.

use super::{PropagationResult, Propagator};
use crate::domain::{DomainStore, ValueSet};
use crate::var::{BoolVar, IntVar};

/// `b <=> x in set`.
#[derive(Debug, Clone)]
pub struct ReifiedIn {
    x: IntVar,
    set: ValueSet,
    b: BoolVar,
}

impl ReifiedIn {
    pub fn new(x: IntVar, set: ValueSet, b: BoolVar) -> Self {
        Self { x, set, b }
    }
}

impl Propagator for ReifiedIn {
    fn name(&self) -> &'static str {
        "reified_in"
    }

    fn variables(&self) -> Vec<IntVar> {
        vec![self.x, self.b.as_int()]
    }

    fn propagate(&self, store: &mut DomainStore) -> PropagationResult {
        match store.value(self.b.as_int()) {
            Some(1) => {
                store.restrict_to(self.x, &self.set)?;
            }
            Some(_) => {
                store.exclude(self.x, &self.set)?;
            }
            None => {
                if store.is_subset_of(self.x, &self.set) {
                    store.assign(self.b.as_int(), 1)?;
                } else if store.is_disjoint_from(self.x, &self.set) {
                    store.assign(self.b.as_int(), 0)?;
                }
            }
        }
        Ok(())
    }
}

/// `b <=> x == y`.
#[derive(Debug, Clone)]
pub struct ReifiedEq {
    x: IntVar,
    y: IntVar,
    b: BoolVar,
}

impl ReifiedEq {
    pub fn new(x: IntVar, y: IntVar, b: BoolVar) -> Self {
        Self { x, y, b }
    }
}

impl Propagator for ReifiedEq {
    fn name(&self) -> &'static str {
        "reified_eq"
    }

    fn variables(&self) -> Vec<IntVar> {
        vec![self.x, self.y, self.b.as_int()]
    }

    fn propagate(&self, store: &mut DomainStore) -> PropagationResult {
        match store.value(self.b.as_int()) {
            Some(1) => {
                let xs = store.to_set(self.x);
                store.restrict_to(self.y, &xs)?;
                let ys = store.to_set(self.y);
                store.restrict_to(self.x, &ys)?;
            }
            Some(_) => {
                if let Some(v) = store.value(self.x) {
                    store.remove(self.y, v)?;
                }
                if let Some(v) = store.value(self.y) {
                    store.remove(self.x, v)?;
                }
            }
            None => match (store.value(self.x), store.value(self.y)) {
                (Some(a), Some(b)) => {
                    store.assign(self.b.as_int(), i64::from(a == b))?;
                }
                _ => {
                    let ys = store.to_set(self.y);
                    if store.is_disjoint_from(self.x, &ys) {
                        store.assign(self.b.as_int(), 0)?;
                    }
                }
            },
        }
        Ok(())
    }
}
