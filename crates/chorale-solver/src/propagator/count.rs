//! Counting occurrences of a value set.

use super::{PropagationResult, Propagator};
use crate::domain::{DomainStore, ValueSet};
use crate::var::IntVar;

/// `n` equals the number of `vars` taking a value in `set`.
#[derive(Debug, Clone)]
pub struct Count {
    vars: Vec<IntVar>,
    set: ValueSet,
    n: IntVar,
}

impl Count {
    pub fn new(vars: &[IntVar], set: ValueSet, n: IntVar) -> Self {
        Self {
            vars: vars.to_vec(),
            set,
            n,
        }
    }
}

impl Propagator for Count {
    fn name(&self) -> &'static str {
        "count"
    }

    fn variables(&self) -> Vec<IntVar> {
        let mut vars = self.vars.clone();
        vars.push(self.n);
        vars
    }

    fn propagate(&self, store: &mut DomainStore) -> PropagationResult {
        let mut definite = 0i64;
        let mut undecided = Vec::new();
        for &x in &self.vars {
            if store.is_subset_of(x, &self.set) {
                definite += 1;
            } else if !store.is_disjoint_from(x, &self.set) {
                undecided.push(x);
            }
        }
        let possible = definite + undecided.len() as i64;

        store.set_min(self.n, definite)?;
        store.set_max(self.n, possible)?;

        if undecided.is_empty() {
            return Ok(());
        }
        if store.max(self.n) == definite {
            for &x in &undecided {
                store.exclude(x, &self.set)?;
            }
        } else if store.min(self.n) == possible {
            for &x in &undecided {
                store.restrict_to(x, &self.set)?;
            }
        }
        Ok(())
    }
}
