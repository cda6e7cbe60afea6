//! Number of distinct values.

use smallvec::SmallVec;

use super::{PropagationResult, Propagator};
use crate::domain::{DomainStore, ValueSet};
use crate::var::IntVar;

/// `n` equals the number of distinct values taken by `vars`.
#[derive(Debug, Clone)]
pub struct NValues {
    vars: Vec<IntVar>,
    n: IntVar,
}

impl NValues {
    pub fn new(vars: &[IntVar], n: IntVar) -> Self {
        Self {
            vars: vars.to_vec(),
            n,
        }
    }
}

impl Propagator for NValues {
    fn name(&self) -> &'static str {
        "nvalues"
    }

    fn variables(&self) -> Vec<IntVar> {
        let mut vars = self.vars.clone();
        vars.push(self.n);
        vars
    }

    fn propagate(&self, store: &mut DomainStore) -> PropagationResult {
        let mut unfixed: SmallVec<[IntVar; 8]> = SmallVec::new();
        let mut fixed = Vec::new();
        for &x in &self.vars {
            match store.value(x) {
                Some(v) => fixed.push(v),
                None => unfixed.push(x),
            }
        }
        let fixed: ValueSet = fixed.into_iter().collect();
        let seen = fixed.len() as i64;
        let union: ValueSet = self.vars.iter().flat_map(|&x| store.values(x)).collect();

        let lower = if self.vars.is_empty() { 0 } else { seen.max(1) };
        let upper = (seen + unfixed.len() as i64).min(union.len() as i64);
        store.set_min(self.n, lower)?;
        store.set_max(self.n, upper)?;

        if unfixed.is_empty() {
            return Ok(());
        }
        if seen > 0 && store.max(self.n) == seen {
            for &x in &unfixed {
                store.restrict_to(x, &fixed)?;
            }
        } else if store.min(self.n) == seen + unfixed.len() as i64 {
            for &x in &unfixed {
                store.exclude(x, &fixed)?;
            }
        }
        Ok(())
    }
}
