//! Disjunction of literals.

use smallvec::SmallVec;

use super::{PropagationResult, Propagator};
use crate::domain::{DomainStore, Failure};
use crate::var::{IntVar, Literal};

/// At least one literal holds.
#[derive(Debug, Clone)]
pub struct Clause {
    literals: SmallVec<[Literal; 4]>,
}

impl Clause {
    pub fn new(literals: &[Literal]) -> Self {
        Self {
            literals: literals.iter().copied().collect(),
        }
    }
}

impl Propagator for Clause {
    fn name(&self) -> &'static str {
        "clause"
    }

    fn variables(&self) -> Vec<IntVar> {
        self.literals.iter().map(|l| l.var().as_int()).collect()
    }

    fn propagate(&self, store: &mut DomainStore) -> PropagationResult {
        let mut open = None;
        let mut open_count = 0;
        for &lit in &self.literals {
            match store.value(lit.var().as_int()) {
                Some(v) if v == lit.true_value() => return Ok(()),
                Some(_) => {}
                None => {
                    open_count += 1;
                    open = Some(lit);
                }
            }
        }
        match (open_count, open) {
            (1, Some(lit)) => {
                store.assign(lit.var().as_int(), lit.true_value())?;
                Ok(())
            }
            (0, _) => Err(Failure),
            _ => Ok(()),
        }
    }
}
