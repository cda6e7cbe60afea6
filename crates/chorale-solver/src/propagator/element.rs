//! Table lookup.

use super::{PropagationResult, Propagator};
use crate::domain::{DomainStore, ValueSet};
use crate::var::IntVar;

/// `result == table[index + offset]`.
#[derive(Debug, Clone)]
pub struct Element {
    table: Vec<i64>,
    index: IntVar,
    offset: i64,
    result: IntVar,
}

impl Element {
    pub fn new(table: &[i64], index: IntVar, offset: i64, result: IntVar) -> Self {
        Self {
            table: table.to_vec(),
            index,
            offset,
            result,
        }
    }

    fn entry(&self, i: i64) -> Option<i64> {
        let k = i + self.offset;
        if k < 0 {
            return None;
        }
        self.table.get(k as usize).copied()
    }
}

impl Propagator for Element {
    fn name(&self) -> &'static str {
        "element"
    }

    fn variables(&self) -> Vec<IntVar> {
        vec![self.index, self.result]
    }

    fn propagate(&self, store: &mut DomainStore) -> PropagationResult {
        let results = store.to_set(self.result);
        store.retain(self.index, |i| {
            self.entry(i).is_some_and(|r| results.contains(r))
        })?;
        let reachable: ValueSet = store
            .values(self.index)
            .filter_map(|i| self.entry(i))
            .collect();
        store.restrict_to(self.result, &reachable)?;
        Ok(())
    }
}
