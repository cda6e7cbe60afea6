//! Bitset domain store.

use std::sync::Arc;

use super::{DomainResult, Failure, ValueSet};
use crate::var::IntVar;

#[derive(Clone, Copy, Debug)]
struct Slot {
    offset: i64,
    start: usize,
    words: usize,
}

/// Domains of all variables of one search node.
///
/// The slot layout is shared between clones; only the bits are copied.
#[derive(Clone, Debug, Default)]
pub struct DomainStore {
    slots: Arc<Vec<Slot>>,
    bits: Vec<u64>,
    modified: Vec<u32>,
}

impl DomainStore {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Adds a variable with the given non-empty domain.
    pub(crate) fn add_var(&mut self, values: &ValueSet) -> IntVar {
        debug_assert!(!values.is_empty(), "domain must not be empty");
        let lo = values.min().unwrap_or(0);
        let hi = values.max().unwrap_or(0);
        let words = ((hi - lo) as usize) / 64 + 1;
        let start = self.bits.len();
        self.bits.resize(start + words, 0);
        for v in values {
            let k = (v - lo) as usize;
            self.bits[start + k / 64] |= 1u64 << (k % 64);
        }
        let slots = Arc::make_mut(&mut self.slots);
        slots.push(Slot {
            offset: lo,
            start,
            words,
        });
        IntVar((slots.len() - 1) as u32)
    }

    /// Adds a variable with domain `lo..=hi`, `lo <= hi`.
    pub(crate) fn add_range(&mut self, lo: i64, hi: i64) -> IntVar {
        debug_assert!(lo <= hi, "empty range {lo}..={hi}");
        let width = (hi - lo) as usize + 1;
        let words = (width - 1) / 64 + 1;
        let start = self.bits.len();
        self.bits.resize(start + words, u64::MAX);
        let tail = width % 64;
        if tail != 0 {
            self.bits[start + words - 1] = (1u64 << tail) - 1;
        }
        let slots = Arc::make_mut(&mut self.slots);
        slots.push(Slot {
            offset: lo,
            start,
            words,
        });
        IntVar((slots.len() - 1) as u32)
    }

    pub fn var_count(&self) -> usize {
        self.slots.len()
    }

    fn slot(&self, var: IntVar) -> Slot {
        self.slots[var.index()]
    }

    fn words(&self, var: IntVar) -> &[u64] {
        let slot = self.slot(var);
        &self.bits[slot.start..slot.start + slot.words]
    }

    pub fn min(&self, var: IntVar) -> i64 {
        let slot = self.slot(var);
        for (i, &w) in self.words(var).iter().enumerate() {
            if w != 0 {
                return slot.offset + (i * 64) as i64 + i64::from(w.trailing_zeros());
            }
        }
        slot.offset
    }

    pub fn max(&self, var: IntVar) -> i64 {
        let slot = self.slot(var);
        for (i, &w) in self.words(var).iter().enumerate().rev() {
            if w != 0 {
                return slot.offset + (i * 64) as i64 + 63 - i64::from(w.leading_zeros());
            }
        }
        slot.offset
    }

    pub fn size(&self, var: IntVar) -> u64 {
        self.words(var)
            .iter()
            .map(|w| u64::from(w.count_ones()))
            .sum()
    }

    pub fn is_fixed(&self, var: IntVar) -> bool {
        self.size(var) == 1
    }

    pub fn value(&self, var: IntVar) -> Option<i64> {
        if self.is_fixed(var) {
            Some(self.min(var))
        } else {
            None
        }
    }

    pub fn contains(&self, var: IntVar, value: i64) -> bool {
        let slot = self.slot(var);
        let k = value - slot.offset;
        if k < 0 || k as usize >= slot.words * 64 {
            return false;
        }
        let k = k as usize;
        self.bits[slot.start + k / 64] & (1u64 << (k % 64)) != 0
    }

    /// Iterates the values of a domain in increasing order.
    pub fn values(&self, var: IntVar) -> Values<'_> {
        let slot = self.slot(var);
        let words = self.words(var);
        Values {
            words,
            offset: slot.offset,
            index: 0,
            current: words.first().copied().unwrap_or(0),
        }
    }

    pub fn to_set(&self, var: IntVar) -> ValueSet {
        self.values(var).collect()
    }

    /// True when the domain of `var` is a subset of `set`.
    pub fn is_subset_of(&self, var: IntVar, set: &ValueSet) -> bool {
        self.values(var).all(|v| set.contains(v))
    }

    /// True when the domain of `var` shares no value with `set`.
    pub fn is_disjoint_from(&self, var: IntVar, set: &ValueSet) -> bool {
        !self.values(var).any(|v| set.contains(v))
    }

    /// Keeps only the values accepted by `keep`.
    pub fn retain(&mut self, var: IntVar, mut keep: impl FnMut(i64) -> bool) -> DomainResult {
        let slot = self.slot(var);
        let mut changed = false;
        let mut empty = true;
        for i in 0..slot.words {
            let old = self.bits[slot.start + i];
            let mut rest = old;
            let mut kept = old;
            while rest != 0 {
                let tz = rest.trailing_zeros();
                rest &= rest - 1;
                let v = slot.offset + (i * 64) as i64 + i64::from(tz);
                if !keep(v) {
                    kept &= !(1u64 << tz);
                }
            }
            if kept != old {
                changed = true;
                self.bits[slot.start + i] = kept;
            }
            if kept != 0 {
                empty = false;
            }
        }
        if empty {
            return Err(Failure);
        }
        if changed {
            self.modified.push(var.0);
        }
        Ok(changed)
    }

    pub fn restrict_to(&mut self, var: IntVar, set: &ValueSet) -> DomainResult {
        self.retain(var, |v| set.contains(v))
    }

    pub fn exclude(&mut self, var: IntVar, set: &ValueSet) -> DomainResult {
        self.retain(var, |v| !set.contains(v))
    }

    pub fn set_min(&mut self, var: IntVar, lo: i64) -> DomainResult {
        if lo <= self.min(var) {
            return Ok(false);
        }
        self.retain(var, |v| v >= lo)
    }

    pub fn set_max(&mut self, var: IntVar, hi: i64) -> DomainResult {
        if hi >= self.max(var) {
            return Ok(false);
        }
        self.retain(var, |v| v <= hi)
    }

    pub fn assign(&mut self, var: IntVar, value: i64) -> DomainResult {
        if !self.contains(var, value) {
            return Err(Failure);
        }
        if self.is_fixed(var) {
            return Ok(false);
        }
        self.retain(var, |v| v == value)
    }

    pub fn remove(&mut self, var: IntVar, value: i64) -> DomainResult {
        if !self.contains(var, value) {
            return Ok(false);
        }
        self.retain(var, |v| v != value)
    }

    pub(crate) fn has_modified(&self) -> bool {
        !self.modified.is_empty()
    }

    pub(crate) fn drain_modified(&mut self, out: &mut Vec<u32>) {
        out.append(&mut self.modified);
    }

    pub(crate) fn clear_modified(&mut self) {
        self.modified.clear();
    }
}

/// Iterator over the values of one domain.
#[derive(Debug)]
pub struct Values<'a> {
    words: &'a [u64],
    offset: i64,
    index: usize,
    current: u64,
}

impl Iterator for Values<'_> {
    type Item = i64;

    fn next(&mut self) -> Option<i64> {
        while self.current == 0 {
            self.index += 1;
            if self.index >= self.words.len() {
                return None;
            }
            self.current = self.words[self.index];
        }
        let tz = self.current.trailing_zeros();
        self.current &= self.current - 1;
        Some(self.offset + (self.index * 64) as i64 + i64::from(tz))
    }
}
