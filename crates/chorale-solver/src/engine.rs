//! Fixpoint propagation.

use std::collections::VecDeque;

use smallvec::SmallVec;

use crate::domain::{DomainStore, Failure};
use crate::propagator::Propagator;
use crate::var::IntVar;

pub(crate) type Watchers = Vec<SmallVec<[u32; 4]>>;

/// Builds, for every variable, the list of propagators watching it.
pub(crate) fn watchers(propagators: &[Box<dyn Propagator>], var_count: usize) -> Watchers {
    let mut watchers: Watchers = vec![SmallVec::new(); var_count];
    for (p, propagator) in propagators.iter().enumerate() {
        let mut vars = propagator.variables();
        vars.sort_unstable();
        vars.dedup();
        for var in vars {
            watchers[var.index()].push(p as u32);
        }
    }
    watchers
}

/// A lexicographic upper bound on the objective: the next solution must
/// be strictly smaller than `values`.
#[derive(Debug, Clone, Copy)]
pub(crate) struct ObjectiveBound<'a> {
    pub vars: &'a [IntVar],
    pub values: &'a [i64],
}

/// Runs propagators until no domain changes.
///
/// With `full` every propagator runs once first; otherwise only those
/// watching variables modified since the last fixpoint are scheduled.
pub(crate) fn fixpoint(
    propagators: &[Box<dyn Propagator>],
    watchers: &Watchers,
    store: &mut DomainStore,
    full: bool,
    bound: Option<ObjectiveBound<'_>>,
    propagations: &mut u64,
) -> Result<(), Failure> {
    let mut queued = vec![false; propagators.len()];
    let mut queue: VecDeque<u32> = VecDeque::new();
    if full {
        queue.extend(0..propagators.len() as u32);
        queued.iter_mut().for_each(|q| *q = true);
    }
    let mut modified = Vec::new();

    let result = loop {
        store.drain_modified(&mut modified);
        for var in modified.drain(..) {
            for &p in &watchers[var as usize] {
                if !queued[p as usize] {
                    queued[p as usize] = true;
                    queue.push_back(p);
                }
            }
        }

        if let Some(p) = queue.pop_front() {
            queued[p as usize] = false;
            *propagations += 1;
            if let Err(failure) = propagators[p as usize].propagate(store) {
                break Err(failure);
            }
            continue;
        }

        if let Some(bound) = bound {
            if let Err(failure) = prune_lex_less(store, bound) {
                break Err(failure);
            }
            if store.has_modified() {
                continue;
            }
        }
        break Ok(());
    };
    store.clear_modified();
    result
}

/// Enforces `objective <lex bound`, assuming earlier levels already equal.
fn prune_lex_less(store: &mut DomainStore, bound: ObjectiveBound<'_>) -> Result<(), Failure> {
    for (&var, &b) in bound.vars.iter().zip(bound.values) {
        if store.max(var) < b {
            return Ok(());
        }
        if store.min(var) > b {
            return Err(Failure);
        }
        if !store.is_fixed(var) {
            store.set_max(var, b)?;
            return Ok(());
        }
    }
    Err(Failure)
}
