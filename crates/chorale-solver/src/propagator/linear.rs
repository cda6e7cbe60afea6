//! Bounds-consistent linear (in)equalities.

use smallvec::SmallVec;

use super::{PropagationResult, Propagator};
use crate::domain::{DomainStore, Failure};
use crate::var::IntVar;

/// Relation between a linear expression and its right-hand side.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rel {
    Eq,
    Le,
    Ge,
    Lt,
    Gt,
}

type Terms = SmallVec<[(i64, IntVar); 4]>;

/// `sum(a_i * x_i) (== | <=) rhs`, with `>=`, `<` and `>` normalised away.
#[derive(Debug, Clone)]
pub struct Linear {
    terms: Terms,
    rhs: i64,
    equality: bool,
}

impl Linear {
    pub fn new(terms: &[(i64, IntVar)], rel: Rel, rhs: i64) -> Self {
        let same: Terms = terms.iter().copied().collect();
        let negated: Terms = terms.iter().map(|&(a, x)| (-a, x)).collect();
        let (terms, rhs, equality) = match rel {
            Rel::Eq => (same, rhs, true),
            Rel::Le => (same, rhs, false),
            Rel::Lt => (same, rhs - 1, false),
            Rel::Ge => (negated, -rhs, false),
            Rel::Gt => (negated, -rhs - 1, false),
        };
        Self {
            terms,
            rhs,
            equality,
        }
    }
}

fn term_min(store: &DomainStore, a: i64, x: IntVar) -> i64 {
    if a >= 0 {
        a * store.min(x)
    } else {
        a * store.max(x)
    }
}

fn floor_div(n: i64, d: i64) -> i64 {
    let q = n / d;
    if n % d != 0 && ((n < 0) != (d < 0)) {
        q - 1
    } else {
        q
    }
}

fn ceil_div(n: i64, d: i64) -> i64 {
    let q = n / d;
    if n % d != 0 && ((n < 0) == (d < 0)) {
        q + 1
    } else {
        q
    }
}

/// One pass of `sum <= rhs`. Tightening a term never moves its own minimum,
/// so the pass is idempotent.
fn propagate_le(
    terms: impl Iterator<Item = (i64, IntVar)> + Clone,
    rhs: i64,
    store: &mut DomainStore,
) -> Result<bool, Failure> {
    let min_sum: i64 = terms.clone().map(|(a, x)| term_min(store, a, x)).sum();
    if min_sum > rhs {
        return Err(Failure);
    }
    let mut changed = false;
    for (a, x) in terms {
        let slack = rhs - (min_sum - term_min(store, a, x));
        if a > 0 {
            changed |= store.set_max(x, floor_div(slack, a))?;
        } else if a < 0 {
            changed |= store.set_min(x, ceil_div(slack, a))?;
        }
    }
    Ok(changed)
}

impl Propagator for Linear {
    fn name(&self) -> &'static str {
        "linear"
    }

    fn variables(&self) -> Vec<IntVar> {
        self.terms.iter().map(|&(_, x)| x).collect()
    }

    fn propagate(&self, store: &mut DomainStore) -> PropagationResult {
        if !self.equality {
            propagate_le(self.terms.iter().copied(), self.rhs, store)?;
            return Ok(());
        }
        loop {
            let upper = propagate_le(self.terms.iter().copied(), self.rhs, store)?;
            let lower = propagate_le(
                self.terms.iter().map(|&(a, x)| (-a, x)),
                -self.rhs,
                store,
            )?;
            if !upper && !lower {
                return Ok(());
            }
        }
    }
}
