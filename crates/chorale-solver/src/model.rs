//! Model construction.
//!
//! A [`Model`] collects variables, constraints, a branching order and an
//! optional lexicographic objective. Unary restrictions are applied to the
//! domains immediately; everything else is posted as a propagator and first
//! run at the root of the search.
//!
//! Posting never returns an error. A constraint that empties a domain marks
//! the model failed, and searching a failed model yields no solution.

use tracing::trace;

use crate::domain::{DomainStore, ValueSet};
use crate::engine::{fixpoint, watchers};
use crate::propagator::{
    Clause, Count, Element, Linear, Modulo, NValues, Propagator, ReifiedEq, ReifiedIn, Rel,
};
use crate::var::{BoolVar, IntVar, Literal};

/// A branching variable with an optional value hint.
///
/// With nearest-value selection the search first tries the value closest
/// to the hint's value, when the hint is already fixed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BranchVar {
    pub var: IntVar,
    pub hint: Option<IntVar>,
}

/// A constraint model under construction.
///
/// # Examples
///
/// ```
/// use chorale_solver::{Model, Rel};
///
/// let mut model = Model::new();
/// let x = model.int_var(0, 10);
/// let y = model.int_var(0, 10);
/// model.linear(&[(1, x), (1, y)], Rel::Eq, 4);
/// model.linear(&[(1, x)], Rel::Ge, 3);
///
/// assert!(model.propagate());
/// assert_eq!(model.max(y), 1);
/// ```
#[derive(Debug, Default)]
pub struct Model {
    pub(crate) store: DomainStore,
    pub(crate) propagators: Vec<Box<dyn Propagator>>,
    pub(crate) branching: Vec<BranchVar>,
    pub(crate) objective: Vec<IntVar>,
    constants: Option<(BoolVar, BoolVar)>,
    failed: bool,
}

impl Model {
    pub fn new() -> Self {
        Self {
            store: DomainStore::new(),
            ..Self::default()
        }
    }

    /// True once some constraint is known to be unsatisfiable.
    pub fn is_failed(&self) -> bool {
        self.failed
    }

    pub fn var_count(&self) -> usize {
        self.store.var_count()
    }

    pub fn propagator_count(&self) -> usize {
        self.propagators.len()
    }

    pub fn objective(&self) -> &[IntVar] {
        &self.objective
    }

    // ---- variables --------------------------------------------------------

    /// A variable with domain `lo..=hi`. An empty range fails the model.
    pub fn int_var(&mut self, lo: i64, hi: i64) -> IntVar {
        if lo > hi {
            self.failed = true;
            return self.store.add_range(lo, lo);
        }
        self.store.add_range(lo, hi)
    }

    /// A variable with an explicit domain. An empty set fails the model.
    pub fn int_var_in(&mut self, values: &ValueSet) -> IntVar {
        if values.is_empty() {
            self.failed = true;
            return self.store.add_range(0, 0);
        }
        self.store.add_var(values)
    }

    pub fn bool_var(&mut self) -> BoolVar {
        BoolVar(self.store.add_range(0, 1))
    }

    pub fn constant(&mut self, value: i64) -> IntVar {
        self.store.add_range(value, value)
    }

    pub fn constant_bool(&mut self, value: bool) -> BoolVar {
        let (t, f) = match self.constants {
            Some(pair) => pair,
            None => {
                let t = BoolVar(self.store.add_range(1, 1));
                let f = BoolVar(self.store.add_range(0, 0));
                self.constants = Some((t, f));
                (t, f)
            }
        };
        if value {
            t
        } else {
            f
        }
    }

    // ---- domain queries (current, pre-search) -------------------------------

    pub fn min(&self, var: IntVar) -> i64 {
        self.store.min(var)
    }

    pub fn max(&self, var: IntVar) -> i64 {
        self.store.max(var)
    }

    pub fn domain(&self, var: IntVar) -> ValueSet {
        self.store.to_set(var)
    }

    pub fn value(&self, var: IntVar) -> Option<i64> {
        self.store.value(var)
    }

    // ---- unary restrictions -----------------------------------------------

    pub fn restrict(&mut self, var: IntVar, values: &ValueSet) {
        if self.store.restrict_to(var, values).is_err() {
            self.fail("restrict");
        }
    }

    pub fn restrict_range(&mut self, var: IntVar, lo: i64, hi: i64) {
        if self.store.set_min(var, lo).is_err() || self.store.set_max(var, hi).is_err() {
            self.fail("restrict_range");
        }
    }

    pub fn exclude(&mut self, var: IntVar, values: &ValueSet) {
        if self.store.exclude(var, values).is_err() {
            self.fail("exclude");
        }
    }

    // ---- constraints ------------------------------------------------------

    /// Posts a propagator.
    pub fn post(&mut self, propagator: impl Propagator + 'static) {
        self.propagators.push(Box::new(propagator));
    }

    /// `sum(a_i * x_i) rel rhs`.
    pub fn linear(&mut self, terms: &[(i64, IntVar)], rel: Rel, rhs: i64) {
        self.post(Linear::new(terms, rel, rhs));
    }

    /// A fresh variable equal to `sum(a_i * x_i)`.
    pub fn sum_var(&mut self, terms: &[(i64, IntVar)]) -> IntVar {
        let (mut lo, mut hi) = (0, 0);
        for &(a, x) in terms {
            let (p, q) = (a * self.min(x), a * self.max(x));
            lo += p.min(q);
            hi += p.max(q);
        }
        let total = self.int_var(lo, hi);
        let mut all = terms.to_vec();
        all.push((-1, total));
        self.linear(&all, Rel::Eq, 0);
        total
    }

    /// A fresh variable equal to `x - y`.
    pub fn difference(&mut self, x: IntVar, y: IntVar) -> IntVar {
        self.sum_var(&[(1, x), (-1, y)])
    }

    pub fn count(&mut self, vars: &[IntVar], values: &ValueSet, n: IntVar) {
        self.post(Count::new(vars, values.clone(), n));
    }

    /// A fresh variable counting the `vars` that take a value in `values`.
    pub fn count_var(&mut self, vars: &[IntVar], values: &ValueSet) -> IntVar {
        let n = self.int_var(0, vars.len() as i64);
        self.count(vars, values, n);
        n
    }

    pub fn n_values(&mut self, vars: &[IntVar], n: IntVar) {
        self.post(NValues::new(vars, n));
    }

    /// A fresh variable counting the distinct values of `vars`.
    pub fn n_values_var(&mut self, vars: &[IntVar]) -> IntVar {
        let n = self.int_var(0, vars.len() as i64);
        self.n_values(vars, n);
        n
    }

    /// `y == x mod m`.
    pub fn modulo(&mut self, x: IntVar, m: i64, y: IntVar) {
        self.post(Modulo::new(x, m, y));
    }

    /// A fresh variable equal to `x mod m`.
    pub fn modulo_var(&mut self, x: IntVar, m: i64) -> IntVar {
        let y = self.int_var(0, m - 1);
        self.modulo(x, m, y);
        y
    }

    /// `result == table[index + offset]`.
    pub fn element(&mut self, table: &[i64], index: IntVar, offset: i64, result: IntVar) {
        self.post(Element::new(table, index, offset, result));
    }

    /// A fresh variable equal to `table[index + offset]`.
    pub fn element_var(&mut self, table: &[i64], index: IntVar, offset: i64) -> IntVar {
        let values: ValueSet = table.iter().copied().collect();
        let result = self.int_var_in(&values);
        self.element(table, index, offset, result);
        result
    }

    // ---- reification ------------------------------------------------------

    /// A boolean equivalent to `x in values`.
    pub fn reify_in(&mut self, x: IntVar, values: &ValueSet) -> BoolVar {
        if self.store.is_subset_of(x, values) {
            return self.constant_bool(true);
        }
        if self.store.is_disjoint_from(x, values) {
            return self.constant_bool(false);
        }
        let b = self.bool_var();
        self.post(ReifiedIn::new(x, values.clone(), b));
        b
    }

    /// A boolean equivalent to `x == y`.
    pub fn reify_eq(&mut self, x: IntVar, y: IntVar) -> BoolVar {
        if let (Some(a), Some(c)) = (self.value(x), self.value(y)) {
            return self.constant_bool(a == c);
        }
        let ys = self.domain(y);
        if self.store.is_disjoint_from(x, &ys) {
            return self.constant_bool(false);
        }
        let b = self.bool_var();
        self.post(ReifiedEq::new(x, y, b));
        b
    }

    // ---- boolean algebra --------------------------------------------------

    fn literal_value(&self, lit: Literal) -> Option<bool> {
        self.store
            .value(lit.var().as_int())
            .map(|v| v == lit.true_value())
    }

    /// At least one of `literals` holds.
    pub fn clause(&mut self, literals: &[Literal]) {
        if literals
            .iter()
            .any(|&l| self.literal_value(l) == Some(true))
        {
            return;
        }
        let open: Vec<Literal> = literals
            .iter()
            .copied()
            .filter(|&l| self.literal_value(l).is_none())
            .collect();
        match open.as_slice() {
            [] => self.fail("clause"),
            [single] => {
                let (var, value) = (single.var().as_int(), single.true_value());
                if self.store.assign(var, value).is_err() {
                    self.fail("clause");
                }
            }
            _ => self.post(Clause::new(&open)),
        }
    }

    /// Forces a literal to hold.
    pub fn require(&mut self, lit: impl Into<Literal>) {
        self.clause(&[lit.into()]);
    }

    /// `a -> b`.
    pub fn imply(&mut self, a: impl Into<Literal>, b: impl Into<Literal>) {
        let (a, b) = (a.into(), b.into());
        self.clause(&[!a, b]);
    }

    /// `a <-> b`.
    pub fn equiv(&mut self, a: impl Into<Literal>, b: impl Into<Literal>) {
        let (a, b) = (a.into(), b.into());
        self.clause(&[!a, b]);
        self.clause(&[a, !b]);
    }

    /// A boolean equivalent to the conjunction of `literals`.
    pub fn and(&mut self, literals: &[Literal]) -> BoolVar {
        match literals {
            [] => return self.constant_bool(true),
            [single] if single.is_positive() => return single.var(),
            _ => {}
        }
        let r = self.bool_var();
        let mut back = vec![r.lit()];
        for &l in literals {
            self.clause(&[!r, l]);
            back.push(!l);
        }
        self.clause(&back);
        r
    }

    /// A boolean equivalent to the disjunction of `literals`.
    pub fn or(&mut self, literals: &[Literal]) -> BoolVar {
        match literals {
            [] => return self.constant_bool(false),
            [single] if single.is_positive() => return single.var(),
            _ => {}
        }
        let r = self.bool_var();
        let mut forward = vec![!r];
        for &l in literals {
            self.clause(&[r.lit(), !l]);
            forward.push(l);
        }
        self.clause(&forward);
        r
    }

    // ---- search setup -----------------------------------------------------

    /// Appends `var` to the branching order.
    pub fn branch_on(&mut self, var: IntVar, hint: Option<IntVar>) {
        self.branching.push(BranchVar { var, hint });
    }

    /// Registers the objective, highest priority first. Solutions are
    /// compared lexicographically, lower is better.
    pub fn minimize_lex(&mut self, objective: Vec<IntVar>) {
        self.objective = objective;
    }

    /// Propagates the posted constraints to a fixpoint on the model's own
    /// domains. Returns false if the model is unsatisfiable.
    pub fn propagate(&mut self) -> bool {
        if self.failed {
            return false;
        }
        let watchers = watchers(&self.propagators, self.store.var_count());
        let mut count = 0;
        if fixpoint(
            &self.propagators,
            &watchers,
            &mut self.store,
            true,
            None,
            &mut count,
        )
        .is_err()
        {
            self.fail("propagate");
        }
        !self.failed
    }

    fn fail(&mut self, origin: &'static str) {
        if !self.failed {
            trace!(event = "model_failed", origin);
        }
        self.failed = true;
    }
}
