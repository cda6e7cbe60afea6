//! Variable handles.
//!
//! Handles are plain indices into the domain store of the model that
//! created them. Using a handle with another model is a logic error.

use std::ops::Not;

/// Handle to a finite-domain integer variable.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct IntVar(pub(crate) u32);

impl IntVar {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Handle to a 0/1 variable.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BoolVar(pub(crate) IntVar);

impl BoolVar {
    pub fn as_int(self) -> IntVar {
        self.0
    }

    pub fn lit(self) -> Literal {
        Literal::positive(self)
    }
}

impl From<BoolVar> for IntVar {
    fn from(b: BoolVar) -> Self {
        b.0
    }
}

impl Not for BoolVar {
    type Output = Literal;

    fn not(self) -> Literal {
        Literal::negative(self)
    }
}

/// A boolean variable or its negation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Literal {
    var: BoolVar,
    positive: bool,
}

impl Literal {
    pub fn positive(var: BoolVar) -> Self {
        Self {
            var,
            positive: true,
        }
    }

    pub fn negative(var: BoolVar) -> Self {
        Self {
            var,
            positive: false,
        }
    }

    pub fn var(self) -> BoolVar {
        self.var
    }

    pub fn is_positive(self) -> bool {
        self.positive
    }

    /// The value the underlying variable takes when this literal holds.
    pub(crate) fn true_value(self) -> i64 {
        i64::from(self.positive)
    }
}

impl From<BoolVar> for Literal {
    fn from(var: BoolVar) -> Self {
        Literal::positive(var)
    }
}

impl Not for Literal {
    type Output = Literal;

    fn not(self) -> Literal {
        Literal {
            var: self.var,
            positive: !self.positive,
        }
    }
}
