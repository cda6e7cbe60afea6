//! CostVector - lexicographically ordered preference counters
//!
//! A harmonization is ranked by an ordered list of integer counters where
//! the first level dominates all later ones. Lower is better on every level.

use std::cmp::Ordering;
use std::fmt;
use std::ops::{Add, Neg, Sub};
use std::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// An ordered vector of cost levels compared lexicographically.
///
/// # Examples
///
/// ```
/// use chorale_core::CostVector;
///
/// let a = CostVector::of(vec![0, 1, 40]);
/// let b = CostVector::of(vec![0, 2, 3]);
///
/// // Level 1 decides before level 2 is consulted.
/// assert!(a < b);
/// assert_eq!(a.to_string(), "[0/1/40]");
/// ```
#[derive(Clone, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CostVector {
    levels: Vec<i64>,
}

impl CostVector {
    /// Creates a cost vector from its levels, highest priority first.
    pub fn of(levels: Vec<i64>) -> Self {
        CostVector { levels }
    }

    /// Creates an all-zero vector with the given number of levels.
    pub fn zero_with_levels(levels: usize) -> Self {
        CostVector {
            levels: vec![0; levels],
        }
    }

    pub fn levels_count(&self) -> usize {
        self.levels.len()
    }

    /// Returns the cost at the given level.
    ///
    /// # Panics
    /// Panics if the level is out of bounds.
    pub fn level(&self, level: usize) -> i64 {
        self.levels[level]
    }

    pub fn levels(&self) -> &[i64] {
        &self.levels
    }

    pub fn into_levels(self) -> Vec<i64> {
        self.levels
    }

    /// Returns the per-level upper bounds admitted by a relative margin.
    ///
    /// Each level `c` is relaxed to `c + ceil(|c| * margin)`, so a zero
    /// level stays zero and a negative reward can only shrink toward zero.
    ///
    /// ```
    /// use chorale_core::CostVector;
    ///
    /// let best = CostVector::of(vec![0, 10, -8]);
    /// assert_eq!(best.relaxed(0.25).levels(), &[0, 13, -6]);
    /// ```
    pub fn relaxed(&self, margin: f64) -> Self {
        let margin = margin.max(0.0);
        CostVector {
            levels: self
                .levels
                .iter()
                .map(|&c| c + ((c.abs() as f64) * margin).ceil() as i64)
                .collect(),
        }
    }

    /// Returns true when every level is at most the matching level of `bound`.
    pub fn is_within(&self, bound: &CostVector) -> bool {
        self.ensure_compatible(bound);
        self.levels.iter().zip(&bound.levels).all(|(a, b)| a <= b)
    }

    fn ensure_compatible(&self, other: &Self) {
        assert_eq!(
            self.levels.len(),
            other.levels.len(),
            "Incompatible cost levels: {} vs {}",
            self.levels.len(),
            other.levels.len()
        );
    }
}

impl Ord for CostVector {
    fn cmp(&self, other: &Self) -> Ordering {
        self.ensure_compatible(other);

        for (a, b) in self.levels.iter().zip(other.levels.iter()) {
            match a.cmp(b) {
                Ordering::Equal => continue,
                other => return other,
            }
        }
        Ordering::Equal
    }
}

impl PartialOrd for CostVector {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Add for CostVector {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        self.ensure_compatible(&other);
        CostVector {
            levels: self
                .levels
                .iter()
                .zip(other.levels.iter())
                .map(|(a, b)| a + b)
                .collect(),
        }
    }
}

impl Sub for CostVector {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        self.ensure_compatible(&other);
        CostVector {
            levels: self
                .levels
                .iter()
                .zip(other.levels.iter())
                .map(|(a, b)| a - b)
                .collect(),
        }
    }
}

impl Neg for CostVector {
    type Output = Self;

    fn neg(self) -> Self {
        CostVector {
            levels: self.levels.iter().map(|&c| -c).collect(),
        }
    }
}

impl fmt::Debug for CostVector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CostVector({:?})", self.levels)
    }
}

impl fmt::Display for CostVector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self.levels.iter().map(|c| c.to_string()).collect();
        write!(f, "[{}]", parts.join("/"))
    }
}

/// Error when parsing a cost vector from string
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CostParseError {
    pub message: String,
}

impl fmt::Display for CostParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Cost parse error: {}", self.message)
    }
}

impl std::error::Error for CostParseError {}

impl FromStr for CostVector {
    type Err = CostParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let inner = s
            .strip_prefix('[')
            .and_then(|s| s.strip_suffix(']'))
            .ok_or_else(|| CostParseError {
                message: format!("Cost vector '{}' must be wrapped in brackets", s),
            })?;

        if inner.trim().is_empty() {
            return Ok(CostVector::of(Vec::new()));
        }

        let levels = inner
            .split('/')
            .map(|part| {
                part.trim().parse::<i64>().map_err(|e| CostParseError {
                    message: format!("Invalid cost level '{}': {}", part, e),
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(CostVector::of(levels))
    }
}
