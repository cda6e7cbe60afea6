//! Sorted value sets used to describe explicit domains.

/// An immutable, sorted, duplicate-free set of integers.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct ValueSet {
    values: Vec<i64>,
}

impl ValueSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// All integers in `lo..=hi`.
    pub fn range(lo: i64, hi: i64) -> Self {
        Self {
            values: (lo..=hi).collect(),
        }
    }

    pub fn singleton(value: i64) -> Self {
        Self {
            values: vec![value],
        }
    }

    pub fn contains(&self, value: i64) -> bool {
        self.values.binary_search(&value).is_ok()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn min(&self) -> Option<i64> {
        self.values.first().copied()
    }

    pub fn max(&self) -> Option<i64> {
        self.values.last().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = i64> + '_ {
        self.values.iter().copied()
    }

    pub fn as_slice(&self) -> &[i64] {
        &self.values
    }

    pub fn union(&self, other: &ValueSet) -> ValueSet {
        self.iter().chain(other.iter()).collect()
    }

    pub fn intersection(&self, other: &ValueSet) -> ValueSet {
        self.iter().filter(|&v| other.contains(v)).collect()
    }

    pub fn difference(&self, other: &ValueSet) -> ValueSet {
        self.iter().filter(|&v| !other.contains(v)).collect()
    }
}

impl FromIterator<i64> for ValueSet {
    fn from_iter<I: IntoIterator<Item = i64>>(iter: I) -> Self {
        let mut values: Vec<i64> = iter.into_iter().collect();
        values.sort_unstable();
        values.dedup();
        Self { values }
    }
}

impl<'a> IntoIterator for &'a ValueSet {
    type Item = i64;
    type IntoIter = std::iter::Copied<std::slice::Iter<'a, i64>>;

    fn into_iter(self) -> Self::IntoIter {
        self.values.iter().copied()
    }
}
