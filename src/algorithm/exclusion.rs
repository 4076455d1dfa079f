use bitvec::prelude::*;
use std::fmt;

/// Fixed-size bitset of candidate indices that must not be selected
///
/// Indices are 0-based positions in the candidate pool. Indices beyond the
/// capacity are ignored on insert and never reported as contained.
#[derive(Clone, Debug)]
pub struct ExclusionSet {
    bits: BitVec,
}

impl ExclusionSet {
    /// Create a set with room for `capacity` candidates and nothing excluded
    pub fn new(capacity: usize) -> Self {
        Self {
            bits: bitvec![0; capacity],
        }
    }

    /// Create a set from a list of indices
    pub fn from_indices(capacity: usize, indices: &[usize]) -> Self {
        let mut set = Self::new(capacity);
        for &index in indices {
            set.insert(index);
        }
        set
    }

    /// Exclude a candidate
    pub fn insert(&mut self, index: usize) {
        if index < self.bits.len() {
            self.bits.set(index, true);
        }
    }

    /// Test whether a candidate is excluded
    pub fn contains(&self, index: usize) -> bool {
        self.bits.get(index).as_deref() == Some(&true)
    }

    /// Remove every exclusion
    pub fn clear(&mut self) {
        self.bits.fill(false);
    }

    /// Test if nothing is excluded
    pub fn is_empty(&self) -> bool {
        self.bits.not_any()
    }

    /// Number of excluded candidates
    pub fn count(&self) -> usize {
        self.bits.count_ones()
    }

    /// Excluded indices in ascending order
    pub fn to_vec(&self) -> Vec<usize> {
        self.bits.iter_ones().collect()
    }
}

impl fmt::Display for ExclusionSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ExclusionSet({} excluded: {:?})", self.count(), self.to_vec())
    }
}
