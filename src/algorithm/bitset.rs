use bitvec::prelude::*;
use std::fmt;

/// Fixed-size bitset over flat cell indices (`y * width + x`)
///
/// Backs the obstacle flags of the grid store and the membership sets used
/// while discovering and reconverging orphans. Indices past the end are
/// ignored on insert and report absent on lookup.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CellBitset {
    bits: BitVec,
}

impl CellBitset {
    /// Create a bitset with no cells present
    pub fn new(cell_count: usize) -> Self {
        Self {
            bits: bitvec![0; cell_count],
        }
    }

    /// Number of cells the set can address
    pub fn capacity(&self) -> usize {
        self.bits.len()
    }

    /// Insert a cell, returning `true` if it was not already present
    pub fn insert(&mut self, index: usize) -> bool {
        match self.bits.get_mut(index) {
            Some(mut bit) => {
                let fresh = !*bit;
                *bit = true;
                fresh
            }
            None => false,
        }
    }

    /// Remove a cell, returning `true` if it was present
    pub fn remove(&mut self, index: usize) -> bool {
        match self.bits.get_mut(index) {
            Some(mut bit) => {
                let present = *bit;
                *bit = false;
                present
            }
            None => false,
        }
    }

    /// Test cell membership
    pub fn contains(&self, index: usize) -> bool {
        self.bits.get(index).as_deref() == Some(&true)
    }

    /// Count cells in the set
    pub fn count(&self) -> usize {
        self.bits.count_ones()
    }

    /// Iterate over present cell indices in ascending order
    pub fn iter(&self) -> impl Iterator<Item = usize> + '_ {
        self.bits.iter_ones()
    }
}

impl fmt::Display for CellBitset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "CellBitset({}/{} cells: {:?})",
            self.count(),
            self.capacity(),
            self.iter().collect::<Vec<_>>()
        )
    }
}
