//! Reconvergence of orphaned cells onto their true costs
//!
//! A Dijkstra-style settlement restricted to the orphan set. Every orphan is
//! keyed by the cost its live neighbors currently offer; the cheapest is
//! committed first and its still-pending neighbors are re-keyed. Decrease-key
//! is done lazily: a re-key pushes a fresh heap entry and outdated entries
//! are skipped when popped.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use crate::algorithm::bitset::CellBitset;
use crate::spatial::{CostGrid, Position};

/// Heap entry for a pending orphan
///
/// Ordered so that `BinaryHeap` pops the lowest tentative cost first, with
/// unreachable (`None`) entries last and ties broken by flat index.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct PendingCell {
    tentative: Option<u32>,
    index: usize,
}

impl PendingCell {
    const fn rank(&self) -> (u32, usize) {
        match self.tentative {
            Some(cost) => (cost, self.index),
            None => (u32::MAX, self.index),
        }
    }
}

impl Ord for PendingCell {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse ordering for min-heap (BinaryHeap is max-heap by default)
        other
            .rank()
            .cmp(&self.rank())
            .then_with(|| other.tentative.is_none().cmp(&self.tentative.is_none()))
    }
}

impl PartialOrd for PendingCell {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Outcome of a reconvergence pass
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Reconvergence {
    /// Orphans that settled on a defined cost
    pub reconnected: usize,
    /// Orphans left without any route to an exit
    pub stranded: usize,
}

/// Settle every orphan on its shortest cost, cheapest first
///
/// All orphans are expected to hold no cost on entry. Duplicates and
/// blocked cells in `orphans` are ignored.
pub fn reconverge(grid: &mut CostGrid, orphans: &[Position]) -> Reconvergence {
    let mut pending = CellBitset::new(grid.cell_count());
    let mut heap = BinaryHeap::with_capacity(orphans.len());

    for &orphan in orphans {
        if grid.blocked_at(orphan) || !pending.insert(grid.index(orphan)) {
            continue;
        }
        heap.push(PendingCell {
            tentative: grid.best_neighbor_cost(orphan),
            index: grid.index(orphan),
        });
    }

    let mut outcome = Reconvergence::default();
    let mut nbuf = Vec::with_capacity(4);

    while let Some(entry) = heap.pop() {
        if !pending.contains(entry.index) {
            continue;
        }
        let cell = grid.position(entry.index);
        let tentative = grid.best_neighbor_cost(cell);
        if tentative != entry.tentative {
            // A fresher entry for this cell is already queued
            continue;
        }

        pending.remove(entry.index);
        grid.write_cost(cell, tentative);
        if tentative.is_some() {
            outcome.reconnected += 1;
        } else {
            outcome.stranded += 1;
        }

        nbuf.clear();
        nbuf.extend(grid.neighbors(cell));
        for &neighbor in &nbuf {
            let index = grid.index(neighbor);
            if pending.contains(index) {
                heap.push(PendingCell {
                    tentative: grid.best_neighbor_cost(neighbor),
                    index,
                });
            }
        }
    }

    log::trace!(
        "reconverged {} orphans ({} reconnected, {} stranded)",
        outcome.reconnected + outcome.stranded,
        outcome.reconnected,
        outcome.stranded
    );
    outcome
}
