//! Orphan discovery after a cell loses or worsens its route to an exit
//!
//! A live neighbor is orphaned by a changed cell when its cost was exactly
//! one more than the changed cell's old cost and none of its remaining live
//! neighbors can still offer that cost. Discovery expands breadth-first from
//! the changed cell, clearing every orphan's cost as it goes.

use crate::algorithm::bitset::CellBitset;
use crate::spatial::{CostGrid, Position};

/// Live neighbors of `changed` orphaned by it losing `old_cost`
///
/// The caller must already have invalidated `changed` (cleared or blocked
/// it); otherwise its stale cost would still vouch for its dependents.
pub fn orphans_of(grid: &CostGrid, changed: Position, old_cost: u32) -> Vec<Position> {
    let dependent_cost = old_cost.saturating_add(1);

    grid.neighbors(changed)
        .filter(|&neighbor| {
            grid.cost_at(neighbor) == Some(dependent_cost)
                && grid
                    .best_neighbor_cost(neighbor)
                    .is_none_or(|alternative| alternative > dependent_cost)
        })
        .collect()
}

/// Find and clear every cell transitively orphaned by `changed`
///
/// Returns the orphans in discovery order, each with its cost cleared.
/// `changed` itself is not included.
pub fn find_orphans(grid: &mut CostGrid, changed: Position, old_cost: u32) -> Vec<Position> {
    let mut seen = CellBitset::new(grid.cell_count());
    let mut orphans = Vec::new();
    for orphan in orphans_of(grid, changed, old_cost) {
        if seen.insert(grid.index(orphan)) {
            orphans.push(orphan);
        }
    }

    let mut next = 0;
    while let Some(&orphan) = orphans.get(next) {
        next += 1;

        let Some(previous) = grid.write_cost(orphan, None) else {
            continue;
        };
        for dependent in orphans_of(grid, orphan, previous) {
            if seen.insert(grid.index(dependent)) {
                orphans.push(dependent);
            }
        }
    }

    log::trace!(
        "({}, {}) at cost {old_cost} orphaned {} cells",
        changed[0],
        changed[1],
        orphans.len()
    );
    orphans
}
