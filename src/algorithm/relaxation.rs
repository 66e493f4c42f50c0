//! Forward relaxation: breadth-first spreading of cost decreases
//!
//! Used after a cell's cost has just dropped (a new exit, or an obstacle
//! that went away). Unit edge weights make FIFO order sufficient: a neighbor
//! is only touched when the popped cell offers it a strictly better route.

use std::collections::VecDeque;

use crate::spatial::{CostGrid, Position};

/// Spread an improvement outward from `seed`
///
/// Returns the number of cells whose cost was lowered or first established,
/// not counting the seed itself. A seed without a defined cost has nothing
/// to offer and leaves the grid untouched.
pub fn relax_from(grid: &mut CostGrid, seed: Position) -> usize {
    let mut queue = VecDeque::from([seed]);
    let mut nbuf = Vec::with_capacity(4);
    let mut improved = 0;

    while let Some(current) = queue.pop_front() {
        let Some(cost) = grid.cost_at(current) else {
            continue;
        };
        let offer = cost.saturating_add(1);

        nbuf.clear();
        nbuf.extend(grid.neighbors(current));
        for &neighbor in &nbuf {
            if grid.cost_at(neighbor).is_none_or(|existing| existing > offer) {
                grid.write_cost(neighbor, Some(offer));
                queue.push_back(neighbor);
                improved += 1;
            }
        }
    }

    log::trace!(
        "relaxation from ({}, {}) improved {improved} cells",
        seed[0],
        seed[1]
    );
    improved
}
