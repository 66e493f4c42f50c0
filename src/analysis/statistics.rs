//! Summary statistics over a board's distance field

use std::fmt;

use crate::algorithm::board::Board;

/// Counts and cost distribution of a field at one point in time
#[derive(Debug, Clone, PartialEq)]
pub struct FieldStatistics {
    /// Total number of cells
    pub cells: usize,
    /// Cells with cost 0
    pub exits: usize,
    /// Blocked cells
    pub obstacles: usize,
    /// Open cells with a route to some exit (exits included)
    pub reachable: usize,
    /// Open cells with no route to any exit
    pub unreachable: usize,
    /// Largest defined cost, `None` if no cell is reachable
    pub max_cost: Option<u32>,
    /// Mean cost over reachable cells, `None` if no cell is reachable
    pub mean_cost: Option<f64>,
    /// `histogram[c]` is the number of cells at cost `c`
    pub histogram: Vec<usize>,
}

impl FieldStatistics {
    /// Gather statistics from the current field
    pub fn collect(board: &Board) -> Self {
        let costs = board.costs();
        let obstacles = board.grid().obstacles().count();
        let mut histogram: Vec<usize> = Vec::new();
        let mut total: u64 = 0;

        for cost in costs.iter().flatten() {
            let bucket = *cost as usize;
            if histogram.len() <= bucket {
                histogram.resize(bucket + 1, 0);
            }
            if let Some(count) = histogram.get_mut(bucket) {
                *count += 1;
            }
            total += u64::from(*cost);
        }

        let reachable: usize = histogram.iter().sum();
        let cells = costs.len();
        let max_cost = histogram.len().checked_sub(1).map(|c| c as u32);
        let mean_cost = (reachable > 0).then(|| total as f64 / reachable as f64);

        Self {
            cells,
            exits: histogram.first().copied().unwrap_or(0),
            obstacles,
            reachable,
            unreachable: cells - reachable - obstacles,
            max_cost,
            mean_cost,
            histogram,
        }
    }

    /// Fraction of open cells that can reach an exit
    pub fn coverage(&self) -> f64 {
        let open = self.cells - self.obstacles;
        if open == 0 {
            0.0
        } else {
            self.reachable as f64 / open as f64
        }
    }
}

impl fmt::Display for FieldStatistics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} cells: {} exits, {} obstacles, {} reachable, {} unreachable",
            self.cells, self.exits, self.obstacles, self.reachable, self.unreachable
        )?;
        if let (Some(max), Some(mean)) = (self.max_cost, self.mean_cost) {
            write!(f, "; max cost {max}, mean cost {mean:.2}")?;
        }
        Ok(())
    }
}
