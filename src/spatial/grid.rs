//! Grid store for the distance field
//!
//! Owns the per-cell cost matrix and obstacle flags. Costs live in an
//! `Array2` indexed `[y, x]`; obstacle flags live in a bitset indexed by the
//! flat cell index `y * width + x`. Every other component reads and writes
//! cells only through the methods here.

use ndarray::{Array2, ArrayView2};

use crate::algorithm::bitset::CellBitset;
use crate::io::configuration::MAX_GRID_DIMENSION;
use crate::io::error::{BoardError, Result, invalid_parameter};
use crate::spatial::Position;

/// Neighbor offsets in the fixed visiting order: left, up, right, down
const NEIGHBOR_OFFSETS: [[isize; 2]; 4] = [[-1, 0], [0, -1], [1, 0], [0, 1]];

/// Cost matrix plus obstacle flags for a fixed-size grid
///
/// A cost of `None` means no known path to an exit. Blocked cells always
/// hold `None` and never appear as live neighbors of another cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CostGrid {
    costs: Array2<Option<u32>>,
    blocked: CellBitset,
    width: usize,
    height: usize,
}

impl CostGrid {
    /// Create a grid with every cell unblocked and unreached
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameter` if either dimension is zero or exceeds
    /// `MAX_GRID_DIMENSION`
    pub fn new(width: usize, height: usize) -> Result<Self> {
        for (parameter, value) in [("width", width), ("height", height)] {
            if value == 0 {
                return Err(invalid_parameter(parameter, &value, &"must be positive"));
            }
            if value > MAX_GRID_DIMENSION {
                return Err(invalid_parameter(
                    parameter,
                    &value,
                    &format!("must not exceed {MAX_GRID_DIMENSION}"),
                ));
            }
        }

        Ok(Self {
            costs: Array2::from_elem((height, width), None),
            blocked: CellBitset::new(width * height),
            width,
            height,
        })
    }

    /// Number of columns
    pub const fn width(&self) -> usize {
        self.width
    }

    /// Number of rows
    pub const fn height(&self) -> usize {
        self.height
    }

    /// Grid dimensions as (width, height)
    pub const fn dimensions(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    /// Total number of cells
    pub const fn cell_count(&self) -> usize {
        self.width * self.height
    }

    /// Check whether a position lies inside the grid
    pub const fn contains(&self, pos: Position) -> bool {
        pos[0] < self.width && pos[1] < self.height
    }

    /// Validate a position against the grid bounds
    ///
    /// # Errors
    ///
    /// Returns `OutOfRange` if the position lies outside the grid
    pub fn check(&self, pos: Position) -> Result<Position> {
        if self.contains(pos) {
            Ok(pos)
        } else {
            Err(BoardError::OutOfRange {
                position: pos,
                dimensions: (self.width, self.height),
            })
        }
    }

    /// Flat index of an in-range position
    pub const fn index(&self, pos: Position) -> usize {
        pos[1] * self.width + pos[0]
    }

    /// Position of a flat index
    pub const fn position(&self, index: usize) -> Position {
        [index % self.width, index / self.width]
    }

    /// Read-only view of the cost matrix, indexed `[y, x]`
    pub fn costs(&self) -> ArrayView2<'_, Option<u32>> {
        self.costs.view()
    }

    /// Current cost of a cell, `None` if blocked or unreached
    ///
    /// # Errors
    ///
    /// Returns `OutOfRange` if the position lies outside the grid
    pub fn get_cost(&self, pos: Position) -> Result<Option<u32>> {
        self.check(pos).map(|p| self.cost_at(p))
    }

    /// Overwrite a cell's cost and return the previous value
    ///
    /// # Errors
    ///
    /// Returns `OutOfRange` if the position lies outside the grid
    pub fn set_cost(&mut self, pos: Position, cost: Option<u32>) -> Result<Option<u32>> {
        let pos = self.check(pos)?;
        Ok(self.write_cost(pos, cost))
    }

    /// Forget a cell's cost
    ///
    /// # Errors
    ///
    /// Returns `OutOfRange` if the position lies outside the grid
    pub fn clear_cost(&mut self, pos: Position) -> Result<Option<u32>> {
        self.set_cost(pos, None)
    }

    /// Check whether a cell is an obstacle
    ///
    /// # Errors
    ///
    /// Returns `OutOfRange` if the position lies outside the grid
    pub fn is_blocked(&self, pos: Position) -> Result<bool> {
        self.check(pos).map(|p| self.blocked_at(p))
    }

    /// Turn a cell into an obstacle, clearing its cost
    ///
    /// Returns the cost the cell held before it was blocked.
    ///
    /// # Errors
    ///
    /// Returns `OutOfRange` if the position lies outside the grid
    pub fn mark_blocked(&mut self, pos: Position) -> Result<Option<u32>> {
        let pos = self.check(pos)?;
        self.blocked.insert(self.index(pos));
        Ok(self.write_cost(pos, None))
    }

    /// Remove the obstacle flag from a cell, leaving its cost unreached
    ///
    /// # Errors
    ///
    /// Returns `OutOfRange` if the position lies outside the grid
    pub fn mark_unblocked(&mut self, pos: Position) -> Result<()> {
        let pos = self.check(pos)?;
        self.blocked.remove(self.index(pos));
        Ok(())
    }

    /// In-bounds, unblocked neighbors in the order left, up, right, down
    ///
    /// # Errors
    ///
    /// Returns `OutOfRange` if the position lies outside the grid
    pub fn live_neighbors(&self, pos: Position) -> Result<Vec<Position>> {
        let pos = self.check(pos)?;
        Ok(self.neighbors(pos).collect())
    }

    /// One more than the cheapest live neighbor, or `None` if no live
    /// neighbor has a known cost
    ///
    /// # Errors
    ///
    /// Returns `OutOfRange` if the position lies outside the grid
    pub fn best_cost_from_neighbors(&self, pos: Position) -> Result<Option<u32>> {
        self.check(pos).map(|p| self.best_neighbor_cost(p))
    }

    /// Obstacle flags as a bitset over flat indices
    pub const fn obstacles(&self) -> &CellBitset {
        &self.blocked
    }

    pub(crate) fn cost_at(&self, pos: Position) -> Option<u32> {
        self.costs.get([pos[1], pos[0]]).copied().flatten()
    }

    pub(crate) fn write_cost(&mut self, pos: Position, cost: Option<u32>) -> Option<u32> {
        self.costs
            .get_mut([pos[1], pos[0]])
            .and_then(|slot| std::mem::replace(slot, cost))
    }

    pub(crate) fn blocked_at(&self, pos: Position) -> bool {
        self.contains(pos) && self.blocked.contains(self.index(pos))
    }

    pub(crate) fn neighbors(&self, pos: Position) -> impl Iterator<Item = Position> + '_ {
        NEIGHBOR_OFFSETS.iter().filter_map(move |offset| {
            let x = pos[0].checked_add_signed(offset[0])?;
            let y = pos[1].checked_add_signed(offset[1])?;
            let neighbor = [x, y];
            (self.contains(neighbor) && !self.blocked_at(neighbor)).then_some(neighbor)
        })
    }

    pub(crate) fn best_neighbor_cost(&self, pos: Position) -> Option<u32> {
        self.neighbors(pos)
            .filter_map(|neighbor| self.cost_at(neighbor))
            .min()
            .map(|cost| cost.saturating_add(1))
    }
}
