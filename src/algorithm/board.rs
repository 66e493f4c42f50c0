//! Public board operations composing the grid store with the update engines
//!
//! Each mutator touches the seed cell directly and then hands off to forward
//! relaxation (costs can only fall) or to orphan discovery followed by
//! reconvergence (costs can only rise or vanish).

use std::collections::VecDeque;
use std::fmt;

use ndarray::{Array2, ArrayView2};

use crate::algorithm::operation::Operation;
use crate::algorithm::orphans::find_orphans;
use crate::algorithm::reconvergence::reconverge;
use crate::algorithm::relaxation::relax_from;
use crate::io::error::{BoardError, Result};
use crate::io::render::render_field;
use crate::spatial::{CostGrid, Position};

/// Grid that keeps every cell's distance to the nearest exit up to date
///
/// Mutators return `Ok(true)` when the transition was applied and `Ok(false)`
/// when it was redundant for the cell's current state (adding an exit that
/// already exists, removing an exit from a cell that is not one, and so on).
/// Redundant transitions leave the board untouched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    grid: CostGrid,
}

impl Board {
    /// Create a board with no exits and no obstacles
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameter` if a dimension is zero or too large
    pub fn new(width: usize, height: usize) -> Result<Self> {
        Ok(Self {
            grid: CostGrid::new(width, height)?,
        })
    }

    /// Number of columns
    pub const fn width(&self) -> usize {
        self.grid.width()
    }

    /// Number of rows
    pub const fn height(&self) -> usize {
        self.grid.height()
    }

    /// Access the underlying grid store
    pub const fn grid(&self) -> &CostGrid {
        &self.grid
    }

    /// Read-only view of every cell's cost, indexed `[y, x]`
    pub fn costs(&self) -> ArrayView2<'_, Option<u32>> {
        self.grid.costs()
    }

    /// Distance from `(x, y)` to the nearest exit
    ///
    /// `None` for obstacles and for cells with no route to any exit.
    ///
    /// # Errors
    ///
    /// Returns `OutOfRange` if the position lies outside the grid
    pub fn get_cost(&self, x: usize, y: usize) -> Result<Option<u32>> {
        self.grid.get_cost([x, y])
    }

    /// Check whether `(x, y)` is an exit
    ///
    /// # Errors
    ///
    /// Returns `OutOfRange` if the position lies outside the grid
    pub fn is_exit(&self, x: usize, y: usize) -> Result<bool> {
        Ok(self.get_cost(x, y)? == Some(0))
    }

    /// Check whether `(x, y)` is an obstacle
    ///
    /// # Errors
    ///
    /// Returns `OutOfRange` if the position lies outside the grid
    pub fn is_obstacle(&self, x: usize, y: usize) -> Result<bool> {
        self.grid.is_blocked([x, y])
    }

    /// All exit positions in row-major order
    pub fn exits(&self) -> Vec<Position> {
        self.grid
            .costs()
            .indexed_iter()
            .filter(|(_, cost)| **cost == Some(0))
            .map(|((y, x), _)| [x, y])
            .collect()
    }

    /// All obstacle positions in row-major order
    pub fn obstacles(&self) -> Vec<Position> {
        self.grid
            .obstacles()
            .iter()
            .map(|index| self.grid.position(index))
            .collect()
    }

    /// Turn `(x, y)` into an exit, replacing an obstacle if one is there
    ///
    /// # Errors
    ///
    /// Returns `OutOfRange` if the position lies outside the grid
    pub fn add_exit(&mut self, x: usize, y: usize) -> Result<bool> {
        let pos = self.grid.check([x, y])?;
        if self.grid.cost_at(pos) == Some(0) {
            log::warn!("add_exit({x}, {y}): cell is already an exit");
            return Ok(false);
        }

        if self.grid.blocked_at(pos) {
            self.grid.mark_unblocked(pos)?;
        }
        self.grid.set_cost(pos, Some(0))?;
        let relaxed = relax_from(&mut self.grid, pos);

        log::debug!("add_exit({x}, {y}): relaxed {relaxed} cells");
        Ok(true)
    }

    /// Stop treating `(x, y)` as an exit
    ///
    /// The cell keeps no special status afterwards: it reconverges like any
    /// other open cell and ends unreachable if no other exit can be reached.
    ///
    /// # Errors
    ///
    /// Returns `OutOfRange` if the position lies outside the grid
    pub fn remove_exit(&mut self, x: usize, y: usize) -> Result<bool> {
        let pos = self.grid.check([x, y])?;
        if self.grid.cost_at(pos) != Some(0) {
            log::warn!("remove_exit({x}, {y}): cell is not an exit");
            return Ok(false);
        }

        self.grid.clear_cost(pos)?;
        let mut orphans = find_orphans(&mut self.grid, pos, 0);
        orphans.push(pos);
        let outcome = reconverge(&mut self.grid, &orphans);

        log::debug!(
            "remove_exit({x}, {y}): {} orphans, {} reconnected",
            orphans.len(),
            outcome.reconnected
        );
        Ok(true)
    }

    /// Block `(x, y)`
    ///
    /// An exit turned into an obstacle stops being an exit.
    ///
    /// # Errors
    ///
    /// Returns `OutOfRange` if the position lies outside the grid
    pub fn add_obstacle(&mut self, x: usize, y: usize) -> Result<bool> {
        let pos = self.grid.check([x, y])?;
        if self.grid.blocked_at(pos) {
            log::warn!("add_obstacle({x}, {y}): cell is already an obstacle");
            return Ok(false);
        }

        let Some(old_cost) = self.grid.mark_blocked(pos)? else {
            log::debug!("add_obstacle({x}, {y}): cell had no route, nothing to repair");
            return Ok(true);
        };
        let orphans = find_orphans(&mut self.grid, pos, old_cost);
        let outcome = reconverge(&mut self.grid, &orphans);

        log::debug!(
            "add_obstacle({x}, {y}): {} orphans, {} reconnected",
            orphans.len(),
            outcome.reconnected
        );
        Ok(true)
    }

    /// Clear the obstacle at `(x, y)`
    ///
    /// # Errors
    ///
    /// Returns `OutOfRange` if the position lies outside the grid
    pub fn remove_obstacle(&mut self, x: usize, y: usize) -> Result<bool> {
        let pos = self.grid.check([x, y])?;
        if !self.grid.blocked_at(pos) {
            log::warn!("remove_obstacle({x}, {y}): cell is not an obstacle");
            return Ok(false);
        }

        self.grid.mark_unblocked(pos)?;
        let best = self.grid.best_cost_from_neighbors(pos)?;
        self.grid.set_cost(pos, best)?;
        let relaxed = if best.is_some() {
            relax_from(&mut self.grid, pos)
        } else {
            0
        };

        log::debug!("remove_obstacle({x}, {y}): relaxed {relaxed} cells");
        Ok(true)
    }

    /// Apply a single operation
    ///
    /// # Errors
    ///
    /// Returns `OutOfRange` if the operation's position lies outside the grid
    pub fn apply(&mut self, operation: &Operation) -> Result<bool> {
        let [x, y] = operation.position();
        match operation {
            Operation::AddExit(_) => self.add_exit(x, y),
            Operation::RemoveExit(_) => self.remove_exit(x, y),
            Operation::AddObstacle(_) => self.add_obstacle(x, y),
            Operation::RemoveObstacle(_) => self.remove_obstacle(x, y),
        }
    }

    /// Apply operations in order, returning how many changed the board
    ///
    /// Stops at the first failing operation; earlier operations stay applied.
    ///
    /// # Errors
    ///
    /// Returns `OutOfRange` if an operation's position lies outside the grid
    pub fn apply_all<'a>(
        &mut self,
        operations: impl IntoIterator<Item = &'a Operation>,
    ) -> Result<usize> {
        let mut applied = 0;
        for operation in operations {
            if self.apply(operation)? {
                applied += 1;
            }
        }
        Ok(applied)
    }

    /// Compute the field from scratch with a multi-source BFS over the
    /// current exits and obstacles
    pub fn recompute_reference(&self) -> Array2<Option<u32>> {
        let mut reference = Array2::from_elem((self.height(), self.width()), None);
        let mut queue = VecDeque::new();

        for exit in self.exits() {
            if let Some(slot) = reference.get_mut([exit[1], exit[0]]) {
                *slot = Some(0u32);
                queue.push_back((exit, 0u32));
            }
        }

        while let Some((current, cost)) = queue.pop_front() {
            for neighbor in self.grid.neighbors(current) {
                if let Some(slot) = reference.get_mut([neighbor[1], neighbor[0]]) {
                    if slot.is_none() {
                        *slot = Some(cost + 1);
                        queue.push_back((neighbor, cost + 1));
                    }
                }
            }
        }

        reference
    }

    /// Check the incrementally maintained field against a full recomputation
    ///
    /// # Errors
    ///
    /// Returns `Inconsistent` naming the first mismatching cell in row-major order
    pub fn verify(&self) -> Result<()> {
        let reference = self.recompute_reference();
        for ((y, x), &expected) in reference.indexed_iter() {
            let actual = self.grid.cost_at([x, y]);
            if actual != expected {
                return Err(BoardError::Inconsistent {
                    position: [x, y],
                    expected,
                    actual,
                });
            }
        }
        Ok(())
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&render_field(self))
    }
}
