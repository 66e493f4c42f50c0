//! Thread-safe handle around a board
//!
//! Mutations hold the write lock for the whole operation, including orphan
//! discovery and reconvergence, so readers only ever see completed fields.

use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use ndarray::Array2;

use crate::algorithm::board::Board;
use crate::algorithm::operation::Operation;
use crate::io::error::{BoardError, Result};

/// Cloneable, shareable board handle
#[derive(Debug, Clone)]
pub struct SharedBoard {
    inner: Arc<RwLock<Board>>,
}

impl SharedBoard {
    /// Wrap a board for shared access
    pub fn new(board: Board) -> Self {
        Self {
            inner: Arc::new(RwLock::new(board)),
        }
    }

    fn read(&self, operation: &'static str) -> Result<RwLockReadGuard<'_, Board>> {
        self.inner
            .read()
            .map_err(|_poisoned| BoardError::LockPoisoned { operation })
    }

    fn write(&self, operation: &'static str) -> Result<RwLockWriteGuard<'_, Board>> {
        self.inner
            .write()
            .map_err(|_poisoned| BoardError::LockPoisoned { operation })
    }

    /// Distance from `(x, y)` to the nearest exit
    ///
    /// # Errors
    ///
    /// Returns `OutOfRange` for positions outside the board, or
    /// `LockPoisoned` if a writer panicked
    pub fn get_cost(&self, x: usize, y: usize) -> Result<Option<u32>> {
        self.read("get_cost")?.get_cost(x, y)
    }

    /// Apply an operation under the exclusive lock
    ///
    /// # Errors
    ///
    /// Returns `OutOfRange` for positions outside the board, or
    /// `LockPoisoned` if a writer panicked
    pub fn apply(&self, operation: &Operation) -> Result<bool> {
        self.write("apply")?.apply(operation)
    }

    /// Copy of the complete cost field, indexed `[y, x]`
    ///
    /// # Errors
    ///
    /// Returns `LockPoisoned` if a writer panicked
    pub fn snapshot(&self) -> Result<Array2<Option<u32>>> {
        Ok(self.read("snapshot")?.costs().to_owned())
    }

    /// Run a closure against the board under the shared lock
    ///
    /// # Errors
    ///
    /// Returns `LockPoisoned` if a writer panicked
    pub fn with_board<T>(&self, f: impl FnOnce(&Board) -> T) -> Result<T> {
        Ok(f(&*self.read("with_board")?))
    }

    /// Recover the board once no other handle remains
    ///
    /// A poisoned lock still yields the board as the last writer left it.
    ///
    /// # Errors
    ///
    /// Returns the handle itself when other clones are alive
    pub fn into_inner(self) -> std::result::Result<Board, Self> {
        match Arc::try_unwrap(self.inner) {
            Ok(lock) => Ok(lock.into_inner().unwrap_or_else(PoisonError::into_inner)),
            Err(inner) => Err(Self { inner }),
        }
    }
}
