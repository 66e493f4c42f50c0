//! Spatial data structures for the distance field
//!
//! This module contains spatial-related functionality including:
//! - The grid store holding costs and obstacle flags
//! - Seeded generation of random exit and obstacle layouts

/// Grid store: cost matrix, obstacle flags and neighbor queries
pub mod grid;
/// Random layout generation for benchmarks and demonstrations
pub mod layout;

pub use grid::CostGrid;

/// Cell coordinates as `[x, y]`, with `x` the column and `y` the row
pub type Position = [usize; 2];
