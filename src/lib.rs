//! Incrementally maintained distance-to-nearest-exit fields on 2D grids
//!
//! A [`Board`] keeps, for every open cell, the number of 4-connected steps to
//! the closest exit. Adding or removing exits and obstacles repairs only the
//! part of the field the change affects.

#![forbid(unsafe_code)]

/// Board operations and the incremental update engines
pub mod algorithm;
/// Summary statistics over computed fields
pub mod analysis;
/// Scripts, rendering, command line and error handling
pub mod io;
/// Grid storage and layout generation
pub mod spatial;

pub use algorithm::board::Board;
pub use algorithm::operation::Operation;
pub use io::error::{BoardError, Result};
