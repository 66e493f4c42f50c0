//! Analysis of computed distance fields
//!
//! Provides summary statistics used for reporting and benchmarking

/// Counts and cost distribution of a field
pub mod statistics;
