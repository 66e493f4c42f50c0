//! Input/output surfaces around the board
//!
//! Scripts and the command line feed operations in; text and PNG renderings
//! carry fields out.

/// Command-line interface and batch script processing
pub mod cli;
/// Limits and default values
pub mod configuration;
/// Error types and context propagation
pub mod error;
/// PNG heat-map export
pub mod image;
/// Terminal progress bars for batch runs
pub mod progress;
/// Plain-text field rendering
pub mod render;
/// Batch-edit script parsing and execution
pub mod script;
