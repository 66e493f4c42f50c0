//! Error types and context management for board operations

use std::fmt;
use std::path::PathBuf;

use crate::spatial::Position;

/// Main error type for all board operations
#[derive(Debug)]
pub enum BoardError {
    /// Coordinate lies outside the grid
    ///
    /// Raised before any mutation takes place, so the board is unchanged.
    OutOfRange {
        /// Offending position as `[x, y]`
        position: Position,
        /// Grid dimensions (width, height)
        dimensions: (usize, usize),
    },

    /// Parameter validation failed
    InvalidParameter {
        /// Name of the invalid parameter
        parameter: &'static str,
        /// Provided value that failed validation
        value: String,
        /// Explanation of why the value is invalid
        reason: String,
    },

    /// Batch-edit script could not be parsed or applied
    Script {
        /// 1-based line number (0 when not yet known)
        line: usize,
        /// Description of what's wrong with the line
        reason: String,
    },

    /// Failed to save a rendered field image
    ImageExport {
        /// Path where export was attempted
        path: PathBuf,
        /// Underlying image export error
        source: image::ImageError,
    },

    /// General file system operation failure
    FileSystem {
        /// Path involved in the operation
        path: PathBuf,
        /// Description of the operation that failed
        operation: &'static str,
        /// Underlying I/O error
        source: std::io::Error,
    },

    /// Incrementally maintained cost disagrees with a full recomputation
    Inconsistent {
        /// First mismatching position as `[x, y]`
        position: Position,
        /// Cost from the full recomputation
        expected: Option<u32>,
        /// Cost held by the board
        actual: Option<u32>,
    },

    /// A thread panicked while holding the shared board lock
    LockPoisoned {
        /// Operation that tried to take the lock
        operation: &'static str,
    },
}

fn describe_cost(cost: Option<u32>) -> String {
    cost.map_or_else(|| "unreachable".to_string(), |c| c.to_string())
}

impl fmt::Display for BoardError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OutOfRange {
                position,
                dimensions,
            } => {
                write!(
                    f,
                    "Position ({}, {}) is outside the {}x{} grid",
                    position[0], position[1], dimensions.0, dimensions.1
                )
            }
            Self::InvalidParameter {
                parameter,
                value,
                reason,
            } => {
                write!(f, "Invalid parameter '{parameter}' = '{value}': {reason}")
            }
            Self::Script { line, reason } => {
                if *line == 0 {
                    write!(f, "Script error: {reason}")
                } else {
                    write!(f, "Script error on line {line}: {reason}")
                }
            }
            Self::ImageExport { path, source } => {
                write!(
                    f,
                    "Failed to export image to '{}': {source}",
                    path.display()
                )
            }
            Self::FileSystem {
                path,
                operation,
                source,
            } => {
                write!(
                    f,
                    "File system error during {operation} on '{}': {source}",
                    path.display()
                )
            }
            Self::Inconsistent {
                position,
                expected,
                actual,
            } => {
                write!(
                    f,
                    "Cost at ({}, {}) is {} but a full recomputation gives {}",
                    position[0],
                    position[1],
                    describe_cost(*actual),
                    describe_cost(*expected)
                )
            }
            Self::LockPoisoned { operation } => {
                write!(f, "Board lock poisoned during {operation}")
            }
        }
    }
}

impl std::error::Error for BoardError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::ImageExport { source, .. } => Some(source),
            Self::FileSystem { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Convenience type alias for board results
pub type Result<T> = std::result::Result<T, BoardError>;

/// Additional context to enrich error messages
#[derive(Debug, Clone, Default)]
pub struct ErrorContext {
    /// 1-based script line being processed
    pub line: Option<usize>,
    /// File the error relates to
    pub path: Option<PathBuf>,
    /// Operation being performed
    pub operation: Option<&'static str>,
}

/// Enriches error messages with script and file information
pub trait WithContext<T> {
    /// Add error context to a Result
    ///
    /// # Errors
    ///
    /// Propagates the original error with additional context applied
    fn with_context(self, context: ErrorContext) -> Result<T>;

    /// Add just the script line context
    ///
    /// # Errors
    ///
    /// Propagates the original error with the line number applied
    fn with_line(self, line: usize) -> Result<T>;
}

impl<T, E> WithContext<T> for std::result::Result<T, E>
where
    E: Into<BoardError>,
{
    fn with_context(self, context: ErrorContext) -> Result<T> {
        self.map_err(|e| {
            let mut error: BoardError = e.into();
            // Range and parameter errors inside a script are reported against the line
            if let (
                Some(context_line),
                BoardError::OutOfRange { .. } | BoardError::InvalidParameter { .. },
            ) = (context.line, &error)
            {
                return BoardError::Script {
                    line: context_line,
                    reason: error.to_string(),
                };
            }
            match &mut error {
                BoardError::Script { line, .. } => {
                    if let Some(context_line) = context.line {
                        *line = context_line;
                    }
                }
                // Placeholder paths come from the blanket `From<io::Error>` conversion
                BoardError::FileSystem {
                    path, operation, ..
                } => {
                    if let Some(context_path) = context.path {
                        *path = context_path;
                    }
                    if let Some(context_operation) = context.operation {
                        *operation = context_operation;
                    }
                }
                BoardError::ImageExport { path, .. } => {
                    if let Some(context_path) = context.path {
                        *path = context_path;
                    }
                }
                _ => {}
            }
            error
        })
    }

    fn with_line(self, line: usize) -> Result<T> {
        self.with_context(ErrorContext {
            line: Some(line),
            ..Default::default()
        })
    }
}

impl From<image::ImageError> for BoardError {
    fn from(err: image::ImageError) -> Self {
        Self::ImageExport {
            path: PathBuf::from("<unknown>"),
            source: err,
        }
    }
}

impl From<std::io::Error> for BoardError {
    fn from(err: std::io::Error) -> Self {
        Self::FileSystem {
            path: PathBuf::from("<unknown>"),
            operation: "unknown",
            source: err,
        }
    }
}

/// Create an invalid parameter error
pub fn invalid_parameter(
    parameter: &'static str,
    value: &impl ToString,
    reason: &impl ToString,
) -> BoardError {
    BoardError::InvalidParameter {
        parameter,
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

/// Create a script error whose line is filled in later through [`WithContext`]
pub fn script_error(reason: &impl ToString) -> BoardError {
    BoardError::Script {
        line: 0,
        reason: reason.to_string(),
    }
}
