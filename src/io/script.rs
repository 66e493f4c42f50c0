//! Batch-edit scripts
//!
//! A script declares the grid once and then lists one operation per line:
//!
//! ```text
//! # evacuation plan, floor 2
//! grid 5 5
//! exit 1 0
//! obstacle 2 1
//! remove-exit 1 0
//! ```
//!
//! `#` starts a comment and blank lines are ignored.

use std::fmt::Write as _;
use std::path::Path;

use crate::algorithm::board::Board;
use crate::algorithm::operation::Operation;
use crate::io::error::{BoardError, ErrorContext, Result, WithContext, script_error};

/// Parsed batch-edit script
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Script {
    /// Grid width from the `grid` directive
    pub width: usize,
    /// Grid height from the `grid` directive
    pub height: usize,
    /// Operations with their 1-based source line numbers
    pub operations: Vec<(usize, Operation)>,
}

fn parse_dimensions<'a>(mut tokens: impl Iterator<Item = &'a str>) -> Result<(usize, usize)> {
    let mut next = |name: &str| -> Result<usize> {
        let token = tokens
            .next()
            .ok_or_else(|| script_error(&format!("grid directive is missing the {name}")))?;
        token
            .parse()
            .map_err(|e| script_error(&format!("invalid grid {name} '{token}': {e}")))
    };
    let width = next("width")?;
    let height = next("height")?;
    if let Some(extra) = tokens.next() {
        return Err(script_error(&format!("unexpected token '{extra}'")));
    }
    Ok((width, height))
}

impl Script {
    /// Parse script text
    ///
    /// # Errors
    ///
    /// Returns a `Script` error naming the offending line if the `grid`
    /// directive is missing or repeated, or an operation cannot be parsed
    pub fn parse(text: &str) -> Result<Self> {
        let mut dimensions = None;
        let mut operations = Vec::new();

        for (index, raw) in text.lines().enumerate() {
            let line_number = index + 1;
            let line = raw.split('#').next().unwrap_or_default().trim();
            if line.is_empty() {
                continue;
            }

            let mut tokens = line.split_whitespace();
            if tokens.next() == Some("grid") {
                if dimensions.is_some() {
                    return Err(BoardError::Script {
                        line: line_number,
                        reason: "grid declared more than once".to_string(),
                    });
                }
                dimensions = Some(parse_dimensions(tokens).with_line(line_number)?);
                continue;
            }

            if dimensions.is_none() {
                return Err(BoardError::Script {
                    line: line_number,
                    reason: "operation before the grid directive".to_string(),
                });
            }
            let operation = line.parse::<Operation>().with_line(line_number)?;
            operations.push((line_number, operation));
        }

        let (width, height) =
            dimensions.ok_or_else(|| script_error(&"script has no grid directive"))?;
        Ok(Self {
            width,
            height,
            operations,
        })
    }

    /// Read and parse a script file
    ///
    /// # Errors
    ///
    /// Returns a `FileSystem` error if the file cannot be read, or a
    /// `Script` error if it cannot be parsed
    pub fn from_path(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).with_context(ErrorContext {
            path: Some(path.to_path_buf()),
            operation: Some("read script"),
            ..Default::default()
        })?;
        Self::parse(&text)
    }

    /// Build a script from a board size and an operation list
    pub fn from_operations(
        width: usize,
        height: usize,
        operations: impl IntoIterator<Item = Operation>,
    ) -> Self {
        Self {
            width,
            height,
            operations: operations
                .into_iter()
                .enumerate()
                .map(|(index, operation)| (index + 2, operation))
                .collect(),
        }
    }

    /// Render back to script text
    pub fn to_text(&self) -> String {
        let mut text = format!("grid {} {}\n", self.width, self.height);
        for (_, operation) in &self.operations {
            let _ = writeln!(text, "{operation}");
        }
        text
    }

    /// Create the board and apply every operation in order
    ///
    /// `on_step` is called after each operation with the number of
    /// operations applied so far and whether that operation changed the
    /// board. Redundant edits report `false`.
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameter` for an unusable grid size, or a `Script`
    /// error for an operation outside the grid
    pub fn run(&self, mut on_step: impl FnMut(usize, bool)) -> Result<Board> {
        let mut board = Board::new(self.width, self.height)?;

        for (step, (line, operation)) in self.operations.iter().enumerate() {
            let changed = board.apply(operation).with_line(*line)?;
            on_step(step + 1, changed);
        }

        log::debug!(
            "script applied {} operations to a {}x{} board",
            self.operations.len(),
            self.width,
            self.height
        );
        Ok(board)
    }
}
