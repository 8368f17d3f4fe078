//! SQL script loading and partitioning.
//!
//! Turns the contents of a script file into an ordered list of
//! [`Statement`]s. Document order is execution order.

mod splitter;

pub use splitter::{split_naive, split_statements};

use crate::error::{RunnerError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

/// How a script is cut into statements.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SplitMode {
    /// Split on every `;`, dropping fragments that start with `--`.
    Naive,
    /// Split on top-level `;`, respecting quotes, comments and dollar quotes.
    #[default]
    Statement,
}

impl SplitMode {
    /// Returns the mode as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Naive => "naive",
            Self::Statement => "statement",
        }
    }
}

impl fmt::Display for SplitMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for SplitMode {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "naive" => Ok(Self::Naive),
            "statement" | "statements" => Ok(Self::Statement),
            _ => Err(format!(
                "Invalid split mode: {s}. Expected: naive or statement"
            )),
        }
    }
}

/// One trimmed, non-empty SQL statement taken from a script.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Statement {
    text: String,
    line: usize,
}

impl Statement {
    /// The statement text as it will be sent.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// The 1-based line of the script on which the statement starts.
    pub fn line(&self) -> usize {
        self.line
    }

    /// The first line of the statement, for compact display.
    pub fn first_line(&self) -> &str {
        self.text.lines().next().unwrap_or_default()
    }
}

/// Reads a whole script file as UTF-8.
pub fn load_script(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).map_err(|e| RunnerError::file_access(path, e))
}

/// Partitions script text into statements using the given mode.
pub fn partition(content: &str, mode: SplitMode) -> Vec<Statement> {
    let slices = match mode {
        SplitMode::Naive => split_naive(content),
        SplitMode::Statement => split_statements(content),
    };

    // Offsets are increasing, so lines can be counted incrementally.
    let mut line = 1;
    let mut counted_to = 0;
    slices
        .into_iter()
        .map(|(offset, text)| {
            line += content[counted_to..offset].matches('\n').count();
            counted_to = offset;
            Statement {
                text: text.to_string(),
                line,
            }
        })
        .collect()
}
