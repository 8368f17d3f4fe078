//! Console progress output.
//!
//! Human-readable lines only; nothing here is meant to be parsed. Write
//! failures are ignored so that output problems never stop a run.

use std::io::Write;
use std::path::Path;

use crate::classify::Classification;
use crate::script::Statement;

use super::{ExecutionResult, Summary};

/// Writes progress lines for a run to `W`.
pub struct Reporter<W: Write> {
    out: W,
}

impl<W: Write> Reporter<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    /// Consumes the reporter, returning the underlying writer.
    pub fn into_inner(self) -> W {
        self.out
    }

    pub fn applying(&mut self, script: &Path) {
        let _ = writeln!(self.out, "Applying {}...", script.display());
    }

    pub fn executing(&mut self, index: usize, total: usize) {
        let _ = writeln!(self.out, "Executing statement {index}/{total}...");
    }

    pub fn outcome(&mut self, index: usize, result: &ExecutionResult) {
        let _ = match result {
            ExecutionResult::Success { .. } => {
                writeln!(self.out, "✓ Statement {index} executed successfully")
            }
            ExecutionResult::Failure { status, body } => {
                writeln!(self.out, "✗ Statement {index} failed: {status} - {body}")
            }
            ExecutionResult::Error { message } => {
                writeln!(self.out, "✗ Statement {index} error: {message}")
            }
        };
    }

    pub fn summary(&mut self, summary: &Summary) {
        let _ = writeln!(
            self.out,
            "\nCompleted: {}/{} statements executed successfully",
            summary.succeeded, summary.total
        );
        let _ = if summary.all_succeeded() {
            writeln!(self.out, "🎉 Database fix applied successfully!")
        } else {
            writeln!(self.out, "⚠️ Some statements failed. Please check the errors above.")
        };
    }

    /// One dry-run line: `[i/N] line L TYPE (level): first line`.
    pub fn planned(
        &mut self,
        index: usize,
        total: usize,
        statement: &Statement,
        classification: &Classification,
    ) {
        let _ = writeln!(
            self.out,
            "[{index}/{total}] line {} {classification}: {}",
            statement.line(),
            statement.first_line()
        );
    }

    pub fn plan_total(&mut self, total: usize) {
        let _ = writeln!(self.out, "\n{total} statements would be executed");
    }
}
