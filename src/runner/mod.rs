//! Sequential statement execution.
//!
//! [`StatementRunner`] loads a script, partitions it, sends each statement
//! through a [`SqlExecutor`] one at a time in document order and tallies
//! the outcomes. A failed statement never stops the run and is never
//! retried; statements applied before it stay applied.

mod report;

pub use report::Reporter;

use std::io::Write;
use std::path::Path;

use tracing::{debug, info, warn};

use crate::classify::classify_sql;
use crate::error::Result;
use crate::rpc::SqlExecutor;
use crate::script::{load_script, partition, SplitMode, Statement};

/// Outcome of sending one statement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExecutionResult {
    /// The endpoint answered 200.
    Success { status: u16 },
    /// The endpoint answered with any other status.
    Failure { status: u16, body: String },
    /// No response was received.
    Error { message: String },
}

impl ExecutionResult {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }
}

/// Success tally for a whole run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Summary {
    pub succeeded: usize,
    pub total: usize,
}

impl Summary {
    /// True when every statement succeeded, including the empty run.
    pub fn all_succeeded(&self) -> bool {
        self.succeeded == self.total
    }

    pub fn failed(&self) -> usize {
        self.total - self.succeeded
    }

    /// Process exit status for a completed run.
    pub fn exit_status(&self) -> u8 {
        if self.all_succeeded() {
            EXIT_SUCCESS
        } else {
            EXIT_PARTIAL_FAILURE
        }
    }
}

/// Every statement succeeded, or only a plan was printed.
pub const EXIT_SUCCESS: u8 = 0;
/// A fatal error stopped the run before anything was sent.
pub const EXIT_FAILURE: u8 = 1;
/// The run completed but at least one statement failed.
pub const EXIT_PARTIAL_FAILURE: u8 = 2;

/// What one invocation did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunOutcome {
    /// Statements were sent to the endpoint.
    Applied(Summary),
    /// Only a dry-run plan was printed.
    Planned { statements: usize },
}

/// Maps the result of an invocation to the process exit status.
pub fn exit_status(result: &Result<RunOutcome>) -> u8 {
    match result {
        Ok(RunOutcome::Applied(summary)) => summary.exit_status(),
        Ok(RunOutcome::Planned { .. }) => EXIT_SUCCESS,
        Err(_) => EXIT_FAILURE,
    }
}

/// Applies the statements of a script through an executor.
pub struct StatementRunner<'a, W: Write> {
    executor: &'a dyn SqlExecutor,
    reporter: Reporter<W>,
}

impl<'a, W: Write> StatementRunner<'a, W> {
    /// Creates a runner that reports progress to `out`.
    pub fn new(executor: &'a dyn SqlExecutor, out: W) -> Self {
        Self {
            executor,
            reporter: Reporter::new(out),
        }
    }

    /// Consumes the runner, returning the output writer.
    pub fn into_inner(self) -> W {
        self.reporter.into_inner()
    }

    /// Loads, partitions and executes a script.
    ///
    /// A script that cannot be read is the only error; nothing is sent in
    /// that case.
    pub async fn run(&mut self, script: &Path, mode: SplitMode) -> Result<Summary> {
        let content = load_script(script)?;
        self.reporter.applying(script);

        let statements = partition(&content, mode);
        info!(
            "Partitioned {} into {} statements ({} split)",
            script.display(),
            statements.len(),
            mode
        );

        Ok(self.execute_all(&statements).await)
    }

    /// Executes statements strictly in order, one request at a time.
    pub async fn execute_all(&mut self, statements: &[Statement]) -> Summary {
        let total = statements.len();
        let mut summary = Summary {
            succeeded: 0,
            total,
        };

        for (i, statement) in statements.iter().enumerate() {
            let index = i + 1;
            self.reporter.executing(index, total);
            debug!(
                "Statement {index} (line {}) is {}",
                statement.line(),
                classify_sql(statement.text())
            );

            let result = self.execute_one(statement).await;
            if result.is_success() {
                summary.succeeded += 1;
            } else {
                warn!("Statement {index} (line {}) did not apply", statement.line());
            }
            self.reporter.outcome(index, &result);
        }

        self.reporter.summary(&summary);
        summary
    }

    async fn execute_one(&self, statement: &Statement) -> ExecutionResult {
        match self.executor.execute(statement.text()).await {
            Ok(response) if response.status == 200 => ExecutionResult::Success {
                status: response.status,
            },
            Ok(response) => ExecutionResult::Failure {
                status: response.status,
                body: response.body,
            },
            Err(e) => ExecutionResult::Error {
                message: e.to_string(),
            },
        }
    }
}

/// Prints what would be executed without sending anything.
///
/// Returns the statements that a real run would send.
pub fn plan<W: Write>(script: &Path, mode: SplitMode, out: W) -> Result<Vec<Statement>> {
    let content = load_script(script)?;
    let statements = partition(&content, mode);
    let total = statements.len();

    let mut reporter = Reporter::new(out);
    for (i, statement) in statements.iter().enumerate() {
        let classification = classify_sql(statement.text());
        reporter.planned(i + 1, total, statement, &classification);
    }
    reporter.plan_total(total);

    Ok(statements)
}
