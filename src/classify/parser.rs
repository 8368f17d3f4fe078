//! sqlparser-backed classification.
//!
//! Uses the PostgreSQL dialect. Statements sqlparser cannot parse (many
//! PL/pgSQL and policy definitions among them) classify as Destructive.

use sqlparser::ast::Statement;
use sqlparser::dialect::PostgreSqlDialect;
use sqlparser::parser::Parser;
use tracing::trace;

use super::{Classification, SafetyLevel, StatementType};

/// Classifies a single SQL statement.
pub fn classify_sql(sql: &str) -> Classification {
    match Parser::parse_sql(&PostgreSqlDialect {}, sql) {
        Ok(statements) if statements.len() == 1 => classify_statement(&statements[0]),
        Ok(statements) => {
            trace!("expected one statement, parsed {}", statements.len());
            Classification::unknown()
        }
        Err(e) => {
            trace!("could not parse statement for classification: {e}");
            Classification::unknown()
        }
    }
}

fn classify_statement(statement: &Statement) -> Classification {
    use super::SafetyLevel::*;
    use StatementType as T;

    let (level, statement_type) = match statement {
        Statement::Query(_) => (Safe, T::Select),
        Statement::Explain {
            analyze, statement, ..
        } => {
            if *analyze {
                // EXPLAIN ANALYZE runs the inner statement.
                (classify_statement(statement).level, T::Explain)
            } else {
                (Safe, T::Explain)
            }
        }
        Statement::ShowVariable { .. }
        | Statement::ShowTables { .. }
        | Statement::ShowColumns { .. }
        | Statement::ShowCreate { .. }
        | Statement::ShowFunctions { .. } => (Safe, T::Show),

        Statement::Insert(_) => (Mutating, T::Insert),
        Statement::Update { .. } => (Mutating, T::Update),
        Statement::Merge { .. } => (Mutating, T::Merge),

        Statement::Delete(_) => (Destructive, T::Delete),
        Statement::Truncate { .. } => (Destructive, T::Truncate),
        Statement::CreateTable { .. }
        | Statement::CreateIndex { .. }
        | Statement::CreateView { .. }
        | Statement::CreateSchema { .. }
        | Statement::CreateDatabase { .. }
        | Statement::CreateFunction { .. }
        | Statement::CreateProcedure { .. }
        | Statement::CreateRole { .. }
        | Statement::CreateSequence { .. }
        | Statement::CreateType { .. } => (Destructive, T::Create),
        Statement::AlterTable { .. }
        | Statement::AlterIndex { .. }
        | Statement::AlterView { .. }
        | Statement::AlterRole { .. } => (Destructive, T::Alter),
        Statement::Drop { .. } => (Destructive, T::Drop),
        Statement::Grant { .. } => (Destructive, T::Grant),
        Statement::Revoke { .. } => (Destructive, T::Revoke),

        _ => return Classification::unknown(),
    };

    Classification::new(level, statement_type)
}
