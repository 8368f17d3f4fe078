//! Advisory statement classification.
//!
//! Parses each statement with sqlparser and rates how risky applying it is.
//! The result is shown in dry-run plans and debug logs; it never changes
//! what gets sent to the endpoint.

mod parser;

pub use parser::classify_sql;

use std::fmt;

/// How risky applying a statement is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum SafetyLevel {
    /// Reads only (SELECT, SHOW, plain EXPLAIN).
    Safe,
    /// Changes rows without removing them (INSERT, UPDATE, MERGE).
    Mutating,
    /// Removes data or changes schema and privileges. Also anything that
    /// could not be parsed.
    Destructive,
}

impl fmt::Display for SafetyLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Safe => write!(f, "Safe"),
            Self::Mutating => write!(f, "Mutating"),
            Self::Destructive => write!(f, "Destructive"),
        }
    }
}

/// The type of SQL statement detected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatementType {
    Select,
    Insert,
    Update,
    Delete,
    Merge,
    Truncate,
    Create,
    Alter,
    Drop,
    Grant,
    Revoke,
    Explain,
    Show,
    Unknown,
}

impl fmt::Display for StatementType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Select => "SELECT",
            Self::Insert => "INSERT",
            Self::Update => "UPDATE",
            Self::Delete => "DELETE",
            Self::Merge => "MERGE",
            Self::Truncate => "TRUNCATE",
            Self::Create => "CREATE",
            Self::Alter => "ALTER",
            Self::Drop => "DROP",
            Self::Grant => "GRANT",
            Self::Revoke => "REVOKE",
            Self::Explain => "EXPLAIN",
            Self::Show => "SHOW",
            Self::Unknown => "UNKNOWN",
        };
        f.write_str(name)
    }
}

/// Classification of a single statement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Classification {
    pub level: SafetyLevel,
    pub statement_type: StatementType,
}

impl Classification {
    pub fn new(level: SafetyLevel, statement_type: StatementType) -> Self {
        Self {
            level,
            statement_type,
        }
    }

    /// Classification for SQL that could not be parsed or recognised.
    pub fn unknown() -> Self {
        Self::new(SafetyLevel::Destructive, StatementType::Unknown)
    }

    pub fn is_destructive(&self) -> bool {
        self.level == SafetyLevel::Destructive
    }
}

impl fmt::Display for Classification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.statement_type, self.level)
    }
}
