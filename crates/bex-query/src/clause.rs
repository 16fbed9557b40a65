//! SQL clause synthesis
//!
//! Builds WHERE/SET/column-list/value-list fragments from ordered
//! column/value pairs. Literal rendering doubles embedded single quotes;
//! anything caller-supplied should go through the bound variants, which
//! emit placeholders and return the values for the client to bind.

use bex_core::{BexError, CommandKind, ParamStyle, Value};
use thiserror::Error;

/// Errors raised while constructing a clause builder.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ClauseError {
    /// No column/value pairs were supplied.
    #[error("no column/value pairs supplied")]
    Empty,

    /// Column names and values differ in length.
    #[error("expected {expected} values, got {actual}")]
    LengthMismatch { expected: usize, actual: usize },

    /// A column name is not a plain SQL identifier.
    #[error("invalid column identifier: {0}")]
    InvalidIdentifier(String),
}

impl From<ClauseError> for BexError {
    fn from(err: ClauseError) -> Self {
        BexError::InvalidInput(err.to_string())
    }
}

/// A parameterized clause: SQL with placeholders plus the values to bind,
/// in placeholder order.
#[derive(Debug, Clone, PartialEq)]
pub struct BoundClause {
    pub sql: String,
    pub values: Vec<Value>,
}

/// Synthesizes SQL clause fragments from ordered column/value pairs.
///
/// Pairs are held positionally: duplicate column names are preserved in
/// insertion order rather than collapsed through a keyed map.
#[derive(Debug, Clone)]
pub struct ClauseBuilder {
    command: CommandKind,
    style: ParamStyle,
    criteria: Vec<(String, Value)>,
}

impl ClauseBuilder {
    /// Create a builder from parallel name/value sequences.
    ///
    /// Both sequences must be non-empty and equal in length, and every
    /// name must be a plain identifier; violations are `InvalidInput`.
    pub fn new(
        command: CommandKind,
        names: Vec<String>,
        values: Vec<Value>,
        style: ParamStyle,
    ) -> bex_core::Result<Self> {
        if names.is_empty() || values.is_empty() {
            return Err(ClauseError::Empty.into());
        }
        if names.len() != values.len() {
            return Err(ClauseError::LengthMismatch {
                expected: names.len(),
                actual: values.len(),
            }
            .into());
        }
        for name in &names {
            if !is_identifier(name) {
                return Err(ClauseError::InvalidIdentifier(name.clone()).into());
            }
        }

        tracing::debug!(
            command = %command,
            pairs = names.len(),
            "clause builder created"
        );

        Ok(Self {
            command,
            style,
            criteria: names.into_iter().zip(values).collect(),
        })
    }

    /// The command category this builder was created for.
    pub fn command(&self) -> CommandKind {
        self.command
    }

    /// The ordered column/value pairs.
    pub fn criteria(&self) -> &[(String, Value)] {
        &self.criteria
    }

    /// `a = 'x' AND b = 'y'` — equality pairs without the WHERE keyword.
    pub fn predicates(&self) -> String {
        self.criteria
            .iter()
            .map(|(name, value)| format!("{} = {}", name, quote_literal(value)))
            .collect::<Vec<_>>()
            .join(" AND ")
    }

    /// `WHERE a = 'x' AND b = 'y'`
    pub fn where_clause(&self) -> String {
        format!("WHERE {}", self.predicates())
    }

    /// `SET a = 'x', b = 'y'`
    pub fn set_clause(&self) -> String {
        let assignments = self
            .criteria
            .iter()
            .map(|(name, value)| format!("{} = {}", name, quote_literal(value)))
            .collect::<Vec<_>>()
            .join(", ");
        format!("SET {}", assignments)
    }

    /// `(a, b, c)`
    pub fn column_list(&self) -> String {
        let names = self
            .criteria
            .iter()
            .map(|(name, _)| name.as_str())
            .collect::<Vec<_>>()
            .join(", ");
        format!("({})", names)
    }

    /// `VALUES (x, y)` — values rendered bare, without quoting.
    pub fn value_list(&self) -> String {
        let values = self
            .criteria
            .iter()
            .map(|(_, value)| value.to_string())
            .collect::<Vec<_>>()
            .join(", ");
        format!("VALUES ({})", values)
    }

    /// `WHERE a = ? AND b = ?` with the values to bind, placeholders per
    /// the builder's parameter style.
    pub fn where_bound(&self) -> BoundClause {
        let predicates = self
            .criteria
            .iter()
            .enumerate()
            .map(|(i, (name, _))| format!("{} = {}", name, self.style.placeholder(i + 1, name)))
            .collect::<Vec<_>>()
            .join(" AND ");

        BoundClause {
            sql: format!("WHERE {}", predicates),
            values: self.values(),
        }
    }

    /// `SET a = ?, b = ?` with the values to bind.
    pub fn set_bound(&self) -> BoundClause {
        let assignments = self
            .criteria
            .iter()
            .enumerate()
            .map(|(i, (name, _))| format!("{} = {}", name, self.style.placeholder(i + 1, name)))
            .collect::<Vec<_>>()
            .join(", ");

        BoundClause {
            sql: format!("SET {}", assignments),
            values: self.values(),
        }
    }

    fn values(&self) -> Vec<Value> {
        self.criteria.iter().map(|(_, v)| v.clone()).collect()
    }
}

/// Render a value as a quoted SQL literal, doubling embedded quotes.
fn quote_literal(value: &Value) -> String {
    format!("'{}'", value.to_string().replace('\'', "''"))
}

/// A plain SQL identifier: leading letter or underscore, then letters,
/// digits, underscores.
fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

#[cfg(test)]
mod tests;
