//! Error types for sqlmint.
//!
//! Every error carries a stable code (`SQLX001`..`SQLX003`) for programmatic
//! matching by callers and generated code.

use crate::dialect::Dialect;
use thiserror::Error;

#[derive(Debug, Clone, Error)]
pub enum MintError {
    /// A template used a placeholder name outside the fixed registry.
    #[error("SQLX001: unknown placeholder '{{{{{name}}}}}'{}", suggestion_suffix(.suggestion))]
    UnknownPlaceholder {
        name: String,
        suggestion: Option<String>,
    },

    /// The template text itself could not be tokenized.
    #[error("SQLX001: template parse error at offset {offset}: {message}")]
    TemplateParse { offset: usize, message: String },

    /// DELETE/UPDATE refused without a WHERE predicate.
    #[error("SQLX001: {statement} statement requires a WHERE clause")]
    MissingWhere { statement: &'static str },

    /// A required argument was null or empty at the call that received it.
    #[error("SQLX001: missing required argument: {0}")]
    MissingArgument(&'static str),

    /// A dynamic placeholder was left unresolved at render time.
    #[error("SQLX001: no value supplied for dynamic placeholder '{0}'")]
    MissingRenderValue(String),

    /// A fluent call that contradicts the builder's statement kind.
    #[error("SQLX001: {call} is not valid on a {kind} statement")]
    InvalidCall {
        call: &'static str,
        kind: &'static str,
    },

    /// The builder was used after `close()`.
    #[error("SQLX001: builder used after close")]
    BuilderClosed,

    /// An expression node had no translation rule and no usable cast fallback.
    #[error("SQLX002: unsupported expression shape: {0}")]
    InvalidExpression(String),

    #[error("SQLX003: unsupported dialect: {0}")]
    UnsupportedDialect(Dialect),
}

fn suggestion_suffix(suggestion: &Option<String>) -> String {
    match suggestion {
        Some(s) => format!(" (did you mean '{{{{{s}}}}}'?)"),
        None => String::new(),
    }
}

impl MintError {
    /// Stable error code for programmatic matching.
    pub fn code(&self) -> &'static str {
        match self {
            MintError::UnknownPlaceholder { .. }
            | MintError::TemplateParse { .. }
            | MintError::MissingWhere { .. }
            | MintError::MissingArgument(_)
            | MintError::MissingRenderValue(_)
            | MintError::InvalidCall { .. }
            | MintError::BuilderClosed => "SQLX001",
            MintError::InvalidExpression(_) => "SQLX002",
            MintError::UnsupportedDialect(_) => "SQLX003",
        }
    }

    /// Create an unknown-placeholder error with an optional near-miss suggestion.
    pub fn unknown_placeholder(name: impl Into<String>, known: &[&str]) -> Self {
        let name = name.into();
        let lower = name.to_lowercase();
        let suggestion = known
            .iter()
            .map(|k| (*k, strsim::jaro_winkler(&lower, k)))
            .filter(|(_, score)| *score > 0.85)
            .max_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(k, _)| k.to_string());
        MintError::UnknownPlaceholder { name, suggestion }
    }
}

/// Result type alias for sqlmint operations.
pub type MintResult<T> = Result<T, MintError>;
