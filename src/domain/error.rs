//! Domain-level errors (no external dependencies)

use thiserror::Error;

/// Domain errors represent rule violations in the conversion core.
/// Parsing and tree building never produce them; only target lookup,
/// parser setup, and strict mode do.
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("unknown render target: {name} (available: {})", .available.join(", "))]
    UnknownTarget { name: String, available: Vec<String> },

    #[error("invalid indent unit: {0} (must be at least 1)")]
    InvalidIndentUnit(usize),

    #[error("strict mode: {count} indentation problem(s), first: {first}")]
    StrictViolation { count: usize, first: String },
}

/// Result type for domain operations.
pub type DomainResult<T> = Result<T, DomainError>;
