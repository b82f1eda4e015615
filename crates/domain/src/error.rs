//! Common error types used across the workspace.
//!
//! Each layer defines its own typed errors and converts into [`HearthError`]
//! via `#[from]`. Adapters wrap their library errors (`sqlx`, …) in a boxed
//! source so the domain stays free of IO dependencies.

use std::error::Error as StdError;

/// Top-level error for hearth operations.
#[derive(Debug, thiserror::Error)]
pub enum HearthError {
    /// The request failed domain validation before any side effect was
    /// attempted.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The operation targeted an identifier that does not exist.
    #[error(transparent)]
    NotFound(#[from] NotFoundError),

    /// The persistent store failed.
    #[error("storage error: {0}")]
    Storage(#[source] Box<dyn StdError + Send + Sync>),
}

/// Domain invariant violations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("name must not be empty")]
    EmptyName,

    #[error("type must not be empty")]
    EmptyKind,

    /// The textual identifier in the request path could not be parsed.
    #[error("invalid identifier: {0}")]
    InvalidId(String),
}

/// A lookup by identifier found nothing.
#[derive(Debug, Clone, thiserror::Error)]
#[error("{entity} with id {id} not found")]
pub struct NotFoundError {
    pub entity: &'static str,
    pub id: String,
}
