//! Error types for the todo store.
//!
//! # Design
//! `NotFound` gets a dedicated variant so callers can tell "no row with that
//! id" apart from a backend failure by matching, never by comparing message
//! text. Every other failure lands in `Storage`, tagged with the store
//! operation that produced it.

use std::fmt::Display;

use thiserror::Error;

/// Errors returned by `TodoStore` operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// No todo has the requested id.
    #[error("todo {0}: no such todo")]
    NotFound(i64),

    /// The SQLite backend failed while running `op`.
    #[error("{op}: {message}")]
    Storage { op: &'static str, message: String },
}

impl StoreError {
    pub(crate) fn storage(op: &'static str, err: impl Display) -> Self {
        StoreError::Storage {
            op,
            message: err.to_string(),
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, StoreError::NotFound(_))
    }
}
