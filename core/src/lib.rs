//! Storage core for the todo service.
//!
//! # Overview
//! Holds the `Todo` item type and `TodoStore`, an SQLite-backed handle that
//! maps each CRUD operation to a single SQL statement.
//!
//! # Design
//! - `TodoStore` is constructed once at startup and passed to whoever needs
//!   it; clones share one connection.
//! - `StoreError::NotFound` is a typed sentinel, distinct from backend
//!   failures, which carry the name of the operation that failed.
//! - No HTTP types live here; the server crate owns status-code mapping.

pub mod error;
pub mod store;
pub mod types;

pub use error::StoreError;
pub use store::TodoStore;
pub use types::Todo;
