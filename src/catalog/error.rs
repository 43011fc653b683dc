//! Catalog-specific errors.

use thiserror::Error;

/// Errors that can occur during catalog operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
    /// Table already exists.
    #[error("table \"{name}\" already exists")]
    TableAlreadyExists { name: String },

    /// A table must declare at least one user field.
    #[error("table \"{table}\" has no columns")]
    EmptySchema { table: String },

    /// Two columns share a name.
    #[error("column \"{field}\" specified more than once in table \"{table}\"")]
    DuplicateField { table: String, field: String },

    /// Column name collides with the system field namespace.
    #[error("column name \"{field}\" is reserved for system fields")]
    ReservedFieldName { field: String },

    /// Fixed-width column declared with zero length.
    #[error("length for type char must be at least 1 (column \"{field}\")")]
    InvalidFieldLength { field: String },
}
