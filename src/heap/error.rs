//! Error types for the heap module.

use thiserror::Error;

use super::file::SlotId;
use crate::datum::{SerializationError, Type};

/// Errors from heap operations and record materialization.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HeapError {
    /// The heap already holds its configured maximum of live records.
    #[error("heap full: capacity of {capacity} records reached")]
    HeapFull {
        /// Configured capacity.
        capacity: usize,
    },
    /// Slot not found or already deleted.
    #[error("slot {0} not found or deleted")]
    SlotNotFound(SlotId),
    /// Encoded record exceeds the configured maximum size.
    #[error("record too large: {size} bytes exceeds maximum of {max}")]
    RecordTooLarge {
        /// Encoded size.
        size: usize,
        /// Configured maximum.
        max: usize,
    },
    /// Value count does not match the table's user field count.
    #[error("record has {found} values, table has {expected} fields")]
    FieldCountMismatch {
        /// User field count.
        expected: usize,
        /// Supplied value count.
        found: usize,
    },
    /// Value type cannot be stored in the field.
    #[error("cannot store {found} value in field \"{field}\" of type {expected}")]
    TypeMismatch {
        /// Field name.
        field: String,
        /// Declared type.
        expected: Type,
        /// Supplied value type.
        found: String,
    },
    /// NULL supplied for a NOT NULL field.
    #[error("null value in field \"{field}\" violates not-null constraint")]
    NullViolation {
        /// Field name.
        field: String,
    },
    /// CHAR value is not exactly the declared width.
    #[error("char field \"{field}\" expects {expected} bytes, got {found}")]
    CharWidthMismatch {
        /// Field name.
        field: String,
        /// Declared width.
        expected: usize,
        /// Value length.
        found: usize,
    },
    /// Serialization error.
    #[error("serialization error: {0}")]
    Serialization(#[from] SerializationError),
}
