//! Status codes reported upward to the statement dispatcher.
//!
//! Every error type in the crate maps onto one of these codes via
//! [`StatusCode`], so callers can branch on the outcome class without
//! matching on module-specific variants.

use std::fmt;

/// Outcome class of an insert-path operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Status {
    /// The operation succeeded.
    Success,
    /// Malformed input: empty value list, count mismatch against the column
    /// list, omitted NOT NULL field, oversize value, misuse of the executor.
    InvalidArgument,
    /// The target table does not exist.
    TableNotFound,
    /// A listed column does not exist.
    FieldNotFound,
    /// A full-row insert supplied the wrong number of values.
    FieldCountMismatch,
    /// A value's type is not accepted by its field.
    FieldTypeMismatch,
    /// Operator completion marker; not an error.
    RecordEof,
    /// The session's explicit transaction already failed.
    TransactionAborted,
    /// Storage or transaction failure, propagated unchanged.
    Internal,
}

impl Status {
    /// Returns the stable upper-case code for this status.
    pub const fn code(self) -> &'static str {
        match self {
            Status::Success => "SUCCESS",
            Status::InvalidArgument => "INVALID_ARGUMENT",
            Status::TableNotFound => "SCHEMA_TABLE_NOT_EXIST",
            Status::FieldNotFound => "SCHEMA_FIELD_NOT_EXIST",
            Status::FieldCountMismatch => "SCHEMA_FIELD_MISSING",
            Status::FieldTypeMismatch => "SCHEMA_FIELD_TYPE_MISMATCH",
            Status::RecordEof => "RECORD_EOF",
            Status::TransactionAborted => "TRANSACTION_ABORTED",
            Status::Internal => "INTERNAL",
        }
    }

    /// Status of a completed operation: `Success`, or the error's status.
    pub fn of<T, E: StatusCode>(result: &Result<T, E>) -> Status {
        match result {
            Ok(_) => Status::Success,
            Err(e) => e.status(),
        }
    }

    /// Status of one operator step: `RecordEof` once the operator is
    /// exhausted, `Success` while it yields rows.
    pub fn of_step<T, E: StatusCode>(result: &Result<Option<T>, E>) -> Status {
        match result {
            Ok(Some(_)) => Status::Success,
            Ok(None) => Status::RecordEof,
            Err(e) => e.status(),
        }
    }
}

/// An error that maps onto the status taxonomy.
pub trait StatusCode {
    /// Returns the status this error is reported as.
    fn status(&self) -> Status;
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}
