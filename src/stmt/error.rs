//! Statement validation errors.

use thiserror::Error;

use crate::datum::Type;
use crate::status::{Status, StatusCode};

/// Errors that reject an INSERT statement before anything is stored.
///
/// `row` fields are 0-based indexes into the statement's value rows.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StmtError {
    /// The statement names no table.
    #[error("invalid argument: missing table name")]
    MissingTableName,

    /// The statement carries no value rows.
    #[error("invalid argument: no values to insert into \"{table}\"")]
    EmptyValues { table: String },

    /// Referenced table does not exist.
    #[error("table \"{name}\" does not exist")]
    TableNotFound { name: String },

    /// A listed column does not exist (or is a system field).
    #[error("column \"{field}\" of relation \"{table}\" does not exist")]
    FieldNotFound { table: String, field: String },

    /// A column appears twice in the column list.
    #[error("column \"{field}\" of relation \"{table}\" specified more than once")]
    DuplicateField { table: String, field: String },

    /// A NOT NULL field was left out of the column list.
    #[error("null value in column \"{field}\" of relation \"{table}\" violates not-null constraint")]
    RequiredFieldOmitted { table: String, field: String },

    /// A full-row insert supplied the wrong number of values.
    #[error("row {row}: table \"{table}\" has {expected} fields, {found} values supplied")]
    FieldCountMismatch {
        table: String,
        row: usize,
        expected: usize,
        found: usize,
    },

    /// A row's value count differs from the column list length.
    #[error("row {row}: {expected} columns listed, {found} values supplied")]
    ValueCountMismatch {
        row: usize,
        expected: usize,
        found: usize,
    },

    /// A value's type is not accepted by its field.
    #[error("row {row}: column \"{field}\" is of type {expected} but value is of type {found}")]
    FieldTypeMismatch {
        table: String,
        row: usize,
        field: String,
        expected: Type,
        found: String,
    },

    /// A CHAR value is longer than its field's declared width.
    #[error("row {row}: value of {len} bytes too long for column \"{field}\" of type char({max})")]
    CharTooLong {
        row: usize,
        field: String,
        len: usize,
        max: usize,
    },

    /// A TEXT value is longer than the maximum text length.
    #[error("row {row}: value of {len} bytes too long for text column \"{field}\" (max {max})")]
    TextTooLong {
        row: usize,
        field: String,
        len: usize,
        max: usize,
    },
}

impl StatusCode for StmtError {
    fn status(&self) -> Status {
        match self {
            StmtError::TableNotFound { .. } => Status::TableNotFound,
            StmtError::FieldNotFound { .. } => Status::FieldNotFound,
            StmtError::FieldCountMismatch { .. } => Status::FieldCountMismatch,
            StmtError::FieldTypeMismatch { .. } => Status::FieldTypeMismatch,
            StmtError::MissingTableName
            | StmtError::EmptyValues { .. }
            | StmtError::DuplicateField { .. }
            | StmtError::RequiredFieldOmitted { .. }
            | StmtError::ValueCountMismatch { .. }
            | StmtError::CharTooLong { .. }
            | StmtError::TextTooLong { .. } => Status::InvalidArgument,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(StmtError::MissingTableName.status(), Status::InvalidArgument);
        assert_eq!(
            StmtError::TableNotFound { name: "t".into() }.status(),
            Status::TableNotFound
        );
        assert_eq!(
            StmtError::FieldCountMismatch {
                table: "t".into(),
                row: 0,
                expected: 2,
                found: 1
            }
            .status(),
            Status::FieldCountMismatch
        );
        assert_eq!(
            StmtError::CharTooLong {
                row: 0,
                field: "b".into(),
                len: 13,
                max: 4
            }
            .status(),
            Status::InvalidArgument
        );
    }

    #[test]
    fn test_display_carries_context() {
        let err = StmtError::FieldTypeMismatch {
            table: "t".into(),
            row: 2,
            field: "a".into(),
            expected: Type::Int4,
            found: "character".into(),
        };
        assert_eq!(
            err.to_string(),
            "row 2: column \"a\" is of type integer but value is of type character"
        );

        let err = StmtError::DuplicateField {
            table: "t".into(),
            field: "b".into(),
        };
        assert_eq!(
            err.to_string(),
            "column \"b\" of relation \"t\" specified more than once"
        );
    }
}
