//! Executor-specific errors.

use thiserror::Error;

use super::insert::ExecutorState;
use crate::heap::HeapError;
use crate::status::{Status, StatusCode};
use crate::tx::TxError;

/// Errors that can occur while executing an insert.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExecutorError {
    /// The statement carries no rows; the transaction was not touched.
    #[error("invalid argument: nothing to insert into \"{table}\"")]
    EmptyInsert { table: String },

    /// The operation is not valid in the executor's current state.
    #[error("invalid argument: cannot {operation} an executor that is {state}")]
    InvalidState {
        operation: &'static str,
        state: ExecutorState,
    },

    /// A row could not be materialized into a record. Nothing was stored.
    #[error("failed to build record for row {row} of \"{table}\": {source}")]
    MakeRecord {
        table: String,
        row: usize,
        #[source]
        source: HeapError,
    },

    /// The batched insert was rejected by the transaction.
    #[error(transparent)]
    Transaction(#[from] TxError),
}

impl StatusCode for ExecutorError {
    fn status(&self) -> Status {
        match self {
            ExecutorError::EmptyInsert { .. } | ExecutorError::InvalidState { .. } => {
                Status::InvalidArgument
            }
            ExecutorError::MakeRecord { .. } | ExecutorError::Transaction(_) => Status::Internal,
        }
    }
}
