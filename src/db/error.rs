//! Database-level errors.

use thiserror::Error;

use crate::catalog::CatalogError;
use crate::executor::ExecutorError;
use crate::heap::HeapError;
use crate::status::{Status, StatusCode};
use crate::stmt::StmtError;
use crate::tx::TxError;

/// Errors that can occur during database operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DatabaseError {
    /// Catalog error.
    #[error("catalog error: {0}")]
    Catalog(#[from] CatalogError),
    /// The statement failed validation.
    #[error(transparent)]
    Statement(#[from] StmtError),
    /// Executor error.
    #[error(transparent)]
    Executor(#[from] ExecutorError),
    /// Transaction error.
    #[error("transaction error: {0}")]
    Transaction(#[from] TxError),
    /// Heap error while reading a table.
    #[error("storage error: {0}")]
    Storage(#[from] HeapError),
    /// Referenced table does not exist.
    #[error("table \"{name}\" does not exist")]
    TableNotFound { name: String },
    /// The current transaction is aborted; commands are ignored until ROLLBACK.
    #[error("current transaction is aborted, commands ignored until end of transaction block")]
    TransactionAborted,
}

impl StatusCode for DatabaseError {
    fn status(&self) -> Status {
        match self {
            DatabaseError::Statement(e) => e.status(),
            DatabaseError::Executor(e) => e.status(),
            DatabaseError::Catalog(_) => Status::InvalidArgument,
            DatabaseError::TableNotFound { .. } => Status::TableNotFound,
            DatabaseError::TransactionAborted => Status::TransactionAborted,
            DatabaseError::Transaction(_) | DatabaseError::Storage(_) => Status::Internal,
        }
    }
}
