//! The insert operator.
//!
//! Runs in two phases inside `open`:
//!
//! ```text
//! normalized rows --[Table::make_record]--> records      (pure, may fail)
//! records --[InsertContext::insert_records]--> storage  (one atomic call)
//! ```
//!
//! Nothing reaches storage unless every row materialized. The operator never
//! undoes writes itself: a failed batch is cleaned up by the context, and
//! rolling back the enclosing transaction is the caller's job.

use std::fmt;

use super::context::InsertContext;
use super::error::ExecutorError;
use crate::datum::Value;
use crate::heap::Record;
use crate::stmt::InsertStatement;

/// Lifecycle position of an [`InsertExecutor`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExecutorState {
    /// Created, `open` not yet called.
    Unopened,
    /// `open` was called; the executor only yields end-of-stream from here on.
    Opened,
    /// `close` was called.
    Closed,
}

impl fmt::Display for ExecutorState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ExecutorState::Unopened => "unopened",
            ExecutorState::Opened => "opened",
            ExecutorState::Closed => "closed",
        };
        f.write_str(name)
    }
}

/// Executes one validated [`InsertStatement`].
///
/// Serves exactly one `open` / `next` / `close` lifecycle.
#[derive(Debug)]
pub struct InsertExecutor {
    statement: InsertStatement,
    state: ExecutorState,
    affected_rows: u64,
}

impl InsertExecutor {
    /// Creates an executor that owns `statement`.
    pub fn new(statement: InsertStatement) -> Self {
        Self {
            statement,
            state: ExecutorState::Unopened,
            affected_rows: 0,
        }
    }

    /// Current lifecycle state.
    pub fn state(&self) -> ExecutorState {
        self.state
    }

    /// Rows accepted by the transaction; zero until `open` succeeds.
    pub fn affected_rows(&self) -> u64 {
        self.affected_rows
    }

    /// Performs the insert.
    ///
    /// # Errors
    ///
    /// - `ExecutorError::InvalidState` if `open` was already called
    /// - `ExecutorError::EmptyInsert` if the statement has no rows
    /// - `ExecutorError::MakeRecord` if a row cannot be materialized; the
    ///   context is not called
    /// - `ExecutorError::Transaction` if the context rejects the batch
    ///
    /// The context is untouched in every case but the last.
    pub fn open<C: InsertContext>(&mut self, ctx: &mut C) -> Result<(), ExecutorError> {
        if self.state != ExecutorState::Unopened {
            return Err(ExecutorError::InvalidState {
                operation: "open",
                state: self.state,
            });
        }
        self.state = ExecutorState::Opened;

        let table = self.statement.table();
        let rows = self.statement.rows();
        if rows.is_empty() {
            return Err(ExecutorError::EmptyInsert {
                table: table.name().to_string(),
            });
        }

        // Phase 1: materialize every record before touching storage.
        let records = rows
            .iter()
            .enumerate()
            .map(|(row, values)| {
                table
                    .make_record(values)
                    .map_err(|source| ExecutorError::MakeRecord {
                        table: table.name().to_string(),
                        row,
                        source,
                    })
            })
            .collect::<Result<Vec<Record>, _>>()
            .inspect_err(|e| tracing::warn!(error = %e, "failed to make records"))?;

        // Phase 2: one batched call, all or nothing.
        let count = records.len();
        ctx.insert_records(table, records).inspect_err(|e| {
            tracing::warn!(table = table.name(), error = %e, "failed to insert records")
        })?;

        self.affected_rows = count as u64;
        tracing::debug!(table = table.name(), rows = count, "insert executed");
        Ok(())
    }

    /// An insert produces no result rows: always end-of-stream.
    pub fn next(&mut self) -> Result<Option<Vec<Value>>, ExecutorError> {
        Ok(None)
    }

    /// Releases the executor. Always succeeds.
    pub fn close(&mut self) -> Result<(), ExecutorError> {
        self.state = ExecutorState::Closed;
        Ok(())
    }
}
