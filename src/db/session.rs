//! Client session management for database operations.
//!
//! The [`Session`] type represents a single client session and manages
//! transaction state and statement execution on top of a shared
//! [`Database`].

use std::sync::Arc;

use super::Database;
use super::error::DatabaseError;
use crate::datum::Value;
use crate::executor::InsertExecutor;
use crate::sql::ParsedInsert;
use crate::status::Status;
use crate::tx::{Transaction, TxId};

/// An explicit transaction opened with [`Session::begin`].
#[derive(Debug)]
struct ExplicitTransaction {
    tx: Transaction,
    /// Whether a statement failed and the transaction awaits ROLLBACK.
    failed: bool,
}

/// A client session managing transaction state and statement execution.
///
/// Outside an explicit transaction every statement runs in its own
/// auto-commit transaction. Inside one, a failing statement marks the
/// transaction failed: later statements are refused with
/// [`DatabaseError::TransactionAborted`] until it is rolled back.
///
/// Dropping a session rolls back its open transaction.
pub struct Session {
    database: Arc<Database>,
    transaction: Option<ExplicitTransaction>,
}

impl Session {
    /// Creates a new session with the given database.
    pub fn new(database: Arc<Database>) -> Self {
        Self {
            database,
            transaction: None,
        }
    }

    /// Returns a reference to the underlying database.
    pub fn database(&self) -> &Arc<Database> {
        &self.database
    }

    /// Returns the id of the explicit transaction, if one is open.
    pub fn current_txid(&self) -> Option<TxId> {
        self.transaction.as_ref().map(|t| t.tx.id())
    }

    /// Returns true if the explicit transaction has failed.
    pub fn transaction_failed(&self) -> bool {
        self.transaction.as_ref().is_some_and(|t| t.failed)
    }

    /// Begins an explicit transaction.
    ///
    /// If already in a transaction, this is a no-op (following PostgreSQL behavior).
    pub fn begin(&mut self) {
        if self.transaction.is_none() {
            let tx = self.database.tx_manager().begin();
            self.transaction = Some(ExplicitTransaction { tx, failed: false });
        }
    }

    /// Commits the current transaction.
    ///
    /// If not in a transaction, this is a no-op.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::TransactionAborted` if the transaction had
    /// failed; it is rolled back instead.
    pub fn commit(&mut self) -> Result<(), DatabaseError> {
        let Some(explicit) = self.transaction.take() else {
            return Ok(());
        };
        if explicit.failed {
            self.database.tx_manager().abort(explicit.tx)?;
            return Err(DatabaseError::TransactionAborted);
        }
        self.database.tx_manager().commit(explicit.tx)?;
        Ok(())
    }

    /// Rolls back the current transaction, discarding its inserts.
    ///
    /// If not in a transaction, this is a no-op.
    pub fn rollback(&mut self) -> Result<(), DatabaseError> {
        if let Some(explicit) = self.transaction.take() {
            self.database.tx_manager().abort(explicit.tx)?;
        }
        Ok(())
    }

    /// Validates and executes an INSERT, returning the number of rows inserted.
    ///
    /// Either every row of the statement is inserted or none is.
    pub fn execute_insert(&mut self, insert: &ParsedInsert) -> Result<u64, DatabaseError> {
        let result = self.within_transaction(|db, tx| {
            let stmt = db.prepare_insert(insert)?;
            let mut executor = InsertExecutor::new(stmt);
            executor.open(tx)?;
            loop {
                let step = executor.next();
                if Status::of_step(&step) == Status::RecordEof {
                    break;
                }
                step?;
            }
            executor.close()?;
            Ok(executor.affected_rows())
        });
        tracing::debug!(table = %insert.table, status = %Status::of(&result), "insert finished");
        result
    }

    /// Returns the rows of `table` visible to this session.
    pub fn scan(&self, table: &str) -> Result<Vec<Vec<Value>>, DatabaseError> {
        self.database
            .scan_table(table, self.transaction.as_ref().map(|t| &t.tx))
    }

    /// Executes a function within a transaction context.
    ///
    /// - Refuses to run if the explicit transaction has failed
    /// - Creates an auto-commit transaction if not currently in one
    /// - On success: commits the transaction if in auto-commit mode
    /// - On error: aborts the transaction if in auto-commit mode, or sets
    ///   the failed flag if in an explicit transaction
    fn within_transaction<T, F>(&mut self, f: F) -> Result<T, DatabaseError>
    where
        F: FnOnce(&Database, &mut Transaction) -> Result<T, DatabaseError>,
    {
        match &mut self.transaction {
            Some(explicit) if explicit.failed => Err(DatabaseError::TransactionAborted),
            Some(explicit) => {
                let result = f(&self.database, &mut explicit.tx);
                if let Err(e) = &result {
                    tracing::warn!(txid = %explicit.tx.id(), error = %e, "statement failed, transaction marked aborted");
                    explicit.failed = true;
                }
                result
            }
            None => {
                let mut tx = self.database.tx_manager().begin();
                match f(&self.database, &mut tx) {
                    Ok(result) => {
                        self.database.tx_manager().commit(tx)?;
                        Ok(result)
                    }
                    Err(e) => {
                        if let Err(abort_err) = self.database.tx_manager().abort(tx) {
                            tracing::error!(error = %abort_err, "failed to abort auto-commit transaction");
                        }
                        Err(e)
                    }
                }
            }
        }
    }
}

impl Drop for Session {
    fn drop(&mut self) {
        if let Some(explicit) = self.transaction.take() {
            let txid = explicit.tx.id();
            if let Err(e) = self.database.tx_manager().abort(explicit.tx) {
                tracing::error!(%txid, error = %e, "failed to roll back transaction of dropped session");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EngineConfig;
    use crate::sql::{ColumnDef, CreateTableStmt, DataType};
    use crate::status::StatusCode;
    use crate::tx::TxState;

    fn open_test_db() -> Arc<Database> {
        let db = Database::new(EngineConfig::default());
        db.create_table(&CreateTableStmt::new(
            "t",
            vec![
                ColumnDef::new("a", DataType::Integer),
                ColumnDef::new("b", DataType::Char(4)).not_null(),
            ],
        ))
        .unwrap();
        Arc::new(db)
    }

    fn row(a: i32, b: &str) -> Vec<Value> {
        vec![Value::Int32(a), Value::Chars(b.as_bytes().to_vec())]
    }

    #[test]
    fn test_session_transaction_lifecycle() {
        let mut session = Session::new(open_test_db());

        assert!(session.current_txid().is_none());

        session.begin();
        let txid = session.current_txid().unwrap();
        assert!(!session.transaction_failed());

        // nested BEGIN is a no-op
        session.begin();
        assert_eq!(session.current_txid(), Some(txid));

        session.commit().unwrap();
        assert!(session.current_txid().is_none());
        assert_eq!(
            session.database().tx_manager().state(txid),
            Some(TxState::Committed)
        );
    }

    #[test]
    fn test_auto_commit_insert() {
        let mut session = Session::new(open_test_db());

        let count = session
            .execute_insert(&ParsedInsert::new("t", vec![row(1, "a"), row(2, "b")]))
            .unwrap();
        assert_eq!(count, 2);
        assert!(session.current_txid().is_none());
        assert_eq!(session.scan("t").unwrap().len(), 2);
        assert_eq!(session.database().tx_manager().active_count(), 0);
    }

    #[test]
    fn test_auto_commit_failure_aborts() {
        let mut session = Session::new(open_test_db());

        let err = session
            .execute_insert(&ParsedInsert::new("t", vec![row(1, "toolong")]))
            .unwrap_err();
        assert_eq!(err.status(), Status::InvalidArgument);
        assert!(session.scan("t").unwrap().is_empty());
        assert_eq!(session.database().tx_manager().active_count(), 0);
    }

    #[test]
    fn test_explicit_transaction_visibility() {
        let db = open_test_db();
        let mut writer = Session::new(Arc::clone(&db));
        let reader = Session::new(Arc::clone(&db));

        writer.begin();
        writer
            .execute_insert(&ParsedInsert::new("t", vec![row(1, "a")]))
            .unwrap();
        assert_eq!(writer.scan("t").unwrap().len(), 1);
        assert!(reader.scan("t").unwrap().is_empty());

        writer.commit().unwrap();
        assert_eq!(reader.scan("t").unwrap().len(), 1);
    }

    #[test]
    fn test_failed_transaction_refuses_statements() {
        let mut session = Session::new(open_test_db());
        session.begin();
        session
            .execute_insert(&ParsedInsert::new("t", vec![row(1, "a")]))
            .unwrap();

        let err = session
            .execute_insert(&ParsedInsert::new("missing", vec![row(1, "a")]))
            .unwrap_err();
        assert_eq!(err.status(), Status::TableNotFound);
        assert!(session.transaction_failed());

        assert_eq!(
            session.execute_insert(&ParsedInsert::new("t", vec![row(2, "b")])),
            Err(DatabaseError::TransactionAborted)
        );

        // COMMIT of a failed transaction rolls back
        assert_eq!(session.commit(), Err(DatabaseError::TransactionAborted));
        assert!(session.current_txid().is_none());
        assert!(session.scan("t").unwrap().is_empty());
    }

    #[test]
    fn test_rollback_discards_inserts() {
        let mut session = Session::new(open_test_db());
        session.begin();
        session
            .execute_insert(&ParsedInsert::new("t", vec![row(1, "a"), row(2, "b")]))
            .unwrap();
        session.rollback().unwrap();

        assert!(session.scan("t").unwrap().is_empty());
        let table = session.database().find_table("t").unwrap();
        assert_eq!(table.record_count(), 0);
    }

    #[test]
    fn test_drop_rolls_back() {
        let db = open_test_db();
        {
            let mut session = Session::new(Arc::clone(&db));
            session.begin();
            session
                .execute_insert(&ParsedInsert::new("t", vec![row(1, "a")]))
                .unwrap();
        }
        assert_eq!(db.find_table("t").unwrap().record_count(), 0);
        assert_eq!(db.tx_manager().active_count(), 0);
    }
}
