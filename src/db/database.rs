//! Database orchestrator for catalog, transaction manager, and configuration.

use std::sync::Arc;

use parking_lot::RwLock;

use super::error::DatabaseError;
use crate::catalog::Catalog;
use crate::config::EngineConfig;
use crate::datum::Value;
use crate::sql::{CreateTableStmt, ParsedInsert};
use crate::stmt::{InsertStatement, StmtError};
use crate::table::Table;
use crate::tx::{Transaction, TransactionManager};

/// Database orchestrates the core components: Catalog and TransactionManager.
///
/// Shared between sessions as `Arc<Database>`. The catalog is behind a lock;
/// tables handed out by it are independently lockable, so inserts into a
/// table never hold the catalog lock.
pub struct Database {
    config: EngineConfig,
    catalog: RwLock<Catalog>,
    tx_manager: Arc<TransactionManager>,
}

impl Database {
    /// Creates an empty database.
    pub fn new(config: EngineConfig) -> Self {
        tracing::info!(
            max_text_length = config.max_text_length,
            max_record_size = config.max_record_size,
            heap_capacity = ?config.heap_capacity,
            "database initialized"
        );
        Self {
            config,
            catalog: RwLock::new(Catalog::new()),
            tx_manager: Arc::new(TransactionManager::new()),
        }
    }

    /// Returns the engine configuration.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Returns a reference to the transaction manager.
    pub fn tx_manager(&self) -> &Arc<TransactionManager> {
        &self.tx_manager
    }

    /// Creates a table.
    ///
    /// DDL is not transactional: the table exists as soon as this returns.
    pub fn create_table(&self, stmt: &CreateTableStmt) -> Result<Arc<Table>, DatabaseError> {
        let table = self.catalog.write().create_table(stmt, &self.config)?;
        Ok(table)
    }

    /// Resolves a table by name.
    pub fn find_table(&self, name: &str) -> Option<Arc<Table>> {
        self.catalog.read().find_table(name)
    }

    /// Validates an INSERT against the current catalog.
    pub fn prepare_insert(&self, insert: &ParsedInsert) -> Result<InsertStatement, StmtError> {
        let catalog = self.catalog.read();
        InsertStatement::create(&catalog, insert, &self.config)
    }

    /// Returns the user field values of every row visible to `reader`.
    ///
    /// A row is visible if its inserting transaction committed, or if it is
    /// `reader` itself.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::TableNotFound` for an unknown table.
    pub fn scan_table(
        &self,
        name: &str,
        reader: Option<&Transaction>,
    ) -> Result<Vec<Vec<Value>>, DatabaseError> {
        let table = self
            .find_table(name)
            .ok_or_else(|| DatabaseError::TableNotFound {
                name: name.to_string(),
            })?;
        let own = reader.map(Transaction::id);
        let rows = table.scan(|txid| Some(txid) == own || self.tx_manager.is_committed(txid))?;
        Ok(rows)
    }
}
