//! System catalog for table and field metadata.
//!
//! Schema types ([`TableMeta`], [`FieldMeta`]) describe a table's fields,
//! system fields first. [`Catalog`] is the in-memory name → table registry
//! consulted when an INSERT statement is validated.
//!
//! ## System fields
//!
//! | Name    | Type | Description                         |
//! |---------|------|-------------------------------------|
//! | `__trx` | Int8 | Id of the transaction that inserted the row |

mod error;
mod types;

pub use error::CatalogError;
pub use types::{FieldMeta, TableMeta, TRX_FIELD_NAME};

use std::collections::HashMap;
use std::sync::Arc;

use crate::config::EngineConfig;
use crate::sql::CreateTableStmt;
use crate::table::Table;

/// First table ID handed out to user tables.
pub const FIRST_USER_TABLE_ID: u32 = 100;

/// In-memory registry of tables.
pub struct Catalog {
    /// Name → table_id index for O(1) name lookups.
    table_ids: HashMap<String, u32>,
    /// table_id → table.
    tables: HashMap<u32, Arc<Table>>,
    /// Next table ID to allocate.
    next_table_id: u32,
}

impl Default for Catalog {
    fn default() -> Self {
        Self::new()
    }
}

impl Catalog {
    /// Creates an empty catalog.
    pub fn new() -> Self {
        Self {
            table_ids: HashMap::new(),
            tables: HashMap::new(),
            next_table_id: FIRST_USER_TABLE_ID,
        }
    }

    /// Creates a new table from a CREATE TABLE statement.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::TableAlreadyExists` if the name is taken, or a
    /// schema error from [`TableMeta::new`].
    pub fn create_table(
        &mut self,
        stmt: &CreateTableStmt,
        config: &EngineConfig,
    ) -> Result<Arc<Table>, CatalogError> {
        if self.table_ids.contains_key(&stmt.name) {
            return Err(CatalogError::TableAlreadyExists {
                name: stmt.name.clone(),
            });
        }

        let meta = TableMeta::new(self.next_table_id, &stmt.name, &stmt.columns)?;
        let table_id = meta.table_id();
        self.next_table_id += 1;

        let table = Arc::new(Table::new(meta, config));
        self.table_ids.insert(stmt.name.clone(), table_id);
        self.tables.insert(table_id, Arc::clone(&table));

        tracing::debug!(table = %stmt.name, table_id, "created table");
        Ok(table)
    }

    /// Resolves a table by name.
    pub fn find_table(&self, name: &str) -> Option<Arc<Table>> {
        let table_id = self.table_ids.get(name)?;
        self.tables.get(table_id).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sql::{ColumnDef, DataType};

    fn users_stmt() -> CreateTableStmt {
        CreateTableStmt::new(
            "users",
            vec![
                ColumnDef::new("id", DataType::Integer).not_null(),
                ColumnDef::new("name", DataType::Text),
            ],
        )
    }

    #[test]
    fn test_create_and_find_table() {
        let mut catalog = Catalog::new();
        let table = catalog
            .create_table(&users_stmt(), &EngineConfig::default())
            .unwrap();
        assert_eq!(table.table_meta().table_id(), FIRST_USER_TABLE_ID);

        let found = catalog.find_table("users").unwrap();
        assert!(Arc::ptr_eq(&found, &table));

        assert!(catalog.find_table("nonexistent").is_none());
    }

    #[test]
    fn test_table_ids_are_sequential() {
        let mut catalog = Catalog::new();
        let config = EngineConfig::default();
        catalog.create_table(&users_stmt(), &config).unwrap();
        let second = catalog
            .create_table(
                &CreateTableStmt::new("orders", vec![ColumnDef::new("id", DataType::Bigint)]),
                &config,
            )
            .unwrap();
        assert_eq!(second.table_meta().table_id(), FIRST_USER_TABLE_ID + 1);
        assert!(catalog.find_table("users").is_some());
        assert!(Arc::ptr_eq(&catalog.find_table("orders").unwrap(), &second));
    }

    #[test]
    fn test_duplicate_table_rejected() {
        let mut catalog = Catalog::new();
        let config = EngineConfig::default();
        catalog.create_table(&users_stmt(), &config).unwrap();
        let err = catalog.create_table(&users_stmt(), &config).unwrap_err();
        assert_eq!(
            err,
            CatalogError::TableAlreadyExists {
                name: "users".to_string()
            }
        );
        assert_eq!(
            catalog.find_table("users").unwrap().table_meta().table_id(),
            FIRST_USER_TABLE_ID
        );
    }

    #[test]
    fn test_invalid_schema_does_not_consume_id() {
        let mut catalog = Catalog::new();
        let config = EngineConfig::default();
        assert!(catalog
            .create_table(&CreateTableStmt::new("empty", vec![]), &config)
            .is_err());
        let table = catalog.create_table(&users_stmt(), &config).unwrap();
        assert_eq!(table.table_meta().table_id(), FIRST_USER_TABLE_ID);
    }
}
