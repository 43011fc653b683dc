//! Transaction seam for executor nodes.
//!
//! [`InsertContext`] is the only storage operation an insert needs: a
//! batched, all-or-nothing insert into one table. Keeping it behind a trait
//! lets the executor run against a real [`Transaction`] or a test double.

use std::sync::Arc;

use crate::heap::Record;
use crate::table::Table;
use crate::tx::{Transaction, TxError};

/// Batched record insertion on behalf of one transaction.
pub trait InsertContext {
    /// Inserts every record into `table`, or none of them.
    ///
    /// On error the implementation has already removed any record of this
    /// batch it stored. Rolling back the enclosing transaction remains the
    /// caller's job.
    fn insert_records(&mut self, table: &Arc<Table>, records: Vec<Record>) -> Result<(), TxError>;
}

impl InsertContext for Transaction {
    fn insert_records(&mut self, table: &Arc<Table>, records: Vec<Record>) -> Result<(), TxError> {
        Transaction::insert_records(self, table, records)
    }
}
