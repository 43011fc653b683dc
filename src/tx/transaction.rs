//! An active transaction and its write set.

use std::sync::Arc;

use super::error::TxError;
use super::types::TxId;
use crate::heap::{Record, RecordId};
use crate::table::Table;

/// An in-progress transaction.
///
/// Created by [`TransactionManager::begin`](super::TransactionManager::begin)
/// and consumed by `commit` or `abort`, so a `Transaction` value is always
/// active. The write set remembers every record inserted so that `abort` can
/// remove them.
#[derive(Debug)]
pub struct Transaction {
    txid: TxId,
    write_set: Vec<(Arc<Table>, RecordId)>,
}

impl Transaction {
    pub(super) fn new(txid: TxId) -> Self {
        Self {
            txid,
            write_set: Vec::new(),
        }
    }

    /// Returns the transaction ID.
    pub fn id(&self) -> TxId {
        self.txid
    }

    /// Returns the number of records written by this transaction.
    pub fn write_count(&self) -> usize {
        self.write_set.len()
    }

    /// Inserts a batch of records into `table` as one atomic step.
    ///
    /// Each record is stamped with this transaction's id and stored in order.
    /// If any insert fails, the records already stored by this call are
    /// removed before the error is returned, so the batch is applied either
    /// completely or not at all. Records from earlier calls are untouched;
    /// discarding those is the job of [`abort`](super::TransactionManager::abort).
    ///
    /// # Errors
    ///
    /// Returns `TxError::InsertFailed` naming the failing record's index.
    pub fn insert_records(
        &mut self,
        table: &Arc<Table>,
        records: Vec<Record>,
    ) -> Result<(), TxError> {
        let mut inserted = Vec::with_capacity(records.len());

        for (row, mut record) in records.into_iter().enumerate() {
            record.set_trx_id(self.txid);
            match table.insert_record(record) {
                Ok(rid) => inserted.push(rid),
                Err(source) => {
                    tracing::warn!(
                        txid = %self.txid,
                        table = table.name(),
                        row,
                        inserted = inserted.len(),
                        error = %source,
                        "batched insert failed, removing partial batch"
                    );
                    undo(table, inserted);
                    return Err(TxError::InsertFailed {
                        txid: self.txid,
                        table: table.name().to_string(),
                        row,
                        source,
                    });
                }
            }
        }

        self.write_set
            .extend(inserted.into_iter().map(|rid| (Arc::clone(table), rid)));
        Ok(())
    }

    /// Removes every record written by this transaction, newest first.
    pub(super) fn discard_writes(&mut self) {
        while let Some((table, rid)) = self.write_set.pop() {
            if let Err(e) = table.delete_record(rid) {
                tracing::error!(txid = %self.txid, %rid, error = %e, "failed to undo insert");
            }
        }
    }

    /// Forgets the write set once the transaction has committed.
    pub(super) fn release_writes(&mut self) {
        self.write_set.clear();
    }
}

fn undo(table: &Table, inserted: Vec<RecordId>) {
    for rid in inserted.into_iter().rev() {
        if let Err(e) = table.delete_record(rid) {
            tracing::error!(table = table.name(), %rid, error = %e, "failed to undo insert");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::TableMeta;
    use crate::config::EngineConfig;
    use crate::datum::Value;
    use crate::sql::{ColumnDef, DataType};

    fn sample_table(capacity: Option<usize>) -> Arc<Table> {
        let meta =
            TableMeta::new(100, "t", &[ColumnDef::new("a", DataType::Integer)]).unwrap();
        let config = EngineConfig {
            heap_capacity: capacity,
            ..EngineConfig::default()
        };
        Arc::new(Table::new(meta, &config))
    }

    fn records(table: &Table, n: i32) -> Vec<Record> {
        (0..n)
            .map(|i| table.make_record(&[Value::Int32(i)]).unwrap())
            .collect()
    }

    #[test]
    fn test_insert_records_stamps_txid() {
        let table = sample_table(None);
        let mut tx = Transaction::new(TxId::new(7));
        tx.insert_records(&table, records(&table, 3)).unwrap();

        assert_eq!(tx.write_count(), 3);
        assert_eq!(table.record_count(), 3);
        assert_eq!(table.scan(|txid| txid == TxId::new(7)).unwrap().len(), 3);
    }

    #[test]
    fn test_failed_batch_leaves_nothing() {
        let table = sample_table(Some(2));
        let mut tx = Transaction::new(TxId::new(7));
        let err = tx.insert_records(&table, records(&table, 3)).unwrap_err();

        assert!(matches!(
            err,
            TxError::InsertFailed {
                row: 2,
                source: crate::heap::HeapError::HeapFull { capacity: 2 },
                ..
            }
        ));
        assert_eq!(table.record_count(), 0);
        assert_eq!(tx.write_count(), 0);
    }

    #[test]
    fn test_failed_batch_keeps_earlier_writes() {
        let table = sample_table(Some(3));
        let mut tx = Transaction::new(TxId::new(7));
        tx.insert_records(&table, records(&table, 2)).unwrap();
        assert!(tx.insert_records(&table, records(&table, 2)).is_err());

        assert_eq!(tx.write_count(), 2);
        assert_eq!(table.record_count(), 2);
    }

    #[test]
    fn test_discard_writes() {
        let table = sample_table(None);
        let mut tx = Transaction::new(TxId::new(7));
        tx.insert_records(&table, records(&table, 4)).unwrap();
        tx.discard_writes();
        assert_eq!(tx.write_count(), 0);
        assert_eq!(table.record_count(), 0);
    }
}
