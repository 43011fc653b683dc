//! Tables: schema plus record storage.
//!
//! A [`Table`] is shared (`Arc<Table>`) between the catalog, validated
//! statements and transactions. Its schema is immutable; its heap is behind a
//! lock so independent sessions can insert concurrently.

use parking_lot::RwLock;

use crate::catalog::TableMeta;
use crate::config::EngineConfig;
use crate::datum::Value;
use crate::heap::{HeapError, HeapFile, Record, RecordId};
use crate::tx::TxId;

/// A table with its heap of records.
#[derive(Debug)]
pub struct Table {
    meta: TableMeta,
    heap: RwLock<HeapFile>,
    max_record_size: usize,
}

impl Table {
    /// Creates an empty table.
    pub fn new(meta: TableMeta, config: &EngineConfig) -> Self {
        Self {
            meta,
            heap: RwLock::new(HeapFile::new(config.heap_capacity)),
            max_record_size: config.max_record_size,
        }
    }

    /// Returns the table schema.
    pub fn table_meta(&self) -> &TableMeta {
        &self.meta
    }

    /// Table name.
    pub fn name(&self) -> &str {
        self.meta.name()
    }

    /// Materializes a physical record from one normalized row.
    ///
    /// Pure: the heap is not touched.
    ///
    /// # Errors
    ///
    /// Returns an encoding error from [`Record::encode`], or
    /// `HeapError::RecordTooLarge` if the encoded row exceeds the configured
    /// maximum record size.
    pub fn make_record(&self, values: &[Value]) -> Result<Record, HeapError> {
        let record = Record::encode(&self.meta, values)?;
        if record.size() > self.max_record_size {
            return Err(HeapError::RecordTooLarge {
                size: record.size(),
                max: self.max_record_size,
            });
        }
        Ok(record)
    }

    /// Stores a record in the heap.
    pub fn insert_record(&self, record: Record) -> Result<RecordId, HeapError> {
        let slot_id = self.heap.write().insert(record)?;
        Ok(RecordId::new(self.meta.table_id(), slot_id))
    }

    /// Removes a record from the heap.
    ///
    /// # Errors
    ///
    /// Returns `HeapError::SlotNotFound` if `rid` does not address a live
    /// record of this table.
    pub fn delete_record(&self, rid: RecordId) -> Result<Record, HeapError> {
        if rid.table_id != self.meta.table_id() {
            return Err(HeapError::SlotNotFound(rid.slot_id));
        }
        self.heap.write().delete(rid.slot_id)
    }

    /// Returns the number of stored records, regardless of visibility.
    pub fn record_count(&self) -> usize {
        self.heap.read().record_count()
    }

    /// Decodes every record whose inserting transaction satisfies `visible`.
    pub fn scan<F>(&self, visible: F) -> Result<Vec<Vec<Value>>, HeapError>
    where
        F: Fn(TxId) -> bool,
    {
        let heap = self.heap.read();
        heap.iter()
            .filter(|(_, record)| visible(record.trx_id()))
            .map(|(_, record)| record.decode(&self.meta).map_err(HeapError::from))
            .collect()
    }
}
