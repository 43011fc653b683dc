//! Slot-addressed record store for a single table.

use std::fmt;

use super::error::HeapError;
use super::record::Record;

/// Slot index within a heap file.
pub type SlotId = u32;

/// Global identifier for a record (table + slot).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RecordId {
    /// Table owning the record.
    pub table_id: u32,
    /// Slot within the table's heap.
    pub slot_id: SlotId,
}

impl RecordId {
    /// Creates a new record identifier.
    pub fn new(table_id: u32, slot_id: SlotId) -> Self {
        Self { table_id, slot_id }
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({},{})", self.table_id, self.slot_id)
    }
}

/// An in-memory heap of records.
///
/// Deleted slots are kept on a free list and reused by later inserts, so a
/// [`SlotId`] is only stable while its record is live.
#[derive(Debug, Default)]
pub struct HeapFile {
    slots: Vec<Option<Record>>,
    free_slots: Vec<SlotId>,
    live: usize,
    capacity: Option<usize>,
}

impl HeapFile {
    /// Creates an empty heap; `capacity` bounds the number of live records.
    pub fn new(capacity: Option<usize>) -> Self {
        Self {
            capacity,
            ..Self::default()
        }
    }

    /// Inserts a record and returns its slot ID.
    ///
    /// # Errors
    ///
    /// Returns `HeapError::HeapFull` when the capacity is reached.
    pub fn insert(&mut self, record: Record) -> Result<SlotId, HeapError> {
        if let Some(capacity) = self.capacity {
            if self.live >= capacity {
                return Err(HeapError::HeapFull { capacity });
            }
        }

        let slot_id = match self.free_slots.pop() {
            Some(slot_id) => {
                self.slots[slot_id as usize] = Some(record);
                slot_id
            }
            None => {
                self.slots.push(Some(record));
                (self.slots.len() - 1) as SlotId
            }
        };
        self.live += 1;
        Ok(slot_id)
    }

    /// Removes a record and returns it.
    ///
    /// # Errors
    ///
    /// Returns `HeapError::SlotNotFound` if the slot doesn't exist or is already deleted.
    pub fn delete(&mut self, slot_id: SlotId) -> Result<Record, HeapError> {
        let record = self
            .slots
            .get_mut(slot_id as usize)
            .and_then(Option::take)
            .ok_or(HeapError::SlotNotFound(slot_id))?;
        self.free_slots.push(slot_id);
        self.live -= 1;
        Ok(record)
    }

    /// Iterates over live records in slot order.
    pub fn iter(&self) -> impl Iterator<Item = (SlotId, &Record)> {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(i, slot)| slot.as_ref().map(|r| (i as SlotId, r)))
    }

    /// Returns the number of live records.
    pub fn record_count(&self) -> usize {
        self.live
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::TableMeta;
    use crate::datum::Value;
    use crate::sql::{ColumnDef, DataType};

    fn record(n: i32) -> Record {
        let meta =
            TableMeta::new(100, "t", &[ColumnDef::new("a", DataType::Integer)]).unwrap();
        Record::encode(&meta, &[Value::Int32(n)]).unwrap()
    }

    #[test]
    fn test_insert_and_iter() {
        let mut heap = HeapFile::new(None);
        let s0 = heap.insert(record(1)).unwrap();
        let s1 = heap.insert(record(2)).unwrap();
        assert_eq!((s0, s1), (0, 1));
        assert_eq!(heap.record_count(), 2);
        let stored: Vec<_> = heap.iter().collect();
        assert_eq!(stored, vec![(0, &record(1)), (1, &record(2))]);
    }

    #[test]
    fn test_delete_reuses_slot() {
        let mut heap = HeapFile::new(None);
        heap.insert(record(1)).unwrap();
        let s1 = heap.insert(record(2)).unwrap();
        assert_eq!(heap.delete(s1).unwrap(), record(2));
        assert!(heap.iter().all(|(slot, _)| slot != s1));
        assert_eq!(heap.record_count(), 1);

        let reused = heap.insert(record(3)).unwrap();
        assert_eq!(reused, s1);
        assert_eq!(heap.record_count(), 2);
    }

    #[test]
    fn test_delete_missing_slot() {
        let mut heap = HeapFile::new(None);
        assert_eq!(heap.delete(0), Err(HeapError::SlotNotFound(0)));
        let s0 = heap.insert(record(1)).unwrap();
        heap.delete(s0).unwrap();
        assert_eq!(heap.delete(s0), Err(HeapError::SlotNotFound(s0)));
    }

    #[test]
    fn test_capacity() {
        let mut heap = HeapFile::new(Some(2));
        heap.insert(record(1)).unwrap();
        let s1 = heap.insert(record(2)).unwrap();
        assert_eq!(
            heap.insert(record(3)),
            Err(HeapError::HeapFull { capacity: 2 })
        );
        heap.delete(s1).unwrap();
        assert!(heap.insert(record(3)).is_ok());
    }

    #[test]
    fn test_iter_skips_deleted() {
        let mut heap = HeapFile::new(None);
        for n in 0..4 {
            heap.insert(record(n)).unwrap();
        }
        heap.delete(1).unwrap();
        let slots: Vec<_> = heap.iter().map(|(slot, _)| slot).collect();
        assert_eq!(slots, vec![0, 2, 3]);
    }
}
