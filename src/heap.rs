//! Heap storage for table records.
//!
//! The term "heap" refers to an unordered collection of records, as opposed
//! to indexed structures like B+trees.
//!
//! - [`HeapFile`]: slot-addressed record store with free-slot reuse
//! - [`Record`]: a physically encoded row (system fields + user values)
//! - [`RecordId`]: table + slot address of a stored record

mod error;
mod file;
mod record;

pub use error::HeapError;
pub use file::{HeapFile, RecordId, SlotId};
pub use record::Record;
