//! Transaction management for the insert path.
//!
//! - [`TransactionManager`] allocates transaction ids and tracks their state
//! - [`Transaction`] owns the write set of one transaction and applies
//!   batched inserts all-or-nothing
//!
//! A row is visible to other transactions once its inserting transaction has
//! committed. Aborting a transaction removes every row it inserted.

mod error;
mod manager;
mod transaction;
mod types;

pub use error::TxError;
pub use manager::TransactionManager;
pub use transaction::Transaction;
pub use types::{TxId, TxState};
