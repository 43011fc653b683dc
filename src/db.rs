//! Database orchestrator and client sessions.
//!
//! [`Database`] owns the shared infrastructure (catalog, transaction
//! manager, configuration). [`Session`] is the per-client dispatcher that
//! runs statements in auto-commit or explicit transactions.
//!
//! ```text
//! Session::execute_insert(ParsedInsert)
//!   |
//!   +-- Database::prepare_insert  -> InsertStatement   (catalog read lock)
//!   +-- InsertExecutor::open(&mut Transaction)         (phase 1 + phase 2)
//!   +-- commit / abort / mark failed
//! ```

mod database;
mod error;
mod session;

pub use database::Database;
pub use error::DatabaseError;
pub use session::Session;
