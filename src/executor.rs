//! Query executors.
//!
//! Executors follow the Volcano model (`open` / `next` / `close`). The only
//! operator here is [`InsertExecutor`], which writes a validated
//! [`InsertStatement`](crate::stmt::InsertStatement) through an
//! [`InsertContext`].
//!
//! ```text
//! InsertStatement
//!       |
//! InsertExecutor::open(ctx)
//!   phase 1: Table::make_record per row   (no side effects)
//!   phase 2: ctx.insert_records(batch)    (atomic)
//! ```

mod context;
mod error;
mod insert;

pub use context::InsertContext;
pub use error::ExecutorError;
pub use insert::{ExecutorState, InsertExecutor};
