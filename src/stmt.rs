//! Validated statements.
//!
//! A statement is built from parser output plus the catalog and carries
//! everything an executor needs, so execution never looks at the catalog.

mod error;
mod insert;

pub use error::StmtError;
pub use insert::{normalize_rows, InsertMode, InsertStatement};
