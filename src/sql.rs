//! Parser output consumed by the insert path.
//!
//! SQL text parsing lives outside this crate; callers hand over the already
//! parsed statement nodes defined here.

mod ast;

pub use ast::*;
