//! Schema-validated, all-or-nothing INSERT path for a relational database.

pub mod catalog;
pub mod config;
pub mod datum;
pub mod db;
pub mod executor;
pub mod heap;
pub mod sql;
pub mod status;
pub mod stmt;
pub mod table;
pub mod tx;
