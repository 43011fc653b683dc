//! Core transaction types: TxId and TxState.

use std::fmt;

/// Transaction ID (64-bit).
///
/// TxIds are allocated sequentially starting from 1. TxId 0 is reserved as INVALID
/// and marks records that have not been stamped by a transaction yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TxId(u64);

impl TxId {
    /// Invalid transaction ID (0).
    pub const INVALID: Self = Self(0);

    /// Create a new transaction ID.
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// Get the raw u64 value.
    pub const fn as_u64(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for TxId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Lifecycle state of a transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TxState {
    /// Running; its writes are visible only to itself.
    InProgress,
    /// Committed; its writes are visible to everyone.
    Committed,
    /// Aborted; its writes have been removed.
    Aborted,
}

impl fmt::Display for TxState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TxState::InProgress => "in-progress",
            TxState::Committed => "committed",
            TxState::Aborted => "aborted",
        };
        f.write_str(name)
    }
}
