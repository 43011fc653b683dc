//! Transaction manager.
//!
//! Manages transaction lifecycle: allocation of TxIds, tracking active transactions,
//! and maintaining commit/abort state.

use std::collections::HashMap;

use parking_lot::Mutex;

use super::error::TxError;
use super::transaction::Transaction;
use super::types::{TxId, TxState};

/// Internal state protected by a single mutex to ensure atomicity
/// between txid allocation and active transaction tracking.
struct TxManagerState {
    /// Next transaction ID to allocate.
    next_txid: u64,
    /// Active (in-progress) transaction IDs.
    active_txids: Vec<TxId>,
}

/// Transaction manager.
///
/// Responsibilities:
/// - Allocate sequential TxIds starting from 1
/// - Track active (in-progress) transactions
/// - Maintain transaction commit/abort state
/// - Undo the writes of aborted transactions
///
/// NOTE: Transaction state is volatile; nothing here survives a restart.
pub struct TransactionManager {
    /// Atomic state for txid allocation and active tracking.
    state: Mutex<TxManagerState>,
    /// Transaction state map (in-progress, committed, aborted).
    tx_states: Mutex<HashMap<TxId, TxState>>,
}

impl Default for TransactionManager {
    fn default() -> Self {
        Self::new()
    }
}

impl TransactionManager {
    /// Create a new transaction manager.
    pub fn new() -> Self {
        Self {
            state: Mutex::new(TxManagerState {
                next_txid: 1,
                active_txids: Vec::new(),
            }),
            tx_states: Mutex::new(HashMap::new()),
        }
    }

    /// Begin a new transaction.
    ///
    /// Allocates a new TxId, marks it as in-progress, and adds it to the active list.
    pub fn begin(&self) -> Transaction {
        let txid = {
            let mut state = self.state.lock();
            let txid = TxId::new(state.next_txid);
            state.next_txid += 1;
            state.active_txids.push(txid);
            txid
        };

        self.tx_states.lock().insert(txid, TxState::InProgress);
        tracing::debug!(%txid, "transaction started");
        Transaction::new(txid)
    }

    /// Commit a transaction, making its writes visible.
    pub fn commit(&self, mut tx: Transaction) -> Result<(), TxError> {
        self.complete(tx.id(), TxState::Committed)?;
        tracing::debug!(txid = %tx.id(), writes = tx.write_count(), "transaction committed");
        tx.release_writes();
        Ok(())
    }

    /// Abort a transaction, removing every record it inserted.
    ///
    /// The writes are removed before the state changes, so readers never see
    /// rows of an aborted transaction.
    pub fn abort(&self, mut tx: Transaction) -> Result<(), TxError> {
        let writes = tx.write_count();
        tx.discard_writes();
        self.complete(tx.id(), TxState::Aborted)?;
        tracing::info!(txid = %tx.id(), writes, "transaction rolled back");
        Ok(())
    }

    /// Marks the transaction as `new_state` and removes it from the active list.
    fn complete(&self, txid: TxId, new_state: TxState) -> Result<(), TxError> {
        {
            let mut tx_states = self.tx_states.lock();
            match tx_states.get(&txid).copied() {
                Some(TxState::InProgress) => {
                    tx_states.insert(txid, new_state);
                }
                Some(current) => {
                    return Err(TxError::InvalidStateTransition {
                        txid,
                        current,
                        attempted: new_state,
                    });
                }
                None => return Err(TxError::TransactionNotFound(txid)),
            }
        }

        self.state.lock().active_txids.retain(|&t| t != txid);

        Ok(())
    }

    /// Get the state of a transaction, or `None` if it was never started.
    pub fn state(&self, txid: TxId) -> Option<TxState> {
        self.tx_states.lock().get(&txid).copied()
    }

    /// Returns true if `txid` has committed.
    pub fn is_committed(&self, txid: TxId) -> bool {
        self.state(txid) == Some(TxState::Committed)
    }

    /// Returns the number of in-progress transactions.
    pub fn active_count(&self) -> usize {
        self.state.lock().active_txids.len()
    }
}
