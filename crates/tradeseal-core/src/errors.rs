//! Error types for reconciliation.

use thiserror::Error;
use tradeseal_canonical::RecordId;

/// Errors that can occur while committing or verifying a record.
///
/// Canonicalization and commitment failures are local-data defects: the same
/// record will fail the same way, so they are surfaced immediately and never
/// retried here. Ledger unavailability is transient; the caller layer owns
/// the retry policy.
#[derive(Error, Debug)]
pub enum ReconcileError {
    /// The record does not exist in the external record store.
    #[error("record {0} not found in the record store")]
    RecordNotFound(RecordId),
    /// Canonicalization or commitment failed on the local record.
    #[error(transparent)]
    Fingerprint(#[from] tradeseal_canonical::FingerprintError),
    /// The ledger could not be reached or rejected the operation.
    #[error(transparent)]
    Ledger(#[from] tradeseal_ledger::LedgerError),
    /// The record store failed.
    #[error(transparent)]
    Store(#[from] tradeseal_store::StoreError),
}
