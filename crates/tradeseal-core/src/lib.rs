//! Reconciliation service for Tradeseal commitments.
//!
//! This crate orchestrates the full protocol over the leaf components:
//! load a record from the external store, canonicalize and commit it, and
//! either publish the fingerprint to the append-only ledger
//! (`commit_record`) or compare it against the published commitment and
//! return a tamper verdict (`verify`).
//!
//! Core invariants:
//! - Verification is a pure read-side comparison: it never publishes, never
//!   mutates, and is safely retryable and concurrent.
//! - `Tampered` and `AmbiguousPublication` are first-class verdicts, not
//!   errors; every non-`Verified` outcome carries the record identifier, the
//!   locally recomputed fingerprint, and all fingerprints found on the
//!   ledger, so remediation can be decided manually.
//! - Multiple ledger events for one record are surfaced, never resolved by
//!   guessing which one is authoritative.
//!
#![deny(missing_docs)]

/// Error types for reconciliation.
pub mod errors;
/// Reconciliation service and verdict types.
pub mod reconcile;

pub use errors::ReconcileError;
pub use reconcile::{Reconciler, Reconciliation, Verdict};
