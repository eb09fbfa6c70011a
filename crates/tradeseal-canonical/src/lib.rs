//! Canonicalization and commitment primitives for Tradeseal trade records.
//!
//! A trade record held by the off-chain record-keeper is turned into a
//! deterministic byte string (the canonical form) and committed to a fixed
//! 32-byte fingerprint. Only the fingerprint ever reaches the public ledger;
//! the record contents stay private. Every byte that participates in hashing
//! or verification is produced by this crate.
//!
#![deny(missing_docs)]

/// Canonicalization of records into deterministic bytes.
pub mod canonicalizer;
/// Fingerprint (commitment) primitives.
pub mod fingerprint;
/// Record and identifier types.
pub mod record;
/// Validation helpers used by canonical types.
pub mod validation;

pub use canonicalizer::{CanonicalError, CanonicalForm, Canonicalizer};
pub use fingerprint::{
    commit, fingerprint_record, CommitError, DigestAlg, Fingerprint, FingerprintError,
    FINGERPRINT_LEN,
};
pub use record::{Publisher, Record, RecordId};
pub use validation::ValidationError;
