//! Append-only commitment ledger client for Tradeseal.
//!
//! This crate provides:
//! - The [`CommitmentEvent`] wire schema: `(record_id, fingerprint,
//!   publisher, sequence)` tuples, immutable once appended
//! - The [`LedgerClient`] boundary trait for publishing and retrieving
//!   commitment events
//! - A framed append-only journal file backend ([`JournalLedger`]) that
//!   stands in for the external public ledger
//! - The opaque [`Signer`] pass-through boundary for deployments where
//!   publication requires a signed transaction
//!
//! The ledger never updates or deletes: a record accumulates events, and the
//! reconciliation layer decides what multiple events for one identifier mean.
//! Publishing twice is not an error here; it is surfaced as a
//! `DuplicatePublication` warning on the returned [`Publication`].

#![deny(missing_docs)]

/// Ledger client trait and journal/in-memory backends.
pub mod client;
/// Error types for ledger operations.
pub mod errors;
/// Commitment event schema.
pub mod event;
/// Frame structure and serialization for the journal backend.
pub mod frame;
/// Journal reader implementation.
pub mod reader;
/// Opaque signer boundary.
pub mod signer;
/// Journal writer implementation.
pub mod writer;

pub use client::{JournalLedger, LedgerClient, MemoryLedger, Publication, PublishOptions};
pub use errors::LedgerError;
pub use event::{CommitmentEvent, SequenceMarker};
pub use frame::{FrameKind, LedgerHeader, RecordFrame, MAX_PAYLOAD_SIZE};
pub use reader::{JournalReader, ReadMode};
pub use signer::{SignedEnvelope, Signer};
pub use writer::{JournalWriter, WriteOptions};
