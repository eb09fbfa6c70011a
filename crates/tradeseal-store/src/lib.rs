//! Record store boundary for Tradeseal reconciliation.
//!
//! The off-chain record database is an external collaborator; reconciliation
//! only ever reads from it. This crate defines the [`RecordStore`] read
//! boundary plus two backends: an in-memory map for tests and embedding, and
//! a JSON-file snapshot for the CLI.

#![deny(missing_docs)]

/// Error types for store operations.
pub mod error;
/// JSON-file-backed store.
pub mod file;
/// In-memory store.
pub mod memory;

use tradeseal_canonical::{Record, RecordId};

pub use error::StoreError;
pub use file::JsonFileStore;
pub use memory::MemoryStore;

/// Read-only boundary to the external record store.
///
/// `Ok(None)` means the record does not exist; failures of the storage
/// medium itself surface as [`StoreError`].
pub trait RecordStore {
    /// Fetches the current state of a record by identifier.
    fn get_record(&self, record_id: RecordId) -> Result<Option<Record>, StoreError>;
}
