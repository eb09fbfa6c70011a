use thiserror::Error;

/// Errors that can occur during ledger operations.
#[derive(Error, Debug)]
pub enum LedgerError {
    /// The external ledger could not be reached or did not confirm
    /// durability within the supplied deadline. Transient: the caller layer
    /// owns the retry policy; this crate never retries silently.
    #[error("ledger unavailable: {0}")]
    Unavailable(String),
    /// Record identifier is outside the ledger's representable range.
    #[error("record id {value} exceeds the ledger's integer width (max {max})")]
    InvalidRecordId {
        /// Offending identifier.
        value: u64,
        /// Largest representable identifier.
        max: u64,
    },
    /// Invalid ledger file header (magic, version, or flags).
    #[error("invalid ledger header: {0}")]
    InvalidHeader(String),
    /// Invalid frame structure (kind, reserved bytes, or length).
    #[error("invalid frame at offset {offset}: {reason}")]
    InvalidFrame {
        /// Byte offset where the frame starts.
        offset: u64,
        /// Reason for invalidity.
        reason: String,
    },
    /// Payload exceeds maximum size limit.
    #[error("payload size {size} exceeds maximum {max}")]
    PayloadTooLarge {
        /// Actual payload size.
        size: u64,
        /// Maximum allowed size.
        max: u32,
    },
    /// Truncated frame detected in strict mode.
    #[error("truncated frame at offset {offset}")]
    TruncatedFrame {
        /// Byte offset where truncation occurred.
        offset: u64,
    },
    /// Invalid UTF-8 in a commitment payload.
    #[error("invalid UTF-8 in commitment payload: {0}")]
    InvalidUtf8(#[from] std::str::Utf8Error),
    /// Invalid JSON in a commitment payload.
    #[error("JSON parse error: {0}")]
    JsonParse(#[from] serde_json::Error),
    /// I/O error during read or write.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl LedgerError {
    /// Wraps any failure to reach or confirm the external ledger.
    pub fn unavailable(reason: impl std::fmt::Display) -> Self {
        Self::Unavailable(reason.to_string())
    }
}
