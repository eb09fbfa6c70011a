use crate::errors::LedgerError;

/// Ledger file magic bytes: `b"TSL1"`.
pub const MAGIC: &[u8; 4] = b"TSL1";

/// Current ledger format version: `0x0001`.
pub const VERSION: u16 = 0x0001;

/// File header size in bytes.
pub const HEADER_SIZE: usize = 16;

/// Frame header size in bytes.
pub const FRAME_HEADER_SIZE: usize = 16;

/// Maximum payload size: 16 MiB.
pub const MAX_PAYLOAD_SIZE: u32 = 16 * 1024 * 1024;

/// Frame kind byte for commitment events encoded as JSON.
pub const FRAME_KIND_COMMITMENT_JSON: u8 = 0x01;

/// Ledger file header (16 bytes).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LedgerHeader {
    /// Magic bytes: `"TSL1"`.
    pub magic: [u8; 4],
    /// Format version: `0x0001`.
    pub version: u16,
    /// Reserved flags (must be 0).
    pub flags: u16,
    /// Reserved bytes (must be all zeros).
    pub reserved: [u8; 8],
}

impl LedgerHeader {
    /// Header size in bytes.
    pub const HEADER_SIZE: usize = HEADER_SIZE;

    /// Creates a new header with default values.
    pub fn new() -> Self {
        Self {
            magic: *MAGIC,
            version: VERSION,
            flags: 0,
            reserved: [0; 8],
        }
    }

    /// Serializes the header to bytes.
    pub fn to_bytes(&self) -> [u8; HEADER_SIZE] {
        let mut bytes = [0u8; HEADER_SIZE];
        bytes[0..4].copy_from_slice(&self.magic);
        bytes[4..6].copy_from_slice(&self.version.to_le_bytes());
        bytes[6..8].copy_from_slice(&self.flags.to_le_bytes());
        bytes[8..16].copy_from_slice(&self.reserved);
        bytes
    }

    /// Deserializes a header from bytes.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, LedgerError> {
        if bytes.len() < HEADER_SIZE {
            return Err(LedgerError::InvalidHeader(format!(
                "header too short: {} bytes",
                bytes.len()
            )));
        }

        let magic = [bytes[0], bytes[1], bytes[2], bytes[3]];
        if magic != *MAGIC {
            return Err(LedgerError::InvalidHeader(format!(
                "invalid magic: {:?}, expected {:?}",
                magic, MAGIC
            )));
        }

        let version = u16::from_le_bytes([bytes[4], bytes[5]]);
        if version != VERSION {
            return Err(LedgerError::InvalidHeader(format!(
                "unsupported version: 0x{:04x}, expected 0x{:04x}",
                version, VERSION
            )));
        }

        let flags = u16::from_le_bytes([bytes[6], bytes[7]]);
        if flags != 0 {
            return Err(LedgerError::InvalidHeader(format!(
                "non-zero flags: 0x{:04x}",
                flags
            )));
        }

        let mut reserved = [0u8; 8];
        reserved.copy_from_slice(&bytes[8..16]);
        if reserved != [0u8; 8] {
            return Err(LedgerError::InvalidHeader(
                "non-zero reserved bytes".to_string(),
            ));
        }

        Ok(Self {
            magic,
            version,
            flags,
            reserved,
        })
    }
}

impl Default for LedgerHeader {
    fn default() -> Self {
        Self::new()
    }
}

/// Record frame kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameKind {
    /// CommitmentJson: UTF-8 JSON object representing a commitment event.
    CommitmentJson,
    /// Unknown/unsupported frame kind.
    Unknown(u8),
}

impl FrameKind {
    /// Creates a FrameKind from a byte value.
    pub fn from_byte(byte: u8) -> Self {
        match byte {
            FRAME_KIND_COMMITMENT_JSON => FrameKind::CommitmentJson,
            _ => FrameKind::Unknown(byte),
        }
    }

    /// Returns the byte value for this kind.
    pub fn to_byte(self) -> u8 {
        match self {
            FrameKind::CommitmentJson => FRAME_KIND_COMMITMENT_JSON,
            FrameKind::Unknown(b) => b,
        }
    }
}

/// Frame header preceding every payload (16 bytes on the wire).
///
/// Layout: kind byte, three reserved zero bytes, the committed record's
/// identifier as a little-endian u64, and the payload length as a
/// little-endian u32. The record identifier is lifted into the frame header
/// so that readers can locate one record's commitments by scanning headers
/// alone, without decoding every payload on the way.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordFrame {
    /// Frame kind.
    pub kind: FrameKind,
    /// Identifier of the record the payload commits to.
    pub record_id: u64,
    /// Payload length in bytes.
    pub len: u32,
}

impl RecordFrame {
    /// Frame header size in bytes.
    pub const FRAME_HEADER_SIZE: usize = FRAME_HEADER_SIZE;

    /// Creates a new frame header for a payload of `len` bytes.
    ///
    /// The length is taken as a u64 so callers can pass a payload size
    /// unchecked; anything above the 16 MiB cap (including sizes that would
    /// not even fit the wire's u32) fails with
    /// [`LedgerError::PayloadTooLarge`].
    pub fn new(kind: FrameKind, record_id: u64, len: u64) -> Result<Self, LedgerError> {
        let capped = u32::try_from(len)
            .ok()
            .filter(|l| *l <= MAX_PAYLOAD_SIZE)
            .ok_or(LedgerError::PayloadTooLarge {
                size: len,
                max: MAX_PAYLOAD_SIZE,
            })?;
        Ok(Self {
            kind,
            record_id,
            len: capped,
        })
    }

    /// Serializes the frame header to bytes.
    pub fn to_bytes(&self) -> [u8; FRAME_HEADER_SIZE] {
        let mut bytes = [0u8; FRAME_HEADER_SIZE];
        bytes[0] = self.kind.to_byte();
        bytes[4..12].copy_from_slice(&self.record_id.to_le_bytes());
        bytes[12..16].copy_from_slice(&self.len.to_le_bytes());
        bytes
    }

    /// Deserializes a frame header from bytes.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, LedgerError> {
        if bytes.len() < FRAME_HEADER_SIZE {
            return Err(LedgerError::InvalidFrame {
                offset: 0,
                reason: format!("frame header too short: {} bytes", bytes.len()),
            });
        }

        if bytes[1..4] != [0u8; 3] {
            return Err(LedgerError::InvalidFrame {
                offset: 0,
                reason: "non-zero reserved bytes".to_string(),
            });
        }

        let kind = FrameKind::from_byte(bytes[0]);
        let record_id = u64::from_le_bytes([
            bytes[4], bytes[5], bytes[6], bytes[7], bytes[8], bytes[9], bytes[10], bytes[11],
        ]);
        let len = u32::from_le_bytes([bytes[12], bytes[13], bytes[14], bytes[15]]);
        if len > MAX_PAYLOAD_SIZE {
            return Err(LedgerError::InvalidFrame {
                offset: 0,
                reason: format!("payload size {} exceeds maximum {}", len, MAX_PAYLOAD_SIZE),
            });
        }

        Ok(Self {
            kind,
            record_id,
            len,
        })
    }
}
