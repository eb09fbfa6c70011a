//! Ledger journal writer implementation.

use crate::errors::LedgerError;
use crate::event::CommitmentEvent;
use crate::frame::{FrameKind, LedgerHeader, RecordFrame};
use std::fs::OpenOptions;
use std::io::{self, Read, Seek, Write};
use std::path::Path;

/// Options for ledger journal writing.
#[derive(Debug, Clone)]
pub struct WriteOptions {
    /// Whether to fsync after each append (default: true).
    ///
    /// The fsync is the journal backend's durability confirmation: `publish`
    /// does not return until it has completed. Disable only for test
    /// fixtures where durability does not matter.
    pub sync: bool,
    /// Whether to create the file if it doesn't exist (default: true).
    pub create: bool,
}

impl Default for WriteOptions {
    fn default() -> Self {
        Self {
            sync: true,
            create: true,
        }
    }
}

/// Appends commitment events to a ledger journal file (`.tsl` format).
///
/// The journal is strictly append-only: opening an existing file validates
/// its header and positions the writer at the end. There is no API for
/// rewriting or truncating published commitments.
pub struct JournalWriter {
    file: std::fs::File,
    sync: bool,
    header_written: bool,
}

impl JournalWriter {
    /// Opens or creates a ledger journal file for appending.
    ///
    /// An empty file receives a fresh header; a non-empty file must carry a
    /// valid header or the open fails.
    pub fn open<P: AsRef<Path>>(path: P, options: WriteOptions) -> Result<Self, LedgerError> {
        let file = OpenOptions::new()
            .create(options.create)
            .write(true)
            .read(true)
            .open(path)?;

        let mut writer = Self {
            file,
            sync: options.sync,
            header_written: false,
        };

        let metadata = writer.file.metadata()?;
        if metadata.len() == 0 {
            writer.write_header()?;
        } else if metadata.len() < LedgerHeader::HEADER_SIZE as u64 {
            return Err(LedgerError::InvalidHeader(
                "file too small to hold a ledger header".to_string(),
            ));
        } else {
            let mut header_bytes = [0u8; LedgerHeader::HEADER_SIZE];
            writer.file.seek(io::SeekFrom::Start(0))?;
            writer.file.read_exact(&mut header_bytes)?;
            LedgerHeader::from_bytes(&header_bytes)?;
            writer.header_written = true;
            writer.file.seek(io::SeekFrom::End(0))?;
        }

        Ok(writer)
    }

    fn write_header(&mut self) -> Result<(), LedgerError> {
        let header = LedgerHeader::new();
        self.file.write_all(&header.to_bytes())?;
        self.file.flush()?;
        if self.sync {
            self.file.sync_all()?;
        }
        self.header_written = true;
        Ok(())
    }

    /// Appends a commitment event to the journal.
    ///
    /// Returns once the frame and payload are written and, when `sync` is
    /// enabled, fsynced. That return is the durability confirmation the
    /// ledger client relies on.
    pub fn append_event(&mut self, event: &CommitmentEvent) -> Result<(), LedgerError> {
        let json_bytes = serde_json::to_vec(event)?;
        self.append_raw(
            FrameKind::CommitmentJson,
            event.record_id.value(),
            &json_bytes,
        )
    }

    /// Appends a raw frame with the given kind, record identifier, and
    /// payload. The identifier lands in the frame header so readers can
    /// filter by record without decoding the payload.
    pub fn append_raw(
        &mut self,
        kind: FrameKind,
        record_id: u64,
        payload: &[u8],
    ) -> Result<(), LedgerError> {
        if !self.header_written {
            return Err(LedgerError::InvalidHeader(
                "header not written".to_string(),
            ));
        }

        let frame = RecordFrame::new(kind, record_id, payload.len() as u64)?;
        self.file.write_all(&frame.to_bytes())?;
        self.file.write_all(payload)?;
        self.file.flush()?;

        if self.sync {
            self.file.sync_all()?;
        }

        Ok(())
    }

    /// Finishes writing and closes the file.
    pub fn finish(mut self) -> Result<(), LedgerError> {
        self.file.flush()?;
        if self.sync {
            self.file.sync_all()?;
        }
        Ok(())
    }
}

impl Drop for JournalWriter {
    fn drop(&mut self) {
        let _ = self.file.flush();
        if self.sync {
            let _ = self.file.sync_all();
        }
    }
}
