//! Ledger journal reader implementation.

use crate::errors::LedgerError;
use crate::event::CommitmentEvent;
use crate::frame::{FrameKind, LedgerHeader, RecordFrame};
use std::fs::File;
use std::io::{self, Read, Seek};
use std::path::Path;
use tradeseal_canonical::RecordId;

/// Read mode for handling truncation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadMode {
    /// Strict mode: truncated frames are errors.
    Strict,
    /// Permissive mode: truncation is treated as end-of-file.
    Permissive,
}

/// Reads commitment events from a ledger journal file.
///
/// Events come back in file order, which is publication order; the ledger's
/// sequence markers ascend with it. Frame headers carry the committed
/// record's identifier, so lookups for one record decode only that record's
/// payloads and seek past the rest. Unknown frame kinds are skipped so old
/// readers survive format additions.
pub struct JournalReader {
    file: File,
    mode: ReadMode,
    position: u64,
    frame_offset: u64,
}

impl JournalReader {
    /// Opens a ledger journal file for reading.
    ///
    /// Validates the header and positions the reader at the first frame.
    pub fn open<P: AsRef<Path>>(path: P, mode: ReadMode) -> Result<Self, LedgerError> {
        let mut file = File::open(path)?;
        let _header = Self::read_header(&mut file)?;
        let position = LedgerHeader::HEADER_SIZE as u64;

        Ok(Self {
            file,
            mode,
            position,
            frame_offset: position,
        })
    }

    /// Returns the current read position in the file.
    pub fn position(&self) -> u64 {
        self.position
    }

    fn read_header(file: &mut File) -> Result<LedgerHeader, LedgerError> {
        file.seek(io::SeekFrom::Start(0))?;
        let mut header_bytes = [0u8; LedgerHeader::HEADER_SIZE];
        file.read_exact(&mut header_bytes)?;
        LedgerHeader::from_bytes(&header_bytes)
    }

    /// Advances to the next frame, reading its payload only when
    /// `want_payload` says so.
    ///
    /// Frames whose payload is not wanted are seeked past, so a caller
    /// scanning for one record never touches the bytes of the others.
    /// Returns `Ok(None)` at end-of-file (or at a truncated tail in
    /// permissive mode).
    pub fn next_frame(
        &mut self,
        mut want_payload: impl FnMut(&RecordFrame) -> bool,
    ) -> Result<Option<(RecordFrame, Option<Vec<u8>>)>, LedgerError> {
        self.file.seek(io::SeekFrom::Start(self.position))?;

        let file_size = self.file.metadata()?.len();
        if self.position >= file_size {
            return Ok(None);
        }
        self.frame_offset = self.position;

        let mut frame_header_bytes = [0u8; RecordFrame::FRAME_HEADER_SIZE];
        match self.file.read_exact(&mut frame_header_bytes) {
            Ok(()) => {}
            Err(e) if e.kind() == io::ErrorKind::UnexpectedEof => {
                if self.mode == ReadMode::Permissive {
                    return Ok(None);
                }
                return Err(LedgerError::TruncatedFrame {
                    offset: self.position,
                });
            }
            Err(e) => return Err(e.into()),
        }

        let frame = RecordFrame::from_bytes(&frame_header_bytes).map_err(|e| match e {
            LedgerError::InvalidFrame { offset: _, reason } => LedgerError::InvalidFrame {
                offset: self.frame_offset,
                reason,
            },
            other => other,
        })?;

        self.position += RecordFrame::FRAME_HEADER_SIZE as u64;

        if self.position + u64::from(frame.len) > file_size {
            if self.mode == ReadMode::Permissive {
                return Ok(None);
            }
            return Err(LedgerError::TruncatedFrame {
                offset: self.position,
            });
        }

        let payload = if want_payload(&frame) {
            let mut buf = vec![0u8; frame.len as usize];
            self.file.read_exact(&mut buf)?;
            Some(buf)
        } else {
            None
        };
        self.position += u64::from(frame.len);

        Ok(Some((frame, payload)))
    }

    /// Reads the next commitment event from the journal.
    ///
    /// Skips unknown frame kinds and returns `Ok(None)` at end-of-file.
    pub fn read_event(&mut self) -> Result<Option<CommitmentEvent>, LedgerError> {
        loop {
            match self.next_frame(|frame| frame.kind == FrameKind::CommitmentJson)? {
                None => return Ok(None),
                Some((frame, Some(payload))) => {
                    return Ok(Some(self.decode_event(&frame, &payload)?));
                }
                Some((_, None)) => continue,
            }
        }
    }

    /// Reads the next commitment event for one record.
    ///
    /// Commitments for other records are skipped at the frame-header level
    /// without decoding their payloads.
    pub fn read_event_for(
        &mut self,
        record_id: RecordId,
    ) -> Result<Option<CommitmentEvent>, LedgerError> {
        loop {
            let wanted = |frame: &RecordFrame| {
                frame.kind == FrameKind::CommitmentJson && frame.record_id == record_id.value()
            };
            match self.next_frame(wanted)? {
                None => return Ok(None),
                Some((frame, Some(payload))) => {
                    return Ok(Some(self.decode_event(&frame, &payload)?));
                }
                Some((_, None)) => continue,
            }
        }
    }

    fn decode_event(
        &self,
        frame: &RecordFrame,
        payload: &[u8],
    ) -> Result<CommitmentEvent, LedgerError> {
        let utf8_str = std::str::from_utf8(payload)?;
        let event: CommitmentEvent =
            serde_json::from_str(utf8_str).map_err(LedgerError::JsonParse)?;
        if event.record_id.value() != frame.record_id {
            return Err(LedgerError::InvalidFrame {
                offset: self.frame_offset,
                reason: format!(
                    "frame is for record {} but its payload commits record {}",
                    frame.record_id,
                    event.record_id.value()
                ),
            });
        }
        Ok(event)
    }
}
