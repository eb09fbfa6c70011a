//! Ledger client trait and backends.

use std::path::{Path, PathBuf};
use std::time::Instant;

use tracing::{debug, warn};
use tradeseal_canonical::{Fingerprint, Publisher, RecordId};

use crate::errors::LedgerError;
use crate::event::{CommitmentEvent, SequenceMarker};
use crate::frame::{FrameKind, RecordFrame};
use crate::reader::{JournalReader, ReadMode};
use crate::signer::SignedEnvelope;
use crate::writer::{JournalWriter, WriteOptions};

/// Largest record identifier the ledger wire schema can represent.
///
/// Commitment events encode record identifiers as JSON numbers; staying
/// within the 53-bit safe-integer width keeps them exact for every JSON
/// consumer of the audit trail.
pub const MAX_RECORD_ID: u64 = (1 << 53) - 1;

/// Options for a single publish call.
///
/// The deadline is supplied by the caller layer; expiry surfaces as
/// [`LedgerError::Unavailable`] instead of blocking indefinitely on the
/// external ledger's durability rule.
#[derive(Debug, Clone, Copy, Default)]
pub struct PublishOptions {
    /// Absolute deadline for durability confirmation.
    pub deadline: Option<Instant>,
}

impl PublishOptions {
    /// Creates options with an absolute deadline.
    pub fn with_deadline(deadline: Instant) -> Self {
        Self {
            deadline: Some(deadline),
        }
    }

    fn check(&self) -> Result<(), LedgerError> {
        if let Some(deadline) = self.deadline {
            if Instant::now() >= deadline {
                return Err(LedgerError::unavailable(
                    "deadline expired before durability confirmation",
                ));
            }
        }
        Ok(())
    }
}

/// Result of a publish call.
#[derive(Debug, Clone, PartialEq)]
pub struct Publication {
    /// The commitment event appended by this call.
    pub event: CommitmentEvent,
    /// Fingerprints that were already on the ledger for the same record.
    ///
    /// Non-empty means this was a duplicate publication: allowed by the
    /// append-only ledger (which has no uniqueness constraint) but flagged
    /// as a warning so the caller can investigate.
    pub prior_fingerprints: Vec<Fingerprint>,
}

impl Publication {
    /// Whether events for this record already existed before this publish.
    pub fn is_duplicate(&self) -> bool {
        !self.prior_fingerprints.is_empty()
    }
}

/// Boundary trait for the external append-only ledger.
///
/// Publishing appends exactly one immutable event; retrieval returns every
/// event ever published for a record in sequence order. Concurrent publishes
/// for one record are not serialized here: publish-once is a precondition
/// the caller enforces (e.g., with a uniqueness constraint in the off-chain
/// store).
pub trait LedgerClient {
    /// Appends a `(record_id, fingerprint)` commitment event.
    ///
    /// Returns once the ledger's durability rule is satisfied, or fails with
    /// [`LedgerError::Unavailable`] when the ledger cannot be reached or the
    /// supplied deadline expires first. Fails with
    /// [`LedgerError::InvalidRecordId`] when the identifier is outside the
    /// ledger's representable range.
    fn publish(
        &mut self,
        record_id: RecordId,
        fingerprint: &Fingerprint,
        envelope: Option<SignedEnvelope>,
        options: PublishOptions,
    ) -> Result<Publication, LedgerError>;

    /// Retrieves all events ever published for a record, ascending by
    /// sequence marker. An empty vector (not an error) when none exist.
    fn fetch_events(&mut self, record_id: RecordId) -> Result<Vec<CommitmentEvent>, LedgerError>;
}

fn check_record_id(record_id: RecordId) -> Result<(), LedgerError> {
    if record_id.value() > MAX_RECORD_ID {
        return Err(LedgerError::InvalidRecordId {
            value: record_id.value(),
            max: MAX_RECORD_ID,
        });
    }
    Ok(())
}

fn unavailable_on_io(err: LedgerError) -> LedgerError {
    match err {
        LedgerError::Io(e) => LedgerError::unavailable(e),
        other => other,
    }
}

/// Journal-file-backed ledger client.
///
/// Stands in for the external public ledger: an append-only framed file in
/// which fsync completion is the durability confirmation. Sequence markers
/// are the zero-based log positions of appended events.
#[derive(Debug)]
pub struct JournalLedger {
    path: PathBuf,
    publisher: Publisher,
    write_options: WriteOptions,
}

impl JournalLedger {
    /// Opens a journal-backed ledger at the given path.
    ///
    /// The file is created lazily on first publish; an existing file must
    /// carry a valid ledger header.
    pub fn open(path: impl AsRef<Path>, publisher: Publisher) -> Result<Self, LedgerError> {
        let path = path.as_ref().to_path_buf();
        if path.exists() {
            // Validate the header up front so a corrupt ledger fails at
            // open rather than mid-publish.
            JournalReader::open(&path, ReadMode::Strict).map_err(unavailable_on_io)?;
        }
        Ok(Self {
            path,
            publisher,
            write_options: WriteOptions::default(),
        })
    }

    fn open_reader(&self) -> Result<Option<JournalReader>, LedgerError> {
        match JournalReader::open(&self.path, ReadMode::Strict) {
            Ok(reader) => Ok(Some(reader)),
            Err(LedgerError::Io(e)) if e.kind() == std::io::ErrorKind::NotFound => {
                // Nothing has been published yet.
                Ok(None)
            }
            Err(LedgerError::Io(e)) => Err(LedgerError::unavailable(e)),
            Err(other) => Err(other),
        }
    }

    /// Scans frame headers once, counting commitment frames (the next
    /// sequence position) and decoding only the payloads committed to
    /// `record_id` for their fingerprints.
    fn scan_for_publish(
        &self,
        record_id: RecordId,
    ) -> Result<(u64, Vec<Fingerprint>), LedgerError> {
        let Some(mut reader) = self.open_reader()? else {
            return Ok((0, Vec::new()));
        };
        let mut commitment_frames = 0u64;
        let mut prior_fingerprints = Vec::new();
        loop {
            let wanted = |frame: &RecordFrame| {
                frame.kind == FrameKind::CommitmentJson && frame.record_id == record_id.value()
            };
            match reader.next_frame(wanted).map_err(unavailable_on_io)? {
                None => break,
                Some((frame, payload)) => {
                    if frame.kind != FrameKind::CommitmentJson {
                        continue;
                    }
                    commitment_frames += 1;
                    if let Some(payload) = payload {
                        let event: CommitmentEvent = serde_json::from_slice(&payload)?;
                        prior_fingerprints.push(event.fingerprint);
                    }
                }
            }
        }
        Ok((commitment_frames, prior_fingerprints))
    }
}

impl LedgerClient for JournalLedger {
    fn publish(
        &mut self,
        record_id: RecordId,
        fingerprint: &Fingerprint,
        envelope: Option<SignedEnvelope>,
        options: PublishOptions,
    ) -> Result<Publication, LedgerError> {
        check_record_id(record_id)?;
        options.check()?;

        let (commitment_frames, prior_fingerprints) = self.scan_for_publish(record_id)?;

        let event = CommitmentEvent {
            record_id,
            fingerprint: *fingerprint,
            publisher: self.publisher.clone(),
            sequence: SequenceMarker::new(commitment_frames),
            envelope,
        };

        let mut writer =
            JournalWriter::open(&self.path, self.write_options.clone()).map_err(unavailable_on_io)?;
        writer.append_event(&event).map_err(unavailable_on_io)?;
        writer.finish().map_err(unavailable_on_io)?;

        // Durability was confirmed by the fsync above; a deadline that
        // expired while waiting for it still counts as unavailability.
        options.check()?;

        if prior_fingerprints.is_empty() {
            debug!(
                record_id = record_id.value(),
                sequence = event.sequence.position(),
                "published commitment"
            );
        } else {
            warn!(
                record_id = record_id.value(),
                prior = prior_fingerprints.len(),
                "duplicate publication: record already has ledger events"
            );
        }

        Ok(Publication {
            event,
            prior_fingerprints,
        })
    }

    fn fetch_events(&mut self, record_id: RecordId) -> Result<Vec<CommitmentEvent>, LedgerError> {
        check_record_id(record_id)?;
        let Some(mut reader) = self.open_reader()? else {
            return Ok(Vec::new());
        };
        let mut events = Vec::new();
        while let Some(event) = reader
            .read_event_for(record_id)
            .map_err(unavailable_on_io)?
        {
            events.push(event);
        }
        events.sort_by_key(|event| event.sequence);
        Ok(events)
    }
}

/// In-memory ledger backend.
///
/// Same append-only semantics as [`JournalLedger`] without touching disk;
/// intended for tests and embedding.
#[derive(Debug, Clone)]
pub struct MemoryLedger {
    publisher: Publisher,
    events: Vec<CommitmentEvent>,
}

impl MemoryLedger {
    /// Creates an empty in-memory ledger.
    pub fn new(publisher: Publisher) -> Self {
        Self {
            publisher,
            events: Vec::new(),
        }
    }

    /// Returns every event on the ledger in publication order.
    pub fn events(&self) -> &[CommitmentEvent] {
        &self.events
    }
}

impl LedgerClient for MemoryLedger {
    fn publish(
        &mut self,
        record_id: RecordId,
        fingerprint: &Fingerprint,
        envelope: Option<SignedEnvelope>,
        options: PublishOptions,
    ) -> Result<Publication, LedgerError> {
        check_record_id(record_id)?;
        options.check()?;

        let prior_fingerprints: Vec<Fingerprint> = self
            .events
            .iter()
            .filter(|event| event.record_id == record_id)
            .map(|event| event.fingerprint)
            .collect();

        let event = CommitmentEvent {
            record_id,
            fingerprint: *fingerprint,
            publisher: self.publisher.clone(),
            sequence: SequenceMarker::new(self.events.len() as u64),
            envelope,
        };
        self.events.push(event.clone());

        if !prior_fingerprints.is_empty() {
            warn!(
                record_id = record_id.value(),
                prior = prior_fingerprints.len(),
                "duplicate publication: record already has ledger events"
            );
        }

        Ok(Publication {
            event,
            prior_fingerprints,
        })
    }

    fn fetch_events(&mut self, record_id: RecordId) -> Result<Vec<CommitmentEvent>, LedgerError> {
        check_record_id(record_id)?;
        Ok(self
            .events
            .iter()
            .filter(|event| event.record_id == record_id)
            .cloned()
            .collect())
    }
}
