//! Reconciliation service and verdict types.

use serde::Serialize;
use tracing::{debug, info, warn};

use tradeseal_canonical::{fingerprint_record, Canonicalizer, Fingerprint, Record, RecordId};
use tradeseal_ledger::{LedgerClient, Publication, PublishOptions, SignedEnvelope};
use tradeseal_store::RecordStore;

use crate::errors::ReconcileError;

/// Terminal outcome of verifying a record against the ledger.
///
/// These are outcomes, not failures, and they are deliberately not collapsed
/// into a boolean: "never published", "tampered", and "ambiguous" each need
/// a different remediation path downstream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Verdict {
    /// The current record matches the single published commitment.
    Verified,
    /// The current record does not match the published commitment.
    Tampered,
    /// No commitment has ever been published for this record.
    NotPublished,
    /// More than one commitment exists for this record; no tie-break policy
    /// is applied, resolution is manual.
    AmbiguousPublication,
}

/// Full result of a verification, sufficient for manual audit.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Reconciliation {
    /// Identifier of the verified record.
    pub record_id: RecordId,
    /// The verdict.
    pub verdict: Verdict,
    /// Fingerprint recomputed from the record's current off-chain state.
    pub local_fingerprint: Fingerprint,
    /// Every fingerprint found on the ledger for this record, in
    /// publication order.
    pub ledger_fingerprints: Vec<Fingerprint>,
}

impl Reconciliation {
    /// Whether the record reconciled cleanly.
    pub fn is_verified(&self) -> bool {
        self.verdict == Verdict::Verified
    }
}

/// Orchestrates canonicalization, commitment, publication, and verification
/// over the external store and ledger boundaries.
///
/// Holds no mutable state of its own across invocations; every method call
/// re-reads the collaborators.
pub struct Reconciler<S, L> {
    store: S,
    ledger: L,
    canonicalizer: Canonicalizer,
}

impl<S: RecordStore, L: LedgerClient> Reconciler<S, L> {
    /// Creates a reconciler over a record store and a ledger client.
    pub fn new(store: S, ledger: L) -> Self {
        Self {
            store,
            ledger,
            canonicalizer: Canonicalizer::new(),
        }
    }

    /// Returns the underlying record store.
    pub fn store(&self) -> &S {
        &self.store
    }

    fn load_record(&self, record_id: RecordId) -> Result<Record, ReconcileError> {
        self.store
            .get_record(record_id)?
            .ok_or(ReconcileError::RecordNotFound(record_id))
    }

    /// Canonicalizes, commits, and publishes a record's fingerprint.
    ///
    /// Publish-once is the caller's precondition (the ledger itself has no
    /// uniqueness constraint); a duplicate publication comes back flagged on
    /// the [`Publication`], not as an error.
    pub fn commit_record(
        &mut self,
        record_id: RecordId,
        envelope: Option<SignedEnvelope>,
        options: PublishOptions,
    ) -> Result<Publication, ReconcileError> {
        let record = self.load_record(record_id)?;
        let fingerprint = fingerprint_record(&record, &self.canonicalizer)?;
        debug!(
            record_id = record_id.value(),
            fingerprint = %fingerprint,
            "publishing record commitment"
        );
        let publication = self
            .ledger
            .publish(record_id, &fingerprint, envelope, options)?;
        Ok(publication)
    }

    /// Re-derives the record's fingerprint and reconciles it against the
    /// published commitment.
    ///
    /// Pure read-side comparison: no mutation, no publication, safely
    /// retryable. With more than one ledger event the verdict is
    /// [`Verdict::AmbiguousPublication`] even when one of the candidates
    /// matches the local fingerprint.
    pub fn verify(&mut self, record_id: RecordId) -> Result<Reconciliation, ReconcileError> {
        let record = self.load_record(record_id)?;
        let local_fingerprint = fingerprint_record(&record, &self.canonicalizer)?;
        let events = self.ledger.fetch_events(record_id)?;
        let ledger_fingerprints: Vec<Fingerprint> =
            events.iter().map(|event| event.fingerprint).collect();

        let verdict = match ledger_fingerprints.as_slice() {
            [] => Verdict::NotPublished,
            [published] => {
                if published.as_bytes() == local_fingerprint.as_bytes() {
                    Verdict::Verified
                } else {
                    Verdict::Tampered
                }
            }
            _ => Verdict::AmbiguousPublication,
        };

        match verdict {
            Verdict::Verified => {
                debug!(record_id = record_id.value(), "record verified")
            }
            Verdict::NotPublished => {
                info!(record_id = record_id.value(), "record has no commitment")
            }
            Verdict::Tampered => warn!(
                record_id = record_id.value(),
                local = %local_fingerprint,
                published = %ledger_fingerprints[0],
                "record does not match its published commitment"
            ),
            Verdict::AmbiguousPublication => warn!(
                record_id = record_id.value(),
                candidates = ledger_fingerprints.len(),
                "multiple commitments for one record; manual resolution required"
            ),
        }

        Ok(Reconciliation {
            record_id,
            verdict,
            local_fingerprint,
            ledger_fingerprints,
        })
    }
}
