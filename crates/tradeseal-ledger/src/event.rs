use serde::{Deserialize, Serialize};
use tradeseal_canonical::{Fingerprint, Publisher, RecordId};

use crate::signer::SignedEnvelope;

/// Ordering token assigned by the ledger when an event is appended.
///
/// Opaque to the core except for its ascending order; the reconciliation
/// layer only uses it to report events in publication order. Internally the
/// journal backend uses the zero-based log position.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct SequenceMarker(u64);

impl SequenceMarker {
    /// Creates a sequence marker from a raw log position.
    pub fn new(position: u64) -> Self {
        Self(position)
    }

    /// Returns the raw log position.
    pub fn position(self) -> u64 {
        self.0
    }
}

/// Immutable commitment appended to the public ledger.
///
/// Carries no record contents: only the identifier, the 32-byte fingerprint,
/// the publishing principal, and the ledger-assigned sequence marker. Created
/// exactly once per publication; the ledger never updates or deletes events.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommitmentEvent {
    /// Identifier of the committed record.
    pub record_id: RecordId,
    /// Fingerprint of the record's canonical form at publication time.
    pub fingerprint: Fingerprint,
    /// Principal that published the commitment.
    pub publisher: Publisher,
    /// Ledger-assigned ordering token.
    pub sequence: SequenceMarker,
    /// Opaque signed envelope, present when publication required a signed
    /// transaction. Carried through untouched from the external signer.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub envelope: Option<SignedEnvelope>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use tradeseal_canonical::FINGERPRINT_LEN;

    #[test]
    fn event_round_trips_through_json() {
        let event = CommitmentEvent {
            record_id: RecordId::new(42),
            fingerprint: Fingerprint::from_bytes([9u8; FINGERPRINT_LEN]),
            publisher: Publisher::parse("service:recordkeeper").unwrap(),
            sequence: SequenceMarker::new(0),
            envelope: None,
        };
        let json = serde_json::to_string(&event).unwrap();
        let restored: CommitmentEvent = serde_json::from_str(&json).unwrap();
        assert_eq!(event, restored);
        // No envelope field on the wire when publication was unsigned.
        assert!(!json.contains("envelope"));
    }

    #[test]
    fn sequence_markers_order_by_position() {
        assert!(SequenceMarker::new(0) < SequenceMarker::new(1));
    }
}
