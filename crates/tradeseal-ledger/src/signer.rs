//! Opaque signer boundary for signed publications.

use serde::{Deserialize, Serialize};
use tradeseal_canonical::{Fingerprint, RecordId};

/// Signed transaction envelope produced by the external signer.
///
/// Entirely opaque to this crate: the fields are carried through to the
/// ledger append unchanged and never interpreted. Key management and the
/// signing algorithm live with the external signer collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignedEnvelope {
    /// Signature algorithm label (e.g., "ed25519", "ecdsa-p256-sha256").
    pub alg: String,
    /// Key identifier (e.g., DID, KMS key ARN, wallet address).
    pub key_id: String,
    /// Signature bytes (base64url-no-pad).
    pub sig: String,
}

/// External signer collaborator.
///
/// Deployments where publication requires a signed transaction implement
/// this trait; the envelope is passed through to the ledger append call.
pub trait Signer {
    /// Error type produced by the signer.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Signs a `(record_id, fingerprint)` pair for publication.
    fn sign(
        &self,
        record_id: RecordId,
        fingerprint: &Fingerprint,
    ) -> Result<SignedEnvelope, Self::Error>;
}
