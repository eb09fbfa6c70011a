use std::fmt;

use base64::Engine;
use regex::Regex;
use serde::{Deserialize, Serialize};
use sha2::{Digest as Sha2Digest, Sha256};

use crate::canonicalizer::{CanonicalError, CanonicalForm, Canonicalizer};
use crate::record::Record;
use crate::validation::ValidationError;

/// Fixed fingerprint length in bytes.
pub const FINGERPRINT_LEN: usize = 32;

/// Domain separator for record commitments: `b"tradeseal:record:v1\0"`.
const RECORD_DOMAIN_SEPARATOR: &[u8] = b"tradeseal:record:v1\0";

/// Supported digest algorithms for commitments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DigestAlg {
    /// SHA-256 (the current Tradeseal default).
    #[serde(rename = "sha-256")]
    Sha256,
}

/// Fixed-length one-way digest of a canonical form.
///
/// A deterministic function of the canonical bytes only: no randomness, no
/// timestamp, no salt. Compared byte-for-byte during reconciliation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Fingerprint {
    alg: DigestAlg,
    bytes: [u8; FINGERPRINT_LEN],
}

impl Fingerprint {
    /// Constructs a fingerprint from raw digest bytes.
    pub fn from_bytes(bytes: [u8; FINGERPRINT_LEN]) -> Self {
        Self {
            alg: DigestAlg::Sha256,
            bytes,
        }
    }

    /// Parses a fingerprint from its base64url (no padding) encoding.
    pub fn parse_b64(b64: impl AsRef<str>) -> Result<Self, ValidationError> {
        let b64 = b64.as_ref();
        let re = Regex::new(r"^[A-Za-z0-9_-]{43}$").expect("invalid regex");
        if !re.is_match(b64) {
            return Err(ValidationError::PatternMismatch {
                field: "fingerprint",
                value: b64.to_string(),
            });
        }
        let decoded = base64::engine::general_purpose::URL_SAFE_NO_PAD
            .decode(b64)
            .map_err(|_| ValidationError::PatternMismatch {
                field: "fingerprint",
                value: b64.to_string(),
            })?;
        let bytes: [u8; FINGERPRINT_LEN] =
            decoded
                .try_into()
                .map_err(|_| ValidationError::OutOfBounds {
                    field: "fingerprint",
                    value: b64.to_string(),
                })?;
        Ok(Self::from_bytes(bytes))
    }

    /// Returns the digest algorithm.
    pub fn alg(&self) -> DigestAlg {
        self.alg
    }

    /// Returns the raw digest bytes.
    pub fn as_bytes(&self) -> &[u8; FINGERPRINT_LEN] {
        &self.bytes
    }

    /// Returns the base64url (no padding) encoding of the digest bytes.
    pub fn to_b64(&self) -> String {
        base64::engine::general_purpose::URL_SAFE_NO_PAD.encode(self.bytes)
    }
}

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_b64())
    }
}

/// Wire shape: `{"alg":"sha-256","b64":"..."}`.
#[derive(Serialize, Deserialize)]
struct Encoded {
    alg: DigestAlg,
    b64: String,
}

impl Serialize for Fingerprint {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        Encoded {
            alg: self.alg,
            b64: self.to_b64(),
        }
        .serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Fingerprint {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let encoded = Encoded::deserialize(deserializer)?;
        Fingerprint::parse_b64(&encoded.b64).map_err(serde::de::Error::custom)
    }
}

/// Error returned when commitment fails.
#[derive(thiserror::Error, Debug)]
pub enum CommitError {
    /// The canonical form was empty; committing a placeholder record is a
    /// caller bug, not a valid commitment.
    #[error("cannot commit an empty canonical form")]
    EmptyInput,
}

/// Computes the fingerprint of a canonical form.
///
/// Formula: `sha256(domain_separator || canonical_bytes)`.
pub fn commit(form: &CanonicalForm) -> Result<Fingerprint, CommitError> {
    if form.is_empty() {
        return Err(CommitError::EmptyInput);
    }
    let mut hasher = Sha256::new();
    hasher.update(RECORD_DOMAIN_SEPARATOR);
    hasher.update(form.as_bytes());
    let digest = hasher.finalize();
    Ok(Fingerprint::from_bytes(digest.into()))
}

/// Error during record fingerprinting.
#[derive(thiserror::Error, Debug)]
pub enum FingerprintError {
    /// Canonicalization failed.
    #[error("canonicalization failed: {0}")]
    Canonical(#[from] CanonicalError),
    /// Commitment failed.
    #[error("commitment failed: {0}")]
    Commit(#[from] CommitError),
}

/// Canonicalizes and commits a record in one step.
pub fn fingerprint_record(
    record: &Record,
    canonicalizer: &Canonicalizer,
) -> Result<Fingerprint, FingerprintError> {
    let form = canonicalizer.canonicalize(record)?;
    Ok(commit(&form)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn commit_rejects_empty_input() {
        let form = CanonicalForm::new(Vec::new());
        assert!(matches!(commit(&form), Err(CommitError::EmptyInput)));
    }

    #[test]
    fn canonicalized_records_are_never_empty() {
        let form = Canonicalizer::new()
            .canonicalize(&Record::new(crate::RecordId::new(1), serde_json::Map::new()))
            .unwrap();
        assert!(!form.is_empty());
        commit(&form).unwrap();
    }

    #[test]
    fn fingerprint_round_trips_through_b64() {
        let fp = Fingerprint::from_bytes([7u8; FINGERPRINT_LEN]);
        let parsed = Fingerprint::parse_b64(fp.to_b64()).unwrap();
        assert_eq!(fp, parsed);
    }

    #[test]
    fn fingerprint_serializes_with_algorithm_tag() {
        let fp = Fingerprint::from_bytes([0u8; FINGERPRINT_LEN]);
        let json = serde_json::to_value(fp).unwrap();
        assert_eq!(json["alg"], "sha-256");
        assert_eq!(json["b64"].as_str().unwrap().len(), 43);
    }

    #[test]
    fn parse_rejects_bad_encodings() {
        assert!(Fingerprint::parse_b64("short").is_err());
        assert!(Fingerprint::parse_b64("!".repeat(43)).is_err());
    }
}
