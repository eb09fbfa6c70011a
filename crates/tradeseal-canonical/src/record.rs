use std::fmt;

use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::validation::ValidationError;

/// Stable identifier of an off-chain trade record.
///
/// Assigned once by the record-keeper, never reused. The public ledger
/// represents record identifiers as unsigned integers, so negative or
/// overflowing textual input is rejected at parse time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordId(u64);

impl RecordId {
    /// Creates a record identifier from a raw value.
    pub fn new(value: u64) -> Self {
        Self(value)
    }

    /// Parses a record identifier from text.
    ///
    /// Rejects anything that is not a non-negative decimal integer within
    /// 64-bit range.
    pub fn parse(value: impl AsRef<str>) -> Result<Self, ValidationError> {
        let s = value.as_ref();
        s.parse::<u64>()
            .map(Self)
            .map_err(|_| ValidationError::PatternMismatch {
                field: "record_id",
                value: s.to_string(),
            })
    }

    /// Returns the raw identifier value.
    pub fn value(self) -> u64 {
        self.0
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for RecordId {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

/// Stable identifier of a publishing principal (`kind:name`, lowercase).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Publisher(String);

impl Publisher {
    /// Creates a publisher without validation; callers are responsible for conformity.
    pub fn new(value: String) -> Self {
        Self(value)
    }

    /// Parses a validated publisher identifier.
    pub fn parse(value: impl Into<String>) -> Result<Self, ValidationError> {
        let s = value.into();
        let re = Regex::new(r"^(service|human|org):[a-z][a-z0-9_-]{0,62}$").expect("invalid regex");
        if !re.is_match(&s) {
            return Err(ValidationError::PatternMismatch {
                field: "publisher",
                value: s,
            });
        }
        Ok(Self(s))
    }
}

impl AsRef<str> for Publisher {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Publisher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// An off-chain trade record as read from the external record store.
///
/// The field map carries the sensitive trade data (quantities, prices,
/// counterparties); values may be numbers, strings, booleans, and nested
/// structures. The core only ever reads records, it never mutates them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    /// Stable record identifier.
    pub record_id: RecordId,
    /// Field name to value pairs.
    pub fields: Map<String, Value>,
}

impl Record {
    /// Creates a record from an identifier and a field map.
    pub fn new(record_id: RecordId, fields: Map<String, Value>) -> Self {
        Self { record_id, fields }
    }

    /// Returns the JSON object that participates in canonicalization:
    /// the field map with `record_id` bound in as a field.
    pub fn canonical_value(&self) -> Value {
        let mut map = self.fields.clone();
        map.insert(
            "record_id".to_string(),
            Value::Number(self.record_id.value().into()),
        );
        Value::Object(map)
    }
}
