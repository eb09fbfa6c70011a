use canonical_json::to_string;
use serde_json::{Number, Value};

use crate::record::Record;
use std::fmt;

/// Error returned when canonicalization fails.
#[derive(thiserror::Error, Debug)]
pub enum CanonicalError {
    /// A field value is of a type the canonicalization rule does not define
    /// (e.g., a non-finite floating value).
    #[error("unserializable field at {0}")]
    UnserializableField(String),
    /// Provided structure could not be canonicalized.
    #[error("invalid structure: {0}")]
    InvalidStructure(String),
    /// Generic failure from the canonical JSON encoder.
    #[error("other error: {0}")]
    Other(String),
}

/// Deterministic byte string derived from a record's field set.
///
/// Ephemeral: computed on demand, hashed, and discarded; never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CanonicalForm(Vec<u8>);

impl CanonicalForm {
    /// Wraps already-canonical bytes.
    ///
    /// Callers that obtained canonical bytes out of band (e.g., from a
    /// recorded audit trail) can commit them without re-canonicalizing.
    pub fn new(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }

    /// Returns the canonical bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Consumes the form and returns the canonical bytes.
    pub fn into_bytes(self) -> Vec<u8> {
        self.0
    }

    /// Returns the byte length of the canonical form.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the canonical form is empty.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Helper for building field paths in error messages.
#[derive(Debug, Clone)]
struct Path {
    segments: Vec<String>,
}

impl Path {
    fn root() -> Self {
        Self {
            segments: Vec::new(),
        }
    }

    fn push_field(&self, field: &str) -> Self {
        let mut segments = self.segments.clone();
        segments.push(field.to_string());
        Self { segments }
    }

    fn push_index(&self, index: usize) -> Self {
        let mut segments = self.segments.clone();
        segments.push(format!("[{}]", index));
        Self { segments }
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.segments.is_empty() {
            write!(f, "root")
        } else {
            write!(f, "{}", self.segments.join("."))
        }
    }
}

/// Number of fractional digits in the canonical decimal representation.
///
/// Matches the record-keeper's rounding of monetary and energy quantities.
pub const DECIMAL_SCALE: usize = 4;

/// Canonicalizer that turns a record into deterministic bytes.
///
/// Output depends only on field name/value pairs: never on field insertion
/// order, process identity, or wall-clock time. Stateless and safe to share
/// across threads.
#[derive(Debug, Clone, Copy, Default)]
pub struct Canonicalizer;

impl Canonicalizer {
    /// Creates a new canonicalizer.
    pub fn new() -> Self {
        Self
    }

    /// Produces the canonical byte string for a record.
    ///
    /// Normalization before RFC 8785 serialization:
    /// - every number becomes a fixed-scale decimal string with
    ///   [`DECIMAL_SCALE`] fractional digits, so equal numeric values yield
    ///   equal bytes regardless of the upstream numeric type;
    /// - `null`-valued fields are dropped, making an absent field and an
    ///   explicit `null` canonicalize identically;
    /// - non-finite floating values fail with
    ///   [`CanonicalError::UnserializableField`].
    pub fn canonicalize(&self, record: &Record) -> Result<CanonicalForm, CanonicalError> {
        let mut value = record.canonical_value();
        normalize(&mut value, Path::root())?;
        let canonical = to_string(&value).map_err(|err| CanonicalError::Other(err.to_string()))?;
        Ok(CanonicalForm(canonical.into_bytes()))
    }
}

/// Rewrites a JSON value into its canonical shape in place.
fn normalize(value: &mut Value, path: Path) -> Result<(), CanonicalError> {
    match value {
        Value::Object(map) => {
            // Drop explicit nulls so that absence and null agree.
            map.retain(|_, v| !v.is_null());
            for (key, child) in map.iter_mut() {
                normalize(child, path.push_field(key))?;
            }
            Ok(())
        }
        Value::Array(items) => {
            for (idx, item) in items.iter_mut().enumerate() {
                normalize(item, path.push_index(idx))?;
            }
            Ok(())
        }
        Value::Number(num) => {
            let decimal = decimal_string(num)
                .ok_or_else(|| CanonicalError::UnserializableField(format!("{}", path)))?;
            *value = Value::String(decimal);
            Ok(())
        }
        Value::String(_) | Value::Bool(_) => Ok(()),
        Value::Null => {
            // Nulls only survive outside object members (e.g., array items),
            // where dropping them would change positional meaning.
            Err(CanonicalError::InvalidStructure(format!(
                "{}: null is not canonicalizable here",
                path
            )))
        }
    }
}

/// Formats a JSON number as a fixed-scale decimal string.
///
/// Integers and floats holding the same value map to the same string
/// (`10`, `10.0`, and `10.00` all become `"10.0000"`). Returns `None` for
/// non-finite values; `serde_json` cannot represent those today, but the
/// guard stays so a future arbitrary-precision source cannot slip one past
/// the commitment.
fn decimal_string(num: &Number) -> Option<String> {
    if let Some(i) = num.as_i64() {
        return Some(format!("{}.0000", i));
    }
    if let Some(u) = num.as_u64() {
        return Some(format!("{}.0000", u));
    }
    let f = num.as_f64()?;
    if !f.is_finite() {
        return None;
    }
    let mut s = format!("{:.4}", f);
    if s == "-0.0000" {
        s = "0.0000".to_string();
    }
    Some(s)
}
