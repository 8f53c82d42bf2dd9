//! # Canonical Serialization: Ordered, Deterministic Bytes
//!
//! This module defines [`CanonicalBytes`], the only type accepted by the
//! signing and digest paths, and [`CanonicalWriter`], the field-by-field
//! writer that produces it.
//!
//! ## Rules
//!
//! 1. **Caller-ordered envelope.** Fields written through the writer appear
//!    in the order they were written. The envelope order of a credential is
//!    a wire contract owned by the encoder, not by this module.
//! 2. **Sorted nested objects.** Any JSON object passed as a field value is
//!    emitted with its keys in ascending, case-insensitive order, at every
//!    depth. Ties between keys equal under case folding fall back to the
//!    exact byte order, so the result is total and deterministic.
//! 3. **Shortest numbers.** Integers are written as-is. Decimals use the
//!    shortest text that parses back to the same `f64`, so `3.8` stays `3.8`.
//! 4. **Compact output.** No insignificant whitespace; UTF-8 passes through
//!    unescaped.

use std::cmp::Ordering;

use serde::Serialize;
use serde_json::{Map, Value};

use crate::error::CanonicalizationError;

/// Bytes produced exclusively by the canonical pipeline.
///
/// # Invariants
///
/// - Constructed only by [`CanonicalBytes::new()`] or [`CanonicalWriter::finish()`].
/// - Valid UTF-8, valid compact JSON.
/// - Nested object keys are in case-insensitive ascending order.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CanonicalBytes(String);

impl CanonicalBytes {
    /// Canonicalize any serializable value with sorted object keys.
    ///
    /// # Errors
    ///
    /// Returns [`CanonicalizationError::SerializationFailed`] if the value
    /// cannot be represented as JSON.
    pub fn new(obj: &impl Serialize) -> Result<Self, CanonicalizationError> {
        let value = serde_json::to_value(obj)?;
        let coerced = coerce_json_value(value);
        Ok(Self(serde_json::to_string(&coerced)?))
    }

    /// The canonical bytes.
    pub fn as_bytes(&self) -> &[u8] {
        self.0.as_bytes()
    }

    /// The canonical text.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume into the canonical text.
    pub fn into_string(self) -> String {
        self.0
    }

    /// Length of the canonical byte sequence.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the canonical byte sequence is empty.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl AsRef<[u8]> for CanonicalBytes {
    fn as_ref(&self) -> &[u8] {
        self.0.as_bytes()
    }
}

/// Writes a JSON object one field at a time, in call order.
///
/// Scalar and nested values are canonicalized as they are written; nested
/// writers are embedded verbatim so their own field order is preserved.
///
/// ```
/// use credtrust_core::CanonicalWriter;
///
/// let mut w = CanonicalWriter::new();
/// w.string_field("id", "did:example:1")
///     .field("claims", &serde_json::json!({"b": 1, "A": 2}))
///     .unwrap();
/// assert_eq!(w.finish().unwrap().as_str(), r#"{"id":"did:example:1","claims":{"A":2,"b":1}}"#);
/// ```
#[derive(Debug, Clone, Default)]
pub struct CanonicalWriter {
    fields: Map<String, Value>,
}

impl CanonicalWriter {
    /// Start an empty object.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a string field.
    pub fn string_field(&mut self, name: &str, value: impl Into<String>) -> &mut Self {
        self.fields.insert(name.to_string(), Value::String(value.into()));
        self
    }

    /// Append an array of strings, in the order given.
    pub fn string_array_field<I, S>(&mut self, name: &str, values: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let items = values.into_iter().map(|s| Value::String(s.into())).collect();
        self.fields.insert(name.to_string(), Value::Array(items));
        self
    }

    /// Append an arbitrary value with its nested keys sorted.
    ///
    /// # Errors
    ///
    /// Propagates [`CanonicalizationError`] from the value.
    pub fn field(
        &mut self,
        name: &str,
        value: &impl Serialize,
    ) -> Result<&mut Self, CanonicalizationError> {
        let value = coerce_json_value(serde_json::to_value(value)?);
        self.fields.insert(name.to_string(), value);
        Ok(self)
    }

    /// Embed another writer's object as a field, keeping its field order.
    pub fn object_field(&mut self, name: &str, nested: CanonicalWriter) -> &mut Self {
        self.fields.insert(name.to_string(), Value::Object(nested.fields));
        self
    }

    /// Whether no field has been written.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Finish the object and produce its canonical bytes.
    ///
    /// # Errors
    ///
    /// Returns [`CanonicalizationError::SerializationFailed`] if serialization
    /// fails.
    pub fn finish(self) -> Result<CanonicalBytes, CanonicalizationError> {
        Ok(CanonicalBytes(serde_json::to_string(&Value::Object(self.fields))?))
    }
}

/// Total order on strings: case-insensitive ascending, then exact bytes.
pub fn compare_case_insensitive(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| a.cmp(b))
}

/// Sort strings ascending, case-insensitive, without deduplicating.
pub fn sort_case_insensitive(items: &mut [String]) {
    items.sort_by(|a, b| compare_case_insensitive(a, b));
}

/// Recursively apply the canonical rules to a JSON value.
///
/// Scalars pass through; serde_json already writes numbers in their
/// shortest round-trip form. Object keys are re-inserted in
/// case-insensitive order and arrays keep their element order.
fn coerce_json_value(value: Value) -> Value {
    match value {
        Value::Null | Value::Bool(_) | Value::String(_) | Value::Number(_) => value,
        Value::Object(map) => {
            let mut entries: Vec<(String, Value)> = map.into_iter().collect();
            entries.sort_by(|(a, _), (b, _)| compare_case_insensitive(a, b));
            Value::Object(
                entries
                    .into_iter()
                    .map(|(k, v)| (k, coerce_json_value(v)))
                    .collect(),
            )
        }
        Value::Array(arr) => Value::Array(arr.into_iter().map(coerce_json_value).collect()),
    }
}
