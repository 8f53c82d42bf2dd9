//! Credential subject: the DID a credential is about, plus its claims.

use serde_json::{Map, Value};

use credtrust_core::{compare_case_insensitive, CanonicalWriter, CanonicalizationError, Did};

use crate::error::VcError;

/// The subject of a credential.
///
/// Claims are arbitrary JSON. They are emitted in case-insensitive key
/// order, with nested objects sorted the same way.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CredentialSubject {
    did: Did,
    properties: Map<String, Value>,
}

impl CredentialSubject {
    /// Create a subject. An `id` entry in `properties` is dropped; the DID
    /// is carried separately.
    pub fn new(did: Did, mut properties: Map<String, Value>) -> Self {
        properties.remove("id");
        Self { did, properties }
    }

    /// The subject DID.
    pub fn did(&self) -> &Did {
        &self.did
    }

    /// All claims, excluding `id`.
    pub fn properties(&self) -> &Map<String, Value> {
        &self.properties
    }

    /// A single claim by name.
    pub fn property(&self, name: &str) -> Option<&Value> {
        self.properties.get(name)
    }

    /// Parse a subject block. A missing `id` falls back to `reference`.
    pub(crate) fn parse(node: &Value, reference: Option<&Did>) -> Result<Self, VcError> {
        let obj = node
            .as_object()
            .ok_or_else(|| VcError::malformed("invalid credential subject: not an object"))?;

        let did = match obj.get("id") {
            Some(Value::String(s)) => {
                Did::new(s.as_str()).map_err(|e| VcError::invalid_field("credential subject id", e))?
            }
            None | Some(Value::Null) => reference
                .cloned()
                .ok_or_else(|| VcError::malformed("missing credential subject id"))?,
            Some(_) => return Err(VcError::malformed("invalid credential subject id")),
        };

        Ok(Self::new(did, obj.clone()))
    }

    /// Write the subject block. The `id` is omitted only when not normalized
    /// and it equals `reference`.
    pub(crate) fn write(
        &self,
        reference: Option<&Did>,
        normalized: bool,
    ) -> Result<CanonicalWriter, CanonicalizationError> {
        let mut w = CanonicalWriter::new();
        if normalized || reference != Some(&self.did) {
            w.string_field("id", self.did.as_str());
        }

        let mut names: Vec<&String> = self.properties.keys().collect();
        names.sort_by(|a, b| compare_case_insensitive(a, b));
        for name in names {
            w.field(name, &self.properties[name.as_str()])?;
        }
        Ok(w)
    }
}
