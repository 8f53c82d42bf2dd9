//! # Credential Proof Block
//!
//! The detachable signature block of a credential: scheme, verification
//! method and signature. Wire form:
//!
//! ```json
//! {"type": "Ed25519Signature2020", "verificationMethod": "#primary", "signature": "<hex>"}
//! ```
//!
//! `type` may be omitted on the wire and defaults to the supported scheme.
//! `verificationMethod` is resolved against the credential issuer. Proofs of
//! any other scheme parse fine; they simply never verify.

use serde_json::Value;

use credtrust_core::{CanonicalWriter, Did, DidUrl};

use crate::error::VcError;

/// The signature scheme named by a proof.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ProofType {
    /// Ed25519 signature over the canonical signing input. The only
    /// supported scheme.
    Ed25519Signature2020,

    /// Any other scheme name, kept verbatim.
    Other(String),
}

impl ProofType {
    /// The scheme assumed when a proof omits `type`.
    pub const DEFAULT: ProofType = ProofType::Ed25519Signature2020;

    /// Whether genuineness checks can verify this scheme.
    pub fn is_supported(&self) -> bool {
        matches!(self, ProofType::Ed25519Signature2020)
    }

    /// The scheme name as it appears on the wire.
    pub fn as_str(&self) -> &str {
        match self {
            ProofType::Ed25519Signature2020 => "Ed25519Signature2020",
            ProofType::Other(name) => name,
        }
    }
}

impl std::fmt::Display for ProofType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<&str> for ProofType {
    fn from(name: &str) -> Self {
        match name {
            "Ed25519Signature2020" => ProofType::Ed25519Signature2020,
            other => ProofType::Other(other.to_string()),
        }
    }
}

/// A credential proof.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Proof {
    proof_type: ProofType,
    verification_method: DidUrl,
    signature: String,
}

impl Proof {
    /// Create a proof from its parts.
    pub fn new(proof_type: ProofType, verification_method: DidUrl, signature: impl Into<String>) -> Self {
        Self {
            proof_type,
            verification_method,
            signature: signature.into(),
        }
    }

    /// The signature scheme.
    pub fn proof_type(&self) -> &ProofType {
        &self.proof_type
    }

    /// The DID URL of the signing key.
    pub fn verification_method(&self) -> &DidUrl {
        &self.verification_method
    }

    /// The encoded signature (hex for Ed25519).
    pub fn signature(&self) -> &str {
        &self.signature
    }

    /// Parse a proof block, resolving a relative verification method
    /// against `issuer`.
    pub(crate) fn parse(node: &Value, issuer: &Did) -> Result<Self, VcError> {
        let obj = node
            .as_object()
            .ok_or_else(|| VcError::malformed("invalid credential proof: not an object"))?;

        let proof_type = match obj.get("type") {
            None | Some(Value::Null) => ProofType::DEFAULT,
            Some(Value::String(s)) => ProofType::from(s.as_str()),
            Some(_) => return Err(VcError::malformed("invalid credential proof type")),
        };

        let method = obj
            .get("verificationMethod")
            .and_then(Value::as_str)
            .ok_or_else(|| VcError::malformed("missing credential proof verificationMethod"))?;
        let verification_method = DidUrl::parse_with_reference(method, Some(issuer))
            .map_err(|e| VcError::invalid_field("credential proof verificationMethod", e))?;

        let signature = obj
            .get("signature")
            .and_then(Value::as_str)
            .filter(|s| !s.is_empty())
            .ok_or_else(|| VcError::malformed("missing credential proof signature"))?;

        Ok(Self::new(proof_type, verification_method, signature))
    }

    /// Write the proof block. When not normalized, a default `type` is
    /// omitted and the verification method is shortened relative to
    /// `issuer`.
    pub(crate) fn write(&self, issuer: &Did, normalized: bool) -> CanonicalWriter {
        let mut w = CanonicalWriter::new();
        if normalized || self.proof_type != ProofType::DEFAULT {
            w.string_field("type", self.proof_type.as_str());
        }
        w.string_field(
            "verificationMethod",
            self.verification_method.render(Some(issuer), normalized),
        )
        .string_field("signature", self.signature.as_str());
        w
    }
}
