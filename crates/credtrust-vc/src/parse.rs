//! Credential parsing from JSON.
//!
//! Wire fields: `id`, `type`, `issuer`, `issuanceDate`, `expirationDate`,
//! `credentialSubject`, `proof`. Relative DID URLs (`#fragment`) in `id`
//! and `issuer` resolve against the caller's reference DID; the proof's
//! `verificationMethod` resolves against the issuer.

use std::str::FromStr;

use serde_json::{Map, Value};

use credtrust_core::{Did, DidUrl, Timestamp};

use crate::credential::{CredentialDraft, VerifiableCredential};
use crate::error::VcError;
use crate::proof::Proof;
use crate::subject::CredentialSubject;

impl VerifiableCredential {
    /// Parse raw JSON bytes.
    ///
    /// # Errors
    ///
    /// - [`VcError::IllegalArgument`] for empty input or bytes that are not
    ///   JSON.
    /// - [`VcError::Malformed`] for anything else structurally wrong.
    pub fn from_json_bytes(bytes: &[u8]) -> Result<Self, VcError> {
        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Err(VcError::IllegalArgument("empty credential input".into()));
        }
        let value: Value = serde_json::from_slice(bytes)
            .map_err(|e| VcError::IllegalArgument(format!("credential input is not JSON: {e}")))?;
        Self::from_json_value(&value)
    }

    /// Parse JSON text.
    pub fn from_json_str(json: &str) -> Result<Self, VcError> {
        Self::from_json_bytes(json.as_bytes())
    }

    /// Parse an already-decoded JSON value with no reference DID.
    pub fn from_json_value(value: &Value) -> Result<Self, VcError> {
        Self::parse_with_reference(value, None)
    }

    /// Parse a JSON value, resolving relative ids against `reference`.
    pub fn parse_with_reference(value: &Value, reference: Option<&Did>) -> Result<Self, VcError> {
        let obj = value
            .as_object()
            .ok_or_else(|| VcError::malformed("credential must be a JSON object"))?;

        let types = parse_types(obj)?;
        let expiration_date = optional_timestamp(obj, "expirationDate")?;

        let id = match obj.get("id").and_then(Value::as_str) {
            Some(s) => DidUrl::parse_with_reference(s, reference)
                .map_err(|e| VcError::invalid_field("credential id", e))?,
            None => return Err(VcError::malformed("missing credential id")),
        };

        let subject_node = obj
            .get("credentialSubject")
            .ok_or_else(|| VcError::malformed("missing credential subject"))?;
        let subject = CredentialSubject::parse(subject_node, reference)?;

        let proof_node = obj
            .get("proof")
            .ok_or_else(|| VcError::malformed("missing credential proof"))?;

        let issuer = match obj.get("issuer") {
            None | Some(Value::Null) => subject.did().clone(),
            Some(Value::String(s)) => parse_issuer(s, reference)?,
            Some(_) => return Err(VcError::malformed("invalid credential issuer")),
        };

        let issuance_date = optional_timestamp(obj, "issuanceDate")?
            .ok_or_else(|| VcError::malformed("missing credential issuanceDate"))?;

        let proof = Proof::parse(proof_node, &issuer)?;

        CredentialDraft {
            id: Some(id),
            types,
            issuer: Some(issuer),
            issuance_date: Some(issuance_date),
            expiration_date,
            subject: Some(subject),
            proof: Some(proof),
        }
        .build()
    }
}

impl FromStr for VerifiableCredential {
    type Err = VcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_json_str(s)
    }
}

fn parse_types(obj: &Map<String, Value>) -> Result<Vec<String>, VcError> {
    let items = obj
        .get("type")
        .and_then(Value::as_array)
        .ok_or_else(|| VcError::malformed("missing credential type"))?;
    items
        .iter()
        .map(|item| {
            item.as_str()
                .map(str::to_string)
                .ok_or_else(|| VcError::malformed("invalid credential type: entries must be strings"))
        })
        .collect()
}

fn optional_timestamp(obj: &Map<String, Value>, field: &str) -> Result<Option<Timestamp>, VcError> {
    match obj.get(field) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Timestamp::parse(s)
            .map(Some)
            .map_err(|e| VcError::invalid_field(&format!("credential {field}"), e)),
        Some(_) => Err(VcError::malformed(format!("invalid credential {field}"))),
    }
}

/// An issuer names a DID. A fragment, relative or absolute, is rejected
/// rather than dropped.
fn parse_issuer(s: &str, reference: Option<&Did>) -> Result<Did, VcError> {
    let url = DidUrl::parse_with_reference(s, reference)
        .map_err(|e| VcError::invalid_field("credential issuer", e))?;
    if url.fragment().is_some() {
        return Err(VcError::malformed("invalid credential issuer: fragment not allowed"));
    }
    Ok(url.did().clone())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn base() -> Value {
        json!({
            "id": "did:example:alice#email",
            "type": ["EmailCredential"],
            "issuanceDate": "2024-01-01T00:00:00Z",
            "credentialSubject": {"id": "did:example:alice", "email": "alice@example.com"},
            "proof": {"verificationMethod": "#primary", "signature": "ab"}
        })
    }

    fn without(field: &str) -> Value {
        let mut v = base();
        v.as_object_mut().unwrap().remove(field);
        v
    }

    fn malformed_hint(value: Value) -> String {
        match VerifiableCredential::from_json_value(&value) {
            Err(VcError::Malformed(hint)) => hint,
            other => panic!("expected malformed, got {other:?}"),
        }
    }

    #[test]
    fn parses_minimal_credential() {
        let vc = VerifiableCredential::from_json_value(&base()).unwrap();
        assert_eq!(vc.id().to_string(), "did:example:alice#email");
        assert_eq!(vc.issuer().as_str(), "did:example:alice");
        assert!(vc.expiration_date().is_none());
        assert_eq!(
            vc.proof().verification_method().to_string(),
            "did:example:alice#primary"
        );
    }

    #[test]
    fn missing_fields_are_named() {
        assert_eq!(malformed_hint(without("type")), "missing credential type");
        assert_eq!(malformed_hint(without("credentialSubject")), "missing credential subject");
        assert_eq!(malformed_hint(without("proof")), "missing credential proof");
        assert_eq!(malformed_hint(without("issuanceDate")), "missing credential issuanceDate");
        assert_eq!(malformed_hint(without("id")), "missing credential id");
    }

    #[test]
    fn type_is_checked_before_subject() {
        let mut v = without("type");
        v.as_object_mut().unwrap().remove("credentialSubject");
        assert_eq!(malformed_hint(v), "missing credential type");
    }

    #[test]
    fn empty_type_list_fails() {
        let mut v = base();
        v["type"] = json!([]);
        assert_eq!(malformed_hint(v), "missing credential type");
    }

    #[test]
    fn relative_id_needs_reference() {
        let mut v = base();
        v["id"] = json!("#email");
        assert!(malformed_hint(v.clone()).starts_with("invalid credential id"));

        let reference = Did::new("did:example:alice").unwrap();
        let vc = VerifiableCredential::parse_with_reference(&v, Some(&reference)).unwrap();
        assert_eq!(vc.id().to_string(), "did:example:alice#email");
    }

    #[test]
    fn explicit_issuer_resolves_proof_method() {
        let mut v = base();
        v["issuer"] = json!("did:example:uni");
        let vc = VerifiableCredential::from_json_value(&v).unwrap();
        assert!(!vc.is_self_proclaimed());
        assert_eq!(vc.proof().verification_method().did().as_str(), "did:example:uni");
    }

    #[test]
    fn issuer_with_fragment_rejected() {
        let mut v = base();
        v["issuer"] = json!("did:example:uni#key");
        assert!(malformed_hint(v).contains("fragment"));
    }

    #[test]
    fn relative_issuer_fragment_rejected() {
        let mut v = base();
        v["issuer"] = json!("#key-1");
        let reference = Did::new("did:example:ref").unwrap();
        match VerifiableCredential::parse_with_reference(&v, Some(&reference)) {
            Err(VcError::Malformed(hint)) => assert!(hint.contains("fragment")),
            other => panic!("expected malformed, got {other:?}"),
        }
    }

    #[test]
    fn bad_dates_rejected() {
        let mut v = base();
        v["issuanceDate"] = json!("yesterday");
        assert!(malformed_hint(v).starts_with("invalid credential issuanceDate"));

        let mut v = base();
        v["expirationDate"] = json!(1700000000);
        assert_eq!(malformed_hint(v), "invalid credential expirationDate");
    }

    #[test]
    fn raw_input_errors() {
        assert!(matches!(
            VerifiableCredential::from_json_bytes(b""),
            Err(VcError::IllegalArgument(_))
        ));
        assert!(matches!(
            VerifiableCredential::from_json_str("  \n"),
            Err(VcError::IllegalArgument(_))
        ));
        assert!(matches!(
            VerifiableCredential::from_json_str("{not json"),
            Err(VcError::IllegalArgument(_))
        ));
        assert!(matches!(
            VerifiableCredential::from_json_bytes(&[0xff, 0xfe]),
            Err(VcError::IllegalArgument(_))
        ));
        assert!(matches!(
            VerifiableCredential::from_json_str("[1,2,3]"),
            Err(VcError::Malformed(_))
        ));
    }

    #[test]
    fn from_str_parses() {
        let vc: VerifiableCredential = base().to_string().parse().unwrap();
        assert_eq!(vc.type_string(), "[EmailCredential]");
    }
}
