//! # Verifiable Credential
//!
//! [`VerifiableCredential`] is immutable once built. Every instance, whether
//! parsed from JSON or assembled in code, passes through
//! [`CredentialDraft::build`], which enforces the structural rules:
//!
//! - at least one type,
//! - an id, a subject, an issuance date and a proof,
//! - the issuer defaults to the subject DID when absent.
//!
//! Types are stored as given; the canonical encoder sorts them.

use std::sync::{Arc, OnceLock};

use credtrust_core::{sort_case_insensitive, Did, DidUrl, Timestamp};

use crate::error::VcError;
use crate::metadata::CredentialMetadata;
use crate::proof::Proof;
use crate::subject::CredentialSubject;

/// A parsed, structurally valid credential.
#[derive(Debug, Clone)]
pub struct VerifiableCredential {
    id: DidUrl,
    types: Vec<String>,
    issuer: Did,
    issuance_date: Timestamp,
    expiration_date: Option<Timestamp>,
    subject: CredentialSubject,
    proof: Proof,
    metadata: OnceLock<Arc<CredentialMetadata>>,
}

/// Mutable builder for a [`VerifiableCredential`].
#[derive(Debug, Clone, Default)]
pub struct CredentialDraft {
    pub id: Option<DidUrl>,
    pub types: Vec<String>,
    pub issuer: Option<Did>,
    pub issuance_date: Option<Timestamp>,
    pub expiration_date: Option<Timestamp>,
    pub subject: Option<CredentialSubject>,
    pub proof: Option<Proof>,
}

impl CredentialDraft {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seal the draft.
    ///
    /// # Errors
    ///
    /// [`VcError::Malformed`] naming the first missing field, checked in the
    /// order type, subject, proof, issuanceDate, id.
    pub fn build(self) -> Result<VerifiableCredential, VcError> {
        if self.types.is_empty() {
            return Err(VcError::malformed("missing credential type"));
        }
        if self.types.iter().any(|t| t.is_empty()) {
            return Err(VcError::malformed("invalid credential type: empty entry"));
        }
        let subject = self
            .subject
            .ok_or_else(|| VcError::malformed("missing credential subject"))?;
        let proof = self
            .proof
            .ok_or_else(|| VcError::malformed("missing credential proof"))?;
        let issuance_date = self
            .issuance_date
            .ok_or_else(|| VcError::malformed("missing credential issuanceDate"))?;
        let id = self
            .id
            .ok_or_else(|| VcError::malformed("missing credential id"))?;
        let issuer = self.issuer.unwrap_or_else(|| subject.did().clone());

        Ok(VerifiableCredential {
            id,
            types: self.types,
            issuer,
            issuance_date,
            expiration_date: self.expiration_date,
            subject,
            proof,
            metadata: OnceLock::new(),
        })
    }
}

impl VerifiableCredential {
    pub fn id(&self) -> &DidUrl {
        &self.id
    }

    /// Types in the order they were given.
    pub fn types(&self) -> &[String] {
        &self.types
    }

    /// Types in canonical (case-insensitive) order.
    pub fn sorted_types(&self) -> Vec<String> {
        let mut types = self.types.clone();
        sort_case_insensitive(&mut types);
        types
    }

    /// Types rendered as `[A, B, C]`, in stored order.
    pub fn type_string(&self) -> String {
        format!("[{}]", self.types.join(", "))
    }

    pub fn issuer(&self) -> &Did {
        &self.issuer
    }

    pub fn issuance_date(&self) -> Timestamp {
        self.issuance_date
    }

    pub fn expiration_date(&self) -> Option<Timestamp> {
        self.expiration_date
    }

    pub fn subject(&self) -> &CredentialSubject {
        &self.subject
    }

    pub fn proof(&self) -> &Proof {
        &self.proof
    }

    /// Whether the issuer is the subject.
    pub fn is_self_proclaimed(&self) -> bool {
        self.issuer == *self.subject.did()
    }

    /// Whether the expiration date, if any, has passed. No resolution.
    pub fn is_expired_by_date(&self) -> bool {
        self.expiration_date.is_some_and(|t| t.is_past())
    }

    /// Local metadata, created empty on first access.
    pub fn metadata(&self) -> &CredentialMetadata {
        self.metadata
            .get_or_init(|| Arc::new(CredentialMetadata::new(self.id.clone())))
    }

    /// Persist metadata through its attached store.
    ///
    /// No-op when metadata was never touched or has no store attached.
    pub fn save_metadata(&self) -> Result<(), VcError> {
        if let Some(metadata) = self.metadata.get() {
            metadata.save(self.subject.did())?;
        }
        Ok(())
    }

    /// Reopen as a draft, dropping metadata.
    pub fn to_draft(&self) -> CredentialDraft {
        CredentialDraft {
            id: Some(self.id.clone()),
            types: self.types.clone(),
            issuer: Some(self.issuer.clone()),
            issuance_date: Some(self.issuance_date),
            expiration_date: self.expiration_date,
            subject: Some(self.subject.clone()),
            proof: Some(self.proof.clone()),
        }
    }
}

/// Equality covers the signed content and proof, not metadata.
impl PartialEq for VerifiableCredential {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
            && self.sorted_types() == other.sorted_types()
            && self.issuer == other.issuer
            && self.issuance_date == other.issuance_date
            && self.expiration_date == other.expiration_date
            && self.subject == other.subject
            && self.proof == other.proof
    }
}

impl Eq for VerifiableCredential {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::proof::ProofType;
    use serde_json::Map;

    fn did(s: &str) -> Did {
        Did::new(s).unwrap()
    }

    fn draft() -> CredentialDraft {
        let subject = did("did:example:alice");
        CredentialDraft {
            id: Some(DidUrl::new(subject.clone(), Some("profile")).unwrap()),
            types: vec!["ProfileCredential".into(), "BasicProfileCredential".into()],
            issuer: None,
            issuance_date: Some(Timestamp::parse("2024-01-01T00:00:00Z").unwrap()),
            expiration_date: None,
            subject: Some(CredentialSubject::new(subject.clone(), Map::new())),
            proof: Some(Proof::new(
                ProofType::DEFAULT,
                DidUrl::new(subject, Some("primary")).unwrap(),
                "00",
            )),
        }
    }

    #[test]
    fn build_defaults_issuer_to_subject() {
        let vc = draft().build().unwrap();
        assert_eq!(vc.issuer().as_str(), "did:example:alice");
        assert!(vc.is_self_proclaimed());
    }

    #[test]
    fn build_reports_first_missing_field() {
        let mut d = draft();
        d.types.clear();
        d.subject = None;
        assert!(d.build().unwrap_err().to_string().contains("credential type"));

        let mut d = draft();
        d.subject = None;
        d.proof = None;
        assert!(d.build().unwrap_err().to_string().contains("credential subject"));

        let mut d = draft();
        d.proof = None;
        assert!(d.build().unwrap_err().to_string().contains("credential proof"));

        let mut d = draft();
        d.issuance_date = None;
        assert!(d.build().unwrap_err().to_string().contains("issuanceDate"));

        let mut d = draft();
        d.id = None;
        assert!(d.build().unwrap_err().to_string().contains("credential id"));
    }

    #[test]
    fn build_rejects_empty_type_entry() {
        let mut d = draft();
        d.types.push(String::new());
        assert!(matches!(d.build(), Err(VcError::Malformed(_))));
    }

    #[test]
    fn type_string_keeps_stored_order() {
        let mut d = draft();
        d.types = vec!["b".into(), "C".into(), "a".into()];
        let vc = d.build().unwrap();
        assert_eq!(vc.types(), ["b", "C", "a"]);
        assert_eq!(vc.type_string(), "[b, C, a]");
        assert_eq!(vc.sorted_types(), ["a", "b", "C"]);
    }

    #[test]
    fn foreign_issuer_is_not_self_proclaimed() {
        let mut d = draft();
        d.issuer = Some(did("did:example:university"));
        assert!(!d.build().unwrap().is_self_proclaimed());
    }

    #[test]
    fn expiry_by_date() {
        let mut d = draft();
        d.expiration_date = Some(Timestamp::parse("2000-01-01T00:00:00Z").unwrap());
        assert!(d.build().unwrap().is_expired_by_date());

        let mut d = draft();
        d.expiration_date = Some(Timestamp::parse("2999-01-01T00:00:00Z").unwrap());
        assert!(!d.build().unwrap().is_expired_by_date());

        assert!(!draft().build().unwrap().is_expired_by_date());
    }

    #[test]
    fn metadata_is_lazy_and_bound_to_id() {
        let vc = draft().build().unwrap();
        vc.save_metadata().unwrap();
        let md = vc.metadata();
        assert_eq!(md.credential_id(), vc.id());
        md.set_alias(Some("profile".into()));
        assert_eq!(vc.metadata().alias().as_deref(), Some("profile"));
        vc.save_metadata().unwrap();
    }

    #[test]
    fn equality_ignores_type_order_and_metadata() {
        let a = draft().build().unwrap();
        let mut d = draft();
        d.types.reverse();
        let b = d.build().unwrap();
        b.metadata().set_alias(Some("x".into()));
        assert_eq!(a, b);
        assert_eq!(a.to_draft().build().unwrap(), a);
    }
}
