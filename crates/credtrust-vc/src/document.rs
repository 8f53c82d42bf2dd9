//! # Identity Documents and Resolution
//!
//! The engine never fetches documents itself. Callers supply a
//! [`DidResolver`]; whatever it returns is consulted through the
//! [`DidDocument`] trait.
//!
//! [`StaticDocument`] and [`InMemoryResolver`] cover fixed registries and
//! tests.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::RwLock;

use credtrust_core::{CanonicalBytes, CryptoError, Did, DidUrl, Timestamp};
use credtrust_crypto::{verify_with_public_key, Ed25519PublicKey, Ed25519Signature};

use crate::error::{DocumentError, ResolveError};

/// A resolved DID document, as seen by the trust engine.
pub trait DidDocument: Send + Sync {
    /// The DID this document describes.
    fn subject(&self) -> &Did;

    fn is_expired(&self) -> bool;

    /// Whether the document's own integrity checks out.
    fn is_genuine(&self) -> bool;

    fn is_valid(&self) -> bool;

    /// Whether `key` is one of this document's authentication keys.
    fn contains_authentication_key(&self, key: &DidUrl) -> bool;

    /// Verify `signature` over `data` with key `key`.
    ///
    /// `Ok(false)` means the signature is well-formed but does not match.
    fn verify(&self, key: &DidUrl, signature: &str, data: &CanonicalBytes) -> Result<bool, DocumentError>;
}

/// Resolves a DID to its current document.
pub trait DidResolver: Send + Sync {
    /// `Ok(None)` when the DID has no document.
    fn resolve(&self, did: &Did) -> Result<Option<Arc<dyn DidDocument>>, ResolveError>;
}

/// A document with a fixed key set and fixed status flags.
#[derive(Debug, Clone)]
pub struct StaticDocument {
    subject: Did,
    authentication: Vec<(DidUrl, Ed25519PublicKey)>,
    expires: Option<Timestamp>,
    deactivated: bool,
    genuine: bool,
}

impl StaticDocument {
    /// A live, genuine document with no keys.
    pub fn new(subject: Did) -> Self {
        Self {
            subject,
            authentication: Vec::new(),
            expires: None,
            deactivated: false,
            genuine: true,
        }
    }

    /// Add an authentication key. A key id from another DID is rejected.
    pub fn with_authentication_key(
        mut self,
        id: DidUrl,
        key: Ed25519PublicKey,
    ) -> Result<Self, credtrust_core::ValidationError> {
        if id.did() != &self.subject || id.fragment().is_none() {
            return Err(credtrust_core::ValidationError::InvalidDidUrl(format!(
                "key {id} does not belong to {}",
                self.subject
            )));
        }
        self.authentication.retain(|(existing, _)| existing != &id);
        self.authentication.push((id, key));
        Ok(self)
    }

    pub fn with_expiry(mut self, expires: Timestamp) -> Self {
        self.expires = Some(expires);
        self
    }

    pub fn deactivated(mut self, deactivated: bool) -> Self {
        self.deactivated = deactivated;
        self
    }

    /// Mark the document's own integrity as failed (or restored).
    pub fn genuine(mut self, genuine: bool) -> Self {
        self.genuine = genuine;
        self
    }

    fn key(&self, id: &DidUrl) -> Option<&Ed25519PublicKey> {
        self.authentication
            .iter()
            .find(|(existing, _)| existing == id)
            .map(|(_, key)| key)
    }
}

impl DidDocument for StaticDocument {
    fn subject(&self) -> &Did {
        &self.subject
    }

    fn is_expired(&self) -> bool {
        self.expires.is_some_and(|t| t.is_past())
    }

    fn is_genuine(&self) -> bool {
        self.genuine
    }

    fn is_valid(&self) -> bool {
        !self.deactivated && !self.is_expired() && self.genuine
    }

    fn contains_authentication_key(&self, key: &DidUrl) -> bool {
        self.key(key).is_some()
    }

    fn verify(&self, key: &DidUrl, signature: &str, data: &CanonicalBytes) -> Result<bool, DocumentError> {
        let public_key = self
            .key(key)
            .ok_or_else(|| DocumentError::UnknownKey(key.to_string()))?;
        let signature = Ed25519Signature::from_hex(signature)?;
        match verify_with_public_key(data, &signature, public_key) {
            Ok(()) => Ok(true),
            Err(CryptoError::VerificationFailed(_)) => Ok(false),
            Err(e) => Err(e.into()),
        }
    }
}

/// A resolver over a fixed in-memory map.
#[derive(Default)]
pub struct InMemoryResolver {
    documents: RwLock<HashMap<Did, Arc<dyn DidDocument>>>,
}

impl InMemoryResolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a document under its subject DID, replacing any previous one.
    pub fn insert(&self, document: impl DidDocument + 'static) {
        let document: Arc<dyn DidDocument> = Arc::new(document);
        self.documents
            .write()
            .insert(document.subject().clone(), document);
    }

    pub fn len(&self) -> usize {
        self.documents.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.read().is_empty()
    }
}

impl DidResolver for InMemoryResolver {
    fn resolve(&self, did: &Did) -> Result<Option<Arc<dyn DidDocument>>, ResolveError> {
        Ok(self.documents.read().get(did).cloned())
    }
}

impl std::fmt::Debug for InMemoryResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let documents = self.documents.read();
        f.debug_list().entries(documents.keys()).finish()
    }
}
