//! # Trust Chain Tracing
//!
//! Before a credential's own claims are trusted, its issuer's document is
//! resolved and the requested [`TrustRule`] is evaluated against it. A
//! credential that is not self-proclaimed gets a second resolution pass of
//! the same issuer DID, and the rule must hold on both results.
//!
//! | rule   | short-circuit on a document      | result when all passes hold |
//! |--------|----------------------------------|-----------------------------|
//! | Expire | document expired: `true`         | `false`                     |
//! | Genuine| document not genuine: `false`    | `true`                      |
//! | Valid  | document not valid: `false`      | `true`                      |

use std::sync::Arc;

use credtrust_core::Did;

use crate::credential::VerifiableCredential;
use crate::document::{DidDocument, DidResolver};
use crate::error::VcError;

/// The property traced through the issuer's document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TrustRule {
    Expire,
    Genuine,
    Valid,
}

impl TrustRule {
    /// The decisive result for this document, or `None` to keep going.
    fn short_circuit(self, document: &dyn DidDocument) -> Option<bool> {
        match self {
            TrustRule::Expire => document.is_expired().then_some(true),
            TrustRule::Genuine => (!document.is_genuine()).then_some(false),
            TrustRule::Valid => (!document.is_valid()).then_some(false),
        }
    }

    /// Result when every pass was inconclusive: an expiry trace found no
    /// expiry, the other rules held.
    fn passed(self) -> bool {
        self != TrustRule::Expire
    }

    pub fn as_str(self) -> &'static str {
        match self {
            TrustRule::Expire => "expire",
            TrustRule::Genuine => "genuine",
            TrustRule::Valid => "valid",
        }
    }
}

impl std::fmt::Display for TrustRule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Evaluate `rule` along the issuer's trust chain.
///
/// # Errors
///
/// [`VcError::Resolution`] if either pass fails to resolve the issuer.
pub fn trace(
    rule: TrustRule,
    credential: &VerifiableCredential,
    resolver: &dyn DidResolver,
) -> Result<bool, VcError> {
    let issuer = credential.issuer();

    let document = resolve_document(issuer, resolver)?;
    tracing::trace!(rule = %rule, issuer = %issuer, pass = 1, "trust chain pass");
    if let Some(result) = rule.short_circuit(document.as_ref()) {
        return Ok(result);
    }

    if !credential.is_self_proclaimed() {
        // The second pass re-resolves the issuer itself, not a controller.
        let document = resolve_document(issuer, resolver)?;
        tracing::trace!(rule = %rule, issuer = %issuer, pass = 2, "trust chain pass");
        if let Some(result) = rule.short_circuit(document.as_ref()) {
            return Ok(result);
        }
    }

    Ok(rule.passed())
}

/// Resolve `did`, treating "no document" as a resolution failure.
pub(crate) fn resolve_document(
    did: &Did,
    resolver: &dyn DidResolver,
) -> Result<Arc<dyn DidDocument>, VcError> {
    match resolver.resolve(did) {
        Ok(Some(document)) => Ok(document),
        Ok(None) => Err(VcError::Resolution {
            did: did.to_string(),
            reason: "no document".into(),
        }),
        Err(e) => Err(VcError::Resolution {
            did: did.to_string(),
            reason: e.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::{InMemoryResolver, StaticDocument};
    use crate::error::ResolveError;
    use credtrust_core::Timestamp;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct Counting<R> {
        inner: R,
        calls: AtomicUsize,
    }

    impl<R: DidResolver> DidResolver for Counting<R> {
        fn resolve(&self, did: &Did) -> Result<Option<Arc<dyn DidDocument>>, ResolveError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.inner.resolve(did)
        }
    }

    struct Offline;

    impl DidResolver for Offline {
        fn resolve(&self, _: &Did) -> Result<Option<Arc<dyn DidDocument>>, ResolveError> {
            Err(ResolveError("network unreachable".into()))
        }
    }

    fn did(s: &str) -> Did {
        Did::new(s).unwrap()
    }

    fn credential(issuer: &str) -> VerifiableCredential {
        VerifiableCredential::from_json_value(&serde_json::json!({
            "id": "did:example:alice#cred",
            "type": ["TestCredential"],
            "issuer": issuer,
            "issuanceDate": "2024-01-01T00:00:00Z",
            "credentialSubject": {"id": "did:example:alice"},
            "proof": {"verificationMethod": "#primary", "signature": "00"}
        }))
        .unwrap()
    }

    fn counting(doc: StaticDocument) -> Counting<InMemoryResolver> {
        let inner = InMemoryResolver::new();
        inner.insert(doc);
        Counting {
            inner,
            calls: AtomicUsize::new(0),
        }
    }

    fn past() -> Timestamp {
        Timestamp::parse("2000-01-01T00:00:00Z").unwrap()
    }

    #[test]
    fn self_proclaimed_resolves_once() {
        let resolver = counting(StaticDocument::new(did("did:example:alice")));
        let vc = credential("did:example:alice");
        assert!(trace(TrustRule::Valid, &vc, &resolver).unwrap());
        assert_eq!(resolver.calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn third_party_resolves_same_issuer_twice() {
        let resolver = counting(StaticDocument::new(did("did:example:uni")));
        let vc = credential("did:example:uni");
        assert!(trace(TrustRule::Genuine, &vc, &resolver).unwrap());
        assert_eq!(resolver.calls.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn short_circuit_skips_second_pass() {
        let resolver = counting(StaticDocument::new(did("did:example:uni")).genuine(false));
        let vc = credential("did:example:uni");
        assert!(!trace(TrustRule::Genuine, &vc, &resolver).unwrap());
        assert_eq!(resolver.calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn expire_rule() {
        let vc = credential("did:example:uni");
        let live = counting(StaticDocument::new(did("did:example:uni")));
        assert!(!trace(TrustRule::Expire, &vc, &live).unwrap());

        let expired = counting(StaticDocument::new(did("did:example:uni")).with_expiry(past()));
        assert!(trace(TrustRule::Expire, &vc, &expired).unwrap());
    }

    #[test]
    fn valid_rule_fails_on_deactivated_issuer() {
        let resolver = counting(StaticDocument::new(did("did:example:uni")).deactivated(true));
        assert!(!trace(TrustRule::Valid, &credential("did:example:uni"), &resolver).unwrap());
    }

    #[test]
    fn unresolved_issuer_is_error() {
        let vc = credential("did:example:uni");
        let empty = InMemoryResolver::new();
        assert!(matches!(
            trace(TrustRule::Valid, &vc, &empty),
            Err(VcError::Resolution { ref reason, .. }) if reason == "no document"
        ));
        assert!(matches!(
            trace(TrustRule::Expire, &vc, &Offline),
            Err(VcError::Resolution { ref reason, .. }) if reason == "network unreachable"
        ));
    }

    #[test]
    fn rule_names() {
        assert_eq!(TrustRule::Expire.to_string(), "expire");
        assert_eq!(TrustRule::Valid.as_str(), "valid");
    }
}
