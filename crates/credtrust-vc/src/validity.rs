//! # Trust Predicates
//!
//! Each predicate comes in two forms. `is_*` answers a plain `bool` and
//! treats any failure to establish the property (unresolvable issuer,
//! undecodable signature) as `false`. `check_*` reports those failures as
//! [`VcError`] so callers can tell "proven false" from "could not prove".
//!
//! Gate order for validity: issuer trust chain, then the credential's own
//! expiration date, then the proof.

use crate::credential::VerifiableCredential;
use crate::document::DidResolver;
use crate::error::VcError;
use crate::genuine::verify_proof;
use crate::trust::{trace, TrustRule};

impl VerifiableCredential {
    /// Whether the issuer's document or the credential's own date says the
    /// credential has expired.
    ///
    /// An issuer that cannot be resolved is not evidence of expiry; the
    /// date is still checked.
    pub fn is_expired(&self, resolver: &dyn DidResolver) -> bool {
        let traced = trace(TrustRule::Expire, self, resolver).unwrap_or_else(|e| {
            tracing::debug!(credential = %self.id(), error = %e, "expiry trace inconclusive");
            false
        });
        traced || self.is_expired_by_date()
    }

    /// Whether the issuer is trusted and the proof verifies.
    pub fn is_genuine(&self, resolver: &dyn DidResolver) -> bool {
        self.check_genuine(resolver).unwrap_or_else(|e| {
            tracing::debug!(credential = %self.id(), error = %e, "genuineness check failed");
            false
        })
    }

    /// Whether the issuer is valid, the credential has not expired, and the
    /// proof verifies.
    pub fn is_valid(&self, resolver: &dyn DidResolver) -> bool {
        self.check_valid(resolver).unwrap_or_else(|e| {
            tracing::debug!(credential = %self.id(), error = %e, "validity check failed");
            false
        })
    }

    /// [`is_expired`](Self::is_expired) with resolution errors surfaced.
    pub fn check_expired(&self, resolver: &dyn DidResolver) -> Result<bool, VcError> {
        Ok(trace(TrustRule::Expire, self, resolver)? || self.is_expired_by_date())
    }

    /// [`is_genuine`](Self::is_genuine) with errors surfaced.
    pub fn check_genuine(&self, resolver: &dyn DidResolver) -> Result<bool, VcError> {
        if !trace(TrustRule::Genuine, self, resolver)? {
            return Ok(false);
        }
        verify_proof(self, resolver)
    }

    /// [`is_valid`](Self::is_valid) with errors surfaced.
    pub fn check_valid(&self, resolver: &dyn DidResolver) -> Result<bool, VcError> {
        if !trace(TrustRule::Valid, self, resolver)? {
            return Ok(false);
        }
        if self.is_expired_by_date() {
            return Ok(false);
        }
        verify_proof(self, resolver)
    }
}
