//! Proof verification against the issuer's document.

use crate::credential::VerifiableCredential;
use crate::document::DidResolver;
use crate::error::VcError;
use crate::trust::resolve_document;

/// Check a credential's proof against its issuer's document.
///
/// In order: the proof key must be an authentication key of the issuer,
/// the scheme must be supported, and the signature must verify over the
/// signing input.
///
/// # Errors
///
/// - [`VcError::Resolution`] when the issuer has no document.
/// - [`VcError::IllegalArgument`] when the credential cannot be encoded.
/// - [`VcError::Verification`] when the document cannot run verification.
pub fn verify_proof(
    credential: &VerifiableCredential,
    resolver: &dyn DidResolver,
) -> Result<bool, VcError> {
    let document = resolve_document(credential.issuer(), resolver)?;
    let proof = credential.proof();

    if !document.contains_authentication_key(proof.verification_method()) {
        tracing::debug!(
            credential = %credential.id(),
            key = %proof.verification_method(),
            "proof key is not an issuer authentication key"
        );
        return Ok(false);
    }

    if !proof.proof_type().is_supported() {
        tracing::warn!(
            credential = %credential.id(),
            scheme = %proof.proof_type(),
            "unsupported proof scheme"
        );
        return Ok(false);
    }

    let data = credential.signing_input()?;
    let verified = document.verify(proof.verification_method(), proof.signature(), &data)?;
    if !verified {
        tracing::debug!(credential = %credential.id(), "signature mismatch");
    }
    Ok(verified)
}

/// Like [`verify_proof`], but an unsupported scheme is an error instead of
/// `false`.
pub fn require_supported_scheme(credential: &VerifiableCredential) -> Result<(), VcError> {
    let scheme = credential.proof().proof_type();
    if scheme.is_supported() {
        Ok(())
    } else {
        Err(VcError::UnsupportedScheme(scheme.to_string()))
    }
}
