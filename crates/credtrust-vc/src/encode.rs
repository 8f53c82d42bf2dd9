//! # Canonical Credential Encoding
//!
//! Field order is fixed:
//!
//! 1. `id`
//! 2. `type` (sorted case-insensitively)
//! 3. `issuer` (omitted when compact and equal to the subject)
//! 4. `issuanceDate`
//! 5. `expirationDate` (when present)
//! 6. `credentialSubject`
//! 7. `proof` (omitted in signing mode)
//!
//! Signing input is the normalized form without `proof`. Identical
//! credentials produce byte-identical output regardless of the key order
//! they were parsed from.

use credtrust_core::{CanonicalBytes, CanonicalWriter, CanonicalizationError, Did};

use crate::credential::VerifiableCredential;
use crate::error::VcError;

impl VerifiableCredential {
    /// Encode the credential.
    ///
    /// `reference` only shortens the `id` and subject `id` when compact;
    /// `normalized` forces every DID URL and default value to be written in
    /// full; `for_sign` drops the proof.
    ///
    /// # Errors
    ///
    /// [`VcError::IllegalArgument`] when a claim cannot be serialized as
    /// JSON.
    pub fn encode(
        &self,
        reference: Option<&Did>,
        normalized: bool,
        for_sign: bool,
    ) -> Result<CanonicalBytes, VcError> {
        self.write_canonical(reference, normalized, for_sign)
            .map_err(|e| VcError::IllegalArgument(format!("cannot encode credential {}: {e}", self.id())))
    }

    /// The exact bytes a proof signs.
    pub fn signing_input(&self) -> Result<CanonicalBytes, VcError> {
        self.encode(None, true, true)
    }

    /// JSON text with the proof included.
    pub fn to_json_string(&self, normalized: bool) -> Result<String, VcError> {
        Ok(self.encode(None, normalized, false)?.into_string())
    }

    fn write_canonical(
        &self,
        reference: Option<&Did>,
        normalized: bool,
        for_sign: bool,
    ) -> Result<CanonicalBytes, CanonicalizationError> {
        let mut w = CanonicalWriter::new();
        w.string_field("id", self.id().render(reference, normalized))
            .string_array_field("type", self.sorted_types());

        if normalized || self.issuer() != self.subject().did() {
            w.string_field("issuer", self.issuer().as_str());
        }

        w.string_field("issuanceDate", self.issuance_date().to_iso8601());
        if let Some(expires) = self.expiration_date() {
            w.string_field("expirationDate", expires.to_iso8601());
        }

        w.object_field("credentialSubject", self.subject().write(reference, normalized)?);

        if !for_sign {
            w.object_field("proof", self.proof().write(self.issuer(), normalized));
        }
        w.finish()
    }
}
