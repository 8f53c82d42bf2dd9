//! Errors from credential parsing, encoding and trust evaluation.

use thiserror::Error;

use credtrust_core::{CryptoError, ValidationError};

/// Errors from the credential engine.
///
/// Parsing errors always reach the caller. The trust predicates
/// (`is_expired`, `is_genuine`, `is_valid`) never return these; the
/// `check_*` variants do.
#[derive(Error, Debug)]
pub enum VcError {
    /// A required field is missing or has the wrong shape. The message names
    /// the field, e.g. `missing credential subject`.
    #[error("malformed credential: {0}")]
    Malformed(String),

    /// Raw input that is empty or not JSON, or a credential that cannot be
    /// canonically encoded.
    #[error("illegal argument: {0}")]
    IllegalArgument(String),

    /// The DID could not be resolved, or resolved to no document.
    #[error("cannot resolve {did}: {reason}")]
    Resolution {
        /// The DID that was being resolved.
        did: String,
        /// Why resolution failed.
        reason: String,
    },

    /// The proof uses a signature scheme other than the supported one.
    #[error("unsupported proof scheme: {0}")]
    UnsupportedScheme(String),

    /// The identity document could not run signature verification.
    #[error("verification error: {0}")]
    Verification(#[from] DocumentError),

    /// A metadata store rejected a write.
    #[error("metadata store error: {0}")]
    MetadataStore(String),
}

impl VcError {
    pub(crate) fn malformed(hint: impl Into<String>) -> Self {
        Self::Malformed(hint.into())
    }

    pub(crate) fn invalid_field(field: &str, err: ValidationError) -> Self {
        Self::Malformed(format!("invalid {field}: {err}"))
    }
}

/// Errors an identity document reports from signature verification.
///
/// A signature that is well-formed but does not match is not an error; it
/// is `Ok(false)` from [`DidDocument::verify`](crate::DidDocument::verify).
#[derive(Error, Debug)]
pub enum DocumentError {
    /// The document has no key with this id.
    #[error("unknown key: {0}")]
    UnknownKey(String),

    /// The key or signature material could not be decoded.
    #[error(transparent)]
    Crypto(#[from] CryptoError),
}

/// Error returned by a [`DidResolver`](crate::DidResolver) backend.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{0}")]
pub struct ResolveError(pub String);
