//! # Error Hierarchy
//!
//! Structured error types shared across credtrust, built with `thiserror`.
//! No `Box<dyn Error>`, no `.unwrap()` outside tests.

use thiserror::Error;

/// Errors during canonical serialization.
#[derive(Error, Debug)]
pub enum CanonicalizationError {
    /// JSON serialization failed during canonicalization.
    #[error("serialization failed: {0}")]
    SerializationFailed(#[from] serde_json::Error),
}

/// Validation errors for identifiers and timestamps.
///
/// Each variant carries the rejected input so that a malformed credential
/// can be diagnosed without re-reading it.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// DID does not conform to `did:<method>:<identifier>`.
    #[error("invalid DID format: \"{0}\" (expected did:<method>:<identifier>)")]
    InvalidDid(String),

    /// DID URL is neither `did:<method>:<identifier>[#fragment]` nor a
    /// `#fragment` resolvable against a reference DID.
    #[error("invalid DID URL: \"{0}\"")]
    InvalidDidUrl(String),

    /// A relative DID URL was given but no reference DID is available.
    #[error("relative DID URL \"{0}\" requires a reference DID")]
    MissingReference(String),

    /// Timestamp is not RFC 3339 with a `Z` suffix.
    #[error("invalid timestamp: {0}")]
    InvalidTimestamp(String),
}

/// Errors in cryptographic operations.
#[derive(Error, Debug)]
pub enum CryptoError {
    /// Signature verification failed.
    #[error("signature verification failed: {0}")]
    VerificationFailed(String),

    /// Key parsing failed.
    #[error("key error: {0}")]
    KeyError(String),

    /// Signature decoding failed.
    #[error("invalid signature encoding: {0}")]
    InvalidSignature(String),
}
