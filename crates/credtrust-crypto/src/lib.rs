//! # credtrust-crypto: Cryptographic Primitives
//!
//! - **Ed25519** public keys, signatures and key pairs. Signing and
//!   verification accept only [`CanonicalBytes`](credtrust_core::CanonicalBytes).
//! - **SHA-256** content digests of canonical bytes.
//!
//! ## Crate Policy
//!
//! - Depends only on `credtrust-core` internally.
//! - No mocking of cryptographic operations in tests.

pub mod ed25519;
pub mod sha256;

pub use ed25519::{verify, verify_with_public_key, Ed25519KeyPair, Ed25519PublicKey, Ed25519Signature};
pub use sha256::{sha256_digest, ContentDigest};
