//! # credtrust-vc: Verifiable Credential Trust Engine
//!
//! Parses W3C-style verifiable credentials, encodes them canonically, and
//! decides whether to trust them.
//!
//! ## Trust Predicates
//!
//! - [`VerifiableCredential::is_expired`]: the issuer's document has expired,
//!   or the credential's own expiration date has passed.
//! - [`VerifiableCredential::is_genuine`]: the issuer's document is genuine
//!   and the proof verifies under one of its authentication keys.
//! - [`VerifiableCredential::is_valid`]: the issuer's document is valid, the
//!   credential has not expired, and the proof verifies.
//!
//! Documents come from a caller-supplied [`DidResolver`].
//!
//! ## Signing Input
//!
//! A proof signs [`VerifiableCredential::signing_input`]: the normalized
//! canonical encoding without the `proof` block. See [`encode`] for the
//! field order.
//!
//! ## Feature `async`
//!
//! Enables [`asynchronous`], which runs the predicates on tokio's blocking
//! pool. Unit tests always build the module against the tokio
//! dev-dependency, so a plain `cargo test` covers it.

pub mod credential;
pub mod document;
pub mod encode;
pub mod error;
pub mod genuine;
pub mod metadata;
pub mod parse;
pub mod proof;
pub mod subject;
pub mod trust;
pub mod validity;

#[cfg(any(feature = "async", test))]
pub mod asynchronous;

pub use credential::{CredentialDraft, VerifiableCredential};
pub use document::{DidDocument, DidResolver, InMemoryResolver, StaticDocument};
pub use error::{DocumentError, ResolveError, VcError};
pub use genuine::{require_supported_scheme, verify_proof};
pub use metadata::{CredentialMetadata, MetadataSnapshot, MetadataStore};
pub use proof::{Proof, ProofType};
pub use subject::CredentialSubject;
pub use trust::{trace, TrustRule};
