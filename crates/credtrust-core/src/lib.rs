//! # credtrust-core: Foundational Types
//!
//! The leaf of the credtrust crate graph. Every other crate depends on it;
//! it depends on nothing internal.
//!
//! ## Key Design Principles
//!
//! 1. **Validated identifiers.** [`Did`] and [`DidUrl`] are newtypes with
//!    validating constructors. A `DidUrl` knows how to render itself relative
//!    to a reference DID and how to resolve a relative `#fragment` form.
//!
//! 2. **`CanonicalBytes` newtype.** All bytes that are signed or hashed come
//!    out of [`CanonicalWriter::finish()`] or [`CanonicalBytes::new()`]. Field
//!    order in the writer is the caller's contract; nested objects are always
//!    emitted with keys in ascending, case-insensitive order.
//!
//! 3. **UTC-only timestamps.** [`Timestamp`] renders as
//!    `YYYY-MM-DDTHH:MM:SSZ` and nothing else.
//!
//! ## Crate Policy
//!
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.

pub mod canonical;
pub mod error;
pub mod identity;
pub mod temporal;

pub use canonical::{compare_case_insensitive, sort_case_insensitive, CanonicalBytes, CanonicalWriter};
pub use error::{CanonicalizationError, CryptoError, ValidationError};
pub use identity::{Did, DidUrl};
pub use temporal::Timestamp;
