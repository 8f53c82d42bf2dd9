//! # credtrust-cli: Credential Trust Command-Line Interface
//!
//! ## Subcommands
//!
//! - `credtrust canonical`: render a credential's canonical form.
//! - `credtrust digest`: SHA-256 of a credential's signing input.
//! - `credtrust check`: evaluate expiry, genuineness and validity against a
//!   local registry of identity documents.
//!
//! Argument parsing lives in `main.rs`; handlers here delegate to
//! `credtrust-vc`.

pub mod check;
pub mod registry;
pub mod render;
