//! # Check Subcommand
//!
//! Evaluates a credential against a local registry and prints the trust
//! predicates as JSON:
//!
//! ```bash
//! credtrust check credential.json --registry registry.yaml
//! {"id":"did:example:123#profile","selfProclaimed":true,"expired":false,"genuine":true,"valid":true}
//! ```
//!
//! With `--strict`, resolution and verification errors abort the command
//! instead of reading as `false`. The exit code is 0 when the credential is
//! valid and 2 otherwise.

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use serde::Serialize;

use credtrust_core::Did;
use credtrust_vc::{DidResolver, VerifiableCredential};

use crate::registry::load_registry;
use crate::render::load_credential;

/// Arguments for `credtrust check`.
#[derive(Args, Debug)]
pub struct CheckArgs {
    /// Credential JSON file.
    pub file: PathBuf,

    /// Registry of identity documents (YAML, or JSON with a .json extension).
    #[arg(long)]
    pub registry: PathBuf,

    /// Reference DID for parsing relative ids.
    #[arg(long)]
    pub reference: Option<Did>,

    /// Fail on resolution or verification errors.
    #[arg(long)]
    pub strict: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckReport {
    pub id: String,
    pub self_proclaimed: bool,
    pub expired: bool,
    pub genuine: bool,
    pub valid: bool,
}

/// Evaluate all predicates for one credential.
pub fn evaluate(credential: &VerifiableCredential, resolver: &dyn DidResolver, strict: bool) -> Result<CheckReport> {
    let (expired, genuine, valid) = if strict {
        (
            credential.check_expired(resolver)?,
            credential.check_genuine(resolver)?,
            credential.check_valid(resolver)?,
        )
    } else {
        (
            credential.is_expired(resolver),
            credential.is_genuine(resolver),
            credential.is_valid(resolver),
        )
    };
    Ok(CheckReport {
        id: credential.id().to_string(),
        self_proclaimed: credential.is_self_proclaimed(),
        expired,
        genuine,
        valid,
    })
}

/// Load the credential and registry named by `args` and evaluate.
pub fn check_credential(args: &CheckArgs) -> Result<CheckReport> {
    let resolver = load_registry(&args.registry)?;
    let credential = load_credential(&args.file, args.reference.as_ref())?;
    let report = evaluate(&credential, &resolver, args.strict)?;
    tracing::info!(
        credential = %report.id,
        expired = report.expired,
        genuine = report.genuine,
        valid = report.valid,
        "credential checked"
    );
    Ok(report)
}

/// Execute `credtrust check`.
pub fn run_check(args: &CheckArgs) -> Result<u8> {
    let report = check_credential(args)?;
    println!("{}", serde_json::to_string(&report)?);
    Ok(if report.valid { 0 } else { 2 })
}
