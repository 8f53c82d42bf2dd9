//! # Canonical and Digest Subcommands
//!
//! ```bash
//! credtrust canonical credential.json --normalized
//! credtrust canonical credential.json --for-sign
//! credtrust canonical credential.json --reference did:example:123
//! credtrust digest credential.json
//! ```

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Args;

use credtrust_core::Did;
use credtrust_crypto::sha256_digest;
use credtrust_vc::VerifiableCredential;

/// Arguments for `credtrust canonical`.
#[derive(Args, Debug)]
pub struct CanonicalArgs {
    /// Credential JSON file.
    pub file: PathBuf,

    /// Write every DID URL and default value in full.
    #[arg(long)]
    pub normalized: bool,

    /// Omit the proof (the signing input when combined with --normalized).
    #[arg(long)]
    pub for_sign: bool,

    /// Reference DID for parsing relative ids and shortening output.
    #[arg(long)]
    pub reference: Option<Did>,
}

/// Arguments for `credtrust digest`.
#[derive(Args, Debug)]
pub struct DigestArgs {
    /// Credential JSON file.
    pub file: PathBuf,

    /// Reference DID for parsing relative ids.
    #[arg(long)]
    pub reference: Option<Did>,
}

/// Read and parse a credential file.
pub fn load_credential(path: &Path, reference: Option<&Did>) -> Result<VerifiableCredential> {
    let bytes = std::fs::read(path)
        .with_context(|| format!("failed to read credential: {}", path.display()))?;
    let credential = match reference {
        None => VerifiableCredential::from_json_bytes(&bytes),
        Some(reference) => {
            let value: serde_json::Value = serde_json::from_slice(&bytes)
                .with_context(|| format!("invalid JSON: {}", path.display()))?;
            VerifiableCredential::parse_with_reference(&value, Some(reference))
        }
    };
    credential.with_context(|| format!("invalid credential: {}", path.display()))
}

/// Render the requested canonical form.
pub fn render_canonical(args: &CanonicalArgs) -> Result<String> {
    let credential = load_credential(&args.file, args.reference.as_ref())?;
    let bytes = credential.encode(args.reference.as_ref(), args.normalized, args.for_sign)?;
    Ok(bytes.into_string())
}

/// SHA-256 of the credential's signing input, as `sha256:<hex>`.
pub fn signing_digest(args: &DigestArgs) -> Result<String> {
    let credential = load_credential(&args.file, args.reference.as_ref())?;
    Ok(sha256_digest(&credential.signing_input()?).to_string())
}

/// Execute `credtrust canonical`.
pub fn run_canonical(args: &CanonicalArgs) -> Result<u8> {
    println!("{}", render_canonical(args)?);
    Ok(0)
}

/// Execute `credtrust digest`.
pub fn run_digest(args: &DigestArgs) -> Result<u8> {
    println!("{}", signing_digest(args)?);
    Ok(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    const CREDENTIAL: &str = r##"{
        "type": ["b", "A"],
        "id": "#profile",
        "issuanceDate": "2024-01-01T00:00:00Z",
        "credentialSubject": {"name": "Alice"},
        "proof": {"verificationMethod": "#primary", "signature": "ab"}
    }"##;

    fn write(dir: &tempfile::TempDir) -> PathBuf {
        let path = dir.path().join("vc.json");
        std::fs::write(&path, CREDENTIAL).unwrap();
        path
    }

    #[test]
    fn relative_credential_needs_reference() {
        let dir = tempfile::tempdir().unwrap();
        let args = CanonicalArgs {
            file: write(&dir),
            normalized: false,
            for_sign: false,
            reference: None,
        };
        assert!(render_canonical(&args).is_err());
    }

    #[test]
    fn reference_shortens_compact_output() {
        let dir = tempfile::tempdir().unwrap();
        let args = CanonicalArgs {
            file: write(&dir),
            normalized: false,
            for_sign: false,
            reference: Some(Did::new("did:example:123").unwrap()),
        };
        assert_eq!(
            render_canonical(&args).unwrap(),
            r##"{"id":"#profile","type":["A","b"],"issuanceDate":"2024-01-01T00:00:00Z","credentialSubject":{"name":"Alice"},"proof":{"verificationMethod":"#primary","signature":"ab"}}"##
        );
    }

    #[test]
    fn for_sign_normalized_is_signing_input() {
        let dir = tempfile::tempdir().unwrap();
        let args = CanonicalArgs {
            file: write(&dir),
            normalized: true,
            for_sign: true,
            reference: Some(Did::new("did:example:123").unwrap()),
        };
        assert_eq!(
            render_canonical(&args).unwrap(),
            r#"{"id":"did:example:123#profile","type":["A","b"],"issuer":"did:example:123","issuanceDate":"2024-01-01T00:00:00Z","credentialSubject":{"id":"did:example:123","name":"Alice"}}"#
        );
    }

    #[test]
    fn digest_has_prefix() {
        let dir = tempfile::tempdir().unwrap();
        let args = DigestArgs {
            file: write(&dir),
            reference: Some(Did::new("did:example:123").unwrap()),
        };
        let digest = signing_digest(&args).unwrap();
        assert!(digest.starts_with("sha256:"));
        assert_eq!(digest.len(), "sha256:".len() + 64);
    }

    #[test]
    fn missing_file_is_reported() {
        let args = DigestArgs {
            file: PathBuf::from("/nonexistent/vc.json"),
            reference: None,
        };
        let err = signing_digest(&args).unwrap_err();
        assert!(format!("{err:#}").contains("failed to read credential"));
    }
}
