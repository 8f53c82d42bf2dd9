//! # Local Document Registry
//!
//! The `check` subcommand resolves issuers from a registry file instead of a
//! network. YAML and JSON are both accepted; the format follows the file
//! extension (`.json` is JSON, anything else YAML).
//!
//! ```yaml
//! documents:
//!   - id: did:example:123
//!     expires: "2030-01-01T00:00:00Z"   # optional
//!     deactivated: false                # optional
//!     genuine: true                     # optional, default true
//!     authentication:
//!       - id: "#primary"                # relative to the document id
//!         publicKeyHex: "<64 hex chars>"
//! ```

use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

use credtrust_core::{Did, DidUrl, Timestamp};
use credtrust_crypto::Ed25519PublicKey;
use credtrust_vc::{InMemoryResolver, StaticDocument};

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RegistryFile {
    #[serde(default)]
    pub documents: Vec<DocumentEntry>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct DocumentEntry {
    pub id: Did,
    #[serde(default)]
    pub expires: Option<Timestamp>,
    #[serde(default)]
    pub deactivated: bool,
    #[serde(default = "default_genuine")]
    pub genuine: bool,
    #[serde(default)]
    pub authentication: Vec<KeyEntry>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct KeyEntry {
    pub id: String,
    pub public_key_hex: Ed25519PublicKey,
}

fn default_genuine() -> bool {
    true
}

impl DocumentEntry {
    fn into_document(self) -> Result<StaticDocument> {
        let mut doc = StaticDocument::new(self.id.clone())
            .deactivated(self.deactivated)
            .genuine(self.genuine);
        if let Some(expires) = self.expires {
            doc = doc.with_expiry(expires);
        }
        for key in self.authentication {
            let key_id = DidUrl::parse_with_reference(&key.id, Some(&self.id))
                .with_context(|| format!("invalid key id {:?} in document {}", key.id, self.id))?;
            doc = doc.with_authentication_key(key_id, key.public_key_hex)?;
        }
        Ok(doc)
    }
}

/// Parse registry text. `json` selects the JSON parser over YAML.
pub fn parse_registry(text: &str, json: bool) -> Result<InMemoryResolver> {
    let file: RegistryFile = if json {
        serde_json::from_str(text).context("invalid JSON registry")?
    } else {
        serde_yaml::from_str(text).context("invalid YAML registry")?
    };

    let resolver = InMemoryResolver::new();
    for entry in file.documents {
        let id = entry.id.clone();
        let doc = entry
            .into_document()
            .with_context(|| format!("invalid registry document {id}"))?;
        resolver.insert(doc);
    }
    Ok(resolver)
}

/// Load a registry file from disk.
pub fn load_registry(path: &Path) -> Result<InMemoryResolver> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read registry: {}", path.display()))?;
    let json = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
    let resolver = parse_registry(&text, json)
        .with_context(|| format!("failed to load registry: {}", path.display()))?;
    tracing::debug!(path = %path.display(), documents = resolver.len(), "registry loaded");
    Ok(resolver)
}
