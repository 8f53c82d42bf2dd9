//! # Credential Metadata
//!
//! Local, unsigned bookkeeping attached to a credential (currently just an
//! alias). Metadata is never part of the canonical encoding.
//!
//! A credential creates its metadata lazily on first access. Persisting it
//! requires an attached [`MetadataStore`]; without one,
//! [`VerifiableCredential::save_metadata`](crate::VerifiableCredential::save_metadata)
//! is a no-op.

use std::sync::Arc;

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};

use credtrust_core::{Did, DidUrl};

use crate::error::VcError;

/// Persistence backend for credential metadata.
pub trait MetadataStore: Send + Sync {
    /// Store the metadata of credential `id`, held by `subject`.
    fn store_credential_metadata(
        &self,
        subject: &Did,
        id: &DidUrl,
        metadata: &MetadataSnapshot,
    ) -> Result<(), VcError>;
}

/// Point-in-time copy of a credential's metadata, as handed to a store.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetadataSnapshot {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alias: Option<String>,
}

/// Metadata bound to one credential id.
pub struct CredentialMetadata {
    credential_id: DidUrl,
    state: RwLock<MetadataState>,
}

#[derive(Default)]
struct MetadataState {
    alias: Option<String>,
    store: Option<Arc<dyn MetadataStore>>,
}

impl CredentialMetadata {
    /// Empty, detached metadata for credential `credential_id`.
    pub fn new(credential_id: DidUrl) -> Self {
        Self {
            credential_id,
            state: RwLock::new(MetadataState::default()),
        }
    }

    /// The credential this metadata belongs to.
    pub fn credential_id(&self) -> &DidUrl {
        &self.credential_id
    }

    pub fn alias(&self) -> Option<String> {
        self.state.read().alias.clone()
    }

    pub fn set_alias(&self, alias: Option<String>) {
        self.state.write().alias = alias;
    }

    /// Attach a persistence backend. Replaces any previous one.
    pub fn attach_store(&self, store: Arc<dyn MetadataStore>) {
        self.state.write().store = Some(store);
    }

    pub fn detach_store(&self) {
        self.state.write().store = None;
    }

    pub fn is_attached(&self) -> bool {
        self.state.read().store.is_some()
    }

    /// Copy out the current values.
    pub fn snapshot(&self) -> MetadataSnapshot {
        MetadataSnapshot {
            alias: self.state.read().alias.clone(),
        }
    }

    /// Overwrite the current values from a snapshot.
    pub fn restore(&self, snapshot: MetadataSnapshot) {
        self.state.write().alias = snapshot.alias;
    }

    /// Write to the attached store, if any. Returns whether a write happened.
    pub(crate) fn save(&self, subject: &Did) -> Result<bool, VcError> {
        let (store, snapshot) = {
            let state = self.state.read();
            match &state.store {
                Some(store) => (
                    Arc::clone(store),
                    MetadataSnapshot {
                        alias: state.alias.clone(),
                    },
                ),
                None => return Ok(false),
            }
        };
        store.store_credential_metadata(subject, &self.credential_id, &snapshot)?;
        tracing::debug!(credential = %self.credential_id, "credential metadata saved");
        Ok(true)
    }
}

impl std::fmt::Debug for CredentialMetadata {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.state.read();
        f.debug_struct("CredentialMetadata")
            .field("credential_id", &self.credential_id)
            .field("alias", &state.alias)
            .field("attached", &state.store.is_some())
            .finish()
    }
}
