//! Async wrappers for the trust predicates.
//!
//! Resolution may block on I/O, so the predicates run on tokio's blocking
//! pool. A panicked or cancelled task answers `false`.

use std::sync::Arc;

use crate::credential::VerifiableCredential;
use crate::document::DidResolver;

pub async fn is_expired_async(
    credential: Arc<VerifiableCredential>,
    resolver: Arc<dyn DidResolver>,
) -> bool {
    run_blocking(credential, resolver, "is_expired", |c, r| c.is_expired(r)).await
}

pub async fn is_genuine_async(
    credential: Arc<VerifiableCredential>,
    resolver: Arc<dyn DidResolver>,
) -> bool {
    run_blocking(credential, resolver, "is_genuine", |c, r| c.is_genuine(r)).await
}

pub async fn is_valid_async(
    credential: Arc<VerifiableCredential>,
    resolver: Arc<dyn DidResolver>,
) -> bool {
    run_blocking(credential, resolver, "is_valid", |c, r| c.is_valid(r)).await
}

async fn run_blocking<F>(
    credential: Arc<VerifiableCredential>,
    resolver: Arc<dyn DidResolver>,
    predicate: &'static str,
    f: F,
) -> bool
where
    F: FnOnce(&VerifiableCredential, &dyn DidResolver) -> bool + Send + 'static,
{
    match tokio::task::spawn_blocking(move || f(&credential, resolver.as_ref())).await {
        Ok(result) => result,
        Err(e) => {
            tracing::warn!(predicate, error = %e, "blocking predicate task failed");
            false
        }
    }
}
