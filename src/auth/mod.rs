// auth/mod.rs - API key authentication against the credential store
//
// One store round trip per protected request, no caching. Any store failure
// is logged and treated as "no reference key", so the gate fails closed.

use std::sync::Arc;

use sha2::{Digest, Sha256};
use tracing::{debug, error, warn};

use crate::config::KeyMatchPolicy;
use crate::store::CredentialStore;

/// Why a request was turned away
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthFailure {
    MissingKey,
    InvalidKey,
}

impl AuthFailure {
    /// Client-facing 401 message
    pub fn message(&self) -> &'static str {
        match self {
            AuthFailure::MissingKey => "Unauthorized. API key is missing.",
            AuthFailure::InvalidKey => "Unauthorized. Invalid API key.",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthOutcome {
    Authorized,
    Unauthorized(AuthFailure),
}

pub struct Authenticator {
    store: Arc<dyn CredentialStore>,
    policy: KeyMatchPolicy,
}

impl Authenticator {
    pub fn new(store: Arc<dyn CredentialStore>, policy: KeyMatchPolicy) -> Self {
        Self { store, policy }
    }

    pub fn store(&self) -> &Arc<dyn CredentialStore> {
        &self.store
    }

    pub async fn authenticate(&self, presented: Option<&str>) -> AuthOutcome {
        let presented = match presented {
            Some(key) if !key.is_empty() => key,
            _ => return AuthOutcome::Unauthorized(AuthFailure::MissingKey),
        };

        let stored = self.reference_keys().await;
        if self.matches(presented, &stored) {
            debug!(key = %fingerprint(presented), "API key accepted");
            AuthOutcome::Authorized
        } else {
            warn!(key = %fingerprint(presented), stored = stored.len(), "API key rejected");
            AuthOutcome::Unauthorized(AuthFailure::InvalidKey)
        }
    }

    /// Stored key rows, or none when the store cannot be read
    async fn reference_keys(&self) -> Vec<Option<String>> {
        match self.store.fetch_key_rows().await {
            Ok(rows) if rows.iter().all(Option::is_none) => {
                warn!(rows = rows.len(), "No API key found in the key store");
                rows
            }
            Ok(rows) => rows,
            Err(e) => {
                error!("Error fetching API keys from the key store: {}", e);
                Vec::new()
            }
        }
    }

    fn matches(&self, presented: &str, stored: &[Option<String>]) -> bool {
        let same = |key: &str| key.as_bytes() == presented.as_bytes();
        match self.policy {
            KeyMatchPolicy::AnyStored => stored.iter().flatten().any(|key| same(key.as_str())),
            // Row 0 decides even when it carries no key
            KeyMatchPolicy::FirstRow => stored.first().and_then(Option::as_deref).is_some_and(same),
        }
    }
}

/// Short stable identifier for a key, safe to log
pub fn fingerprint(key: &str) -> String {
    let digest = Sha256::digest(key.as_bytes());
    format!("{:x}", digest)[..12].to_string()
}
