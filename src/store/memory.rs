use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;

use super::{CredentialStore, StoreError};

/// In-process key store with a fixed row list
///
/// Counts every fetch so callers can see whether the round trip happened.
#[derive(Debug, Default)]
pub struct MemoryStore {
    rows: Vec<Option<String>>,
    failure: Option<String>,
    fetches: AtomicUsize,
}

impl MemoryStore {
    pub fn with_keys<I, S>(keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::with_rows(keys.into_iter().map(|key| Some(key.into())))
    }

    /// Rows as the store would return them; `None` is a row without a usable key
    pub fn with_rows<I>(rows: I) -> Self
    where
        I: IntoIterator<Item = Option<String>>,
    {
        Self {
            rows: rows.into_iter().collect(),
            ..Self::default()
        }
    }

    /// A store whose every fetch fails with `StoreError::Unavailable`
    pub fn failing(reason: impl Into<String>) -> Self {
        Self {
            failure: Some(reason.into()),
            ..Self::default()
        }
    }

    pub fn fetch_count(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl CredentialStore for MemoryStore {
    async fn fetch_key_rows(&self) -> Result<Vec<Option<String>>, StoreError> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        match &self.failure {
            Some(reason) => Err(StoreError::Unavailable(reason.clone())),
            None => Ok(self.rows.clone()),
        }
    }
}
