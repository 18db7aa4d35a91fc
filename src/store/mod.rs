// store/mod.rs - Reference credential sources
//
// The authenticator only needs "give me the stored keys"; the hosted
// Supabase table and the in-process store both sit behind this trait.

pub mod memory;
pub mod supabase;

use async_trait::async_trait;
use thiserror::Error;

pub use memory::MemoryStore;
pub use supabase::SupabaseStore;

/// Errors from a credential store round trip
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Invalid store URL: {0}")]
    InvalidUrl(String),

    #[error("Store request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Store returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Store unavailable: {0}")]
    Unavailable(String),
}

/// Read-only source of reference API keys
#[async_trait]
pub trait CredentialStore: Send + Sync {
    /// One entry per row, in the order the store returns them
    ///
    /// `None` marks a row whose key column is missing or not a string.
    async fn fetch_key_rows(&self) -> Result<Vec<Option<String>>, StoreError>;

    /// Connectivity check used by the health endpoint
    async fn ping(&self) -> Result<(), StoreError> {
        self.fetch_key_rows().await.map(|_| ())
    }
}
