use std::time::Duration;

use async_trait::async_trait;
use serde_json::{Map, Value};
use tracing::debug;
use url::Url;

use super::{CredentialStore, StoreError};
use crate::config::StoreConfig;

/// PostgREST client for the hosted key table
///
/// Issues `GET {url}/rest/v1/{table}?select={column}` with the anon key in
/// both the `apikey` and `Authorization` headers. No filter, no ordering.
#[derive(Debug, Clone)]
pub struct SupabaseStore {
    client: reqwest::Client,
    endpoint: Url,
    anon_key: String,
    column: String,
}

impl SupabaseStore {
    pub fn new(config: &StoreConfig) -> Result<Self, StoreError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            client,
            endpoint: Self::table_endpoint(&config.url, &config.table)?,
            anon_key: config.anon_key.clone(),
            column: config.column.clone(),
        })
    }

    fn table_endpoint(base: &str, table: &str) -> Result<Url, StoreError> {
        if table.is_empty() || !table.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
            return Err(StoreError::InvalidUrl(format!("bad table name '{}'", table)));
        }

        let mut url = Url::parse(base).map_err(|e| StoreError::InvalidUrl(e.to_string()))?;
        if url.cannot_be_a_base() {
            return Err(StoreError::InvalidUrl(base.to_string()));
        }
        // Keep any path prefix the base URL already carries
        let prefix = url.path().trim_end_matches('/').to_string();
        url.set_path(&format!("{}/rest/v1/{}", prefix, table));
        url.set_query(None);
        Ok(url)
    }

    /// Pull the key column out of each row; rows without a string key stay as `None`
    fn keys_from_rows(&self, rows: Vec<Map<String, Value>>) -> Vec<Option<String>> {
        rows.into_iter()
            .enumerate()
            .map(|(index, mut row)| match row.remove(&self.column) {
                Some(Value::String(key)) => Some(key),
                other => {
                    debug!(row = index, column = %self.column, value = ?other, "Key row without a string key");
                    None
                }
            })
            .collect()
    }
}

#[async_trait]
impl CredentialStore for SupabaseStore {
    async fn fetch_key_rows(&self) -> Result<Vec<Option<String>>, StoreError> {
        let response = self
            .client
            .get(self.endpoint.clone())
            .query(&[("select", self.column.as_str())])
            .header("apikey", &self.anon_key)
            .bearer_auth(&self.anon_key)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(StoreError::Status { status: status.as_u16(), body });
        }

        let rows: Vec<Map<String, Value>> = response.json().await?;
        Ok(self.keys_from_rows(rows))
    }
}
