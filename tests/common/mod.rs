#![allow(dead_code)]

use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use keygate_api::store::MemoryStore;
use keygate_api::{AppConfig, AppState};
use reqwest::StatusCode;

pub const VALID_KEY: &str = "test-key-123";

pub struct TestServer {
    pub port: u16,
    pub base_url: String,
    pub store: Arc<MemoryStore>,
}

impl TestServer {
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn wait_ready(&self, timeout: Duration) -> Result<()> {
        let client = reqwest::Client::new();
        let deadline = Instant::now() + timeout;
        loop {
            if Instant::now() > deadline {
                break;
            }
            // The home route never touches the store, so readiness checks don't skew fetch counts
            if let Ok(resp) = client.get(self.url("/")).send().await {
                if resp.status() == StatusCode::OK {
                    return Ok(());
                }
            }
            tokio::time::sleep(Duration::from_millis(50)).await;
        }
        anyhow::bail!("server did not become ready on {} within {:?}", self.base_url, timeout)
    }
}

fn test_config() -> AppConfig {
    let mut config = AppConfig::production("http://store.invalid".to_string(), "anon".to_string());
    config.api.enable_request_logging = false;
    config
}

/// Start the app on a free port, backed by an in-memory key store
pub async fn spawn_with_store(store: MemoryStore) -> Result<TestServer> {
    let port = portpicker::pick_unused_port().context("failed to pick free port")?;
    let base_url = format!("http://127.0.0.1:{}", port);

    let store = Arc::new(store);
    let state = AppState::new(test_config(), store.clone());
    let listener = tokio::net::TcpListener::bind(("127.0.0.1", port))
        .await
        .context("failed to bind test listener")?;
    tokio::spawn(async move {
        let _ = axum::serve(listener, keygate_api::app(state)).await;
    });

    let server = TestServer { port, base_url, store };
    server.wait_ready(Duration::from_secs(5)).await?;
    Ok(server)
}

pub async fn spawn() -> Result<TestServer> {
    spawn_with_store(MemoryStore::with_keys([VALID_KEY])).await
}
