use reqwest::Client;
use serde_json::{json, Value};
use std::time::Duration;
use tracing::warn;

use crate::error::{AztecMonError, Result};
use crate::models::SyncStatus;

const RPC_TIMEOUT: Duration = Duration::from_secs(5);

/// Compares the local node's proven chain tip against a remote
/// reference RPC. Both requests are dispatched before either is
/// awaited; each side degrades to `None` on its own failures.
pub struct SyncChecker {
    client: Client,
    remote_rpc: String,
}

impl SyncChecker {
    pub fn new(remote_rpc: String) -> Self {
        Self {
            client: Client::builder()
                .timeout(RPC_TIMEOUT)
                .build()
                .expect("failed to build HTTP client"),
            remote_rpc,
        }
    }

    pub async fn sync_status(&self, local_port: u16) -> SyncStatus {
        self.compare(&format!("http://localhost:{}", local_port))
            .await
    }

    /// Concurrent fetch of both tips; waits for both sides, never races
    /// them.
    pub async fn compare(&self, local_url: &str) -> SyncStatus {
        let (local, remote) = tokio::join!(
            self.proven_block(local_url),
            self.proven_block(&self.remote_rpc),
        );
        SyncStatus::new(local, remote)
    }

    async fn proven_block(&self, url: &str) -> Option<u64> {
        match self.fetch_proven_block(url).await {
            Ok(number) => Some(number),
            Err(e) => {
                warn!("failed to fetch proven tip from {}: {}", url, e);
                None
            }
        }
    }

    /// `node_getL2Tips` → `result.proven.number`. The node returns the
    /// height as a JSON number; a decimal string is accepted too.
    async fn fetch_proven_block(&self, url: &str) -> Result<u64> {
        let payload = json!({
            "jsonrpc": "2.0",
            "id": 1,
            "method": "node_getL2Tips",
            "params": [],
        });

        let response = self.client.post(url).json(&payload).send().await?;
        if !response.status().is_success() {
            return Err(AztecMonError::RpcCallFailed(format!(
                "HTTP {} from {}",
                response.status(),
                url
            )));
        }

        let body: Value = response.json().await?;
        body.pointer("/result/proven/number")
            .and_then(|v| {
                v.as_u64()
                    .or_else(|| v.as_str().and_then(|s| s.parse().ok()))
            })
            .ok_or_else(|| {
                AztecMonError::RpcCallFailed(format!("unexpected response format from {}", url))
            })
    }
}
