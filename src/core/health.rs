use reqwest::Client;
use serde_json::{json, Value};
use std::time::Duration;
use tracing::{debug, warn};

use crate::constants::BLOB_SAMPLE_SLOTS;
use crate::error::{AztecMonError, Result};
use crate::models::{BeaconStatus, BlobStats, ExecStatus, RpcHealthReport};

const EXEC_TIMEOUT: Duration = Duration::from_secs(10);
const BLOB_TIMEOUT: Duration = Duration::from_secs(5);

/// Aggregates execution-RPC, beacon, and blob-sidecar health into one
/// report. Every inner failure downgrades a health flag; the operation
/// itself never fails.
pub struct HealthChecker {
    client: Client,
}

impl HealthChecker {
    pub fn new() -> Self {
        Self {
            client: Client::builder()
                .timeout(EXEC_TIMEOUT)
                .build()
                .expect("failed to build HTTP client"),
        }
    }

    pub async fn check_rpc_health(
        &self,
        exec_rpc: &str,
        beacon_rpc: Option<&str>,
    ) -> RpcHealthReport {
        let exec = self.exec_status(exec_rpc).await;

        let beacon = match beacon_rpc {
            Some(base) => Some(self.beacon_status(base).await),
            None => None,
        };

        RpcHealthReport { exec, beacon }
    }

    async fn exec_status(&self, url: &str) -> ExecStatus {
        match self.fetch_block_number(url).await {
            Ok((code, Some(block_number))) => ExecStatus {
                healthy: true,
                block_number: Some(block_number),
                http_code: Some(code),
            },
            Ok((code, None)) => ExecStatus {
                healthy: false,
                block_number: None,
                http_code: Some(code),
            },
            Err(e) => {
                warn!("execution RPC unreachable: {}", e);
                ExecStatus::default()
            }
        }
    }

    /// `eth_blockNumber` over JSON-RPC; healthy iff HTTP 200 with a
    /// `result` hex string.
    async fn fetch_block_number(&self, url: &str) -> Result<(u16, Option<u64>)> {
        let payload = json!({
            "jsonrpc": "2.0",
            "method": "eth_blockNumber",
            "params": [],
            "id": 1,
        });

        let response = self.client.post(url).json(&payload).send().await?;
        let code = response.status().as_u16();
        if !response.status().is_success() {
            return Ok((code, None));
        }

        let body: Value = response.json().await?;
        let block_number = body
            .get("result")
            .and_then(Value::as_str)
            .and_then(parse_hex_u64);
        Ok((code, block_number))
    }

    async fn beacon_status(&self, base: &str) -> BeaconStatus {
        let mut status = BeaconStatus::default();

        let version = match self.fetch_beacon_version(base).await {
            Ok((code, version)) => {
                status.http_code = Some(code);
                version
            }
            Err(e) => {
                warn!("beacon RPC unreachable: {}", e);
                return status;
            }
        };

        let Some(version) = version else {
            return status;
        };
        status.healthy = true;
        status.version = Some(version);

        // Anything missing past this point downgrades the beacon flag
        // without touching the version already found.
        match self.fetch_head_slot(base).await {
            Ok(Some(head_slot)) => {
                status.head_slot = Some(head_slot);
                status.blobs = Some(self.sample_blob_sidecars(base, head_slot).await);
            }
            Ok(None) => {
                status.healthy = false;
            }
            Err(e) => {
                warn!("beacon head fetch failed: {}", e);
                status.healthy = false;
            }
        }

        status
    }

    async fn fetch_beacon_version(&self, base: &str) -> Result<(u16, Option<String>)> {
        let url = format!("{}/eth/v1/node/version", base);
        let response = self.client.get(&url).send().await?;
        let code = response.status().as_u16();
        if !response.status().is_success() {
            return Ok((code, None));
        }

        let body: Value = response.json().await?;
        let version = body
            .pointer("/data/version")
            .and_then(Value::as_str)
            .map(str::to_string);
        Ok((code, version))
    }

    async fn fetch_head_slot(&self, base: &str) -> Result<Option<u64>> {
        let url = format!("{}/eth/v1/beacon/headers/head", base);
        let response = self.client.get(&url).send().await?;
        if !response.status().is_success() {
            return Ok(None);
        }

        let body: Value = response.json().await?;
        // The beacon API encodes the slot as a decimal string.
        let slot = body
            .pointer("/data/header/message/slot")
            .and_then(Value::as_str)
            .and_then(|s| s.parse().ok());
        Ok(slot)
    }

    /// Probe the blob-sidecar lists of the most recent slots. Slots are
    /// independent: 404 means "no blobs", any other failure counts as an
    /// error, and neither stops the remaining probes.
    async fn sample_blob_sidecars(&self, base: &str, head_slot: u64) -> BlobStats {
        let mut stats = BlobStats {
            slots_checked: BLOB_SAMPLE_SLOTS,
            ..BlobStats::default()
        };

        for i in 0..u64::from(BLOB_SAMPLE_SLOTS) {
            let slot = head_slot.saturating_sub(i);
            match self.fetch_blob_count(base, slot).await {
                Ok(Some(count)) if count > 0 => {
                    stats.slots_with_blobs += 1;
                    stats.total_blobs += count;
                }
                Ok(Some(_)) | Ok(None) => {}
                Err(e) => {
                    debug!("blob probe for slot {} failed: {}", slot, e);
                    stats.errors += 1;
                }
            }
        }

        stats
    }

    /// `Ok(Some(n))` on 200, `Ok(None)` on 404, error otherwise.
    async fn fetch_blob_count(&self, base: &str, slot: u64) -> Result<Option<u64>> {
        let url = format!("{}/eth/v1/beacon/blob_sidecars/{}", base, slot);
        let response = self.client.get(&url).timeout(BLOB_TIMEOUT).send().await?;

        match response.status().as_u16() {
            200 => {
                let body: Value = response.json().await?;
                let count = body
                    .get("data")
                    .and_then(Value::as_array)
                    .map(|blobs| blobs.len() as u64)
                    .unwrap_or(0);
                Ok(Some(count))
            }
            404 => Ok(None),
            code => Err(AztecMonError::RpcCallFailed(format!(
                "blob sidecars for slot {}: HTTP {}",
                slot, code
            ))),
        }
    }
}

impl Default for HealthChecker {
    fn default() -> Self {
        Self::new()
    }
}

fn parse_hex_u64(hex: &str) -> Option<u64> {
    u64::from_str_radix(hex.trim_start_matches("0x"), 16).ok()
}
