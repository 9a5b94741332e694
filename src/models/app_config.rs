use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::constants;
use crate::error::Result;

/// Runtime configuration, loaded from `/etc/aztecmon/aztecmon.toml` when
/// present, otherwise built from defaults.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MonitorConfig {
    pub service_name: String,
    pub container_image: String,
    pub min_node_version: String,
    pub cache_expiry_secs: u64,
    pub registry_api: String,
    pub network_peers_api: String,
    pub validator_api_base: String,
    pub port_check_api: String,
    pub local_rpc_port: u16,
    pub remote_rpc: String,
    pub update_command: String,
    pub log_lines: usize,
    pub watch_interval_secs: u64,
    pub alert_cooldown_secs: u64,
    pub alert_miss_rate: f64,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            service_name: constants::SERVICE_NAME.to_string(),
            container_image: constants::CONTAINER_IMAGE.to_string(),
            min_node_version: constants::MIN_NODE_VERSION.to_string(),
            cache_expiry_secs: constants::CACHE_EXPIRY_SECS,
            registry_api: constants::NODE_REGISTRY_API.to_string(),
            network_peers_api: constants::NETWORK_PEERS_API.to_string(),
            validator_api_base: constants::VALIDATOR_API_BASE.to_string(),
            port_check_api: constants::PORT_CHECK_API.to_string(),
            local_rpc_port: constants::DEFAULT_LOCAL_RPC_PORT,
            remote_rpc: constants::REMOTE_RPC.to_string(),
            update_command: constants::UPDATE_COMMAND.to_string(),
            log_lines: constants::DEFAULT_LOG_LINES,
            watch_interval_secs: constants::WATCH_INTERVAL_SECS,
            alert_cooldown_secs: constants::ALERT_COOLDOWN_SECS,
            alert_miss_rate: constants::ALERT_MISS_RATE,
        }
    }
}

impl MonitorConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Missing file falls back to defaults; a present but malformed file
    /// is still an error.
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if path.exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }
}
