use reqwest::Client;
use std::time::Duration;
use tracing::{error, info, warn};

use crate::core::container;
use crate::error::{AztecMonError, Result};
use crate::models::{MonitorConfig, ValidatorData, ValidatorStatus};
use crate::utils::parse;

const FETCH_TIMEOUT: Duration = Duration::from_secs(30);

/// Looks up this node's validator in the dashboard API, keyed by the
/// owner address announced in the container's startup logs.
pub struct ValidatorMonitor {
    client: Client,
    api_base: String,
    container_image: String,
}

impl ValidatorMonitor {
    pub fn new(config: &MonitorConfig) -> Self {
        Self::with_api(
            config.validator_api_base.clone(),
            config.container_image.clone(),
        )
    }

    pub fn with_api(api_base: String, container_image: String) -> Self {
        Self {
            client: Client::builder()
                .timeout(FETCH_TIMEOUT)
                .build()
                .expect("failed to build HTTP client"),
            api_base,
            container_image,
        }
    }

    /// Owner address from the container's `… with owner 0x…` log line.
    pub async fn owner_address(&self) -> Option<String> {
        let container_id = match container::find_container(&self.container_image).await {
            Ok(id) => id,
            Err(e) => {
                warn!("container lookup failed: {}", e);
                return None;
            }
        };

        let Some(line) = container::grep_logs(&container_id, "owner").await else {
            warn!("no owner address found in container logs");
            return None;
        };

        match parse::extract_owner_address(&line) {
            Some(address) => {
                info!("found validator owner address: {}", address);
                Some(address)
            }
            None => {
                warn!("owner line did not contain a parseable address");
                None
            }
        }
    }

    /// `Ok(None)` when the API answers 404: the address is simply not a
    /// registered validator.
    pub async fn fetch_validator(&self, address: &str) -> Result<Option<ValidatorData>> {
        let url = format!("{}/{}", self.api_base, address.to_lowercase());
        let response = self.client.get(&url).send().await?;

        match response.status().as_u16() {
            200 => Ok(Some(response.json().await?)),
            404 => {
                warn!("validator not found: {}", address);
                Ok(None)
            }
            code => Err(AztecMonError::Unreachable(format!(
                "validator API returned HTTP {}",
                code
            ))),
        }
    }

    pub async fn validator_status(&self) -> ValidatorStatus {
        let mut status = ValidatorStatus {
            owner_address: None,
            validator_found: false,
            validator: None,
        };

        let Some(address) = self.owner_address().await else {
            return status;
        };
        status.owner_address = Some(address.clone());

        match self.fetch_validator(&address).await {
            Ok(Some(data)) => {
                status.validator_found = true;
                status.validator = Some(data);
            }
            Ok(None) => {}
            Err(e) => {
                error!("error fetching validator data: {}", e);
            }
        }
        status
    }
}
