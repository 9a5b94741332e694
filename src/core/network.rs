use reqwest::Client;
use std::time::Duration;
use tracing::{debug, error, info, warn};

use crate::constants::PUBLIC_IP_APIS;
use crate::core::container;
use crate::error::{AztecMonError, Result};
use crate::models::{MonitorConfig, NetworkPeers, PeerStatus, PortCheck};
use crate::utils::parse;

const PEERS_TIMEOUT: Duration = Duration::from_secs(30);
const IP_TIMEOUT: Duration = Duration::from_secs(10);
const PORT_CHECK_TIMEOUT: Duration = Duration::from_secs(15);

/// Peer discovery and reachability checks: the node container's own
/// peer id, its visibility in the network discovery API, and external
/// port probing.
pub struct NetworkMonitor {
    client: Client,
    peers_api: String,
    port_check_api: String,
    container_image: String,
    ip_apis: Vec<String>,
}

impl NetworkMonitor {
    pub fn new(config: &MonitorConfig) -> Self {
        Self::with_endpoints(
            config.network_peers_api.clone(),
            config.port_check_api.clone(),
            PUBLIC_IP_APIS.iter().map(|s| s.to_string()).collect(),
            config.container_image.clone(),
        )
    }

    pub fn with_endpoints(
        peers_api: String,
        port_check_api: String,
        ip_apis: Vec<String>,
        container_image: String,
    ) -> Self {
        Self {
            client: Client::builder()
                .timeout(PEERS_TIMEOUT)
                .build()
                .expect("failed to build HTTP client"),
            peers_api,
            port_check_api,
            container_image,
            ip_apis,
        }
    }

    /// Peer id of the running node container, extracted from its logs.
    /// All failure kinds degrade to `None` after logging.
    pub async fn local_peer_id(&self) -> Option<String> {
        let container_id = match container::find_container(&self.container_image).await {
            Ok(id) => id,
            Err(AztecMonError::ContainerNotFound) => {
                warn!("no {} container found", self.container_image);
                return None;
            }
            Err(e) => {
                warn!("container lookup failed: {}", e);
                return None;
            }
        };
        debug!("using container ID: {}", container_id);

        let Some(line) = container::grep_logs(&container_id, "peerId").await else {
            warn!("container logs contain no peerId line");
            return None;
        };

        match parse::extract_peer_id(&line) {
            Some(peer_id) => {
                info!("found local peer ID: {}", peer_id);
                Some(peer_id)
            }
            None => {
                warn!("could not extract peer ID from log line");
                None
            }
        }
    }

    pub async fn fetch_network_peers(&self) -> Result<NetworkPeers> {
        let response = self.client.get(&self.peers_api).send().await?;
        if !response.status().is_success() {
            return Err(AztecMonError::Unreachable(format!(
                "peers API returned HTTP {}",
                response.status()
            )));
        }

        let peers: NetworkPeers = response.json().await?;
        info!("fetched {} peers from network", peers.peers.len());
        Ok(peers)
    }

    /// Full peer-status aggregation: local id, network visibility, and
    /// the matched record. Partial failures fill in what was learned.
    pub async fn peer_status(&self) -> PeerStatus {
        let mut status = PeerStatus {
            local_peer_id: None,
            network_reachable: false,
            peer_found: false,
            total_network_peers: 0,
            peer: None,
        };

        let Some(local_peer_id) = self.local_peer_id().await else {
            return status;
        };
        status.local_peer_id = Some(local_peer_id.clone());

        let network = match self.fetch_network_peers().await {
            Ok(network) => network,
            Err(e) => {
                error!("error fetching network peers: {}", e);
                return status;
            }
        };
        status.network_reachable = true;
        status.total_network_peers = network.peers.len();

        if let Some(peer) = network.peers.into_iter().find(|p| p.id == local_peer_id) {
            status.peer_found = true;
            status.peer = Some(peer);
        }
        status
    }

    /// First public-IP service that answers with a plain dotted quad.
    pub async fn public_ip(&self) -> Option<String> {
        for url in &self.ip_apis {
            let response = match self.client.get(url).timeout(IP_TIMEOUT).send().await {
                Ok(r) if r.status().is_success() => r,
                Ok(r) => {
                    debug!("{} returned HTTP {}", url, r.status());
                    continue;
                }
                Err(e) => {
                    debug!("{} failed: {}", url, e);
                    continue;
                }
            };

            if let Ok(text) = response.text().await {
                let candidate = text.trim();
                if parse::is_ipv4(candidate) {
                    return Some(candidate.to_string());
                }
            }
        }
        warn!("could not determine public IP from any source");
        None
    }

    /// External reachability probe. Without an explicit address the
    /// public IP is discovered first; an unparseable verdict counts as
    /// closed.
    pub async fn check_port(&self, port: u16, ip_address: Option<String>) -> Result<PortCheck> {
        let ip_address = match ip_address {
            Some(ip) => ip,
            None => self
                .public_ip()
                .await
                .ok_or_else(|| AztecMonError::Unreachable("public IP lookup failed".into()))?,
        };

        let port_number = port.to_string();
        let response = self
            .client
            .post(&self.port_check_api)
            .timeout(PORT_CHECK_TIMEOUT)
            .form(&[
                ("remoteAddress", ip_address.as_str()),
                ("portNumber", port_number.as_str()),
            ])
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(AztecMonError::Unreachable(format!(
                "port check API returned HTTP {}",
                response.status()
            )));
        }

        let html = response.text().await?;
        let open = match parse::parse_port_check_response(&html) {
            Some(open) => open,
            None => {
                warn!("could not parse port check response for port {}", port);
                false
            }
        };

        Ok(PortCheck {
            port,
            ip_address,
            open,
        })
    }
}
