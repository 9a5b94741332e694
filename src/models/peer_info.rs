use serde::{Deserialize, Serialize};

/// Discovery API response: the full network peer list.
#[derive(Debug, Clone, Deserialize)]
pub struct NetworkPeers {
    #[serde(default)]
    pub peers: Vec<PeerRecord>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PeerRecord {
    pub id: String,
    #[serde(default)]
    pub client: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub last_seen: Option<String>,
    #[serde(default)]
    pub multi_addresses: Vec<MultiAddress>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MultiAddress {
    #[serde(default)]
    pub ip_info: Vec<IpInfo>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IpInfo {
    #[serde(default)]
    pub city_name: Option<String>,
    #[serde(default)]
    pub country_name: Option<String>,
    #[serde(default)]
    pub latitude: Option<f64>,
    #[serde(default)]
    pub longitude: Option<f64>,
}

impl PeerRecord {
    /// "City, Country" when geo data is present on the first multiaddr.
    pub fn location(&self) -> Option<String> {
        let info = self.multi_addresses.first()?.ip_info.first()?;
        let mut parts = Vec::new();
        if let Some(city) = info.city_name.as_deref().map(str::trim) {
            if !city.is_empty() {
                parts.push(city.to_string());
            }
        }
        if let Some(country) = info.country_name.as_deref().map(str::trim) {
            if !country.is_empty() {
                parts.push(country.to_string());
            }
        }
        if parts.is_empty() {
            None
        } else {
            Some(parts.join(", "))
        }
    }
}

/// Aggregate result of a peer-status check.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PeerStatus {
    pub local_peer_id: Option<String>,
    /// False when the discovery API could not be queried at all.
    pub network_reachable: bool,
    pub peer_found: bool,
    pub total_network_peers: usize,
    pub peer: Option<PeerRecord>,
}
