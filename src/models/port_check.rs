use serde::{Deserialize, Serialize};

/// Verdict of an external reachability probe against one port.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PortCheck {
    pub port: u16,
    pub ip_address: String,
    pub open: bool,
}
