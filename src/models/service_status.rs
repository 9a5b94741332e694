use serde::{Deserialize, Serialize};

/// systemd unit state for the node service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceStatus {
    pub active: bool,
    pub enabled: bool,
    pub status_output: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SystemResources {
    pub cpu_percent: f32,
    pub cpu_cores: usize,
    pub mem_total: u64,
    pub mem_used: u64,
    pub mem_available: u64,
    pub disk_total: u64,
    pub disk_used: u64,
    pub disk_free: u64,
}

impl SystemResources {
    pub fn mem_percent(&self) -> f64 {
        if self.mem_total == 0 {
            return 0.0;
        }
        self.mem_used as f64 / self.mem_total as f64 * 100.0
    }

    pub fn disk_percent(&self) -> f64 {
        if self.disk_total == 0 {
            return 0.0;
        }
        self.disk_used as f64 / self.disk_total as f64 * 100.0
    }
}
