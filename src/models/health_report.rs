use serde::{Deserialize, Serialize};

/// Result of one RPC health-check run. Built fresh per invocation,
/// never persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RpcHealthReport {
    pub exec: ExecStatus,
    pub beacon: Option<BeaconStatus>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExecStatus {
    pub healthy: bool,
    pub block_number: Option<u64>,
    pub http_code: Option<u16>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BeaconStatus {
    pub healthy: bool,
    pub version: Option<String>,
    pub http_code: Option<u16>,
    pub head_slot: Option<u64>,
    /// Only populated when a head slot was obtained.
    pub blobs: Option<BlobStats>,
}

/// Blob-sidecar availability sample over the most recent slots.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BlobStats {
    pub slots_checked: u32,
    pub slots_with_blobs: u32,
    pub total_blobs: u64,
    pub errors: u32,
}

impl BlobStats {
    pub fn success_rate(&self) -> f64 {
        if self.slots_checked == 0 {
            return 0.0;
        }
        f64::from(self.slots_with_blobs) / f64::from(self.slots_checked) * 100.0
    }

    pub fn health(&self) -> BlobHealth {
        BlobHealth::classify(self.success_rate())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BlobHealth {
    Healthy,
    Warning,
    Critical,
}

impl BlobHealth {
    /// `>= 75%` healthy, `>= 25%` warning, below that critical.
    pub fn classify(success_rate: f64) -> Self {
        if success_rate >= 75.0 {
            Self::Healthy
        } else if success_rate >= 25.0 {
            Self::Warning
        } else {
            Self::Critical
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Healthy => "HEALTHY",
            Self::Warning => "WARNING",
            Self::Critical => "CRITICAL",
        }
    }
}
