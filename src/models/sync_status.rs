use serde::{Deserialize, Serialize};

/// Comparison of the local node's proven block height against a remote
/// reference endpoint. Computed per request, not cached.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SyncStatus {
    pub local: Option<u64>,
    pub remote: Option<u64>,
    pub synced: bool,
}

impl SyncStatus {
    pub fn new(local: Option<u64>, remote: Option<u64>) -> Self {
        let synced = match (local, remote) {
            (Some(l), Some(r)) => l == r,
            _ => false,
        };
        Self {
            local,
            remote,
            synced,
        }
    }

    /// Completion percentage, only meaningful when both heights are
    /// known and non-zero. Not clamped: a local node can be ahead of
    /// the reference.
    pub fn percent_synced(&self) -> Option<f64> {
        match (self.local, self.remote) {
            (Some(l), Some(r)) if l > 0 && r > 0 => Some(l as f64 / r as f64 * 100.0),
            _ => None,
        }
    }
}
