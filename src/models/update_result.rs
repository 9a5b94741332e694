use serde::{Deserialize, Serialize};

/// Outcome classification of a version-change attempt. Always returned
/// as a value, never raised across the service boundary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum UpdateOutcome {
    /// Post-update probe matched the target.
    Updated,
    /// Current version already equals the target; no command executed.
    AlreadyCurrent,
    /// Target is not a valid x.y.z string.
    InvalidFormat,
    /// Target is absent from the fetched version list.
    VersionNotFound {
        /// Up to 10 sample alternatives from the registry.
        available: Vec<String>,
    },
    /// Upgrade command exited non-zero or failed to spawn.
    CommandFailed,
    /// Command succeeded but the re-resolved version differs from the
    /// target. The node may still be starting up.
    VersionMismatch { detected: Option<String> },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateResult {
    pub outcome: UpdateOutcome,
    pub old_version: Option<String>,
    pub target_version: String,
    pub command_output: String,
}

impl UpdateResult {
    pub fn succeeded(&self) -> bool {
        matches!(
            self.outcome,
            UpdateOutcome::Updated | UpdateOutcome::AlreadyCurrent
        )
    }
}

/// Result of a non-mutating update check: current version against the
/// registry's latest.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateCheck {
    pub current_version: Option<String>,
    pub latest_version: Option<String>,
    pub newer_versions: Vec<String>,
}

impl UpdateCheck {
    pub fn update_available(&self) -> bool {
        !self.newer_versions.is_empty()
    }
}
