use std::time::Duration;
use tracing::{info, warn};

use crate::constants::UPDATE_SETTLE_SECS;
use crate::core::registry::VersionRegistry;
use crate::core::resolver::VersionResolver;
use crate::core::runner::CommandRunner;
use crate::models::{NodeVersion, UpdateCheck, UpdateOutcome, UpdateResult};

/// How many sample alternatives to surface when a target version is
/// rejected.
const SAMPLE_ALTERNATIVES: usize = 10;

/// Drives a node version change: validate the target, run the external
/// upgrade command, then re-verify what is actually installed. Linear,
/// no retries; every outcome is a structured `UpdateResult`.
pub struct Updater {
    resolver: VersionResolver,
    update_command: String,
    settle_delay: Duration,
}

impl Updater {
    pub fn new(update_command: String) -> Self {
        Self {
            resolver: VersionResolver::new(),
            update_command,
            settle_delay: Duration::from_secs(UPDATE_SETTLE_SECS),
        }
    }

    /// Fully injected constructor; tests shorten the settle delay and
    /// point the resolver at scripted executables.
    pub fn with_parts(
        resolver: VersionResolver,
        update_command: String,
        settle_delay: Duration,
    ) -> Self {
        Self {
            resolver,
            update_command,
            settle_delay,
        }
    }

    pub async fn update_to_version(
        &self,
        registry: &mut VersionRegistry,
        target: &str,
    ) -> UpdateResult {
        let old_version = self.resolver.current_version().await;
        let old_string = old_version.map(|v| v.to_string());

        let mut result = UpdateResult {
            outcome: UpdateOutcome::InvalidFormat,
            old_version: old_string.clone(),
            target_version: target.to_string(),
            command_output: String::new(),
        };

        let target_parsed: NodeVersion = match target.parse() {
            Ok(v) => v,
            Err(_) => {
                warn!("rejected malformed target version: {}", target);
                return result;
            }
        };

        let available = registry.fetch_available_versions(true).await;
        if !available.iter().any(|v| v == target) {
            result.outcome = UpdateOutcome::VersionNotFound {
                available: available.into_iter().take(SAMPLE_ALTERNATIVES).collect(),
            };
            return result;
        }

        // Semantic comparison, not string equality: "0.87.08" is
        // already current when 0.87.8 runs.
        if old_version == Some(target_parsed) {
            info!("already running version {}", target);
            result.outcome = UpdateOutcome::AlreadyCurrent;
            return result;
        }

        info!(
            "updating node from {} to {}",
            old_string.as_deref().unwrap_or("unknown"),
            target
        );
        let command = CommandRunner::run(&self.update_command, &["-v", target]).await;
        result.command_output = command.output;

        if !command.success {
            result.outcome = UpdateOutcome::CommandFailed;
            return result;
        }

        // Give the install time to settle before trusting the probe.
        tokio::time::sleep(self.settle_delay).await;

        let new_version = self.resolver.current_version().await;
        if new_version == Some(target_parsed) {
            result.outcome = UpdateOutcome::Updated;
        } else {
            result.outcome = UpdateOutcome::VersionMismatch {
                detected: new_version.map(|v| v.to_string()),
            };
        }
        result
    }

    /// Non-mutating check of the current version against the registry's
    /// latest. Without a resolvable current version there is nothing to
    /// compare against.
    pub async fn check_update(&self, registry: &mut VersionRegistry) -> UpdateCheck {
        let mut check = UpdateCheck {
            current_version: None,
            latest_version: None,
            newer_versions: Vec::new(),
        };

        let current = match self.resolver.current_version().await {
            Some(v) => v,
            None => return check,
        };
        check.current_version = Some(current.to_string());

        let available = registry.fetch_available_versions(true).await;
        check.latest_version = available.first().cloned();
        check.newer_versions = available
            .into_iter()
            .filter(|v| {
                v.parse::<NodeVersion>()
                    .map(|parsed| parsed > current)
                    .unwrap_or(false)
            })
            .collect();

        check
    }
}
