use dialoguer::Confirm;
use std::time::Duration;
use tracing::info;

use crate::core::{Updater, VersionRegistry};
use crate::error::{AztecMonError, Result};
use crate::models::{MonitorConfig, NodeVersion, UpdateOutcome};
use crate::utils::ui;

pub async fn execute(config: &MonitorConfig, version: &str, skip_confirm: bool) -> Result<()> {
    let confirmed = if skip_confirm {
        true
    } else {
        Confirm::new()
            .with_prompt(format!("Update the node to version {}?", version))
            .default(false)
            .interact()?
    };

    if !confirmed {
        info!("update cancelled");
        return Ok(());
    }

    let min_version: NodeVersion = config.min_node_version.parse()?;
    let mut registry = VersionRegistry::new(
        config.registry_api.clone(),
        min_version,
        Duration::from_secs(config.cache_expiry_secs),
    );
    let updater = Updater::new(config.update_command.clone());

    let spinner = ui::create_spinner("updating node...");
    let result = updater.update_to_version(&mut registry, version).await;
    spinner.finish_and_clear();

    match &result.outcome {
        UpdateOutcome::Updated => {
            println!(
                "Node updated: {} -> {}",
                result.old_version.as_deref().unwrap_or("unknown"),
                result.target_version
            );
            println!("Verify with: aztec -V");
        }
        UpdateOutcome::AlreadyCurrent => {
            println!("Already running version {}", result.target_version);
        }
        UpdateOutcome::InvalidFormat => {
            println!(
                "Invalid version format: {} (expected x.y.z, e.g. 0.87.8)",
                result.target_version
            );
        }
        UpdateOutcome::VersionNotFound { available } => {
            println!("Version {} not found in the registry.", result.target_version);
            if !available.is_empty() {
                println!("Available versions: {}", available.join(", "));
            }
        }
        UpdateOutcome::CommandFailed => {
            println!("Update command failed:");
            let output = &result.command_output;
            let shown: String = output.chars().take(500).collect();
            println!("{}{}", shown, if output.len() > 500 { "..." } else { "" });
            println!(
                "\nCheck that '{}' is installed, disk space is sufficient and the network is reachable.",
                config.update_command
            );
        }
        UpdateOutcome::VersionMismatch { detected } => {
            println!("Update command completed, but the version check disagrees:");
            println!("  Expected: {}", result.target_version);
            println!(
                "  Detected: {}",
                detected.as_deref().unwrap_or("unknown")
            );
            println!("The node may still be starting up; check again in a few minutes.");
        }
    }

    if !result.succeeded() {
        return Err(AztecMonError::CommandFailed(
            "node update did not complete".to_string(),
        ));
    }

    Ok(())
}
