use std::time::Duration;

use crate::core::VersionRegistry;
use crate::error::Result;
use crate::models::{MonitorConfig, NodeVersion};
use crate::utils::ui;

pub async fn execute(config: &MonitorConfig, no_cache: bool) -> Result<()> {
    let min_version: NodeVersion = config.min_node_version.parse()?;
    let mut registry = VersionRegistry::new(
        config.registry_api.clone(),
        min_version,
        Duration::from_secs(config.cache_expiry_secs),
    );

    if no_cache {
        registry.clear_cache();
    }

    let spinner = ui::create_spinner("fetching available versions...");
    let versions = registry.fetch_available_versions(!no_cache).await;
    spinner.finish_and_clear();

    if versions.is_empty() {
        println!("No eligible versions found (floor: {})", min_version);
        return Ok(());
    }

    println!(
        "{} versions at or above {} (newest first):",
        versions.len(),
        min_version
    );
    for version in &versions {
        println!("  {}", version);
    }

    Ok(())
}
