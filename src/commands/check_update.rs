use std::time::Duration;

use crate::core::{Updater, VersionRegistry};
use crate::error::Result;
use crate::models::{MonitorConfig, NodeVersion};
use crate::utils::ui;

pub async fn execute(config: &MonitorConfig) -> Result<()> {
    let min_version: NodeVersion = config.min_node_version.parse()?;
    let mut registry = VersionRegistry::new(
        config.registry_api.clone(),
        min_version,
        Duration::from_secs(config.cache_expiry_secs),
    );
    let updater = Updater::new(config.update_command.clone());

    let spinner = ui::create_spinner("checking for updates...");
    let check = updater.check_update(&mut registry).await;
    spinner.finish_and_clear();

    let Some(current) = &check.current_version else {
        println!("Cannot determine the current node version.");
        return Ok(());
    };
    println!("Current version: {}", current);

    let Some(latest) = &check.latest_version else {
        println!("Cannot fetch available versions from the registry.");
        return Ok(());
    };
    println!("Latest version:  {}", latest);

    if check.update_available() {
        let newer = &check.newer_versions;
        println!("\n{} newer version(s) available:", newer.len());
        for version in newer.iter().take(5) {
            println!("  {}", version);
        }
        if newer.len() > 5 {
            println!("  ...");
        }
        println!("\nUpdate with: aztecmon update {}", latest);
    } else {
        println!("\nThe node is running the latest stable version.");
    }

    Ok(())
}
