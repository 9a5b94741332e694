use tracing::info;

use crate::core::{ValidatorMonitor, Watcher};
use crate::error::Result;
use crate::models::MonitorConfig;

pub async fn execute(config: &MonitorConfig) -> Result<()> {
    let mut watcher = Watcher::new(config);
    watcher.start(ValidatorMonitor::new(config));

    info!(
        "watching validator performance every {}s (Ctrl+C to stop)",
        config.watch_interval_secs
    );

    tokio::signal::ctrl_c().await?;

    info!("stopping watcher...");
    watcher.stop().await;

    Ok(())
}
