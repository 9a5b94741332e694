use crate::core::SyncChecker;
use crate::error::Result;
use crate::models::MonitorConfig;

pub async fn execute(config: &MonitorConfig, port: Option<u16>) -> Result<()> {
    let port = port.unwrap_or(config.local_rpc_port);
    let checker = SyncChecker::new(config.remote_rpc.clone());
    let status = checker.sync_status(port).await;

    match status.local {
        Some(block) => println!("Local block:  {}", block),
        None => println!("Local block:  unreachable (port {})", port),
    }
    match status.remote {
        Some(block) => println!("Remote block: {}", block),
        None => println!("Remote block: unreachable"),
    }

    println!("Synced: {}", if status.synced { "✓" } else { "✗" });
    match status.percent_synced() {
        Some(percent) => println!("Progress: {:.2}%", percent),
        None => println!("Progress: unavailable"),
    }

    Ok(())
}
