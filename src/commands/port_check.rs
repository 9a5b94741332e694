use crate::core::NetworkMonitor;
use crate::error::{AztecMonError, Result};
use crate::models::MonitorConfig;

pub async fn execute(config: &MonitorConfig, port: u16, ip: Option<String>) -> Result<()> {
    if port == 0 {
        return Err(AztecMonError::InvalidPort("0".to_string()));
    }

    let monitor = NetworkMonitor::new(config);
    let check = monitor.check_port(port, ip).await?;

    println!(
        "Port {} is {} on {}",
        check.port,
        if check.open { "OPEN" } else { "CLOSED" },
        check.ip_address
    );

    Ok(())
}
