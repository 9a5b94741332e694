use crate::core::{SystemMonitor, VersionResolver};
use crate::error::Result;
use crate::models::MonitorConfig;
use crate::utils::fmt::format_bytes;

pub async fn execute(config: &MonitorConfig, verbose: bool) -> Result<()> {
    let system = SystemMonitor::new(config);

    let service = system.service_status().await;
    println!("Service: {}", config.service_name);
    println!("Active:  {}", if service.active { "✓" } else { "✗" });
    println!("Enabled: {}", if service.enabled { "✓" } else { "✗" });

    match VersionResolver::new().current_version().await {
        Some(version) => println!("Node version: {}", version),
        None => println!("Node version: not detected"),
    }

    let resources = system.system_resources().await;
    println!();
    println!(
        "CPU:    {:.1}% of {} cores",
        resources.cpu_percent, resources.cpu_cores
    );
    println!(
        "Memory: {} / {} ({:.1}%)",
        format_bytes(resources.mem_used),
        format_bytes(resources.mem_total),
        resources.mem_percent()
    );
    println!(
        "Disk:   {} / {} ({:.1}%)",
        format_bytes(resources.disk_used),
        format_bytes(resources.disk_total),
        resources.disk_percent()
    );

    if verbose && !service.status_output.is_empty() {
        println!("\n{}", service.status_output);
    }

    Ok(())
}
