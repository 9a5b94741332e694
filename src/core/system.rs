use sysinfo::{Disks, System};
use tracing::debug;

use crate::core::runner::CommandRunner;
use crate::models::{MonitorConfig, ServiceStatus, SystemResources};

/// systemd unit state and host resource usage.
pub struct SystemMonitor {
    service_name: String,
}

impl SystemMonitor {
    pub fn new(config: &MonitorConfig) -> Self {
        Self {
            service_name: config.service_name.clone(),
        }
    }

    pub async fn service_status(&self) -> ServiceStatus {
        let active = CommandRunner::run("systemctl", &["is-active", &self.service_name]).await;
        let is_active = active.success && active.output == "active";

        let enabled = CommandRunner::run("systemctl", &["is-enabled", &self.service_name]).await;
        let is_enabled = enabled.success && enabled.output == "enabled";

        let status = CommandRunner::run(
            "systemctl",
            &["status", &self.service_name, "--no-pager", "-l"],
        )
        .await;

        ServiceStatus {
            active: is_active,
            enabled: is_enabled,
            status_output: if status.success {
                status.output
            } else {
                "Cannot get status details".to_string()
            },
        }
    }

    /// CPU usage needs two samples; the refresh interval below is the
    /// minimum sysinfo requires for a meaningful delta.
    pub async fn system_resources(&self) -> SystemResources {
        let mut sys = System::new_all();
        sys.refresh_cpu_usage();
        tokio::time::sleep(sysinfo::MINIMUM_CPU_UPDATE_INTERVAL).await;
        sys.refresh_cpu_usage();
        sys.refresh_memory();

        let disks = Disks::new_with_refreshed_list();
        let root = disks
            .iter()
            .find(|d| d.mount_point() == std::path::Path::new("/"))
            .or_else(|| disks.iter().next());

        let (disk_total, disk_free) = match root {
            Some(disk) => (disk.total_space(), disk.available_space()),
            None => {
                debug!("no disks reported by sysinfo");
                (0, 0)
            }
        };

        SystemResources {
            cpu_percent: sys.global_cpu_usage(),
            cpu_cores: sys.cpus().len(),
            mem_total: sys.total_memory(),
            mem_used: sys.used_memory(),
            mem_available: sys.available_memory(),
            disk_total,
            disk_used: disk_total.saturating_sub(disk_free),
            disk_free,
        }
    }
}
