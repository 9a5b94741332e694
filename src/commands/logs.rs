use std::str::FromStr;

use crate::core::LogInspector;
use crate::error::{AztecMonError, Result};
use crate::models::{LogLevel, MonitorConfig};

pub async fn execute(
    config: &MonitorConfig,
    lines: Option<usize>,
    level: Option<&str>,
    component: Option<&str>,
) -> Result<()> {
    let level = level
        .map(|s| {
            LogLevel::from_str(s)
                .map_err(|_| AztecMonError::ConfigError(format!("unknown log level: {}", s)))
        })
        .transpose()?;

    let inspector = LogInspector::new(config);
    let lines = lines.unwrap_or(config.log_lines);

    let entries = match inspector.node_logs(lines, level, component).await {
        Ok(entries) => entries,
        Err(AztecMonError::ContainerNotFound) => {
            println!("No running node container found.");
            return Ok(());
        }
        Err(e) => return Err(e),
    };

    if entries.is_empty() {
        println!("No matching log lines.");
        return Ok(());
    }

    for entry in entries {
        println!("{}", entry.line);
    }

    Ok(())
}
