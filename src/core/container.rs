use tracing::debug;

use crate::core::runner::CommandRunner;
use crate::error::{AztecMonError, Result};

/// First running container of the given image.
pub async fn find_container(image: &str) -> Result<String> {
    let result = CommandRunner::run(
        "docker",
        &[
            "ps",
            "--filter",
            &format!("ancestor={}", image),
            "--format",
            "{{.ID}}",
        ],
    )
    .await;

    if !result.success {
        return Err(AztecMonError::CommandFailed(result.output));
    }

    result
        .output
        .lines()
        .map(str::trim)
        .find(|line| !line.is_empty())
        .map(str::to_string)
        .ok_or(AztecMonError::ContainerNotFound)
}

/// First log line of the container matching `pattern`
/// (case-insensitive). `None` when the logs hold no match.
pub async fn grep_logs(container_id: &str, pattern: &str) -> Option<String> {
    let result = CommandRunner::run_shell(&format!(
        "docker logs {} 2>&1 | grep -i {} | head -n 1",
        container_id, pattern
    ))
    .await;

    let line = result.output.trim();
    if line.is_empty() {
        debug!("no '{}' line in logs of {}", pattern, container_id);
        None
    } else {
        Some(line.to_string())
    }
}

/// Last `lines` log lines of the container, stdout and stderr combined.
pub async fn tail_logs(container_id: &str, lines: usize) -> Result<String> {
    let result = CommandRunner::run(
        "docker",
        &["logs", "--tail", &lines.to_string(), container_id],
    )
    .await;

    if !result.success {
        return Err(AztecMonError::CommandFailed(result.output));
    }
    Ok(result.output)
}
