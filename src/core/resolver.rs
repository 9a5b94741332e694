use std::path::{Path, PathBuf};
use std::time::Duration;
use tokio::process::Command;
use tracing::{debug, warn};

use crate::constants::{NODE_EXECUTABLE_NAME, NODE_EXECUTABLE_PATHS, VERSION_FLAGS};
use crate::error::{AztecMonError, Result};
use crate::models::NodeVersion;
use crate::utils::parse;

const WHICH_TIMEOUT: Duration = Duration::from_secs(2);
const PROBE_TIMEOUT: Duration = Duration::from_secs(5);

/// Locates the installed node executable and extracts its version.
///
/// Probes a fixed ordered path list (first match wins), falling back to
/// PATH lookup, then tries version flags in order until one produces a
/// parseable `x.y.z`. Every failure degrades to `None` at the public
/// boundary; the inner steps return typed errors so each kind is
/// handled and logged explicitly.
pub struct VersionResolver {
    candidate_paths: Vec<PathBuf>,
    fallback_name: Option<String>,
}

impl VersionResolver {
    pub fn new() -> Self {
        let home = std::env::var("HOME").unwrap_or_else(|_| "/root".to_string());
        let candidate_paths = NODE_EXECUTABLE_PATHS
            .iter()
            .map(|p| PathBuf::from(p.replacen('~', &home, 1)))
            .collect();

        Self {
            candidate_paths,
            fallback_name: Some(NODE_EXECUTABLE_NAME.to_string()),
        }
    }

    /// Custom probe list, used by the update orchestrator's tests and
    /// by configs pointing at non-standard install locations.
    pub fn with_candidates(candidate_paths: Vec<PathBuf>, fallback_name: Option<String>) -> Self {
        Self {
            candidate_paths,
            fallback_name,
        }
    }

    /// Current node version, or `None` when no executable resolves or
    /// no flag yields a parseable version.
    pub async fn current_version(&self) -> Option<NodeVersion> {
        let executable = match self.locate().await {
            Ok(path) => path,
            Err(AztecMonError::ExecutableNotFound) => {
                warn!("node executable not found in any candidate path");
                return None;
            }
            Err(e) => {
                warn!("failed to locate node executable: {}", e);
                return None;
            }
        };

        match self.probe_version(&executable).await {
            Ok(version) => Some(version),
            Err(AztecMonError::VersionNotDetected) => {
                warn!("no version flag produced a parseable version");
                None
            }
            Err(e) => {
                warn!("version probe failed: {}", e);
                None
            }
        }
    }

    /// First candidate that exists and is executable; otherwise a PATH
    /// lookup on the bare name.
    async fn locate(&self) -> Result<PathBuf> {
        for path in &self.candidate_paths {
            if is_executable(path) {
                debug!("selected node executable: {}", path.display());
                return Ok(path.clone());
            }
        }

        if let Some(name) = &self.fallback_name {
            if let Some(path) = which(name).await {
                debug!("resolved {} on PATH: {}", name, path.display());
                return Ok(path);
            }
        }

        Err(AztecMonError::ExecutableNotFound)
    }

    async fn probe_version(&self, executable: &Path) -> Result<NodeVersion> {
        for flag in VERSION_FLAGS {
            match self.probe_flag(executable, flag).await {
                Ok(Some(version)) => return Ok(version),
                Ok(None) => continue,
                Err(e) => {
                    debug!("probe {} {} failed: {}", executable.display(), flag, e);
                    continue;
                }
            }
        }
        Err(AztecMonError::VersionNotDetected)
    }

    /// One flag probe under a short timeout; stdout and stderr are
    /// scanned together since node CLIs disagree about which stream
    /// carries the banner.
    async fn probe_flag(&self, executable: &Path, flag: &str) -> Result<Option<NodeVersion>> {
        let output = tokio::time::timeout(
            PROBE_TIMEOUT,
            Command::new(executable).arg(flag).output(),
        )
        .await
        .map_err(|_| AztecMonError::Unreachable(format!("{} {}", executable.display(), flag)))??;

        let mut combined = String::from_utf8_lossy(&output.stdout).into_owned();
        combined.push_str(&String::from_utf8_lossy(&output.stderr));

        Ok(parse::extract_version(&combined).and_then(|v| v.parse().ok()))
    }
}

impl Default for VersionResolver {
    fn default() -> Self {
        Self::new()
    }
}

fn is_executable(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;

    path.is_file()
        && std::fs::metadata(path)
            .map(|m| m.permissions().mode() & 0o111 != 0)
            .unwrap_or(false)
}

async fn which(name: &str) -> Option<PathBuf> {
    let result = tokio::time::timeout(
        WHICH_TIMEOUT,
        Command::new("which").arg(name).output(),
    )
    .await
    .ok()?
    .ok()?;

    if !result.status.success() {
        return None;
    }

    let path = String::from_utf8_lossy(&result.stdout).trim().to_string();
    if path.is_empty() {
        None
    } else {
        Some(PathBuf::from(path))
    }
}
