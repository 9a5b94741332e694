use tokio::process::Command;
use tracing::{debug, warn};

/// Exit flag plus combined stdout/stderr of an external command.
#[derive(Debug, Clone)]
pub struct CommandOutput {
    pub success: bool,
    pub output: String,
}

/// Executes external OS commands (docker, systemctl, the node binary)
/// and reports their combined output. Spawn failures degrade to an
/// unsuccessful output instead of erroring: callers treat the command
/// boundary as best-effort.
pub struct CommandRunner;

impl CommandRunner {
    pub async fn run(program: &str, args: &[&str]) -> CommandOutput {
        debug!("executing: {} {}", program, args.join(" "));

        match Command::new(program).args(args).output().await {
            Ok(out) => Self::collect(out),
            Err(e) => {
                warn!("failed to execute {}: {}", program, e);
                CommandOutput {
                    success: false,
                    output: e.to_string(),
                }
            }
        }
    }

    /// Run through `sh -c` for pipelines such as
    /// `docker logs <id> 2>&1 | grep -i peerId`.
    pub async fn run_shell(script: &str) -> CommandOutput {
        debug!("executing shell: {}", script);

        match Command::new("sh").arg("-c").arg(script).output().await {
            Ok(out) => Self::collect(out),
            Err(e) => {
                warn!("failed to execute shell command: {}", e);
                CommandOutput {
                    success: false,
                    output: e.to_string(),
                }
            }
        }
    }

    fn collect(out: std::process::Output) -> CommandOutput {
        let stdout = String::from_utf8_lossy(&out.stdout).trim().to_string();
        let stderr = String::from_utf8_lossy(&out.stderr).trim().to_string();

        let output = match (stdout.is_empty(), stderr.is_empty()) {
            (false, false) => format!("{}\n{}", stdout, stderr),
            (false, true) => stdout,
            (true, false) => stderr,
            (true, true) => String::new(),
        };

        CommandOutput {
            success: out.status.success(),
            output,
        }
    }
}
