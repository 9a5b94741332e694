use thiserror::Error;

#[derive(Error, Debug)]
pub enum AztecMonError {
    #[error("node executable not found in any candidate path")]
    ExecutableNotFound,

    #[error("no aztec container found")]
    ContainerNotFound,

    #[error("version probe produced no parseable version")]
    VersionNotDetected,

    #[error("invalid version format: {0} (expected x.y.z)")]
    InvalidVersionFormat(String),

    #[error("invalid port: {0}")]
    InvalidPort(String),

    #[error("RPC call failed: {0}")]
    RpcCallFailed(String),

    #[error("endpoint unreachable: {0}")]
    Unreachable(String),

    #[error("command failed: {0}")]
    CommandFailed(String),

    #[error("config error: {0}")]
    ConfigError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("HTTP error: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("JSON parse error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    TomlDeError(#[from] toml::de::Error),

    #[error("TOML serialize error: {0}")]
    TomlSerError(#[from] toml::ser::Error),

    #[error("unexpected error: {0}")]
    Other(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, AztecMonError>;
