use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "aztecmon")]
#[command(about = "Aztec validator node monitor", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Config file (default: /etc/aztecmon/aztecmon.toml)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Service state, node version and host resources
    Status {
        /// Include full systemctl status output
        #[arg(short, long)]
        verbose: bool,
    },

    /// Compare local chain tip against the remote reference RPC
    Sync {
        /// Local RPC port (default from config)
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Check execution RPC and beacon health
    Health {
        /// Execution JSON-RPC endpoint
        exec_rpc: String,

        /// Beacon REST endpoint
        #[arg(short, long)]
        beacon: Option<String>,
    },

    /// Look up this node's peer in the network discovery API
    Peers,

    /// Validator performance from the dashboard API
    Validator,

    /// List eligible node versions from the registry
    Versions {
        /// Bypass the version cache
        #[arg(long)]
        no_cache: bool,
    },

    /// Compare the installed version against the latest release
    CheckUpdate,

    /// Update the node to a specific version
    Update {
        /// Target version (x.y.z)
        version: String,

        /// Skip the confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },

    /// Show filtered container logs
    Logs {
        /// Show last N lines
        #[arg(short, long)]
        lines: Option<usize>,

        /// Only lines at this level (error, warn, info, debug)
        #[arg(long)]
        level: Option<String>,

        /// Only lines from this component
        #[arg(long)]
        component: Option<String>,
    },

    /// Check whether a port is reachable from the internet
    PortCheck {
        /// Port to probe
        port: u16,

        /// Public address (discovered automatically when omitted)
        #[arg(short, long)]
        ip: Option<String>,
    },

    /// Watch validator performance and alert on high miss rates
    Watch,
}
