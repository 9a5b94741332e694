pub const CONFIG_DIR: &str = "/etc/aztecmon";
pub const APP_CONFIG: &str = "aztecmon.toml";

pub const SERVICE_NAME: &str = "aztec.service";
pub const CONTAINER_IMAGE: &str = "aztecprotocol/aztec:latest";

pub const NODE_REGISTRY_API: &str =
    "https://hub.docker.com/v2/repositories/aztecprotocol/aztec/tags";
pub const NETWORK_PEERS_API: &str =
    "https://aztec.nethermind.io/api/peers?page_size=20000&latest=true";
pub const VALIDATOR_API_BASE: &str = "https://dashtec.xyz/api/validators";
pub const PORT_CHECK_API: &str = "https://ports.yougetsignal.com/check-port.php";

pub const PUBLIC_IP_APIS: &[&str] = &[
    "https://api.ipify.org",
    "https://ipinfo.io/ip",
    "https://checkip.amazonaws.com",
];

pub const MIN_NODE_VERSION: &str = "0.87.0";
pub const CACHE_EXPIRY_SECS: u64 = 300;

pub const DEFAULT_LOCAL_RPC_PORT: u16 = 8080;
pub const REMOTE_RPC: &str = "https://aztec-rpc.cerberusnode.com";

pub const UPDATE_COMMAND: &str = "aztec-up";
pub const UPDATE_SETTLE_SECS: u64 = 10;

/// Candidate locations for the node executable, probed in order.
pub const NODE_EXECUTABLE_PATHS: &[&str] = &[
    "/home/ubuntu/.aztec/bin/aztec",
    "/root/.aztec/bin/aztec",
    "~/.aztec/bin/aztec",
    "/usr/local/bin/aztec",
];
pub const NODE_EXECUTABLE_NAME: &str = "aztec";
pub const VERSION_FLAGS: &[&str] = &["-V", "--version", "-v"];

pub const REGISTRY_PAGE_SIZE: u32 = 100;
pub const REGISTRY_MAX_PAGES: u32 = 50;
pub const REGISTRY_MAX_VERSIONS: usize = 100;

pub const BLOB_SAMPLE_SLOTS: u32 = 10;

pub const DEFAULT_LOG_LINES: usize = 50;

pub const WATCH_INTERVAL_SECS: u64 = 300;
pub const ALERT_COOLDOWN_SECS: u64 = 1800;
pub const ALERT_MISS_RATE: f64 = 20.0;
