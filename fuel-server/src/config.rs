//! Server configuration from environment variables.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use tracing::warn;

use crate::cache::CacheConfig;
use crate::minetur::{DEFAULT_BASE_URL, MineturConfig};

pub const BIND_ADDR_VAR: &str = "FUEL_BIND_ADDR";
pub const API_BASE_URL_VAR: &str = "FUEL_API_BASE_URL";
pub const API_TIMEOUT_VAR: &str = "FUEL_API_TIMEOUT_SECS";
pub const LISTING_TTL_VAR: &str = "FUEL_LISTING_TTL_SECS";
pub const MOCK_DATA_DIR_VAR: &str = "FUEL_MOCK_DATA_DIR";
pub const STATIC_DIR_VAR: &str = "FUEL_STATIC_DIR";

const DEFAULT_BIND_ADDR: SocketAddr = SocketAddr::new(IpAddr::V4(Ipv4Addr::LOCALHOST), 3000);
const DEFAULT_TIMEOUT_SECS: u64 = 30;
const DEFAULT_LISTING_TTL_SECS: u64 = 60 * 60;
const DEFAULT_STATIC_DIR: &str = "static";

/// Everything `main` needs to start the server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    /// Address to listen on.
    pub bind_addr: SocketAddr,

    /// Fuel price API base URL.
    pub api_base_url: String,

    /// Upstream request timeout in seconds.
    pub api_timeout_secs: u64,

    /// How long province and municipality lists stay cached.
    pub listing_ttl: Duration,

    /// Serve fixtures from this directory instead of calling the API.
    pub mock_data_dir: Option<PathBuf>,

    /// Directory served under `/static`.
    pub static_dir: String,
}

impl ServerConfig {
    /// Read configuration from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read configuration through an arbitrary variable lookup.
    ///
    /// Unset or blank variables take their defaults. Values that fail to
    /// parse are logged and also take their defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let bind_addr = parse_or(BIND_ADDR_VAR, get(BIND_ADDR_VAR), DEFAULT_BIND_ADDR);
        let api_timeout_secs = parse_or(
            API_TIMEOUT_VAR,
            get(API_TIMEOUT_VAR),
            DEFAULT_TIMEOUT_SECS,
        );
        let ttl_secs = parse_or(
            LISTING_TTL_VAR,
            get(LISTING_TTL_VAR),
            DEFAULT_LISTING_TTL_SECS,
        );

        Self {
            bind_addr,
            api_base_url: get(API_BASE_URL_VAR).unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            api_timeout_secs,
            listing_ttl: Duration::from_secs(ttl_secs),
            mock_data_dir: get(MOCK_DATA_DIR_VAR).map(PathBuf::from),
            static_dir: get(STATIC_DIR_VAR).unwrap_or_else(|| DEFAULT_STATIC_DIR.to_string()),
        }
    }

    /// Client settings derived from this configuration.
    pub fn minetur_config(&self) -> MineturConfig {
        MineturConfig::new()
            .with_base_url(&self.api_base_url)
            .with_timeout(self.api_timeout_secs)
    }

    /// Cache settings derived from this configuration.
    pub fn cache_config(&self) -> CacheConfig {
        CacheConfig::default().with_ttl(self.listing_ttl)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self::from_lookup(|_| None)
    }
}

fn parse_or<T: FromStr>(key: &str, value: Option<String>, default: T) -> T {
    let Some(value) = value else {
        return default;
    };
    match value.parse() {
        Ok(parsed) => parsed,
        Err(_) => {
            warn!(key, %value, "ignoring invalid configuration value");
            default
        }
    }
}
