
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::error::DelivreError;
use crate::locale::Language;
use crate::order::DestinationList;

/// Top-level Delivre configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub delivre: DelivreConfig,
    #[serde(default)]
    pub order: OrderConfig,
    #[serde(default)]
    pub store: StoreConfig,
    #[serde(default)]
    pub menu: MenuConfig,
    #[serde(default)]
    pub api: ApiConfig,
}

/// General site settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DelivreConfig {
    /// Brand shown in order messages.
    #[serde(default = "default_brand")]
    pub brand: String,
    #[serde(default = "default_log_level")]
    pub log_level: String,
    /// Language used when a request names none (or an unsupported one).
    #[serde(default)]
    pub default_language: Language,
}

impl Default for DelivreConfig {
    fn default() -> Self {
        Self {
            brand: default_brand(),
            log_level: default_log_level(),
            default_language: Language::default(),
        }
    }
}

/// WhatsApp order hand-off.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderConfig {
    #[serde(default = "default_order_host")]
    pub host: String,
    /// Ordered phone numbers; only the first is used in links.
    #[serde(default = "default_destinations")]
    pub destinations: Vec<String>,
    #[serde(default = "default_currency")]
    pub currency: String,
}

impl Default for OrderConfig {
    fn default() -> Self {
        Self {
            host: default_order_host(),
            destinations: default_destinations(),
            currency: default_currency(),
        }
    }
}

/// SQLite store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    #[serde(default = "default_db_path")]
    pub db_path: String,
    #[serde(default = "default_session_ttl_hours")]
    pub session_ttl_hours: i64,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            db_path: default_db_path(),
            session_ttl_hours: default_session_ttl_hours(),
        }
    }
}

/// Public menu behavior.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MenuConfig {
    /// Show unavailable dishes (with ordering disabled) instead of hiding them.
    #[serde(default)]
    pub include_unavailable: bool,
}

/// HTTP API server.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_api_host")]
    pub host: String,
    #[serde(default = "default_api_port")]
    pub port: u16,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: default_api_host(),
            port: default_api_port(),
        }
    }
}

// --- Default value functions ---

fn default_brand() -> String {
    "3omda Delivre".to_string()
}
fn default_log_level() -> String {
    "info".to_string()
}
fn default_order_host() -> String {
    "wa.me".to_string()
}
fn default_destinations() -> Vec<String> {
    vec!["+213658592303".into(), "+213658160260".into()]
}
fn default_currency() -> String {
    "DA".to_string()
}
fn default_db_path() -> String {
    "~/.delivre/data/delivre.db".to_string()
}
fn default_session_ttl_hours() -> i64 {
    168
}
fn default_api_host() -> String {
    "127.0.0.1".to_string()
}
fn default_api_port() -> u16 {
    3000
}

/// Expand `~` to home directory.
pub fn shellexpand(path: &str) -> String {
    if let Some(rest) = path.strip_prefix("~/") {
        if let Some(home) = std::env::var_os("HOME") {
            return format!("{}/{rest}", home.to_string_lossy());
        }
    }
    path.to_string()
}

impl Config {
    /// Reject settings that would only fail later, at order time.
    pub fn validate(&self) -> Result<(), DelivreError> {
        DestinationList::new(self.order.destinations.as_slice())?;
        if self.order.host.trim().is_empty() {
            return Err(DelivreError::Config("order.host is empty".to_string()));
        }
        if self.store.session_ttl_hours <= 0 {
            return Err(DelivreError::Config(
                "store.session_ttl_hours must be positive".to_string(),
            ));
        }
        Ok(())
    }
}

/// Where a loaded configuration came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    /// Read from this file.
    File(PathBuf),
    /// No file at this path; built-in defaults are in use.
    Defaults(PathBuf),
}

impl ConfigSource {
    /// Report the source through the current subscriber.
    pub fn log(&self) {
        match self {
            Self::File(path) => debug!("Loaded config from {}", path.display()),
            Self::Defaults(path) => info!(
                "Config file not found at {}, using defaults",
                path.display()
            ),
        }
    }
}

/// Load configuration without logging, also returning where it came from.
///
/// Lets the caller set up logging from the loaded config before reporting.
pub fn load_with_source(path: &str) -> Result<(Config, ConfigSource), DelivreError> {
    let path = Path::new(path);
    if !path.exists() {
        return Ok((Config::default(), ConfigSource::Defaults(path.to_path_buf())));
    }

    let content = std::fs::read_to_string(path)
        .map_err(|e| DelivreError::Config(format!("failed to read {}: {}", path.display(), e)))?;

    let config: Config = toml::from_str(&content)
        .map_err(|e| DelivreError::Config(format!("failed to parse config: {}", e)))?;

    config.validate()?;
    Ok((config, ConfigSource::File(path.to_path_buf())))
}

/// Load configuration from a TOML file, falling back to defaults when the
/// file does not exist.
pub fn load(path: &str) -> Result<Config, DelivreError> {
    let (config, source) = load_with_source(path)?;
    source.log();
    Ok(config)
}
