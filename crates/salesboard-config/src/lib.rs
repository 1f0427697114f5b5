//! Configuration management for salesboard
//!
//! Settings are read from an optional YAML file and then overridden by
//! environment variables (`PORT`, `DB_URI`, `SEED_URL`, `LOG_LEVEL`).

pub mod error;

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub use error::{ConfigError, ConfigErrorCode, ConfigResult};

// ==================== Configuration Types ====================

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Server host address
    #[serde(default = "default_host")]
    pub host: String,
    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,
    /// Allow cross-origin requests from any origin
    #[serde(default = "default_true")]
    pub cors_permissive: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            cors_permissive: true,
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_true() -> bool {
    true
}

/// Record store configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    /// `memory://` or `file://<path>`; a bare path is treated as `file://`
    #[serde(default = "default_store_uri")]
    pub uri: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self { uri: default_store_uri() }
    }
}

fn default_store_uri() -> String {
    "memory://".to_string()
}

/// Where the record store keeps its data
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreLocation {
    /// Process memory only
    Memory,
    /// Process memory backed by a JSON snapshot file
    Snapshot(PathBuf),
}

impl std::str::FromStr for StoreLocation {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err("store uri is empty".to_string());
        }
        match s.split_once("://") {
            Some(("memory", "")) => Ok(StoreLocation::Memory),
            Some(("memory", rest)) => Err(format!("memory store takes no path, got '{}'", rest)),
            Some(("file", "")) => Err("file store needs a path".to_string()),
            Some(("file", path)) => Ok(StoreLocation::Snapshot(PathBuf::from(path))),
            Some((scheme, _)) => Err(format!("unsupported store scheme '{}'", scheme)),
            None => Ok(StoreLocation::Snapshot(PathBuf::from(s))),
        }
    }
}

impl std::fmt::Display for StoreLocation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StoreLocation::Memory => write!(f, "memory://"),
            StoreLocation::Snapshot(path) => write!(f, "file://{}", path.display()),
        }
    }
}

/// Seed source configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeedConfig {
    /// URL of the JSON array of sale records
    #[serde(default = "default_source_url")]
    pub source_url: String,
    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// Seed once before the server starts listening
    #[serde(default)]
    pub on_startup: bool,
}

impl Default for SeedConfig {
    fn default() -> Self {
        Self {
            source_url: default_source_url(),
            timeout_secs: default_timeout_secs(),
            on_startup: false,
        }
    }
}

fn default_source_url() -> String {
    "https://s3.amazonaws.com/roxiler.com/product_transaction.json".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

/// Pagination settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaginationConfig {
    /// Records per page when `perPage` is absent or invalid
    #[serde(default = "default_per_page")]
    pub default_per_page: usize,
    /// Upper bound applied to `perPage`
    #[serde(default = "default_max_per_page")]
    pub max_per_page: usize,
}

impl Default for PaginationConfig {
    fn default() -> Self {
        Self {
            default_per_page: default_per_page(),
            max_per_page: default_max_per_page(),
        }
    }
}

fn default_per_page() -> usize {
    10
}

fn default_max_per_page() -> usize {
    100
}

/// Query defaults
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueryConfig {
    /// Month used when a request does not name one
    #[serde(default = "default_month")]
    pub default_month: String,
}

impl Default for QueryConfig {
    fn default() -> Self {
        Self { default_month: default_month() }
    }
}

fn default_month() -> String {
    "March".to_string()
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level: trace, debug, info, warn, error
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self { level: default_log_level() }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub store: StoreConfig,
    #[serde(default)]
    pub seed: SeedConfig,
    #[serde(default)]
    pub pagination: PaginationConfig,
    #[serde(default)]
    pub query: QueryConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load the file if present, fall back to defaults, then apply environment overrides
    pub fn load_with_env(path: &Path, required: bool) -> ConfigResult<Self> {
        let mut config = if path.exists() || required {
            let content = std::fs::read_to_string(path).map_err(|e| match e.kind() {
                std::io::ErrorKind::NotFound => ConfigError::FileNotFound {
                    path: path.to_string_lossy().to_string(),
                },
                _ => ConfigError::IoError(e),
            })?;
            Self::from_yaml(&content)?
        } else {
            log::info!("Config file {} not found, using defaults", path.display());
            Config::default()
        };

        config.apply_env(|name| std::env::var(name).ok())?;
        config.validate()?;
        Ok(config)
    }

    /// Parse YAML content without validating it
    pub fn from_yaml(content: &str) -> ConfigResult<Self> {
        serde_yaml::from_str(content).map_err(|e| ConfigError::InvalidYaml {
            message: e.to_string(),
        })
    }

    /// Apply environment overrides using the given lookup
    pub fn apply_env<F>(&mut self, lookup: F) -> ConfigResult<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(port) = lookup("PORT") {
            self.server.port = port.trim().parse().map_err(|_| ConfigError::InvalidEnv {
                var: "PORT".to_string(),
                reason: format!("'{}' is not a port number", port),
            })?;
        }
        if let Some(uri) = lookup("DB_URI") {
            self.store.uri = uri;
        }
        if let Some(url) = lookup("SEED_URL") {
            self.seed.source_url = url;
        }
        if let Some(level) = lookup("LOG_LEVEL") {
            self.logging.level = level;
        }
        Ok(())
    }

    /// Validate configuration values
    pub fn validate(&self) -> ConfigResult<()> {
        if self.server.port == 0 {
            return Err(ConfigError::InvalidValue {
                field: "server.port".to_string(),
                reason: "Port must be greater than 0".to_string(),
            });
        }

        if let Err(reason) = self.store_location() {
            return Err(ConfigError::InvalidValue {
                field: "store.uri".to_string(),
                reason,
            });
        }

        if self.seed.source_url.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "seed.source_url".to_string(),
                reason: "Seed source URL must not be empty".to_string(),
            });
        }

        if self.seed.timeout_secs == 0 {
            return Err(ConfigError::InvalidValue {
                field: "seed.timeout_secs".to_string(),
                reason: "Timeout must be greater than 0".to_string(),
            });
        }

        if self.pagination.default_per_page == 0
            || self.pagination.default_per_page > self.pagination.max_per_page
        {
            return Err(ConfigError::InvalidValue {
                field: "pagination.default_per_page".to_string(),
                reason: format!(
                    "Default page size must be between 1 and max_per_page ({})",
                    self.pagination.max_per_page
                ),
            });
        }

        Ok(())
    }

    /// Parsed store location
    pub fn store_location(&self) -> Result<StoreLocation, String> {
        self.store.uri.parse()
    }

    /// Socket address string the server binds to
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }

    /// Commented default configuration, printed by `--print-default-config`
    pub fn generate_default() -> &'static str {
        include_str!("../templates/default_config.yaml")
    }
}

// ==================== Tests ====================

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.pagination.default_per_page, 10);
        assert_eq!(config.query.default_month, "March");
        assert_eq!(config.store_location(), Ok(StoreLocation::Memory));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_yaml_keeps_defaults() {
        let config = Config::from_yaml("server:\n  port: 8080\nseed:\n  on_startup: true\n").unwrap();
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.server.host, "0.0.0.0");
        assert!(config.seed.on_startup);
        assert_eq!(config.seed.timeout_secs, 30);
    }

    #[test]
    fn test_invalid_yaml() {
        let err = Config::from_yaml("server: [").unwrap_err();
        assert_eq!(err.code(), ConfigErrorCode::InvalidYaml);
    }

    #[test]
    fn test_env_overrides() {
        let env: HashMap<&str, &str> = [
            ("PORT", "4000"),
            ("DB_URI", "file:///tmp/sales.json"),
            ("SEED_URL", "http://localhost/seed.json"),
        ]
        .into_iter()
        .collect();

        let mut config = Config::default();
        config.apply_env(|name| env.get(name).map(|v| v.to_string())).unwrap();

        assert_eq!(config.server.port, 4000);
        assert_eq!(
            config.store_location(),
            Ok(StoreLocation::Snapshot(PathBuf::from("/tmp/sales.json")))
        );
        assert_eq!(config.seed.source_url, "http://localhost/seed.json");
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_env_bad_port() {
        let mut config = Config::default();
        let err = config
            .apply_env(|name| (name == "PORT").then(|| "eighty".to_string()))
            .unwrap_err();
        assert_eq!(err.code(), ConfigErrorCode::InvalidEnv);
        assert_eq!(err.to_details().field.as_deref(), Some("PORT"));
    }

    #[test]
    fn test_store_location_parsing() {
        assert_eq!("memory://".parse::<StoreLocation>(), Ok(StoreLocation::Memory));
        assert_eq!(
            "./data/sales.json".parse::<StoreLocation>(),
            Ok(StoreLocation::Snapshot(PathBuf::from("./data/sales.json")))
        );
        assert!("mongodb://localhost/sales".parse::<StoreLocation>().is_err());
        assert!("file://".parse::<StoreLocation>().is_err());
        assert!("".parse::<StoreLocation>().is_err());
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let mut config = Config::default();
        config.pagination.default_per_page = 500;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.store.uri = "redis://cache".to_string();
        let details = config.validate().unwrap_err().to_details();
        assert_eq!(details.code, ConfigErrorCode::InvalidValue);
        assert_eq!(details.field.as_deref(), Some("store.uri"));
    }

    #[test]
    fn test_default_template_parses() {
        let config = Config::from_yaml(Config::generate_default()).unwrap();
        assert!(config.validate().is_ok());
        assert_eq!(config.query.default_month, "March");
    }

    #[test]
    fn test_missing_file() {
        let err = Config::load_with_env(Path::new("/nonexistent/salesboard.yaml"), true).unwrap_err();
        assert_eq!(err.code(), ConfigErrorCode::FileNotFound);
        assert!(!err.to_details().suggestions.is_empty());
    }
}
