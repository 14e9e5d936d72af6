// Store pool configuration module

use serde::{Deserialize, Serialize};

use crate::error::CacheError;

/// What `acquire` does when every lease is out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExhaustedAction {
    /// Wait up to `max_wait_ms` for a lease to come back
    Block,
    /// Fail immediately with `StoreUnavailable`
    Fail,
}

/// Configuration for the process-wide store pool
///
/// Loaded once at process start; there is no hot-reload. The shard list
/// decides the connection mode: a single endpoint uses a multiplexed
/// connection manager, several endpoints use the client's cluster support.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Comma-separated store endpoints, e.g.
    /// "redis://cache-1:6379,redis://cache-2:6379"
    #[serde(default = "default_shard_urls")]
    pub shard_urls: String,

    /// Maximum number of concurrently leased handles (default: 10)
    #[serde(default = "default_max_active")]
    pub max_active: usize,

    /// How long `acquire` may block when the pool is exhausted, in
    /// milliseconds (default: 5000). Only meaningful with `block`.
    #[serde(default = "default_max_wait_ms")]
    pub max_wait_ms: u64,

    /// Behavior when all leases are out (default: block)
    #[serde(default = "default_when_exhausted")]
    pub when_exhausted: ExhaustedAction,

    /// PING the connection before handing out a handle (default: false)
    #[serde(default)]
    pub test_on_acquire: bool,

    /// Initial connect timeout in milliseconds (default: 5000)
    #[serde(default = "default_connection_timeout_ms")]
    pub connection_timeout_ms: u64,

    /// Per-command response timeout in milliseconds (default: 2000)
    #[serde(default = "default_response_timeout_ms")]
    pub response_timeout_ms: u64,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            shard_urls: default_shard_urls(),
            max_active: default_max_active(),
            max_wait_ms: default_max_wait_ms(),
            when_exhausted: default_when_exhausted(),
            test_on_acquire: false,
            connection_timeout_ms: default_connection_timeout_ms(),
            response_timeout_ms: default_response_timeout_ms(),
        }
    }
}

fn default_shard_urls() -> String {
    "redis://127.0.0.1:6379".to_string()
}

fn default_max_active() -> usize {
    10
}

fn default_max_wait_ms() -> u64 {
    5000 // 5 seconds
}

fn default_when_exhausted() -> ExhaustedAction {
    ExhaustedAction::Block
}

fn default_connection_timeout_ms() -> u64 {
    5000 // 5 seconds
}

fn default_response_timeout_ms() -> u64 {
    2000 // 2 seconds
}

impl StoreConfig {
    /// Parse a configuration from a YAML string
    pub fn from_yaml_str(yaml: &str) -> Result<Self, CacheError> {
        let config: StoreConfig = serde_yaml::from_str(yaml)
            .map_err(|e| CacheError::Configuration(format!("invalid YAML: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Load a configuration from a YAML file
    pub fn from_yaml_file(path: &str) -> Result<Self, CacheError> {
        let contents = std::fs::read_to_string(path).map_err(|e| {
            CacheError::Configuration(format!("cannot read config file '{}': {}", path, e))
        })?;
        Self::from_yaml_str(&contents)
    }

    /// The shard endpoints, split out of the comma-separated list
    pub fn shard_list(&self) -> Vec<String> {
        self.shard_urls
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect()
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), CacheError> {
        let shards = self.shard_list();
        if shards.is_empty() {
            return Err(CacheError::Configuration(
                "shard_urls must name at least one endpoint".to_string(),
            ));
        }
        for shard in &shards {
            if !shard.contains("://") {
                return Err(CacheError::Configuration(format!(
                    "shard endpoint '{}' is missing a scheme (expected e.g. redis://host:port)",
                    shard
                )));
            }
        }
        if self.max_active == 0 {
            return Err(CacheError::Configuration(
                "max_active must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}
