//! Configuration module
//!
//! This module handles all configuration types and loading
//! for the status dashboard.

use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::types::{EndpointUrl, MeterName, PollInterval, RequestTimeout};

/// Default meter name extracted from the metrics document
fn default_meter() -> MeterName {
    MeterName::cassandra_requests()
}

/// Default poll period
fn default_interval() -> PollInterval {
    PollInterval::DEFAULT
}

/// Default per-request timeout
fn default_timeout() -> RequestTimeout {
    RequestTimeout::DEFAULT
}

/// Main dashboard configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Config {
    /// Endpoints of the watched health-check service
    pub endpoint: EndpointConfig,
    /// Polling configuration
    #[serde(default)]
    pub poll: PollConfig,
}

/// Endpoints of the watched service
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EndpointConfig {
    /// Status endpoint, fetched every tick
    pub status_url: EndpointUrl,
    /// Metrics endpoint; when present the requests meter is fetched too
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metrics_url: Option<EndpointUrl>,
    /// Meter to extract from the metrics document's `meters` map
    #[serde(default = "default_meter")]
    pub meter: MeterName,
}

/// Polling configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PollConfig {
    /// Fixed period between refresh ticks, in milliseconds
    #[serde(default = "default_interval")]
    pub interval_ms: PollInterval,
    /// Timeout applied to each HTTP request, in milliseconds
    #[serde(default = "default_timeout")]
    pub timeout_ms: RequestTimeout,
}

impl Default for PollConfig {
    fn default() -> Self {
        Self {
            interval_ms: default_interval(),
            timeout_ms: default_timeout(),
        }
    }
}

impl Config {
    /// Validate configuration for correctness
    ///
    /// The newtypes already reject empty URLs, bad schemes, and zero
    /// durations at parse time; this checks the cross-field constraints.
    pub fn validate(&self) -> Result<()> {
        if let Some(metrics_url) = &self.endpoint.metrics_url
            && metrics_url == &self.endpoint.status_url
        {
            return Err(anyhow::anyhow!(
                "endpoint.metrics_url must differ from endpoint.status_url"
            ));
        }

        if self.poll.timeout_ms.get() > 10 * self.poll.interval_ms.get() {
            return Err(anyhow::anyhow!(
                "poll.timeout_ms ({}) is more than 10x poll.interval_ms ({}); \
                 requests would pile up faster than they can resolve",
                self.poll.timeout_ms,
                self.poll.interval_ms
            ));
        }

        Ok(())
    }
}

/// Where the effective configuration came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    /// Loaded from a TOML file at the given path
    File(String),
    /// Built-in defaults (no config file found)
    BuiltinDefault,
}

impl ConfigSource {
    /// Human-readable description for startup logging
    #[must_use]
    pub fn description(&self) -> String {
        match self {
            Self::File(path) => format!("config file '{path}'"),
            Self::BuiltinDefault => "built-in defaults".to_string(),
        }
    }
}

/// Load endpoint overrides from environment variables
///
/// Supports container deployments that cannot ship a config file:
/// - `STATUSWATCH_STATUS_URL` - status endpoint
/// - `STATUSWATCH_METRICS_URL` - metrics endpoint
/// - `STATUSWATCH_METER` - meter name
///
/// Invalid values are rejected rather than silently ignored.
fn apply_env_overrides(config: &mut Config) -> Result<()> {
    if let Ok(url) = std::env::var("STATUSWATCH_STATUS_URL") {
        tracing::info!("Using status endpoint from STATUSWATCH_STATUS_URL");
        config.endpoint.status_url = EndpointUrl::new(url)
            .map_err(|e| anyhow::anyhow!("Invalid STATUSWATCH_STATUS_URL: {}", e))?;
    }

    if let Ok(url) = std::env::var("STATUSWATCH_METRICS_URL") {
        tracing::info!("Using metrics endpoint from STATUSWATCH_METRICS_URL");
        config.endpoint.metrics_url = Some(
            EndpointUrl::new(url)
                .map_err(|e| anyhow::anyhow!("Invalid STATUSWATCH_METRICS_URL: {}", e))?,
        );
    }

    if let Ok(meter) = std::env::var("STATUSWATCH_METER") {
        config.endpoint.meter =
            MeterName::new(meter).map_err(|e| anyhow::anyhow!("Invalid STATUSWATCH_METER: {}", e))?;
    }

    Ok(())
}

/// Load configuration from a TOML file, with environment variable overrides
///
/// Environment variables take precedence over the config file so container
/// deployments can repoint the dashboard without editing the file.
pub fn load_config(config_path: &str) -> Result<Config> {
    let config_content = std::fs::read_to_string(config_path)
        .map_err(|e| anyhow::anyhow!("Failed to read config file '{}': {}", config_path, e))?;

    let mut config: Config = toml::from_str(&config_content)
        .map_err(|e| anyhow::anyhow!("Failed to parse config file '{}': {}", config_path, e))?;

    apply_env_overrides(&mut config)?;
    config.validate()?;

    Ok(config)
}

/// Load configuration, falling back to built-in defaults when the file is
/// missing
///
/// A missing file is not an error (first run, container without a mounted
/// config); an unreadable or invalid file still is.
pub fn load_config_with_fallback(config_path: &str) -> Result<(Config, ConfigSource)> {
    if std::path::Path::new(config_path).exists() {
        let config = load_config(config_path)?;
        Ok((config, ConfigSource::File(config_path.to_string())))
    } else {
        let mut config = create_default_config();
        apply_env_overrides(&mut config)?;
        config.validate()?;
        Ok((config, ConfigSource::BuiltinDefault))
    }
}

/// Create a default configuration for examples/testing
#[must_use]
pub fn create_default_config() -> Config {
    Config {
        endpoint: EndpointConfig {
            status_url: EndpointUrl::new("http://localhost:8080/api/status")
                .expect("default status URL is valid"),
            metrics_url: Some(
                EndpointUrl::new("http://localhost:8080/metrics")
                    .expect("default metrics URL is valid"),
            ),
            meter: default_meter(),
        },
        poll: PollConfig::default(),
    }
}
