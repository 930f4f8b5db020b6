//! Command-line argument parsing
//!
//! CLI flags override the config file, which in turn can be overridden by
//! `STATUSWATCH_*` environment variables at load time; the precedence is
//! file < environment < CLI.

use clap::Parser;

use crate::config::Config;
use crate::types::{ConfigPath, EndpointUrl, PollInterval, RequestTimeout, ThreadCount};

/// Parse an endpoint URL from a command line argument
fn parse_url(s: &str) -> Result<EndpointUrl, String> {
    EndpointUrl::new(s).map_err(|e| format!("Invalid URL: {}", e))
}

/// Parse a non-zero millisecond interval from a command line argument
fn parse_interval(s: &str) -> Result<PollInterval, String> {
    let millis: u64 = s
        .parse()
        .map_err(|e| format!("Invalid interval: {}", e))?;
    PollInterval::new(millis).ok_or_else(|| "Interval cannot be 0 ms".to_string())
}

/// Parse a non-zero millisecond timeout from a command line argument
fn parse_timeout(s: &str) -> Result<RequestTimeout, String> {
    let millis: u64 = s.parse().map_err(|e| format!("Invalid timeout: {}", e))?;
    RequestTimeout::new(millis).ok_or_else(|| "Timeout cannot be 0 ms".to_string())
}

/// Common command-line arguments for the statuswatch binary
#[derive(Parser, Debug, Clone)]
pub struct CommonArgs {
    /// Status endpoint URL (overrides config file)
    #[arg(short = 's', long, env, value_parser = parse_url)]
    pub status_url: Option<EndpointUrl>,

    /// Metrics endpoint URL (overrides config file)
    #[arg(short = 'm', long, env, value_parser = parse_url)]
    pub metrics_url: Option<EndpointUrl>,

    /// Poll only the status endpoint, even if a metrics endpoint is configured
    #[arg(long, default_value = "false")]
    pub status_only: bool,

    /// Poll period in milliseconds (overrides config file)
    #[arg(short = 'i', long, env, value_parser = parse_interval)]
    pub interval_ms: Option<PollInterval>,

    /// Per-request timeout in milliseconds (overrides config file)
    #[arg(long, env, value_parser = parse_timeout)]
    pub timeout_ms: Option<RequestTimeout>,

    /// Configuration file path
    #[arg(short, long, default_value = "statuswatch.toml", env)]
    pub config: ConfigPath,

    /// Number of worker threads (default: 1, use 0 for CPU cores)
    #[arg(short, long, env)]
    pub threads: Option<ThreadCount>,
}

impl CommonArgs {
    /// Apply CLI overrides on top of a loaded configuration
    pub fn apply_to(&self, config: &mut Config) {
        if let Some(status_url) = &self.status_url {
            config.endpoint.status_url = status_url.clone();
        }
        if let Some(metrics_url) = &self.metrics_url {
            config.endpoint.metrics_url = Some(metrics_url.clone());
        }
        if self.status_only {
            config.endpoint.metrics_url = None;
        }
        if let Some(interval) = self.interval_ms {
            config.poll.interval_ms = interval;
        }
        if let Some(timeout) = self.timeout_ms {
            config.poll.timeout_ms = timeout;
        }
    }
}
