//! statuswatch - terminal dashboard for a Cassandra health-check service
//!
//! Polls the service's status endpoint (and optionally its metrics
//! endpoint) once per second and renders the results, either as a live
//! ratatui dashboard or as log lines in headless mode.
//!
//! The crate is built around three pieces:
//!
//! - [`Poller`] - runs one refresh round per tick: independent GETs to the
//!   status and metrics endpoints, stale-data-on-failure.
//! - [`ViewModel`] - the shared display state the poller mutates and the
//!   renderers snapshot.
//! - [`Fetch`] - the injected HTTP capability; production code uses
//!   [`HttpFetcher`], tests inject stubs.

pub mod args;
pub mod config;
pub mod fetch;
pub mod formatting;
pub mod logging;
pub mod poller;
pub mod runtime;
pub mod test_macros;
pub mod tui;
pub mod types;
pub mod view;

pub use args::CommonArgs;
pub use config::{
    Config, ConfigSource, EndpointConfig, PollConfig, create_default_config, load_config,
    load_config_with_fallback,
};
pub use fetch::{Fetch, FetchError, HttpFetcher};
pub use poller::Poller;
pub use runtime::RuntimeConfig;
pub use types::{
    ConfigPath, EndpointUrl, MeterName, PollInterval, RequestTimeout, ThreadCount,
    ValidationError,
};
pub use view::{RequestsMeter, ViewModel, ViewSnapshot};

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[test]
    fn test_default_config_wires_into_a_poller() {
        let config = create_default_config();
        let fetcher: Arc<dyn Fetch> =
            Arc::new(HttpFetcher::new(config.poll.timeout_ms).unwrap());

        let poller = Poller::new(
            fetcher,
            config.endpoint,
            config.poll.interval_ms,
            ViewModel::new(),
        );

        // Seeded view state is visible through the poller's handle.
        let snapshot = poller.view().snapshot();
        assert!(snapshot.status.is_none());
        assert_eq!(snapshot.requests.mean_rate, 0.0);
    }
}
