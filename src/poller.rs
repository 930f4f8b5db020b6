//! Periodic refresh of the view-model
//!
//! One refresh round issues a GET to the status endpoint and, when a
//! metrics endpoint is configured, an independent GET to it. The rounds are
//! driven by a fixed-period timer: one cold-start round immediately, then
//! one per tick. There is no backoff and no in-flight guard; a slow round
//! may overlap the next tick, and whichever response lands last wins its
//! field.

use serde_json::Value;
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::mpsc;
use tokio::task::JoinSet;
use tracing::{debug, info};

use crate::config::EndpointConfig;
use crate::fetch::Fetch;
use crate::types::{EndpointUrl, MeterName, PollInterval};
use crate::view::{RequestsMeter, ViewModel};

/// Why a metrics document yielded no meter
///
/// All of these are absorbed the same way as transport failures; they only
/// differ in the log line.
#[derive(Debug, Error)]
enum MeterError {
    #[error("metrics document has no `meters` object")]
    MissingMeters,

    #[error("no meter named `{0}` in metrics document")]
    UnknownMeter(String),

    #[error("meter `{0}` is not a meter object: {1}")]
    BadShape(String, #[source] serde_json::Error),
}

/// Extract the configured meter record from a metrics document
fn extract_meter(document: &Value, name: &MeterName) -> Result<RequestsMeter, MeterError> {
    let meters = document
        .get("meters")
        .filter(|m| m.is_object())
        .ok_or(MeterError::MissingMeters)?;

    let meter = meters
        .get(name.as_str())
        .ok_or_else(|| MeterError::UnknownMeter(name.to_string()))?;

    serde_json::from_value(meter.clone())
        .map_err(|e| MeterError::BadShape(name.to_string(), e))
}

/// Drives periodic refreshes of a [`ViewModel`]
///
/// Constructed with every capability it needs passed in explicitly: the
/// fetcher, the endpoints, the period, and the view-model it mutates.
pub struct Poller {
    fetcher: Arc<dyn Fetch>,
    endpoints: EndpointConfig,
    interval: PollInterval,
    view: ViewModel,
}

impl Poller {
    /// Create a poller
    pub fn new(
        fetcher: Arc<dyn Fetch>,
        endpoints: EndpointConfig,
        interval: PollInterval,
        view: ViewModel,
    ) -> Self {
        Self {
            fetcher,
            endpoints,
            interval,
            view,
        }
    }

    /// The view-model this poller mutates
    #[must_use]
    pub fn view(&self) -> &ViewModel {
        &self.view
    }

    /// Run one refresh round
    ///
    /// The status and metrics fetches are independent and unordered; there
    /// is no joint atomicity. Failures are absorbed: the affected field
    /// keeps its previous value and the next tick is the implicit retry.
    pub async fn refresh(&self) {
        self.view.record_refresh();

        match self.endpoints.metrics_url.clone() {
            Some(metrics_url) => {
                tokio::join!(
                    self.refresh_status(),
                    self.refresh_requests(&metrics_url)
                );
            }
            None => self.refresh_status().await,
        }
    }

    async fn refresh_status(&self) {
        match self.fetcher.get_json(&self.endpoints.status_url).await {
            Ok(document) => {
                debug!("status refreshed from {}", self.endpoints.status_url);
                self.view.set_status(document);
            }
            Err(e) => {
                debug!("status fetch failed, keeping previous value: {}", e);
                self.view.record_failure();
            }
        }
    }

    async fn refresh_requests(&self, metrics_url: &EndpointUrl) {
        let document = match self.fetcher.get_json(metrics_url).await {
            Ok(document) => document,
            Err(e) => {
                debug!("metrics fetch failed, keeping previous meter: {}", e);
                self.view.record_failure();
                return;
            }
        };

        match extract_meter(&document, &self.endpoints.meter) {
            Ok(meter) => {
                debug!(
                    "meter `{}` refreshed, mean_rate {:.2}",
                    self.endpoints.meter, meter.mean_rate
                );
                self.view.set_requests(meter);
            }
            Err(e) => {
                debug!("metrics fetch unusable, keeping previous meter: {}", e);
                self.view.record_failure();
            }
        }
    }

    /// Run the polling loop until the shutdown channel yields
    ///
    /// Refreshes once immediately, then once per period. Each round runs as
    /// its own task so a slow round never delays the timer. On shutdown the
    /// loop aborts whatever is still in flight instead of letting late
    /// responses land after teardown.
    pub async fn run(self: Arc<Self>, mut shutdown_rx: mpsc::Receiver<()>) {
        info!(
            "Polling {} every {}",
            self.endpoints.status_url, self.interval
        );
        if let Some(metrics_url) = &self.endpoints.metrics_url {
            info!(
                "Watching meter `{}` at {}",
                self.endpoints.meter, metrics_url
            );
        }

        let mut ticker = tokio::time::interval(self.interval.as_duration());
        let mut in_flight: JoinSet<()> = JoinSet::new();

        loop {
            tokio::select! {
                _ = shutdown_rx.recv() => break,
                _ = ticker.tick() => {
                    let poller = Arc::clone(&self);
                    in_flight.spawn(async move { poller.refresh().await });

                    // Reap whatever already finished; completed rounds need
                    // no bookkeeping beyond what refresh() recorded.
                    while in_flight.try_join_next().is_some() {}
                }
            }
        }

        in_flight.shutdown().await;
        debug!("poller stopped");
    }
}
