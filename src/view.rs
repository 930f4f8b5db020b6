//! View-model state shared between the poller and the renderers
//!
//! The poller owns the only writers; renderers take owned [`ViewSnapshot`]s
//! whenever they redraw. Both fields follow the stale-data-on-failure
//! policy: a failed fetch never clears what is already displayed.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};
use std::time::{Duration, Instant};

/// The `cassandra-requests` meter extracted from the metrics document
///
/// Only `mean_rate` is required; every other field the metrics servlet
/// emits (`count`, `m1_rate`, ...) is carried through `extra` so the stored
/// record stays equal to the wire document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RequestsMeter {
    /// Mean request rate in events per second
    #[serde(default)]
    pub mean_rate: f64,
    /// Remaining meter fields, passed through verbatim
    #[serde(flatten)]
    pub extra: serde_json::Map<String, Value>,
}

impl Default for RequestsMeter {
    /// The seed record shown before the first successful metrics fetch
    fn default() -> Self {
        Self {
            mean_rate: 0.0,
            extra: serde_json::Map::new(),
        }
    }
}

/// Mutable view state behind the shared handle
#[derive(Debug)]
struct ViewState {
    status: Option<Value>,
    requests: RequestsMeter,
    started_at: Instant,
    status_updated_at: Option<Instant>,
    requests_updated_at: Option<Instant>,
    refreshes: u64,
    failures: u64,
}

/// Clone-able handle to the dashboard's view-model
///
/// Mirrors the collector/snapshot split used for metrics display: writers
/// mutate through the handle, renderers read owned snapshots.
#[derive(Debug, Clone)]
pub struct ViewModel {
    inner: Arc<RwLock<ViewState>>,
}

impl ViewModel {
    /// Create a view-model with no status document and the seeded
    /// `{mean_rate: 0}` requests record
    #[must_use]
    pub fn new() -> Self {
        Self {
            inner: Arc::new(RwLock::new(ViewState {
                status: None,
                requests: RequestsMeter::default(),
                started_at: Instant::now(),
                status_updated_at: None,
                requests_updated_at: None,
                refreshes: 0,
                failures: 0,
            })),
        }
    }

    fn read(&self) -> RwLockReadGuard<'_, ViewState> {
        self.inner.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, ViewState> {
        self.inner.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Replace the status document wholesale
    pub fn set_status(&self, document: Value) {
        let mut state = self.write();
        state.status = Some(document);
        state.status_updated_at = Some(Instant::now());
    }

    /// Replace the requests meter wholesale
    pub fn set_requests(&self, meter: RequestsMeter) {
        let mut state = self.write();
        state.requests = meter;
        state.requests_updated_at = Some(Instant::now());
    }

    /// Count one refresh round (a timer tick or the cold-start call)
    pub fn record_refresh(&self) {
        self.write().refreshes += 1;
    }

    /// Count one absorbed fetch failure
    pub fn record_failure(&self) {
        self.write().failures += 1;
    }

    /// Take an owned snapshot for rendering
    #[must_use]
    pub fn snapshot(&self) -> ViewSnapshot {
        let state = self.read();
        let now = Instant::now();
        ViewSnapshot {
            status: state.status.clone(),
            requests: state.requests.clone(),
            uptime: now.duration_since(state.started_at),
            status_age: state.status_updated_at.map(|t| now.duration_since(t)),
            requests_age: state.requests_updated_at.map(|t| now.duration_since(t)),
            refreshes: state.refreshes,
            failures: state.failures,
        }
    }
}

impl Default for ViewModel {
    fn default() -> Self {
        Self::new()
    }
}

/// Owned copy of the view-model for one redraw
#[derive(Debug, Clone, PartialEq)]
pub struct ViewSnapshot {
    /// Last successfully fetched status document, if any
    pub status: Option<Value>,
    /// Last successfully fetched requests meter (seeded before first fetch)
    pub requests: RequestsMeter,
    /// Time since the view-model was constructed
    pub uptime: Duration,
    /// Time since the status document was last replaced
    pub status_age: Option<Duration>,
    /// Time since the requests meter was last replaced
    pub requests_age: Option<Duration>,
    /// Refresh rounds started so far
    pub refreshes: u64,
    /// Fetch failures absorbed so far
    pub failures: u64,
}

impl ViewSnapshot {
    /// Format uptime for the title bar
    #[must_use]
    pub fn format_uptime(&self) -> String {
        crate::formatting::format_duration(self.uptime)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_seeded_meter_has_zero_mean_rate() {
        let view = ViewModel::new();
        let snapshot = view.snapshot();

        assert!(snapshot.status.is_none());
        assert_eq!(snapshot.requests.mean_rate, 0.0);
        assert_eq!(snapshot.requests, RequestsMeter::default());
    }

    #[test]
    fn test_set_status_stores_document_verbatim() {
        let view = ViewModel::new();
        let document = json!({"overall": "UP", "nodes": {"10.0.0.1": "UP"}});

        view.set_status(document.clone());

        assert_eq!(view.snapshot().status, Some(document));
    }

    #[test]
    fn test_set_requests_replaces_meter() {
        let view = ViewModel::new();
        let meter: RequestsMeter =
            serde_json::from_value(json!({"mean_rate": 42.5, "count": 1200})).unwrap();

        view.set_requests(meter.clone());

        let snapshot = view.snapshot();
        assert_eq!(snapshot.requests.mean_rate, 42.5);
        assert_eq!(snapshot.requests, meter);
    }

    #[test]
    fn test_meter_round_trips_wire_document() {
        let wire = json!({
            "count": 3100,
            "m1_rate": 40.1,
            "m5_rate": 41.0,
            "m15_rate": 41.8,
            "mean_rate": 42.0,
            "units": "events/second"
        });

        let meter: RequestsMeter = serde_json::from_value(wire.clone()).unwrap();
        assert_eq!(meter.mean_rate, 42.0);
        assert_eq!(serde_json::to_value(&meter).unwrap(), wire);
    }

    #[test]
    fn test_meter_without_mean_rate_defaults_to_zero() {
        let meter: RequestsMeter = serde_json::from_value(json!({"count": 7})).unwrap();
        assert_eq!(meter.mean_rate, 0.0);
    }

    #[test]
    fn test_counters() {
        let view = ViewModel::new();
        view.record_refresh();
        view.record_refresh();
        view.record_failure();

        let snapshot = view.snapshot();
        assert_eq!(snapshot.refreshes, 2);
        assert_eq!(snapshot.failures, 1);
    }

    #[test]
    fn test_cloned_handles_share_state() {
        let view = ViewModel::new();
        let other = view.clone();

        other.set_status(json!({"version": "1.0"}));

        assert_eq!(view.snapshot().status, Some(json!({"version": "1.0"})));
    }
}
