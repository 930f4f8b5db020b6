//! TUI application state and logic

use anyhow::Result;

use super::log_capture::LogRing;
use super::system_stats::{ProcessMonitor, ProcessStats};
use super::types::RateHistory;
use crate::view::{ViewModel, ViewSnapshot};

/// TUI application state
///
/// Holds a handle to the shared view-model plus everything that is purely
/// presentational: the rate history window, captured logs, and process
/// stats. `update()` runs once per redraw tick.
pub struct TuiApp {
    /// View-model handle (shared with the poller)
    view: ViewModel,
    /// Owned snapshot taken on the last update
    snapshot: ViewSnapshot,
    /// Mean-rate samples for the chart
    rates: RateHistory,
    /// Captured log lines for the log panel
    logs: Option<LogRing>,
    /// Process resource monitor
    monitor: ProcessMonitor,
    /// Stats from the last update
    process_stats: ProcessStats,
    /// Whether the log panel covers the whole screen
    log_fullscreen: bool,
    /// Watched endpoint, shown in the title bar
    subject: String,
}

/// Builder for [`TuiApp`]
pub struct TuiAppBuilder {
    view: ViewModel,
    subject: String,
    logs: Option<LogRing>,
}

impl TuiAppBuilder {
    /// Start building an app over the given view-model
    #[must_use]
    pub fn new(view: ViewModel, subject: impl Into<String>) -> Self {
        Self {
            view,
            subject: subject.into(),
            logs: None,
        }
    }

    /// Show captured logs in the log panel
    #[must_use]
    pub fn with_log_ring(mut self, logs: LogRing) -> Self {
        self.logs = Some(logs);
        self
    }

    /// Build the app
    pub fn build(self) -> Result<TuiApp> {
        let snapshot = self.view.snapshot();
        Ok(TuiApp {
            view: self.view,
            snapshot,
            rates: RateHistory::new(),
            logs: self.logs,
            monitor: ProcessMonitor::new()?,
            process_stats: ProcessStats::default(),
            log_fullscreen: false,
            subject: self.subject,
        })
    }
}

impl TuiApp {
    /// Refresh presentation state from the view-model
    pub fn update(&mut self) {
        self.snapshot = self.view.snapshot();
        self.rates.push(self.snapshot.requests.mean_rate);
        self.process_stats = self.monitor.update();
    }

    /// Current view snapshot
    #[must_use]
    pub fn snapshot(&self) -> &ViewSnapshot {
        &self.snapshot
    }

    /// Mean-rate history for the chart
    #[must_use]
    pub fn rates(&self) -> &RateHistory {
        &self.rates
    }

    /// Captured logs, if log capture is enabled
    #[must_use]
    pub fn logs(&self) -> Option<&LogRing> {
        self.logs.as_ref()
    }

    /// Process stats from the last update
    #[must_use]
    pub fn process_stats(&self) -> &ProcessStats {
        &self.process_stats
    }

    /// Endpoint label for the title bar
    #[must_use]
    pub fn subject(&self) -> &str {
        &self.subject
    }

    /// Whether the log panel covers the whole screen
    #[must_use]
    pub fn log_fullscreen(&self) -> bool {
        self.log_fullscreen
    }

    /// Toggle log fullscreen mode
    pub fn toggle_log_fullscreen(&mut self) {
        self.log_fullscreen = !self.log_fullscreen;
    }
}
