//! TUI rendering helper functions
//!
//! The status document is opaque by contract, so interpretation is
//! best-effort: when it looks like the health-check service's `HealthStatus`
//! shape it is rendered as a node table, otherwise it is shown as JSON.

use ratatui::style::Color;
use serde_json::Value;

use super::constants::{chart, status};
use super::types::RateHistory;

/// Structured reading of a health-check status document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusOverview {
    /// Overall cluster state, `UP` or `DOWN`
    pub overall: String,
    /// The health-check query the service runs, when reported
    pub query: Option<String>,
    /// Per-node states, sorted by node address
    pub nodes: Vec<(String, String)>,
}

/// Try to read a status document as a `HealthStatus`
///
/// Returns None when the document does not carry an `overall` field; the
/// caller falls back to raw JSON rendering.
#[must_use]
pub fn status_overview(document: &Value) -> Option<StatusOverview> {
    let overall = document.get("overall")?.as_str()?.to_string();

    let query = document
        .get("query")
        .and_then(Value::as_str)
        .map(str::to_string);

    let mut nodes: Vec<(String, String)> = document
        .get("nodes")
        .and_then(Value::as_object)
        .map(|nodes| {
            nodes
                .iter()
                .map(|(host, state)| {
                    let state = state.as_str().unwrap_or("UNKNOWN").to_string();
                    (host.clone(), state)
                })
                .collect()
        })
        .unwrap_or_default();
    nodes.sort();

    Some(StatusOverview {
        overall,
        query,
        nodes,
    })
}

/// Render an arbitrary JSON document as indented lines, truncated for the
/// panel
#[must_use]
pub fn status_fallback_lines(document: &Value, max_lines: usize) -> Vec<String> {
    let pretty = serde_json::to_string_pretty(document)
        .unwrap_or_else(|_| document.to_string());

    let mut lines: Vec<String> = pretty.lines().take(max_lines).map(str::to_string).collect();
    if pretty.lines().count() > max_lines {
        lines.push("…".to_string());
    }
    lines
}

/// Color for a node or overall state string
#[must_use]
pub fn state_color(state: &str) -> Color {
    match state {
        "UP" => status::UP,
        "DOWN" => status::DOWN,
        _ => status::UNKNOWN,
    }
}

/// Y-axis bounds for the request-rate chart
///
/// Headroom above the window maximum keeps the line off the frame; the
/// floor keeps an idle meter from rendering as full-scale noise.
#[must_use]
pub fn chart_y_bounds(history: &RateHistory) -> [f64; 2] {
    let max = (history.max_rate() * 1.2).max(chart::MIN_RATE_SCALE);
    [0.0, max]
}
