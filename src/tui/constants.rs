//! TUI constants and configuration

use ratatui::style::Color;

/// Layout constraints for main UI sections
pub mod layout {
    use ratatui::layout::Constraint;

    pub const TITLE_HEIGHT: u16 = 4;
    pub const FOOTER_HEIGHT: u16 = 3;
    pub const MIN_BODY_HEIGHT: u16 = 10;

    /// Terminals shorter than this hide the log panel
    pub const MIN_HEIGHT_FOR_LOGS: u16 = 30;
    pub const LOG_WINDOW_HEIGHT: u16 = 10;

    pub const STATUS_WIDTH_PCT: u16 = 50;
    pub const CHART_WIDTH_PCT: u16 = 50;

    pub fn main_sections(with_logs: bool) -> Vec<Constraint> {
        let mut sections = vec![
            Constraint::Length(TITLE_HEIGHT),
            Constraint::Min(MIN_BODY_HEIGHT),
        ];
        if with_logs {
            sections.push(Constraint::Length(LOG_WINDOW_HEIGHT));
        }
        sections.push(Constraint::Length(FOOTER_HEIGHT));
        sections
    }

    pub fn body_columns() -> [Constraint; 2] {
        [
            Constraint::Percentage(STATUS_WIDTH_PCT),
            Constraint::Percentage(CHART_WIDTH_PCT),
        ]
    }
}

/// Request-rate chart configuration
pub mod chart {
    /// Samples kept in the window: 60 points at the 4 Hz redraw rate = 15s
    pub const HISTORY_POINTS: usize = 60;

    /// Floor for the Y axis so a quiet meter doesn't render as noise
    pub const MIN_RATE_SCALE: f64 = 1.0;

    pub const X_LABEL_OLDEST: &str = "-15s";
    pub const X_LABEL_MID: &str = "-7s";
    pub const X_LABEL_NOW: &str = "now";

    pub const TITLE: &str = "Request rate (15s)";
}

/// Node status colors, keyed by the UP/DOWN strings the health-check
/// service reports
pub mod status {
    use ratatui::style::Color;

    pub const UP: Color = Color::Green;
    pub const DOWN: Color = Color::Red;
    pub const UNKNOWN: Color = Color::DarkGray;
}

/// Accent color for titles and borders
pub const ACCENT: Color = Color::Cyan;

/// Dim color for labels
pub const LABEL: Color = Color::Gray;
