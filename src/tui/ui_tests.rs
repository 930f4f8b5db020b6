//! Tests for TUI rendering

use ratatui::{Terminal, backend::TestBackend};
use serde_json::json;

use super::app::TuiAppBuilder;
use super::constants::layout;
use super::log_capture::LogRing;
use super::ui::render_ui;
use crate::view::ViewModel;

fn test_app(view: ViewModel) -> super::app::TuiApp {
    TuiAppBuilder::new(view, "http://localhost:8080/api/status")
        .with_log_ring(LogRing::new())
        .build()
        .unwrap()
}

#[test]
fn test_layout_fits_minimum_terminal() {
    // Without logs the fixed sections plus margins must fit 24 lines.
    let total = layout::TITLE_HEIGHT + layout::MIN_BODY_HEIGHT + layout::FOOTER_HEIGHT + 2;
    assert!(total <= 24, "Should fit in a 24-line terminal");
}

#[test]
fn test_log_panel_threshold_above_fixed_sections() {
    let fixed = layout::TITLE_HEIGHT
        + layout::MIN_BODY_HEIGHT
        + layout::LOG_WINDOW_HEIGHT
        + layout::FOOTER_HEIGHT
        + 2;
    assert!(layout::MIN_HEIGHT_FOR_LOGS >= fixed);
}

#[test]
fn test_render_before_first_data() {
    let mut app = test_app(ViewModel::new());
    app.update();

    let backend = TestBackend::new(80, 24);
    let mut terminal = Terminal::new(backend).unwrap();
    terminal.draw(|f| render_ui(f, &app)).unwrap();

    let rendered = terminal.backend().to_string();
    assert!(rendered.contains("statuswatch"));
    assert!(rendered.contains("awaiting first data"));
    assert!(rendered.contains("Mean rate"));
}

#[test]
fn test_render_health_status_document() {
    let view = ViewModel::new();
    view.set_status(json!({
        "overall": "UP",
        "query": "SELECT * FROM health.check",
        "nodes": {"10.0.0.1": "UP", "10.0.0.2": "DOWN"}
    }));
    view.set_requests(serde_json::from_value(json!({"mean_rate": 42.0})).unwrap());

    let mut app = test_app(view);
    app.update();

    let backend = TestBackend::new(100, 30);
    let mut terminal = Terminal::new(backend).unwrap();
    terminal.draw(|f| render_ui(f, &app)).unwrap();

    let rendered = terminal.backend().to_string();
    assert!(rendered.contains("Overall"));
    assert!(rendered.contains("10.0.0.1"));
    assert!(rendered.contains("10.0.0.2"));
    assert!(rendered.contains("42.0/s"));
}

#[test]
fn test_render_opaque_document_falls_back_to_json() {
    let view = ViewModel::new();
    view.set_status(json!({"version": "1.0"}));

    let mut app = test_app(view);
    app.update();

    let backend = TestBackend::new(80, 24);
    let mut terminal = Terminal::new(backend).unwrap();
    terminal.draw(|f| render_ui(f, &app)).unwrap();

    let rendered = terminal.backend().to_string();
    assert!(rendered.contains("version"));
}

#[test]
fn test_render_log_fullscreen() {
    let ring = LogRing::new();
    ring.push("a log line".to_string());

    let view = ViewModel::new();
    let mut app = TuiAppBuilder::new(view, "test")
        .with_log_ring(ring)
        .build()
        .unwrap();
    app.update();
    app.toggle_log_fullscreen();

    let backend = TestBackend::new(80, 24);
    let mut terminal = Terminal::new(backend).unwrap();
    terminal.draw(|f| render_ui(f, &app)).unwrap();

    let rendered = terminal.backend().to_string();
    assert!(rendered.contains("a log line"));
}

#[test]
fn test_small_terminal_hides_logs() {
    let mut app = test_app(ViewModel::new());
    app.update();

    // 24 lines is below MIN_HEIGHT_FOR_LOGS; rendering must not panic.
    let backend = TestBackend::new(80, 24);
    let mut terminal = Terminal::new(backend).unwrap();
    terminal.draw(|f| render_ui(f, &app)).unwrap();

    let rendered = terminal.backend().to_string();
    assert!(!rendered.contains("Logs"));
}
