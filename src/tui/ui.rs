//! TUI rendering and layout

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    symbols,
    text::{Line, Span},
    widgets::{Axis, Block, Borders, Chart, Dataset, GraphType, List, ListItem, Paragraph},
};

use super::app::TuiApp;
use super::constants::{ACCENT, LABEL, chart, layout, status};
use super::helpers::{chart_y_bounds, state_color, status_fallback_lines, status_overview};
use crate::formatting::{format_age, format_bytes, format_rate};

/// Render the main UI
pub fn render_ui(f: &mut Frame, app: &TuiApp) {
    if app.log_fullscreen() {
        render_logs(f, f.area(), app);
        return;
    }

    let show_logs = app.logs().is_some() && f.area().height >= layout::MIN_HEIGHT_FOR_LOGS;

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints(layout::main_sections(show_logs))
        .split(f.area());

    render_title(f, chunks[0], app);

    let body = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(layout::body_columns())
        .split(chunks[1]);

    render_status(f, body[0], app);
    render_requests(f, body[1], app);

    if show_logs {
        render_logs(f, chunks[2], app);
        render_footer(f, chunks[3]);
    } else {
        render_footer(f, chunks[2]);
    }
}

/// Render the title bar
fn render_title(f: &mut Frame, area: Rect, app: &TuiApp) {
    let snapshot = app.snapshot();
    let stats = app.process_stats();

    let title = Paragraph::new(vec![
        Line::from(vec![
            Span::styled(
                "statuswatch ",
                Style::default().fg(ACCENT).add_modifier(Modifier::BOLD),
            ),
            Span::styled(format!("- {}", app.subject()), Style::default()),
        ]),
        Line::from(vec![
            Span::styled("Uptime: ", Style::default().fg(LABEL)),
            Span::styled(
                snapshot.format_uptime(),
                Style::default().fg(status::UP).add_modifier(Modifier::BOLD),
            ),
            Span::styled("  |  Refreshes: ", Style::default().fg(LABEL)),
            Span::styled(format!("{}", snapshot.refreshes), Style::default().fg(ACCENT)),
            Span::styled("  |  Failures: ", Style::default().fg(LABEL)),
            Span::styled(
                format!("{}", snapshot.failures),
                Style::default().fg(if snapshot.failures > 0 {
                    status::DOWN
                } else {
                    LABEL
                }),
            ),
            Span::styled("  |  CPU: ", Style::default().fg(LABEL)),
            Span::styled(format!("{:.1}%", stats.cpu_usage), Style::default()),
            Span::styled("  |  Mem: ", Style::default().fg(LABEL)),
            Span::styled(format_bytes(stats.memory_bytes), Style::default()),
        ]),
    ])
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(ACCENT)),
    )
    .alignment(Alignment::Center);

    f.render_widget(title, area);
}

/// Render the status document panel
fn render_status(f: &mut Frame, area: Rect, app: &TuiApp) {
    let snapshot = app.snapshot();

    let lines: Vec<Line> = match &snapshot.status {
        None => vec![Line::from(Span::styled(
            "awaiting first data",
            Style::default().fg(status::UNKNOWN),
        ))],
        Some(document) => match status_overview(document) {
            Some(overview) => {
                let mut lines = vec![Line::from(vec![
                    Span::styled("Overall: ", Style::default().fg(LABEL)),
                    Span::styled(
                        overview.overall.clone(),
                        Style::default()
                            .fg(state_color(&overview.overall))
                            .add_modifier(Modifier::BOLD),
                    ),
                ])];

                if let Some(query) = &overview.query {
                    lines.push(Line::from(vec![
                        Span::styled("Query:   ", Style::default().fg(LABEL)),
                        Span::styled(query.clone(), Style::default()),
                    ]));
                }

                lines.push(Line::from(""));
                for (host, state) in &overview.nodes {
                    lines.push(Line::from(vec![
                        Span::styled("● ", Style::default().fg(state_color(state))),
                        Span::styled(host.clone(), Style::default().add_modifier(Modifier::BOLD)),
                        Span::styled(format!("  {}", state), Style::default().fg(state_color(state))),
                    ]));
                }
                lines
            }
            None => {
                // Opaque document: show it as-is.
                let max_lines = area.height.saturating_sub(2) as usize;
                status_fallback_lines(document, max_lines)
                    .into_iter()
                    .map(Line::from)
                    .collect()
            }
        },
    };

    let panel = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .title(format!("Status ({})", format_age(snapshot.status_age)))
            .border_style(Style::default()),
    );

    f.render_widget(panel, area);
}

/// Render the requests meter panel: current rate plus rate history chart
fn render_requests(f: &mut Frame, area: Rect, app: &TuiApp) {
    let snapshot = app.snapshot();

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(5)])
        .split(area);

    let meter = Paragraph::new(Line::from(vec![
        Span::styled("Mean rate: ", Style::default().fg(LABEL)),
        Span::styled(
            format_rate(snapshot.requests.mean_rate),
            Style::default().fg(ACCENT).add_modifier(Modifier::BOLD),
        ),
    ]))
    .block(
        Block::default()
            .borders(Borders::ALL)
            .title(format!("Requests ({})", format_age(snapshot.requests_age))),
    );
    f.render_widget(meter, rows[0]);

    let points = app.rates().points();
    let y_bounds = chart_y_bounds(app.rates());

    let dataset = Dataset::default()
        .marker(symbols::Marker::Braille)
        .graph_type(GraphType::Line)
        .style(Style::default().fg(ACCENT))
        .data(&points);

    let rate_chart = Chart::new(vec![dataset])
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(chart::TITLE)
                .border_style(Style::default()),
        )
        .x_axis(
            Axis::default()
                .style(Style::default().fg(LABEL))
                .bounds([0.0, chart::HISTORY_POINTS as f64])
                .labels([
                    chart::X_LABEL_OLDEST.to_string(),
                    chart::X_LABEL_MID.to_string(),
                    chart::X_LABEL_NOW.to_string(),
                ]),
        )
        .y_axis(
            Axis::default()
                .style(Style::default().fg(LABEL))
                .bounds(y_bounds)
                .labels(["0".to_string(), format_rate(y_bounds[1])]),
        );

    f.render_widget(rate_chart, rows[1]);
}

/// Render the captured-log panel
fn render_logs(f: &mut Frame, area: Rect, app: &TuiApp) {
    let Some(logs) = app.logs() else {
        return;
    };

    let visible = area.height.saturating_sub(2) as usize;
    let items: Vec<ListItem> = logs
        .tail(visible)
        .into_iter()
        .map(|line| ListItem::new(Line::from(line)))
        .collect();

    let list = List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .title("Logs ('l' toggles fullscreen)")
            .border_style(Style::default().fg(LABEL)),
    );

    f.render_widget(list, area);
}

/// Render footer with help text
fn render_footer(f: &mut Frame, area: Rect) {
    let footer = Paragraph::new(Line::from(vec![
        Span::styled("Press ", Style::default().fg(LABEL)),
        Span::styled(
            "q",
            Style::default().fg(ACCENT).add_modifier(Modifier::BOLD),
        ),
        Span::styled(" or ", Style::default().fg(LABEL)),
        Span::styled(
            "Esc",
            Style::default().fg(ACCENT).add_modifier(Modifier::BOLD),
        ),
        Span::styled(" to exit  |  ", Style::default().fg(LABEL)),
        Span::styled(
            "l",
            Style::default().fg(ACCENT).add_modifier(Modifier::BOLD),
        ),
        Span::styled(" to toggle logs", Style::default().fg(LABEL)),
    ]))
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(LABEL)),
    )
    .alignment(Alignment::Center);

    f.render_widget(footer, area);
}
