//! Terminal user interface for the status dashboard
//!
//! Renders the view-model at 4 Hz in an alternate screen until the user
//! quits or an external shutdown signal arrives.

mod app;
mod constants;
mod helpers;
pub mod log_capture;
mod system_stats;
mod types;
mod ui;
#[cfg(test)]
mod ui_tests;

pub use app::{TuiApp, TuiAppBuilder};
pub use log_capture::{LogRing, MakeLogRingWriter};
pub use ui::render_ui;

use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io;
use std::time::Duration;
use tokio::sync::mpsc;

/// Redraw period: 4 frames per second keeps the 1 Hz data fresh without
/// burning CPU on idle frames
const REDRAW_PERIOD: Duration = Duration::from_millis(250);

/// Setup the terminal for TUI rendering
fn setup_terminal() -> Result<Terminal<CrosstermBackend<io::Stdout>>> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;
    Ok(terminal)
}

/// Restore the terminal to its original state
fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> Result<()> {
    // Clear first so escape sequences don't leak into the shell
    terminal.clear()?;

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    Ok(())
}

/// Run the TUI event loop
///
/// Takes ownership of the terminal and runs until the user quits or an
/// external shutdown signal arrives. When the TUI exits it signals
/// shutdown through the provided channel so the poller stops too.
pub async fn run_tui(
    mut app: TuiApp,
    shutdown_tx: mpsc::Sender<()>,
    mut shutdown_rx: mpsc::Receiver<()>,
) -> Result<()> {
    let mut terminal = setup_terminal()?;

    // Panic hook so a panic mid-frame still restores the terminal
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        original_hook(panic_info);
    }));

    let result = run_app(&mut terminal, &mut app, &mut shutdown_rx).await;

    restore_terminal(&mut terminal)?;

    let _ = shutdown_tx.send(()).await;

    result
}

/// Main TUI event loop
async fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    app: &mut TuiApp,
    shutdown_rx: &mut mpsc::Receiver<()>,
) -> Result<()> {
    let mut redraw = tokio::time::interval(REDRAW_PERIOD);

    loop {
        terminal.draw(|f| render_ui(f, app))?;

        tokio::select! {
            _ = shutdown_rx.recv() => {
                break;
            }
            _ = redraw.tick() => {
                app.update();

                // Non-blocking keyboard poll
                if event::poll(Duration::from_millis(0))?
                    && let Event::Key(key) = event::read()?
                    && key.kind == KeyEventKind::Press
                {
                    match key.code {
                        KeyCode::Char('q') | KeyCode::Esc => {
                            break;
                        }
                        KeyCode::Char('c')
                            if key.modifiers.contains(event::KeyModifiers::CONTROL) =>
                        {
                            break;
                        }
                        KeyCode::Char('l') => {
                            app.toggle_log_fullscreen();
                        }
                        _ => {}
                    }
                }
            }
        }
    }

    Ok(())
}
