//! Centralized logging setup with dual output (stdout or TUI buffer + debug.log)

use tracing_subscriber::Layer;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use crate::tui::{LogRing, MakeLogRingWriter};

fn env_filter() -> tracing_subscriber::EnvFilter {
    tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"))
}

/// Initialize logging for headless mode: stdout + debug.log
///
/// Both outputs use the log level from the RUST_LOG environment variable,
/// defaulting to "info".
///
/// The guard is forgotten to keep the file appender alive for the program
/// lifetime.
pub fn init_headless_logging() {
    let file_appender = tracing_appender::rolling::never(".", "debug.log");
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stdout)
                .with_filter(env_filter()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(non_blocking)
                .with_ansi(false)
                .with_filter(env_filter()),
        )
        .init();

    std::mem::forget(guard);
}

/// Initialize logging for TUI mode: in-memory ring + debug.log
///
/// Stdout belongs to the dashboard in TUI mode, so log lines go to the
/// returned ring for the log panel instead. Both outputs respect RUST_LOG.
pub fn init_tui_logging() -> LogRing {
    let file_appender = tracing_appender::rolling::never(".", "debug.log");
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let ring = LogRing::new();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(MakeLogRingWriter::new(ring.clone()))
                .with_ansi(false)
                .with_target(false)
                .compact()
                .with_filter(env_filter()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(non_blocking)
                .with_ansi(false)
                .with_filter(env_filter()),
        )
        .init();

    std::mem::forget(guard);
    ring
}
