use anyhow::Result;
use clap::Parser;
use std::sync::Arc;
use tokio::signal;
use tokio::sync::mpsc;
use tracing::info;

use statuswatch::formatting::format_rate;
use statuswatch::types::PollInterval;
use statuswatch::{
    CommonArgs, HttpFetcher, Poller, RuntimeConfig, ViewModel, load_config_with_fallback, logging,
    tui,
};

#[derive(Parser, Debug)]
#[command(author, version, about = "Terminal dashboard for a Cassandra health-check service", long_about = None)]
struct Args {
    #[command(flatten)]
    common: CommonArgs,

    /// Disable the TUI and log each refresh to stdout instead
    #[arg(long, default_value = "false")]
    headless: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    // In TUI mode stdout belongs to the dashboard, so logs go to the
    // in-memory ring (plus debug.log in both modes).
    let log_ring = if args.headless {
        logging::init_headless_logging();
        None
    } else {
        Some(logging::init_tui_logging())
    };

    let runtime_config = RuntimeConfig::from_args(args.common.threads);
    let rt = runtime_config.build_runtime()?;

    rt.block_on(run(args, log_ring))
}

async fn run(args: Args, log_ring: Option<tui::LogRing>) -> Result<()> {
    let (mut config, source) = load_config_with_fallback(args.common.config.as_str())?;
    args.common.apply_to(&mut config);
    config.validate()?;

    info!("Loaded configuration from {}", source.description());

    let fetcher = Arc::new(HttpFetcher::new(config.poll.timeout_ms)?);
    let view = ViewModel::new();
    let subject = config.endpoint.status_url.to_string();
    let interval = config.poll.interval_ms;

    let poller = Arc::new(Poller::new(
        fetcher,
        config.endpoint,
        interval,
        view.clone(),
    ));

    let (poller_shutdown_tx, poller_shutdown_rx) = mpsc::channel::<()>(1);
    let poller_handle = tokio::spawn(Arc::clone(&poller).run(poller_shutdown_rx));

    if args.headless {
        run_headless(view, interval).await?;
    } else {
        // Ctrl+C tells the TUI to exit; the TUI signals back when it has
        // restored the terminal.
        let (tui_exited_tx, _tui_exited_rx) = mpsc::channel::<()>(1);
        let (tui_shutdown_tx, tui_shutdown_rx) = mpsc::channel::<()>(1);

        tokio::spawn(async move {
            if signal::ctrl_c().await.is_ok() {
                let _ = tui_shutdown_tx.send(()).await;
            }
        });

        let mut builder = tui::TuiAppBuilder::new(view, subject);
        if let Some(ring) = log_ring {
            builder = builder.with_log_ring(ring);
        }

        tui::run_tui(builder.build()?, tui_exited_tx, tui_shutdown_rx).await?;
    }

    // Stop the polling loop; in-flight fetches are aborted, not drained.
    let _ = poller_shutdown_tx.send(()).await;
    poller_handle.await?;

    info!("statuswatch stopped");
    Ok(())
}

/// Headless renderer: one log line per poll period, reading the same
/// view-model fields the TUI panels read
async fn run_headless(view: ViewModel, interval: PollInterval) -> Result<()> {
    let mut report = tokio::time::interval(interval.as_duration());

    loop {
        tokio::select! {
            _ = signal::ctrl_c() => break,
            _ = report.tick() => {
                let snapshot = view.snapshot();
                let overall = snapshot
                    .status
                    .as_ref()
                    .and_then(|document| document.get("overall"))
                    .and_then(|value| value.as_str())
                    .unwrap_or("n/a");

                if snapshot.status.is_none() && snapshot.refreshes == 0 {
                    info!("awaiting first data");
                } else {
                    info!(
                        "overall {}  |  mean_rate {}  |  refreshes {}  failures {}",
                        overall,
                        format_rate(snapshot.requests.mean_rate),
                        snapshot.refreshes,
                        snapshot.failures
                    );
                }
            }
        }
    }

    Ok(())
}
