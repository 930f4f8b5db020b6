//! Poller behavior under scripted endpoints
//!
//! Covers the dashboard's observable contract: seeded defaults, wholesale
//! replacement on success, stale-data-on-failure, and tick-per-second
//! scheduling with no skips. The clock is tokio's paused test clock, so
//! every tick is driven explicitly.


use serde_json::json;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;

use statuswatch::config::EndpointConfig;
use statuswatch::types::{EndpointUrl, MeterName, PollInterval};
use statuswatch::{Poller, ViewModel};
use test_helpers::StubFetch;

const STATUS_URL: &str = "http://stub/api/status";
const METRICS_URL: &str = "http://stub/metrics";

fn stub_endpoints() -> EndpointConfig {
    EndpointConfig {
        status_url: EndpointUrl::new(STATUS_URL).unwrap(),
        metrics_url: Some(EndpointUrl::new(METRICS_URL).unwrap()),
        meter: MeterName::cassandra_requests(),
    }
}

fn stub_poller(stub: &Arc<StubFetch>, view: ViewModel) -> Arc<Poller> {
    Arc::new(Poller::new(
        Arc::clone(stub) as Arc<dyn statuswatch::Fetch>,
        stub_endpoints(),
        PollInterval::DEFAULT,
        view,
    ))
}

/// Let spawned refresh tasks run to completion without advancing time
async fn settle() {
    for _ in 0..8 {
        tokio::task::yield_now().await;
    }
}

/// Before any response arrives, the seeded meter reads zero
#[tokio::test]
async fn scenario_a_default_meter_before_first_response() {
    let stub = Arc::new(StubFetch::new());
    let poller = stub_poller(&stub, ViewModel::new());

    let snapshot = poller.view().snapshot();
    assert_eq!(snapshot.requests.mean_rate, 0.0);
    assert!(snapshot.status.is_none());
    assert_eq!(stub.calls(), 0);
}

/// After one tick the status document is stored verbatim
#[tokio::test]
async fn scenario_b_status_stored_after_one_tick() {
    let stub = Arc::new(StubFetch::new());
    stub.respond(STATUS_URL, json!({"version": "1.0"}));
    stub.respond(METRICS_URL, json!({"meters": {}}));

    let poller = stub_poller(&stub, ViewModel::new());
    poller.refresh().await;

    let snapshot = poller.view().snapshot();
    assert_eq!(snapshot.status.as_ref().unwrap()["version"], "1.0");
}

/// After one tick the requests field equals the configured meter's record
#[tokio::test]
async fn scenario_c_meter_extracted_after_one_tick() {
    let meter = json!({"mean_rate": 42.0, "count": 9000});
    let stub = Arc::new(StubFetch::new());
    stub.respond(STATUS_URL, json!({}));
    stub.respond(
        METRICS_URL,
        json!({"meters": {"cassandra-requests": meter.clone()}}),
    );

    let poller = stub_poller(&stub, ViewModel::new());
    poller.refresh().await;

    let snapshot = poller.view().snapshot();
    assert_eq!(snapshot.requests.mean_rate, 42.0);
    // The stored record equals the wire meter entry exactly.
    assert_eq!(serde_json::to_value(&snapshot.requests).unwrap(), meter);
}

/// A failed tick leaves the default in place; the next success lands
#[tokio::test(start_paused = true)]
async fn scenario_d_failure_then_success() {
    let stub = Arc::new(StubFetch::new());
    stub.enqueue_err(STATUS_URL);
    stub.enqueue_ok(STATUS_URL, json!({"version": "2.0"}));
    stub.fail(METRICS_URL);

    let view = ViewModel::new();
    let poller = stub_poller(&stub, view.clone());

    let (shutdown_tx, shutdown_rx) = mpsc::channel(1);
    let handle = tokio::spawn(Arc::clone(&poller).run(shutdown_rx));

    // Tick 1 (cold start): status fetch fails, field stays unset.
    settle().await;
    assert_eq!(stub.calls_for(STATUS_URL), 1);
    assert!(view.snapshot().status.is_none());

    // Tick 2: the success replaces the field.
    tokio::time::advance(Duration::from_millis(1000)).await;
    settle().await;
    assert_eq!(stub.calls_for(STATUS_URL), 2);
    assert_eq!(view.snapshot().status, Some(json!({"version": "2.0"})));

    shutdown_tx.send(()).await.unwrap();
    handle.await.unwrap();
}

/// Five advanced ticks produce exactly six refresh rounds (cold start + 5),
/// with no round skipped despite every fetch failing
#[tokio::test(start_paused = true)]
async fn scenario_e_tick_count_is_exact() {
    let stub = Arc::new(StubFetch::new());
    stub.fail(STATUS_URL);
    stub.fail(METRICS_URL);

    let view = ViewModel::new();
    let poller = stub_poller(&stub, view.clone());

    let (shutdown_tx, shutdown_rx) = mpsc::channel(1);
    let handle = tokio::spawn(Arc::clone(&poller).run(shutdown_rx));

    settle().await;
    for _ in 0..5 {
        tokio::time::advance(Duration::from_millis(1000)).await;
        settle().await;
    }

    assert_eq!(stub.calls_for(STATUS_URL), 6);
    assert_eq!(stub.calls_for(METRICS_URL), 6);
    assert_eq!(view.snapshot().refreshes, 6);

    shutdown_tx.send(()).await.unwrap();
    handle.await.unwrap();
}

/// A nested document is stored by deep equality, not a transformed copy
#[tokio::test]
async fn property_status_deep_equality() {
    let document = json!({
        "query": "SELECT * FROM health.check",
        "overall": "UP",
        "nodes": {"10.0.0.1": "UP", "10.0.0.2": "DOWN"},
        "lastExecuted": 1422222222000u64
    });

    let stub = Arc::new(StubFetch::new());
    stub.respond(STATUS_URL, document.clone());
    stub.respond(METRICS_URL, json!({"meters": {}}));

    let poller = stub_poller(&stub, ViewModel::new());
    poller.refresh().await;

    assert_eq!(poller.view().snapshot().status, Some(document));
}

/// Both fields keep their last good values across any mix of failures
#[tokio::test]
async fn property_stale_data_on_failure() {
    let stub = Arc::new(StubFetch::new());
    stub.respond(STATUS_URL, json!({"version": "1.0"}));
    stub.respond(
        METRICS_URL,
        json!({"meters": {"cassandra-requests": {"mean_rate": 7.0}}}),
    );

    let poller = stub_poller(&stub, ViewModel::new());
    poller.refresh().await;
    let before = poller.view().snapshot();

    // Status fails while metrics keeps succeeding, then the reverse.
    stub.fail(STATUS_URL);
    poller.refresh().await;
    stub.respond(STATUS_URL, json!({"version": "1.0"}));
    stub.fail(METRICS_URL);
    poller.refresh().await;

    let after = poller.view().snapshot();
    assert_eq!(after.status, before.status);
    assert_eq!(after.requests, before.requests);
    assert_eq!(after.failures, 2);
}

/// The status and metrics fetches are independent: one succeeding never
/// depends on the other
#[tokio::test]
async fn property_fetches_are_independent() {
    let stub = Arc::new(StubFetch::new());
    stub.fail(STATUS_URL);
    stub.respond(
        METRICS_URL,
        json!({"meters": {"cassandra-requests": {"mean_rate": 3.5}}}),
    );

    let poller = stub_poller(&stub, ViewModel::new());
    poller.refresh().await;

    let snapshot = poller.view().snapshot();
    assert!(snapshot.status.is_none());
    assert_eq!(snapshot.requests.mean_rate, 3.5);
}
