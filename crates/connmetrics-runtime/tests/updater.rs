#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use std::sync::Arc;
use std::time::Duration;

use connmetrics_core::MetricRegistrar;
use connmetrics_runtime::registry::{spawn_view_updater, MetricRegistry};

#[tokio::test(start_paused = true)]
async fn updater_fills_window() {
    let reg = Arc::new(MetricRegistry::new('.'));
    let ctx = reg.task_scope("src", 0).unwrap();
    let meter = MetricRegistrar::new().register_num_records_in_per_second(&ctx).unwrap();

    let handle = spawn_view_updater(Arc::clone(&reg), Duration::from_secs(5)).unwrap();
    meter.mark_events(600);

    tokio::time::sleep(Duration::from_millis(4_500)).await;
    assert_eq!(meter.rate(), 0.0);

    // Ticks at 5s..60s: twelve snapshots, oldest slot still the initial zero.
    tokio::time::sleep(Duration::from_millis(56_000)).await;
    assert!((meter.rate() - 10.0).abs() < 1e-9);

    // One more tick drops the zero snapshot.
    tokio::time::sleep(Duration::from_secs(5)).await;
    assert_eq!(meter.rate(), 0.0);

    handle.abort();
}

#[tokio::test]
async fn zero_interval_is_rejected() {
    let reg = Arc::new(MetricRegistry::new('.'));
    let err = spawn_view_updater(reg, Duration::ZERO).expect_err("must fail");
    assert_eq!(err.code().as_str(), "BAD_CONFIG");
}
