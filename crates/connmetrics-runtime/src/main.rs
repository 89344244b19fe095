//! connmetrics demo host
//!
//! Loads `connmetrics.yaml` (or the path given as the first argument),
//! registers the connector instruments on one task, and drives them from a
//! simulated source/sink loop until Ctrl-C. A snapshot of every metric is
//! logged once per meter update interval.

use std::time::{Duration, SystemTime, UNIX_EPOCH};

use tracing_subscriber::{fmt, EnvFilter};

use connmetrics_core::error::{MetricsError, Result};
use connmetrics_runtime::app_state::{AppState, ConnectorMetrics};
use connmetrics_runtime::{config, registry};

#[tokio::main]
async fn main() -> Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();

    let path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "connmetrics.yaml".to_string());
    let cfg = config::load_from_file(&path)?;

    let state = AppState::new(cfg)?;
    let metrics = state.register_connector_metrics()?;
    let updater = registry::spawn_view_updater(state.registry(), state.update_interval())?;

    tracing::info!(
        config = %path,
        task = %state.task().task_name(),
        window_secs = state.cfg().meters.window_secs,
        "connmetrics-demo starting"
    );

    let mut work = tokio::time::interval(Duration::from_secs(1));
    let mut report = tokio::time::interval(state.update_interval());
    let mut tick: u64 = 0;
    let shutdown = tokio::signal::ctrl_c();
    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            _ = work.tick() => {
                tick += 1;
                simulate_batch(&metrics, tick);
            }
            _ = report.tick() => {
                let snapshot = serde_json::to_string(&state.registry().snapshot())
                    .map_err(|e| MetricsError::Internal(format!("snapshot encode failed: {e}")))?;
                tracing::info!(%snapshot, "metrics");
            }
            _ = &mut shutdown => {
                tracing::info!("shutdown requested");
                break;
            }
        }
    }

    updater.abort();
    Ok(())
}

/// One fetch/emit round of a fake connector.
fn simulate_batch(m: &ConnectorMetrics, tick: u64) {
    // Every seventh batch comes back empty.
    let records = if tick % 7 == 0 { 0 } else { (tick * 37) % 200 + 1 };
    let bytes = records * 512;
    let now_ms = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as i64)
        .unwrap_or_default();
    let event_ms = now_ms - (tick % 5) as i64 * 250;

    m.num_records_in_per_second.mark_events(records);
    m.tps.mark_events(records);
    m.fetch_event_time_lag.report(now_ms - event_ms);

    m.sink_in_tps.mark_events(records);
    m.num_records_out_per_second.mark_events(records);
    m.out_bps.mark_events(bytes);
    m.out_latency.report((records as i64) * 3 + 20, records as i64);
    m.emit_event_time_lag.report(now_ms - event_ms + 5);

    tracing::trace!(tick, records, bytes, "batch processed");
}
