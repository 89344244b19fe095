//! Periodic meter ticking.

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

use connmetrics_core::error::{MetricsError, Result};

use super::MetricRegistry;

/// Spawn a task that calls [`MetricRegistry::update_views`] every `every`.
///
/// The first tick fires one full interval after spawning. Abort the returned
/// handle to stop. A zero interval is rejected with `BadConfig`.
pub fn spawn_view_updater(registry: Arc<MetricRegistry>, every: Duration) -> Result<JoinHandle<()>> {
    if every.is_zero() {
        return Err(MetricsError::BadConfig("view update interval must be non-zero".into()));
    }

    Ok(tokio::spawn(async move {
        let mut ticker = tokio::time::interval_at(tokio::time::Instant::now() + every, every);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        loop {
            ticker.tick().await;
            registry.update_views();
        }
    }))
}
