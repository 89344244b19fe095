//! Shared application state for the reference host.
//!
//! Builds the registry, the task context, and a registrar configured to match
//! the registry's tick rate. Startup errors are returned, not panicked.

use std::sync::Arc;
use std::time::Duration;

use connmetrics_core::error::Result;
use connmetrics_core::{LatencyGauge, MetricRegistrar, RateMeter, TimestampGauge};

use crate::config::RuntimeConfig;
use crate::context::{TaskContext, TaskMeta};
use crate::registry::MetricRegistry;

#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    cfg: RuntimeConfig,
    registry: Arc<MetricRegistry>,
    task: TaskContext,
    registrar: MetricRegistrar,
}

/// Every instrument a connector task registers.
#[derive(Debug, Clone)]
pub struct ConnectorMetrics {
    pub tps: Arc<RateMeter>,
    pub sink_in_tps: Arc<RateMeter>,
    pub out_bps: Arc<RateMeter>,
    pub out_latency: Arc<LatencyGauge>,
    pub num_records_in_per_second: Arc<RateMeter>,
    pub num_records_out_per_second: Arc<RateMeter>,
    pub fetch_event_time_lag: Arc<TimestampGauge>,
    pub emit_event_time_lag: Arc<TimestampGauge>,
}

impl AppState {
    pub fn new(cfg: RuntimeConfig) -> Result<Self> {
        let registry = Arc::new(MetricRegistry::new(cfg.registry.scope_delimiter));
        let task = TaskContext::new(
            &registry,
            TaskMeta {
                task_name: cfg.task.name.clone(),
                subtask_index: cfg.task.subtask_index,
            },
        )?;
        let registrar = MetricRegistrar::new()
            .with_window(cfg.meters.window_secs)
            .with_update_interval(cfg.registry.update_interval_secs);

        Ok(Self {
            inner: Arc::new(AppStateInner {
                cfg,
                registry,
                task,
                registrar,
            }),
        })
    }

    pub fn cfg(&self) -> &RuntimeConfig {
        &self.inner.cfg
    }

    pub fn registry(&self) -> Arc<MetricRegistry> {
        Arc::clone(&self.inner.registry)
    }

    pub fn task(&self) -> &TaskContext {
        &self.inner.task
    }

    pub fn registrar(&self) -> &MetricRegistrar {
        &self.inner.registrar
    }

    pub fn update_interval(&self) -> Duration {
        Duration::from_secs(self.inner.cfg.registry.update_interval_secs)
    }

    /// Register the full connector instrument set on this task.
    pub fn register_connector_metrics(&self) -> Result<ConnectorMetrics> {
        let r = &self.inner.registrar;
        let ctx = self.inner.task.metric_group();

        let metrics = ConnectorMetrics {
            tps: r.register_tps(ctx)?,
            sink_in_tps: r.register_sink_in_tps(ctx)?,
            out_bps: r.register_out_bps(ctx)?,
            out_latency: r.register_out_latency(ctx)?,
            num_records_in_per_second: r.register_num_records_in_per_second(ctx)?,
            num_records_out_per_second: r.register_num_records_out_per_second(ctx)?,
            fetch_event_time_lag: r.register_current_fetch_event_time_lag(ctx)?,
            emit_event_time_lag: r.register_current_emit_event_time_lag(ctx)?,
        };

        tracing::info!(
            task = %self.inner.task.task_name(),
            subtask = self.inner.task.subtask_index(),
            registered = self.inner.registry.len(),
            "connector metrics registered"
        );
        Ok(metrics)
    }
}
