//! Pre-configured connector instruments.
//!
//! Each `register_*` call creates exactly one new instrument (plus the counter
//! backing a meter) under the `source` or `sink` group of the given context.
//! Nothing is cached here: registering the same name twice is up to the host.

use std::sync::Arc;

use crate::error::Result;
use crate::instrument::{LatencyGauge, RateMeter, TimestampGauge, UPDATE_INTERVAL_SECS};
use crate::names::{MetricGroup, MetricNames};
use crate::sink::MetricsSink;

/// Smoothing window of every throughput meter, in seconds.
pub const DEFAULT_WINDOW_SECS: u64 = 60;

#[derive(Debug, Clone)]
pub struct MetricRegistrar {
    names: MetricNames,
    window_secs: u64,
    update_interval_secs: u64,
}

impl MetricRegistrar {
    pub fn new() -> Self {
        Self {
            names: MetricNames::new(),
            window_secs: DEFAULT_WINDOW_SECS,
            update_interval_secs: UPDATE_INTERVAL_SECS,
        }
    }

    pub fn with_names(mut self, names: MetricNames) -> Self {
        self.names = names;
        self
    }

    pub fn with_window(mut self, window_secs: u64) -> Self {
        self.window_secs = window_secs;
        self
    }

    /// Must match how often the host ticks its meters.
    pub fn with_update_interval(mut self, interval_secs: u64) -> Self {
        self.update_interval_secs = interval_secs;
        self
    }

    pub fn names(&self) -> &MetricNames {
        &self.names
    }

    pub fn window_secs(&self) -> u64 {
        self.window_secs
    }

    /// `sink/inTps` over `sink/inTps_counter`.
    pub fn register_sink_in_tps<S: MetricsSink>(&self, ctx: &S) -> Result<Arc<RateMeter>> {
        let sink = ctx.group(MetricGroup::Sink.as_str())?;
        self.meter_over_counter(&sink, self.names.sink_in_tps_counter(), self.names.sink_in_tps())
    }

    /// `sink/outBps` over `sink/outBps_counter`.
    pub fn register_out_bps<S: MetricsSink>(&self, ctx: &S) -> Result<Arc<RateMeter>> {
        let sink = ctx.group(MetricGroup::Sink.as_str())?;
        self.meter_over_counter(&sink, self.names.sink_out_bps_counter(), self.names.sink_out_bps())
    }

    /// `sink/outLatency`.
    pub fn register_out_latency<S: MetricsSink>(&self, ctx: &S) -> Result<Arc<LatencyGauge>> {
        let sink = ctx.group(MetricGroup::Sink.as_str())?;
        let gauge = sink.gauge(self.names.sink_out_latency(), LatencyGauge::new())?;
        tracing::debug!(group = %MetricGroup::Sink, name = %self.names.sink_out_latency(), "latency gauge registered");
        Ok(gauge)
    }

    /// `source/numRecordsInPerSecond` over `source/numRecordsIn`.
    pub fn register_num_records_in_per_second<S: MetricsSink>(&self, ctx: &S) -> Result<Arc<RateMeter>> {
        let source = ctx.group(MetricGroup::Source.as_str())?;
        self.meter_over_counter(&source, self.names.num_records_in(), self.names.num_records_in_rate())
    }

    /// `sink/numRecordsOutPerSecond` over `sink/numRecordsOut`.
    pub fn register_num_records_out_per_second<S: MetricsSink>(&self, ctx: &S) -> Result<Arc<RateMeter>> {
        let sink = ctx.group(MetricGroup::Sink.as_str())?;
        self.meter_over_counter(&sink, self.names.num_records_out(), self.names.num_records_out_rate())
    }

    /// Un-grouped `tps` meter over `tps_counter`, registered on the task
    /// context itself.
    pub fn register_tps<S: MetricsSink>(&self, ctx: &S) -> Result<Arc<RateMeter>> {
        self.meter_over_counter(ctx, self.names.tps_counter(), self.names.tps())
    }

    /// `source/currentFetchEventTimeLag`.
    pub fn register_current_fetch_event_time_lag<S: MetricsSink>(
        &self,
        ctx: &S,
    ) -> Result<Arc<TimestampGauge>> {
        self.timestamp_gauge(ctx, self.names.current_fetch_event_time_lag())
    }

    /// `source/currentEmitEventTimeLag`.
    pub fn register_current_emit_event_time_lag<S: MetricsSink>(
        &self,
        ctx: &S,
    ) -> Result<Arc<TimestampGauge>> {
        self.timestamp_gauge(ctx, self.names.current_emit_event_time_lag())
    }

    fn meter_over_counter<G: MetricsSink>(
        &self,
        group: &G,
        counter_name: &str,
        meter_name: &str,
    ) -> Result<Arc<RateMeter>> {
        let counter = group.counter(counter_name)?;
        let rate = RateMeter::with_update_interval(counter, self.window_secs, self.update_interval_secs);
        let meter = group.meter(meter_name, rate)?;
        tracing::debug!(
            counter = %counter_name,
            meter = %meter_name,
            window_secs = meter.window_secs(),
            "rate meter registered"
        );
        Ok(meter)
    }

    fn timestamp_gauge<S: MetricsSink>(&self, ctx: &S, name: &str) -> Result<Arc<TimestampGauge>> {
        let source = ctx.group(MetricGroup::Source.as_str())?;
        let gauge = source.gauge(name, TimestampGauge::new())?;
        tracing::debug!(group = %MetricGroup::Source, name = %name, "timestamp gauge registered");
        Ok(gauge)
    }
}

impl Default for MetricRegistrar {
    fn default() -> Self {
        Self::new()
    }
}
