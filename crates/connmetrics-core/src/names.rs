//! Metric names and groups.
//!
//! The string constants are a stable identifier contract: dashboards and
//! alerting rules are built against these exact values. Code that registers
//! instruments goes through [`MetricNames`] so tests can inject and inspect
//! the naming without touching globals.

pub const METRICS_TPS: &str = "tps";
/// FLIP-33 standard connector metric.
pub const CURRENT_FETCH_EVENT_TIME_LAG: &str = "currentFetchEventTimeLag";
/// FLIP-33 standard connector metric.
pub const CURRENT_EMIT_EVENT_TIME_LAG: &str = "currentEmitEventTimeLag";

pub const METRICS_SINK_IN_TPS: &str = "inTps";
pub const METRICS_SINK_OUT_BPS: &str = "outBps";
pub const METRICS_SINK_OUT_LATENCY: &str = "outLatency";

pub const IO_NUM_RECORDS_IN: &str = "numRecordsIn";
pub const IO_NUM_RECORDS_OUT: &str = "numRecordsOut";

/// Appended to a counter name to name its rate meter.
pub const SUFFIX_RATE: &str = "PerSecond";
/// Appended to a meter name to name the counter backing it.
pub const SUFFIX_COUNTER: &str = "_counter";

/// Group label that namespaces instruments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MetricGroup {
    Source,
    Sink,
}

impl MetricGroup {
    pub fn as_str(self) -> &'static str {
        match self {
            MetricGroup::Source => "source",
            MetricGroup::Sink => "sink",
        }
    }
}

impl std::fmt::Display for MetricGroup {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Base names a [`MetricNames`] set is built from.
///
/// Only the names an operator would pick live here; rate and counter names
/// are derived from them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BaseNames {
    pub tps: String,
    pub sink_in_tps: String,
    pub sink_out_bps: String,
    pub sink_out_latency: String,
    pub num_records_in: String,
    pub num_records_out: String,
    pub current_fetch_event_time_lag: String,
    pub current_emit_event_time_lag: String,
}

impl Default for BaseNames {
    fn default() -> Self {
        Self {
            tps: METRICS_TPS.to_string(),
            sink_in_tps: METRICS_SINK_IN_TPS.to_string(),
            sink_out_bps: METRICS_SINK_OUT_BPS.to_string(),
            sink_out_latency: METRICS_SINK_OUT_LATENCY.to_string(),
            num_records_in: IO_NUM_RECORDS_IN.to_string(),
            num_records_out: IO_NUM_RECORDS_OUT.to_string(),
            current_fetch_event_time_lag: CURRENT_FETCH_EVENT_TIME_LAG.to_string(),
            current_emit_event_time_lag: CURRENT_EMIT_EVENT_TIME_LAG.to_string(),
        }
    }
}

/// The full name set used by the registrar.
///
/// Derived names (rate meters, backing counters) are computed once in
/// [`MetricNames::from_bases`] and cannot be set by hand.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetricNames {
    bases: BaseNames,
    tps_counter: String,
    sink_in_tps_counter: String,
    sink_out_bps_counter: String,
    num_records_in_rate: String,
    num_records_out_rate: String,
}

impl MetricNames {
    /// The canonical name set.
    pub fn new() -> Self {
        Self::from_bases(BaseNames::default())
    }

    pub fn from_bases(bases: BaseNames) -> Self {
        Self {
            tps_counter: counter_name(&bases.tps),
            sink_in_tps_counter: counter_name(&bases.sink_in_tps),
            sink_out_bps_counter: counter_name(&bases.sink_out_bps),
            num_records_in_rate: rate_name(&bases.num_records_in),
            num_records_out_rate: rate_name(&bases.num_records_out),
            bases,
        }
    }

    pub fn bases(&self) -> &BaseNames {
        &self.bases
    }

    pub fn tps(&self) -> &str {
        &self.bases.tps
    }
    pub fn tps_counter(&self) -> &str {
        &self.tps_counter
    }
    pub fn sink_in_tps(&self) -> &str {
        &self.bases.sink_in_tps
    }
    pub fn sink_in_tps_counter(&self) -> &str {
        &self.sink_in_tps_counter
    }
    pub fn sink_out_bps(&self) -> &str {
        &self.bases.sink_out_bps
    }
    pub fn sink_out_bps_counter(&self) -> &str {
        &self.sink_out_bps_counter
    }
    pub fn sink_out_latency(&self) -> &str {
        &self.bases.sink_out_latency
    }
    pub fn num_records_in(&self) -> &str {
        &self.bases.num_records_in
    }
    pub fn num_records_out(&self) -> &str {
        &self.bases.num_records_out
    }
    pub fn num_records_in_rate(&self) -> &str {
        &self.num_records_in_rate
    }
    pub fn num_records_out_rate(&self) -> &str {
        &self.num_records_out_rate
    }
    pub fn current_fetch_event_time_lag(&self) -> &str {
        &self.bases.current_fetch_event_time_lag
    }
    pub fn current_emit_event_time_lag(&self) -> &str {
        &self.bases.current_emit_event_time_lag
    }
}

impl Default for MetricNames {
    fn default() -> Self {
        Self::new()
    }
}

/// `numRecordsIn` -> `numRecordsInPerSecond`.
pub fn rate_name(base: &str) -> String {
    format!("{base}{SUFFIX_RATE}")
}

/// `inTps` -> `inTps_counter`.
pub fn counter_name(base: &str) -> String {
    format!("{base}{SUFFIX_COUNTER}")
}
