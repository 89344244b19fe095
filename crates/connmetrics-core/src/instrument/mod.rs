//! Measurement instruments.
//!
//! All instruments are `Send + Sync` and safe to read from a reporting thread
//! while connector code writes to them.

pub mod counter;
pub mod gauge;
pub mod meter;

use serde::Serialize;

pub use counter::Counter;
pub use gauge::{Gauge, LatencyGauge, TimestampGauge};
pub use meter::{RateMeter, MAX_WINDOW_SECS, UPDATE_INTERVAL_SECS};

/// A single reading taken from any instrument.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum MetricValue {
    Count(u64),
    Rate(f64),
    Float(f64),
    Int(i64),
    Unset,
}

impl From<f64> for MetricValue {
    fn from(v: f64) -> Self {
        MetricValue::Float(v)
    }
}

impl From<i64> for MetricValue {
    fn from(v: i64) -> Self {
        MetricValue::Int(v)
    }
}

impl From<Option<i64>> for MetricValue {
    fn from(v: Option<i64>) -> Self {
        v.map_or(MetricValue::Unset, MetricValue::Int)
    }
}
