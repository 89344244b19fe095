use std::sync::atomic::{AtomicBool, AtomicI64, AtomicU64, Ordering};

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Instrument that exposes an instantaneous value on demand.
pub trait Gauge: Send + Sync {
    type Value;

    fn value(&self) -> Self::Value;
}

/// Average per-record latency of the most recent batch.
///
/// Starts at `0.0`. An empty batch leaves the previous reading in place.
#[derive(Debug)]
pub struct LatencyGauge {
    // f64 bits
    value: AtomicU64,
}

impl LatencyGauge {
    pub fn new() -> Self {
        Self {
            value: AtomicU64::new(0.0f64.to_bits()),
        }
    }

    /// Record `time_delta` spent on a batch of `batch_size` records.
    pub fn report(&self, time_delta: i64, batch_size: i64) {
        if batch_size != 0 {
            let avg = time_delta as f64 / batch_size as f64;
            self.value.store(avg.to_bits(), Ordering::Release);
        }
    }
}

impl Default for LatencyGauge {
    fn default() -> Self {
        Self::new()
    }
}

impl Gauge for LatencyGauge {
    type Value = f64;

    fn value(&self) -> f64 {
        f64::from_bits(self.value.load(Ordering::Acquire))
    }
}

/// Event-time lag (absolute timestamp or delta), unset until first report.
///
/// Serializes as an optional integer so hosts can snapshot or ship it.
#[derive(Debug, Default)]
pub struct TimestampGauge {
    value: AtomicI64,
    set: AtomicBool,
}

impl TimestampGauge {
    pub fn new() -> Self {
        Self::default()
    }

    /// Overwrite the stored value.
    pub fn report(&self, delay: i64) {
        self.value.store(delay, Ordering::Relaxed);
        self.set.store(true, Ordering::Release);
    }
}

impl Gauge for TimestampGauge {
    type Value = Option<i64>;

    fn value(&self) -> Option<i64> {
        if self.set.load(Ordering::Acquire) {
            Some(self.value.load(Ordering::Relaxed))
        } else {
            None
        }
    }
}

impl From<Option<i64>> for TimestampGauge {
    fn from(v: Option<i64>) -> Self {
        let g = Self::new();
        if let Some(delay) = v {
            g.report(delay);
        }
        g
    }
}

impl Clone for TimestampGauge {
    fn clone(&self) -> Self {
        Self::from(self.value())
    }
}

impl Serialize for TimestampGauge {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        self.value().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for TimestampGauge {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        Option::<i64>::deserialize(deserializer).map(Self::from)
    }
}
