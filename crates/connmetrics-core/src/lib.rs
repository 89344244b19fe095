//! connmetrics core: connector instruments, naming, and the registrar.
//!
//! This crate defines the instruments (counters, rate meters, latency and
//! timestamp gauges), the stable metric names, and the registrar that places
//! them under the `source`/`sink` groups of a host-provided [`MetricsSink`].
//! It carries no runtime dependencies so any host registry can implement the
//! sink trait.
//!
//! # Defensive guarantees
//! Panics, `unwrap`, and `expect` are compile-denied here. Fallible paths
//! surface as `MetricsError`/`Result`.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

pub mod error;
pub mod instrument;
pub mod names;
pub mod registrar;
pub mod sink;

/// Shared result type.
pub use error::{ErrorCode, MetricsError, Result};
pub use instrument::{Counter, Gauge, LatencyGauge, MetricValue, RateMeter, TimestampGauge};
pub use names::{BaseNames, MetricGroup, MetricNames};
pub use registrar::MetricRegistrar;
pub use sink::MetricsSink;
