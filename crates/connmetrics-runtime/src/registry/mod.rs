//! Reference host registry.
//!
//! An in-memory implementation of [`connmetrics_core::MetricsSink`] plus the
//! periodic updater that keeps rate meters current.

pub mod store;
pub mod updater;

pub use store::{GaugeReading, Metric, MetricRegistry, MetricScope};
pub use updater::spawn_view_updater;
