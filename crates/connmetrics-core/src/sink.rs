//! Host metrics context seen by the registrar.
//!
//! Implemented by whatever registry the connector runs inside. Every method
//! may fail with the host's own error (e.g. a duplicate name); the registrar
//! passes such errors through untouched.

use std::sync::Arc;

use crate::error::Result;
use crate::instrument::{Counter, Gauge, MetricValue, RateMeter};

pub trait MetricsSink {
    /// Child scope type returned by [`MetricsSink::group`].
    type Group: MetricsSink;

    /// Get or create the named child group.
    fn group(&self, name: &str) -> Result<Self::Group>;

    /// Create and register a fresh counter.
    fn counter(&self, name: &str) -> Result<Arc<Counter>>;

    /// Register a rate meter.
    fn meter(&self, name: &str, meter: RateMeter) -> Result<Arc<RateMeter>>;

    /// Register a gauge.
    fn gauge<G>(&self, name: &str, gauge: G) -> Result<Arc<G>>
    where
        G: Gauge + 'static,
        G::Value: Into<MetricValue>;
}
