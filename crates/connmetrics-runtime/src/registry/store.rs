//! In-memory metrics registry.
//!
//! Metrics are keyed by their full identifier (scope components plus name,
//! joined by the configured delimiter) in a `DashMap`. Registration is
//! first-wins: a second metric under the same identifier is rejected and the
//! caller gets `MetricsError::Duplicate`.

use std::collections::BTreeMap;
use std::sync::Arc;

use dashmap::mapref::entry::Entry;
use dashmap::DashMap;

use connmetrics_core::error::{MetricsError, Result};
use connmetrics_core::instrument::{Counter, Gauge, MetricValue, RateMeter};
use connmetrics_core::MetricsSink;

/// Type-erased gauge read by the reporting cycle.
pub trait GaugeReading: Send + Sync {
    fn read(&self) -> MetricValue;
}

impl<G> GaugeReading for G
where
    G: Gauge,
    G::Value: Into<MetricValue>,
{
    fn read(&self) -> MetricValue {
        self.value().into()
    }
}

/// A registered instrument.
#[derive(Clone)]
pub enum Metric {
    Counter(Arc<Counter>),
    Meter(Arc<RateMeter>),
    Gauge(Arc<dyn GaugeReading>),
}

impl Metric {
    pub fn kind(&self) -> &'static str {
        match self {
            Metric::Counter(_) => "counter",
            Metric::Meter(_) => "meter",
            Metric::Gauge(_) => "gauge",
        }
    }

    pub fn value(&self) -> MetricValue {
        match self {
            Metric::Counter(c) => MetricValue::Count(c.count()),
            Metric::Meter(m) => MetricValue::Rate(m.rate()),
            Metric::Gauge(g) => g.read(),
        }
    }
}

impl std::fmt::Debug for Metric {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Metric")
            .field("kind", &self.kind())
            .field("value", &self.value())
            .finish()
    }
}

pub struct MetricRegistry {
    delimiter: char,
    metrics: DashMap<String, Metric>,
}

impl MetricRegistry {
    pub fn new(delimiter: char) -> Self {
        Self {
            delimiter,
            metrics: DashMap::new(),
        }
    }

    pub fn delimiter(&self) -> char {
        self.delimiter
    }

    /// Root scope for one parallel task instance.
    pub fn task_scope(self: &Arc<Self>, task_name: &str, subtask_index: u32) -> Result<MetricScope> {
        MetricScope::root(Arc::clone(self))
            .group(task_name)?
            .group(&subtask_index.to_string())
    }

    pub fn register(&self, identifier: String, metric: Metric) -> Result<()> {
        match self.metrics.entry(identifier) {
            Entry::Occupied(e) => {
                tracing::warn!(identifier = %e.key(), kind = metric.kind(), "metric name collision, not registered");
                Err(MetricsError::Duplicate {
                    identifier: e.key().clone(),
                })
            }
            Entry::Vacant(e) => {
                tracing::debug!(identifier = %e.key(), kind = metric.kind(), "metric registered");
                e.insert(metric);
                Ok(())
            }
        }
    }

    pub fn get(&self, identifier: &str) -> Option<Metric> {
        self.metrics.get(identifier).map(|r| r.value().clone())
    }

    pub fn len(&self) -> usize {
        self.metrics.len()
    }

    pub fn is_empty(&self) -> bool {
        self.metrics.is_empty()
    }

    /// Tick every registered meter once.
    pub fn update_views(&self) {
        let mut ticked = 0usize;
        for r in self.metrics.iter() {
            if let Metric::Meter(m) = r.value() {
                m.update();
                ticked += 1;
            }
        }
        tracing::trace!(meters = ticked, "meter views updated");
    }

    /// Current value of every metric, ordered by identifier.
    pub fn snapshot(&self) -> BTreeMap<String, MetricValue> {
        self.metrics
            .iter()
            .map(|r| (r.key().clone(), r.value().value()))
            .collect()
    }
}

/// A named position in the registry's scope hierarchy.
///
/// Cheap to clone; groups are implicit in the identifiers of the metrics
/// registered under them.
#[derive(Clone)]
pub struct MetricScope {
    registry: Arc<MetricRegistry>,
    components: Vec<String>,
}

impl std::fmt::Debug for MetricScope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MetricScope")
            .field("components", &self.components)
            .finish_non_exhaustive()
    }
}

impl MetricScope {
    pub fn root(registry: Arc<MetricRegistry>) -> Self {
        Self {
            registry,
            components: Vec::new(),
        }
    }

    pub fn components(&self) -> &[String] {
        &self.components
    }

    pub fn registry(&self) -> &Arc<MetricRegistry> {
        &self.registry
    }

    /// Full identifier `name` would have in this scope.
    pub fn identifier(&self, name: &str) -> String {
        let d = self.registry.delimiter.to_string();
        let mut parts: Vec<&str> = self.components.iter().map(String::as_str).collect();
        parts.push(name);
        parts.join(d.as_str())
    }

    /// Look up a metric by a path relative to this scope, e.g.
    /// `&["sink", "inTps"]`.
    pub fn get(&self, path: &[&str]) -> Option<Metric> {
        let (name, groups) = path.split_last()?;
        let mut scope = self.clone();
        scope.components.extend(groups.iter().map(|g| g.to_string()));
        self.registry.get(&scope.identifier(name))
    }

    fn check_name(&self, name: &str) -> Result<()> {
        if name.is_empty() {
            return Err(MetricsError::InvalidName("empty name".into()));
        }
        if name.contains(self.registry.delimiter) {
            return Err(MetricsError::InvalidName(format!(
                "{name} contains scope delimiter '{}'",
                self.registry.delimiter
            )));
        }
        Ok(())
    }

    fn add(&self, name: &str, metric: Metric) -> Result<()> {
        self.check_name(name)?;
        self.registry.register(self.identifier(name), metric)
    }
}

impl MetricsSink for MetricScope {
    type Group = MetricScope;

    fn group(&self, name: &str) -> Result<MetricScope> {
        self.check_name(name)?;
        let mut child = self.clone();
        child.components.push(name.to_string());
        Ok(child)
    }

    fn counter(&self, name: &str) -> Result<Arc<Counter>> {
        let counter = Arc::new(Counter::new());
        self.add(name, Metric::Counter(Arc::clone(&counter)))?;
        Ok(counter)
    }

    fn meter(&self, name: &str, meter: RateMeter) -> Result<Arc<RateMeter>> {
        let meter = Arc::new(meter);
        self.add(name, Metric::Meter(Arc::clone(&meter)))?;
        Ok(meter)
    }

    fn gauge<G>(&self, name: &str, gauge: G) -> Result<Arc<G>>
    where
        G: Gauge + 'static,
        G::Value: Into<MetricValue>,
    {
        let gauge = Arc::new(gauge);
        let reading: Arc<dyn GaugeReading> = gauge.clone();
        self.add(name, Metric::Gauge(reading))?;
        Ok(gauge)
    }
}
