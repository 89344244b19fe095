use std::sync::Arc;

use connmetrics_core::error::Result;

use crate::registry::{MetricRegistry, MetricScope};

/// Identity of one parallel instance of a connector task.
#[derive(Debug, Clone)]
pub struct TaskMeta {
    /// Task (operator) name.
    pub task_name: String,
    /// Index of this parallel instance.
    pub subtask_index: u32,
}

/// Per-task runtime context: identity plus its metric scope.
#[derive(Clone)]
pub struct TaskContext {
    pub meta: TaskMeta,
    metrics: MetricScope,
}

impl TaskContext {
    pub fn new(registry: &Arc<MetricRegistry>, meta: TaskMeta) -> Result<Self> {
        let metrics = registry.task_scope(&meta.task_name, meta.subtask_index)?;
        Ok(Self { meta, metrics })
    }

    pub fn task_name(&self) -> &str {
        &self.meta.task_name
    }
    pub fn subtask_index(&self) -> u32 {
        self.meta.subtask_index
    }

    /// Scope that `MetricRegistrar` calls register into.
    pub fn metric_group(&self) -> &MetricScope {
        &self.metrics
    }
}
