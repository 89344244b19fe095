use serde::Deserialize;
use connmetrics_core::error::{MetricsError, Result};
use connmetrics_core::instrument::MAX_WINDOW_SECS;

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RuntimeConfig {
    pub version: u32,

    #[serde(default)]
    pub registry: RegistrySection,

    #[serde(default)]
    pub meters: MeterSection,

    #[serde(default)]
    pub task: TaskSection,
}

impl RuntimeConfig {
    pub fn validate(&self) -> Result<()> {
        if self.version != 1 {
            return Err(MetricsError::UnsupportedVersion);
        }

        self.registry.validate()?;
        self.meters.validate(self.registry.update_interval_secs)?;
        self.task.validate(self.registry.scope_delimiter)?;

        Ok(())
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RegistrySection {
    #[serde(default = "default_scope_delimiter")]
    pub scope_delimiter: char,

    #[serde(default = "default_update_interval_secs")]
    pub update_interval_secs: u64,
}

impl Default for RegistrySection {
    fn default() -> Self {
        Self {
            scope_delimiter: default_scope_delimiter(),
            update_interval_secs: default_update_interval_secs(),
        }
    }
}

impl RegistrySection {
    pub fn validate(&self) -> Result<()> {
        let d = self.scope_delimiter;
        if d.is_alphanumeric() || d == '_' || d.is_whitespace() {
            return Err(MetricsError::BadConfig(
                "registry.scope_delimiter must be a punctuation character".into(),
            ));
        }
        if !(1..=60).contains(&self.update_interval_secs) {
            return Err(MetricsError::BadConfig(
                "registry.update_interval_secs must be between 1 and 60".into(),
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MeterSection {
    #[serde(default = "default_window_secs")]
    pub window_secs: u64,
}

impl Default for MeterSection {
    fn default() -> Self {
        Self {
            window_secs: default_window_secs(),
        }
    }
}

impl MeterSection {
    pub fn validate(&self, update_interval_secs: u64) -> Result<()> {
        if self.window_secs > MAX_WINDOW_SECS {
            return Err(MetricsError::BadConfig(format!(
                "meters.window_secs must be at most {MAX_WINDOW_SECS}"
            )));
        }
        if self.window_secs < update_interval_secs {
            return Err(MetricsError::BadConfig(
                "meters.window_secs must not be shorter than registry.update_interval_secs".into(),
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TaskSection {
    #[serde(default = "default_task_name")]
    pub name: String,

    #[serde(default)]
    pub subtask_index: u32,
}

impl Default for TaskSection {
    fn default() -> Self {
        Self {
            name: default_task_name(),
            subtask_index: 0,
        }
    }
}

impl TaskSection {
    pub fn validate(&self, delimiter: char) -> Result<()> {
        if self.name.is_empty() || self.name.contains(delimiter) {
            return Err(MetricsError::BadConfig(format!(
                "task.name must be non-empty and must not contain '{delimiter}'"
            )));
        }
        Ok(())
    }
}

fn default_scope_delimiter() -> char {
    '.'
}
fn default_update_interval_secs() -> u64 {
    connmetrics_core::instrument::UPDATE_INTERVAL_SECS
}
fn default_window_secs() -> u64 {
    connmetrics_core::registrar::DEFAULT_WINDOW_SECS
}
fn default_task_name() -> String {
    "connector".into()
}
