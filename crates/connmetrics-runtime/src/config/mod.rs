//! Runtime config loader (strict parsing).

pub mod schema;

use std::fs;

use connmetrics_core::error::{MetricsError, Result};

pub use schema::{MeterSection, RegistrySection, RuntimeConfig, TaskSection};

pub fn load_from_file(path: &str) -> Result<RuntimeConfig> {
    let s = fs::read_to_string(path)
        .map_err(|e| MetricsError::BadConfig(format!("read config failed ({path}): {e}")))?;
    load_from_str(&s)
}

pub fn load_from_str(s: &str) -> Result<RuntimeConfig> {
    let cfg: RuntimeConfig = serde_yaml::from_str(s)
        .map_err(|e| MetricsError::BadConfig(format!("invalid yaml: {e}")))?;
    cfg.validate()?;
    Ok(cfg)
}
