//! connmetrics runtime library entry.
//!
//! A reference host for the core instruments: an in-memory registry with
//! scoped groups, the meter view updater, per-task contexts, and strict YAML
//! config. Consumed by the demo binary (`main.rs`) and by integration tests.

pub mod app_state;
pub mod config;
pub mod context;
pub mod registry;
