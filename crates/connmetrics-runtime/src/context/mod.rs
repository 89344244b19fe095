//! Task context types handed to connector code.

pub mod task;

pub use task::{TaskContext, TaskMeta};
