//! Top-level facade crate for connmetrics.
//!
//! Re-exports the core instruments and the reference runtime so users can depend on a single crate.

pub mod core {
    pub use connmetrics_core::*;
}

pub mod runtime {
    pub use connmetrics_runtime::*;
}
