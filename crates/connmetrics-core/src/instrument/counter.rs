use std::sync::atomic::{AtomicU64, Ordering};

/// Monotonically increasing event counter.
///
/// Written by connector source/sink code, read by rate meters and the host's
/// reporting cycle.
#[derive(Debug, Default)]
pub struct Counter {
    count: AtomicU64,
}

impl Counter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Increment by 1.
    pub fn inc(&self) {
        self.inc_by(1);
    }

    /// Increment by an arbitrary amount.
    pub fn inc_by(&self, n: u64) {
        self.count.fetch_add(n, Ordering::Relaxed);
    }

    pub fn count(&self) -> u64 {
        self.count.load(Ordering::Relaxed)
    }
}
