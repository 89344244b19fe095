//! Rate meter over a counter (ring-of-snapshots smoothing).
//!
//! Every `update()` records the counter's current count into a ring buffer
//! holding `window / interval + 1` snapshots. The reported rate is the
//! difference between the newest and the oldest snapshot divided by the
//! window length in seconds. The ring starts zero-filled, so until a full
//! window has elapsed the rate is "events so far / window" and under-reports.
//!
//! The meter does not tick itself; the host calls `update()` once per
//! `interval` (see the runtime's view updater).

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

use super::Counter;

/// Default tick period expected by a meter.
pub const UPDATE_INTERVAL_SECS: u64 = 5;

/// Longest window (and update interval) a meter accepts; larger values are
/// clamped. Bounds the ring at `MAX_WINDOW_SECS + 1` slots.
pub const MAX_WINDOW_SECS: u64 = 3600;

#[derive(Debug)]
struct Ring {
    values: Vec<u64>,
    pos: usize,
}

/// Average events-per-second of a counter over a trailing window.
#[derive(Debug)]
pub struct RateMeter {
    counter: Arc<Counter>,
    window_secs: u64,
    ring: Mutex<Ring>,
    // f64 bits
    rate: AtomicU64,
}

impl RateMeter {
    /// Meter over `counter` with a `window_secs` trailing window, ticked every
    /// [`UPDATE_INTERVAL_SECS`].
    pub fn new(counter: Arc<Counter>, window_secs: u64) -> Self {
        Self::with_update_interval(counter, window_secs, UPDATE_INTERVAL_SECS)
    }

    /// Window and interval are clamped to `1..=MAX_WINDOW_SECS`, then the
    /// window is rounded down to a multiple of the interval (at least one
    /// interval).
    pub fn with_update_interval(counter: Arc<Counter>, window_secs: u64, interval_secs: u64) -> Self {
        let interval = interval_secs.clamp(1, MAX_WINDOW_SECS);
        let window_secs = window_secs.min(MAX_WINDOW_SECS);
        let window = (window_secs - window_secs % interval).max(interval);
        let slots = (window / interval) as usize + 1;

        Self {
            counter,
            window_secs: window,
            ring: Mutex::new(Ring {
                values: vec![0; slots],
                pos: 0,
            }),
            rate: AtomicU64::new(0.0f64.to_bits()),
        }
    }

    pub fn mark_event(&self) {
        self.counter.inc();
    }

    pub fn mark_events(&self, n: u64) {
        self.counter.inc_by(n);
    }

    /// Total events seen by the underlying counter.
    pub fn count(&self) -> u64 {
        self.counter.count()
    }

    /// Rate computed at the last `update()`.
    pub fn rate(&self) -> f64 {
        f64::from_bits(self.rate.load(Ordering::Acquire))
    }

    /// Effective window after rounding.
    pub fn window_secs(&self) -> u64 {
        self.window_secs
    }

    pub fn counter(&self) -> &Arc<Counter> {
        &self.counter
    }

    /// Take a snapshot of the counter and recompute the rate.
    pub fn update(&self) {
        // A poisoned ring is still structurally valid (plain integers).
        let mut ring = self.ring.lock().unwrap_or_else(PoisonError::into_inner);
        let len = ring.values.len();
        let now = self.counter.count();

        ring.pos = (ring.pos + 1) % len;
        let pos = ring.pos;
        if let Some(slot) = ring.values.get_mut(pos) {
            *slot = now;
        }
        let oldest = ring.values.get((pos + 1) % len).copied().unwrap_or(0);

        let rate = now.saturating_sub(oldest) as f64 / self.window_secs as f64;
        self.rate.store(rate.to_bits(), Ordering::Release);
    }
}
