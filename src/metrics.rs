use std::fmt;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use once_cell::sync::Lazy;

/// Global runtime metrics for subscription normalization.
///
/// Purpose:
/// - Track how many raw messages were inspected
/// - Track confirmations and the filters they produced
/// - Track messages that could not be normalized
///
/// Design:
/// - Lock-free (Atomics)
/// - Safe in async + multithreaded contexts
#[derive(Default)]
pub struct RuntimeMetrics {
    pub messages_seen: AtomicUsize,

    pub confirmations: AtomicUsize,
    pub filters_emitted: AtomicUsize,

    pub passthrough: AtomicUsize,
    pub unsupported: AtomicUsize,
    pub skipped: AtomicUsize,

    pub malformed: AtomicUsize,
    pub parse_errors: AtomicUsize,
}

impl RuntimeMetrics {
    pub fn incr(counter: &AtomicUsize) {
        counter.fetch_add(1, Ordering::Relaxed);
    }

    pub fn add(counter: &AtomicUsize, n: usize) {
        counter.fetch_add(n, Ordering::Relaxed);
    }
}

impl fmt::Display for RuntimeMetrics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[METRICS] seen={} confirmations={} filters={} passthrough={} unsupported={} skipped={} malformed={} parse_err={}",
            self.messages_seen.load(Ordering::Relaxed),
            self.confirmations.load(Ordering::Relaxed),
            self.filters_emitted.load(Ordering::Relaxed),
            self.passthrough.load(Ordering::Relaxed),
            self.unsupported.load(Ordering::Relaxed),
            self.skipped.load(Ordering::Relaxed),
            self.malformed.load(Ordering::Relaxed),
            self.parse_errors.load(Ordering::Relaxed),
        )
    }
}

/// Global metrics registry (singleton)
pub static METRICS: Lazy<Arc<RuntimeMetrics>> =
    Lazy::new(|| Arc::new(RuntimeMetrics::default()));
