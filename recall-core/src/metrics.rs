//! Runtime counters and retrieval-latency statistics.
//!
//! Counters are lock-free `AtomicU64`s incremented in the event loop and
//! read once per session for the report. The latency monitor collects the
//! simulated retrieval latencies behind a `parking_lot::Mutex` for the rare
//! percentile read.

use std::sync::atomic::{AtomicU64, Ordering};

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Counters (lock-free)
// ---------------------------------------------------------------------------

/// Atomic counters for session events.
#[derive(Debug, Default)]
pub struct RecallCounters {
    /// Stimulus encodings processed.
    pub encodings: AtomicU64,
    /// Base-level update passes.
    pub base_level_passes: AtomicU64,
    /// Choice competitions run.
    pub selections: AtomicU64,
    /// Inhibition terms sent.
    pub inhibitions_sent: AtomicU64,
    /// Selections that landed on the nil sentinel.
    pub nil_selections: AtomicU64,
}

impl RecallCounters {
    /// Create a new set of zeroed counters.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot all counters.
    #[must_use]
    pub fn snapshot(&self) -> CounterSnapshot {
        CounterSnapshot {
            encodings: self.encodings.load(Ordering::Relaxed),
            base_level_passes: self.base_level_passes.load(Ordering::Relaxed),
            selections: self.selections.load(Ordering::Relaxed),
            inhibitions_sent: self.inhibitions_sent.load(Ordering::Relaxed),
            nil_selections: self.nil_selections.load(Ordering::Relaxed),
        }
    }
}

/// A snapshot of counter values at a point in time.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct CounterSnapshot {
    /// Stimulus encodings processed.
    pub encodings: u64,
    /// Base-level update passes.
    pub base_level_passes: u64,
    /// Choice competitions run.
    pub selections: u64,
    /// Inhibition terms sent.
    pub inhibitions_sent: u64,
    /// Selections that landed on the nil sentinel.
    pub nil_selections: u64,
}

// ---------------------------------------------------------------------------
// Latency monitor
// ---------------------------------------------------------------------------

/// Collects simulated retrieval latencies for percentile reporting.
#[derive(Debug, Default)]
pub struct LatencyMonitor {
    samples: Mutex<Vec<f64>>,
}

impl LatencyMonitor {
    /// Create an empty monitor.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one retrieval latency in milliseconds.
    pub fn record(&self, ms: f64) {
        self.samples.lock().push(ms);
    }

    /// P50/P95/max over the recorded samples.
    #[must_use]
    pub fn percentiles(&self) -> LatencyPercentiles {
        let samples = self.samples.lock();
        let n = samples.len();
        if n == 0 {
            return LatencyPercentiles::default();
        }

        let mut sorted = samples.clone();
        sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

        LatencyPercentiles {
            p50: sorted[n / 2],
            p95: sorted[(n as f64 * 0.95) as usize],
            max: sorted[n - 1],
            count: n as u64,
        }
    }
}

/// Percentile statistics for retrieval latencies.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct LatencyPercentiles {
    /// 50th percentile (median) in milliseconds.
    pub p50: f64,
    /// 95th percentile in milliseconds.
    pub p95: f64,
    /// Maximum observed latency.
    pub max: f64,
    /// Number of recorded samples.
    pub count: u64,
}

impl LatencyPercentiles {
    /// Format as a human-readable summary.
    #[must_use]
    pub fn summary(&self) -> String {
        format!(
            "retrievals={}  P50={:.0}ms  P95={:.0}ms  Max={:.0}ms",
            self.count, self.p50, self.p95, self.max,
        )
    }
}
