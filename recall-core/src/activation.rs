//! Base-Level Activation — recency/frequency memory strength.
//!
//! The base level of a chunk is driven by its use history:
//!   B(c) = Σ_k (t_k)^(-d)
//!
//! Where:
//!   t_k = time since use k, in activation time units (seconds by default)
//!   d   = power-law decay exponent (≈ 0.5 for human-like forgetting)
//!
//! The sum is kept un-logged here; the activation pool applies a bounded log
//! so that chunks with no uses contribute a floor value rather than -∞.
//!
//! Reference: Anderson, J. R. (1993). "Rules of the Mind." (ACT-R base-level
//! learning equation.)

use std::collections::{HashMap, HashSet};

use crate::types::{ChunkId, SimTime};

/// Per-chunk base-level activation tracker.
#[derive(Debug)]
pub struct BaseLevel {
    decay: f64,
    time_scale: f64,
    uses: HashMap<ChunkId, Vec<SimTime>>,
    cache: HashMap<ChunkId, f64>,
    ignore: HashSet<ChunkId>,
}

impl BaseLevel {
    /// Create a tracker with decay exponent `decay` and `time_scale`
    /// milliseconds per activation time unit.
    #[must_use]
    pub fn new(decay: f64, time_scale: f64) -> Self {
        Self {
            decay,
            time_scale,
            uses: HashMap::new(),
            cache: HashMap::new(),
            ignore: HashSet::new(),
        }
    }

    /// Exclude a chunk from base-level bookkeeping (used for the `nil`
    /// sentinel, whose activation comes from the retrieval threshold).
    pub fn ignore(&mut self, id: ChunkId) {
        self.ignore.insert(id);
        self.uses.remove(&id);
        self.cache.remove(&id);
    }

    /// Record a use (encoding or rehearsal) of a chunk at `at`.
    pub fn record_use(&mut self, id: ChunkId, at: SimTime) {
        if self.ignore.contains(&id) {
            return;
        }
        self.uses.entry(id).or_default().push(at);
    }

    /// Recompute the cached base level of every tracked chunk as of `now`.
    pub fn update(&mut self, now: SimTime) {
        for (id, uses) in &self.uses {
            let b = base_level_sum(uses, now, self.decay, self.time_scale);
            self.cache.insert(*id, b);
        }
        tracing::trace!(chunks = self.cache.len(), %now, "base-level update");
    }

    /// The cached base-level sum for a chunk (0.0 when never used, so the
    /// pool's bounded log sends it to the floor).
    #[must_use]
    pub fn activation(&self, id: ChunkId) -> f64 {
        self.cache.get(&id).copied().unwrap_or(0.0)
    }

    /// Number of recorded uses for a chunk.
    #[must_use]
    pub fn use_count(&self, id: ChunkId) -> usize {
        self.uses.get(&id).map_or(0, Vec::len)
    }
}

/// Core base-level sum: Σ_k (t_k)^(-d).
///
/// Elapsed times are clamped to at least one time unit so a just-used chunk
/// contributes 1.0 rather than diverging.
#[must_use]
pub fn base_level_sum(uses: &[SimTime], now: SimTime, decay: f64, time_scale: f64) -> f64 {
    uses.iter()
        .map(|&at| {
            let elapsed_ms = now.millis_since(at) as f64;
            let t = elapsed_ms.max(time_scale) / time_scale;
            t.powf(-decay)
        })
        .sum()
}

// ---------------------------------------------------------------------------
// Pool transforms
// ---------------------------------------------------------------------------

/// Log-odds, with the operand clamped away from 0 and 1.
#[must_use]
pub fn logit(p: f64) -> f64 {
    let p = p.clamp(1e-8, 1.0 - 1e-8);
    (p / (1.0 - p)).ln()
}

/// Transform a bottom-up strength `s ∈ [0, 1]` into activation space:
/// `logit(0.5 * (s + 1))`. An inactive input (s = 0) maps to exactly 0.
#[must_use]
pub fn bottom_up_term(s: f64) -> f64 {
    logit(0.5 * (s + 1.0))
}

/// Bounded log: `ln(max(b, floor))`. Keeps unused chunks finite while
/// preserving the log-scale ordering of base-level sums.
#[must_use]
pub fn bounded_log(b: f64, floor: f64) -> f64 {
    b.max(floor).ln()
}

// ---------------------------------------------------------------------------
// Retrieval latency
// ---------------------------------------------------------------------------

/// Milliseconds the clock advances for a retrieval at activation `a`:
/// `F · e^(-a)`, capped at 60 s so a floor-level activation cannot stall
/// the simulated clock.
#[must_use]
pub fn retrieval_latency_ms(a: f64, latency_factor: f64) -> u64 {
    let ms = latency_factor * (-a).exp() * 1000.0;
    ms.clamp(1.0, 60_000.0) as u64
}

#[cfg(test)]
mod tests {
    use super::*;

    fn t(ms: u64) -> SimTime {
        SimTime::from_ms(ms)
    }

    #[test]
    fn fresh_use_contributes_one() {
        let b = base_level_sum(&[t(1000)], t(1000), 0.5, 1000.0);
        assert!((b - 1.0).abs() < 1e-9, "zero age clamps to one time unit");
    }

    #[test]
    fn base_level_decays_with_age() {
        let b1 = base_level_sum(&[t(0)], t(1_000), 0.5, 1000.0);
        let b4 = base_level_sum(&[t(0)], t(4_000), 0.5, 1000.0);
        let b16 = base_level_sum(&[t(0)], t(16_000), 0.5, 1000.0);

        assert!(b1 > b4);
        assert!(b4 > b16);
        assert!((b4 - 0.5).abs() < 1e-9, "4s at d=0.5 → 4^-0.5 = 0.5");
    }

    #[test]
    fn repeated_uses_strengthen() {
        let once = base_level_sum(&[t(0)], t(10_000), 0.5, 1000.0);
        let thrice = base_level_sum(&[t(0), t(4_000), t(8_000)], t(10_000), 0.5, 1000.0);
        assert!(thrice > once);
    }

    #[test]
    fn tracker_update_and_ignore() {
        let mut blas = BaseLevel::new(0.5, 1000.0);
        let a = ChunkId::new();
        let nil = ChunkId::new();
        blas.ignore(nil);

        blas.record_use(a, t(0));
        blas.record_use(nil, t(0));
        blas.update(t(4_000));

        assert!((blas.activation(a) - 0.5).abs() < 1e-9);
        assert_eq!(blas.use_count(nil), 0, "ignored chunks record nothing");
        assert!(blas.activation(nil).abs() < f64::EPSILON);
    }

    #[test]
    fn unused_chunk_reads_zero() {
        let blas = BaseLevel::new(0.5, 1000.0);
        assert!(blas.activation(ChunkId::new()).abs() < f64::EPSILON);
    }

    #[test]
    fn logit_midpoint_is_zero() {
        assert!(logit(0.5).abs() < 1e-12);
        assert!(bottom_up_term(0.0).abs() < 1e-12, "inactive input adds nothing");
        assert!(bottom_up_term(1.0) > 10.0, "active input dominates");
    }

    #[test]
    fn logit_is_finite_at_extremes() {
        assert!(logit(0.0).is_finite());
        assert!(logit(1.0).is_finite());
    }

    #[test]
    fn bounded_log_floors_zero() {
        let floored = bounded_log(0.0, 1e-8);
        assert!((floored - (1e-8f64).ln()).abs() < 1e-9);
        assert!(bounded_log(1.0, 1e-8).abs() < 1e-12);
    }

    #[test]
    fn latency_shrinks_with_activation() {
        let slow = retrieval_latency_ms(-1.0, 1.0);
        let fast = retrieval_latency_ms(1.0, 1.0);
        assert!(slow > fast);
        assert!(retrieval_latency_ms(-100.0, 1.0) <= 60_000, "latency is capped");
        assert!(retrieval_latency_ms(100.0, 1.0) >= 1, "latency never rounds to zero");
    }
}
