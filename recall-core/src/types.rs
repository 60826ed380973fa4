//! Core type definitions for the recall engine.

use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

// ---------------------------------------------------------------------------
// Identity Types
// ---------------------------------------------------------------------------

/// Unique identifier for a memory chunk. Unique per run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ChunkId(pub Uuid);

impl ChunkId {
    /// Create a new random chunk ID.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ChunkId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ChunkId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ---------------------------------------------------------------------------
// Time
// ---------------------------------------------------------------------------

/// Simulated timestamp measured in milliseconds since session start.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct SimTime {
    /// Milliseconds since session start (monotonically increasing).
    pub ms: u64,
}

impl SimTime {
    /// Session start.
    pub const ZERO: Self = Self { ms: 0 };

    /// Create a timestamp from milliseconds.
    #[must_use]
    pub fn from_ms(ms: u64) -> Self {
        Self { ms }
    }

    /// The timestamp `delay_ms` milliseconds after this one.
    #[must_use]
    pub fn after(self, delay_ms: u64) -> Self {
        Self {
            ms: self.ms.saturating_add(delay_ms),
        }
    }

    /// Milliseconds elapsed since `earlier` (saturating at zero).
    #[must_use]
    pub fn millis_since(self, earlier: Self) -> u64 {
        self.ms.saturating_sub(earlier.ms)
    }
}

impl fmt::Display for SimTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "t+{}ms", self.ms)
    }
}

// ---------------------------------------------------------------------------
// Activation Score
// ---------------------------------------------------------------------------

/// Total-orderable activation value used to rank candidates during choice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct ActivationScore(pub OrderedFloat<f64>);

impl ActivationScore {
    /// Create an activation score from a raw f64.
    #[must_use]
    pub fn new(score: f64) -> Self {
        Self(OrderedFloat(score))
    }

    /// Get the raw score value.
    #[must_use]
    pub fn value(self) -> f64 {
        self.0.into_inner()
    }
}
