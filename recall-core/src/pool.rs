//! Activation pooling — one number per candidate for the choice to rank.
//!
//! Each item chunk pools three additive contributions:
//!
//!   pooled(c) = logit-transformed bottom-up strength
//!             + bounded log of the base-level sum
//!             + inhibition term
//!
//! The `nil` sentinel pools at the retrieval threshold `τ`: when every
//! studied item has decayed or been suppressed below `τ`, nil wins and
//! recall terminates. A `-∞` inhibition term propagates through the sum, so
//! an inhibited chunk can never win regardless of its other contributions.

use std::collections::BTreeMap;

use crate::activation::{BaseLevel, bottom_up_term, bounded_log};
use crate::chunk::ChunkStore;
use crate::inhibition::Inhibition;
use crate::types::ChunkId;

/// Pools per-chunk activation contributions into a single ranked map.
#[derive(Debug)]
pub struct ActivationPool {
    threshold: f64,
    floor: f64,
}

impl ActivationPool {
    /// Create a pool with retrieval threshold `threshold` and base-level
    /// log floor `floor`.
    #[must_use]
    pub fn new(threshold: f64, floor: f64) -> Self {
        Self { threshold, floor }
    }

    /// The retrieval threshold `τ` (the nil sentinel's pooled activation).
    #[must_use]
    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// Pool activations for every item chunk plus the nil sentinel.
    ///
    /// The map is ordered by [`ChunkId`] so downstream iteration is
    /// deterministic under a fixed RNG seed.
    #[must_use]
    pub fn pool(
        &self,
        store: &ChunkStore,
        blas: &BaseLevel,
        inhibition: &Inhibition,
    ) -> BTreeMap<ChunkId, f64> {
        let mut pooled = BTreeMap::new();

        for id in store.item_ids() {
            let bu = bottom_up_term(store.bottom_up(id));
            let bl = bounded_log(blas.activation(id), self.floor);
            let inhib = inhibition.term(id);
            pooled.insert(id, bu + bl + inhib);
        }
        pooled.insert(store.nil(), self.threshold);

        pooled
    }
}
