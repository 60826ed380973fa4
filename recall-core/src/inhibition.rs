//! Response suppression — persistent inhibition of recalled chunks.
//!
//! Inhibition terms are additive activation contributions that never reset
//! for the lifetime of a session. A recalled chunk receives `-∞` so it can
//! never win the choice again, which is what drives recall toward the nil
//! sentinel and termination.

use std::collections::HashMap;

use crate::types::ChunkId;

/// Persistent chunk → additive-term map.
#[derive(Debug, Default)]
pub struct Inhibition {
    terms: HashMap<ChunkId, f64>,
}

impl Inhibition {
    /// Create an empty inhibition map.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the inhibition term for a chunk. Later sends overwrite earlier
    /// ones; entries are never cleared.
    pub fn send(&mut self, id: ChunkId, term: f64) {
        self.terms.insert(id, term);
    }

    /// Fully suppress a chunk.
    pub fn suppress(&mut self, id: ChunkId) {
        self.send(id, f64::NEG_INFINITY);
    }

    /// The inhibition term for a chunk (0.0 when none was sent).
    #[must_use]
    pub fn term(&self, id: ChunkId) -> f64 {
        self.terms.get(&id).copied().unwrap_or(0.0)
    }

    /// Number of chunks currently carrying an inhibition term.
    #[must_use]
    pub fn len(&self) -> usize {
        self.terms.len()
    }

    /// Whether no chunk is inhibited.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }
}
