//! Chunk storage — the participant's declarative memory.
//!
//! A [`Chunk`] is a bundle of slot/value features. The [`ChunkStore`] compiles
//! chunks up front, owns the reserved `nil` sentinel, and tracks the
//! bottom-up (encoding) strength contributed by the most recent input.
//! Sending a new input resets the previous strengths, matching a
//! reset-on-send perceptual buffer.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::error::{RecallError, Result};
use crate::types::ChunkId;

/// Slot name for the input/output feature of a stimulus chunk.
pub const SLOT_IO: &str = "io";
/// Slot name for the word feature of a stimulus chunk.
pub const SLOT_WORD: &str = "word";

/// A declarative memory chunk — an ordered bundle of slot/value features.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Chunk {
    /// Unique identifier for this chunk.
    pub id: ChunkId,
    /// Ordered `(slot, value)` feature pairs.
    pub features: Vec<(String, String)>,
}

impl Chunk {
    /// Create a new chunk from feature pairs.
    #[must_use]
    pub fn new(features: Vec<(String, String)>) -> Self {
        Self {
            id: ChunkId::new(),
            features,
        }
    }

    /// Create the standard stimulus chunk for a word: `io:input ** word:<w>`.
    #[must_use]
    pub fn for_word(word: &str) -> Self {
        Self::new(vec![
            (SLOT_IO.to_string(), "input".to_string()),
            (SLOT_WORD.to_string(), word.to_string()),
        ])
    }

    /// Look up the value of a slot, if present.
    #[must_use]
    pub fn feature(&self, slot: &str) -> Option<&str> {
        self.features
            .iter()
            .find(|(s, _)| s == slot)
            .map(|(_, v)| v.as_str())
    }
}

/// Declarative memory store with a reserved `nil` sentinel chunk.
#[derive(Debug)]
pub struct ChunkStore {
    chunks: Vec<Chunk>,
    index: HashMap<ChunkId, usize>,
    nil: ChunkId,
    bottom_up: HashMap<ChunkId, f64>,
}

impl ChunkStore {
    /// Create an empty store. The `nil` sentinel is always present.
    #[must_use]
    pub fn new() -> Self {
        let nil_chunk = Chunk::new(vec![(SLOT_IO.to_string(), "nil".to_string())]);
        let nil = nil_chunk.id;
        let mut index = HashMap::new();
        index.insert(nil, 0);
        Self {
            chunks: vec![nil_chunk],
            index,
            nil,
            bottom_up: HashMap::new(),
        }
    }

    /// The reserved `nil` sentinel chunk ID.
    #[must_use]
    pub fn nil(&self) -> ChunkId {
        self.nil
    }

    /// Compile chunks into the store, returning their IDs in order.
    pub fn compile<I: IntoIterator<Item = Chunk>>(&mut self, chunks: I) -> Vec<ChunkId> {
        let mut ids = Vec::new();
        for chunk in chunks {
            let id = chunk.id;
            self.index.insert(id, self.chunks.len());
            self.chunks.push(chunk);
            ids.push(id);
        }
        ids
    }

    /// Present an input: set the bottom-up strength of `id`, resetting all
    /// previous strengths.
    ///
    /// # Errors
    /// Returns [`RecallError::UnknownChunk`] if `id` was never compiled.
    pub fn send(&mut self, id: ChunkId, strength: f64) -> Result<()> {
        if !self.index.contains_key(&id) {
            return Err(RecallError::UnknownChunk(id));
        }
        self.bottom_up.clear();
        self.bottom_up.insert(id, strength);
        Ok(())
    }

    /// Current bottom-up strength for a chunk (0.0 when not the active input).
    #[must_use]
    pub fn bottom_up(&self, id: ChunkId) -> f64 {
        self.bottom_up.get(&id).copied().unwrap_or(0.0)
    }

    /// Look up a compiled chunk.
    ///
    /// # Errors
    /// Returns [`RecallError::UnknownChunk`] if `id` was never compiled.
    pub fn get(&self, id: ChunkId) -> Result<&Chunk> {
        self.index
            .get(&id)
            .map(|&i| &self.chunks[i])
            .ok_or(RecallError::UnknownChunk(id))
    }

    /// IDs of all compiled item chunks, excluding the `nil` sentinel,
    /// in compilation order.
    pub fn item_ids(&self) -> impl Iterator<Item = ChunkId> + '_ {
        self.chunks
            .iter()
            .map(|c| c.id)
            .filter(move |id| *id != self.nil)
    }

    /// Number of item chunks (excluding `nil`).
    #[must_use]
    pub fn len(&self) -> usize {
        self.chunks.len() - 1
    }

    /// Whether the store holds no item chunks.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for ChunkStore {
    fn default() -> Self {
        Self::new()
    }
}
