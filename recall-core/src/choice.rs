//! Choice — noisy selection of the most activated candidate.
//!
//! Every candidate receives logistic noise of scale `s` on top of its pooled
//! activation, then the argmax wins. With `s = 0` the selection is a pure
//! argmax. The last noisy sample is retained for diagnostics, mirroring how
//! retrieval competitions are usually inspected in simulation runs.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::BTreeMap;

use crate::error::{RecallError, Result};
use crate::types::{ActivationScore, ChunkId};

/// The outcome of a single choice competition.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Selection {
    /// The winning chunk.
    pub id: ChunkId,
    /// Its noisy activation at selection time.
    pub score: f64,
}

/// Noisy argmax selector over pooled activations.
#[derive(Debug)]
pub struct Choice {
    noise: f64,
    rng: StdRng,
    last_sample: BTreeMap<ChunkId, f64>,
}

impl Choice {
    /// Create a selector with logistic noise scale `noise`. A `seed` makes
    /// the selector deterministic; `None` draws from entropy.
    #[must_use]
    pub fn new(noise: f64, seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(s) => StdRng::seed_from_u64(s),
            None => StdRng::from_entropy(),
        };
        Self {
            noise,
            rng,
            last_sample: BTreeMap::new(),
        }
    }

    /// Run one competition over `pooled` activations.
    ///
    /// # Errors
    /// Returns [`RecallError::EmptyStore`] when there are no candidates.
    pub fn select(&mut self, pooled: &BTreeMap<ChunkId, f64>) -> Result<Selection> {
        if pooled.is_empty() {
            return Err(RecallError::EmptyStore);
        }

        self.last_sample.clear();
        for (&id, &a) in pooled {
            // -∞ + noise stays -∞: suppressed chunks never win.
            let noisy = a + self.logistic_noise();
            self.last_sample.insert(id, noisy);
        }

        let (&id, &score) = self
            .last_sample
            .iter()
            .max_by_key(|&(_, &s)| ActivationScore::new(s))
            .ok_or(RecallError::EmptyStore)?;

        Ok(Selection { id, score })
    }

    /// The noisy activations from the last competition.
    #[must_use]
    pub fn sample(&self) -> &BTreeMap<ChunkId, f64> {
        &self.last_sample
    }

    /// One draw of logistic noise with scale `s`: `s · ln(u / (1 - u))`.
    fn logistic_noise(&mut self) -> f64 {
        if self.noise == 0.0 {
            return 0.0;
        }
        let u: f64 = self.rng.gen_range(1e-12..(1.0 - 1e-12));
        self.noise * (u / (1.0 - u)).ln()
    }
}
