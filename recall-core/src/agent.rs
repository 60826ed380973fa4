//! The simulated participant — component wiring and event resolution.
//!
//! A [`Participant`] owns the chunk store, base-level tracker, activation
//! pool, inhibition map, choice selector, and event queue, and chains events
//! between them: a store update schedules a base-level update, which
//! schedules a choice competition. The session decides what to do with each
//! competition's winner; during study the winners are simply discarded.

use crate::activation::BaseLevel;
use crate::choice::{Choice, Selection};
use crate::chunk::ChunkStore;
use crate::config::RecallConfig;
use crate::error::Result;
use crate::inhibition::Inhibition;
use crate::metrics::RecallCounters;
use crate::pool::ActivationPool;
use crate::scheduler::{Event, EventQueue, EventSource, Priority};
use crate::types::{ChunkId, SimTime};

/// Bottom-up strength of a presented stimulus (a full match).
const ENCODE_STRENGTH: f64 = 1.0;

/// What resolving one event produced.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Resolution {
    /// A choice competition completed with this winner.
    Selected(Selection),
    /// Internal bookkeeping only.
    Continue,
}

/// The simulated participant.
#[derive(Debug)]
pub struct Participant {
    /// Declarative memory store.
    pub store: ChunkStore,
    /// Base-level activation tracker.
    pub blas: BaseLevel,
    /// Activation pool.
    pub pool: ActivationPool,
    /// Response suppression map.
    pub inhibition: Inhibition,
    /// Noisy choice selector.
    pub choice: Choice,
    /// Event queue and simulation clock.
    pub queue: EventQueue,
    /// Session counters.
    pub counters: RecallCounters,
    name: String,
}

impl Participant {
    /// Build a participant wired from `config`. `choice_seed` seeds the
    /// choice RNG; the session derives it from the list seed so sampling and
    /// noise use distinct streams.
    #[must_use]
    pub fn new(name: impl Into<String>, config: &RecallConfig, choice_seed: Option<u64>) -> Self {
        let store = ChunkStore::new();
        let mut blas = BaseLevel::new(config.activation.decay, config.activation.time_scale);
        blas.ignore(store.nil());

        Self {
            store,
            blas,
            pool: ActivationPool::new(config.choice.threshold, config.activation.floor),
            inhibition: Inhibition::new(),
            choice: Choice::new(config.choice.noise, choice_seed),
            queue: EventQueue::new(),
            counters: RecallCounters::new(),
            name: name.into(),
        }
    }

    /// The participant's name (used in log output).
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Schedule the presentation of a stimulus chunk at an absolute time.
    pub fn encode_at(&mut self, at: SimTime, id: ChunkId) {
        self.queue
            .schedule_at(at, Priority::High, EventSource::StoreUpdate(id));
    }

    /// Schedule a choice competition now.
    pub fn trigger_choice(&mut self) {
        self.queue
            .schedule(0, Priority::Normal, EventSource::ChoiceSelect);
    }

    /// Schedule an inert clock marker `delay_ms` from now.
    pub fn breakpoint(&mut self, delay_ms: u64) {
        self.queue
            .schedule(delay_ms, Priority::Low, EventSource::Breakpoint);
    }

    /// Resolve one event, scheduling any follow-up events it implies.
    ///
    /// # Errors
    /// Propagates store and choice errors (unknown chunk, empty store).
    pub fn resolve(&mut self, event: &Event) -> Result<Resolution> {
        match event.source {
            EventSource::StoreUpdate(id) => {
                self.store.send(id, ENCODE_STRENGTH)?;
                self.blas.record_use(id, self.queue.now());
                self.counters
                    .encodings
                    .fetch_add(1, std::sync::atomic::Ordering::Relaxed);
                tracing::debug!(participant = %self.name, chunk = %id, at = %event.at, "encoded stimulus");
                self.queue
                    .schedule(0, Priority::Normal, EventSource::BaseLevelUpdate);
                Ok(Resolution::Continue)
            }
            EventSource::BaseLevelUpdate => {
                self.blas.update(self.queue.now());
                self.counters
                    .base_level_passes
                    .fetch_add(1, std::sync::atomic::Ordering::Relaxed);
                self.queue
                    .schedule(0, Priority::Low, EventSource::ChoiceSelect);
                Ok(Resolution::Continue)
            }
            EventSource::ChoiceSelect => {
                let pooled = self.pool.pool(&self.store, &self.blas, &self.inhibition);
                let selection = self.choice.select(&pooled)?;
                self.counters
                    .selections
                    .fetch_add(1, std::sync::atomic::Ordering::Relaxed);
                Ok(Resolution::Selected(selection))
            }
            EventSource::Breakpoint => Ok(Resolution::Continue),
        }
    }

    /// Drain the queue, resolving every event and discarding selections.
    ///
    /// # Errors
    /// Propagates the first resolution error.
    pub fn run_all(&mut self) -> Result<()> {
        while let Some(event) = self.queue.advance() {
            self.resolve(&event)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chunk::Chunk;

    fn participant() -> Participant {
        let mut config = RecallConfig::default();
        config.choice.noise = 0.0;
        Participant::new("test", &config, Some(0))
    }

    #[test]
    fn encode_chain_updates_base_level() {
        let mut p = participant();
        let ids = p.store.compile(vec![Chunk::for_word("joy")]);

        p.encode_at(SimTime::from_ms(0), ids[0]);
        p.run_all().expect("chain resolves");

        assert_eq!(p.blas.use_count(ids[0]), 1);
        let snap = p.counters.snapshot();
        assert_eq!(snap.encodings, 1);
        assert_eq!(snap.base_level_passes, 1);
        assert_eq!(snap.selections, 1, "the chain ends in a competition");
    }

    #[test]
    fn choice_select_returns_a_winner() {
        let mut p = participant();
        let ids = p.store.compile(vec![Chunk::for_word("joy")]);

        p.encode_at(SimTime::from_ms(0), ids[0]);
        // Resolve StoreUpdate and BaseLevelUpdate by hand, then inspect the
        // ChoiceSelect resolution.
        let mut winner = None;
        while let Some(event) = p.queue.advance() {
            if let Resolution::Selected(s) = p.resolve(&event).expect("resolves") {
                winner = Some(s);
            }
        }

        let selection = winner.expect("competition ran");
        assert_eq!(selection.id, ids[0], "the just-encoded chunk wins");
    }

    #[test]
    fn breakpoint_only_advances_the_clock() {
        let mut p = participant();
        p.breakpoint(1000);
        p.run_all().expect("no-op resolves");
        assert_eq!(p.queue.now(), SimTime::from_ms(1000));
        assert_eq!(p.counters.snapshot().selections, 0);
    }
}
