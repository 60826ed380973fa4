//! The experiment session — study phase, free-recall loop, and outcome.
//!
//! A session generates the trial list, compiles one chunk per word, presents
//! the words at a fixed pace, and then polls the choice until the nil
//! sentinel wins (or a retrieval guard trips). Recalled chunk IDs are mapped
//! back to their source words through the session's id → word table.

use chrono::{DateTime, Utc};
use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::fmt::Write as _;

use crate::activation::retrieval_latency_ms;
use crate::agent::{Participant, Resolution};
use crate::chunk::Chunk;
use crate::config::RecallConfig;
use crate::error::{RecallError, Result};
use crate::metrics::{CounterSnapshot, LatencyMonitor, LatencyPercentiles};
use crate::scheduler::{EventSource, Priority};
use crate::stimulus::{Stimulus, WordCategory, generate_word_list};
use crate::types::{ChunkId, SimTime};

/// Why the recall loop stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Terminal {
    /// The nil sentinel won a competition.
    Nil,
    /// The retrieval guard tripped.
    Exhausted,
}

/// One successfully recalled word.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecalledWord {
    /// The recalled word.
    pub word: String,
    /// Its category label.
    pub category: WordCategory,
    /// Noisy activation of the winning chunk at selection time.
    pub score: f64,
    /// Simulated time of the retrieval.
    pub at: SimTime,
}

/// The full result of one experiment run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecallOutcome {
    /// The presented trial list, in presentation order.
    pub trial_list: Vec<Stimulus>,
    /// Recalled words, in recall order.
    pub recalled: Vec<RecalledWord>,
    /// Why the recall loop stopped.
    pub terminal: Terminal,
    /// Total choice competitions during recall (including the terminal one).
    pub retrievals: usize,
    /// Wall-clock start of the run.
    pub started_at: DateTime<Utc>,
    /// Simulated time at the end of the run.
    pub sim_duration: SimTime,
    /// Session counters.
    pub counters: CounterSnapshot,
    /// Simulated retrieval-latency statistics.
    pub latency: LatencyPercentiles,
}

impl RecallOutcome {
    /// Number of recalled emotional words.
    #[must_use]
    pub fn emotional_recalled(&self) -> usize {
        self.recalled
            .iter()
            .filter(|r| r.category == WordCategory::Emotional)
            .count()
    }

    /// Number of recalled neutral words.
    #[must_use]
    pub fn neutral_recalled(&self) -> usize {
        self.recalled
            .iter()
            .filter(|r| r.category == WordCategory::Neutral)
            .count()
    }

    /// Total number of recalled words.
    #[must_use]
    pub fn total_recalled(&self) -> usize {
        self.recalled.len()
    }

    /// Serialize the outcome as pretty JSON for downstream analysis.
    ///
    /// # Errors
    /// Returns [`RecallError::Serialization`] on encoder failure.
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(|e| RecallError::Serialization(e.to_string()))
    }

    /// Render the console report.
    #[must_use]
    pub fn render(&self) -> String {
        let mut out = String::new();
        let trial: Vec<String> = self
            .trial_list
            .iter()
            .map(|s| format!("{} ({})", s.word, s.category))
            .collect();
        let _ = writeln!(out, "Trial list: {}", trial.join(", "));

        let recalled: Vec<&str> = self.recalled.iter().map(|r| r.word.as_str()).collect();
        let _ = writeln!(out, "Free recall: {}", recalled.join(", "));
        let _ = writeln!(
            out,
            "Number of emotional words recalled: {}",
            self.emotional_recalled()
        );
        let _ = writeln!(
            out,
            "Number of neutral words recalled: {}",
            self.neutral_recalled()
        );
        let _ = writeln!(
            out,
            "Total number of words recalled: {}",
            self.total_recalled()
        );
        let terminal = match self.terminal {
            Terminal::Nil => "nil retrieval",
            Terminal::Exhausted => "retrieval guard",
        };
        let _ = writeln!(out, "Terminated by: {terminal}");
        let _ = writeln!(out, "Latency: {}", self.latency.summary());
        out
    }
}

/// One full study-then-recall experiment.
#[derive(Debug)]
pub struct RecallSession {
    config: RecallConfig,
    participant: Participant,
    stimuli: Vec<Stimulus>,
    chunk_ids: Vec<ChunkId>,
    word_of: HashMap<ChunkId, usize>,
    latency: LatencyMonitor,
}

impl RecallSession {
    /// Build a session: generate the trial list and compile its chunks.
    ///
    /// # Errors
    /// Returns [`RecallError::ListTooLong`] when the configured list exceeds
    /// a word bank.
    pub fn new(config: RecallConfig) -> Result<Self> {
        let mut list_rng = match config.list.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let stimuli = generate_word_list(config.list.n_items, config.list.mixed, &mut list_rng)?;

        // Distinct noise stream so list sampling and choice noise do not
        // share RNG state.
        let choice_seed = config.list.seed.map(|s| s.wrapping_add(1));
        let mut participant = Participant::new("participant", &config, choice_seed);

        let chunks: Vec<Chunk> = stimuli.iter().map(|s| Chunk::for_word(&s.word)).collect();
        let chunk_ids = participant.store.compile(chunks);
        let word_of: HashMap<ChunkId, usize> = chunk_ids
            .iter()
            .enumerate()
            .map(|(i, &id)| (id, i))
            .collect();

        tracing::info!(
            n_items = stimuli.len(),
            mixed = config.list.mixed,
            seed = ?config.list.seed,
            "session ready"
        );

        Ok(Self {
            config,
            participant,
            stimuli,
            chunk_ids,
            word_of,
            latency: LatencyMonitor::new(),
        })
    }

    /// The generated trial list, in presentation order.
    #[must_use]
    pub fn trial_list(&self) -> &[Stimulus] {
        &self.stimuli
    }

    /// Run the full experiment: study, retention gap, free recall.
    ///
    /// # Errors
    /// Propagates engine errors; none are expected for a well-formed config.
    pub fn run(mut self) -> Result<RecallOutcome> {
        let started_at = Utc::now();

        self.study()?;
        let (recalled, terminal, retrievals) = self.recall_phase()?;

        let outcome = RecallOutcome {
            trial_list: self.stimuli,
            recalled,
            terminal,
            retrievals,
            started_at,
            sim_duration: self.participant.queue.now(),
            counters: self.participant.counters.snapshot(),
            latency: self.latency.percentiles(),
        };

        tracing::info!(
            recalled = outcome.total_recalled(),
            emotional = outcome.emotional_recalled(),
            neutral = outcome.neutral_recalled(),
            retrievals = outcome.retrievals,
            terminal = ?outcome.terminal,
            "session complete"
        );

        Ok(outcome)
    }

    /// Present every stimulus at the configured pace, then idle through the
    /// retention interval.
    fn study(&mut self) -> Result<()> {
        let interval = self.config.schedule.encode_interval_ms;
        for (k, &id) in self.chunk_ids.iter().enumerate() {
            self.participant
                .encode_at(SimTime::from_ms(k as u64 * interval), id);
        }
        self.participant.run_all()?;

        self.participant
            .breakpoint(self.config.schedule.retention_interval_ms);
        self.participant.run_all()?;

        tracing::info!(
            presented = self.chunk_ids.len(),
            sim_time = %self.participant.queue.now(),
            "study phase complete"
        );
        Ok(())
    }

    /// The free-recall loop: poll the choice until nil wins or the guard
    /// trips. Each hit is suppressed and the clock advances by the
    /// retrieval latency before the next competition.
    fn recall_phase(&mut self) -> Result<(Vec<RecalledWord>, Terminal, usize)> {
        let max_retrievals = self
            .config
            .recall
            .max_retrievals
            .unwrap_or(2 * self.stimuli.len() + 8);
        let nil = self.participant.store.nil();

        let mut recalled: Vec<RecalledWord> = Vec::new();
        let mut recalled_ids: HashSet<ChunkId> = HashSet::new();
        let mut retrievals = 0usize;
        let mut terminal = Terminal::Exhausted;

        self.participant.trigger_choice();
        while let Some(event) = self.participant.queue.advance() {
            let Resolution::Selected(selection) = self.participant.resolve(&event)? else {
                continue;
            };
            retrievals += 1;

            tracing::debug!(
                chunk = %selection.id,
                score = selection.score,
                "choice winner"
            );
            tracing::trace!(sample = ?self.participant.choice.sample(), "competition field");

            if selection.id == nil {
                self.participant
                    .counters
                    .nil_selections
                    .fetch_add(1, std::sync::atomic::Ordering::Relaxed);
                terminal = Terminal::Nil;
                break;
            }

            if let Some(&idx) = self.word_of.get(&selection.id) {
                if recalled_ids.insert(selection.id) {
                    let stim = &self.stimuli[idx];
                    recalled.push(RecalledWord {
                        word: stim.word.clone(),
                        category: stim.category,
                        score: selection.score,
                        at: self.participant.queue.now(),
                    });
                }
            }

            self.participant.inhibition.suppress(selection.id);
            self.participant
                .counters
                .inhibitions_sent
                .fetch_add(1, std::sync::atomic::Ordering::Relaxed);

            if self.config.recall.reinforce_on_recall {
                let now = self.participant.queue.now();
                self.participant.blas.record_use(selection.id, now);
                self.participant.blas.update(now);
            }

            if retrievals >= max_retrievals {
                terminal = Terminal::Exhausted;
                break;
            }

            let latency = retrieval_latency_ms(selection.score, self.config.choice.latency_factor);
            self.latency.record(latency as f64);
            self.participant
                .queue
                .schedule(latency, Priority::Normal, EventSource::ChoiceSelect);
        }

        Ok((recalled, terminal, retrievals))
    }
}
