//! Stimulus material — the word banks and trial-list generation.
//!
//! The experiment presents a list drawn from two fixed banks: emotionally
//! charged words and neutral object words. A mixed list samples half of the
//! requested count from each bank; an unmixed list samples emotional words
//! only. The shuffled result is the trial list.

use rand::Rng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{RecallError, Result};

/// Emotionally charged stimulus words.
pub const EMOTIONAL_WORDS: [&str; 12] = [
    "joy", "fear", "anger", "love", "sadness", "hate", "pride", "jealousy", "grief", "hope",
    "disgust", "surprise",
];

/// Neutral object stimulus words.
pub const NEUTRAL_WORDS: [&str; 12] = [
    "book", "chair", "window", "pencil", "bottle", "computer", "table", "paper", "lamp", "phone",
    "cup", "backpack",
];

/// Category label for a stimulus word.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WordCategory {
    /// Emotionally charged word.
    Emotional,
    /// Neutral object word.
    Neutral,
}

impl fmt::Display for WordCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Emotional => write!(f, "E"),
            Self::Neutral => write!(f, "N"),
        }
    }
}

/// A single word to be presented, with its category label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stimulus {
    /// The word itself.
    pub word: String,
    /// Its category label.
    pub category: WordCategory,
}

impl Stimulus {
    fn new(word: &str, category: WordCategory) -> Self {
        Self {
            word: word.to_string(),
            category,
        }
    }
}

/// Which bank a word belongs to, if any.
#[must_use]
pub fn category_of(word: &str) -> Option<WordCategory> {
    if EMOTIONAL_WORDS.contains(&word) {
        Some(WordCategory::Emotional)
    } else if NEUTRAL_WORDS.contains(&word) {
        Some(WordCategory::Neutral)
    } else {
        None
    }
}

/// Generate a shuffled trial list of `n_items` words.
///
/// With `mixed`, `n_items / 2` words are sampled (without replacement) from
/// each bank, so an odd `n_items` yields `2 * (n_items / 2)` words. Without
/// `mixed`, all `n_items` words are emotional.
///
/// # Errors
/// Returns [`RecallError::ListTooLong`] when the request exceeds the relevant
/// bank size.
pub fn generate_word_list<R: Rng>(
    n_items: usize,
    mixed: bool,
    rng: &mut R,
) -> Result<Vec<Stimulus>> {
    let mut word_list = if mixed {
        let n_each = n_items / 2;
        if n_each > EMOTIONAL_WORDS.len() {
            return Err(RecallError::ListTooLong {
                requested: n_each,
                available: EMOTIONAL_WORDS.len(),
                bank: "emotional",
            });
        }
        if n_each > NEUTRAL_WORDS.len() {
            return Err(RecallError::ListTooLong {
                requested: n_each,
                available: NEUTRAL_WORDS.len(),
                bank: "neutral",
            });
        }

        let mut list: Vec<Stimulus> = EMOTIONAL_WORDS
            .choose_multiple(rng, n_each)
            .map(|w| Stimulus::new(w, WordCategory::Emotional))
            .collect();
        list.extend(
            NEUTRAL_WORDS
                .choose_multiple(rng, n_each)
                .map(|w| Stimulus::new(w, WordCategory::Neutral)),
        );
        list
    } else {
        if n_items > EMOTIONAL_WORDS.len() {
            return Err(RecallError::ListTooLong {
                requested: n_items,
                available: EMOTIONAL_WORDS.len(),
                bank: "emotional",
            });
        }
        EMOTIONAL_WORDS
            .choose_multiple(rng, n_items)
            .map(|w| Stimulus::new(w, WordCategory::Emotional))
            .collect()
    };

    word_list.shuffle(rng);
    Ok(word_list)
}
