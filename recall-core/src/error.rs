//! Error types for the recall engine.

use thiserror::Error;

/// Top-level error type for all recall-engine operations.
#[derive(Error, Debug)]
pub enum RecallError {
    /// A word-list request exceeds the size of the source word bank.
    #[error("word list too long: requested {requested} from the {bank} bank of {available}")]
    ListTooLong {
        /// How many words were requested.
        requested: usize,
        /// How many words the bank holds.
        available: usize,
        /// Which bank was sampled.
        bank: &'static str,
    },

    /// A chunk with the given ID is not in the store.
    #[error("unknown chunk: {0}")]
    UnknownChunk(crate::ChunkId),

    /// Choice was triggered over an empty candidate set.
    #[error("choice triggered with no candidates in the store")]
    EmptyStore,

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),

    /// Serialization failure.
    #[error("serialization error: {0}")]
    Serialization(String),

    /// Generic I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience Result type alias.
pub type Result<T> = std::result::Result<T, RecallError>;
