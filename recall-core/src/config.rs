//! Configuration for the recall experiment.
//!
//! Maps directly to `recall.toml`.

use serde::{Deserialize, Serialize};

/// Top-level experiment configuration, loadable from TOML.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RecallConfig {
    /// Word-list generation settings.
    #[serde(default)]
    pub list: ListConfig,
    /// Base-level activation settings.
    #[serde(default)]
    pub activation: ActivationConfig,
    /// Choice / retrieval settings.
    #[serde(default)]
    pub choice: ChoiceConfig,
    /// Event timing settings.
    #[serde(default)]
    pub schedule: ScheduleConfig,
    /// Recall-phase behavior.
    #[serde(default)]
    pub recall: RecallPhaseConfig,
}

impl RecallConfig {
    /// Load configuration from a TOML string.
    ///
    /// # Errors
    /// Returns `RecallError::Config` if the TOML is invalid.
    pub fn from_toml(toml_str: &str) -> crate::error::Result<Self> {
        toml::from_str(toml_str).map_err(|e| crate::RecallError::Config(e.to_string()))
    }

    /// Load configuration from a TOML file.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: &std::path::Path) -> crate::error::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }
}

// ---------------------------------------------------------------------------
// Sub-configs
// ---------------------------------------------------------------------------

/// Word-list generation settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListConfig {
    /// Total number of words to present.
    #[serde(default = "default_12")]
    pub n_items: usize,
    /// Mixed list (half emotional, half neutral) vs. all-emotional.
    #[serde(default = "default_true")]
    pub mixed: bool,
    /// RNG seed for list sampling and choice noise. `None` draws from entropy.
    #[serde(default)]
    pub seed: Option<u64>,
}

impl Default for ListConfig {
    fn default() -> Self {
        Self {
            n_items: 12,
            mixed: true,
            seed: None,
        }
    }
}

/// Base-level activation settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActivationConfig {
    /// Power-law decay exponent `d` (0.5 is the human-calibrated default).
    #[serde(default = "default_decay")]
    pub decay: f64,
    /// Milliseconds per activation time unit (1000 → activation ages in seconds).
    #[serde(default = "default_time_scale")]
    pub time_scale: f64,
    /// Lower bound applied before taking the log of a base-level sum.
    #[serde(default = "default_floor")]
    pub floor: f64,
}

impl Default for ActivationConfig {
    fn default() -> Self {
        Self {
            decay: 0.5,
            time_scale: 1000.0,
            floor: 1e-8,
        }
    }
}

/// Choice / retrieval settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChoiceConfig {
    /// Logistic noise scale `s` added to every candidate at selection time.
    #[serde(default = "default_noise")]
    pub noise: f64,
    /// Retrieval threshold `τ` — the pooled activation of the nil sentinel.
    #[serde(default = "default_threshold")]
    pub threshold: f64,
    /// Latency scaling factor `F` for the retrieval-latency clock advance.
    #[serde(default = "default_latency_factor")]
    pub latency_factor: f64,
}

impl Default for ChoiceConfig {
    fn default() -> Self {
        Self {
            noise: 0.25,
            threshold: -2.0,
            latency_factor: 1.0,
        }
    }
}

/// Event timing settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleConfig {
    /// Milliseconds between successive word presentations.
    #[serde(default = "default_1000")]
    pub encode_interval_ms: u64,
    /// Milliseconds between the last presentation and the recall phase.
    #[serde(default = "default_1000")]
    pub retention_interval_ms: u64,
}

impl Default for ScheduleConfig {
    fn default() -> Self {
        Self {
            encode_interval_ms: 1000,
            retention_interval_ms: 1000,
        }
    }
}

/// Recall-phase behavior.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecallPhaseConfig {
    /// Whether a successful recall records a new base-level use.
    /// Off by default: rehearsal during recall is not modeled.
    #[serde(default)]
    pub reinforce_on_recall: bool,
    /// Hard cap on retrieval attempts. `None` derives `2 * n_items + 8`.
    #[serde(default)]
    pub max_retrievals: Option<usize>,
}

impl Default for RecallPhaseConfig {
    fn default() -> Self {
        Self {
            reinforce_on_recall: false,
            max_retrievals: None,
        }
    }
}

// ---------------------------------------------------------------------------
// Serde default helpers
// ---------------------------------------------------------------------------

fn default_true() -> bool {
    true
}
fn default_12() -> usize {
    12
}
fn default_decay() -> f64 {
    0.5
}
fn default_time_scale() -> f64 {
    1000.0
}
fn default_floor() -> f64 {
    1e-8
}
fn default_noise() -> f64 {
    0.25
}
fn default_threshold() -> f64 {
    -2.0
}
fn default_latency_factor() -> f64 {
    1.0
}
fn default_1000() -> u64 {
    1000
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_toml_gives_defaults() {
        let config = RecallConfig::from_toml("").expect("empty TOML is valid");
        assert_eq!(config.list.n_items, 12);
        assert!(config.list.mixed);
        assert!((config.activation.decay - 0.5).abs() < f64::EPSILON);
        assert!((config.choice.threshold - (-2.0)).abs() < f64::EPSILON);
        assert!(!config.recall.reinforce_on_recall);
    }

    #[test]
    fn partial_toml_overrides_one_table() {
        let config = RecallConfig::from_toml(
            r#"
            [list]
            n_items = 8
            mixed = false
            seed = 42
            "#,
        )
        .expect("valid TOML");
        assert_eq!(config.list.n_items, 8);
        assert!(!config.list.mixed);
        assert_eq!(config.list.seed, Some(42));
        // Untouched tables keep their defaults.
        assert_eq!(config.schedule.encode_interval_ms, 1000);
    }

    #[test]
    fn invalid_toml_is_a_config_error() {
        let err = RecallConfig::from_toml("[list\nn_items = ").expect_err("must fail");
        assert!(matches!(err, crate::RecallError::Config(_)));
    }

    #[test]
    fn config_file_roundtrip() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("recall.toml");
        std::fs::write(&path, "[choice]\nnoise = 0.0\n").expect("write");

        let config = RecallConfig::from_file(&path).expect("load");
        assert!((config.choice.noise - 0.0).abs() < f64::EPSILON);
    }
}
