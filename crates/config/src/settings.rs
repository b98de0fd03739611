//! Runtime settings
//!
//! Loaded the usual way: an optional TOML file layered under `SAHAI_`
//! environment variables, deserialized into [`Settings`] with serde
//! defaults filling the gaps.

use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::Path;

use sahai_voice_core::Language;

use crate::ConfigError;

/// Timing knobs for the session controller.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VoiceTuning {
    /// Window for collapsing rapid repeated transcripts (interim
    /// recognition results) into the settled final text.
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,

    /// Pause after speech playback completes before a new listen cycle may
    /// start, so the system does not hear its own prompt.
    #[serde(default = "default_cooldown_ms")]
    pub cooldown_ms: u64,
}

fn default_debounce_ms() -> u64 {
    400
}

fn default_cooldown_ms() -> u64 {
    300
}

impl Default for VoiceTuning {
    fn default() -> Self {
        Self {
            debounce_ms: default_debounce_ms(),
            cooldown_ms: default_cooldown_ms(),
        }
    }
}

/// Tunables for fuzzy name matching.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchingConfig {
    /// Maximum normalized Levenshtein distance (0.0 = identical) at which a
    /// reference-name match is accepted. Heuristic, inherited from field
    /// tuning rather than proven correct.
    #[serde(default = "default_fuzzy_accept_distance")]
    pub fuzzy_accept_distance: f64,

    /// How many trailing non-numeric tokens the extractor falls back to
    /// when stripping leaves nothing.
    #[serde(default = "default_fallback_tail_tokens")]
    pub fallback_tail_tokens: usize,
}

fn default_fuzzy_accept_distance() -> f64 {
    0.4
}

fn default_fallback_tail_tokens() -> usize {
    3
}

impl Default for MatchingConfig {
    fn default() -> Self {
        Self {
            fuzzy_accept_distance: default_fuzzy_accept_distance(),
            fallback_tail_tokens: default_fallback_tail_tokens(),
        }
    }
}

/// Main settings for the voice engine.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Settings {
    /// Active locale, chosen by the shopkeeper.
    #[serde(default)]
    pub language: Language,

    #[serde(default)]
    pub voice: VoiceTuning,

    #[serde(default)]
    pub matching: MatchingConfig,
}

/// Load settings from an optional TOML file plus `SAHAI_` environment
/// variables (`SAHAI_VOICE__DEBOUNCE_MS=250` style nesting).
pub fn load_settings(path: Option<&Path>) -> Result<Settings, ConfigError> {
    let mut builder = Config::builder();

    if let Some(path) = path {
        builder = builder.add_source(File::from(path).required(false));
    }

    let config = builder
        .add_source(Environment::with_prefix("SAHAI").separator("__"))
        .build()?;

    let settings: Settings = config.try_deserialize()?;

    if !(0.0..=1.0).contains(&settings.matching.fuzzy_accept_distance) {
        return Err(ConfigError::InvalidValue {
            field: "matching.fuzzy_accept_distance".to_string(),
            message: "must be between 0.0 and 1.0".to_string(),
        });
    }

    Ok(settings)
}
