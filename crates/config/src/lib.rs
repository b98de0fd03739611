//! Configuration for the ShopSahai voice engine
//!
//! Everything the engine treats as immutable configuration lives here:
//! - The combined English + Malayalam numeral vocabulary
//! - Keyword sets for intent routing and noise stripping
//! - Dialogue control patterns (confirm / reject / reset / cancel)
//! - Locale message templates
//! - Reference name lists for fuzzy correction
//! - Runtime `Settings` loaded from TOML files and `SAHAI_` environment
//!   variables
//!
//! Dictionaries are plain data handed to the engine at construction, never
//! module-level mutable globals; only compiled regexes are cached lazily.

pub mod keywords;
pub mod messages;
pub mod names;
pub mod settings;
pub mod vocabulary;

pub use keywords::{CategoryRule, DialoguePatterns, KeywordConfig};
pub use messages::MessageCatalog;
pub use names::default_reference_names;
pub use settings::{load_settings, MatchingConfig, Settings, VoiceTuning};
pub use vocabulary::number_vocabulary;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("configuration file not found: {0}")]
    FileNotFound(String),

    #[error("failed to parse configuration: {0}")]
    ParseError(String),

    #[error("invalid value for {field}: {message}")]
    InvalidValue { field: String, message: String },
}

impl From<config::ConfigError> for ConfigError {
    fn from(err: config::ConfigError) -> Self {
        ConfigError::ParseError(err.to_string())
    }
}
