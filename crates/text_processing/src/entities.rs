//! Entity-name extraction
//!
//! Pulls a supplier/borrower name out of a full command utterance by
//! stripping everything that is provably not a name (the matched amount
//! text, number words, command stopwords), then falling back through fuzzy
//! reference matching, a trailing-token guess, and finally the raw
//! utterance.
//!
//! Extraction is deliberately permissive; the hard gate is
//! [`is_valid_entity_name`], which refuses placeholder output before
//! anything reaches storage.

use std::collections::{HashMap, HashSet};

use tracing::debug;

use sahai_voice_core::Language;

use crate::fuzzy::NameMatcher;

/// Tunables for [`EntityExtractor`].
#[derive(Debug, Clone)]
pub struct ExtractorConfig {
    /// Normalized edit distance at which a reference name is accepted.
    pub max_distance: f64,
    /// How many trailing tokens the positional fallback keeps.
    pub tail_tokens: usize,
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        Self {
            max_distance: 0.4,
            tail_tokens: 3,
        }
    }
}

/// Per-locale word sets the extractor strips before guessing a name.
#[derive(Debug, Clone, Default)]
struct LocaleLexicon {
    numeral_words: HashSet<String>,
    stopwords: HashSet<String>,
}

/// Noise-stripping name extractor.
#[derive(Debug, Clone)]
pub struct EntityExtractor {
    lexicons: HashMap<Language, LocaleLexicon>,
    config: ExtractorConfig,
}

impl EntityExtractor {
    pub fn new(config: ExtractorConfig) -> Self {
        Self {
            lexicons: HashMap::new(),
            config,
        }
    }

    /// Register the strip lists for one locale.
    pub fn with_locale<N, S>(mut self, language: Language, numeral_words: N, stopwords: S) -> Self
    where
        N: IntoIterator<Item = String>,
        S: IntoIterator<Item = String>,
    {
        let lexicon = LocaleLexicon {
            numeral_words: numeral_words.into_iter().map(|w| w.to_lowercase()).collect(),
            stopwords: stopwords.into_iter().map(|w| w.to_lowercase()).collect(),
        };
        self.lexicons.insert(language, lexicon);
        self
    }

    /// Extract a candidate name from `utterance`.
    ///
    /// `amount_text` is the substring the numeral resolver consumed, if
    /// any; it is removed first so "purchase 1000 from Ramesh" reduces to
    /// "Ramesh" rather than "1000 Ramesh".
    ///
    /// Always returns some string; callers decide acceptability through
    /// [`is_valid_entity_name`].
    pub fn extract(
        &self,
        utterance: &str,
        amount_text: Option<&str>,
        language: Language,
        reference_names: &[String],
    ) -> String {
        let mut cleaned = utterance.to_string();
        if let Some(amount) = amount_text {
            if !amount.is_empty() {
                cleaned = cleaned.replacen(amount, " ", 1);
            }
        }

        let lexicon = self.lexicons.get(&language);
        let kept: Vec<&str> = cleaned
            .split_whitespace()
            .filter(|token| !self.is_noise(token, lexicon))
            .collect();
        let candidate = kept.join(" ");
        if !candidate.trim().is_empty() {
            debug!(%candidate, "entity extracted by stripping");
            return candidate.trim().to_string();
        }

        // Stripping consumed everything; try to recover a known name from
        // the original utterance.
        let matcher = NameMatcher::new(reference_names.to_vec(), self.config.max_distance);
        if let Some(name) = matcher.best_match(utterance) {
            debug!(name, "entity recovered by fuzzy reference match");
            return name.to_string();
        }

        // Positional guess: names usually land at the end of the command.
        let tail: Vec<&str> = cleaned
            .split_whitespace()
            .filter(|token| !is_numeric_token(token))
            .collect();
        let start = tail.len().saturating_sub(self.config.tail_tokens);
        let tail = tail[start..].join(" ");
        if !tail.trim().is_empty() {
            return tail.trim().to_string();
        }

        utterance.trim().to_string()
    }

    fn is_noise(&self, token: &str, lexicon: Option<&LocaleLexicon>) -> bool {
        let token = token
            .trim_matches(|c: char| c.is_ascii_punctuation())
            .to_lowercase();
        if token.is_empty() || is_numeric_token(&token) {
            return true;
        }
        lexicon.is_some_and(|lex| {
            lex.numeral_words.contains(&token) || lex.stopwords.contains(&token)
        })
    }
}

fn is_numeric_token(token: &str) -> bool {
    let trimmed = token.trim_matches(|c: char| c.is_ascii_punctuation());
    !trimmed.is_empty() && trimmed.chars().all(|c| c.is_numeric())
}

/// Placeholder names that must never reach storage, lowercased. Both
/// locales are checked regardless of the active language, since transcripts
/// mix scripts freely.
const PLACEHOLDER_NAMES: &[&str] = &[
    "unknown",
    "blank",
    "supplier",
    "person",
    "unknown supplier",
    "unknown person",
    "വിതരണക്കാരൻ",
    "വ്യക്തി",
    "അജ്ഞാത വിതരണക്കാരൻ",
    "അജ്ഞാത വ്യക്തി",
];

/// Command verbs that cannot themselves be a name. The extractor's
/// whole-utterance last resort can hand back strings like "purchase 1000";
/// the gate refuses anything built solely from these plus digits.
const COMMAND_WORDS: &[&str] = &[
    "purchase", "buy", "borrow", "borrowed", "income", "expense", "add",
    "വാങ്ങൽ", "കടം", "വരുമാനം", "ചെലവ്", "ചേർക്കുക",
];

/// Gate applied before any record write: rejects empty strings and
/// placeholder output from the extractor's last-resort fallbacks.
pub fn is_valid_entity_name(name: &str) -> bool {
    let normalized = name.trim().to_lowercase();
    if normalized.is_empty() {
        return false;
    }
    if PLACEHOLDER_NAMES.contains(&normalized.as_str()) {
        return false;
    }
    if normalized.starts_with("unknown") || normalized.starts_with("അജ്ഞാത") {
        return false;
    }
    // Nothing name-like left once command words, role nouns and digit runs
    // are discounted.
    normalized.split_whitespace().any(|token| {
        !COMMAND_WORDS.contains(&token)
            && !PLACEHOLDER_NAMES.contains(&token)
            && !is_numeric_token(token)
    })
}
