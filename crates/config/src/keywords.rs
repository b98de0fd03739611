//! Keyword sets for intent routing, noise stripping and dialogue control
//!
//! All matching is case-insensitive substring or whole-word matching over
//! the lowercased utterance. The defaults cover both locales at once; the
//! engine does not auto-detect the locale, it simply checks categories in a
//! fixed order and lets the first match win.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use sahai_voice_core::Language;

/// A sub-category rule for income/expense commands: if any keyword appears
/// in the utterance, the transaction gets the locale-appropriate label.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryRule {
    pub keywords: Vec<String>,
    pub label_en: String,
    pub label_ml: String,
}

impl CategoryRule {
    fn new(keywords: &[&str], label_en: &str, label_ml: &str) -> Self {
        Self {
            keywords: keywords.iter().map(|k| k.to_string()).collect(),
            label_en: label_en.to_string(),
            label_ml: label_ml.to_string(),
        }
    }

    pub fn label(&self, language: Language) -> &str {
        match language {
            Language::English => &self.label_en,
            Language::Malayalam => &self.label_ml,
        }
    }

    pub fn matches(&self, lower_utterance: &str) -> bool {
        self.keywords.iter().any(|k| lower_utterance.contains(k.as_str()))
    }
}

/// Keyword configuration for the one-shot classifier and entity extractor.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KeywordConfig {
    /// Routing keywords, checked in classifier order.
    pub income: Vec<String>,
    pub expense: Vec<String>,
    pub purchase: Vec<String>,
    pub borrow: Vec<String>,

    /// Sub-category maps; first matching rule wins, fallback is "Other".
    pub income_categories: Vec<CategoryRule>,
    pub expense_categories: Vec<CategoryRule>,
    pub fallback_category: CategoryRule,

    /// Noise words stripped before entity-name extraction: command verbs,
    /// prepositions, currency words and entity-type nouns.
    pub stopwords_en: Vec<String>,
    pub stopwords_ml: Vec<String>,
}

impl Default for KeywordConfig {
    fn default() -> Self {
        let owned = |words: &[&str]| words.iter().map(|w| w.to_string()).collect::<Vec<_>>();

        Self {
            income: owned(&["income", "വരുമാനം"]),
            expense: owned(&["expense", "ചെലവ്"]),
            purchase: owned(&["purchase", "വാങ്ങൽ"]),
            borrow: owned(&["borrow", "കടം"]),

            income_categories: vec![
                CategoryRule::new(&["sales", "വിൽപന"], "Sales", "വിൽപന"),
                CategoryRule::new(&["service", "സേവനം"], "Service", "സേവനം"),
                CategoryRule::new(&["investment", "നിക്ഷേപം"], "Investment", "നിക്ഷേപം"),
            ],
            expense_categories: vec![
                CategoryRule::new(&["travel", "യാത്ര"], "Travel", "യാത്ര"),
                CategoryRule::new(&["food", "ഭക്ഷണം"], "Food", "ഭക്ഷണം"),
                CategoryRule::new(&["utilities", "യൂട്ടിലിറ്റി"], "Utilities", "യൂട്ടിലിറ്റി"),
                CategoryRule::new(&["supplies", "സാധനങ്ങൾ"], "Supplies", "സാധനങ്ങൾ"),
            ],
            fallback_category: CategoryRule::new(&[], "Other", "മറ്റുള്ളവ"),

            stopwords_en: owned(&[
                "purchase", "purchased", "buy", "bought", "borrow", "borrowed", "income",
                "expense", "add", "added", "record", "gave", "give", "given", "paid", "from",
                "to", "for", "of", "the", "a", "an", "rupees", "rupee", "rs", "amount",
                "supplier", "person",
            ]),
            stopwords_ml: owned(&[
                "വാങ്ങൽ", "വാങ്ങി", "കടം", "വരുമാനം", "ചെലവ്", "ചേർക്കുക", "ചേർത്തു",
                "കൊടുത്തു", "നൽകി", "നിന്ന്", "രൂപ", "തുക", "വിതരണക്കാരൻ", "വ്യക്തി",
            ]),
        }
    }
}

impl KeywordConfig {
    /// Stopwords for one locale.
    pub fn stopwords(&self, language: Language) -> &[String] {
        match language {
            Language::English => &self.stopwords_en,
            Language::Malayalam => &self.stopwords_ml,
        }
    }

    fn contains_any(lower_utterance: &str, keywords: &[String]) -> bool {
        keywords.iter().any(|k| lower_utterance.contains(k.as_str()))
    }

    pub fn mentions_income(&self, lower_utterance: &str) -> bool {
        Self::contains_any(lower_utterance, &self.income)
    }

    pub fn mentions_expense(&self, lower_utterance: &str) -> bool {
        Self::contains_any(lower_utterance, &self.expense)
    }

    pub fn mentions_purchase(&self, lower_utterance: &str) -> bool {
        Self::contains_any(lower_utterance, &self.purchase)
    }

    pub fn mentions_borrow(&self, lower_utterance: &str) -> bool {
        Self::contains_any(lower_utterance, &self.borrow)
    }

    /// Resolve an income sub-category from the utterance.
    pub fn income_category(&self, lower_utterance: &str, language: Language) -> String {
        self.income_categories
            .iter()
            .find(|rule| rule.matches(lower_utterance))
            .unwrap_or(&self.fallback_category)
            .label(language)
            .to_string()
    }

    /// Resolve an expense sub-category from the utterance.
    pub fn expense_category(&self, lower_utterance: &str, language: Language) -> String {
        self.expense_categories
            .iter()
            .find(|rule| rule.matches(lower_utterance))
            .unwrap_or(&self.fallback_category)
            .label(language)
            .to_string()
    }
}

// Dialogue control patterns. Compiled once; \b is a Unicode word boundary in
// the regex crate, so the Malayalam alternatives match whole words too.
static AFFIRMATIVE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b(yes|yeah|yep|save|confirm|ok|okay|correct|sure|അതെ|ശരി|ഉവ്വ്|സമ്മതം|സേവ്)\b")
        .unwrap()
});

static NEGATIVE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b(no|nope|change|back|wrong|ഇല്ല|വേണ്ട|മാറ്റുക|മാറ്റം|തിരികെ)\b").unwrap()
});

static RESET: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b(reset|restart|start over|വീണ്ടും തുടങ്ങുക|പുനരാരംഭിക്കുക)\b").unwrap()
});

static CANCEL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b(cancel|stop|exit|quit|റദ്ദാക്കുക|നിർത്തുക|വേണ്ടെന്ന്)\b").unwrap()
});

/// Locale-aware dialogue control patterns: confirmation replies plus the
/// quick reset/cancel commands recognized mid-dialogue.
#[derive(Debug, Clone, Default)]
pub struct DialoguePatterns;

impl DialoguePatterns {
    pub fn is_affirmative(&self, utterance: &str) -> bool {
        AFFIRMATIVE.is_match(utterance)
    }

    pub fn is_negative(&self, utterance: &str) -> bool {
        // A reply like "no, change it" is negative even though "it" is noise;
        // affirmative wins if both somehow appear ("ok no problem" is rare
        // enough that the simple precedence holds up).
        !self.is_affirmative(utterance) && NEGATIVE.is_match(utterance)
    }

    pub fn is_reset(&self, utterance: &str) -> bool {
        RESET.is_match(utterance)
    }

    pub fn is_cancel(&self, utterance: &str) -> bool {
        CANCEL.is_match(utterance)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_routing() {
        let config = KeywordConfig::default();
        assert!(config.mentions_income("add income 500 from sales"));
        assert!(config.mentions_expense("ഭക്ഷണത്തിന് 200 ചെലവ്"));
        assert!(config.mentions_purchase("purchase 1000 from abc"));
        assert!(config.mentions_borrow("ജോൺ 500 രൂപ കടം വാങ്ങി"));
        assert!(!config.mentions_income("hello there"));
    }

    #[test]
    fn test_income_category_labels() {
        let config = KeywordConfig::default();
        assert_eq!(
            config.income_category("income 500 from sales", Language::English),
            "Sales"
        );
        assert_eq!(
            config.income_category("വിൽപനയിൽ നിന്ന് 500 വരുമാനം", Language::Malayalam),
            "വിൽപന"
        );
        assert_eq!(
            config.income_category("income 500", Language::English),
            "Other"
        );
        assert_eq!(
            config.income_category("500 വരുമാനം", Language::Malayalam),
            "മറ്റുള്ളവ"
        );
    }

    #[test]
    fn test_expense_category_labels() {
        let config = KeywordConfig::default();
        assert_eq!(
            config.expense_category("expense 200 for food", Language::English),
            "Food"
        );
        assert_eq!(
            config.expense_category("expense 300 misc", Language::English),
            "Other"
        );
    }

    #[test]
    fn test_dialogue_patterns() {
        let patterns = DialoguePatterns;
        assert!(patterns.is_affirmative("yes save it"));
        assert!(patterns.is_affirmative("അതെ"));
        assert!(patterns.is_negative("no, change the amount"));
        assert!(patterns.is_negative("വേണ്ട"));
        assert!(!patterns.is_negative("yes"));
        assert!(patterns.is_reset("start over please"));
        assert!(patterns.is_cancel("cancel"));
        assert!(patterns.is_cancel("റദ്ദാക്കുക"));
        // Unrecognized replies are neither
        assert!(!patterns.is_affirmative("maybe tomorrow"));
        assert!(!patterns.is_negative("maybe tomorrow"));
    }
}
