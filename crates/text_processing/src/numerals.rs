//! Numeral resolution
//!
//! Turns a transcript phrase into a whole-rupee amount. Digits win when
//! present (including Malayalam digits ൦-൯); otherwise number words are
//! accumulated left to right, with scale words (hundred, thousand, ലക്ഷം,
//! കോടി) multiplying the value collected so far.
//!
//! The resolver is built once from the locale vocabulary and holds no other
//! state, so it can be shared freely.

use std::collections::HashMap;

use tracing::trace;

use sahai_voice_core::{Language, NumberScaleEntry, ParsedAmount};

/// Dictionary-driven number-phrase parser.
#[derive(Debug, Clone)]
pub struct NumeralResolver {
    /// Single-word entries, keyed by lowercased token.
    single: HashMap<String, (i64, bool)>,
    /// Multi-word entries ("അര ലക്ഷം"), keyed by lowercased space-joined
    /// form. Matched with a two-token lookahead before single words.
    multi: HashMap<String, (i64, bool)>,
}

impl NumeralResolver {
    pub fn new(vocabulary: &[NumberScaleEntry]) -> Self {
        let mut single = HashMap::new();
        let mut multi = HashMap::new();
        for entry in vocabulary {
            let key = entry.token.to_lowercase();
            let value = (entry.value, entry.is_scale);
            if key.contains(' ') {
                multi.insert(key, value);
            } else {
                single.insert(key, value);
            }
        }
        Self { single, multi }
    }

    /// Resolve an amount from free text. Returns `None` when the phrase
    /// carries no recognizable number; an absent amount is never reported
    /// as zero.
    pub fn resolve(&self, phrase: &str) -> Option<ParsedAmount> {
        if let Some(parsed) = scan_digits(phrase) {
            trace!(value = parsed.value, "resolved amount from digits");
            return Some(parsed);
        }
        let parsed = self.accumulate_words(phrase);
        if let Some(ref parsed) = parsed {
            trace!(value = parsed.value, "resolved amount from number words");
        }
        parsed
    }

    fn accumulate_words(&self, phrase: &str) -> Option<ParsedAmount> {
        let tokens = tokenize(phrase);

        // Standard compound accumulation: additive words collect into
        // `current`, a scale word multiplies `current` (or 1 for a bare
        // scale like "ലക്ഷം") and banks it into `total`.
        let mut current: i64 = 0;
        let mut total: i64 = 0;
        let mut first_span: Option<usize> = None;
        let mut last_span: usize = 0;

        let mut i = 0;
        while i < tokens.len() {
            if i + 1 < tokens.len() {
                let joined = format!("{} {}", tokens[i].text, tokens[i + 1].text);
                if let Some(&(value, is_scale)) = self.multi.get(joined.as_str()) {
                    apply(value, is_scale, &mut current, &mut total);
                    first_span.get_or_insert(tokens[i].start);
                    last_span = tokens[i + 1].end;
                    i += 2;
                    continue;
                }
            }
            if let Some(&(value, is_scale)) = self.single.get(tokens[i].text.as_str()) {
                apply(value, is_scale, &mut current, &mut total);
                first_span.get_or_insert(tokens[i].start);
                last_span = tokens[i].end;
            }
            i += 1;
        }

        total += current;
        if total <= 0 {
            return None;
        }
        let start = first_span?;
        Some(ParsedAmount::new(total, &phrase[start..last_span]))
    }
}

fn apply(value: i64, is_scale: bool, current: &mut i64, total: &mut i64) {
    if is_scale {
        // "two lakh" -> 2 * 100_000; a bare scale word still counts once.
        *total += (*current).max(1) * value;
        *current = 0;
    } else {
        *current += value;
    }
}

/// All individual words a vocabulary contributes for one locale, multi-word
/// entries split apart. Used by the entity extractor to strip number words
/// out of an utterance.
pub fn numeral_tokens(vocabulary: &[NumberScaleEntry], language: Language) -> Vec<String> {
    let mut words = Vec::new();
    for entry in vocabulary.iter().filter(|e| e.locale == language) {
        for word in entry.token.split_whitespace() {
            let word = word.to_lowercase();
            if !words.contains(&word) {
                words.push(word);
            }
        }
    }
    words
}

struct Token {
    text: String,
    start: usize,
    end: usize,
}

/// Whitespace tokenization with byte spans into the original phrase.
/// ASCII punctuation is trimmed from the lookup text only; Malayalam
/// combining marks stay attached.
fn tokenize(phrase: &str) -> Vec<Token> {
    let mut tokens = Vec::new();
    let mut start: Option<usize> = None;
    for (idx, ch) in phrase.char_indices() {
        if ch.is_whitespace() {
            if let Some(s) = start.take() {
                tokens.push(make_token(phrase, s, idx));
            }
        } else if start.is_none() {
            start = Some(idx);
        }
    }
    if let Some(s) = start {
        tokens.push(make_token(phrase, s, phrase.len()));
    }
    tokens
}

fn make_token(phrase: &str, start: usize, end: usize) -> Token {
    let text = phrase[start..end]
        .trim_matches(|c: char| c.is_ascii_punctuation())
        .to_lowercase();
    Token { text, start, end }
}

/// First run of 1-8 consecutive digit characters, if any. Longer runs are
/// skipped entirely so phone numbers and IDs are not read as amounts.
fn scan_digits(phrase: &str) -> Option<ParsedAmount> {
    let mut run_start: Option<usize> = None;
    let mut digits = String::new();
    let mut run_end = 0;

    let finish = |start: usize, end: usize, digits: &str| -> Option<ParsedAmount> {
        if digits.is_empty() || digits.len() > 8 {
            return None;
        }
        let value: i64 = digits.parse().ok()?;
        Some(ParsedAmount::new(value, &phrase[start..end]))
    };

    for (idx, ch) in phrase.char_indices() {
        if let Some(d) = ascii_digit(ch) {
            if run_start.is_none() {
                run_start = Some(idx);
                digits.clear();
            }
            digits.push(d);
            run_end = idx + ch.len_utf8();
        } else if let Some(start) = run_start.take() {
            if let Some(parsed) = finish(start, run_end, &digits) {
                return Some(parsed);
            }
        }
    }
    if let Some(start) = run_start {
        return finish(start, run_end, &digits);
    }
    None
}

/// ASCII digit equivalent of an ASCII or Malayalam digit character.
fn ascii_digit(ch: char) -> Option<char> {
    match ch {
        '0'..='9' => Some(ch),
        // U+0D66..U+0D6F
        '൦'..='൯' => {
            let offset = (ch as u32) - ('൦' as u32);
            char::from_digit(offset, 10)
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sahai_voice_config::vocabulary::number_vocabulary;

    fn resolver() -> NumeralResolver {
        NumeralResolver::new(&number_vocabulary())
    }

    #[test]
    fn test_digits_win_over_words() {
        let parsed = resolver().resolve("add income 500 rupees").unwrap();
        assert_eq!(parsed.value, 500);
        assert_eq!(parsed.matched_text.as_deref(), Some("500"));
    }

    #[test]
    fn test_malayalam_digits() {
        let parsed = resolver().resolve("൫൦൦ രൂപ വരുമാനം").unwrap();
        assert_eq!(parsed.value, 500);
        assert_eq!(parsed.matched_text.as_deref(), Some("൫൦൦"));
    }

    #[test]
    fn test_long_digit_run_is_skipped() {
        // A ten-digit phone number is not an amount.
        assert!(resolver().resolve("call 9876543210 now").is_none());
        // But a later valid run still resolves.
        let parsed = resolver().resolve("id 9876543210 pay 250").unwrap();
        assert_eq!(parsed.value, 250);
    }

    #[test]
    fn test_english_compound() {
        let resolver = resolver();
        assert_eq!(resolver.resolve("two hundred fifty").unwrap().value, 250);
        assert_eq!(resolver.resolve("five thousand").unwrap().value, 5000);
        assert_eq!(resolver.resolve("two lakh thirty thousand").unwrap().value, 230_000);
        assert_eq!(resolver.resolve("one crore").unwrap().value, 10_000_000);
    }

    #[test]
    fn test_bare_scale_counts_once() {
        let resolver = resolver();
        assert_eq!(resolver.resolve("borrowed thousand rupees").unwrap().value, 1000);
        assert_eq!(resolver.resolve("ലക്ഷം").unwrap().value, 100_000);
    }

    #[test]
    fn test_malayalam_words() {
        let resolver = resolver();
        assert_eq!(resolver.resolve("രണ്ടായിരം").unwrap().value, 2000);
        assert_eq!(resolver.resolve("അഞ്ച് നൂറ്").unwrap().value, 500);
        assert_eq!(resolver.resolve("രണ്ട് ലക്ഷം").unwrap().value, 200_000);
        assert_eq!(resolver.resolve("പത്തുകോടി").unwrap().value, 100_000_000);
    }

    #[test]
    fn test_multiword_entry_lookahead() {
        let parsed = resolver().resolve("അര ലക്ഷം കടം").unwrap();
        assert_eq!(parsed.value, 50_000);
        assert_eq!(parsed.matched_text.as_deref(), Some("അര ലക്ഷം"));
    }

    #[test]
    fn test_matched_text_spans_consumed_words() {
        let parsed = resolver().resolve("paid two hundred fifty yesterday").unwrap();
        assert_eq!(parsed.matched_text.as_deref(), Some("two hundred fifty"));
    }

    #[test]
    fn test_no_number_is_unresolved() {
        let resolver = resolver();
        assert!(resolver.resolve("").is_none());
        assert!(resolver.resolve("hello world").is_none());
        // Absent is never zero
        assert!(resolver.resolve("zero").is_none());
    }

    #[test]
    fn test_punctuation_around_words() {
        assert_eq!(resolver().resolve("total: five hundred.").unwrap().value, 500);
    }
}
