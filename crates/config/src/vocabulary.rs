//! Numeral vocabulary
//!
//! The combined English + Malayalam number dictionary consumed by the
//! numeral resolver. Scale entries (hundred/thousand/lakh/crore class)
//! multiply the resolver's accumulator; plain entries add to it. Fused
//! Malayalam forms (രണ്ടായിരം = 2000, അഞ്ഞൂറ് = 500) are plain entries so a
//! single-word utterance resolves directly.
//!
//! The table is finite by design: tokens not present are skipped by the
//! resolver, which can under-parse exotic phrasings but never crashes.

use sahai_voice_core::{Language, NumberScaleEntry};

/// Build the full numeral dictionary.
///
/// Returned as plain data so callers can inject alternate dictionaries in
/// tests; the engine never reaches for a global.
pub fn number_vocabulary() -> Vec<NumberScaleEntry> {
    use Language::{English, Malayalam};

    let mut entries = Vec::with_capacity(128);

    // English units and teens
    let en_words: &[(&str, i64)] = &[
        ("zero", 0),
        ("one", 1),
        ("two", 2),
        ("three", 3),
        ("four", 4),
        ("five", 5),
        ("six", 6),
        ("seven", 7),
        ("eight", 8),
        ("nine", 9),
        ("ten", 10),
        ("eleven", 11),
        ("twelve", 12),
        ("thirteen", 13),
        ("fourteen", 14),
        ("fifteen", 15),
        ("sixteen", 16),
        ("seventeen", 17),
        ("eighteen", 18),
        ("nineteen", 19),
        ("twenty", 20),
        ("thirty", 30),
        ("forty", 40),
        ("fifty", 50),
        ("sixty", 60),
        ("seventy", 70),
        ("eighty", 80),
        ("ninety", 90),
    ];
    for (token, value) in en_words {
        entries.push(NumberScaleEntry::word(token, English, *value));
    }

    // English scale words, including the Indian lakh/crore system
    let en_scales: &[(&str, i64)] = &[
        ("hundred", 100),
        ("thousand", 1_000),
        ("lakh", 100_000),
        ("lakhs", 100_000),
        ("lac", 100_000),
        ("million", 1_000_000),
        ("crore", 10_000_000),
        ("crores", 10_000_000),
    ];
    for (token, value) in en_scales {
        entries.push(NumberScaleEntry::scale(token, English, *value));
    }

    // Malayalam units and teens
    let ml_words: &[(&str, i64)] = &[
        ("പൂജ്യം", 0),
        ("ഒന്ന്", 1),
        ("രണ്ട്", 2),
        ("മൂന്ന്", 3),
        ("നാല്", 4),
        ("അഞ്ച്", 5),
        ("ആറ്", 6),
        ("ഏഴ്", 7),
        ("എട്ട്", 8),
        ("ഒമ്പത്", 9),
        ("ഒൻപത്", 9),
        ("പത്ത്", 10),
        ("പതിനൊന്ന്", 11),
        ("പന്ത്രണ്ട്", 12),
        ("പതിമൂന്ന്", 13),
        ("പതിനാല്", 14),
        ("പതിനഞ്ച്", 15),
        ("പതിനാറ്", 16),
        ("പതിനേഴ്", 17),
        ("പതിനെട്ട്", 18),
        ("പത്തൊമ്പത്", 19),
        ("ഇരുപത്", 20),
        ("മുപ്പത്", 30),
        ("നാല്പത്", 40),
        ("നാൽപ്പത്", 40),
        ("അമ്പത്", 50),
        ("അറുപത്", 60),
        ("എഴുപത്", 70),
        ("എൺപത്", 80),
        ("തൊണ്ണൂറ്", 90),
    ];
    for (token, value) in ml_words {
        entries.push(NumberScaleEntry::word(token, Malayalam, *value));
    }

    // Fused Malayalam hundreds and thousands; spoken as a single word, so
    // they behave additively rather than as multipliers
    let ml_fused: &[(&str, i64)] = &[
        ("ഇരുനൂറ്", 200),
        ("മുന്നൂറ്", 300),
        ("നാനൂറ്", 400),
        ("അഞ്ഞൂറ്", 500),
        ("അറുനൂറ്", 600),
        ("എഴുനൂറ്", 700),
        ("എണ്ണൂറ്", 800),
        ("തൊള്ളായിരം", 900),
        ("രണ്ടായിരം", 2_000),
        ("മൂവായിരം", 3_000),
        ("നാലായിരം", 4_000),
        ("അയ്യായിരം", 5_000),
        ("പതിനായിരം", 10_000),
        // Two-word phrases caught by the resolver's lookahead
        ("അര ലക്ഷം", 50_000),
        ("ഒന്നര ലക്ഷം", 150_000),
    ];
    for (token, value) in ml_fused {
        entries.push(NumberScaleEntry::word(token, Malayalam, *value));
    }

    // Malayalam scale words
    let ml_scales: &[(&str, i64)] = &[
        ("നൂറ്", 100),
        ("ആയിരം", 1_000),
        ("ലക്ഷം", 100_000),
        ("കോടി", 10_000_000),
        ("പത്തുകോടി", 100_000_000),
    ];
    for (token, value) in ml_scales {
        entries.push(NumberScaleEntry::scale(token, Malayalam, *value));
    }

    entries
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vocabulary_has_both_locales() {
        let vocab = number_vocabulary();
        assert!(vocab.iter().any(|e| e.locale == Language::English));
        assert!(vocab.iter().any(|e| e.locale == Language::Malayalam));
    }

    #[test]
    fn test_scale_classes_reach_ten_crore() {
        let vocab = number_vocabulary();
        let max_scale = vocab
            .iter()
            .filter(|e| e.is_scale)
            .map(|e| e.value)
            .max()
            .unwrap();
        assert_eq!(max_scale, 100_000_000);
    }

    #[test]
    fn test_fused_two_thousand_present() {
        let vocab = number_vocabulary();
        let entry = vocab.iter().find(|e| e.token == "രണ്ടായിരം").unwrap();
        assert_eq!(entry.value, 2_000);
        assert!(!entry.is_scale);
    }

    #[test]
    fn test_no_duplicate_tokens_per_locale() {
        let vocab = number_vocabulary();
        let mut seen = std::collections::HashSet::new();
        for entry in &vocab {
            assert!(
                seen.insert((entry.token.clone(), entry.locale)),
                "duplicate token {}",
                entry.token
            );
        }
    }
}
