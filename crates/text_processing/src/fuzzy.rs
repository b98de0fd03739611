//! Fuzzy name matching
//!
//! Speech recognition mangles proper nouns more than anything else, so
//! candidate names are corrected against a reference list with normalized
//! Levenshtein distance. Matching is char-based (not byte-based) so
//! Malayalam text measures sensibly.

use tracing::debug;
use unicode_segmentation::UnicodeSegmentation;

/// Levenshtein edit distance, case-insensitive, two-row implementation.
pub fn levenshtein(a: &str, b: &str) -> usize {
    let a: Vec<char> = a.to_lowercase().chars().collect();
    let b: Vec<char> = b.to_lowercase().chars().collect();

    if a.is_empty() {
        return b.len();
    }
    if b.is_empty() {
        return a.len();
    }

    let mut prev: Vec<usize> = (0..=b.len()).collect();
    let mut row = vec![0usize; b.len() + 1];

    for (i, ca) in a.iter().enumerate() {
        row[0] = i + 1;
        for (j, cb) in b.iter().enumerate() {
            let cost = usize::from(ca != cb);
            row[j + 1] = (prev[j + 1] + 1).min(row[j] + 1).min(prev[j] + cost);
        }
        std::mem::swap(&mut prev, &mut row);
    }
    prev[b.len()]
}

/// Edit distance scaled by the longer string's char count, so short and
/// long names are held to the same relative standard. 0.0 means identical.
pub fn normalized_distance(a: &str, b: &str) -> f64 {
    let longest = a.chars().count().max(b.chars().count());
    if longest == 0 {
        return 0.0;
    }
    levenshtein(a, b) as f64 / longest as f64
}

/// Matches a garbled utterance against a reference name list.
#[derive(Debug, Clone)]
pub struct NameMatcher {
    names: Vec<String>,
    max_distance: f64,
}

impl NameMatcher {
    pub fn new(names: Vec<String>, max_distance: f64) -> Self {
        Self { names, max_distance }
    }

    /// Best accepted reference name for the utterance, or `None` when
    /// nothing comes close enough. Each name is compared against every
    /// token window of its own word length, so "from abc traders today"
    /// can still hit the two-word name "ABC Traders".
    pub fn best_match(&self, utterance: &str) -> Option<&str> {
        let tokens: Vec<&str> = utterance.unicode_words().collect();

        let mut best: Option<(&str, f64)> = None;
        for name in &self.names {
            let width = name.unicode_words().count().max(1);
            let distance = if tokens.len() >= width {
                tokens
                    .windows(width)
                    .map(|window| normalized_distance(&window.join(" "), name))
                    .fold(f64::INFINITY, f64::min)
            } else {
                normalized_distance(utterance.trim(), name)
            };

            if distance <= self.max_distance
                && best.map_or(true, |(_, d)| distance < d)
            {
                best = Some((name.as_str(), distance));
            }
        }

        if let Some((name, distance)) = best {
            debug!(name, distance, "fuzzy name match accepted");
        }
        best.map(|(name, _)| name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_levenshtein_basics() {
        assert_eq!(levenshtein("", ""), 0);
        assert_eq!(levenshtein("ramesh", ""), 6);
        assert_eq!(levenshtein("ramesh", "ramesh"), 0);
        assert_eq!(levenshtein("ramesh", "Ramesh"), 0);
        assert_eq!(levenshtein("ramesh", "rameesh"), 1);
        assert_eq!(levenshtein("kitten", "sitting"), 3);
    }

    #[test]
    fn test_levenshtein_malayalam_chars() {
        // One char substitution, measured in chars not bytes.
        assert_eq!(levenshtein("രമേശ്", "രമേഷ്"), 1);
    }

    #[test]
    fn test_normalized_distance() {
        assert!((normalized_distance("", "") - 0.0).abs() < f64::EPSILON);
        assert!((normalized_distance("abcd", "abcx") - 0.25).abs() < f64::EPSILON);
    }

    #[test]
    fn test_matcher_corrects_close_names() {
        let matcher = NameMatcher::new(
            vec!["Ramesh".to_string(), "Suresh".to_string()],
            0.4,
        );
        assert_eq!(matcher.best_match("ramish"), Some("Ramesh"));
        assert_eq!(matcher.best_match("money given to surish"), Some("Suresh"));
    }

    #[test]
    fn test_matcher_rejects_distant_names() {
        let matcher = NameMatcher::new(vec!["Ramesh".to_string()], 0.4);
        assert_eq!(matcher.best_match("completely unrelated"), None);
    }

    #[test]
    fn test_matcher_multiword_window() {
        let matcher = NameMatcher::new(vec!["ABC Traders".to_string()], 0.4);
        assert_eq!(
            matcher.best_match("purchase from abc traders today"),
            Some("ABC Traders")
        );
    }
}
