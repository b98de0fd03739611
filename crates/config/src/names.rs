//! Reference name lists for fuzzy correction
//!
//! These are used only to correct a garbled transcript towards a known
//! supplier/borrower name, never to reject an otherwise well-formed name.
//! The surrounding app replaces them with the shop's actual contact list.

use sahai_voice_core::Language;

/// Default reference names for one locale.
pub fn default_reference_names(language: Language) -> Vec<String> {
    let names: &[&str] = match language {
        Language::English => &[
            "Ramesh", "Suresh", "Rajan", "Anil", "Biju", "Manoj", "Sunil", "Shaji",
            "Thomas", "Joseph", "ABC Traders", "Kerala Traders", "City Agencies",
        ],
        Language::Malayalam => &[
            "രമേശ്", "സുരേഷ്", "രാജൻ", "അനിൽ", "ബിജു", "മനോജ്", "സുനിൽ", "ഷാജി",
            "തോമസ്", "ജോസഫ്",
        ],
    };
    names.iter().map(|n| n.to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lists_nonempty() {
        assert!(!default_reference_names(Language::English).is_empty());
        assert!(!default_reference_names(Language::Malayalam).is_empty());
    }
}
