//! Text processing for the ShopSahai voice engine
//!
//! Two pure, dictionary-driven stages sit between the raw transcript and
//! the conversation layer:
//! - [`numerals`] turns a free-text phrase into an integer amount
//!   (digits, English number words, Malayalam number words with
//!   multiplicative scale words)
//! - [`entities`] strips numeral/keyword noise from an utterance and
//!   produces a candidate supplier/borrower name, with fuzzy correction
//!   against a reference list
//!
//! Everything here is injected configuration plus stateless functions; the
//! same input always yields the same output.

pub mod entities;
pub mod fuzzy;
pub mod numerals;

pub use entities::{is_valid_entity_name, EntityExtractor, ExtractorConfig};
pub use fuzzy::{levenshtein, normalized_distance, NameMatcher};
pub use numerals::{numeral_tokens, NumeralResolver};
