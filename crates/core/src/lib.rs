//! Core traits and types for the ShopSahai voice command engine
//!
//! This crate provides the foundational types used across all other crates:
//! - Language definitions (English, Malayalam)
//! - The voice data model (parsed amounts, intent results, domain records)
//! - Collaborator traits for pluggable backends (ledger persistence, TTS)
//! - Error types

pub mod error;
pub mod language;
pub mod traits;
pub mod types;

pub use error::{LedgerError, SpeechError};
pub use language::Language;
pub use traits::{Ledger, SpeechSynthesizer};
pub use types::{
    BorrowRecord, IntentResult, NumberScaleEntry, ParsedAmount, PurchaseRecord, TransactionRecord,
    TransactionType,
};
