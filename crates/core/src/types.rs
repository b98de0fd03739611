//! The voice data model
//!
//! All state here is transient and session-scoped: the engine proposes
//! records to the ledger collaborator and never retains them after emission.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::Language;

/// An amount resolved from a spoken phrase.
///
/// Absence of a match is represented by the caller holding `None` of this
/// type, never by a zero value: a silent zero would corrupt downstream
/// financial records.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedAmount {
    /// Resolved value in whole rupees, always >= 0.
    pub value: i64,
    /// The exact substring consumed by the numeral match, used to strip the
    /// amount from the utterance before name extraction.
    pub matched_text: Option<String>,
}

impl ParsedAmount {
    pub fn new(value: i64, matched_text: impl Into<String>) -> Self {
        Self {
            value,
            matched_text: Some(matched_text.into()),
        }
    }
}

/// A static numeral dictionary entry.
///
/// `is_scale` marks hundred/thousand/lakh/crore-class tokens that multiply
/// an accumulator rather than add to it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NumberScaleEntry {
    /// The spoken token; may contain a space for two-word phrases.
    pub token: String,
    pub locale: Language,
    pub value: i64,
    pub is_scale: bool,
}

impl NumberScaleEntry {
    pub fn word(token: &str, locale: Language, value: i64) -> Self {
        Self {
            token: token.to_string(),
            locale,
            value,
            is_scale: false,
        }
    }

    pub fn scale(token: &str, locale: Language, value: i64) -> Self {
        Self {
            token: token.to_string(),
            locale,
            value,
            is_scale: true,
        }
    }
}

/// The externally visible outcome of a one-shot classification or a
/// completed/failed dialogue turn.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IntentResult {
    pub success: bool,
    /// Locale-appropriate message, spoken and displayed.
    pub message: String,
    /// Short human-readable summary of what was recorded.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    /// Machine trace (original utterance plus extraction detail) retained
    /// for diagnosing recognition failures; never spoken aloud.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub debug: Option<String>,
}

impl IntentResult {
    pub fn ok(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
            summary: None,
            debug: None,
        }
    }

    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            summary: None,
            debug: None,
        }
    }

    pub fn with_summary(mut self, summary: impl Into<String>) -> Self {
        self.summary = Some(summary.into());
        self
    }

    pub fn with_debug(mut self, debug: impl Into<String>) -> Self {
        self.debug = Some(debug.into());
        self
    }
}

/// Income or expense, the two sides of the transactions table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    Income,
    Expense,
}

impl std::fmt::Display for TransactionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TransactionType::Income => f.write_str("income"),
            TransactionType::Expense => f.write_str("expense"),
        }
    }
}

/// A proposed income/expense row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionRecord {
    pub kind: TransactionType,
    /// Amount in whole rupees, strictly positive by the time it reaches
    /// the ledger (the validation gates enforce this).
    pub amount: i64,
    pub category: String,
    pub description: String,
    pub created_at: DateTime<Utc>,
}

impl TransactionRecord {
    pub fn new(
        kind: TransactionType,
        amount: i64,
        category: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            kind,
            amount,
            category: category.into(),
            description: description.into(),
            created_at: Utc::now(),
        }
    }
}

/// A proposed purchase row. `balance` is computed as `total - paid` before
/// the record is handed to the ledger.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PurchaseRecord {
    pub supplier_name: String,
    pub total_amount: i64,
    pub amount_paid: i64,
    pub balance: i64,
    pub created_at: DateTime<Utc>,
}

impl PurchaseRecord {
    pub fn new(supplier_name: impl Into<String>, total_amount: i64, amount_paid: i64) -> Self {
        Self {
            supplier_name: supplier_name.into(),
            total_amount,
            amount_paid,
            balance: total_amount - amount_paid,
            created_at: Utc::now(),
        }
    }
}

/// A proposed borrow (loan-given) row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BorrowRecord {
    pub borrower_name: String,
    pub total_given: i64,
    pub amount_paid: i64,
    pub balance: i64,
    pub created_at: DateTime<Utc>,
}

impl BorrowRecord {
    pub fn new(borrower_name: impl Into<String>, total_given: i64, amount_paid: i64) -> Self {
        Self {
            borrower_name: borrower_name.into(),
            total_given,
            amount_paid,
            balance: total_given - amount_paid,
            created_at: Utc::now(),
        }
    }
}
