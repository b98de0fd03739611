//! One-shot intent classification
//!
//! Routes a single utterance by keyword, in a fixed order (income, expense,
//! purchase, borrow), and handles the whole command in one turn. Every
//! branch gates on a resolved positive amount; the purchase/borrow branches
//! additionally gate on a usable entity name. Gate failures carry a debug
//! trace of the original utterance so recognition problems can be diagnosed
//! from logs instead of guesswork.

use std::collections::HashMap;

use tracing::{debug, info};

use sahai_voice_config::{KeywordConfig, MessageCatalog};
use sahai_voice_core::{IntentResult, Language, ParsedAmount, TransactionType};
use sahai_voice_text::{is_valid_entity_name, EntityExtractor, NumeralResolver};

use crate::records::RecordWriter;

/// One variant per command category, in routing order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntentKind {
    Income,
    Expense,
    Purchase,
    Borrow,
}

/// Keyword-routed one-shot command handler.
#[derive(Clone)]
pub struct IntentClassifier {
    keywords: KeywordConfig,
    messages: MessageCatalog,
    resolver: NumeralResolver,
    extractor: EntityExtractor,
    references: HashMap<Language, Vec<String>>,
    writer: RecordWriter,
}

impl IntentClassifier {
    pub fn new(
        keywords: KeywordConfig,
        messages: MessageCatalog,
        resolver: NumeralResolver,
        extractor: EntityExtractor,
        references: HashMap<Language, Vec<String>>,
        writer: RecordWriter,
    ) -> Self {
        Self {
            keywords,
            messages,
            resolver,
            extractor,
            references,
            writer,
        }
    }

    /// First matching category for the utterance, if any.
    pub fn detect(&self, utterance: &str) -> Option<IntentKind> {
        let lower = utterance.to_lowercase();
        if self.keywords.mentions_income(&lower) {
            Some(IntentKind::Income)
        } else if self.keywords.mentions_expense(&lower) {
            Some(IntentKind::Expense)
        } else if self.keywords.mentions_purchase(&lower) {
            Some(IntentKind::Purchase)
        } else if self.keywords.mentions_borrow(&lower) {
            Some(IntentKind::Borrow)
        } else {
            None
        }
    }

    /// Classify and execute one utterance. Always returns a structured
    /// result; an unrecognized command gets the usage hint, not an error.
    pub async fn classify(&self, utterance: &str, language: Language) -> IntentResult {
        let amount = self.resolver.resolve(utterance);
        let kind = self.detect(utterance);
        debug!(?kind, amount = ?amount.as_ref().map(|a| a.value), utterance, "classified");

        match kind {
            Some(IntentKind::Income) => {
                self.handle_transaction(TransactionType::Income, utterance, amount, language)
                    .await
            }
            Some(IntentKind::Expense) => {
                self.handle_transaction(TransactionType::Expense, utterance, amount, language)
                    .await
            }
            Some(IntentKind::Purchase) => {
                self.handle_entity_command(IntentKind::Purchase, utterance, amount, language)
                    .await
            }
            Some(IntentKind::Borrow) => {
                self.handle_entity_command(IntentKind::Borrow, utterance, amount, language)
                    .await
            }
            None => IntentResult::ok(self.messages.usage_hint(language))
                .with_debug(format!("utterance: {utterance:?}; no category keyword")),
        }
    }

    async fn handle_transaction(
        &self,
        kind: TransactionType,
        utterance: &str,
        amount: Option<ParsedAmount>,
        language: Language,
    ) -> IntentResult {
        let Some(amount) = positive(amount) else {
            let example = match kind {
                TransactionType::Income => self.messages.amount_example_income(language),
                TransactionType::Expense => self.messages.amount_example_expense(language),
            };
            return IntentResult::failed(self.messages.amount_missing(language, example))
                .with_debug(format!("utterance: {utterance:?}; amount: unresolved"));
        };

        let lower = utterance.to_lowercase();
        let category = match kind {
            TransactionType::Income => self.keywords.income_category(&lower, language),
            TransactionType::Expense => self.keywords.expense_category(&lower, language),
        };

        info!(%kind, amount = amount.value, %category, "one-shot transaction");
        self.writer
            .transaction(language, kind, amount.value, &category, utterance)
            .await
            .with_debug(format!("utterance: {utterance:?}; category: {category}"))
    }

    async fn handle_entity_command(
        &self,
        kind: IntentKind,
        utterance: &str,
        amount: Option<ParsedAmount>,
        language: Language,
    ) -> IntentResult {
        let Some(amount) = positive(amount) else {
            let example = match kind {
                IntentKind::Purchase => self.messages.amount_example_purchase(language),
                _ => self.messages.amount_example_borrow(language),
            };
            return IntentResult::failed(self.messages.amount_missing(language, example))
                .with_debug(format!("utterance: {utterance:?}; amount: unresolved"));
        };

        let references = self
            .references
            .get(&language)
            .map(Vec::as_slice)
            .unwrap_or(&[]);
        let name = self.extractor.extract(
            utterance,
            amount.matched_text.as_deref(),
            language,
            references,
        );

        if !is_valid_entity_name(&name) {
            let message = match kind {
                IntentKind::Purchase => self.messages.supplier_not_recognized(language),
                _ => self.messages.borrower_not_recognized(language),
            };
            return IntentResult::failed(message)
                .with_debug(format!("utterance: {utterance:?}; extracted: {name:?}"));
        }

        info!(?kind, amount = amount.value, %name, "one-shot entity command");
        let result = match kind {
            IntentKind::Purchase => {
                self.writer
                    .purchase(language, &name, amount.value, 0, utterance)
                    .await
            }
            _ => {
                self.writer
                    .borrow(language, &name, amount.value, 0, utterance)
                    .await
            }
        };
        result.with_debug(format!("utterance: {utterance:?}; extracted: {name:?}"))
    }
}

fn positive(amount: Option<ParsedAmount>) -> Option<ParsedAmount> {
    amount.filter(|a| a.value > 0)
}
