//! Ledger write composition
//!
//! Both the one-shot classifier and the dialogue engine end a successful
//! turn the same way: one primary row, and for purchases/borrows a mirrored
//! expense transaction (every purchase or loan given is also a cash
//! outflow). Centralizing the writes keeps the partial-success reporting
//! identical across both paths.

use std::sync::Arc;

use tracing::warn;

use sahai_voice_config::MessageCatalog;
use sahai_voice_core::{
    BorrowRecord, IntentResult, Language, Ledger, PurchaseRecord, TransactionRecord,
    TransactionType,
};

/// Shared write path over the [`Ledger`] collaborator.
#[derive(Clone)]
pub struct RecordWriter {
    ledger: Arc<dyn Ledger>,
    messages: MessageCatalog,
}

impl RecordWriter {
    pub fn new(ledger: Arc<dyn Ledger>, messages: MessageCatalog) -> Self {
        Self { ledger, messages }
    }

    /// Write a plain income/expense row.
    pub async fn transaction(
        &self,
        language: Language,
        kind: TransactionType,
        amount: i64,
        category: &str,
        description: &str,
    ) -> IntentResult {
        let record = TransactionRecord::new(kind, amount, category, description);
        match self.ledger.insert_transaction(record).await {
            Ok(()) => {
                let message = match kind {
                    TransactionType::Income => self.messages.income_saved(language, amount, category),
                    TransactionType::Expense => {
                        self.messages.expense_saved(language, amount, category)
                    }
                };
                IntentResult::ok(message).with_summary(format!("{kind} ₹{amount} ({category})"))
            }
            Err(error) => {
                IntentResult::failed(self.messages.persistence_failed(language, &error.to_string()))
            }
        }
    }

    /// Write a purchase row plus the mirrored expense transaction.
    pub async fn purchase(
        &self,
        language: Language,
        supplier: &str,
        total: i64,
        paid: i64,
        description: &str,
    ) -> IntentResult {
        let record = PurchaseRecord::new(supplier, total, paid);
        let balance = record.balance;
        if let Err(error) = self.ledger.insert_purchase(record).await {
            return IntentResult::failed(
                self.messages.persistence_failed(language, &error.to_string()),
            );
        }

        let summary = format!("purchase {supplier} ₹{total} (paid ₹{paid}, balance ₹{balance})");
        let mirror = TransactionRecord::new(
            TransactionType::Expense,
            total,
            mirror_category(language, MirrorKind::Purchase),
            description,
        );
        match self.ledger.insert_transaction(mirror).await {
            Ok(()) => IntentResult::ok(self.messages.purchase_saved(language, total, supplier))
                .with_summary(summary),
            Err(error) => {
                warn!(%error, "mirrored expense write failed after purchase row");
                IntentResult::ok(self.messages.partial_success(language, &error.to_string()))
                    .with_summary(summary)
            }
        }
    }

    /// Write a borrow row plus the mirrored expense transaction.
    pub async fn borrow(
        &self,
        language: Language,
        borrower: &str,
        total: i64,
        paid: i64,
        description: &str,
    ) -> IntentResult {
        let record = BorrowRecord::new(borrower, total, paid);
        let balance = record.balance;
        if let Err(error) = self.ledger.insert_borrow(record).await {
            return IntentResult::failed(
                self.messages.persistence_failed(language, &error.to_string()),
            );
        }

        let summary = format!("borrow {borrower} ₹{total} (paid ₹{paid}, balance ₹{balance})");
        let mirror = TransactionRecord::new(
            TransactionType::Expense,
            total,
            mirror_category(language, MirrorKind::Borrow),
            description,
        );
        match self.ledger.insert_transaction(mirror).await {
            Ok(()) => IntentResult::ok(self.messages.borrow_saved(language, total, borrower))
                .with_summary(summary),
            Err(error) => {
                warn!(%error, "mirrored expense write failed after borrow row");
                IntentResult::ok(self.messages.partial_success(language, &error.to_string()))
                    .with_summary(summary)
            }
        }
    }
}

#[derive(Clone, Copy)]
enum MirrorKind {
    Purchase,
    Borrow,
}

fn mirror_category(language: Language, kind: MirrorKind) -> &'static str {
    match (kind, language) {
        (MirrorKind::Purchase, Language::English) => "Purchases",
        (MirrorKind::Purchase, Language::Malayalam) => "വാങ്ങലുകൾ",
        (MirrorKind::Borrow, Language::English) => "Lending",
        (MirrorKind::Borrow, Language::Malayalam) => "കടം നൽകിയത്",
    }
}
