//! Collaborator traits
//!
//! The voice engine only ever *proposes* records and prompt text; storage
//! and audio are behind these seams so the engine can be driven end-to-end
//! in tests with simulated implementations.

use async_trait::async_trait;

use crate::error::{LedgerError, SpeechError};
use crate::types::{BorrowRecord, PurchaseRecord, TransactionRecord};

/// The persistence collaborator (remote structured datastore).
///
/// The engine computes `balance = total - paid` before calling; records
/// arrive fully validated. A failed write is reported back to the user with
/// the collaborator's error text embedded in the message.
#[async_trait]
pub trait Ledger: Send + Sync {
    async fn insert_transaction(&self, record: TransactionRecord) -> Result<(), LedgerError>;

    async fn insert_purchase(&self, record: PurchaseRecord) -> Result<(), LedgerError>;

    async fn insert_borrow(&self, record: BorrowRecord) -> Result<(), LedgerError>;
}

/// The text-to-speech collaborator.
///
/// `speak` resolves when playback has completed; the session controller
/// relies on that single completion to release its speaking lock.
#[async_trait]
pub trait SpeechSynthesizer: Send + Sync {
    async fn speak(&self, text: &str) -> Result<(), SpeechError>;
}
