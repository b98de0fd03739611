//! In-memory ledger backend

use async_trait::async_trait;
use parking_lot::RwLock;
use tracing::{info, warn};

use sahai_voice_core::{
    BorrowRecord, Ledger, LedgerError, PurchaseRecord, TransactionRecord,
};

/// Which table a failure is injected into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Table {
    Transactions,
    Purchases,
    Borrows,
}

#[derive(Debug, Default)]
struct Store {
    transactions: Vec<TransactionRecord>,
    purchases: Vec<PurchaseRecord>,
    borrows: Vec<BorrowRecord>,
    failing: Vec<Table>,
}

/// Thread-safe in-memory [`Ledger`].
#[derive(Debug, Default)]
pub struct InMemoryLedger {
    store: RwLock<Store>,
}

impl InMemoryLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make writes to one table fail until [`Self::heal`] is called.
    pub fn fail_table(&self, table: Table) {
        let mut store = self.store.write();
        if !store.failing.contains(&table) {
            store.failing.push(table);
        }
    }

    /// Clear all injected failures.
    pub fn heal(&self) {
        self.store.write().failing.clear();
    }

    fn check(&self, table: Table) -> Result<(), LedgerError> {
        if self.store.read().failing.contains(&table) {
            warn!(?table, "ledger write rejected by injected failure");
            return Err(LedgerError::Unavailable(format!(
                "{table:?} table unavailable"
            )));
        }
        Ok(())
    }

    pub fn transactions(&self) -> Vec<TransactionRecord> {
        self.store.read().transactions.clone()
    }

    pub fn purchases(&self) -> Vec<PurchaseRecord> {
        self.store.read().purchases.clone()
    }

    pub fn borrows(&self) -> Vec<BorrowRecord> {
        self.store.read().borrows.clone()
    }
}

#[async_trait]
impl Ledger for InMemoryLedger {
    async fn insert_transaction(&self, record: TransactionRecord) -> Result<(), LedgerError> {
        self.check(Table::Transactions)?;
        info!(kind = %record.kind, amount = record.amount, "transaction stored");
        self.store.write().transactions.push(record);
        Ok(())
    }

    async fn insert_purchase(&self, record: PurchaseRecord) -> Result<(), LedgerError> {
        self.check(Table::Purchases)?;
        info!(supplier = %record.supplier_name, total = record.total_amount, "purchase stored");
        self.store.write().purchases.push(record);
        Ok(())
    }

    async fn insert_borrow(&self, record: BorrowRecord) -> Result<(), LedgerError> {
        self.check(Table::Borrows)?;
        info!(borrower = %record.borrower_name, total = record.total_given, "borrow stored");
        self.store.write().borrows.push(record);
        Ok(())
    }
}
