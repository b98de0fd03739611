//! Ledger storage
//!
//! The engine only ever talks to the [`Ledger`] trait; this crate provides
//! the in-memory backend used by the app shell and by tests. Failure
//! injection is part of the real surface, not a test hack: the classifier's
//! partial-success path (purchase saved, mirrored expense failed) can only
//! be exercised against a backend that fails on demand.

pub mod memory;

pub use memory::InMemoryLedger;
