//! Error types for the collaborator seams
//!
//! Nothing in the engine throws past its own boundary: these errors are
//! always folded back into an `IntentResult` or a dialogue prompt before
//! they reach the user.

use thiserror::Error;

/// Errors surfaced by the persistence collaborator.
#[derive(Error, Debug, Clone)]
pub enum LedgerError {
    /// The datastore rejected the row (validation, constraint, auth).
    #[error("write rejected: {0}")]
    Rejected(String),

    /// The datastore could not be reached.
    #[error("storage unavailable: {0}")]
    Unavailable(String),
}

/// Errors surfaced by the text-to-speech collaborator.
#[derive(Error, Debug, Clone)]
pub enum SpeechError {
    #[error("speech synthesis failed: {0}")]
    Synthesis(String),
}
