//! Conversation layer of the ShopSahai voice engine
//!
//! Three pieces, stacked:
//! - [`intent`]: one-shot command classification ("add income 500 from
//!   sales" handled in a single turn)
//! - [`dialogue`]: the multi-turn slot-filling state machines for
//!   purchases and borrows
//! - [`session`]: the controller that owns both, routes each transcript,
//!   and serializes speech output so the engine never hears itself
//!
//! Every turn ends in a structured [`sahai_voice_core::IntentResult`];
//! nothing in this crate propagates an error past its own boundary.

pub mod dialogue;
pub mod intent;
pub mod records;
pub mod session;

pub use dialogue::{DialogueEngine, DialogueKind, DialogueState, DialogueStep, DialogueTurn};
pub use intent::{IntentClassifier, IntentKind};
pub use records::RecordWriter;
pub use session::{ActiveDialogue, SessionEvent, SessionLexicons, SessionState, VoiceSession};
