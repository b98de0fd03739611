//! Slot-filling dialogues
//!
//! Purchase and borrow share one state machine shape: ask for the name,
//! the total, the amount already paid, then read the summary back and wait
//! for a yes/no. Slots are collected as raw strings and only validated at
//! confirm time, so a garbled middle turn never dead-ends the conversation
//! -- the confirm step routes back to whichever slot failed.

use tracing::{debug, info};

use sahai_voice_config::{DialoguePatterns, MessageCatalog};
use sahai_voice_core::{IntentResult, Language};
use sahai_voice_text::{is_valid_entity_name, NumeralResolver};

use crate::records::RecordWriter;

/// Where a dialogue stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DialogueStep {
    #[default]
    Idle,
    AskEntity,
    AskAmount,
    AskPaid,
    Confirm,
    Done,
}

/// Which record a dialogue collects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DialogueKind {
    Purchase,
    Borrow,
}

/// Collected slots. Amount slots keep the raw utterance when resolution
/// fails mid-dialogue; validation happens at confirm.
#[derive(Debug, Clone, Default)]
pub struct DialogueState {
    pub step: DialogueStep,
    pub entity_name: String,
    pub amount: String,
    pub paid: String,
}

impl DialogueState {
    pub fn clear_slots(&mut self) {
        self.entity_name.clear();
        self.amount.clear();
        self.paid.clear();
    }
}

/// Outcome of feeding one utterance into a dialogue.
#[derive(Debug, Clone)]
pub enum DialogueTurn {
    /// Speak this and keep the dialogue alive.
    Prompt(String),
    /// The dialogue ran to completion (record written, or the write
    /// failed); the session resets it to idle either way.
    Finished(IntentResult),
    /// The user abandoned the dialogue; nothing was written.
    Cancelled(String),
}

/// Drives both dialogue kinds; holds no per-conversation state itself.
#[derive(Clone)]
pub struct DialogueEngine {
    patterns: DialoguePatterns,
    messages: MessageCatalog,
    resolver: NumeralResolver,
    writer: RecordWriter,
}

impl DialogueEngine {
    pub fn new(
        patterns: DialoguePatterns,
        messages: MessageCatalog,
        resolver: NumeralResolver,
        writer: RecordWriter,
    ) -> Self {
        Self {
            patterns,
            messages,
            resolver,
            writer,
        }
    }

    /// Begin a dialogue: clear slots, move to `AskEntity`, return the
    /// opening prompt.
    pub fn start(&self, kind: DialogueKind, language: Language, state: &mut DialogueState) -> String {
        state.clear_slots();
        state.step = DialogueStep::AskEntity;
        info!(?kind, "dialogue started");
        match kind {
            DialogueKind::Purchase => self.messages.ask_supplier(language),
            DialogueKind::Borrow => self.messages.ask_borrower(language),
        }
    }

    /// Feed one utterance into an active dialogue.
    pub async fn advance(
        &self,
        kind: DialogueKind,
        state: &mut DialogueState,
        utterance: &str,
        language: Language,
    ) -> DialogueTurn {
        // Quick commands work everywhere except Idle and Confirm; at
        // Confirm the yes/no patterns own the reply ("cancel" there would
        // shadow a legitimate negative).
        if state.step != DialogueStep::Idle && state.step != DialogueStep::Confirm {
            if self.patterns.is_reset(utterance) {
                state.clear_slots();
                state.step = DialogueStep::AskEntity;
                return DialogueTurn::Prompt(self.messages.dialogue_reset(language));
            }
            if self.patterns.is_cancel(utterance) {
                *state = DialogueState::default();
                return DialogueTurn::Cancelled(self.messages.dialogue_cancelled(language));
            }
        }

        debug!(?kind, step = ?state.step, utterance, "dialogue turn");
        match state.step {
            DialogueStep::AskEntity => {
                state.entity_name = utterance.trim().to_string();
                state.step = DialogueStep::AskAmount;
                DialogueTurn::Prompt(self.messages.ask_amount(language))
            }
            DialogueStep::AskAmount => {
                state.amount = self.slot_text(utterance);
                state.step = DialogueStep::AskPaid;
                DialogueTurn::Prompt(self.messages.ask_paid(language))
            }
            DialogueStep::AskPaid => {
                state.paid = self.slot_text(utterance);
                state.step = DialogueStep::Confirm;
                DialogueTurn::Prompt(self.messages.confirm_summary(
                    language,
                    &state.entity_name,
                    &state.amount,
                    &state.paid,
                ))
            }
            DialogueStep::Confirm => self.confirm(kind, state, utterance, language).await,
            // Idle and Done never receive input from the session router.
            DialogueStep::Idle | DialogueStep::Done => {
                DialogueTurn::Prompt(self.messages.recognition_error(language))
            }
        }
    }

    async fn confirm(
        &self,
        kind: DialogueKind,
        state: &mut DialogueState,
        utterance: &str,
        language: Language,
    ) -> DialogueTurn {
        if self.patterns.is_affirmative(utterance) {
            // Validate slots now; a bad one routes back to its own step
            // instead of failing the whole dialogue.
            if !is_valid_entity_name(&state.entity_name) {
                state.step = DialogueStep::AskEntity;
                let message = match kind {
                    DialogueKind::Purchase => self.messages.supplier_not_recognized(language),
                    DialogueKind::Borrow => self.messages.borrower_not_recognized(language),
                };
                return DialogueTurn::Prompt(message);
            }
            let Some(total) = self.slot_amount(&state.amount) else {
                state.step = DialogueStep::AskAmount;
                return DialogueTurn::Prompt(self.messages.amount_retry(language));
            };
            let Some(paid) = self.paid_amount(&state.paid) else {
                state.step = DialogueStep::AskPaid;
                return DialogueTurn::Prompt(self.messages.paid_retry(language));
            };

            let description = format!("voice dialogue: {}", state.entity_name);
            let result = match kind {
                DialogueKind::Purchase => {
                    self.writer
                        .purchase(language, &state.entity_name, total, paid, &description)
                        .await
                }
                DialogueKind::Borrow => {
                    self.writer
                        .borrow(language, &state.entity_name, total, paid, &description)
                        .await
                }
            };
            state.step = DialogueStep::Done;
            info!(?kind, success = result.success, "dialogue completed");
            return DialogueTurn::Finished(result);
        }

        if self.patterns.is_negative(utterance) {
            state.step = DialogueStep::AskAmount;
            return DialogueTurn::Prompt(self.messages.ask_amount(language));
        }

        // Anything else leaves the step unchanged.
        DialogueTurn::Prompt(self.messages.confirm_reprompt(language))
    }

    /// Slot text for an amount turn: the resolved value when the phrase
    /// parses, otherwise the raw utterance kept for confirm-time retry.
    fn slot_text(&self, utterance: &str) -> String {
        match self.resolver.resolve(utterance) {
            Some(parsed) => parsed.value.to_string(),
            None => utterance.trim().to_string(),
        }
    }

    fn slot_amount(&self, slot: &str) -> Option<i64> {
        self.resolver.resolve(slot).map(|p| p.value).filter(|v| *v > 0)
    }

    /// Unlike the total, paid may legitimately be zero; only a slot the
    /// resolver cannot read at all is rejected.
    fn paid_amount(&self, slot: &str) -> Option<i64> {
        self.resolver.resolve(slot).map(|p| p.value).filter(|v| *v >= 0)
    }
}
