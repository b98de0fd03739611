//! End-to-end conversation flows against the in-memory ledger.

use std::sync::Arc;

use async_trait::async_trait;

use sahai_voice_agent::{DialogueKind, DialogueStep, SessionState, VoiceSession};
use sahai_voice_config::{number_vocabulary, Settings};
use sahai_voice_core::{Language, SpeechError, SpeechSynthesizer, TransactionType};
use sahai_voice_persistence::{memory::Table, InMemoryLedger};
use sahai_voice_text::NumeralResolver;

struct SilentSynthesizer;

#[async_trait]
impl SpeechSynthesizer for SilentSynthesizer {
    async fn speak(&self, _text: &str) -> Result<(), SpeechError> {
        Ok(())
    }
}

fn settings(language: Language) -> Settings {
    let mut settings = Settings::default();
    settings.language = language;
    settings.voice.cooldown_ms = 0;
    settings.voice.debounce_ms = 50;
    settings
}

fn session(language: Language) -> (VoiceSession, Arc<InMemoryLedger>) {
    let ledger = Arc::new(InMemoryLedger::new());
    let session = VoiceSession::new(
        &settings(language),
        ledger.clone(),
        Arc::new(SilentSynthesizer),
    );
    (session, ledger)
}

#[tokio::test]
async fn one_shot_income_records_transaction() {
    let (mut session, ledger) = session(Language::English);

    let result = session
        .handle_transcript("income 500 from sales")
        .await
        .unwrap();

    assert!(result.success);
    assert!(result.message.contains("₹500"));
    assert!(result.message.contains("Sales"));

    let transactions = ledger.transactions();
    assert_eq!(transactions.len(), 1);
    assert_eq!(transactions[0].kind, TransactionType::Income);
    assert_eq!(transactions[0].amount, 500);
    assert_eq!(transactions[0].category, "Sales");
}

#[tokio::test]
async fn malayalam_compound_numeral_resolves() {
    let resolver = NumeralResolver::new(&number_vocabulary());
    assert_eq!(resolver.resolve("രണ്ടായിരം").unwrap().value, 2000);
}

#[tokio::test]
async fn borrow_dialogue_runs_to_completion() {
    let (mut session, ledger) = session(Language::English);

    // Starter keyword with no amount opens the dialogue.
    let opened = session.handle_transcript("borrow").await.unwrap();
    assert!(opened.message.contains("borrowing"));
    assert_eq!(session.active_dialogue().kind(), Some(DialogueKind::Borrow));
    assert_eq!(session.active_dialogue().step(), DialogueStep::AskEntity);

    session.handle_transcript("Ramesh").await.unwrap();
    assert_eq!(session.active_dialogue().step(), DialogueStep::AskAmount);

    session.handle_transcript("500").await.unwrap();
    assert_eq!(session.active_dialogue().step(), DialogueStep::AskPaid);

    let confirm = session.handle_transcript("200").await.unwrap();
    assert_eq!(session.active_dialogue().step(), DialogueStep::Confirm);
    assert!(confirm.message.contains("Ramesh"));
    assert!(confirm.message.contains("₹500"));
    assert!(confirm.message.contains("₹200"));

    let done = session.handle_transcript("yes").await.unwrap();
    assert!(done.success);
    assert_eq!(session.active_dialogue().step(), DialogueStep::Idle);

    let borrows = ledger.borrows();
    assert_eq!(borrows.len(), 1);
    assert_eq!(borrows[0].borrower_name, "Ramesh");
    assert_eq!(borrows[0].total_given, 500);
    assert_eq!(borrows[0].amount_paid, 200);
    assert_eq!(borrows[0].balance, 300);

    // The loan also shows up as cash outflow.
    let transactions = ledger.transactions();
    assert_eq!(transactions.len(), 1);
    assert_eq!(transactions[0].kind, TransactionType::Expense);
    assert_eq!(transactions[0].amount, 500);
}

#[tokio::test]
async fn purchase_without_supplier_writes_nothing() {
    let (mut session, ledger) = session(Language::English);

    let result = session.handle_transcript("purchase 1000").await.unwrap();

    assert!(!result.success);
    assert!(result.message.contains("supplier"));
    assert!(result.debug.is_some());
    assert!(ledger.purchases().is_empty());
    assert!(ledger.transactions().is_empty());
}

#[tokio::test]
async fn one_shot_purchase_with_supplier() {
    let (mut session, ledger) = session(Language::English);

    let result = session
        .handle_transcript("purchase 1000 from Ramesh")
        .await
        .unwrap();

    assert!(result.success);
    let purchases = ledger.purchases();
    assert_eq!(purchases.len(), 1);
    assert_eq!(purchases[0].supplier_name, "Ramesh");
    assert_eq!(purchases[0].total_amount, 1000);
    assert_eq!(purchases[0].amount_paid, 0);
    assert_eq!(purchases[0].balance, 1000);

    // Mirrored expense row alongside the purchase.
    assert_eq!(ledger.transactions().len(), 1);
    assert_eq!(ledger.transactions()[0].kind, TransactionType::Expense);
}

#[tokio::test]
async fn mirrored_write_failure_reports_partial_success() {
    let (mut session, ledger) = session(Language::English);
    ledger.fail_table(Table::Transactions);

    let result = session
        .handle_transcript("purchase 1000 from Ramesh")
        .await
        .unwrap();

    // The purchase row landed, so this is not a total failure.
    assert!(result.success);
    assert!(result.message.contains("expense"));
    assert_eq!(ledger.purchases().len(), 1);
    assert!(ledger.transactions().is_empty());
}

#[tokio::test]
async fn primary_write_failure_is_a_failure() {
    let (mut session, ledger) = session(Language::English);
    ledger.fail_table(Table::Purchases);

    let result = session
        .handle_transcript("purchase 1000 from Ramesh")
        .await
        .unwrap();

    assert!(!result.success);
    assert!(ledger.purchases().is_empty());
    assert!(ledger.transactions().is_empty());
}

#[tokio::test]
async fn active_purchase_blocks_borrow_start() {
    let (mut session, _ledger) = session(Language::English);

    session.handle_transcript("purchase").await.unwrap();
    assert_eq!(
        session.active_dialogue().kind(),
        Some(DialogueKind::Purchase)
    );

    // A borrow-triggering utterance is consumed as the supplier-name slot
    // of the running purchase dialogue, not as a new dialogue.
    session.handle_transcript("borrow").await.unwrap();
    assert_eq!(
        session.active_dialogue().kind(),
        Some(DialogueKind::Purchase)
    );
    assert_eq!(session.active_dialogue().step(), DialogueStep::AskAmount);
}

#[tokio::test]
async fn cancel_discards_dialogue() {
    let (mut session, ledger) = session(Language::English);

    session.handle_transcript("borrow").await.unwrap();
    session.handle_transcript("Ramesh").await.unwrap();

    let cancelled = session.handle_transcript("cancel").await.unwrap();
    assert!(cancelled.message.contains("Cancelled"));
    assert_eq!(session.active_dialogue().kind(), None);
    assert!(ledger.borrows().is_empty());
}

#[tokio::test]
async fn confirm_ignores_unrecognized_replies() {
    let (mut session, _ledger) = session(Language::English);

    session.handle_transcript("borrow").await.unwrap();
    session.handle_transcript("Ramesh").await.unwrap();
    session.handle_transcript("500").await.unwrap();
    session.handle_transcript("nothing yet").await.unwrap();
    assert_eq!(session.active_dialogue().step(), DialogueStep::Confirm);

    // Neither affirmative nor negative: step must not move.
    let reply = session.handle_transcript("maybe tomorrow").await.unwrap();
    assert_eq!(session.active_dialogue().step(), DialogueStep::Confirm);
    assert!(reply.message.contains("yes or no"));
}

#[tokio::test]
async fn negative_at_confirm_recollects_amount() {
    let (mut session, _ledger) = session(Language::English);

    session.handle_transcript("borrow").await.unwrap();
    session.handle_transcript("Ramesh").await.unwrap();
    session.handle_transcript("500").await.unwrap();
    session.handle_transcript("200").await.unwrap();

    session.handle_transcript("no, change it").await.unwrap();
    assert_eq!(session.active_dialogue().step(), DialogueStep::AskAmount);
}

#[tokio::test]
async fn garbled_amount_caught_at_confirm() {
    let (mut session, ledger) = session(Language::English);

    session.handle_transcript("borrow").await.unwrap();
    session.handle_transcript("Ramesh").await.unwrap();
    // Unresolvable amount is kept verbatim and only rejected at confirm.
    session.handle_transcript("mumble mumble").await.unwrap();
    session.handle_transcript("nothing").await.unwrap();

    let retry = session.handle_transcript("yes").await.unwrap();
    assert!(retry.message.contains("amount"));
    assert_eq!(session.active_dialogue().step(), DialogueStep::AskAmount);
    assert!(ledger.borrows().is_empty());
}

#[tokio::test]
async fn garbled_paid_caught_at_confirm() {
    let (mut session, ledger) = session(Language::English);

    session.handle_transcript("borrow").await.unwrap();
    session.handle_transcript("Ramesh").await.unwrap();
    session.handle_transcript("500").await.unwrap();
    session.handle_transcript("mumble mumble").await.unwrap();

    // A paid slot the resolver cannot read must never default to zero.
    let retry = session.handle_transcript("yes").await.unwrap();
    assert!(retry.message.contains("paid"));
    assert_eq!(session.active_dialogue().step(), DialogueStep::AskPaid);
    assert!(ledger.borrows().is_empty());

    // An explicit zero is a real answer and completes the record.
    session.handle_transcript("0").await.unwrap();
    assert_eq!(session.active_dialogue().step(), DialogueStep::Confirm);
    let done = session.handle_transcript("yes").await.unwrap();
    assert!(done.success);

    let borrows = ledger.borrows();
    assert_eq!(borrows.len(), 1);
    assert_eq!(borrows[0].amount_paid, 0);
    assert_eq!(borrows[0].balance, 500);
}

#[tokio::test]
async fn interim_transcripts_collapse_before_dispatch() {
    let (mut session, ledger) = session(Language::English);
    let sender = session.transcript_sender();

    // The recognizer streams a growing interim result and then the final
    // text inside the debounce window; only the final text may dispatch.
    sender.send("income 5".to_string()).await.unwrap();
    sender.send("income 500 from sales".to_string()).await.unwrap();

    let result = session.next_turn().await.unwrap();
    assert!(result.success);

    let transactions = ledger.transactions();
    assert_eq!(transactions.len(), 1);
    assert_eq!(transactions[0].amount, 500);
}

#[tokio::test]
async fn malayalam_one_shot_income() {
    let (mut session, ledger) = session(Language::Malayalam);

    let result = session
        .handle_transcript("500 രൂപ വരുമാനം ചേർക്കുക")
        .await
        .unwrap();

    assert!(result.success);
    assert!(result.message.contains("₹500"));
    let transactions = ledger.transactions();
    assert_eq!(transactions.len(), 1);
    assert_eq!(transactions[0].category, "മറ്റുള്ളവ");
}

#[tokio::test]
async fn session_broadcasts_turn_events() {
    let (mut session, _ledger) = session(Language::English);
    let mut events = session.subscribe();

    session
        .handle_transcript("income 500 from sales")
        .await
        .unwrap();

    let mut saw_transcript = false;
    let mut saw_response = false;
    let mut saw_speech = false;
    while let Ok(event) = events.try_recv() {
        match event {
            sahai_voice_agent::SessionEvent::Transcript(text) => {
                assert_eq!(text, "income 500 from sales");
                saw_transcript = true;
            }
            sahai_voice_agent::SessionEvent::Response(result) => {
                assert!(result.success);
                saw_response = true;
            }
            sahai_voice_agent::SessionEvent::SpeechStarted
            | sahai_voice_agent::SessionEvent::SpeechFinished => saw_speech = true,
        }
    }
    assert!(saw_transcript && saw_response && saw_speech);
}

#[tokio::test]
async fn unrecognized_command_gets_usage_hint() {
    let (mut session, ledger) = session(Language::English);

    let result = session
        .handle_transcript("what a lovely morning")
        .await
        .unwrap();

    assert!(result.success);
    assert!(result.message.contains("help"));
    assert!(ledger.transactions().is_empty());
    assert_eq!(session.state(), SessionState::Listening);
}
