//! Session control
//!
//! One [`VoiceSession`] per open voice interaction. Transcripts are fed
//! through an inbox channel and debounced: a newer delivery inside the
//! window supersedes the pending text and restarts the timer, so interim
//! recognition results collapse and only the settled final text is
//! dispatched. Each settled transcript is routed exactly once (active
//! dialogue first, then dialogue starters, then the one-shot classifier),
//! and speech output is serialized: while a prompt is being spoken, and
//! for a short cool-down afterwards, incoming transcripts are discarded so
//! the engine never reacts to its own voice.
//!
//! Everything runs on one logical flow; the session takes `&mut self` and
//! handles one turn at a time.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{broadcast, mpsc};
use tokio::time::{sleep, timeout};
use tracing::{debug, info, warn};
use uuid::Uuid;

use sahai_voice_config::{
    default_reference_names, number_vocabulary, DialoguePatterns, KeywordConfig, MessageCatalog,
    Settings, VoiceTuning,
};
use sahai_voice_core::{
    IntentResult, Language, Ledger, NumberScaleEntry, SpeechSynthesizer,
};
use sahai_voice_text::{numeral_tokens, EntityExtractor, ExtractorConfig, NumeralResolver};

use crate::dialogue::{DialogueEngine, DialogueKind, DialogueState, DialogueStep, DialogueTurn};
use crate::intent::IntentClassifier;
use crate::records::RecordWriter;

/// What the session is doing right now.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionState {
    Idle,
    Listening,
    Processing,
    Speaking,
}

/// At most one dialogue may be live; the variant carries its state, so a
/// second dialogue cannot exist even by accident.
#[derive(Debug, Clone, Default)]
pub enum ActiveDialogue {
    #[default]
    None,
    Purchase(DialogueState),
    Borrow(DialogueState),
}

impl ActiveDialogue {
    pub fn step(&self) -> DialogueStep {
        match self {
            ActiveDialogue::None => DialogueStep::Idle,
            ActiveDialogue::Purchase(state) | ActiveDialogue::Borrow(state) => state.step,
        }
    }

    pub fn kind(&self) -> Option<DialogueKind> {
        match self {
            ActiveDialogue::None => None,
            ActiveDialogue::Purchase(_) => Some(DialogueKind::Purchase),
            ActiveDialogue::Borrow(_) => Some(DialogueKind::Borrow),
        }
    }
}

/// Session lifecycle notifications for the UI layer.
#[derive(Debug, Clone)]
pub enum SessionEvent {
    Transcript(String),
    Response(IntentResult),
    SpeechStarted,
    SpeechFinished,
}

/// Immutable dictionaries a session is constructed with. Injected rather
/// than read from globals so tests and alternate locales can swap them.
#[derive(Debug, Clone)]
pub struct SessionLexicons {
    pub vocabulary: Vec<NumberScaleEntry>,
    pub keywords: KeywordConfig,
    pub references: HashMap<Language, Vec<String>>,
}

impl Default for SessionLexicons {
    fn default() -> Self {
        Self {
            vocabulary: number_vocabulary(),
            keywords: KeywordConfig::default(),
            references: [
                (Language::English, default_reference_names(Language::English)),
                (
                    Language::Malayalam,
                    default_reference_names(Language::Malayalam),
                ),
            ]
            .into_iter()
            .collect(),
        }
    }
}

/// The conversation controller.
pub struct VoiceSession {
    id: Uuid,
    language: Language,
    state: SessionState,
    active: ActiveDialogue,
    classifier: IntentClassifier,
    engine: DialogueEngine,
    keywords: KeywordConfig,
    resolver: NumeralResolver,
    synthesizer: Arc<dyn SpeechSynthesizer>,
    tuning: VoiceTuning,
    events: broadcast::Sender<SessionEvent>,
    transcripts: mpsc::Sender<String>,
    inbox: mpsc::Receiver<String>,
}

impl VoiceSession {
    /// Session over the default dictionaries.
    pub fn new(
        settings: &Settings,
        ledger: Arc<dyn Ledger>,
        synthesizer: Arc<dyn SpeechSynthesizer>,
    ) -> Self {
        Self::with_lexicons(settings, SessionLexicons::default(), ledger, synthesizer)
    }

    /// Session over injected dictionaries.
    pub fn with_lexicons(
        settings: &Settings,
        lexicons: SessionLexicons,
        ledger: Arc<dyn Ledger>,
        synthesizer: Arc<dyn SpeechSynthesizer>,
    ) -> Self {
        let SessionLexicons {
            vocabulary,
            keywords,
            references,
        } = lexicons;

        let messages = MessageCatalog;
        let resolver = NumeralResolver::new(&vocabulary);

        let extractor = EntityExtractor::new(ExtractorConfig {
            max_distance: settings.matching.fuzzy_accept_distance,
            tail_tokens: settings.matching.fallback_tail_tokens,
        })
        .with_locale(
            Language::English,
            numeral_tokens(&vocabulary, Language::English),
            keywords.stopwords_en.clone(),
        )
        .with_locale(
            Language::Malayalam,
            numeral_tokens(&vocabulary, Language::Malayalam),
            keywords.stopwords_ml.clone(),
        );

        let writer = RecordWriter::new(ledger, messages.clone());
        let classifier = IntentClassifier::new(
            keywords.clone(),
            messages.clone(),
            resolver.clone(),
            extractor,
            references,
            writer.clone(),
        );
        let engine = DialogueEngine::new(DialoguePatterns, messages, resolver.clone(), writer);

        let (events, _) = broadcast::channel(32);
        let (transcripts, inbox) = mpsc::channel(32);
        let id = Uuid::new_v4();
        info!(%id, language = %settings.language, "voice session created");

        Self {
            id,
            language: settings.language,
            state: SessionState::Listening,
            active: ActiveDialogue::None,
            classifier,
            engine,
            keywords,
            resolver,
            synthesizer,
            tuning: settings.voice.clone(),
            events,
            transcripts,
            inbox,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn language(&self) -> Language {
        self.language
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn active_dialogue(&self) -> &ActiveDialogue {
        &self.active
    }

    pub fn subscribe(&self) -> broadcast::Receiver<SessionEvent> {
        self.events.subscribe()
    }

    /// Handle for the speech recognizer to deliver transcripts into the
    /// session, interim results included.
    pub fn transcript_sender(&self) -> mpsc::Sender<String> {
        self.transcripts.clone()
    }

    /// Await the next settled transcript and handle it end to end: debounce,
    /// route, speak the response, return the structured result. Returns
    /// `None` once all transcript senders are gone.
    pub async fn next_turn(&mut self) -> Option<IntentResult> {
        let utterance = loop {
            let settled = self.settled_transcript().await?;
            let trimmed = settled.trim();
            if !trimmed.is_empty() {
                break trimmed.to_string();
            }
        };

        self.state = SessionState::Processing;
        let _ = self.events.send(SessionEvent::Transcript(utterance.clone()));

        let result = self.dispatch(&utterance).await;
        let _ = self.events.send(SessionEvent::Response(result.clone()));

        self.speak(&result.message).await;
        self.discard_spoken_echo();
        self.state = SessionState::Listening;
        Some(result)
    }

    /// Convenience path for callers that already hold a settled transcript:
    /// deliver it and run the turn. Empty text is dropped outright.
    pub async fn handle_transcript(&mut self, utterance: &str) -> Option<IntentResult> {
        if utterance.trim().is_empty() {
            return None;
        }
        self.transcripts.send(utterance.to_string()).await.ok()?;
        self.next_turn().await
    }

    /// Debounce: take the next delivery, then keep replacing it while newer
    /// text arrives inside the window. Every arrival cancels the pending
    /// dispatch and restarts the timer, so a burst of growing interim
    /// results collapses to its final member.
    async fn settled_transcript(&mut self) -> Option<String> {
        let mut text = self.inbox.recv().await?;
        let window = Duration::from_millis(self.tuning.debounce_ms);
        loop {
            match timeout(window, self.inbox.recv()).await {
                Ok(Some(newer)) => {
                    debug!(superseded = %text, "interim transcript collapsed");
                    text = newer;
                }
                Ok(None) | Err(_) => break,
            }
        }
        Some(text)
    }

    /// Anything delivered while the session was speaking is its own prompt
    /// leaking back through the recognizer.
    fn discard_spoken_echo(&mut self) {
        while let Ok(stale) = self.inbox.try_recv() {
            debug!(transcript = %stale, "transcript dropped while speaking");
        }
    }

    /// Routing order: live purchase dialogue, live borrow dialogue,
    /// dialogue starters, one-shot classifier.
    async fn dispatch(&mut self, utterance: &str) -> IntentResult {
        let mut active = std::mem::take(&mut self.active);
        let turn = match &mut active {
            ActiveDialogue::Purchase(state) => Some(
                self.engine
                    .advance(DialogueKind::Purchase, state, utterance, self.language)
                    .await,
            ),
            ActiveDialogue::Borrow(state) => Some(
                self.engine
                    .advance(DialogueKind::Borrow, state, utterance, self.language)
                    .await,
            ),
            ActiveDialogue::None => None,
        };

        match turn {
            Some(DialogueTurn::Prompt(text)) => {
                self.active = active;
                IntentResult::ok(text)
            }
            Some(DialogueTurn::Finished(result)) => result,
            Some(DialogueTurn::Cancelled(text)) => IntentResult::ok(text),
            None => {
                if let Some(kind) = self.dialogue_starter(utterance) {
                    let mut state = DialogueState::default();
                    let prompt = self.engine.start(kind, self.language, &mut state);
                    self.active = match kind {
                        DialogueKind::Purchase => ActiveDialogue::Purchase(state),
                        DialogueKind::Borrow => ActiveDialogue::Borrow(state),
                    };
                    IntentResult::ok(prompt)
                } else {
                    self.classifier.classify(utterance, self.language).await
                }
            }
        }
    }

    /// A purchase/borrow keyword with no amount in the same utterance
    /// starts a dialogue; with an amount present the one-shot path handles
    /// it instead. Purchase is checked first.
    fn dialogue_starter(&self, utterance: &str) -> Option<DialogueKind> {
        if self.resolver.resolve(utterance).is_some() {
            return None;
        }
        let lower = utterance.to_lowercase();
        if self.keywords.mentions_purchase(&lower) {
            Some(DialogueKind::Purchase)
        } else if self.keywords.mentions_borrow(&lower) {
            Some(DialogueKind::Borrow)
        } else {
            None
        }
    }

    /// Speak a response and hold the speaking lock through a cool-down so
    /// the recognizer does not pick up the tail of the prompt.
    async fn speak(&mut self, text: &str) {
        self.state = SessionState::Speaking;
        let _ = self.events.send(SessionEvent::SpeechStarted);
        if let Err(error) = self.synthesizer.speak(text).await {
            warn!(%error, "speech synthesis failed");
        }
        sleep(Duration::from_millis(self.tuning.cooldown_ms)).await;
        let _ = self.events.send(SessionEvent::SpeechFinished);
    }
}
