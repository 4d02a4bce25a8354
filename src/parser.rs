//! Intent parser - the entry point that turns a sentence into a command

use crate::classifier::IntentClassifier;
use crate::config::ParserConfig;
use crate::dates::{Clock, DateResolver, SystemClock};
use crate::entities::EntityExtractor;
use crate::error::ParserError;
use crate::lexicon::Lexicon;
use crate::registry::ClientRegistry;
use crate::types::{Client, Intent, ParseResult};
use chrono::NaiveDateTime;
use std::sync::Arc;

/// Classifies a sentence and extracts the entities its intent needs.
///
/// Holds no per-call state: the registry snapshot and the reference instant
/// are taken fresh on every `parse`, so one parser can serve many threads.
pub struct IntentParser {
    classifier: IntentClassifier,
    extractor: EntityExtractor,
    registry: Arc<dyn ClientRegistry>,
    clock: Arc<dyn Clock>,
}

impl IntentParser {
    /// Spanish parser on the system clock.
    pub fn new(config: ParserConfig, registry: Arc<dyn ClientRegistry>) -> Result<Self, ParserError> {
        Self::with_lexicon(config, &Lexicon::spanish(), registry)
    }

    pub fn with_lexicon(
        config: ParserConfig,
        lexicon: &Lexicon,
        registry: Arc<dyn ClientRegistry>,
    ) -> Result<Self, ParserError> {
        config.validate()?;
        Ok(Self {
            classifier: IntentClassifier::from_lexicon(lexicon)?,
            extractor: EntityExtractor::new(&config, lexicon)?,
            registry,
            clock: Arc::new(SystemClock),
        })
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn with_date_resolver(mut self, dates: DateResolver) -> Self {
        self.extractor = self.extractor.with_date_resolver(dates);
        self
    }

    /// Parse a sentence against the current registry and clock.
    pub fn parse(&self, raw_text: &str) -> ParseResult {
        let text = normalize(raw_text);
        let (intent, confidence) = self.classifier.classify(&text);

        // Only fetch the registry when the intent's routine looks for a client
        let clients = if intent.uses_clients() {
            self.registry.list_clients()
        } else {
            Vec::new()
        };

        self.finish(text, intent, confidence, &clients, self.clock.now())
    }

    /// Parse against an explicit registry snapshot and reference instant.
    pub fn parse_with(&self, raw_text: &str, clients: &[Client], reference: NaiveDateTime) -> ParseResult {
        let text = normalize(raw_text);
        let (intent, confidence) = self.classifier.classify(&text);
        self.finish(text, intent, confidence, clients, reference)
    }

    fn finish(
        &self,
        text: String,
        intent: Intent,
        confidence: f64,
        clients: &[Client],
        reference: NaiveDateTime,
    ) -> ParseResult {
        let entities = self.extractor.extract(intent, &text, clients, reference);
        tracing::debug!(
            text = %text,
            intent = %intent,
            confidence,
            entities = ?entities,
            "Parsed command"
        );
        ParseResult::new(intent, confidence, entities, text)
    }
}

fn normalize(text: &str) -> String {
    text.trim().to_lowercase()
}
