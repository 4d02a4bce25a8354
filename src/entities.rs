//! Entity extraction per intent
//!
//! Each intent attempts a fixed subset of entities. Keys the routine does
//! not attempt, or attempts without a hit, stay `None`.

use crate::client::ClientMatcher;
use crate::config::ParserConfig;
use crate::dates::DateResolver;
use crate::error::ParserError;
use crate::lexicon::Lexicon;
use crate::priority::PriorityDetector;
use crate::title::TitleExtractor;
use crate::types::{Client, EntitySet, Intent};
use chrono::NaiveDateTime;
use regex::{Regex, RegexBuilder};

/// Composes the leaf extractors into the per-intent routines
pub struct EntityExtractor {
    clients: ClientMatcher,
    dates: DateResolver,
    priority: PriorityDetector,
    title: TitleExtractor,
    task_id: Regex,
}

impl EntityExtractor {
    pub fn new(config: &ParserConfig, lexicon: &Lexicon) -> Result<Self, ParserError> {
        Ok(Self {
            clients: ClientMatcher::new(config, lexicon)?,
            dates: DateResolver::from_lexicon(lexicon),
            priority: PriorityDetector::from_lexicon(lexicon),
            title: TitleExtractor::from_lexicon(lexicon)?,
            task_id: RegexBuilder::new(&lexicon.task_id_pattern)
                .case_insensitive(true)
                .build()?,
        })
    }

    /// Replace the date resolver, e.g. to plug in another calendar parser.
    pub fn with_date_resolver(mut self, dates: DateResolver) -> Self {
        self.dates = dates;
        self
    }

    pub fn client_matcher(&self) -> &ClientMatcher {
        &self.clients
    }

    /// Run the routine for `intent` over normalized text.
    pub fn extract(
        &self,
        intent: Intent,
        text: &str,
        clients: &[Client],
        reference: NaiveDateTime,
    ) -> EntitySet {
        match intent {
            Intent::Create => self.create_entities(text, clients, reference),
            Intent::List => self.list_entities(text, clients, reference),
            Intent::Close => self.close_entities(text, clients),
            Intent::Reschedule => self.reschedule_entities(text, clients, reference),
            Intent::Extend => self.extend_entities(text),
            Intent::Unknown => EntitySet::default(),
        }
    }

    fn create_entities(&self, text: &str, clients: &[Client], reference: NaiveDateTime) -> EntitySet {
        let mut entities = EntitySet {
            client: self.clients.find(text, clients),
            due_date: self.dates.resolve(text, reference),
            priority: self.priority.detect(text),
            ..Default::default()
        };

        // Title last: it strips whatever the other extractors found
        let title = self.title.extract(text, &entities);
        if !title.is_empty() {
            entities.title = Some(title);
        }

        entities
    }

    fn list_entities(&self, text: &str, clients: &[Client], reference: NaiveDateTime) -> EntitySet {
        EntitySet {
            due_date: self.dates.resolve(text, reference),
            client: self.clients.find(text, clients),
            ..Default::default()
        }
    }

    fn close_entities(&self, text: &str, clients: &[Client]) -> EntitySet {
        EntitySet {
            client: self.clients.find(text, clients),
            task_id: self.task_id(text),
            ..Default::default()
        }
    }

    fn reschedule_entities(
        &self,
        text: &str,
        clients: &[Client],
        reference: NaiveDateTime,
    ) -> EntitySet {
        EntitySet {
            due_date: self.dates.resolve(text, reference),
            client: self.clients.find(text, clients),
            task_id: self.task_id(text),
            ..Default::default()
        }
    }

    fn extend_entities(&self, text: &str) -> EntitySet {
        EntitySet {
            task_id: self.task_id(text),
            ..Default::default()
        }
    }

    /// Number following the task noun, e.g. "tarea 42"
    pub fn task_id(&self, text: &str) -> Option<u64> {
        self.task_id
            .captures(text)
            .and_then(|caps| caps.get(2))
            .and_then(|m| m.as_str().parse().ok())
    }
}

impl Default for EntityExtractor {
    fn default() -> Self {
        Self::new(&ParserConfig::default(), &Lexicon::spanish())
            .expect("Invalid built-in extraction pattern")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dates::{Clock, FixedClock};
    use crate::types::{ClientMatch, Priority};
    use chrono::NaiveDate;

    fn reference() -> NaiveDateTime {
        FixedClock::on(NaiveDate::from_ymd_opt(2024, 3, 10).unwrap()).now()
    }

    fn clients() -> Vec<Client> {
        vec![Client::new(1, "Pérez"), Client::new(2, "Gómez")]
    }

    #[test]
    fn test_extract_task_id() {
        let extractor = EntityExtractor::default();
        assert_eq!(extractor.task_id("cerrar tarea 42"), Some(42));
        assert_eq!(extractor.task_id("tareas 7 y 8"), Some(7));
        assert_eq!(extractor.task_id("cerrar la 42"), None);
    }

    #[test]
    fn test_oversized_task_id_is_not_detected() {
        let extractor = EntityExtractor::default();
        assert_eq!(extractor.task_id("tarea 99999999999999999999999"), None);
    }

    #[test]
    fn test_create_entities() {
        let extractor = EntityExtractor::default();
        let entities = extractor.extract(
            Intent::Create,
            "nueva tarea importante revisar contrato hoy cliente gómez",
            &clients(),
            reference(),
        );
        assert_eq!(entities.client, Some(ClientMatch::confident(&Client::new(2, "Gómez"), 1.0)));
        assert_eq!(entities.due_date, NaiveDate::from_ymd_opt(2024, 3, 10));
        assert_eq!(entities.priority, Some(Priority::High));
        assert_eq!(entities.title.as_deref(), Some("revisar contrato"));
        assert_eq!(entities.task_id, None);
    }

    #[test]
    fn test_list_has_no_title_or_priority() {
        let extractor = EntityExtractor::default();
        let entities = extractor.extract(
            Intent::List,
            "ver tareas urgentes de mañana",
            &clients(),
            reference(),
        );
        assert_eq!(entities.due_date, NaiveDate::from_ymd_opt(2024, 3, 11));
        assert_eq!(entities.priority, None);
        assert_eq!(entities.title, None);
        assert_eq!(entities.client, None);
    }

    #[test]
    fn test_close_ignores_dates() {
        let extractor = EntityExtractor::default();
        let entities = extractor.extract(
            Intent::Close,
            "cerrar tarea 12 de hoy",
            &clients(),
            reference(),
        );
        assert_eq!(entities.task_id, Some(12));
        assert_eq!(entities.due_date, None);
    }

    #[test]
    fn test_reschedule() {
        let extractor = EntityExtractor::default();
        let entities = extractor.extract(
            Intent::Reschedule,
            "mover tarea 5 al viernes",
            &clients(),
            reference(),
        );
        assert_eq!(entities.task_id, Some(5));
        assert_eq!(entities.due_date, NaiveDate::from_ymd_opt(2024, 3, 15));
    }

    #[test]
    fn test_extend_only_task_id() {
        let extractor = EntityExtractor::default();
        let entities = extractor.extract(
            Intent::Extend,
            "ampliar tarea 3 cliente pérez mañana",
            &clients(),
            reference(),
        );
        assert_eq!(
            entities,
            EntitySet {
                task_id: Some(3),
                ..Default::default()
            }
        );
    }

    #[test]
    fn test_unknown_is_empty() {
        let extractor = EntityExtractor::default();
        let entities = extractor.extract(Intent::Unknown, "cliente pérez hoy", &clients(), reference());
        assert!(entities.is_empty());
    }
}
