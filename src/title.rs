//! Task title recovery by stripping recognized vocabulary

use crate::error::ParserError;
use crate::lexicon::Lexicon;
use crate::types::EntitySet;
use regex::{Regex, RegexBuilder};

/// Removes intent, client, date and priority words from a sentence
pub struct TitleExtractor {
    intent_words: Vec<Regex>,
    date_words: Vec<Regex>,
    priority_words: Vec<Regex>,
    client_keyword: String,
}

fn whole_word(word: &str) -> Result<Regex, regex::Error> {
    RegexBuilder::new(&format!(r"\b{}\b", regex::escape(word)))
        .case_insensitive(true)
        .build()
}

fn whole_words(words: &[String]) -> Result<Vec<Regex>, regex::Error> {
    words.iter().map(|w| whole_word(w)).collect()
}

fn strip_all(text: String, patterns: &[Regex]) -> String {
    patterns
        .iter()
        .fold(text, |acc, re| re.replace_all(&acc, "").into_owned())
}

impl TitleExtractor {
    pub fn from_lexicon(lexicon: &Lexicon) -> Result<Self, ParserError> {
        Ok(Self {
            intent_words: whole_words(&lexicon.title_intent_words)?,
            date_words: whole_words(&lexicon.title_date_words)?,
            priority_words: whole_words(&lexicon.title_priority_words)?,
            client_keyword: lexicon.client_keyword.clone(),
        })
    }

    /// Strip already-detected entities from `text`.
    ///
    /// Falls back to the trimmed input when nothing is left.
    pub fn extract(&self, text: &str, entities: &EntitySet) -> String {
        let mut title = strip_all(text.to_string(), &self.intent_words);

        if let Some(client) = &entities.client {
            title = strip_all(title, &self.client_patterns(client.name()));
        }

        title = strip_all(title, &self.date_words);
        title = strip_all(title, &self.priority_words);

        let title = title.split_whitespace().collect::<Vec<_>>().join(" ");
        if title.is_empty() {
            text.trim().to_string()
        } else {
            title
        }
    }

    /// "<keyword> <name>" first, then the bare name.
    fn client_patterns(&self, name: &str) -> Vec<Regex> {
        let name = regex::escape(name);
        [
            format!(r"\b{}\s+{}", regex::escape(&self.client_keyword), name),
            format!(r"\b{}", name),
        ]
        .iter()
        .filter_map(|p| RegexBuilder::new(p).case_insensitive(true).build().ok())
        .collect()
    }
}

impl Default for TitleExtractor {
    fn default() -> Self {
        Self::from_lexicon(&Lexicon::spanish()).expect("Invalid built-in title word")
    }
}
