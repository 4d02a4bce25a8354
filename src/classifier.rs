//! Intent classifier - scores normalized text against the intent pattern bank

use crate::error::ParserError;
use crate::lexicon::Lexicon;
use crate::types::Intent;
use regex::{Regex, RegexBuilder};

/// Confidence assigned when only the keyword fallback fires
pub const FALLBACK_CONFIDENCE: f64 = 0.5;

/// Pattern-bank intent classifier
///
/// Every pattern of every intent is tried. A match scores
/// `matched chars / text chars`, and the best score wins with a strict
/// comparison, so the earlier intent in the bank keeps ties.
pub struct IntentClassifier {
    bank: Vec<(Intent, Vec<Regex>)>,
    task_nouns: Vec<String>,
    create_verbs: Vec<String>,
    list_verbs: Vec<String>,
}

impl IntentClassifier {
    pub fn from_lexicon(lexicon: &Lexicon) -> Result<Self, ParserError> {
        let bank = lexicon
            .intent_patterns
            .iter()
            .map(|(intent, patterns)| -> Result<(Intent, Vec<Regex>), ParserError> {
                let compiled = patterns
                    .iter()
                    .map(|p| RegexBuilder::new(p).case_insensitive(true).build())
                    .collect::<Result<Vec<_>, _>>()?;
                Ok((*intent, compiled))
            })
            .collect::<Result<Vec<_>, ParserError>>()?;

        Ok(Self {
            bank,
            task_nouns: lexicon.task_nouns.clone(),
            create_verbs: lexicon.create_verbs.clone(),
            list_verbs: lexicon.list_verbs.clone(),
        })
    }

    /// Classify already-normalized text
    pub fn classify(&self, text: &str) -> (Intent, f64) {
        let text_len = text.chars().count();
        if text_len == 0 {
            return (Intent::Unknown, 0.0);
        }

        let mut best_intent = Intent::Unknown;
        let mut best_confidence = 0.0;

        for (intent, patterns) in &self.bank {
            for pattern in patterns {
                if let Some(m) = pattern.find(text) {
                    let confidence = m.as_str().chars().count() as f64 / text_len as f64;
                    if confidence > best_confidence {
                        best_confidence = confidence;
                        best_intent = *intent;
                    }
                }
            }
        }

        if best_intent == Intent::Unknown {
            return self.keyword_fallback(text);
        }

        (best_intent, best_confidence)
    }

    /// Task noun plus a create or list verb anywhere in the text
    fn keyword_fallback(&self, text: &str) -> (Intent, f64) {
        let contains_any = |words: &[String]| words.iter().any(|w| text.contains(w.as_str()));

        if contains_any(&self.task_nouns) {
            if contains_any(&self.create_verbs) {
                return (Intent::Create, FALLBACK_CONFIDENCE);
            }
            if contains_any(&self.list_verbs) {
                return (Intent::List, FALLBACK_CONFIDENCE);
            }
        }

        (Intent::Unknown, 0.0)
    }
}

impl Default for IntentClassifier {
    fn default() -> Self {
        // The built-in lexicon is fixed, so compilation cannot fail
        Self::from_lexicon(&Lexicon::spanish()).expect("Invalid built-in intent pattern")
    }
}
