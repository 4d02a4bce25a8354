//! Priority detection from keyword sets

use crate::lexicon::Lexicon;
use crate::types::Priority;

/// Maps text to a priority by keyword presence.
///
/// Sets are checked in order and the first set with any keyword in the
/// text wins. There is no scoring.
pub struct PriorityDetector {
    sets: Vec<(Priority, Vec<String>)>,
}

impl PriorityDetector {
    pub fn from_lexicon(lexicon: &Lexicon) -> Self {
        Self {
            sets: lexicon.priority_keywords.clone(),
        }
    }

    pub fn detect(&self, text: &str) -> Option<Priority> {
        let text_lower = text.to_lowercase();
        self.sets
            .iter()
            .find(|(_, keywords)| keywords.iter().any(|k| text_lower.contains(k.as_str())))
            .map(|(priority, _)| *priority)
    }
}

impl Default for PriorityDetector {
    fn default() -> Self {
        Self::from_lexicon(&Lexicon::spanish())
    }
}
