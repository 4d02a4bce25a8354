//! Client name discovery and fuzzy matching against the registry

use crate::config::ParserConfig;
use crate::error::ParserError;
use crate::lexicon::Lexicon;
use crate::similarity::normalized_similarity;
use crate::types::{Client, ClientMatch};
use regex::{Regex, RegexBuilder};

/// Finds client names in text and matches them to registry entries
pub struct ClientMatcher {
    auto_threshold: f64,
    confirm_threshold: f64,
    keyword_patterns: Vec<Regex>,
}

impl ClientMatcher {
    pub fn new(config: &ParserConfig, lexicon: &Lexicon) -> Result<Self, ParserError> {
        let keyword_patterns = lexicon
            .client_patterns
            .iter()
            .map(|p| RegexBuilder::new(p).case_insensitive(true).build())
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            auto_threshold: config.auto_threshold,
            confirm_threshold: config.confirm_threshold,
            keyword_patterns,
        })
    }

    /// Match one candidate name against a registry snapshot.
    ///
    /// The highest case-insensitive similarity wins, first entry on ties.
    pub fn match_name(&self, candidate: &str, clients: &[Client]) -> ClientMatch {
        if clients.is_empty() {
            return ClientMatch::unmatched(candidate);
        }

        let mut best: Option<&Client> = None;
        let mut best_score = 0.0;
        for client in clients {
            let score = normalized_similarity(candidate, &client.name);
            if score > best_score {
                best_score = score;
                best = Some(client);
            }
        }

        match best {
            Some(client) if best_score >= self.auto_threshold => {
                ClientMatch::confident(client, best_score)
            }
            Some(client) if best_score >= self.confirm_threshold => {
                ClientMatch::tentative(client, best_score)
            }
            _ => ClientMatch::unmatched(candidate),
        }
    }

    /// Find a client reference in `text` and match it.
    ///
    /// A name after a client keyword is tried first; otherwise every
    /// capitalized run is a candidate. This scan also picks up
    /// sentence-initial words, so it is a known source of false matches.
    pub fn find(&self, text: &str, clients: &[Client]) -> Option<ClientMatch> {
        if let Some(name) = self.keyword_candidate(text) {
            tracing::trace!(candidate = %name, "Client keyword candidate");
            return Some(self.match_name(&name, clients));
        }

        let runs = capitalized_runs(text);
        tracing::trace!(candidates = ?runs, "Capitalized run candidates");
        // match_name always yields a match, so the first run decides
        runs.into_iter()
            .map(|name| self.match_name(&name, clients))
            .next()
    }

    /// Name captured by the first client-keyword pattern that matches.
    pub fn keyword_candidate(&self, text: &str) -> Option<String> {
        self.keyword_patterns
            .iter()
            .find_map(|p| p.captures(text))
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str().trim().to_string())
            .filter(|name| !name.is_empty())
    }
}

impl Default for ClientMatcher {
    fn default() -> Self {
        Self::new(&ParserConfig::default(), &Lexicon::spanish())
            .expect("Invalid built-in client pattern")
    }
}

/// Runs of words starting at a capitalized word longer than two characters
/// and continuing through capitalized or all-lowercase words.
///
/// Each capitalized word starts its own run, so runs overlap.
pub fn capitalized_runs(text: &str) -> Vec<String> {
    let words: Vec<&str> = text.split_whitespace().collect();
    let mut runs = Vec::new();

    for (i, word) in words.iter().enumerate() {
        if !starts_uppercase(word) || word.chars().count() <= 2 {
            continue;
        }
        let mut parts = vec![*word];
        for next in &words[i + 1..] {
            if starts_uppercase(next) || is_lowercase_word(next) {
                parts.push(*next);
            } else {
                break;
            }
        }
        runs.push(parts.join(" "));
    }

    runs
}

fn starts_uppercase(word: &str) -> bool {
    word.chars().next().is_some_and(char::is_uppercase)
}

/// At least one cased character and none uppercase
fn is_lowercase_word(word: &str) -> bool {
    word.chars().any(char::is_lowercase) && !word.chars().any(char::is_uppercase)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn registry() -> Vec<Client> {
        vec![
            Client::new(1, "Pérez"),
            Client::new(2, "Construcciones García"),
            Client::new(3, "Gómez"),
        ]
    }

    fn matcher(auto: f64, confirm: f64) -> ClientMatcher {
        let config = ParserConfig::new(auto, confirm).unwrap();
        ClientMatcher::new(&config, &Lexicon::spanish()).unwrap()
    }

    #[test]
    fn test_exact_match_is_case_insensitive() {
        let m = ClientMatcher::default().match_name("pérez", &registry());
        assert_eq!(m, ClientMatch::confident(&Client::new(1, "Pérez"), 1.0));
    }

    #[test]
    fn test_empty_registry_needs_creation() {
        let m = ClientMatcher::default().match_name("Gómez", &[]);
        assert_eq!(m, ClientMatch::unmatched("Gómez"));
    }

    #[test]
    fn test_between_thresholds_needs_confirmation() {
        // lcs("martines", "martínez") = 6, so 12 / 16
        let clients = vec![Client::new(5, "Martínez")];
        let m = matcher(0.85, 0.70).match_name("Martines", &clients);
        assert!(m.needs_confirmation());
        assert_eq!(m.id(), Some(5));
        let score = m.confidence().unwrap();
        assert!((0.70..0.85).contains(&score));
    }

    #[test]
    fn test_below_confirm_needs_creation() {
        let m = ClientMatcher::default().match_name("Fernández", &registry());
        assert!(m.needs_creation());
        assert_eq!(m.name(), "Fernández");
    }

    #[test]
    fn test_first_entry_wins_ties() {
        let clients = vec![Client::new(1, "Ruiz"), Client::new(2, "RUIZ")];
        let m = ClientMatcher::default().match_name("ruiz", &clients);
        assert_eq!(m.id(), Some(1));
    }

    #[test]
    fn test_keyword_candidate() {
        let matcher = ClientMatcher::default();
        assert_eq!(
            matcher.keyword_candidate("llamar al cliente gómez"),
            Some("gómez".to_string())
        );
        assert_eq!(
            matcher.keyword_candidate("reunión con el cliente Construcciones García"),
            Some("Construcciones García".to_string())
        );
        assert_eq!(matcher.keyword_candidate("sin cliente 42"), None);
    }

    #[test]
    fn test_keyword_candidate_runs_to_end_of_letters() {
        let matcher = ClientMatcher::default();
        assert_eq!(
            matcher.keyword_candidate("cliente pérez llamar, luego"),
            Some("pérez llamar".to_string())
        );
    }

    #[test]
    fn test_find_via_keyword() {
        let m = ClientMatcher::default()
            .find("crear tarea cliente gómez", &registry())
            .unwrap();
        assert_eq!(m.id(), Some(3));
    }

    #[test]
    fn test_lowercase_text_without_keyword_finds_nothing() {
        assert_eq!(ClientMatcher::default().find("llamar a pérez", &registry()), None);
    }

    #[test]
    fn test_capitalized_runs() {
        assert_eq!(
            capitalized_runs("llamar a Pérez mañana 42"),
            vec!["Pérez mañana".to_string()]
        );
        assert_eq!(
            capitalized_runs("visitar Construcciones García"),
            vec!["Construcciones García".to_string(), "García".to_string()]
        );
        // Too short to start a run
        assert!(capitalized_runs("ir a Ux").is_empty());
    }

    #[test]
    fn test_capitalized_run_heuristic_catches_sentence_initial_words() {
        // Known false positive: a capitalized first word becomes a client candidate
        let m = ClientMatcher::default()
            .find("Revisar el presupuesto", &registry())
            .unwrap();
        assert_eq!(m, ClientMatch::unmatched("Revisar el presupuesto"));
    }

    #[test]
    fn test_raising_thresholds_never_promotes() {
        let clients = vec![Client::new(5, "Martínez")];
        let loose = matcher(0.75, 0.5).match_name("Martines", &clients);
        let strict = matcher(0.95, 0.9).match_name("Martines", &clients);
        assert!(matches!(loose, ClientMatch::Confident { .. }));
        assert!(strict.needs_creation());
    }

    proptest! {
        #[test]
        fn stricter_thresholds_never_promote_a_match(
            candidate in "[a-zñáéíóú]{1,12}",
            names in prop::collection::vec("[A-Za-zñáéíóú]{1,12}", 0..5),
            confirm in 0.0f64..0.5,
            gap in 0.05f64..0.4,
            raise in 0.0f64..0.1,
        ) {
            let clients: Vec<Client> = names
                .into_iter()
                .enumerate()
                .map(|(i, n)| Client::new(i as i64, n))
                .collect();
            let loose = matcher(confirm + gap, confirm);
            let strict = matcher(confirm + gap + raise, confirm + raise);

            let before = loose.match_name(&candidate, &clients);
            let after = strict.match_name(&candidate, &clients);
            if before.needs_creation() {
                prop_assert!(after.needs_creation());
            }
            if matches!(after, ClientMatch::Confident { .. }) {
                prop_assert!(
                    matches!(before, ClientMatch::Confident { .. }),
                    "stricter thresholds produced a Confident match the looser ones did not"
                );
            }
        }
    }
}
