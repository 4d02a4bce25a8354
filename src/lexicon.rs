//! Vocabulary that drives classification and extraction
//!
//! A `Lexicon` is plain data. Each component compiles the part it needs when
//! it is built, so parsers with different vocabularies can live side by side.

use crate::types::{Intent, Priority};
use serde::{Deserialize, Serialize};

/// Pattern banks and keyword sets for one language
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Lexicon {
    /// Intent bank; order decides ties.
    pub intent_patterns: Vec<(Intent, Vec<String>)>,
    /// Task-domain nouns for the keyword fallback
    pub task_nouns: Vec<String>,
    pub create_verbs: Vec<String>,
    pub list_verbs: Vec<String>,
    /// Regexes whose first group captures a client name
    pub client_patterns: Vec<String>,
    /// Word that introduces a client name, stripped from titles
    pub client_keyword: String,
    /// Regex whose second group captures a task number
    pub task_id_pattern: String,
    /// Relative day keywords and their offsets, first hit wins
    pub relative_days: Vec<(String, i64)>,
    /// Priority keyword sets, first set with a hit wins
    pub priority_keywords: Vec<(Priority, Vec<String>)>,
    pub title_intent_words: Vec<String>,
    pub title_date_words: Vec<String>,
    pub title_priority_words: Vec<String>,
}

fn words(list: &[&str]) -> Vec<String> {
    list.iter().map(|w| w.to_string()).collect()
}

impl Lexicon {
    /// The built-in Spanish vocabulary.
    pub fn spanish() -> Self {
        Self {
            intent_patterns: vec![
                (
                    Intent::Create,
                    words(&[
                        r"\b(crear|nueva|nuevo|añadir|agregar|añade|agrega)\b.*\b(tarea|recordar|recordatorio|recordarme)\b",
                        r"\b(tarea|recordar|recordatorio)\b.*\b(crear|nueva|nuevo|añadir|agregar)\b",
                    ]),
                ),
                (
                    Intent::List,
                    words(&[
                        r"\b(listar|mostrar|ver|muestra|muéstrame|lista)\b.*\b(tarea|tareas|pendiente|pendientes)\b",
                        r"\b(tarea|tareas)\b.*\b(pendiente|pendientes|hoy|mañana|semana)\b",
                    ]),
                ),
                (
                    Intent::Close,
                    words(&[
                        r"\b(cerrar|completar|hecha|terminada|terminar|completa|da por hecha|marcar como)\b.*\b(tarea|tareas)\b",
                        r"\b(tarea|tareas)\b.*\b(cerrar|completar|hecha|terminada)\b",
                    ]),
                ),
                (
                    Intent::Reschedule,
                    words(&[
                        r"\b(cambiar|mover|reprogramar|posponer|adelantar)\b.*\b(fecha|tarea)\b",
                        r"\b(fecha)\b.*\b(cambiar|mover|reprogramar)\b",
                    ]),
                ),
                (
                    Intent::Extend,
                    words(&[
                        r"\b(ampliar|ampliación|amplía|añadir|agregar)\b.*\b(tarea|información|detalle)\b",
                        r"\b(tarea)\b.*\b(ampliar|ampliación|amplía)\b",
                    ]),
                ),
            ],
            task_nouns: words(&["tarea", "recordar", "recordatorio"]),
            create_verbs: words(&["crear", "nueva", "añadir"]),
            list_verbs: words(&["listar", "mostrar", "ver"]),
            client_patterns: words(&[
                r"\b(?:cliente|del cliente|para el cliente|con el cliente)\s+([A-ZÁÉÍÓÚÑ][a-záéíóúñ\s]+)",
                r"\bcliente\s+([A-ZÁÉÍÓÚÑ][a-záéíóúñ\s]+)",
            ]),
            client_keyword: "cliente".to_string(),
            task_id_pattern: r"\b(tarea|tareas)\s+(\d+)".to_string(),
            relative_days: vec![
                ("hoy".to_string(), 0),
                ("mañana".to_string(), 1),
                ("pasado mañana".to_string(), 2),
                ("ayer".to_string(), -1),
            ],
            priority_keywords: vec![
                (
                    Priority::Urgent,
                    words(&["urgente", "urgent", "inmediato", "inmediata", "ya", "ahora"]),
                ),
                (
                    Priority::High,
                    words(&["importante", "alta", "high", "prioritario"]),
                ),
                (
                    Priority::Low,
                    words(&["baja", "low", "poco importante", "sin prisa"]),
                ),
            ],
            title_intent_words: words(&[
                "crear",
                "nueva",
                "nuevo",
                "añadir",
                "agregar",
                "tarea",
                "recordar",
                "recordatorio",
            ]),
            title_date_words: words(&[
                "hoy",
                "mañana",
                "pasado mañana",
                "ayer",
                "lunes",
                "martes",
                "miércoles",
                "jueves",
                "viernes",
                "sábado",
                "domingo",
            ]),
            title_priority_words: words(&["urgente", "importante", "alta", "baja", "prioridad"]),
        }
    }
}

impl Default for Lexicon {
    fn default() -> Self {
        Self::spanish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_intent_bank_order() {
        let lexicon = Lexicon::spanish();
        let order: Vec<Intent> = lexicon.intent_patterns.iter().map(|(i, _)| *i).collect();
        assert_eq!(
            order,
            vec![
                Intent::Create,
                Intent::List,
                Intent::Close,
                Intent::Reschedule,
                Intent::Extend
            ]
        );
    }

    #[test]
    fn test_all_patterns_compile() {
        let lexicon = Lexicon::spanish();
        for (_, patterns) in &lexicon.intent_patterns {
            for p in patterns {
                assert!(regex::Regex::new(p).is_ok(), "bad pattern {p}");
            }
        }
        for p in &lexicon.client_patterns {
            assert!(regex::Regex::new(p).is_ok(), "bad pattern {p}");
        }
        assert!(regex::Regex::new(&lexicon.task_id_pattern).is_ok());
    }
}
