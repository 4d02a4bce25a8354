//! Task parser core - Spanish natural-language task commands
//!
//! Turns sentences like "crear tarea limpiar oficina mañana cliente Pérez"
//! into an intent, a confidence and the entities that intent needs: a fuzzy
//! matched client, a due date, a priority, a title or a task number.

pub mod types;
pub mod error;
pub mod config;
pub mod lexicon;
pub mod similarity;
pub mod classifier;
pub mod priority;
pub mod calendar;
pub mod dates;
pub mod registry;
pub mod client;
pub mod title;
pub mod entities;
pub mod parser;
pub mod transcribe;

pub use types::*;
pub use error::{ConfigError, DateParseError, ParserError, TranscribeError};
pub use config::ParserConfig;
pub use lexicon::Lexicon;
pub use similarity::*;
pub use classifier::IntentClassifier;
pub use priority::PriorityDetector;
pub use calendar::SpanishCalendar;
pub use dates::{CalendarParser, Clock, DateOutcome, DateResolver, FixedClock, SystemClock};
pub use registry::{ClientRegistry, InMemoryRegistry};
pub use client::ClientMatcher;
pub use title::TitleExtractor;
pub use entities::EntityExtractor;
pub use parser::IntentParser;
pub use transcribe::{
    LazyModel, ModelLoader, ModelTranscriber, SpeechModel, Transcriber, VoiceCommand,
    VoicePipeline,
};

// Python bindings
#[cfg(feature = "extension-module")]
pub mod py;

#[cfg(feature = "extension-module")]
use pyo3::prelude::*;

#[cfg(feature = "extension-module")]
#[pymodule]
fn task_parser_core(m: &Bound<'_, PyModule>) -> PyResult<()> {
    use py::*;
    m.add_class::<PyIntentParser>()?;
    m.add_function(wrap_pyfunction!(py_similarity_ratio, m)?)?;
    Ok(())
}
