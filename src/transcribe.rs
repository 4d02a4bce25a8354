//! Voice commands - speech-to-text in front of the intent parser
//!
//! The speech model itself is pluggable. Whatever backs `ModelLoader` is
//! loaded on first use and shared by every later transcription.

use crate::error::TranscribeError;
use crate::parser::IntentParser;
use crate::types::ParseResult;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::{Arc, Mutex};

/// Audio file extensions accepted by the pipeline
pub const SUPPORTED_EXTENSIONS: [&str; 5] = ["ogg", "wav", "mp3", "m4a", "webm"];

/// Default transcription language
pub const DEFAULT_LANGUAGE: &str = "es";

/// Turns an audio file into text
pub trait Transcriber: Send + Sync {
    fn transcribe(&self, audio: &Path) -> Result<String, TranscribeError>;
}

/// A loaded speech-to-text model
pub trait SpeechModel: Send + Sync {
    fn transcribe_file(&self, audio: &Path, language: &str) -> Result<String, TranscribeError>;
}

/// Knows how to build a `SpeechModel`, usually an expensive step
pub trait ModelLoader: Send + Sync {
    type Model: SpeechModel;

    fn load(&self) -> Result<Self::Model, TranscribeError>;
}

/// Model loaded on first `get` and cached for the life of the value.
///
/// Loading happens under the lock, so concurrent first callers wait for a
/// single load. A failed load is not cached and the next call retries.
pub struct LazyModel<L: ModelLoader> {
    loader: L,
    model: Mutex<Option<Arc<L::Model>>>,
}

impl<L: ModelLoader> LazyModel<L> {
    pub fn new(loader: L) -> Self {
        Self {
            loader,
            model: Mutex::new(None),
        }
    }

    pub fn get(&self) -> Result<Arc<L::Model>, TranscribeError> {
        let mut slot = self.model.lock().unwrap_or_else(|e| e.into_inner());
        if let Some(model) = slot.as_ref() {
            return Ok(Arc::clone(model));
        }

        tracing::info!("Loading transcription model");
        let model = Arc::new(self.loader.load()?);
        *slot = Some(Arc::clone(&model));
        Ok(model)
    }

    pub fn is_loaded(&self) -> bool {
        self.model
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .is_some()
    }
}

/// `Transcriber` over a lazily loaded model
pub struct ModelTranscriber<L: ModelLoader> {
    model: LazyModel<L>,
    language: String,
}

impl<L: ModelLoader> ModelTranscriber<L> {
    pub fn new(loader: L) -> Self {
        Self {
            model: LazyModel::new(loader),
            language: DEFAULT_LANGUAGE.to_string(),
        }
    }

    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = language.into();
        self
    }

    pub fn is_loaded(&self) -> bool {
        self.model.is_loaded()
    }
}

impl<L: ModelLoader> Transcriber for ModelTranscriber<L> {
    fn transcribe(&self, audio: &Path) -> Result<String, TranscribeError> {
        self.model.get()?.transcribe_file(audio, &self.language)
    }
}

/// Transcript together with the command parsed from it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VoiceCommand {
    pub transcript: String,
    pub parsed: ParseResult,
}

/// Transcribes an audio file, then parses the transcript
pub struct VoicePipeline<T: Transcriber> {
    transcriber: T,
    parser: IntentParser,
}

impl<T: Transcriber> VoicePipeline<T> {
    pub fn new(transcriber: T, parser: IntentParser) -> Self {
        Self { transcriber, parser }
    }

    pub fn parser(&self) -> &IntentParser {
        &self.parser
    }

    pub fn process(&self, audio: &Path) -> Result<VoiceCommand, TranscribeError> {
        check_format(audio)?;

        let raw = self.transcriber.transcribe(audio)?;
        let transcript = raw.trim();
        if transcript.is_empty() {
            return Err(TranscribeError::EmptyTranscript);
        }

        tracing::debug!(audio = %audio.display(), transcript, "Transcribed voice command");
        let parsed = self.parser.parse(transcript);
        Ok(VoiceCommand {
            transcript: transcript.to_string(),
            parsed,
        })
    }
}

/// Reject files whose extension is not a supported audio format
pub fn check_format(audio: &Path) -> Result<(), TranscribeError> {
    let supported = audio
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_lowercase())
        .is_some_and(|ext| SUPPORTED_EXTENSIONS.contains(&ext.as_str()));

    if supported {
        Ok(())
    } else {
        Err(TranscribeError::UnsupportedFormat(audio.display().to_string()))
    }
}
