//! Core data types for parser results

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The action a sentence asks for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Intent {
    Create,
    List,
    Close,
    Reschedule,
    Extend,
    Unknown,
}

impl Intent {
    pub fn as_str(&self) -> &'static str {
        match self {
            Intent::Create => "CREATE",
            Intent::List => "LIST",
            Intent::Close => "CLOSE",
            Intent::Reschedule => "RESCHEDULE",
            Intent::Extend => "EXTEND",
            Intent::Unknown => "UNKNOWN",
        }
    }

    /// Whether this intent's extraction routine looks up clients.
    pub fn uses_clients(&self) -> bool {
        matches!(
            self,
            Intent::Create | Intent::List | Intent::Close | Intent::Reschedule
        )
    }
}

impl fmt::Display for Intent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Urgent,
    High,
    Low,
}

/// A client registry entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Client {
    pub id: i64,
    pub name: String,
}

impl Client {
    pub fn new(id: i64, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }
}

/// Outcome of matching a spoken client name against the registry.
///
/// Serialized untagged, so the JSON carries exactly one of the three shapes.
/// `Tentative` is declared first so deserialization tries the widest shape
/// before `Confident`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ClientMatch {
    Tentative {
        id: i64,
        name: String,
        confidence: f64,
        needs_confirmation: bool,
    },
    Confident {
        id: i64,
        name: String,
        confidence: f64,
    },
    Unmatched {
        name: String,
        needs_creation: bool,
    },
}

impl ClientMatch {
    pub fn confident(client: &Client, confidence: f64) -> Self {
        ClientMatch::Confident {
            id: client.id,
            name: client.name.clone(),
            confidence,
        }
    }

    pub fn tentative(client: &Client, confidence: f64) -> Self {
        ClientMatch::Tentative {
            id: client.id,
            name: client.name.clone(),
            confidence,
            needs_confirmation: true,
        }
    }

    pub fn unmatched(name: impl Into<String>) -> Self {
        ClientMatch::Unmatched {
            name: name.into(),
            needs_creation: true,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            ClientMatch::Tentative { name, .. }
            | ClientMatch::Confident { name, .. }
            | ClientMatch::Unmatched { name, .. } => name,
        }
    }

    pub fn id(&self) -> Option<i64> {
        match self {
            ClientMatch::Tentative { id, .. } | ClientMatch::Confident { id, .. } => Some(*id),
            ClientMatch::Unmatched { .. } => None,
        }
    }

    pub fn confidence(&self) -> Option<f64> {
        match self {
            ClientMatch::Tentative { confidence, .. }
            | ClientMatch::Confident { confidence, .. } => Some(*confidence),
            ClientMatch::Unmatched { .. } => None,
        }
    }

    pub fn needs_confirmation(&self) -> bool {
        matches!(self, ClientMatch::Tentative { .. })
    }

    pub fn needs_creation(&self) -> bool {
        matches!(self, ClientMatch::Unmatched { .. })
    }
}

/// Entities extracted for one command. A `None` field was not detected.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EntitySet {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client: Option<ClientMatch>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<Priority>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub task_id: Option<u64>,
}

impl EntitySet {
    pub fn is_empty(&self) -> bool {
        self.client.is_none()
            && self.due_date.is_none()
            && self.priority.is_none()
            && self.title.is_none()
            && self.task_id.is_none()
    }
}

/// Structured command recovered from one sentence
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParseResult {
    pub intent: Intent,
    pub confidence: f64,
    pub entities: EntitySet,
    /// The normalized (trimmed, lowercased) input
    pub original_text: String,
}

impl ParseResult {
    pub fn new(intent: Intent, confidence: f64, entities: EntitySet, original_text: String) -> Self {
        Self {
            intent,
            confidence,
            entities,
            original_text,
        }
    }

    pub fn unknown(original_text: String) -> Self {
        Self::new(Intent::Unknown, 0.0, EntitySet::default(), original_text)
    }
}
