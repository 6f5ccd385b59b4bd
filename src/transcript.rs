//! Conversation transcript
//!
//! An append-only, ordered record of what the user said and what the agent
//! replied. Entries are never mutated or removed once appended.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Who produced an entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Origin {
    User,
    Agent,
}

impl Origin {
    /// Label used when rendering the entry for a human
    pub fn label(self) -> &'static str {
        match self {
            Origin::User => "You",
            Origin::Agent => "Agent",
        }
    }
}

/// One transcript item
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
    origin: Origin,
    text: String,
    created_at: DateTime<Utc>,
}

impl Entry {
    pub fn user(text: impl Into<String>) -> Self {
        Self::new(Origin::User, text)
    }

    pub fn agent(text: impl Into<String>) -> Self {
        Self::new(Origin::Agent, text)
    }

    pub fn new(origin: Origin, text: impl Into<String>) -> Self {
        Self {
            origin,
            text: text.into(),
            created_at: Utc::now(),
        }
    }

    pub fn origin(&self) -> Origin {
        self.origin
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// True when this entry has the given origin and text, ignoring the timestamp
    pub fn matches(&self, origin: Origin, text: &str) -> bool {
        self.origin == origin && self.text == text
    }
}

/// Ordered sequence of entries, insertion order = conversation order
#[derive(Debug, Clone, Default)]
pub struct Transcript {
    entries: Vec<Entry>,
}

impl Transcript {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn append(&mut self, entry: Entry) {
        self.entries.push(entry);
    }

    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn last(&self) -> Option<&Entry> {
        self.entries.last()
    }
}
