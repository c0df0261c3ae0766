//! Line-level diagnostic messages.
//!
//! Messages are attached to lines in bundles. A bundle is identified by a
//! [`MessageBundleId`] rather than by its line number: edits move bundles between line
//! numbers, so consumers (gutters, inline message views) look bundles up by their current
//! line and track them by id.

use std::fmt;

/// Message category.
///
/// The ordering doubles as display priority: `Live > Error > Warning > Informational`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum MessageCategory {
    /// Informational message.
    Informational,
    /// Warning.
    Warning,
    /// Error.
    Error,
    /// Live value or evaluation result.
    Live,
}

/// Rich text payload of a message description (markup is interpreted by the renderer).
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RichText(pub String);

impl From<&str> for RichText {
    fn from(text: &str) -> Self {
        Self(text.to_string())
    }
}

impl From<String> for RichText {
    fn from(text: String) -> Self {
        Self(text)
    }
}

/// A single diagnostic message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    /// Category (and thereby priority) of the message.
    pub category: MessageCategory,
    /// Number of code units the message refers to, starting at the line's first column.
    pub length: usize,
    /// One-line summary.
    pub summary: String,
    /// Optional long-form description.
    pub description: Option<RichText>,
}

impl Message {
    /// Create a message without description.
    pub fn new(category: MessageCategory, length: usize, summary: impl Into<String>) -> Self {
        Self {
            category,
            length,
            summary: summary.into(),
            description: None,
        }
    }

    /// Attach a long-form description.
    pub fn with_description(mut self, description: impl Into<RichText>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// Stable identity of a [`MessageBundle`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MessageBundleId(pub u64);

impl fmt::Display for MessageBundleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "bundle#{}", self.0)
    }
}

/// Messages attached to one line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageBundle {
    /// Stable id, independent of the line the bundle currently sits on.
    pub id: MessageBundleId,
    /// The messages, in insertion order.
    pub messages: Vec<Message>,
}

impl MessageBundle {
    /// Create an empty bundle.
    pub fn new(id: MessageBundleId) -> Self {
        Self {
            id,
            messages: Vec::new(),
        }
    }

    /// The most urgent category among the messages.
    pub fn top_category(&self) -> Option<MessageCategory> {
        self.messages.iter().map(|message| message.category).max()
    }

    /// Messages of the given category.
    pub fn messages_of(&self, category: MessageCategory) -> impl Iterator<Item = &Message> {
        self.messages
            .iter()
            .filter(move |message| message.category == category)
    }

    /// Returns `true` if the bundle holds no messages.
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}
