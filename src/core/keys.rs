//! Reserved keys of specification documents.
//!
//! Decks and cards recognize a handful of keys in their specifications.
//! Applications can localize their documents by replacing these.

use serde::{Deserialize, Serialize};

/// The reserved keys of a specification.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Keys {
    /// Deck-level or card-level metadata.
    pub metadata: String,
    /// The data envelope around cards, or around a single card.
    pub data: String,
    /// Number of copies of a card.
    pub copies: String,
    /// Deck-level defaults for every card.
    pub defaults: String,
    /// Tags on a card.
    pub tags: String,
    /// Title of a card or deck.
    pub title: String,
}

impl Default for Keys {
    fn default() -> Self {
        Self {
            metadata: "metadata".into(),
            data: "data".into(),
            copies: "copies".into(),
            defaults: "defaults".into(),
            tags: "tags".into(),
            title: "title".into(),
        }
    }
}

impl Keys {
    /// Replace the title key.
    #[must_use]
    pub fn with_title(mut self, key: impl Into<String>) -> Self {
        self.title = key.into();
        self
    }

    /// Replace the tags key.
    #[must_use]
    pub fn with_tags(mut self, key: impl Into<String>) -> Self {
        self.tags = key.into();
        self
    }

    /// Replace the copies key.
    #[must_use]
    pub fn with_copies(mut self, key: impl Into<String>) -> Self {
        self.copies = key.into();
        self
    }

    /// Replace the metadata and data envelope keys.
    #[must_use]
    pub fn with_envelope(mut self, metadata: impl Into<String>, data: impl Into<String>) -> Self {
        self.metadata = metadata.into();
        self.data = data.into();
        self
    }

    /// Replace the defaults key.
    #[must_use]
    pub fn with_defaults(mut self, key: impl Into<String>) -> Self {
        self.defaults = key.into();
        self
    }
}
