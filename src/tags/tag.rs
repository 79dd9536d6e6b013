//! Tags: short phrases for categorization.
//!
//! Any property of a card that does not require unique or elaborate text
//! can be reduced to a tag. Tags also drive program logic, such as
//! filtering cards for printing or choosing a colour scheme.

use std::cmp::Ordering;
use std::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};

/// A categorization token, identified by its key.
///
/// Tags are immutable once created. Equality, hashing and ordering use the
/// key alone; tags sort alphabetically by their string form.
///
/// ## Example
///
/// ```
/// use deckprint::tags::Tag;
///
/// let animal = Tag::new("animal").with_full_name("Animal companion");
/// let bird = Tag::new("bird").subordinate_to("animal");
///
/// assert_eq!(animal.full_name(), "Animal companion");
/// assert_eq!(bird.master.as_deref(), Some("animal"));
/// assert!(animal < bird);
/// ```
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Tag {
    /// The string used for this tag in specifications.
    pub key: String,

    /// Human-readable name. Defaults to the key.
    pub full_name: Option<String>,

    /// Non-printing tags are invisible on cards but usable in filters.
    pub printing: bool,

    /// Syntactic tags (e.g. "reaction", "phase 1") as opposed to
    /// semantic ones (e.g. "animal", "item").
    pub syntactic: bool,

    /// Weight for ordering cards by their tags.
    pub sorting_weight: i64,

    /// Key of the master tag, for a subordinate.
    pub master: Option<String>,
}

impl Tag {
    /// Create a printing, semantic tag without a master.
    #[must_use]
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            full_name: None,
            printing: true,
            syntactic: false,
            sorting_weight: 0,
            master: None,
        }
    }

    /// Set a human-readable name (builder pattern).
    #[must_use]
    pub fn with_full_name(mut self, name: impl Into<String>) -> Self {
        self.full_name = Some(name.into());
        self
    }

    /// Hide from rendered output (builder pattern).
    #[must_use]
    pub fn non_printing(mut self) -> Self {
        self.printing = false;
        self
    }

    /// Mark as syntactic (builder pattern).
    #[must_use]
    pub fn syntactic(mut self) -> Self {
        self.syntactic = true;
        self
    }

    /// Set the sorting weight (builder pattern).
    #[must_use]
    pub fn with_weight(mut self, weight: i64) -> Self {
        self.sorting_weight = weight;
        self
    }

    /// Make subordinate to another tag (builder pattern).
    #[must_use]
    pub fn subordinate_to(mut self, master: impl Into<String>) -> Self {
        self.master = Some(master.into());
        self
    }

    /// The full name, or the key if none was given.
    #[must_use]
    pub fn full_name(&self) -> &str {
        self.full_name.as_deref().unwrap_or(&self.key)
    }

    #[must_use]
    pub fn is_subordinate(&self) -> bool {
        self.master.is_some()
    }

    #[must_use]
    pub fn is_semantic(&self) -> bool {
        !self.syntactic
    }

    /// True if this tag serves directly under `master`.
    #[must_use]
    pub fn serves(&self, master: &Tag) -> bool {
        self.master.as_deref() == Some(master.key.as_str())
    }
}

impl PartialEq for Tag {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key
    }
}

impl Eq for Tag {}

impl Hash for Tag {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.key.hash(state);
    }
}

impl PartialOrd for Tag {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Tag {
    fn cmp(&self, other: &Self) -> Ordering {
        self.key.cmp(&other.key)
    }
}

impl std::fmt::Display for Tag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.key)
    }
}
