//! Tag registry for checked tag lookup.
//!
//! The `TagRegistry` is the roster of tags declared by an application.
//! Specifications may only reference tags found in the roster, which
//! catches misspelled tags. It is an explicit value handed to card
//! construction, so each deck-building session can have its own.

use std::sync::Arc;

use rustc_hash::FxHashMap;

use crate::error::TaggingError;

use super::tag::Tag;

/// How a tag field turns strings from a specification into tags.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TagPolicy {
    /// Any string becomes a tag, no registration needed.
    Unchecked,
    /// Strings must name registered tags.
    #[default]
    Registered,
    /// Like `Registered`, and every subordinate needs its master present.
    Hierarchical,
}

impl TagPolicy {
    /// Produce the tag for `key`.
    pub fn resolve(self, key: &str, registry: &TagRegistry) -> Result<Arc<Tag>, TaggingError> {
        match self {
            TagPolicy::Unchecked => Ok(Arc::new(Tag::new(key))),
            TagPolicy::Registered | TagPolicy::Hierarchical => registry.get(key),
        }
    }
}

/// Registry of declared tags.
///
/// ## Example
///
/// ```
/// use deckprint::tags::{Tag, TagRegistry};
///
/// let mut registry = TagRegistry::new();
/// registry.register(Tag::new("animal")).unwrap();
/// registry.register(Tag::new("bird").subordinate_to("animal")).unwrap();
///
/// assert!(registry.get("bird").is_ok());
/// assert!(registry.get("fish").is_err());
/// ```
#[derive(Clone, Debug, Default)]
pub struct TagRegistry {
    tags: FxHashMap<String, Arc<Tag>>,
}

impl TagRegistry {
    /// Create a new empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a tag.
    ///
    /// Fails if the key is taken. A subordinate's master must already be
    /// registered, must not itself be subordinate, and must agree with it
    /// on being syntactic.
    pub fn register(&mut self, tag: Tag) -> Result<Arc<Tag>, TaggingError> {
        if self.tags.contains_key(&tag.key) {
            return Err(TaggingError::Duplicate(tag.key));
        }

        if let Some(master_key) = &tag.master {
            let master = self.tags.get(master_key).ok_or_else(|| TaggingError::UnknownMaster {
                tag: tag.key.clone(),
                master: master_key.clone(),
            })?;
            if master.is_subordinate() {
                return Err(TaggingError::NestedHierarchy {
                    tag: tag.key.clone(),
                    master: master_key.clone(),
                });
            }
            if master.syntactic != tag.syntactic {
                return Err(TaggingError::MixedHierarchy {
                    tag: tag.key.clone(),
                    master: master_key.clone(),
                });
            }
        }

        let tag = Arc::new(tag);
        self.tags.insert(tag.key.clone(), Arc::clone(&tag));
        Ok(tag)
    }

    /// Register a plain tag by key.
    pub fn define(&mut self, key: impl Into<String>) -> Result<Arc<Tag>, TaggingError> {
        self.register(Tag::new(key))
    }

    /// Look up a tag by key.
    pub fn get(&self, key: &str) -> Result<Arc<Tag>, TaggingError> {
        self.tags
            .get(key)
            .cloned()
            .ok_or_else(|| TaggingError::Unregistered(key.to_string()))
    }

    /// Check if a key is registered.
    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.tags.contains_key(key)
    }

    /// Get the number of registered tags.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tags.len()
    }

    /// Check if the registry is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }

    /// Iterate over all tags, in alphabetical order.
    pub fn iter(&self) -> impl Iterator<Item = &Arc<Tag>> {
        let mut tags: Vec<_> = self.tags.values().collect();
        tags.sort();
        tags.into_iter()
    }

    /// Find tags matching a predicate.
    pub fn find<F>(&self, predicate: F) -> impl Iterator<Item = &Arc<Tag>>
    where
        F: Fn(&Tag) -> bool,
    {
        self.iter().filter(move |t| predicate(t))
    }

    /// Tags serving directly under `master`.
    pub fn subordinates_of<'r>(&'r self, master: &'r str) -> impl Iterator<Item = &'r Arc<Tag>> {
        self.iter().filter(move |t| t.master.as_deref() == Some(master))
    }
}
