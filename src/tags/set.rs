//! The tags present on one card.

use std::sync::Arc;

use crate::error::TaggingError;

use super::tag::Tag;

/// A sorted, duplicate-free collection of tags.
///
/// The contents are re-sorted alphabetically after every mutation, so
/// iteration order never reflects insertion order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TagSet {
    tags: Vec<Arc<Tag>>,
}

impl TagSet {
    /// Create an empty set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a tag. Returns false if a tag with the same key was present.
    pub fn insert(&mut self, tag: Arc<Tag>) -> bool {
        match self.tags.binary_search(&tag) {
            Ok(_) => false,
            Err(position) => {
                self.tags.insert(position, tag);
                true
            }
        }
    }

    /// Remove a tag by key.
    pub fn remove(&mut self, key: &str) -> Option<Arc<Tag>> {
        let position = self.tags.iter().position(|t| t.key == key)?;
        Some(self.tags.remove(position))
    }

    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Arc<Tag>> {
        self.tags
            .binary_search_by(|t| t.key.as_str().cmp(key))
            .ok()
            .map(|i| &self.tags[i])
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.tags.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Arc<Tag>> {
        self.tags.iter()
    }

    /// The string form of each tag, in order.
    pub fn strings(&self) -> impl Iterator<Item = &str> {
        self.tags.iter().map(|t| t.key.as_str())
    }

    /// Tags that serve under a master.
    pub fn subordinates(&self) -> impl Iterator<Item = &Arc<Tag>> {
        self.tags.iter().filter(|t| t.is_subordinate())
    }

    /// Tags with at least one subordinate present in this set.
    pub fn masters(&self) -> impl Iterator<Item = &Arc<Tag>> {
        self.tags
            .iter()
            .filter(move |m| self.subordinates().any(|s| s.serves(m)))
    }

    /// Check that the master of every subordinate is present.
    pub fn validate_hierarchy(&self) -> Result<(), TaggingError> {
        for tag in self.subordinates() {
            if let Some(master) = &tag.master {
                if !self.contains(master) {
                    return Err(TaggingError::MissingMaster {
                        tag: tag.key.clone(),
                        master: master.clone(),
                    });
                }
            }
        }
        Ok(())
    }

    /// A new set of the tags matching a predicate.
    #[must_use]
    pub fn subset<F>(&self, predicate: F) -> TagSet
    where
        F: Fn(&Tag) -> bool,
    {
        TagSet {
            tags: self.tags.iter().filter(|t| predicate(t)).cloned().collect(),
        }
    }

    #[must_use]
    pub fn syntactic(&self) -> TagSet {
        self.subset(|t| t.syntactic)
    }

    #[must_use]
    pub fn semantic(&self) -> TagSet {
        self.subset(Tag::is_semantic)
    }

    /// Sum of the sorting weights of all tags.
    #[must_use]
    pub fn sorting_weight(&self) -> i64 {
        self.tags.iter().map(|t| t.sorting_weight).sum()
    }

    /// Render the tags of `selection` that are present in this set.
    ///
    /// Non-printing tags and subordinates are hidden. Each remaining tag is
    /// capitalized, and a master is followed by its printing subordinates
    /// in parentheses, e.g. `"Animal (bird, fish), Item"`.
    #[must_use]
    pub fn as_string(&self, selection: &TagSet) -> String {
        selection
            .iter()
            .filter(|t| t.printing && !t.is_subordinate() && self.contains(&t.key))
            .map(|tag| {
                let mut text = capitalize(&tag.key);
                let subordinates: Vec<&str> = self
                    .subordinates()
                    .filter(|s| s.printing && s.serves(tag))
                    .map(|s| s.key.as_str())
                    .collect();
                if !subordinates.is_empty() {
                    text.push_str(" (");
                    text.push_str(&subordinates.join(", "));
                    text.push(')');
                }
                text
            })
            .collect::<Vec<_>>()
            .join(", ")
    }
}

fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}

impl FromIterator<Arc<Tag>> for TagSet {
    fn from_iter<I: IntoIterator<Item = Arc<Tag>>>(iter: I) -> Self {
        let mut set = TagSet::new();
        set.extend(iter);
        set
    }
}

impl Extend<Arc<Tag>> for TagSet {
    fn extend<I: IntoIterator<Item = Arc<Tag>>>(&mut self, iter: I) {
        for tag in iter {
            self.insert(tag);
        }
    }
}

impl<'a> IntoIterator for &'a TagSet {
    type Item = &'a Arc<Tag>;
    type IntoIter = std::slice::Iter<'a, Arc<Tag>>;

    fn into_iter(self) -> Self::IntoIter {
        self.tags.iter()
    }
}

impl std::fmt::Display for TagSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.as_string(self))
    }
}
