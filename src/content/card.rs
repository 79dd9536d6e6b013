//! Cards: the roots of content trees.
//!
//! A `CardClass` is the shared description of one kind of card: its plan
//! of fields, its reserved keys, its presenters and its sorting signature.
//! A `Card` is one populated tree built from that description.

use std::cmp::Ordering;
use std::sync::atomic::{AtomicUsize, Ordering as AtomicOrdering};
use std::sync::Arc;

use crate::core::{FieldId, Keys};
use crate::error::SpecError;
use crate::layout::{Presenter, Side};
use crate::spec::Spec;
use crate::tags::{Tag, TagPolicy, TagSet};

use super::field::{FieldClass, FieldKind, FieldRef, Slice};
use super::populate::{BuildContext, Populator};
use super::tree::{Content, Direction, FieldTree};

/// Which attributes order cards.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SortSignature {
    /// By deck title, then card title.
    #[default]
    DeckTitle,
    /// By deck title, then the summed weight of the card's tags, then
    /// card title.
    TagWeight,
}

/// The sorting signature of one card.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SortKey {
    pub deck: String,
    pub weight: i64,
    pub title: String,
}

/// Shared description of one kind of card.
#[derive(Debug)]
pub struct CardClass {
    name: String,
    root: FieldRef,
    keys: Keys,
    obverse: Option<Arc<dyn Presenter>>,
    reverse: Option<Arc<dyn Presenter>>,
    signature: SortSignature,
    untitled: AtomicUsize,
}

impl CardClass {
    /// Create a card class laying out `plan` at its root.
    #[must_use]
    pub fn new(name: impl Into<String>, plan: Vec<FieldRef>) -> Self {
        let name = name.into();
        Self {
            root: FieldClass::layout(name.clone(), plan).shared(),
            name,
            keys: Keys::default(),
            obverse: None,
            reverse: None,
            signature: SortSignature::default(),
            untitled: AtomicUsize::new(0),
        }
    }

    /// Use localized keys (builder pattern).
    #[must_use]
    pub fn with_keys(mut self, keys: Keys) -> Self {
        self.keys = keys;
        self
    }

    /// Present the front with `presenter` (builder pattern).
    #[must_use]
    pub fn with_obverse(mut self, presenter: Arc<dyn Presenter>) -> Self {
        self.obverse = Some(presenter);
        self
    }

    /// Present the back with `presenter` (builder pattern).
    #[must_use]
    pub fn with_reverse(mut self, presenter: Arc<dyn Presenter>) -> Self {
        self.reverse = Some(presenter);
        self
    }

    #[must_use]
    pub fn with_signature(mut self, signature: SortSignature) -> Self {
        self.signature = signature;
        self
    }

    /// Wrap for sharing between cards.
    #[must_use]
    pub fn shared(self) -> Arc<CardClass> {
        Arc::new(self)
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn keys(&self) -> &Keys {
        &self.keys
    }

    /// The layout field at the root of every card of this class.
    #[must_use]
    pub fn root(&self) -> &FieldRef {
        &self.root
    }

    #[must_use]
    pub fn presenter(&self, side: Side) -> Option<&Arc<dyn Presenter>> {
        match side {
            Side::Obverse => self.obverse.as_ref(),
            Side::Reverse => self.reverse.as_ref(),
        }
    }

    /// True if cards of this class read a title from their specification.
    #[must_use]
    pub fn has_title_field(&self) -> bool {
        self.root.consumes(&self.keys.title)
    }

    /// The next placeholder title. Numbering starts at 1 and is never
    /// reused within the lifetime of the class.
    fn generate_title(&self) -> String {
        let n = self.untitled.fetch_add(1, AtomicOrdering::Relaxed) + 1;
        format!("untitled card {}", n)
    }
}

/// The content of one card.
#[derive(Clone, Debug)]
pub struct Card {
    class: Arc<CardClass>,
    tree: FieldTree,
    title: String,
    deck: Option<String>,
}

impl Card {
    /// Build a card from its specification.
    ///
    /// The root layout owns the whole specification, so any key left over
    /// after the plan is built is an error. Failures are wrapped in
    /// [`SpecError::Card`], naming the title the card would have had.
    pub fn new(
        class: &Arc<CardClass>,
        spec: Option<Spec>,
        deck: Option<&str>,
        context: BuildContext<'_>,
    ) -> Result<Card, SpecError> {
        let generated = class.generate_title();
        let explicit = spec
            .as_ref()
            .and_then(Spec::as_map)
            .and_then(|m| m.get(&class.keys.title))
            .and_then(Spec::to_text);

        let slice = match spec {
            Some(spec) => Slice::Value(spec),
            None => Slice::Absent,
        };
        let mut populator = Populator::new(context);
        if let Err(err) = populator.spawn(&class.root, None, slice) {
            let title = explicit.unwrap_or(generated);
            log::error!("an error occurred while processing \"{}\"", title);
            return Err(SpecError::Card {
                title,
                source: Box::new(err),
            });
        }

        let tree = populator.into_tree();
        let title = tree
            .find_key(tree.root(), Direction::Down, &class.keys.title)
            .map(|id| tree.render(id))
            .filter(|t| !t.is_empty())
            .unwrap_or(generated);

        Ok(Card {
            class: Arc::clone(class),
            tree,
            title,
            deck: deck.map(str::to_string),
        })
    }

    #[must_use]
    pub fn class(&self) -> &Arc<CardClass> {
        &self.class
    }

    #[must_use]
    pub fn tree(&self) -> &FieldTree {
        &self.tree
    }

    /// The title field's text, or a generated placeholder.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Title of the deck the card belongs to, if any.
    #[must_use]
    pub fn deck(&self) -> Option<&str> {
        self.deck.as_deref()
    }

    /// The first field with `key`, anywhere in the card.
    #[must_use]
    pub fn field(&self, key: &str) -> Option<FieldId> {
        self.tree.find_key(self.tree.root(), Direction::Down, key)
    }

    /// The text of the first field with `key`.
    #[must_use]
    pub fn text(&self, key: &str) -> Option<String> {
        self.field(key).map(|id| self.tree.render(id))
    }

    /// The card's tags, if it has a tag field.
    #[must_use]
    pub fn tags(&self) -> Option<&TagSet> {
        self.tree
            .find(self.tree.root(), Direction::Down, |n| n.tags().is_some())
            .and_then(|id| self.tree.get(id).tags())
    }

    /// Add tags after the card is built.
    ///
    /// A hierarchical tag field is validated again; on failure the tags
    /// are left as they were.
    pub fn extend_tags<I>(&mut self, tags: I) -> Result<(), SpecError>
    where
        I: IntoIterator<Item = Arc<Tag>>,
    {
        let id = self
            .tree
            .find(self.tree.root(), Direction::Down, |n| n.tags().is_some())
            .ok_or_else(|| SpecError::NoTagField(self.title.clone()))?;
        let hierarchical = matches!(
            self.tree.get(id).class.kind,
            FieldKind::Tags(TagPolicy::Hierarchical)
        );

        if let Content::Tags(set) = &mut self.tree.get_mut(id).content {
            let mut next = set.clone();
            next.extend(tags);
            if hierarchical {
                next.validate_hierarchy()?;
            }
            *set = next;
        }
        Ok(())
    }

    #[must_use]
    pub fn presenter(&self, side: Side) -> Option<&Arc<dyn Presenter>> {
        self.class.presenter(side)
    }

    /// The card's position in a sorted deck.
    #[must_use]
    pub fn sorting_key(&self) -> SortKey {
        let weight = match self.class.signature {
            SortSignature::DeckTitle => 0,
            SortSignature::TagWeight => self.tags().map_or(0, TagSet::sorting_weight),
        };
        SortKey {
            deck: self.deck.clone().unwrap_or_default(),
            weight,
            title: self.title.clone(),
        }
    }

    /// Compare by sorting signature.
    #[must_use]
    pub fn cmp_signature(&self, other: &Card) -> Ordering {
        self.sorting_key().cmp(&other.sorting_key())
    }
}

impl std::fmt::Display for Card {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.title)
    }
}
