//! Arena-based content tree.
//!
//! Each card owns one `FieldTree`. Nodes are stored in a flat vector and
//! refer to their parent and children by `FieldId`, so parent links never
//! own anything and the whole tree is dropped with the card.

use crate::core::FieldId;
use crate::error::SpecError;
use crate::spec::Spec;
use crate::tags::TagSet;

use super::field::FieldRef;

/// Derived content of one node.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum Content {
    /// Nothing of its own. Children, if any, hold the content.
    #[default]
    Empty,
    Text(String),
    /// Specification data kept as it was.
    Payload(Spec),
    Tags(TagSet),
    /// Children are cells, in row-major order.
    Grid { rows: usize, cols: usize },
}

/// A node in a `FieldTree`.
#[derive(Clone, Debug)]
pub struct FieldNode {
    /// The class this node was built from.
    pub class: FieldRef,

    /// Parent node (`None` for the root).
    pub parent: Option<FieldId>,

    /// Children, in the order they were created.
    pub children: Vec<FieldId>,

    /// The raw specification handed to this node, if it owned one.
    pub spec: Option<Spec>,

    pub content: Content,
}

impl FieldNode {
    #[must_use]
    pub fn new(class: FieldRef, parent: Option<FieldId>, spec: Option<Spec>) -> Self {
        Self {
            class,
            parent,
            children: Vec::new(),
            spec,
            content: Content::Empty,
        }
    }

    /// The key this node was looked up by, if any.
    #[must_use]
    pub fn key(&self) -> Option<&str> {
        self.class.key.as_deref()
    }

    #[must_use]
    pub fn tags(&self) -> Option<&TagSet> {
        match &self.content {
            Content::Tags(tags) => Some(tags),
            _ => None,
        }
    }
}

/// Direction of a tree search.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    /// Ancestors, nearest first.
    Up,
    /// Descendants, depth-first in creation order.
    Down,
}

/// Content tree of one card.
#[derive(Clone, Debug, Default)]
pub struct FieldTree {
    nodes: Vec<FieldNode>,
}

impl FieldTree {
    /// Create an empty tree. The first node allocated is the root.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    #[must_use]
    pub fn root(&self) -> FieldId {
        FieldId::ROOT
    }

    /// Get a node by ID.
    #[inline]
    #[must_use]
    pub fn get(&self, id: FieldId) -> &FieldNode {
        &self.nodes[id.index()]
    }

    /// Get a mutable node by ID.
    #[inline]
    pub fn get_mut(&mut self, id: FieldId) -> &mut FieldNode {
        &mut self.nodes[id.index()]
    }

    /// Allocate a node and attach it to its parent.
    ///
    /// Fails once the arena holds `u32::MAX` nodes.
    pub fn alloc(&mut self, node: FieldNode) -> Result<FieldId, SpecError> {
        let id = FieldId::from_index(self.nodes.len()).ok_or(SpecError::TooMany("fields"))?;
        let parent = node.parent;
        self.nodes.push(node);
        if let Some(parent) = parent {
            self.get_mut(parent).children.push(id);
        }
        Ok(id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Iterate over all nodes in allocation order.
    pub fn iter(&self) -> impl Iterator<Item = (FieldId, &FieldNode)> {
        (0..).map(FieldId::new).zip(&self.nodes)
    }

    /// Ancestors of a node, nearest first.
    pub fn ancestors(&self, id: FieldId) -> impl Iterator<Item = FieldId> + '_ {
        std::iter::successors(self.get(id).parent, move |&p| self.get(p).parent)
    }

    /// Descendants of a node in depth-first preorder, excluding the node.
    #[must_use]
    pub fn descendants(&self, id: FieldId) -> Vec<FieldId> {
        let mut found = Vec::new();
        let mut stack: Vec<FieldId> = self.get(id).children.iter().rev().copied().collect();
        while let Some(next) = stack.pop() {
            found.push(next);
            stack.extend(self.get(next).children.iter().rev().copied());
        }
        found
    }

    /// Find the first node in the given direction matching a predicate.
    pub fn find<P>(&self, from: FieldId, direction: Direction, predicate: P) -> Option<FieldId>
    where
        P: Fn(&FieldNode) -> bool,
    {
        match direction {
            Direction::Up => self.ancestors(from).find(|&id| predicate(self.get(id))),
            Direction::Down => self
                .descendants(from)
                .into_iter()
                .find(|&id| predicate(self.get(id))),
        }
    }

    /// Like [`find`](Self::find), but a miss is an error describing `what`
    /// was sought.
    pub fn require<P>(
        &self,
        from: FieldId,
        direction: Direction,
        what: &'static str,
        predicate: P,
    ) -> Result<FieldId, SpecError>
    where
        P: Fn(&FieldNode) -> bool,
    {
        self.find(from, direction, predicate)
            .ok_or_else(|| SpecError::NotFound {
                from: self.get(from).class.name.clone(),
                what,
            })
    }

    /// Find a node by key.
    #[must_use]
    pub fn find_key(&self, from: FieldId, direction: Direction, key: &str) -> Option<FieldId> {
        self.find(from, direction, |n| n.key() == Some(key))
    }

    /// The tag set closest to a node: the first found below any ancestor,
    /// walking up from the node's parent.
    #[must_use]
    pub fn nearest_tags(&self, from: FieldId) -> Option<&TagSet> {
        self.ancestors(from).find_map(|ancestor| {
            self.find(ancestor, Direction::Down, |n| n.tags().is_some())
                .and_then(|id| self.get(id).tags())
        })
    }

    /// Mutable access to the first tag set in the tree.
    pub fn tags_mut(&mut self) -> Option<&mut TagSet> {
        let id = self.find(self.root(), Direction::Down, |n| n.tags().is_some())?;
        match &mut self.get_mut(id).content {
            Content::Tags(tags) => Some(tags),
            _ => None,
        }
    }

    /// Render a node as plain text.
    ///
    /// Nodes without content of their own join their children's text with
    /// an indented line break.
    #[must_use]
    pub fn render(&self, id: FieldId) -> String {
        let node = self.get(id);
        match &node.content {
            Content::Text(text) => text.clone(),
            Content::Payload(spec) => spec.to_string(),
            Content::Tags(tags) => tags.to_string(),
            Content::Grid { cols, .. } => node
                .children
                .chunks((*cols).max(1))
                .map(|row| {
                    row.iter()
                        .map(|&c| self.render(c))
                        .collect::<Vec<_>>()
                        .join(" ")
                })
                .collect::<Vec<_>>()
                .join("\n"),
            Content::Empty => node
                .children
                .iter()
                .map(|&c| self.render(c))
                .collect::<Vec<_>>()
                .join("\n  "),
        }
    }
}
