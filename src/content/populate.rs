//! Recursive population of a content tree from a specification.
//!
//! Population is synchronous and strictly follows plan order. Each node is
//! attached to its parent before it is populated, so a field can search
//! upward through everything built before it.

use std::sync::Arc;

use crate::core::FieldId;
use crate::error::SpecError;
use crate::spec::{Spec, SpecMap};
use crate::tags::{TagPolicy, TagRegistry, TagSet};

use super::field::{FieldKind, FieldRef, Slice};
use super::markup::Markup;
use super::tree::{Content, FieldNode, FieldTree};

/// Services available while building cards.
#[derive(Clone, Copy, Debug)]
pub struct BuildContext<'r> {
    /// Roster for registered tags.
    pub tags: &'r TagRegistry,
    /// Shorthand applied to paragraphs, if any.
    pub markup: Option<&'r Markup>,
}

impl<'r> BuildContext<'r> {
    #[must_use]
    pub fn new(tags: &'r TagRegistry) -> Self {
        Self { tags, markup: None }
    }

    /// Expand shorthand in every paragraph (builder pattern).
    #[must_use]
    pub fn with_markup(mut self, markup: &'r Markup) -> Self {
        self.markup = Some(markup);
        self
    }
}

/// Builds one `FieldTree`.
#[derive(Debug)]
pub struct Populator<'r> {
    tree: FieldTree,
    context: BuildContext<'r>,
}

impl<'r> Populator<'r> {
    #[must_use]
    pub fn new(context: BuildContext<'r>) -> Self {
        Self {
            tree: FieldTree::new(),
            context,
        }
    }

    /// The tree built so far.
    #[must_use]
    pub fn tree(&self) -> &FieldTree {
        &self.tree
    }

    #[must_use]
    pub fn context(&self) -> BuildContext<'r> {
        self.context
    }

    #[must_use]
    pub fn into_tree(self) -> FieldTree {
        self.tree
    }

    /// Replace the content of a node.
    pub fn set_content(&mut self, node: FieldId, content: Content) {
        self.tree.get_mut(node).content = content;
    }

    /// Create a node of `class` under `parent` and populate it.
    ///
    /// Failures are logged with the field class before being returned.
    pub fn spawn(
        &mut self,
        class: &FieldRef,
        parent: Option<FieldId>,
        slice: Slice<'_>,
    ) -> Result<FieldId, SpecError> {
        let class = Arc::clone(class);
        let raw = match &slice {
            Slice::Value(spec) => Some(spec.clone()),
            Slice::Absent | Slice::Remainder(_) => None,
        };
        let node = self.tree.alloc(FieldNode::new(Arc::clone(&class), parent, raw))?;

        if let Err(err) = self.populate_as(node, &class.kind, slice) {
            log::error!("failed to populate {} field: {}", class.name, err);
            return Err(err);
        }
        Ok(node)
    }

    /// Populate an existing node as if it were of `kind`.
    pub fn populate_as(
        &mut self,
        node: FieldId,
        kind: &FieldKind,
        slice: Slice<'_>,
    ) -> Result<(), SpecError> {
        match kind {
            FieldKind::Atom => Ok(()),
            FieldKind::Paragraph => self.paragraph(node, slice),
            FieldKind::Container { child } => self.container(node, child.as_ref(), slice),
            FieldKind::List { item } => self.list(node, item, slice),
            FieldKind::Grid { cell } => self.grid(node, cell, slice),
            FieldKind::Layout { plan } => self.layout(node, plan, slice),
            FieldKind::Auto { plan } => self.auto(node, plan, slice),
            FieldKind::Tags(policy) => self.tags(node, *policy, slice),
            FieldKind::Custom(behaviour) => behaviour.populate(self, node, slice),
        }
    }

    fn name(&self, node: FieldId) -> String {
        self.tree.get(node).class.name.clone()
    }

    fn shape(&self, node: FieldId, expected: &'static str, found: &'static str) -> SpecError {
        SpecError::Shape {
            owner: self.name(node),
            expected,
            found,
        }
    }

    /// Elements of a list-like slice. Absence is an empty list.
    fn items(&self, node: FieldId, slice: Slice<'_>) -> Result<Vec<Spec>, SpecError> {
        match slice {
            Slice::Absent => Ok(Vec::new()),
            Slice::Value(spec) => spec
                .into_items()
                .map_err(|found| self.shape(node, "a sequence", found)),
            Slice::Remainder(_) => Err(self.shape(node, "a sequence", "a mapping")),
        }
    }

    fn paragraph(&mut self, node: FieldId, slice: Slice<'_>) -> Result<(), SpecError> {
        let value = match slice {
            Slice::Value(spec) if !spec.is_null() => spec,
            Slice::Remainder(_) => return Err(self.shape(node, "text", "a mapping")),
            _ => return Err(SpecError::Missing { field: self.name(node) }),
        };
        let text = value
            .to_text()
            .ok_or_else(|| self.shape(node, "text", value.kind()))?;
        let text = match self.context.markup {
            Some(markup) => markup.expand(&text)?,
            None => text,
        };
        self.set_content(node, Content::Text(text));
        Ok(())
    }

    fn container(
        &mut self,
        node: FieldId,
        child: Option<&FieldRef>,
        slice: Slice<'_>,
    ) -> Result<(), SpecError> {
        let value = match slice {
            Slice::Absent => return Ok(()),
            Slice::Value(spec) => spec,
            Slice::Remainder(map) => Spec::Map(std::mem::take(map)),
        };
        match child {
            Some(class) => {
                self.spawn(class, Some(node), Slice::Value(value))?;
            }
            None => self.set_content(node, Content::Payload(value)),
        }
        Ok(())
    }

    fn list(&mut self, node: FieldId, item: &FieldRef, slice: Slice<'_>) -> Result<(), SpecError> {
        for element in self.items(node, slice)? {
            self.spawn(item, Some(node), Slice::Value(element))?;
        }
        Ok(())
    }

    fn grid(&mut self, node: FieldId, cell: &FieldRef, slice: Slice<'_>) -> Result<(), SpecError> {
        let rows: Vec<Vec<Spec>> = self
            .items(node, slice)?
            .into_iter()
            .map(|row| match row {
                Spec::Seq(cells) => Ok(cells),
                other => Err(self.shape(node, "a row of cells", other.kind())),
            })
            .collect::<Result<_, _>>()?;

        let cols = rows.first().map_or(0, Vec::len);
        if rows.iter().any(|row| row.len() != cols) {
            return Err(self.shape(node, "a rectangular grid", "rows of unequal length"));
        }

        let shape = Content::Grid {
            rows: rows.len(),
            cols,
        };
        for value in rows.into_iter().flatten() {
            self.spawn(cell, Some(node), Slice::Value(value))?;
        }
        self.set_content(node, shape);
        Ok(())
    }

    fn layout(
        &mut self,
        node: FieldId,
        plan: &[FieldRef],
        slice: Slice<'_>,
    ) -> Result<(), SpecError> {
        if plan.is_empty() {
            return Err(SpecError::NoPlan(self.name(node)));
        }
        match slice {
            Slice::Absent | Slice::Value(Spec::Null) => {
                for class in plan {
                    self.spawn(class, Some(node), Slice::Absent)?;
                }
                Ok(())
            }
            Slice::Remainder(map) => self.distribute(node, plan, map),
            Slice::Value(Spec::Map(mut map)) => {
                self.distribute(node, plan, &mut map)?;
                self.check_consumed(node, map)
            }
            Slice::Value(other) => Err(self.shape(node, "a mapping", other.kind())),
        }
    }

    /// Hand each planned child its keyed value, or the shared remainder.
    fn distribute(
        &mut self,
        node: FieldId,
        plan: &[FieldRef],
        map: &mut SpecMap,
    ) -> Result<(), SpecError> {
        for class in plan {
            let slice = match &class.key {
                Some(key) => map.shift_remove(key).map_or(Slice::Absent, Slice::Value),
                None => Slice::Remainder(&mut *map),
            };
            self.spawn(class, Some(node), slice)?;
        }
        Ok(())
    }

    fn check_consumed(&self, node: FieldId, map: SpecMap) -> Result<(), SpecError> {
        match map.into_iter().next() {
            Some((key, value)) => Err(SpecError::Unconsumed {
                owner: self.name(node),
                key,
                value: value.to_string(),
            }),
            None => Ok(()),
        }
    }

    fn auto(
        &mut self,
        node: FieldId,
        plan: &[FieldRef],
        slice: Slice<'_>,
    ) -> Result<(), SpecError> {
        if plan.is_empty() {
            return Err(SpecError::NoPlan(self.name(node)));
        }
        for (i, element) in self.items(node, slice)?.into_iter().enumerate() {
            self.spawn(&plan[i % plan.len()], Some(node), Slice::Value(element))?;
        }
        Ok(())
    }

    fn tags(
        &mut self,
        node: FieldId,
        policy: TagPolicy,
        slice: Slice<'_>,
    ) -> Result<(), SpecError> {
        let mut set = TagSet::new();
        for element in self.items(node, slice)? {
            let key = element
                .to_text()
                .ok_or_else(|| self.shape(node, "a tag", element.kind()))?;
            set.insert(policy.resolve(&key, self.context.tags)?);
        }
        if policy == TagPolicy::Hierarchical {
            set.validate_hierarchy()?;
        }
        self.set_content(node, Content::Tags(set));
        Ok(())
    }
}
