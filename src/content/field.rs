//! Field classes: the ideal types of content a card can hold.
//!
//! A `FieldClass` describes how one node of a card's content tree is built
//! from its slice of a specification. Classes are shared immutably between
//! all cards of a kind; the nodes built from them live in a `FieldTree`.

use std::sync::Arc;

use crate::core::FieldId;
use crate::error::SpecError;
use crate::spec::{Spec, SpecMap};
use crate::tags::TagPolicy;

use super::populate::Populator;

/// Shared handle to a field class.
pub type FieldRef = Arc<FieldClass>;

/// The portion of a specification handed to one field.
#[derive(Debug)]
pub enum Slice<'s> {
    /// The specification does not mention the field.
    Absent,
    /// A value owned outright by the field.
    Value(Spec),
    /// Whatever remains of a parent's mapping. The field removes the keys
    /// it uses and leaves the rest to later siblings.
    Remainder(&'s mut SpecMap),
}

impl Slice<'_> {
    /// A description of the slice's shape, for error messages.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Slice::Absent => "nothing",
            Slice::Value(spec) => spec.kind(),
            Slice::Remainder(_) => "a mapping",
        }
    }
}

/// Application-defined population, for fields whose behaviour depends on
/// the rest of the card.
///
/// The populator gives access to the partially built tree, so an
/// implementation can search upward for earlier siblings (such as a tag
/// field) before delegating to a standard kind with
/// [`Populator::populate_as`].
pub trait FieldBehaviour: Send + Sync + std::fmt::Debug {
    fn populate(
        &self,
        populator: &mut Populator<'_>,
        node: FieldId,
        slice: Slice<'_>,
    ) -> Result<(), SpecError>;
}

/// How a field turns its slice into content.
#[derive(Clone, Debug)]
pub enum FieldKind {
    /// A leaf that ignores its specification.
    Atom,
    /// Text from a scalar. Required: fails when absent.
    Paragraph,
    /// Wraps one child of the given class, or an opaque payload.
    Container { child: Option<FieldRef> },
    /// One child of the same class per element of a sequence.
    List { item: FieldRef },
    /// A rectangular sequence of rows, one child per cell.
    Grid { cell: FieldRef },
    /// A fixed plan of children that divide a mapping by key.
    Layout { plan: Vec<FieldRef> },
    /// One child per element, cycling through the plan.
    Auto { plan: Vec<FieldRef> },
    /// A sorted set of tags.
    Tags(TagPolicy),
    /// Application-defined behaviour.
    Custom(Arc<dyn FieldBehaviour>),
}

/// A named field type, with an optional key into its parent's mapping.
///
/// ## Example
///
/// ```
/// use deckprint::content::FieldClass;
///
/// let title = FieldClass::paragraph("title").with_key("title");
/// let card = FieldClass::layout("card", vec![title.shared()]);
/// assert_eq!(card.name, "card");
/// assert!(card.key.is_none());
/// ```
#[derive(Clone, Debug)]
pub struct FieldClass {
    pub name: String,
    pub key: Option<String>,
    pub kind: FieldKind,
}

impl FieldClass {
    /// Create a field class of any kind.
    #[must_use]
    pub fn new(name: impl Into<String>, kind: FieldKind) -> Self {
        Self {
            name: name.into(),
            key: None,
            kind,
        }
    }

    #[must_use]
    pub fn atom(name: impl Into<String>) -> Self {
        Self::new(name, FieldKind::Atom)
    }

    #[must_use]
    pub fn paragraph(name: impl Into<String>) -> Self {
        Self::new(name, FieldKind::Paragraph)
    }

    /// Zero or more paragraphs, from a scalar or a sequence of scalars.
    #[must_use]
    pub fn text(name: impl Into<String>) -> Self {
        let paragraph = FieldClass::paragraph("paragraph").shared();
        Self::new(name, FieldKind::Auto { plan: vec![paragraph] })
    }

    #[must_use]
    pub fn container(name: impl Into<String>, child: Option<FieldRef>) -> Self {
        Self::new(name, FieldKind::Container { child })
    }

    #[must_use]
    pub fn list(name: impl Into<String>, item: FieldRef) -> Self {
        Self::new(name, FieldKind::List { item })
    }

    #[must_use]
    pub fn grid(name: impl Into<String>, cell: FieldRef) -> Self {
        Self::new(name, FieldKind::Grid { cell })
    }

    #[must_use]
    pub fn layout(name: impl Into<String>, plan: Vec<FieldRef>) -> Self {
        Self::new(name, FieldKind::Layout { plan })
    }

    #[must_use]
    pub fn auto(name: impl Into<String>, plan: Vec<FieldRef>) -> Self {
        Self::new(name, FieldKind::Auto { plan })
    }

    /// A tag field under the conventional `tags` key.
    #[must_use]
    pub fn tags(policy: TagPolicy) -> Self {
        Self::new("tags", FieldKind::Tags(policy)).with_key("tags")
    }

    #[must_use]
    pub fn custom(name: impl Into<String>, behaviour: Arc<dyn FieldBehaviour>) -> Self {
        Self::new(name, FieldKind::Custom(behaviour))
    }

    /// Look up this field's content under `key` (builder pattern).
    #[must_use]
    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = Some(key.into());
        self
    }

    /// Wrap for sharing in plans.
    #[must_use]
    pub fn shared(self) -> FieldRef {
        Arc::new(self)
    }

    /// True if building this field can remove `key` from the mapping it
    /// is laid out in.
    ///
    /// That is the case when the field has the key itself, or when it is
    /// an unkeyed layout sharing the mapping with a descendant that does.
    #[must_use]
    pub fn consumes(&self, key: &str) -> bool {
        match (&self.key, &self.kind) {
            (Some(own), _) => own == key,
            (None, FieldKind::Layout { plan }) => plan.iter().any(|c| c.consumes(key)),
            (None, FieldKind::Container { .. }) => true,
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_is_auto_over_paragraphs() {
        let text = FieldClass::text("rules");
        match &text.kind {
            FieldKind::Auto { plan } => {
                assert_eq!(plan.len(), 1);
                assert!(matches!(plan[0].kind, FieldKind::Paragraph));
            }
            other => panic!("expected an auto field, got {:?}", other),
        }
    }

    #[test]
    fn test_tags_have_key() {
        let tags = FieldClass::tags(TagPolicy::Unchecked);
        assert_eq!(tags.key.as_deref(), Some("tags"));
    }

    #[test]
    fn test_consumes_through_unkeyed_layout() {
        let title = FieldClass::paragraph("title").with_key("title").shared();
        let header = FieldClass::layout("header", vec![title]).shared();
        let card = FieldClass::layout("card", vec![header]);

        assert!(card.consumes("title"));
        assert!(!card.consumes("body"));

        let keyed = FieldClass::layout("box", vec![]).with_key("box");
        assert!(keyed.consumes("box"));
        assert!(!keyed.consumes("title"));
    }

    #[test]
    fn test_slice_kind() {
        let mut map = SpecMap::new();
        assert_eq!(Slice::Absent.kind(), "nothing");
        assert_eq!(Slice::Value(Spec::from(1)).kind(), "an integer");
        assert_eq!(Slice::Remainder(&mut map).kind(), "a mapping");
    }
}
