//! # deckprint
//!
//! A library for turning card game specifications into printable images.
//!
//! ## Design Principles
//!
//! 1. **Game-Agnostic**: No hardcoded card layouts. Applications describe
//!    each kind of card as a plan of fields, and each side of it as a
//!    `Presenter`.
//!
//! 2. **Specification-Driven**: Decks are read from JSON or YAML documents.
//!    Every key must be consumed by some field, so typos fail loudly.
//!
//! 3. **Configuration Over Convention**: Reserved keys, image sizes,
//!    margins and filenames are all configurable.
//!
//! ## Architecture
//!
//! - **Field Trees**: Each card is an arena of fields populated top-down
//!   from its specification. Fields search the tree up and down by
//!   predicate.
//!
//! - **Tag Registry**: Tags are registered once per session and passed
//!   explicitly to the fields that reference them.
//!
//! - **Strategies**: A layouter hands card copies to a `Strategy`, which
//!   places them on images with a shelf packer or, for fans, directly.
//!
//! ## Modules
//!
//! - `core`: Arena indices, geometry, reserved keys, configuration
//! - `spec`: Specification documents and their loader
//! - `tags`: Tags, the tag registry and tag sets
//! - `content`: Field trees, markup, cards and decks
//! - `layout`: Images, presenters, strategies and the layouter
//! - `error`: Error taxonomy

pub mod content;
pub mod core;
pub mod error;
pub mod layout;
pub mod spec;
pub mod tags;

// Re-export commonly used types
pub use crate::core::{
    CardId, FieldId,
    Footprint, Margins, Point, Transform,
    Keys,
    LayoutConfig, NamingConfig, Selection,
};

pub use crate::spec::{Spec, SpecMap, Format};

pub use crate::tags::{Tag, TagPolicy, TagRegistry, TagSet};

pub use crate::content::{
    BuildContext, Markup,
    FieldBehaviour, FieldClass, FieldKind, FieldRef, Slice,
    FieldTree, FieldNode, Content, Direction, Populator,
    Card, CardClass, SortSignature,
    Deck, DeckEntry, flatten,
};

pub use crate::layout::{
    Side, Sides, Presenter, FixedSize, Rendering,
    Image, Sheet, Placement,
    Strategy, Sheets, Neighbours, Duplex, Singles, Fan,
    Layouter, RunState, ImageNamer,
};

pub use crate::error::{
    Error, Result,
    SpecError, TaggingError, MarkupError, SelectionError, LoadError, LayoutError,
};
