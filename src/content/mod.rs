//! Card content: field trees, cards and decks.
//!
//! Specifications are consumed top-down. A `Deck` hands each card's slice
//! to its `CardClass`, whose root layout hands keyed slices (or the shared
//! remainder) to each planned field, and so on down the tree.
//!
//! ## Key Types
//!
//! - `FieldClass`: Shared description of one field (`FieldKind` plus optional key)
//! - `FieldTree`: Arena of populated `FieldNode`s, searchable up and down
//! - `Populator`: Builds a tree, logging and returning the first failure
//! - `Markup`: Shorthand tokens expanded in paragraphs
//! - `CardClass` / `Card`: Plan, presenters and sorting of a kind of card; one built card
//! - `Deck`: Cards with copy counts, selection and sorting

pub mod card;
pub mod deck;
pub mod field;
pub mod markup;
pub mod populate;
pub mod tree;

pub use card::{Card, CardClass, SortKey, SortSignature};
pub use deck::{flatten, Deck, DeckEntry, Restriction, Selector};
pub use field::{FieldBehaviour, FieldClass, FieldKind, FieldRef, Slice};
pub use markup::Markup;
pub use populate::{BuildContext, Populator};
pub use tree::{Content, Direction, FieldNode, FieldTree};
