//! Tags and the registry that declares them.
//!
//! ## Key Types
//!
//! - `Tag`: An immutable categorization token, optionally subordinate to one master
//! - `TagRegistry`: The roster of declared tags, passed explicitly to card construction
//! - `TagPolicy`: Whether a tag field accepts any string, or only declared tags
//! - `TagSet`: The sorted tags on one card, with hierarchy checks and rendering

pub mod registry;
pub mod set;
pub mod tag;

pub use registry::{TagPolicy, TagRegistry};
pub use set::TagSet;
pub use tag::Tag;
