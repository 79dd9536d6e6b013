//! Core types: arena indices, geometry, reserved keys, configuration.
//!
//! This module contains the building blocks shared by the content model
//! and the layout engine.

pub mod config;
pub mod geometry;
pub mod ids;
pub mod keys;

pub use config::{
    LayoutConfig, NamingConfig, Selection, A4, A4_MARGINS, MINI_EURO, SHORT_EURO, STANDARD_EURO,
};
pub use geometry::{Footprint, Margins, Point, Transform};
pub use ids::{CardId, FieldId};
pub use keys::Keys;
