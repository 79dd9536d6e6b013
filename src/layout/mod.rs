//! Layout engine: placing card sides on printable images.
//!
//! A `Layouter` walks a list of card copies once per pass and hands each
//! side to a `Strategy`, which places it on an `Image`. Most strategies
//! use the shelf packer built into `Image`; the fan places cards directly.
//!
//! ## Key Types
//!
//! - `Presenter`: Footprint and rendering of one side of a kind of card
//! - `Image`: Canvas with margins and a row-based packer
//! - `Strategy`: `Sheets`, `Neighbours`, `Duplex`, `Singles`, `Fan`
//! - `Layouter`: Runs a strategy over a card list, tracking `RunState`
//! - `ImageNamer`: Filenames for the produced images

pub mod fan;
pub mod image;
pub mod layouter;
pub mod naming;
pub mod presenter;
pub mod strategy;

pub use fan::FanGeometry;
pub use image::{Image, PackError, Placement, Sheet, Subject};
pub use layouter::{Layouter, RunState};
pub use naming::ImageNamer;
pub use presenter::{FixedSize, Presenter, Rendering, Side, Sides};
pub use strategy::{pack, CardCopy, Duplex, Fan, Neighbours, Sheets, Singles, Strategy};
