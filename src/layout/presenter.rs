//! Presenters: how a card side looks on an image.
//!
//! Drawing itself belongs to the application. The layout engine only needs
//! to know how much room each side takes, and records where it put it.

use serde::{Deserialize, Serialize};

use crate::content::Card;
use crate::core::{Footprint, Point, Transform};

/// One side of a card.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    /// The front.
    Obverse,
    /// The back.
    Reverse,
}

impl Side {
    pub const ALL: [Side; 2] = [Side::Obverse, Side::Reverse];

    /// The side laid out in a given direction. Fronts are laid out left to
    /// right and backs right to left, so the two match up when printed
    /// on both sides of a sheet.
    #[must_use]
    pub const fn from_direction(left_to_right: bool) -> Self {
        if left_to_right {
            Side::Obverse
        } else {
            Side::Reverse
        }
    }

    #[must_use]
    pub const fn left_to_right(self) -> bool {
        matches!(self, Side::Obverse)
    }
}

impl std::fmt::Display for Side {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Side::Obverse => f.write_str("obverse"),
            Side::Reverse => f.write_str("reverse"),
        }
    }
}

/// A request to lay out one or both sides.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Sides {
    pub obverse: bool,
    pub reverse: bool,
}

impl Sides {
    pub const OBVERSE: Sides = Sides::new(true, false);
    pub const REVERSE: Sides = Sides::new(false, true);
    pub const BOTH: Sides = Sides::new(true, true);

    #[must_use]
    pub const fn new(obverse: bool, reverse: bool) -> Self {
        Self { obverse, reverse }
    }

    #[must_use]
    pub const fn is_empty(self) -> bool {
        !self.obverse && !self.reverse
    }

    /// The requested sides, front first.
    pub fn iter(self) -> impl Iterator<Item = Side> {
        Side::ALL.into_iter().filter(move |side| match side {
            Side::Obverse => self.obverse,
            Side::Reverse => self.reverse,
        })
    }

    /// One request per side, front first.
    #[must_use]
    pub fn split(self) -> Vec<Sides> {
        self.iter()
            .map(|side| match side {
                Side::Obverse => Sides::OBVERSE,
                Side::Reverse => Sides::REVERSE,
            })
            .collect()
    }
}

/// Where and how one card side was placed.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Rendering {
    pub side: Side,
    /// Upper left corner, before any transform.
    pub origin: Point,
    pub footprint: Footprint,
    pub transform: Option<Transform>,
}

impl Rendering {
    #[must_use]
    pub fn new(side: Side, origin: Point, footprint: Footprint) -> Self {
        Self {
            side,
            origin,
            footprint,
            transform: None,
        }
    }

    /// Apply a transform, replacing any other (builder pattern).
    #[must_use]
    pub fn with_transform(mut self, transform: Transform) -> Self {
        self.transform = Some(transform);
        self
    }
}

/// Visual representation of one side of a kind of card.
pub trait Presenter: Send + Sync + std::fmt::Debug {
    /// Room taken by this side of `card`.
    fn footprint(&self, card: &Card) -> Footprint;

    /// Produce a rendering at `origin`.
    fn present(&self, card: &Card, side: Side, origin: Point) -> Rendering {
        Rendering::new(side, origin, self.footprint(card))
    }
}

/// A presenter of uniform size.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FixedSize {
    pub footprint: Footprint,
}

impl FixedSize {
    #[must_use]
    pub const fn new(footprint: Footprint) -> Self {
        Self { footprint }
    }
}

impl Presenter for FixedSize {
    fn footprint(&self, _card: &Card) -> Footprint {
        self.footprint
    }
}
