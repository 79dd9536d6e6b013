//! Plane geometry for printable images.
//!
//! All measurements are in millimetres. The origin is the upper left
//! corner of an image, with y growing downwards, as in SVG.

use serde::{Deserialize, Serialize};

/// A position in an image.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    /// Create a new point.
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// The origin, (0, 0).
    pub const ORIGIN: Point = Point::new(0.0, 0.0);
}

impl std::fmt::Display for Point {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// The rectangular width × height that something occupies.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Footprint {
    pub width: f64,
    pub height: f64,
}

impl Footprint {
    /// Create a new footprint.
    #[must_use]
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// The same footprint turned 90°.
    ///
    /// Used to make landscape versions of portrait card sizes.
    #[must_use]
    pub const fn tilted(self) -> Self {
        Self::new(self.height, self.width)
    }

    /// What remains after removing margins on all four sides.
    #[must_use]
    pub fn shrunk_by(self, margins: Margins) -> Self {
        Self::new(
            self.width - 2.0 * margins.horizontal,
            self.height - 2.0 * margins.vertical,
        )
    }

    /// True if `other` is larger than `self` on either axis.
    #[must_use]
    pub fn exceeded_by(self, other: Footprint) -> bool {
        self.width < other.width || self.height < other.height
    }
}

impl std::fmt::Display for Footprint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}×{}", self.width, self.height)
    }
}

/// Blank space between the edge of an image and its contents.
///
/// `horizontal` applies to the left and right edges, `vertical` to the top
/// and bottom. For a page, this is what a desktop printer cannot print on.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Margins {
    pub horizontal: f64,
    pub vertical: f64,
}

impl Margins {
    /// Create new margins.
    #[must_use]
    pub const fn new(horizontal: f64, vertical: f64) -> Self {
        Self {
            horizontal,
            vertical,
        }
    }

    /// No margins at all.
    pub const ZERO: Margins = Margins::new(0.0, 0.0);
}

/// An SVG transformation applied to a rendering.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub enum Transform {
    /// Rotation by `degrees` about the point (`x`, `y`).
    Rotate { degrees: f64, x: f64, y: f64 },
    /// Displacement by (`x`, `y`).
    Translate { x: f64, y: f64 },
}

impl Transform {
    /// Rotation about a pivot point.
    #[must_use]
    pub fn rotate(degrees: f64, pivot: Point) -> Self {
        Transform::Rotate {
            degrees,
            x: pivot.x,
            y: pivot.y,
        }
    }

    /// The value of an SVG `transform` attribute.
    #[must_use]
    pub fn to_svg(&self) -> String {
        match self {
            Transform::Rotate { degrees, x, y } => format!("rotate({},{},{})", degrees, x, y),
            Transform::Translate { x, y } => format!("translate({},{})", x, y),
        }
    }
}
