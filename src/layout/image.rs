//! Images and the shelf packer.
//!
//! An image is a rectangular canvas with margins. Footprints are placed in
//! rows, left to right (or mirrored, right to left). A row is as tall as
//! its tallest item. When an item does not fit the rest of the current row,
//! the row is closed and a new one starts below it. Closed rows are never
//! revisited.

use smallvec::SmallVec;
use thiserror::Error;

use crate::content::Card;
use crate::core::{Footprint, Margins, Point};
use crate::error::LayoutError;

use super::presenter::Rendering;

/// Why a footprint was not added.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PackError {
    /// Not an error: the image cannot take this footprint, but a new one
    /// can.
    #[error("image full")]
    Full,

    #[error(transparent)]
    Fatal(#[from] LayoutError),
}

/// The card that prompted the creation of an image.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Subject {
    pub title: String,
    pub deck: Option<String>,
}

impl Subject {
    #[must_use]
    pub fn of(card: &Card) -> Self {
        Self {
            title: card.title().to_string(),
            deck: card.deck().map(str::to_string),
        }
    }
}

/// One card side placed on an image.
#[derive(Clone, Debug)]
pub struct Placement<'a> {
    pub card: &'a Card,
    /// Position of the card copy in the layouter's card list, from 1.
    pub number: usize,
    pub rendering: Rendering,
}

/// An image of placed card sides.
pub type Sheet<'a> = Image<Placement<'a>>;

/// A canvas holding placed contents in insertion order.
#[derive(Clone, Debug)]
pub struct Image<T> {
    dimensions: Footprint,
    margins: Margins,
    printable: Footprint,
    left_to_right: bool,

    /// Heights of closed rows.
    row_heights: SmallVec<[f64; 8]>,

    /// Accumulated width and tallest height of the open row.
    row: Footprint,

    contents: Vec<T>,
    subject: Option<Subject>,
}

impl<T> Image<T> {
    /// Create an empty image, filled left to right.
    #[must_use]
    pub fn new(dimensions: Footprint, margins: Margins) -> Self {
        Self {
            dimensions,
            margins,
            printable: dimensions.shrunk_by(margins),
            left_to_right: true,
            row_heights: SmallVec::new(),
            row: Footprint::default(),
            contents: Vec::new(),
            subject: None,
        }
    }

    /// Set the fill direction (builder pattern).
    #[must_use]
    pub fn with_direction(mut self, left_to_right: bool) -> Self {
        self.left_to_right = left_to_right;
        self
    }

    /// Set the subject (builder pattern).
    #[must_use]
    pub fn with_subject(mut self, subject: Option<Subject>) -> Self {
        self.subject = subject;
        self
    }

    #[must_use]
    pub fn dimensions(&self) -> Footprint {
        self.dimensions
    }

    #[must_use]
    pub fn margins(&self) -> Margins {
        self.margins
    }

    /// The area inside the margins.
    #[must_use]
    pub fn printable(&self) -> Footprint {
        self.printable
    }

    #[must_use]
    pub fn left_to_right(&self) -> bool {
        self.left_to_right
    }

    #[must_use]
    pub fn subject(&self) -> Option<&Subject> {
        self.subject.as_ref()
    }

    #[must_use]
    pub fn contents(&self) -> &[T] {
        &self.contents
    }

    #[must_use]
    pub fn into_contents(self) -> Vec<T> {
        self.contents
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.contents.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.contents.is_empty()
    }

    /// Heights of the closed rows, then the open row if it holds anything.
    #[must_use]
    pub fn row_heights(&self) -> Vec<f64> {
        let mut heights = self.row_heights.to_vec();
        if self.row.width > 0.0 {
            heights.push(self.row.height);
        }
        heights
    }

    fn too_small(&self, footprint: Footprint) -> LayoutError {
        LayoutError::TooSmall {
            footprint,
            printable: self.printable,
        }
    }

    /// Where `footprint` would be placed, or `None` if the image is full.
    ///
    /// A footprint larger than the printable area is an error, since no
    /// image of this size can ever take it.
    pub fn free_spot(&self, footprint: Footprint) -> Result<Option<Point>, LayoutError> {
        let space = self.printable;
        if space.exceeded_by(footprint) {
            return Err(self.too_small(footprint));
        }

        let mut row_x = self.row.width;
        let mut occupied_y: f64 = self.row_heights.iter().sum();
        if space.width < row_x + footprint.width {
            occupied_y += self.row.height;
            row_x = 0.0;
        }
        if space.height < occupied_y + footprint.height {
            return Ok(None);
        }

        let x = if self.left_to_right {
            row_x
        } else {
            space.width - row_x - footprint.width
        };
        Ok(Some(Point::new(
            self.margins.horizontal + x,
            self.margins.vertical + occupied_y,
        )))
    }

    pub fn can_fit(&self, footprint: Footprint) -> Result<bool, LayoutError> {
        Ok(self.free_spot(footprint)?.is_some())
    }

    /// Place `footprint`, building the content for the chosen spot.
    pub fn add_with<F>(&mut self, footprint: Footprint, content: F) -> Result<Point, PackError>
    where
        F: FnOnce(Point) -> T,
    {
        let spot = self.free_spot(footprint)?.ok_or(PackError::Full)?;

        if self.printable.width < self.row.width + footprint.width {
            self.row_heights.push(self.row.height);
            self.row = Footprint::default();
        }
        self.row.width += footprint.width;
        self.row.height = self.row.height.max(footprint.height);

        self.contents.push(content(spot));
        Ok(spot)
    }

    /// Place `footprint` with ready-made content.
    pub fn add(&mut self, footprint: Footprint, content: T) -> Result<Point, PackError> {
        self.add_with(footprint, |_| content)
    }

    /// Append content without packing it.
    pub fn push_unchecked(&mut self, content: T) {
        self.contents.push(content);
    }
}
