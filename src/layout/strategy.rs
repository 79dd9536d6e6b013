//! Layout strategies.
//!
//! A strategy decides how card copies are distributed over images:
//! - `Sheets`: Each side in its own pass, filling images continuously
//! - `Neighbours`: Both sides of each card in one pass, side by side
//! - `Duplex`: Separate sheets per side, ordered for double-sided printing
//! - `Singles`: One image per card side, sized to the card
//! - `Fan`: One image with every card rotated about a common pivot

use std::sync::Arc;

use crate::content::Card;
use crate::core::{Footprint, LayoutConfig, Margins, Transform};
use crate::error::LayoutError;

use super::fan::FanGeometry;
use super::image::{Image, PackError, Placement, Sheet, Subject};
use super::presenter::{Presenter, Side, Sides};

/// One side of one copy of a card, ready to be placed.
#[derive(Clone, Copy, Debug)]
pub struct CardCopy<'a> {
    pub card: &'a Card,
    /// Position in the layouter's card list, from 1.
    pub number: usize,
    pub side: Side,
    pub presenter: &'a Arc<dyn Presenter>,
}

impl<'a> CardCopy<'a> {
    #[must_use]
    pub fn footprint(&self) -> Footprint {
        self.presenter.footprint(self.card)
    }
}

/// How a layouter places card copies on images.
pub trait Strategy {
    /// Short name, for logging.
    fn name(&self) -> &'static str;

    /// Inspect the card list and adjust the configuration before a run.
    fn prepare(&mut self, _cards: &[&Card], _config: &mut LayoutConfig) -> Result<(), LayoutError> {
        Ok(())
    }

    /// Split a request into passes over the card list.
    fn passes(&self, sides: Sides) -> Vec<Sides> {
        sides.split()
    }

    /// Called before each pass.
    fn on_pass_start(&mut self, _sides: Sides) {}

    /// Start a new image for the next copy even if the last one has room.
    fn wants_new_image(&mut self) -> bool {
        false
    }

    /// Create an image for `copy`, which will be its first content.
    fn new_image<'a>(
        &self,
        config: &LayoutConfig,
        copy: &CardCopy<'a>,
        _footprint: Footprint,
    ) -> Sheet<'a> {
        Image::new(config.image_size, config.margins)
            .with_direction(copy.side.left_to_right())
            .with_subject(Some(Subject::of(copy.card)))
    }

    /// Place one side of one card copy.
    fn consider<'a>(
        &mut self,
        images: &mut Vec<Sheet<'a>>,
        config: &LayoutConfig,
        copy: CardCopy<'a>,
    ) -> Result<(), LayoutError> {
        pack(self, images, config, copy)
    }

    /// Reorder images after all passes.
    fn finish(&mut self, _images: &mut Vec<Sheet<'_>>) {}
}

/// Place `copy` on the last image, starting a new one when it is full.
pub fn pack<'a, S>(
    strategy: &mut S,
    images: &mut Vec<Sheet<'a>>,
    config: &LayoutConfig,
    copy: CardCopy<'a>,
) -> Result<(), LayoutError>
where
    S: Strategy + ?Sized,
{
    let footprint = copy.footprint();

    let fresh = strategy.wants_new_image();
    let start_new = match images.last() {
        Some(image) if !fresh => !image.can_fit(footprint)?,
        _ => true,
    };
    if start_new {
        log::debug!(
            "{}: starting image {} for the {} of \"{}\"",
            strategy.name(),
            images.len() + 1,
            copy.side,
            copy.card
        );
        images.push(strategy.new_image(config, &copy, footprint));
    }

    let index = images.len() - 1;
    let image = &mut images[index];
    let result = image.add_with(footprint, |origin| Placement {
        card: copy.card,
        number: copy.number,
        rendering: copy.presenter.present(copy.card, copy.side, origin),
    });

    match result {
        Ok(_) => Ok(()),
        // A new image that cannot take its first item never will.
        Err(PackError::Full) => Err(LayoutError::TooSmall {
            footprint,
            printable: image.printable(),
        }),
        Err(PackError::Fatal(e)) => Err(e),
    }
}

// =============================================================================
// Sheets
// =============================================================================

/// Each requested side in its own pass, filling images continuously.
///
/// Fronts are packed left to right and backs right to left.
#[derive(Clone, Debug, Default)]
pub struct Sheets;

impl Strategy for Sheets {
    fn name(&self) -> &'static str {
        "sheets"
    }
}

// =============================================================================
// Neighbours
// =============================================================================

/// Both sides of each card in a single pass, so that front and back
/// appear next to each other.
#[derive(Clone, Debug, Default)]
pub struct Neighbours;

impl Strategy for Neighbours {
    fn name(&self) -> &'static str {
        "neighbours"
    }

    /// Always both sides, whatever was requested.
    fn passes(&self, _sides: Sides) -> Vec<Sides> {
        vec![Sides::BOTH]
    }
}

// =============================================================================
// Duplex
// =============================================================================

/// Fronts and backs on separate sheets, ordered for double-sided printing.
///
/// Each pass starts on a fresh image. When the passes are done, the first
/// half of the images (fronts) is interleaved with the second half (backs).
#[derive(Clone, Debug, Default)]
pub struct Duplex {
    fresh: bool,
}

impl Duplex {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl Strategy for Duplex {
    fn name(&self) -> &'static str {
        "duplex"
    }

    fn on_pass_start(&mut self, _sides: Sides) {
        self.fresh = true;
    }

    fn wants_new_image(&mut self) -> bool {
        std::mem::take(&mut self.fresh)
    }

    fn finish(&mut self, images: &mut Vec<Sheet<'_>>) {
        let midpoint = images.len() / 2;
        if images.len() % 2 == 1 {
            log::warn!(
                "duplex layout produced {} images; the last one has no counterpart",
                images.len()
            );
        }

        let mut backs = images.split_off(midpoint);
        let leftover = if backs.len() > midpoint { backs.pop() } else { None };
        let fronts = std::mem::take(images);

        for (front, back) in fronts.into_iter().zip(backs) {
            images.push(front);
            images.push(back);
        }
        images.extend(leftover);
    }
}

// =============================================================================
// Singles
// =============================================================================

/// One image per card side, exactly as large as the card, without margins.
#[derive(Clone, Debug, Default)]
pub struct Singles;

impl Strategy for Singles {
    fn name(&self) -> &'static str {
        "singles"
    }

    fn prepare(&mut self, _cards: &[&Card], config: &mut LayoutConfig) -> Result<(), LayoutError> {
        config.margins = Margins::ZERO;
        Ok(())
    }

    // Images differ in size, so the last one says nothing about the next.
    fn wants_new_image(&mut self) -> bool {
        true
    }

    fn new_image<'a>(
        &self,
        _config: &LayoutConfig,
        copy: &CardCopy<'a>,
        footprint: Footprint,
    ) -> Sheet<'a> {
        Image::new(footprint, Margins::ZERO)
            .with_direction(copy.side.left_to_right())
            .with_subject(Some(Subject::of(copy.card)))
    }
}

// =============================================================================
// Fan
// =============================================================================

/// All cards on one image, fanned out like a hand of cards.
///
/// Cards are assumed to be uniform in size; the front of the first card is
/// used for all trigonometry. Placement bypasses the packer.
#[derive(Clone, Debug, Default)]
pub struct Fan {
    geometry: Option<FanGeometry>,
}

impl Fan {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The computed layout, available once the layouter is built.
    #[must_use]
    pub fn geometry(&self) -> Option<&FanGeometry> {
        self.geometry.as_ref()
    }
}

impl Strategy for Fan {
    fn name(&self) -> &'static str {
        "fan"
    }

    fn prepare(&mut self, cards: &[&Card], config: &mut LayoutConfig) -> Result<(), LayoutError> {
        let first = cards.first().ok_or(LayoutError::NoCards)?;
        let presenter = first.presenter(Side::Obverse).ok_or_else(|| LayoutError::NoPresenter {
            card: first.title().to_string(),
            side: Side::Obverse,
        })?;

        let geometry = FanGeometry::new(cards.len(), presenter.footprint(first), config.arc);
        config.margins = Margins::ZERO;
        config.image_size = geometry.image_size;
        config.naming.suffix = "fan".to_string();
        self.geometry = Some(geometry);
        Ok(())
    }

    fn consider<'a>(
        &mut self,
        images: &mut Vec<Sheet<'a>>,
        config: &LayoutConfig,
        copy: CardCopy<'a>,
    ) -> Result<(), LayoutError> {
        let geometry = self.geometry.ok_or(LayoutError::NoCards)?;

        if images.is_empty() {
            images.push(self.new_image(config, &copy, geometry.card));
        }

        let rotation = Transform::rotate(geometry.degrees(copy.number), geometry.pivot);
        let rendering = copy
            .presenter
            .present(copy.card, copy.side, geometry.origin())
            .with_transform(rotation);

        let index = images.len() - 1;
        images[index].push_unchecked(Placement {
            card: copy.card,
            number: copy.number,
            rendering,
        });
        Ok(())
    }
}
