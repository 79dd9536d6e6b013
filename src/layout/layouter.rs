//! The layouter: drives a strategy over a list of card copies.
//!
//! A layouter is built once per run. It walks the card list once per pass,
//! handing each requested side of each copy to its strategy, then lets the
//! strategy reorder the images.

use crate::content::Card;
use crate::core::LayoutConfig;
use crate::error::LayoutError;

use super::image::Sheet;
use super::naming::ImageNamer;
use super::presenter::{Side, Sides};
use super::strategy::{CardCopy, Sheets, Strategy};

/// Progress of a layouter.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum RunState {
    /// Built, not yet run.
    #[default]
    Idle,
    /// Laying out fronts.
    Obverse,
    /// Laying out backs.
    Reverse,
    /// Laying out both sides in one pass.
    Both,
    /// All passes done and images in final order.
    Finalized,
}

impl RunState {
    fn of_pass(sides: Sides) -> Self {
        match (sides.obverse, sides.reverse) {
            (true, true) => RunState::Both,
            (false, true) => RunState::Reverse,
            _ => RunState::Obverse,
        }
    }
}

/// Lays out card copies on images using a strategy.
#[derive(Debug)]
pub struct Layouter<'a, S: Strategy = Sheets> {
    game_title: String,
    /// One entry per copy, in layout order.
    cards: Vec<&'a Card>,
    config: LayoutConfig,
    strategy: S,
    images: Vec<Sheet<'a>>,
    state: RunState,
}

impl<'a, S: Strategy> Layouter<'a, S> {
    /// Prepare a run over `cards`, one entry per copy.
    pub fn new(
        game_title: impl Into<String>,
        cards: Vec<&'a Card>,
        mut config: LayoutConfig,
        mut strategy: S,
    ) -> Result<Self, LayoutError> {
        if cards.is_empty() {
            return Err(LayoutError::NoCards);
        }
        strategy.prepare(&cards, &mut config)?;

        Ok(Self {
            game_title: game_title.into(),
            cards,
            config,
            strategy,
            images: Vec::new(),
            state: RunState::Idle,
        })
    }

    #[must_use]
    pub fn game_title(&self) -> &str {
        &self.game_title
    }

    #[must_use]
    pub fn cards(&self) -> &[&'a Card] {
        &self.cards
    }

    /// The configuration, as adjusted by the strategy.
    #[must_use]
    pub fn config(&self) -> &LayoutConfig {
        &self.config
    }

    #[must_use]
    pub fn strategy(&self) -> &S {
        &self.strategy
    }

    #[must_use]
    pub fn state(&self) -> RunState {
        self.state
    }

    #[must_use]
    pub fn images(&self) -> &[Sheet<'a>] {
        &self.images
    }

    #[must_use]
    pub fn into_images(self) -> Vec<Sheet<'a>> {
        self.images
    }

    /// Lay out the requested sides of every card, then finalize.
    ///
    /// A layouter runs once. Errors leave it in the state of the failed
    /// pass.
    pub fn run(&mut self, sides: Sides) -> Result<(), LayoutError> {
        if self.state != RunState::Idle {
            return Err(LayoutError::AlreadyRun);
        }

        for pass in self.strategy.passes(sides) {
            self.state = RunState::of_pass(pass);
            log::debug!(
                "{} layout of {} card(s): {:?} pass",
                self.strategy.name(),
                self.cards.len(),
                self.state
            );
            self.strategy.on_pass_start(pass);
            self.layout(pass)?;
        }

        self.strategy.finish(&mut self.images);
        self.state = RunState::Finalized;
        Ok(())
    }

    fn layout(&mut self, pass: Sides) -> Result<(), LayoutError> {
        let cards: &[&'a Card] = &self.cards;
        for (index, &card) in cards.iter().enumerate() {
            for side in pass.iter() {
                let Some(presenter) = card.presenter(side) else {
                    log::debug!("\"{}\" has no presenter for the {} side", card, side);
                    continue;
                };
                let copy = CardCopy {
                    card,
                    number: index + 1,
                    side,
                    presenter,
                };
                self.strategy.consider(&mut self.images, &self.config, copy)?;
            }
        }
        Ok(())
    }

    /// Filenames for the images, in their final order.
    #[must_use]
    pub fn filenames(&self) -> Vec<String> {
        let mut namer = ImageNamer::new(&*self.game_title, &self.config.naming, self.images.len());
        self.images.iter().map(|image| namer.name(image)).collect()
    }

    /// Images holding the given side of the given card.
    pub fn images_of<'s>(&'s self, card: &'s Card, side: Side) -> impl Iterator<Item = usize> + 's {
        self.images.iter().enumerate().filter_map(move |(i, image)| {
            image
                .contents()
                .iter()
                .any(|p| std::ptr::eq(p.card, card) && p.rendering.side == side)
                .then_some(i)
        })
    }
}
