//! Configuration types.
//!
//! Applications configure a run by providing:
//! - `LayoutConfig`: Image size, margins and fan arc
//! - `NamingConfig`: What goes into image filenames
//! - `Selection`: Which cards, and how many copies, to lay out
//!
//! Common paper and card sizes are provided as constants.

use serde::{Deserialize, Serialize};

use super::geometry::{Footprint, Margins};

/// An A4 page, portrait.
pub const A4: Footprint = Footprint::new(210.0, 297.0);

/// Margins suitable for an A4 page on a regular desktop printer.
pub const A4_MARGINS: Margins = Margins::new(16.0, 9.0);

/// "Mini Euro" card size.
pub const MINI_EURO: Footprint = Footprint::new(44.0, 68.0);

/// "Standard Euro" card size.
pub const STANDARD_EURO: Footprint = Footprint::new(59.0, 92.0);

/// A truncated Euro size, more likely to fit 3×3 on a desktop A4 printer.
pub const SHORT_EURO: Footprint = Footprint::new(59.0, 90.0);

/// What to include in the filenames of images.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NamingConfig {
    /// Prefix filenames with the game title.
    pub game_in_filename: bool,
    /// Append the title of the deck of the image's subject card.
    pub deck_in_filename: bool,
    /// Append the title of the image's subject card.
    pub card_in_filename: bool,
    /// Append "obverse" or "reverse", based on layout direction.
    pub side_in_filename: bool,
    /// Appended last, if not empty.
    pub suffix: String,
}

impl Default for NamingConfig {
    fn default() -> Self {
        Self {
            game_in_filename: true,
            deck_in_filename: false,
            card_in_filename: false,
            side_in_filename: false,
            suffix: String::new(),
        }
    }
}

impl NamingConfig {
    /// Name images after the cards they depict.
    #[must_use]
    pub fn per_card(mut self) -> Self {
        self.deck_in_filename = true;
        self.card_in_filename = true;
        self
    }

    /// Name the side of the card in the filename.
    #[must_use]
    pub fn with_side(mut self) -> Self {
        self.side_in_filename = true;
        self
    }

    /// Leave the game title out.
    #[must_use]
    pub fn without_game(mut self) -> Self {
        self.game_in_filename = false;
        self
    }

    /// Set the suffix.
    #[must_use]
    pub fn with_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.suffix = suffix.into();
        self
    }
}

/// Layout parameters. Not every strategy uses every parameter.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LayoutConfig {
    /// Size of each image (default: A4).
    pub image_size: Footprint,

    /// Margins inside each image (default: A4 desktop printer margins).
    pub margins: Margins,

    /// Total angle of a fan, in radians.
    /// `None` lets the fan pick an angle from the number of cards.
    pub arc: Option<f64>,

    /// Filename composition.
    pub naming: NamingConfig,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            image_size: A4,
            margins: A4_MARGINS,
            arc: None,
            naming: NamingConfig::default(),
        }
    }
}

impl LayoutConfig {
    /// Use a custom image size.
    #[must_use]
    pub fn with_image_size(mut self, size: Footprint) -> Self {
        self.image_size = size;
        self
    }

    /// Use custom margins.
    #[must_use]
    pub fn with_margins(mut self, margins: Margins) -> Self {
        self.margins = margins;
        self
    }

    /// Use a fixed fan arc, in radians.
    #[must_use]
    pub fn with_arc(mut self, arc: f64) -> Self {
        self.arc = Some(arc);
        self
    }

    /// Use custom filename composition.
    #[must_use]
    pub fn with_naming(mut self, naming: NamingConfig) -> Self {
        self.naming = naming;
        self
    }

    /// The area of each image available for content.
    #[must_use]
    pub fn printable(&self) -> Footprint {
        self.image_size.shrunk_by(self.margins)
    }
}

/// Restrictions on which cards to process.
///
/// Each whitelist and blacklist entry has the form `[N:]SELECTOR`, where
/// `SELECTOR` is `tag=REGEX` or a bare `REGEX` matched against titles.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Selection {
    /// If not empty, cards matching no entry are excluded.
    pub whitelist: Vec<String>,
    /// Cards matching an entry are excluded, or recounted.
    pub blacklist: Vec<String>,
    /// At most one copy of each card.
    pub card_max1: bool,
    /// One copy of one card from the whole deck.
    pub deck_max1: bool,
}

impl Selection {
    /// Create an unrestricted selection.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a whitelist entry.
    #[must_use]
    pub fn allow(mut self, restriction: impl Into<String>) -> Self {
        self.whitelist.push(restriction.into());
        self
    }

    /// Add a blacklist entry.
    #[must_use]
    pub fn deny(mut self, restriction: impl Into<String>) -> Self {
        self.blacklist.push(restriction.into());
        self
    }

    /// Cap every card at one copy.
    #[must_use]
    pub fn card_max1(mut self) -> Self {
        self.card_max1 = true;
        self
    }

    /// Keep only one copy of the first surviving card.
    #[must_use]
    pub fn deck_max1(mut self) -> Self {
        self.deck_max1 = true;
        self
    }

    /// True if this selection changes nothing.
    #[must_use]
    pub fn is_unrestricted(&self) -> bool {
        self.whitelist.is_empty() && self.blacklist.is_empty() && !self.card_max1 && !self.deck_max1
    }
}
