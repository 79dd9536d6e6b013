//! Filenames for images.

use std::sync::LazyLock;

use regex::Regex;

use crate::core::NamingConfig;

use super::image::Image;
use super::presenter::Side;

/// Everything but letters and digits.
static HARD_CLEANER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[\W_]+").expect("BUG: invalid hard cleaner regex literal"));

/// Everything but letters, digits and underscores.
static SOFT_CLEANER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\W+").expect("BUG: invalid soft cleaner regex literal"));

/// Names a sequence of images, e.g. `mygame_01_obverse.svg`.
///
/// Each call to [`ImageNamer::name`] advances an ordinal, zero-padded to
/// the width of the total number of images.
#[derive(Clone, Debug)]
pub struct ImageNamer<'c> {
    game_title: String,
    config: &'c NamingConfig,
    width: usize,
    count: usize,
}

impl<'c> ImageNamer<'c> {
    #[must_use]
    pub fn new(game_title: impl Into<String>, config: &'c NamingConfig, total: usize) -> Self {
        Self {
            game_title: game_title.into(),
            config,
            width: total.to_string().len(),
            count: 0,
        }
    }

    fn clean(item: &str) -> String {
        HARD_CLEANER.replace_all(item, "").into_owned()
    }

    /// Name the next image.
    pub fn name<T>(&mut self, image: &Image<T>) -> String {
        self.count += 1;
        let mut parts = Vec::with_capacity(6);

        if self.config.game_in_filename {
            parts.push(Self::clean(&self.game_title));
        }
        parts.push(format!("{:0width$}", self.count, width = self.width));

        if let Some(subject) = image.subject() {
            if self.config.deck_in_filename {
                if let Some(deck) = &subject.deck {
                    parts.push(Self::clean(deck));
                }
            }
            if self.config.card_in_filename {
                parts.push(Self::clean(&subject.title));
            }
        }

        if self.config.side_in_filename {
            parts.push(Side::from_direction(image.left_to_right()).to_string());
        }
        if !self.config.suffix.is_empty() {
            parts.push(Self::clean(&self.config.suffix));
        }

        let filename = parts.join("_").to_lowercase();
        format!("{}.svg", SOFT_CLEANER.replace_all(&filename, ""))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Footprint, Margins};
    use crate::layout::image::Subject;

    fn image() -> Image<()> {
        Image::new(Footprint::new(10.0, 10.0), Margins::ZERO)
    }

    #[test]
    fn test_default_names() {
        let config = NamingConfig::default();
        let mut namer = ImageNamer::new("My Game!", &config, 12);
        assert_eq!(namer.name(&image()), "mygame_01.svg");
        assert_eq!(namer.name(&image()), "mygame_02.svg");
    }

    #[test]
    fn test_all_parts() {
        let config = NamingConfig::default().per_card().with_side().with_suffix("Print-Me");
        let mut namer = ImageNamer::new("Game", &config, 3);
        let image = image().with_direction(false).with_subject(Some(Subject {
            title: "Fire Ball".to_string(),
            deck: Some("Spells & Co".to_string()),
        }));
        assert_eq!(namer.name(&image), "game_1_spellsco_fireball_reverse_printme.svg");
    }

    #[test]
    fn test_without_game_or_subject() {
        let config = NamingConfig::default().without_game().per_card();
        let mut namer = ImageNamer::new("Game", &config, 100);
        assert_eq!(namer.name(&image()), "001.svg");
    }
}
