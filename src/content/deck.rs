//! Decks: the right number of copies of every card.
//!
//! A `Deck` is a multiset of cards. Cards are stored once each, in the
//! order they were specified, and identified by `CardId`. Copy counts are
//! kept beside them and only ever changed by selection.

use std::path::Path;
use std::sync::{Arc, LazyLock};

use regex::Regex;

use crate::core::{CardId, Keys, Selection};
use crate::error::{Error, SelectionError, SpecError};
use crate::spec::{self, Spec, SpecMap};

use super::card::{Card, CardClass};
use super::populate::BuildContext;

static COUNT_PREFIX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\d+):").expect("BUG: invalid COUNT_PREFIX regex literal")
});

const TAG_SELECTOR: &str = "tag=";

/// One unique card and its number of copies.
#[derive(Clone, Debug)]
pub struct DeckEntry {
    pub card: Card,
    pub copies: u32,
}

/// A multiset of cards with a title.
#[derive(Clone, Debug)]
pub struct Deck {
    title: Option<String>,
    metadata: SpecMap,
    entries: Vec<DeckEntry>,
}

impl Deck {
    /// Build a deck from a specification.
    ///
    /// The specification is either a mapping of card titles to card
    /// specifications, optionally wrapped in a metadata/data envelope, or
    /// a sequence of card specifications.
    pub fn build(
        class: &Arc<CardClass>,
        spec: Spec,
        title: Option<&str>,
        context: BuildContext<'_>,
    ) -> Result<Deck, SpecError> {
        let keys = class.keys();
        let (metadata, cards) = match spec {
            Spec::Map(mut map) => {
                let metadata = match map.shift_remove(&keys.metadata) {
                    None | Some(Spec::Null) => SpecMap::new(),
                    Some(Spec::Map(metadata)) => metadata,
                    Some(other) => {
                        return Err(SpecError::Shape {
                            owner: title.unwrap_or("deck").to_string(),
                            expected: "deck metadata",
                            found: other.kind(),
                        })
                    }
                };
                let cards = map.shift_remove(&keys.data).unwrap_or(Spec::Map(map));
                (metadata, cards)
            }
            seq @ Spec::Seq(_) => (SpecMap::new(), seq),
            other => {
                return Err(SpecError::Shape {
                    owner: title.unwrap_or("deck").to_string(),
                    expected: "a deck specification",
                    found: other.kind(),
                })
            }
        };

        let title = metadata
            .get(&keys.title)
            .and_then(Spec::to_text)
            .or_else(|| title.map(str::to_string));

        let mut deck = Deck {
            title,
            metadata,
            entries: Vec::new(),
        };
        deck.populate(class, cards, context)?;

        log::debug!("{} unique card(s) in {} deck", deck.len(), deck);
        Ok(deck)
    }

    /// Find `<base>.<extension>` in `directory` and build a deck from it.
    /// The base name is the fallback title.
    pub fn load(
        class: &Arc<CardClass>,
        directory: impl AsRef<Path>,
        base: &str,
        context: BuildContext<'_>,
    ) -> Result<Deck, Error> {
        let path = spec::locate(directory, base)?;
        let raw = spec::load_path(&path)?;
        Ok(Deck::build(class, raw, Some(base), context)?)
    }

    fn populate(
        &mut self,
        class: &Arc<CardClass>,
        cards: Spec,
        context: BuildContext<'_>,
    ) -> Result<(), SpecError> {
        match cards {
            Spec::Map(map) if !map.is_empty() => {
                for (key, value) in map {
                    self.add_card(class, value, Some(key), context)?;
                }
            }
            Spec::Seq(items) if !items.is_empty() => {
                for item in items {
                    self.add_card(class, item, None, context)?;
                }
            }
            Spec::Map(_) | Spec::Seq(_) | Spec::Null => return Err(SpecError::NoCards),
            other => {
                return Err(SpecError::Shape {
                    owner: self.to_string(),
                    expected: "a collection of cards",
                    found: other.kind(),
                })
            }
        }
        Ok(())
    }

    /// Digest card-level metadata and hand the rest to the card class.
    fn add_card(
        &mut self,
        class: &Arc<CardClass>,
        spec: Spec,
        backup_title: Option<String>,
        context: BuildContext<'_>,
    ) -> Result<(), SpecError> {
        let keys = class.keys();
        let mut spec = match spec {
            Spec::Null => Spec::Map(SpecMap::new()),
            other => other,
        };

        let card_metadata = match spec.as_map_mut().and_then(|m| m.shift_remove(&keys.metadata)) {
            Some(Spec::Map(metadata)) => metadata,
            _ => SpecMap::new(),
        };
        if let Some(data) = spec.as_map_mut().and_then(|m| m.shift_remove(&keys.data)) {
            spec = data;
        }

        if let (Some(title), Some(map)) = (&backup_title, spec.as_map_mut()) {
            if !map.contains_key(&keys.title) && class.has_title_field() {
                map.insert(keys.title.clone(), Spec::from(title.as_str()));
            }
        }

        let label = backup_title.unwrap_or_else(|| class.name().to_string());
        let copies = self.resolve_copies(keys, &card_metadata, &mut spec, &label)?;

        if CardId::from_index(self.entries.len()).is_none() {
            return Err(SpecError::TooMany("cards"));
        }
        let card = Card::new(class, Some(spec), self.title.as_deref(), context)?;
        self.entries.push(DeckEntry { card, copies });
        Ok(())
    }

    /// Copy count precedence: card metadata, deck defaults, the card's own
    /// data (deprecated), then 1.
    fn resolve_copies(
        &self,
        keys: &Keys,
        card_metadata: &SpecMap,
        spec: &mut Spec,
        label: &str,
    ) -> Result<u32, SpecError> {
        let defaults = self.metadata.get(&keys.defaults).and_then(Spec::as_map);

        let mut copies = card_metadata.get(&keys.copies).cloned();
        if copies.is_none() {
            copies = defaults.and_then(|d| d.get(&keys.copies)).cloned();
        }
        if copies.is_none() {
            copies = spec.as_map_mut().and_then(|m| m.shift_remove(&keys.copies));
            if copies.is_some() {
                log::debug!("pulled number of copies of \"{}\" from data section of specs", label);
            }
        }

        match copies {
            None | Some(Spec::Null) => Ok(1),
            Some(Spec::Int(n)) => u32::try_from(n).map_err(|_| SpecError::InvalidCopies {
                card: label.to_string(),
                value: n.to_string(),
            }),
            Some(other) => Err(SpecError::InvalidCopies {
                card: label.to_string(),
                value: other.to_string(),
            }),
        }
    }

    #[must_use]
    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    /// Deck-level metadata.
    #[must_use]
    pub fn metadata(&self) -> &SpecMap {
        &self.metadata
    }

    /// Number of unique cards, including those at zero copies.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[must_use]
    pub fn get(&self, id: CardId) -> Option<&Card> {
        self.entries.get(id.index()).map(|e| &e.card)
    }

    #[must_use]
    pub fn copies(&self, id: CardId) -> u32 {
        self.entries.get(id.index()).map_or(0, |e| e.copies)
    }

    pub fn set_copies(&mut self, id: CardId, copies: u32) {
        if let Some(entry) = self.entries.get_mut(id.index()) {
            entry.copies = copies;
        }
    }

    /// Total number of copies of all cards.
    #[must_use]
    pub fn total(&self) -> u32 {
        self.entries.iter().map(|e| e.copies).sum()
    }

    /// Iterate over unique cards in specification order.
    pub fn iter(&self) -> impl Iterator<Item = (CardId, &DeckEntry)> {
        (0..).map(CardId::new).zip(&self.entries)
    }

    /// Find a card by title.
    #[must_use]
    pub fn find(&self, title: &str) -> Option<CardId> {
        self.iter().find(|(_, e)| e.card.title() == title).map(|(id, _)| id)
    }

    /// Apply whitelist, blacklist and copy caps.
    ///
    /// For each card in order: the first matching whitelist entry applies
    /// its count, and a card matching none is zeroed if a whitelist exists.
    /// Then the first matching blacklist entry applies its count, or zeroes
    /// the card if it has none. A surviving card is capped at one copy with
    /// `card_max1`. With `deck_max1`, the first surviving card is kept at
    /// one copy and every later card is zeroed.
    ///
    /// On error the deck is left unchanged.
    pub fn control_selection(&mut self, selection: &Selection) -> Result<(), Error> {
        let whitelist = parse_all(&selection.whitelist)?;
        let blacklist = parse_all(&selection.blacklist)?;
        let mut sample = if selection.deck_max1 {
            DeckSample::Pending
        } else {
            DeckSample::Off
        };

        let mut counts = Vec::with_capacity(self.entries.len());
        for entry in &self.entries {
            let card = &entry.card;
            let mut copies = entry.copies;

            let mut whitelisted = false;
            for restriction in &whitelist {
                if restriction.matches(card)? {
                    whitelisted = true;
                    if let Some(n) = restriction.copies {
                        copies = n;
                    }
                    break;
                }
            }
            if !whitelist.is_empty() && !whitelisted {
                copies = 0;
            }

            for restriction in &blacklist {
                if restriction.matches(card)? {
                    copies = restriction.copies.unwrap_or(0);
                    break;
                }
            }

            if copies > 0 {
                if selection.card_max1 {
                    copies = 1;
                }
                match sample {
                    DeckSample::Off => {}
                    DeckSample::Pending => {
                        copies = 1;
                        sample = DeckSample::Taken;
                    }
                    DeckSample::Taken => copies = 0,
                }
            }
            counts.push(copies);
        }

        // Nothing changes unless every card could be matched.
        for (entry, copies) in self.entries.iter_mut().zip(counts) {
            entry.copies = copies;
        }
        Ok(())
    }

    /// Unique cards ordered by sorting signature. Ties keep specification
    /// order.
    #[must_use]
    pub fn singles_sorted(&self) -> Vec<CardId> {
        let mut ids: Vec<CardId> = self.iter().map(|(id, _)| id).collect();
        ids.sort_by_cached_key(|&id| self.entries[id.index()].card.sorting_key());
        ids
    }

    /// One entry per copy, in sorted order with copies adjacent.
    #[must_use]
    pub fn all_sorted(&self) -> Vec<&Card> {
        self.singles_sorted()
            .into_iter()
            .flat_map(|id| {
                let entry = &self.entries[id.index()];
                std::iter::repeat(&entry.card).take(entry.copies as usize)
            })
            .collect()
    }
}

impl std::fmt::Display for Deck {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.title.as_deref().unwrap_or("untitled"))
    }
}

/// All copies of all cards in several decks, decks ordered by title.
#[must_use]
pub fn flatten(decks: &[Deck]) -> Vec<&Card> {
    let mut sorted: Vec<&Deck> = decks.iter().collect();
    sorted.sort_by(|a, b| a.title.cmp(&b.title));
    sorted.into_iter().flat_map(Deck::all_sorted).collect()
}

/// Progress of a deck-wide "pick one card" sample.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum DeckSample {
    Off,
    Pending,
    Taken,
}

/// What a restriction is matched against.
#[derive(Clone, Debug)]
pub enum Selector {
    /// Searched for anywhere in the card's title.
    Title(Regex),
    /// Matched against the whole string of each of the card's tags.
    Tag(Regex),
}

/// One whitelist or blacklist entry, `[N:][tag=]REGEX`.
#[derive(Clone, Debug)]
pub struct Restriction {
    /// Explicit number of copies, if given.
    pub copies: Option<u32>,
    pub selector: Selector,
}

impl Restriction {
    pub fn parse(text: &str) -> Result<Self, SelectionError> {
        let (copies, rest) = match COUNT_PREFIX.captures(text) {
            Some(captures) => {
                let digits = &captures[1];
                let count = digits
                    .parse::<u32>()
                    .map_err(|_| SelectionError::Count(text.to_string()))?;
                (Some(count), &text[captures[0].len()..])
            }
            None => (None, text),
        };

        let compile = |pattern: &str| {
            Regex::new(pattern).map_err(|source| SelectionError::Regex {
                restriction: text.to_string(),
                source,
            })
        };
        let selector = match rest.strip_prefix(TAG_SELECTOR) {
            Some(pattern) => Selector::Tag(compile(format!("^(?:{})$", pattern).as_str())?),
            None => Selector::Title(compile(rest)?),
        };

        Ok(Self { copies, selector })
    }

    /// True if the restriction applies to `card`. Tag selectors fail on
    /// cards without a tag field.
    pub fn matches(&self, card: &Card) -> Result<bool, SpecError> {
        match &self.selector {
            Selector::Title(regex) => Ok(regex.is_match(card.title())),
            Selector::Tag(regex) => {
                let tags = card.tags().ok_or_else(|| {
                    log::error!("tag-based filtering requires a tag field");
                    SpecError::NoTagField(card.title().to_string())
                })?;
                Ok(tags.strings().any(|t| regex.is_match(t)))
            }
        }
    }
}

fn parse_all(restrictions: &[String]) -> Result<Vec<Restriction>, SelectionError> {
    restrictions.iter().map(|r| Restriction::parse(r)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::FieldClass;
    use crate::tags::{TagPolicy, TagRegistry};
    use serde_json::json;

    fn class() -> Arc<CardClass> {
        CardClass::new(
            "card",
            vec![
                FieldClass::paragraph("title").with_key("title").shared(),
                FieldClass::tags(TagPolicy::Unchecked).shared(),
            ],
        )
        .shared()
    }

    fn deck(spec: serde_json::Value) -> Result<Deck, SpecError> {
        let registry = TagRegistry::new();
        Deck::build(&class(), Spec::from(spec), Some("test"), BuildContext::new(&registry))
    }

    #[test]
    fn test_restriction_parse() {
        let r = Restriction::parse("2:Foo").unwrap();
        assert_eq!(r.copies, Some(2));
        assert!(matches!(r.selector, Selector::Title(_)));

        let r = Restriction::parse("tag=a.*").unwrap();
        assert_eq!(r.copies, None);
        assert!(matches!(r.selector, Selector::Tag(_)));

        assert!(matches!(
            Restriction::parse("(unclosed"),
            Err(SelectionError::Regex { .. })
        ));
        assert!(matches!(
            Restriction::parse("99999999999:x"),
            Err(SelectionError::Count(_))
        ));
    }

    #[test]
    fn test_titles_from_mapping_keys() {
        let deck = deck(json!({"Goblin": {}, "Orc": {"title": "Big Orc"}})).unwrap();
        let titles: Vec<_> = deck.iter().map(|(_, e)| e.card.title().to_string()).collect();
        assert_eq!(titles, vec!["Goblin", "Big Orc"]);
    }

    #[test]
    fn test_deck_title_from_metadata() {
        let deck = deck(json!({"metadata": {"title": "Monsters"}, "data": {"a": {}}})).unwrap();
        assert_eq!(deck.title(), Some("Monsters"));
        assert_eq!(deck.get(CardId::new(0)).and_then(Card::deck), Some("Monsters"));
    }

    #[test]
    fn test_no_cards() {
        assert!(matches!(deck(json!({})), Err(SpecError::NoCards)));
        assert!(matches!(deck(json!([])), Err(SpecError::NoCards)));
        assert!(matches!(deck(json!("x")), Err(SpecError::Shape { .. })));
    }

    #[test]
    fn test_invalid_copies() {
        let err = deck(json!({"a": {"metadata": {"copies": -1}}})).unwrap_err();
        assert!(matches!(err, SpecError::InvalidCopies { .. }));
    }

    #[test]
    fn test_deprecated_copies_in_data() {
        let deck = deck(json!({"a": {"copies": 4}})).unwrap();
        assert_eq!(deck.copies(CardId::new(0)), 4);
    }

    #[test]
    fn test_deck_max1_keeps_first_survivor() {
        let mut deck = deck(json!({"a": {}, "b": {}, "c": {}})).unwrap();
        deck.control_selection(&Selection::new().deny("^a$").deck_max1()).unwrap();
        assert_eq!(deck.copies(CardId::new(0)), 0);
        assert_eq!(deck.copies(CardId::new(1)), 1);
        assert_eq!(deck.copies(CardId::new(2)), 0);
    }

    #[test]
    fn test_tag_selector_needs_tag_field() {
        let registry = TagRegistry::new();
        let title = FieldClass::paragraph("title").with_key("title").shared();
        let plain = CardClass::new("plain", vec![title]).shared();
        let mut deck = Deck::build(
            &plain,
            Spec::from(json!([{"title": "x"}])),
            None,
            BuildContext::new(&registry),
        )
        .unwrap();
        let result = deck.control_selection(&Selection::new().allow("tag=x"));
        assert!(matches!(result, Err(Error::Spec(SpecError::NoTagField(_)))));
    }

    #[test]
    fn test_failed_selection_leaves_counts() {
        let registry = TagRegistry::new();
        let title = FieldClass::paragraph("title").with_key("title").shared();
        let plain = CardClass::new("plain", vec![title]).shared();
        let mut deck = Deck::build(
            &plain,
            Spec::from(json!([{"title": "a"}, {"title": "b", "copies": 2}])),
            None,
            BuildContext::new(&registry),
        )
        .unwrap();

        // "a" matches by title before "b" reaches the tag selector.
        let selection = Selection::new().allow("5:^a$").allow("tag=x");
        let result = deck.control_selection(&selection);
        assert!(matches!(result, Err(Error::Spec(SpecError::NoTagField(_)))));
        assert_eq!(deck.copies(CardId::new(0)), 1);
        assert_eq!(deck.copies(CardId::new(1)), 2);
    }

    #[test]
    fn test_flatten_orders_decks_by_title() {
        let registry = TagRegistry::new();
        let context = BuildContext::new(&registry);
        let b = Deck::build(&class(), Spec::from(json!({"x": {}})), Some("b"), context).unwrap();
        let a = Deck::build(
            &class(),
            Spec::from(json!({"y": {"metadata": {"copies": 2}}})),
            Some("a"),
            context,
        )
        .unwrap();

        let decks = [b, a];
        let titles: Vec<_> = flatten(&decks).into_iter().map(Card::title).collect();
        assert_eq!(titles, vec!["y", "y", "x"]);
    }
}
