//! Layout tests.
//!
//! These tests verify how card copies end up on images:
//! - Continuous sheets, neighbours, duplex, singles and fans
//! - Fatal misconfiguration and run state
//! - Image filenames

use std::sync::Arc;

use serde_json::json;

use deckprint::content::{BuildContext, CardClass, Deck, FieldClass};
use deckprint::core::{Footprint, LayoutConfig, Margins, NamingConfig, Point, Transform};
use deckprint::error::LayoutError;
use deckprint::layout::{
    Duplex, Fan, FanGeometry, FixedSize, Layouter, Neighbours, RunState, Sheet, Sheets, Side, Sides,
    Singles,
};
use deckprint::spec::Spec;
use deckprint::tags::TagRegistry;

const CARD: Footprint = Footprint::new(60.0, 40.0);

fn class(obverse: Option<Footprint>, reverse: Option<Footprint>) -> Arc<CardClass> {
    let mut class = CardClass::new(
        "card",
        vec![FieldClass::paragraph("title").with_key("title").shared()],
    );
    if let Some(footprint) = obverse {
        class = class.with_obverse(Arc::new(FixedSize::new(footprint)));
    }
    if let Some(footprint) = reverse {
        class = class.with_reverse(Arc::new(FixedSize::new(footprint)));
    }
    class.shared()
}

/// A deck of `n` cards titled `c1`, `c2`, and so on.
fn deck(class: &Arc<CardClass>, n: usize) -> Deck {
    let cards: Vec<_> = (1..=n).map(|i| json!({"title": format!("c{}", i)})).collect();
    let registry = TagRegistry::new();
    let spec = Spec::from(json!(cards));
    Deck::build(class, spec, Some("deck"), BuildContext::new(&registry)).unwrap()
}

fn small_page() -> LayoutConfig {
    LayoutConfig::default()
        .with_image_size(Footprint::new(100.0, 100.0))
        .with_margins(Margins::ZERO)
}

fn numbers(image: &Sheet<'_>) -> Vec<usize> {
    image.contents().iter().map(|p| p.number).collect()
}

// =============================================================================
// Sheets
// =============================================================================

/// Test that full images are followed by new ones.
#[test]
fn test_sheets_fill_continuously() {
    let class = class(Some(CARD), None);
    let deck = deck(&class, 3);
    let mut layouter = Layouter::new("Game", deck.all_sorted(), small_page(), Sheets).unwrap();

    layouter.run(Sides::OBVERSE).unwrap();
    assert_eq!(layouter.state(), RunState::Finalized);

    let images = layouter.images();
    assert_eq!(images.len(), 2);
    assert_eq!(numbers(&images[0]), vec![1, 2]);
    assert_eq!(numbers(&images[1]), vec![3]);

    let origins: Vec<Point> = images[0].contents().iter().map(|p| p.rendering.origin).collect();
    assert_eq!(origins, vec![Point::new(0.0, 0.0), Point::new(0.0, 40.0)]);
    assert_eq!(images[0].subject().map(|s| s.title.as_str()), Some("c1"));
}

/// Test that sides without a presenter are skipped.
#[test]
fn test_missing_presenter_skipped() {
    let class = class(Some(CARD), None);
    let deck = deck(&class, 2);
    let mut layouter = Layouter::new("Game", deck.all_sorted(), small_page(), Sheets).unwrap();

    layouter.run(Sides::BOTH).unwrap();
    let sides: Vec<Side> = layouter
        .images()
        .iter()
        .flat_map(|i| i.contents().iter().map(|p| p.rendering.side))
        .collect();
    assert_eq!(sides, vec![Side::Obverse, Side::Obverse]);
}

/// Test that a card larger than the printable area aborts the run.
#[test]
fn test_too_small() {
    let class = class(Some(Footprint::new(90.0, 40.0)), None);
    let deck = deck(&class, 1);
    let config = small_page().with_margins(Margins::new(10.0, 10.0));
    let mut layouter = Layouter::new("Game", deck.all_sorted(), config, Sheets).unwrap();

    let err = layouter.run(Sides::OBVERSE).unwrap_err();
    assert_eq!(
        err,
        LayoutError::TooSmall {
            footprint: Footprint::new(90.0, 40.0),
            printable: Footprint::new(80.0, 80.0),
        }
    );
}

/// Test that a layouter needs cards and runs only once.
#[test]
fn test_run_state() {
    assert!(matches!(
        Layouter::new("Game", Vec::new(), small_page(), Sheets),
        Err(LayoutError::NoCards)
    ));

    let class = class(Some(CARD), None);
    let deck = deck(&class, 1);
    let mut layouter = Layouter::new("Game", deck.all_sorted(), small_page(), Sheets).unwrap();
    assert_eq!(layouter.state(), RunState::Idle);

    layouter.run(Sides::OBVERSE).unwrap();
    assert_eq!(layouter.run(Sides::OBVERSE), Err(LayoutError::AlreadyRun));
    assert_eq!(layouter.images().len(), 1);
}

// =============================================================================
// Neighbours
// =============================================================================

/// Test that both sides of each card are placed side by side.
#[test]
fn test_neighbours() {
    let class = class(Some(Footprint::new(50.0, 40.0)), Some(Footprint::new(50.0, 40.0)));
    let deck = deck(&class, 2);
    let mut layouter = Layouter::new("Game", deck.all_sorted(), small_page(), Neighbours).unwrap();

    layouter.run(Sides::BOTH).unwrap();
    let images = layouter.images();
    assert_eq!(images.len(), 1);

    let placed: Vec<(usize, Side)> = images[0]
        .contents()
        .iter()
        .map(|p| (p.number, p.rendering.side))
        .collect();
    assert_eq!(
        placed,
        vec![
            (1, Side::Obverse),
            (1, Side::Reverse),
            (2, Side::Obverse),
            (2, Side::Reverse)
        ]
    );
}

/// Test that a one-sided request still places both sides of each card.
#[test]
fn test_neighbours_always_both_sides() {
    let class = class(Some(Footprint::new(50.0, 40.0)), Some(Footprint::new(50.0, 40.0)));
    let deck = deck(&class, 2);
    let mut layouter = Layouter::new("Game", deck.all_sorted(), small_page(), Neighbours).unwrap();

    layouter.run(Sides::OBVERSE).unwrap();
    assert_eq!(layouter.state(), RunState::Finalized);

    let placed: Vec<(usize, Side)> = layouter
        .images()
        .iter()
        .flat_map(|image| image.contents().iter().map(|p| (p.number, p.rendering.side)))
        .collect();
    assert_eq!(placed.len(), 4);
    assert_eq!(
        placed,
        vec![
            (1, Side::Obverse),
            (1, Side::Reverse),
            (2, Side::Obverse),
            (2, Side::Reverse)
        ]
    );
}

// =============================================================================
// Duplex
// =============================================================================

/// Test that front and back sheets alternate.
#[test]
fn test_duplex_interleaving() {
    let class = class(Some(CARD), Some(CARD));
    let deck = deck(&class, 4);
    let mut layouter =
        Layouter::new("Game", deck.all_sorted(), small_page(), Duplex::new()).unwrap();

    layouter.run(Sides::BOTH).unwrap();
    let images = layouter.images();
    assert_eq!(images.len(), 4);

    let directions: Vec<bool> = images.iter().map(|i| i.left_to_right()).collect();
    assert_eq!(directions, vec![true, false, true, false]);
    let contents: Vec<Vec<usize>> = images.iter().map(numbers).collect();
    assert_eq!(contents, vec![vec![1, 2], vec![1, 2], vec![3, 4], vec![3, 4]]);

    // Backs are mirrored to line up with their fronts.
    assert_eq!(images[1].contents()[0].rendering.origin, Point::new(40.0, 0.0));

    let first = layouter.cards()[0];
    let holding: Vec<usize> = layouter.images_of(first, Side::Reverse).collect();
    assert_eq!(holding, vec![1]);
}

/// Test that backs never share an image with fronts.
#[test]
fn test_duplex_fresh_image_per_side() {
    let class = class(Some(CARD), Some(CARD));
    let deck = deck(&class, 1);
    let mut layouter =
        Layouter::new("Game", deck.all_sorted(), small_page(), Duplex::new()).unwrap();

    layouter.run(Sides::BOTH).unwrap();
    let images = layouter.images();
    assert_eq!(images.len(), 2);
    assert_eq!(images[0].contents()[0].rendering.side, Side::Obverse);
    assert_eq!(images[1].contents()[0].rendering.side, Side::Reverse);
}

/// Test that a side without presenters adds no blank sheet.
#[test]
fn test_duplex_without_backs() {
    let class = class(Some(CARD), None);
    let deck = deck(&class, 2);
    let mut layouter =
        Layouter::new("Game", deck.all_sorted(), small_page(), Duplex::new()).unwrap();

    layouter.run(Sides::BOTH).unwrap();
    assert_eq!(layouter.images().len(), 1);
    assert!(layouter.images().iter().all(|i| !i.is_empty()));
}

// =============================================================================
// Singles
// =============================================================================

/// Test one image per card side, sized to the card.
#[test]
fn test_singles() {
    let class = class(Some(CARD), Some(Footprint::new(40.0, 60.0)));
    let deck = deck(&class, 2);
    let mut layouter =
        Layouter::new("Game", deck.all_sorted(), LayoutConfig::default(), Singles).unwrap();
    assert_eq!(layouter.config().margins, Margins::ZERO);

    layouter.run(Sides::BOTH).unwrap();
    let sizes: Vec<Footprint> = layouter.images().iter().map(|i| i.dimensions()).collect();
    assert_eq!(sizes, vec![CARD, CARD, Footprint::new(40.0, 60.0), Footprint::new(40.0, 60.0)]);
    assert!(layouter.images().iter().all(|i| i.len() == 1));

    let names = layouter.filenames();
    assert_eq!(names[0], "game_1.svg");
}

// =============================================================================
// Fan
// =============================================================================

/// Test that a fan puts every card on one image, rotated about a pivot.
#[test]
fn test_fan() {
    let card = Footprint::new(44.0, 68.0);
    let class = class(Some(card), None);
    let deck = deck(&class, 3);
    let config = LayoutConfig::default().with_arc(0.6);
    let mut layouter = Layouter::new("Game", deck.all_sorted(), config, Fan::new()).unwrap();

    let geometry = FanGeometry::new(3, card, Some(0.6));
    assert_eq!(layouter.strategy().geometry(), Some(&geometry));
    assert_eq!(layouter.config().image_size, geometry.image_size);
    assert_eq!(layouter.config().naming.suffix, "fan");

    layouter.run(Sides::OBVERSE).unwrap();
    let images = layouter.images();
    assert_eq!(images.len(), 1);
    assert_eq!(images[0].dimensions(), geometry.image_size);
    assert_eq!(images[0].len(), 3);

    let degrees: Vec<f64> = images[0]
        .contents()
        .iter()
        .map(|p| match p.rendering.transform {
            Some(Transform::Rotate { degrees, x, y }) => {
                assert_eq!(Point::new(x, y), geometry.pivot);
                degrees
            }
            other => panic!("unexpected transform: {:?}", other),
        })
        .collect();
    assert!((degrees[0] + 0.3f64.to_degrees()).abs() < 1e-9);
    assert!(degrees[1].abs() < 1e-9);
    assert!((degrees[2] - 0.3f64.to_degrees()).abs() < 1e-9);

    assert!(images[0].contents().iter().all(|p| p.rendering.origin == geometry.origin()));
    assert_eq!(layouter.filenames(), vec!["game_1_fan.svg"]);
}

/// Test that a single card in a fan stands upright.
#[test]
fn test_fan_single_card() {
    let class = class(Some(Footprint::new(44.0, 68.0)), None);
    let deck = deck(&class, 1);
    let config = LayoutConfig::default().with_arc(2.0);
    let mut layouter = Layouter::new("Game", deck.all_sorted(), config, Fan::new()).unwrap();

    layouter.run(Sides::OBVERSE).unwrap();
    let placement = &layouter.images()[0].contents()[0];
    assert!(matches!(
        placement.rendering.transform,
        Some(Transform::Rotate { degrees, .. }) if degrees == 0.0
    ));
}

/// Test that a fan needs a front to measure.
#[test]
fn test_fan_needs_obverse() {
    let class = class(None, Some(CARD));
    let deck = deck(&class, 2);
    let result = Layouter::new("Game", deck.all_sorted(), LayoutConfig::default(), Fan::new());
    assert!(matches!(
        result,
        Err(LayoutError::NoPresenter { side: Side::Obverse, .. })
    ));
}

// =============================================================================
// Filenames
// =============================================================================

/// Test filenames with sides, padded to the number of images.
#[test]
fn test_filenames() {
    let class = class(Some(Footprint::new(100.0, 100.0)), Some(Footprint::new(100.0, 100.0)));
    let deck = deck(&class, 5);
    let config = small_page().with_naming(NamingConfig::default().with_side());
    let mut layouter = Layouter::new("The Game", deck.all_sorted(), config, Sheets).unwrap();

    layouter.run(Sides::BOTH).unwrap();
    let names = layouter.filenames();
    assert_eq!(names.len(), 10);
    assert_eq!(names[0], "thegame_01_obverse.svg");
    assert_eq!(names[9], "thegame_10_reverse.svg");
}

/// Test filenames after the cards on single images.
#[test]
fn test_filenames_per_card() {
    let class = class(Some(CARD), None);
    let deck = deck(&class, 2);
    let config = LayoutConfig::default()
        .with_naming(NamingConfig::default().without_game().per_card());
    let mut layouter = Layouter::new("Game", deck.all_sorted(), config, Singles).unwrap();

    layouter.run(Sides::OBVERSE).unwrap();
    assert_eq!(layouter.filenames(), vec!["1_deck_c1.svg", "2_deck_c2.svg"]);
}
