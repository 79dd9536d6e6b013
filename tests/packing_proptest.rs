//! Property-based tests for the shelf packer.
//! Verifies placement invariants for arbitrary footprint sequences.

use deckprint::core::{Footprint, Margins, Point};
use deckprint::error::LayoutError;
use deckprint::layout::{Image, PackError};
use proptest::prelude::*;

fn footprints() -> impl Strategy<Value = Vec<Footprint>> {
    prop::collection::vec(
        (1u32..=60, 1u32..=60).prop_map(|(w, h)| Footprint::new(f64::from(w), f64::from(h))),
        1..40,
    )
}

/// Pack everything, starting a new image whenever one is full.
fn pack_all(
    footprints: &[Footprint],
    margins: Margins,
    left_to_right: bool,
) -> Vec<Image<Footprint>> {
    let size = Footprint::new(100.0, 100.0);
    let mut images = vec![Image::new(size, margins).with_direction(left_to_right)];
    for &footprint in footprints {
        let last = images.len() - 1;
        match images[last].add(footprint, footprint) {
            Ok(_) => {}
            Err(PackError::Full) => {
                let mut image = Image::new(size, margins).with_direction(left_to_right);
                image.add(footprint, footprint).unwrap();
                images.push(image);
            }
            Err(PackError::Fatal(e)) => panic!("unexpected error: {}", e),
        }
    }
    images
}

/// Spots of every item, recomputed by replaying the image.
fn spots(image: &Image<Footprint>) -> Vec<(Point, Footprint)> {
    let mut replay =
        Image::new(image.dimensions(), image.margins()).with_direction(image.left_to_right());
    image
        .contents()
        .iter()
        .map(|&footprint| (replay.add(footprint, footprint).unwrap(), footprint))
        .collect()
}

fn overlap((a, fa): (Point, Footprint), (b, fb): (Point, Footprint)) -> bool {
    a.x < b.x + fb.width && b.x < a.x + fa.width && a.y < b.y + fb.height && b.y < a.y + fa.height
}

proptest! {
    /// Placed items never overlap.
    #[test]
    fn placements_never_overlap(items in footprints(), ltr in any::<bool>()) {
        for image in pack_all(&items, Margins::ZERO, ltr) {
            let placed = spots(&image);
            for (i, &a) in placed.iter().enumerate() {
                for &b in &placed[i + 1..] {
                    prop_assert!(!overlap(a, b), "{:?} overlaps {:?}", a, b);
                }
            }
        }
    }

    /// Placed items stay inside the margins.
    #[test]
    fn placements_stay_printable(items in footprints(), h in 0u32..=20, v in 0u32..=20) {
        let margins = Margins::new(f64::from(h), f64::from(v));
        for image in pack_all(&items, margins, true) {
            let limit = image.dimensions();
            for (spot, footprint) in spots(&image) {
                prop_assert!(spot.x >= margins.horizontal);
                prop_assert!(spot.y >= margins.vertical);
                prop_assert!(spot.x + footprint.width <= limit.width - margins.horizontal);
                prop_assert!(spot.y + footprint.height <= limit.height - margins.vertical);
            }
        }
    }

    /// Nothing is lost or reordered between images.
    #[test]
    fn packing_keeps_order(items in footprints()) {
        let packed: Vec<Footprint> = pack_all(&items, Margins::ZERO, true)
            .into_iter()
            .flat_map(Image::into_contents)
            .collect();
        prop_assert_eq!(packed, items);
    }

    /// TooSmall is raised exactly for footprints exceeding the printable area.
    #[test]
    fn too_small_exactly_when_oversize(w in 1u32..=120, h in 1u32..=120) {
        let image: Image<()> = Image::new(Footprint::new(100.0, 100.0), Margins::new(5.0, 10.0));
        let footprint = Footprint::new(f64::from(w), f64::from(h));
        let oversize = w > 90 || h > 80;

        match image.free_spot(footprint) {
            Err(LayoutError::TooSmall { .. }) => prop_assert!(oversize),
            Ok(spot) => {
                prop_assert!(!oversize);
                prop_assert_eq!(spot, Some(Point::new(5.0, 10.0)));
            }
            Err(other) => prop_assert!(false, "unexpected error: {}", other),
        }
    }

    /// Right-to-left images mirror left-to-right ones.
    #[test]
    fn right_to_left_mirrors(items in footprints()) {
        let forward = pack_all(&items, Margins::ZERO, true);
        let mirrored = pack_all(&items, Margins::ZERO, false);
        prop_assert_eq!(forward.len(), mirrored.len());

        for (a, b) in forward.iter().zip(&mirrored) {
            for ((pa, fa), (pb, _)) in spots(a).into_iter().zip(spots(b)) {
                prop_assert_eq!(pa.y, pb.y);
                prop_assert_eq!(pb.x, 100.0 - pa.x - fa.width);
            }
        }
    }
}
