//! Trigonometry of a fan of cards.
//!
//! Cards are rotated about a common pivot below the image. The midpoints
//! of their upper edges trace an outer arc of radius `3 × card height`;
//! the midpoints of their lower edges trace an inner arc one card height
//! closer to the pivot. The image is sized to the outermost corners.

use crate::core::{Footprint, Point};

/// Layout of `n` uniform cards in a fan.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FanGeometry {
    /// Total angle of the fan, in radians.
    pub arc: f64,
    /// Number of the first card.
    pub n_min: usize,
    /// Number of the last card.
    pub n_max: usize,
    pub card: Footprint,
    pub outer_radius: f64,
    pub inner_radius: f64,
    /// Height of the tallest card corner over the outer arc.
    pub radial_margin: f64,
    /// Centre of rotation, outside the image.
    pub pivot: Point,
    pub image_size: Footprint,
}

impl FanGeometry {
    /// The arc picked when none is given: wider for more cards, up to one
    /// radian.
    #[must_use]
    pub fn default_arc(cards: usize) -> f64 {
        (0.15 * cards.saturating_sub(1) as f64).min(1.0)
    }

    /// Compute the layout of cards numbered `1..=cards`.
    #[must_use]
    pub fn new(cards: usize, card: Footprint, arc: Option<f64>) -> Self {
        let arc = arc.filter(|a| *a != 0.0).unwrap_or_else(|| Self::default_arc(cards));
        if arc > std::f64::consts::PI {
            log::warn!("fan arc of {arc} radians exceeds π; the image will be misshapen");
        }
        let (cx, cy) = (card.width, card.height);

        let outer_radius = cy * 3.0;
        let inner_radius = outer_radius - cy;

        let mut fan = Self {
            arc,
            n_min: 1,
            n_max: cards.max(1),
            card,
            outer_radius,
            inner_radius,
            radial_margin: 0.0,
            pivot: Point::ORIGIN,
            image_size: Footprint::default(),
        };

        let half = arc / 2.0;
        let outer_chord = 2.0 * outer_radius * half.sin();
        let chord_margin = (cx / 2.0) * half.cos();
        let inner_sagitta = inner_radius * (1.0 - half.cos());
        let sagitta_margin = (cx / 2.0) * half.sin();

        // The last card is excluded; it mirrors the first.
        fan.radial_margin = (fan.n_min..fan.n_max)
            .map(|n| fan.corner_height(n))
            .fold(None, |max: Option<f64>, h| Some(max.map_or(h, |m| m.max(h))))
            .unwrap_or(0.0);

        fan.pivot = Point::new(
            outer_chord / 2.0 + chord_margin,
            outer_radius + fan.radial_margin,
        );
        fan.image_size = Footprint::new(
            outer_chord + 2.0 * chord_margin,
            fan.radial_margin + cy + inner_sagitta + sagitta_margin,
        );
        fan
    }

    /// Card number scaled to [0, 1], or 0.5 for a single card.
    #[must_use]
    pub fn normalized(&self, number: usize) -> f64 {
        if self.n_max == self.n_min {
            0.5
        } else {
            (number as f64 - self.n_min as f64) / (self.n_max - self.n_min) as f64
        }
    }

    /// Rotation of card `number`, in radians.
    #[must_use]
    pub fn angle(&self, number: usize) -> f64 {
        (self.normalized(number) - 0.5) * self.arc
    }

    /// Rotation of card `number`, in degrees.
    #[must_use]
    pub fn degrees(&self, number: usize) -> f64 {
        self.angle(number).to_degrees()
    }

    /// Height of a card's corner over the outer arc.
    #[must_use]
    pub fn corner_height(&self, number: usize) -> f64 {
        let angle = self.angle(number);
        let corner_over_midpoint = (self.card.width / 2.0) * angle.sin();
        let midpoint_over_pivot = self.outer_radius * angle.cos();
        corner_over_midpoint + midpoint_over_pivot - self.outer_radius
    }

    /// Where every card is placed before rotation: centred, just below the
    /// radial margin.
    #[must_use]
    pub fn origin(&self) -> Point {
        Point::new(
            (self.image_size.width - self.card.width) / 2.0,
            self.radial_margin,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f64 = 1e-9;

    #[test]
    fn test_single_card_is_upright() {
        let fan = FanGeometry::new(1, Footprint::new(44.0, 68.0), Some(0.8));
        assert_eq!(fan.normalized(1), 0.5);
        assert_eq!(fan.angle(1), 0.0);
        assert_eq!(fan.radial_margin, 0.0);
    }

    #[test]
    fn test_default_arc() {
        assert_eq!(FanGeometry::default_arc(1), 0.0);
        assert!((FanGeometry::default_arc(3) - 0.3).abs() < EPSILON);
        assert_eq!(FanGeometry::default_arc(20), 1.0);

        let fan = FanGeometry::new(3, Footprint::new(44.0, 68.0), Some(0.0));
        assert!((fan.arc - 0.3).abs() < EPSILON);
    }

    #[test]
    fn test_symmetric_angles() {
        let fan = FanGeometry::new(5, Footprint::new(44.0, 68.0), Some(1.0));
        assert!((fan.angle(1) + 0.5).abs() < EPSILON);
        assert!(fan.angle(3).abs() < EPSILON);
        assert!((fan.angle(5) - 0.5).abs() < EPSILON);
        assert!((fan.degrees(5) - 0.5f64.to_degrees()).abs() < EPSILON);
    }

    #[test]
    fn test_image_size() {
        let (cx, cy) = (44.0, 68.0);
        let arc = 1.0;
        let fan = FanGeometry::new(2, Footprint::new(cx, cy), Some(arc));

        let r = 3.0 * cy;
        let chord = 2.0 * r * (arc / 2.0).sin();
        let chord_margin = (cx / 2.0) * (arc / 2.0).cos();
        let sagitta = (r - cy) * (1.0 - (arc / 2.0).cos());
        let sagitta_margin = (cx / 2.0) * (arc / 2.0).sin();
        // Only card 1 counts towards the radial margin.
        let a = -0.5;
        let margin = (cx / 2.0) * f64::sin(a) + r * f64::cos(a) - r;

        assert!((fan.radial_margin - margin).abs() < EPSILON);
        assert!((fan.image_size.width - (chord + 2.0 * chord_margin)).abs() < EPSILON);
        assert!((fan.image_size.height - (margin + cy + sagitta + sagitta_margin)).abs() < EPSILON);
        assert!((fan.pivot.x - (chord / 2.0 + chord_margin)).abs() < EPSILON);
        assert!((fan.pivot.y - (r + margin)).abs() < EPSILON);
        assert!((fan.origin().x - (fan.image_size.width - cx) / 2.0).abs() < EPSILON);
    }
}
