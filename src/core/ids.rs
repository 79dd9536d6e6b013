//! Arena indices.
//!
//! Cards in a deck and fields in a card's tree are both stored in flat
//! vectors and referred to by index. Identity is the index, never the
//! structure of the content, so two cards with identical specifications
//! remain distinct.

use serde::{Deserialize, Serialize};

/// Index of a card within its deck.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CardId(pub u32);

impl CardId {
    /// Create a new card ID.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }

    /// The ID for a deck position, if it fits in 32 bits.
    #[must_use]
    pub fn from_index(index: usize) -> Option<Self> {
        u32::try_from(index).ok().map(Self)
    }

    #[inline]
    pub(crate) const fn index(self) -> usize {
        self.0 as usize
    }
}

impl std::fmt::Display for CardId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Card({})", self.0)
    }
}

/// Index into a `FieldTree` node arena.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FieldId(pub u32);

impl FieldId {
    /// The root of every tree.
    pub const ROOT: FieldId = FieldId(0);

    /// Create a new field ID.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw index value.
    #[inline]
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }

    /// The ID for an arena position, if it fits in 32 bits.
    #[must_use]
    pub fn from_index(index: usize) -> Option<Self> {
        u32::try_from(index).ok().map(Self)
    }

    #[inline]
    pub(crate) const fn index(self) -> usize {
        self.0 as usize
    }
}

impl std::fmt::Display for FieldId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Field({})", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_card_id() {
        let id = CardId::new(42);
        assert_eq!(id.raw(), 42);
        assert_eq!(format!("{}", id), "Card(42)");
        assert!(CardId::new(1) < CardId::new(2));
    }

    #[test]
    fn test_field_id_root() {
        assert_eq!(FieldId::ROOT, FieldId::new(0));
        assert_eq!(FieldId::new(7).index(), 7);
        assert_eq!(format!("{}", FieldId::new(3)), "Field(3)");
    }

    #[test]
    fn test_from_index_is_checked() {
        assert_eq!(CardId::from_index(5), Some(CardId::new(5)));
        assert_eq!(FieldId::from_index(u32::MAX as usize), Some(FieldId::new(u32::MAX)));
    }

    #[cfg(target_pointer_width = "64")]
    #[test]
    fn test_from_index_rejects_overflow() {
        let past = u32::MAX as usize + 1;
        assert_eq!(CardId::from_index(past), None);
        assert_eq!(FieldId::from_index(past), None);
    }
}
