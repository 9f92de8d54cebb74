//! Items placed on the grid.

use crate::geometry::GridRect;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Stable identifier of an item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(pub u64);

impl ItemId {
    /// Create a new item ID.
    #[must_use]
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// Raw numeric value.
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

impl From<u64> for ItemId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

/// A rectangular item on the grid.
///
/// The engine never creates or destroys items; it only proposes new
/// `(x, y, cols, rows)` values for them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Item {
    /// Identity
    pub id: ItemId,
    /// Left column (1-indexed)
    pub x: i32,
    /// Top row (1-indexed)
    pub y: i32,
    /// Width in columns
    pub cols: i32,
    /// Height in rows
    pub rows: i32,
}

impl Item {
    /// Create a new item.
    #[must_use]
    pub const fn new(id: ItemId, x: i32, y: i32, cols: i32, rows: i32) -> Self {
        Self {
            id,
            x,
            y,
            cols,
            rows,
        }
    }

    /// Create an item occupying `rect`.
    #[must_use]
    pub const fn from_rect(id: ItemId, rect: GridRect) -> Self {
        Self::new(id, rect.x, rect.y, rect.cols, rect.rows)
    }

    /// The item's current footprint.
    #[must_use]
    pub const fn rect(&self) -> GridRect {
        GridRect::new(self.x, self.y, self.cols, self.rows)
    }

    /// Number of cells covered.
    #[must_use]
    pub const fn area(&self) -> i64 {
        self.rect().area()
    }

    /// The same item moved to `(x, y)`.
    #[must_use]
    pub const fn moved_to(&self, x: i32, y: i32) -> Self {
        Self::new(self.id, x, y, self.cols, self.rows)
    }

    /// The same item with its footprint replaced by `rect`.
    #[must_use]
    pub const fn placed(&self, rect: GridRect) -> Self {
        Self::from_rect(self.id, rect)
    }
}

/// A proposed final footprint for one item.
///
/// A commit is a batch of placements applied together.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Placement {
    /// Item being placed
    pub id: ItemId,
    /// Final footprint
    pub rect: GridRect,
}

impl Placement {
    /// Create a new placement.
    #[must_use]
    pub const fn new(id: ItemId, rect: GridRect) -> Self {
        Self { id, rect }
    }

    /// Placement that keeps `item` exactly where it is.
    #[must_use]
    pub const fn unchanged(item: &Item) -> Self {
        Self::new(item.id, item.rect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_item_rect_roundtrip() {
        let item = Item::new(ItemId(7), 3, 2, 2, 1);
        assert_eq!(item.rect(), GridRect::new(3, 2, 2, 1));
        assert_eq!(Item::from_rect(ItemId(7), item.rect()), item);
        assert_eq!(item.area(), 2);
    }

    #[test]
    fn test_item_moved_to_keeps_extent() {
        let item = Item::new(ItemId(1), 1, 1, 2, 3).moved_to(4, 2);
        assert_eq!(item.rect(), GridRect::new(4, 2, 2, 3));
        assert_eq!(item.id, ItemId(1));
    }

    #[test]
    fn test_item_id_display() {
        assert_eq!(ItemId::new(42).to_string(), "#42");
        assert_eq!(ItemId::from(42).get(), 42);
    }

    #[test]
    fn test_item_serializes_flat() {
        let item = Item::new(ItemId(1_763_998_884_008), 4, 3, 1, 1);
        let json = serde_json::to_string(&item).unwrap();
        assert_eq!(
            json,
            r#"{"id":1763998884008,"x":4,"y":3,"cols":1,"rows":1}"#
        );
        let back: Item = serde_json::from_str(&json).unwrap();
        assert_eq!(back, item);
    }

    #[test]
    fn test_placement_unchanged() {
        let item = Item::new(ItemId(2), 5, 3, 2, 2);
        assert_eq!(Placement::unchanged(&item).rect, item.rect());
    }
}
