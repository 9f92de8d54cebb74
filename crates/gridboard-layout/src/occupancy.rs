//! Point-in-time cell ownership snapshot.
//!
//! A [`GridOccupancy`] is built fresh from the item list at the start of each
//! evaluation and never mutated afterwards. It answers spatial queries:
//! - Is a rectangle free (optionally ignoring some ids)?
//! - Which items overlap a rectangle?
//! - Which item owns a single cell?
//!
//! Items that hang over the grid edge contribute only their in-bounds cells.
//! If the input overlaps, later items win the shared cells.

use gridboard_core::{Board, GridRect, GridSize, Item, ItemId};
use std::collections::{BTreeSet, HashMap, HashSet};
use std::hash::BuildHasher;

/// Ids ignored by a spatial query.
///
/// Implemented for a single [`ItemId`], `Option<ItemId>`, slices, arrays, vectors,
/// sets, and `()` (ignore nothing).
pub trait Exclusion {
    /// True if cells owned by `id` should count as free.
    fn excludes(&self, id: ItemId) -> bool;
}

impl Exclusion for () {
    fn excludes(&self, _id: ItemId) -> bool {
        false
    }
}

impl Exclusion for ItemId {
    fn excludes(&self, id: ItemId) -> bool {
        *self == id
    }
}

impl Exclusion for Option<ItemId> {
    fn excludes(&self, id: ItemId) -> bool {
        *self == Some(id)
    }
}

impl Exclusion for [ItemId] {
    fn excludes(&self, id: ItemId) -> bool {
        self.contains(&id)
    }
}

impl<const N: usize> Exclusion for [ItemId; N] {
    fn excludes(&self, id: ItemId) -> bool {
        self.contains(&id)
    }
}

impl Exclusion for Vec<ItemId> {
    fn excludes(&self, id: ItemId) -> bool {
        self.contains(&id)
    }
}

impl<S: BuildHasher> Exclusion for HashSet<ItemId, S> {
    fn excludes(&self, id: ItemId) -> bool {
        self.contains(&id)
    }
}

impl Exclusion for BTreeSet<ItemId> {
    fn excludes(&self, id: ItemId) -> bool {
        self.contains(&id)
    }
}

impl<T: Exclusion + ?Sized> Exclusion for &T {
    fn excludes(&self, id: ItemId) -> bool {
        (**self).excludes(id)
    }
}

/// Row-major matrix of cell -> owning item.
#[derive(Debug, Clone)]
pub struct GridOccupancy {
    grid: GridSize,
    cells: Vec<Option<ItemId>>,
    items: Vec<Item>,
    index: HashMap<ItemId, usize>,
}

impl GridOccupancy {
    /// Build a snapshot of `items` on a `grid`.
    ///
    /// A non-positive grid yields an empty matrix in which no area is free.
    #[must_use]
    pub fn new(grid: GridSize, items: &[Item]) -> Self {
        let mut cells = vec![None; grid.cell_count()];
        let mut index = HashMap::with_capacity(items.len());

        for (idx, item) in items.iter().enumerate() {
            index.entry(item.id).or_insert(idx);
            if let Some(visible) = clip(grid, item.rect()) {
                for (x, y) in visible.cells() {
                    cells[cell_index(grid, x, y)] = Some(item.id);
                }
            }
        }

        tracing::trace!(grid = %grid, items = items.len(), "occupancy snapshot built");

        Self {
            grid,
            cells,
            items: items.to_vec(),
            index,
        }
    }

    /// Snapshot of the committed state of a board.
    #[must_use]
    pub fn from_board(board: &Board) -> Self {
        Self::new(board.grid(), board.items())
    }

    /// Grid extent.
    #[must_use]
    pub fn grid(&self) -> GridSize {
        self.grid
    }

    /// Items captured by the snapshot.
    #[must_use]
    pub fn items(&self) -> &[Item] {
        &self.items
    }

    /// Look up a captured item by id.
    #[must_use]
    pub fn item(&self, id: ItemId) -> Option<&Item> {
        self.index.get(&id).map(|&idx| &self.items[idx])
    }

    /// Id of the item covering `(x, y)`, if any. Out-of-grid cells are empty.
    #[must_use]
    pub fn occupant_at(&self, x: i32, y: i32) -> Option<ItemId> {
        if in_bounds(self.grid, x, y) {
            self.cells[cell_index(self.grid, x, y)]
        } else {
            None
        }
    }

    /// True iff the area is inside the grid and every covered cell is empty or
    /// owned by an excluded id.
    #[must_use]
    pub fn is_area_free(&self, x: i32, y: i32, w: i32, h: i32, exclude: impl Exclusion) -> bool {
        self.is_rect_free(GridRect::new(x, y, w, h), exclude)
    }

    /// [`GridOccupancy::is_area_free`] for a rectangle.
    #[must_use]
    pub fn is_rect_free(&self, rect: GridRect, exclude: impl Exclusion) -> bool {
        if !self.grid.contains(&rect) {
            return false;
        }
        rect.cells().all(|(x, y)| {
            self.cells[cell_index(self.grid, x, y)].map_or(true, |id| exclude.excludes(id))
        })
    }

    /// Distinct items intersecting the area, in order of first encounter
    /// (row-major), skipping excluded ids. Out-of-grid cells are ignored.
    #[must_use]
    pub fn occupants_in_area(
        &self,
        x: i32,
        y: i32,
        w: i32,
        h: i32,
        exclude: impl Exclusion,
    ) -> Vec<Item> {
        self.occupants_in_rect(GridRect::new(x, y, w, h), exclude)
    }

    /// [`GridOccupancy::occupants_in_area`] for a rectangle.
    #[must_use]
    pub fn occupants_in_rect(&self, rect: GridRect, exclude: impl Exclusion) -> Vec<Item> {
        let Some(visible) = clip(self.grid, rect) else {
            return Vec::new();
        };

        let mut seen = HashSet::new();
        let mut found = Vec::new();
        for (x, y) in visible.cells() {
            if let Some(id) = self.cells[cell_index(self.grid, x, y)] {
                if !exclude.excludes(id) && seen.insert(id) {
                    if let Some(item) = self.item(id) {
                        found.push(*item);
                    }
                }
            }
        }
        found
    }

    /// First origin, scanning rows top to bottom and columns left to right, where
    /// a `cols x rows` item would fit without touching anything.
    #[must_use]
    pub fn find_free_slot(&self, cols: i32, rows: i32) -> Option<(i32, i32)> {
        if cols <= 0 || rows <= 0 || cols > self.grid.cols || rows > self.grid.rows {
            return None;
        }
        for y in 1..=(self.grid.rows - rows + 1) {
            for x in 1..=(self.grid.cols - cols + 1) {
                if self.is_area_free(x, y, cols, rows, ()) {
                    return Some((x, y));
                }
            }
        }
        None
    }

    /// Number of cells not owned by any item.
    #[must_use]
    pub fn free_cell_count(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_none()).count()
    }
}

const fn in_bounds(grid: GridSize, x: i32, y: i32) -> bool {
    x >= 1 && y >= 1 && x <= grid.cols && y <= grid.rows
}

// Caller guarantees (x, y) is in bounds.
const fn cell_index(grid: GridSize, x: i32, y: i32) -> usize {
    (y - 1) as usize * grid.cols as usize + (x - 1) as usize
}

/// Part of `rect` that lies inside the grid, if any.
fn clip(grid: GridSize, rect: GridRect) -> Option<GridRect> {
    if rect.is_empty() || !grid.is_valid() {
        return None;
    }
    let left = rect.x.max(1);
    let top = rect.y.max(1);
    let right = rect.right().min(grid.cols);
    let bottom = rect.bottom().min(grid.rows);
    if left > right || top > bottom {
        return None;
    }
    Some(GridRect::new(left, top, right - left + 1, bottom - top + 1))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(id: u64, x: i32, y: i32, cols: i32, rows: i32) -> Item {
        Item::new(ItemId(id), x, y, cols, rows)
    }

    fn sample() -> GridOccupancy {
        GridOccupancy::new(
            GridSize::new(10, 6),
            &[item(1, 1, 1, 2, 2), item(2, 3, 1, 1, 1), item(3, 5, 3, 2, 2)],
        )
    }

    // =========================================================================
    // Construction
    // =========================================================================

    #[test]
    fn test_occupancy_matrix() {
        let occ = sample();
        assert_eq!(occ.occupant_at(1, 1), Some(ItemId(1)));
        assert_eq!(occ.occupant_at(2, 2), Some(ItemId(1)));
        assert_eq!(occ.occupant_at(3, 1), Some(ItemId(2)));
        assert_eq!(occ.occupant_at(6, 4), Some(ItemId(3)));
        assert_eq!(occ.occupant_at(4, 1), None);
        assert_eq!(occ.free_cell_count(), 60 - 4 - 1 - 4);
    }

    #[test]
    fn test_occupancy_out_of_grid_cells_are_empty() {
        let occ = sample();
        assert_eq!(occ.occupant_at(0, 1), None);
        assert_eq!(occ.occupant_at(11, 1), None);
        assert_eq!(occ.occupant_at(1, 7), None);
    }

    #[test]
    fn test_occupancy_clips_overhanging_items() {
        let occ = GridOccupancy::new(GridSize::new(4, 4), &[item(1, 3, 3, 4, 4)]);
        assert_eq!(occ.occupant_at(4, 4), Some(ItemId(1)));
        assert_eq!(occ.free_cell_count(), 16 - 4);
    }

    #[test]
    fn test_occupancy_invalid_grid_has_nothing_free() {
        let occ = GridOccupancy::new(GridSize::new(0, 0), &[item(1, 1, 1, 1, 1)]);
        assert!(!occ.is_area_free(1, 1, 1, 1, ()));
        assert!(occ.occupants_in_area(1, 1, 3, 3, ()).is_empty());
        assert_eq!(occ.find_free_slot(1, 1), None);
    }

    #[test]
    fn test_occupancy_item_lookup() {
        let occ = sample();
        assert_eq!(occ.item(ItemId(3)).unwrap().x, 5);
        assert!(occ.item(ItemId(99)).is_none());
        assert_eq!(occ.items().len(), 3);
    }

    // =========================================================================
    // is_area_free
    // =========================================================================

    #[test]
    fn test_is_area_free_empty_region() {
        assert!(sample().is_area_free(7, 1, 4, 2, ()));
    }

    #[test]
    fn test_is_area_free_blocked() {
        assert!(!sample().is_area_free(2, 1, 2, 1, ()));
    }

    #[test]
    fn test_is_area_free_exclusion_forms() {
        let occ = sample();
        assert!(occ.is_area_free(1, 1, 2, 2, ItemId(1)));
        assert!(occ.is_area_free(1, 1, 2, 2, Some(ItemId(1))));
        assert!(!occ.is_area_free(1, 1, 3, 1, ItemId(1)));
        assert!(occ.is_area_free(1, 1, 3, 1, [ItemId(1), ItemId(2)]));
        assert!(occ.is_area_free(1, 1, 3, 1, vec![ItemId(1), ItemId(2)]));
        assert!(occ.is_area_free(1, 1, 3, 1, &[ItemId(2), ItemId(1)][..]));

        let set: HashSet<ItemId> = [ItemId(1), ItemId(2)].into_iter().collect();
        assert!(occ.is_area_free(1, 1, 3, 1, &set));
        let set: BTreeSet<ItemId> = [ItemId(1), ItemId(2)].into_iter().collect();
        assert!(occ.is_area_free(1, 1, 3, 1, set));
    }

    #[test]
    fn test_is_area_free_unknown_exclusion_is_harmless() {
        let occ = sample();
        assert!(!occ.is_area_free(1, 1, 1, 1, ItemId(404)));
        assert!(occ.is_area_free(9, 6, 1, 1, ItemId(404)));
    }

    #[test]
    fn test_is_area_free_bounds() {
        let occ = sample();
        assert!(!occ.is_area_free(0, 1, 1, 1, ()));
        assert!(!occ.is_area_free(10, 1, 2, 1, ()));
        assert!(!occ.is_area_free(1, 6, 1, 2, ()));
        assert!(occ.is_area_free(10, 6, 1, 1, ()));
    }

    #[test]
    fn test_is_area_free_degenerate_sizes() {
        let occ = sample();
        assert!(!occ.is_area_free(8, 1, 0, 1, ()));
        assert!(!occ.is_area_free(8, 1, 1, -3, ()));
        assert!(!occ.is_area_free(i32::MAX, i32::MAX, i32::MAX, i32::MAX, ()));
    }

    // =========================================================================
    // occupants_in_area
    // =========================================================================

    #[test]
    fn test_occupants_in_area_distinct_items() {
        let occ = sample();
        let found = occ.occupants_in_area(1, 1, 6, 4, ());
        let ids: Vec<ItemId> = found.iter().map(|i| i.id).collect();
        assert_eq!(ids, vec![ItemId(1), ItemId(2), ItemId(3)]);
    }

    #[test]
    fn test_occupants_in_area_excludes_id() {
        let occ = sample();
        let found = occ.occupants_in_area(1, 1, 3, 1, ItemId(1));
        assert_eq!(found, vec![item(2, 3, 1, 1, 1)]);
    }

    #[test]
    fn test_occupants_in_area_partially_outside() {
        let occ = sample();
        let found = occ.occupants_in_area(-2, -2, 4, 4, ());
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id, ItemId(1));
        assert!(occ.occupants_in_area(20, 20, 3, 3, ()).is_empty());
        assert!(occ.occupants_in_area(1, 1, 0, 3, ()).is_empty());
    }

    // =========================================================================
    // find_free_slot
    // =========================================================================

    #[test]
    fn test_find_free_slot_row_major() {
        let occ = sample();
        assert_eq!(occ.find_free_slot(1, 1), Some((4, 1)));
        assert_eq!(occ.find_free_slot(2, 2), Some((4, 1)));
        assert_eq!(occ.find_free_slot(3, 2), Some((4, 1)));
        assert_eq!(occ.find_free_slot(3, 3), Some((7, 1)));
    }

    #[test]
    fn test_find_free_slot_none_when_full() {
        let occ = GridOccupancy::new(GridSize::new(2, 2), &[item(1, 1, 1, 2, 2)]);
        assert_eq!(occ.find_free_slot(1, 1), None);
        assert_eq!(occ.find_free_slot(3, 1), None);
        assert_eq!(occ.find_free_slot(0, 1), None);
    }
}
