//! The committed item list.
//!
//! [`Board`] is the single source of truth for item positions. Items live in an
//! arena (`Vec<Item>`) with an id index next to it; view layers keep their own
//! id -> handle maps and never store back-references on items.
//!
//! Every mutation goes through a validating path, so whenever no gesture is in
//! flight the at-rest invariant holds: all items lie within the grid and no two
//! items overlap.

use crate::error::{LayoutError, Result};
use crate::geometry::GridSize;
use crate::item::{Item, ItemId, Placement};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Outcome of fitting the board to a new grid size.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SanitizeReport {
    /// Items whose position or extent had to change.
    pub clamped: Vec<ItemId>,
    /// Pairs left overlapping after clamping.
    pub overlaps: Vec<(ItemId, ItemId)>,
}

impl SanitizeReport {
    /// True if nothing was clamped and nothing overlaps.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.clamped.is_empty() && self.overlaps.is_empty()
    }
}

/// Id-indexed item list with atomic batch commits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    grid: GridSize,
    items: Vec<Item>,
    index: HashMap<ItemId, usize>,
    revision: u64,
}

impl Board {
    /// Create a board, validating ids and the at-rest invariant.
    pub fn new(grid: GridSize, items: impl IntoIterator<Item = Item>) -> Result<Self> {
        if !grid.is_valid() {
            return Err(LayoutError::InvalidGrid(grid));
        }
        let items: Vec<Item> = items.into_iter().collect();
        let index = build_index(&items)?;
        validate_items(grid, &items)?;
        Ok(Self {
            grid,
            items,
            index,
            revision: 0,
        })
    }

    /// Create a board with no items.
    pub fn empty(grid: GridSize) -> Result<Self> {
        Self::new(grid, [])
    }

    /// Grid extent.
    #[must_use]
    pub fn grid(&self) -> GridSize {
        self.grid
    }

    /// All items in insertion order.
    #[must_use]
    pub fn items(&self) -> &[Item] {
        &self.items
    }

    /// Look up an item by id.
    #[must_use]
    pub fn get(&self, id: ItemId) -> Option<&Item> {
        self.index.get(&id).map(|&idx| &self.items[idx])
    }

    /// Check whether an item is on the board.
    #[must_use]
    pub fn contains(&self, id: ItemId) -> bool {
        self.index.contains_key(&id)
    }

    /// Number of items.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// True if the board has no items.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Incremented once per successful mutation.
    #[must_use]
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Add an item; fails if the id exists or the item would break the invariant.
    pub fn insert(&mut self, item: Item) -> Result<()> {
        if self.index.contains_key(&item.id) {
            return Err(LayoutError::DuplicateId(item.id));
        }
        let mut next = self.items.clone();
        next.push(item);
        validate_items(self.grid, &next)?;
        self.index.insert(item.id, next.len() - 1);
        self.items = next;
        self.revision += 1;
        Ok(())
    }

    /// Remove an item, returning it.
    pub fn remove(&mut self, id: ItemId) -> Result<Item> {
        let idx = self
            .index
            .remove(&id)
            .ok_or(LayoutError::UnknownItem(id))?;
        let item = self.items.remove(idx);

        // Shift indices down after removal
        for i in self.index.values_mut() {
            if *i > idx {
                *i -= 1;
            }
        }

        self.revision += 1;
        Ok(item)
    }

    /// Apply a batch of placements atomically.
    ///
    /// The batch is applied to a copy of the list, the copy is validated, and only
    /// then swapped in. On error the board is untouched. Returns the new revision.
    pub fn apply(&mut self, placements: &[Placement]) -> Result<u64> {
        if placements.is_empty() {
            return Ok(self.revision);
        }

        let mut next = self.items.clone();
        for placement in placements {
            let idx = *self
                .index
                .get(&placement.id)
                .ok_or(LayoutError::UnknownItem(placement.id))?;
            next[idx] = next[idx].placed(placement.rect);
        }
        validate_items(self.grid, &next)?;

        self.items = next;
        self.revision += 1;
        tracing::debug!(placed = placements.len(), revision = self.revision, "batch applied");
        Ok(self.revision)
    }

    /// Re-check the at-rest invariant.
    pub fn validate(&self) -> Result<()> {
        validate_items(self.grid, &self.items)
    }

    /// Fit every item into a new grid size.
    ///
    /// Origins are pulled in to at most `(cols, rows)` and extents shrink (never
    /// below one cell) so each item fits. Clamping can introduce overlaps; those
    /// are reported rather than resolved, and [`Board::validate`] fails until the
    /// caller removes or re-places the offenders.
    pub fn resize_grid(&mut self, grid: GridSize) -> Result<SanitizeReport> {
        if !grid.is_valid() {
            return Err(LayoutError::InvalidGrid(grid));
        }

        let mut report = SanitizeReport::default();
        for item in &mut self.items {
            let clamped = clamp_into(grid, *item);
            if clamped != *item {
                report.clamped.push(item.id);
                *item = clamped;
            }
        }
        report.overlaps = overlapping_pairs(&self.items);
        if !report.overlaps.is_empty() {
            tracing::warn!(
                grid = %grid,
                overlaps = report.overlaps.len(),
                clamped = report.clamped.len(),
                "grid resize left overlapping items"
            );
        }

        if grid != self.grid || !report.clamped.is_empty() {
            self.revision += 1;
        }
        self.grid = grid;
        Ok(report)
    }
}

fn build_index(items: &[Item]) -> Result<HashMap<ItemId, usize>> {
    let mut index = HashMap::with_capacity(items.len());
    for (idx, item) in items.iter().enumerate() {
        if index.insert(item.id, idx).is_some() {
            return Err(LayoutError::DuplicateId(item.id));
        }
    }
    Ok(index)
}

/// Check extents, bounds and overlaps, reporting the first violation.
///
/// Overlaps are found with a cell ownership map: each cell remembers the first
/// item that claimed it.
pub fn validate_items(grid: GridSize, items: &[Item]) -> Result<()> {
    if !grid.is_valid() {
        return Err(LayoutError::InvalidGrid(grid));
    }

    let cols = grid.cols as usize;
    let mut ownership: Vec<Option<ItemId>> = vec![None; grid.cell_count()];

    for item in items {
        let rect = item.rect();
        if rect.is_empty() {
            return Err(LayoutError::InvalidExtent { id: item.id, rect });
        }
        if !grid.contains(&rect) {
            return Err(LayoutError::OutOfBounds {
                id: item.id,
                rect,
                grid,
            });
        }
        for (x, y) in rect.cells() {
            let cell = (y as usize - 1) * cols + (x as usize - 1);
            match ownership[cell] {
                Some(existing) if existing != item.id => {
                    return Err(LayoutError::Overlap {
                        first: existing,
                        second: item.id,
                    });
                }
                _ => ownership[cell] = Some(item.id),
            }
        }
    }
    Ok(())
}

/// Every pair of items whose footprints share a cell, in list order.
#[must_use]
pub fn overlapping_pairs(items: &[Item]) -> Vec<(ItemId, ItemId)> {
    let mut pairs = Vec::new();
    for (i, a) in items.iter().enumerate() {
        for b in &items[i + 1..] {
            if a.rect().intersects(&b.rect()) {
                pairs.push((a.id, b.id));
            }
        }
    }
    pairs
}

fn clamp_into(grid: GridSize, item: Item) -> Item {
    let x = item.x.clamp(1, grid.cols);
    let y = item.y.clamp(1, grid.rows);
    let cols = item.cols.clamp(1, grid.cols - x + 1);
    let rows = item.rows.clamp(1, grid.rows - y + 1);
    Item::new(item.id, x, y, cols, rows)
}
