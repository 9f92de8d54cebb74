//! Proptest strategies for grids and sound layouts.
//!
//! Layouts are generated by proposing random rectangles and keeping the ones that
//! do not collide with those already kept, so every generated layout satisfies
//! the at-rest invariant by construction.

use gridboard_core::{Board, GridRect, GridSize, Item, ItemId};
use proptest::prelude::*;

/// Largest grid dimension generated.
pub const MAX_GRID: i32 = 12;

/// Grids from 1x1 up to `MAX_GRID` x `MAX_GRID`.
pub fn arb_grid() -> impl Strategy<Value = GridSize> {
    (1..=MAX_GRID, 1..=MAX_GRID).prop_map(|(cols, rows)| GridSize::new(cols, rows))
}

/// Rectangles that lie inside `grid`, at most 4x4.
pub fn arb_rect_within(grid: GridSize) -> impl Strategy<Value = GridRect> {
    (1..=grid.cols, 1..=grid.rows).prop_flat_map(move |(x, y)| {
        let max_cols = (grid.cols - x + 1).min(4);
        let max_rows = (grid.rows - y + 1).min(4);
        (Just(x), Just(y), 1..=max_cols, 1..=max_rows)
            .prop_map(|(x, y, cols, rows)| GridRect::new(x, y, cols, rows))
    })
}

/// Sound layouts on `grid` with up to `max_items` items, ids numbered from 1.
pub fn arb_layout_in(grid: GridSize, max_items: usize) -> impl Strategy<Value = Vec<Item>> {
    proptest::collection::vec(arb_rect_within(grid), 0..=max_items).prop_map(|rects| {
        let mut kept: Vec<GridRect> = Vec::with_capacity(rects.len());
        for rect in rects {
            if kept.iter().all(|other| !other.intersects(&rect)) {
                kept.push(rect);
            }
        }
        kept.into_iter()
            .enumerate()
            .map(|(i, rect)| Item::from_rect(ItemId(i as u64 + 1), rect))
            .collect()
    })
}

/// A random grid with a sound layout of up to 10 items.
pub fn arb_layout() -> impl Strategy<Value = (GridSize, Vec<Item>)> {
    arb_grid().prop_flat_map(|grid| (Just(grid), arb_layout_in(grid, 10)))
}

/// A layout with at least one item, plus the index of a chosen item.
pub fn arb_layout_with_pick() -> impl Strategy<Value = (GridSize, Vec<Item>, usize)> {
    arb_layout()
        .prop_filter("layout needs an item", |(_, items)| !items.is_empty())
        .prop_flat_map(|(grid, items)| {
            let len = items.len();
            (Just(grid), Just(items), 0..len)
        })
}

/// Target origins around `grid`, including one row and column past each edge.
pub fn arb_target(grid: GridSize) -> impl Strategy<Value = (i32, i32)> {
    (0..=grid.cols + 1, 0..=grid.rows + 1)
}

/// Validated boards.
pub fn arb_board() -> impl Strategy<Value = Board> {
    arb_layout().prop_map(|(grid, items)| {
        Board::new(grid, items).expect("generated layouts are sound")
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assert_layout_sound;

    proptest! {
        #[test]
        fn prop_rect_within_stays_inside(
            (grid, rect) in arb_grid().prop_flat_map(|g| (Just(g), arb_rect_within(g)))
        ) {
            prop_assert!(grid.contains(&rect));
            prop_assert!(!rect.is_empty());
        }

        #[test]
        fn prop_generated_layouts_are_sound((grid, items) in arb_layout()) {
            assert_layout_sound(grid, &items);
        }

        #[test]
        fn prop_pick_is_in_range((_, items, pick) in arb_layout_with_pick()) {
            prop_assert!(pick < items.len());
        }

        #[test]
        fn prop_boards_validate(board in arb_board()) {
            prop_assert!(board.validate().is_ok());
        }
    }
}
