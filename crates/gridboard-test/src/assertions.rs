//! Layout assertions with readable failure output.

use gridboard_core::{overlapping_pairs, GridSize, Item};
use std::collections::HashSet;

const LABELS: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";

/// Every way `items` breaks the at-rest invariant on `grid`, one message each.
///
/// Empty means the layout is sound: every item has a positive extent, lies
/// inside the grid, has a unique id, and shares no cell with another item.
#[must_use]
pub fn layout_violations(grid: GridSize, items: &[Item]) -> Vec<String> {
    let mut violations = Vec::new();
    if !grid.is_valid() {
        violations.push(format!("grid {grid} has a non-positive dimension"));
    }

    let mut seen = HashSet::new();
    for item in items {
        if !seen.insert(item.id) {
            violations.push(format!("duplicate id {}", item.id));
        }
        let rect = item.rect();
        if rect.is_empty() {
            violations.push(format!("item {} has empty extent {rect}", item.id));
        } else if !grid.contains(&rect) {
            violations.push(format!("item {} at {rect} leaves the {grid} grid", item.id));
        }
    }

    for (first, second) in overlapping_pairs(items) {
        violations.push(format!("items {first} and {second} overlap"));
    }
    violations
}

/// Panic with a picture of the layout if it breaks the at-rest invariant.
#[track_caller]
pub fn assert_layout_sound(grid: GridSize, items: &[Item]) {
    let violations = layout_violations(grid, items);
    if !violations.is_empty() {
        panic!(
            "layout is not sound:\n  {}\n{}",
            violations.join("\n  "),
            render_layout(grid, items)
        );
    }
}

/// Panic unless `after` holds the same ids as `before`, each with the same extent.
///
/// Moves and swaps relocate items; they never resize, add or drop them.
#[track_caller]
pub fn assert_extents_preserved(before: &[Item], after: &[Item]) {
    assert_eq!(
        before.len(),
        after.len(),
        "item count changed from {} to {}",
        before.len(),
        after.len()
    );
    for item in before {
        let Some(moved) = after.iter().find(|other| other.id == item.id) else {
            panic!("item {} disappeared", item.id);
        };
        assert_eq!(
            (moved.cols, moved.rows),
            (item.cols, item.rows),
            "item {} changed extent",
            item.id
        );
    }
}

/// Draw the layout, one character per cell.
///
/// Items are labelled by list position (`A`, `B`, ...). `.` is empty, `*` marks a
/// cell claimed by more than one item. Cells outside the grid are not drawn.
#[must_use]
pub fn render_layout(grid: GridSize, items: &[Item]) -> String {
    let cols = grid.cols.max(0) as usize;
    let rows = grid.rows.max(0) as usize;
    let mut cells = vec![b'.'; cols * rows];

    for (i, item) in items.iter().enumerate() {
        let label = LABELS.get(i).copied().unwrap_or(b'#');
        for (x, y) in item.rect().cells() {
            if x < 1 || y < 1 || x > grid.cols || y > grid.rows {
                continue;
            }
            let cell = &mut cells[(y - 1) as usize * cols + (x - 1) as usize];
            *cell = if *cell == b'.' { label } else { b'*' };
        }
    }

    cells
        .chunks(cols.max(1))
        .map(|row| String::from_utf8_lossy(row).into_owned())
        .collect::<Vec<_>>()
        .join("\n")
}
