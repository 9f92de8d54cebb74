//! Geometric primitives.
//!
//! Two coordinate spaces meet here:
//! - Pixel space ([`Point`], [`Size`]) for pointer positions and container extents.
//! - Grid space ([`GridRect`], [`GridSize`], [`GridDelta`]) for 1-indexed cells.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, Sub};

/// A 2D point in pixel space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    /// X coordinate
    pub x: f32,
    /// Y coordinate
    pub y: f32,
}

impl Point {
    /// Origin point (0, 0)
    pub const ORIGIN: Self = Self { x: 0.0, y: 0.0 };

    /// Create a new point.
    #[must_use]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

impl Default for Point {
    fn default() -> Self {
        Self::ORIGIN
    }
}

impl Add for Point {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Point {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        Self::new(self.x - rhs.x, self.y - rhs.y)
    }
}

/// A 2D size in pixel space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Size {
    /// Width
    pub width: f32,
    /// Height
    pub height: f32,
}

impl Size {
    /// Zero size
    pub const ZERO: Self = Self {
        width: 0.0,
        height: 0.0,
    };

    /// Create a new size.
    #[must_use]
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// True if both dimensions are finite and strictly positive.
    #[must_use]
    pub fn is_drawable(&self) -> bool {
        self.width.is_finite() && self.height.is_finite() && self.width > 0.0 && self.height > 0.0
    }
}

impl Default for Size {
    fn default() -> Self {
        Self::ZERO
    }
}

/// A displacement measured in whole grid cells.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GridDelta {
    /// Column offset
    pub dx: i32,
    /// Row offset
    pub dy: i32,
}

impl GridDelta {
    /// No displacement.
    pub const ZERO: Self = Self { dx: 0, dy: 0 };

    /// Create a new delta.
    #[must_use]
    pub const fn new(dx: i32, dy: i32) -> Self {
        Self { dx, dy }
    }

    /// Convert a pixel displacement into whole cells, rounding to the nearest cell.
    ///
    /// `cell` is the pixel extent of one cell. Non-drawable cell sizes yield [`GridDelta::ZERO`].
    #[must_use]
    pub fn from_pixels(offset: Point, cell: Size) -> Self {
        if !cell.is_drawable() {
            return Self::ZERO;
        }
        Self::new(
            round_cells(offset.x / cell.width),
            round_cells(offset.y / cell.height),
        )
    }
}

// Half-way values round toward positive infinity, so a drag of exactly half a cell
// moves right/down but not left/up.
fn round_cells(value: f32) -> i32 {
    if value.is_finite() {
        (value + 0.5).floor() as i32
    } else {
        0
    }
}

/// Extent of the playing field in cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GridSize {
    /// Number of columns
    pub cols: i32,
    /// Number of rows
    pub rows: i32,
}

impl GridSize {
    /// Create a new grid size.
    #[must_use]
    pub const fn new(cols: i32, rows: i32) -> Self {
        Self { cols, rows }
    }

    /// True if both dimensions are positive.
    #[must_use]
    pub const fn is_valid(&self) -> bool {
        self.cols > 0 && self.rows > 0
    }

    /// Number of cells in the grid (zero for invalid grids).
    #[must_use]
    pub const fn cell_count(&self) -> usize {
        if self.is_valid() {
            self.cols as usize * self.rows as usize
        } else {
            0
        }
    }

    /// True if `rect` is non-empty and lies fully within `[1, cols] x [1, rows]`.
    #[must_use]
    pub const fn contains(&self, rect: &GridRect) -> bool {
        !rect.is_empty()
            && rect.x >= 1
            && rect.y >= 1
            && rect.right() <= self.cols
            && rect.bottom() <= self.rows
    }

    /// Pixel extent of one cell when the grid fills `container`.
    #[must_use]
    pub fn cell_size(&self, container: Size) -> Size {
        if !self.is_valid() {
            return Size::ZERO;
        }
        Size::new(
            container.width / self.cols as f32,
            container.height / self.rows as f32,
        )
    }
}

impl Default for GridSize {
    fn default() -> Self {
        Self::new(10, 6)
    }
}

impl fmt::Display for GridSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.cols, self.rows)
    }
}

/// A rectangle of grid cells.
///
/// `(x, y)` is the 1-indexed top-left cell; the rectangle covers
/// `x..=right()` by `y..=bottom()`. A rectangle with a non-positive extent is empty
/// and covers no cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GridRect {
    /// Left column
    pub x: i32,
    /// Top row
    pub y: i32,
    /// Width in columns
    pub cols: i32,
    /// Height in rows
    pub rows: i32,
}

impl GridRect {
    /// Create a new grid rectangle.
    #[must_use]
    pub const fn new(x: i32, y: i32, cols: i32, rows: i32) -> Self {
        Self { x, y, cols, rows }
    }

    /// Last column covered.
    #[must_use]
    pub const fn right(&self) -> i32 {
        self.x.saturating_add(self.cols).saturating_sub(1)
    }

    /// Last row covered.
    #[must_use]
    pub const fn bottom(&self) -> i32 {
        self.y.saturating_add(self.rows).saturating_sub(1)
    }

    /// True if the rectangle covers no cells.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.cols <= 0 || self.rows <= 0
    }

    /// Number of cells covered.
    #[must_use]
    pub const fn area(&self) -> i64 {
        if self.is_empty() {
            0
        } else {
            self.cols as i64 * self.rows as i64
        }
    }

    /// Same extent, new origin.
    #[must_use]
    pub const fn at(&self, x: i32, y: i32) -> Self {
        Self::new(x, y, self.cols, self.rows)
    }

    /// Same origin, new extent.
    #[must_use]
    pub const fn with_size(&self, cols: i32, rows: i32) -> Self {
        Self::new(self.x, self.y, cols, rows)
    }

    /// Shift by a grid delta.
    #[must_use]
    pub const fn translate(&self, delta: GridDelta) -> Self {
        self.at(
            self.x.saturating_add(delta.dx),
            self.y.saturating_add(delta.dy),
        )
    }

    /// True if the two rectangles share at least one cell.
    #[must_use]
    pub const fn intersects(&self, other: &Self) -> bool {
        !self.is_empty()
            && !other.is_empty()
            && self.x <= other.right()
            && other.x <= self.right()
            && self.y <= other.bottom()
            && other.y <= self.bottom()
    }

    /// True if every cell of `other` is also covered by `self`.
    #[must_use]
    pub const fn contains_rect(&self, other: &Self) -> bool {
        !other.is_empty()
            && other.x >= self.x
            && other.y >= self.y
            && other.right() <= self.right()
            && other.bottom() <= self.bottom()
    }

    /// True if `(x, y)` is one of the covered cells.
    #[must_use]
    pub const fn contains_cell(&self, x: i32, y: i32) -> bool {
        !self.is_empty() && x >= self.x && x <= self.right() && y >= self.y && y <= self.bottom()
    }

    /// Covered cells in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = (i32, i32)> {
        let (x, y) = (self.x, self.y);
        let (cols, rows) = (self.cols.max(0), self.rows.max(0));
        (0..rows).flat_map(move |r| (0..cols).map(move |c| (x + c, y + r)))
    }
}

impl fmt::Display for GridRect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}) {}x{}", self.x, self.y, self.cols, self.rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // =========================================================================
    // Pixel space
    // =========================================================================

    #[test]
    fn test_point_default() {
        assert_eq!(Point::default(), Point::ORIGIN);
    }

    #[test]
    fn test_point_sub() {
        let d = Point::new(130.0, 40.0) - Point::new(100.0, 50.0);
        assert_eq!(d, Point::new(30.0, -10.0));
    }

    #[test]
    fn test_size_is_drawable() {
        assert!(Size::new(1.0, 1.0).is_drawable());
        assert!(!Size::ZERO.is_drawable());
        assert!(!Size::new(f32::NAN, 10.0).is_drawable());
        assert!(!Size::new(10.0, -1.0).is_drawable());
    }

    // =========================================================================
    // GridDelta
    // =========================================================================

    #[test]
    fn test_delta_rounds_to_nearest_cell() {
        let cell = Size::new(100.0, 50.0);
        assert_eq!(
            GridDelta::from_pixels(Point::new(149.0, 24.0), cell),
            GridDelta::new(1, 0)
        );
        assert_eq!(
            GridDelta::from_pixels(Point::new(151.0, 26.0), cell),
            GridDelta::new(2, 1)
        );
        assert_eq!(
            GridDelta::from_pixels(Point::new(-151.0, -80.0), cell),
            GridDelta::new(-2, -2)
        );
    }

    #[test]
    fn test_delta_degenerate_cell() {
        assert_eq!(
            GridDelta::from_pixels(Point::new(500.0, 500.0), Size::ZERO),
            GridDelta::ZERO
        );
    }

    // =========================================================================
    // GridSize
    // =========================================================================

    #[test]
    fn test_grid_size_default_is_ten_by_six() {
        assert_eq!(GridSize::default(), GridSize::new(10, 6));
        assert_eq!(GridSize::default().cell_count(), 60);
    }

    #[test]
    fn test_grid_size_contains() {
        let grid = GridSize::new(10, 6);
        assert!(grid.contains(&GridRect::new(1, 1, 10, 6)));
        assert!(grid.contains(&GridRect::new(9, 5, 2, 2)));
        assert!(!grid.contains(&GridRect::new(10, 5, 2, 2)));
        assert!(!grid.contains(&GridRect::new(0, 1, 1, 1)));
        assert!(!grid.contains(&GridRect::new(1, 1, 0, 1)));
    }

    #[test]
    fn test_grid_size_cell_size() {
        let cell = GridSize::new(10, 6).cell_size(Size::new(1000.0, 600.0));
        assert_eq!(cell, Size::new(100.0, 100.0));
        assert_eq!(GridSize::new(0, 6).cell_size(Size::new(1.0, 1.0)), Size::ZERO);
    }

    // =========================================================================
    // GridRect
    // =========================================================================

    #[test]
    fn test_rect_edges_are_inclusive() {
        let r = GridRect::new(1, 1, 2, 2);
        assert_eq!(r.right(), 2);
        assert_eq!(r.bottom(), 2);
        assert_eq!(r.area(), 4);
        assert_eq!(
            r.cells().collect::<Vec<_>>(),
            vec![(1, 1), (2, 1), (1, 2), (2, 2)]
        );
    }

    #[test]
    fn test_rect_intersects() {
        let a = GridRect::new(1, 1, 2, 2);
        assert!(a.intersects(&GridRect::new(2, 2, 1, 1)));
        assert!(!a.intersects(&GridRect::new(3, 1, 1, 1)));
        assert!(!a.intersects(&GridRect::new(1, 3, 5, 5)));
        assert!(!a.intersects(&GridRect::new(1, 1, 0, 3)));
    }

    #[test]
    fn test_rect_contains_rect() {
        let outer = GridRect::new(3, 1, 2, 2);
        assert!(outer.contains_rect(&GridRect::new(3, 1, 1, 1)));
        assert!(outer.contains_rect(&outer));
        assert!(!outer.contains_rect(&GridRect::new(4, 2, 2, 1)));
    }

    #[test]
    fn test_rect_empty_has_no_cells() {
        let r = GridRect::new(4, 4, -2, 3);
        assert!(r.is_empty());
        assert_eq!(r.area(), 0);
        assert_eq!(r.cells().count(), 0);
        assert!(!r.contains_cell(4, 4));
    }

    #[test]
    fn test_rect_translate() {
        let r = GridRect::new(2, 3, 1, 2).translate(GridDelta::new(-1, 2));
        assert_eq!(r, GridRect::new(1, 5, 1, 2));
    }

    #[test]
    fn test_rect_display() {
        assert_eq!(GridRect::new(3, 1, 2, 1).to_string(), "(3, 1) 2x1");
        assert_eq!(GridSize::new(10, 6).to_string(), "10x6");
    }
}
