//! Layout fixtures.
//!
//! A fixture is a grid plus a list of items. Write it as TOML:
//!
//! ```toml
//! columns = 10
//! rows = 6
//!
//! [[items]]
//! id = 1
//! x = 1
//! y = 1
//! cols = 2
//! rows = 2
//! ```
//!
//! or as an ASCII picture, one character per cell. `.` is empty; any other
//! character labels an item, and each label must fill a rectangle. Ids follow
//! the order labels first appear in (row-major), starting at 1:
//!
//! ```text
//! AA..B
//! AA...
//! ```

use gridboard_core::{Board, GridSize, Item, ItemId, LayoutError};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised while loading a fixture.
#[derive(Debug, Error)]
pub enum FixtureError {
    /// TOML syntax or schema error.
    #[error("fixture TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    /// The picture is malformed.
    #[error("fixture picture error: {0}")]
    Picture(String),

    /// The described layout breaks the board invariant.
    #[error("fixture layout error: {0}")]
    Layout(#[from] LayoutError),
}

/// A grid and the items placed on it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutFixture {
    /// Number of grid columns
    pub columns: i32,
    /// Number of grid rows
    pub rows: i32,
    /// Items in list order
    pub items: Vec<Item>,
    #[serde(skip)]
    labels: Vec<char>,
}

impl Default for LayoutFixture {
    fn default() -> Self {
        let grid = GridSize::default();
        Self {
            columns: grid.cols,
            rows: grid.rows,
            items: Vec::new(),
            labels: Vec::new(),
        }
    }
}

impl LayoutFixture {
    /// Fixture with the given grid and items.
    #[must_use]
    pub fn new(grid: GridSize, items: impl IntoIterator<Item = Item>) -> Self {
        Self {
            columns: grid.cols,
            rows: grid.rows,
            items: items.into_iter().collect(),
            labels: Vec::new(),
        }
    }

    /// Parse a TOML fixture. The layout itself is checked by [`Self::board`].
    pub fn from_toml_str(source: &str) -> Result<Self, FixtureError> {
        Ok(toml::from_str(source)?)
    }

    /// Parse an ASCII picture. Leading and trailing whitespace on each line and
    /// blank lines are ignored; the grid takes the picture's dimensions.
    pub fn from_ascii(picture: &str) -> Result<Self, FixtureError> {
        let lines: Vec<Vec<char>> = picture
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(|line| line.chars().collect())
            .collect();

        let width = lines.first().map_or(0, Vec::len);
        if width == 0 {
            return Err(FixtureError::Picture("picture is empty".to_string()));
        }
        if let Some((row, line)) = lines.iter().enumerate().find(|(_, l)| l.len() != width) {
            return Err(FixtureError::Picture(format!(
                "row {} has {} cells, expected {width}",
                row + 1,
                line.len()
            )));
        }

        // label -> (min_x, min_y, max_x, max_y, cell count)
        let mut labels: Vec<char> = Vec::new();
        let mut bounds: Vec<(i32, i32, i32, i32, i64)> = Vec::new();
        for (row, line) in lines.iter().enumerate() {
            for (col, &label) in line.iter().enumerate() {
                if label == '.' {
                    continue;
                }
                let (x, y) = (col as i32 + 1, row as i32 + 1);
                if let Some(i) = labels.iter().position(|&l| l == label) {
                    let b = &mut bounds[i];
                    *b = (b.0.min(x), b.1.min(y), b.2.max(x), b.3.max(y), b.4 + 1);
                } else {
                    labels.push(label);
                    bounds.push((x, y, x, y, 1));
                }
            }
        }

        let mut items = Vec::with_capacity(labels.len());
        for (i, (&label, &(x0, y0, x1, y1, count))) in labels.iter().zip(&bounds).enumerate() {
            let (cols, rows) = (x1 - x0 + 1, y1 - y0 + 1);
            if i64::from(cols) * i64::from(rows) != count {
                return Err(FixtureError::Picture(format!(
                    "label '{label}' does not fill a rectangle"
                )));
            }
            items.push(Item::new(ItemId(i as u64 + 1), x0, y0, cols, rows));
        }

        Ok(Self {
            columns: width as i32,
            rows: lines.len() as i32,
            items,
            labels,
        })
    }

    /// Grid extent.
    #[must_use]
    pub const fn grid(&self) -> GridSize {
        GridSize::new(self.columns, self.rows)
    }

    /// Item by id.
    #[must_use]
    pub fn item(&self, id: ItemId) -> Option<&Item> {
        self.items.iter().find(|item| item.id == id)
    }

    /// Id assigned to a picture label.
    #[must_use]
    pub fn id(&self, label: char) -> Option<ItemId> {
        self.labels
            .iter()
            .position(|&l| l == label)
            .map(|i| ItemId(i as u64 + 1))
    }

    /// Item drawn with `label`.
    #[must_use]
    pub fn labelled(&self, label: char) -> Option<&Item> {
        self.id(label).and_then(|id| self.item(id))
    }

    /// Build a validated board.
    pub fn board(&self) -> Result<Board, FixtureError> {
        Ok(Board::new(self.grid(), self.items.iter().copied())?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gridboard_core::GridRect;

    #[test]
    fn test_from_toml() {
        let fixture = LayoutFixture::from_toml_str(
            r"
            columns = 8
            rows = 4

            [[items]]
            id = 1
            x = 1
            y = 1
            cols = 2
            rows = 2

            [[items]]
            id = 7
            x = 5
            y = 3
            cols = 1
            rows = 1
            ",
        )
        .unwrap();
        assert_eq!(fixture.grid(), GridSize::new(8, 4));
        assert_eq!(fixture.items.len(), 2);
        assert_eq!(
            fixture.item(ItemId(7)).map(Item::rect),
            Some(GridRect::new(5, 3, 1, 1))
        );
        assert_eq!(fixture.board().unwrap().len(), 2);
    }

    #[test]
    fn test_from_toml_defaults_grid() {
        let fixture = LayoutFixture::from_toml_str("").unwrap();
        assert_eq!(fixture.grid(), GridSize::new(10, 6));
        assert!(fixture.items.is_empty());
    }

    #[test]
    fn test_from_toml_syntax_error() {
        assert!(matches!(
            LayoutFixture::from_toml_str("columns = ="),
            Err(FixtureError::Toml(_))
        ));
    }

    #[test]
    fn test_board_rejects_overlap() {
        let fixture = LayoutFixture::new(
            GridSize::new(4, 4),
            [
                Item::new(ItemId(1), 1, 1, 2, 2),
                Item::new(ItemId(2), 2, 2, 1, 1),
            ],
        );
        let err = fixture.board().unwrap_err();
        assert!(matches!(err, FixtureError::Layout(LayoutError::Overlap { .. })));
    }

    #[test]
    fn test_from_ascii() {
        let fixture = LayoutFixture::from_ascii(
            "
            AA..B
            AA...
            ..CCC
            ",
        )
        .unwrap();
        assert_eq!(fixture.grid(), GridSize::new(5, 3));
        assert_eq!(fixture.id('A'), Some(ItemId(1)));
        assert_eq!(fixture.id('B'), Some(ItemId(2)));
        assert_eq!(fixture.id('C'), Some(ItemId(3)));
        assert_eq!(fixture.id('Z'), None);
        assert_eq!(
            fixture.labelled('A').map(Item::rect),
            Some(GridRect::new(1, 1, 2, 2))
        );
        assert_eq!(
            fixture.labelled('C').map(Item::rect),
            Some(GridRect::new(3, 3, 3, 1))
        );
        assert!(fixture.board().is_ok());
    }

    #[test]
    fn test_from_ascii_rejects_ragged_rows() {
        let err = LayoutFixture::from_ascii("AA.\nA.").unwrap_err();
        assert!(err.to_string().contains("row 2 has 2 cells, expected 3"));
    }

    #[test]
    fn test_from_ascii_rejects_non_rectangles() {
        let err = LayoutFixture::from_ascii("AA\nA.").unwrap_err();
        assert!(err.to_string().contains("label 'A'"));
    }

    #[test]
    fn test_from_ascii_rejects_empty() {
        assert!(matches!(
            LayoutFixture::from_ascii("  \n "),
            Err(FixtureError::Picture(_))
        ));
    }
}
