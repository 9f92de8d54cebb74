//! Error types for gridboard-core.

use crate::geometry::{GridRect, GridSize};
use crate::item::ItemId;
use thiserror::Error;

/// Violations of the at-rest layout invariant, or malformed item lists.
///
/// Illegal *proposed* placements are not errors; they are reported as rejected
/// outcomes by the resolver. This type covers state that must never be committed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LayoutError {
    /// Grid dimensions must be positive.
    #[error("invalid grid size {0}")]
    InvalidGrid(GridSize),

    /// Two items share an id.
    #[error("duplicate item id {0}")]
    DuplicateId(ItemId),

    /// An id that is not on the board.
    #[error("unknown item {0}")]
    UnknownItem(ItemId),

    /// An item with a non-positive extent.
    #[error("item {id} has invalid extent {rect}")]
    InvalidExtent {
        /// Offending item
        id: ItemId,
        /// Its footprint
        rect: GridRect,
    },

    /// An item that leaves the grid.
    #[error("item {id} at {rect} lies outside the {grid} grid")]
    OutOfBounds {
        /// Offending item
        id: ItemId,
        /// Its footprint
        rect: GridRect,
        /// Grid it was checked against
        grid: GridSize,
    },

    /// Two items cover a common cell.
    #[error("items {first} and {second} overlap")]
    Overlap {
        /// Earlier item in list order
        first: ItemId,
        /// Later item in list order
        second: ItemId,
    },
}

/// Errors raised while loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// TOML syntax or schema error.
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    /// YAML syntax or schema error.
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml_ng::Error),

    /// Parsed but semantically invalid.
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Result alias for layout operations.
pub type Result<T> = std::result::Result<T, LayoutError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout_error_out_of_bounds_message() {
        let err = LayoutError::OutOfBounds {
            id: ItemId(3),
            rect: GridRect::new(10, 1, 2, 1),
            grid: GridSize::new(10, 6),
        };
        assert_eq!(
            err.to_string(),
            "item #3 at (10, 1) 2x1 lies outside the 10x6 grid"
        );
    }

    #[test]
    fn test_layout_error_overlap_message() {
        let err = LayoutError::Overlap {
            first: ItemId(1),
            second: ItemId(2),
        };
        assert_eq!(err.to_string(), "items #1 and #2 overlap");
    }

    #[test]
    fn test_layout_error_simple_variants() {
        assert_eq!(
            LayoutError::InvalidGrid(GridSize::new(0, 6)).to_string(),
            "invalid grid size 0x6"
        );
        assert_eq!(
            LayoutError::DuplicateId(ItemId(9)).to_string(),
            "duplicate item id #9"
        );
        assert_eq!(
            LayoutError::UnknownItem(ItemId(9)).to_string(),
            "unknown item #9"
        );
    }

    #[test]
    fn test_config_error_invalid() {
        let err = ConfigError::Invalid("columns must be positive".to_string());
        assert!(err.to_string().contains("Invalid configuration"));
        assert!(err.to_string().contains("columns must be positive"));
    }

    #[test]
    fn test_config_error_from_toml() {
        let toml_err = toml::from_str::<toml::Value>("columns = = 3").unwrap_err();
        let err: ConfigError = toml_err.into();
        assert!(matches!(err, ConfigError::Toml(_)));
        assert!(err.to_string().starts_with("TOML error"));
    }
}
