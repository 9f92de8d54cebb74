//! Grid and session configuration.
//!
//! Configuration can be written as TOML or YAML:
//!
//! ```toml
//! columns = 12
//! rows = 8
//!
//! [session]
//! clamp_to_grid = true
//! ```
//!
//! Missing keys fall back to the defaults (10 x 6 grid, no clamping).

use crate::error::ConfigError;
use crate::geometry::GridSize;
use serde::{Deserialize, Serialize};

/// Behaviour knobs for drag and resize sessions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Pin the pointer-implied drag target inside the grid before evaluating it.
    ///
    /// When `false`, a drag past the edge is evaluated as-is and rejected as out of
    /// bounds.
    pub clamp_to_grid: bool,
}

/// Top-level configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridConfig {
    /// Number of grid columns
    pub columns: i32,
    /// Number of grid rows
    pub rows: i32,
    /// Session behaviour
    pub session: SessionConfig,
}

impl Default for GridConfig {
    fn default() -> Self {
        let grid = GridSize::default();
        Self {
            columns: grid.cols,
            rows: grid.rows,
            session: SessionConfig::default(),
        }
    }
}

impl GridConfig {
    /// Parse and validate a TOML document.
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    /// Parse and validate a YAML document.
    pub fn from_yaml_str(source: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yaml_ng::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject non-positive grid dimensions.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.columns <= 0 {
            return Err(ConfigError::Invalid(format!(
                "columns must be positive, got {}",
                self.columns
            )));
        }
        if self.rows <= 0 {
            return Err(ConfigError::Invalid(format!(
                "rows must be positive, got {}",
                self.rows
            )));
        }
        Ok(())
    }

    /// Grid extent described by this configuration.
    #[must_use]
    pub const fn grid_size(&self) -> GridSize {
        GridSize::new(self.columns, self.rows)
    }

    /// Session settings.
    #[must_use]
    pub const fn session(&self) -> SessionConfig {
        self.session
    }
}
