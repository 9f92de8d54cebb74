//! Core types for the gridboard placement engine.
//!
//! This crate provides the foundational types shared by the engine and its
//! gesture layer:
//! - Geometric primitives: [`GridRect`], [`GridSize`], [`GridDelta`], [`Point`], [`Size`]
//! - Items and placements: [`Item`], [`ItemId`], [`Placement`]
//! - The committed item list: [`Board`]
//! - Errors and configuration: [`LayoutError`], [`ConfigError`], [`GridConfig`]

mod board;
mod config;
mod error;
mod geometry;
mod item;

pub use board::{overlapping_pairs, validate_items, Board, SanitizeReport};
pub use config::{GridConfig, SessionConfig};
pub use error::{ConfigError, LayoutError, Result};
pub use geometry::{GridDelta, GridRect, GridSize, Point, Size};
pub use item::{Item, ItemId, Placement};
