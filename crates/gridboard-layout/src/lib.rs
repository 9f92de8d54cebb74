#![allow(clippy::missing_const_for_fn)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::doc_markdown)]
//! Collision engine for gridboard.
//!
//! - [`GridOccupancy`]: a cell-ownership snapshot of a board, answering "who
//!   covers this cell" and "is this area free" in constant time per cell.
//! - [`PlacementResolver`]: decides whether a move is free, a swap, or rejected,
//!   and whether a resize fits.
//!
//! Both are pure: they read a snapshot and never mutate a [`Board`](gridboard_core::Board).
//! Committing an accepted outcome is the caller's job.

mod occupancy;
mod resolver;

pub use occupancy::{Exclusion, GridOccupancy};
pub use resolver::{Displacement, MoveKind, MoveOutcome, PlacementResolver, RejectReason};
