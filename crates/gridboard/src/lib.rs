//! Gridboard: grid placement and collision engine.
//!
//! Items are axis-aligned rectangles on a fixed grid of 1-indexed cells. The
//! engine decides whether a proposed move is free, a swap, or rejected, and
//! drives pointer gestures that preview placements every frame and commit them
//! in one validated batch.
//!
//! - [`Board`]: the live item list and its at-rest invariant.
//! - [`layout`]: occupancy snapshots and the placement resolver.
//! - [`session`]: drag and resize gestures.
//!
//! ```
//! use gridboard::{Board, GridConfig, GridOccupancy, Item, ItemId, MoveKind, PlacementResolver};
//!
//! let config = GridConfig::from_toml_str("columns = 6\nrows = 4").unwrap();
//! let board = Board::new(
//!     config.grid_size(),
//!     [
//!         Item::new(ItemId(1), 1, 1, 2, 2),
//!         Item::new(ItemId(2), 3, 1, 1, 1),
//!     ],
//! )
//! .unwrap();
//!
//! let occupancy = GridOccupancy::from_board(&board);
//! let source = board.get(ItemId(1)).unwrap();
//! let outcome = PlacementResolver::new(&occupancy).evaluate_move(source, 3, 1);
//! assert_eq!(outcome.kind(), Some(MoveKind::Swap));
//! ```

#![allow(
    clippy::module_name_repetitions,
    clippy::missing_errors_doc,
    clippy::must_use_candidate,
    clippy::return_self_not_must_use
)]

pub use gridboard_core::*;
pub use gridboard_layout as layout;
pub use gridboard_layout::{
    Displacement, GridOccupancy, MoveKind, MoveOutcome, PlacementResolver, RejectReason,
};

pub mod session;

pub use session::{
    DragSession, GestureEnd, Preview, ResizeSession, RevertReason, SessionError, SessionFactory,
    SessionObserver,
};
