//! Pointer gestures over a board.
//!
//! A [`SessionFactory`] hands out one [`DragSession`] or [`ResizeSession`] at a
//! time. The host feeds it pointer positions, runs [`DragSession::on_frame`] when
//! the throttle asks for a frame, and finally calls `release` (commit or revert)
//! or `cancel`. The board is written at most once per gesture, at release, as a
//! single validated batch.
//!
//! ```
//! use gridboard::session::{FrameRequest, GestureEnd, SessionFactory};
//! use gridboard::{Board, GridSize, Item, ItemId, Point, SessionConfig, Size};
//!
//! let mut board = Board::new(
//!     GridSize::new(10, 6),
//!     [Item::new(ItemId(1), 1, 1, 2, 2)],
//! )
//! .unwrap();
//! let factory = SessionFactory::new(SessionConfig::default());
//!
//! // 1000x600 container: cells are 100x100 pixels.
//! let mut drag = factory
//!     .begin_drag(&board, ItemId(1), Point::new(50.0, 50.0), Size::new(1000.0, 600.0))
//!     .unwrap();
//! assert_eq!(drag.pointer_move(Point::new(250.0, 150.0)), FrameRequest::Schedule);
//! drag.on_frame(&board, &mut ());
//!
//! let end = drag.release(&mut board, &mut ());
//! assert!(matches!(end, GestureEnd::Committed { .. }));
//! assert_eq!(board.get(ItemId(1)).map(|i| (i.x, i.y)), Some((3, 2)));
//! ```

mod drag;
mod lock;
mod resize;
mod throttle;

pub use drag::DragSession;
pub use lock::{SessionLease, SessionLock};
pub use resize::ResizeSession;
pub use throttle::{FrameRequest, FrameThrottle};

use gridboard_core::{
    Board, GridRect, Item, ItemId, LayoutError, Placement, Point, SessionConfig, Size,
};
use gridboard_layout::RejectReason;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Reasons a session cannot start.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SessionError {
    /// Another gesture is in progress.
    #[error("a session for item {active} is already in progress")]
    Busy {
        /// Item being manipulated
        active: ItemId,
    },

    /// The item is not on the board.
    #[error("unknown item {0}")]
    UnknownItem(ItemId),

    /// The container cannot be divided into cells.
    #[error("container {width}x{height} cannot host a grid")]
    InvalidContainer {
        /// Container width in pixels
        width: f32,
        /// Container height in pixels
        height: f32,
    },
}

/// Result alias for session setup.
pub type Result<T> = std::result::Result<T, SessionError>;

/// Proposed state for the rendering layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Preview {
    /// Item being manipulated
    pub item: ItemId,
    /// Its proposed footprint
    pub rect: GridRect,
    /// False if releasing now would revert
    pub possible: bool,
    /// Items a swap would relocate, at their proposed spots
    pub displaced: Vec<Placement>,
}

/// Why a gesture ended without writing to the board.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RevertReason {
    /// The last evaluated placement was illegal.
    Rejected(RejectReason),
    /// Nothing would change.
    Unchanged,
    /// The gesture was cancelled.
    Cancelled,
    /// The board changed under the gesture and the batch no longer validates.
    Stale(LayoutError),
}

/// How a gesture ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GestureEnd {
    /// The batch was written.
    Committed {
        /// Placements written, mover first
        placements: Vec<Placement>,
        /// Board revision after the write
        revision: u64,
    },
    /// The board was left as it was before the gesture.
    Reverted {
        /// Item that was being manipulated
        item: ItemId,
        /// Why
        reason: RevertReason,
    },
}

impl GestureEnd {
    /// True if the board was written.
    #[must_use]
    pub fn is_committed(&self) -> bool {
        matches!(self, Self::Committed { .. })
    }
}

/// Receives session events. All methods default to no-ops.
pub trait SessionObserver {
    /// A frame produced a new preview.
    fn on_preview(&mut self, _preview: &Preview) {}

    /// A batch was committed.
    fn on_commit(&mut self, _placements: &[Placement]) {}

    /// The gesture ended without a write; render `item` at its original spot.
    fn on_revert(&mut self, _item: ItemId, _reason: &RevertReason) {}
}

impl SessionObserver for () {}

/// Starts sessions and enforces that at most one is active.
#[derive(Debug, Clone, Default)]
pub struct SessionFactory {
    lock: SessionLock,
    config: SessionConfig,
}

impl SessionFactory {
    /// Factory with its own lock.
    #[must_use]
    pub fn new(config: SessionConfig) -> Self {
        Self {
            lock: SessionLock::new(),
            config,
        }
    }

    /// Factory sharing `lock` with others, so sessions across several boards
    /// exclude each other.
    #[must_use]
    pub fn with_lock(config: SessionConfig, lock: SessionLock) -> Self {
        Self { lock, config }
    }

    /// Session settings.
    #[must_use]
    pub fn config(&self) -> SessionConfig {
        self.config
    }

    /// The lock sessions from this factory take.
    #[must_use]
    pub fn lock(&self) -> &SessionLock {
        &self.lock
    }

    /// True while a session is in progress.
    #[must_use]
    pub fn is_busy(&self) -> bool {
        self.lock.is_held()
    }

    /// Start dragging `id`. `pointer` is the pointer-down position and `container`
    /// the pixel extent of the whole grid.
    pub fn begin_drag(
        &self,
        board: &Board,
        id: ItemId,
        pointer: Point,
        container: Size,
    ) -> Result<DragSession> {
        let (item, cell, lease) = self.begin(board, id, container)?;
        tracing::debug!(item = %id, x = item.x, y = item.y, "drag session started");
        Ok(DragSession::new(lease, item, pointer, cell, self.config))
    }

    /// Start resizing `id` from its bottom-right handle.
    pub fn begin_resize(
        &self,
        board: &Board,
        id: ItemId,
        pointer: Point,
        container: Size,
    ) -> Result<ResizeSession> {
        let (item, cell, lease) = self.begin(board, id, container)?;
        tracing::debug!(
            item = %id,
            cols = item.cols,
            rows = item.rows,
            "resize session started"
        );
        Ok(ResizeSession::new(lease, item, pointer, cell))
    }

    fn begin(
        &self,
        board: &Board,
        id: ItemId,
        container: Size,
    ) -> Result<(Item, Size, SessionLease)> {
        if let Some(active) = self.lock.active() {
            tracing::debug!(item = %id, active = %active, "pointer-down ignored, session busy");
            return Err(SessionError::Busy { active });
        }
        let item = *board.get(id).ok_or(SessionError::UnknownItem(id))?;
        if !container.is_drawable() {
            return Err(SessionError::InvalidContainer {
                width: container.width,
                height: container.height,
            });
        }
        let cell = board.grid().cell_size(container);
        let lease = self
            .lock
            .try_acquire(id)
            .ok_or(SessionError::Busy { active: id })?;
        Ok((item, cell, lease))
    }
}

/// Write `placements` and notify `observer`, converting a failed write into a
/// stale revert.
fn commit(
    board: &mut Board,
    item: ItemId,
    placements: Vec<Placement>,
    observer: &mut impl SessionObserver,
) -> GestureEnd {
    match board.apply(&placements) {
        Ok(revision) => {
            tracing::debug!(item = %item, placed = placements.len(), revision, "gesture committed");
            observer.on_commit(&placements);
            GestureEnd::Committed {
                placements,
                revision,
            }
        }
        Err(err) => {
            tracing::warn!(
                item = %item,
                error = %err,
                "commit rejected, board changed under gesture"
            );
            revert(item, RevertReason::Stale(err), observer)
        }
    }
}

fn revert(item: ItemId, reason: RevertReason, observer: &mut impl SessionObserver) -> GestureEnd {
    tracing::debug!(item = %item, reason = ?reason, "gesture reverted");
    observer.on_revert(item, &reason);
    GestureEnd::Reverted { item, reason }
}
