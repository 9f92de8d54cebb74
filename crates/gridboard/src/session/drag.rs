//! Drag gesture.

use super::{
    commit, revert, FrameRequest, FrameThrottle, GestureEnd, Preview, RevertReason, SessionLease,
    SessionObserver,
};
use gridboard_core::{
    Board, GridDelta, GridSize, Item, ItemId, Placement, Point, SessionConfig, Size,
};
use gridboard_layout::{GridOccupancy, MoveOutcome, PlacementResolver};

/// Last evaluation and what it was computed from.
#[derive(Debug, Clone)]
struct Evaluation {
    source: Item,
    target: (i32, i32),
    revision: u64,
    outcome: MoveOutcome,
}

/// An in-progress drag of one item.
///
/// Evaluations never touch the board; the host renders [`DragSession::preview`]
/// until release.
#[derive(Debug)]
pub struct DragSession {
    lease: SessionLease,
    start: Item,
    origin: Point,
    cell: Size,
    config: SessionConfig,
    throttle: FrameThrottle<Point>,
    last_pointer: Option<Point>,
    evaluation: Option<Evaluation>,
    preview: Option<Preview>,
}

impl DragSession {
    pub(super) fn new(
        lease: SessionLease,
        start: Item,
        origin: Point,
        cell: Size,
        config: SessionConfig,
    ) -> Self {
        Self {
            lease,
            start,
            origin,
            cell,
            config,
            throttle: FrameThrottle::new(),
            last_pointer: None,
            evaluation: None,
            preview: None,
        }
    }

    /// Item being dragged.
    #[must_use]
    pub fn item(&self) -> ItemId {
        self.lease.item()
    }

    /// The item as it was at pointer-down.
    #[must_use]
    pub fn start(&self) -> &Item {
        &self.start
    }

    /// Latest preview, if a frame has run.
    #[must_use]
    pub fn preview(&self) -> Option<&Preview> {
        self.preview.as_ref()
    }

    /// Latest outcome, if a frame has run.
    #[must_use]
    pub fn outcome(&self) -> Option<&MoveOutcome> {
        self.evaluation.as_ref().map(|e| &e.outcome)
    }

    /// Record a pointer position. Schedule a frame when asked to.
    pub fn pointer_move(&mut self, pointer: Point) -> FrameRequest {
        self.last_pointer = Some(pointer);
        let request = self.throttle.push(pointer);
        if request == FrameRequest::Coalesced {
            tracing::trace!(item = %self.item(), "pointer move coalesced");
        }
        request
    }

    /// Frame callback: evaluate the newest pointer position against `board`.
    ///
    /// Returns the preview when a new evaluation ran.
    pub fn on_frame(
        &mut self,
        board: &Board,
        observer: &mut impl SessionObserver,
    ) -> Option<&Preview> {
        let pointer = self.throttle.take()?;
        if self.evaluate(board, pointer) {
            if let Some(preview) = &self.preview {
                observer.on_preview(preview);
            }
            self.preview.as_ref()
        } else {
            None
        }
    }

    /// Pointer-up: commit the outcome for the latest pointer position, or revert.
    ///
    /// A pending pointer move is evaluated first, and so is an evaluation made
    /// against an older board revision.
    pub fn release(mut self, board: &mut Board, observer: &mut impl SessionObserver) -> GestureEnd {
        let id = self.item();
        let pending = self.throttle.take();
        let stale = self
            .evaluation
            .as_ref()
            .is_some_and(|e| e.revision != board.revision());
        if let Some(pointer) = pending.or(if stale { self.last_pointer } else { None }) {
            self.evaluate(board, pointer);
        }

        let Some(evaluation) = self.evaluation.take() else {
            return revert(id, RevertReason::Unchanged, observer);
        };
        if let Some(reason) = evaluation.outcome.reason() {
            return revert(id, RevertReason::Rejected(reason), observer);
        }

        let placements = evaluation.outcome.placements(&evaluation.source);
        if placements.iter().all(|p| is_in_place(board, p)) {
            return revert(id, RevertReason::Unchanged, observer);
        }
        commit(board, id, placements, observer)
    }

    /// Abandon the gesture; the board is untouched.
    pub fn cancel(mut self, observer: &mut impl SessionObserver) -> GestureEnd {
        self.throttle.cancel();
        revert(self.item(), RevertReason::Cancelled, observer)
    }

    /// Evaluate `pointer`; false if nothing changed since the last evaluation.
    fn evaluate(&mut self, board: &Board, pointer: Point) -> bool {
        let source = board.get(self.item()).copied().unwrap_or(self.start);
        let delta = GridDelta::from_pixels(pointer - self.origin, self.cell);
        let mut target = (
            self.start.x.saturating_add(delta.dx),
            self.start.y.saturating_add(delta.dy),
        );
        if self.config.clamp_to_grid {
            target = clamp_origin(board.grid(), &source, target);
        }

        if let Some(previous) = &self.evaluation {
            if previous.target == target
                && previous.revision == board.revision()
                && previous.source == source
            {
                return false;
            }
        }

        let occupancy = GridOccupancy::from_board(board);
        let outcome = PlacementResolver::new(&occupancy).evaluate_move(&source, target.0, target.1);

        let (x, y) = outcome.target().unwrap_or(target);
        self.preview = Some(Preview {
            item: source.id,
            rect: source.rect().at(x, y),
            possible: outcome.is_possible(),
            displaced: outcome.displaced().iter().map(|d| d.placement()).collect(),
        });
        self.evaluation = Some(Evaluation {
            source,
            target,
            revision: board.revision(),
            outcome,
        });
        true
    }
}

/// Pin an origin so `item` stays inside `grid`.
fn clamp_origin(grid: GridSize, item: &Item, (x, y): (i32, i32)) -> (i32, i32) {
    let max_x = grid.cols.saturating_sub(item.cols).saturating_add(1).max(1);
    let max_y = grid.rows.saturating_sub(item.rows).saturating_add(1).max(1);
    (x.clamp(1, max_x), y.clamp(1, max_y))
}

fn is_in_place(board: &Board, placement: &Placement) -> bool {
    board.get(placement.id).is_some_and(|item| item.rect() == placement.rect)
}
