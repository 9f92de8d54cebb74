//! Resize gesture.

use super::{
    commit, revert, FrameRequest, FrameThrottle, GestureEnd, Preview, RevertReason, SessionLease,
    SessionObserver,
};
use gridboard_core::{Board, GridDelta, Item, ItemId, Placement, Point, Size};
use gridboard_layout::{GridOccupancy, PlacementResolver};

/// An in-progress resize of one item.
///
/// The origin stays fixed; pointer travel grows or shrinks the extent. A
/// candidate size that collides is skipped, so the preview holds the last size
/// that fit.
#[derive(Debug)]
pub struct ResizeSession {
    lease: SessionLease,
    start: Item,
    origin: Point,
    cell: Size,
    throttle: FrameThrottle<Point>,
    last_pointer: Option<Point>,
    requested: Option<(i32, i32)>,
    evaluated_at: Option<u64>,
    candidate: Option<(i32, i32)>,
    preview: Option<Preview>,
}

impl ResizeSession {
    pub(super) fn new(lease: SessionLease, start: Item, origin: Point, cell: Size) -> Self {
        Self {
            lease,
            start,
            origin,
            cell,
            throttle: FrameThrottle::new(),
            last_pointer: None,
            requested: None,
            evaluated_at: None,
            candidate: None,
            preview: None,
        }
    }

    /// Item being resized.
    #[must_use]
    pub fn item(&self) -> ItemId {
        self.lease.item()
    }

    /// The item as it was at pointer-down.
    #[must_use]
    pub fn start(&self) -> &Item {
        &self.start
    }

    /// Last size that fit, as `(cols, rows)`.
    #[must_use]
    pub fn candidate(&self) -> Option<(i32, i32)> {
        self.candidate
    }

    /// Preview of the last size that fit.
    #[must_use]
    pub fn preview(&self) -> Option<&Preview> {
        self.preview.as_ref()
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
    /// Returns the preview when the candidate size changed.
    pub fn on_frame(
        &mut self,
        board: &Board,
        observer: &mut impl SessionObserver,
    ) -> Option<&Preview> {
        let pointer = self.throttle.take()?;
        if !self.evaluate(board, pointer) {
            return None;
        }
        if let Some(preview) = &self.preview {
            observer.on_preview(preview);
        }
        self.preview.as_ref()
    }

    /// Pointer-up: commit the last size that fit, or revert.
    pub fn release(mut self, board: &mut Board, observer: &mut impl SessionObserver) -> GestureEnd {
        let id = self.item();
        let pending = self.throttle.take();
        let stale = self.evaluated_at.is_some_and(|r| r != board.revision());
        if let Some(pointer) = pending.or(if stale { self.last_pointer } else { None }) {
            self.evaluate(board, pointer);
        }

        let Some((cols, rows)) = self.candidate else {
            return revert(id, RevertReason::Unchanged, observer);
        };
        let rect = board.get(id).map_or(self.start.rect(), Item::rect);
        if (rect.cols, rect.rows) == (cols, rows) {
            return revert(id, RevertReason::Unchanged, observer);
        }
        commit(board, id, vec![Placement::new(id, rect.with_size(cols, rows))], observer)
    }

    /// Abandon the gesture; the board is untouched.
    pub fn cancel(mut self, observer: &mut impl SessionObserver) -> GestureEnd {
        self.throttle.cancel();
        revert(self.item(), RevertReason::Cancelled, observer)
    }

    /// Evaluate `pointer`; false unless the candidate size changed.
    fn evaluate(&mut self, board: &Board, pointer: Point) -> bool {
        let item = board.get(self.item()).copied().unwrap_or(self.start);
        let delta = GridDelta::from_pixels(pointer - self.origin, self.cell);
        let requested = (
            self.start.cols.saturating_add(delta.dx),
            self.start.rows.saturating_add(delta.dy),
        );
        if self.requested == Some(requested) && self.evaluated_at == Some(board.revision()) {
            return false;
        }
        self.requested = Some(requested);
        self.evaluated_at = Some(board.revision());

        let occupancy = GridOccupancy::from_board(board);
        let resolver = PlacementResolver::new(&occupancy);
        let size = resolver.clamp_resize(&item, requested.0, requested.1);
        if !resolver.evaluate_resize(&item, requested.0, requested.1)
            || self.candidate == Some(size)
        {
            return false;
        }

        self.candidate = Some(size);
        self.preview = Some(Preview {
            item: item.id,
            rect: item.rect().with_size(size.0, size.1),
            possible: true,
            displaced: Vec::new(),
        });
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::SessionFactory;
    use gridboard_core::{GridRect, GridSize};

    const CONTAINER: Size = Size::new(1000.0, 600.0);

    fn item(id: u64, x: i32, y: i32, cols: i32, rows: i32) -> Item {
        Item::new(ItemId(id), x, y, cols, rows)
    }

    fn board(items: &[Item]) -> Board {
        Board::new(GridSize::new(10, 6), items.iter().copied()).unwrap()
    }

    fn resize(factory: &SessionFactory, board: &Board, id: u64) -> ResizeSession {
        factory
            .begin_resize(board, ItemId(id), Point::ORIGIN, CONTAINER)
            .unwrap()
    }

    #[test]
    fn test_grow_into_free_space() {
        let mut board = board(&[item(1, 2, 2, 1, 1)]);
        let factory = SessionFactory::default();
        let mut session = resize(&factory, &board, 1);

        session.pointer_move(Point::new(200.0, 100.0));
        let preview = session.on_frame(&board, &mut ()).unwrap();
        assert_eq!(preview.rect, GridRect::new(2, 2, 3, 2));

        let end = session.release(&mut board, &mut ());
        assert!(end.is_committed());
        assert_eq!(board.get(ItemId(1)).map(Item::rect), Some(GridRect::new(2, 2, 3, 2)));
    }

    #[test]
    fn test_blocked_size_keeps_last_free_candidate() {
        let mut board = board(&[item(1, 1, 1, 1, 1), item(2, 4, 1, 1, 1)]);
        let factory = SessionFactory::default();
        let mut session = resize(&factory, &board, 1);

        session.pointer_move(Point::new(100.0, 0.0));
        session.on_frame(&board, &mut ());
        assert_eq!(session.candidate(), Some((2, 1)));

        // Three columns more would cover B.
        session.pointer_move(Point::new(300.0, 0.0));
        assert!(session.on_frame(&board, &mut ()).is_none());
        assert_eq!(session.candidate(), Some((2, 1)));

        session.release(&mut board, &mut ());
        assert_eq!(board.get(ItemId(1)).map(Item::rect), Some(GridRect::new(1, 1, 2, 1)));
    }

    #[test]
    fn test_growth_clamped_at_grid_edge() {
        let board = board(&[item(1, 9, 5, 1, 1)]);
        let factory = SessionFactory::default();
        let mut session = resize(&factory, &board, 1);

        session.pointer_move(Point::new(900.0, 900.0));
        let preview = session.on_frame(&board, &mut ()).unwrap();
        assert_eq!(preview.rect, GridRect::new(9, 5, 2, 2));
    }

    #[test]
    fn test_shrink_floors_at_one_cell() {
        let mut board = board(&[item(1, 3, 3, 3, 3)]);
        let factory = SessionFactory::default();
        let mut session = resize(&factory, &board, 1);

        session.pointer_move(Point::new(-900.0, -900.0));
        session.release(&mut board, &mut ());
        assert_eq!(board.get(ItemId(1)).map(Item::rect), Some(GridRect::new(3, 3, 1, 1)));
    }

    #[test]
    fn test_never_fitting_reverts() {
        let mut board = board(&[item(1, 1, 1, 1, 1), item(2, 2, 1, 1, 1)]);
        let factory = SessionFactory::default();
        let mut session = resize(&factory, &board, 1);

        session.pointer_move(Point::new(100.0, 0.0));
        let end = session.release(&mut board, &mut ());
        assert!(matches!(
            end,
            GestureEnd::Reverted {
                reason: RevertReason::Unchanged,
                ..
            }
        ));
        assert_eq!(board.revision(), 0);
    }

    #[test]
    fn test_cancel_unlocks() {
        let board = board(&[item(1, 1, 1, 1, 1)]);
        let factory = SessionFactory::default();
        let mut session = resize(&factory, &board, 1);
        session.pointer_move(Point::new(100.0, 100.0));
        session.on_frame(&board, &mut ());
        assert!(matches!(
            session.cancel(&mut ()),
            GestureEnd::Reverted {
                reason: RevertReason::Cancelled,
                ..
            }
        ));
        assert!(!factory.is_busy());
    }
}
