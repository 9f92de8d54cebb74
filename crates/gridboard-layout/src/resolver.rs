//! Placement decisions for move and resize requests.
//!
//! [`PlacementResolver::evaluate_move`] returns one of three outcomes:
//!
//! 1. **Free move** - the target rectangle has no other occupants.
//! 2. **Swap** - the occupants can all relocate at once:
//!    - *Contained swap*: every occupant fits inside the mover's target footprint;
//!      each one lands at the same offset inside the mover's old footprint.
//!    - *Reverse clearance*: a single, larger occupant blocks a smaller mover; the
//!      occupant is shifted by the mover's own translation (shadow position) or,
//!      failing that, dropped at the mover's old origin. The mover snaps to the
//!      occupant's old origin.
//! 3. **Rejected** - out of bounds, or no swap validates.
//!
//! A displaced item never lands inside the mover's new footprint, never leaves
//! the grid, and never collides with anything outside the swap set. Swaps
//! involving only a subset of the blockers are never attempted.

use crate::occupancy::GridOccupancy;
use gridboard_core::{GridDelta, GridRect, Item, ItemId, Placement};
use serde::{Deserialize, Serialize};

/// Kind of an accepted move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MoveKind {
    /// Nothing is displaced.
    Free,
    /// One or more items trade places with the mover.
    Swap,
}

/// Why a move was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RejectReason {
    /// The mover's footprint would leave the grid.
    Bounds,
    /// Blocking items could not be relocated.
    Collision,
}

/// An item relocated by a swap, with its proposed new origin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Displacement {
    /// The item as it was before the move
    pub item: Item,
    /// Proposed left column
    #[serde(rename = "nx")]
    pub x: i32,
    /// Proposed top row
    #[serde(rename = "ny")]
    pub y: i32,
}

impl Displacement {
    /// Create a displacement of `item` to `(x, y)`.
    #[must_use]
    pub const fn new(item: Item, x: i32, y: i32) -> Self {
        Self { item, x, y }
    }

    /// Proposed footprint.
    #[must_use]
    pub const fn rect(&self) -> GridRect {
        self.item.rect().at(self.x, self.y)
    }

    /// Placement to commit.
    #[must_use]
    pub const fn placement(&self) -> Placement {
        Placement::new(self.item.id, self.rect())
    }
}

/// Result of evaluating a move.
///
/// Serializes as a flat record: `possible`, then either `type`/`targetX`/
/// `targetY`/`displaced` or `reason`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "OutcomeRecord", try_from = "OutcomeRecord")]
pub enum MoveOutcome {
    /// The move is legal.
    Accepted {
        /// Free or swap
        kind: MoveKind,
        /// Final left column of the mover
        target_x: i32,
        /// Final top row of the mover
        target_y: i32,
        /// Items relocated alongside the mover (empty for free moves)
        displaced: Vec<Displacement>,
    },
    /// The move is illegal; the caller must keep or restore the old position.
    Rejected {
        /// Why
        reason: RejectReason,
    },
}

impl MoveOutcome {
    /// Accepted free move to `(x, y)`.
    #[must_use]
    pub const fn free(target_x: i32, target_y: i32) -> Self {
        Self::Accepted {
            kind: MoveKind::Free,
            target_x,
            target_y,
            displaced: Vec::new(),
        }
    }

    /// Accepted swap.
    #[must_use]
    pub const fn swap(target_x: i32, target_y: i32, displaced: Vec<Displacement>) -> Self {
        Self::Accepted {
            kind: MoveKind::Swap,
            target_x,
            target_y,
            displaced,
        }
    }

    /// Rejected move.
    #[must_use]
    pub const fn rejected(reason: RejectReason) -> Self {
        Self::Rejected { reason }
    }

    /// True if the move is legal.
    #[must_use]
    pub const fn is_possible(&self) -> bool {
        matches!(self, Self::Accepted { .. })
    }

    /// Kind of accepted move.
    #[must_use]
    pub const fn kind(&self) -> Option<MoveKind> {
        match self {
            Self::Accepted { kind, .. } => Some(*kind),
            Self::Rejected { .. } => None,
        }
    }

    /// Rejection reason.
    #[must_use]
    pub const fn reason(&self) -> Option<RejectReason> {
        match self {
            Self::Accepted { .. } => None,
            Self::Rejected { reason } => Some(*reason),
        }
    }

    /// Final origin of the mover.
    #[must_use]
    pub const fn target(&self) -> Option<(i32, i32)> {
        match self {
            Self::Accepted {
                target_x, target_y, ..
            } => Some((*target_x, *target_y)),
            Self::Rejected { .. } => None,
        }
    }

    /// Displaced items (empty when rejected or free).
    #[must_use]
    pub fn displaced(&self) -> &[Displacement] {
        match self {
            Self::Accepted { displaced, .. } => displaced,
            Self::Rejected { .. } => &[],
        }
    }

    /// The batch to commit: the mover at its target, then every displaced item.
    /// Empty when rejected.
    #[must_use]
    pub fn placements(&self, source: &Item) -> Vec<Placement> {
        let Some((x, y)) = self.target() else {
            return Vec::new();
        };
        std::iter::once(Placement::new(source.id, source.rect().at(x, y)))
            .chain(self.displaced().iter().map(Displacement::placement))
            .collect()
    }
}

/// Flat wire form of [`MoveOutcome`].
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct OutcomeRecord {
    possible: bool,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    kind: Option<MoveKind>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    target_x: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    target_y: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    displaced: Option<Vec<Displacement>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    reason: Option<RejectReason>,
}

impl From<MoveOutcome> for OutcomeRecord {
    fn from(outcome: MoveOutcome) -> Self {
        match outcome {
            MoveOutcome::Accepted {
                kind,
                target_x,
                target_y,
                displaced,
            } => Self {
                possible: true,
                kind: Some(kind),
                target_x: Some(target_x),
                target_y: Some(target_y),
                displaced: Some(displaced),
                reason: None,
            },
            MoveOutcome::Rejected { reason } => Self {
                possible: false,
                kind: None,
                target_x: None,
                target_y: None,
                displaced: None,
                reason: Some(reason),
            },
        }
    }
}

impl TryFrom<OutcomeRecord> for MoveOutcome {
    type Error = String;

    fn try_from(record: OutcomeRecord) -> Result<Self, Self::Error> {
        if !record.possible {
            let reason = record
                .reason
                .ok_or_else(|| "rejected outcome without a reason".to_string())?;
            return Ok(Self::Rejected { reason });
        }
        match (record.kind, record.target_x, record.target_y) {
            (Some(kind), Some(target_x), Some(target_y)) => Ok(Self::Accepted {
                kind,
                target_x,
                target_y,
                displaced: record.displaced.unwrap_or_default(),
            }),
            _ => Err("accepted outcome needs type, targetX and targetY".to_string()),
        }
    }
}

/// Decides moves and resizes against one occupancy snapshot.
#[derive(Debug, Clone, Copy)]
pub struct PlacementResolver<'a> {
    occupancy: &'a GridOccupancy,
}

impl<'a> PlacementResolver<'a> {
    /// Create a resolver over a snapshot.
    #[must_use]
    pub const fn new(occupancy: &'a GridOccupancy) -> Self {
        Self { occupancy }
    }

    /// The snapshot decisions are made against.
    #[must_use]
    pub const fn occupancy(&self) -> &'a GridOccupancy {
        self.occupancy
    }

    /// Decide whether `source` may move its origin to `(target_x, target_y)`.
    ///
    /// `source` carries the mover's current (pre-move) footprint.
    #[must_use]
    pub fn evaluate_move(&self, source: &Item, target_x: i32, target_y: i32) -> MoveOutcome {
        let outcome = self.decide_move(source, target_x, target_y);
        tracing::debug!(
            item = %source.id,
            target_x,
            target_y,
            possible = outcome.is_possible(),
            kind = ?outcome.kind(),
            reason = ?outcome.reason(),
            displaced = outcome.displaced().len(),
            "move evaluated"
        );
        outcome
    }

    fn decide_move(&self, source: &Item, target_x: i32, target_y: i32) -> MoveOutcome {
        let grid = self.occupancy.grid();
        let target = source.rect().at(target_x, target_y);
        if !grid.contains(&target) {
            return MoveOutcome::rejected(RejectReason::Bounds);
        }

        let occupants = self.occupancy.occupants_in_rect(target, source.id);
        if occupants.is_empty() {
            return MoveOutcome::free(target_x, target_y);
        }

        if let Some(displaced) = self.contained_swap(source, target, &occupants) {
            return MoveOutcome::swap(target_x, target_y, displaced);
        }

        if let [blocker] = occupants.as_slice() {
            if blocker.area() > source.area() {
                if let Some(displacement) = self.reverse_clearance(source, target, blocker) {
                    return MoveOutcome::swap(blocker.x, blocker.y, vec![displacement]);
                }
            }
        }

        MoveOutcome::rejected(RejectReason::Collision)
    }

    /// Every occupant sits inside `target`; overlay the old footprint on the new
    /// one and move each occupant to its matching offset in the old footprint.
    fn contained_swap(
        &self,
        source: &Item,
        target: GridRect,
        occupants: &[Item],
    ) -> Option<Vec<Displacement>> {
        if !occupants.iter().all(|o| target.contains_rect(&o.rect())) {
            return None;
        }

        let mut swap_set: Vec<ItemId> = Vec::with_capacity(occupants.len() + 1);
        swap_set.push(source.id);
        swap_set.extend(occupants.iter().map(|o| o.id));

        let displaced: Vec<Displacement> = occupants
            .iter()
            .map(|o| {
                Displacement::new(*o, source.x + (o.x - target.x), source.y + (o.y - target.y))
            })
            .collect();

        displaced
            .iter()
            .all(|d| self.destination_is_clear(d.rect(), &swap_set, &target))
            .then_some(displaced)
    }

    /// A single larger blocker relocates so the mover can take its origin.
    fn reverse_clearance(
        &self,
        source: &Item,
        target: GridRect,
        blocker: &Item,
    ) -> Option<Displacement> {
        let swap_set = [source.id, blocker.id];
        let landing = source.rect().at(blocker.x, blocker.y);
        if !self.occupancy.is_rect_free(landing, swap_set) {
            return None;
        }

        let travel = GridDelta::new(target.x - source.x, target.y - source.y);
        let shadow = blocker.rect().translate(travel);
        let strict = blocker.rect().at(source.x, source.y);

        [shadow, strict]
            .into_iter()
            .find(|candidate| self.destination_is_clear(*candidate, &swap_set, &landing))
            .map(|rect| Displacement::new(*blocker, rect.x, rect.y))
    }

    /// In bounds, clear of everything outside the swap set, and not stacked on the
    /// mover's new footprint.
    fn destination_is_clear(&self, rect: GridRect, swap_set: &[ItemId], mover: &GridRect) -> bool {
        self.occupancy.is_rect_free(rect, swap_set) && !rect.intersects(mover)
    }

    /// Clamp a requested extent so it is at least one cell and does not run past
    /// the grid edge from the item's anchored origin.
    #[must_use]
    pub fn clamp_resize(&self, item: &Item, new_cols: i32, new_rows: i32) -> (i32, i32) {
        let grid = self.occupancy.grid();
        let cols = new_cols.min(grid.cols.saturating_sub(item.x).saturating_add(1)).max(1);
        let rows = new_rows.min(grid.rows.saturating_sub(item.y).saturating_add(1)).max(1);
        (cols, rows)
    }

    /// True if `item`, anchored at its current origin, may take the clamped
    /// extent. Resizing never displaces neighbours.
    #[must_use]
    pub fn evaluate_resize(&self, item: &Item, new_cols: i32, new_rows: i32) -> bool {
        let (cols, rows) = self.clamp_resize(item, new_cols, new_rows);
        let free = self
            .occupancy
            .is_area_free(item.x, item.y, cols, rows, item.id);
        tracing::debug!(item = %item.id, cols, rows, free, "resize evaluated");
        free
    }
}
