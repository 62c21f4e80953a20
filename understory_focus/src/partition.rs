// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Nine-zone partitioning of candidates around a reference box.
//!
//! Candidates are classified by their center against the reference box's
//! edges, producing a 3×3 grid of zones indexed `row * 3 + col`:
//!
//! ```text
//!   0 UpperLeft | 1 Up     | 2 UpperRight
//!   ------------+----------+-------------
//!   3 Left      | 4 Inside | 5 Right
//!   ------------+----------+-------------
//!   6 LowerLeft | 7 Down   | 8 LowerRight
//! ```
//!
//! Corner candidates that overlap the reference box enough along the
//! perpendicular axis are duplicated into the adjacent straight lanes, so a
//! slightly offset button still counts as "directly above".

use alloc::vec::Vec;

use kurbo::Point;
use smallvec::SmallVec;

use crate::FocusRect;

/// One of the nine zones around a reference box.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Zone {
    /// Above and to the left.
    UpperLeft = 0,
    /// Directly above.
    Up = 1,
    /// Above and to the right.
    UpperRight = 2,
    /// Directly to the left.
    Left = 3,
    /// Center falls inside the reference on both axes.
    Inside = 4,
    /// Directly to the right.
    Right = 5,
    /// Below and to the left.
    LowerLeft = 6,
    /// Directly below.
    Down = 7,
    /// Below and to the right.
    LowerRight = 8,
}

impl Zone {
    /// All zones in index order.
    pub const ALL: [Self; 9] = [
        Self::UpperLeft,
        Self::Up,
        Self::UpperRight,
        Self::Left,
        Self::Inside,
        Self::Right,
        Self::LowerLeft,
        Self::Down,
        Self::LowerRight,
    ];

    /// Zone index, `row * 3 + col`.
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Whether this is one of the four diagonal zones.
    #[must_use]
    pub const fn is_corner(self) -> bool {
        matches!(
            self,
            Self::UpperLeft | Self::UpperRight | Self::LowerLeft | Self::LowerRight
        )
    }

    /// Classify a point against the edges of `reference`.
    ///
    /// Points lying exactly on an edge belong to the middle row/column.
    #[must_use]
    pub fn classify(reference: &FocusRect, p: Point) -> Self {
        let col = if p.x < reference.left() {
            0
        } else if p.x <= reference.right() {
            1
        } else {
            2
        };
        let row = if p.y < reference.top() {
            0
        } else if p.y <= reference.bottom() {
            1
        } else {
            2
        };
        Self::ALL[row * 3 + col]
    }
}

type Group = SmallVec<[usize; 8]>;

/// Candidate indices grouped by [`Zone`].
///
/// Indices refer to the candidate slice passed at construction. Within a group
/// candidates keep their input order.
#[derive(Clone, Debug)]
pub struct Partition {
    groups: [Group; 9],
    primary: Vec<Option<Zone>>,
}

impl Partition {
    /// Partition every candidate against `reference`.
    ///
    /// Corner candidates join the `Up`/`Down` lane when their horizontal
    /// overlap with `reference` is at least `threshold * reference.width()`,
    /// and the `Left`/`Right` lane when their vertical overlap is at least
    /// `threshold * reference.height()`.
    #[must_use]
    pub fn new(reference: &FocusRect, candidates: &[FocusRect], threshold: f64) -> Self {
        Self::build(reference, candidates, 0..candidates.len(), Some(threshold))
    }

    /// Partition the members of this partition's [`Zone::Inside`] group
    /// against the center point of `reference`.
    ///
    /// This orders candidates that overlap the reference box itself (for
    /// example nested focusable elements) by which side of its center they sit
    /// on. A point has no extent, so no lane duplication happens here.
    #[must_use]
    pub fn internal(&self, reference: &FocusRect, candidates: &[FocusRect]) -> Self {
        let center = FocusRect::point(reference.center());
        Self::build(
            &center,
            candidates,
            self.group(Zone::Inside).iter().copied(),
            None,
        )
    }

    fn build(
        reference: &FocusRect,
        candidates: &[FocusRect],
        members: impl IntoIterator<Item = usize>,
        threshold: Option<f64>,
    ) -> Self {
        let mut groups: [Group; 9] = Default::default();
        let mut primary = alloc::vec![None; candidates.len()];

        for i in members {
            let candidate = &candidates[i];
            let zone = Zone::classify(reference, candidate.center());
            groups[zone.index()].push(i);
            primary[i] = Some(zone);

            let Some(threshold) = threshold else {
                continue;
            };
            if !zone.is_corner() {
                continue;
            }
            let in_column =
                candidate.horizontal_overlap(reference) >= threshold * reference.width();
            let in_row = candidate.vertical_overlap(reference) >= threshold * reference.height();
            let (vertical_lane, horizontal_lane) = match zone {
                Zone::UpperLeft => (Zone::Up, Zone::Left),
                Zone::UpperRight => (Zone::Up, Zone::Right),
                Zone::LowerLeft => (Zone::Down, Zone::Left),
                _ => (Zone::Down, Zone::Right),
            };
            if in_column {
                groups[vertical_lane.index()].push(i);
            }
            if in_row {
                groups[horizontal_lane.index()].push(i);
            }
        }

        Self { groups, primary }
    }

    /// Candidate indices in `zone`, including lane duplicates.
    #[must_use]
    pub fn group(&self, zone: Zone) -> &[usize] {
        &self.groups[zone.index()]
    }

    /// The primary zone of candidate `index`, or `None` if it was not partitioned.
    #[must_use]
    pub fn primary_zone(&self, index: usize) -> Option<Zone> {
        self.primary.get(index).copied().flatten()
    }
}
