// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The spatial navigation policy: partition, prioritize, remember.

use alloc::vec::Vec;

use crate::{
    Direction, FocusEntry, FocusPolicy, FocusRect, FocusSpace, Partition, prioritize, tiers,
};

/// A transition recorded so that the reverse move can return to its source.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Remembered<K> {
    /// The node that was focused before the transition.
    pub source: K,
    /// The node the transition landed on.
    pub destination: K,
    /// The direction that undoes the transition.
    pub reverse: Direction,
}

/// Geometry-based directional policy.
///
/// Candidates are partitioned into nine zones around the origin, the first
/// non-empty priority tier for the direction is sorted by its metric chain, and
/// the first entry wins. With `remember_source`, a move that exactly reverses
/// the recorded transition returns to the recorded source when it is still
/// part of the winning group.
#[derive(Clone, Debug)]
pub struct SpatialPolicy<K> {
    /// Only consider candidates directly aligned with the origin.
    pub straight_only: bool,
    /// Fraction of the origin's extent a diagonal candidate must overlap to
    /// count as straight. Clamped to `[0, 1]`.
    pub straight_overlap_threshold: f64,
    /// Honor [`Self::previous`] when reversing a move.
    pub remember_source: bool,
    /// The most recent transition out of the origin's group.
    pub previous: Option<Remembered<K>>,
}

impl<K> Default for SpatialPolicy<K> {
    fn default() -> Self {
        Self {
            straight_only: false,
            straight_overlap_threshold: 0.5,
            remember_source: false,
            previous: None,
        }
    }
}

impl<K: Copy + Eq> SpatialPolicy<K> {
    fn remembered_source(&self, origin: K, direction: Direction) -> Option<K> {
        if !self.remember_source {
            return None;
        }
        self.previous
            .filter(|p| p.destination == origin && p.reverse == direction)
            .map(|p| p.source)
    }
}

impl<K> FocusPolicy<K> for SpatialPolicy<K>
where
    K: Copy + Eq,
{
    fn next(
        &self,
        origin: &FocusEntry<K>,
        direction: Direction,
        space: &FocusSpace<'_, K>,
    ) -> Option<K> {
        if space.nodes.is_empty() || !origin.rect.is_finite() {
            return None;
        }

        // Entries with unusable geometry are dropped before partitioning.
        let usable: Vec<&FocusEntry<K>> = space
            .nodes
            .iter()
            .filter(|e| e.rect.is_finite())
            .collect();
        if usable.is_empty() {
            return None;
        }

        let reference = FocusRect::new(origin.rect);
        let rects: Vec<FocusRect> = usable.iter().map(|e| FocusRect::new(e.rect)).collect();
        let threshold = self.straight_overlap_threshold.clamp(0.0, 1.0);

        let outer = Partition::new(&reference, &rects, threshold);
        let internal = outer.internal(&reference, &rects);
        let group = prioritize(
            tiers(direction, self.straight_only),
            &outer,
            &internal,
            &reference,
            &rects,
        )?;

        if let Some(source) = self.remembered_source(origin.id, direction)
            && group.iter().any(|&i| usable[i].id == source)
        {
            return Some(source);
        }

        group.first().map(|&i| usable[i].id)
    }
}
