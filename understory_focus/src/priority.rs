// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Per-direction priority tiers and tier resolution.
//!
//! Each direction declares an ordered list of [`Tier`]s. Tiers are inspected
//! strictly in order and the first one with any candidates wins, even when a
//! later tier holds a candidate that is closer by raw distance:
//!
//! 1. Candidates overlapping the reference box, on the requested side of its center.
//! 2. The straight lane in the requested direction.
//! 3. The two diagonal zones on the requested side (dropped when straight-only).
//!
//! The winning group is then sorted by the tier's metric chain.

use alloc::vec::Vec;
use core::cmp::Ordering;

use crate::{Direction, FocusRect, Metric, Partition, Zone};

use Metric::{
    BottomIsBetter, LeftIsBetter, NearHorizon, NearPlumbLine, NearTargetLeft, NearTargetTop,
    RightIsBetter, TopIsBetter,
};
use TierSource::{Internal, Outer};

/// Which partition a [`Tier`] draws its zones from.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum TierSource {
    /// The partition of the reference box's [`Zone::Inside`] group around its center.
    Internal,
    /// The partition around the reference box's edges.
    Outer,
}

/// A candidate group plus the metric chain used to order it.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Tier {
    /// Partition to read zones from.
    pub source: TierSource,
    /// Zones concatenated, in order, to form the group.
    pub zones: &'static [Zone],
    /// Successive tie-break keys; the first metric decides, equal values fall through.
    pub metrics: &'static [Metric],
}

const fn tier(source: TierSource, zones: &'static [Zone], metrics: &'static [Metric]) -> Tier {
    Tier {
        source,
        zones,
        metrics,
    }
}

const LEFT: [Tier; 3] = [
    tier(
        Internal,
        &[Zone::UpperLeft, Zone::Left, Zone::LowerLeft],
        &[NearPlumbLine, TopIsBetter],
    ),
    tier(Outer, &[Zone::Left], &[NearPlumbLine, TopIsBetter]),
    tier(
        Outer,
        &[Zone::UpperLeft, Zone::LowerLeft],
        &[NearHorizon, RightIsBetter, NearTargetTop],
    ),
];

const RIGHT: [Tier; 3] = [
    tier(
        Internal,
        &[Zone::UpperRight, Zone::Right, Zone::LowerRight],
        &[NearPlumbLine, TopIsBetter],
    ),
    tier(Outer, &[Zone::Right], &[NearPlumbLine, TopIsBetter]),
    tier(
        Outer,
        &[Zone::UpperRight, Zone::LowerRight],
        &[NearHorizon, LeftIsBetter, NearTargetTop],
    ),
];

const UP: [Tier; 3] = [
    tier(
        Internal,
        &[Zone::UpperLeft, Zone::Up, Zone::UpperRight],
        &[NearHorizon, LeftIsBetter],
    ),
    tier(Outer, &[Zone::Up], &[NearHorizon, LeftIsBetter]),
    tier(
        Outer,
        &[Zone::UpperLeft, Zone::UpperRight],
        &[NearPlumbLine, BottomIsBetter, NearTargetLeft],
    ),
];

const DOWN: [Tier; 3] = [
    tier(
        Internal,
        &[Zone::LowerLeft, Zone::Down, Zone::LowerRight],
        &[NearHorizon, LeftIsBetter],
    ),
    tier(Outer, &[Zone::Down], &[NearHorizon, LeftIsBetter]),
    tier(
        Outer,
        &[Zone::LowerLeft, Zone::LowerRight],
        &[NearPlumbLine, TopIsBetter, NearTargetLeft],
    ),
];

/// The ordered tiers for `direction`.
///
/// With `straight_only` the diagonal fallback tier is omitted.
#[must_use]
pub fn tiers(direction: Direction, straight_only: bool) -> &'static [Tier] {
    let all: &'static [Tier; 3] = match direction {
        Direction::Left => &LEFT,
        Direction::Right => &RIGHT,
        Direction::Up => &UP,
        Direction::Down => &DOWN,
    };
    if straight_only { &all[..2] } else { &all[..] }
}

/// Resolve `tiers` into a sorted candidate group.
///
/// Returns the indices of the first non-empty tier's group, ordered by the
/// tier's metric chain (stable for full ties), or `None` if every tier is empty.
#[must_use]
pub fn prioritize(
    tiers: &[Tier],
    outer: &Partition,
    internal: &Partition,
    reference: &FocusRect,
    candidates: &[FocusRect],
) -> Option<Vec<usize>> {
    tiers.iter().find_map(|t| {
        let partition = match t.source {
            TierSource::Internal => internal,
            TierSource::Outer => outer,
        };
        let mut group: Vec<usize> = t
            .zones
            .iter()
            .flat_map(|z| partition.group(*z).iter().copied())
            .collect();
        if group.is_empty() {
            return None;
        }
        group.sort_by(|&a, &b| {
            compare_chain(t.metrics, reference, &candidates[a], &candidates[b])
        });
        Some(group)
    })
}

fn compare_chain(
    metrics: &[Metric],
    reference: &FocusRect,
    a: &FocusRect,
    b: &FocusRect,
) -> Ordering {
    for m in metrics {
        let delta = m.eval(reference, a) - m.eval(reference, b);
        if delta < 0.0 {
            return Ordering::Less;
        }
        if delta > 0.0 {
            return Ordering::Greater;
        }
    }
    Ordering::Equal
}
