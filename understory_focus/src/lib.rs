// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Understory Focus: spatial focus navigation primitives.
//!
//! This crate picks the next focus target for a directional intent (arrow keys,
//! a remote's D-pad, a gamepad) purely from geometry. It models navigation as:
//! - **Directions** ([`Direction`]): up, down, left, right.
//! - A **spatial view of candidates** ([`FocusEntry`] / [`FocusSpace`]) that describes where
//!   focusable nodes live in a chosen 2D coordinate space.
//! - A **partition** ([`Partition`]) of candidates into nine [`Zone`]s around the origin,
//!   with diagonal candidates duplicated into straight lanes when they overlap enough.
//! - **Metrics** ([`Metric`]) and per-direction **priority tiers** ([`Tier`]) that decide
//!   which group of candidates is eligible and how it is ordered.
//! - Pluggable **policies** ([`FocusPolicy`]), with [`SpatialPolicy`] composing all of the
//!   above and optionally returning to the node a move came from ([`Remembered`]).
//!
//! ## Minimal example
//!
//! Three buttons in a row:
//!
//! ```rust
//! use kurbo::Rect;
//! use understory_focus::{Direction, FocusEntry, FocusPolicy, FocusSpace, SpatialPolicy};
//!
//! let a = FocusEntry { id: 1_u32, rect: Rect::new(0.0, 0.0, 100.0, 100.0) };
//! let b = FocusEntry { id: 2_u32, rect: Rect::new(150.0, 0.0, 250.0, 100.0) };
//! let c = FocusEntry { id: 3_u32, rect: Rect::new(300.0, 0.0, 400.0, 100.0) };
//!
//! let policy = SpatialPolicy::default();
//! let others = [b.clone(), c.clone()];
//! let space = FocusSpace { nodes: &others };
//!
//! // The nearest candidate in the lane wins.
//! assert_eq!(policy.next(&a, Direction::Right, &space), Some(2));
//! // Nothing lies above.
//! assert_eq!(policy.next(&a, Direction::Up, &space), None);
//! ```
//!
//! ## Resolution order
//!
//! For each direction, three tiers are inspected in order and the first
//! non-empty one wins:
//!
//! 1. candidates overlapping the origin itself, on the requested side of its center;
//! 2. the straight lane in the requested direction;
//! 3. the two diagonal zones on the requested side (omitted with
//!    [`SpatialPolicy::straight_only`]).
//!
//! The winning group is sorted by the tier's metric chain. See [`tiers`] for the table.
//!
//! The core types are generic over the node identifier `K`, so callers can use any small,
//! copyable handle. Geometry is expressed in terms of [`kurbo::Rect`]. A [`FocusSpace`]
//! should use a consistent coordinate space for all of its entries and the origin.
//! Entries with non-finite geometry are ignored.
//!
//! ## Features
//!
//! - `std` (default): enables `std` support for dependencies such as `kurbo`.
//! - `libm`: enables `no_std` + `alloc` builds that rely on `libm` for floating-point math.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

use kurbo::Rect;

mod metric;
mod partition;
mod priority;
mod rect;
mod spatial;

pub use metric::Metric;
pub use partition::{Partition, Zone};
pub use priority::{Tier, TierSource, prioritize, tiers};
pub use rect::FocusRect;
pub use spatial::{Remembered, SpatialPolicy};

/// Direction of spatial focus navigation.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Move up relative to the current focus.
    Up,
    /// Move down relative to the current focus.
    Down,
    /// Move left relative to the current focus.
    Left,
    /// Move right relative to the current focus.
    Right,
}

impl Direction {
    /// All four directions.
    pub const ALL: [Self; 4] = [Self::Up, Self::Down, Self::Left, Self::Right];

    /// The direction that undoes a move in this direction.
    #[must_use]
    pub const fn reverse(self) -> Self {
        match self {
            Self::Up => Self::Down,
            Self::Down => Self::Up,
            Self::Left => Self::Right,
            Self::Right => Self::Left,
        }
    }

    /// Lowercase name, such as `"left"`.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Up => "up",
            Self::Down => "down",
            Self::Left => "left",
            Self::Right => "right",
        }
    }

    /// Parse a direction name case-insensitively.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|d| d.name().eq_ignore_ascii_case(name))
    }

    /// Position in [`Self::ALL`], handy for per-direction tables.
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }
}

/// A single focusable candidate within a [`FocusSpace`].
#[derive(Clone, Debug)]
pub struct FocusEntry<K> {
    /// Identifier for this focusable node.
    pub id: K,
    /// Bounds in the coordinate space of the surrounding [`FocusSpace`].
    ///
    /// The bounds are sampled once per navigation attempt; policies never
    /// track them over time.
    pub rect: Rect,
}

/// A read-only view of focusable candidates.
///
/// The host is responsible for filtering: every entry in a space is eligible,
/// and the origin should not be part of it.
#[derive(Clone, Debug)]
pub struct FocusSpace<'a, K> {
    /// Focusable candidates visible to the current search.
    pub nodes: &'a [FocusEntry<K>],
}

/// Trait for focus traversal policies.
///
/// A policy receives the origin, a direction, and a read-only view of
/// candidates, and returns the next focused node if any.
pub trait FocusPolicy<K>
where
    K: Copy + Eq,
{
    /// Compute the next focus target given an origin, a direction, and a focus space.
    fn next(
        &self,
        origin: &FocusEntry<K>,
        direction: Direction,
        space: &FocusSpace<'_, K>,
    ) -> Option<K>;
}
