// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Immutable geometry snapshots used during a single navigation attempt.

#[cfg(not(feature = "std"))]
use kurbo::common::FloatFuncs as _;
use kurbo::{Point, Rect};

/// Axis-aligned box snapshot with a precomputed center.
///
/// The center is snapped to whole units from the top-left corner
/// (`x0 + floor(width / 2)`, `y0 + floor(height / 2)`), so that candidates
/// laid out on an integer grid classify deterministically against each other.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct FocusRect {
    rect: Rect,
    center: Point,
}

impl FocusRect {
    /// Snapshot a rectangle. Inverted rectangles are normalized first.
    #[must_use]
    pub fn new(rect: Rect) -> Self {
        let rect = rect.abs();
        let center = Point::new(
            rect.x0 + (rect.width() / 2.0).floor(),
            rect.y0 + (rect.height() / 2.0).floor(),
        );
        Self { rect, center }
    }

    /// A degenerate box collapsed onto a single point.
    ///
    /// Used as the reference when classifying candidates purely by which side
    /// of another box's center they fall on.
    #[must_use]
    pub fn point(p: Point) -> Self {
        Self {
            rect: Rect::from_points(p, p),
            center: p,
        }
    }

    /// The underlying rectangle.
    #[must_use]
    pub fn rect(&self) -> Rect {
        self.rect
    }

    /// The snapped center point.
    #[must_use]
    pub fn center(&self) -> Point {
        self.center
    }

    /// Left edge.
    #[must_use]
    pub fn left(&self) -> f64 {
        self.rect.x0
    }

    /// Top edge.
    #[must_use]
    pub fn top(&self) -> f64 {
        self.rect.y0
    }

    /// Right edge.
    #[must_use]
    pub fn right(&self) -> f64 {
        self.rect.x1
    }

    /// Bottom edge.
    #[must_use]
    pub fn bottom(&self) -> f64 {
        self.rect.y1
    }

    /// Horizontal extent.
    #[must_use]
    pub fn width(&self) -> f64 {
        self.rect.width()
    }

    /// Vertical extent.
    #[must_use]
    pub fn height(&self) -> f64 {
        self.rect.height()
    }

    /// Length of the overlap between `self` and `other` along the x axis, or `0.0`.
    #[must_use]
    pub fn horizontal_overlap(&self, other: &Self) -> f64 {
        (self.right().min(other.right()) - self.left().max(other.left())).max(0.0)
    }

    /// Length of the overlap between `self` and `other` along the y axis, or `0.0`.
    #[must_use]
    pub fn vertical_overlap(&self, other: &Self) -> f64 {
        (self.bottom().min(other.bottom()) - self.top().max(other.top())).max(0.0)
    }
}
