// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Scalar distance metrics used to order candidates within a zone group.

use crate::FocusRect;

/// A scalar comparator over a candidate box, relative to a reference box.
///
/// Smaller values are better. The `Near*` metrics measure a gap that is
/// clamped to zero when the candidate touches or straddles the measuring
/// line; the `*IsBetter` metrics are raw edge positions used as tie-breaks.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Metric {
    /// Horizontal gap between the candidate and the reference's vertical center line.
    NearPlumbLine,
    /// Vertical gap between the candidate and the reference's horizontal center line.
    NearHorizon,
    /// Horizontal gap between the candidate and the reference's left edge.
    NearTargetLeft,
    /// Vertical gap between the candidate and the reference's top edge.
    NearTargetTop,
    /// Prefer candidates whose top edge is higher.
    TopIsBetter,
    /// Prefer candidates whose bottom edge is lower.
    BottomIsBetter,
    /// Prefer candidates whose left edge is further left.
    LeftIsBetter,
    /// Prefer candidates whose right edge is further right.
    RightIsBetter,
}

impl Metric {
    /// Evaluate this metric for `candidate` against `reference`.
    #[must_use]
    pub fn eval(self, reference: &FocusRect, candidate: &FocusRect) -> f64 {
        let rc = reference.center();
        let cc = candidate.center();
        match self {
            Self::NearPlumbLine => {
                gap(cc.x < rc.x, rc.x - candidate.right(), candidate.left() - rc.x)
            }
            Self::NearHorizon => {
                gap(cc.y < rc.y, rc.y - candidate.bottom(), candidate.top() - rc.y)
            }
            Self::NearTargetLeft => gap(
                cc.x < rc.x,
                reference.left() - candidate.right(),
                candidate.left() - reference.left(),
            ),
            Self::NearTargetTop => gap(
                cc.y < rc.y,
                reference.top() - candidate.bottom(),
                candidate.top() - reference.top(),
            ),
            Self::TopIsBetter => candidate.top(),
            Self::BottomIsBetter => -candidate.bottom(),
            Self::LeftIsBetter => candidate.left(),
            Self::RightIsBetter => -candidate.right(),
        }
    }
}

fn gap(before: bool, if_before: f64, if_after: f64) -> f64 {
    let d = if before { if_before } else { if_after };
    if d < 0.0 { 0.0 } else { d }
}
