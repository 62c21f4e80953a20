// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Notifications raised by the navigator.
//!
//! Every focus transition is bracketed by notifications delivered to the
//! navigator's hooks. The `will*` and `enter-*` notifications are cancelable:
//! a hook returning [`Outcome::Cancel`] vetoes the step. The remaining
//! notifications are informational and their outcome is ignored.
//!
//! | Notification | Cancelable | Raised when |
//! |---|---|---|
//! | `sn:willunfocus` | yes | before the focused element loses focus |
//! | `sn:unfocused` | no | after it lost focus |
//! | `sn:willfocus` | yes | before an element gains focus |
//! | `sn:focused` | no | after it gained focus |
//! | `sn:willmove` | yes | before a directional move is resolved |
//! | `sn:navigatefailed` | no | a move found nowhere to go |
//! | `sn:enter-down` | yes | the activation key went down |
//! | `sn:enter-up` | yes | the activation key went up |

use understory_focus::Direction;

use crate::section::SectionId;

/// What triggered a move.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Cause {
    /// A direction key.
    Keydown,
    /// A call to [`SpatialNavigator::move_focus`](crate::SpatialNavigator::move_focus).
    Api,
}

/// Payload of `willunfocus` / `unfocused`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UnfocusDetail<E> {
    /// The element about to receive focus. Unknown for native blurs.
    pub next_element: Option<E>,
    /// Its section.
    pub next_section: Option<SectionId>,
    /// Direction of the move, if the transition is a move.
    pub direction: Option<Direction>,
    /// Raised from a native blur rather than by the navigator.
    pub native: bool,
}

/// Payload of `willfocus` / `focused`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FocusDetail<E> {
    /// The element losing focus, if any. Unknown for native focus.
    pub previous_element: Option<E>,
    /// Section of the element gaining focus.
    pub section: Option<SectionId>,
    /// Direction of the move, if the transition is a move.
    pub direction: Option<Direction>,
    /// Raised from a native focus rather than by the navigator.
    pub native: bool,
}

/// Payload of `willmove`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MoveDetail {
    /// Requested direction.
    pub direction: Direction,
    /// Section of the origin.
    pub section: SectionId,
    /// What triggered the move.
    pub cause: Cause,
}

/// A navigator notification.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Notification<E> {
    /// The target is about to lose focus.
    WillUnfocus(UnfocusDetail<E>),
    /// The target lost focus.
    Unfocused(UnfocusDetail<E>),
    /// The target is about to gain focus.
    WillFocus(FocusDetail<E>),
    /// The target gained focus.
    Focused(FocusDetail<E>),
    /// A move away from the target is about to be resolved.
    WillMove(MoveDetail),
    /// A move away from the target found nowhere to go.
    NavigateFailed {
        /// Requested direction.
        direction: Direction,
    },
    /// The activation key went down on the target.
    EnterDown,
    /// The activation key went up on the target.
    EnterUp,
}

impl<E> Notification<E> {
    /// Namespaced event name, such as `"sn:willfocus"`.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::WillUnfocus(_) => "sn:willunfocus",
            Self::Unfocused(_) => "sn:unfocused",
            Self::WillFocus(_) => "sn:willfocus",
            Self::Focused(_) => "sn:focused",
            Self::WillMove(_) => "sn:willmove",
            Self::NavigateFailed { .. } => "sn:navigatefailed",
            Self::EnterDown => "sn:enter-down",
            Self::EnterUp => "sn:enter-up",
        }
    }

    /// Whether a hook may veto this notification.
    #[must_use]
    pub const fn is_cancelable(&self) -> bool {
        matches!(
            self,
            Self::WillUnfocus(_)
                | Self::WillFocus(_)
                | Self::WillMove(_)
                | Self::EnterDown
                | Self::EnterUp
        )
    }
}

/// A notification and the element it concerns.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Event<E> {
    /// The element the notification is about.
    pub target: E,
    /// The notification.
    pub notification: Notification<E>,
}

/// A hook's verdict.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum Outcome {
    /// Let the step proceed.
    #[default]
    Continue,
    /// Veto a cancelable step. Ignored for informational notifications.
    Cancel,
}
