// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Understory Spatial Nav: section-based keyboard and remote-control focus navigation.
//!
//! This crate drives focus across a host element tree from directional intents.
//! Geometry is resolved by [`understory_focus`]; this crate adds the policy and
//! protocol around it:
//! - A **host adapter** ([`FocusHost`]) through which elements are queried,
//!   measured, and focused.
//! - **Sections** ([`SectionRegistry`]): named groups of elements, each with a
//!   policy ([`SectionConfig`]) inheriting from global defaults ([`GlobalConfig`]).
//! - **Selectors** ([`Selector`], [`ExtSelector`]) naming elements or sections.
//! - A **coordinator** ([`SpatialNavigator`]) that resolves moves, honors
//!   containment ([`Restrict`]), entry ([`EnterTo`]), and exit ([`LeaveFor`])
//!   policies, and runs every focus change through a cancelable
//!   [`Notification`] protocol delivered to hooks.
//! - **Key handling** ([`KeyMap`], [`KeyInput`]) mapping raw key codes to moves.
//!
//! ## Minimal example
//!
//! ```rust
//! use kurbo::Rect;
//! use understory_spatial_nav::{Direction, FocusHost, FocusTarget, SectionConfig, SpatialNavigator};
//!
//! // A row of buttons; the element handle is the index.
//! #[derive(Debug, Default)]
//! struct Row {
//!     rects: Vec<Rect>,
//!     focused: Option<usize>,
//! }
//!
//! impl FocusHost for Row {
//!     type Element = usize;
//!     fn query(&self, pattern: &str) -> Vec<usize> {
//!         if pattern == "button" { (0..self.rects.len()).collect() } else { Vec::new() }
//!     }
//!     fn matches(&self, element: usize, pattern: &str) -> bool {
//!         pattern == "button" && element < self.rects.len()
//!     }
//!     fn rect(&self, element: usize) -> Option<Rect> { self.rects.get(element).copied() }
//!     fn focus(&mut self, element: usize) { self.focused = Some(element); }
//!     fn blur(&mut self, _: usize) { self.focused = None; }
//!     fn focused(&self) -> Option<usize> { self.focused }
//!     fn is_disabled(&self, _: usize) -> bool { false }
//!     fn attribute(&self, _: usize, _: &str) -> Option<String> { None }
//!     fn set_attribute(&mut self, _: usize, _: &str, _: &str) {}
//! }
//!
//! let row = Row {
//!     rects: vec![
//!         Rect::new(0.0, 0.0, 100.0, 100.0),
//!         Rect::new(150.0, 0.0, 250.0, 100.0),
//!         Rect::new(300.0, 0.0, 400.0, 100.0),
//!     ],
//!     focused: None,
//! };
//! let mut nav = SpatialNavigator::new(row);
//! nav.add(SectionConfig::new("button"));
//!
//! // Enter the first section, then walk right.
//! assert!(nav.focus(FocusTarget::Auto, false));
//! assert_eq!(nav.host().focused(), Some(0));
//! assert!(nav.move_focus(Direction::Right, None));
//! assert_eq!(nav.host().focused(), Some(1));
//!
//! // Nothing lies above: the move fails and focus stays put.
//! assert!(!nav.move_focus(Direction::Up, None));
//! assert_eq!(nav.host().focused(), Some(1));
//! ```
//!
//! ## Notifications
//!
//! Hooks registered with [`SpatialNavigator::add_listener`] receive every
//! [`Event`] and may veto cancelable ones by returning [`Outcome::Cancel`].
//! Hooks get the navigator itself and may issue nested requests; while a
//! transition is in flight those take a silent path that raises no further
//! notifications. See [`Notification`] for the catalog.
//!
//! ## Logging
//!
//! Protocol points are reported through [`tracing`] at `debug` and `trace`
//! level. The crate installs no subscriber.
//!
//! ## Features
//!
//! - `std` (default): enables `std` support for dependencies.
//! - `libm`: enables `no_std` + `alloc` builds that rely on `libm` for floating-point math.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod config;
mod dispatcher;
mod error;
mod event;
mod host;
mod keys;
mod navigator;
mod section;
mod selector;

#[cfg(test)]
mod test_host;

pub use config::{
    DEFAULT_TAB_INDEX_IGNORE_LIST, EffectivePolicy, EnterTo, GlobalConfig, LeaveFor, LeaveForMap,
    NavigableFilter, Restrict, SectionConfig,
};
pub use dispatcher::{Listener, ListenerId};
pub use error::Error;
pub use event::{Cause, Event, FocusDetail, MoveDetail, Notification, Outcome, UnfocusDetail};
pub use host::FocusHost;
pub use keys::{KeyAction, KeyInput, KeyMap, KeyResponse, Modifiers};
pub use navigator::{
    DIRECTION_ATTRIBUTE_PREFIX, FocusTarget, SpatialNavigator, TAB_INDEX_ATTRIBUTE,
    TransitionState,
};
pub use section::{Section, SectionId, SectionRegistry};
pub use selector::{ExtSelector, Selector};
pub use understory_focus::{Direction, Remembered};
