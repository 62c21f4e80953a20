// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The host adapter: everything the navigator needs from the element tree.
//!
//! The navigator never owns elements. It asks the host to resolve selector
//! patterns, report geometry, and move native focus, and it treats element
//! handles as opaque copyable keys.

use alloc::string::String;
use alloc::vec::Vec;
use core::fmt::Debug;
use core::hash::Hash;

use kurbo::Rect;

/// Adapter over a host element tree (a DOM, a widget tree, a scene graph).
///
/// Implementations should be cheap to query: navigation re-reads geometry for
/// every candidate on every move.
pub trait FocusHost {
    /// Opaque element handle.
    type Element: Copy + Eq + Hash + Debug;

    /// Resolve a selector pattern into elements, in document order.
    fn query(&self, pattern: &str) -> Vec<Self::Element>;

    /// Whether `element` matches a selector pattern.
    fn matches(&self, element: Self::Element, pattern: &str) -> bool;

    /// Bounding box of `element`, or `None` if it is not laid out.
    fn rect(&self, element: Self::Element) -> Option<Rect>;

    /// Move native focus to `element`.
    fn focus(&mut self, element: Self::Element);

    /// Remove native focus from `element`.
    fn blur(&mut self, element: Self::Element);

    /// The element currently holding native focus, if any.
    fn focused(&self) -> Option<Self::Element>;

    /// Whether `element` is marked disabled.
    fn is_disabled(&self, element: Self::Element) -> bool;

    /// Read a string attribute.
    fn attribute(&self, element: Self::Element, name: &str) -> Option<String>;

    /// Write a string attribute.
    fn set_attribute(&mut self, element: Self::Element, name: &str, value: &str);
}
