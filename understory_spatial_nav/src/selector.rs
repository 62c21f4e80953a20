// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Selectors and the extended `@section` syntax.
//!
//! A [`Selector`] names elements: a host pattern string, an explicit list, or a
//! single handle. An [`ExtSelector`] additionally names sections:
//!
//! - `"@"`: the default section, else the last used one, else the first enabled one;
//! - `"@menu"`: the section with id `menu`;
//! - anything else: a plain [`Selector`].
//!
//! Extended selectors only appear in section overrides and per-element
//! directional overrides; the geometry engine never sees them.

use alloc::string::String;
use alloc::vec;
use alloc::vec::Vec;

use crate::FocusHost;
use crate::section::SectionId;

/// A set of elements, resolved through the host.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Selector<E> {
    /// A host selector pattern. The empty pattern selects nothing.
    Pattern(String),
    /// An explicit, ordered list of elements.
    Elements(Vec<E>),
    /// A single element.
    Element(E),
}

impl<E: Copy + Eq> Selector<E> {
    /// Resolve into an ordered element list.
    pub fn resolve<H>(&self, host: &H) -> Vec<E>
    where
        H: FocusHost<Element = E>,
    {
        match self {
            Self::Pattern(p) if p.is_empty() => Vec::new(),
            Self::Pattern(p) => host.query(p),
            Self::Elements(list) => list.clone(),
            Self::Element(e) => vec![*e],
        }
    }

    /// Resolve and keep only the first element.
    pub fn first<H>(&self, host: &H) -> Option<E>
    where
        H: FocusHost<Element = E>,
    {
        match self {
            Self::Element(e) => Some(*e),
            Self::Elements(list) => list.first().copied(),
            Self::Pattern(_) => self.resolve(host).into_iter().next(),
        }
    }

    /// Whether `element` is selected.
    pub fn matches<H>(&self, host: &H, element: E) -> bool
    where
        H: FocusHost<Element = E>,
    {
        match self {
            Self::Pattern(p) if p.is_empty() => false,
            Self::Pattern(p) => host.matches(element, p),
            Self::Elements(list) => list.contains(&element),
            Self::Element(e) => *e == element,
        }
    }
}

impl<E> From<&str> for Selector<E> {
    fn from(pattern: &str) -> Self {
        Self::Pattern(pattern.into())
    }
}

impl<E> From<String> for Selector<E> {
    fn from(pattern: String) -> Self {
        Self::Pattern(pattern)
    }
}

impl<E> From<Vec<E>> for Selector<E> {
    fn from(list: Vec<E>) -> Self {
        Self::Elements(list)
    }
}

/// A [`Selector`] or a reference to a section.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ExtSelector<E> {
    /// `"@"` (`None`) or `"@id"` (`Some(id)`).
    Section(Option<SectionId>),
    /// Any other selector.
    Selector(Selector<E>),
}

impl<E> ExtSelector<E> {
    /// Parse the extended string syntax.
    #[must_use]
    pub fn parse(s: &str) -> Self {
        match s.strip_prefix('@') {
            Some("") => Self::Section(None),
            Some(id) => Self::Section(Some(SectionId::from(id))),
            None => Self::Selector(Selector::from(s)),
        }
    }
}

impl<E> From<Selector<E>> for ExtSelector<E> {
    fn from(selector: Selector<E>) -> Self {
        Self::Selector(selector)
    }
}

impl<E> From<&str> for ExtSelector<E> {
    fn from(s: &str) -> Self {
        Self::parse(s)
    }
}
