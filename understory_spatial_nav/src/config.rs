// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Navigation policy: global defaults, per-section overrides, and the merge.
//!
//! Every section carries a [`SectionConfig`] whose policy fields are optional.
//! A field left as `None` inherits from the navigator's [`GlobalConfig`];
//! [`SectionConfig::resolve`] produces the concrete [`EffectivePolicy`] used by
//! a navigation attempt.
//!
//! The same [`SectionConfig`] type doubles as the patch type for updates: only
//! the `Some` fields of a patch are applied.

use alloc::rc::Rc;
use alloc::string::String;
use core::fmt;

use understory_focus::{Direction, Remembered, SpatialPolicy};

use crate::section::SectionId;
use crate::selector::{ExtSelector, Selector};

/// Elements that are natively focusable and left alone by
/// [`SpatialNavigator::make_focusable`](crate::SpatialNavigator::make_focusable).
pub const DEFAULT_TAB_INDEX_IGNORE_LIST: &str =
    "a, input, select, textarea, button, iframe, [contentEditable=true]";

const DEFAULT_STRAIGHT_OVERLAP_THRESHOLD: f64 = 0.5;

/// How far a move may search beyond the origin's section.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum Restrict {
    /// Search the own section, then everything else.
    #[default]
    SelfFirst,
    /// Never leave the own section.
    SelfOnly,
    /// Search all sections at once.
    None,
}

/// Which element receives focus when a move enters a section from outside.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum EnterTo {
    /// The geometric winner.
    #[default]
    Geometric,
    /// The section's last focused element, then its default element.
    LastFocused,
    /// The section's default element.
    DefaultElement,
}

/// Override for leaving a section in one direction.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LeaveFor<E> {
    /// Leaving in this direction is forbidden; the move fails.
    Block,
    /// Go here instead of the geometric winner.
    Redirect(ExtSelector<E>),
}

impl<E> LeaveFor<E> {
    /// Parse the string form: the empty string blocks, anything else redirects.
    #[must_use]
    pub fn parse(s: &str) -> Self {
        if s.is_empty() {
            Self::Block
        } else {
            Self::Redirect(ExtSelector::parse(s))
        }
    }
}

/// Per-direction [`LeaveFor`] overrides. A missing entry means no override.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LeaveForMap<E> {
    entries: [Option<LeaveFor<E>>; 4],
}

impl<E> Default for LeaveForMap<E> {
    fn default() -> Self {
        Self {
            entries: [None, None, None, None],
        }
    }
}

impl<E> LeaveForMap<E> {
    /// An empty map.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder form of [`Self::set`].
    #[must_use]
    pub fn with(mut self, direction: Direction, leave_for: LeaveFor<E>) -> Self {
        self.set(direction, Some(leave_for));
        self
    }

    /// Set or clear the override for `direction`.
    pub fn set(&mut self, direction: Direction, leave_for: Option<LeaveFor<E>>) {
        self.entries[direction.index()] = leave_for;
    }

    /// The override for `direction`, if any.
    #[must_use]
    pub fn get(&self, direction: Direction) -> Option<&LeaveFor<E>> {
        self.entries[direction.index()].as_ref()
    }

    /// Whether no direction has an override.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.iter().all(Option::is_none)
    }
}

/// Extra navigability predicate, called with the element and its section id.
pub type NavigableFilter<E> = Rc<dyn Fn(&E, &SectionId) -> bool>;

/// Navigator-wide policy defaults.
#[derive(Clone)]
pub struct GlobalConfig<E> {
    /// Only consider candidates aligned with the origin.
    pub straight_only: bool,
    /// Overlap fraction for a diagonal candidate to count as straight.
    pub straight_overlap_threshold: f64,
    /// Reverse moves return to the element they came from.
    pub remember_source: bool,
    /// Fallback entry point of a section.
    pub default_element: Option<Selector<E>>,
    /// Entry policy.
    pub enter_to: EnterTo,
    /// Exit overrides.
    pub leave_for: LeaveForMap<E>,
    /// Search scope.
    pub restrict: Restrict,
    /// Pattern of elements that keep their native tab order.
    pub tab_index_ignore_list: String,
    /// Extra navigability predicate.
    pub navigable_filter: Option<NavigableFilter<E>>,
}

impl<E> Default for GlobalConfig<E> {
    fn default() -> Self {
        Self {
            straight_only: false,
            straight_overlap_threshold: DEFAULT_STRAIGHT_OVERLAP_THRESHOLD,
            remember_source: false,
            default_element: None,
            enter_to: EnterTo::Geometric,
            leave_for: LeaveForMap::new(),
            restrict: Restrict::SelfFirst,
            tab_index_ignore_list: String::from(DEFAULT_TAB_INDEX_IGNORE_LIST),
            navigable_filter: None,
        }
    }
}

impl<E: fmt::Debug> fmt::Debug for GlobalConfig<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GlobalConfig")
            .field("straight_only", &self.straight_only)
            .field(
                "straight_overlap_threshold",
                &self.straight_overlap_threshold,
            )
            .field("remember_source", &self.remember_source)
            .field("default_element", &self.default_element)
            .field("enter_to", &self.enter_to)
            .field("leave_for", &self.leave_for)
            .field("restrict", &self.restrict)
            .field("tab_index_ignore_list", &self.tab_index_ignore_list)
            .field("navigable_filter", &self.navigable_filter.is_some())
            .finish()
    }
}

impl<E> GlobalConfig<E> {
    /// Apply the policy fields of `patch`. Section-only fields are ignored.
    pub fn apply(&mut self, patch: SectionConfig<E>) {
        let SectionConfig {
            selector: _,
            disabled: _,
            straight_only,
            straight_overlap_threshold,
            remember_source,
            default_element,
            enter_to,
            leave_for,
            restrict,
            tab_index_ignore_list,
            navigable_filter,
        } = patch;
        if let Some(v) = straight_only {
            self.straight_only = v;
        }
        if let Some(v) = straight_overlap_threshold {
            self.straight_overlap_threshold = v;
        }
        if let Some(v) = remember_source {
            self.remember_source = v;
        }
        if default_element.is_some() {
            self.default_element = default_element;
        }
        if let Some(v) = enter_to {
            self.enter_to = v;
        }
        if let Some(v) = leave_for {
            self.leave_for = v;
        }
        if let Some(v) = restrict {
            self.restrict = v;
        }
        if let Some(v) = tab_index_ignore_list {
            self.tab_index_ignore_list = v;
        }
        if navigable_filter.is_some() {
            self.navigable_filter = navigable_filter;
        }
    }
}

/// A section's configuration; `None` fields inherit from [`GlobalConfig`].
#[derive(Clone)]
pub struct SectionConfig<E> {
    /// Elements belonging to the section.
    pub selector: Option<Selector<E>>,
    /// A disabled section contributes no candidates.
    pub disabled: Option<bool>,
    /// See [`GlobalConfig::straight_only`].
    pub straight_only: Option<bool>,
    /// See [`GlobalConfig::straight_overlap_threshold`].
    pub straight_overlap_threshold: Option<f64>,
    /// See [`GlobalConfig::remember_source`].
    pub remember_source: Option<bool>,
    /// See [`GlobalConfig::default_element`].
    pub default_element: Option<Selector<E>>,
    /// See [`GlobalConfig::enter_to`].
    pub enter_to: Option<EnterTo>,
    /// See [`GlobalConfig::leave_for`]. Replaces the global map as a whole.
    pub leave_for: Option<LeaveForMap<E>>,
    /// See [`GlobalConfig::restrict`].
    pub restrict: Option<Restrict>,
    /// See [`GlobalConfig::tab_index_ignore_list`].
    pub tab_index_ignore_list: Option<String>,
    /// See [`GlobalConfig::navigable_filter`].
    pub navigable_filter: Option<NavigableFilter<E>>,
}

impl<E> Default for SectionConfig<E> {
    fn default() -> Self {
        Self {
            selector: None,
            disabled: None,
            straight_only: None,
            straight_overlap_threshold: None,
            remember_source: None,
            default_element: None,
            enter_to: None,
            leave_for: None,
            restrict: None,
            tab_index_ignore_list: None,
            navigable_filter: None,
        }
    }
}

impl<E: fmt::Debug> fmt::Debug for SectionConfig<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SectionConfig")
            .field("selector", &self.selector)
            .field("disabled", &self.disabled)
            .field("straight_only", &self.straight_only)
            .field(
                "straight_overlap_threshold",
                &self.straight_overlap_threshold,
            )
            .field("remember_source", &self.remember_source)
            .field("default_element", &self.default_element)
            .field("enter_to", &self.enter_to)
            .field("leave_for", &self.leave_for)
            .field("restrict", &self.restrict)
            .field("tab_index_ignore_list", &self.tab_index_ignore_list)
            .field("navigable_filter", &self.navigable_filter.is_some())
            .finish()
    }
}

fn overlay<T>(slot: &mut Option<T>, value: Option<T>) {
    if value.is_some() {
        *slot = value;
    }
}

impl<E> SectionConfig<E> {
    /// A configuration selecting `selector` and inheriting everything else.
    #[must_use]
    pub fn new(selector: impl Into<Selector<E>>) -> Self {
        Self {
            selector: Some(selector.into()),
            ..Self::default()
        }
    }

    /// Apply the `Some` fields of `patch` on top of `self`.
    pub fn merge(&mut self, patch: Self) {
        overlay(&mut self.selector, patch.selector);
        overlay(&mut self.disabled, patch.disabled);
        overlay(&mut self.straight_only, patch.straight_only);
        overlay(
            &mut self.straight_overlap_threshold,
            patch.straight_overlap_threshold,
        );
        overlay(&mut self.remember_source, patch.remember_source);
        overlay(&mut self.default_element, patch.default_element);
        overlay(&mut self.enter_to, patch.enter_to);
        overlay(&mut self.leave_for, patch.leave_for);
        overlay(&mut self.restrict, patch.restrict);
        overlay(&mut self.tab_index_ignore_list, patch.tab_index_ignore_list);
        overlay(&mut self.navigable_filter, patch.navigable_filter);
    }

    /// The concrete policy: each field from `self` if set, else from `global`.
    #[must_use]
    pub fn resolve(&self, global: &GlobalConfig<E>) -> EffectivePolicy<E>
    where
        E: Clone,
    {
        let threshold = self
            .straight_overlap_threshold
            .unwrap_or(global.straight_overlap_threshold);
        EffectivePolicy {
            straight_only: self.straight_only.unwrap_or(global.straight_only),
            straight_overlap_threshold: if threshold.is_nan() {
                DEFAULT_STRAIGHT_OVERLAP_THRESHOLD
            } else {
                threshold.clamp(0.0, 1.0)
            },
            remember_source: self.remember_source.unwrap_or(global.remember_source),
            default_element: self
                .default_element
                .as_ref()
                .or(global.default_element.as_ref())
                .cloned(),
            enter_to: self.enter_to.unwrap_or(global.enter_to),
            leave_for: self
                .leave_for
                .as_ref()
                .unwrap_or(&global.leave_for)
                .clone(),
            restrict: self.restrict.unwrap_or(global.restrict),
            tab_index_ignore_list: self
                .tab_index_ignore_list
                .as_ref()
                .unwrap_or(&global.tab_index_ignore_list)
                .clone(),
            navigable_filter: self
                .navigable_filter
                .as_ref()
                .or(global.navigable_filter.as_ref())
                .cloned(),
        }
    }
}

/// A section's policy after inheriting from the global defaults.
#[derive(Clone)]
pub struct EffectivePolicy<E> {
    /// Only consider candidates aligned with the origin.
    pub straight_only: bool,
    /// Overlap fraction in `[0, 1]`.
    pub straight_overlap_threshold: f64,
    /// Reverse moves return to the element they came from.
    pub remember_source: bool,
    /// Fallback entry point.
    pub default_element: Option<Selector<E>>,
    /// Entry policy.
    pub enter_to: EnterTo,
    /// Exit overrides.
    pub leave_for: LeaveForMap<E>,
    /// Search scope.
    pub restrict: Restrict,
    /// Pattern of elements that keep their native tab order.
    pub tab_index_ignore_list: String,
    /// Extra navigability predicate.
    pub navigable_filter: Option<NavigableFilter<E>>,
}

impl<E: fmt::Debug> fmt::Debug for EffectivePolicy<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EffectivePolicy")
            .field("straight_only", &self.straight_only)
            .field(
                "straight_overlap_threshold",
                &self.straight_overlap_threshold,
            )
            .field("remember_source", &self.remember_source)
            .field("default_element", &self.default_element)
            .field("enter_to", &self.enter_to)
            .field("leave_for", &self.leave_for)
            .field("restrict", &self.restrict)
            .field("tab_index_ignore_list", &self.tab_index_ignore_list)
            .field("navigable_filter", &self.navigable_filter.is_some())
            .finish()
    }
}

impl<E> EffectivePolicy<E> {
    /// The geometry policy for one navigation attempt.
    #[must_use]
    pub fn spatial(&self, previous: Option<Remembered<E>>) -> SpatialPolicy<E> {
        SpatialPolicy {
            straight_only: self.straight_only,
            straight_overlap_threshold: self.straight_overlap_threshold,
            remember_source: self.remember_source,
            previous,
        }
    }
}
