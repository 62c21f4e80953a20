// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The focus coordinator.
//!
//! [`SpatialNavigator`] owns the host, the section registry, and the hook
//! chain, and turns directional intents into focus transitions.
//!
//! ## Moves
//!
//! A move from an origin element:
//!
//! 1. honors the origin's `data-sn-<direction>` attribute, which replaces the
//!    geometric search (an empty value fails the move);
//! 2. otherwise searches candidate pools according to the origin section's
//!    [`Restrict`] policy;
//! 3. when the winner lies in another section, consults the origin section's
//!    [`LeaveFor`] override, then the destination section's [`EnterTo`] policy;
//! 4. when nothing wins, still consults the [`LeaveFor`] override before
//!    reporting `sn:navigatefailed`.
//!
//! ## Transitions
//!
//! Every focus change runs the same protocol: `sn:willunfocus` (cancelable),
//! blur, `sn:unfocused`, `sn:willfocus` (cancelable), focus, `sn:focused`, then
//! the section history is updated. While a transition is in flight any nested
//! request takes the silent path: blur, focus, and bookkeeping with no
//! notifications. While paused, every request takes the silent path.

use alloc::boxed::Box;
use alloc::format;
use alloc::string::String;
use alloc::vec;
use alloc::vec::Vec;
use core::fmt;

use tracing::{debug, trace};
use understory_focus::{Direction, FocusEntry, FocusPolicy, FocusSpace, Remembered, SpatialPolicy};

use crate::FocusHost;
use crate::config::{EnterTo, LeaveFor, Restrict, SectionConfig};
use crate::dispatcher::{self, ListenerId, Listeners};
use crate::error::Error;
use crate::event::{Cause, Event, FocusDetail, MoveDetail, Notification, Outcome, UnfocusDetail};
use crate::keys::{KeyAction, KeyInput, KeyMap, KeyResponse};
use crate::section::{SectionId, SectionRegistry};
use crate::selector::{ExtSelector, Selector};

/// Attribute holding the tab index written by [`SpatialNavigator::make_focusable`].
pub const TAB_INDEX_ATTRIBUTE: &str = "tabindex";

/// Prefix of the per-element directional override attribute, such as `data-sn-left`.
pub const DIRECTION_ATTRIBUTE_PREFIX: &str = "data-sn-";

/// Whether a focus transition is in flight.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum TransitionState {
    /// No transition in flight; requests run the full protocol.
    #[default]
    Idle,
    /// A transition is in flight; nested requests take the silent path.
    InProgress,
}

/// What [`SpatialNavigator::focus`] should focus.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FocusTarget<E> {
    /// The default section, else the last used one, else the first enabled one.
    Auto,
    /// A section if one has this id, else an extended selector. An empty
    /// name behaves like [`Self::Auto`].
    Named(String),
    /// A specific section.
    Section(SectionId),
    /// A section reference or element selector.
    Extended(ExtSelector<E>),
    /// A specific element.
    Element(E),
}

impl<E> FocusTarget<E> {
    /// The string form: empty means [`Self::Auto`], anything else [`Self::Named`].
    #[must_use]
    pub fn parse(s: &str) -> Self {
        if s.is_empty() {
            Self::Auto
        } else {
            Self::Named(s.into())
        }
    }
}

/// Result of consulting a section's exit override.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum Exit {
    Blocked,
    Moved,
    Stayed,
}

/// Section-based spatial navigation over a [`FocusHost`].
pub struct SpatialNavigator<H: FocusHost> {
    host: H,
    registry: SectionRegistry<H::Element>,
    pub(crate) listeners: Listeners<H>,
    key_map: KeyMap,
    state: TransitionState,
    paused: bool,
    deferred: Option<H::Element>,
}

impl<H: FocusHost + fmt::Debug> fmt::Debug for SpatialNavigator<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SpatialNavigator")
            .field("host", &self.host)
            .field("registry", &self.registry)
            .field("listeners", &self.listeners)
            .field("key_map", &self.key_map)
            .field("state", &self.state)
            .field("paused", &self.paused)
            .field("deferred", &self.deferred)
            .finish()
    }
}

impl<H: FocusHost> SpatialNavigator<H> {
    /// A navigator over `host` with no sections and default key bindings.
    pub fn new(host: H) -> Self {
        Self {
            host,
            registry: SectionRegistry::new(),
            listeners: Listeners::default(),
            key_map: KeyMap::default(),
            state: TransitionState::Idle,
            paused: false,
            deferred: None,
        }
    }

    /// The host.
    pub fn host(&self) -> &H {
        &self.host
    }

    /// Mutable access to the host.
    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    /// Consume the navigator and return the host.
    pub fn into_host(self) -> H {
        self.host
    }

    /// The section registry.
    pub fn registry(&self) -> &SectionRegistry<H::Element> {
        &self.registry
    }

    /// Key bindings.
    pub fn key_map(&self) -> &KeyMap {
        &self.key_map
    }

    /// Mutable key bindings.
    pub fn key_map_mut(&mut self) -> &mut KeyMap {
        &mut self.key_map
    }

    /// Whether a transition is in flight.
    pub fn state(&self) -> TransitionState {
        self.state
    }

    // --- management ---

    /// Register a section under a generated id.
    pub fn add(&mut self, config: SectionConfig<H::Element>) -> SectionId {
        self.registry.add(config)
    }

    /// Register a section under an explicit id.
    pub fn add_with_id(
        &mut self,
        id: impl Into<SectionId>,
        config: SectionConfig<H::Element>,
    ) -> Result<SectionId, Error> {
        self.registry.add_with_id(id, config)
    }

    /// Unregister a section.
    pub fn remove(&mut self, id: &SectionId) -> Result<(), Error> {
        self.registry.remove(id).map(|_| ())
    }

    /// Re-enable a section.
    pub fn enable(&mut self, id: &SectionId) -> Result<(), Error> {
        self.registry.enable(id)
    }

    /// Disable a section.
    pub fn disable(&mut self, id: &SectionId) -> Result<(), Error> {
        self.registry.disable(id)
    }

    /// Update the global policy.
    pub fn set_global(&mut self, patch: SectionConfig<H::Element>) {
        self.registry.set_global(patch);
    }

    /// Update a section's configuration.
    pub fn set_section(
        &mut self,
        id: &SectionId,
        patch: SectionConfig<H::Element>,
    ) -> Result<(), Error> {
        self.registry.set_section(id, patch)
    }

    /// Set or clear the default section.
    pub fn set_default_section(&mut self, id: Option<&SectionId>) -> Result<(), Error> {
        self.registry.set_default_section(id)
    }

    /// Remove every section and reset the transition state. Hooks are kept.
    pub fn clear(&mut self) {
        self.registry.clear();
        self.state = TransitionState::Idle;
        self.deferred = None;
    }

    /// Register a hook. Hooks run in registration order.
    pub fn add_listener<F>(&mut self, listener: F) -> ListenerId
    where
        F: FnMut(&mut Self, &Event<H::Element>) -> Outcome + 'static,
    {
        self.listeners.add(Box::new(listener))
    }

    /// Unregister a hook. Returns `false` if it was not registered.
    pub fn remove_listener(&mut self, id: ListenerId) -> bool {
        self.listeners.remove(id)
    }

    /// Number of registered hooks.
    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    /// Suppress the cancelable protocol: transitions become silent.
    pub fn pause(&mut self) {
        self.paused = true;
    }

    /// Restore the cancelable protocol.
    pub fn resume(&mut self) {
        self.paused = false;
    }

    /// Whether the navigator is paused.
    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Add `tabindex="-1"` to section members that are not natively focusable.
    ///
    /// Elements matching the effective tab-index ignore list, or already
    /// carrying a non-empty tab index, are left alone. With `None`, every
    /// section is processed.
    pub fn make_focusable(&mut self, section: Option<&SectionId>) -> Result<(), Error> {
        let ids: Vec<SectionId> = match section {
            Some(id) if !self.registry.contains(id) => {
                return Err(Error::UnknownSection(id.clone()));
            }
            Some(id) => vec![id.clone()],
            None => self.registry.ids().cloned().collect(),
        };
        for id in ids {
            let (Some(policy), Some(selector)) = (
                self.registry.effective_policy(&id),
                self.registry
                    .get(&id)
                    .and_then(|s| s.config().selector.clone()),
            ) else {
                continue;
            };
            let ignore = Selector::from(policy.tab_index_ignore_list);
            for element in selector.resolve(&self.host) {
                if ignore.matches(&self.host, element) {
                    continue;
                }
                let has_tab_index = self
                    .host
                    .attribute(element, TAB_INDEX_ATTRIBUTE)
                    .is_some_and(|v| !v.is_empty());
                if !has_tab_index {
                    self.host.set_attribute(element, TAB_INDEX_ATTRIBUTE, "-1");
                }
            }
        }
        Ok(())
    }

    // --- entry points ---

    /// Focus `target`. With `silent`, no notifications fire for this call.
    ///
    /// Returns whether focus moved.
    pub fn focus(&mut self, target: FocusTarget<H::Element>, silent: bool) -> bool {
        let auto_pause = silent && !self.paused;
        if auto_pause {
            self.pause();
        }
        let moved = match target {
            FocusTarget::Auto => self.focus_section(None),
            FocusTarget::Section(id) => self.focus_section(Some(&id)),
            FocusTarget::Named(name) if name.is_empty() => self.focus_section(None),
            FocusTarget::Named(name) => {
                let id = SectionId::from(name.as_str());
                if self.registry.contains(&id) {
                    self.focus_section(Some(&id))
                } else {
                    self.focus_extended(&ExtSelector::parse(&name), None)
                }
            }
            FocusTarget::Extended(ext) => self.focus_extended(&ext, None),
            FocusTarget::Element(element) => self.focus_navigable(element, None),
        };
        if auto_pause {
            self.resume();
        }
        moved
    }

    /// Move focus in `direction`, from the first element of `from` or else from
    /// the focused element.
    ///
    /// Returns whether focus moved.
    pub fn move_focus(
        &mut self,
        direction: Direction,
        from: Option<&Selector<H::Element>>,
    ) -> bool {
        let origin = match from {
            Some(selector) => selector.first(&self.host),
            None => self.host.focused(),
        };
        let Some(origin) = origin else {
            return false;
        };
        let Some(section) = self.registry.section_of(&self.host, origin) else {
            return false;
        };
        let detail = MoveDetail {
            direction,
            section: section.clone(),
            cause: Cause::Api,
        };
        if !self.dispatch(origin, Notification::WillMove(detail)) {
            debug!(direction = direction.name(), "move vetoed");
            return false;
        }
        self.focus_next(direction, origin, &section)
    }

    /// Focus an entry point of a section.
    ///
    /// With `None`, the default section is tried first, then the last used
    /// section, then every section in registration order. Disabled sections
    /// are skipped.
    pub fn focus_section(&mut self, id: Option<&SectionId>) -> bool {
        let mut range: Vec<SectionId> = Vec::new();
        match id {
            Some(id) => self.push_range(&mut range, Some(id)),
            None => {
                self.push_range(&mut range, self.registry.default_section());
                self.push_range(&mut range, self.registry.last_section());
                for id in self.registry.ids() {
                    self.push_range(&mut range, Some(id));
                }
            }
        }

        for id in range {
            let Some(policy) = self.registry.effective_policy(&id) else {
                continue;
            };
            let host = &self.host;
            let registry = &self.registry;
            let last = || registry.last_focused_element(host, &id);
            let default = || registry.default_element(host, &id);
            let first = || registry.navigable_elements(host, &id).first().copied();
            let next = match policy.enter_to {
                EnterTo::LastFocused => last().or_else(default).or_else(first),
                EnterTo::Geometric | EnterTo::DefaultElement => {
                    default().or_else(last).or_else(first)
                }
            };
            if let Some(next) = next {
                return self.focus_element(next, Some(id), None);
            }
        }
        false
    }

    fn push_range(&self, range: &mut Vec<SectionId>, id: Option<&SectionId>) {
        let Some(id) = id else {
            return;
        };
        let enabled = self.registry.get(id).is_some_and(|s| !s.is_disabled());
        if enabled && !range.contains(id) {
            range.push(id.clone());
        }
    }

    // --- native notifications ---

    /// The host reports that `element` gained focus outside the navigator.
    pub fn handle_native_focus(&mut self, element: H::Element) {
        if self.registry.is_empty() || self.state == TransitionState::InProgress {
            return;
        }
        let Some(section) = self.registry.section_of(&self.host, element) else {
            return;
        };
        if self.paused {
            self.focus_changed(element, Some(section));
            return;
        }
        let detail = FocusDetail {
            previous_element: None,
            section: Some(section.clone()),
            direction: None,
            native: true,
        };
        if self.dispatch(element, Notification::WillFocus(detail.clone())) {
            self.dispatch(element, Notification::Focused(detail));
            self.focus_changed(element, Some(section));
        } else {
            debug!(?element, "native focus vetoed");
            self.state = TransitionState::InProgress;
            self.host.blur(element);
            self.state = TransitionState::Idle;
        }
    }

    /// The host reports that `element` lost focus outside the navigator.
    ///
    /// A veto cannot undo the blur; it schedules a single deferred re-focus,
    /// run by [`Self::run_deferred`]. Until then a transition counts as in
    /// flight.
    pub fn handle_native_blur(&mut self, element: H::Element) {
        if self.paused || self.registry.is_empty() || self.state == TransitionState::InProgress {
            return;
        }
        if self.registry.section_of(&self.host, element).is_none() {
            return;
        }
        let detail = UnfocusDetail {
            next_element: None,
            next_section: None,
            direction: None,
            native: true,
        };
        if self.dispatch(element, Notification::WillUnfocus(detail.clone())) {
            self.dispatch(element, Notification::Unfocused(detail));
        } else {
            debug!(?element, "native blur vetoed, re-focus deferred");
            self.state = TransitionState::InProgress;
            self.deferred = Some(element);
        }
    }

    /// Whether a deferred re-focus is pending.
    pub fn has_deferred(&self) -> bool {
        self.deferred.is_some()
    }

    /// Run the pending deferred re-focus, if any. Call on the host's next
    /// event-loop turn.
    ///
    /// Returns whether anything ran.
    pub fn run_deferred(&mut self) -> bool {
        let Some(element) = self.deferred.take() else {
            return false;
        };
        trace!(?element, "deferred re-focus");
        self.host.focus(element);
        self.state = TransitionState::Idle;
        true
    }

    // --- keys ---

    /// Handle a key press.
    pub fn handle_key_down(&mut self, key: KeyInput) -> KeyResponse {
        if self.registry.is_empty() || self.paused || !key.modifiers.is_empty() {
            return KeyResponse::Ignored;
        }
        match self.key_map.action(key.code) {
            None => KeyResponse::Ignored,
            Some(KeyAction::Enter) => self.activate(Notification::EnterDown),
            Some(KeyAction::Move(direction)) => self.key_move(direction),
        }
    }

    /// Handle a key release.
    pub fn handle_key_up(&mut self, key: KeyInput) -> KeyResponse {
        if self.registry.is_empty() || self.paused || !key.modifiers.is_empty() {
            return KeyResponse::Ignored;
        }
        if self.key_map.action(key.code) == Some(KeyAction::Enter) {
            self.activate(Notification::EnterUp)
        } else {
            KeyResponse::Ignored
        }
    }

    fn activate(&mut self, notification: Notification<H::Element>) -> KeyResponse {
        let Some(current) = self.host.focused() else {
            return KeyResponse::Ignored;
        };
        if self.registry.section_of(&self.host, current).is_none() {
            return KeyResponse::Ignored;
        }
        if self.dispatch(current, notification) {
            KeyResponse::Ignored
        } else {
            KeyResponse::PreventDefault
        }
    }

    fn key_move(&mut self, direction: Direction) -> KeyResponse {
        let origin = self.host.focused().or_else(|| {
            let last = self.registry.last_section()?;
            self.registry.last_focused_element(&self.host, last)
        });
        let Some(origin) = origin else {
            self.focus_section(None);
            return KeyResponse::PreventDefault;
        };
        let Some(section) = self.registry.section_of(&self.host, origin) else {
            return KeyResponse::Ignored;
        };
        let detail = MoveDetail {
            direction,
            section: section.clone(),
            cause: Cause::Keydown,
        };
        if self.dispatch(origin, Notification::WillMove(detail)) {
            self.focus_next(direction, origin, &section);
        }
        KeyResponse::PreventDefault
    }

    // --- protocol ---

    fn dispatch(&mut self, target: H::Element, notification: Notification<H::Element>) -> bool {
        trace!(?target, name = notification.name(), "notify");
        let event = Event {
            target,
            notification,
        };
        dispatcher::run(self, &event)
    }

    fn focus_changed(&mut self, element: H::Element, section: Option<SectionId>) {
        let section = section.or_else(|| self.registry.section_of(&self.host, element));
        if let Some(section) = section {
            self.registry.record_focus(element, &section);
        }
    }

    fn silent_focus(
        &mut self,
        current: Option<H::Element>,
        element: H::Element,
        section: Option<SectionId>,
    ) {
        trace!(?element, "silent focus");
        if let Some(current) = current {
            self.host.blur(current);
        }
        self.host.focus(element);
        self.focus_changed(element, section);
    }

    fn focus_element(
        &mut self,
        element: H::Element,
        section: Option<SectionId>,
        direction: Option<Direction>,
    ) -> bool {
        let current = self.host.focused();

        if self.state == TransitionState::InProgress {
            self.silent_focus(current, element, section);
            return true;
        }

        self.state = TransitionState::InProgress;

        if self.paused {
            self.silent_focus(current, element, section);
            self.state = TransitionState::Idle;
            return true;
        }

        if let Some(current) = current {
            let detail = UnfocusDetail {
                next_element: Some(element),
                next_section: section.clone(),
                direction,
                native: false,
            };
            if !self.dispatch(current, Notification::WillUnfocus(detail.clone())) {
                debug!(?current, "unfocus vetoed");
                self.state = TransitionState::Idle;
                return false;
            }
            self.host.blur(current);
            self.dispatch(current, Notification::Unfocused(detail));
        }

        let detail = FocusDetail {
            previous_element: current,
            section: section.clone(),
            direction,
            native: false,
        };
        if !self.dispatch(element, Notification::WillFocus(detail.clone())) {
            debug!(?element, "focus vetoed");
            self.state = TransitionState::Idle;
            return false;
        }
        self.host.focus(element);
        self.dispatch(element, Notification::Focused(detail));

        self.state = TransitionState::Idle;
        self.focus_changed(element, section);
        true
    }

    /// Focus `element` if it is navigable in its own section.
    fn focus_navigable(&mut self, element: H::Element, direction: Option<Direction>) -> bool {
        match self.registry.section_of(&self.host, element) {
            Some(section) if self.registry.is_navigable(&self.host, element, &section, false) => {
                self.focus_element(element, Some(section), direction)
            }
            _ => false,
        }
    }

    fn focus_extended(
        &mut self,
        selector: &ExtSelector<H::Element>,
        direction: Option<Direction>,
    ) -> bool {
        match selector {
            ExtSelector::Section(id) => self.focus_section(id.as_ref()),
            ExtSelector::Selector(selector) => match selector.first(&self.host) {
                Some(next) => self.focus_navigable(next, direction),
                None => false,
            },
        }
    }

    fn goto_leave_for(&mut self, section: &SectionId, direction: Direction) -> Exit {
        let Some(policy) = self.registry.effective_policy(section) else {
            return Exit::Stayed;
        };
        match policy.leave_for.get(direction) {
            None => Exit::Stayed,
            Some(LeaveFor::Block) => Exit::Blocked,
            Some(LeaveFor::Redirect(target)) => {
                if self.focus_extended(target, Some(direction)) {
                    Exit::Moved
                } else {
                    Exit::Stayed
                }
            }
        }
    }

    fn navigate_failed(&mut self, origin: H::Element, direction: Direction) {
        debug!(?origin, direction = direction.name(), "navigation failed");
        self.dispatch(origin, Notification::NavigateFailed { direction });
    }

    fn navigate(
        &self,
        origin: H::Element,
        direction: Direction,
        candidates: &[H::Element],
        policy: &SpatialPolicy<H::Element>,
    ) -> Option<H::Element> {
        let origin = FocusEntry {
            id: origin,
            rect: self.host.rect(origin)?,
        };
        let nodes: Vec<FocusEntry<H::Element>> = candidates
            .iter()
            .filter_map(|&id| self.host.rect(id).map(|rect| FocusEntry { id, rect }))
            .collect();
        policy.next(&origin, direction, &FocusSpace { nodes: &nodes })
    }

    fn focus_next(&mut self, direction: Direction, current: H::Element, section: &SectionId) -> bool {
        let attribute = format!("{DIRECTION_ATTRIBUTE_PREFIX}{}", direction.name());
        if let Some(value) = self.host.attribute(current, &attribute) {
            if value.is_empty() || !self.focus_extended(&ExtSelector::parse(&value), Some(direction))
            {
                self.navigate_failed(current, direction);
                return false;
            }
            return true;
        }

        let Some(policy) = self.registry.effective_policy(section) else {
            return false;
        };
        let previous = self.registry.get(section).and_then(|s| s.previous());
        let spatial = policy.spatial(previous);

        let mut own = Vec::new();
        let mut all = Vec::new();
        for id in self.registry.ids() {
            let elements = self.registry.navigable_elements(&self.host, id);
            if id == section {
                own.clone_from(&elements);
            }
            all.extend(elements);
        }

        debug!(
            ?current,
            direction = direction.name(),
            section = %section,
            "resolving move"
        );
        let next = match policy.restrict {
            Restrict::SelfOnly | Restrict::SelfFirst => {
                let own = exclude(own, &[current]);
                let found = self.navigate(current, direction, &own, &spatial);
                if found.is_none() && policy.restrict == Restrict::SelfFirst {
                    // The origin stays in this pool; it never wins a tier.
                    let others = exclude(all, &own);
                    self.navigate(current, direction, &others, &spatial)
                } else {
                    found
                }
            }
            Restrict::None => {
                let all = exclude(all, &[current]);
                self.navigate(current, direction, &all, &spatial)
            }
        };

        let Some(mut next) = next else {
            if self.goto_leave_for(section, direction) == Exit::Moved {
                return true;
            }
            self.navigate_failed(current, direction);
            return false;
        };

        self.registry.record_previous(
            section,
            Remembered {
                source: current,
                destination: next,
                reverse: direction.reverse(),
            },
        );

        let next_section = self.registry.section_of(&self.host, next);
        if next_section.as_ref() != Some(section) {
            match self.goto_leave_for(section, direction) {
                Exit::Moved => return true,
                Exit::Blocked => {
                    self.navigate_failed(current, direction);
                    return false;
                }
                Exit::Stayed => {}
            }
            if let Some(entered) = next_section.as_ref().and_then(|id| self.entry_point(id)) {
                next = entered;
            }
        }

        self.focus_element(next, next_section, Some(direction))
    }

    /// The element a move entering section `id` should land on, if its
    /// policy overrides the geometric winner.
    fn entry_point(&self, id: &SectionId) -> Option<H::Element> {
        let policy = self.registry.effective_policy(id)?;
        match policy.enter_to {
            EnterTo::Geometric => None,
            EnterTo::LastFocused => self
                .registry
                .last_focused_element(&self.host, id)
                .or_else(|| self.registry.default_element(&self.host, id)),
            EnterTo::DefaultElement => self.registry.default_element(&self.host, id),
        }
    }
}

/// Remove the first occurrence of each of `excluded` from `list`.
fn exclude<E: PartialEq>(mut list: Vec<E>, excluded: &[E]) -> Vec<E> {
    for e in excluded {
        if let Some(i) = list.iter().position(|x| x == e) {
            list.remove(i);
        }
    }
    list
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LeaveForMap;
    use crate::keys::Modifiers;
    use crate::test_host::{HostOp, TestHost};
    use alloc::rc::Rc;
    use alloc::string::ToString;
    use core::cell::{Cell, RefCell};

    type Nav = SpatialNavigator<TestHost>;
    type Log = Rc<RefCell<Vec<(u32, &'static str)>>>;

    const RIGHT: KeyInput = KeyInput::new(39);
    const ENTER: KeyInput = KeyInput::new(13);

    fn record(nav: &mut Nav) -> Log {
        let log: Log = Rc::default();
        let sink = log.clone();
        nav.add_listener(move |_, ev| {
            sink.borrow_mut().push((ev.target, ev.notification.name()));
            Outcome::Continue
        });
        log
    }

    fn veto(nav: &mut Nav, name: &'static str) {
        nav.add_listener(move |_, ev| {
            if ev.notification.name() == name {
                Outcome::Cancel
            } else {
                Outcome::Continue
            }
        });
    }

    fn names(log: &Log) -> Vec<(u32, &'static str)> {
        log.borrow().clone()
    }

    fn id(s: &str) -> SectionId {
        SectionId::from(s)
    }

    /// Three boxes in one row, one section.
    fn row() -> Nav {
        let mut host = TestHost::new();
        host.add(1, "row", (0.0, 0.0, 100.0, 100.0));
        host.add(2, "row", (150.0, 0.0, 250.0, 100.0));
        host.add(3, "row", (300.0, 0.0, 400.0, 100.0));
        let mut nav = SpatialNavigator::new(host);
        nav.add_with_id("row", SectionConfig::new("row")).unwrap();
        nav
    }

    /// Section `a` holds 1; section `b` to its right holds 2 and, below it, 4.
    fn two_sections() -> Nav {
        let mut host = TestHost::new();
        host.add(1, "a", (0.0, 0.0, 100.0, 100.0));
        host.add(2, "b", (150.0, 0.0, 250.0, 100.0));
        host.add(4, "b", (150.0, 200.0, 250.0, 300.0));
        let mut nav = SpatialNavigator::new(host);
        nav.add_with_id("a", SectionConfig::new("a")).unwrap();
        nav.add_with_id("b", SectionConfig::new("b")).unwrap();
        nav
    }

    #[test]
    fn walks_a_row() {
        let mut nav = row();
        assert!(nav.focus(FocusTarget::Element(1), false));
        assert!(nav.move_focus(Direction::Right, None));
        assert_eq!(nav.host().focused(), Some(2));
        assert!(nav.move_focus(Direction::Right, None));
        assert_eq!(nav.host().focused(), Some(3));
        assert!(nav.move_focus(Direction::Left, None));
        assert_eq!(nav.host().focused(), Some(2));
        assert_eq!(
            nav.registry().get(&id("row")).unwrap().last_focused(),
            Some(2)
        );
    }

    #[test]
    fn move_runs_the_full_protocol() {
        let mut nav = row();
        nav.focus(FocusTarget::Element(1), true);
        let log = record(&mut nav);
        assert!(nav.move_focus(Direction::Right, None));
        assert_eq!(
            names(&log),
            vec![
                (1, "sn:willmove"),
                (1, "sn:willunfocus"),
                (1, "sn:unfocused"),
                (2, "sn:willfocus"),
                (2, "sn:focused"),
            ]
        );
        assert_eq!(nav.state(), TransitionState::Idle);
    }

    #[test]
    fn focus_detail_carries_direction_and_section() {
        let mut nav = row();
        nav.focus(FocusTarget::Element(1), true);
        let seen: Rc<RefCell<Vec<FocusDetail<u32>>>> = Rc::default();
        let sink = seen.clone();
        nav.add_listener(move |_, ev| {
            if let Notification::Focused(detail) = &ev.notification {
                sink.borrow_mut().push(detail.clone());
            }
            Outcome::Continue
        });
        nav.move_focus(Direction::Right, None);
        assert_eq!(
            seen.borrow().as_slice(),
            &[FocusDetail {
                previous_element: Some(1),
                section: Some(id("row")),
                direction: Some(Direction::Right),
                native: false,
            }]
        );
    }

    #[test]
    fn failed_move_leaves_focus_unchanged() {
        let mut nav = row();
        nav.focus(FocusTarget::Element(3), true);
        let log = record(&mut nav);
        assert!(!nav.move_focus(Direction::Right, None));
        assert!(!nav.move_focus(Direction::Right, None));
        assert_eq!(nav.host().focused(), Some(3));
        assert_eq!(
            names(&log),
            vec![
                (3, "sn:willmove"),
                (3, "sn:navigatefailed"),
                (3, "sn:willmove"),
                (3, "sn:navigatefailed"),
            ]
        );
    }

    #[test]
    fn move_without_origin_fails() {
        let mut nav = row();
        assert!(!nav.move_focus(Direction::Right, None));
        // An explicit origin does not need focus.
        assert!(nav.move_focus(Direction::Right, Some(&Selector::Element(1))));
        assert_eq!(nav.host().focused(), Some(2));
    }

    #[test]
    fn disabled_section_contributes_nothing() {
        let mut nav = two_sections();
        nav.disable(&id("b")).unwrap();
        nav.focus(FocusTarget::Element(1), true);
        assert!(!nav.move_focus(Direction::Right, None));
        assert_eq!(nav.host().focused(), Some(1));

        nav.enable(&id("b")).unwrap();
        assert!(nav.move_focus(Direction::Right, None));
        assert_eq!(nav.host().focused(), Some(2));
    }

    #[test]
    fn leave_for_block_aborts_the_move() {
        let mut nav = two_sections();
        nav.set_section(
            &id("a"),
            SectionConfig {
                leave_for: Some(LeaveForMap::new().with(Direction::Right, LeaveFor::Block)),
                ..SectionConfig::default()
            },
        )
        .unwrap();
        nav.focus(FocusTarget::Element(1), true);
        let log = record(&mut nav);
        assert!(!nav.move_focus(Direction::Right, None));
        assert_eq!(nav.host().focused(), Some(1));
        assert_eq!(
            names(&log),
            vec![(1, "sn:willmove"), (1, "sn:navigatefailed")]
        );
    }

    #[test]
    fn leave_for_redirect_replaces_the_winner() {
        let mut nav = two_sections();
        nav.set_section(
            &id("a"),
            SectionConfig {
                leave_for: Some(
                    LeaveForMap::new()
                        .with(Direction::Right, LeaveFor::Redirect(ExtSelector::Selector(
                            Selector::Element(4),
                        )))
                        .with(Direction::Up, LeaveFor::parse("@b")),
                ),
                ..SectionConfig::default()
            },
        )
        .unwrap();
        nav.focus(FocusTarget::Element(1), true);
        assert!(nav.move_focus(Direction::Right, None));
        assert_eq!(nav.host().focused(), Some(4));

        // Nothing lies above 1, but the override still applies and enters
        // section b at its last focused element.
        nav.focus(FocusTarget::Element(1), true);
        assert!(nav.move_focus(Direction::Up, None));
        assert_eq!(nav.host().focused(), Some(4));
    }

    #[test]
    fn enter_to_last_focused() {
        let mut nav = two_sections();
        nav.set_section(
            &id("b"),
            SectionConfig {
                enter_to: Some(EnterTo::LastFocused),
                ..SectionConfig::default()
            },
        )
        .unwrap();
        nav.focus(FocusTarget::Element(4), true);
        nav.focus(FocusTarget::Element(1), true);
        assert!(nav.move_focus(Direction::Right, None));
        assert_eq!(nav.host().focused(), Some(4));
    }

    #[test]
    fn enter_to_default_element() {
        let mut nav = two_sections();
        nav.set_section(
            &id("b"),
            SectionConfig {
                enter_to: Some(EnterTo::DefaultElement),
                default_element: Some(Selector::Element(4)),
                ..SectionConfig::default()
            },
        )
        .unwrap();
        nav.focus(FocusTarget::Element(1), true);
        assert!(nav.move_focus(Direction::Right, None));
        assert_eq!(nav.host().focused(), Some(4));
    }

    #[test]
    fn enter_to_falls_back_to_the_winner() {
        let mut nav = two_sections();
        nav.set_section(
            &id("b"),
            SectionConfig {
                enter_to: Some(EnterTo::LastFocused),
                ..SectionConfig::default()
            },
        )
        .unwrap();
        nav.focus(FocusTarget::Element(1), true);
        assert!(nav.move_focus(Direction::Right, None));
        assert_eq!(nav.host().focused(), Some(2));
    }

    /// Section `a` holds 1 and, far right, 5; section `b` holds 2 in between.
    fn restrict_layout(restrict: Restrict) -> Nav {
        let mut host = TestHost::new();
        host.add(1, "a", (0.0, 0.0, 100.0, 100.0));
        host.add(2, "b", (150.0, 0.0, 250.0, 100.0));
        host.add(5, "a", (600.0, 0.0, 700.0, 100.0));
        let mut nav = SpatialNavigator::new(host);
        nav.add_with_id(
            "a",
            SectionConfig {
                restrict: Some(restrict),
                ..SectionConfig::new("a")
            },
        )
        .unwrap();
        nav.add_with_id("b", SectionConfig::new("b")).unwrap();
        nav.focus(FocusTarget::Element(1), true);
        nav
    }

    #[test]
    fn restrict_policies() {
        let mut nav = restrict_layout(Restrict::SelfFirst);
        assert!(nav.move_focus(Direction::Right, None));
        assert_eq!(nav.host().focused(), Some(5));

        let mut nav = restrict_layout(Restrict::None);
        assert!(nav.move_focus(Direction::Right, None));
        assert_eq!(nav.host().focused(), Some(2));

        let mut nav = restrict_layout(Restrict::SelfOnly);
        assert!(!nav.move_focus(Direction::Left, None));
        assert!(nav.move_focus(Direction::Right, None));
        assert_eq!(nav.host().focused(), Some(5));
        // From 5 nothing in its own section lies right; 2 is never considered.
        assert!(!nav.move_focus(Direction::Right, None));
    }

    #[test]
    fn self_first_falls_back_to_other_sections() {
        let mut nav = two_sections();
        nav.focus(FocusTarget::Element(1), true);
        assert!(nav.move_focus(Direction::Right, None));
        assert_eq!(nav.host().focused(), Some(2));

        nav.set_section(
            &id("a"),
            SectionConfig {
                restrict: Some(Restrict::SelfOnly),
                ..SectionConfig::default()
            },
        )
        .unwrap();
        nav.focus(FocusTarget::Element(1), true);
        assert!(!nav.move_focus(Direction::Right, None));
    }

    #[test]
    fn remember_source_returns_to_the_origin() {
        let mut host = TestHost::new();
        host.add(1, "g", (0.0, 40.0, 100.0, 140.0));
        host.add(2, "g", (200.0, 0.0, 300.0, 100.0));
        host.add(3, "g", (100.0, -20.0, 180.0, 60.0));
        let mut nav = SpatialNavigator::new(host);
        let g = nav
            .add_with_id(
                "g",
                SectionConfig {
                    remember_source: Some(true),
                    ..SectionConfig::new("g")
                },
            )
            .unwrap();

        nav.focus(FocusTarget::Element(1), true);
        assert!(nav.move_focus(Direction::Right, None));
        assert_eq!(nav.host().focused(), Some(2));
        assert_eq!(
            nav.registry().get(&g).unwrap().previous(),
            Some(Remembered {
                source: 1,
                destination: 2,
                reverse: Direction::Left,
            })
        );
        assert!(nav.move_focus(Direction::Left, None));
        assert_eq!(nav.host().focused(), Some(1));

        // Without the flag, geometry wins.
        nav.set_section(
            &g,
            SectionConfig {
                remember_source: Some(false),
                ..SectionConfig::default()
            },
        )
        .unwrap();
        nav.focus(FocusTarget::Element(1), true);
        nav.move_focus(Direction::Right, None);
        assert!(nav.move_focus(Direction::Left, None));
        assert_eq!(nav.host().focused(), Some(3));
    }

    #[test]
    fn vetoed_unfocus_changes_nothing() {
        let mut nav = row();
        nav.focus(FocusTarget::Element(1), true);
        let log = record(&mut nav);
        veto(&mut nav, "sn:willunfocus");
        nav.host_mut().ops.clear();

        assert!(!nav.move_focus(Direction::Right, None));
        assert_eq!(nav.host().focused(), Some(1));
        assert!(nav.host().ops.is_empty());
        assert_eq!(
            names(&log),
            vec![(1, "sn:willmove"), (1, "sn:willunfocus")]
        );
        assert_eq!(nav.state(), TransitionState::Idle);
    }

    #[test]
    fn vetoed_focus_stops_after_the_blur() {
        let mut nav = row();
        nav.focus(FocusTarget::Element(1), true);
        veto(&mut nav, "sn:willfocus");
        nav.host_mut().ops.clear();

        assert!(!nav.move_focus(Direction::Right, None));
        assert_eq!(nav.host().ops, vec![HostOp::Blur(1)]);
        assert_eq!(nav.host().focused(), None);
        assert_eq!(
            nav.registry().get(&id("row")).unwrap().last_focused(),
            Some(1)
        );
    }

    #[test]
    fn vetoed_willmove_is_silent() {
        let mut nav = row();
        nav.focus(FocusTarget::Element(1), true);
        veto(&mut nav, "sn:willmove");
        let log = record(&mut nav);
        assert!(!nav.move_focus(Direction::Right, None));
        assert!(names(&log).is_empty());
        assert_eq!(nav.host().focused(), Some(1));
    }

    #[test]
    fn silent_focus_fires_nothing() {
        let mut nav = row();
        let log = record(&mut nav);
        assert!(nav.focus(FocusTarget::Element(2), true));
        assert!(names(&log).is_empty());
        assert!(!nav.is_paused());
        assert_eq!(nav.host().focused(), Some(2));
        assert_eq!(nav.registry().last_section(), Some(&id("row")));
    }

    #[test]
    fn paused_moves_skip_the_protocol() {
        let mut nav = row();
        nav.focus(FocusTarget::Element(1), true);
        let log = record(&mut nav);
        nav.pause();
        assert!(nav.move_focus(Direction::Right, None));
        assert_eq!(nav.host().focused(), Some(2));
        assert_eq!(names(&log), vec![(1, "sn:willmove")]);
        // Silent focus while already paused keeps the pause.
        nav.focus(FocusTarget::Element(3), true);
        assert!(nav.is_paused());
        nav.resume();
        assert!(!nav.is_paused());
    }

    #[test]
    fn nested_requests_take_the_silent_path() {
        let mut nav = row();
        nav.focus(FocusTarget::Element(1), true);
        let log = record(&mut nav);
        nav.add_listener(|nav, ev| {
            if ev.target == 2 && ev.notification.name() == "sn:focused" {
                assert_eq!(nav.state(), TransitionState::InProgress);
                assert!(nav.focus(FocusTarget::Element(3), false));
            }
            Outcome::Continue
        });
        nav.host_mut().ops.clear();

        assert!(nav.move_focus(Direction::Right, None));
        assert_eq!(nav.host().focused(), Some(3));
        assert_eq!(
            nav.host().ops,
            vec![
                HostOp::Blur(1),
                HostOp::Focus(2),
                HostOp::Blur(2),
                HostOp::Focus(3),
            ]
        );
        // Element 3 never saw the cancelable protocol.
        assert!(!names(&log).iter().any(|&(target, _)| target == 3));
        assert_eq!(nav.state(), TransitionState::Idle);
    }

    #[test]
    fn hooks_observe_requests_from_idle_hooks() {
        let mut nav = row();
        nav.focus(FocusTarget::Element(3), true);
        let log = record(&mut nav);
        veto(&mut nav, "sn:willfocus");
        // Wrap around when the row runs out.
        nav.add_listener(|nav, ev| {
            if ev.notification.name() == "sn:navigatefailed" {
                assert_eq!(nav.state(), TransitionState::Idle);
                assert!(!nav.focus(FocusTarget::Element(1), false));
            }
            Outcome::Continue
        });
        nav.host_mut().ops.clear();

        assert!(!nav.move_focus(Direction::Right, None));
        assert_eq!(
            names(&log),
            vec![
                (3, "sn:willmove"),
                (3, "sn:navigatefailed"),
                (3, "sn:willunfocus"),
                (3, "sn:unfocused"),
                (1, "sn:willfocus"),
            ]
        );
        assert_eq!(nav.host().ops, vec![HostOp::Blur(3)]);
        assert_eq!(nav.host().focused(), None);
        assert_eq!(
            nav.registry().get(&id("row")).unwrap().last_focused(),
            Some(3)
        );
        assert_eq!(nav.state(), TransitionState::Idle);
    }

    #[test]
    fn hooks_observe_requests_from_willmove_and_enter() {
        let mut nav = row();
        nav.focus(FocusTarget::Element(1), true);
        let log = record(&mut nav);
        nav.add_listener(|nav, ev| {
            match ev.notification.name() {
                "sn:willmove" if ev.target == 1 => {
                    nav.focus(FocusTarget::Element(3), false);
                    Outcome::Cancel
                }
                "sn:enter-down" => {
                    nav.focus(FocusTarget::Element(2), false);
                    Outcome::Continue
                }
                _ => Outcome::Continue,
            }
        });

        assert!(!nav.move_focus(Direction::Right, None));
        assert_eq!(nav.host().focused(), Some(3));
        assert_eq!(
            names(&log),
            vec![
                (1, "sn:willmove"),
                (1, "sn:willunfocus"),
                (1, "sn:unfocused"),
                (3, "sn:willfocus"),
                (3, "sn:focused"),
            ]
        );

        log.borrow_mut().clear();
        assert_eq!(nav.handle_key_down(ENTER), KeyResponse::Ignored);
        assert_eq!(nav.host().focused(), Some(2));
        assert_eq!(
            names(&log),
            vec![
                (3, "sn:enter-down"),
                (3, "sn:willunfocus"),
                (3, "sn:unfocused"),
                (2, "sn:willfocus"),
                (2, "sn:focused"),
            ]
        );
    }

    #[test]
    fn removed_hooks_stay_removed_during_a_walk() {
        let mut nav = row();
        let gone = nav.add_listener(|_, _| Outcome::Continue);
        assert!(nav.remove_listener(gone));
        let results: Rc<RefCell<Vec<bool>>> = Rc::default();
        let sink = results.clone();
        nav.add_listener(move |nav, ev| {
            if ev.notification.name() == "sn:focused" {
                sink.borrow_mut().push(nav.remove_listener(gone));
            }
            Outcome::Continue
        });

        nav.focus(FocusTarget::Element(1), false);
        assert_eq!(*results.borrow(), vec![false]);
        assert_eq!(nav.listener_count(), 1);
    }

    #[test]
    fn per_element_override() {
        let mut nav = two_sections();
        nav.host_mut().set_attribute(1, "data-sn-down", "@b");
        nav.host_mut().set_attribute(1, "data-sn-right", "");
        nav.focus(FocusTarget::Element(1), true);
        let log = record(&mut nav);

        // An empty override fails even though 2 lies to the right.
        assert!(!nav.move_focus(Direction::Right, None));
        assert_eq!(
            names(&log),
            vec![(1, "sn:willmove"), (1, "sn:navigatefailed")]
        );
        assert!(nav.move_focus(Direction::Down, None));
        assert_eq!(nav.host().focused(), Some(2));
    }

    #[test]
    fn focus_section_order() {
        let mut nav = two_sections();
        assert!(nav.focus(FocusTarget::Auto, true));
        assert_eq!(nav.host().focused(), Some(1));

        nav.set_default_section(Some(&id("b"))).unwrap();
        assert!(nav.focus(FocusTarget::Auto, true));
        assert_eq!(nav.host().focused(), Some(2));

        // The default element wins over the last focused one by default.
        nav.focus(FocusTarget::Element(4), true);
        nav.set_section(
            &id("b"),
            SectionConfig {
                default_element: Some(Selector::Element(2)),
                ..SectionConfig::default()
            },
        )
        .unwrap();
        assert!(nav.focus_section(Some(&id("b"))));
        assert_eq!(nav.host().focused(), Some(2));

        nav.focus(FocusTarget::Element(4), true);
        nav.set_section(
            &id("b"),
            SectionConfig {
                enter_to: Some(EnterTo::LastFocused),
                ..SectionConfig::default()
            },
        )
        .unwrap();
        assert!(nav.focus_section(Some(&id("b"))));
        assert_eq!(nav.host().focused(), Some(4));

        nav.disable(&id("b")).unwrap();
        assert!(!nav.focus_section(Some(&id("b"))));
        assert!(!nav.focus_section(Some(&id("missing"))));
    }

    #[test]
    fn focus_targets() {
        let mut nav = two_sections();
        assert!(nav.focus(FocusTarget::parse("b"), true));
        assert_eq!(nav.host().focused(), Some(2));
        assert!(nav.focus(FocusTarget::parse("@a"), true));
        assert_eq!(nav.host().focused(), Some(1));
        assert!(nav.focus(FocusTarget::Extended(ExtSelector::parse("b")), true));
        assert_eq!(nav.host().focused(), Some(2));
        assert!(!nav.focus(FocusTarget::parse("nothing"), true));
        assert!(!nav.focus(FocusTarget::Element(99), true));
        assert_eq!(FocusTarget::<u32>::parse(""), FocusTarget::Auto);

        // An empty name enters a section like `Auto`.
        nav.set_default_section(Some(&id("a"))).unwrap();
        assert!(nav.focus(FocusTarget::Named(String::new()), true));
        assert_eq!(nav.host().focused(), Some(1));
    }

    #[test]
    fn native_focus_and_blur() {
        let mut nav = row();
        let log = record(&mut nav);
        nav.host_mut().set_focused(Some(2));
        nav.handle_native_focus(2);
        assert_eq!(names(&log), vec![(2, "sn:willfocus"), (2, "sn:focused")]);
        assert_eq!(nav.registry().last_section(), Some(&id("row")));

        log.borrow_mut().clear();
        nav.handle_native_blur(2);
        assert_eq!(
            names(&log),
            vec![(2, "sn:willunfocus"), (2, "sn:unfocused")]
        );

        // Elements outside every section are ignored.
        nav.host_mut().add(9, "other", (0.0, 500.0, 10.0, 510.0));
        log.borrow_mut().clear();
        nav.handle_native_focus(9);
        assert!(names(&log).is_empty());
    }

    #[test]
    fn vetoed_native_focus_blurs() {
        let mut nav = row();
        veto(&mut nav, "sn:willfocus");
        nav.host_mut().set_focused(Some(2));
        nav.handle_native_focus(2);
        assert_eq!(nav.host().ops, vec![HostOp::Blur(2)]);
        assert_eq!(nav.host().focused(), None);
        assert_eq!(nav.state(), TransitionState::Idle);
        assert_eq!(nav.registry().last_section(), None);
    }

    #[test]
    fn vetoed_native_blur_defers_a_refocus() {
        let mut nav = row();
        nav.focus(FocusTarget::Element(1), true);
        let log = record(&mut nav);
        veto(&mut nav, "sn:willunfocus");
        nav.host_mut().set_focused(None);
        nav.handle_native_blur(1);

        assert!(nav.has_deferred());
        assert_eq!(nav.state(), TransitionState::InProgress);
        // A second blur is ignored while the transition is in flight.
        nav.handle_native_blur(1);
        assert_eq!(names(&log), vec![(1, "sn:willunfocus")]);

        assert!(nav.run_deferred());
        assert!(!nav.has_deferred());
        assert!(!nav.run_deferred());
        assert_eq!(nav.host().focused(), Some(1));
        assert_eq!(nav.state(), TransitionState::Idle);
    }

    #[test]
    fn paused_native_focus_only_records() {
        let mut nav = row();
        let log = record(&mut nav);
        nav.pause();
        nav.handle_native_focus(3);
        nav.handle_native_blur(3);
        assert!(names(&log).is_empty());
        assert_eq!(
            nav.registry().get(&id("row")).unwrap().last_focused(),
            Some(3)
        );
    }

    #[test]
    fn direction_keys() {
        let mut nav = row();
        nav.focus(FocusTarget::Element(1), true);
        assert_eq!(nav.handle_key_down(RIGHT), KeyResponse::PreventDefault);
        assert_eq!(nav.host().focused(), Some(2));

        let shifted = RIGHT.with_modifiers(Modifiers::SHIFT);
        assert_eq!(nav.handle_key_down(shifted), KeyResponse::Ignored);
        assert_eq!(nav.handle_key_down(KeyInput::new(65)), KeyResponse::Ignored);
        assert_eq!(nav.host().focused(), Some(2));

        // A failed move still consumes the key.
        nav.focus(FocusTarget::Element(3), true);
        assert_eq!(nav.handle_key_down(RIGHT), KeyResponse::PreventDefault);
        assert_eq!(nav.host().focused(), Some(3));

        nav.pause();
        assert_eq!(nav.handle_key_down(RIGHT), KeyResponse::Ignored);
    }

    #[test]
    fn direction_key_without_focus_enters_a_section() {
        let mut nav = row();
        assert_eq!(nav.handle_key_down(RIGHT), KeyResponse::PreventDefault);
        assert_eq!(nav.host().focused(), Some(1));

        // With focus lost, the last focused element is the origin.
        nav.host_mut().set_focused(None);
        assert_eq!(nav.handle_key_down(RIGHT), KeyResponse::PreventDefault);
        assert_eq!(nav.host().focused(), Some(2));
    }

    #[test]
    fn keys_ignored_without_sections() {
        let mut nav = SpatialNavigator::new(TestHost::new());
        assert_eq!(nav.handle_key_down(RIGHT), KeyResponse::Ignored);
        assert_eq!(nav.handle_key_up(ENTER), KeyResponse::Ignored);
    }

    #[test]
    fn enter_key_notifications() {
        let mut nav = row();
        nav.focus(FocusTarget::Element(1), true);
        let log = record(&mut nav);
        assert_eq!(nav.handle_key_down(ENTER), KeyResponse::Ignored);
        assert_eq!(nav.handle_key_up(ENTER), KeyResponse::Ignored);
        assert_eq!(
            names(&log),
            vec![(1, "sn:enter-down"), (1, "sn:enter-up")]
        );

        veto(&mut nav, "sn:enter-up");
        assert_eq!(nav.handle_key_up(ENTER), KeyResponse::PreventDefault);
        assert_eq!(
            nav.handle_key_up(ENTER.with_modifiers(Modifiers::ALT)),
            KeyResponse::Ignored
        );
        // Key up never moves.
        assert_eq!(nav.handle_key_up(RIGHT), KeyResponse::Ignored);
    }

    #[test]
    fn custom_key_map() {
        let mut nav = row();
        nav.focus(FocusTarget::Element(1), true);
        nav.key_map_mut().bind(76, Direction::Right);
        assert_eq!(nav.handle_key_down(KeyInput::new(76)), KeyResponse::PreventDefault);
        assert_eq!(nav.host().focused(), Some(2));
    }

    #[test]
    fn make_focusable_sets_tab_index() {
        let mut nav = row();
        nav.host_mut().add(7, "button", (500.0, 0.0, 600.0, 100.0));
        nav.host_mut().set_attribute(2, TAB_INDEX_ATTRIBUTE, "0");
        nav.set_section(
            &id("row"),
            SectionConfig {
                selector: Some(Selector::from("row, button")),
                ..SectionConfig::default()
            },
        )
        .unwrap();

        nav.make_focusable(None).unwrap();
        let tab_index = |nav: &Nav, e| nav.host().attribute(e, TAB_INDEX_ATTRIBUTE);
        assert_eq!(tab_index(&nav, 1), Some("-1".to_string()));
        assert_eq!(tab_index(&nav, 2), Some("0".to_string()));
        assert_eq!(tab_index(&nav, 7), None);

        assert_eq!(
            nav.make_focusable(Some(&id("nope"))),
            Err(Error::UnknownSection(id("nope")))
        );
        assert_eq!(nav.make_focusable(Some(&id("row"))), Ok(()));
    }

    #[test]
    fn listeners_can_remove_themselves() {
        let mut nav = row();
        let calls = Rc::new(Cell::new(0));
        let own_id: Rc<Cell<Option<ListenerId>>> = Rc::default();
        let (c, slot) = (calls.clone(), own_id.clone());
        let listener = nav.add_listener(move |nav, _| {
            c.set(c.get() + 1);
            if let Some(me) = slot.get() {
                assert!(nav.remove_listener(me));
            }
            Outcome::Continue
        });
        own_id.set(Some(listener));

        nav.focus(FocusTarget::Element(1), false);
        assert_eq!(calls.get(), 1);
        assert_eq!(nav.listener_count(), 0);
        assert!(!nav.remove_listener(listener));
    }

    #[test]
    fn remove_and_clear() {
        let mut nav = two_sections();
        nav.focus(FocusTarget::Element(2), true);
        nav.remove(&id("b")).unwrap();
        assert_eq!(nav.registry().last_section(), None);
        assert_eq!(nav.remove(&id("b")), Err(Error::UnknownSection(id("b"))));

        nav.clear();
        assert!(nav.registry().is_empty());
        assert_eq!(nav.state(), TransitionState::Idle);
        assert!(!nav.focus(FocusTarget::Auto, false));
    }

    #[test]
    fn exclude_removes_first_occurrences() {
        assert_eq!(exclude(vec![1, 2, 1, 3], &[1, 3]), vec![2, 1]);
        assert_eq!(exclude(vec![1, 2], &[9]), vec![1, 2]);
    }
}
