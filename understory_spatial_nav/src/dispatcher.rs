// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The hook chain and its dispatch rules.
//!
//! Hooks run in registration order. For a cancelable notification the first
//! hook returning [`Outcome::Cancel`] stops the walk and vetoes the step; for an
//! informational notification every hook runs and outcomes are ignored.
//!
//! Hooks receive the navigator itself and may raise further notifications.
//! Each walk runs over a snapshot of the chain taken when it starts, so hooks
//! registered during a walk do not see the current notification, and hooks
//! removed during a walk are skipped from then on. A nested notification
//! reaches every registered hook except the ones currently running.

use alloc::boxed::Box;
use alloc::rc::Rc;
use alloc::vec::Vec;
use core::cell::RefCell;
use core::fmt;

use crate::event::{Event, Outcome};
use crate::{FocusHost, SpatialNavigator};

/// Handle returned by [`SpatialNavigator::add_listener`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ListenerId(u64);

/// A notification hook.
pub type Listener<H> =
    Box<dyn FnMut(&mut SpatialNavigator<H>, &Event<<H as FocusHost>::Element>) -> Outcome>;

type Entry<H> = (ListenerId, Rc<RefCell<Listener<H>>>);

pub(crate) struct Listeners<H: FocusHost> {
    entries: Vec<Entry<H>>,
    next_id: u64,
}

impl<H: FocusHost> Default for Listeners<H> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
            next_id: 0,
        }
    }
}

impl<H: FocusHost> fmt::Debug for Listeners<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Listeners")
            .field("len", &self.entries.len())
            .field("next_id", &self.next_id)
            .finish_non_exhaustive()
    }
}

impl<H: FocusHost> Listeners<H> {
    pub(crate) fn add(&mut self, listener: Listener<H>) -> ListenerId {
        let id = ListenerId(self.next_id);
        self.next_id += 1;
        self.entries.push((id, Rc::new(RefCell::new(listener))));
        id
    }

    pub(crate) fn remove(&mut self, id: ListenerId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|(i, _)| *i != id);
        self.entries.len() != before
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }

    fn contains(&self, id: ListenerId) -> bool {
        self.entries.iter().any(|(i, _)| *i == id)
    }

    fn snapshot(&self) -> Vec<Entry<H>> {
        self.entries.clone()
    }
}

/// Deliver `event` to the navigator's hooks.
///
/// Returns `false` if a hook vetoed a cancelable notification.
pub(crate) fn run<H: FocusHost>(
    navigator: &mut SpatialNavigator<H>,
    event: &Event<H::Element>,
) -> bool {
    let cancelable = event.notification.is_cancelable();
    for (id, cell) in navigator.listeners.snapshot() {
        if !navigator.listeners.contains(id) {
            continue;
        }
        // A hook that is already running raised this notification.
        let Ok(mut hook) = cell.try_borrow_mut() else {
            continue;
        };
        if (&mut *hook)(navigator, event) == Outcome::Cancel && cancelable {
            return false;
        }
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_host::TestHost;

    fn ignore(_: &mut SpatialNavigator<TestHost>, _: &Event<u32>) -> Outcome {
        Outcome::Continue
    }

    fn noop() -> Listener<TestHost> {
        Box::new(ignore)
    }

    #[test]
    fn remove_reports_membership() {
        let mut listeners = Listeners::<TestHost>::default();
        let a = listeners.add(noop());
        let b = listeners.add(noop());
        assert_eq!(listeners.len(), 2);
        assert!(listeners.remove(a));
        assert!(!listeners.remove(a));
        assert_eq!(listeners.len(), 1);
        assert!(listeners.contains(b));
        assert_ne!(a, b);
    }

    #[test]
    fn snapshot_keeps_hooks_alive_after_removal() {
        let mut listeners = Listeners::<TestHost>::default();
        let a = listeners.add(noop());
        let snapshot = listeners.snapshot();
        assert!(listeners.remove(a));
        assert_eq!(snapshot.len(), 1);
        assert!(!listeners.contains(a));
    }
}
