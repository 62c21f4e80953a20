// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Raw key input and its translation into navigation intents.

use hashbrown::HashMap;
use understory_focus::Direction;

bitflags::bitflags! {
    /// Modifier keys held during a key event.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct Modifiers: u8 {
        /// Alt / Option.
        const ALT   = 0b0000_0001;
        /// Control.
        const CTRL  = 0b0000_0010;
        /// Meta / Command / Windows.
        const META  = 0b0000_0100;
        /// Shift.
        const SHIFT = 0b0000_1000;
    }
}

/// A raw key event.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct KeyInput {
    /// Platform key code.
    pub code: u32,
    /// Modifiers held.
    pub modifiers: Modifiers,
}

impl KeyInput {
    /// A key without modifiers.
    #[must_use]
    pub const fn new(code: u32) -> Self {
        Self {
            code,
            modifiers: Modifiers::empty(),
        }
    }

    /// The same key with `modifiers` held.
    #[must_use]
    pub const fn with_modifiers(self, modifiers: Modifiers) -> Self {
        Self { modifiers, ..self }
    }
}

/// What the host should do with a key event after the navigator saw it.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum KeyResponse {
    /// Not handled; let the event through.
    Ignored,
    /// Handled; suppress the platform default and stop propagation.
    PreventDefault,
}

/// A navigation intent decoded from a key code.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum KeyAction {
    /// A directional move.
    Move(Direction),
    /// The activation key.
    Enter,
}

/// Key code bindings.
///
/// The default binds the DOM arrow key codes (37 left, 38 up, 39 right,
/// 40 down) and enter (13).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct KeyMap {
    directions: HashMap<u32, Direction>,
    enter: Option<u32>,
}

impl Default for KeyMap {
    fn default() -> Self {
        let mut map = Self::empty();
        map.bind(37, Direction::Left);
        map.bind(38, Direction::Up);
        map.bind(39, Direction::Right);
        map.bind(40, Direction::Down);
        map.set_enter(Some(13));
        map
    }
}

impl KeyMap {
    /// A map with no bindings.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            directions: HashMap::new(),
            enter: None,
        }
    }

    /// Bind `code` to `direction`, replacing any previous binding of `code`.
    pub fn bind(&mut self, code: u32, direction: Direction) {
        self.directions.insert(code, direction);
    }

    /// Remove the direction binding of `code`.
    pub fn unbind(&mut self, code: u32) {
        self.directions.remove(&code);
    }

    /// Set or clear the activation key.
    pub fn set_enter(&mut self, code: Option<u32>) {
        self.enter = code;
    }

    /// Decode a key code.
    #[must_use]
    pub fn action(&self, code: u32) -> Option<KeyAction> {
        if let Some(direction) = self.directions.get(&code) {
            return Some(KeyAction::Move(*direction));
        }
        (self.enter == Some(code)).then_some(KeyAction::Enter)
    }
}
