// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! In-memory host used by the unit tests.
//!
//! Elements are `u32` handles tagged with a single class name. A pattern is a
//! comma-separated list of class names and matches any of them.

use alloc::string::{String, ToString};
use alloc::vec::Vec;

use hashbrown::{HashMap, HashSet};
use kurbo::Rect;

use crate::FocusHost;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) enum HostOp {
    Focus(u32),
    Blur(u32),
}

#[derive(Debug, Default)]
pub(crate) struct TestHost {
    order: Vec<u32>,
    classes: HashMap<u32, String>,
    rects: HashMap<u32, Rect>,
    disabled: HashSet<u32>,
    attributes: HashMap<(u32, String), String>,
    focused: Option<u32>,
    pub(crate) ops: Vec<HostOp>,
}

impl TestHost {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn add(&mut self, id: u32, class: &str, (x0, y0, x1, y1): (f64, f64, f64, f64)) {
        if !self.classes.contains_key(&id) {
            self.order.push(id);
        }
        self.classes.insert(id, class.to_string());
        self.rects.insert(id, Rect::new(x0, y0, x1, y1));
    }

    pub(crate) fn set_disabled(&mut self, id: u32, disabled: bool) {
        if disabled {
            self.disabled.insert(id);
        } else {
            self.disabled.remove(&id);
        }
    }

    pub(crate) fn set_focused(&mut self, id: Option<u32>) {
        self.focused = id;
    }

    fn class_matches(&self, id: u32, pattern: &str) -> bool {
        let Some(class) = self.classes.get(&id) else {
            return false;
        };
        pattern.split(',').any(|p| p.trim() == class)
    }
}

impl FocusHost for TestHost {
    type Element = u32;

    fn query(&self, pattern: &str) -> Vec<u32> {
        self.order
            .iter()
            .copied()
            .filter(|&id| self.class_matches(id, pattern))
            .collect()
    }

    fn matches(&self, element: u32, pattern: &str) -> bool {
        self.class_matches(element, pattern)
    }

    fn rect(&self, element: u32) -> Option<Rect> {
        self.rects.get(&element).copied()
    }

    fn focus(&mut self, element: u32) {
        self.ops.push(HostOp::Focus(element));
        self.focused = Some(element);
    }

    fn blur(&mut self, element: u32) {
        self.ops.push(HostOp::Blur(element));
        if self.focused == Some(element) {
            self.focused = None;
        }
    }

    fn focused(&self) -> Option<u32> {
        self.focused
    }

    fn is_disabled(&self, element: u32) -> bool {
        self.disabled.contains(&element)
    }

    fn attribute(&self, element: u32, name: &str) -> Option<String> {
        self.attributes.get(&(element, name.to_string())).cloned()
    }

    fn set_attribute(&mut self, element: u32, name: &str, value: &str) {
        self.attributes
            .insert((element, name.to_string()), value.to_string());
    }
}
