// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Remote-control navigation over a sidebar menu and a tile grid.
//!
//! This example shows how to:
//! - adapt a toy scene to `FocusHost`,
//! - register two sections with their own entry and exit policies,
//! - observe and veto transitions with a hook,
//! - drive the navigator from raw key codes.
//!
//! Set `RUST_LOG`-style verbosity by editing the subscriber below; navigator
//! internals log at `debug` and `trace`.
//!
//! Run:
//! - `cargo run -p understory_demos --example spatial_nav_menu`

use kurbo::Rect;
use understory_focus::Direction;
use understory_spatial_nav::{
    EnterTo, FocusHost, FocusTarget, KeyInput, KeyResponse, LeaveFor, LeaveForMap, Notification,
    Outcome, Restrict, SectionConfig, Selector, SpatialNavigator,
};

const LEFT: u32 = 37;
const UP: u32 = 38;
const RIGHT: u32 = 39;
const DOWN: u32 = 40;
const ENTER: u32 = 13;

#[derive(Debug)]
struct Node {
    name: String,
    class: &'static str,
    rect: Rect,
    disabled: bool,
}

/// A flat scene: elements are indices into `nodes`.
#[derive(Debug, Default)]
struct Screen {
    nodes: Vec<Node>,
    focused: Option<usize>,
}

impl Screen {
    fn push(&mut self, name: impl Into<String>, class: &'static str, rect: Rect) {
        self.nodes.push(Node {
            name: name.into(),
            class,
            rect,
            disabled: false,
        });
    }

    fn name(&self, element: usize) -> &str {
        self.nodes.get(element).map_or("?", |n| n.name.as_str())
    }

    /// Supports `.class`, `#name`, and comma-separated lists of those.
    fn matches_one(node: &Node, pattern: &str) -> bool {
        if let Some(class) = pattern.strip_prefix('.') {
            node.class == class
        } else if let Some(name) = pattern.strip_prefix('#') {
            node.name == name
        } else {
            false
        }
    }
}

impl FocusHost for Screen {
    type Element = usize;

    fn query(&self, pattern: &str) -> Vec<usize> {
        (0..self.nodes.len())
            .filter(|&i| self.matches(i, pattern))
            .collect()
    }

    fn matches(&self, element: usize, pattern: &str) -> bool {
        let Some(node) = self.nodes.get(element) else {
            return false;
        };
        pattern
            .split(',')
            .any(|p| Self::matches_one(node, p.trim()))
    }

    fn rect(&self, element: usize) -> Option<Rect> {
        self.nodes.get(element).map(|n| n.rect)
    }

    fn focus(&mut self, element: usize) {
        self.focused = Some(element);
    }

    fn blur(&mut self, element: usize) {
        if self.focused == Some(element) {
            self.focused = None;
        }
    }

    fn focused(&self) -> Option<usize> {
        self.focused
    }

    fn is_disabled(&self, element: usize) -> bool {
        self.nodes.get(element).is_some_and(|n| n.disabled)
    }

    fn attribute(&self, _element: usize, _name: &str) -> Option<String> {
        None
    }

    fn set_attribute(&mut self, _element: usize, _name: &str, _value: &str) {}
}

fn build_screen() -> Screen {
    let mut screen = Screen::default();
    // Sidebar: three stacked entries on the left.
    for (i, label) in ["home", "movies", "settings"].into_iter().enumerate() {
        let y = i as f64 * 80.0;
        screen.push(label, "menu", Rect::new(0.0, y, 100.0, y + 60.0));
    }
    // Grid: two rows of three tiles.
    for row in 0..2 {
        for col in 0..3 {
            let x = 150.0 + col as f64 * 120.0;
            let y = row as f64 * 120.0;
            screen.push(
                format!("tile-{row}-{col}"),
                "tile",
                Rect::new(x, y, x + 100.0, y + 100.0),
            );
        }
    }
    screen
}

fn main() {
    tracing_subscriber::fmt()
        .with_max_level(tracing_subscriber::filter::LevelFilter::INFO)
        .init();

    let mut nav = SpatialNavigator::new(build_screen());

    // The menu remembers where the user left it and never lets focus wander upward.
    let menu = nav
        .add_with_id(
            "menu",
            SectionConfig {
                enter_to: Some(EnterTo::LastFocused),
                leave_for: Some(LeaveForMap::new().with(Direction::Up, LeaveFor::Block)),
                ..SectionConfig::new(".menu")
            },
        )
        .unwrap_or_else(|e| panic!("{e}"));
    // The grid keeps focus inside itself unless a neighbor is the only option,
    // and leaving left always returns to the menu's last entry.
    let grid = nav
        .add_with_id(
            "grid",
            SectionConfig {
                default_element: Some(Selector::from("#tile-0-0")),
                restrict: Some(Restrict::SelfFirst),
                leave_for: Some(LeaveForMap::new().with(Direction::Left, LeaveFor::parse("@menu"))),
                ..SectionConfig::new(".tile")
            },
        )
        .unwrap_or_else(|e| panic!("{e}"));
    nav.set_default_section(Some(&grid))
        .unwrap_or_else(|e| panic!("{e}"));

    // Print every notification; refuse to focus the locked tile.
    nav.add_listener(|nav, ev| {
        let target = nav.host().name(ev.target).to_owned();
        println!("  {:<18} {target}", ev.notification.name());
        match &ev.notification {
            Notification::WillFocus(_) if target == "tile-1-1" => {
                println!("  (tile-1-1 is locked)");
                Outcome::Cancel
            }
            _ => Outcome::Continue,
        }
    });

    nav.focus(FocusTarget::Auto, false);
    report(&nav, "initial");

    let script = [
        ("right", RIGHT),
        ("right", RIGHT),
        ("right", RIGHT),
        ("down", DOWN),
        ("left", LEFT),
        ("left", LEFT),
        ("down", DOWN),
        ("up", UP),
        ("up", UP),
        ("up", UP),
        ("right", RIGHT),
        ("enter", ENTER),
    ];
    for (label, code) in script {
        println!("press {label}");
        let response = nav.handle_key_down(KeyInput::new(code));
        if code == ENTER {
            nav.handle_key_up(KeyInput::new(code));
        }
        if response == KeyResponse::Ignored {
            println!("  (ignored)");
        }
        report(&nav, label);
    }

    // Jump straight into the menu; it resumes where the user left it.
    println!("focus @{menu}");
    nav.focus(FocusTarget::Section(menu), false);
    report(&nav, "menu");
}

fn report(nav: &SpatialNavigator<Screen>, step: &str) {
    let focused = nav.host().focused().map_or("none", |e| nav.host().name(e));
    println!("[{step}] focused: {focused}");
}
