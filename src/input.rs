//! Input shared between the page's event handlers and the canvas layers.
//!
//! Handlers write, frames read. Both run on the UI thread and never overlap,
//! so a single `Rc<RefCell<_>>` is all the coordination needed.

use crate::pointer::PointerState;
use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

/// Key codes (`KeyboardEvent.code`) that flip rainbow mode, in order.
pub const RAINBOW_SEQUENCE: [&str; 10] = [
    "ArrowUp",
    "ArrowUp",
    "ArrowDown",
    "ArrowDown",
    "ArrowLeft",
    "ArrowRight",
    "ArrowLeft",
    "ArrowRight",
    "KeyB",
    "KeyA",
];

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum VisualMode {
    Normal,
    Rainbow,
}

impl Default for VisualMode {
    fn default() -> Self {
        VisualMode::Normal
    }
}

impl VisualMode {
    pub fn is_rainbow(self) -> bool {
        self == VisualMode::Rainbow
    }

    pub fn toggled(self) -> Self {
        match self {
            VisualMode::Normal => VisualMode::Rainbow,
            VisualMode::Rainbow => VisualMode::Normal,
        }
    }
}

/// Sliding window over the most recent key codes.
#[derive(Clone, Debug)]
pub struct KeySequence {
    target: Vec<String>,
    recent: VecDeque<String>,
}

impl Default for KeySequence {
    fn default() -> Self {
        KeySequence::new(&RAINBOW_SEQUENCE)
    }
}

impl KeySequence {
    pub fn new(target: &[&str]) -> Self {
        KeySequence {
            target: target.iter().map(|k| k.to_string()).collect(),
            recent: VecDeque::with_capacity(target.len() + 1),
        }
    }

    /// Records `code` and reports whether the last keys now spell the
    /// target. The window is left intact after a match.
    pub fn push(&mut self, code: &str) -> bool {
        if self.target.is_empty() {
            return false;
        }
        self.recent.push_back(code.to_owned());
        while self.recent.len() > self.target.len() {
            self.recent.pop_front();
        }
        self.recent.len() == self.target.len() && self.recent.iter().eq(self.target.iter())
    }

    pub fn retained(&self) -> usize {
        self.recent.len()
    }
}

#[derive(Debug, Default)]
pub struct InputState {
    pub pointer: PointerState,
    pub mode: VisualMode,
    keys: KeySequence,
}

impl InputState {
    pub fn on_pointer_move(&mut self, x: f64, y: f64) {
        self.pointer.move_to(x, y);
    }

    /// Feeds one key code to the sequence detector. Returns true when the
    /// key completed the sequence and the mode flipped.
    pub fn on_key(&mut self, code: &str) -> bool {
        if self.keys.push(code) {
            self.mode = self.mode.toggled();
            log::info!("rainbow mode {}", if self.mode.is_rainbow() { "on" } else { "off" });
            true
        } else {
            false
        }
    }
}

pub type SharedInput = Rc<RefCell<InputState>>;

pub fn shared() -> SharedInput {
    Rc::new(RefCell::new(InputState::default()))
}
