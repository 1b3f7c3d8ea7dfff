// Copyright 2025 the Sapling Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

/// A key on the keyboard.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Key {
    /// A key producing a character.
    Character(char),
    /// Return or enter.
    Enter,
    /// Escape.
    Escape,
    /// Tab.
    Tab,
    /// Backspace.
    Backspace,
    /// Left arrow.
    ArrowLeft,
    /// Right arrow.
    ArrowRight,
    /// Up arrow.
    ArrowUp,
    /// Down arrow.
    ArrowDown,
}

/// Whether a key went down or up.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum KeyState {
    /// The key was pressed.
    Pressed,
    /// The key was released.
    Released,
}

/// A keyboard event as delivered by the window.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct KeyboardEvent {
    /// The key.
    pub key: Key,
    /// Press or release.
    pub state: KeyState,
    /// Event time in seconds.
    pub timestamp: f64,
}

impl KeyboardEvent {
    /// A key press.
    #[must_use]
    pub const fn pressed(key: Key, timestamp: f64) -> Self {
        Self {
            key,
            state: KeyState::Pressed,
            timestamp,
        }
    }

    /// A key release.
    #[must_use]
    pub const fn released(key: Key, timestamp: f64) -> Self {
        Self {
            key,
            state: KeyState::Released,
            timestamp,
        }
    }
}
