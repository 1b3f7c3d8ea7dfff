// Copyright 2025 the Sapling Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::boxed::Box;
use alloc::rc::Rc;
use core::fmt;

use sapling_gesture::{ButtonGesture, GestureExt};

use crate::{View, ViewExt};

/// A label that runs an action when pressed and released inside its bounds.
///
/// The press is recognized by a [`ButtonGesture`] attached to the label, so
/// taps and long presses attached beneath the button do not fire.
///
/// ```
/// use sapling_graph::{Button, Color, View};
///
/// let button = Button::new(|| {}, Color::RED);
/// assert_eq!(button.child_count(), 1);
/// ```
#[derive(Clone)]
pub struct Button<L> {
    label: L,
    action: Rc<dyn Fn()>,
    pressing: Option<Rc<dyn Fn(bool)>>,
}

impl<L: View + Clone> Button<L> {
    /// Creates a button showing `label` that runs `action` on release.
    #[must_use]
    pub fn new(action: impl Fn() + 'static, label: L) -> Self {
        Self {
            label,
            action: Rc::new(action),
            pressing: None,
        }
    }

    /// Runs `action` whenever the button becomes pressed or released.
    ///
    /// The pointer leaving the bounds while held reports `false`; coming
    /// back reports `true` again.
    #[must_use]
    pub fn on_pressing(mut self, action: impl Fn(bool) + 'static) -> Self {
        self.pressing = Some(Rc::new(action));
        self
    }

    /// The label.
    #[must_use]
    pub fn label(&self) -> &L {
        &self.label
    }
}

impl<L: fmt::Debug> fmt::Debug for Button<L> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Button")
            .field("label", &self.label)
            .finish_non_exhaustive()
    }
}

impl<L: View + Clone> View for Button<L> {
    fn body(&self) -> Box<dyn View> {
        let action = Rc::clone(&self.action);
        let mut gesture = ButtonGesture.on_ended(move |_| action());
        if let Some(pressing) = &self.pressing {
            let pressing = Rc::clone(pressing);
            gesture = gesture.on_pressing(move |pressed| pressing(pressed));
        }
        Box::new(self.label.clone().gesture(gesture))
    }
}
