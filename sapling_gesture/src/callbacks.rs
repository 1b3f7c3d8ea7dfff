// Copyright 2025 the Sapling Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Attaching actions to gestures, and the builder methods on [`Gesture`].

use alloc::rc::Rc;
use alloc::vec::Vec;
use core::fmt;

use crate::{
    ExclusiveGesture, Gesture, GestureConfig, GestureState, GestureTargets, GestureUpdate,
    PointerEvent, PrimitiveGestureTypes, Recognizer, SequenceGesture, SimultaneousGesture,
    TargetKey, Updates,
};

type ValueAction<V> = Rc<dyn Fn(&V)>;
type PressAction = Rc<dyn Fn(bool)>;

/// Actions invoked as a recognizer reports updates.
pub struct GestureCallbacks<V> {
    changed: Vec<ValueAction<V>>,
    ended: Vec<ValueAction<V>>,
    pressing: Vec<PressAction>,
}

impl<V> GestureCallbacks<V> {
    /// Invokes the matching actions for `update`.
    pub fn dispatch(&self, update: &GestureUpdate<V>) {
        match update {
            GestureUpdate::Pressing(pressing) => self.pressing.iter().for_each(|f| f(*pressing)),
            GestureUpdate::Changed(value) => self.changed.iter().for_each(|f| f(value)),
            GestureUpdate::Ended(value) => self.ended.iter().for_each(|f| f(value)),
        }
    }

    /// Returns `true` if no actions are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.changed.is_empty() && self.ended.is_empty() && self.pressing.is_empty()
    }
}

impl<V> Default for GestureCallbacks<V> {
    fn default() -> Self {
        Self {
            changed: Vec::new(),
            ended: Vec::new(),
            pressing: Vec::new(),
        }
    }
}

impl<V> Clone for GestureCallbacks<V> {
    fn clone(&self) -> Self {
        Self {
            changed: self.changed.clone(),
            ended: self.ended.clone(),
            pressing: self.pressing.clone(),
        }
    }
}

impl<V> fmt::Debug for GestureCallbacks<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GestureCallbacks")
            .field("changed", &self.changed.len())
            .field("ended", &self.ended.len())
            .field("pressing", &self.pressing.len())
            .finish()
    }
}

/// A gesture with actions attached.
#[derive(Clone, Debug)]
pub struct WithCallbacks<G: Gesture> {
    gesture: G,
    callbacks: GestureCallbacks<G::Value>,
}

impl<G: Gesture> WithCallbacks<G> {
    /// Wraps `gesture` with no actions.
    #[must_use]
    pub fn new(gesture: G) -> Self {
        Self {
            gesture,
            callbacks: GestureCallbacks::default(),
        }
    }

    /// Adds an action run each time the value changes.
    #[must_use]
    pub fn on_changed(mut self, action: impl Fn(&G::Value) + 'static) -> Self {
        self.callbacks.changed.push(Rc::new(action));
        self
    }

    /// Adds an action run when the gesture is recognized.
    #[must_use]
    pub fn on_ended(mut self, action: impl Fn(&G::Value) + 'static) -> Self {
        self.callbacks.ended.push(Rc::new(action));
        self
    }

    /// Adds an action run when the pressed state changes.
    #[must_use]
    pub fn on_pressing(mut self, action: impl Fn(bool) + 'static) -> Self {
        self.callbacks.pressing.push(Rc::new(action));
        self
    }

    /// The wrapped gesture.
    #[must_use]
    pub fn gesture(&self) -> &G {
        &self.gesture
    }
}

impl<G: Gesture> Gesture for WithCallbacks<G> {
    type Value = G::Value;
    type Recognizer<K: TargetKey> = CallbackRecognizer<K, G>;

    fn make_recognizer<K: TargetKey>(
        &self,
        target: K,
        config: &GestureConfig,
    ) -> CallbackRecognizer<K, G> {
        CallbackRecognizer {
            inner: self.gesture.make_recognizer(target, config),
            callbacks: self.callbacks.clone(),
        }
    }
}

/// Recognizer for [`WithCallbacks`]; runs the actions and passes updates through.
#[derive(Debug)]
pub struct CallbackRecognizer<K: TargetKey, G: Gesture> {
    inner: G::Recognizer<K>,
    callbacks: GestureCallbacks<G::Value>,
}

impl<K: TargetKey, G: Gesture> CallbackRecognizer<K, G> {
    fn run(&self, updates: Updates<G::Value>) -> Updates<G::Value> {
        for update in &updates {
            self.callbacks.dispatch(update);
        }
        updates
    }
}

impl<K: TargetKey, G: Gesture> Recognizer<K> for CallbackRecognizer<K, G> {
    type Value = G::Value;

    fn gesture_type(&self) -> PrimitiveGestureTypes {
        self.inner.gesture_type()
    }

    fn state(&self) -> GestureState {
        self.inner.state()
    }

    fn is_valid(&self, targets: &dyn GestureTargets<K>) -> bool {
        self.inner.is_valid(targets)
    }

    fn set_type_filter(&mut self, filter: PrimitiveGestureTypes) -> PrimitiveGestureTypes {
        self.inner.set_type_filter(filter)
    }

    fn began(&mut self, targets: &dyn GestureTargets<K>, event: &PointerEvent) -> Updates<G::Value> {
        let updates = self.inner.began(targets, event);
        self.run(updates)
    }

    fn moved(&mut self, targets: &dyn GestureTargets<K>, event: &PointerEvent) -> Updates<G::Value> {
        let updates = self.inner.moved(targets, event);
        self.run(updates)
    }

    fn ended(&mut self, targets: &dyn GestureTargets<K>, event: &PointerEvent) -> Updates<G::Value> {
        let updates = self.inner.ended(targets, event);
        self.run(updates)
    }

    fn cancelled(
        &mut self,
        targets: &dyn GestureTargets<K>,
        event: &PointerEvent,
    ) -> Updates<G::Value> {
        let updates = self.inner.cancelled(targets, event);
        self.run(updates)
    }

    fn tick(&mut self, targets: &dyn GestureTargets<K>, now: f64) -> Updates<G::Value> {
        let updates = self.inner.tick(targets, now);
        self.run(updates)
    }

    fn reset(&mut self) {
        self.inner.reset();
    }
}

/// Builder methods available on every [`Gesture`].
pub trait GestureExt: Gesture + Sized {
    /// Runs `action` each time the value changes.
    fn on_changed(self, action: impl Fn(&Self::Value) + 'static) -> WithCallbacks<Self> {
        WithCallbacks::new(self).on_changed(action)
    }

    /// Runs `action` when the gesture is recognized.
    fn on_ended(self, action: impl Fn(&Self::Value) + 'static) -> WithCallbacks<Self> {
        WithCallbacks::new(self).on_ended(action)
    }

    /// Runs `action` when the pressed state changes.
    fn on_pressing(self, action: impl Fn(bool) + 'static) -> WithCallbacks<Self> {
        WithCallbacks::new(self).on_pressing(action)
    }

    /// Recognizes `self` and `other` at the same time.
    fn simultaneously<B: Gesture>(self, other: B) -> SimultaneousGesture<Self, B> {
        SimultaneousGesture {
            first: self,
            second: other,
        }
    }

    /// Recognizes `self`, then `next`.
    fn sequenced<B: Gesture>(self, next: B) -> SequenceGesture<Self, B> {
        SequenceGesture {
            first: self,
            second: next,
        }
    }

    /// Recognizes `self` in preference to `other`.
    fn exclusively<B: Gesture>(self, other: B) -> ExclusiveGesture<Self, B> {
        ExclusiveGesture {
            first: self,
            second: other,
        }
    }
}

impl<G: Gesture> GestureExt for G {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ButtonGesture, TapGesture};
    use alloc::vec;
    use core::cell::RefCell;
    use hashbrown::HashMap;
    use kurbo::{Point, Rect};

    #[test]
    fn actions_run_in_order() {
        let mut targets = HashMap::new();
        targets.insert(0_u8, Rect::new(0.0, 0.0, 10.0, 10.0));
        let log = Rc::new(RefCell::new(Vec::new()));
        let pressed = Rc::clone(&log);
        let ended = Rc::clone(&log);
        let gesture = ButtonGesture
            .on_pressing(move |p| pressed.borrow_mut().push(if p { "press" } else { "release" }))
            .on_ended(move |_| ended.borrow_mut().push("action"));
        let mut r = gesture.make_recognizer(0_u8, &GestureConfig::default());
        r.began(&targets, &PointerEvent::down(Point::new(1.0, 1.0), 0.0));
        r.ended(&targets, &PointerEvent::up(Point::new(1.0, 1.0), 0.1));
        assert_eq!(*log.borrow(), vec!["press", "release", "action"]);
    }

    #[test]
    fn callbacks_are_shared_between_recognizers() {
        let mut targets = HashMap::new();
        targets.insert(0_u8, Rect::new(0.0, 0.0, 10.0, 10.0));
        let count = Rc::new(RefCell::new(0));
        let counter = Rc::clone(&count);
        let gesture = TapGesture::default().on_ended(move |_| *counter.borrow_mut() += 1);
        for start in [0.0, 1.0] {
            let mut r = gesture.make_recognizer(0_u8, &GestureConfig::default());
            r.began(&targets, &PointerEvent::down(Point::ZERO, start));
            r.ended(&targets, &PointerEvent::up(Point::ZERO, start + 0.1));
        }
        assert_eq!(*count.borrow(), 2);
        assert!(!gesture.callbacks.is_empty());
    }
}
