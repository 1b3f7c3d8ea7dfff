// Copyright 2025 the Sapling Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Value-erased gestures for storage in heterogeneous view trees.

use alloc::boxed::Box;
use alloc::rc::Rc;
use core::fmt::{self, Debug};

use crate::{
    Gesture, GestureConfig, GestureState, GestureTargets, PointerEvent, PointerEventKind,
    PrimitiveGestureTypes, Recognizer, TargetKey,
};

/// A recognizer with its value type erased.
///
/// Updates are consumed by the recognizer's own callbacks, so a handler only
/// exposes state and filtering to the dispatcher.
pub trait GestureHandler<K>: Debug {
    /// The primitives this handler claims.
    fn gesture_type(&self) -> PrimitiveGestureTypes;

    /// Current lifecycle state.
    fn state(&self) -> GestureState;

    /// Returns `false` once the target is gone or filtered out.
    fn is_valid(&self, targets: &dyn GestureTargets<K>) -> bool;

    /// Returns `true` if the handler is valid and may still accept input.
    fn is_possible(&self, targets: &dyn GestureTargets<K>) -> bool {
        self.is_valid(targets) && self.state().is_active()
    }

    /// See [`Recognizer::set_type_filter`].
    fn set_type_filter(&mut self, filter: PrimitiveGestureTypes) -> PrimitiveGestureTypes;

    /// Routes `event` to the matching recognizer method.
    fn handle(&mut self, targets: &dyn GestureTargets<K>, event: &PointerEvent);

    /// Advances time without an event.
    ///
    /// Returns `true` if the recognizer changed state or reported an update.
    fn tick(&mut self, targets: &dyn GestureTargets<K>, now: f64) -> bool;

    /// Returns to [`GestureState::Ready`].
    fn reset(&mut self);
}

/// Adapts a typed [`Recognizer`] to [`GestureHandler`].
struct Erased<R>(R);

impl<R: Debug> Debug for Erased<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl<K, R: Recognizer<K>> GestureHandler<K> for Erased<R> {
    fn gesture_type(&self) -> PrimitiveGestureTypes {
        self.0.gesture_type()
    }

    fn state(&self) -> GestureState {
        self.0.state()
    }

    fn is_valid(&self, targets: &dyn GestureTargets<K>) -> bool {
        self.0.is_valid(targets)
    }

    fn is_possible(&self, targets: &dyn GestureTargets<K>) -> bool {
        self.0.is_possible(targets)
    }

    fn set_type_filter(&mut self, filter: PrimitiveGestureTypes) -> PrimitiveGestureTypes {
        self.0.set_type_filter(filter)
    }

    fn handle(&mut self, targets: &dyn GestureTargets<K>, event: &PointerEvent) {
        let _updates = match event.kind {
            PointerEventKind::ButtonDown => self.0.began(targets, event),
            PointerEventKind::ButtonUp => self.0.ended(targets, event),
            PointerEventKind::Move => self.0.moved(targets, event),
            PointerEventKind::Cancel => self.0.cancelled(targets, event),
        };
    }

    fn tick(&mut self, targets: &dyn GestureTargets<K>, now: f64) -> bool {
        let before = self.0.state();
        let updates = self.0.tick(targets, now);
        !updates.is_empty() || self.0.state() != before
    }

    fn reset(&mut self) {
        self.0.reset();
    }
}

trait ErasedGesture<K>: Debug {
    fn make_handler(&self, target: K, config: &GestureConfig) -> Box<dyn GestureHandler<K>>;
}

impl<K: TargetKey, G: Gesture> ErasedGesture<K> for G {
    fn make_handler(&self, target: K, config: &GestureConfig) -> Box<dyn GestureHandler<K>> {
        Box::new(Erased(self.make_recognizer(target, config)))
    }
}

/// A type-erased gesture description.
///
/// Cloning is cheap; the description is shared.
pub struct AnyGesture<K> {
    inner: Rc<dyn ErasedGesture<K>>,
}

impl<K: TargetKey> AnyGesture<K> {
    /// Erases `gesture`.
    #[must_use]
    pub fn new<G: Gesture>(gesture: G) -> Self {
        Self {
            inner: Rc::new(gesture),
        }
    }

    /// Creates a fresh handler attached to `target`.
    #[must_use]
    pub fn make_handler(&self, target: K, config: &GestureConfig) -> Box<dyn GestureHandler<K>> {
        self.inner.make_handler(target, config)
    }

    /// Returns `true` if both values share the same description.
    #[must_use]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }
}

impl<K> Clone for AnyGesture<K> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<K> Debug for AnyGesture<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("AnyGesture").field(&self.inner).finish()
    }
}

/// How a gesture attached to a view competes with others on the same hit path.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum GesturePriority {
    /// Armed before normal gestures, so it narrows their type filter.
    High,
    /// Armed in hit-test order.
    #[default]
    Normal,
    /// Armed last and exempt from type filtering.
    Simultaneous,
}

impl GesturePriority {
    pub(crate) const fn rank(self) -> u8 {
        match self {
            Self::High => 0,
            Self::Normal => 1,
            Self::Simultaneous => 2,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{DragGesture, TapGesture};
    use hashbrown::HashMap;
    use kurbo::{Point, Rect};

    #[test]
    fn erased_handler_tracks_state() {
        let mut targets = HashMap::new();
        targets.insert(3_u32, Rect::new(0.0, 0.0, 10.0, 10.0));
        let gesture = AnyGesture::new(TapGesture::default());
        let mut handler = gesture.make_handler(3, &GestureConfig::default());
        assert_eq!(handler.gesture_type(), PrimitiveGestureTypes::TAP);
        handler.handle(&targets, &PointerEvent::down(Point::ZERO, 0.0));
        assert_eq!(handler.state(), GestureState::Processing);
        handler.handle(&targets, &PointerEvent::up(Point::ZERO, 0.1));
        assert_eq!(handler.state(), GestureState::Done);
        handler.reset();
        assert!(handler.is_possible(&targets));
    }

    #[test]
    fn clones_share_description() {
        let a: AnyGesture<u32> = AnyGesture::new(DragGesture::default());
        let b = a.clone();
        assert!(a.ptr_eq(&b));
        assert!(!a.ptr_eq(&AnyGesture::new(DragGesture::default())));
    }

    #[test]
    fn priority_ranks() {
        assert!(GesturePriority::High.rank() < GesturePriority::Normal.rank());
        assert!(GesturePriority::Normal.rank() < GesturePriority::Simultaneous.rank());
    }
}
