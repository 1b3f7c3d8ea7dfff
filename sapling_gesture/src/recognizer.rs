// Copyright 2025 the Sapling Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use core::fmt::Debug;

use kurbo::Point;

use crate::{
    DeviceId, GestureConfig, GestureState, GestureTargets, PointerEvent, PrimitiveGestureTypes,
    TargetKey, Updates,
};

/// A state machine that turns pointer events into gesture updates.
///
/// Each event method returns the updates the event produced. Callers should
/// only forward events while [`is_possible`](Self::is_possible) holds.
pub trait Recognizer<K>: Debug {
    /// The value reported with changes and recognition.
    type Value: Clone + Debug + 'static;

    /// The primitives this recognizer claims.
    fn gesture_type(&self) -> PrimitiveGestureTypes;

    /// Current lifecycle state.
    fn state(&self) -> GestureState;

    /// Returns `false` once the target is gone or the type filter excludes this recognizer.
    fn is_valid(&self, targets: &dyn GestureTargets<K>) -> bool;

    /// Returns `true` if the recognizer is valid and may still accept input.
    fn is_possible(&self, targets: &dyn GestureTargets<K>) -> bool {
        self.is_valid(targets) && self.state().is_active()
    }

    /// Stores the types this recognizer may claim and returns the types left
    /// for recognizers after it.
    fn set_type_filter(&mut self, filter: PrimitiveGestureTypes) -> PrimitiveGestureTypes;

    /// A button went down.
    fn began(&mut self, targets: &dyn GestureTargets<K>, event: &PointerEvent)
    -> Updates<Self::Value>;

    /// The pointer moved.
    fn moved(&mut self, targets: &dyn GestureTargets<K>, event: &PointerEvent)
    -> Updates<Self::Value>;

    /// A button went up.
    fn ended(&mut self, targets: &dyn GestureTargets<K>, event: &PointerEvent)
    -> Updates<Self::Value>;

    /// The platform abandoned the interaction.
    fn cancelled(
        &mut self,
        targets: &dyn GestureTargets<K>,
        event: &PointerEvent,
    ) -> Updates<Self::Value>;

    /// Time advanced to `now` without an event.
    fn tick(&mut self, _targets: &dyn GestureTargets<K>, _now: f64) -> Updates<Self::Value> {
        Updates::new()
    }

    /// Returns to [`GestureState::Ready`] and forgets any claimed input.
    fn reset(&mut self);
}

/// A gesture description that can produce recognizers.
///
/// Descriptions are immutable values stored in the view tree; a fresh
/// recognizer is made for each interaction.
pub trait Gesture: Clone + Debug + 'static {
    /// The value reported by this gesture's recognizers.
    type Value: Clone + Debug + 'static;

    /// The recognizer type for targets keyed by `K`.
    type Recognizer<K: TargetKey>: Recognizer<K, Value = Self::Value> + 'static;

    /// Creates a recognizer attached to `target`.
    fn make_recognizer<K: TargetKey>(
        &self,
        target: K,
        config: &GestureConfig,
    ) -> Self::Recognizer<K>;
}

/// Bookkeeping shared by the primitive recognizers.
///
/// Only one (device, button) pair may own a recognizer at a time; events from
/// any other pair are ignored.
#[derive(Clone, Debug)]
pub(crate) struct Claim<K> {
    pub(crate) target: K,
    pub(crate) type_filter: PrimitiveGestureTypes,
    pub(crate) state: GestureState,
    pub(crate) device: Option<DeviceId>,
    pub(crate) button: u8,
}

impl<K: TargetKey> Claim<K> {
    pub(crate) fn new(target: K, config: &GestureConfig) -> Self {
        Self {
            target,
            type_filter: PrimitiveGestureTypes::ALL,
            state: GestureState::Ready,
            device: None,
            button: config.button,
        }
    }

    pub(crate) fn is_valid(
        &self,
        kind: PrimitiveGestureTypes,
        targets: &dyn GestureTargets<K>,
    ) -> bool {
        self.type_filter.contains(kind) && targets.is_alive(self.target)
    }

    /// Records `filter` and returns it without the `claimed` types.
    pub(crate) fn filter(
        &mut self,
        filter: PrimitiveGestureTypes,
        claimed: PrimitiveGestureTypes,
    ) -> PrimitiveGestureTypes {
        self.type_filter = filter;
        filter.difference(claimed)
    }

    /// Returns `true` if nobody owns the recognizer and the button matches.
    pub(crate) fn can_claim(&self, event: &PointerEvent) -> bool {
        self.device.is_none() && event.button == self.button
    }

    /// Takes ownership for the event's device.
    pub(crate) fn claim(&mut self, event: &PointerEvent) {
        self.device = Some(event.device);
        self.state = GestureState::Processing;
    }

    /// Returns `true` if the event comes from the owning device and button.
    pub(crate) fn owns(&self, event: &PointerEvent) -> bool {
        self.device == Some(event.device) && event.button == self.button
    }

    /// Releases ownership and settles in `state`.
    pub(crate) fn finish(&mut self, state: GestureState) {
        self.device = None;
        self.state = state;
    }

    pub(crate) fn local(&self, targets: &dyn GestureTargets<K>, point: Point) -> Point {
        targets.local_point(self.target, point).unwrap_or(point)
    }

    pub(crate) fn reset(&mut self) {
        self.device = None;
        self.state = GestureState::Ready;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hashbrown::HashMap;
    use kurbo::Rect;

    #[test]
    fn claim_is_exclusive_per_device() {
        let mut claim = Claim::new(1_u32, &GestureConfig::default());
        let first = PointerEvent::down(Point::ZERO, 0.0);
        let other = first.with_device(DeviceId(7));
        assert!(claim.can_claim(&first));
        claim.claim(&first);
        assert_eq!(claim.state, GestureState::Processing);
        assert!(claim.owns(&first));
        assert!(!claim.can_claim(&other));
        assert!(!claim.owns(&other));
        claim.finish(GestureState::Done);
        assert!(claim.can_claim(&other));
    }

    #[test]
    fn filter_controls_validity() {
        let mut targets: HashMap<u32, Rect> = HashMap::new();
        targets.insert(1, Rect::new(0.0, 0.0, 10.0, 10.0));
        let mut claim = Claim::new(1_u32, &GestureConfig::default());
        assert!(claim.is_valid(PrimitiveGestureTypes::DRAG, &targets));
        let rest = claim.filter(
            PrimitiveGestureTypes::ALL - PrimitiveGestureTypes::DRAG,
            PrimitiveGestureTypes::TAP,
        );
        assert!(!rest.contains(PrimitiveGestureTypes::TAP));
        assert!(!claim.is_valid(PrimitiveGestureTypes::DRAG, &targets));
        targets.clear();
        assert!(!claim.is_valid(PrimitiveGestureTypes::TAP, &targets));
    }
}
