// Copyright 2025 the Sapling Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use crate::recognizer::Claim;
use crate::{
    Gesture, GestureConfig, GestureState, GestureTargets, GestureUpdate, PointerEvent,
    PrimitiveGestureTypes, Recognizer, TargetKey, Updates,
};
use kurbo::Point;

/// Recognizes a press held in place for a minimum duration.
///
/// Recognition happens on the first event or [`Recognizer::tick`] at or after
/// the deadline, so a host must tick recognizers between input events for a
/// long press to fire while the pointer is still.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LongPressGesture {
    /// Seconds the press must be held.
    pub minimum_duration: f64,
    /// Travel that aborts the press.
    pub maximum_distance: f64,
}

impl LongPressGesture {
    /// Default hold time.
    pub const DEFAULT_MINIMUM_DURATION: f64 = 0.5;
    /// Default travel tolerance.
    pub const DEFAULT_MAXIMUM_DISTANCE: f64 = 10.0;

    /// A long press with custom thresholds.
    #[must_use]
    pub const fn new(minimum_duration: f64, maximum_distance: f64) -> Self {
        Self {
            minimum_duration,
            maximum_distance,
        }
    }
}

impl Default for LongPressGesture {
    fn default() -> Self {
        Self::new(
            Self::DEFAULT_MINIMUM_DURATION,
            Self::DEFAULT_MAXIMUM_DISTANCE,
        )
    }
}

impl Gesture for LongPressGesture {
    /// `true` once the press has been held long enough.
    type Value = bool;
    type Recognizer<K: TargetKey> = LongPressRecognizer<K>;

    fn make_recognizer<K: TargetKey>(
        &self,
        target: K,
        config: &GestureConfig,
    ) -> LongPressRecognizer<K> {
        LongPressRecognizer {
            claim: Claim::new(target, config),
            gesture: *self,
            start: Point::ZERO,
            deadline: f64::INFINITY,
        }
    }
}

/// Recognizer for [`LongPressGesture`].
#[derive(Clone, Debug)]
pub struct LongPressRecognizer<K> {
    claim: Claim<K>,
    gesture: LongPressGesture,
    start: Point,
    deadline: f64,
}

impl<K: TargetKey> LongPressRecognizer<K> {
    /// Recognizes if `now` has reached the deadline.
    fn fire_if_due(&mut self, now: f64, updates: &mut Updates<bool>) -> bool {
        if self.claim.state == GestureState::Processing && now >= self.deadline {
            self.claim.finish(GestureState::Done);
            updates.push(GestureUpdate::Pressing(false));
            updates.push(GestureUpdate::Ended(true));
            true
        } else {
            false
        }
    }

    fn fail(&mut self, state: GestureState, updates: &mut Updates<bool>) {
        self.claim.finish(state);
        updates.push(GestureUpdate::Pressing(false));
    }
}

impl<K: TargetKey> Recognizer<K> for LongPressRecognizer<K> {
    type Value = bool;

    fn gesture_type(&self) -> PrimitiveGestureTypes {
        PrimitiveGestureTypes::LONG_PRESS
    }

    fn state(&self) -> GestureState {
        self.claim.state
    }

    fn is_valid(&self, targets: &dyn GestureTargets<K>) -> bool {
        self.claim.is_valid(PrimitiveGestureTypes::LONG_PRESS, targets)
    }

    fn set_type_filter(&mut self, filter: PrimitiveGestureTypes) -> PrimitiveGestureTypes {
        self.claim.filter(filter, PrimitiveGestureTypes::LONG_PRESS)
    }

    fn began(&mut self, targets: &dyn GestureTargets<K>, event: &PointerEvent) -> Updates<bool> {
        let mut updates = Updates::new();
        if self.claim.can_claim(event) {
            self.claim.claim(event);
            self.start = self.claim.local(targets, event.location);
            self.deadline = event.timestamp + self.gesture.minimum_duration.max(0.0);
            updates.push(GestureUpdate::Pressing(true));
        }
        updates
    }

    fn moved(&mut self, targets: &dyn GestureTargets<K>, event: &PointerEvent) -> Updates<bool> {
        let mut updates = Updates::new();
        if !self.claim.owns(event) || self.fire_if_due(event.timestamp, &mut updates) {
            return updates;
        }
        let location = self.claim.local(targets, event.location);
        if (location - self.start).hypot() > self.gesture.maximum_distance {
            self.fail(GestureState::Failed, &mut updates);
        }
        updates
    }

    fn ended(&mut self, _: &dyn GestureTargets<K>, event: &PointerEvent) -> Updates<bool> {
        let mut updates = Updates::new();
        if self.claim.owns(event) && !self.fire_if_due(event.timestamp, &mut updates) {
            self.fail(GestureState::Failed, &mut updates);
        }
        updates
    }

    fn cancelled(&mut self, _: &dyn GestureTargets<K>, event: &PointerEvent) -> Updates<bool> {
        let mut updates = Updates::new();
        if self.claim.owns(event) {
            self.fail(GestureState::Cancelled, &mut updates);
        }
        updates
    }

    fn tick(&mut self, _: &dyn GestureTargets<K>, now: f64) -> Updates<bool> {
        let mut updates = Updates::new();
        self.fire_if_due(now, &mut updates);
        updates
    }

    fn reset(&mut self) {
        self.claim.reset();
        self.deadline = f64::INFINITY;
    }
}
