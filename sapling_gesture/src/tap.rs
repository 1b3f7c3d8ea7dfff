// Copyright 2025 the Sapling Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tap gestures: one or more quick press/release pairs.

use crate::recognizer::Claim;
use crate::{
    Gesture, GestureConfig, GestureState, GestureTargets, GestureUpdate, PointerEvent,
    PrimitiveGestureTypes, Recognizer, TargetKey, Updates,
};

/// Recognizes `count` taps in quick succession.
///
/// Each press must be released within
/// [`GestureConfig::maximum_tap_duration`], and each further press must follow
/// the previous release within [`GestureConfig::maximum_tap_interval`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TapGesture {
    /// Number of taps required.
    pub count: u32,
}

impl TapGesture {
    /// A gesture that needs `count` taps; zero is treated as one.
    #[must_use]
    pub const fn new(count: u32) -> Self {
        Self {
            count: if count == 0 { 1 } else { count },
        }
    }
}

impl Default for TapGesture {
    fn default() -> Self {
        Self::new(1)
    }
}

impl Gesture for TapGesture {
    type Value = ();
    type Recognizer<K: TargetKey> = TapRecognizer<K>;

    fn make_recognizer<K: TargetKey>(&self, target: K, config: &GestureConfig) -> TapRecognizer<K> {
        TapRecognizer {
            claim: Claim::new(target, config),
            required: self.count,
            taps: 0,
            pressed_at: 0.0,
            released_at: None,
            maximum_interval: config.maximum_tap_interval,
            maximum_duration: config.maximum_tap_duration,
        }
    }
}

/// Recognizer for [`TapGesture`].
#[derive(Clone, Debug)]
pub struct TapRecognizer<K> {
    claim: Claim<K>,
    required: u32,
    taps: u32,
    pressed_at: f64,
    released_at: Option<f64>,
    maximum_interval: f64,
    maximum_duration: f64,
}

impl<K: TargetKey> TapRecognizer<K> {
    /// Taps counted so far.
    #[must_use]
    pub fn taps(&self) -> u32 {
        self.taps
    }
}

impl<K: TargetKey> Recognizer<K> for TapRecognizer<K> {
    type Value = ();

    fn gesture_type(&self) -> PrimitiveGestureTypes {
        PrimitiveGestureTypes::TAP
    }

    fn state(&self) -> GestureState {
        self.claim.state
    }

    fn is_valid(&self, targets: &dyn GestureTargets<K>) -> bool {
        self.claim.is_valid(PrimitiveGestureTypes::TAP, targets)
    }

    fn set_type_filter(&mut self, filter: PrimitiveGestureTypes) -> PrimitiveGestureTypes {
        self.claim.filter(filter, PrimitiveGestureTypes::TAP)
    }

    fn began(&mut self, _: &dyn GestureTargets<K>, event: &PointerEvent) -> Updates<()> {
        if self.claim.can_claim(event) {
            self.claim.claim(event);
            self.taps = 0;
            self.pressed_at = event.timestamp;
            self.released_at = None;
        } else if self.claim.owns(event) {
            let since_release = self
                .released_at
                .map_or(0.0, |released| event.timestamp - released);
            if since_release > self.maximum_interval {
                self.claim.finish(GestureState::Failed);
            } else {
                self.pressed_at = event.timestamp;
                self.claim.state = GestureState::Processing;
            }
        }
        Updates::new()
    }

    fn moved(&mut self, _: &dyn GestureTargets<K>, event: &PointerEvent) -> Updates<()> {
        if self.claim.owns(event) && event.timestamp - self.pressed_at > self.maximum_duration {
            self.claim.finish(GestureState::Failed);
        }
        Updates::new()
    }

    fn ended(&mut self, _: &dyn GestureTargets<K>, event: &PointerEvent) -> Updates<()> {
        let mut updates = Updates::new();
        if !self.claim.owns(event) {
            return updates;
        }
        if event.timestamp - self.pressed_at > self.maximum_duration {
            self.claim.finish(GestureState::Failed);
            return updates;
        }
        self.taps += 1;
        self.released_at = Some(event.timestamp);
        if self.taps >= self.required {
            self.claim.finish(GestureState::Done);
            updates.push(GestureUpdate::Ended(()));
        }
        updates
    }

    fn cancelled(&mut self, _: &dyn GestureTargets<K>, event: &PointerEvent) -> Updates<()> {
        if self.claim.owns(event) {
            self.claim.finish(GestureState::Cancelled);
        }
        Updates::new()
    }

    fn tick(&mut self, _: &dyn GestureTargets<K>, now: f64) -> Updates<()> {
        // A multi-tap waiting for its next press gives up once the interval lapses.
        if let Some(released) = self.released_at
            && self.claim.state == GestureState::Processing
            && now - released > self.maximum_interval
        {
            self.claim.finish(GestureState::Failed);
        }
        Updates::new()
    }

    fn reset(&mut self) {
        self.claim.reset();
        self.taps = 0;
        self.released_at = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hashbrown::HashMap;
    use kurbo::{Point, Rect};

    fn targets() -> HashMap<u8, Rect> {
        let mut targets = HashMap::new();
        targets.insert(0, Rect::new(0.0, 0.0, 100.0, 100.0));
        targets
    }

    fn recognizer(count: u32) -> TapRecognizer<u8> {
        TapGesture::new(count).make_recognizer(0, &GestureConfig::default())
    }

    const P: Point = Point::new(5.0, 5.0);

    #[test]
    fn single_tap() {
        let t = targets();
        let mut r = recognizer(1);
        assert!(r.began(&t, &PointerEvent::down(P, 0.0)).is_empty());
        assert_eq!(r.state(), GestureState::Processing);
        let updates = r.ended(&t, &PointerEvent::up(P, 0.1));
        assert_eq!(updates.as_slice(), &[GestureUpdate::Ended(())]);
        assert_eq!(r.state(), GestureState::Done);
    }

    #[test]
    fn held_too_long_fails() {
        let t = targets();
        let mut r = recognizer(1);
        r.began(&t, &PointerEvent::down(P, 0.0));
        assert!(r.ended(&t, &PointerEvent::up(P, 1.5)).is_empty());
        assert_eq!(r.state(), GestureState::Failed);
    }

    #[test]
    fn slow_move_fails() {
        let t = targets();
        let mut r = recognizer(1);
        r.began(&t, &PointerEvent::down(P, 0.0));
        r.moved(&t, &PointerEvent::moved(P, 0.5));
        assert_eq!(r.state(), GestureState::Processing);
        r.moved(&t, &PointerEvent::moved(P, 1.2));
        assert_eq!(r.state(), GestureState::Failed);
    }

    #[test]
    fn double_tap() {
        let t = targets();
        let mut r = recognizer(2);
        r.began(&t, &PointerEvent::down(P, 0.0));
        assert!(r.ended(&t, &PointerEvent::up(P, 0.1)).is_empty());
        assert_eq!(r.state(), GestureState::Processing);
        assert_eq!(r.taps(), 1);
        r.began(&t, &PointerEvent::down(P, 0.3));
        let updates = r.ended(&t, &PointerEvent::up(P, 0.4));
        assert_eq!(updates.len(), 1);
        assert_eq!(r.state(), GestureState::Done);
    }

    #[test]
    fn double_tap_with_long_gap_fails() {
        let t = targets();
        let mut r = recognizer(2);
        r.began(&t, &PointerEvent::down(P, 0.0));
        r.ended(&t, &PointerEvent::up(P, 0.1));
        r.began(&t, &PointerEvent::down(P, 0.9));
        assert_eq!(r.state(), GestureState::Failed);
    }

    #[test]
    fn tick_expires_pending_multi_tap() {
        let t = targets();
        let mut r = recognizer(2);
        r.began(&t, &PointerEvent::down(P, 0.0));
        r.ended(&t, &PointerEvent::up(P, 0.1));
        r.tick(&t, 0.4);
        assert_eq!(r.state(), GestureState::Processing);
        r.tick(&t, 0.7);
        assert_eq!(r.state(), GestureState::Failed);
    }

    #[test]
    fn other_button_is_ignored() {
        let t = targets();
        let mut r = recognizer(1);
        r.began(&t, &PointerEvent::down(P, 0.0).with_button(2));
        assert_eq!(r.state(), GestureState::Ready);
    }

    #[test]
    fn reset_returns_to_ready() {
        let t = targets();
        let mut r = recognizer(1);
        r.began(&t, &PointerEvent::down(P, 0.0));
        r.cancelled(&t, &PointerEvent::cancel(P, 0.1));
        assert_eq!(r.state(), GestureState::Cancelled);
        r.reset();
        assert_eq!(r.state(), GestureState::Ready);
        assert_eq!(r.taps(), 0);
    }
}
