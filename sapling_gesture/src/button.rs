// Copyright 2025 the Sapling Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use crate::recognizer::Claim;
use crate::{
    Gesture, GestureConfig, GestureState, GestureTargets, GestureUpdate, PointerEvent,
    PrimitiveGestureTypes, Recognizer, TargetKey, Updates,
};

/// Recognizes a button press that is released inside its target.
///
/// While pressed, the recognizer reports [`GestureUpdate::Pressing`] whenever
/// the pointer enters or leaves the target's bounds. Releasing inside the
/// bounds reports `Pressing(false)` followed by `Ended(())`. A button claims
/// taps and long presses along with itself, so those never fire under it.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ButtonGesture;

impl Gesture for ButtonGesture {
    type Value = ();
    type Recognizer<K: TargetKey> = ButtonRecognizer<K>;

    fn make_recognizer<K: TargetKey>(
        &self,
        target: K,
        config: &GestureConfig,
    ) -> ButtonRecognizer<K> {
        ButtonRecognizer {
            claim: Claim::new(target, config),
            hover: false,
        }
    }
}

/// Recognizer for [`ButtonGesture`].
#[derive(Clone, Debug)]
pub struct ButtonRecognizer<K> {
    claim: Claim<K>,
    hover: bool,
}

impl<K: TargetKey> ButtonRecognizer<K> {
    /// Returns `true` while the pointer is pressed inside the target.
    #[must_use]
    pub fn is_hovering(&self) -> bool {
        self.hover
    }

    fn inside(&self, targets: &dyn GestureTargets<K>, event: &PointerEvent) -> bool {
        let local = self.claim.local(targets, event.location);
        targets
            .bounds(self.claim.target)
            .is_some_and(|bounds| bounds.contains(local))
    }
}

const CLAIMED: PrimitiveGestureTypes = PrimitiveGestureTypes::BUTTON
    .union(PrimitiveGestureTypes::TAP)
    .union(PrimitiveGestureTypes::LONG_PRESS);

impl<K: TargetKey> Recognizer<K> for ButtonRecognizer<K> {
    type Value = ();

    fn gesture_type(&self) -> PrimitiveGestureTypes {
        PrimitiveGestureTypes::BUTTON
    }

    fn state(&self) -> GestureState {
        self.claim.state
    }

    fn is_valid(&self, targets: &dyn GestureTargets<K>) -> bool {
        self.claim.is_valid(PrimitiveGestureTypes::BUTTON, targets)
    }

    fn set_type_filter(&mut self, filter: PrimitiveGestureTypes) -> PrimitiveGestureTypes {
        self.claim.filter(filter, CLAIMED)
    }

    fn began(&mut self, targets: &dyn GestureTargets<K>, event: &PointerEvent) -> Updates<()> {
        let mut updates = Updates::new();
        if self.claim.can_claim(event) && targets.is_alive(self.claim.target) {
            self.claim.claim(event);
            self.hover = self.inside(targets, event);
            updates.push(GestureUpdate::Pressing(self.hover));
        }
        updates
    }

    fn moved(&mut self, targets: &dyn GestureTargets<K>, event: &PointerEvent) -> Updates<()> {
        let mut updates = Updates::new();
        if self.claim.owns(event) {
            let hover = self.inside(targets, event);
            if hover != self.hover {
                self.hover = hover;
                updates.push(GestureUpdate::Pressing(hover));
            }
        }
        updates
    }

    fn ended(&mut self, _: &dyn GestureTargets<K>, event: &PointerEvent) -> Updates<()> {
        let mut updates = Updates::new();
        if self.claim.owns(event) {
            self.claim.finish(GestureState::Done);
            if self.hover {
                self.hover = false;
                updates.push(GestureUpdate::Pressing(false));
                updates.push(GestureUpdate::Ended(()));
            }
        }
        updates
    }

    fn cancelled(&mut self, _: &dyn GestureTargets<K>, event: &PointerEvent) -> Updates<()> {
        let mut updates = Updates::new();
        if self.claim.owns(event) {
            self.claim.finish(GestureState::Cancelled);
            if self.hover {
                self.hover = false;
                updates.push(GestureUpdate::Pressing(false));
            }
        }
        updates
    }

    fn reset(&mut self) {
        self.claim.reset();
        self.hover = false;
    }
}
