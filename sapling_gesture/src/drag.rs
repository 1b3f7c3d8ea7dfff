// Copyright 2025 the Sapling Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Drag gestures: track a pressed pointer and estimate its velocity.
//!
//! A drag claims the pointer on press but reports nothing until it has moved
//! [`DragGesture::minimum_distance`] from where it started. From then on every
//! move reports a [`DragValue`] and the release reports the final one.
//!
//! ```
//! use hashbrown::HashMap;
//! use kurbo::{Point, Rect, Vec2};
//! use sapling_gesture::{
//!     DragGesture, Gesture, GestureConfig, GestureUpdate, PointerEvent, Recognizer,
//! };
//!
//! let mut targets = HashMap::new();
//! targets.insert(1_u32, Rect::new(100.0, 0.0, 200.0, 100.0));
//!
//! let mut drag = DragGesture::default().make_recognizer(1_u32, &GestureConfig::default());
//! drag.began(&targets, &PointerEvent::down(Point::new(110.0, 10.0), 0.0));
//! let updates = drag.moved(&targets, &PointerEvent::moved(Point::new(130.0, 10.0), 0.1));
//!
//! let GestureUpdate::Changed(value) = &updates[0] else { unreachable!() };
//! // Locations are local to the target.
//! assert_eq!(value.start_location, Point::new(10.0, 10.0));
//! assert_eq!(value.translation(), Vec2::new(20.0, 0.0));
//! ```

use kurbo::{Point, Vec2};
use sapling_animatable::Velocity;

use crate::recognizer::Claim;
use crate::{
    Gesture, GestureConfig, GestureState, GestureTargets, GestureUpdate, PointerEvent,
    PrimitiveGestureTypes, Recognizer, TargetKey, Updates,
};

/// Seconds of travel at the current velocity used to predict where a fling ends.
const PREDICTION_HORIZON: f64 = 0.25;

/// Recognizes a press followed by movement.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DragGesture {
    /// Distance the pointer must travel before the drag is reported.
    pub minimum_distance: f64,
}

impl DragGesture {
    /// Default travel before a drag starts.
    pub const DEFAULT_MINIMUM_DISTANCE: f64 = 10.0;

    /// A drag that starts after `minimum_distance` of travel.
    #[must_use]
    pub const fn new(minimum_distance: f64) -> Self {
        Self { minimum_distance }
    }
}

impl Default for DragGesture {
    fn default() -> Self {
        Self::new(Self::DEFAULT_MINIMUM_DISTANCE)
    }
}

/// The state of a drag at one moment.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct DragValue {
    /// Timestamp of the sample.
    pub time: f64,
    /// Current pointer location in target coordinates.
    pub location: Point,
    /// Where the drag started, in target coordinates.
    pub start_location: Point,
    /// Estimated pointer velocity.
    pub velocity: Velocity<Vec2>,
}

impl DragValue {
    /// Offset from the start location to the current location.
    #[must_use]
    pub fn translation(&self) -> Vec2 {
        self.location - self.start_location
    }

    /// Where the pointer would come to rest if released now.
    #[must_use]
    pub fn predicted_end_location(&self) -> Point {
        self.location + self.velocity.value_per_second * PREDICTION_HORIZON
    }

    /// [`translation`](Self::translation) measured to the predicted end location.
    #[must_use]
    pub fn predicted_end_translation(&self) -> Vec2 {
        self.predicted_end_location() - self.start_location
    }

    /// Velocity implied by the predicted end location, in points per second.
    #[must_use]
    pub fn velocity(&self) -> Vec2 {
        (self.predicted_end_location() - self.location) * (1.0 / PREDICTION_HORIZON)
    }
}

impl Gesture for DragGesture {
    type Value = DragValue;
    type Recognizer<K: TargetKey> = DragRecognizer<K>;

    fn make_recognizer<K: TargetKey>(
        &self,
        target: K,
        config: &GestureConfig,
    ) -> DragRecognizer<K> {
        DragRecognizer {
            claim: Claim::new(target, config),
            minimum_distance: self.minimum_distance.max(0.0),
            value: DragValue::default(),
            dragging: false,
        }
    }
}

/// Recognizer for [`DragGesture`].
#[derive(Clone, Debug)]
pub struct DragRecognizer<K> {
    claim: Claim<K>,
    minimum_distance: f64,
    value: DragValue,
    dragging: bool,
}

impl<K: TargetKey> DragRecognizer<K> {
    /// Returns `true` once the pointer has travelled far enough to report.
    #[must_use]
    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    /// The most recent sample.
    #[must_use]
    pub fn value(&self) -> &DragValue {
        &self.value
    }

    fn sample(&mut self, location: Point, time: f64) {
        let interval = time - self.value.time;
        if interval > 0.0 {
            self.value.velocity = Velocity::from_samples(
                &self.value.location.to_vec2(),
                &location.to_vec2(),
                interval,
            );
        }
        self.value.location = location;
        self.value.time = time;
    }
}

impl<K: TargetKey> Recognizer<K> for DragRecognizer<K> {
    type Value = DragValue;

    fn gesture_type(&self) -> PrimitiveGestureTypes {
        PrimitiveGestureTypes::DRAG
    }

    fn state(&self) -> GestureState {
        self.claim.state
    }

    fn is_valid(&self, targets: &dyn GestureTargets<K>) -> bool {
        self.claim.is_valid(PrimitiveGestureTypes::DRAG, targets)
    }

    fn set_type_filter(&mut self, filter: PrimitiveGestureTypes) -> PrimitiveGestureTypes {
        self.claim.filter(filter, PrimitiveGestureTypes::DRAG)
    }

    fn began(&mut self, targets: &dyn GestureTargets<K>, event: &PointerEvent) -> Updates<DragValue> {
        if self.claim.can_claim(event) {
            self.claim.claim(event);
            let start = self.claim.local(targets, event.location);
            self.value = DragValue {
                time: event.timestamp,
                location: start,
                start_location: start,
                velocity: Velocity::default(),
            };
            self.dragging = false;
        }
        Updates::new()
    }

    fn moved(&mut self, targets: &dyn GestureTargets<K>, event: &PointerEvent) -> Updates<DragValue> {
        let mut updates = Updates::new();
        if !self.claim.owns(event) {
            return updates;
        }
        let location = self.claim.local(targets, event.location);
        self.sample(location, event.timestamp);
        if !self.dragging && self.value.translation().hypot() >= self.minimum_distance {
            self.dragging = true;
        }
        if self.dragging {
            updates.push(GestureUpdate::Changed(self.value));
        }
        updates
    }

    fn ended(&mut self, _: &dyn GestureTargets<K>, event: &PointerEvent) -> Updates<DragValue> {
        let mut updates = Updates::new();
        if !self.claim.owns(event) {
            return updates;
        }
        self.claim.finish(GestureState::Done);
        if self.dragging {
            updates.push(GestureUpdate::Ended(self.value));
        }
        updates
    }

    fn cancelled(&mut self, _: &dyn GestureTargets<K>, event: &PointerEvent) -> Updates<DragValue> {
        if self.claim.owns(event) {
            self.claim.finish(GestureState::Cancelled);
        }
        Updates::new()
    }

    fn reset(&mut self) {
        self.claim.reset();
        self.dragging = false;
        self.value = DragValue::default();
    }
}
