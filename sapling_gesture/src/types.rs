// Copyright 2025 the Sapling Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Core gesture types: primitive type sets, recognizer states and pointer events.

use kurbo::Point;
use smallvec::SmallVec;

bitflags::bitflags! {
    /// The raw input primitives a recognizer may claim.
    ///
    /// Recognizers narrow the set passed to later recognizers through
    /// [`Recognizer::set_type_filter`](crate::Recognizer::set_type_filter).
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct PrimitiveGestureTypes: u32 {
        /// A press and release in place.
        const TAP = 1 << 0;
        /// A press held in place for a minimum duration.
        const LONG_PRESS = 1 << 1;
        /// A press followed by movement.
        const DRAG = 1 << 2;
        /// A two-finger pinch.
        const MAGNIFICATION = 1 << 3;
        /// A two-finger twist.
        const ROTATION = 1 << 4;
        /// A rotation about an arbitrary axis.
        const ROTATION_3D = 1 << 5;
        /// A press that tracks whether the pointer stays inside its target.
        const BUTTON = 1 << 6;
        /// Every primitive.
        const ALL = Self::TAP.bits()
            | Self::LONG_PRESS.bits()
            | Self::DRAG.bits()
            | Self::MAGNIFICATION.bits()
            | Self::ROTATION.bits()
            | Self::ROTATION_3D.bits()
            | Self::BUTTON.bits();
    }
}

impl Default for PrimitiveGestureTypes {
    fn default() -> Self {
        Self::ALL
    }
}

/// Lifecycle of a recognizer.
///
/// A recognizer starts [`Ready`](Self::Ready), moves to
/// [`Processing`](Self::Processing) once it claims input, and settles in one of
/// the terminal states. [`Recognizer::reset`](crate::Recognizer::reset)
/// returns it to `Ready`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum GestureState {
    /// Waiting for input.
    #[default]
    Ready,
    /// Tracking input it has claimed.
    Processing,
    /// Interrupted by the platform.
    Cancelled,
    /// The input did not match the gesture.
    Failed,
    /// The gesture was recognized.
    Done,
}

impl GestureState {
    /// Returns `true` for states that may still accept input.
    #[must_use]
    pub const fn is_active(self) -> bool {
        matches!(self, Self::Ready | Self::Processing)
    }

    /// Returns `true` for the three terminal states.
    #[must_use]
    pub const fn is_finished(self) -> bool {
        !self.is_active()
    }
}

/// Identifies the physical device that produced an event.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DeviceId(pub u32);

/// The primary (left) mouse button or the first touch.
pub const PRIMARY_BUTTON: u8 = 0;

/// What happened to the pointer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PointerEventKind {
    /// A button was pressed or a touch began.
    ButtonDown,
    /// A button was released or a touch ended.
    ButtonUp,
    /// The pointer moved.
    Move,
    /// The platform abandoned the interaction.
    Cancel,
}

/// A raw pointer event in window coordinates.
///
/// Timestamps are in seconds on a monotonic clock shared with
/// [`GestureDispatcher::tick`](crate::GestureDispatcher::tick).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointerEvent {
    /// What happened.
    pub kind: PointerEventKind,
    /// The device that produced the event.
    pub device: DeviceId,
    /// The button involved.
    pub button: u8,
    /// Pointer position in window coordinates.
    pub location: Point,
    /// Seconds since an arbitrary epoch.
    pub timestamp: f64,
}

impl PointerEvent {
    /// Creates an event from the primary button of device zero.
    #[must_use]
    pub const fn new(kind: PointerEventKind, location: Point, timestamp: f64) -> Self {
        Self {
            kind,
            device: DeviceId(0),
            button: PRIMARY_BUTTON,
            location,
            timestamp,
        }
    }

    /// A button press.
    #[must_use]
    pub const fn down(location: Point, timestamp: f64) -> Self {
        Self::new(PointerEventKind::ButtonDown, location, timestamp)
    }

    /// A button release.
    #[must_use]
    pub const fn up(location: Point, timestamp: f64) -> Self {
        Self::new(PointerEventKind::ButtonUp, location, timestamp)
    }

    /// A pointer move.
    #[must_use]
    pub const fn moved(location: Point, timestamp: f64) -> Self {
        Self::new(PointerEventKind::Move, location, timestamp)
    }

    /// A platform cancellation.
    #[must_use]
    pub const fn cancel(location: Point, timestamp: f64) -> Self {
        Self::new(PointerEventKind::Cancel, location, timestamp)
    }

    /// Returns the same event attributed to `device`.
    #[must_use]
    pub const fn with_device(mut self, device: DeviceId) -> Self {
        self.device = device;
        self
    }

    /// Returns the same event for `button`.
    #[must_use]
    pub const fn with_button(mut self, button: u8) -> Self {
        self.button = button;
        self
    }
}

/// A notification produced by a recognizer while it handles an event.
#[derive(Clone, Debug, PartialEq)]
pub enum GestureUpdate<V> {
    /// The pressed state changed (buttons and long presses).
    Pressing(bool),
    /// The gesture's value changed while it is in progress.
    Changed(V),
    /// The gesture was recognized with its final value.
    Ended(V),
}

impl<V> GestureUpdate<V> {
    /// Transforms the carried value, keeping the kind of update.
    pub fn map<W>(self, f: impl FnOnce(V) -> W) -> GestureUpdate<W> {
        match self {
            Self::Pressing(pressing) => GestureUpdate::Pressing(pressing),
            Self::Changed(value) => GestureUpdate::Changed(f(value)),
            Self::Ended(value) => GestureUpdate::Ended(f(value)),
        }
    }
}

/// The updates produced by a single event; most events produce at most two.
pub type Updates<V> = SmallVec<[GestureUpdate<V>; 2]>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_covers_every_primitive() {
        let each = [
            PrimitiveGestureTypes::TAP,
            PrimitiveGestureTypes::LONG_PRESS,
            PrimitiveGestureTypes::DRAG,
            PrimitiveGestureTypes::MAGNIFICATION,
            PrimitiveGestureTypes::ROTATION,
            PrimitiveGestureTypes::ROTATION_3D,
            PrimitiveGestureTypes::BUTTON,
        ];
        let union = each
            .iter()
            .fold(PrimitiveGestureTypes::empty(), |acc, t| acc | *t);
        assert_eq!(union, PrimitiveGestureTypes::ALL);
        assert_eq!(PrimitiveGestureTypes::default(), PrimitiveGestureTypes::ALL);
    }

    #[test]
    fn active_states() {
        assert!(GestureState::Ready.is_active());
        assert!(GestureState::Processing.is_active());
        assert!(GestureState::Done.is_finished());
        assert!(GestureState::Failed.is_finished());
        assert!(GestureState::Cancelled.is_finished());
    }

    #[test]
    fn update_map_preserves_kind() {
        let changed = GestureUpdate::Changed(2).map(|v| v * 10);
        assert_eq!(changed, GestureUpdate::Changed(20));
        let pressing: GestureUpdate<i32> = GestureUpdate::<i32>::Pressing(true).map(|v| v + 1);
        assert_eq!(pressing, GestureUpdate::Pressing(true));
    }

    #[test]
    fn event_builders() {
        let e = PointerEvent::down(Point::new(1.0, 2.0), 0.5)
            .with_device(DeviceId(3))
            .with_button(1);
        assert_eq!(e.kind, PointerEventKind::ButtonDown);
        assert_eq!(e.device, DeviceId(3));
        assert_eq!(e.button, 1);
        assert_eq!(e.timestamp, 0.5);
    }
}
