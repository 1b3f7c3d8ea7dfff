// Copyright 2025 the Sapling Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Gestures built from two child gestures.
//!
//! Every combinator forwards each input to whichever children are still
//! possible and derives its own state from theirs. A combinator stops being
//! possible once neither child is, even if the combined state is still
//! processing. The primitive types of a
//! combinator are the union of its children's, and the type filter it leaves
//! behind is the intersection of what its children leave.

use crate::{
    Gesture, GestureConfig, GestureState, GestureTargets, GestureUpdate, PointerEvent,
    PointerEventKind, PrimitiveGestureTypes, Recognizer, TargetKey, Updates,
};

#[derive(Clone, Copy, Debug)]
enum Input<'a> {
    Event(&'a PointerEvent),
    Tick(f64),
}

impl Input<'_> {
    fn is_cancel(self) -> bool {
        matches!(self, Input::Event(event) if event.kind == PointerEventKind::Cancel)
    }
}

fn deliver<K, R: Recognizer<K>>(
    child: &mut R,
    targets: &dyn GestureTargets<K>,
    input: Input<'_>,
) -> Updates<R::Value> {
    if !child.is_possible(targets) {
        return Updates::new();
    }
    match input {
        Input::Event(event) => match event.kind {
            PointerEventKind::ButtonDown => child.began(targets, event),
            PointerEventKind::ButtonUp => child.ended(targets, event),
            PointerEventKind::Move => child.moved(targets, event),
            PointerEventKind::Cancel => child.cancelled(targets, event),
        },
        Input::Tick(now) => child.tick(targets, now),
    }
}

/// Implements the event methods of [`Recognizer`] in terms of a `handle` method.
macro_rules! route_inputs {
    () => {
        fn began(
            &mut self,
            targets: &dyn GestureTargets<K>,
            event: &PointerEvent,
        ) -> Updates<Self::Value> {
            self.handle(targets, Input::Event(event))
        }

        fn moved(
            &mut self,
            targets: &dyn GestureTargets<K>,
            event: &PointerEvent,
        ) -> Updates<Self::Value> {
            self.handle(targets, Input::Event(event))
        }

        fn ended(
            &mut self,
            targets: &dyn GestureTargets<K>,
            event: &PointerEvent,
        ) -> Updates<Self::Value> {
            self.handle(targets, Input::Event(event))
        }

        fn cancelled(
            &mut self,
            targets: &dyn GestureTargets<K>,
            event: &PointerEvent,
        ) -> Updates<Self::Value> {
            self.handle(targets, Input::Event(event))
        }

        fn tick(&mut self, targets: &dyn GestureTargets<K>, now: f64) -> Updates<Self::Value> {
            self.handle(targets, Input::Tick(now))
        }

        fn gesture_type(&self) -> PrimitiveGestureTypes {
            self.first.gesture_type() | self.second.gesture_type()
        }

        fn is_possible(&self, targets: &dyn GestureTargets<K>) -> bool {
            self.is_valid(targets)
                && self.state().is_active()
                && (self.first.is_possible(targets) || self.second.is_possible(targets))
        }

        fn set_type_filter(&mut self, filter: PrimitiveGestureTypes) -> PrimitiveGestureTypes {
            let first = self.first.set_type_filter(filter);
            let second = self.second.set_type_filter(filter);
            first & second
        }
    };
}

// --- Simultaneous ---

/// Two gestures recognized at the same time.
#[derive(Clone, Debug, PartialEq)]
pub struct SimultaneousGesture<A, B> {
    /// The first gesture.
    pub first: A,
    /// The second gesture.
    pub second: B,
}

/// The latest values of both halves of a [`SimultaneousGesture`].
#[derive(Clone, Debug, PartialEq)]
pub struct SimultaneousValue<A, B> {
    /// The first gesture's latest value, if it has reported one.
    pub first: Option<A>,
    /// The second gesture's latest value, if it has reported one.
    pub second: Option<B>,
}

impl<A: Gesture, B: Gesture> Gesture for SimultaneousGesture<A, B> {
    type Value = SimultaneousValue<A::Value, B::Value>;
    type Recognizer<K: TargetKey> = SimultaneousRecognizer<K, A, B>;

    fn make_recognizer<K: TargetKey>(
        &self,
        target: K,
        config: &GestureConfig,
    ) -> SimultaneousRecognizer<K, A, B> {
        SimultaneousRecognizer {
            first: self.first.make_recognizer(target, config),
            second: self.second.make_recognizer(target, config),
            first_value: None,
            second_value: None,
            state: GestureState::Ready,
        }
    }
}

/// Recognizer for [`SimultaneousGesture`].
#[derive(Debug)]
pub struct SimultaneousRecognizer<K: TargetKey, A: Gesture, B: Gesture> {
    first: A::Recognizer<K>,
    second: B::Recognizer<K>,
    first_value: Option<A::Value>,
    second_value: Option<B::Value>,
    state: GestureState,
}

impl<K: TargetKey, A: Gesture, B: Gesture> SimultaneousRecognizer<K, A, B> {
    fn value(&self) -> SimultaneousValue<A::Value, B::Value> {
        SimultaneousValue {
            first: self.first_value.clone(),
            second: self.second_value.clone(),
        }
    }

    fn combined_state(&self) -> GestureState {
        use GestureState::*;
        match (self.first.state(), self.second.state()) {
            (Ready, Ready) => Ready,
            (Done, Done) => Done,
            (Cancelled, Cancelled) => Cancelled,
            (Failed, Failed) => Failed,
            _ => Processing,
        }
    }

    fn handle(
        &mut self,
        targets: &dyn GestureTargets<K>,
        input: Input<'_>,
    ) -> Updates<SimultaneousValue<A::Value, B::Value>> {
        let mut out = Updates::new();
        for update in deliver(&mut self.first, targets, input) {
            match update {
                GestureUpdate::Pressing(pressing) => out.push(GestureUpdate::Pressing(pressing)),
                GestureUpdate::Changed(value) => {
                    self.first_value = Some(value);
                    out.push(GestureUpdate::Changed(self.value()));
                }
                GestureUpdate::Ended(value) => {
                    self.first_value = Some(value);
                    out.push(GestureUpdate::Ended(self.value()));
                }
            }
        }
        for update in deliver(&mut self.second, targets, input) {
            match update {
                GestureUpdate::Pressing(pressing) => out.push(GestureUpdate::Pressing(pressing)),
                GestureUpdate::Changed(value) => {
                    self.second_value = Some(value);
                    out.push(GestureUpdate::Changed(self.value()));
                }
                GestureUpdate::Ended(value) => {
                    self.second_value = Some(value);
                    out.push(GestureUpdate::Ended(self.value()));
                }
            }
        }
        self.state = if input.is_cancel() {
            GestureState::Cancelled
        } else {
            self.combined_state()
        };
        out
    }
}

impl<K: TargetKey, A: Gesture, B: Gesture> Recognizer<K> for SimultaneousRecognizer<K, A, B> {
    type Value = SimultaneousValue<A::Value, B::Value>;

    route_inputs!();

    fn state(&self) -> GestureState {
        self.state
    }

    fn is_valid(&self, targets: &dyn GestureTargets<K>) -> bool {
        self.first.is_valid(targets) || self.second.is_valid(targets)
    }

    fn reset(&mut self) {
        self.first.reset();
        self.second.reset();
        self.first_value = None;
        self.second_value = None;
        self.state = GestureState::Ready;
    }
}

// --- Sequence ---

/// A gesture that must be recognized before a second one may begin reporting.
#[derive(Clone, Debug, PartialEq)]
pub struct SequenceGesture<A, B> {
    /// The gesture recognized first.
    pub first: A,
    /// The gesture that follows.
    pub second: B,
}

/// Progress through a [`SequenceGesture`].
#[derive(Clone, Debug, PartialEq)]
pub enum SequenceValue<A, B> {
    /// The first gesture is in progress.
    First(A),
    /// The first gesture was recognized; the second may be in progress.
    Second(A, Option<B>),
}

impl<A: Gesture, B: Gesture> Gesture for SequenceGesture<A, B> {
    type Value = SequenceValue<A::Value, B::Value>;
    type Recognizer<K: TargetKey> = SequenceRecognizer<K, A, B>;

    fn make_recognizer<K: TargetKey>(
        &self,
        target: K,
        config: &GestureConfig,
    ) -> SequenceRecognizer<K, A, B> {
        SequenceRecognizer {
            first: self.first.make_recognizer(target, config),
            second: self.second.make_recognizer(target, config),
            first_value: None,
            second_value: None,
            first_recognized: false,
            settled: None,
        }
    }
}

/// Recognizer for [`SequenceGesture`].
#[derive(Debug)]
pub struct SequenceRecognizer<K: TargetKey, A: Gesture, B: Gesture> {
    first: A::Recognizer<K>,
    second: B::Recognizer<K>,
    first_value: Option<A::Value>,
    second_value: Option<B::Value>,
    first_recognized: bool,
    /// A terminal state reached by the sequence itself.
    settled: Option<GestureState>,
}

impl<K: TargetKey, A: Gesture, B: Gesture> SequenceRecognizer<K, A, B> {
    fn combined_state(&self) -> GestureState {
        use GestureState::*;
        match (self.first.state(), self.second.state()) {
            (Ready, Ready) => Ready,
            (Done, Done) => Done,
            (Cancelled, _) | (_, Cancelled) => Cancelled,
            (Failed, _) | (_, Failed) => Failed,
            _ => Processing,
        }
    }

    fn handle(
        &mut self,
        targets: &dyn GestureTargets<K>,
        input: Input<'_>,
    ) -> Updates<SequenceValue<A::Value, B::Value>> {
        let mut out = Updates::new();
        for update in deliver(&mut self.first, targets, input) {
            if self.first_recognized {
                break;
            }
            match update {
                GestureUpdate::Pressing(pressing) => out.push(GestureUpdate::Pressing(pressing)),
                GestureUpdate::Changed(value) => {
                    self.first_value = Some(value.clone());
                    out.push(GestureUpdate::Changed(SequenceValue::First(value)));
                }
                GestureUpdate::Ended(value) => {
                    self.first_value = Some(value.clone());
                    self.first_recognized = true;
                    let progress = match &self.second_value {
                        Some(second) => SequenceValue::Second(value, Some(second.clone())),
                        None => SequenceValue::First(value),
                    };
                    out.push(GestureUpdate::Changed(progress));
                }
            }
        }
        for update in deliver(&mut self.second, targets, input) {
            let recognized = self.first_value.as_ref().filter(|_| self.first_recognized);
            match (update, recognized) {
                (GestureUpdate::Pressing(pressing), Some(_)) => {
                    out.push(GestureUpdate::Pressing(pressing));
                }
                (GestureUpdate::Pressing(_), None) => {}
                (GestureUpdate::Changed(value), Some(first)) => {
                    let first = first.clone();
                    self.second_value = Some(value.clone());
                    out.push(GestureUpdate::Changed(SequenceValue::Second(first, Some(value))));
                }
                (GestureUpdate::Changed(value), None) => self.second_value = Some(value),
                (GestureUpdate::Ended(value), Some(first)) => {
                    let first = first.clone();
                    self.second_value = Some(value.clone());
                    out.push(GestureUpdate::Ended(SequenceValue::Second(first, Some(value))));
                    self.settled = Some(GestureState::Done);
                }
                (GestureUpdate::Ended(_), None) => {
                    self.settled = Some(GestureState::Failed);
                }
            }
        }
        if input.is_cancel() {
            self.settled = Some(GestureState::Cancelled);
        }
        out
    }
}

impl<K: TargetKey, A: Gesture, B: Gesture> Recognizer<K> for SequenceRecognizer<K, A, B> {
    type Value = SequenceValue<A::Value, B::Value>;

    route_inputs!();

    fn state(&self) -> GestureState {
        self.settled.unwrap_or_else(|| self.combined_state())
    }

    fn is_valid(&self, targets: &dyn GestureTargets<K>) -> bool {
        self.first.is_valid(targets) && self.second.is_valid(targets)
    }

    fn reset(&mut self) {
        self.first.reset();
        self.second.reset();
        self.first_value = None;
        self.second_value = None;
        self.first_recognized = false;
        self.settled = None;
    }
}

// --- Exclusive ---

/// Two gestures of which only one may be recognized; the first has priority.
#[derive(Clone, Debug, PartialEq)]
pub struct ExclusiveGesture<A, B> {
    /// The preferred gesture.
    pub first: A,
    /// The fallback gesture, reported only once the first can no longer succeed.
    pub second: B,
}

/// Which half of an [`ExclusiveGesture`] reported.
#[derive(Clone, Debug, PartialEq)]
pub enum ExclusiveValue<A, B> {
    /// The preferred gesture's value.
    First(A),
    /// The fallback gesture's value.
    Second(B),
}

impl<A: Gesture, B: Gesture> Gesture for ExclusiveGesture<A, B> {
    type Value = ExclusiveValue<A::Value, B::Value>;
    type Recognizer<K: TargetKey> = ExclusiveRecognizer<K, A, B>;

    fn make_recognizer<K: TargetKey>(
        &self,
        target: K,
        config: &GestureConfig,
    ) -> ExclusiveRecognizer<K, A, B> {
        ExclusiveRecognizer {
            first: self.first.make_recognizer(target, config),
            second: self.second.make_recognizer(target, config),
            first_processing: true,
            settled: None,
        }
    }
}

/// Recognizer for [`ExclusiveGesture`].
#[derive(Debug)]
pub struct ExclusiveRecognizer<K: TargetKey, A: Gesture, B: Gesture> {
    first: A::Recognizer<K>,
    second: B::Recognizer<K>,
    first_processing: bool,
    settled: Option<GestureState>,
}

impl<K: TargetKey, A: Gesture, B: Gesture> ExclusiveRecognizer<K, A, B> {
    fn handle(
        &mut self,
        targets: &dyn GestureTargets<K>,
        input: Input<'_>,
    ) -> Updates<ExclusiveValue<A::Value, B::Value>> {
        let mut out = Updates::new();
        let first = deliver(&mut self.first, targets, input);
        self.first_processing = self.first.is_valid(targets)
            && !matches!(
                self.first.state(),
                GestureState::Cancelled | GestureState::Failed
            );
        if self.first_processing {
            for update in first {
                if matches!(update, GestureUpdate::Ended(_)) {
                    self.settled = Some(GestureState::Done);
                }
                out.push(update.map(ExclusiveValue::First));
            }
        }
        let second = deliver(&mut self.second, targets, input);
        if !self.first_processing {
            for update in second {
                if matches!(update, GestureUpdate::Ended(_)) {
                    self.settled = Some(GestureState::Done);
                }
                out.push(update.map(ExclusiveValue::Second));
            }
        }
        if input.is_cancel() {
            self.settled = Some(GestureState::Cancelled);
        }
        out
    }
}

impl<K: TargetKey, A: Gesture, B: Gesture> Recognizer<K> for ExclusiveRecognizer<K, A, B> {
    type Value = ExclusiveValue<A::Value, B::Value>;

    route_inputs!();

    fn state(&self) -> GestureState {
        if let Some(state) = self.settled {
            state
        } else if self.first_processing {
            self.first.state()
        } else {
            self.second.state()
        }
    }

    fn is_valid(&self, targets: &dyn GestureTargets<K>) -> bool {
        self.first.is_valid(targets) && self.second.is_valid(targets)
    }

    fn reset(&mut self) {
        self.first.reset();
        self.second.reset();
        self.first_processing = true;
        self.settled = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{DragGesture, GestureExt, LongPressGesture, TapGesture};
    use hashbrown::HashMap;
    use kurbo::{Point, Rect};

    fn targets() -> HashMap<u8, Rect> {
        let mut targets = HashMap::new();
        targets.insert(0, Rect::new(0.0, 0.0, 200.0, 200.0));
        targets
    }

    fn make<G: Gesture>(gesture: &G) -> G::Recognizer<u8> {
        gesture.make_recognizer(0, &GestureConfig::default())
    }

    #[test]
    fn simultaneous_reports_both() {
        let t = targets();
        let mut r = make(&TapGesture::default().simultaneously(DragGesture::new(0.0)));
        assert_eq!(
            r.gesture_type(),
            PrimitiveGestureTypes::TAP | PrimitiveGestureTypes::DRAG
        );
        r.began(&t, &PointerEvent::down(Point::new(10.0, 10.0), 0.0));
        assert_eq!(r.state(), GestureState::Processing);
        let moved = r.moved(&t, &PointerEvent::moved(Point::new(12.0, 10.0), 0.1));
        assert!(matches!(
            moved.as_slice(),
            [GestureUpdate::Changed(SimultaneousValue { first: None, second: Some(_) })]
        ));
        let ended = r.ended(&t, &PointerEvent::up(Point::new(12.0, 10.0), 0.2));
        assert_eq!(ended.len(), 2);
        assert!(matches!(
            &ended[1],
            GestureUpdate::Ended(SimultaneousValue { first: Some(()), second: Some(_) })
        ));
        assert_eq!(r.state(), GestureState::Done);
    }

    #[test]
    fn simultaneous_stays_processing_until_both_settle() {
        let t = targets();
        let mut r = make(&TapGesture::default().simultaneously(LongPressGesture::default()));
        r.began(&t, &PointerEvent::down(Point::new(10.0, 10.0), 0.0));
        // The tap succeeds and the long press fails; neither pair rule applies.
        r.ended(&t, &PointerEvent::up(Point::new(10.0, 10.0), 0.1));
        assert_eq!(r.state(), GestureState::Processing);
        assert!(!r.is_possible(&t));
    }

    #[test]
    fn simultaneous_cancel() {
        let t = targets();
        let mut r = make(&TapGesture::default().simultaneously(DragGesture::default()));
        r.began(&t, &PointerEvent::down(Point::ZERO, 0.0));
        r.cancelled(&t, &PointerEvent::cancel(Point::ZERO, 0.1));
        assert_eq!(r.state(), GestureState::Cancelled);
        r.reset();
        assert_eq!(r.state(), GestureState::Ready);
    }

    #[test]
    fn sequence_long_press_then_drag() {
        let t = targets();
        let mut r = make(&LongPressGesture::default().sequenced(DragGesture::new(0.0)));
        let p = Point::new(50.0, 50.0);
        r.began(&t, &PointerEvent::down(p, 0.0));
        let fired = r.tick(&t, 0.6);
        assert!(matches!(
            fired.last(),
            Some(GestureUpdate::Changed(SequenceValue::First(true)))
        ));
        assert_eq!(r.state(), GestureState::Processing);
        let dragged = r.moved(&t, &PointerEvent::moved(Point::new(80.0, 50.0), 0.7));
        assert!(matches!(
            dragged.as_slice(),
            [GestureUpdate::Changed(SequenceValue::Second(true, Some(_)))]
        ));
        let ended = r.ended(&t, &PointerEvent::up(Point::new(80.0, 50.0), 0.8));
        assert!(matches!(
            ended.as_slice(),
            [GestureUpdate::Ended(SequenceValue::Second(true, Some(_)))]
        ));
        assert_eq!(r.state(), GestureState::Done);
    }

    #[test]
    fn sequence_second_before_first_fails() {
        let t = targets();
        let mut r = make(&LongPressGesture::default().sequenced(TapGesture::default()));
        r.began(&t, &PointerEvent::down(Point::new(5.0, 5.0), 0.0));
        let out = r.ended(&t, &PointerEvent::up(Point::new(5.0, 5.0), 0.1));
        assert!(!out.iter().any(|u| matches!(u, GestureUpdate::Ended(_))));
        assert_eq!(r.state(), GestureState::Failed);
    }

    #[test]
    fn exclusive_prefers_first() {
        let t = targets();
        let mut r = make(&TapGesture::default().exclusively(DragGesture::new(0.0)));
        r.began(&t, &PointerEvent::down(Point::new(5.0, 5.0), 0.0));
        // The drag reports movement, but the tap is still possible.
        let moved = r.moved(&t, &PointerEvent::moved(Point::new(9.0, 5.0), 0.1));
        assert!(moved.is_empty());
        let ended = r.ended(&t, &PointerEvent::up(Point::new(9.0, 5.0), 0.2));
        assert!(matches!(
            ended.as_slice(),
            [GestureUpdate::Ended(ExclusiveValue::First(()))]
        ));
        assert_eq!(r.state(), GestureState::Done);
    }

    #[test]
    fn exclusive_falls_back_when_first_fails() {
        let t = targets();
        let mut r = make(&LongPressGesture::default().exclusively(DragGesture::new(0.0)));
        r.began(&t, &PointerEvent::down(Point::new(5.0, 5.0), 0.0));
        let moved = r.moved(&t, &PointerEvent::moved(Point::new(60.0, 5.0), 0.1));
        assert!(matches!(
            moved.last(),
            Some(GestureUpdate::Changed(ExclusiveValue::Second(_)))
        ));
        assert_eq!(r.state(), GestureState::Processing);
    }

    #[test]
    fn filters_intersect() {
        let mut r = make(&TapGesture::default().exclusively(DragGesture::default()));
        let rest = r.set_type_filter(PrimitiveGestureTypes::ALL);
        assert!(!rest.contains(PrimitiveGestureTypes::TAP));
        assert!(!rest.contains(PrimitiveGestureTypes::DRAG));
        assert!(rest.contains(PrimitiveGestureTypes::LONG_PRESS));
    }

    #[test]
    fn exclusive_needs_both_branches() {
        let mut t = targets();
        let mut r = make(&TapGesture::default().exclusively(DragGesture::new(0.0)));
        r.set_type_filter(PrimitiveGestureTypes::ALL - PrimitiveGestureTypes::TAP);
        assert!(!r.is_valid(&t));

        let mut r = make(&TapGesture::default().exclusively(DragGesture::new(0.0)));
        r.began(&t, &PointerEvent::down(Point::new(5.0, 5.0), 0.0));
        assert!(r.is_possible(&t));
        t.clear();
        assert!(!r.is_possible(&t));
    }
}
