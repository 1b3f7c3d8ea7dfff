// Copyright 2025 the Sapling Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Type filters threaded through armed handlers keep claimed primitives exclusive.

use std::cell::Cell;
use std::rc::Rc;

use hashbrown::HashMap;
use kurbo::{Point, Rect};
use sapling_gesture::{
    AnyGesture, ButtonGesture, DragGesture, GestureCandidate, GestureConfig, GestureDispatcher,
    GestureExt, GesturePriority, GestureState, LongPressGesture, PointerEvent,
    PrimitiveGestureTypes, TapGesture,
};

fn targets() -> HashMap<u32, Rect> {
    let mut targets = HashMap::new();
    targets.insert(1, Rect::new(0.0, 0.0, 200.0, 200.0));
    targets
}

fn primitives() -> Vec<(PrimitiveGestureTypes, AnyGesture<u32>)> {
    vec![
        (PrimitiveGestureTypes::TAP, AnyGesture::new(TapGesture::default())),
        (PrimitiveGestureTypes::DRAG, AnyGesture::new(DragGesture::default())),
        (PrimitiveGestureTypes::BUTTON, AnyGesture::new(ButtonGesture)),
        (
            PrimitiveGestureTypes::LONG_PRESS,
            AnyGesture::new(LongPressGesture::default()),
        ),
    ]
}

#[test]
fn later_recognizers_cannot_claim_a_subtracted_type() {
    let t = targets();
    let config = GestureConfig::default();
    for (kind, first) in primitives() {
        for (other_kind, second) in primitives() {
            let mut a = first.make_handler(1, &config);
            let mut b = second.make_handler(1, &config);
            let rest = a.set_type_filter(PrimitiveGestureTypes::ALL);
            assert!(!rest.contains(kind), "{kind:?} must subtract itself");
            b.set_type_filter(rest);
            if !rest.contains(other_kind) {
                assert!(!b.is_possible(&t), "{other_kind:?} claimed after {kind:?}");
                b.handle(&t, &PointerEvent::down(Point::new(10.0, 10.0), 0.0));
                // Callers only forward to possible handlers; the filter still holds.
                assert!(!b.is_valid(&t));
            } else {
                assert!(b.is_possible(&t));
            }
        }
    }
}

#[test]
fn filtering_is_transitive_through_a_chain() {
    let t = targets();
    let config = GestureConfig::default();
    let drag = AnyGesture::new(DragGesture::default());
    let tap = AnyGesture::new(TapGesture::default());
    let mut first = drag.make_handler(1, &config);
    let mut middle = tap.make_handler(1, &config);
    let mut last = drag.make_handler(1, &config);
    let f = first.set_type_filter(PrimitiveGestureTypes::ALL);
    let f = middle.set_type_filter(f);
    last.set_type_filter(f);
    assert!(first.is_possible(&t));
    assert!(middle.is_possible(&t));
    assert!(!last.is_possible(&t));
}

#[test]
fn dispatcher_delivers_only_to_the_first_claimant() {
    let t = targets();
    let counts: Vec<Rc<Cell<u32>>> = (0..3).map(|_| Rc::new(Cell::new(0))).collect();
    let gestures: Vec<AnyGesture<u32>> = counts
        .iter()
        .map(|count| {
            let count = Rc::clone(count);
            AnyGesture::new(DragGesture::new(0.0).on_changed(move |_| count.set(count.get() + 1)))
        })
        .collect();
    let config = GestureConfig::default();
    let mut dispatcher = GestureDispatcher::<u32>::new(config);
    dispatcher.dispatch(&t, &PointerEvent::down(Point::new(5.0, 5.0), 0.0), || {
        gestures
            .iter()
            .map(|g| GestureCandidate::new(GesturePriority::Normal, g.make_handler(1, &config)))
            .collect()
    });
    for step in 1..=3 {
        let at = Point::new(5.0 + f64::from(step) * 10.0, 5.0);
        dispatcher.dispatch(&t, &PointerEvent::moved(at, f64::from(step) * 0.1), Vec::new);
    }
    let seen: Vec<u32> = counts.iter().map(|c| c.get()).collect();
    assert_eq!(seen, vec![3, 0, 0]);
}

#[test]
fn disallowed_types_never_arm() {
    let t = targets();
    let config = GestureConfig {
        allowed_types: PrimitiveGestureTypes::ALL - PrimitiveGestureTypes::DRAG,
        ..GestureConfig::default()
    };
    let drag = AnyGesture::new(DragGesture::default());
    let tap = AnyGesture::new(TapGesture::default());
    let mut dispatcher = GestureDispatcher::<u32>::new(config);
    let consumed = dispatcher.dispatch(&t, &PointerEvent::down(Point::new(5.0, 5.0), 0.0), || {
        vec![
            GestureCandidate::new(GesturePriority::High, drag.make_handler(1, &config)),
            GestureCandidate::new(GesturePriority::Normal, tap.make_handler(1, &config)),
        ]
    });
    assert!(consumed);
    assert_eq!(dispatcher.active_len(), 1);
    dispatcher.dispatch(&t, &PointerEvent::up(Point::new(5.0, 5.0), 0.1), Vec::new);
    assert!(!dispatcher.is_tracking());
}

#[test]
fn combinator_keeps_unfiltered_half() {
    let t = targets();
    let config = GestureConfig::default();
    let outer = AnyGesture::new(DragGesture::default());
    let both = AnyGesture::new(DragGesture::new(0.0).simultaneously(TapGesture::default()));
    let mut a = outer.make_handler(1, &config);
    let mut b = both.make_handler(1, &config);
    let rest = a.set_type_filter(PrimitiveGestureTypes::ALL);
    b.set_type_filter(rest);
    assert!(b.is_possible(&t));
    b.handle(&t, &PointerEvent::down(Point::new(5.0, 5.0), 0.0));
    b.handle(&t, &PointerEvent::moved(Point::new(50.0, 5.0), 0.1));
    b.handle(&t, &PointerEvent::up(Point::new(50.0, 5.0), 0.2));
    // Only the tap half ran; the filtered drag never left `Ready`.
    assert_eq!(b.state(), GestureState::Processing);
    assert!(!b.is_possible(&t));
}

#[test]
fn every_priority_goes_through_the_filter() {
    let t = targets();
    let config = GestureConfig::default();
    let armed = |candidates: Vec<(GesturePriority, AnyGesture<u32>)>| {
        let mut dispatcher = GestureDispatcher::<u32>::new(config);
        dispatcher.dispatch(&t, &PointerEvent::down(Point::new(5.0, 5.0), 0.0), || {
            candidates
                .iter()
                .map(|(priority, g)| GestureCandidate::new(*priority, g.make_handler(1, &config)))
                .collect()
        });
        dispatcher.active_len()
    };
    let drag = AnyGesture::new(DragGesture::new(0.0));
    let tap_and_drag = AnyGesture::new(TapGesture::default().simultaneously(DragGesture::new(0.0)));
    let long_press = AnyGesture::new(LongPressGesture::default());

    assert_eq!(
        armed(vec![
            (GesturePriority::Simultaneous, drag.clone()),
            (GesturePriority::High, drag.clone()),
        ]),
        1
    );
    // A compound is armed only while the filter still holds all of its primitives.
    assert_eq!(
        armed(vec![
            (GesturePriority::Normal, drag.clone()),
            (GesturePriority::Simultaneous, tap_and_drag),
        ]),
        1
    );
    assert_eq!(
        armed(vec![
            (GesturePriority::Normal, drag),
            (GesturePriority::Simultaneous, long_press),
        ]),
        2
    );
}
