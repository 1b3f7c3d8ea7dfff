// Copyright 2025 the Sapling Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Gestures attached to views, dispatched through hit testing.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use kurbo::{Point, Size};
use sapling_graph::sapling_gesture::{
    DragGesture, GestureConfig, GestureDispatcher, GestureExt, PointerEvent, TapGesture,
};
use sapling_graph::{
    AnyView, Color, ContextId, EmptyView, GraphPath, HStack, View, ViewExt, ViewGraph, ZStack,
};

fn counter() -> Rc<Cell<u32>> {
    Rc::new(Cell::new(0))
}

fn bump(count: &Rc<Cell<u32>>) -> impl Fn(&()) + 'static {
    let count = Rc::clone(count);
    move |_| count.set(count.get() + 1)
}

struct Fixture {
    graph: ViewGraph,
    dispatcher: GestureDispatcher<ContextId>,
    config: GestureConfig,
}

impl Fixture {
    fn new(root: &impl View) -> Self {
        let mut graph = ViewGraph::new();
        graph.update(root);
        graph.layout(Size::new(100.0, 100.0));
        let config = GestureConfig::default();
        Self {
            graph,
            dispatcher: GestureDispatcher::new(config),
            config,
        }
    }

    fn send(&mut self, event: PointerEvent) -> bool {
        let graph = &self.graph;
        let config = self.config;
        self.dispatcher.dispatch(graph, &event, || {
            graph.gesture_candidates(event.location, &config)
        })
    }
}

#[test]
fn tap_on_a_view_fires_once() {
    let taps = counter();
    let root = Color::RED.gesture(TapGesture::new(1).on_ended(bump(&taps)));
    let mut fixture = Fixture::new(&root);
    let p = Point::new(50.0, 50.0);
    assert!(fixture.send(PointerEvent::down(p, 0.0)));
    assert!(fixture.send(PointerEvent::up(p, 0.1)));
    assert_eq!(taps.get(), 1);
    assert!(!fixture.dispatcher.is_tracking());
}

#[test]
fn presses_outside_every_view_are_not_consumed() {
    let taps = counter();
    let root = Color::RED
        .gesture(TapGesture::new(1).on_ended(bump(&taps)))
        .frame(10.0, 10.0);
    let mut fixture = Fixture::new(&root);
    assert!(!fixture.send(PointerEvent::down(Point::new(1.0, 1.0), 0.0)));
    assert_eq!(taps.get(), 0);
}

fn nested(
    outer: impl sapling_graph::sapling_gesture::Gesture,
    inner: impl sapling_graph::sapling_gesture::Gesture,
    high_priority_outer: bool,
) -> AnyView {
    let content = Color::BLUE.frame(40.0, 40.0).gesture(inner);
    let stack = ZStack::new((Color::RED, content));
    if high_priority_outer {
        AnyView::new(stack.high_priority_gesture(outer))
    } else {
        AnyView::new(stack.gesture(outer))
    }
}

fn drag(fixture: &mut Fixture) {
    let mut p = Point::new(50.0, 50.0);
    fixture.send(PointerEvent::down(p, 0.0));
    for step in 1..=4 {
        p.x += 5.0;
        fixture.send(PointerEvent::moved(p, f64::from(step) * 0.016));
    }
    fixture.send(PointerEvent::up(p, 0.1));
}

#[test]
fn the_deepest_drag_claims_the_pointer() {
    let log = Rc::new(RefCell::new(Vec::new()));
    let outer = {
        let log = Rc::clone(&log);
        DragGesture::new(5.0).on_changed(move |_| log.borrow_mut().push("outer"))
    };
    let inner = {
        let log = Rc::clone(&log);
        DragGesture::new(5.0).on_changed(move |_| log.borrow_mut().push("inner"))
    };
    let mut fixture = Fixture::new(&nested(outer, inner, false));
    drag(&mut fixture);
    let log = log.borrow();
    assert!(!log.is_empty());
    assert!(log.iter().all(|name| *name == "inner"));
}

#[test]
fn a_high_priority_gesture_wins_over_its_content() {
    let log = Rc::new(RefCell::new(Vec::new()));
    let outer = {
        let log = Rc::clone(&log);
        DragGesture::new(5.0).on_changed(move |_| log.borrow_mut().push("outer"))
    };
    let inner = {
        let log = Rc::clone(&log);
        DragGesture::new(5.0).on_changed(move |_| log.borrow_mut().push("inner"))
    };
    let mut fixture = Fixture::new(&nested(outer, inner, true));
    drag(&mut fixture);
    let log = log.borrow();
    assert!(!log.is_empty());
    assert!(log.iter().all(|name| *name == "outer"));
}

#[test]
fn simultaneous_gestures_share_the_pointer() {
    let taps = counter();
    let drags = counter();
    let d = Rc::clone(&drags);
    let root = Color::RED
        .gesture(TapGesture::new(1).on_ended(bump(&taps)))
        .simultaneous_gesture(DragGesture::new(0.0).on_ended(move |_| d.set(d.get() + 1)));
    let mut fixture = Fixture::new(&root);
    fixture.send(PointerEvent::down(Point::new(50.0, 50.0), 0.0));
    fixture.send(PointerEvent::moved(Point::new(54.0, 50.0), 0.02));
    fixture.send(PointerEvent::up(Point::new(54.0, 50.0), 0.05));
    assert_eq!((taps.get(), drags.get()), (1, 1));
}

#[test]
fn simultaneous_gesture_cannot_claim_a_taken_primitive() {
    let inner = counter();
    let outer = counter();
    let root = Color::RED
        .gesture(TapGesture::new(1).on_ended(bump(&inner)))
        .simultaneous_gesture(TapGesture::new(1).on_ended(bump(&outer)));
    let mut fixture = Fixture::new(&root);
    let p = Point::new(50.0, 50.0);
    fixture.send(PointerEvent::down(p, 0.0));
    fixture.send(PointerEvent::up(p, 0.05));
    assert_eq!((inner.get(), outer.get()), (1, 0));
}

#[test]
fn nested_taps_compete() {
    let inner = counter();
    let outer = counter();
    let root = Color::RED
        .gesture(TapGesture::new(1).on_ended(bump(&inner)))
        .gesture(TapGesture::new(1).on_ended(bump(&outer)));
    let mut fixture = Fixture::new(&root);
    let p = Point::new(50.0, 50.0);
    fixture.send(PointerEvent::down(p, 0.0));
    fixture.send(PointerEvent::up(p, 0.05));
    assert_eq!((inner.get(), outer.get()), (1, 0));
}

fn maybe_target(present: bool, taps: &Rc<Cell<u32>>) -> impl View {
    let target = if present {
        AnyView::new(Color::RED.gesture(TapGesture::new(1).on_ended(bump(taps))))
    } else {
        AnyView::new(EmptyView)
    };
    HStack::new((target,))
}

#[test]
fn torn_down_targets_are_pruned_on_next_dispatch() {
    let taps = counter();
    let mut fixture = Fixture::new(&maybe_target(true, &taps));
    let p = Point::new(50.0, 50.0);
    assert!(fixture.send(PointerEvent::down(p, 0.0)));
    let target = fixture
        .graph
        .context_at(&GraphPath::from_indices(&[0, 0]))
        .unwrap();

    fixture.graph.update(&maybe_target(false, &taps));
    assert!(!fixture.graph.is_alive(target));
    // Still armed until input arrives.
    assert!(fixture.dispatcher.is_tracking());
    assert!(!fixture.send(PointerEvent::up(p, 0.1)));
    assert!(!fixture.dispatcher.is_tracking());
    assert_eq!(taps.get(), 0);
}
