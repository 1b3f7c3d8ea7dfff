// Copyright 2025 the Sapling Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The frame loop against a scripted window.

use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::rc::Rc;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use kurbo::{Point, Size};
use sapling_graph::resource::{load_in_background, load_or_empty};
use sapling_graph::sapling_gesture::{GestureExt, LongPressGesture, PointerEvent, TapGesture};
use sapling_graph::{
    Button, CancelToken, Canvas, Color, GraphPath, Host, Key, KeyboardEvent, MemoryLoader,
    RecordingCanvas, ResourceLoader, VStack, ViewExt, WindowDriver, WindowEvent,
};

fn init_tracing() {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();
}

struct ScriptedWindow {
    time: f64,
    size: Size,
    events: VecDeque<WindowEvent>,
    canvas: RecordingCanvas,
    presented: usize,
    waits: usize,
    stop_after_waits: Option<(usize, CancelToken)>,
}

impl ScriptedWindow {
    fn new(size: Size) -> Self {
        Self {
            time: 0.0,
            size,
            events: VecDeque::new(),
            canvas: RecordingCanvas::new(),
            presented: 0,
            waits: 0,
            stop_after_waits: None,
        }
    }
}

impl WindowDriver for ScriptedWindow {
    fn now(&self) -> f64 {
        self.time
    }

    fn content_size(&self) -> Size {
        self.size
    }

    fn poll_event(&mut self) -> Option<WindowEvent> {
        self.events.pop_front()
    }

    fn canvas(&mut self) -> &mut dyn Canvas {
        &mut self.canvas
    }

    fn present(&mut self) {
        self.presented += 1;
    }

    fn wait(&mut self, timeout: Duration) {
        self.time += timeout.as_secs_f64();
        self.waits += 1;
        if let Some((limit, token)) = &self.stop_after_waits
            && self.waits >= *limit
        {
            token.cancel();
        }
    }
}

#[test]
fn idle_frames_are_not_redrawn() {
    init_tracing();
    let mut host = Host::new(|| Color::RED);
    let mut window = ScriptedWindow::new(Size::new(40.0, 30.0));
    window.stop_after_waits = Some((5, host.cancel_token()));
    let drawn = host.run(&mut window);
    assert_eq!(drawn, 1);
    assert_eq!(window.presented, 1);
    assert_eq!(window.waits, 5);
    assert!((window.time - 5.0 / 60.0).abs() < 1e-6);
    assert_eq!(window.canvas.commands().len(), 1);
}

#[test]
fn close_request_stops_the_loop() {
    init_tracing();
    let mut host = Host::new(|| Color::RED);
    let mut window = ScriptedWindow::new(Size::new(40.0, 30.0));
    window.events.push_back(WindowEvent::CloseRequested);
    assert_eq!(host.run(&mut window), 0);
    assert!(host.cancel_token().is_cancelled());
    assert_eq!(window.presented, 0);
}

#[test]
fn consumed_input_rebuilds_the_root() {
    init_tracing();
    let builds = Rc::new(Cell::new(0));
    let taps = Rc::new(Cell::new(0));
    let mut host = {
        let builds = Rc::clone(&builds);
        let taps = Rc::clone(&taps);
        Host::new(move || {
            builds.set(builds.get() + 1);
            let taps = Rc::clone(&taps);
            Color::RED.gesture(TapGesture::new(1).on_ended(move |_| taps.set(taps.get() + 1)))
        })
    };
    let mut window = ScriptedWindow::new(Size::new(40.0, 30.0));
    assert!(host.frame(&mut window));
    assert_eq!(builds.get(), 1);

    let p = Point::new(20.0, 15.0);
    window.events.extend([
        WindowEvent::Pointer(PointerEvent::down(p, 0.0)),
        WindowEvent::Pointer(PointerEvent::up(p, 0.1)),
    ]);
    assert!(host.frame(&mut window));
    assert_eq!(taps.get(), 1);
    let after_input = builds.get();
    assert!(after_input > 1);

    // Nothing happened since; the root is left alone.
    assert!(!host.frame(&mut window));
    assert_eq!(builds.get(), after_input);
}

#[test]
fn quiet_gesture_ticks_leave_the_root_alone() {
    init_tracing();
    let builds = Rc::new(Cell::new(0));
    let fired = Rc::new(Cell::new(false));
    let mut host = {
        let builds = Rc::clone(&builds);
        let fired = Rc::clone(&fired);
        Host::new(move || {
            builds.set(builds.get() + 1);
            let fired = Rc::clone(&fired);
            Color::RED.gesture(LongPressGesture::default().on_ended(move |_| fired.set(true)))
        })
    };
    let mut window = ScriptedWindow::new(Size::new(40.0, 30.0));
    assert!(host.frame(&mut window));
    assert!(host.handle_pointer_event(&PointerEvent::down(Point::new(20.0, 15.0), 0.0)));

    // The press itself asks for one rebuild.
    window.time = 0.1;
    host.frame(&mut window);
    let after_press = builds.get();

    // Still holding: the recognizer is tracked but nothing changes.
    window.time = 0.2;
    assert!(!host.frame(&mut window));
    window.time = 0.3;
    assert!(!host.frame(&mut window));
    assert_eq!(builds.get(), after_press);
    assert!(!fired.get());

    window.time = 0.6;
    host.frame(&mut window);
    assert!(fired.get());
    assert_eq!(builds.get(), after_press + 1);
}

#[test]
fn button_runs_its_action_on_release_inside() {
    init_tracing();
    let presses = Rc::new(Cell::new(0));
    let mut host = {
        let presses = Rc::clone(&presses);
        Host::new(move || {
            let presses = Rc::clone(&presses);
            Button::new(move || presses.set(presses.get() + 1), Color::RED)
        })
    };
    let mut window = ScriptedWindow::new(Size::new(40.0, 30.0));
    assert!(host.frame(&mut window));

    let inside = Point::new(20.0, 15.0);
    assert!(host.handle_pointer_event(&PointerEvent::down(inside, 0.0)));
    assert_eq!(presses.get(), 0);
    assert!(host.handle_pointer_event(&PointerEvent::up(inside, 0.1)));
    assert_eq!(presses.get(), 1);

    // A second press rebuilds against the new root and still works.
    host.frame(&mut window);
    host.handle_pointer_event(&PointerEvent::down(inside, 0.5));
    host.handle_pointer_event(&PointerEvent::up(inside, 0.6));
    assert_eq!(presses.get(), 2);
}

#[test]
fn button_released_outside_does_nothing() {
    init_tracing();
    let presses = Rc::new(Cell::new(0));
    let pressing = Rc::new(RefCell::new(Vec::new()));
    let mut host = {
        let presses = Rc::clone(&presses);
        let pressing = Rc::clone(&pressing);
        Host::new(move || {
            let presses = Rc::clone(&presses);
            let pressing = Rc::clone(&pressing);
            Button::new(move || presses.set(presses.get() + 1), Color::RED)
                .on_pressing(move |pressed| pressing.borrow_mut().push(pressed))
        })
    };
    let mut window = ScriptedWindow::new(Size::new(40.0, 30.0));
    host.frame(&mut window);

    host.handle_pointer_event(&PointerEvent::down(Point::new(20.0, 15.0), 0.0));
    host.handle_pointer_event(&PointerEvent::moved(Point::new(60.0, 15.0), 0.1));
    host.handle_pointer_event(&PointerEvent::up(Point::new(60.0, 15.0), 0.2));
    assert_eq!(presses.get(), 0);
    assert_eq!(*pressing.borrow(), [true, false]);
}

#[test]
fn taps_around_a_button_stay_quiet() {
    init_tracing();
    let presses = Rc::new(Cell::new(0));
    let taps = Rc::new(Cell::new(0));
    let mut host = {
        let presses = Rc::clone(&presses);
        let taps = Rc::clone(&taps);
        Host::new(move || {
            let presses = Rc::clone(&presses);
            let taps = Rc::clone(&taps);
            Button::new(move || presses.set(presses.get() + 1), Color::RED)
                .gesture(TapGesture::new(1).on_ended(move |_| taps.set(taps.get() + 1)))
        })
    };
    let mut window = ScriptedWindow::new(Size::new(40.0, 30.0));
    host.frame(&mut window);

    let inside = Point::new(20.0, 15.0);
    host.handle_pointer_event(&PointerEvent::down(inside, 0.0));
    host.handle_pointer_event(&PointerEvent::up(inside, 0.1));
    assert_eq!((presses.get(), taps.get()), (1, 0));
}

#[test]
fn tasks_from_other_threads_run_on_the_host() {
    init_tracing();
    let mut host = Host::new(|| Color::RED);
    host.update();
    let seen = Arc::new(AtomicUsize::new(0));
    let sender = host.task_sender();
    let worker = {
        let seen = Arc::clone(&seen);
        std::thread::spawn(move || {
            sender.post(move |cx| {
                seen.store(cx.graph().len(), Ordering::SeqCst);
                cx.invalidate();
            })
        })
    };
    assert!(worker.join().unwrap());
    assert_eq!(seen.load(Ordering::SeqCst), 0);
    assert_eq!(host.run_pending_tasks(), 1);
    assert_eq!(seen.load(Ordering::SeqCst), 1);
    assert!(host.update().is_some());
}

#[test]
fn missing_resources_fall_back_to_empty() {
    init_tracing();
    let mut loader = MemoryLoader::new();
    loader.insert("greeting", &b"hello"[..]);
    assert_eq!(load_or_empty(&loader, "greeting"), b"hello");
    assert!(load_or_empty(&loader, "missing").is_empty());

    let mut host = Host::new(|| Color::RED);
    let loader: Arc<dyn ResourceLoader> = Arc::new(loader);
    let received = Arc::new(AtomicUsize::new(usize::MAX));
    let loads = [("greeting", 5), ("missing", 0)];
    for (name, expected) in loads {
        let sink = Arc::clone(&received);
        load_in_background(Arc::clone(&loader), name, host.task_sender(), move |_, bytes| {
            sink.store(bytes.len(), Ordering::SeqCst);
        })
        .join()
        .unwrap();
        assert_eq!(host.run_pending_tasks(), 1);
        assert_eq!(received.load(Ordering::SeqCst), expected);
    }
}

#[test]
fn key_events_bubble_from_the_focused_context() {
    init_tracing();
    let presses = Rc::new(Cell::new(0));
    let mut host = {
        let presses = Rc::clone(&presses);
        Host::new(move || {
            let presses = Rc::clone(&presses);
            VStack::new((Color::RED, Color::BLUE)).on_key_press(move |event| {
                let handled = event.key == Key::Enter;
                if handled {
                    presses.set(presses.get() + 1);
                }
                handled
            })
        })
    };
    host.update();
    let leaf = host
        .graph()
        .context_at(&GraphPath::from_indices(&[0, 1]))
        .unwrap();

    assert!(!host.handle_keyboard_event(&KeyboardEvent::pressed(Key::Enter, 0.0)));
    assert!(host.set_focus(Some(leaf)));
    assert!(host.handle_keyboard_event(&KeyboardEvent::pressed(Key::Enter, 0.1)));
    assert!(!host.handle_keyboard_event(&KeyboardEvent::pressed(Key::Escape, 0.2)));
    assert_eq!(presses.get(), 1);
}
