// Copyright 2025 the Sapling Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The frame loop that drives a [`ViewGraph`] for one window.
//!
//! All graph work happens on the thread running the [`Host`]. Other threads
//! reach it only by posting [`UiTask`]s through a [`UiTaskSender`]; the host
//! drains them before it touches the graph, so no graph state is ever shared
//! across threads.

use alloc::boxed::Box;
use alloc::sync::Arc;
use core::fmt;
use core::sync::atomic::{AtomicBool, Ordering};
use core::time::Duration;
use std::sync::mpsc::{self, Receiver, Sender};

use kurbo::Size;
use sapling_gesture::{GestureDispatcher, PointerEvent};
use tracing::{debug, info, trace};

use crate::{Canvas, ContextId, HostConfig, KeyboardEvent, ReconcileReport, View, ViewGraph};

/// Input and lifecycle events delivered by the window.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum WindowEvent {
    /// Pointer input.
    Pointer(PointerEvent),
    /// Keyboard input.
    Keyboard(KeyboardEvent),
    /// The window wants to close.
    CloseRequested,
}

/// The platform window a [`Host`] draws into.
pub trait WindowDriver {
    /// Monotonic time in seconds, in the same clock as event timestamps.
    fn now(&self) -> f64;

    /// Size of the drawable area.
    fn content_size(&self) -> Size;

    /// Whether the window is in the foreground.
    fn is_active(&self) -> bool {
        true
    }

    /// The next pending event, if any.
    fn poll_event(&mut self) -> Option<WindowEvent>;

    /// The surface to draw the next frame into.
    fn canvas(&mut self) -> &mut dyn Canvas;

    /// Shows the frame drawn since the last call.
    fn present(&mut self) {}

    /// Waits up to `timeout` for work. The host calls this between frames.
    fn wait(&mut self, timeout: Duration) {
        std::thread::sleep(timeout);
    }
}

/// A shared flag that stops a running [`Host::run`].
#[derive(Clone, Debug, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    /// Creates a token that is not cancelled.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Requests cancellation.
    pub fn cancel(&self) {
        self.0.store(true, Ordering::Release);
    }

    /// Returns `true` once cancellation was requested.
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }
}

/// What a [`UiTask`] may touch while running on the UI thread.
#[derive(Debug)]
pub struct UiContext<'a> {
    graph: &'a ViewGraph,
    invalidated: bool,
}

impl UiContext<'_> {
    /// The graph as of the last update.
    #[must_use]
    pub fn graph(&self) -> &ViewGraph {
        self.graph
    }

    /// Rebuilds the root view before the next frame.
    pub fn invalidate(&mut self) {
        self.invalidated = true;
    }
}

/// Work handed to the UI thread.
pub type UiTask = Box<dyn FnOnce(&mut UiContext<'_>) + Send>;

/// Posts [`UiTask`]s to a [`Host`] from any thread.
#[derive(Clone)]
pub struct UiTaskSender(Sender<UiTask>);

impl UiTaskSender {
    /// Queues `task`. Returns `false` if the host is gone.
    pub fn post(&self, task: impl FnOnce(&mut UiContext<'_>) + Send + 'static) -> bool {
        self.0.send(Box::new(task)).is_ok()
    }
}

impl fmt::Debug for UiTaskSender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UiTaskSender").finish_non_exhaustive()
    }
}

/// Drives a [`ViewGraph`] from a root-building closure.
///
/// The closure is called again whenever the host is invalidated: after a
/// gesture or key handler consumed input, or when a task asks for it.
pub struct Host<F> {
    make_root: F,
    graph: ViewGraph,
    dispatcher: GestureDispatcher<ContextId>,
    config: HostConfig,
    sender: Sender<UiTask>,
    tasks: Receiver<UiTask>,
    cancel: CancelToken,
    invalidated: bool,
    needs_layout: bool,
    needs_redraw: bool,
    size: Size,
}

impl<F> fmt::Debug for Host<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Host")
            .field("graph", &self.graph)
            .field("config", &self.config)
            .field("invalidated", &self.invalidated)
            .field("size", &self.size)
            .finish_non_exhaustive()
    }
}

impl<F, V> Host<F>
where
    F: FnMut() -> V,
    V: View,
{
    /// Creates a host with the default configuration.
    #[must_use]
    pub fn new(make_root: F) -> Self {
        Self::with_config(make_root, HostConfig::default())
    }

    /// Creates a host.
    #[must_use]
    pub fn with_config(make_root: F, config: HostConfig) -> Self {
        let (sender, tasks) = mpsc::channel();
        Self {
            make_root,
            graph: ViewGraph::new(),
            dispatcher: GestureDispatcher::new(config.gestures),
            config,
            sender,
            tasks,
            cancel: CancelToken::new(),
            invalidated: true,
            needs_layout: true,
            needs_redraw: true,
            size: Size::ZERO,
        }
    }

    /// The mounted graph.
    #[must_use]
    pub fn graph(&self) -> &ViewGraph {
        &self.graph
    }

    /// The configuration.
    #[must_use]
    pub fn config(&self) -> &HostConfig {
        &self.config
    }

    /// A sender for posting work to this host.
    #[must_use]
    pub fn task_sender(&self) -> UiTaskSender {
        UiTaskSender(self.sender.clone())
    }

    /// A token that stops [`Host::run`].
    #[must_use]
    pub fn cancel_token(&self) -> CancelToken {
        self.cancel.clone()
    }

    /// Rebuilds the root view before the next frame.
    pub fn invalidate(&mut self) {
        self.invalidated = true;
    }

    /// Runs every queued task. Returns how many ran.
    pub fn run_pending_tasks(&mut self) -> usize {
        let mut ran = 0;
        while let Ok(task) = self.tasks.try_recv() {
            let mut cx = UiContext {
                graph: &self.graph,
                invalidated: false,
            };
            task(&mut cx);
            self.invalidated |= cx.invalidated;
            ran += 1;
        }
        if ran > 0 {
            trace!(ran, "ran ui tasks");
        }
        ran
    }

    /// Rebuilds and reconciles the root if the host was invalidated.
    pub fn update(&mut self) -> Option<ReconcileReport> {
        if !self.invalidated {
            return None;
        }
        self.invalidated = false;
        let root = (self.make_root)();
        let report = self.graph.update(&root);
        self.needs_layout = true;
        Some(report)
    }

    /// Lays out the graph if it changed or `size` differs from the last
    /// layout.
    pub fn layout(&mut self, size: Size) {
        if size != self.size {
            self.size = size;
            self.needs_layout = true;
        }
        if self.needs_layout {
            self.graph.layout(size);
            self.needs_layout = false;
            self.needs_redraw = true;
        }
    }

    /// Routes a pointer event to the gestures under it. Returns `true` if a
    /// gesture received it.
    pub fn handle_pointer_event(&mut self, event: &PointerEvent) -> bool {
        self.run_pending_tasks();
        if self.update().is_some() {
            self.layout(self.size);
        }
        let graph = &self.graph;
        let config = self.config.gestures;
        let consumed = self.dispatcher.dispatch(graph, event, || {
            graph.gesture_candidates(event.location, &config)
        });
        if consumed {
            self.invalidated = true;
        }
        consumed
    }

    /// Routes a keyboard event to the focused context and its ancestors.
    /// Returns `true` if one consumed it.
    pub fn handle_keyboard_event(&mut self, event: &KeyboardEvent) -> bool {
        let consumed = self.graph.handle_key(event);
        if consumed {
            self.invalidated = true;
        }
        consumed
    }

    /// Moves keyboard focus.
    pub fn set_focus(&mut self, id: Option<ContextId>) -> bool {
        self.graph.set_focus(id)
    }

    fn handle_window_event(&mut self, event: WindowEvent) {
        match event {
            WindowEvent::Pointer(pointer) => {
                self.handle_pointer_event(&pointer);
            }
            WindowEvent::Keyboard(key) => {
                self.handle_keyboard_event(&key);
            }
            WindowEvent::CloseRequested => self.cancel.cancel(),
        }
    }

    /// Produces one frame: drains tasks and events, advances gestures,
    /// reconciles, lays out and draws if anything changed.
    ///
    /// Returns `true` if the frame was drawn.
    pub fn frame(&mut self, driver: &mut dyn WindowDriver) -> bool {
        self.run_pending_tasks();
        while let Some(event) = driver.poll_event() {
            self.handle_window_event(event);
            if self.cancel.is_cancelled() {
                return false;
            }
        }
        if self.dispatcher.is_tracking() && self.dispatcher.tick(&self.graph, driver.now()) {
            self.invalidated = true;
        }
        self.update();
        self.layout(driver.content_size());
        if !self.needs_redraw {
            return false;
        }
        self.needs_redraw = false;
        self.graph.draw(driver.canvas());
        driver.present();
        true
    }

    /// Runs frames until cancelled. Returns the number of frames drawn.
    ///
    /// Cancellation is checked before and after every frame; the loop never
    /// stops in the middle of one.
    pub fn run(&mut self, driver: &mut dyn WindowDriver) -> u64 {
        info!("host loop started");
        let mut drawn = 0_u64;
        while !self.cancel.is_cancelled() {
            let started = driver.now();
            if self.frame(driver) {
                drawn += 1;
                debug!(frame = drawn, "frame drawn");
            }
            if self.cancel.is_cancelled() {
                break;
            }
            let interval = if driver.is_active() {
                self.config.active_frame_interval
            } else {
                self.config.inactive_frame_interval
            };
            let elapsed = Duration::try_from_secs_f64(driver.now() - started).unwrap_or_default();
            driver.wait(interval.saturating_sub(elapsed));
        }
        info!(frames = drawn, "host loop stopped");
        drawn
    }
}
