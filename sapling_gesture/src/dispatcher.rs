// Copyright 2025 the Sapling Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Dispatcher: arm handlers from a hit test and route pointer events to them.
//!
//! The dispatcher holds the set of handlers tracking the current interaction:
//!
//! - On a button press with nothing active, it asks for candidates (typically
//!   the gestures along the hit-test path), orders them high priority first,
//!   then normal, then simultaneous, and threads a type filter through them so
//!   that earlier handlers can exclude primitives from later ones. A handler
//!   is armed only if the filter still holds every primitive it claims.
//! - Every event first drops handlers that are no longer possible, so handlers
//!   whose target was torn down disappear lazily.
//! - After an event, only handlers still processing and possible stay active.
//!
//! ## Minimal example
//!
//! ```
//! use hashbrown::HashMap;
//! use kurbo::{Point, Rect};
//! use sapling_gesture::{
//!     AnyGesture, DragGesture, GestureCandidate, GestureConfig, GestureDispatcher, GesturePriority,
//!     PointerEvent, TapGesture,
//! };
//!
//! let mut targets = HashMap::new();
//! targets.insert(1_u32, Rect::new(0.0, 0.0, 100.0, 100.0));
//!
//! let drag = AnyGesture::new(DragGesture::default());
//! let tap = AnyGesture::new(TapGesture::default());
//! let config = GestureConfig::default();
//! let mut dispatcher = GestureDispatcher::<u32>::new(config);
//!
//! let consumed = dispatcher.dispatch(&targets, &PointerEvent::down(Point::new(5.0, 5.0), 0.0), || {
//!     vec![
//!         GestureCandidate::new(GesturePriority::Normal, drag.make_handler(1, &config)),
//!         GestureCandidate::new(GesturePriority::Normal, tap.make_handler(1, &config)),
//!     ]
//! });
//! assert!(consumed);
//! assert_eq!(dispatcher.active_len(), 2);
//! ```

use alloc::boxed::Box;
use alloc::vec::Vec;

use tracing::{debug, trace};

use crate::{
    GestureConfig, GestureHandler, GesturePriority, GestureState, GestureTargets, PointerEvent,
    PointerEventKind, TargetKey,
};

/// A handler offered to the dispatcher when an interaction starts.
#[derive(Debug)]
pub struct GestureCandidate<K> {
    /// Where the handler is ordered.
    pub priority: GesturePriority,
    /// The handler itself.
    pub handler: Box<dyn GestureHandler<K>>,
}

impl<K> GestureCandidate<K> {
    /// Pairs a handler with its priority.
    #[must_use]
    pub fn new(priority: GesturePriority, handler: Box<dyn GestureHandler<K>>) -> Self {
        Self { priority, handler }
    }
}

/// Routes pointer events to the handlers tracking the current interaction.
#[derive(Debug)]
pub struct GestureDispatcher<K> {
    config: GestureConfig,
    active: Vec<Box<dyn GestureHandler<K>>>,
}

impl<K: TargetKey> GestureDispatcher<K> {
    /// Creates an idle dispatcher.
    #[must_use]
    pub fn new(config: GestureConfig) -> Self {
        Self {
            config,
            active: Vec::new(),
        }
    }

    /// The configuration recognizers are created with.
    #[must_use]
    pub fn config(&self) -> &GestureConfig {
        &self.config
    }

    /// Number of handlers tracking the current interaction.
    #[must_use]
    pub fn active_len(&self) -> usize {
        self.active.len()
    }

    /// Returns `true` while an interaction is being tracked.
    #[must_use]
    pub fn is_tracking(&self) -> bool {
        !self.active.is_empty()
    }

    /// Drops every active handler without notifying it.
    pub fn clear(&mut self) {
        self.active.clear();
    }

    /// Orders and filters `candidates` into the active set.
    fn arm(&mut self, mut candidates: Vec<GestureCandidate<K>>) {
        candidates.sort_by_key(|c| c.priority.rank());
        let mut filter = self.config.allowed_types;
        for GestureCandidate { mut handler, .. } in candidates {
            if self.config.type_filtering {
                let kind = handler.gesture_type();
                let included = filter.contains(kind);
                filter = handler.set_type_filter(filter);
                if !included {
                    trace!(?kind, ?filter, "gesture excluded by type filter");
                    continue;
                }
            }
            self.active.push(handler);
        }
        debug!(armed = self.active.len(), "gesture handlers armed");
    }

    /// Delivers `event` to the active handlers.
    ///
    /// `candidates` is called only for a button press while nothing is
    /// active, or when no active handler accepted the press. Returns `true` if
    /// at least one handler received the event.
    pub fn dispatch(
        &mut self,
        targets: &dyn GestureTargets<K>,
        event: &PointerEvent,
        candidates: impl FnOnce() -> Vec<GestureCandidate<K>>,
    ) -> bool {
        let mut candidates = Some(candidates);
        if self.active.is_empty() && event.kind == PointerEventKind::ButtonDown {
            if let Some(candidates) = candidates.take() {
                self.arm(candidates());
            }
        }
        let mut delivered = self.deliver(targets, event);
        if event.kind == PointerEventKind::ButtonDown && self.active.is_empty() {
            // Nothing is tracking this press; start over from a fresh hit test.
            if let Some(candidates) = candidates.take() {
                self.arm(candidates());
                delivered |= self.deliver(targets, event);
            }
        }
        delivered
    }

    fn deliver(&mut self, targets: &dyn GestureTargets<K>, event: &PointerEvent) -> bool {
        self.active.retain(|handler| handler.is_possible(targets));
        if self.active.is_empty() {
            return false;
        }
        for handler in &mut self.active {
            handler.handle(targets, event);
        }
        self.retain_processing(targets);
        true
    }

    /// Advances every active handler to `now`.
    ///
    /// Returns `true` if any handler changed state or ran its callbacks.
    /// Quiet ticks return `false` even while an interaction is tracked.
    pub fn tick(&mut self, targets: &dyn GestureTargets<K>, now: f64) -> bool {
        self.active.retain(|handler| handler.is_possible(targets));
        let mut changed = false;
        for handler in &mut self.active {
            changed |= handler.tick(targets, now);
        }
        self.retain_processing(targets);
        changed
    }

    fn retain_processing(&mut self, targets: &dyn GestureTargets<K>) {
        let before = self.active.len();
        self.active.retain(|handler| {
            handler.state() == GestureState::Processing && handler.is_possible(targets)
        });
        if self.active.len() != before {
            trace!(
                finished = before - self.active.len(),
                remaining = self.active.len(),
                "gesture handlers settled"
            );
        }
    }
}
