// Copyright 2025 the Sapling Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Sapling Gesture: composable gesture recognizers.
//!
//! A [`Gesture`] is an immutable description stored in the view tree. When an
//! interaction starts, each description makes a fresh [`Recognizer`], a small
//! state machine moving `Ready → Processing → {Done | Cancelled | Failed}` as
//! pointer events arrive.
//!
//! - Primitives: [`TapGesture`], [`DragGesture`], [`ButtonGesture`],
//!   [`LongPressGesture`].
//! - Combinators: [`SimultaneousGesture`], [`SequenceGesture`],
//!   [`ExclusiveGesture`], built with the [`GestureExt`] methods.
//! - Actions: [`GestureExt::on_changed`], [`GestureExt::on_ended`],
//!   [`GestureExt::on_pressing`].
//! - Dispatch: [`AnyGesture`] erases the value type, and
//!   [`GestureDispatcher`] arms handlers from a hit test and feeds them events.
//!
//! Recognizers refer to their view through a [`TargetKey`] and resolve it on
//! every use through [`GestureTargets`], so a recognizer whose view was torn
//! down simply stops being valid.
//!
//! ## Exclusivity
//!
//! Each primitive claims a set of [`PrimitiveGestureTypes`]. The dispatcher
//! threads a filter through the armed handlers in priority order; a handler
//! removes the types it claims from the filter it passes on, and a recognizer
//! whose own type is missing from the filter it received is invalid.
//!
//! ```
//! use hashbrown::HashMap;
//! use kurbo::{Point, Rect};
//! use sapling_gesture::{
//!     DragGesture, Gesture, GestureConfig, GestureExt, PointerEvent, PrimitiveGestureTypes,
//!     Recognizer, TapGesture,
//! };
//!
//! let mut targets = HashMap::new();
//! targets.insert(0_u8, Rect::new(0.0, 0.0, 100.0, 100.0));
//! let config = GestureConfig::default();
//!
//! let mut outer = DragGesture::default().make_recognizer(0_u8, &config);
//! let mut inner = DragGesture::default()
//!     .simultaneously(TapGesture::default())
//!     .make_recognizer(0_u8, &config);
//!
//! let rest = outer.set_type_filter(PrimitiveGestureTypes::ALL);
//! inner.set_type_filter(rest);
//!
//! // The inner drag is filtered out, but the tap half keeps the combinator valid.
//! assert!(inner.is_valid(&targets));
//! inner.began(&targets, &PointerEvent::down(Point::new(1.0, 1.0), 0.0));
//! inner.ended(&targets, &PointerEvent::up(Point::new(1.0, 1.0), 0.1));
//!
//! // Neither half can make progress any more.
//! assert!(!inner.is_possible(&targets));
//! ```

extern crate alloc;

mod button;
mod callbacks;
mod combinators;
mod config;
pub mod dispatcher;
pub mod drag;
mod handler;
mod long_press;
mod recognizer;
mod tap;
mod target;
mod types;

pub use button::{ButtonGesture, ButtonRecognizer};
pub use callbacks::{CallbackRecognizer, GestureCallbacks, GestureExt, WithCallbacks};
pub use combinators::{
    ExclusiveGesture, ExclusiveRecognizer, ExclusiveValue, SequenceGesture, SequenceRecognizer,
    SequenceValue, SimultaneousGesture, SimultaneousRecognizer, SimultaneousValue,
};
pub use config::GestureConfig;
pub use dispatcher::{GestureCandidate, GestureDispatcher};
pub use drag::{DragGesture, DragRecognizer, DragValue};
pub use handler::{AnyGesture, GestureHandler, GesturePriority};
pub use long_press::{LongPressGesture, LongPressRecognizer};
pub use recognizer::{Gesture, Recognizer};
pub use tap::{TapGesture, TapRecognizer};
pub use target::{GestureTargets, TargetKey};
pub use types::{
    DeviceId, GestureState, GestureUpdate, PRIMARY_BUTTON, PointerEvent, PointerEventKind,
    PrimitiveGestureTypes, Updates,
};
