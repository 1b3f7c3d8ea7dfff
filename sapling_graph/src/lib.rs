// Copyright 2025 the Sapling Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Sapling Graph: the persistent view-context graph behind a declarative UI.
//!
//! Applications describe their UI as immutable [`View`] values. A
//! [`ViewGraph`] mounts one context per value and keeps those contexts alive
//! across updates for as long as the value at the same position has the same
//! type:
//!
//! - [`View`], [`ViewRef`], [`AnyView`]: view descriptions and their children.
//! - [`ViewGraph`]: reconciliation, layout, drawing, hit testing and focus.
//! - [`ViewBehavior`]: the mutable per-context half, built by each view type.
//! - [`HStack`], [`VStack`], [`ZStack`], [`LayoutView`]: containers over any
//!   [`sapling_layout::Layout`].
//! - [`Button`]: a label that runs an action when pressed.
//! - [`ViewExt`]: frames, padding, priorities, environment values, drawing
//!   and gesture modifiers.
//! - [`Host`]: a cooperative frame loop with a re-entry queue for work done
//!   on other threads.
//!
//! Contexts are addressed by [`ContextId`], a generational handle. Gesture
//! recognizers hold these ids as their targets, so a torn-down context
//! invalidates its recognizers instead of leaving them dangling.
//!
//! ## Example
//!
//! ```rust
//! use kurbo::Size;
//! use sapling_graph::{Color, Conditional, GraphPath, Spacer, VStack, ViewExt, ViewGraph};
//!
//! fn body(expanded: bool) -> impl sapling_graph::View {
//!     VStack::new((
//!         Color::RED.frame(80.0, 20.0),
//!         if expanded {
//!             Conditional::First(Color::BLUE.frame(80.0, 60.0))
//!         } else {
//!             Conditional::Second(Spacer::new())
//!         },
//!     ))
//!     .spacing(0.0)
//! }
//!
//! let mut graph = ViewGraph::new();
//! graph.update(&body(false));
//! let header = graph.context_at(&GraphPath::from_indices(&[0])).unwrap();
//!
//! // Switching the branch replaces only the conditional's child.
//! let report = graph.update(&body(true));
//! assert_eq!(report.destroyed, vec![GraphPath::from_indices(&[1, 0])]);
//! assert!(graph.is_alive(header));
//!
//! graph.layout(Size::new(100.0, 100.0));
//! let frame = graph.frame(header).unwrap();
//! assert_eq!((frame.x0, frame.y0), (10.0, 10.0));
//! ```

extern crate alloc;

mod behavior;
mod button;
mod canvas;
mod config;
mod environment;
mod error;
mod event;
mod graph;
mod host;
mod id;
mod modifiers;
mod path;
pub mod resource;
mod stack;
mod view;
mod views;

pub use sapling_gesture;
pub use sapling_layout;

pub use behavior::{AttachedGesture, BodyBehavior, LayoutBehavior, NodeContext, ViewBehavior};
pub use button::Button;
pub use canvas::{Canvas, DrawCommand, RecordingCanvas};
pub use config::HostConfig;
pub use environment::{EnvironmentKey, EnvironmentValues, ForegroundColorKey, SeparatorColorKey};
pub use error::{GraphError, ResourceError};
pub use event::{Key, KeyState, KeyboardEvent};
pub use graph::{ReconcileReport, ViewGraph};
pub use host::{CancelToken, Host, UiContext, UiTask, UiTaskSender, WindowDriver, WindowEvent};
pub use id::ContextId;
pub use modifiers::{
    Background, Border, EnvironmentModifier, GestureModifier, KeyPressModifier, LayoutPriority,
    ModifiedContent, ViewExt, ViewModifier,
};
pub use path::GraphPath;
pub use resource::{DirectoryLoader, MemoryLoader, ResourceLoader};
pub use stack::{Conditional, HStack, LayoutView, VStack, ViewSequence, ZStack};
pub use view::{AnyView, BoxedView, EmptyView, View, ViewClone, ViewRef};
pub use views::{Color, DIVIDER_THICKNESS, Divider, Rectangle, Spacer};
