// Copyright 2025 the Sapling Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! View modifiers.
//!
//! A modifier wraps a single piece of content in a context of its own. Layout
//! modifiers (frames and padding) run a [`Layout`](sapling_layout::Layout)
//! over that content; the rest pass layout through and adjust drawing, the
//! environment, input or the priority reported to the enclosing stack.

use alloc::boxed::Box;
use alloc::rc::Rc;
use core::any::Any;
use core::fmt;

use kurbo::{Insets, Rect, Stroke};
use peniko::Color as Paint;
use sapling_gesture::{AnyGesture, Gesture, GesturePriority};
use sapling_layout::{
    Alignment, EdgeSet, FlexFrameLayout, FlexLength, FrameLayout, PaddingLayout, Subviews,
};

use crate::behavior::{AttachedGesture, NodeContext, ViewBehavior, layout_behavior};
use crate::environment::ForegroundColorKey;
use crate::{Canvas, ContextId, EnvironmentKey, EnvironmentValues, KeyboardEvent, View, ViewRef};

/// Something that can wrap content in a [`ModifiedContent`].
pub trait ViewModifier: Clone + fmt::Debug + 'static {
    /// Builds the behavior for the modifier's context.
    fn make_behavior(&self) -> Box<dyn ViewBehavior>;
}

/// `content` with `modifier` applied.
#[derive(Clone, Debug)]
pub struct ModifiedContent<C, M> {
    /// The wrapped view.
    pub content: C,
    /// The modifier.
    pub modifier: M,
}

impl<C: View + Clone, M: ViewModifier> View for ModifiedContent<C, M> {
    fn child(&self, index: usize) -> Option<ViewRef<'_>> {
        (index == 0).then_some(ViewRef::Borrowed(&self.content))
    }

    fn make_behavior(&self) -> Box<dyn ViewBehavior> {
        self.modifier.make_behavior()
    }

    fn configuration(&self) -> Option<&dyn Any> {
        Some(&self.modifier)
    }
}

impl ViewModifier for FrameLayout {
    fn make_behavior(&self) -> Box<dyn ViewBehavior> {
        layout_behavior(self)
    }
}

impl ViewModifier for FlexFrameLayout {
    fn make_behavior(&self) -> Box<dyn ViewBehavior> {
        layout_behavior(self)
    }
}

impl ViewModifier for PaddingLayout {
    fn make_behavior(&self) -> Box<dyn ViewBehavior> {
        layout_behavior(self)
    }
}

/// Reads the modifier of type `M` out of a [`ModifiedContent`] value.
fn modifier_of<M: 'static>(view: &dyn View) -> Option<&M> {
    view.configuration()?.downcast_ref::<M>()
}

/// Overrides the layout priority the content reports to its stack.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LayoutPriority(pub f64);

impl ViewModifier for LayoutPriority {
    fn make_behavior(&self) -> Box<dyn ViewBehavior> {
        Box::new(PriorityBehavior { priority: self.0 })
    }
}

#[derive(Debug)]
struct PriorityBehavior {
    priority: f64,
}

impl ViewBehavior for PriorityBehavior {
    fn update(&mut self, view: &dyn View) {
        if let Some(LayoutPriority(priority)) = modifier_of(view) {
            self.priority = *priority;
        }
    }

    fn layout_priority(&mut self, _: &mut dyn Subviews) -> f64 {
        self.priority
    }
}

/// Sets an environment value for the content and its descendants.
pub struct EnvironmentModifier<K: EnvironmentKey> {
    /// The value to set.
    pub value: K::Value,
}

impl<K: EnvironmentKey> Clone for EnvironmentModifier<K> {
    fn clone(&self) -> Self {
        Self {
            value: self.value.clone(),
        }
    }
}

impl<K: EnvironmentKey> fmt::Debug for EnvironmentModifier<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EnvironmentModifier")
            .field("key", &core::any::type_name::<K>())
            .field("value", &self.value)
            .finish()
    }
}

impl<K: EnvironmentKey> ViewModifier for EnvironmentModifier<K> {
    fn make_behavior(&self) -> Box<dyn ViewBehavior> {
        Box::new(EnvironmentBehavior::<K> {
            value: self.value.clone(),
        })
    }
}

struct EnvironmentBehavior<K: EnvironmentKey> {
    value: K::Value,
}

impl<K: EnvironmentKey> fmt::Debug for EnvironmentBehavior<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EnvironmentBehavior")
            .field("value", &self.value)
            .finish()
    }
}

impl<K: EnvironmentKey> ViewBehavior for EnvironmentBehavior<K> {
    fn update(&mut self, view: &dyn View) {
        if let Some(modifier) = modifier_of::<EnvironmentModifier<K>>(view) {
            self.value = modifier.value.clone();
        }
    }

    fn modify_environment(&self, environment: &mut EnvironmentValues) {
        environment.set::<K>(self.value.clone());
    }
}

/// Fills the content's frame, behind the content.
#[derive(Clone, Copy, Debug)]
pub struct Background(pub Paint);

impl ViewModifier for Background {
    fn make_behavior(&self) -> Box<dyn ViewBehavior> {
        Box::new(*self)
    }
}

impl ViewBehavior for Background {
    fn update(&mut self, view: &dyn View) {
        if let Some(background) = modifier_of::<Self>(view) {
            *self = *background;
        }
    }

    fn draw(&self, _: &NodeContext<'_>, frame: Rect, canvas: &mut dyn Canvas) {
        canvas.fill_rect(frame, self.0);
    }
}

/// Outlines the content's frame.
///
/// Without an explicit color the outline uses the foreground color.
#[derive(Clone, Copy, Debug)]
pub struct Border {
    /// Outline color.
    pub color: Option<Paint>,
    /// Line width.
    pub width: f64,
}

impl ViewModifier for Border {
    fn make_behavior(&self) -> Box<dyn ViewBehavior> {
        Box::new(*self)
    }
}

impl ViewBehavior for Border {
    fn update(&mut self, view: &dyn View) {
        if let Some(border) = modifier_of::<Self>(view) {
            *self = *border;
        }
    }

    fn draw(&self, cx: &NodeContext<'_>, frame: Rect, canvas: &mut dyn Canvas) {
        let color = self
            .color
            .unwrap_or_else(|| cx.environment.get::<ForegroundColorKey>());
        // Keep the stroke inside the frame.
        let inset = frame.inset(-self.width / 2.0);
        canvas.stroke_rect(inset, &Stroke::new(self.width), color);
    }
}

/// Attaches a gesture to the content.
#[derive(Clone, Debug)]
pub struct GestureModifier {
    attached: AttachedGesture,
}

impl GestureModifier {
    /// Attaches `gesture` with `priority`.
    #[must_use]
    pub fn new(gesture: impl Gesture, priority: GesturePriority) -> Self {
        Self {
            attached: AttachedGesture {
                priority,
                gesture: AnyGesture::<ContextId>::new(gesture),
            },
        }
    }
}

impl ViewModifier for GestureModifier {
    fn make_behavior(&self) -> Box<dyn ViewBehavior> {
        Box::new(GestureBehavior {
            attached: self.attached.clone(),
        })
    }
}

#[derive(Debug)]
struct GestureBehavior {
    attached: AttachedGesture,
}

impl ViewBehavior for GestureBehavior {
    fn update(&mut self, view: &dyn View) {
        if let Some(modifier) = modifier_of::<GestureModifier>(view) {
            self.attached = modifier.attached.clone();
        }
    }

    fn gestures(&self) -> &[AttachedGesture] {
        core::slice::from_ref(&self.attached)
    }
}

/// Handles keys while the content, or a descendant, has focus.
#[derive(Clone)]
pub struct KeyPressModifier {
    handler: Rc<dyn Fn(&KeyboardEvent) -> bool>,
}

impl KeyPressModifier {
    /// Calls `handler` for every key event; it returns `true` to consume.
    #[must_use]
    pub fn new(handler: impl Fn(&KeyboardEvent) -> bool + 'static) -> Self {
        Self {
            handler: Rc::new(handler),
        }
    }
}

impl fmt::Debug for KeyPressModifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeyPressModifier").finish_non_exhaustive()
    }
}

impl ViewModifier for KeyPressModifier {
    fn make_behavior(&self) -> Box<dyn ViewBehavior> {
        Box::new(self.clone())
    }
}

impl ViewBehavior for KeyPressModifier {
    fn update(&mut self, view: &dyn View) {
        if let Some(modifier) = modifier_of::<Self>(view) {
            self.handler = Rc::clone(&modifier.handler);
        }
    }

    fn handle_key(&mut self, event: &KeyboardEvent) -> bool {
        (self.handler)(event)
    }
}

/// Modifier methods for every view.
pub trait ViewExt: View + Clone + Sized {
    /// Applies `modifier`.
    fn modifier<M: ViewModifier>(self, modifier: M) -> ModifiedContent<Self, M> {
        ModifiedContent {
            content: self,
            modifier,
        }
    }

    /// A fixed `width` × `height` frame with the content centered.
    fn frame(self, width: f64, height: f64) -> ModifiedContent<Self, FrameLayout> {
        self.modifier(FrameLayout::new(Some(width), Some(height), Alignment::CENTER))
    }

    /// A frame fixing any subset of the dimensions.
    fn frame_aligned(
        self,
        width: Option<f64>,
        height: Option<f64>,
        alignment: Alignment,
    ) -> ModifiedContent<Self, FrameLayout> {
        self.modifier(FrameLayout::new(width, height, alignment))
    }

    /// A frame with minimum, ideal and maximum dimensions.
    fn flex_frame(
        self,
        width: FlexLength,
        height: FlexLength,
        alignment: Alignment,
    ) -> ModifiedContent<Self, FlexFrameLayout> {
        self.modifier(FlexFrameLayout::new(width, height, alignment))
    }

    /// Default padding on every edge.
    fn padding(self) -> ModifiedContent<Self, PaddingLayout> {
        self.modifier(PaddingLayout::default())
    }

    /// `length` of padding on every edge.
    fn padding_length(self, length: f64) -> ModifiedContent<Self, PaddingLayout> {
        self.modifier(PaddingLayout::uniform(length))
    }

    /// Padding on `edges` only; `None` uses the default length.
    fn padding_edges(
        self,
        edges: EdgeSet,
        insets: Option<Insets>,
    ) -> ModifiedContent<Self, PaddingLayout> {
        self.modifier(PaddingLayout::new(edges, insets))
    }

    /// Reports `priority` to the enclosing stack.
    fn layout_priority(self, priority: f64) -> ModifiedContent<Self, LayoutPriority> {
        self.modifier(LayoutPriority(priority))
    }

    /// Sets `K` to `value` for the content.
    fn environment<K: EnvironmentKey>(
        self,
        value: K::Value,
    ) -> ModifiedContent<Self, EnvironmentModifier<K>> {
        self.modifier(EnvironmentModifier::<K> { value })
    }

    /// Sets the foreground color for the content.
    fn foreground_color(
        self,
        color: Paint,
    ) -> ModifiedContent<Self, EnvironmentModifier<ForegroundColorKey>> {
        self.environment::<ForegroundColorKey>(color)
    }

    /// Fills the content's frame behind it.
    fn background(self, color: Paint) -> ModifiedContent<Self, Background> {
        self.modifier(Background(color))
    }

    /// Outlines the content's frame.
    fn border(self, color: Paint, width: f64) -> ModifiedContent<Self, Border> {
        self.modifier(Border {
            color: Some(color),
            width,
        })
    }

    /// Attaches `gesture`, armed in hit-test order.
    fn gesture(self, gesture: impl Gesture) -> ModifiedContent<Self, GestureModifier> {
        self.modifier(GestureModifier::new(gesture, GesturePriority::Normal))
    }

    /// Attaches `gesture` ahead of the gestures of the content.
    fn high_priority_gesture(
        self,
        gesture: impl Gesture,
    ) -> ModifiedContent<Self, GestureModifier> {
        self.modifier(GestureModifier::new(gesture, GesturePriority::High))
    }

    /// Attaches `gesture` alongside, without competing for input types.
    fn simultaneous_gesture(
        self,
        gesture: impl Gesture,
    ) -> ModifiedContent<Self, GestureModifier> {
        self.modifier(GestureModifier::new(gesture, GesturePriority::Simultaneous))
    }

    /// Handles keyboard events while focused.
    fn on_key_press(
        self,
        handler: impl Fn(&KeyboardEvent) -> bool + 'static,
    ) -> ModifiedContent<Self, KeyPressModifier> {
        self.modifier(KeyPressModifier::new(handler))
    }
}

impl<V: View + Clone> ViewExt for V {}
