// Copyright 2025 the Sapling Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Per-context behavior.
//!
//! A [`ViewBehavior`] is the mutable half of a mounted context. The graph
//! creates one from [`View::make_behavior`] when a context is mounted, keeps it
//! for the context's lifetime and refreshes it with [`ViewBehavior::update`]
//! whenever reconciliation finds a new value at the context's path.

use alloc::boxed::Box;
use core::fmt;

use kurbo::{Point, Rect, Size};
use sapling_gesture::{AnyGesture, GesturePriority};
use sapling_layout::{
    EdgeSet, HorizontalAlignment, Layout, LayoutProperties, ProposedViewSize, Subviews,
    UnitPoint, VerticalAlignment, ViewDimensions, ViewSpacing,
};

use crate::{Canvas, ContextId, EnvironmentValues, KeyboardEvent, View};

/// What a behavior knows about its place in the graph.
#[derive(Clone, Copy, Debug)]
pub struct NodeContext<'a> {
    /// The context being asked.
    pub id: ContextId,
    /// Properties of the enclosing layout.
    pub parent_properties: LayoutProperties,
    /// The context's environment.
    pub environment: &'a EnvironmentValues,
}

/// A gesture attached to a context.
#[derive(Clone, Debug)]
pub struct AttachedGesture {
    /// Where the gesture sits in dispatch order.
    pub priority: GesturePriority,
    /// The gesture itself; recognizers are built per pointer sequence.
    pub gesture: AnyGesture<ContextId>,
}

/// The layout, drawing and input behavior of a mounted context.
///
/// Every method has a default suited to a context with exactly one child
/// that passes layout through unchanged, which is what composite views
/// need.
pub trait ViewBehavior: fmt::Debug {
    /// Refreshes the behavior from the value now found at the context's path.
    fn update(&mut self, view: &dyn View) {
        let _ = view;
    }

    /// Called when a child context was mounted or torn down.
    fn children_changed(&mut self) {}

    /// Properties handed to child behaviors through
    /// [`NodeContext::parent_properties`].
    fn layout_properties(&self) -> LayoutProperties {
        LayoutProperties::default()
    }

    /// Priority reported to the enclosing layout.
    fn layout_priority(&mut self, children: &mut dyn Subviews) -> f64 {
        if children.len() == 1 {
            children.priority(0)
        } else {
            0.0
        }
    }

    /// Spacing preferences reported to the enclosing layout.
    fn spacing(&mut self, children: &mut dyn Subviews) -> ViewSpacing {
        let mut spacing = ViewSpacing::ZERO;
        for index in 0..children.len() {
            spacing.form_union(&children.spacing(index), EdgeSet::ALL);
        }
        spacing
    }

    /// Size under `proposal`.
    fn size_that_fits(
        &mut self,
        cx: &NodeContext<'_>,
        proposal: ProposedViewSize,
        children: &mut dyn Subviews,
    ) -> Size {
        let _ = cx;
        let mut size = Size::ZERO;
        for index in 0..children.len() {
            let child = children.size_that_fits(index, proposal);
            size.width = size.width.max(child.width);
            size.height = size.height.max(child.height);
        }
        size
    }

    /// Size and alignment guides under `proposal`.
    fn dimensions(
        &mut self,
        cx: &NodeContext<'_>,
        proposal: ProposedViewSize,
        children: &mut dyn Subviews,
    ) -> ViewDimensions {
        if children.len() == 1 {
            children.dimensions(0, proposal)
        } else {
            ViewDimensions::new(self.size_that_fits(cx, proposal, children))
        }
    }

    /// Places the children inside `bounds`, given in window coordinates.
    fn place_children(
        &mut self,
        cx: &NodeContext<'_>,
        bounds: Rect,
        proposal: ProposedViewSize,
        children: &mut dyn Subviews,
    ) {
        let _ = (cx, proposal);
        let proposal = ProposedViewSize::from_size(bounds.size());
        for index in 0..children.len() {
            children.place(index, bounds.origin(), UnitPoint::TOP_LEADING, proposal);
        }
    }

    /// Draws the context's own content into `frame`. Children draw after,
    /// on top.
    fn draw(&self, cx: &NodeContext<'_>, frame: Rect, canvas: &mut dyn Canvas) {
        let _ = (cx, frame, canvas);
    }

    /// Adjusts the environment this context and its descendants see.
    fn modify_environment(&self, environment: &mut EnvironmentValues) {
        let _ = environment;
    }

    /// Gestures attached to this context.
    fn gestures(&self) -> &[AttachedGesture] {
        &[]
    }

    /// Handles a keyboard event delivered to this context. Returns `true` if
    /// the event was consumed.
    fn handle_key(&mut self, event: &KeyboardEvent) -> bool {
        let _ = event;
        false
    }
}

/// Behavior of composite views: pure pass-through.
#[derive(Clone, Copy, Debug, Default)]
pub struct BodyBehavior;

impl ViewBehavior for BodyBehavior {}

/// Runs a [`Layout`] over the context's children.
///
/// The layout value is re-read from [`View::configuration`] on every update.
/// The cache is built on first use and refreshed after updates and child
/// changes.
pub struct LayoutBehavior<L: Layout> {
    layout: L,
    cache: Option<L::Cache>,
    stale: bool,
}

impl<L: Layout> LayoutBehavior<L> {
    /// Creates a behavior running `layout`.
    #[must_use]
    pub fn new(layout: L) -> Self {
        Self {
            layout,
            cache: None,
            stale: false,
        }
    }

    /// The current layout.
    #[must_use]
    pub fn layout(&self) -> &L {
        &self.layout
    }

    fn prepare<'a>(
        layout: &L,
        cache: &'a mut Option<L::Cache>,
        stale: &mut bool,
        children: &mut dyn Subviews,
    ) -> &'a mut L::Cache {
        if core::mem::take(stale)
            && let Some(existing) = cache.as_mut()
        {
            layout.update_cache(existing, children);
        }
        cache.get_or_insert_with(|| layout.make_cache(children))
    }
}

impl<L: Layout + fmt::Debug> fmt::Debug for LayoutBehavior<L> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LayoutBehavior")
            .field("layout", &self.layout)
            .field("cached", &self.cache.is_some())
            .field("stale", &self.stale)
            .finish()
    }
}

const HORIZONTAL_GUIDES: [HorizontalAlignment; 3] = [
    HorizontalAlignment::Leading,
    HorizontalAlignment::Center,
    HorizontalAlignment::Trailing,
];

const VERTICAL_GUIDES: [VerticalAlignment; 5] = [
    VerticalAlignment::Top,
    VerticalAlignment::Center,
    VerticalAlignment::Bottom,
    VerticalAlignment::FirstTextBaseline,
    VerticalAlignment::LastTextBaseline,
];

impl<L> ViewBehavior for LayoutBehavior<L>
where
    L: Layout + Clone + fmt::Debug + 'static,
{
    fn update(&mut self, view: &dyn View) {
        if let Some(layout) = view
            .configuration()
            .and_then(|configuration| configuration.downcast_ref::<L>())
        {
            self.layout = layout.clone();
        }
        self.stale = true;
    }

    fn children_changed(&mut self) {
        self.stale = true;
    }

    fn layout_properties(&self) -> LayoutProperties {
        self.layout.layout_properties()
    }

    fn layout_priority(&mut self, _: &mut dyn Subviews) -> f64 {
        0.0
    }

    fn spacing(&mut self, children: &mut dyn Subviews) -> ViewSpacing {
        let cache = Self::prepare(&self.layout, &mut self.cache, &mut self.stale, children);
        self.layout.spacing(children, cache)
    }

    fn size_that_fits(
        &mut self,
        _: &NodeContext<'_>,
        proposal: ProposedViewSize,
        children: &mut dyn Subviews,
    ) -> Size {
        let cache = Self::prepare(&self.layout, &mut self.cache, &mut self.stale, children);
        self.layout.size_that_fits(proposal, children, cache)
    }

    fn dimensions(
        &mut self,
        cx: &NodeContext<'_>,
        proposal: ProposedViewSize,
        children: &mut dyn Subviews,
    ) -> ViewDimensions {
        let size = self.size_that_fits(cx, proposal, children);
        let bounds = Rect::from_origin_size(Point::ZERO, size);
        let cache = Self::prepare(&self.layout, &mut self.cache, &mut self.stale, children);
        let mut dimensions = ViewDimensions::new(size);
        for guide in HORIZONTAL_GUIDES {
            if let Some(value) =
                self.layout
                    .explicit_horizontal_alignment(guide, bounds, proposal, children, cache)
            {
                dimensions = dimensions.with_horizontal(guide, value);
            }
        }
        for guide in VERTICAL_GUIDES {
            if let Some(value) =
                self.layout
                    .explicit_vertical_alignment(guide, bounds, proposal, children, cache)
            {
                dimensions = dimensions.with_vertical(guide, value);
            }
        }
        dimensions
    }

    fn place_children(
        &mut self,
        _: &NodeContext<'_>,
        bounds: Rect,
        proposal: ProposedViewSize,
        children: &mut dyn Subviews,
    ) {
        let cache = Self::prepare(&self.layout, &mut self.cache, &mut self.stale, children);
        self.layout.place_subviews(bounds, proposal, children, cache);
    }
}

/// Boxes a [`LayoutBehavior`] for `layout`.
pub(crate) fn layout_behavior<L>(layout: &L) -> Box<dyn ViewBehavior>
where
    L: Layout + Clone + fmt::Debug + 'static,
{
    Box::new(LayoutBehavior::new(layout.clone()))
}
