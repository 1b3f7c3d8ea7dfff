// Copyright 2025 the Sapling Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Primitive leaf views.

use alloc::boxed::Box;

use kurbo::{Rect, Size};
use peniko::Color as Paint;
use sapling_layout::{Axis, ProposedViewSize, Subviews};

use crate::behavior::{NodeContext, ViewBehavior};
use crate::environment::{ForegroundColorKey, SeparatorColorKey};
use crate::{Canvas, View, ViewRef};

/// A solid color that fills whatever space it is offered.
///
/// Unspecified proposal dimensions fall back to
/// [`ProposedViewSize::DEFAULT_DIMENSION`].
#[derive(Clone, Copy, Debug)]
pub struct Color(pub Paint);

impl Color {
    /// Opaque black.
    pub const BLACK: Self = Self(Paint::BLACK);
    /// Opaque white.
    pub const WHITE: Self = Self(Paint::WHITE);
    /// Opaque red.
    pub const RED: Self = Self(Paint::from_rgb8(0xff, 0x00, 0x00));
    /// Opaque green.
    pub const GREEN: Self = Self(Paint::from_rgb8(0x00, 0x80, 0x00));
    /// Opaque blue.
    pub const BLUE: Self = Self(Paint::from_rgb8(0x00, 0x00, 0xff));
    /// Fully transparent.
    pub const CLEAR: Self = Self(Paint::TRANSPARENT);

    /// Creates a color view from 8-bit components.
    #[must_use]
    pub const fn from_rgba8(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self(Paint::from_rgba8(r, g, b, a))
    }
}

impl From<Paint> for Color {
    fn from(paint: Paint) -> Self {
        Self(paint)
    }
}

impl View for Color {
    fn child_count(&self) -> usize {
        0
    }

    fn child(&self, _: usize) -> Option<ViewRef<'_>> {
        None
    }

    fn make_behavior(&self) -> Box<dyn ViewBehavior> {
        Box::new(FillBehavior { paint: Some(self.0) })
    }
}

/// A rectangle filled with the environment's foreground color.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Rectangle;

impl View for Rectangle {
    fn child_count(&self) -> usize {
        0
    }

    fn child(&self, _: usize) -> Option<ViewRef<'_>> {
        None
    }

    fn make_behavior(&self) -> Box<dyn ViewBehavior> {
        Box::new(FillBehavior { paint: None })
    }
}

/// Fills the frame with a fixed paint, or the foreground color when `None`.
#[derive(Debug)]
struct FillBehavior {
    paint: Option<Paint>,
}

impl ViewBehavior for FillBehavior {
    fn update(&mut self, view: &dyn View) {
        if let Some(color) = view.as_any().downcast_ref::<Color>() {
            self.paint = Some(color.0);
        }
    }

    fn layout_priority(&mut self, _: &mut dyn Subviews) -> f64 {
        0.0
    }

    fn size_that_fits(
        &mut self,
        _: &NodeContext<'_>,
        proposal: ProposedViewSize,
        _: &mut dyn Subviews,
    ) -> Size {
        proposal.replacing_unspecified_dimensions()
    }

    fn draw(&self, cx: &NodeContext<'_>, frame: Rect, canvas: &mut dyn Canvas) {
        let paint = self
            .paint
            .unwrap_or_else(|| cx.environment.get::<ForegroundColorKey>());
        canvas.fill_rect(frame, paint);
    }
}

/// Flexible empty space.
///
/// Inside a stack a spacer grows along the stacking axis and has no extent
/// across it. Elsewhere it behaves as if in a vertical stack.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Spacer {
    /// The smallest length the spacer shrinks to.
    pub min_length: Option<f64>,
}

impl Spacer {
    /// A spacer with no minimum length.
    #[must_use]
    pub const fn new() -> Self {
        Self { min_length: None }
    }

    /// A spacer that never shrinks below `min_length`.
    #[must_use]
    pub const fn min_length(min_length: f64) -> Self {
        Self {
            min_length: Some(min_length),
        }
    }
}

impl View for Spacer {
    fn child_count(&self) -> usize {
        0
    }

    fn child(&self, _: usize) -> Option<ViewRef<'_>> {
        None
    }

    fn make_behavior(&self) -> Box<dyn ViewBehavior> {
        Box::new(SpacerBehavior { spacer: *self })
    }
}

#[derive(Debug)]
struct SpacerBehavior {
    spacer: Spacer,
}

impl ViewBehavior for SpacerBehavior {
    fn update(&mut self, view: &dyn View) {
        if let Some(spacer) = view.as_any().downcast_ref::<Spacer>() {
            self.spacer = *spacer;
        }
    }

    fn layout_priority(&mut self, _: &mut dyn Subviews) -> f64 {
        0.0
    }

    fn size_that_fits(
        &mut self,
        cx: &NodeContext<'_>,
        proposal: ProposedViewSize,
        _: &mut dyn Subviews,
    ) -> Size {
        if proposal == ProposedViewSize::ZERO {
            return Size::ZERO;
        }
        let mut size = match self.spacer.min_length {
            Some(min) => {
                let size = proposal.replacing_unspecified_dimensions_by(Size::new(min, min));
                Size::new(size.width.max(min), size.height.max(min))
            }
            None => proposal.replacing_unspecified_dimensions(),
        };
        match stack_axis(cx) {
            Axis::Horizontal => size.height = 0.0,
            Axis::Vertical => size.width = 0.0,
        }
        size
    }
}

/// A thin rule separating content.
///
/// In a horizontal stack the rule is vertical and one unit wide; otherwise
/// it is horizontal and one unit tall.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Divider;

/// Thickness of a [`Divider`].
pub const DIVIDER_THICKNESS: f64 = 1.0;

impl View for Divider {
    fn child_count(&self) -> usize {
        0
    }

    fn child(&self, _: usize) -> Option<ViewRef<'_>> {
        None
    }

    fn make_behavior(&self) -> Box<dyn ViewBehavior> {
        Box::new(DividerBehavior)
    }
}

#[derive(Debug)]
struct DividerBehavior;

impl ViewBehavior for DividerBehavior {
    fn layout_priority(&mut self, _: &mut dyn Subviews) -> f64 {
        0.0
    }

    fn size_that_fits(
        &mut self,
        cx: &NodeContext<'_>,
        proposal: ProposedViewSize,
        _: &mut dyn Subviews,
    ) -> Size {
        let mut size = proposal.replacing_unspecified_dimensions();
        match stack_axis(cx) {
            Axis::Horizontal => size.width = DIVIDER_THICKNESS,
            Axis::Vertical => size.height = DIVIDER_THICKNESS,
        }
        size
    }

    fn draw(&self, cx: &NodeContext<'_>, frame: Rect, canvas: &mut dyn Canvas) {
        canvas.fill_rect(frame, cx.environment.get::<SeparatorColorKey>());
    }
}

fn stack_axis(cx: &NodeContext<'_>) -> Axis {
    cx.parent_properties
        .stack_orientation
        .unwrap_or(Axis::Vertical)
}
