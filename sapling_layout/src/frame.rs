// Copyright 2025 the Sapling Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Frame and padding layouts applied around a single piece of content.
//!
//! These layouts are written against [`Subviews`] like any container; when
//! they wrap more than one child, every child receives the same treatment.

use kurbo::{Insets, Rect, Size};
use sapling_animatable::{Animatable, EmptyAnimatableData, InsetsData};

use crate::{
    Alignment, Axis, EdgeSet, Layout, ProposedViewSize, Subviews, sanitize_length, sanitize_size,
};

/// Padding applied when no explicit insets are given.
pub const DEFAULT_PADDING: f64 = 16.0;

fn union_size(proposal: ProposedViewSize, subviews: &mut dyn Subviews) -> Size {
    let mut size = Size::ZERO;
    for index in 0..subviews.len() {
        let child = sanitize_size(subviews.size_that_fits(index, proposal));
        size.width = size.width.max(child.width);
        size.height = size.height.max(child.height);
    }
    size
}

fn place_aligned(alignment: Alignment, bounds: Rect, subviews: &mut dyn Subviews) {
    let anchor = alignment.unit_point();
    let position = anchor.in_rect(bounds);
    let proposal = ProposedViewSize::from_size(bounds.size());
    for index in 0..subviews.len() {
        subviews.place(index, position, anchor, proposal);
    }
}

/// A frame with an optional fixed width and height.
///
/// Fixed dimensions replace the content's size in that dimension and are
/// proposed to the content. The content is placed at `alignment` within the
/// frame.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct FrameLayout {
    /// Fixed width, if any.
    pub width: Option<f64>,
    /// Fixed height, if any.
    pub height: Option<f64>,
    /// Placement of the content inside the frame.
    pub alignment: Alignment,
}

impl FrameLayout {
    /// Creates a fixed frame.
    #[must_use]
    pub const fn new(width: Option<f64>, height: Option<f64>, alignment: Alignment) -> Self {
        Self {
            width,
            height,
            alignment,
        }
    }
}

impl Layout for FrameLayout {
    type Cache = ();

    fn make_cache(&self, _: &mut dyn Subviews) {}

    fn size_that_fits(
        &self,
        proposal: ProposedViewSize,
        subviews: &mut dyn Subviews,
        _: &mut (),
    ) -> Size {
        let child = ProposedViewSize::new(
            self.width.or(proposal.width),
            self.height.or(proposal.height),
        );
        let mut size = union_size(child, subviews);
        if let Some(width) = self.width {
            size.width = sanitize_length(width);
        }
        if let Some(height) = self.height {
            size.height = sanitize_length(height);
        }
        size
    }

    fn place_subviews(
        &self,
        bounds: Rect,
        _: ProposedViewSize,
        subviews: &mut dyn Subviews,
        _: &mut (),
    ) {
        place_aligned(self.alignment, bounds, subviews);
    }
}

impl Animatable for FrameLayout {
    type AnimatableData = EmptyAnimatableData;

    fn animatable_data(&self) -> EmptyAnimatableData {
        EmptyAnimatableData
    }

    fn set_animatable_data(&mut self, _: EmptyAnimatableData) {}
}

/// Length constraints of a [`FlexFrameLayout`] along one axis.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct FlexLength {
    /// Lower bound.
    pub min: Option<f64>,
    /// Length used when the proposal is unspecified.
    pub ideal: Option<f64>,
    /// Upper bound. `f64::INFINITY` makes the frame take all offered space.
    pub max: Option<f64>,
}

impl FlexLength {
    /// No constraints.
    pub const NONE: Self = Self {
        min: None,
        ideal: None,
        max: None,
    };

    /// Creates constraints.
    #[must_use]
    pub const fn new(min: Option<f64>, ideal: Option<f64>, max: Option<f64>) -> Self {
        Self { min, ideal, max }
    }

    /// The proposal this axis passes to the content.
    fn child_proposal(self, proposed: Option<f64>) -> Option<f64> {
        let proposed = proposed.or(self.ideal)?;
        let mut p = proposed;
        if let Some(max) = self.max {
            p = p.min(max);
        }
        if let Some(min) = self.min {
            p = p.max(min);
        }
        Some(p)
    }

    /// The frame's own length given the proposal and the content's length.
    fn resolve(self, proposed: Option<f64>, child: f64) -> f64 {
        let lower = self
            .min
            .unwrap_or_else(|| child.min(self.max.unwrap_or(f64::INFINITY)));
        let upper = self.max.unwrap_or_else(|| child.max(lower));
        let length = match proposed.or(self.ideal) {
            Some(p) if self.min.is_some() || self.max.is_some() => p.min(upper).max(lower),
            _ => child.min(upper).max(lower),
        };
        sanitize_length(length)
    }
}

/// A frame with minimum, ideal and maximum dimensions.
///
/// ```
/// use sapling_layout::{Alignment, FlexFrameLayout, FlexLength};
///
/// // Fill all offered width, keep the content's height.
/// let fill = FlexFrameLayout::new(
///     FlexLength::new(None, None, Some(f64::INFINITY)),
///     FlexLength::NONE,
///     Alignment::LEADING,
/// );
/// assert_eq!(fill.width.max, Some(f64::INFINITY));
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct FlexFrameLayout {
    /// Horizontal constraints.
    pub width: FlexLength,
    /// Vertical constraints.
    pub height: FlexLength,
    /// Placement of the content inside the frame.
    pub alignment: Alignment,
}

impl FlexFrameLayout {
    /// Creates a flexible frame.
    #[must_use]
    pub const fn new(width: FlexLength, height: FlexLength, alignment: Alignment) -> Self {
        Self {
            width,
            height,
            alignment,
        }
    }

    fn constraints(&self, axis: Axis) -> FlexLength {
        match axis {
            Axis::Horizontal => self.width,
            Axis::Vertical => self.height,
        }
    }
}

impl Layout for FlexFrameLayout {
    type Cache = ();

    fn make_cache(&self, _: &mut dyn Subviews) {}

    fn size_that_fits(
        &self,
        proposal: ProposedViewSize,
        subviews: &mut dyn Subviews,
        _: &mut (),
    ) -> Size {
        let child_proposal = ProposedViewSize::new(
            self.width.child_proposal(proposal.width),
            self.height.child_proposal(proposal.height),
        );
        let child = union_size(child_proposal, subviews);
        let resolve = |axis: Axis| {
            self.constraints(axis)
                .resolve(proposal.along(axis), axis.length(child))
        };
        Size::new(resolve(Axis::Horizontal), resolve(Axis::Vertical))
    }

    fn place_subviews(
        &self,
        bounds: Rect,
        _: ProposedViewSize,
        subviews: &mut dyn Subviews,
        _: &mut (),
    ) {
        place_aligned(self.alignment, bounds, subviews);
    }
}

impl Animatable for FlexFrameLayout {
    type AnimatableData = EmptyAnimatableData;

    fn animatable_data(&self) -> EmptyAnimatableData {
        EmptyAnimatableData
    }

    fn set_animatable_data(&mut self, _: EmptyAnimatableData) {}
}

/// Insets content on selected edges.
///
/// Kurbo's [`Insets`] maps `x0` to the leading edge, `y0` to the top, `x1`
/// to the trailing edge and `y1` to the bottom.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PaddingLayout {
    /// Edges that receive padding.
    pub edges: EdgeSet,
    /// Padding per edge. `None` uses [`DEFAULT_PADDING`].
    pub insets: Option<Insets>,
}

impl Default for PaddingLayout {
    fn default() -> Self {
        Self::new(EdgeSet::ALL, None)
    }
}

impl PaddingLayout {
    /// Creates a padding layout.
    #[must_use]
    pub const fn new(edges: EdgeSet, insets: Option<Insets>) -> Self {
        Self { edges, insets }
    }

    /// The same padding on every edge.
    #[must_use]
    pub fn uniform(length: f64) -> Self {
        Self::new(EdgeSet::ALL, Some(Insets::uniform(length)))
    }

    /// Insets in effect, with unselected edges zeroed.
    #[must_use]
    pub fn effective_insets(&self) -> Insets {
        let insets = self
            .insets
            .unwrap_or(Insets::uniform(DEFAULT_PADDING));
        let pick = |edge: EdgeSet, v: f64| if self.edges.contains(edge) { v } else { 0.0 };
        Insets::new(
            pick(EdgeSet::LEADING, insets.x0),
            pick(EdgeSet::TOP, insets.y0),
            pick(EdgeSet::TRAILING, insets.x1),
            pick(EdgeSet::BOTTOM, insets.y1),
        )
    }
}

impl Layout for PaddingLayout {
    type Cache = ();

    fn make_cache(&self, _: &mut dyn Subviews) {}

    fn size_that_fits(
        &self,
        proposal: ProposedViewSize,
        subviews: &mut dyn Subviews,
        _: &mut (),
    ) -> Size {
        let insets = self.effective_insets();
        let horizontal = insets.x0 + insets.x1;
        let vertical = insets.y0 + insets.y1;
        let inner = ProposedViewSize::new(
            proposal.width.map(|w| sanitize_length(w - horizontal)),
            proposal.height.map(|h| sanitize_length(h - vertical)),
        );
        let child = union_size(inner, subviews);
        sanitize_size(Size::new(
            child.width + horizontal,
            child.height + vertical,
        ))
    }

    fn place_subviews(
        &self,
        bounds: Rect,
        _: ProposedViewSize,
        subviews: &mut dyn Subviews,
        _: &mut (),
    ) {
        let insets = self.effective_insets();
        let x0 = bounds.x0 + insets.x0;
        let y0 = bounds.y0 + insets.y0;
        let inner = Rect::new(
            x0,
            y0,
            x0.max(bounds.x1 - insets.x1),
            y0.max(bounds.y1 - insets.y1),
        );
        place_aligned(Alignment::TOP_LEADING, inner, subviews);
    }
}

impl Animatable for PaddingLayout {
    type AnimatableData = InsetsData;

    fn animatable_data(&self) -> InsetsData {
        self.insets
            .unwrap_or(Insets::uniform(DEFAULT_PADDING))
            .animatable_data()
    }

    fn set_animatable_data(&mut self, data: InsetsData) {
        let mut insets = Insets::ZERO;
        insets.set_animatable_data(data);
        self.insets = Some(insets);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flex_length_without_bounds_follows_content() {
        assert_eq!(FlexLength::NONE.resolve(Some(300.0), 40.0), 40.0);
        assert_eq!(FlexLength::NONE.resolve(None, 40.0), 40.0);
    }

    #[test]
    fn flex_length_infinite_max_fills_proposal() {
        let fill = FlexLength::new(None, None, Some(f64::INFINITY));
        assert_eq!(fill.resolve(Some(300.0), 40.0), 300.0);
        assert_eq!(fill.resolve(Some(10.0), 40.0), 40.0, "never smaller than content");
        assert_eq!(fill.child_proposal(Some(300.0)), Some(300.0));
    }

    #[test]
    fn flex_length_min_and_ideal() {
        let l = FlexLength::new(Some(100.0), Some(150.0), Some(200.0));
        assert_eq!(l.resolve(None, 20.0), 150.0, "ideal stands in for no proposal");
        assert_eq!(l.resolve(Some(50.0), 20.0), 100.0);
        assert_eq!(l.resolve(Some(500.0), 20.0), 200.0);
        assert_eq!(l.child_proposal(Some(500.0)), Some(200.0));
        assert_eq!(l.child_proposal(None), Some(150.0));
    }

    #[test]
    fn padding_zeroes_unselected_edges() {
        let p = PaddingLayout::new(EdgeSet::HORIZONTAL, None);
        assert_eq!(
            p.effective_insets(),
            Insets::new(DEFAULT_PADDING, 0.0, DEFAULT_PADDING, 0.0)
        );
    }

    #[test]
    fn padding_animates_insets() {
        let mut p = PaddingLayout::uniform(4.0);
        let mut data = p.animatable_data();
        data.first = 10.0;
        p.set_animatable_data(data);
        assert_eq!(p.insets, Some(Insets::new(4.0, 10.0, 4.0, 4.0)));
    }
}
