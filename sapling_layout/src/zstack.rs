// Copyright 2025 the Sapling Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::{Rect, Size};
use sapling_animatable::{Animatable, EmptyAnimatableData};

use crate::{Alignment, Layout, ProposedViewSize, Subviews, sanitize_size};

/// Overlays children on top of each other.
///
/// Every child is offered the full proposal. The stack is as wide as its
/// widest child and as tall as its tallest, and every child is placed at the
/// same anchor.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ZStackLayout {
    /// Where children are anchored within the stack.
    pub alignment: Alignment,
}

impl ZStackLayout {
    /// Creates an overlay layout.
    #[must_use]
    pub const fn new(alignment: Alignment) -> Self {
        Self { alignment }
    }
}

impl Layout for ZStackLayout {
    type Cache = ();

    fn make_cache(&self, _: &mut dyn Subviews) {}

    fn size_that_fits(
        &self,
        proposal: ProposedViewSize,
        subviews: &mut dyn Subviews,
        _: &mut (),
    ) -> Size {
        let mut size = Size::ZERO;
        for index in 0..subviews.len() {
            let child = sanitize_size(subviews.size_that_fits(index, proposal));
            size.width = size.width.max(child.width);
            size.height = size.height.max(child.height);
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
        let anchor = self.alignment.unit_point();
        let position = anchor.in_rect(bounds);
        let proposal = ProposedViewSize::from_size(bounds.size());
        for index in 0..subviews.len() {
            subviews.place(index, position, anchor, proposal);
        }
    }
}

impl Animatable for ZStackLayout {
    type AnimatableData = EmptyAnimatableData;

    fn animatable_data(&self) -> EmptyAnimatableData {
        EmptyAnimatableData
    }

    fn set_animatable_data(&mut self, _: EmptyAnimatableData) {}
}
