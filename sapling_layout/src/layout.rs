// Copyright 2025 the Sapling Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The [`Layout`] protocol, the [`Subviews`] accessor it works through, and
//! the type-erased [`AnyLayout`].

use alloc::boxed::Box;
use core::any::Any;
use core::fmt;

use kurbo::{Point, Rect, Size};
use sapling_animatable::{Animatable, AnyAnimatableData};

use crate::{
    Axis, EdgeSet, HorizontalAlignment, ProposedViewSize, UnitPoint, VerticalAlignment,
    ViewDimensions, ViewSpacing,
};

/// Index-based access to the children a [`Layout`] arranges.
///
/// Layouts never own their children. They measure and place them through
/// this accessor, which the host implements over whatever backs the views.
/// Placement is an imperative commit: [`Subviews::place`] records the child's
/// frame and lays out the child's own subtree.
pub trait Subviews {
    /// Number of children.
    fn len(&self) -> usize;

    /// Returns `true` if there are no children.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Asks child `index` for its size under `proposal`.
    fn size_that_fits(&mut self, index: usize, proposal: ProposedViewSize) -> Size;

    /// Size and alignment guides of child `index` under `proposal`.
    fn dimensions(&mut self, index: usize, proposal: ProposedViewSize) -> ViewDimensions;

    /// Spacing preferences of child `index`.
    fn spacing(&mut self, index: usize) -> ViewSpacing;

    /// Layout priority of child `index`. Higher priorities receive space first.
    fn priority(&mut self, index: usize) -> f64;

    /// Places child `index` so that its `anchor` lands on `position`.
    fn place(&mut self, index: usize, position: Point, anchor: UnitPoint, proposal: ProposedViewSize);
}

/// Properties a layout reports to its children.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct LayoutProperties {
    /// The axis children are stacked along, if the layout is a stack.
    pub stack_orientation: Option<Axis>,
}

/// A container layout.
///
/// Layout is two-pass. A parent first asks for a size with
/// [`Layout::size_that_fits`], possibly several times with different
/// proposals, then commits with [`Layout::place_subviews`] in the bounds it
/// chose.
///
/// `Cache` holds state derived purely from the current children. It is built
/// by [`Layout::make_cache`], refreshed by [`Layout::update_cache`] whenever
/// the children change, and shared by the calls of one pass.
pub trait Layout {
    /// Per-layout derived state.
    type Cache;

    /// Properties handed down to the children.
    fn layout_properties(&self) -> LayoutProperties {
        LayoutProperties::default()
    }

    /// Builds a fresh cache.
    fn make_cache(&self, subviews: &mut dyn Subviews) -> Self::Cache;

    /// Refreshes `cache` after the children changed.
    fn update_cache(&self, cache: &mut Self::Cache, subviews: &mut dyn Subviews) {
        *cache = self.make_cache(subviews);
    }

    /// Spacing preferences of the container as a whole.
    ///
    /// The default is the union of every child's spacing on every edge.
    fn spacing(&self, subviews: &mut dyn Subviews, cache: &mut Self::Cache) -> ViewSpacing {
        let _ = cache;
        let mut spacing = ViewSpacing::ZERO;
        for index in 0..subviews.len() {
            spacing.form_union(&subviews.spacing(index), EdgeSet::ALL);
        }
        spacing
    }

    /// Size of the container under `proposal`.
    fn size_that_fits(
        &self,
        proposal: ProposedViewSize,
        subviews: &mut dyn Subviews,
        cache: &mut Self::Cache,
    ) -> Size;

    /// Places every child inside `bounds`.
    fn place_subviews(
        &self,
        bounds: Rect,
        proposal: ProposedViewSize,
        subviews: &mut dyn Subviews,
        cache: &mut Self::Cache,
    );

    /// An explicit position for a horizontal guide, relative to `bounds`.
    fn explicit_horizontal_alignment(
        &self,
        guide: HorizontalAlignment,
        bounds: Rect,
        proposal: ProposedViewSize,
        subviews: &mut dyn Subviews,
        cache: &mut Self::Cache,
    ) -> Option<f64> {
        let _ = (guide, bounds, proposal, subviews, cache);
        None
    }

    /// An explicit position for a vertical guide, relative to `bounds`.
    fn explicit_vertical_alignment(
        &self,
        guide: VerticalAlignment,
        bounds: Rect,
        proposal: ProposedViewSize,
        subviews: &mut dyn Subviews,
        cache: &mut Self::Cache,
    ) -> Option<f64> {
        let _ = (guide, bounds, proposal, subviews, cache);
        None
    }
}

/// Opaque cache of an [`AnyLayout`].
///
/// When the wrapped layout changes type the stale cache is discarded and
/// rebuilt on first use.
pub struct AnyLayoutCache(Box<dyn Any>);

impl fmt::Debug for AnyLayoutCache {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AnyLayoutCache").finish_non_exhaustive()
    }
}

/// A type-erased layout.
///
/// Switching the wrapped layout keeps the identity of the container (and
/// therefore of every child) while changing how children are arranged.
///
/// ```
/// use sapling_layout::{AnyLayout, HStackLayout, Layout, LayoutProperties, Axis, VStackLayout};
///
/// let mut layout = AnyLayout::new(HStackLayout::default());
/// assert_eq!(layout.layout_properties().stack_orientation, Some(Axis::Horizontal));
/// layout = AnyLayout::new(VStackLayout::default());
/// assert_eq!(layout.layout_properties().stack_orientation, Some(Axis::Vertical));
/// ```
pub struct AnyLayout {
    inner: Box<dyn ErasedLayout>,
}

impl AnyLayout {
    /// Erases `layout`.
    #[must_use]
    pub fn new<L>(layout: L) -> Self
    where
        L: Layout + Animatable + Clone + fmt::Debug + 'static,
        L::Cache: 'static,
    {
        Self {
            inner: Box::new(layout),
        }
    }

    /// Returns the wrapped layout if it is an `L`.
    #[must_use]
    pub fn downcast_ref<L: 'static>(&self) -> Option<&L> {
        self.inner.as_any().downcast_ref()
    }
}

impl Clone for AnyLayout {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone_boxed(),
        }
    }
}

impl fmt::Debug for AnyLayout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AnyLayout(")?;
        self.inner.debug_erased(f)?;
        f.write_str(")")
    }
}

impl Layout for AnyLayout {
    type Cache = AnyLayoutCache;

    fn layout_properties(&self) -> LayoutProperties {
        self.inner.layout_properties()
    }

    fn make_cache(&self, subviews: &mut dyn Subviews) -> AnyLayoutCache {
        AnyLayoutCache(self.inner.make_cache(subviews))
    }

    fn update_cache(&self, cache: &mut AnyLayoutCache, subviews: &mut dyn Subviews) {
        self.inner.update_cache(cache, subviews);
    }

    fn spacing(&self, subviews: &mut dyn Subviews, cache: &mut AnyLayoutCache) -> ViewSpacing {
        self.inner.spacing(subviews, cache)
    }

    fn size_that_fits(
        &self,
        proposal: ProposedViewSize,
        subviews: &mut dyn Subviews,
        cache: &mut AnyLayoutCache,
    ) -> Size {
        self.inner.size_that_fits(proposal, subviews, cache)
    }

    fn place_subviews(
        &self,
        bounds: Rect,
        proposal: ProposedViewSize,
        subviews: &mut dyn Subviews,
        cache: &mut AnyLayoutCache,
    ) {
        self.inner.place_subviews(bounds, proposal, subviews, cache);
    }

    fn explicit_horizontal_alignment(
        &self,
        guide: HorizontalAlignment,
        bounds: Rect,
        proposal: ProposedViewSize,
        subviews: &mut dyn Subviews,
        cache: &mut AnyLayoutCache,
    ) -> Option<f64> {
        self.inner
            .explicit_horizontal_alignment(guide, bounds, proposal, subviews, cache)
    }

    fn explicit_vertical_alignment(
        &self,
        guide: VerticalAlignment,
        bounds: Rect,
        proposal: ProposedViewSize,
        subviews: &mut dyn Subviews,
        cache: &mut AnyLayoutCache,
    ) -> Option<f64> {
        self.inner
            .explicit_vertical_alignment(guide, bounds, proposal, subviews, cache)
    }
}

impl Animatable for AnyLayout {
    type AnimatableData = AnyAnimatableData;

    fn animatable_data(&self) -> AnyAnimatableData {
        self.inner.animatable_data()
    }

    /// Data of a different layout type is ignored.
    fn set_animatable_data(&mut self, data: AnyAnimatableData) {
        self.inner.set_animatable_data(data);
    }
}

trait ErasedLayout {
    fn as_any(&self) -> &dyn Any;
    fn clone_boxed(&self) -> Box<dyn ErasedLayout>;
    fn debug_erased(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result;
    fn layout_properties(&self) -> LayoutProperties;
    fn make_cache(&self, subviews: &mut dyn Subviews) -> Box<dyn Any>;
    fn update_cache(&self, cache: &mut AnyLayoutCache, subviews: &mut dyn Subviews);
    fn spacing(&self, subviews: &mut dyn Subviews, cache: &mut AnyLayoutCache) -> ViewSpacing;
    fn size_that_fits(
        &self,
        proposal: ProposedViewSize,
        subviews: &mut dyn Subviews,
        cache: &mut AnyLayoutCache,
    ) -> Size;
    fn place_subviews(
        &self,
        bounds: Rect,
        proposal: ProposedViewSize,
        subviews: &mut dyn Subviews,
        cache: &mut AnyLayoutCache,
    );
    fn explicit_horizontal_alignment(
        &self,
        guide: HorizontalAlignment,
        bounds: Rect,
        proposal: ProposedViewSize,
        subviews: &mut dyn Subviews,
        cache: &mut AnyLayoutCache,
    ) -> Option<f64>;
    fn explicit_vertical_alignment(
        &self,
        guide: VerticalAlignment,
        bounds: Rect,
        proposal: ProposedViewSize,
        subviews: &mut dyn Subviews,
        cache: &mut AnyLayoutCache,
    ) -> Option<f64>;
    fn animatable_data(&self) -> AnyAnimatableData;
    fn set_animatable_data(&mut self, data: AnyAnimatableData);
}

/// Runs `f` with the typed cache of `layout`, rebuilding it if `cache` holds
/// state of another layout type.
fn with_typed_cache<L, R>(
    layout: &L,
    cache: &mut AnyLayoutCache,
    subviews: &mut dyn Subviews,
    f: impl FnOnce(&mut L::Cache, &mut dyn Subviews) -> R,
) -> R
where
    L: Layout,
    L::Cache: 'static,
{
    if let Some(typed) = cache.0.downcast_mut::<L::Cache>() {
        return f(typed, subviews);
    }
    let mut fresh = Layout::make_cache(layout, subviews);
    let result = f(&mut fresh, subviews);
    cache.0 = Box::new(fresh);
    result
}

impl<L> ErasedLayout for L
where
    L: Layout + Animatable + Clone + fmt::Debug + 'static,
    L::Cache: 'static,
{
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn clone_boxed(&self) -> Box<dyn ErasedLayout> {
        Box::new(self.clone())
    }

    fn debug_erased(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }

    fn layout_properties(&self) -> LayoutProperties {
        Layout::layout_properties(self)
    }

    fn make_cache(&self, subviews: &mut dyn Subviews) -> Box<dyn Any> {
        Box::new(Layout::make_cache(self, subviews))
    }

    fn update_cache(&self, cache: &mut AnyLayoutCache, subviews: &mut dyn Subviews) {
        if let Some(typed) = cache.0.downcast_mut::<L::Cache>() {
            Layout::update_cache(self, typed, subviews);
        } else {
            cache.0 = Box::new(Layout::make_cache(self, subviews));
        }
    }

    fn spacing(&self, subviews: &mut dyn Subviews, cache: &mut AnyLayoutCache) -> ViewSpacing {
        with_typed_cache(self, cache, subviews, |c, s| Layout::spacing(self, s, c))
    }

    fn size_that_fits(
        &self,
        proposal: ProposedViewSize,
        subviews: &mut dyn Subviews,
        cache: &mut AnyLayoutCache,
    ) -> Size {
        with_typed_cache(self, cache, subviews, |c, s| {
            Layout::size_that_fits(self, proposal, s, c)
        })
    }

    fn place_subviews(
        &self,
        bounds: Rect,
        proposal: ProposedViewSize,
        subviews: &mut dyn Subviews,
        cache: &mut AnyLayoutCache,
    ) {
        with_typed_cache(self, cache, subviews, |c, s| {
            Layout::place_subviews(self, bounds, proposal, s, c);
        });
    }

    fn explicit_horizontal_alignment(
        &self,
        guide: HorizontalAlignment,
        bounds: Rect,
        proposal: ProposedViewSize,
        subviews: &mut dyn Subviews,
        cache: &mut AnyLayoutCache,
    ) -> Option<f64> {
        with_typed_cache(self, cache, subviews, |c, s| {
            Layout::explicit_horizontal_alignment(self, guide, bounds, proposal, s, c)
        })
    }

    fn explicit_vertical_alignment(
        &self,
        guide: VerticalAlignment,
        bounds: Rect,
        proposal: ProposedViewSize,
        subviews: &mut dyn Subviews,
        cache: &mut AnyLayoutCache,
    ) -> Option<f64> {
        with_typed_cache(self, cache, subviews, |c, s| {
            Layout::explicit_vertical_alignment(self, guide, bounds, proposal, s, c)
        })
    }

    fn animatable_data(&self) -> AnyAnimatableData {
        AnyAnimatableData::new(Animatable::animatable_data(self))
    }

    fn set_animatable_data(&mut self, data: AnyAnimatableData) {
        if let Some(typed) = data.downcast::<L::AnimatableData>() {
            Animatable::set_animatable_data(self, typed);
        }
    }
}
