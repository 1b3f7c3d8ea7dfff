// Copyright 2025 the Sapling Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Horizontal and vertical stacks with priority-ordered flexible space.
//!
//! Both stacks run the same algorithm along their own axis:
//!
//! 1. Measure every child's minimum (zero proposal), ideal (unspecified
//!    proposal) and maximum (infinite proposal) length along the axis.
//! 2. An unspecified proposal sizes every child to its ideal length.
//! 3. Otherwise every child starts at its minimum and the space left after
//!    minimums and spacing is handed out by priority, highest first: first
//!    growing children toward their ideal length, then toward their maximum.
//!    Within a priority group the space is split evenly and re-split while
//!    some children are capped.

use alloc::vec::Vec;

use kurbo::{Point, Rect, Size};
use sapling_animatable::{Animatable, EmptyAnimatableData};
use smallvec::SmallVec;

use crate::{
    Axis, EdgeSet, HorizontalAlignment, Layout, LayoutProperties, ProposedViewSize, Subviews,
    UnitPoint, VerticalAlignment, ViewDimensions, ViewSpacing, sanitize_length,
};

/// Space below this threshold is treated as exhausted.
const EPSILON: f64 = 1e-5;

/// Cache shared by [`HStackLayout`] and [`VStackLayout`].
#[derive(Clone, Debug, Default, PartialEq)]
pub struct StackLayoutCache {
    /// Layout priority of each child.
    pub priorities: Vec<f64>,
    /// Spacing preferences of each child.
    pub spacings: Vec<ViewSpacing>,
    /// Gap placed before each child. The first entry is always zero.
    pub subview_spacings: Vec<f64>,
}

impl StackLayoutCache {
    fn rebuild(&mut self, axis: Axis, spacing: Option<f64>, subviews: &mut dyn Subviews) {
        let count = subviews.len();
        self.priorities.clear();
        self.spacings.clear();
        self.subview_spacings.clear();
        for index in 0..count {
            self.priorities.push(subviews.priority(index));
            self.spacings.push(subviews.spacing(index));
        }
        for index in 0..count {
            let gap = if index == 0 {
                0.0
            } else if let Some(spacing) = spacing {
                spacing
            } else {
                self.spacings[index - 1].distance(&self.spacings[index], axis)
            };
            self.subview_spacings.push(gap);
        }
    }

    fn total_spacing(&self) -> f64 {
        self.subview_spacings.iter().sum()
    }

    /// Spacing of the stack as a whole: the cross edges of every child, the
    /// leading edge of the first child and the trailing edge of the last.
    fn stack_spacing(&self, axis: Axis) -> ViewSpacing {
        let (cross_edges, start_edge, end_edge) = match axis {
            Axis::Horizontal => (EdgeSet::VERTICAL, EdgeSet::LEADING, EdgeSet::TRAILING),
            Axis::Vertical => (EdgeSet::HORIZONTAL, EdgeSet::TOP, EdgeSet::BOTTOM),
        };
        let last = self.spacings.len().saturating_sub(1);
        let mut spacing = ViewSpacing::ZERO;
        for (index, child) in self.spacings.iter().enumerate() {
            let mut edges = cross_edges;
            if index == 0 {
                edges |= start_edge;
            }
            if index == last {
                edges |= end_edge;
            }
            spacing.form_union(child, edges);
        }
        spacing
    }
}

/// Grows the children of one priority group toward `limits`.
fn grow_group(lengths: &mut [f64], limits: &[f64], group: &[usize], remaining: &mut f64) {
    let mut flexible: SmallVec<[usize; 8]> = group
        .iter()
        .copied()
        .filter(|&i| lengths[i] < limits[i])
        .collect();

    if remaining.is_infinite() {
        // Unbounded space: every child takes its limit outright.
        for i in flexible {
            lengths[i] = limits[i];
        }
        return;
    }

    while *remaining > EPSILON && !flexible.is_empty() {
        let share = *remaining / flexible.len() as f64;
        let mut distributed = 0.0;
        for &i in &flexible {
            let give = share.min(limits[i] - lengths[i]);
            lengths[i] += give;
            distributed += give;
        }
        *remaining -= distributed;
        if distributed < EPSILON {
            break;
        }
        flexible.retain(|i| lengths[*i] < limits[*i]);
    }
}

/// Chooses each child's length along `axis` for `proposal`.
fn stack_lengths(
    axis: Axis,
    proposal: ProposedViewSize,
    subviews: &mut dyn Subviews,
    cache: &StackLayoutCache,
) -> Vec<f64> {
    let count = subviews.len();
    let across = proposal.along(axis.cross());
    let mut measure = |index: usize, along: Option<f64>| {
        let size = subviews.size_that_fits(index, ProposedViewSize::from_axis(axis, along, across));
        sanitize_length(axis.length(size))
    };

    let mut min = Vec::with_capacity(count);
    let mut ideal = Vec::with_capacity(count);
    let mut max = Vec::with_capacity(count);
    for index in 0..count {
        min.push(measure(index, Some(0.0)));
        ideal.push(measure(index, None));
        max.push(measure(index, Some(f64::INFINITY)));
    }

    let Some(available) = proposal.along(axis) else {
        return ideal;
    };

    let mut remaining = available - min.iter().sum::<f64>() - cache.total_spacing();
    if remaining.is_nan() || remaining <= 0.0 {
        return min;
    }

    let mut priorities: SmallVec<[f64; 4]> = cache.priorities.iter().copied().collect();
    priorities.sort_by(|a, b| b.total_cmp(a));
    priorities.dedup();

    let groups: SmallVec<[SmallVec<[usize; 8]>; 4]> = priorities
        .iter()
        .map(|&priority| {
            (0..count)
                .filter(|&i| cache.priorities.get(i).copied().unwrap_or(0.0) == priority)
                .collect()
        })
        .collect();

    let mut lengths = min;
    for group in &groups {
        grow_group(&mut lengths, &ideal, group, &mut remaining);
    }
    for group in &groups {
        grow_group(&mut lengths, &max, group, &mut remaining);
    }
    lengths
}

fn stack_size(
    axis: Axis,
    proposal: ProposedViewSize,
    subviews: &mut dyn Subviews,
    cache: &StackLayoutCache,
) -> Size {
    let lengths = stack_lengths(axis, proposal, subviews, cache);
    let across = proposal.along(axis.cross());
    let mut cross: f64 = 0.0;
    for (index, &length) in lengths.iter().enumerate() {
        let size =
            subviews.size_that_fits(index, ProposedViewSize::from_axis(axis, Some(length), across));
        cross = cross.max(sanitize_length(axis.cross().length(size)));
    }
    let along = lengths.iter().sum::<f64>() + cache.total_spacing();
    axis.size(sanitize_length(along), cross)
}

/// Places children along `axis`, lining up the cross-axis guide reported by `guide`.
fn place_stack(
    axis: Axis,
    bounds: Rect,
    subviews: &mut dyn Subviews,
    cache: &StackLayoutCache,
    guide: impl Fn(&ViewDimensions) -> f64,
) {
    let proposal = ProposedViewSize::from_size(bounds.size());
    let lengths = stack_lengths(axis, proposal, subviews, cache);
    let across = proposal.along(axis.cross());

    let mut max_ascent: f64 = 0.0;
    let mut max_descent: f64 = 0.0;
    let mut ascents: SmallVec<[f64; 8]> = SmallVec::with_capacity(lengths.len());
    for (index, &length) in lengths.iter().enumerate() {
        let child = ProposedViewSize::from_axis(axis, Some(length), across);
        let dimensions = subviews.dimensions(index, child);
        let ascent = guide(&dimensions);
        let descent = axis.cross().length(dimensions.size()) - ascent;
        max_ascent = max_ascent.max(ascent);
        max_descent = max_descent.max(descent);
        ascents.push(ascent);
    }

    let cross_origin = axis.cross().coordinate(bounds.origin());
    let cross_extent = axis.cross().length(bounds.size());
    let content_start = cross_origin + (cross_extent - (max_ascent + max_descent)) * 0.5;
    let guide_line = content_start + max_ascent;

    let mut offset = axis.coordinate(bounds.origin());
    for (index, &length) in lengths.iter().enumerate() {
        offset += cache.subview_spacings.get(index).copied().unwrap_or(0.0);
        let child = ProposedViewSize::from_axis(axis, Some(length), across);
        let position: Point = axis.point(offset, guide_line - ascents[index]);
        subviews.place(index, position, UnitPoint::TOP_LEADING, child);
        offset += length;
    }
}

/// Arranges children left to right.
///
/// ```
/// use sapling_layout::{HStackLayout, VerticalAlignment};
///
/// let stack = HStackLayout::new(VerticalAlignment::Top, Some(8.0));
/// assert_eq!(stack.spacing, Some(8.0));
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct HStackLayout {
    /// Guide children are lined up on.
    pub alignment: VerticalAlignment,
    /// Gap between adjacent children, or `None` to use their spacing preferences.
    pub spacing: Option<f64>,
}

impl HStackLayout {
    /// Creates a horizontal stack.
    #[must_use]
    pub const fn new(alignment: VerticalAlignment, spacing: Option<f64>) -> Self {
        Self { alignment, spacing }
    }
}

impl Layout for HStackLayout {
    type Cache = StackLayoutCache;

    fn layout_properties(&self) -> LayoutProperties {
        LayoutProperties {
            stack_orientation: Some(Axis::Horizontal),
        }
    }

    fn make_cache(&self, subviews: &mut dyn Subviews) -> StackLayoutCache {
        let mut cache = StackLayoutCache::default();
        self.update_cache(&mut cache, subviews);
        cache
    }

    fn update_cache(&self, cache: &mut StackLayoutCache, subviews: &mut dyn Subviews) {
        cache.rebuild(Axis::Horizontal, self.spacing, subviews);
    }

    fn spacing(&self, _: &mut dyn Subviews, cache: &mut StackLayoutCache) -> ViewSpacing {
        cache.stack_spacing(Axis::Horizontal)
    }

    fn size_that_fits(
        &self,
        proposal: ProposedViewSize,
        subviews: &mut dyn Subviews,
        cache: &mut StackLayoutCache,
    ) -> Size {
        stack_size(Axis::Horizontal, proposal, subviews, cache)
    }

    fn place_subviews(
        &self,
        bounds: Rect,
        _: ProposedViewSize,
        subviews: &mut dyn Subviews,
        cache: &mut StackLayoutCache,
    ) {
        let alignment = self.alignment;
        place_stack(Axis::Horizontal, bounds, subviews, cache, |d| {
            d.vertical(alignment)
        });
    }
}

impl Animatable for HStackLayout {
    type AnimatableData = EmptyAnimatableData;

    fn animatable_data(&self) -> EmptyAnimatableData {
        EmptyAnimatableData
    }

    fn set_animatable_data(&mut self, _: EmptyAnimatableData) {}
}

/// Arranges children top to bottom.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct VStackLayout {
    /// Guide children are lined up on.
    pub alignment: HorizontalAlignment,
    /// Gap between adjacent children, or `None` to use their spacing preferences.
    pub spacing: Option<f64>,
}

impl VStackLayout {
    /// Creates a vertical stack.
    #[must_use]
    pub const fn new(alignment: HorizontalAlignment, spacing: Option<f64>) -> Self {
        Self { alignment, spacing }
    }
}

impl Layout for VStackLayout {
    type Cache = StackLayoutCache;

    fn layout_properties(&self) -> LayoutProperties {
        LayoutProperties {
            stack_orientation: Some(Axis::Vertical),
        }
    }

    fn make_cache(&self, subviews: &mut dyn Subviews) -> StackLayoutCache {
        let mut cache = StackLayoutCache::default();
        self.update_cache(&mut cache, subviews);
        cache
    }

    fn update_cache(&self, cache: &mut StackLayoutCache, subviews: &mut dyn Subviews) {
        cache.rebuild(Axis::Vertical, self.spacing, subviews);
    }

    fn spacing(&self, _: &mut dyn Subviews, cache: &mut StackLayoutCache) -> ViewSpacing {
        cache.stack_spacing(Axis::Vertical)
    }

    fn size_that_fits(
        &self,
        proposal: ProposedViewSize,
        subviews: &mut dyn Subviews,
        cache: &mut StackLayoutCache,
    ) -> Size {
        stack_size(Axis::Vertical, proposal, subviews, cache)
    }

    fn place_subviews(
        &self,
        bounds: Rect,
        _: ProposedViewSize,
        subviews: &mut dyn Subviews,
        cache: &mut StackLayoutCache,
    ) {
        let alignment = self.alignment;
        place_stack(Axis::Vertical, bounds, subviews, cache, |d| {
            d.horizontal(alignment)
        });
    }
}

impl Animatable for VStackLayout {
    type AnimatableData = EmptyAnimatableData;

    fn animatable_data(&self) -> EmptyAnimatableData {
        EmptyAnimatableData
    }

    fn set_animatable_data(&mut self, _: EmptyAnimatableData) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grow_group_splits_evenly_and_resplits_after_caps() {
        let mut lengths = [0.0, 0.0, 0.0];
        let limits = [10.0, 100.0, 100.0];
        let mut remaining = 110.0;
        grow_group(&mut lengths, &limits, &[0, 1, 2], &mut remaining);
        for (got, want) in lengths.iter().zip([10.0, 50.0, 50.0]) {
            assert!((got - want).abs() < 1e-9, "{lengths:?}");
        }
        assert!(remaining.abs() < EPSILON);
    }

    #[test]
    fn grow_group_with_unbounded_space_takes_limits() {
        let mut lengths = [0.0, 5.0];
        let limits = [20.0, f64::INFINITY];
        let mut remaining = f64::INFINITY;
        grow_group(&mut lengths, &limits, &[0, 1], &mut remaining);
        assert_eq!(lengths, [20.0, f64::INFINITY]);
        assert!(remaining.is_infinite(), "no inf - inf arithmetic");
    }

    #[test]
    fn grow_group_ignores_other_groups() {
        let mut lengths = [0.0, 0.0];
        let limits = [50.0, 50.0];
        let mut remaining = 30.0;
        grow_group(&mut lengths, &limits, &[1], &mut remaining);
        assert_eq!(lengths, [0.0, 30.0]);
    }

    #[test]
    fn stack_spacing_unions_edges_by_position() {
        let cache = StackLayoutCache {
            priorities: alloc::vec![0.0, 0.0],
            spacings: alloc::vec![
                ViewSpacing::new(1.0, 2.0, 3.0, 4.0),
                ViewSpacing::new(5.0, 6.0, 7.0, 8.0),
            ],
            subview_spacings: alloc::vec![0.0, 6.0],
        };
        assert_eq!(
            cache.stack_spacing(Axis::Horizontal),
            ViewSpacing::new(5.0, 2.0, 7.0, 8.0)
        );
        assert_eq!(
            cache.stack_spacing(Axis::Vertical),
            ViewSpacing::new(1.0, 6.0, 7.0, 8.0)
        );
    }
}
