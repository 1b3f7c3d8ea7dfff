// Copyright 2025 the Sapling Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Edges and the spacing preferences views report along them.

use crate::Axis;

/// One edge of a rectangle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Edge {
    /// Top edge.
    Top,
    /// Leading edge.
    Leading,
    /// Bottom edge.
    Bottom,
    /// Trailing edge.
    Trailing,
}

bitflags::bitflags! {
    /// A set of edges.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct EdgeSet: u8 {
        /// Top edge.
        const TOP      = 0b0001;
        /// Leading edge.
        const LEADING  = 0b0010;
        /// Bottom edge.
        const BOTTOM   = 0b0100;
        /// Trailing edge.
        const TRAILING = 0b1000;
        /// Leading and trailing.
        const HORIZONTAL = Self::LEADING.bits() | Self::TRAILING.bits();
        /// Top and bottom.
        const VERTICAL = Self::TOP.bits() | Self::BOTTOM.bits();
        /// Every edge.
        const ALL = Self::HORIZONTAL.bits() | Self::VERTICAL.bits();
    }
}

impl Default for EdgeSet {
    fn default() -> Self {
        Self::ALL
    }
}

impl From<Edge> for EdgeSet {
    fn from(edge: Edge) -> Self {
        match edge {
            Edge::Top => Self::TOP,
            Edge::Leading => Self::LEADING,
            Edge::Bottom => Self::BOTTOM,
            Edge::Trailing => Self::TRAILING,
        }
    }
}

/// Preferred distances between a view and its neighbors, per edge.
///
/// ```
/// use sapling_layout::{Axis, EdgeSet, ViewSpacing};
///
/// let a = ViewSpacing::new(0.0, 0.0, 0.0, 8.0);
/// let b = ViewSpacing::new(0.0, 4.0, 0.0, 0.0);
/// assert_eq!(a.distance(&b, Axis::Horizontal), 8.0);
///
/// let mut c = ViewSpacing::ZERO;
/// c.form_union(&ViewSpacing::uniform(6.0), EdgeSet::LEADING);
/// assert_eq!(c, ViewSpacing::new(0.0, 6.0, 0.0, 0.0));
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ViewSpacing {
    /// Space wanted above the view.
    pub top: f64,
    /// Space wanted before the view.
    pub leading: f64,
    /// Space wanted below the view.
    pub bottom: f64,
    /// Space wanted after the view.
    pub trailing: f64,
}

impl ViewSpacing {
    /// No preferred spacing on any edge.
    pub const ZERO: Self = Self::uniform(0.0);

    /// Spacing with explicit values per edge.
    #[must_use]
    pub const fn new(top: f64, leading: f64, bottom: f64, trailing: f64) -> Self {
        Self {
            top,
            leading,
            bottom,
            trailing,
        }
    }

    /// The same spacing on every edge.
    #[must_use]
    pub const fn uniform(value: f64) -> Self {
        Self::new(value, value, value, value)
    }

    /// Per-edge maximum of `self` and `other`, restricted to `edges`.
    #[must_use]
    pub fn union(&self, other: &Self, edges: EdgeSet) -> Self {
        let pick = |edge: EdgeSet, a: f64, b: f64| if edges.contains(edge) { a.max(b) } else { a };
        Self::new(
            pick(EdgeSet::TOP, self.top, other.top),
            pick(EdgeSet::LEADING, self.leading, other.leading),
            pick(EdgeSet::BOTTOM, self.bottom, other.bottom),
            pick(EdgeSet::TRAILING, self.trailing, other.trailing),
        )
    }

    /// In-place [`ViewSpacing::union`].
    pub fn form_union(&mut self, other: &Self, edges: EdgeSet) {
        *self = self.union(other, edges);
    }

    /// Distance between this view and `next` when `next` follows it along `axis`.
    #[must_use]
    pub fn distance(&self, next: &Self, axis: Axis) -> f64 {
        match axis {
            Axis::Horizontal => self.trailing.max(next.leading),
            Axis::Vertical => self.bottom.max(next.top),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn union_only_touches_requested_edges() {
        let a = ViewSpacing::new(1.0, 1.0, 1.0, 1.0);
        let b = ViewSpacing::uniform(5.0);
        assert_eq!(a.union(&b, EdgeSet::VERTICAL), ViewSpacing::new(5.0, 1.0, 5.0, 1.0));
        assert_eq!(a.union(&b, EdgeSet::empty()), a);
        assert_eq!(a.union(&b, EdgeSet::ALL), b);
    }

    #[test]
    fn vertical_distance_uses_bottom_and_top() {
        let a = ViewSpacing::new(0.0, 0.0, 3.0, 0.0);
        let b = ViewSpacing::new(7.0, 0.0, 0.0, 0.0);
        assert_eq!(a.distance(&b, Axis::Vertical), 7.0);
        assert_eq!(b.distance(&a, Axis::Vertical), 0.0);
    }

    #[test]
    fn edge_converts_to_set() {
        assert_eq!(EdgeSet::from(Edge::Trailing), EdgeSet::TRAILING);
        assert!(EdgeSet::default().contains(EdgeSet::HORIZONTAL | EdgeSet::VERTICAL));
    }
}
