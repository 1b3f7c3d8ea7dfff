// Copyright 2025 the Sapling Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Proposals, axes and unit points.

use kurbo::{Point, Rect, Size};

/// One of the two layout axes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Axis {
    /// The x axis.
    Horizontal,
    /// The y axis.
    Vertical,
}

impl Axis {
    /// The other axis.
    #[must_use]
    pub const fn cross(self) -> Self {
        match self {
            Self::Horizontal => Self::Vertical,
            Self::Vertical => Self::Horizontal,
        }
    }

    /// The extent of `size` along this axis.
    #[must_use]
    pub const fn length(self, size: Size) -> f64 {
        match self {
            Self::Horizontal => size.width,
            Self::Vertical => size.height,
        }
    }

    /// Builds a size from a length along this axis and one along the cross axis.
    #[must_use]
    pub const fn size(self, along: f64, across: f64) -> Size {
        match self {
            Self::Horizontal => Size::new(along, across),
            Self::Vertical => Size::new(across, along),
        }
    }

    /// Builds a point from a coordinate along this axis and one along the cross axis.
    #[must_use]
    pub const fn point(self, along: f64, across: f64) -> Point {
        match self {
            Self::Horizontal => Point::new(along, across),
            Self::Vertical => Point::new(across, along),
        }
    }

    /// The coordinate of `point` along this axis.
    #[must_use]
    pub const fn coordinate(self, point: Point) -> f64 {
        match self {
            Self::Horizontal => point.x,
            Self::Vertical => point.y,
        }
    }
}

/// A size proposal from a parent to a child.
///
/// Each dimension is either a concrete length, `None` (unspecified: the child
/// should report its ideal size), or infinite (the child should report its
/// maximum size).
///
/// ```
/// use kurbo::Size;
/// use sapling_layout::ProposedViewSize;
///
/// let p = ProposedViewSize::new(Some(50.0), None);
/// assert_eq!(p.replacing_unspecified_dimensions(), Size::new(50.0, 10.0));
/// assert_eq!(ProposedViewSize::ZERO.replacing_unspecified_dimensions(), Size::ZERO);
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ProposedViewSize {
    /// Proposed width.
    pub width: Option<f64>,
    /// Proposed height.
    pub height: Option<f64>,
}

impl ProposedViewSize {
    /// Both dimensions zero.
    pub const ZERO: Self = Self::new(Some(0.0), Some(0.0));
    /// Both dimensions unspecified.
    pub const UNSPECIFIED: Self = Self::new(None, None);
    /// Both dimensions infinite.
    pub const INFINITY: Self = Self::new(Some(f64::INFINITY), Some(f64::INFINITY));

    /// Fallback used for unspecified dimensions.
    pub const DEFAULT_DIMENSION: f64 = 10.0;

    /// Creates a proposal.
    #[must_use]
    pub const fn new(width: Option<f64>, height: Option<f64>) -> Self {
        Self { width, height }
    }

    /// Proposes exactly `size`.
    #[must_use]
    pub const fn from_size(size: Size) -> Self {
        Self::new(Some(size.width), Some(size.height))
    }

    /// Replaces unspecified dimensions with the default of 10 points.
    #[must_use]
    pub fn replacing_unspecified_dimensions(self) -> Size {
        self.replacing_unspecified_dimensions_by(Size::new(
            Self::DEFAULT_DIMENSION,
            Self::DEFAULT_DIMENSION,
        ))
    }

    /// Replaces unspecified dimensions with the matching dimension of `size`.
    #[must_use]
    pub fn replacing_unspecified_dimensions_by(self, size: Size) -> Size {
        Size::new(
            self.width.unwrap_or(size.width),
            self.height.unwrap_or(size.height),
        )
    }

    /// The proposed length along `axis`.
    #[must_use]
    pub const fn along(self, axis: Axis) -> Option<f64> {
        match axis {
            Axis::Horizontal => self.width,
            Axis::Vertical => self.height,
        }
    }

    /// Builds a proposal from lengths along `axis` and its cross axis.
    #[must_use]
    pub const fn from_axis(axis: Axis, along: Option<f64>, across: Option<f64>) -> Self {
        match axis {
            Axis::Horizontal => Self::new(along, across),
            Axis::Vertical => Self::new(across, along),
        }
    }
}

impl From<Size> for ProposedViewSize {
    fn from(size: Size) -> Self {
        Self::from_size(size)
    }
}

/// A point in a unit square, used as an anchor relative to a frame.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct UnitPoint {
    /// Fraction of the width.
    pub x: f64,
    /// Fraction of the height.
    pub y: f64,
}

impl UnitPoint {
    /// `(0, 0)`.
    pub const TOP_LEADING: Self = Self::new(0.0, 0.0);
    /// `(0.5, 0)`.
    pub const TOP: Self = Self::new(0.5, 0.0);
    /// `(1, 0)`.
    pub const TOP_TRAILING: Self = Self::new(1.0, 0.0);
    /// `(0, 0.5)`.
    pub const LEADING: Self = Self::new(0.0, 0.5);
    /// `(0.5, 0.5)`.
    pub const CENTER: Self = Self::new(0.5, 0.5);
    /// `(1, 0.5)`.
    pub const TRAILING: Self = Self::new(1.0, 0.5);
    /// `(0, 1)`.
    pub const BOTTOM_LEADING: Self = Self::new(0.0, 1.0);
    /// `(0.5, 1)`.
    pub const BOTTOM: Self = Self::new(0.5, 1.0);
    /// `(1, 1)`.
    pub const BOTTOM_TRAILING: Self = Self::new(1.0, 1.0);

    /// Creates a unit point.
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// The point at this anchor inside `rect`.
    #[must_use]
    pub fn in_rect(self, rect: Rect) -> Point {
        Point::new(
            rect.x0 + rect.width() * self.x,
            rect.y0 + rect.height() * self.y,
        )
    }

    /// Origin of a frame of `size` whose anchor lands on `position`.
    #[must_use]
    pub fn origin_for(self, position: Point, size: Size) -> Point {
        Point::new(
            position.x - size.width * self.x,
            position.y - size.height * self.y,
        )
    }
}

/// Clamps a negotiated length to be non-negative, mapping NaN to zero.
#[must_use]
pub fn sanitize_length(length: f64) -> f64 {
    if length.is_nan() { 0.0 } else { length.max(0.0) }
}

/// Applies [`sanitize_length`] to both dimensions.
#[must_use]
pub fn sanitize_size(size: Size) -> Size {
    Size::new(sanitize_length(size.width), sanitize_length(size.height))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn axis_transposes_sizes_and_points() {
        assert_eq!(Axis::Vertical.size(3.0, 4.0), Size::new(4.0, 3.0));
        assert_eq!(Axis::Horizontal.point(1.0, 2.0), Point::new(1.0, 2.0));
        assert_eq!(Axis::Vertical.length(Size::new(1.0, 2.0)), 2.0);
        assert_eq!(Axis::Vertical.cross(), Axis::Horizontal);
    }

    #[test]
    fn proposal_axis_round_trip() {
        let p = ProposedViewSize::from_axis(Axis::Vertical, Some(5.0), None);
        assert_eq!(p, ProposedViewSize::new(None, Some(5.0)));
        assert_eq!(p.along(Axis::Vertical), Some(5.0));
        assert_eq!(p.along(Axis::Horizontal), None);
    }

    #[test]
    fn anchor_origin_offsets_by_fraction_of_size() {
        let origin = UnitPoint::CENTER.origin_for(Point::new(50.0, 50.0), Size::new(20.0, 10.0));
        assert_eq!(origin, Point::new(40.0, 45.0));
        let bottom = UnitPoint::BOTTOM_TRAILING.in_rect(Rect::new(0.0, 0.0, 10.0, 20.0));
        assert_eq!(bottom, Point::new(10.0, 20.0));
    }

    #[test]
    fn sanitize_clamps_and_drops_nan() {
        assert_eq!(sanitize_length(-3.0), 0.0);
        assert_eq!(sanitize_length(f64::NAN), 0.0);
        assert_eq!(sanitize_length(f64::INFINITY), f64::INFINITY);
    }
}
