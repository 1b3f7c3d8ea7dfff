// Copyright 2025 the Sapling Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Alignment guides and view dimensions.

use kurbo::Size;

use crate::UnitPoint;

/// A guide along the horizontal axis.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum HorizontalAlignment {
    /// The leading edge.
    Leading,
    /// The horizontal center.
    #[default]
    Center,
    /// The trailing edge.
    Trailing,
}

/// A guide along the vertical axis.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum VerticalAlignment {
    /// The top edge.
    Top,
    /// The vertical center.
    #[default]
    Center,
    /// The bottom edge.
    Bottom,
    /// The baseline of the first line of text.
    FirstTextBaseline,
    /// The baseline of the last line of text.
    LastTextBaseline,
}

impl HorizontalAlignment {
    const COUNT: usize = 3;

    const fn index(self) -> usize {
        self as usize
    }

    /// Fraction of the width this guide sits at by default.
    #[must_use]
    pub const fn fraction(self) -> f64 {
        match self {
            Self::Leading => 0.0,
            Self::Center => 0.5,
            Self::Trailing => 1.0,
        }
    }
}

impl VerticalAlignment {
    const COUNT: usize = 5;

    const fn index(self) -> usize {
        self as usize
    }

    /// Fraction of the height this guide sits at by default.
    ///
    /// Views without text put both baselines at the bottom edge.
    #[must_use]
    pub const fn fraction(self) -> f64 {
        match self {
            Self::Top => 0.0,
            Self::Center => 0.5,
            Self::Bottom | Self::FirstTextBaseline | Self::LastTextBaseline => 1.0,
        }
    }
}

/// A pair of horizontal and vertical guides.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Alignment {
    /// The horizontal guide.
    pub horizontal: HorizontalAlignment,
    /// The vertical guide.
    pub vertical: VerticalAlignment,
}

impl Alignment {
    /// Top leading corner.
    pub const TOP_LEADING: Self = Self::new(HorizontalAlignment::Leading, VerticalAlignment::Top);
    /// Top edge, centered.
    pub const TOP: Self = Self::new(HorizontalAlignment::Center, VerticalAlignment::Top);
    /// Top trailing corner.
    pub const TOP_TRAILING: Self = Self::new(HorizontalAlignment::Trailing, VerticalAlignment::Top);
    /// Leading edge, centered.
    pub const LEADING: Self = Self::new(HorizontalAlignment::Leading, VerticalAlignment::Center);
    /// Center.
    pub const CENTER: Self = Self::new(HorizontalAlignment::Center, VerticalAlignment::Center);
    /// Trailing edge, centered.
    pub const TRAILING: Self = Self::new(HorizontalAlignment::Trailing, VerticalAlignment::Center);
    /// Bottom leading corner.
    pub const BOTTOM_LEADING: Self =
        Self::new(HorizontalAlignment::Leading, VerticalAlignment::Bottom);
    /// Bottom edge, centered.
    pub const BOTTOM: Self = Self::new(HorizontalAlignment::Center, VerticalAlignment::Bottom);
    /// Bottom trailing corner.
    pub const BOTTOM_TRAILING: Self =
        Self::new(HorizontalAlignment::Trailing, VerticalAlignment::Bottom);

    /// Combines two guides.
    #[must_use]
    pub const fn new(horizontal: HorizontalAlignment, vertical: VerticalAlignment) -> Self {
        Self {
            horizontal,
            vertical,
        }
    }

    /// The anchor in a unit square this alignment maps to.
    #[must_use]
    pub const fn unit_point(self) -> UnitPoint {
        UnitPoint::new(self.horizontal.fraction(), self.vertical.fraction())
    }
}

impl From<Alignment> for UnitPoint {
    fn from(alignment: Alignment) -> Self {
        alignment.unit_point()
    }
}

/// The size of a view together with the positions of its alignment guides.
///
/// Guides default to fixed fractions of the size; a layout may report
/// explicit values that override them.
///
/// ```
/// use kurbo::Size;
/// use sapling_layout::{HorizontalAlignment, VerticalAlignment, ViewDimensions};
///
/// let d = ViewDimensions::new(Size::new(40.0, 20.0))
///     .with_vertical(VerticalAlignment::FirstTextBaseline, 14.0);
/// assert_eq!(d.horizontal(HorizontalAlignment::Trailing), 40.0);
/// assert_eq!(d.vertical(VerticalAlignment::Center), 10.0);
/// assert_eq!(d.vertical(VerticalAlignment::FirstTextBaseline), 14.0);
/// assert_eq!(d.vertical(VerticalAlignment::LastTextBaseline), 20.0);
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ViewDimensions {
    /// Width of the view.
    pub width: f64,
    /// Height of the view.
    pub height: f64,
    explicit_horizontal: [Option<f64>; HorizontalAlignment::COUNT],
    explicit_vertical: [Option<f64>; VerticalAlignment::COUNT],
}

impl ViewDimensions {
    /// Dimensions with only implicit guides.
    #[must_use]
    pub const fn new(size: Size) -> Self {
        Self {
            width: size.width,
            height: size.height,
            explicit_horizontal: [None; HorizontalAlignment::COUNT],
            explicit_vertical: [None; VerticalAlignment::COUNT],
        }
    }

    /// Width and height.
    #[must_use]
    pub const fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    /// Overrides a horizontal guide.
    #[must_use]
    pub const fn with_horizontal(mut self, guide: HorizontalAlignment, value: f64) -> Self {
        self.explicit_horizontal[guide.index()] = Some(value);
        self
    }

    /// Overrides a vertical guide.
    #[must_use]
    pub const fn with_vertical(mut self, guide: VerticalAlignment, value: f64) -> Self {
        self.explicit_vertical[guide.index()] = Some(value);
        self
    }

    /// Position of a horizontal guide, measured from the leading edge.
    #[must_use]
    pub fn horizontal(&self, guide: HorizontalAlignment) -> f64 {
        self.explicit_horizontal(guide)
            .unwrap_or(self.width * guide.fraction())
    }

    /// Position of a vertical guide, measured from the top edge.
    #[must_use]
    pub fn vertical(&self, guide: VerticalAlignment) -> f64 {
        self.explicit_vertical(guide)
            .unwrap_or(self.height * guide.fraction())
    }

    /// The explicit value of a horizontal guide, if one was reported.
    #[must_use]
    pub const fn explicit_horizontal(&self, guide: HorizontalAlignment) -> Option<f64> {
        self.explicit_horizontal[guide.index()]
    }

    /// The explicit value of a vertical guide, if one was reported.
    #[must_use]
    pub const fn explicit_vertical(&self, guide: VerticalAlignment) -> Option<f64> {
        self.explicit_vertical[guide.index()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn implicit_guides_follow_size() {
        let d = ViewDimensions::new(Size::new(30.0, 12.0));
        assert_eq!(d.horizontal(HorizontalAlignment::Leading), 0.0);
        assert_eq!(d.horizontal(HorizontalAlignment::Center), 15.0);
        assert_eq!(d.vertical(VerticalAlignment::Bottom), 12.0);
        assert_eq!(d.vertical(VerticalAlignment::FirstTextBaseline), 12.0);
        assert_eq!(d.explicit_vertical(VerticalAlignment::Top), None);
    }

    #[test]
    fn explicit_guides_override() {
        let d = ViewDimensions::new(Size::new(30.0, 12.0))
            .with_horizontal(HorizontalAlignment::Center, 4.0);
        assert_eq!(d.horizontal(HorizontalAlignment::Center), 4.0);
        assert_eq!(d.horizontal(HorizontalAlignment::Trailing), 30.0);
    }

    #[test]
    fn alignment_maps_to_anchor() {
        assert_eq!(UnitPoint::from(Alignment::BOTTOM_LEADING), UnitPoint::BOTTOM_LEADING);
        assert_eq!(Alignment::CENTER.unit_point(), UnitPoint::CENTER);
        assert_eq!(Alignment::default(), Alignment::CENTER);
    }
}
