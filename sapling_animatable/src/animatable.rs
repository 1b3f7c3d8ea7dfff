// Copyright 2025 the Sapling Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The [`Animatable`] trait and implementations for Kurbo geometry.

use kurbo::{Insets, Point, Rect, Size, Vec2};

use crate::{AnimatablePair, EmptyAnimatableData, VectorArithmetic, mix};

/// A value whose animatable part can be read and written as a vector.
///
/// The animation system never interpolates `Self` directly. It reads
/// [`Animatable::animatable_data`] from the start and end values, mixes the
/// vectors, and writes the result back with
/// [`Animatable::set_animatable_data`].
pub trait Animatable {
    /// The vector representation of the animatable part of `Self`.
    type AnimatableData: VectorArithmetic;

    /// Reads the animatable part.
    fn animatable_data(&self) -> Self::AnimatableData;

    /// Replaces the animatable part.
    fn set_animatable_data(&mut self, data: Self::AnimatableData);
}

/// Interpolates between two animatable values.
///
/// Non-animatable state is taken from `from`.
///
/// ```
/// use kurbo::Point;
/// use sapling_animatable::interpolate;
///
/// let p = interpolate(&Point::new(0.0, 0.0), &Point::new(10.0, 20.0), 0.25);
/// assert_eq!(p, Point::new(2.5, 5.0));
/// ```
#[must_use]
pub fn interpolate<T: Animatable + Clone>(from: &T, to: &T, t: f64) -> T {
    let data = mix(&from.animatable_data(), &to.animatable_data(), t);
    let mut out = from.clone();
    out.set_animatable_data(data);
    out
}

impl Animatable for f64 {
    type AnimatableData = Self;

    fn animatable_data(&self) -> Self {
        *self
    }

    fn set_animatable_data(&mut self, data: Self) {
        *self = data;
    }
}

impl Animatable for f32 {
    type AnimatableData = Self;

    fn animatable_data(&self) -> Self {
        *self
    }

    fn set_animatable_data(&mut self, data: Self) {
        *self = data;
    }
}

impl Animatable for Vec2 {
    type AnimatableData = Self;

    fn animatable_data(&self) -> Self {
        *self
    }

    fn set_animatable_data(&mut self, data: Self) {
        *self = data;
    }
}

impl Animatable for Point {
    type AnimatableData = AnimatablePair<f64, f64>;

    fn animatable_data(&self) -> Self::AnimatableData {
        AnimatablePair::new(self.x, self.y)
    }

    fn set_animatable_data(&mut self, data: Self::AnimatableData) {
        self.x = data.first;
        self.y = data.second;
    }
}

impl Animatable for Size {
    type AnimatableData = AnimatablePair<f64, f64>;

    fn animatable_data(&self) -> Self::AnimatableData {
        AnimatablePair::new(self.width, self.height)
    }

    fn set_animatable_data(&mut self, data: Self::AnimatableData) {
        self.width = data.first;
        self.height = data.second;
    }
}

impl Animatable for Rect {
    /// Origin, then size.
    type AnimatableData = AnimatablePair<AnimatablePair<f64, f64>, AnimatablePair<f64, f64>>;

    fn animatable_data(&self) -> Self::AnimatableData {
        AnimatablePair::new(self.origin().animatable_data(), self.size().animatable_data())
    }

    fn set_animatable_data(&mut self, data: Self::AnimatableData) {
        let origin = Point::new(data.first.first, data.first.second);
        let size = Size::new(data.second.first, data.second.second);
        *self = Self::from_origin_size(origin, size);
    }
}

/// Top, leading, bottom, trailing.
pub type InsetsData = AnimatablePair<f64, AnimatablePair<f64, AnimatablePair<f64, f64>>>;

impl Animatable for Insets {
    type AnimatableData = InsetsData;

    fn animatable_data(&self) -> InsetsData {
        AnimatablePair::new(
            self.y0,
            AnimatablePair::new(self.x0, AnimatablePair::new(self.y1, self.x1)),
        )
    }

    fn set_animatable_data(&mut self, data: InsetsData) {
        self.y0 = data.first;
        self.x0 = data.second.first;
        self.y1 = data.second.second.first;
        self.x1 = data.second.second.second;
    }
}

impl Animatable for () {
    type AnimatableData = EmptyAnimatableData;

    fn animatable_data(&self) -> EmptyAnimatableData {
        EmptyAnimatableData
    }

    fn set_animatable_data(&mut self, _: EmptyAnimatableData) {}
}
