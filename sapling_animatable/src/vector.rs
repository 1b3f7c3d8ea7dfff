// Copyright 2025 the Sapling Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The [`VectorArithmetic`] trait and its scalar and Kurbo implementations.

use core::fmt;
use core::ops::{Add, AddAssign, Sub, SubAssign};

use kurbo::Vec2;

/// A value that behaves like an element of a real vector space.
///
/// Implementations form an additive group with [`VectorArithmetic::zero`] as
/// identity and support multiplication by a scalar. That is all linear
/// interpolation needs: `from + (to - from) * t`.
///
/// Composite values are built by nesting
/// [`AnimatablePair`](crate::AnimatablePair)s, so every operation here is
/// defined component-wise.
///
/// ```
/// use sapling_animatable::VectorArithmetic;
///
/// let mut v = 3.0_f64;
/// v.scale(2.0);
/// assert_eq!(v, 6.0);
/// assert_eq!(v.magnitude_squared(), 36.0);
/// assert_eq!(v + f64::zero(), v);
/// ```
pub trait VectorArithmetic:
    Clone
    + PartialEq
    + fmt::Debug
    + Add<Output = Self>
    + Sub<Output = Self>
    + AddAssign
    + SubAssign
    + 'static
{
    /// The additive identity.
    fn zero() -> Self;

    /// Multiplies every component by `rhs` in place.
    fn scale(&mut self, rhs: f64);

    /// The dot product of the value with itself.
    fn magnitude_squared(&self) -> f64;

    /// Returns a copy with every component multiplied by `rhs`.
    #[must_use]
    fn scaled_by(&self, rhs: f64) -> Self {
        let mut v = self.clone();
        v.scale(rhs);
        v
    }

    /// Returns the additive inverse.
    #[must_use]
    fn negated(&self) -> Self {
        self.scaled_by(-1.0)
    }

    /// Euclidean length of the value.
    fn magnitude(&self) -> f64 {
        self.magnitude_squared().sqrt()
    }

    /// Returns `true` if this value equals the additive identity.
    fn is_zero(&self) -> bool {
        *self == Self::zero()
    }
}

impl VectorArithmetic for f64 {
    fn zero() -> Self {
        0.0
    }

    fn scale(&mut self, rhs: f64) {
        *self *= rhs;
    }

    fn magnitude_squared(&self) -> f64 {
        self * self
    }
}

impl VectorArithmetic for f32 {
    fn zero() -> Self {
        0.0
    }

    #[expect(
        clippy::cast_possible_truncation,
        reason = "f32 data is scaled in f64 and narrowed back on purpose"
    )]
    fn scale(&mut self, rhs: f64) {
        *self = (f64::from(*self) * rhs) as Self;
    }

    fn magnitude_squared(&self) -> f64 {
        let v = f64::from(*self);
        v * v
    }
}

impl VectorArithmetic for Vec2 {
    fn zero() -> Self {
        Self::ZERO
    }

    fn scale(&mut self, rhs: f64) {
        *self *= rhs;
    }

    fn magnitude_squared(&self) -> f64 {
        self.hypot2()
    }
}

/// Linearly interpolates between two vectors.
///
/// `t = 0` yields `from`, `t = 1` yields `to`; values outside `0..=1`
/// extrapolate.
#[must_use]
pub fn mix<V: VectorArithmetic>(from: &V, to: &V, t: f64) -> V {
    let mut delta = to.clone() - from.clone();
    delta.scale(t);
    from.clone() + delta
}
