// Copyright 2025 the Sapling Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Composite vectors: [`AnimatablePair`] and the zero-dimensional [`EmptyAnimatableData`].

use core::ops::{Add, AddAssign, Sub, SubAssign};

use crate::VectorArithmetic;

/// A pair of vectors treated as a single vector.
///
/// Structs with more than two animatable fields nest pairs:
/// `AnimatablePair<f64, AnimatablePair<f64, f64>>` for three fields, and so on.
///
/// ```
/// use sapling_animatable::{AnimatablePair, VectorArithmetic};
///
/// let a = AnimatablePair::new(1.0, 2.0);
/// let b = AnimatablePair::new(3.0, 4.0);
/// assert_eq!(a.clone() + b, AnimatablePair::new(4.0, 6.0));
/// assert_eq!(a.magnitude_squared(), 5.0);
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct AnimatablePair<First, Second> {
    /// The first component.
    pub first: First,
    /// The second component.
    pub second: Second,
}

impl<First, Second> AnimatablePair<First, Second> {
    /// Creates a pair from its two components.
    #[must_use]
    pub const fn new(first: First, second: Second) -> Self {
        Self { first, second }
    }
}

impl<First: VectorArithmetic, Second: VectorArithmetic> Add for AnimatablePair<First, Second> {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::new(self.first + rhs.first, self.second + rhs.second)
    }
}

impl<First: VectorArithmetic, Second: VectorArithmetic> Sub for AnimatablePair<First, Second> {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self::new(self.first - rhs.first, self.second - rhs.second)
    }
}

impl<First: VectorArithmetic, Second: VectorArithmetic> AddAssign for AnimatablePair<First, Second> {
    fn add_assign(&mut self, rhs: Self) {
        self.first += rhs.first;
        self.second += rhs.second;
    }
}

impl<First: VectorArithmetic, Second: VectorArithmetic> SubAssign for AnimatablePair<First, Second> {
    fn sub_assign(&mut self, rhs: Self) {
        self.first -= rhs.first;
        self.second -= rhs.second;
    }
}

impl<First: VectorArithmetic, Second: VectorArithmetic> VectorArithmetic
    for AnimatablePair<First, Second>
{
    fn zero() -> Self {
        Self::new(First::zero(), Second::zero())
    }

    fn scale(&mut self, rhs: f64) {
        self.first.scale(rhs);
        self.second.scale(rhs);
    }

    fn magnitude_squared(&self) -> f64 {
        self.first.magnitude_squared() + self.second.magnitude_squared()
    }
}

/// The zero-dimensional vector space.
///
/// Used as the animatable data of values that have nothing to interpolate.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct EmptyAnimatableData;

impl Add for EmptyAnimatableData {
    type Output = Self;

    fn add(self, _: Self) -> Self {
        Self
    }
}

impl Sub for EmptyAnimatableData {
    type Output = Self;

    fn sub(self, _: Self) -> Self {
        Self
    }
}

impl AddAssign for EmptyAnimatableData {
    fn add_assign(&mut self, _: Self) {}
}

impl SubAssign for EmptyAnimatableData {
    fn sub_assign(&mut self, _: Self) {}
}

impl VectorArithmetic for EmptyAnimatableData {
    fn zero() -> Self {
        Self
    }

    fn scale(&mut self, _: f64) {}

    fn magnitude_squared(&self) -> f64 {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    type Triple = AnimatablePair<f64, AnimatablePair<f64, f64>>;

    fn triple(a: f64, b: f64, c: f64) -> Triple {
        AnimatablePair::new(a, AnimatablePair::new(b, c))
    }

    #[test]
    fn nested_pairs_operate_component_wise() {
        let mut v = triple(1.0, 2.0, 3.0);
        v += triple(1.0, 1.0, 1.0);
        assert_eq!(v, triple(2.0, 3.0, 4.0));
        v -= triple(2.0, 2.0, 2.0);
        assert_eq!(v, triple(0.0, 1.0, 2.0));
        v.scale(3.0);
        assert_eq!(v, triple(0.0, 3.0, 6.0));
        assert_eq!(v.magnitude_squared(), 45.0);
    }

    #[test]
    fn pair_zero_is_identity() {
        let v = triple(4.0, -1.0, 0.5);
        assert_eq!(v + Triple::zero(), v);
        assert_eq!(Triple::zero() + v, v);
        assert_eq!(v - Triple::zero(), v);
    }

    #[test]
    fn empty_data_is_always_zero() {
        let mut e = EmptyAnimatableData;
        e.scale(10.0);
        assert!(e.is_zero());
        assert_eq!(e.magnitude_squared(), 0.0);
    }
}
