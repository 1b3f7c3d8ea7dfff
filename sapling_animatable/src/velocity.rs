// Copyright 2025 the Sapling Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use core::ops::{Add, AddAssign, Sub, SubAssign};

use crate::VectorArithmetic;

/// A rate of change of a vector value, in units per second.
///
/// A velocity is itself a vector, so it can be animated and averaged.
///
/// ```
/// use kurbo::Vec2;
/// use sapling_animatable::Velocity;
///
/// let v = Velocity::new(Vec2::new(100.0, 0.0));
/// assert_eq!(v.advance(&Vec2::ZERO, 0.5), Vec2::new(50.0, 0.0));
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Velocity<Value> {
    /// Change of the value over one second.
    pub value_per_second: Value,
}

impl<Value> Velocity<Value> {
    /// Wraps a per-second rate.
    #[must_use]
    pub const fn new(value_per_second: Value) -> Self {
        Self { value_per_second }
    }
}

impl<Value: VectorArithmetic> Velocity<Value> {
    /// Estimates a velocity from two samples taken `dt` seconds apart.
    ///
    /// Returns zero when `dt` is not positive.
    #[must_use]
    pub fn from_samples(previous: &Value, current: &Value, dt: f64) -> Self {
        if dt > 0.0 {
            Self::new((current.clone() - previous.clone()).scaled_by(1.0 / dt))
        } else {
            Self::new(Value::zero())
        }
    }

    /// Moves `value` forward by `seconds` at this velocity.
    #[must_use]
    pub fn advance(&self, value: &Value, seconds: f64) -> Value {
        value.clone() + self.value_per_second.scaled_by(seconds)
    }
}

impl<Value: VectorArithmetic> Add for Velocity<Value> {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::new(self.value_per_second + rhs.value_per_second)
    }
}

impl<Value: VectorArithmetic> Sub for Velocity<Value> {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self::new(self.value_per_second - rhs.value_per_second)
    }
}

impl<Value: VectorArithmetic> AddAssign for Velocity<Value> {
    fn add_assign(&mut self, rhs: Self) {
        self.value_per_second += rhs.value_per_second;
    }
}

impl<Value: VectorArithmetic> SubAssign for Velocity<Value> {
    fn sub_assign(&mut self, rhs: Self) {
        self.value_per_second -= rhs.value_per_second;
    }
}

impl<Value: VectorArithmetic> VectorArithmetic for Velocity<Value> {
    fn zero() -> Self {
        Self::new(Value::zero())
    }

    fn scale(&mut self, rhs: f64) {
        self.value_per_second.scale(rhs);
    }

    fn magnitude_squared(&self) -> f64 {
        self.value_per_second.magnitude_squared()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kurbo::Vec2;

    #[test]
    fn from_samples_divides_by_elapsed_time() {
        let v = Velocity::from_samples(&Vec2::new(0.0, 0.0), &Vec2::new(10.0, -5.0), 0.1);
        assert!((v.value_per_second - Vec2::new(100.0, -50.0)).hypot() < 1e-9);
    }

    #[test]
    fn non_positive_interval_yields_zero() {
        let v = Velocity::from_samples(&1.0, &2.0, 0.0);
        assert!(v.is_zero());
    }
}
