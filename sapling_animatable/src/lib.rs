// Copyright 2025 the Sapling Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Sapling Animatable: a vector-space model for interpolating nested values.
//!
//! Animation in Sapling never interpolates a view value directly. Instead every
//! animatable value exposes a vector (its *animatable data*), and the animation
//! system mixes those vectors:
//!
//! - [`VectorArithmetic`]: the vector-space operations (`zero`, `+`, `-`,
//!   scaling, squared magnitude).
//! - [`Animatable`]: read and write the vector part of a value.
//! - [`AnimatablePair`] and [`EmptyAnimatableData`]: build composite vectors
//!   from smaller ones.
//! - [`AnyAnimatableData`]: type-erased vectors with an untyped zero sentinel.
//! - [`Velocity`]: per-second rates, themselves vectors.
//! - [`UnitCurve`]: cubic Bézier timing curves for easing.
//!
//! ## Example
//!
//! ```rust
//! use kurbo::{Point, Size};
//! use sapling_animatable::{Animatable, AnimatablePair, UnitCurve, interpolate};
//!
//! #[derive(Clone, Debug, PartialEq)]
//! struct Badge {
//!     center: Point,
//!     size: Size,
//!     label: &'static str,
//! }
//!
//! impl Animatable for Badge {
//!     type AnimatableData = AnimatablePair<
//!         <Point as Animatable>::AnimatableData,
//!         <Size as Animatable>::AnimatableData,
//!     >;
//!
//!     fn animatable_data(&self) -> Self::AnimatableData {
//!         AnimatablePair::new(self.center.animatable_data(), self.size.animatable_data())
//!     }
//!
//!     fn set_animatable_data(&mut self, data: Self::AnimatableData) {
//!         self.center.set_animatable_data(data.first);
//!         self.size.set_animatable_data(data.second);
//!     }
//! }
//!
//! let from = Badge { center: Point::ZERO, size: Size::new(10.0, 10.0), label: "new" };
//! let to = Badge { center: Point::new(100.0, 0.0), size: Size::new(20.0, 20.0), label: "new" };
//!
//! let t = UnitCurve::LINEAR.value(0.5);
//! let mid = interpolate(&from, &to, t);
//! assert!((mid.center.x - 50.0).abs() < 1e-6);
//! assert!((mid.size.width - 15.0).abs() < 1e-6);
//! assert_eq!(mid.label, "new");
//! ```

extern crate alloc;

mod animatable;
mod any;
mod curve;
mod pair;
mod vector;
mod velocity;

pub use animatable::{Animatable, InsetsData, interpolate};
pub use any::{AnyAnimatableData, ArithmeticError};
pub use curve::UnitCurve;
pub use pair::{AnimatablePair, EmptyAnimatableData};
pub use vector::{VectorArithmetic, mix};
pub use velocity::Velocity;
