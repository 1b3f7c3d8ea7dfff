// Copyright 2025 the Sapling Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Type-erased animatable data.
//!
//! [`AnyAnimatableData`] lets heterogeneous animatable values (for example the
//! data of whichever layout an [`AnyLayout`] currently wraps) travel through a
//! single vector type. The concrete arithmetic is bound when the value is
//! erased; combining two values of different dynamic types is an error.
//!
//! A dedicated zero sentinel is the additive identity for every erased type,
//! so `AnyAnimatableData::zero()` can be produced without knowing what it will
//! later be combined with.
//!
//! [`AnyLayout`]: https://docs.rs/sapling_layout/latest/sapling_layout/struct.AnyLayout.html

use alloc::boxed::Box;
use core::any::{Any, TypeId};
use core::fmt;
use core::ops::{Add, AddAssign, Sub, SubAssign};

use crate::VectorArithmetic;

/// Error produced when erased animatable values cannot be combined.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ArithmeticError {
    /// The two operands hold different concrete vector types.
    #[error("animatable data type mismatch: `{lhs}` and `{rhs}`")]
    TypeMismatch {
        /// Type name of the left operand.
        lhs: &'static str,
        /// Type name of the right operand.
        rhs: &'static str,
    },
}

/// A type-erased [`VectorArithmetic`] value.
///
/// # Example
///
/// ```
/// use sapling_animatable::{AnyAnimatableData, VectorArithmetic};
///
/// let a = AnyAnimatableData::new(2.0_f64);
/// let zero = AnyAnimatableData::zero();
///
/// // The sentinel zero is an identity for any erased type.
/// assert_eq!(a.clone() + zero.clone(), a);
/// assert_eq!(zero.clone() + a.clone(), a);
/// assert_eq!((zero - a).downcast::<f64>(), Some(-2.0));
///
/// // Mixing types is reported by the fallible API.
/// let b = AnyAnimatableData::new(1.0_f32);
/// assert!(AnyAnimatableData::new(2.0_f64).try_add(&b).is_err());
/// ```
pub struct AnyAnimatableData {
    repr: Repr,
}

enum Repr {
    Zero,
    Value {
        type_id: TypeId,
        inner: Box<dyn ErasedVector>,
    },
}

impl AnyAnimatableData {
    /// The untyped zero sentinel.
    pub const ZERO: Self = Self { repr: Repr::Zero };

    /// Erases a concrete vector value.
    ///
    /// Erasing an `AnyAnimatableData` returns it unchanged rather than nesting.
    #[must_use]
    pub fn new<T: VectorArithmetic>(value: T) -> Self {
        if let Some(any) = (&value as &dyn Any).downcast_ref::<Self>() {
            return any.clone();
        }
        Self {
            repr: Repr::Value {
                type_id: TypeId::of::<T>(),
                inner: Box::new(value),
            },
        }
    }

    /// Returns `true` if this is the untyped zero sentinel.
    #[must_use]
    pub fn is_zero_sentinel(&self) -> bool {
        matches!(self.repr, Repr::Zero)
    }

    /// Returns the [`TypeId`] of the contained value, or `None` for the sentinel.
    #[must_use]
    pub fn value_type_id(&self) -> Option<TypeId> {
        match &self.repr {
            Repr::Zero => None,
            Repr::Value { type_id, .. } => Some(*type_id),
        }
    }

    /// Name of the contained type, for diagnostics.
    #[must_use]
    pub fn type_name(&self) -> &'static str {
        match &self.repr {
            Repr::Zero => "zero",
            Repr::Value { inner, .. } => inner.type_name(),
        }
    }

    /// Returns a reference to the contained value if it is a `T`.
    ///
    /// The sentinel holds no value and always returns `None`.
    #[must_use]
    pub fn downcast_ref<T: 'static>(&self) -> Option<&T> {
        match &self.repr {
            Repr::Value { type_id, inner } if *type_id == TypeId::of::<T>() => {
                inner.as_any().downcast_ref()
            }
            _ => None,
        }
    }

    /// Recovers the contained value as a `T`, treating the sentinel as `T::zero()`.
    #[must_use]
    pub fn downcast<T: VectorArithmetic>(&self) -> Option<T> {
        match &self.repr {
            Repr::Zero => Some(T::zero()),
            Repr::Value { .. } => self.downcast_ref::<T>().cloned(),
        }
    }

    /// Adds two erased values, reporting a type mismatch instead of panicking.
    pub fn try_add(&self, rhs: &Self) -> Result<Self, ArithmeticError> {
        match (&self.repr, &rhs.repr) {
            (Repr::Zero, _) => Ok(rhs.clone()),
            (_, Repr::Zero) => Ok(self.clone()),
            (
                Repr::Value {
                    type_id,
                    inner: lhs,
                },
                Repr::Value { inner: r, .. },
            ) => lhs
                .add_erased(r.as_ref())
                .map(|inner| Self {
                    repr: Repr::Value {
                        type_id: *type_id,
                        inner,
                    },
                })
                .ok_or_else(|| self.mismatch(rhs)),
        }
    }

    /// Subtracts two erased values, reporting a type mismatch instead of panicking.
    pub fn try_subtract(&self, rhs: &Self) -> Result<Self, ArithmeticError> {
        match (&self.repr, &rhs.repr) {
            (_, Repr::Zero) => Ok(self.clone()),
            (Repr::Zero, Repr::Value { .. }) => Ok(rhs.scaled_by(-1.0)),
            (
                Repr::Value {
                    type_id,
                    inner: lhs,
                },
                Repr::Value { inner: r, .. },
            ) => lhs
                .sub_erased(r.as_ref())
                .map(|inner| Self {
                    repr: Repr::Value {
                        type_id: *type_id,
                        inner,
                    },
                })
                .ok_or_else(|| self.mismatch(rhs)),
        }
    }

    fn mismatch(&self, rhs: &Self) -> ArithmeticError {
        ArithmeticError::TypeMismatch {
            lhs: self.type_name(),
            rhs: rhs.type_name(),
        }
    }

    fn unwrap_or_mismatch(result: Result<Self, ArithmeticError>) -> Self {
        match result {
            Ok(v) => v,
            Err(err) => panic!("{err}"),
        }
    }
}

impl Clone for AnyAnimatableData {
    fn clone(&self) -> Self {
        let repr = match &self.repr {
            Repr::Zero => Repr::Zero,
            Repr::Value { type_id, inner } => Repr::Value {
                type_id: *type_id,
                inner: inner.clone_boxed(),
            },
        };
        Self { repr }
    }
}

impl Default for AnyAnimatableData {
    fn default() -> Self {
        Self::ZERO
    }
}

impl fmt::Debug for AnyAnimatableData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.repr {
            Repr::Zero => f.write_str("AnyAnimatableData(zero)"),
            Repr::Value { inner, .. } => {
                f.write_str("AnyAnimatableData(")?;
                inner.debug_erased(f)?;
                f.write_str(")")
            }
        }
    }
}

impl PartialEq for AnyAnimatableData {
    fn eq(&self, other: &Self) -> bool {
        match (&self.repr, &other.repr) {
            (Repr::Zero, Repr::Zero) => true,
            (Repr::Zero, Repr::Value { inner, .. }) | (Repr::Value { inner, .. }, Repr::Zero) => {
                inner.magnitude_squared_erased() == 0.0
            }
            (Repr::Value { inner: a, .. }, Repr::Value { inner: b, .. }) => a.eq_erased(b.as_ref()),
        }
    }
}

/// # Panics
///
/// Panics if both operands hold values of different concrete types.
impl Add for AnyAnimatableData {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::unwrap_or_mismatch(self.try_add(&rhs))
    }
}

/// # Panics
///
/// Panics if both operands hold values of different concrete types.
impl Sub for AnyAnimatableData {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self::unwrap_or_mismatch(self.try_subtract(&rhs))
    }
}

impl AddAssign for AnyAnimatableData {
    fn add_assign(&mut self, rhs: Self) {
        *self = Self::unwrap_or_mismatch(self.try_add(&rhs));
    }
}

impl SubAssign for AnyAnimatableData {
    fn sub_assign(&mut self, rhs: Self) {
        *self = Self::unwrap_or_mismatch(self.try_subtract(&rhs));
    }
}

impl VectorArithmetic for AnyAnimatableData {
    fn zero() -> Self {
        Self::ZERO
    }

    fn scale(&mut self, rhs: f64) {
        if let Repr::Value { inner, .. } = &mut self.repr {
            inner.scale_erased(rhs);
        }
    }

    fn magnitude_squared(&self) -> f64 {
        match &self.repr {
            Repr::Zero => 0.0,
            Repr::Value { inner, .. } => inner.magnitude_squared_erased(),
        }
    }
}

/// Object-safe view of a [`VectorArithmetic`] value.
trait ErasedVector: Any {
    fn as_any(&self) -> &dyn Any;
    fn clone_boxed(&self) -> Box<dyn ErasedVector>;
    fn type_name(&self) -> &'static str;
    fn add_erased(&self, rhs: &dyn ErasedVector) -> Option<Box<dyn ErasedVector>>;
    fn sub_erased(&self, rhs: &dyn ErasedVector) -> Option<Box<dyn ErasedVector>>;
    fn scale_erased(&mut self, rhs: f64);
    fn magnitude_squared_erased(&self) -> f64;
    fn eq_erased(&self, rhs: &dyn ErasedVector) -> bool;
    fn debug_erased(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result;
}

impl<T: VectorArithmetic> ErasedVector for T {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn clone_boxed(&self) -> Box<dyn ErasedVector> {
        Box::new(self.clone())
    }

    fn type_name(&self) -> &'static str {
        core::any::type_name::<T>()
    }

    fn add_erased(&self, rhs: &dyn ErasedVector) -> Option<Box<dyn ErasedVector>> {
        let rhs = rhs.as_any().downcast_ref::<T>()?;
        Some(Box::new(self.clone() + rhs.clone()))
    }

    fn sub_erased(&self, rhs: &dyn ErasedVector) -> Option<Box<dyn ErasedVector>> {
        let rhs = rhs.as_any().downcast_ref::<T>()?;
        Some(Box::new(self.clone() - rhs.clone()))
    }

    fn scale_erased(&mut self, rhs: f64) {
        self.scale(rhs);
    }

    fn magnitude_squared_erased(&self) -> f64 {
        self.magnitude_squared()
    }

    fn eq_erased(&self, rhs: &dyn ErasedVector) -> bool {
        rhs.as_any().downcast_ref::<T>() == Some(self)
    }

    fn debug_erased(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}
