// Copyright 2025 the Sapling Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Values inherited down the view graph.
//!
//! Every context sees the environment of its parent, possibly adjusted by an
//! environment modifier. Storage is shared and copied on write, so passing an
//! unchanged environment to a child is a reference-count bump.
//!
//! ```
//! use sapling_graph::{EnvironmentKey, EnvironmentValues};
//!
//! struct Density;
//! impl EnvironmentKey for Density {
//!     type Value = f64;
//!     fn default_value() -> f64 { 1.0 }
//! }
//!
//! let parent = EnvironmentValues::default();
//! let mut child = parent.clone();
//! child.set::<Density>(2.0);
//! assert_eq!(parent.get::<Density>(), 1.0);
//! assert_eq!(child.get::<Density>(), 2.0);
//! ```

use alloc::boxed::Box;
use alloc::rc::Rc;
use core::any::{Any, TypeId};
use core::fmt;

use hashbrown::HashMap;
use peniko::Color;

/// A typed slot in [`EnvironmentValues`].
pub trait EnvironmentKey: 'static {
    /// The stored type.
    type Value: Clone + fmt::Debug + 'static;

    /// The value seen when no ancestor set one.
    fn default_value() -> Self::Value;
}

/// Color used by shapes that have no fill of their own.
#[derive(Debug)]
pub struct ForegroundColorKey;

impl EnvironmentKey for ForegroundColorKey {
    type Value = Color;

    fn default_value() -> Color {
        Color::BLACK
    }
}

/// Color of dividers.
#[derive(Debug)]
pub struct SeparatorColorKey;

impl EnvironmentKey for SeparatorColorKey {
    type Value = Color;

    fn default_value() -> Color {
        Color::from_rgba8(0x3c, 0x3c, 0x43, 0x5c)
    }
}

/// An environment value with its type erased.
struct StoredValue {
    inner: Box<dyn StoredValueTrait>,
}

impl Clone for StoredValue {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone_boxed(),
        }
    }
}

trait StoredValueTrait: Any {
    fn as_any(&self) -> &dyn Any;
    fn clone_boxed(&self) -> Box<dyn StoredValueTrait>;
    fn debug(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result;
}

impl<T: Clone + fmt::Debug + 'static> StoredValueTrait for T {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn clone_boxed(&self) -> Box<dyn StoredValueTrait> {
        Box::new(self.clone())
    }

    fn debug(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

impl fmt::Debug for StoredValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.inner.debug(f)
    }
}

/// The inherited values visible to one context.
#[derive(Clone, Default)]
pub struct EnvironmentValues {
    values: Rc<HashMap<TypeId, StoredValue>>,
}

impl EnvironmentValues {
    /// Returns the value for `K`, or its default.
    #[must_use]
    pub fn get<K: EnvironmentKey>(&self) -> K::Value {
        self.values
            .get(&TypeId::of::<K>())
            .and_then(|stored| stored.inner.as_any().downcast_ref::<K::Value>())
            .cloned()
            .unwrap_or_else(K::default_value)
    }

    /// Returns `true` if some ancestor set `K`.
    #[must_use]
    pub fn contains<K: EnvironmentKey>(&self) -> bool {
        self.values.contains_key(&TypeId::of::<K>())
    }

    /// Sets `K` for this environment and everything derived from it.
    pub fn set<K: EnvironmentKey>(&mut self, value: K::Value) {
        Rc::make_mut(&mut self.values).insert(
            TypeId::of::<K>(),
            StoredValue {
                inner: Box::new(value),
            },
        );
    }

    /// Returns `true` if both environments share storage.
    #[must_use]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.values, &other.values)
    }
}

impl fmt::Debug for EnvironmentValues {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EnvironmentValues")
            .field("values", &self.values.values())
            .finish()
    }
}
