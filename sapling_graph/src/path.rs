// Copyright 2025 the Sapling Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use core::fmt;

use smallvec::SmallVec;

/// The position of a view inside a view-description tree.
///
/// A path is the sequence of child indices taken from the root. Given a new
/// root value, a path deterministically re-derives the value a context
/// represents, or fails if the tree no longer has that shape.
#[derive(Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GraphPath(SmallVec<[u32; 8]>);

impl GraphPath {
    /// The path of the root view.
    #[must_use]
    pub fn root() -> Self {
        Self(SmallVec::new())
    }

    /// Builds a path from child indices.
    #[must_use]
    pub fn from_indices(indices: &[u32]) -> Self {
        Self(SmallVec::from_slice(indices))
    }

    /// The path of child `index` of this path.
    ///
    /// # Panics
    ///
    /// If `index` does not fit in a `u32`.
    #[must_use]
    pub fn child(&self, index: usize) -> Self {
        let Ok(index) = u32::try_from(index) else {
            panic!("child index {index} out of range");
        };
        let mut path = self.clone();
        path.0.push(index);
        path
    }

    /// The enclosing path, or `None` at the root.
    #[must_use]
    pub fn parent(&self) -> Option<Self> {
        let (_, parent) = self.0.split_last()?;
        Some(Self::from_indices(parent))
    }

    /// Child indices from the root.
    #[must_use]
    pub fn indices(&self) -> &[u32] {
        &self.0
    }

    /// Number of steps from the root.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` for the root path.
    #[must_use]
    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns `true` if `self` is `ancestor` or lies below it.
    #[must_use]
    pub fn starts_with(&self, ancestor: &Self) -> bool {
        self.0.starts_with(&ancestor.0)
    }
}

impl fmt::Display for GraphPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return f.write_str("/");
        }
        for index in &self.0 {
            write!(f, "/{index}")?;
        }
        Ok(())
    }
}

impl fmt::Debug for GraphPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "GraphPath({self})")
    }
}
