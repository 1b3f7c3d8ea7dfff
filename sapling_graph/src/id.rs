// Copyright 2025 the Sapling Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use core::fmt;

/// Identifier of a mounted view context.
///
/// A small, copyable handle made of a slot index and a generation counter.
/// When a context is torn down its slot is freed, and reusing the slot bumps
/// the generation, so a stale `ContextId` never aliases a newer context.
/// Use [`Graph::is_alive`](crate::ViewGraph::is_alive) to check liveness.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct ContextId(pub(crate) u32, pub(crate) u32);

impl ContextId {
    pub(crate) const fn new(idx: u32, generation: u32) -> Self {
        Self(idx, generation)
    }

    pub(crate) const fn idx(self) -> usize {
        self.0 as usize
    }

    /// The generation of the slot this handle refers to.
    #[must_use]
    pub const fn generation(self) -> u32 {
        self.1
    }
}

impl fmt::Display for ContextId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}v{}", self.0, self.1)
    }
}
