// Copyright 2025 the Sapling Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::string::String;

use thiserror::Error;

use crate::ContextId;

/// Errors from looking up contexts in a [`ViewGraph`](crate::ViewGraph).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GraphError {
    /// The context was torn down, or never existed.
    #[error("context {0} is not alive")]
    StaleContext(ContextId),
    /// The context shows a view of another type.
    #[error("context holds a `{found}`, not a `{expected}`")]
    TypeMismatch {
        /// The requested type.
        expected: &'static str,
        /// The type actually mounted.
        found: &'static str,
    },
}

/// Errors from loading resources.
#[derive(Debug, Error)]
pub enum ResourceError {
    /// No resource has that name.
    #[error("resource `{0}` not found")]
    NotFound(String),
    /// The resource exists but could not be read.
    #[error("failed to read resource `{name}`")]
    Io {
        /// The requested name.
        name: String,
        /// The underlying failure.
        #[source]
        source: std::io::Error,
    },
}
