// Copyright 2025 the Sapling Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Resource loading.
//!
//! Missing or unreadable resources are never fatal: callers that draw with
//! them go through [`load_or_empty`], which logs the failure and substitutes
//! empty data.

use alloc::string::{String, ToString};
use alloc::sync::Arc;
use alloc::vec::Vec;
use std::io;
use std::path::{Component, Path, PathBuf};
use std::thread::{self, JoinHandle};

use hashbrown::HashMap;
use tracing::{trace, warn};

use crate::{ResourceError, UiContext, UiTaskSender};

/// Resolves resource names to bytes.
///
/// Loaders are shared with background threads.
pub trait ResourceLoader: Send + Sync {
    /// Loads `name`.
    fn load(&self, name: &str) -> Result<Vec<u8>, ResourceError>;
}

/// Loads resources from files below a root directory.
///
/// Names are relative paths; names that would leave the root are reported
/// as not found.
#[derive(Clone, Debug)]
pub struct DirectoryLoader {
    root: PathBuf,
}

impl DirectoryLoader {
    /// Loads from below `root`.
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

impl ResourceLoader for DirectoryLoader {
    fn load(&self, name: &str) -> Result<Vec<u8>, ResourceError> {
        let relative = Path::new(name);
        if !relative
            .components()
            .all(|component| matches!(component, Component::Normal(_)))
        {
            return Err(ResourceError::NotFound(name.to_string()));
        }
        std::fs::read(self.root.join(relative)).map_err(|source| {
            if source.kind() == io::ErrorKind::NotFound {
                ResourceError::NotFound(name.to_string())
            } else {
                ResourceError::Io {
                    name: name.to_string(),
                    source,
                }
            }
        })
    }
}

/// Serves resources registered in memory.
#[derive(Clone, Debug, Default)]
pub struct MemoryLoader {
    entries: HashMap<String, Arc<[u8]>>,
}

impl MemoryLoader {
    /// Creates an empty loader.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `bytes` under `name`, replacing any earlier entry.
    pub fn insert(&mut self, name: impl Into<String>, bytes: impl Into<Arc<[u8]>>) {
        self.entries.insert(name.into(), bytes.into());
    }
}

impl ResourceLoader for MemoryLoader {
    fn load(&self, name: &str) -> Result<Vec<u8>, ResourceError> {
        self.entries
            .get(name)
            .map(|bytes| bytes.to_vec())
            .ok_or_else(|| ResourceError::NotFound(name.to_string()))
    }
}

/// Loads `name`, falling back to empty data on failure.
pub fn load_or_empty(loader: &dyn ResourceLoader, name: &str) -> Vec<u8> {
    match loader.load(name) {
        Ok(bytes) => {
            trace!(name, len = bytes.len(), "loaded resource");
            bytes
        }
        Err(error) => {
            warn!(name, %error, "resource unavailable, using empty fallback");
            Vec::new()
        }
    }
}

/// Loads `name` on a helper thread and hands the bytes back on the UI
/// thread.
///
/// `deliver` runs as a UI task the next time the host drains its queue. If
/// the host is gone by then the bytes are dropped.
pub fn load_in_background<F>(
    loader: Arc<dyn ResourceLoader>,
    name: impl Into<String>,
    sender: UiTaskSender,
    deliver: F,
) -> JoinHandle<()>
where
    F: FnOnce(&mut UiContext<'_>, Vec<u8>) + Send + 'static,
{
    let name = name.into();
    thread::spawn(move || {
        let bytes = load_or_empty(&*loader, &name);
        if !sender.post(move |cx| deliver(cx, bytes)) {
            trace!(name = %name, "host gone before resource arrived");
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_loader_reports_missing_names() {
        let mut loader = MemoryLoader::new();
        loader.insert("logo", &b"png"[..]);
        assert_eq!(loader.load("logo").unwrap(), b"png");
        assert!(matches!(
            loader.load("icon"),
            Err(ResourceError::NotFound(name)) if name == "icon"
        ));
        assert!(load_or_empty(&loader, "icon").is_empty());
    }

    #[test]
    fn directory_loader_stays_below_root() {
        let loader = DirectoryLoader::new(std::env::temp_dir());
        assert!(matches!(
            loader.load("../etc/passwd"),
            Err(ResourceError::NotFound(_))
        ));
        assert!(matches!(
            loader.load("sapling-resource-that-does-not-exist"),
            Err(ResourceError::NotFound(_))
        ));
    }
}
