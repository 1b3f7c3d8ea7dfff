// Copyright 2025 the Sapling Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use core::fmt::Debug;
use core::hash::{BuildHasher, Hash};

use hashbrown::HashMap;
use kurbo::{Point, Rect};

/// A handle identifying the view a recognizer is attached to.
///
/// Recognizers never hold their target directly; they hold a key and ask a
/// [`GestureTargets`] whether it is still alive. Generation-checked arena
/// handles are the intended implementors.
pub trait TargetKey: Copy + Eq + Hash + Debug + 'static {}

impl<T: Copy + Eq + Hash + Debug + 'static> TargetKey for T {}

/// Resolves recognizer targets against the live view graph.
pub trait GestureTargets<K> {
    /// Returns `true` while `target` is still mounted.
    fn is_alive(&self, target: K) -> bool;

    /// Converts a window-space point into `target`'s local coordinates.
    ///
    /// Returns `None` if the target is gone.
    fn local_point(&self, target: K, point: Point) -> Option<Point>;

    /// Returns `target`'s bounds in its local coordinates.
    fn bounds(&self, target: K) -> Option<Rect>;
}

/// A map from key to window-space frame is a complete set of targets.
impl<K, S> GestureTargets<K> for HashMap<K, Rect, S>
where
    K: TargetKey,
    S: BuildHasher,
{
    fn is_alive(&self, target: K) -> bool {
        self.contains_key(&target)
    }

    fn local_point(&self, target: K, point: Point) -> Option<Point> {
        self.get(&target)
            .map(|frame| point - frame.origin().to_vec2())
    }

    fn bounds(&self, target: K) -> Option<Rect> {
        self.get(&target)
            .map(|frame| Rect::from_origin_size(Point::ZERO, frame.size()))
    }
}
