// Copyright 2025 the Sapling Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! View descriptions.
//!
//! A view is an immutable value describing part of the UI. The graph never
//! keeps references into a root value between updates; instead every mounted
//! context remembers the [`GraphPath`](crate::GraphPath) it was found at and
//! re-derives its value from each new root by walking [`View::child`].

use alloc::boxed::Box;
use core::any::{Any, TypeId};
use core::fmt;
use core::ops::Deref;

use crate::behavior::{BodyBehavior, ViewBehavior};

/// Object-safe cloning and identification for views.
///
/// Implemented for every `View + Clone`; never implement it by hand.
pub trait ViewClone {
    /// Clones the view into a box.
    fn clone_view(&self) -> Box<dyn View>;

    /// The view as [`Any`], for downcasting.
    fn as_any(&self) -> &dyn Any;

    /// The [`TypeId`] of the concrete view type.
    ///
    /// This is the reconciliation key: a context survives an update only if
    /// the value found at its path has the same type id.
    fn view_type_id(&self) -> TypeId;

    /// The name of the concrete view type, for diagnostics.
    fn view_type_name(&self) -> &'static str;
}

impl<T: View + Clone> ViewClone for T {
    fn clone_view(&self) -> Box<dyn View> {
        Box::new(self.clone())
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn view_type_id(&self) -> TypeId {
        TypeId::of::<T>()
    }

    fn view_type_name(&self) -> &'static str {
        core::any::type_name::<T>()
    }
}

/// A description of part of the UI.
///
/// Composite views implement [`View::body`] and keep the defaults for
/// everything else. Primitive views report no children (or their own list of
/// children) and supply a [`ViewBehavior`] that takes part in layout and
/// drawing.
///
/// ```
/// use sapling_graph::{Color, View, ViewExt};
///
/// #[derive(Clone, Debug)]
/// struct Badge {
///     size: f64,
/// }
///
/// impl View for Badge {
///     fn body(&self) -> Box<dyn View> {
///         Box::new(Color::RED.frame(self.size, self.size))
///     }
/// }
///
/// let badge = Badge { size: 12.0 };
/// assert_eq!(badge.child_count(), 1);
/// ```
pub trait View: ViewClone + fmt::Debug + 'static {
    /// The body of a composite view.
    ///
    /// Only consulted through the default [`View::child`]; primitive views
    /// that override `child` never have it called.
    fn body(&self) -> Box<dyn View> {
        Box::new(EmptyView)
    }

    /// Number of child views.
    fn child_count(&self) -> usize {
        1
    }

    /// Child view `index`, or `None` if out of range.
    fn child(&self, index: usize) -> Option<ViewRef<'_>> {
        (index == 0).then(|| ViewRef::Owned(self.body()))
    }

    /// Builds the behavior for a new context showing this view.
    fn make_behavior(&self) -> Box<dyn ViewBehavior> {
        Box::new(BodyBehavior)
    }

    /// Configuration a behavior reads on update, such as a layout or a
    /// modifier value.
    fn configuration(&self) -> Option<&dyn Any> {
        None
    }
}

/// An owned, type-erased view.
pub type BoxedView = Box<dyn View>;

impl Clone for Box<dyn View> {
    fn clone(&self) -> Self {
        self.clone_view()
    }
}

/// A child view that is either part of its parent or computed on demand.
pub enum ViewRef<'a> {
    /// Stored inside the parent value.
    Borrowed(&'a dyn View),
    /// Produced by the parent, as with [`View::body`].
    Owned(Box<dyn View>),
}

impl Deref for ViewRef<'_> {
    type Target = dyn View;

    fn deref(&self) -> &Self::Target {
        match self {
            Self::Borrowed(view) => *view,
            Self::Owned(view) => &**view,
        }
    }
}

impl fmt::Debug for ViewRef<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&**self, f)
    }
}

impl<'a> From<&'a dyn View> for ViewRef<'a> {
    fn from(view: &'a dyn View) -> Self {
        Self::Borrowed(view)
    }
}

/// Walks `path` down from `view` and calls `f` with the value found there.
///
/// Returns `None` if some step is out of range.
pub(crate) fn visit_path<R>(
    view: &dyn View,
    path: &[u32],
    f: impl FnOnce(&dyn View) -> R,
) -> Option<R> {
    match path.split_first() {
        None => Some(f(view)),
        Some((&index, rest)) => {
            let child = view.child(index as usize)?;
            visit_path(&*child, rest, f)
        }
    }
}

/// A view with no content and no size.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct EmptyView;

impl View for EmptyView {
    fn child_count(&self) -> usize {
        0
    }

    fn child(&self, _: usize) -> Option<ViewRef<'_>> {
        None
    }
}

/// A type-erased view.
///
/// `AnyView` itself is transparent to reconciliation: its single child is the
/// wrapped view, so swapping the wrapped type replaces only the subtree
/// below the `AnyView` context.
#[derive(Clone, Debug)]
pub struct AnyView {
    inner: BoxedView,
}

impl AnyView {
    /// Erases `view`.
    #[must_use]
    pub fn new(view: impl View) -> Self {
        Self {
            inner: Box::new(view),
        }
    }

    /// The wrapped view.
    #[must_use]
    pub fn inner(&self) -> &dyn View {
        &*self.inner
    }
}

impl From<BoxedView> for AnyView {
    fn from(inner: BoxedView) -> Self {
        Self { inner }
    }
}

impl View for AnyView {
    fn child(&self, index: usize) -> Option<ViewRef<'_>> {
        (index == 0).then(|| ViewRef::Borrowed(&*self.inner))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Color, HStack};

    #[test]
    fn visit_path_follows_children() {
        let root = HStack::new((Color::RED, AnyView::new(Color::BLUE)));
        let found = visit_path(&root, &[1, 0], |view| view.view_type_id());
        assert_eq!(found, Some(TypeId::of::<Color>()));
        assert_eq!(visit_path(&root, &[2], |_| ()), None);
        assert_eq!(visit_path(&root, &[0, 0], |_| ()), None);
    }

    #[test]
    fn boxed_views_clone_their_concrete_type() {
        let boxed: BoxedView = Box::new(Color::RED);
        let copy = boxed.clone();
        assert_eq!(copy.view_type_id(), TypeId::of::<Color>());
        assert!(copy.as_any().downcast_ref::<Color>().is_some());
    }
}
