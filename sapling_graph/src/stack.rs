// Copyright 2025 the Sapling Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Container views and their content.

use alloc::boxed::Box;
use alloc::vec::Vec;
use core::fmt;

use sapling_layout::{
    Alignment, HStackLayout, HorizontalAlignment, Layout, VStackLayout, VerticalAlignment,
    ZStackLayout,
};

use crate::behavior::{ViewBehavior, layout_behavior};
use crate::{View, ViewRef};

/// An ordered, fixed-shape list of child views.
///
/// Implemented for tuples of up to eight views and for `Vec<V>`. A tuple
/// always has the same length, so its children keep their contexts across
/// updates; a `Vec` may grow, mounting new contexts at the tail, or shrink,
/// tearing the tail down.
pub trait ViewSequence: Clone + fmt::Debug + 'static {
    /// Number of views.
    fn len(&self) -> usize;

    /// Returns `true` if the sequence is empty.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// View `index`.
    fn get(&self, index: usize) -> Option<&dyn View>;
}

impl ViewSequence for () {
    fn len(&self) -> usize {
        0
    }

    fn get(&self, _: usize) -> Option<&dyn View> {
        None
    }
}

macro_rules! impl_tuple_sequence {
    ($len:literal; $($name:ident $index:tt),+) => {
        impl<$($name: View + Clone),+> ViewSequence for ($($name,)+) {
            fn len(&self) -> usize {
                $len
            }

            fn get(&self, index: usize) -> Option<&dyn View> {
                match index {
                    $($index => Some(&self.$index as &dyn View),)+
                    _ => None,
                }
            }
        }
    };
}

impl_tuple_sequence!(1; A 0);
impl_tuple_sequence!(2; A 0, B 1);
impl_tuple_sequence!(3; A 0, B 1, C 2);
impl_tuple_sequence!(4; A 0, B 1, C 2, D 3);
impl_tuple_sequence!(5; A 0, B 1, C 2, D 3, E 4);
impl_tuple_sequence!(6; A 0, B 1, C 2, D 3, E 4, F 5);
impl_tuple_sequence!(7; A 0, B 1, C 2, D 3, E 4, F 5, G 6);
impl_tuple_sequence!(8; A 0, B 1, C 2, D 3, E 4, F 5, G 6, H 7);

impl<V: View + Clone> ViewSequence for Vec<V> {
    fn len(&self) -> usize {
        Vec::len(self)
    }

    fn get(&self, index: usize) -> Option<&dyn View> {
        self.as_slice().get(index).map(|view| view as &dyn View)
    }
}

/// A container arranging `content` with `layout`.
///
/// [`HStack`], [`VStack`] and [`ZStack`] are aliases with convenient
/// constructors. With [`AnyLayout`](sapling_layout::AnyLayout) the
/// arrangement can change between updates while every child keeps its
/// context.
#[derive(Clone, Debug)]
pub struct LayoutView<L, C> {
    /// How children are arranged.
    pub layout: L,
    /// The children.
    pub content: C,
}

impl<L, C> LayoutView<L, C> {
    /// Arranges `content` with `layout`.
    #[must_use]
    pub const fn with_layout(layout: L, content: C) -> Self {
        Self { layout, content }
    }
}

impl<L, C> View for LayoutView<L, C>
where
    L: Layout + Clone + fmt::Debug + 'static,
    C: ViewSequence,
{
    fn child_count(&self) -> usize {
        self.content.len()
    }

    fn child(&self, index: usize) -> Option<ViewRef<'_>> {
        self.content.get(index).map(ViewRef::Borrowed)
    }

    fn make_behavior(&self) -> Box<dyn ViewBehavior> {
        layout_behavior(&self.layout)
    }

    fn configuration(&self) -> Option<&dyn core::any::Any> {
        Some(&self.layout)
    }
}

/// Children side by side.
pub type HStack<C> = LayoutView<HStackLayout, C>;

/// Children top to bottom.
pub type VStack<C> = LayoutView<VStackLayout, C>;

/// Children on top of each other.
pub type ZStack<C> = LayoutView<ZStackLayout, C>;

impl<C> LayoutView<HStackLayout, C> {
    /// A center-aligned horizontal stack with negotiated spacing.
    #[must_use]
    pub fn new(content: C) -> Self {
        Self::with_layout(HStackLayout::default(), content)
    }

    /// Sets the vertical alignment of the children.
    #[must_use]
    pub fn alignment(mut self, alignment: VerticalAlignment) -> Self {
        self.layout.alignment = alignment;
        self
    }

    /// Sets a fixed spacing between the children.
    #[must_use]
    pub fn spacing(mut self, spacing: f64) -> Self {
        self.layout.spacing = Some(spacing);
        self
    }
}

impl<C> LayoutView<VStackLayout, C> {
    /// A center-aligned vertical stack with negotiated spacing.
    #[must_use]
    pub fn new(content: C) -> Self {
        Self::with_layout(VStackLayout::default(), content)
    }

    /// Sets the horizontal alignment of the children.
    #[must_use]
    pub fn alignment(mut self, alignment: HorizontalAlignment) -> Self {
        self.layout.alignment = alignment;
        self
    }

    /// Sets a fixed spacing between the children.
    #[must_use]
    pub fn spacing(mut self, spacing: f64) -> Self {
        self.layout.spacing = Some(spacing);
        self
    }
}

impl<C> LayoutView<ZStackLayout, C> {
    /// A centered overlay.
    #[must_use]
    pub fn new(content: C) -> Self {
        Self::with_layout(ZStackLayout::default(), content)
    }

    /// Sets the anchor shared by the children.
    #[must_use]
    pub fn alignment(mut self, alignment: Alignment) -> Self {
        self.layout.alignment = alignment;
        self
    }
}

/// One of two views, chosen by the caller.
///
/// The conditional keeps its own context; switching branches is a type
/// change at its child path, so the shown branch is torn down and the other
/// mounted.
#[derive(Clone, Debug)]
pub enum Conditional<A, B> {
    /// The first branch.
    First(A),
    /// The second branch.
    Second(B),
}

impl<A: View + Clone, B: View + Clone> View for Conditional<A, B> {
    fn child(&self, index: usize) -> Option<ViewRef<'_>> {
        if index != 0 {
            return None;
        }
        Some(match self {
            Self::First(view) => ViewRef::Borrowed(view),
            Self::Second(view) => ViewRef::Borrowed(view),
        })
    }
}

impl<V: View + Clone> View for Option<V> {
    fn child_count(&self) -> usize {
        usize::from(self.is_some())
    }

    fn child(&self, index: usize) -> Option<ViewRef<'_>> {
        self.as_ref()
            .filter(|_| index == 0)
            .map(|view| ViewRef::Borrowed(view))
    }
}
