// Copyright 2025 the Sapling Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Sapling Layout: the two-pass layout protocol and its built-in containers.
//!
//! A parent proposes a size to each child with [`ProposedViewSize`]; each
//! dimension may be a concrete length, unspecified (`None`, meaning "tell me
//! your ideal size") or infinite ("tell me your maximum size"). The child
//! answers with a concrete [`kurbo::Size`]. Once the parent has decided, it
//! commits by placing each child at a point and anchor.
//!
//! - [`Layout`]: the container protocol (`size_that_fits`, `place_subviews`,
//!   `spacing`, and a per-layout cache).
//! - [`Subviews`]: the index-based accessor layouts use to reach children.
//! - [`HStackLayout`] / [`VStackLayout`]: stacks that share flexible space by
//!   layout priority.
//! - [`ZStackLayout`]: overlays with a shared anchor.
//! - [`FrameLayout`], [`FlexFrameLayout`], [`PaddingLayout`]: single-content
//!   layouts.
//! - [`AnyLayout`]: a type-erased layout whose animatable data is
//!   [`sapling_animatable::AnyAnimatableData`].
//!
//! Every negotiated size is clamped to be non-negative and free of NaN.
//!
//! ## Example
//!
//! ```rust
//! use kurbo::{Point, Rect, Size};
//! use sapling_layout::{
//!     HStackLayout, Layout, ProposedViewSize, Subviews, UnitPoint, ViewDimensions, ViewSpacing,
//! };
//!
//! /// Children with a fixed size.
//! struct Boxes {
//!     sizes: Vec<Size>,
//!     placed: Vec<Point>,
//! }
//!
//! impl Subviews for Boxes {
//!     fn len(&self) -> usize { self.sizes.len() }
//!     fn size_that_fits(&mut self, index: usize, _: ProposedViewSize) -> Size { self.sizes[index] }
//!     fn dimensions(&mut self, index: usize, _: ProposedViewSize) -> ViewDimensions {
//!         ViewDimensions::new(self.sizes[index])
//!     }
//!     fn spacing(&mut self, _: usize) -> ViewSpacing { ViewSpacing::ZERO }
//!     fn priority(&mut self, _: usize) -> f64 { 0.0 }
//!     fn place(&mut self, _: usize, position: Point, _: UnitPoint, _: ProposedViewSize) {
//!         self.placed.push(position);
//!     }
//! }
//!
//! let mut boxes = Boxes {
//!     sizes: vec![Size::new(20.0, 10.0), Size::new(30.0, 20.0)],
//!     placed: Vec::new(),
//! };
//! let stack = HStackLayout::new(Default::default(), Some(5.0));
//! let mut cache = stack.make_cache(&mut boxes);
//!
//! let size = stack.size_that_fits(ProposedViewSize::UNSPECIFIED, &mut boxes, &mut cache);
//! assert_eq!(size, Size::new(55.0, 20.0));
//!
//! stack.place_subviews(Rect::from_origin_size(Point::ZERO, size), size.into(), &mut boxes, &mut cache);
//! assert_eq!(boxes.placed, vec![Point::new(0.0, 5.0), Point::new(25.0, 0.0)]);
//! ```

extern crate alloc;

mod alignment;
mod frame;
mod geometry;
mod layout;
mod spacing;
mod stack;
mod zstack;

pub use alignment::{Alignment, HorizontalAlignment, VerticalAlignment, ViewDimensions};
pub use frame::{DEFAULT_PADDING, FlexFrameLayout, FlexLength, FrameLayout, PaddingLayout};
pub use geometry::{Axis, ProposedViewSize, UnitPoint, sanitize_length, sanitize_size};
pub use layout::{AnyLayout, AnyLayoutCache, Layout, LayoutProperties, Subviews};
pub use spacing::{Edge, EdgeSet, ViewSpacing};
pub use stack::{HStackLayout, StackLayoutCache, VStackLayout};
pub use zstack::ZStackLayout;
