// Copyright 2025 the Sapling Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The drawing surface views render into.

use alloc::vec::Vec;

use kurbo::{Rect, Stroke};
use peniko::Color;

/// A 2D drawing surface supplied by the graphics backend.
///
/// Coordinates are window coordinates, the same space frames are stored in.
pub trait Canvas {
    /// Fills `rect` with a solid color.
    fn fill_rect(&mut self, rect: Rect, color: Color);

    /// Strokes the outline of `rect`.
    fn stroke_rect(&mut self, rect: Rect, stroke: &Stroke, color: Color) {
        let _ = (rect, stroke, color);
    }
}

/// A drawing operation captured by [`RecordingCanvas`].
#[derive(Clone, Debug, PartialEq)]
pub enum DrawCommand {
    /// A solid fill.
    FillRect {
        /// Filled area.
        rect: Rect,
        /// Fill color.
        color: Color,
    },
    /// An outline.
    StrokeRect {
        /// Outlined area.
        rect: Rect,
        /// Line width.
        width: f64,
        /// Line color.
        color: Color,
    },
}

/// A canvas that records every call, for headless hosts and tests.
#[derive(Clone, Debug, Default)]
pub struct RecordingCanvas {
    commands: Vec<DrawCommand>,
}

impl RecordingCanvas {
    /// Creates an empty recording.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Commands recorded so far, in order.
    #[must_use]
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Clears the recording.
    pub fn clear(&mut self) {
        self.commands.clear();
    }
}

impl Canvas for RecordingCanvas {
    fn fill_rect(&mut self, rect: Rect, color: Color) {
        self.commands.push(DrawCommand::FillRect { rect, color });
    }

    fn stroke_rect(&mut self, rect: Rect, stroke: &Stroke, color: Color) {
        self.commands.push(DrawCommand::StrokeRect {
            rect,
            width: stroke.width,
            color,
        });
    }
}
