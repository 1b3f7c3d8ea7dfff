// Copyright 2025 the Sapling Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use core::time::Duration;

use sapling_gesture::{GestureConfig, PrimitiveGestureTypes};

/// Frame pacing and input policy of a [`Host`](crate::Host).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HostConfig {
    /// Time between frames while the window is active.
    pub active_frame_interval: Duration,
    /// Time between frames while the window is in the background.
    pub inactive_frame_interval: Duration,
    /// Settings shared by every gesture recognizer in the window.
    pub gestures: GestureConfig,
}

impl HostConfig {
    /// 60 frames per second.
    pub const DEFAULT_ACTIVE_FRAME_INTERVAL: Duration = Duration::from_nanos(16_666_667);
    /// 30 frames per second.
    pub const DEFAULT_INACTIVE_FRAME_INTERVAL: Duration = Duration::from_nanos(33_333_333);

    /// Sets both frame intervals.
    #[must_use]
    pub const fn with_frame_intervals(mut self, active: Duration, inactive: Duration) -> Self {
        self.active_frame_interval = active;
        self.inactive_frame_interval = inactive;
        self
    }

    /// Restricts the primitives gestures may claim.
    #[must_use]
    pub const fn with_allowed_gestures(mut self, types: PrimitiveGestureTypes) -> Self {
        self.gestures.allowed_types = types;
        self
    }

    /// Turns type filtering between competing gestures on or off.
    #[must_use]
    pub const fn with_gesture_filtering(mut self, enabled: bool) -> Self {
        self.gestures.type_filtering = enabled;
        self
    }
}

impl Default for HostConfig {
    fn default() -> Self {
        Self {
            active_frame_interval: Self::DEFAULT_ACTIVE_FRAME_INTERVAL,
            inactive_frame_interval: Self::DEFAULT_INACTIVE_FRAME_INTERVAL,
            gestures: GestureConfig::default(),
        }
    }
}
