// Copyright 2025 the Sapling Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use crate::PrimitiveGestureTypes;

/// Timing thresholds and dispatch policy shared by every recognizer in a window.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GestureConfig {
    /// Longest gap, in seconds, between the release of one tap and the press of the next.
    pub maximum_tap_interval: f64,
    /// Longest time, in seconds, a single tap may be held.
    pub maximum_tap_duration: f64,
    /// The button primitive recognizers respond to.
    pub button: u8,
    /// Primitives the dispatcher lets recognizers claim at all.
    pub allowed_types: PrimitiveGestureTypes,
    /// Whether recognizers narrow the types available to later recognizers.
    pub type_filtering: bool,
}

impl GestureConfig {
    /// Default gap between taps of a multi-tap gesture.
    pub const DEFAULT_TAP_INTERVAL: f64 = 0.5;
    /// Default hold limit for a tap.
    pub const DEFAULT_TAP_DURATION: f64 = 1.0;
}

impl Default for GestureConfig {
    fn default() -> Self {
        Self {
            maximum_tap_interval: Self::DEFAULT_TAP_INTERVAL,
            maximum_tap_duration: Self::DEFAULT_TAP_DURATION,
            button: crate::PRIMARY_BUTTON,
            allowed_types: PrimitiveGestureTypes::ALL,
            type_filtering: true,
        }
    }
}
