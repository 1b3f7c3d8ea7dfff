// Copyright 2025 the Sapling Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Cubic Bézier timing curves.

use kurbo::Point;

/// A timing curve through `(0, 0)` and `(1, 1)` with two control points.
///
/// The horizontal axis is normalized time and the vertical axis is eased
/// progress. Solving for the parameter at a given time uses a few Newton
/// iterations and falls back to bisection when the derivative is too flat.
///
/// ```
/// use sapling_animatable::UnitCurve;
///
/// let curve = UnitCurve::EASE_IN_OUT;
/// assert_eq!(curve.value(0.0), 0.0);
/// assert_eq!(curve.value(1.0), 1.0);
/// assert!((curve.value(0.5) - 0.5).abs() < 1e-6);
/// assert!(curve.value(0.25) < 0.25);
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct UnitCurve {
    ax: f64,
    bx: f64,
    cx: f64,
    ay: f64,
    by: f64,
    cy: f64,
}

const NEWTON_ITERATIONS: usize = 8;
const SOLVE_EPSILON: f64 = 1e-7;

impl UnitCurve {
    /// Constant rate.
    pub const LINEAR: Self = Self::bezier_const(0.0, 0.0, 1.0, 1.0);
    /// Starts slowly.
    pub const EASE_IN: Self = Self::bezier_const(0.42, 0.0, 1.0, 1.0);
    /// Ends slowly.
    pub const EASE_OUT: Self = Self::bezier_const(0.0, 0.0, 0.58, 1.0);
    /// Starts and ends slowly.
    pub const EASE_IN_OUT: Self = Self::bezier_const(0.42, 0.0, 0.58, 1.0);

    /// Builds a curve from its two control points.
    ///
    /// The horizontal coordinates are clamped to `0..=1` so the curve stays a
    /// function of time.
    #[must_use]
    pub fn bezier(start_control: Point, end_control: Point) -> Self {
        Self::bezier_const(
            start_control.x.clamp(0.0, 1.0),
            start_control.y,
            end_control.x.clamp(0.0, 1.0),
            end_control.y,
        )
    }

    const fn bezier_const(x1: f64, y1: f64, x2: f64, y2: f64) -> Self {
        let cx = 3.0 * x1;
        let bx = 3.0 * (x2 - x1) - cx;
        let ax = 1.0 - cx - bx;
        let cy = 3.0 * y1;
        let by = 3.0 * (y2 - y1) - cy;
        let ay = 1.0 - cy - by;
        Self {
            ax,
            bx,
            cx,
            ay,
            by,
            cy,
        }
    }

    /// Eased progress at normalized time `progress`, clamped to `0..=1`.
    #[must_use]
    pub fn value(&self, progress: f64) -> f64 {
        let t = self.solve_parameter(progress.clamp(0.0, 1.0));
        self.sample_y(t)
    }

    /// Rate of change of the eased progress with respect to time.
    #[must_use]
    pub fn velocity(&self, progress: f64) -> f64 {
        let t = self.solve_parameter(progress.clamp(0.0, 1.0));
        let dx = self.sample_dx(t);
        if dx.abs() < SOLVE_EPSILON {
            return 0.0;
        }
        self.sample_dy(t) / dx
    }

    fn sample_x(&self, t: f64) -> f64 {
        ((self.ax * t + self.bx) * t + self.cx) * t
    }

    fn sample_y(&self, t: f64) -> f64 {
        ((self.ay * t + self.by) * t + self.cy) * t
    }

    fn sample_dx(&self, t: f64) -> f64 {
        (3.0 * self.ax * t + 2.0 * self.bx) * t + self.cx
    }

    fn sample_dy(&self, t: f64) -> f64 {
        (3.0 * self.ay * t + 2.0 * self.by) * t + self.cy
    }

    fn solve_parameter(&self, x: f64) -> f64 {
        let mut t = x;
        for _ in 0..NEWTON_ITERATIONS {
            let err = self.sample_x(t) - x;
            if err.abs() < SOLVE_EPSILON {
                return t;
            }
            let d = self.sample_dx(t);
            if d.abs() < 1e-6 {
                break;
            }
            t -= err / d;
        }

        let (mut lo, mut hi) = (0.0, 1.0);
        t = x;
        while lo < hi {
            let sx = self.sample_x(t);
            if (sx - x).abs() < SOLVE_EPSILON {
                return t;
            }
            if x > sx {
                lo = t;
            } else {
                hi = t;
            }
            let next = (hi - lo) * 0.5 + lo;
            if next == t {
                break;
            }
            t = next;
        }
        t
    }
}

impl Default for UnitCurve {
    fn default() -> Self {
        Self::EASE_IN_OUT
    }
}
