//! A single bouncing circle and its per-step physics.

use crate::geometry::{Point, Viewport};
use serde::{Deserialize, Serialize};

/// Visual diameter of a bouncer in pixels.
pub const DEFAULT_DIAMETER: f64 = 10.0;

/// Multiplier applied to velocity on each step, independent of frame period.
pub const DEFAULT_STEP_GAIN: f64 = 5.0;

/// Tunables shared by every bouncer in a field.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BounceParams {
    pub diameter: f64,
    pub step_gain: f64,
}

impl Default for BounceParams {
    fn default() -> Self {
        Self {
            diameter: DEFAULT_DIAMETER,
            step_gain: DEFAULT_STEP_GAIN,
        }
    }
}

/// Moving circle. `position` is the top-left corner of its bounding box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bouncer {
    pub position: Point,
    pub dx: f64,
    pub dy: f64,
}

impl Bouncer {
    pub fn new(x: f64, y: f64, dx: f64, dy: f64) -> Self {
        Self {
            position: Point::new(x, y),
            dx,
            dy,
        }
    }

    /// Move one step and reflect off the edges of `bounds`.
    ///
    /// The max-edge checks run before the min-edge checks and none of them
    /// are exclusive: in a viewport narrower than the diameter the bouncer
    /// is clamped to the far edge and then back to zero in the same step.
    pub fn advance(&mut self, bounds: Viewport, params: &BounceParams) {
        let d = params.diameter;
        self.position.x += self.dx * params.step_gain;
        self.position.y += self.dy * params.step_gain;

        if self.position.x >= bounds.width - d {
            self.position.x = bounds.width - d;
            self.dx = -self.dx;
        }
        if self.position.y >= bounds.height - d {
            self.position.y = bounds.height - d;
            self.dy = -self.dy;
        }
        if self.position.x <= 0.0 {
            self.position.x = 0.0;
            self.dx = -self.dx;
        }
        if self.position.y <= 0.0 {
            self.position.y = 0.0;
            self.dy = -self.dy;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const VIEW: Viewport = Viewport::new(100.0, 100.0);

    #[test]
    fn test_free_flight() {
        let mut b = Bouncer::new(50.0, 50.0, 0.2, -0.4);
        b.advance(VIEW, &BounceParams::default());
        assert!((b.position.x - 51.0).abs() < 1e-9);
        assert!((b.position.y - 48.0).abs() < 1e-9);
        assert_eq!((b.dx, b.dy), (0.2, -0.4));
    }

    #[test]
    fn test_reflects_off_left_edge() {
        let mut b = Bouncer::new(0.0, 0.0, -0.5, 0.5);
        b.advance(VIEW, &BounceParams::default());
        assert_eq!(b.position.x, 0.0);
        assert_eq!(b.dx, 0.5);
        assert!((b.position.y - 2.5).abs() < 1e-9);
        assert_eq!(b.dy, 0.5);
    }

    #[test]
    fn test_reflects_off_far_edges() {
        let mut b = Bouncer::new(88.0, 89.0, 0.8, 0.9);
        b.advance(VIEW, &BounceParams::default());
        assert_eq!(b.position, Point::new(90.0, 90.0));
        assert_eq!((b.dx, b.dy), (-0.8, -0.9));
    }

    #[test]
    fn test_narrow_viewport_min_edge_wins() {
        // 6 px wide, diameter 10: clamps to -4 then to 0, flipping twice.
        let mut b = Bouncer::new(0.0, 20.0, 0.3, 0.0);
        b.advance(Viewport::new(6.0, 100.0), &BounceParams::default());
        assert_eq!(b.position.x, 0.0);
        assert_eq!(b.dx, 0.3);
    }

    #[test]
    fn test_unmeasured_bounds_pin_to_origin() {
        let mut b = Bouncer::new(0.0, 0.0, 0.7, -0.2);
        b.advance(Viewport::UNMEASURED, &BounceParams::default());
        assert_eq!(b.position, Point::ZERO);
        assert_eq!((b.dx, b.dy), (0.7, -0.2));
    }

    proptest! {
        #[test]
        fn prop_stays_inside_bounds(
            w in 20.0f64..800.0,
            h in 20.0f64..800.0,
            fx in 0.0f64..1.0,
            fy in 0.0f64..1.0,
            dx in -1.0f64..1.0,
            dy in -1.0f64..1.0,
        ) {
            let params = BounceParams::default();
            let bounds = Viewport::new(w, h);
            let mut b = Bouncer::new(fx * (w - params.diameter), fy * (h - params.diameter), dx, dy);
            for _ in 0..50 {
                b.advance(bounds, &params);
                prop_assert!(b.position.x >= 0.0 && b.position.x <= w - params.diameter);
                prop_assert!(b.position.y >= 0.0 && b.position.y <= h - params.diameter);
            }
        }

        #[test]
        fn prop_crossing_flips_sign_once(
            fx in 0.0f64..1.0,
            dx in -1.0f64..1.0,
        ) {
            let params = BounceParams::default();
            let mut b = Bouncer::new(fx * 90.0, 45.0, dx, 0.0);
            let next_x = b.position.x + dx * params.step_gain;
            let crosses = next_x >= 90.0 || next_x <= 0.0;
            b.advance(VIEW, &params);
            if crosses {
                prop_assert_eq!(b.dx, -dx);
            } else {
                prop_assert_eq!(b.dx, dx);
            }
        }
    }
}
