//! Viewport geometry shared by every panel.
//!
//! A panel reports its size on each render pass; everything that draws
//! derives its pixel positions from the [`FaceFrame`] resolved here.

/// Font size used in place of zero when a panel has not been measured yet.
/// Text layout rejects a size of exactly zero.
pub const MIN_FONT_SIZE: f64 = 0.00001;

/// A point in panel-local pixel coordinates (y grows downward).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const ZERO: Point = Point { x: 0.0, y: 0.0 };

    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Point on the circle of `radius` around `self` at `degrees`,
    /// measured clockwise from the positive x axis.
    pub fn polar(self, radius: f64, degrees: f64) -> Point {
        let rad = degrees.to_radians();
        Point::new(self.x + radius * rad.cos(), self.y + radius * rad.sin())
    }

    /// Rotate `self` clockwise about `pivot` by `degrees`.
    pub fn rotated_about(self, pivot: Point, degrees: f64) -> Point {
        let (sin, cos) = degrees.to_radians().sin_cos();
        let dx = self.x - pivot.x;
        let dy = self.y - pivot.y;
        Point::new(pivot.x + dx * cos - dy * sin, pivot.y + dx * sin + dy * cos)
    }
}

/// Last observed size of a panel. `0 x 0` until the first render pass.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Viewport {
    pub const UNMEASURED: Viewport = Viewport { width: 0.0, height: 0.0 };

    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// True once the panel has reported a non-degenerate size.
    pub fn is_measured(&self) -> bool {
        self.width > 0.0 && self.height > 0.0
    }

    /// Center and uniform scale for drawing a round face in this viewport.
    pub fn resolve(&self) -> FaceFrame {
        FaceFrame {
            center: Point::new(self.width / 2.0, self.height / 2.0),
            scale: self.width.min(self.height) / 2.0,
        }
    }
}

/// Resolved center and scale of a viewport. Recomputed every pass, never cached.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct FaceFrame {
    pub center: Point,
    /// Half of the shorter viewport side.
    pub scale: f64,
}

impl FaceFrame {
    /// `fraction` of the scale, e.g. `frame.len(0.95)` for the outer ring.
    pub fn len(&self, fraction: f64) -> f64 {
        self.scale * fraction
    }

    /// Label font size, clamped away from zero for unmeasured panels.
    pub fn label_font_size(&self) -> f64 {
        if self.scale > 0.0 {
            self.scale * 0.18
        } else {
            MIN_FONT_SIZE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_resolve_square() {
        let frame = Viewport::new(200.0, 200.0).resolve();
        assert_eq!(frame.center, Point::new(100.0, 100.0));
        assert_eq!(frame.scale, 100.0);
    }

    #[test]
    fn test_resolve_uses_shorter_side() {
        let wide = Viewport::new(400.0, 100.0).resolve();
        assert_eq!(wide.center, Point::new(200.0, 50.0));
        assert_eq!(wide.scale, 50.0);

        let tall = Viewport::new(60.0, 300.0).resolve();
        assert_eq!(tall.scale, 30.0);
    }

    #[test]
    fn test_unmeasured_viewport_does_not_panic() {
        let frame = Viewport::UNMEASURED.resolve();
        assert_eq!(frame.scale, 0.0);
        assert_eq!(frame.label_font_size(), MIN_FONT_SIZE);
        assert!(!Viewport::UNMEASURED.is_measured());
        assert!(!Viewport::new(10.0, 0.0).is_measured());
    }

    #[test]
    fn test_label_font_size_scales() {
        let frame = Viewport::new(100.0, 100.0).resolve();
        assert!(close(frame.label_font_size(), 9.0));
    }

    #[test]
    fn test_rotation_is_clockwise_on_screen() {
        let pivot = Point::new(10.0, 10.0);
        let up = Point::new(10.0, 0.0);
        let right = up.rotated_about(pivot, 90.0);
        assert!(close(right.x, 20.0));
        assert!(close(right.y, 10.0));
    }

    #[test]
    fn test_polar_zero_degrees_points_right() {
        let p = Point::new(5.0, 5.0).polar(2.0, 0.0);
        assert!(close(p.x, 7.0));
        assert!(close(p.y, 5.0));
        let down = Point::ZERO.polar(1.0, 90.0);
        assert!(close(down.y, 1.0));
    }
}
