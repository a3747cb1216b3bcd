//! The set of bouncers living in one panel.

use crate::bouncer::{BounceParams, Bouncer};
use crate::geometry::{Point, Viewport};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Ordered bouncers plus the last bounds the panel reported.
///
/// Insertion order is draw order. Bouncers never interact and are never
/// removed.
pub struct BounceField {
    bouncers: Vec<Bouncer>,
    bounds: Viewport,
    params: BounceParams,
    rng: StdRng,
}

impl BounceField {
    /// A field holding one bouncer at the origin, bounds not yet measured.
    pub fn new(params: BounceParams) -> Self {
        Self::with_rng(params, StdRng::from_entropy())
    }

    /// Same as [`BounceField::new`] with a reproducible velocity sequence.
    pub fn with_seed(params: BounceParams, seed: u64) -> Self {
        Self::with_rng(params, StdRng::seed_from_u64(seed))
    }

    fn with_rng(params: BounceParams, rng: StdRng) -> Self {
        let mut field = Self {
            bouncers: Vec::new(),
            bounds: Viewport::UNMEASURED,
            params,
            rng,
        };
        field.spawn(0.0, 0.0);
        field
    }

    /// Add a bouncer at `(x, y)` with each velocity component drawn from [-1, 1).
    pub fn spawn(&mut self, x: f64, y: f64) -> &Bouncer {
        let dx = self.rng.gen_range(-1.0..1.0);
        let dy = self.rng.gen_range(-1.0..1.0);
        self.spawn_with_velocity(x, y, dx, dy)
    }

    pub fn spawn_with_velocity(&mut self, x: f64, y: f64, dx: f64, dy: f64) -> &Bouncer {
        log::debug!("spawn bouncer #{} at ({x:.1}, {y:.1}) v=({dx:.3}, {dy:.3})", self.bouncers.len());
        self.bouncers.push(Bouncer::new(x, y, dx, dy));
        &self.bouncers[self.bouncers.len() - 1]
    }

    /// Pointer pressed inside the panel at panel-local `point`.
    pub fn handle_pointer_down(&mut self, point: Point) {
        self.spawn(point.x, point.y);
    }

    /// One physics step for every bouncer against the last observed bounds.
    pub fn advance(&mut self) {
        let bounds = self.bounds;
        let params = self.params;
        for bouncer in &mut self.bouncers {
            bouncer.advance(bounds, &params);
        }
    }

    /// Record the panel size. Called on every render pass.
    pub fn observe_bounds(&mut self, bounds: Viewport) {
        self.bounds = bounds;
    }

    pub fn bounds(&self) -> Viewport {
        self.bounds
    }

    pub fn params(&self) -> &BounceParams {
        &self.params
    }

    pub fn bouncers(&self) -> &[Bouncer] {
        &self.bouncers
    }

    pub fn len(&self) -> usize {
        self.bouncers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bouncers.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_starts_with_one_bouncer_at_origin() {
        let field = BounceField::with_seed(BounceParams::default(), 1);
        assert_eq!(field.len(), 1);
        assert_eq!(field.bouncers()[0].position, Point::ZERO);
        assert!(!field.bounds().is_measured());
    }

    #[test]
    fn test_spawn_velocity_range() {
        let mut field = BounceField::with_seed(BounceParams::default(), 7);
        for i in 0..200 {
            field.spawn(i as f64, i as f64);
        }
        for b in field.bouncers() {
            assert!((-1.0..1.0).contains(&b.dx));
            assert!((-1.0..1.0).contains(&b.dy));
        }
    }

    #[test]
    fn test_pointer_down_appends_in_order() {
        let mut field = BounceField::with_seed(BounceParams::default(), 3);
        field.handle_pointer_down(Point::new(12.0, 34.0));
        field.handle_pointer_down(Point::new(56.0, 78.0));
        let positions: Vec<Point> = field.bouncers().iter().map(|b| b.position).collect();
        assert_eq!(
            positions,
            vec![Point::ZERO, Point::new(12.0, 34.0), Point::new(56.0, 78.0)]
        );
    }

    #[test]
    fn test_advance_before_first_measure_does_not_panic() {
        let mut field = BounceField::with_seed(BounceParams::default(), 9);
        field.advance();
        field.advance();
        assert_eq!(field.bouncers()[0].position, Point::ZERO);
    }

    #[test]
    fn test_advance_uses_observed_bounds() {
        let mut field = BounceField::with_seed(BounceParams::default(), 5);
        field.spawn_with_velocity(0.0, 0.0, -0.5, 0.5);
        field.observe_bounds(Viewport::new(100.0, 100.0));
        field.advance();
        let b = field.bouncers()[1];
        assert_eq!(b.position.x, 0.0);
        assert_eq!(b.dx, 0.5);
        assert!((b.position.y - 2.5).abs() < 1e-9);
    }

    proptest! {
        #[test]
        fn prop_field_step_matches_individual_steps(
            seeds in proptest::collection::vec((0.0f64..90.0, 0.0f64..90.0, -1.0f64..1.0, -1.0f64..1.0), 1..20)
        ) {
            let params = BounceParams::default();
            let bounds = Viewport::new(100.0, 100.0);
            let mut field = BounceField::with_seed(params, 0);
            let mut expected = vec![field.bouncers()[0]];
            for &(x, y, dx, dy) in &seeds {
                field.spawn_with_velocity(x, y, dx, dy);
                expected.push(Bouncer::new(x, y, dx, dy));
            }
            field.observe_bounds(bounds);
            field.advance();
            for (i, b) in expected.iter_mut().enumerate().rev() {
                b.advance(bounds, &params);
                prop_assert_eq!(field.bouncers()[i], *b);
            }
        }
    }
}
