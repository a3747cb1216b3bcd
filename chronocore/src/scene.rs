//! Everything the window draws, owned by the UI thread.
//!
//! Drivers publish [`DriverEvent`]s; the scene is their only consumer and
//! the only writer of bouncer positions and hand angles.

use crate::config::DemoConfig;
use crate::driver::DriverEvent;
use crate::field::BounceField;
use crate::geometry::{Point, Viewport};
use crate::hands::{ClockSample, Granularity, StopwatchSample, TimepieceKind};
use crate::timepiece::Timepiece;

pub struct Scene {
    pub clock: Timepiece,
    pub stopwatch: Timepiece,
    pub field: BounceField,
}

impl Scene {
    pub fn new(config: &DemoConfig) -> Self {
        Self::with_field(config, BounceField::new(config.bounce.params))
    }

    pub fn with_field(config: &DemoConfig, field: BounceField) -> Self {
        Self {
            clock: Timepiece::new(TimepieceKind::Clock, config.clock.granularity, config.clock.colors),
            stopwatch: Timepiece::new(TimepieceKind::Stopwatch, config.stopwatch.granularity, config.stopwatch.colors),
            field,
        }
    }

    /// Apply one driver event. Returns true if anything visible changed.
    pub fn apply(&mut self, event: DriverEvent) -> bool {
        match event {
            DriverEvent::Clock(sample) => self.tick_clock(sample),
            DriverEvent::Stopwatch(sample) => self.tick_stopwatch(sample),
            DriverEvent::StopwatchExpired => {
                self.reset_stopwatch();
                true
            }
            DriverEvent::BounceStep => {
                self.advance_bounce_field();
                true
            }
        }
    }

    /// Apply everything queued since the last frame, coalesced: only the
    /// newest clock and stopwatch samples count, and the field advances at
    /// most one step however many were queued. Returns the number of events
    /// consumed.
    pub fn apply_batch<I>(&mut self, events: I) -> usize
    where
        I: IntoIterator<Item = DriverEvent>,
    {
        let mut clock = None;
        let mut stopwatch = None;
        let mut bounce = false;
        let mut count = 0;
        for event in events {
            count += 1;
            match event {
                DriverEvent::Clock(sample) => clock = Some(sample),
                DriverEvent::Stopwatch(sample) => stopwatch = Some(sample),
                DriverEvent::StopwatchExpired => {
                    log::info!("stopwatch expired after one hour");
                    stopwatch = None;
                    self.apply(event);
                }
                DriverEvent::BounceStep => bounce = true,
            }
        }
        let latest = [clock.map(DriverEvent::Clock), stopwatch.map(DriverEvent::Stopwatch)];
        for event in latest.into_iter().flatten() {
            self.apply(event);
        }
        if bounce {
            self.apply(DriverEvent::BounceStep);
        }
        count
    }

    pub fn spawn_bouncer(&mut self, x: f64, y: f64) {
        self.field.handle_pointer_down(Point::new(x, y));
    }

    pub fn advance_bounce_field(&mut self) {
        self.field.advance();
    }

    pub fn set_granularity(&mut self, kind: TimepieceKind, granularity: Granularity) {
        self.timepiece_mut(kind).set_granularity(granularity);
    }

    pub fn tick_clock(&mut self, sample: ClockSample) -> bool {
        self.clock.tick_clock(sample)
    }

    pub fn tick_stopwatch(&mut self, sample: StopwatchSample) -> bool {
        self.stopwatch.tick_stopwatch(sample)
    }

    /// Zero the stopwatch hands.
    pub fn reset_stopwatch(&mut self) {
        self.stopwatch.tick_stopwatch(StopwatchSample::ZERO);
    }

    pub fn timepiece(&self, kind: TimepieceKind) -> &Timepiece {
        match kind {
            TimepieceKind::Clock => &self.clock,
            TimepieceKind::Stopwatch => &self.stopwatch,
        }
    }

    pub fn timepiece_mut(&mut self, kind: TimepieceKind) -> &mut Timepiece {
        match kind {
            TimepieceKind::Clock => &mut self.clock,
            TimepieceKind::Stopwatch => &mut self.stopwatch,
        }
    }

    /// Panel resize notifications.
    pub fn observe_clock_viewport(&mut self, viewport: Viewport) {
        self.clock.observe_viewport(viewport);
    }

    pub fn observe_stopwatch_viewport(&mut self, viewport: Viewport) {
        self.stopwatch.observe_viewport(viewport);
    }

    pub fn observe_field_viewport(&mut self, viewport: Viewport) {
        self.field.observe_bounds(viewport);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hands::HandAngles;

    fn scene() -> Scene {
        let config = DemoConfig::default();
        let field = BounceField::with_seed(config.bounce.params, 11);
        Scene::with_field(&config, field)
    }

    #[test]
    fn test_defaults_match_reference_demo() {
        let s = scene();
        assert_eq!(s.clock.granularity(), Granularity::Continuous);
        assert_eq!(s.stopwatch.granularity(), Granularity::Discrete);
        assert_eq!(s.field.len(), 1);
    }

    #[test]
    fn test_clock_event_moves_only_clock() {
        let mut s = scene();
        assert!(s.apply(DriverEvent::Clock(ClockSample::new(1.0, 0.0, 0.0, 0.0))));
        assert_eq!(s.clock.angles().big, 30.0);
        assert_eq!(s.stopwatch.angles(), HandAngles::ZERO);
    }

    #[test]
    fn test_expiry_zeroes_stopwatch_hands() {
        let mut s = scene();
        s.apply(DriverEvent::Stopwatch(StopwatchSample::new(59.9, 3594.0)));
        assert_ne!(s.stopwatch.angles(), HandAngles::ZERO);
        s.apply(DriverEvent::StopwatchExpired);
        assert_eq!(s.stopwatch.angles(), HandAngles::ZERO);
    }

    #[test]
    fn test_bounce_step_and_spawn() {
        let mut s = scene();
        s.observe_field_viewport(Viewport::new(100.0, 100.0));
        s.spawn_bouncer(40.0, 40.0);
        assert_eq!(s.field.len(), 2);
        let before = s.field.bouncers()[1];
        s.apply(DriverEvent::BounceStep);
        let after = s.field.bouncers()[1];
        assert!((after.position.x - (before.position.x + before.dx * 5.0)).abs() < 1e-9);
    }

    #[test]
    fn test_backlog_advances_field_once() {
        let mut s = scene();
        s.observe_field_viewport(Viewport::new(1000.0, 1000.0));
        s.field.spawn_with_velocity(100.0, 100.0, 1.0, 0.0);
        let backlog = std::iter::repeat(DriverEvent::BounceStep).take(50);
        assert_eq!(s.apply_batch(backlog), 50);
        assert_eq!(s.field.bouncers()[1].position, Point::new(105.0, 100.0));
    }

    #[test]
    fn test_backlog_keeps_newest_samples() {
        let mut s = scene();
        let events = [
            DriverEvent::Clock(ClockSample::new(1.0, 0.0, 0.0, 0.0)),
            DriverEvent::Stopwatch(StopwatchSample::new(1.0, 60.0)),
            DriverEvent::Clock(ClockSample::new(2.0, 0.0, 0.0, 0.0)),
            DriverEvent::Stopwatch(StopwatchSample::new(2.0, 120.0)),
        ];
        assert_eq!(s.apply_batch(events), 4);
        assert_eq!(s.clock.angles().big, 60.0);
        assert_eq!(s.stopwatch.angles().big, 12.0);
    }

    #[test]
    fn test_backlog_expiry_discards_earlier_stopwatch_samples() {
        let mut s = scene();
        let events = [
            DriverEvent::Stopwatch(StopwatchSample::new(59.0, 3540.0)),
            DriverEvent::StopwatchExpired,
        ];
        s.apply_batch(events);
        assert_eq!(s.stopwatch.angles(), HandAngles::ZERO);
    }

    #[test]
    fn test_set_granularity_by_kind() {
        let mut s = scene();
        s.set_granularity(TimepieceKind::Stopwatch, Granularity::Continuous);
        assert_eq!(s.timepiece(TimepieceKind::Stopwatch).granularity(), Granularity::Continuous);
        assert_eq!(s.timepiece(TimepieceKind::Clock).granularity(), Granularity::Continuous);
    }
}
