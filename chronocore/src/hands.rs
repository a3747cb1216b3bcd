//! Hand angles for the two kinds of timepiece.
//!
//! Angles are degrees clockwise from twelve o'clock. They are always derived
//! from the last time sample; there is no way to set one directly.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// What drives the hands. Fixed for the lifetime of a model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimepieceKind {
    /// Wall-clock time.
    Clock,
    /// Elapsed time since the stopwatch was started.
    Stopwatch,
}

/// Whether hands sweep smoothly or jump on whole units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Granularity {
    Continuous,
    Discrete,
}

impl Granularity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Granularity::Continuous => "continuous",
            Granularity::Discrete => "discrete",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Granularity::Continuous => Granularity::Discrete,
            Granularity::Discrete => Granularity::Continuous,
        }
    }
}

impl fmt::Display for Granularity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Granularity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "continuous" | "soft" | "sweep" => Ok(Granularity::Continuous),
            "discrete" | "hard" | "tick" => Ok(Granularity::Discrete),
            other => Err(format!("unknown granularity '{other}' (expected continuous or discrete)")),
        }
    }
}

/// Wall-clock sample. Fields are whole units from the local time.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ClockSample {
    pub hour: f64,
    pub minute: f64,
    pub second: f64,
    pub millisecond: f64,
}

impl ClockSample {
    pub fn new(hour: f64, minute: f64, second: f64, millisecond: f64) -> Self {
        Self {
            hour,
            minute,
            second,
            millisecond,
        }
    }
}

/// Elapsed stopwatch time expressed twice: as total minutes and total seconds.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct StopwatchSample {
    pub minutes: f64,
    pub seconds: f64,
}

impl StopwatchSample {
    pub const ZERO: StopwatchSample = StopwatchSample {
        minutes: 0.0,
        seconds: 0.0,
    };

    pub fn new(minutes: f64, seconds: f64) -> Self {
        Self { minutes, seconds }
    }

    pub fn from_duration(elapsed: std::time::Duration) -> Self {
        let seconds = elapsed.as_secs_f64();
        Self {
            minutes: seconds / 60.0,
            seconds,
        }
    }
}

/// Angles of the three hands, in degrees.
///
/// On a clock `big` is the hour hand, `small` the minute hand and `tiny`
/// the second hand. On a stopwatch they show minutes, seconds and a
/// sub-second sweep.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct HandAngles {
    pub big: f64,
    pub small: f64,
    pub tiny: f64,
}

impl HandAngles {
    pub const ZERO: HandAngles = HandAngles {
        big: 0.0,
        small: 0.0,
        tiny: 0.0,
    };

    /// Clock angles. Left unnormalized: the hour hand passes 360 after noon.
    pub fn for_clock(sample: ClockSample, granularity: Granularity) -> Self {
        let carry = |finer: f64, per: f64| match granularity {
            Granularity::Continuous => finer / per,
            Granularity::Discrete => 0.0,
        };
        Self {
            tiny: (sample.second + carry(sample.millisecond, 1000.0)) * 6.0,
            small: (sample.minute + carry(sample.second, 60.0)) * 6.0,
            big: (sample.hour + carry(sample.minute, 60.0)) * 30.0,
        }
    }

    /// Stopwatch angles. The sweep hand ignores granularity.
    pub fn for_stopwatch(sample: StopwatchSample, granularity: Granularity) -> Self {
        let whole = |v: f64| match granularity {
            Granularity::Continuous => v,
            Granularity::Discrete => v.trunc(),
        };
        Self {
            big: whole(sample.minutes) * 6.0 % 360.0,
            small: whole(sample.seconds) * 6.0 % 360.0,
            tiny: sample.seconds * 360.0 % 360.0,
        }
    }
}

/// Hand state of one timepiece.
#[derive(Debug, Clone)]
pub struct HandModel {
    kind: TimepieceKind,
    granularity: Granularity,
    angles: HandAngles,
}

impl HandModel {
    pub fn new(kind: TimepieceKind, granularity: Granularity) -> Self {
        Self {
            kind,
            granularity,
            angles: HandAngles::ZERO,
        }
    }

    pub fn kind(&self) -> TimepieceKind {
        self.kind
    }

    pub fn granularity(&self) -> Granularity {
        self.granularity
    }

    pub fn angles(&self) -> HandAngles {
        self.angles
    }

    /// Takes effect on the next tick.
    pub fn set_granularity(&mut self, granularity: Granularity) {
        self.granularity = granularity;
    }

    /// Returns false and leaves the hands alone if this is not a clock.
    pub fn tick_clock(&mut self, sample: ClockSample) -> bool {
        if self.kind != TimepieceKind::Clock {
            return false;
        }
        self.angles = HandAngles::for_clock(sample, self.granularity);
        true
    }

    /// Returns false and leaves the hands alone if this is not a stopwatch.
    pub fn tick_stopwatch(&mut self, sample: StopwatchSample) -> bool {
        if self.kind != TimepieceKind::Stopwatch {
            return false;
        }
        self.angles = HandAngles::for_stopwatch(sample, self.granularity);
        true
    }
}
