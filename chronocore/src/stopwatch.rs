//! Elapsed-time bookkeeping behind the stopwatch face.

use std::time::{Duration, Instant};

/// Longest duration the stopwatch tracks before it resets itself.
pub const STOPWATCH_LIMIT: Duration = Duration::from_secs(60 * 60);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopwatchState {
    Stopped,
    Running,
    Paused,
}

/// Start/stop/reset stopwatch. Time accumulates across pauses.
#[derive(Debug, Clone)]
pub struct Stopwatch {
    state: StopwatchState,
    started: Instant,
    accumulated: Duration,
}

impl Default for Stopwatch {
    fn default() -> Self {
        Self::new()
    }
}

impl Stopwatch {
    pub fn new() -> Self {
        Self {
            state: StopwatchState::Stopped,
            started: Instant::now(),
            accumulated: Duration::ZERO,
        }
    }

    /// A paused stopwatch already showing `elapsed`.
    pub fn with_elapsed(elapsed: Duration) -> Self {
        Self {
            state: StopwatchState::Paused,
            started: Instant::now(),
            accumulated: elapsed,
        }
    }

    pub fn state(&self) -> StopwatchState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == StopwatchState::Running
    }

    pub fn elapsed(&self) -> Duration {
        match self.state {
            StopwatchState::Stopped => Duration::ZERO,
            StopwatchState::Running => self.accumulated + self.started.elapsed(),
            StopwatchState::Paused => self.accumulated,
        }
    }

    /// Reset is offered only while stopped with something on the dial.
    pub fn can_reset(&self) -> bool {
        self.state == StopwatchState::Paused && self.accumulated > Duration::ZERO
    }

    pub fn start(&mut self) {
        match self.state {
            StopwatchState::Stopped => {
                self.accumulated = Duration::ZERO;
                self.started = Instant::now();
                self.state = StopwatchState::Running;
            }
            StopwatchState::Paused => {
                self.started = Instant::now();
                self.state = StopwatchState::Running;
            }
            StopwatchState::Running => {}
        }
    }

    pub fn stop(&mut self) {
        if self.state == StopwatchState::Running {
            self.accumulated += self.started.elapsed();
            self.state = StopwatchState::Paused;
        }
    }

    pub fn reset(&mut self) {
        self.state = StopwatchState::Stopped;
        self.accumulated = Duration::ZERO;
    }

    /// True once the tracked duration has reached [`STOPWATCH_LIMIT`].
    pub fn is_expired(&self) -> bool {
        self.elapsed() >= STOPWATCH_LIMIT
    }
}
