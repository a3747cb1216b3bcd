//! Periodic tick drivers.
//!
//! Each driver is a background thread that blocks on its [`Gate`] until
//! open, runs one tick, then sleeps for its period. Ticks never touch UI
//! state directly: they publish a [`DriverEvent`] on a channel and wake the
//! UI, which applies the event on its own thread (see [`crate::scene`]).
//!
//! The channel is bounded. When the UI stops draining (minimized window,
//! long frame) a full queue turns the tick into a missed tick instead of a
//! backlog that would be replayed in one frame.
//!
//! Pausing takes effect after the in-flight tick. Stopping is cooperative:
//! the stop flag is checked by both the sleep and the gate wait, so a
//! paused driver still exits promptly.

use crate::hands::{ClockSample, StopwatchSample};
use crate::stopwatch::Stopwatch;
use chrono::Timelike;
use std::sync::mpsc::{self, Receiver, SyncSender, TrySendError};
use std::sync::{Arc, Condvar, Mutex, MutexGuard, PoisonError};
use std::thread::{self, JoinHandle};
use std::time::Duration;

pub const CLOCK_PERIOD: Duration = Duration::from_millis(100);
pub const STOPWATCH_PERIOD: Duration = Duration::from_millis(30);
pub const BOUNCE_PERIOD: Duration = Duration::from_millis(30);

/// Events the UI may fall behind by before ticks are dropped.
pub const EVENT_QUEUE: usize = 16;

/// Called after every published event so the UI schedules a repaint.
pub type Waker = Arc<dyn Fn() + Send + Sync>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DriverKind {
    Clock,
    Stopwatch,
    Bounce,
}

impl DriverKind {
    pub fn name(&self) -> &'static str {
        match self {
            DriverKind::Clock => "clock",
            DriverKind::Stopwatch => "stopwatch",
            DriverKind::Bounce => "bounce",
        }
    }
}

/// State change published by a driver, applied by the UI thread.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DriverEvent {
    Clock(ClockSample),
    Stopwatch(StopwatchSample),
    /// The stopwatch hit its limit, was reset and its driver paused.
    StopwatchExpired,
    BounceStep,
}

/// What the driver loop does after a tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    Continue,
    /// Nobody is listening anymore.
    Stop,
}

/// The bounded channel drivers publish on.
pub fn event_channel() -> (SyncSender<DriverEvent>, Receiver<DriverEvent>) {
    mpsc::sync_channel(EVENT_QUEUE)
}

#[derive(Debug)]
struct GateState {
    open: bool,
    stopped: bool,
}

/// Pausable signal a driver waits on, plus its stop flag.
#[derive(Debug)]
pub struct Gate {
    state: Mutex<GateState>,
    signal: Condvar,
}

impl Gate {
    pub fn new(open: bool) -> Self {
        Self {
            state: Mutex::new(GateState { open, stopped: false }),
            signal: Condvar::new(),
        }
    }

    fn lock(&self) -> MutexGuard<'_, GateState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn open(&self) {
        self.lock().open = true;
        self.signal.notify_all();
    }

    pub fn close(&self) {
        self.lock().open = false;
    }

    pub fn is_open(&self) -> bool {
        self.lock().open
    }

    pub fn stop(&self) {
        self.lock().stopped = true;
        self.signal.notify_all();
    }

    /// Block until the gate is open. Returns false if stopped instead.
    pub fn wait(&self) -> bool {
        let guard = self
            .signal
            .wait_while(self.lock(), |s| !s.open && !s.stopped)
            .unwrap_or_else(PoisonError::into_inner);
        !guard.stopped
    }

    /// Sleep for `period` unless stopped first. Returns false if stopped.
    pub fn sleep(&self, period: Duration) -> bool {
        let (guard, _) = self
            .signal
            .wait_timeout_while(self.lock(), period, |s| !s.stopped)
            .unwrap_or_else(PoisonError::into_inner);
        !guard.stopped
    }
}

/// One periodic background loop.
pub struct TickDriver {
    kind: DriverKind,
    gate: Arc<Gate>,
    handle: Option<JoinHandle<()>>,
}

impl TickDriver {
    /// Spawn the loop. `tick` runs once per iteration on the driver thread
    /// and may close the gate it is given to pause itself.
    pub fn spawn<F>(kind: DriverKind, period: Duration, open: bool, mut tick: F) -> Self
    where
        F: FnMut(&Gate) -> TickOutcome + Send + 'static,
    {
        let gate = Arc::new(Gate::new(open));
        let loop_gate = Arc::clone(&gate);
        let handle = thread::spawn(move || {
            log::debug!("{} driver started ({} ms)", kind.name(), period.as_millis());
            while loop_gate.wait() {
                if tick(loop_gate.as_ref()) == TickOutcome::Stop {
                    break;
                }
                if !loop_gate.sleep(period) {
                    break;
                }
            }
            log::debug!("{} driver exited", kind.name());
        });
        Self {
            kind,
            gate,
            handle: Some(handle),
        }
    }

    pub fn pause(&self) {
        log::info!("{} paused", self.kind.name());
        self.gate.close();
    }

    pub fn resume(&self) {
        log::info!("{} resumed", self.kind.name());
        self.gate.open();
    }

    pub fn is_paused(&self) -> bool {
        !self.gate.is_open()
    }

    /// Signal the loop to exit and wait for it.
    pub fn stop(&mut self) {
        self.gate.stop();
        if let Some(handle) = self.handle.take() {
            if handle.join().is_err() {
                log::warn!("{} driver panicked", self.kind.name());
            }
        }
    }
}

impl Drop for TickDriver {
    fn drop(&mut self) {
        self.stop();
    }
}

/// Current local time as a clock sample.
pub fn sample_clock<T: Timelike>(now: &T) -> ClockSample {
    // nanosecond() exceeds 1e9 during a leap second
    let millis = (now.nanosecond() / 1_000_000).min(999);
    ClockSample::new(
        now.hour() as f64,
        now.minute() as f64,
        now.second() as f64,
        millis as f64,
    )
}

/// Result of handing one event to the UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delivery {
    Sent,
    /// Queue full; the tick is lost.
    Missed,
    Closed,
}

impl Delivery {
    fn outcome(self) -> TickOutcome {
        match self {
            Delivery::Closed => TickOutcome::Stop,
            Delivery::Sent | Delivery::Missed => TickOutcome::Continue,
        }
    }
}

/// Try to send `event` and wake the UI if it was queued. Never blocks.
pub fn publish(events: &SyncSender<DriverEvent>, wake: &Waker, event: DriverEvent) -> Delivery {
    match events.try_send(event) {
        Ok(()) => {
            wake();
            Delivery::Sent
        }
        Err(TrySendError::Full(_)) => {
            log::trace!("event queue full, dropped {event:?}");
            Delivery::Missed
        }
        Err(TrySendError::Disconnected(_)) => Delivery::Closed,
    }
}

/// One stopwatch tick: publish a sample, or once the limit is reached
/// publish the expiry, reset the stopwatch and close `gate`.
///
/// The lock is held until the gate is closed so a concurrent start cannot
/// be undone. If the expiry cannot be queued the stopwatch is left expired
/// and the next tick tries again.
pub fn stopwatch_tick(
    stopwatch: &Mutex<Stopwatch>,
    gate: &Gate,
    events: &SyncSender<DriverEvent>,
    wake: &Waker,
) -> TickOutcome {
    let mut sw = stopwatch.lock().unwrap_or_else(PoisonError::into_inner);
    if !sw.is_expired() {
        let sample = StopwatchSample::from_duration(sw.elapsed());
        return publish(events, wake, DriverEvent::Stopwatch(sample)).outcome();
    }
    let delivery = publish(events, wake, DriverEvent::StopwatchExpired);
    if delivery == Delivery::Sent {
        log::info!("stopwatch reached {} minutes, resetting", sw.elapsed().as_secs() / 60);
        sw.reset();
        gate.close();
    }
    delivery.outcome()
}

/// Tick periods of the three drivers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DriverPeriods {
    pub clock: Duration,
    pub stopwatch: Duration,
    pub bounce: Duration,
}

impl Default for DriverPeriods {
    fn default() -> Self {
        Self {
            clock: CLOCK_PERIOD,
            stopwatch: STOPWATCH_PERIOD,
            bounce: BOUNCE_PERIOD,
        }
    }
}

/// The clock, stopwatch and bounce drivers together with the stopwatch they sample.
pub struct Drivers {
    clock: TickDriver,
    stopwatch: TickDriver,
    bounce: TickDriver,
    watch: Arc<Mutex<Stopwatch>>,
}

impl Drivers {
    /// Start all three loops. Clock and bounce run immediately; the
    /// stopwatch waits for [`Drivers::start_stopwatch`].
    pub fn spawn(periods: DriverPeriods, events: SyncSender<DriverEvent>, wake: Waker) -> Self {
        Self::spawn_with(periods, events, wake, Stopwatch::new())
    }

    /// Like [`Drivers::spawn`] with a pre-loaded stopwatch.
    pub fn spawn_with(periods: DriverPeriods, events: SyncSender<DriverEvent>, wake: Waker, watch: Stopwatch) -> Self {
        let watch = Arc::new(Mutex::new(watch));

        let (tx, wk) = (events.clone(), Arc::clone(&wake));
        let clock = TickDriver::spawn(DriverKind::Clock, periods.clock, true, move |_| {
            let sample = sample_clock(&chrono::Local::now());
            publish(&tx, &wk, DriverEvent::Clock(sample)).outcome()
        });

        let (tx, wk, sw) = (events.clone(), Arc::clone(&wake), Arc::clone(&watch));
        let stopwatch = TickDriver::spawn(DriverKind::Stopwatch, periods.stopwatch, false, move |gate| {
            stopwatch_tick(&sw, gate, &tx, &wk)
        });

        let bounce = TickDriver::spawn(DriverKind::Bounce, periods.bounce, true, move |_| {
            publish(&events, &wake, DriverEvent::BounceStep).outcome()
        });

        log::info!(
            "drivers started: clock {} ms, stopwatch {} ms, bounce {} ms",
            periods.clock.as_millis(),
            periods.stopwatch.as_millis(),
            periods.bounce.as_millis()
        );
        Self {
            clock,
            stopwatch,
            bounce,
            watch,
        }
    }

    pub fn driver(&self, kind: DriverKind) -> &TickDriver {
        match kind {
            DriverKind::Clock => &self.clock,
            DriverKind::Stopwatch => &self.stopwatch,
            DriverKind::Bounce => &self.bounce,
        }
    }

    pub fn pause(&self, kind: DriverKind) {
        self.driver(kind).pause();
    }

    pub fn resume(&self, kind: DriverKind) {
        self.driver(kind).resume();
    }

    pub fn is_paused(&self, kind: DriverKind) -> bool {
        self.driver(kind).is_paused()
    }

    fn watch(&self) -> MutexGuard<'_, Stopwatch> {
        self.watch.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Gate changes happen under the stopwatch lock, as in [`stopwatch_tick`].
    pub fn start_stopwatch(&self) {
        let mut watch = self.watch();
        watch.start();
        self.stopwatch.resume();
    }

    pub fn stop_stopwatch(&self) {
        let mut watch = self.watch();
        self.stopwatch.pause();
        watch.stop();
    }

    /// Zero the stopwatch. The caller zeroes the hands.
    pub fn reset_stopwatch(&self) {
        log::info!("stopwatch reset");
        self.watch().reset();
    }

    /// Snapshot of the stopwatch the driver samples.
    pub fn stopwatch(&self) -> Stopwatch {
        self.watch().clone()
    }

    /// Stop and join all loops. Also done on drop.
    pub fn shutdown(&mut self) {
        self.clock.stop();
        self.stopwatch.stop();
        self.bounce.stop();
    }
}
