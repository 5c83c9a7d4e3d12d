//! Fixed-rate tick scheduling.
//!
//! The [`Clock`] keeps the timestamps of the tick loop and decides when the next tick is due.
//! It never spawns anything: its owner drives it with [`Clock::poll`] or [`Clock::wait`], so
//! every tick runs on the owner's thread and one tick is always finished before the next one
//! is considered.

use std::{
    fmt,
    time::{Duration, Instant},
};

use serde::{Deserialize, Deserializer, Serialize};

use crate::error::{PortalError, Result};

pub const DEFAULT_TICK_RATE: u32 = 20;
pub const MIN_TICK_RATE: u32 = 1;
pub const MAX_TICK_RATE: u32 = 1000;

/// A tick rate in ticks per second, always within `1..=1000`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct TickRate(u32);

impl TickRate {
    pub const DEFAULT: Self = Self(DEFAULT_TICK_RATE);

    /// Creates a tick rate, rejecting anything outside of `1..=1000`.
    pub fn new(value: i64) -> Result<Self> {
        if (MIN_TICK_RATE as i64..=MAX_TICK_RATE as i64).contains(&value) {
            Ok(Self(value as u32))
        } else {
            Err(PortalError::InvalidRate { value })
        }
    }

    /// Turns any number into a usable tick rate. Non-finite values fall back to the default,
    /// everything else is rounded and clamped into `1..=1000`.
    pub fn coerce(value: f64) -> Self {
        if !value.is_finite() {
            return Self::DEFAULT;
        }
        Self(value.round().clamp(MIN_TICK_RATE as f64, MAX_TICK_RATE as f64) as u32)
    }

    /// Reads a tick rate out of a loosely typed JSON value. Anything that is not a number
    /// falls back to the default.
    pub fn from_json(value: &serde_json::Value) -> Self {
        value.as_f64().map_or(Self::DEFAULT, Self::coerce)
    }

    /// Returns the rate in ticks per second.
    #[inline]
    pub fn get(self) -> u32 {
        self.0
    }

    /// Returns the time between two ticks, `1000 / rate` milliseconds.
    #[inline]
    pub fn period(self) -> Duration {
        Duration::from_nanos(1_000_000_000 / self.0 as u64)
    }
}

impl Default for TickRate {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl fmt::Display for TickRate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<f64> for TickRate {
    fn from(value: f64) -> Self {
        Self::coerce(value)
    }
}

impl From<i64> for TickRate {
    fn from(value: i64) -> Self {
        Self(value.clamp(MIN_TICK_RATE as i64, MAX_TICK_RATE as i64) as u32)
    }
}

impl From<i32> for TickRate {
    fn from(value: i32) -> Self {
        Self::from(value as i64)
    }
}

impl From<u32> for TickRate {
    fn from(value: u32) -> Self {
        Self(value.clamp(MIN_TICK_RATE, MAX_TICK_RATE))
    }
}

impl<'de> Deserialize<'de> for TickRate {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = serde_json::Value::deserialize(deserializer)?;
        Ok(Self::from_json(&value))
    }
}

/// Where a [`Clock`] reads the time from.
pub trait TimeSource {
    /// Returns the current instant.
    fn now(&self) -> Instant;

    /// Blocks until `deadline` has been reached.
    fn sleep_until(&self, deadline: Instant) {
        let now = self.now();
        if deadline > now {
            std::thread::sleep(deadline - now);
        }
    }
}

/// The monotonic system clock.
#[derive(Clone, Copy, Debug, Default)]
pub struct RealTime;

impl TimeSource for RealTime {
    #[inline]
    fn now(&self) -> Instant {
        Instant::now()
    }
}

/// What a single firing of the [`Clock`] observed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Tick {
    /// Time since the clock was started.
    pub delta: Duration,
    /// Time since the previous firing.
    pub interval: Duration,
    /// Number of firings since the clock was started, this one included.
    pub index: u64,
}

/// The single periodic registration of a clock.
#[derive(Clone, Copy, Debug)]
struct Trigger {
    period: Duration,
    deadline: Instant,
}

impl Trigger {
    fn new(period: Duration, now: Instant) -> Self {
        Self {
            period,
            deadline: now + period,
        }
    }

    fn is_due(&self, now: Instant) -> bool {
        now >= self.deadline
    }

    /// Moves the deadline one period ahead. Firings that were missed entirely are dropped
    /// instead of being replayed back to back.
    fn rearm(&mut self, now: Instant) {
        self.deadline += self.period;
        if self.deadline <= now {
            self.deadline = now + self.period;
        }
    }
}

/// Keeps the timestamps of the tick loop and fires a callback at a fixed rate.
///
/// Note that [`Clock::delta`] is the time since [`Clock::start`] and keeps growing; the time
/// between two firings is [`Clock::interval`].
pub struct Clock<T: TimeSource = RealTime> {
    source: T,
    origin: Instant,
    previous: Instant,
    current: Instant,
    delta: Duration,
    rate: TickRate,
    callback: Box<dyn FnMut()>,
    trigger: Option<Trigger>,
    ticks: u64,
}

impl Clock<RealTime> {
    /// Creates a stopped clock reading the system time.
    pub fn new() -> Self {
        Self::with_source(RealTime)
    }
}

impl Default for Clock<RealTime> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: TimeSource> Clock<T> {
    /// Creates a stopped clock reading the time from `source`.
    pub fn with_source(source: T) -> Self {
        let now = source.now();
        Self {
            source,
            origin: now,
            previous: now,
            current: now,
            delta: Duration::ZERO,
            rate: TickRate::DEFAULT,
            callback: Box::new(|| {}),
            trigger: None,
            ticks: 0,
        }
    }

    /// Starts (or restarts) the clock. All timestamps are reset to now and `callback` is
    /// called on every firing from then on.
    pub fn start(&mut self, rate: impl Into<TickRate>, callback: impl FnMut() + 'static) {
        let now = self.source.now();
        self.origin = now;
        self.previous = now;
        self.current = now;
        self.delta = Duration::ZERO;
        self.ticks = 0;
        self.callback = Box::new(callback);
        self.rate = rate.into();
        self.trigger = Some(Trigger::new(self.rate.period(), now));

        log::debug!("Clock started at {} ticks/s", self.rate);
    }

    /// Stops the clock. The timestamps are left as they are.
    pub fn stop(&mut self) {
        if self.trigger.take().is_some() {
            log::debug!("Clock stopped after {} ticks", self.ticks);
        }
    }

    /// Changes the tick rate. A running clock is rescheduled at the new period right away,
    /// without touching its timestamps.
    pub fn set_rate(&mut self, rate: impl Into<TickRate>) {
        self.rate = rate.into();
        if let Some(trigger) = &mut self.trigger {
            *trigger = Trigger::new(self.rate.period(), self.source.now());
            log::debug!("Clock rescheduled at {} ticks/s", self.rate);
        }
    }

    /// Like [`Clock::set_rate`], but rejects rates outside of `1..=1000` instead of clamping.
    pub fn try_set_rate(&mut self, value: i64) -> Result<()> {
        let rate = TickRate::new(value)?;
        self.set_rate(rate);
        Ok(())
    }

    /// Fires the clock if its next deadline has passed.
    pub fn poll(&mut self) -> Option<Tick> {
        let now = self.source.now();
        let trigger = self.trigger.as_mut()?;
        if !trigger.is_due(now) {
            return None;
        }
        trigger.rearm(now);
        Some(self.fire(now))
    }

    /// Sleeps until the next deadline and fires. Returns `None` if the clock is stopped.
    pub fn wait(&mut self) -> Option<Tick> {
        loop {
            let deadline = self.next_deadline()?;
            self.source.sleep_until(deadline);
            if let Some(tick) = self.poll() {
                return Some(tick);
            }
        }
    }

    fn fire(&mut self, now: Instant) -> Tick {
        self.previous = self.current;
        self.current = now;
        self.delta = self.current.duration_since(self.origin);
        self.ticks += 1;

        log::trace!("Tick {} at {:?}", self.ticks, self.delta);
        (self.callback)();

        Tick {
            delta: self.delta,
            interval: self.interval(),
            index: self.ticks,
        }
    }

    /// Returns when the clock fires next, or `None` if it is stopped.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.trigger.map(|trigger| trigger.deadline)
    }

    /// Returns whether the clock currently has a trigger registered.
    pub fn is_running(&self) -> bool {
        self.trigger.is_some()
    }

    /// The time the clock was started at.
    pub fn origin(&self) -> Instant {
        self.origin
    }

    /// The time of the previous firing.
    pub fn previous(&self) -> Instant {
        self.previous
    }

    /// The time of the latest firing.
    pub fn current(&self) -> Instant {
        self.current
    }

    /// The time between the latest firing and the start of the clock.
    pub fn delta(&self) -> Duration {
        self.delta
    }

    /// The time between the two latest firings.
    pub fn interval(&self) -> Duration {
        self.current.duration_since(self.previous)
    }

    pub fn rate(&self) -> TickRate {
        self.rate
    }

    pub fn period(&self) -> Duration {
        self.rate.period()
    }

    /// Number of firings since the clock was last started.
    pub fn ticks(&self) -> u64 {
        self.ticks
    }
}
