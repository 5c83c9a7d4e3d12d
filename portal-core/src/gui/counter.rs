//! A component that counts the ticks and draws it receives.

use std::{any::Any, cell::Cell, time::Duration};

use crate::display::Display;

use super::Component;

/// A component that counts the ticks and draws it receives, optionally logging the count.
pub struct TickCounter {
    id: String,
    ticks: u64,
    draws: Cell<u64>,
    last_delta: Duration,
    report_every: Option<u64>,
}

impl TickCounter {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ticks: 0,
            draws: Cell::new(0),
            last_delta: Duration::ZERO,
            report_every: None,
        }
    }

    /// Logs the tick count every `ticks` ticks.
    pub fn with_report_every(mut self, ticks: u64) -> Self {
        self.report_every = Some(ticks);
        self
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn draws(&self) -> u64 {
        self.draws.get()
    }

    /// The delta passed to the latest tick.
    pub fn last_delta(&self) -> Duration {
        self.last_delta
    }
}

impl Component for TickCounter {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }

    fn id(&self) -> &str {
        &self.id
    }

    fn tick(&mut self, delta: Duration) {
        self.ticks += 1;
        self.last_delta = delta;

        if let Some(every) = self.report_every
            && every > 0
            && self.ticks % every == 0
        {
            log::info!(
                "{}: {} ticks in {:.2}s",
                self.id,
                self.ticks,
                delta.as_secs_f32()
            );
        }
    }

    fn draw(&self, _display: &mut dyn Display) {
        self.draws.set(self.draws.get() + 1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::display::HeadlessDisplay;

    #[test]
    fn test_counts_ticks_and_draws() {
        let mut counter = TickCounter::new("ticks").with_report_every(2);
        let mut display = HeadlessDisplay::new(10, 10, "test");

        counter.tick(Duration::from_millis(50));
        counter.tick(Duration::from_millis(100));
        counter.draw(&mut display);

        assert_eq!(counter.ticks(), 2);
        assert_eq!(counter.draws(), 1);
        assert_eq!(counter.last_delta(), Duration::from_millis(100));
        assert!(display.calls().is_empty());
    }
}
