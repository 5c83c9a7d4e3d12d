//! Helpers shared by the unit tests.

use std::{
    cell::Cell,
    rc::Rc,
    time::{Duration, Instant},
};

use crate::time::TimeSource;

/// A time source that only moves when told to. Clones share the same time.
#[derive(Clone)]
pub struct ManualTime {
    base: Instant,
    offset: Rc<Cell<Duration>>,
}

impl ManualTime {
    pub fn new() -> Self {
        Self {
            base: Instant::now(),
            offset: Rc::new(Cell::new(Duration::ZERO)),
        }
    }

    pub fn advance(&self, by: Duration) {
        self.offset.set(self.offset.get() + by);
    }

    pub fn elapsed(&self) -> Duration {
        self.offset.get()
    }
}

impl TimeSource for ManualTime {
    fn now(&self) -> Instant {
        self.base + self.offset.get()
    }

    fn sleep_until(&self, deadline: Instant) {
        if deadline > self.now() {
            self.offset.set(deadline - self.base);
        }
    }
}
