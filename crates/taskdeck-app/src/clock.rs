//! Time source abstraction so "today" can be pinned in tests.

use std::cell::Cell;
use std::rc::Rc;

use time::{Date, Duration, OffsetDateTime};

/// Provides the current time.
pub trait Clock {
    /// Current instant.
    fn now(&self) -> OffsetDateTime;

    /// Current calendar day in the clock's offset.
    fn today(&self) -> Date {
        self.now().date()
    }
}

/// Wall clock in the local offset, falling back to UTC when the offset
/// cannot be determined.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> OffsetDateTime {
        OffsetDateTime::now_local().unwrap_or_else(|_| OffsetDateTime::now_utc())
    }
}

/// Manually driven clock.
#[derive(Debug, Clone)]
pub struct FixedClock {
    now: Cell<OffsetDateTime>,
}

impl FixedClock {
    /// Clock frozen at `now`.
    #[must_use]
    pub const fn new(now: OffsetDateTime) -> Self {
        Self { now: Cell::new(now) }
    }

    /// Jump to `now`.
    pub fn set(&self, now: OffsetDateTime) {
        self.now.set(now);
    }

    /// Move forward by `step`.
    pub fn advance(&self, step: Duration) {
        self.now.set(self.now.get() + step);
    }
}

impl Clock for FixedClock {
    fn now(&self) -> OffsetDateTime {
        self.now.get()
    }
}

impl<C: Clock + ?Sized> Clock for &C {
    fn now(&self) -> OffsetDateTime {
        (**self).now()
    }
}

impl<C: Clock + ?Sized> Clock for Rc<C> {
    fn now(&self) -> OffsetDateTime {
        (**self).now()
    }
}
