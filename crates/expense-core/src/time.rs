use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

/// Clock abstracts access to the current local time so aggregation stays deterministic in tests.
pub trait Clock: Send + Sync {
    /// Returns the current local wall-clock time.
    fn now(&self) -> NaiveDateTime;

    /// Returns the current local date. Defaults to `now().date()`.
    fn today(&self) -> NaiveDate {
        self.now().date()
    }

    /// Milliseconds since the Unix epoch, used to derive expense ids.
    fn timestamp_millis(&self) -> i64 {
        self.now().and_utc().timestamp_millis()
    }
}

/// Clock frozen at a single instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock {
    now: NaiveDateTime,
}

impl FixedClock {
    pub fn new(now: NaiveDateTime) -> Self {
        Self { now }
    }

    /// Midnight at the start of `date`.
    pub fn on(date: NaiveDate) -> Self {
        Self::new(date.and_time(NaiveTime::MIN))
    }
}

impl Clock for FixedClock {
    fn now(&self) -> NaiveDateTime {
        self.now
    }
}
