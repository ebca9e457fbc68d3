use chrono::{Local, NaiveDateTime, Utc};

use expense_core::Clock;

/// Wall clock in the machine's local time zone.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }

    fn timestamp_millis(&self) -> i64 {
        Utc::now().timestamp_millis()
    }
}
