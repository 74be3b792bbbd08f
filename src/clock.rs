use std::fmt::Debug;

use chrono::{DateTime, Duration, Local, NaiveDate, NaiveDateTime, TimeZone};
use parking_lot::Mutex;

/// Source of "now". "Today" is always the local calendar date.
pub trait Clock: Send + Sync + Debug {
    fn now(&self) -> DateTime<Local>;

    fn today(&self) -> NaiveDate {
        self.now().date_naive()
    }

    fn local_now(&self) -> NaiveDateTime {
        self.now().naive_local()
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Local> {
        Local::now()
    }
}

/// Clock that only moves when told to.
#[derive(Debug)]
pub struct ManualClock {
    now: Mutex<DateTime<Local>>,
}

impl ManualClock {
    #[must_use]
    pub fn new(now: DateTime<Local>) -> Self {
        Self {
            now: Mutex::new(now),
        }
    }

    /// Wall-clock time in the local zone; falls back to reading it as UTC in a DST gap.
    #[must_use]
    pub fn at_local(time: NaiveDateTime) -> Self {
        let now = Local
            .from_local_datetime(&time)
            .earliest()
            .unwrap_or_else(|| Local.from_utc_datetime(&time));
        Self::new(now)
    }

    pub fn advance(&self, by: Duration) {
        let mut now = self.now.lock();
        *now += by;
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Local> {
        *self.now.lock()
    }
}
