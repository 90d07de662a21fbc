use chrono::{DateTime, Datelike, Duration, NaiveDate, NaiveTime, TimeZone, Utc};

/// Clock abstracts access to the current timestamp so storage and services
/// remain deterministic in tests.
///
/// All week and day boundaries in this crate are computed in UTC; mixing
/// zones between aggregation and date lookup would drift by a day near
/// midnight.
pub trait Clock: Send + Sync {
    /// Returns the current UTC timestamp.
    fn now(&self) -> DateTime<Utc>;

    /// Returns the current UTC date. Defaults to `now().date_naive()`.
    fn today(&self) -> NaiveDate {
        self.now().date_naive()
    }
}

/// Real-time clock backed by the system UTC time source.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Clock pinned to a single instant, for tests and replay.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock {
    now: DateTime<Utc>,
}

impl FixedClock {
    pub fn new(now: DateTime<Utc>) -> Self {
        Self { now }
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.now
    }
}

/// Time-range filter applied to aggregation queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Window {
    /// From the most recent Monday 00:00 UTC through the query instant.
    CurrentWeek,
    /// No lower bound.
    AllTime,
}

impl Window {
    /// Resolves the window's inclusive lower bound against `clock`.
    pub fn start(&self, clock: &dyn Clock) -> Option<DateTime<Utc>> {
        match self {
            Window::CurrentWeek => Some(week_start(clock.today())),
            Window::AllTime => None,
        }
    }
}

/// Monday 00:00 UTC of the week containing `date`.
pub fn week_start(date: NaiveDate) -> DateTime<Utc> {
    let monday = date - Duration::days(date.weekday().num_days_from_monday() as i64);
    Utc.from_utc_datetime(&monday.and_time(NaiveTime::MIN))
}
