//! Wall-clock facilities for the elapsed-time counter.
//!
//! Provides the [`DurationReading`] value, its `D days HH:MM:SS` formatting,
//! and the [`Clock`] abstraction the timer reads "now" from.
//!
//! # Example
//!
//! ```ignore
//! use heartfield::time::{format_time, parse_reference, elapsed_seconds, SystemClock, Clock};
//!
//! let reference = parse_reference("2023-10-27T00:00:00Z")?;
//! let secs = elapsed_seconds(reference, SystemClock.now());
//! println!("{}", format_time(secs));
//! ```

use crate::error::TimerError;
use chrono::{DateTime, Duration as ChronoDuration, Utc};
use std::fmt;
use std::sync::Mutex;

const SECONDS_PER_MINUTE: u64 = 60;
const SECONDS_PER_HOUR: u64 = 3600;
const SECONDS_PER_DAY: u64 = 86_400;

/// A duration broken into display fields.
///
/// Derived from a whole, non-negative number of seconds and never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct DurationReading {
    pub days: u64,
    pub hours: u8,
    pub minutes: u8,
    pub seconds: u8,
}

impl DurationReading {
    /// Split `total_seconds` into days, hours, minutes and seconds.
    pub fn from_seconds(total_seconds: u64) -> Self {
        Self {
            days: total_seconds / SECONDS_PER_DAY,
            hours: ((total_seconds % SECONDS_PER_DAY) / SECONDS_PER_HOUR) as u8,
            minutes: ((total_seconds % SECONDS_PER_HOUR) / SECONDS_PER_MINUTE) as u8,
            seconds: (total_seconds % SECONDS_PER_MINUTE) as u8,
        }
    }

    /// Reading between `reference` and `now`, zero if `now` is earlier.
    pub fn between(reference: DateTime<Utc>, now: DateTime<Utc>) -> Self {
        Self::from_seconds(elapsed_seconds(reference, now))
    }

    /// Total seconds represented by this reading.
    pub fn total_seconds(&self) -> u64 {
        self.days * SECONDS_PER_DAY
            + self.hours as u64 * SECONDS_PER_HOUR
            + self.minutes as u64 * SECONDS_PER_MINUTE
            + self.seconds as u64
    }

    #[inline]
    pub fn is_zero(&self) -> bool {
        *self == Self::default()
    }
}

impl fmt::Display for DurationReading {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} days {:02}:{:02}:{:02}",
            self.days, self.hours, self.minutes, self.seconds
        )
    }
}

/// Format a whole number of seconds as `"<days> days <HH>:<MM>:<SS>"`.
pub fn format_time(total_seconds: u64) -> String {
    DurationReading::from_seconds(total_seconds).to_string()
}

/// Whole seconds from `reference` to `now`, floored and clamped at zero.
pub fn elapsed_seconds(reference: DateTime<Utc>, now: DateTime<Utc>) -> u64 {
    let millis = (now - reference).num_milliseconds();
    if millis <= 0 {
        0
    } else {
        (millis / 1000) as u64
    }
}

/// Parse an RFC 3339 / ISO-8601 timestamp into UTC.
pub fn parse_reference(input: &str) -> Result<DateTime<Utc>, TimerError> {
    DateTime::parse_from_rfc3339(input)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|source| TimerError::InvalidReference {
            input: input.to_string(),
            source,
        })
}

/// Source of the current wall-clock time.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// The system clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// A clock that only moves when told to.
///
/// Useful for deterministic tests and replays.
#[derive(Debug)]
pub struct ManualClock {
    now: Mutex<DateTime<Utc>>,
}

impl ManualClock {
    pub fn new(start: DateTime<Utc>) -> Self {
        Self {
            now: Mutex::new(start),
        }
    }

    /// Jump to an absolute instant.
    pub fn set(&self, instant: DateTime<Utc>) {
        *self.lock() = instant;
    }

    /// Move forward by `by`.
    pub fn advance(&self, by: std::time::Duration) {
        let by = ChronoDuration::from_std(by).unwrap_or(ChronoDuration::zero());
        let mut now = self.lock();
        *now = *now + by;
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, DateTime<Utc>> {
        // A poisoned lock still holds a valid timestamp
        self.now.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        *self.lock()
    }
}
