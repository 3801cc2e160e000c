//! Timestamp value object for immutable points in time.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

const MILLIS_PER_DAY: i64 = 24 * 60 * 60 * 1000;

/// Immutable point in time, always UTC.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Timestamp(DateTime<Utc>);

impl Timestamp {
    /// Creates a timestamp for the current moment.
    ///
    /// Domain operations never call this; callers sample a `Clock` and pass
    /// the value in.
    pub fn now() -> Self {
        Self(Utc::now())
    }

    /// Creates a timestamp from a DateTime<Utc>.
    pub fn from_datetime(dt: DateTime<Utc>) -> Self {
        Self(dt)
    }

    /// Returns the inner DateTime.
    pub fn as_datetime(&self) -> &DateTime<Utc> {
        &self.0
    }

    /// Checks if this timestamp is before another.
    pub fn is_before(&self, other: &Timestamp) -> bool {
        self.0 < other.0
    }

    /// Checks if this timestamp is after another.
    pub fn is_after(&self, other: &Timestamp) -> bool {
        self.0 > other.0
    }

    /// Returns the duration from another timestamp to this one.
    ///
    /// Returns negative duration if other is after self.
    pub fn duration_since(&self, other: &Timestamp) -> Duration {
        self.0.signed_duration_since(other.0)
    }

    /// Fractional number of days from `other` to `self`.
    ///
    /// Negative if `other` is after `self`.
    pub fn days_since(&self, other: &Timestamp) -> f64 {
        self.duration_since(other).num_milliseconds() as f64 / MILLIS_PER_DAY as f64
    }

    /// Whole days from `other` to `self`, rounded toward negative infinity.
    pub fn whole_days_since(&self, other: &Timestamp) -> i64 {
        self.duration_since(other)
            .num_milliseconds()
            .div_euclid(MILLIS_PER_DAY)
    }

    /// Adds a duration, or `None` if the result leaves chrono's representable range.
    pub fn checked_plus(&self, duration: Duration) -> Option<Self> {
        self.0.checked_add_signed(duration).map(Self)
    }

    /// Adds a duration, saturating at the ends of the representable range.
    pub fn plus(&self, duration: Duration) -> Self {
        self.checked_plus(duration).unwrap_or(if duration < Duration::zero() {
            Self(DateTime::<Utc>::MIN_UTC)
        } else {
            Self(DateTime::<Utc>::MAX_UTC)
        })
    }

    /// Creates a new timestamp by adding the specified number of days.
    ///
    /// Negative values subtract days.
    pub fn add_days(&self, days: i64) -> Self {
        self.plus(Duration::days(days))
    }

    /// Creates a new timestamp by adding the specified number of hours.
    pub fn add_hours(&self, hours: i64) -> Self {
        self.plus(Duration::hours(hours))
    }

    /// Creates a new timestamp by subtracting the specified number of days.
    pub fn minus_days(&self, days: i64) -> Self {
        self.plus(-Duration::days(days))
    }

    /// Creates a timestamp from Unix seconds.
    ///
    /// Returns `None` if the value is outside chrono's representable range.
    pub fn from_unix_secs(secs: i64) -> Option<Self> {
        DateTime::from_timestamp(secs, 0).map(Self)
    }

    /// Returns the timestamp as Unix seconds.
    pub fn as_unix_secs(&self) -> i64 {
        self.0.timestamp()
    }
}

impl From<DateTime<Utc>> for Timestamp {
    fn from(dt: DateTime<Utc>) -> Self {
        Self(dt)
    }
}

impl std::fmt::Display for Timestamp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.to_rfc3339())
    }
}
