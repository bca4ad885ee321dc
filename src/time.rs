//! # UTC instants and calendar dates
//!
//! [`Instant`] is an absolute UTC point in time backed by a [`hifitime::Epoch`]. Differences
//! between instants are computed on hifitime's integer [`hifitime::Duration`], so adding a
//! number of seconds to an instant and subtracting it back is exact at the nanosecond level.
//!
//! [`CalendarDate`] is a UTC Gregorian date. It labels solar days: the CTU day named
//! `2025-04-10` is the one whose solar noon is computed on that UTC date.
use std::fmt;
use std::ops::{Add, Sub};

use hifitime::{Duration, Epoch, Unit};
use serde::{Deserialize, Serialize};

use crate::constants::{Seconds, SECONDS_PER_DAY};
use crate::ctu_errors::CtuError;

/// An absolute point in time on the UTC time scale.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct Instant(Epoch);

impl Instant {
    /// Build an instant from a Gregorian UTC date-time.
    ///
    /// Argument
    /// --------
    /// * `year`, `month`, `day`, `hour`, `minute`, `second`: calendar fields in UTC
    /// * `nanos`: sub-second part in nanoseconds
    ///
    /// Return
    /// ------
    /// * the instant, or [`CtuError::InvalidCalendarDate`] if the fields do not name a valid
    ///   date-time (24:00 included)
    pub fn from_gregorian_utc(
        year: i32,
        month: u8,
        day: u8,
        hour: u8,
        minute: u8,
        second: u8,
        nanos: u32,
    ) -> Result<Self, CtuError> {
        // hifitime rolls 24:00 over to the next day
        if hour > 23 || minute > 59 {
            return Err(CtuError::InvalidCalendarDate(format!(
                "{year:04}-{month:02}-{day:02}T{hour:02}:{minute:02}:{second:02}: time of day out of range"
            )));
        }
        Epoch::maybe_from_gregorian_utc(year, month, day, hour, minute, second, nanos)
            .map(Instant)
            .map_err(|err| {
                CtuError::InvalidCalendarDate(format!(
                    "{year:04}-{month:02}-{day:02}T{hour:02}:{minute:02}:{second:02}: {err}"
                ))
            })
    }

    /// Build an instant from a number of seconds since 1970-01-01T00:00:00 UTC.
    pub fn from_unix_seconds(seconds: f64) -> Self {
        Instant(Epoch::from_unix_seconds(seconds))
    }

    /// Read the system clock.
    pub fn now() -> Result<Self, CtuError> {
        Epoch::now()
            .map(Instant)
            .map_err(|err| CtuError::Clock(err.to_string()))
    }

    pub fn epoch(&self) -> Epoch {
        self.0
    }

    pub fn to_unix_seconds(&self) -> f64 {
        self.0.to_unix_seconds()
    }

    /// Gregorian UTC fields `(year, month, day, hour, minute, second, nanos)`.
    pub fn to_gregorian_utc(&self) -> (i32, u8, u8, u8, u8, u8, u32) {
        self.0.to_gregorian_utc()
    }

    /// UTC calendar date on which this instant falls.
    pub fn utc_date(&self) -> CalendarDate {
        let (year, month, day, ..) = self.0.to_gregorian_utc();
        CalendarDate { year, month, day }
    }

    /// Signed number of seconds from `earlier` to `self`.
    pub fn seconds_since(&self, earlier: Instant) -> Seconds {
        (self.0 - earlier.0).to_seconds()
    }
}

impl From<Epoch> for Instant {
    fn from(epoch: Epoch) -> Self {
        Instant(epoch)
    }
}

impl fmt::Display for Instant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Add<Duration> for Instant {
    type Output = Instant;

    fn add(self, rhs: Duration) -> Self::Output {
        Instant(self.0 + rhs)
    }
}

impl Sub<Duration> for Instant {
    type Output = Instant;

    fn sub(self, rhs: Duration) -> Self::Output {
        Instant(self.0 - rhs)
    }
}

impl Add<Seconds> for Instant {
    type Output = Instant;

    fn add(self, rhs: Seconds) -> Self::Output {
        Instant(self.0 + Unit::Second * rhs)
    }
}

impl Sub<Seconds> for Instant {
    type Output = Instant;

    fn sub(self, rhs: Seconds) -> Self::Output {
        Instant(self.0 - Unit::Second * rhs)
    }
}

impl Sub<Instant> for Instant {
    type Output = Seconds;

    fn sub(self, rhs: Instant) -> Self::Output {
        self.seconds_since(rhs)
    }
}

/// A Gregorian date on the UTC calendar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "RawCalendarDate")]
pub struct CalendarDate {
    year: i32,
    month: u8,
    day: u8,
}

#[derive(Deserialize)]
struct RawCalendarDate {
    year: i32,
    month: u8,
    day: u8,
}

impl TryFrom<RawCalendarDate> for CalendarDate {
    type Error = CtuError;

    fn try_from(raw: RawCalendarDate) -> Result<Self, Self::Error> {
        CalendarDate::new(raw.year, raw.month, raw.day)
    }
}

impl CalendarDate {
    /// Build a validated calendar date.
    ///
    /// Argument
    /// --------
    /// * `year`: Gregorian year
    /// * `month`: month in `1..=12`
    /// * `day`: day of month in `1..=31`, checked against the month length
    ///
    /// Return
    /// ------
    /// * the date, or [`CtuError::InvalidCalendarDate`]
    pub fn new(year: i32, month: u8, day: u8) -> Result<Self, CtuError> {
        Epoch::maybe_from_gregorian_utc(year, month, day, 0, 0, 0, 0)
            .map(|_| CalendarDate { year, month, day })
            .map_err(|err| {
                CtuError::InvalidCalendarDate(format!("{year:04}-{month:02}-{day:02}: {err}"))
            })
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u8 {
        self.month
    }

    pub fn day(&self) -> u8 {
        self.day
    }

    /// 00:00:00 UTC on this date.
    pub fn midnight(&self) -> Instant {
        Instant(Epoch::from_gregorian_utc_at_midnight(
            self.year, self.month, self.day,
        ))
    }

    /// 12:00:00 UTC on this date.
    pub fn noon(&self) -> Instant {
        Instant(Epoch::from_gregorian_utc_at_noon(
            self.year, self.month, self.day,
        ))
    }

    /// 1-based ordinal of this date within its year (1 for January 1st).
    pub fn day_of_year(&self) -> u16 {
        let new_year = Epoch::from_gregorian_utc_at_midnight(self.year, 1, 1);
        let elapsed = (self.midnight().0 - new_year).to_seconds();
        // Leap seconds shift the difference by whole seconds only
        (elapsed / SECONDS_PER_DAY).round() as u16 + 1
    }

    /// The following calendar date.
    pub fn succ(&self) -> CalendarDate {
        // Aim for the middle of the next day so leap seconds cannot land on a boundary
        (self.midnight() + Unit::Hour * 36).utc_date()
    }

    /// The preceding calendar date.
    pub fn pred(&self) -> CalendarDate {
        (self.midnight() - Unit::Hour * 12).utc_date()
    }
}

impl fmt::Display for CalendarDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}-{:02}", self.year, self.month, self.day)
    }
}
