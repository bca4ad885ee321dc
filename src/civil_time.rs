//! # CTU wall-clock values
//!
//! [`CivilTime`] is what a CTU clock shows: hour, minute and a fractional second. It is
//! normally produced by the conversion engine; [`CivilTime::new`] and the
//! [`FromStr`](std::str::FromStr) implementation exist for the presentation layer.
//!
//! Textual form is `HH:MM:SS.ffffff` (microsecond precision). Parsing also accepts `HH:MM`
//! and `HH:MM:SS` with an arbitrary number of fractional digits.
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::constants::{
    Seconds, LAST_CIVIL_SECOND, SECONDS_PER_DAY, SECONDS_PER_HOUR, SECONDS_PER_MINUTE,
};
use crate::ctu_errors::CtuError;
use crate::time::CalendarDate;

/// A CTU wall-clock time.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "RawCivilTime")]
pub struct CivilTime {
    hour: u8,
    minute: u8,
    second: f64,
}

#[derive(Deserialize)]
struct RawCivilTime {
    hour: u8,
    minute: u8,
    second: f64,
}

impl TryFrom<RawCivilTime> for CivilTime {
    type Error = CtuError;

    fn try_from(raw: RawCivilTime) -> Result<Self, Self::Error> {
        CivilTime::new(raw.hour, raw.minute, raw.second)
    }
}

impl CivilTime {
    /// Solar midnight, 00:00:00.
    pub const MIDNIGHT: CivilTime = CivilTime {
        hour: 0,
        minute: 0,
        second: 0.0,
    };

    /// Solar noon, 12:00:00.
    pub const NOON: CivilTime = CivilTime {
        hour: 12,
        minute: 0,
        second: 0.0,
    };

    /// Build a validated civil time.
    ///
    /// Arguments
    /// ---------
    /// * `hour`: `0..=23`
    /// * `minute`: `0..=59`
    /// * `second`: finite, `0 <= second < 60`
    ///
    /// Return
    /// ------
    /// * the civil time, or [`CtuError::InvalidCivilTime`]
    pub fn new(hour: u8, minute: u8, second: f64) -> Result<Self, CtuError> {
        if hour > 23 || minute > 59 || !second.is_finite() || !(0.0..60.0).contains(&second) {
            return Err(CtuError::InvalidCivilTime(format!(
                "{hour}h {minute}m {second}s is not a time of day"
            )));
        }
        Ok(CivilTime {
            hour,
            minute,
            second,
        })
    }

    /// Split a number of CTU seconds since midnight into hour, minute and second.
    ///
    /// The split is exact: [`seconds_of_day`](CivilTime::seconds_of_day) gives back the
    /// input bit for bit.
    pub fn from_seconds_of_day(seconds: Seconds) -> Result<Self, CtuError> {
        if !seconds.is_finite() || !(0.0..SECONDS_PER_DAY).contains(&seconds) {
            return Err(CtuError::InvalidCivilTime(format!(
                "{seconds} s is outside a 24 h day"
            )));
        }

        let hour = (seconds / SECONDS_PER_HOUR).floor().min(23.0);
        let in_hour = seconds - hour * SECONDS_PER_HOUR;
        let minute = (in_hour / SECONDS_PER_MINUTE).floor().min(59.0);
        let second = (in_hour - minute * SECONDS_PER_MINUTE).min(LAST_CIVIL_SECOND);

        Ok(CivilTime {
            hour: hour as u8,
            minute: minute as u8,
            second,
        })
    }

    pub fn hour(&self) -> u8 {
        self.hour
    }

    pub fn minute(&self) -> u8 {
        self.minute
    }

    pub fn second(&self) -> f64 {
        self.second
    }

    /// CTU seconds elapsed since solar midnight.
    pub fn seconds_of_day(&self) -> Seconds {
        f64::from(self.hour) * SECONDS_PER_HOUR
            + f64::from(self.minute) * SECONDS_PER_MINUTE
            + self.second
    }

    /// Whether this time lies in the rubber hour (23:00 → 24:00).
    pub fn is_rubber_hour(&self) -> bool {
        self.hour == 23
    }
}

impl fmt::Display for CivilTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Round to the microsecond without ever printing 60 seconds
        let micros = ((self.second * 1e6).round() as u32).min(59_999_999);
        write!(
            f,
            "{:02}:{:02}:{:02}.{:06}",
            self.hour,
            self.minute,
            micros / 1_000_000,
            micros % 1_000_000
        )
    }
}

impl FromStr for CivilTime {
    type Err = CtuError;

    /// Parse `HH:MM`, `HH:MM:SS` or `HH:MM:SS.fff…`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || CtuError::InvalidCivilTime(format!("unable to parse '{s}'"));

        let parts: Vec<&str> = s.trim().split(':').collect();
        if !(2..=3).contains(&parts.len()) {
            return Err(invalid());
        }
        if parts
            .iter()
            .any(|p| p.is_empty() || !p.chars().all(|c| c.is_ascii_digit() || c == '.'))
        {
            return Err(invalid());
        }

        let hour = u8::from_str(parts[0]).map_err(|_| invalid())?;
        let minute = u8::from_str(parts[1]).map_err(|_| invalid())?;
        let second = match parts.get(2) {
            Some(field) => f64::from_str(field).map_err(|_| invalid())?,
            None => 0.0,
        };

        CivilTime::new(hour, minute, second)
    }
}

/// A CTU civil time together with the label date of its solar day.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CtuDateTime {
    pub date: CalendarDate,
    pub time: CivilTime,
}

impl fmt::Display for CtuDateTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} CTU", self.date, self.time)
    }
}
