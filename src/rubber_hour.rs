//! # Rubber-hour mapper
//!
//! Maps real time within one solar day onto the 24 CTU hours, and back.
//!
//! ```text
//!  solar midnight          solar noon                                 next solar midnight
//!  noon_today − 12h        noon_today        noon_today + 11h          noon_tomorrow − 12h
//!  |------ 12 × 3600 s -------|------ 11 × 3600 s ------|--- 3600 s + (L − 86400) ---|
//!  00:00                    12:00                      23:00                        24:00
//! ```
//!
//! CTU hours 0 through 22 last exactly 3600 real seconds. Hour 23 (the *rubber hour*) lasts
//! `3600 + (L − 86400)` seconds where `L` is the solar day length, and is mapped linearly:
//!
//! ```text
//! civil_seconds_in_hour = elapsed_in_hour_23 / actual_hour_23_duration · 3600
//! ```
//!
//! Solar noon and solar midnight are therefore exact, and all of the day-to-day
//! nonlinearity is confined to a single documented window.
use tracing::trace;

use crate::civil_time::CivilTime;
use crate::constants::{
    Seconds, MAX_DAY_DEVIATION, NOON_SECONDS, NOON_TO_RUBBER_HOUR, RUBBER_HOUR_START,
    SECONDS_PER_DAY, SECONDS_PER_HOUR,
};
use crate::ctu_errors::CtuError;
use crate::time::Instant;

/// Smallest gap kept below 24:00 when the rubber-hour division rounds up to a full day.
const END_OF_DAY_MARGIN: Seconds = 1e-9;

/// Rubber-hour mapping with a configurable day-length sanity bound.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RubberHour {
    max_deviation: Seconds,
}

impl Default for RubberHour {
    fn default() -> Self {
        RubberHour {
            max_deviation: MAX_DAY_DEVIATION,
        }
    }
}

impl RubberHour {
    /// Build a mapper rejecting days that deviate from 86400 s by more than `max_deviation`.
    ///
    /// The bound must be finite, non-negative and below one hour, otherwise the rubber hour
    /// could collapse to zero length.
    pub fn new(max_deviation: Seconds) -> Result<Self, CtuError> {
        if !max_deviation.is_finite() || !(0.0..SECONDS_PER_HOUR).contains(&max_deviation) {
            return Err(CtuError::InvalidConfiguration(format!(
                "maximum day deviation must lie in [0, 3600) s, got {max_deviation}"
            )));
        }
        Ok(RubberHour { max_deviation })
    }

    pub fn max_deviation(&self) -> Seconds {
        self.max_deviation
    }

    /// Real duration of CTU hour 23 for a day of `day_length` seconds.
    fn rubber_hour_duration(&self, day_length: Seconds) -> Result<Seconds, CtuError> {
        let deviation = day_length - SECONDS_PER_DAY;
        if !deviation.is_finite() || deviation.abs() > self.max_deviation {
            return Err(CtuError::ImplausibleSolarDay {
                length_seconds: day_length,
                max_deviation: self.max_deviation,
            });
        }
        Ok(SECONDS_PER_HOUR + deviation)
    }

    /// Map a UTC instant onto the CTU clock.
    ///
    /// Arguments
    /// ---------
    /// * `instant`: instant to convert, within `[noon_today − 12h, noon_tomorrow − 12h)`
    /// * `noon_today`: solar noon of the day
    /// * `noon_tomorrow`: solar noon of the following day
    /// * `day_length`: real length of the solar day, `noon_tomorrow − noon_today`
    ///
    /// Return
    /// ------
    /// * the civil time, [`CtuError::ImplausibleSolarDay`] when the day length is out of
    ///   bounds, or [`CtuError::InstantOutsideSolarDay`] when the instant is not in the day
    pub fn to_civil(
        &self,
        instant: Instant,
        noon_today: Instant,
        noon_tomorrow: Instant,
        day_length: Seconds,
    ) -> Result<CivilTime, CtuError> {
        let rubber_duration = self.rubber_hour_duration(day_length)?;

        let day_start = noon_today - NOON_SECONDS;
        if instant < day_start || instant >= noon_tomorrow - NOON_SECONDS {
            return Err(CtuError::InstantOutsideSolarDay { instant, day_start });
        }

        let since_noon = instant - noon_today;
        let seconds = if since_noon < NOON_TO_RUBBER_HOUR {
            NOON_SECONDS + since_noon
        } else {
            let elapsed_in_hour = since_noon - NOON_TO_RUBBER_HOUR;
            let civil_in_hour = elapsed_in_hour / rubber_duration * SECONDS_PER_HOUR;
            trace!(
                elapsed_in_hour,
                rubber_duration,
                civil_in_hour,
                "instant in rubber hour"
            );
            (RUBBER_HOUR_START + civil_in_hour).min(SECONDS_PER_DAY - END_OF_DAY_MARGIN)
        };

        CivilTime::from_seconds_of_day(seconds)
    }

    /// Map a CTU civil time back to its UTC instant; exact inverse of
    /// [`to_civil`](RubberHour::to_civil) for the same `(noon_today, day_length)`.
    pub fn to_instant(
        &self,
        civil: CivilTime,
        noon_today: Instant,
        day_length: Seconds,
    ) -> Result<Instant, CtuError> {
        let rubber_duration = self.rubber_hour_duration(day_length)?;

        let seconds = civil.seconds_of_day();
        let since_noon = if seconds < RUBBER_HOUR_START {
            seconds - NOON_SECONDS
        } else {
            let civil_in_hour = seconds - RUBBER_HOUR_START;
            NOON_TO_RUBBER_HOUR + civil_in_hour / SECONDS_PER_HOUR * rubber_duration
        };

        Ok(noon_today + since_noon)
    }
}

/// Map a UTC instant onto the CTU clock with the default ±120 s day-length bound.
///
/// See [`RubberHour::to_civil`].
pub fn to_civil(
    instant: Instant,
    noon_today: Instant,
    noon_tomorrow: Instant,
    day_length: Seconds,
) -> Result<CivilTime, CtuError> {
    RubberHour::default().to_civil(instant, noon_today, noon_tomorrow, day_length)
}

/// Map a CTU civil time back to UTC with the default ±120 s day-length bound.
///
/// See [`RubberHour::to_instant`].
pub fn to_instant(
    civil: CivilTime,
    noon_today: Instant,
    day_length: Seconds,
) -> Result<Instant, CtuError> {
    RubberHour::default().to_instant(civil, noon_today, day_length)
}
