//! # Day length estimator and solar days
//!
//! A solar day is the span between two consecutive solar noons. Its length drifts by a few
//! tens of seconds around 86400 s over the year; that drift is what the CTU rubber hour
//! absorbs.
//!
//! [`SolarDay`] gathers everything the rubber-hour mapper needs about one CTU day: the label
//! date, the noon of that date and its neighbours, and the day length. The CTU day labelled
//! `d` runs from `noon(d) − 12 h` (solar midnight, CTU 00:00) to `noon(d + 1) − 12 h`.
use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::constants::{
    Seconds, NOON_SECONDS, NOON_TO_RUBBER_HOUR, SECONDS_PER_DAY, SECONDS_PER_HOUR,
};
use crate::ctu_errors::CtuError;
use crate::geo::GeoReference;
use crate::solar_noon::{AstronomicalNoon, NoonSource};
use crate::time::{CalendarDate, Instant};

/// Length of the solar day between two consecutive noons.
///
/// Arguments
/// ---------
/// * `noon_today`: solar noon of the day
/// * `noon_tomorrow`: solar noon of the following day
///
/// Return
/// ------
/// * `noon_tomorrow − noon_today` in seconds, or [`CtuError::NonMonotonicSolarDay`] when the
///   second noon is not strictly after the first one
pub fn day_length(noon_today: Instant, noon_tomorrow: Instant) -> Result<Seconds, CtuError> {
    if noon_tomorrow <= noon_today {
        return Err(CtuError::NonMonotonicSolarDay {
            today: noon_today,
            tomorrow: noon_tomorrow,
        });
    }
    Ok(noon_tomorrow - noon_today)
}

/// Deviation of the solar day starting on the UTC date of `date_context` from 86400 s.
///
/// This is the amount of real time added to (positive) or removed from (negative) the
/// rubber hour of that day.
pub fn midnight_adjustment<G>(date_context: Instant, geo: G) -> Result<Seconds, CtuError>
where
    G: TryInto<GeoReference>,
    CtuError: From<G::Error>,
{
    let geo: GeoReference = geo.try_into()?;
    let day = SolarDay::for_date(&AstronomicalNoon, date_context.utc_date(), geo)?;
    Ok(day.midnight_adjustment())
}

/// One CTU day, derived on demand from its label date and reference meridian.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SolarDay {
    date: CalendarDate,
    geo: GeoReference,
    prev_noon: Instant,
    noon: Instant,
    next_noon: Instant,
    length_seconds: Seconds,
}

impl SolarDay {
    /// Build the CTU day labelled `date`.
    ///
    /// Arguments
    /// ---------
    /// * `source`: solar noon provider
    /// * `date`: UTC label date of the day
    /// * `geo`: reference meridian
    ///
    /// Return
    /// ------
    /// * the solar day, or [`CtuError::NonMonotonicSolarDay`] if the noon sequence around
    ///   `date` is not strictly increasing
    pub fn for_date<S: NoonSource + ?Sized>(
        source: &S,
        date: CalendarDate,
        geo: GeoReference,
    ) -> Result<Self, CtuError> {
        let prev_noon = source.solar_noon(date.pred(), geo);
        let noon = source.solar_noon(date, geo);
        let next_noon = source.solar_noon(date.succ(), geo);

        day_length(prev_noon, noon)?;
        let length_seconds = day_length(noon, next_noon)?;

        Ok(SolarDay {
            date,
            geo,
            prev_noon,
            noon,
            next_noon,
            length_seconds,
        })
    }

    /// Find the CTU day whose `[midnight_start, midnight_end)` span contains `instant`.
    ///
    /// The search starts from the UTC date of the instant. Since solar noon never strays more
    /// than half a day from 12:00 UTC, at most one step to a neighbouring date is needed;
    /// failing to settle within a few steps means the noon sequence is inconsistent.
    pub fn containing<S: NoonSource + ?Sized>(
        source: &S,
        instant: Instant,
        geo: GeoReference,
    ) -> Result<Self, CtuError> {
        const MAX_STEPS: usize = 3;

        let mut day = SolarDay::for_date(source, instant.utc_date(), geo)?;
        for _ in 0..MAX_STEPS {
            if instant < day.midnight_start() {
                day = SolarDay::for_date(source, day.date.pred(), geo)?;
            } else if instant >= day.midnight_end() {
                day = SolarDay::for_date(source, day.date.succ(), geo)?;
            } else {
                trace!(
                    date = %day.date,
                    geo = %geo,
                    noon = %day.noon,
                    length_seconds = day.length_seconds,
                    "solar day resolved"
                );
                return Ok(day);
            }
        }

        Err(CtuError::NonMonotonicSolarDay {
            today: day.noon,
            tomorrow: day.next_noon,
        })
    }

    /// UTC calendar date labelling this CTU day.
    pub fn date(&self) -> CalendarDate {
        self.date
    }

    pub fn geo(&self) -> GeoReference {
        self.geo
    }

    /// Solar noon of the label date (CTU 12:00:00).
    pub fn noon(&self) -> Instant {
        self.noon
    }

    pub fn prev_noon(&self) -> Instant {
        self.prev_noon
    }

    pub fn next_noon(&self) -> Instant {
        self.next_noon
    }

    /// Real seconds between this day's noon and the next one.
    pub fn length_seconds(&self) -> Seconds {
        self.length_seconds
    }

    /// Solar midnight opening the day (CTU 00:00:00).
    pub fn midnight_start(&self) -> Instant {
        self.noon - NOON_SECONDS
    }

    /// Solar midnight closing the day, which is CTU 00:00:00 of the next day.
    pub fn midnight_end(&self) -> Instant {
        self.next_noon - NOON_SECONDS
    }

    /// Start of the rubber hour (CTU 23:00:00).
    pub fn rubber_hour_start(&self) -> Instant {
        self.noon + NOON_TO_RUBBER_HOUR
    }

    /// Real duration of CTU hour 23.
    pub fn rubber_hour_duration(&self) -> Seconds {
        SECONDS_PER_HOUR + self.midnight_adjustment()
    }

    /// Deviation of this day from 86400 s, absorbed by the rubber hour.
    pub fn midnight_adjustment(&self) -> Seconds {
        self.length_seconds - SECONDS_PER_DAY
    }

    pub fn contains(&self, instant: Instant) -> bool {
        self.midnight_start() <= instant && instant < self.midnight_end()
    }

    /// Whether `instant` falls in the rubber hour of this day.
    pub fn in_rubber_hour(&self, instant: Instant) -> bool {
        self.rubber_hour_start() <= instant && instant < self.midnight_end()
    }
}

/// Serializable summary of a [`SolarDay`], mostly for reporting.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SolarDaySummary {
    pub date: CalendarDate,
    pub longitude: f64,
    pub noon_unix_seconds: f64,
    pub length_seconds: Seconds,
    pub midnight_adjustment: Seconds,
}

impl From<&SolarDay> for SolarDaySummary {
    fn from(day: &SolarDay) -> Self {
        SolarDaySummary {
            date: day.date,
            longitude: day.geo.longitude(),
            noon_unix_seconds: day.noon.to_unix_seconds(),
            length_seconds: day.length_seconds,
            midnight_adjustment: day.midnight_adjustment(),
        }
    }
}

#[cfg(test)]
mod day_length_test {
    use super::*;
    use approx::assert_relative_eq;

    struct FrozenNoon;

    impl NoonSource for FrozenNoon {
        fn solar_noon(&self, _date: CalendarDate, _geo: GeoReference) -> Instant {
            CalendarDate::new(2025, 6, 10).unwrap().noon()
        }
    }

    #[test]
    fn test_day_length() {
        let noon = CalendarDate::new(2025, 6, 10).unwrap().noon();
        assert_eq!(day_length(noon, noon + 86_402.0), Ok(86_402.0));
        assert_eq!(day_length(noon, noon + 86_385.5), Ok(86_385.5));
    }

    #[test]
    fn test_non_monotonic() {
        let noon = CalendarDate::new(2025, 6, 10).unwrap().noon();
        assert_eq!(
            day_length(noon, noon),
            Err(CtuError::NonMonotonicSolarDay {
                today: noon,
                tomorrow: noon
            })
        );
        assert!(matches!(
            day_length(noon, noon - 1.0),
            Err(CtuError::NonMonotonicSolarDay { .. })
        ));

        let date = CalendarDate::new(2025, 6, 10).unwrap();
        assert!(matches!(
            SolarDay::for_date(&FrozenNoon, date, GeoReference::UTC_MERIDIAN),
            Err(CtuError::NonMonotonicSolarDay { .. })
        ));
    }

    #[test]
    fn test_midnight_adjustment() {
        let context = Instant::from_gregorian_utc(2025, 11, 3, 8, 0, 0, 0).unwrap();
        let date = context.utc_date();
        let geo = GeoReference::new(9.1829).unwrap();

        let today = AstronomicalNoon.solar_noon(date, geo);
        let tomorrow = AstronomicalNoon.solar_noon(date.succ(), geo);
        let expected = day_length(today, tomorrow).unwrap() - 86_400.0;

        assert_relative_eq!(
            midnight_adjustment(context, 9.1829).unwrap(),
            expected,
            epsilon = 1e-9
        );
        assert!(midnight_adjustment(context, geo).unwrap().abs() < 30.0);
        assert_eq!(
            midnight_adjustment(context, -200.0),
            Err(CtuError::InvalidGeoReference(-200.0))
        );
    }

    #[test]
    fn test_solar_day_layout() {
        let date = CalendarDate::new(2025, 4, 10).unwrap();
        let day = SolarDay::for_date(&AstronomicalNoon, date, GeoReference::UTC_MERIDIAN).unwrap();

        assert_eq!(day.date(), date);
        assert_eq!(day.noon() - day.midnight_start(), 43_200.0);
        assert_eq!(day.next_noon() - day.midnight_end(), 43_200.0);
        assert_eq!(day.rubber_hour_start() - day.noon(), 39_600.0);
        assert_relative_eq!(
            day.midnight_end() - day.midnight_start(),
            day.length_seconds(),
            epsilon = 1e-9
        );
        assert_relative_eq!(
            day.midnight_end() - day.rubber_hour_start(),
            day.rubber_hour_duration(),
            epsilon = 1e-9
        );
        assert!(day.contains(day.midnight_start()));
        assert!(!day.contains(day.midnight_end()));
        assert!(day.in_rubber_hour(day.rubber_hour_start()));
        assert!(!day.in_rubber_hour(day.noon()));
    }

    #[test]
    fn test_containing_steps_across_dates() {
        // At 180°E the day labelled 2025-11-04 opens around 11:44 UTC on 2025-11-03
        let geo = GeoReference::new(180.0).unwrap();
        let instant = Instant::from_gregorian_utc(2025, 11, 3, 13, 0, 0, 0).unwrap();
        let day = SolarDay::containing(&AstronomicalNoon, instant, geo).unwrap();
        assert_eq!(day.date(), CalendarDate::new(2025, 11, 4).unwrap());
        assert!(day.contains(instant));

        // At 180°W the day labelled 2025-02-10 closes around 12:14 UTC on 2025-02-11
        let geo = GeoReference::new(-180.0).unwrap();
        let instant = Instant::from_gregorian_utc(2025, 2, 11, 6, 0, 0, 0).unwrap();
        let day = SolarDay::containing(&AstronomicalNoon, instant, geo).unwrap();
        assert_eq!(day.date(), CalendarDate::new(2025, 2, 10).unwrap());
        assert!(day.contains(instant));
    }

    #[test]
    fn test_summary() {
        let date = CalendarDate::new(2025, 4, 10).unwrap();
        let day = SolarDay::for_date(&AstronomicalNoon, date, GeoReference::UTC_MERIDIAN).unwrap();
        let summary = SolarDaySummary::from(&day);
        assert_eq!(summary.date, date);
        assert_eq!(summary.longitude, 0.0);
        assert_eq!(summary.midnight_adjustment, day.midnight_adjustment());
    }
}
