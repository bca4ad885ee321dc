//! # Solar reference calculator
//!
//! Computes the UTC instant of true solar noon for a calendar date and a reference meridian.
//!
//! The model is the classic two-term approximation of the **equation of time** (the offset
//! between apparent and mean solar time), combined with the pure longitude offset of four
//! minutes per degree:
//!
//! ```text
//! B     = 2π · (n − 81) / 365                    (n = day of year, 1-based)
//! EoT   = 9.87 · sin 2B − 7.53 · cos B − 1.5 · sin B       [minutes]
//! noon  = 00:00 UTC + 12 h − λ · 4 min − EoT                (λ East-positive)
//! ```
//!
//! The approximation differs from the five-term NOAA series by about 20 s on a typical day
//! and by under a minute at worst. That residual is the accuracy ceiling of the whole CTU
//! clock and is not corrected here. Day lengths, which depend on the slope of the curve
//! rather than its value, agree to within a few seconds.
//!
//! ## See also
//! * [`day_length`](crate::day_length) – consumes consecutive noons.
//! * [`NoonCache`](crate::noon_cache::NoonCache) – read-through memoization of [`AstronomicalNoon`].
use hifitime::Unit;

use crate::constants::{
    Degree, Minutes, Radian, DPI, EOT_COS_B, EOT_PERIOD_DAYS, EOT_PHASE_DAY, EOT_SIN_2B,
    EOT_SIN_B, NOON_SECONDS, SECONDS_PER_DEGREE, SECONDS_PER_MINUTE,
};
use crate::ctu_errors::CtuError;
use crate::geo::GeoReference;
use crate::time::{CalendarDate, Instant};

/// Something able to tell when solar noon happens on a given date at a given meridian.
///
/// Implementations must be deterministic per `(date, geo)`: the conversion engine
/// recomputes the same noons several times per call and relies on getting identical instants.
pub trait NoonSource {
    fn solar_noon(&self, date: CalendarDate, geo: GeoReference) -> Instant;
}

/// Direct evaluation of the equation-of-time model, without memoization.
#[derive(Debug, Clone, Copy, Default)]
pub struct AstronomicalNoon;

impl NoonSource for AstronomicalNoon {
    fn solar_noon(&self, date: CalendarDate, geo: GeoReference) -> Instant {
        solar_noon_on(date, geo)
    }
}

/// Fractional year angle `B` of the equation of time.
fn fractional_year(day_of_year: u16) -> Radian {
    DPI * (f64::from(day_of_year) - EOT_PHASE_DAY) / EOT_PERIOD_DAYS
}

/// Equation of time, in minutes, for a 1-based day of year.
///
/// Positive values mean the sun crosses the meridian *before* 12:00 mean time.
pub fn equation_of_time(day_of_year: u16) -> Minutes {
    let b = fractional_year(day_of_year);
    EOT_SIN_2B * (2.0 * b).sin() - EOT_COS_B * b.cos() - EOT_SIN_B * b.sin()
}

/// Solar noon on a UTC calendar date at a pre-validated meridian.
///
/// Arguments
/// ---------
/// * `date`: UTC calendar date
/// * `geo`: reference meridian
///
/// Return
/// ------
/// * the UTC instant of solar noon. For `|λ|` close to 180° it can fall on the
///   neighbouring UTC date.
pub fn solar_noon_on(date: CalendarDate, geo: GeoReference) -> Instant {
    let eot = equation_of_time(date.day_of_year());
    let offset = NOON_SECONDS - geo.longitude() * SECONDS_PER_DEGREE - eot * SECONDS_PER_MINUTE;
    date.midnight() + Unit::Second * offset
}

/// Solar noon of the UTC calendar date containing `date_context`.
///
/// Arguments
/// ---------
/// * `date_context`: any instant within the target UTC calendar day
/// * `longitude`: reference meridian in decimal degrees, East-positive
///
/// Return
/// ------
/// * the UTC instant of solar noon, or [`CtuError::InvalidGeoReference`] when the longitude
///   is outside `[-180, 180]`
pub fn solar_noon(date_context: Instant, longitude: Degree) -> Result<Instant, CtuError> {
    let geo = GeoReference::new(longitude)?;
    Ok(solar_noon_on(date_context.utc_date(), geo))
}

#[cfg(test)]
mod solar_noon_test {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_equation_of_time_extrema() {
        // Early November: sundials run ~16 minutes ahead
        let november = CalendarDate::new(2025, 11, 3).unwrap().day_of_year();
        assert!(equation_of_time(november) > 15.5);
        // Mid February: sundials lag by ~14 minutes
        let february = CalendarDate::new(2025, 2, 11).unwrap().day_of_year();
        assert!(equation_of_time(february) < -13.5);

        let yearly: Vec<f64> = (1..=366).map(equation_of_time).collect();
        assert!(yearly.iter().all(|eot| eot.abs() < 17.0));
    }

    #[test]
    fn test_equation_of_time_continuous_over_new_year() {
        let last = equation_of_time(365);
        let first = equation_of_time(1);
        let step = equation_of_time(2) - first;
        assert_relative_eq!(first - last, step, epsilon = 0.01);
    }

    #[test]
    fn test_solar_noon_greenwich() {
        // 2025-04-10 is day 100: EoT ≈ -1.607 min, noon ≈ 12:01:36 UTC
        let context = Instant::from_gregorian_utc(2025, 4, 10, 3, 0, 0, 0).unwrap();
        let noon = solar_noon(context, 0.0).unwrap();
        let expected = CalendarDate::new(2025, 4, 10).unwrap().noon();
        assert_relative_eq!(noon - expected, 96.4, epsilon = 0.5);
    }

    #[test]
    fn test_longitude_offset() {
        let context = Instant::from_gregorian_utc(2025, 4, 10, 12, 0, 0, 0).unwrap();
        let greenwich = solar_noon(context, 0.0).unwrap();
        let stuttgart = solar_noon(context, 9.1829).unwrap();
        let new_york = solar_noon(context, -74.0).unwrap();

        assert_relative_eq!(greenwich - stuttgart, 9.1829 * 240.0, epsilon = 1e-6);
        assert_relative_eq!(new_york - greenwich, 74.0 * 240.0, epsilon = 1e-6);
    }

    #[test]
    fn test_date_line() {
        let date = CalendarDate::new(2025, 11, 3).unwrap();
        let geo = GeoReference::new(180.0).unwrap();
        // Noon at 180°E precedes 00:00 UTC by the equation of time
        let noon = solar_noon_on(date, geo);
        assert_eq!(noon.utc_date(), date.pred());

        let geo = GeoReference::new(-180.0).unwrap();
        let noon = solar_noon_on(CalendarDate::new(2025, 2, 11).unwrap(), geo);
        assert_eq!(noon.utc_date(), CalendarDate::new(2025, 2, 12).unwrap());
    }

    #[test]
    fn test_leap_day() {
        let noon = solar_noon(
            Instant::from_gregorian_utc(2024, 2, 29, 0, 0, 0, 0).unwrap(),
            0.0,
        )
        .unwrap();
        assert_eq!(noon.utc_date(), CalendarDate::new(2024, 2, 29).unwrap());
    }

    #[test]
    fn test_invalid_longitude() {
        let context = Instant::from_gregorian_utc(2025, 4, 10, 12, 0, 0, 0).unwrap();
        assert_eq!(
            solar_noon(context, 181.0),
            Err(CtuError::InvalidGeoReference(181.0))
        );
    }

    #[test]
    fn test_astronomical_noon_source() {
        let date = CalendarDate::new(2025, 7, 1).unwrap();
        let geo = GeoReference::new(-122.4).unwrap();
        assert_eq!(AstronomicalNoon.solar_noon(date, geo), solar_noon_on(date, geo));
    }
}
