//! # Conversion engine
//!
//! The public contract of the crate: UTC → CTU and CTU → UTC.
//!
//! Both directions resolve a [`SolarDay`] (noon of the label date, noon of the next date,
//! day length) and delegate to the [`RubberHour`] mapper. Every call computes its own
//! context from its own inputs; there is no implicit "today" and no shared state.
//!
//! ## Solar day labels
//!
//! A civil time alone is ambiguous: 03:00 CTU happens every day. [`ctu_to_utc`] therefore
//! takes an explicit `reference_date`, whose **UTC calendar date** labels the CTU day. The
//! CTU day labelled `d` is the one whose solar noon is computed on UTC date `d`; near the
//! date line it may start or end on a neighbouring UTC date.
//!
//! [`utc_to_ctu_dated`] returns that label alongside the civil time, so that
//!
//! ```rust
//! use ctu_time::{ctu_to_utc, utc_to_ctu_dated, Instant};
//!
//! let instant = Instant::from_gregorian_utc(2025, 4, 10, 18, 30, 0, 0).unwrap();
//! let stamp = utc_to_ctu_dated(instant, 9.1829).unwrap();
//! let back = ctu_to_utc(stamp.time, stamp.date.midnight(), 9.1829).unwrap();
//! assert!((back - instant).abs() < 1e-6);
//! ```
//!
//! ## Errors
//!
//! [`CtuError::InvalidGeoReference`], [`CtuError::NonMonotonicSolarDay`] and
//! [`CtuError::ImplausibleSolarDay`] are surfaced unchanged. Nothing is retried or logged
//! on failure.
use crate::civil_time::{CivilTime, CtuDateTime};
use crate::ctu_errors::CtuError;
use crate::day_length::SolarDay;
use crate::geo::GeoReference;
use crate::rubber_hour::RubberHour;
use crate::solar_noon::{AstronomicalNoon, NoonSource};
use crate::time::Instant;

/// Convert a UTC instant to CTU on the CTU day containing it.
pub(crate) fn civil_from_utc<S: NoonSource + ?Sized>(
    source: &S,
    mapper: &RubberHour,
    instant: Instant,
    geo: GeoReference,
) -> Result<CtuDateTime, CtuError> {
    let day = SolarDay::containing(source, instant, geo)?;
    let time = mapper.to_civil(instant, day.noon(), day.next_noon(), day.length_seconds())?;
    Ok(CtuDateTime {
        date: day.date(),
        time,
    })
}

/// Convert a CTU civil time on the day labelled by `reference_date` back to UTC.
pub(crate) fn utc_from_civil<S: NoonSource + ?Sized>(
    source: &S,
    mapper: &RubberHour,
    civil: CivilTime,
    reference_date: Instant,
    geo: GeoReference,
) -> Result<Instant, CtuError> {
    let day = SolarDay::for_date(source, reference_date.utc_date(), geo)?;
    mapper.to_instant(civil, day.noon(), day.length_seconds())
}

/// Convert a UTC instant to CTU civil time.
///
/// Arguments
/// ---------
/// * `instant`: the UTC instant to convert
/// * `geo`: reference meridian, either a [`GeoReference`] or a longitude in degrees
///
/// Return
/// ------
/// * the CTU civil time, or the first [`CtuError`] raised along the way
///
/// Examples
/// --------
/// ```rust
/// use ctu_time::{solar_noon, utc_to_ctu, CivilTime, Instant};
///
/// let context = Instant::from_gregorian_utc(2025, 4, 10, 0, 0, 0, 0).unwrap();
/// let noon = solar_noon(context, 9.1829).unwrap();
/// assert_eq!(utc_to_ctu(noon, 9.1829).unwrap(), CivilTime::NOON);
/// ```
pub fn utc_to_ctu<G>(instant: Instant, geo: G) -> Result<CivilTime, CtuError>
where
    G: TryInto<GeoReference>,
    CtuError: From<G::Error>,
{
    utc_to_ctu_dated(instant, geo).map(|stamp| stamp.time)
}

/// Convert a UTC instant to CTU civil time, keeping the label date of its CTU day.
pub fn utc_to_ctu_dated<G>(instant: Instant, geo: G) -> Result<CtuDateTime, CtuError>
where
    G: TryInto<GeoReference>,
    CtuError: From<G::Error>,
{
    let geo: GeoReference = geo.try_into()?;
    civil_from_utc(&AstronomicalNoon, &RubberHour::default(), instant, geo)
}

/// Convert a CTU civil time back to UTC.
///
/// Arguments
/// ---------
/// * `civil`: the CTU civil time
/// * `reference_date`: any instant on the UTC calendar date labelling the CTU day
/// * `geo`: reference meridian, either a [`GeoReference`] or a longitude in degrees
///
/// Return
/// ------
/// * the UTC instant, or the first [`CtuError`] raised along the way
pub fn ctu_to_utc<G>(
    civil: CivilTime,
    reference_date: Instant,
    geo: G,
) -> Result<Instant, CtuError>
where
    G: TryInto<GeoReference>,
    CtuError: From<G::Error>,
{
    let geo: GeoReference = geo.try_into()?;
    utc_from_civil(
        &AstronomicalNoon,
        &RubberHour::default(),
        civil,
        reference_date,
        geo,
    )
}

/// The CTU day containing `instant`.
pub fn solar_day_of<G>(instant: Instant, geo: G) -> Result<SolarDay, CtuError>
where
    G: TryInto<GeoReference>,
    CtuError: From<G::Error>,
{
    let geo: GeoReference = geo.try_into()?;
    SolarDay::containing(&AstronomicalNoon, instant, geo)
}

/// Current CTU civil time at the given meridian, read from the system clock.
pub fn now<G>(geo: G) -> Result<CivilTime, CtuError>
where
    G: TryInto<GeoReference>,
    CtuError: From<G::Error>,
{
    let geo: GeoReference = geo.try_into()?;
    utc_to_ctu::<GeoReference>(Instant::now()?, geo)
}

#[cfg(test)]
mod conversion_test {
    use super::*;
    use crate::solar_noon::solar_noon;
    use crate::time::CalendarDate;

    const STUTTGART: f64 = 9.1829;

    #[test]
    fn test_noon_fixpoint() {
        let context = Instant::from_gregorian_utc(2025, 4, 10, 0, 0, 0, 0).unwrap();
        let noon = solar_noon(context, STUTTGART).unwrap();
        assert_eq!(utc_to_ctu(noon, STUTTGART), Ok(CivilTime::NOON));

        let stamp = utc_to_ctu_dated(noon, STUTTGART).unwrap();
        assert_eq!(stamp.date, CalendarDate::new(2025, 4, 10).unwrap());
    }

    #[test]
    fn test_midnight_fixpoint() {
        let context = Instant::from_gregorian_utc(2025, 4, 11, 0, 0, 0, 0).unwrap();
        let next_noon = solar_noon(context, STUTTGART).unwrap();
        let midnight = next_noon - 43_200.0;

        let stamp = utc_to_ctu_dated(midnight, STUTTGART).unwrap();
        assert_eq!(stamp.time, CivilTime::MIDNIGHT);
        assert_eq!(stamp.date, CalendarDate::new(2025, 4, 11).unwrap());

        let before = utc_to_ctu_dated(midnight - 1e-3, STUTTGART).unwrap();
        assert_eq!(before.date, CalendarDate::new(2025, 4, 10).unwrap());
        assert!(before.time.is_rubber_hour());
    }

    #[test]
    fn test_ctu_to_utc() {
        let reference = Instant::from_gregorian_utc(2025, 4, 10, 15, 0, 0, 0).unwrap();
        let noon = solar_noon(reference, STUTTGART).unwrap();

        assert_eq!(
            ctu_to_utc(CivilTime::NOON, reference, STUTTGART),
            Ok(noon)
        );
        let three = CivilTime::new(3, 0, 0.0).unwrap();
        let morning = ctu_to_utc(three, reference, STUTTGART).unwrap();
        assert_eq!(noon - morning, 9.0 * 3_600.0);

        // West of Greenwich the late CTU evening already falls on the next UTC date
        let late = CivilTime::new(23, 55, 0.0).unwrap();
        let instant = ctu_to_utc(late, reference, -74.0).unwrap();
        assert_eq!(instant.utc_date(), CalendarDate::new(2025, 4, 11).unwrap());
        let day = solar_day_of(instant, -74.0).unwrap();
        assert_eq!(day.date(), CalendarDate::new(2025, 4, 10).unwrap());
        assert!(day.in_rubber_hour(instant));
    }

    #[test]
    fn test_round_trip() {
        let start = Instant::from_gregorian_utc(2025, 1, 1, 0, 0, 0, 0).unwrap();
        for step in 0..500_u32 {
            let instant = start + f64::from(step) * 63_131.713;
            let stamp = utc_to_ctu_dated(instant, STUTTGART).unwrap();
            let back = ctu_to_utc(stamp.time, stamp.date.midnight(), STUTTGART).unwrap();
            let tolerance = if stamp.time.is_rubber_hour() { 1.0 } else { 1e-6 };
            assert!(
                (back - instant).abs() <= tolerance,
                "{instant} -> {stamp} -> {back}"
            );
        }
    }

    #[test]
    fn test_errors_surface_unchanged() {
        let instant = Instant::from_gregorian_utc(2025, 4, 10, 15, 0, 0, 0).unwrap();
        assert_eq!(
            utc_to_ctu(instant, 181.0),
            Err(CtuError::InvalidGeoReference(181.0))
        );
        assert_eq!(
            ctu_to_utc(CivilTime::NOON, instant, -181.0),
            Err(CtuError::InvalidGeoReference(-181.0))
        );
        assert!(solar_day_of(instant, f64::NAN).is_err());
        assert!(now(500.0).is_err());
    }

    #[test]
    fn test_now() {
        let civil = now(GeoReference::UTC_MERIDIAN).unwrap();
        assert!(civil.hour() < 24);
    }
}
