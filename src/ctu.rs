//! # CTU converter: a meridian-bound, cached façade over the conversion engine
//!
//! [`CtuConverter`] binds a reference meridian and a rubber-hour policy once, then offers the
//! same operations as the free functions of [`conversion`](crate::conversion). Solar noons
//! are memoized in a concurrency-safe read-through cache, which changes how fast answers
//! come back but never what they are.
//!
//! ## Typical usage
//!
//! ```rust
//! use ctu_time::{CtuConverter, GeoReference, Instant};
//!
//! let stuttgart = GeoReference::new(9.1829).unwrap();
//! let converter = CtuConverter::builder()
//!     .geo(stuttgart)
//!     .max_day_deviation(60.0)
//!     .build()
//!     .unwrap();
//!
//! let instant = Instant::from_gregorian_utc(2025, 4, 10, 18, 30, 0, 0).unwrap();
//! let stamp = converter.utc_to_ctu_dated(instant).unwrap();
//! let back = converter.ctu_to_utc(stamp.time, stamp.date.midnight()).unwrap();
//! assert!((back - instant).abs() < 1e-6);
//! ```
//!
//! ## Notes
//!
//! - The converter is `Send + Sync`; share it behind an `Arc` across threads.
//! - The cache grows by one entry per distinct `(date, meridian)` pair and is never evicted.
//!   Call [`clear_cache`](CtuConverter::clear_cache) for long-running processes sweeping
//!   many years.
use tracing::debug;

use crate::civil_time::{CivilTime, CtuDateTime};
use crate::constants::{Seconds, MAX_DAY_DEVIATION};
use crate::conversion::{civil_from_utc, utc_from_civil};
use crate::ctu_errors::CtuError;
use crate::day_length::SolarDay;
use crate::geo::GeoReference;
use crate::noon_cache::NoonCache;
use crate::rubber_hour::RubberHour;
use crate::solar_noon::{AstronomicalNoon, NoonSource};
use crate::time::Instant;

#[derive(Debug)]
pub struct CtuConverter {
    geo: GeoReference,
    rubber_hour: RubberHour,
    cache: Option<NoonCache>,
}

impl Default for CtuConverter {
    fn default() -> Self {
        CtuConverter::new(GeoReference::UTC_MERIDIAN)
    }
}

impl CtuConverter {
    /// Converter for `geo` with the default policy (±120 s bound, cache on).
    pub fn new(geo: GeoReference) -> Self {
        CtuConverter {
            geo,
            rubber_hour: RubberHour::default(),
            cache: Some(NoonCache::new()),
        }
    }

    pub fn builder() -> CtuConverterBuilder {
        CtuConverterBuilder::default()
    }

    pub fn geo(&self) -> GeoReference {
        self.geo
    }

    pub fn max_day_deviation(&self) -> Seconds {
        self.rubber_hour.max_deviation()
    }

    pub fn is_cached(&self) -> bool {
        self.cache.is_some()
    }

    /// Number of solar noons currently memoized (0 when the cache is disabled).
    pub fn cached_noons(&self) -> usize {
        self.cache.as_ref().map_or(0, NoonCache::len)
    }

    pub fn clear_cache(&self) {
        if let Some(cache) = &self.cache {
            cache.clear();
        }
    }

    fn noon_source(&self) -> &dyn NoonSource {
        match &self.cache {
            Some(cache) => cache,
            None => &AstronomicalNoon,
        }
    }

    /// Convert a UTC instant to CTU civil time at the bound meridian.
    ///
    /// See [`utc_to_ctu`](crate::conversion::utc_to_ctu).
    pub fn utc_to_ctu(&self, instant: Instant) -> Result<CivilTime, CtuError> {
        self.utc_to_ctu_dated(instant).map(|stamp| stamp.time)
    }

    /// Convert a UTC instant to CTU civil time, with the label date of its CTU day.
    pub fn utc_to_ctu_dated(&self, instant: Instant) -> Result<CtuDateTime, CtuError> {
        civil_from_utc(self.noon_source(), &self.rubber_hour, instant, self.geo)
    }

    /// Convert a CTU civil time on the day labelled by `reference_date` back to UTC.
    ///
    /// See [`ctu_to_utc`](crate::conversion::ctu_to_utc).
    pub fn ctu_to_utc(
        &self,
        civil: CivilTime,
        reference_date: Instant,
    ) -> Result<Instant, CtuError> {
        utc_from_civil(
            self.noon_source(),
            &self.rubber_hour,
            civil,
            reference_date,
            self.geo,
        )
    }

    /// The CTU day containing `instant`.
    pub fn solar_day_of(&self, instant: Instant) -> Result<SolarDay, CtuError> {
        SolarDay::containing(self.noon_source(), instant, self.geo)
    }

    /// Current CTU civil time, read from the system clock.
    pub fn now(&self) -> Result<CivilTime, CtuError> {
        self.utc_to_ctu(Instant::now()?)
    }
}

/// Builder for [`CtuConverter`].
#[derive(Debug, Clone)]
pub struct CtuConverterBuilder {
    geo: GeoReference,
    max_day_deviation: Seconds,
    cache: bool,
}

impl Default for CtuConverterBuilder {
    fn default() -> Self {
        CtuConverterBuilder {
            geo: GeoReference::UTC_MERIDIAN,
            max_day_deviation: MAX_DAY_DEVIATION,
            cache: true,
        }
    }
}

impl CtuConverterBuilder {
    /// Reference meridian of the converter (defaults to Greenwich).
    pub fn geo(mut self, geo: GeoReference) -> Self {
        self.geo = geo;
        self
    }

    /// Reference meridian as a raw longitude, validated by [`build`](Self::build).
    pub fn longitude(self, longitude: f64) -> Result<Self, CtuError> {
        Ok(self.geo(GeoReference::new(longitude)?))
    }

    /// Largest accepted deviation of a solar day from 86400 s (defaults to 120 s).
    pub fn max_day_deviation(mut self, seconds: Seconds) -> Self {
        self.max_day_deviation = seconds;
        self
    }

    /// Enable or disable the solar noon cache (enabled by default).
    pub fn cache(mut self, enabled: bool) -> Self {
        self.cache = enabled;
        self
    }

    /// Validate the settings and build the converter.
    ///
    /// Return
    /// ------
    /// * the converter, or [`CtuError::InvalidConfiguration`] when the day-length bound is
    ///   not within `[0, 3600)` seconds
    pub fn build(self) -> Result<CtuConverter, CtuError> {
        let rubber_hour = RubberHour::new(self.max_day_deviation)?;
        debug!(
            geo = %self.geo,
            max_day_deviation = self.max_day_deviation,
            cache = self.cache,
            "CTU converter configured"
        );
        Ok(CtuConverter {
            geo: self.geo,
            rubber_hour,
            cache: self.cache.then(NoonCache::new),
        })
    }
}
