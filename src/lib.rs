//! # ctu_time: solar-anchored civil time
//!
//! CTU (*Calculated Time Uncoordinated*) is a 24-hour civil clock in which 12:00:00 is true
//! solar noon at a reference meridian and 00:00:00 is true solar midnight, every day, with no
//! seasonal jumps. The last hour of each day (23:00 → 24:00) stretches or shrinks by a few
//! tens of seconds to absorb the variation of the solar day length.
//!
//! ## Overview
//!
//! - [`solar_noon`](crate::solar_noon) – equation-of-time model of solar noon
//! - [`day_length`](crate::day_length) – solar day length and [`SolarDay`]
//! - [`rubber_hour`](crate::rubber_hour) – mapping between real seconds and CTU seconds
//! - [`conversion`](crate::conversion) – [`utc_to_ctu`] and [`ctu_to_utc`]
//! - [`ctu`](crate::ctu) – [`CtuConverter`], a meridian-bound façade with a noon cache
//!
//! ```rust
//! use ctu_time::{ctu_to_utc, utc_to_ctu, utc_to_ctu_dated, Instant};
//!
//! let instant = Instant::from_gregorian_utc(2025, 4, 10, 15, 45, 0, 0).unwrap();
//! let civil = utc_to_ctu(instant, 9.1829).unwrap();
//!
//! // The label date of the CTU day may differ from the UTC date of the instant
//! let stamp = utc_to_ctu_dated(instant, 9.1829).unwrap();
//! assert_eq!(stamp.time, civil);
//! let back = ctu_to_utc(stamp.time, stamp.date.midnight(), 9.1829).unwrap();
//! assert!((back - instant).abs() < 1e-6);
//! ```
pub mod civil_time;
pub mod constants;
pub mod conversion;
pub mod ctu;
pub mod ctu_errors;
pub mod day_length;
pub mod geo;
mod noon_cache;
pub mod rubber_hour;
pub mod solar_noon;
pub mod time;

pub use civil_time::{CivilTime, CtuDateTime};
pub use conversion::{ctu_to_utc, now, solar_day_of, utc_to_ctu, utc_to_ctu_dated};
pub use ctu::{CtuConverter, CtuConverterBuilder};
pub use ctu_errors::CtuError;
pub use day_length::{day_length, midnight_adjustment, SolarDay};
pub use geo::GeoReference;
pub use solar_noon::{equation_of_time, solar_noon, solar_noon_on};
pub use time::{CalendarDate, Instant};
