#![allow(dead_code)]

use ctu_time::{CalendarDate, CtuDateTime, GeoReference, Instant};

pub const STUTTGART: f64 = 9.1829;

/// 2000-01-01T00:00:00 UTC
pub fn epoch_2000() -> Instant {
    Instant::from_gregorian_utc(2000, 1, 1, 0, 0, 0, 0).unwrap()
}

/// UTC calendar date `days` days after 2000-01-01.
pub fn date_after_2000(days: u32) -> CalendarDate {
    (epoch_2000() + (f64::from(days) * 86_400.0 + 43_200.0)).utc_date()
}

pub fn geo(longitude: f64) -> GeoReference {
    GeoReference::new(longitude).unwrap()
}

/// Largest round-trip error allowed for an instant showing `stamp`.
pub fn round_trip_tolerance(stamp: &CtuDateTime) -> f64 {
    if stamp.time.is_rubber_hour() {
        1.0
    } else {
        1e-6
    }
}
