use std::convert::Infallible;

use thiserror::Error;

use crate::constants::{Degree, Seconds};
use crate::time::Instant;

#[derive(Error, Debug, Clone)]
pub enum CtuError {
    #[error("Invalid reference meridian: longitude {0}° is outside [-180, 180]")]
    InvalidGeoReference(Degree),

    #[error("Non monotonic solar day: next noon {tomorrow} is not after noon {today}")]
    NonMonotonicSolarDay { today: Instant, tomorrow: Instant },

    #[error(
        "Implausible solar day length: {length_seconds} s deviates from 86400 s by more than {max_deviation} s"
    )]
    ImplausibleSolarDay {
        length_seconds: Seconds,
        max_deviation: Seconds,
    },

    #[error("Instant {instant} does not belong to the solar day starting at {day_start}")]
    InstantOutsideSolarDay { instant: Instant, day_start: Instant },

    #[error("Invalid CTU civil time: {0}")]
    InvalidCivilTime(String),

    #[error("Invalid calendar date: {0}")]
    InvalidCalendarDate(String),

    #[error("Invalid converter configuration: {0}")]
    InvalidConfiguration(String),

    #[error("Unable to read the system clock: {0}")]
    Clock(String),
}

impl From<Infallible> for CtuError {
    fn from(err: Infallible) -> Self {
        match err {}
    }
}

impl PartialEq for CtuError {
    fn eq(&self, other: &Self) -> bool {
        use CtuError::*;
        match (self, other) {
            (InvalidGeoReference(a), InvalidGeoReference(b)) => a.to_bits() == b.to_bits(),
            (
                NonMonotonicSolarDay {
                    today: t1,
                    tomorrow: n1,
                },
                NonMonotonicSolarDay {
                    today: t2,
                    tomorrow: n2,
                },
            ) => t1 == t2 && n1 == n2,
            (
                ImplausibleSolarDay {
                    length_seconds: l1,
                    max_deviation: m1,
                },
                ImplausibleSolarDay {
                    length_seconds: l2,
                    max_deviation: m2,
                },
            ) => l1 == l2 && m1 == m2,
            (
                InstantOutsideSolarDay {
                    instant: i1,
                    day_start: s1,
                },
                InstantOutsideSolarDay {
                    instant: i2,
                    day_start: s2,
                },
            ) => i1 == i2 && s1 == s2,
            (InvalidCivilTime(a), InvalidCivilTime(b)) => a == b,
            (InvalidCalendarDate(a), InvalidCalendarDate(b)) => a == b,
            (InvalidConfiguration(a), InvalidConfiguration(b)) => a == b,

            // System clock failures carry no comparable payload
            (Clock(_), Clock(_)) => true,

            _ => false,
        }
    }
}
