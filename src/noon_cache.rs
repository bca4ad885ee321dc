//! Read-through memoization of solar noons.
//!
//! Solar noon is a pure function of `(date, longitude)`, so entries never go stale and the
//! cache needs no eviction for correctness. A miss computes the value with
//! [`AstronomicalNoon`] outside of any lock; two racing misses for the same key compute the
//! same instant and the first insert wins.
use ahash::AHashMap;
use parking_lot::RwLock;
use tracing::trace;

use crate::geo::GeoReference;
use crate::solar_noon::{AstronomicalNoon, NoonSource};
use crate::time::{CalendarDate, Instant};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct NoonKey {
    date: CalendarDate,
    longitude_bits: u64,
}

impl NoonKey {
    fn new(date: CalendarDate, geo: GeoReference) -> Self {
        NoonKey {
            date,
            longitude_bits: geo.longitude().to_bits(),
        }
    }
}

#[derive(Debug, Default)]
pub(crate) struct NoonCache {
    entries: RwLock<AHashMap<NoonKey, Instant>>,
}

impl NoonCache {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.read().len()
    }

    pub(crate) fn clear(&self) {
        self.entries.write().clear();
    }
}

impl NoonSource for NoonCache {
    fn solar_noon(&self, date: CalendarDate, geo: GeoReference) -> Instant {
        let key = NoonKey::new(date, geo);
        if let Some(noon) = self.entries.read().get(&key) {
            return *noon;
        }

        let noon = AstronomicalNoon.solar_noon(date, geo);
        trace!(date = %date, geo = %geo, noon = %noon, "solar noon cached");
        *self.entries.write().entry(key).or_insert(noon)
    }
}
