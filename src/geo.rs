//! # Reference meridian
//!
//! A [`GeoReference`] is the longitude whose solar noon anchors a CTU clock. It is validated
//! once at construction, so every downstream computation can take it by value without
//! re-checking the range.
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::constants::{Degree, MAX_LONGITUDE};
use crate::ctu_errors::CtuError;

/// Reference meridian in decimal degrees, East-positive, within `[-180, 180]`.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct GeoReference {
    longitude: Degree,
}

impl GeoReference {
    /// The Greenwich meridian: a CTU clock with no local solar adjustment.
    pub const UTC_MERIDIAN: GeoReference = GeoReference { longitude: 0.0 };

    /// Validate a longitude and wrap it as a reference meridian.
    ///
    /// Arguments
    /// ---------
    /// * `longitude`: decimal degrees, East-positive
    ///
    /// Return
    /// ------
    /// * the reference, or [`CtuError::InvalidGeoReference`] for values outside
    ///   `[-180, 180]` (including NaN and infinities)
    pub fn new(longitude: Degree) -> Result<Self, CtuError> {
        if longitude.is_finite() && longitude.abs() <= MAX_LONGITUDE {
            // Fold -0.0 onto 0.0 so equal meridians share one representation
            Ok(GeoReference {
                longitude: longitude + 0.0,
            })
        } else {
            Err(CtuError::InvalidGeoReference(longitude))
        }
    }

    pub fn longitude(&self) -> Degree {
        self.longitude
    }
}

impl Default for GeoReference {
    fn default() -> Self {
        GeoReference::UTC_MERIDIAN
    }
}

impl TryFrom<f64> for GeoReference {
    type Error = CtuError;

    fn try_from(longitude: f64) -> Result<Self, Self::Error> {
        GeoReference::new(longitude)
    }
}

impl From<GeoReference> for f64 {
    fn from(geo: GeoReference) -> Self {
        geo.longitude
    }
}

impl fmt::Display for GeoReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let hemisphere = if self.longitude < 0.0 { 'W' } else { 'E' };
        write!(f, "{:.4}°{hemisphere}", self.longitude.abs())
    }
}

#[cfg(test)]
mod geo_test {
    use super::*;

    #[test]
    fn test_valid_longitudes() {
        assert_eq!(GeoReference::new(9.1829).unwrap().longitude(), 9.1829);
        assert_eq!(GeoReference::new(180.0).unwrap().longitude(), 180.0);
        assert_eq!(GeoReference::new(-180.0).unwrap().longitude(), -180.0);
        assert_eq!(GeoReference::new(-0.0).unwrap(), GeoReference::UTC_MERIDIAN);
        assert!(GeoReference::new(-0.0)
            .unwrap()
            .longitude()
            .is_sign_positive());
    }

    #[test]
    fn test_invalid_longitudes() {
        assert_eq!(
            GeoReference::new(181.0),
            Err(CtuError::InvalidGeoReference(181.0))
        );
        assert_eq!(
            GeoReference::new(-180.5),
            Err(CtuError::InvalidGeoReference(-180.5))
        );
        assert!(matches!(
            GeoReference::new(f64::NAN),
            Err(CtuError::InvalidGeoReference(_))
        ));
        assert!(GeoReference::try_from(f64::INFINITY).is_err());
    }

    #[test]
    fn test_display() {
        assert_eq!(GeoReference::new(9.1829).unwrap().to_string(), "9.1829°E");
        assert_eq!(GeoReference::new(-73.5).unwrap().to_string(), "73.5000°W");
    }
}
