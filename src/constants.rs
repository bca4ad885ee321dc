//! # Constants and type definitions for CTU
//!
//! This module centralizes the **clock constants**, **astronomical coefficients**, and **unit
//! aliases** used throughout the crate.
//!
//! ## Overview
//!
//! - Nominal day/hour/minute lengths in SI seconds
//! - Layout of the CTU day (noon offset, start of the rubber hour)
//! - Coefficients of the equation-of-time approximation
//! - Sanity bounds on the solar day length and on the reference meridian
//!
//! The CTU day is anchored on solar noon: CTU 12:00:00 is solar noon, CTU 00:00:00 is
//! solar midnight, and the last hour of the day (23:00 → 24:00) absorbs the difference
//! between the true solar day length and [`SECONDS_PER_DAY`].

// -------------------------------------------------------------------------------------------------
// Unit conversions
// -------------------------------------------------------------------------------------------------

/// 2π, useful for trigonometric conversions
pub const DPI: f64 = 2. * std::f64::consts::PI;

/// Number of seconds in a nominal day
pub const SECONDS_PER_DAY: f64 = 86_400.0;

/// Number of seconds in a nominal hour
pub const SECONDS_PER_HOUR: f64 = 3_600.0;

/// Number of seconds in a minute
pub const SECONDS_PER_MINUTE: f64 = 60.0;

/// Earth rotation: one degree of longitude is four minutes of solar time
pub const SECONDS_PER_DEGREE: f64 = 240.0;

// -------------------------------------------------------------------------------------------------
// Layout of the CTU day
// -------------------------------------------------------------------------------------------------

/// CTU seconds-of-day at solar noon (12:00:00)
pub const NOON_SECONDS: f64 = 12.0 * SECONDS_PER_HOUR;

/// CTU seconds-of-day at which the rubber hour starts (23:00:00)
pub const RUBBER_HOUR_START: f64 = 23.0 * SECONDS_PER_HOUR;

/// Real seconds between solar noon and the start of the rubber hour
pub const NOON_TO_RUBBER_HOUR: f64 = RUBBER_HOUR_START - NOON_SECONDS;

/// Largest deviation of a solar day from [`SECONDS_PER_DAY`] accepted by default.
///
/// The physical variation of the apparent solar day stays below ~30 s, so this
/// bound only trips on an upstream calculation error.
pub const MAX_DAY_DEVIATION: Seconds = 120.0;

/// Largest civil second the clock can show before rolling over to the next minute
pub(crate) const LAST_CIVIL_SECOND: f64 = 60.0 - 1e-9;

// -------------------------------------------------------------------------------------------------
// Equation of time
// -------------------------------------------------------------------------------------------------

/// Period of the equation-of-time approximation, in days
pub const EOT_PERIOD_DAYS: f64 = 365.0;

/// Day of year used as the phase origin of the approximation (near the March equinox)
pub const EOT_PHASE_DAY: f64 = 81.0;

/// Amplitude of the `sin 2B` term (obliquity), in minutes
pub const EOT_SIN_2B: f64 = 9.87;

/// Amplitude of the `cos B` term (eccentricity), in minutes
pub const EOT_COS_B: f64 = 7.53;

/// Amplitude of the `sin B` term (eccentricity), in minutes
pub const EOT_SIN_B: f64 = 1.5;

// -------------------------------------------------------------------------------------------------
// Reference meridian
// -------------------------------------------------------------------------------------------------

/// Largest absolute longitude of a reference meridian, in degrees
pub const MAX_LONGITUDE: Degree = 180.0;

// -------------------------------------------------------------------------------------------------
// Type aliases
// -------------------------------------------------------------------------------------------------

/// Angle in degrees
pub type Degree = f64;
/// Angle in radians
pub type Radian = f64;
/// Duration in SI seconds
pub type Seconds = f64;
/// Duration in minutes
pub type Minutes = f64;
