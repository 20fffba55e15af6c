//! Equation of time and declination from a two-body solar orbit.
//!
//! Earth's orbit is treated as a Keplerian ellipse whose eccentricity,
//! longitude of perihelion and obliquity drift slowly (polynomials in Julian
//! centuries since J2000.0). Accurate to a few seconds of equation of time
//! over several centuries, which is well below the resolution prayer times
//! are published at.

use chrono::{DateTime, Duration, Utc};
use std::f64::consts::{FRAC_PI_2, PI, TAU};

use super::duration_from_secs;
use super::kepler::solve_kepler;
use crate::error::SolarError;

/// Unix timestamp of the J2000.0 epoch, 2000-01-01T12:00:00Z.
pub const J2000_UNIX_SECONDS: i64 = 946_728_000;

/// Days per Julian century.
const DAYS_PER_CENTURY: f64 = 36_525.0;

/// Mean anomaly at J2000.0, radians.
const MEAN_ANOMALY_AT_EPOCH: f64 = 6.240_040_77;

/// Anomalistic year in days.
const ANOMALISTIC_YEAR: f64 = 365.259_635_8;

/// Seconds per full turn of hour angle.
const SECONDS_PER_TURN: f64 = 86_400.0;

/// Orbital elements of Earth at one instant, secular drift applied.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrbitalElements {
    pub eccentricity: f64,
    /// Longitude of perihelion, radians.
    pub perihelion_longitude: f64,
    /// Obliquity of the ecliptic, radians.
    pub obliquity: f64,
}

impl OrbitalElements {
    /// Elements at `centuries` Julian centuries after J2000.0.
    pub fn at(centuries: f64) -> Self {
        let t = centuries;
        Self {
            eccentricity: 1.6709e-2 - 4.193e-5 * t - 1.26e-7 * t * t,
            perihelion_longitude: (282.938_07 + 1.7195 * t + 3.025e-4 * t * t).to_radians(),
            obliquity: (23.4393 - 0.013 * t - 2e-7 * t * t + 5e-7 * t * t * t).to_radians(),
        }
    }
}

/// Apparent solar position terms needed for prayer times.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SolarPosition {
    /// Apparent minus mean solar time.
    pub equation_of_time: Duration,
    /// Solar declination, radians.
    pub declination: f64,
}

/// Fractional days elapsed since J2000.0.
pub fn days_since_j2000(instant: DateTime<Utc>) -> f64 {
    let seconds = (instant.timestamp() - J2000_UNIX_SECONDS) as f64
        + f64::from(instant.timestamp_subsec_nanos()) * 1e-9;
    seconds / SECONDS_PER_TURN
}

/// Compute the equation of time and declination at `instant`.
pub fn solar_position(instant: DateTime<Utc>) -> Result<SolarPosition, SolarError> {
    let days = days_since_j2000(instant);
    let elements = OrbitalElements::at(days / DAYS_PER_CENTURY);
    let e = elements.eccentricity;

    let phase = days.rem_euclid(ANOMALISTIC_YEAR);
    let mean_anomaly = (MEAN_ANOMALY_AT_EPOCH + TAU * phase / ANOMALISTIC_YEAR).rem_euclid(TAU);
    let eccentric_anomaly = solve_kepler(mean_anomaly, e)?;

    let cos_e = eccentric_anomaly.cos();
    let mut true_anomaly = ((cos_e - e) / (1.0 - e * cos_e)).clamp(-1.0, 1.0).acos();
    if eccentric_anomaly > PI {
        true_anomaly = TAU - true_anomaly;
    }

    let longitude = (true_anomaly + elements.perihelion_longitude).rem_euclid(TAU);
    let right_ascension = right_ascension(longitude, elements.obliquity);

    let eot_rad = wrap_pi(mean_anomaly + elements.perihelion_longitude - right_ascension);
    let declination = (elements.obliquity.sin() * longitude.sin()).asin();

    Ok(SolarPosition {
        equation_of_time: duration_from_secs(eot_rad / TAU * SECONDS_PER_TURN),
        declination,
    })
}

/// Right ascension for ecliptic longitude `longitude` in [0, 2π), same quadrant.
fn right_ascension(longitude: f64, obliquity: f64) -> f64 {
    // tan λ is undefined at the solstitial colures, where α = λ exactly
    if longitude.cos().abs() < 1e-12 {
        return longitude;
    }

    let alpha = (obliquity.cos() * longitude.tan()).atan();
    if longitude < FRAC_PI_2 {
        alpha
    } else if longitude < 3.0 * FRAC_PI_2 {
        alpha + PI
    } else {
        alpha + TAU
    }
}

/// Wrap an angle into (−π, π].
fn wrap_pi(angle: f64) -> f64 {
    let wrapped = angle.rem_euclid(TAU);
    if wrapped > PI { wrapped - TAU } else { wrapped }
}
