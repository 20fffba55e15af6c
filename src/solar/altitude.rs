//! Hour-angle geometry: how far from transit the sun sits at a given altitude.

use chrono::Duration;
use std::f64::consts::TAU;

use super::duration_from_secs;
use crate::error::SolarError;

/// Time between solar transit and the moment the sun stands `depression`
/// radians below the horizon (negative for above), on either side of transit.
///
/// # Errors
/// [`SolarError::UnreachableAltitude`] when the sun never reaches that
/// altitude for this declination and latitude.
pub fn time_offset_for_altitude(
    depression: f64,
    declination: f64,
    latitude: f64,
) -> Result<Duration, SolarError> {
    let phi = latitude.to_radians();
    let cos_hour_angle =
        (-depression.sin() - phi.sin() * declination.sin()) / (phi.cos() * declination.cos());

    if !(-1.0..=1.0).contains(&cos_hour_angle) {
        return Err(SolarError::UnreachableAltitude {
            altitude: depression,
            declination,
            latitude,
        });
    }

    let hour_angle = cos_hour_angle.acos();
    Ok(duration_from_secs(hour_angle / TAU * 86_400.0))
}

/// Solar altitude (radians) at which a vertical object's shadow equals
/// `shadow_factor` times its height plus its length at transit.
///
/// The transit shadow uses the absolute zenith distance `|φ − δ|`, so it is
/// the same length whether the sun culminates north or south of the zenith.
pub fn altitude_for_shadow_factor(shadow_factor: f64, declination: f64, latitude: f64) -> f64 {
    let noon_shadow = (latitude.to_radians() - declination).abs().tan();
    1f64.atan2(shadow_factor + noon_shadow)
}
