//! Astronomical core for solar event times.
//!
//! Everything here works in UTC and is free of side effects. Localization into
//! a caller's timezone happens in [`crate::prayer`].
//!
//! ## Module Structure
//!
//! - [`kepler`]: Newton-Raphson solver for Kepler's equation
//! - [`position`]: Equation of time and declination for an instant
//! - [`altitude`]: Hour-angle offsets for target altitudes and shadow factors
//! - [`root_finder`]: Secant solver over instant-to-duration functions
//! - [`events`]: Transit, morning crossings and mirroring for one date and place
//!
//! Event times depend on the solar position at the event itself, so every
//! crossing is found as the fixed point of "event time given solar position at
//! guess" using the secant solver.

pub mod altitude;
pub mod events;
pub mod kepler;
pub mod position;
pub mod root_finder;

pub use altitude::{altitude_for_shadow_factor, time_offset_for_altitude};
pub use events::SolarDay;
pub use kepler::solve_kepler;
pub use position::{OrbitalElements, SolarPosition, solar_position};
pub use root_finder::solve_secant;

use chrono::Duration;

/// Convert fractional seconds to a duration, rounded to the nearest nanosecond.
pub fn duration_from_secs(seconds: f64) -> Duration {
    Duration::nanoseconds((seconds * 1e9).round() as i64)
}

/// Fractional seconds in a duration.
pub fn duration_secs(duration: Duration) -> f64 {
    duration.num_seconds() as f64 + f64::from(duration.subsec_nanos()) * 1e-9
}

/// Offset of local mean time from UTC for a longitude (degrees east).
pub fn longitude_offset(longitude: f64) -> Duration {
    duration_from_secs(longitude / 15.0 * 3600.0)
}
