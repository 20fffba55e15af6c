//! Error type for the solar computation core.
//!
//! Every failure is raised by the operation that detects it and propagates
//! unchanged through [`crate::prayer::PrayerCalculator`] to the caller.

use chrono::NaiveDate;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Errors from solar position, altitude and root-finding calculations.
#[derive(Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum SolarError {
    /// Orbital eccentricity outside the open interval (0, 1).
    Domain { eccentricity: f64 },
    /// The sun never reaches the requested altitude at this latitude and
    /// declination (polar day or night, or persistent twilight).
    UnreachableAltitude {
        /// Requested altitude below the horizon, radians.
        altitude: f64,
        /// Solar declination used, radians.
        declination: f64,
        /// Observer latitude, degrees north.
        latitude: f64,
    },
    /// Root finder seeded with two coincident instants.
    InvalidGuess,
    /// Iterative algorithm hit its iteration cap.
    NoConvergence(&'static str),
    /// Invalid geographic location parameter.
    InvalidLocation(&'static str),
    /// The lunar calendar has no data for this date.
    UnsupportedDate(NaiveDate),
}

impl Display for SolarError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Domain { eccentricity } => {
                write!(f, "eccentricity out of range (0, 1): {eccentricity}")
            }
            Self::UnreachableAltitude {
                altitude,
                declination,
                latitude,
            } => write!(
                f,
                "sun does not reach {:.3}° below the horizon at latitude {latitude:.4}° (declination {:.3}°)",
                altitude.to_degrees(),
                declination.to_degrees()
            ),
            Self::InvalidGuess => write!(f, "root finder guesses must differ"),
            Self::NoConvergence(what) => write!(f, "no convergence: {what}"),
            Self::InvalidLocation(msg) => write!(f, "invalid location: {msg}"),
            Self::UnsupportedDate(date) => {
                write!(f, "no lunar calendar data for {date}")
            }
        }
    }
}

impl Error for SolarError {}
