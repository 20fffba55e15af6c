//! Solar events for one calendar date at one location.

use chrono::{DateTime, Duration, NaiveDate, NaiveTime, Utc};

use super::altitude::{altitude_for_shadow_factor, time_offset_for_altitude};
use super::longitude_offset;
use super::position::{SolarPosition, solar_position};
use super::root_finder::solve_secant;
use crate::error::SolarError;

/// Half-width of the transit search bracket around mean noon. The equation of
/// time stays within about ±16 minutes.
const TRANSIT_BRACKET_MINUTES: i64 = 20;

/// Event finder bound to a date and a location, with its transit precomputed.
///
/// Morning events are searched between local midnight and transit; afternoon
/// and evening events come from [`SolarDay::mirror`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SolarDay {
    date: NaiveDate,
    longitude: f64,
    latitude: f64,
    transit: DateTime<Utc>,
}

impl SolarDay {
    /// Bind to `date` at `longitude` (degrees east) and `latitude` (degrees
    /// north), solving for the moment of solar transit.
    pub fn new(date: NaiveDate, longitude: f64, latitude: f64) -> Result<Self, SolarError> {
        let mean_noon = utc_midnight(date) + Duration::hours(12) - longitude_offset(longitude);
        let bracket = Duration::minutes(TRANSIT_BRACKET_MINUTES);

        let transit = solve_secant(
            |guess| {
                let SolarPosition {
                    equation_of_time, ..
                } = solar_position(guess)?;
                Ok(mean_noon - equation_of_time - guess)
            },
            mean_noon - bracket,
            mean_noon + bracket,
        )?;

        Ok(Self {
            date,
            longitude,
            latitude,
            transit,
        })
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    /// Solar transit (dhuhr).
    pub fn transit(&self) -> DateTime<Utc> {
        self.transit
    }

    /// Morning moment at which the sun stands `depression` degrees below the
    /// horizon (negative for above).
    pub fn rising_time(&self, depression: f64) -> Result<DateTime<Utc>, SolarError> {
        let depression = depression.to_radians();
        self.solve_morning(|declination| {
            time_offset_for_altitude(depression, declination, self.latitude)
        })
    }

    /// Morning moment at which a shadow exceeds its transit length by
    /// `shadow_factor` times the object's height.
    pub fn shadow_time(&self, shadow_factor: f64) -> Result<DateTime<Utc>, SolarError> {
        self.solve_morning(|declination| {
            let altitude = altitude_for_shadow_factor(shadow_factor, declination, self.latitude);
            time_offset_for_altitude(-altitude, declination, self.latitude)
        })
    }

    /// Reflect a morning instant through transit into the afternoon.
    pub fn mirror(&self, morning: DateTime<Utc>) -> DateTime<Utc> {
        self.transit + (self.transit - morning)
    }

    /// Solar position at transit, for diagnostics.
    pub fn transit_position(&self) -> Result<SolarPosition, SolarError> {
        solar_position(self.transit)
    }

    /// Same location, following calendar day.
    pub fn next_day(&self) -> Result<Self, SolarError> {
        let next = self
            .date
            .succ_opt()
            .ok_or(SolarError::InvalidLocation("date out of range"))?;
        Self::new(next, self.longitude, self.latitude)
    }

    fn solve_morning<F>(&self, offset_at: F) -> Result<DateTime<Utc>, SolarError>
    where
        F: Fn(f64) -> Result<Duration, SolarError>,
    {
        let local_midnight = utc_midnight(self.date) - longitude_offset(self.longitude);
        solve_secant(
            |guess| {
                let declination = solar_position(guess)?.declination;
                Ok(self.transit - offset_at(declination)? - guess)
            },
            local_midnight,
            self.transit,
        )
    }
}

fn utc_midnight(date: NaiveDate) -> DateTime<Utc> {
    date.and_time(NaiveTime::MIN).and_utc()
}
