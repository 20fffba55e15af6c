//! Prayer time composition.
//!
//! A [`PrayerCalculator`] turns the solar events of one day into the seven
//! named times of a calculation convention:
//!
//! - **Fajr**: morning, sun at the convention's fajr depression
//! - **Sunrise**: morning, sun 0.833° below the horizon (disc and refraction)
//! - **Dhuhr**: solar transit
//! - **Asr**: afternoon, shadow grown by the asr shadow factor
//! - **Maghrib**: sunset, the mirror of sunrise through transit
//! - **Isha**: evening, sun at the convention's isha depression
//! - **Midnight**: halfway between sunset and the next sunrise
//!
//! Conventions that deviate from this base set carry [`TimeOverride`]s.

pub mod method;
pub mod overrides;

pub use method::{AsrMethod, CalculationMethod, MethodConfig};
pub use overrides::TimeOverride;

#[cfg(test)]
mod tests;

use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use serde::Serialize;
use std::fmt;

use crate::calendar::{LunarCalendar, UmmAlQuraCalendar};
use crate::constants::SUNSET_ALTITUDE_DEG;
use crate::error::SolarError;
use crate::solar::SolarDay;
use overrides::OverrideContext;

/// Named event of a prayer day, in chronological order.
#[derive(Debug, Serialize, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Prayer {
    Fajr,
    Sunrise,
    Dhuhr,
    Asr,
    Maghrib,
    Isha,
    Midnight,
}

impl Prayer {
    pub const ALL: [Prayer; 7] = [
        Prayer::Fajr,
        Prayer::Sunrise,
        Prayer::Dhuhr,
        Prayer::Asr,
        Prayer::Maghrib,
        Prayer::Isha,
        Prayer::Midnight,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Prayer::Fajr => "fajr",
            Prayer::Sunrise => "sunrise",
            Prayer::Dhuhr => "dhuhr",
            Prayer::Asr => "asr",
            Prayer::Maghrib => "maghrib",
            Prayer::Isha => "isha",
            Prayer::Midnight => "midnight",
        }
    }

    /// Capitalized name for display.
    pub fn label(&self) -> &'static str {
        match self {
            Prayer::Fajr => "Fajr",
            Prayer::Sunrise => "Sunrise",
            Prayer::Dhuhr => "Dhuhr",
            Prayer::Asr => "Asr",
            Prayer::Maghrib => "Maghrib",
            Prayer::Isha => "Isha",
            Prayer::Midnight => "Midnight",
        }
    }

    fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Prayer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// UTC instants of all events, indexed by [`Prayer`].
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct EventSet([DateTime<Utc>; 7]);

impl EventSet {
    pub(crate) fn get(&self, prayer: Prayer) -> DateTime<Utc> {
        self.0[prayer.index()]
    }

    fn set(&mut self, prayer: Prayer, instant: DateTime<Utc>) {
        self.0[prayer.index()] = instant;
    }
}

/// Prayer times for one date, localized to the requested timezone.
///
/// Midnight may fall on the following calendar day.
#[derive(Debug, Clone, PartialEq)]
pub struct PrayerTimes<Tz: TimeZone> {
    date: NaiveDate,
    times: [DateTime<Tz>; 7],
}

impl<Tz: TimeZone> PrayerTimes<Tz> {
    /// The date the times were computed for.
    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn get(&self, prayer: Prayer) -> &DateTime<Tz> {
        &self.times[prayer.index()]
    }

    /// Events in chronological order.
    pub fn iter(&self) -> impl Iterator<Item = (Prayer, &DateTime<Tz>)> + '_ {
        Prayer::ALL.into_iter().zip(self.times.iter())
    }

    pub fn fajr(&self) -> &DateTime<Tz> {
        self.get(Prayer::Fajr)
    }

    pub fn sunrise(&self) -> &DateTime<Tz> {
        self.get(Prayer::Sunrise)
    }

    pub fn dhuhr(&self) -> &DateTime<Tz> {
        self.get(Prayer::Dhuhr)
    }

    pub fn asr(&self) -> &DateTime<Tz> {
        self.get(Prayer::Asr)
    }

    pub fn maghrib(&self) -> &DateTime<Tz> {
        self.get(Prayer::Maghrib)
    }

    pub fn isha(&self) -> &DateTime<Tz> {
        self.get(Prayer::Isha)
    }

    pub fn midnight(&self) -> &DateTime<Tz> {
        self.get(Prayer::Midnight)
    }
}

/// Computes prayer times for a fixed convention.
///
/// Stateless apart from its configuration, so one calculator can serve any
/// number of dates, places and timezones, from any thread when the calendar
/// allows it.
#[derive(Debug, Clone)]
pub struct PrayerCalculator<C = UmmAlQuraCalendar> {
    config: MethodConfig,
    calendar: C,
}

impl PrayerCalculator {
    /// Calculator for a named convention using the Umm al-Qura calendar.
    pub fn new(method: CalculationMethod, asr: AsrMethod) -> Self {
        Self::from_config(method.config(asr))
    }

    /// Calculator for a custom parameter set.
    pub fn from_config(config: MethodConfig) -> Self {
        Self::with_calendar(config, UmmAlQuraCalendar)
    }
}

impl Default for PrayerCalculator {
    fn default() -> Self {
        Self::from_config(MethodConfig::default())
    }
}

impl<C: LunarCalendar> PrayerCalculator<C> {
    /// Calculator with an injected lunar calendar.
    pub fn with_calendar(config: MethodConfig, calendar: C) -> Self {
        Self { config, calendar }
    }

    pub fn config(&self) -> &MethodConfig {
        &self.config
    }

    /// Compute all prayer times for `date` at `longitude` (degrees east) and
    /// `latitude` (degrees north), expressed in `tz`.
    ///
    /// # Errors
    /// - [`SolarError::InvalidLocation`] for out-of-range or non-finite coordinates
    /// - [`SolarError::UnreachableAltitude`] when the sun does not reach one of
    ///   the configured altitudes on this date (high latitudes)
    /// - [`SolarError::NoConvergence`] if a solver fails to settle
    /// - [`SolarError::UnsupportedDate`] when a calendar-dependent convention
    ///   asks the lunar calendar about a date it does not cover
    pub fn calc_times<Tz: TimeZone>(
        &self,
        date: NaiveDate,
        tz: &Tz,
        longitude: f64,
        latitude: f64,
    ) -> Result<PrayerTimes<Tz>, SolarError> {
        validate_location(longitude, latitude)?;

        let day = SolarDay::new(date, longitude, latitude)?;
        let base = self.base_times(&day)?;

        let ctx = OverrideContext {
            day: &day,
            fajr_altitude: self.config.fajr_altitude,
            calendar: &self.calendar,
        };
        let mut times = base.clone();
        for time_override in &self.config.overrides {
            for (prayer, instant) in time_override.apply(&base, &ctx)? {
                times.set(prayer, instant);
            }
        }

        Ok(PrayerTimes {
            date,
            times: times.0.map(|instant| instant.with_timezone(tz)),
        })
    }

    fn base_times(&self, day: &SolarDay) -> Result<EventSet, SolarError> {
        let fajr = day.rising_time(self.config.fajr_altitude)?;
        let sunrise = day.rising_time(SUNSET_ALTITUDE_DEG)?;
        let dhuhr = day.transit();
        let asr = day.mirror(day.shadow_time(self.config.asr.shadow_factor())?);
        let maghrib = day.mirror(sunrise);
        let isha = day.mirror(day.rising_time(self.config.isha_altitude)?);

        let next_sunrise = day.next_day()?.rising_time(SUNSET_ALTITUDE_DEG)?;
        let midnight = maghrib + (next_sunrise - maghrib) / 2;

        Ok(EventSet([
            fajr, sunrise, dhuhr, asr, maghrib, isha, midnight,
        ]))
    }
}

/// Reject coordinates the solar model cannot place.
pub fn validate_location(longitude: f64, latitude: f64) -> Result<(), SolarError> {
    if !latitude.is_finite() || !longitude.is_finite() {
        return Err(SolarError::InvalidLocation("coordinates must be finite"));
    }
    if !(-90.0..=90.0).contains(&latitude) {
        return Err(SolarError::InvalidLocation(
            "latitude must be between -90 and 90 degrees",
        ));
    }
    if !(-180.0..=180.0).contains(&longitude) {
        return Err(SolarError::InvalidLocation(
            "longitude must be between -180 and 180 degrees",
        ));
    }
    Ok(())
}
