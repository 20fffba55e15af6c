//! Output rendering for computed prayer times.
//!
//! The table and the diagnostics go through the logger; JSON is written
//! straight to stdout so it stays machine-readable.

use anyhow::Result;
use chrono::{DateTime, FixedOffset, NaiveDate, SubsecRound, TimeZone};
use serde::Serialize;
use std::fmt::Display;

use crate::prayer::{AsrMethod, CalculationMethod, Prayer, PrayerTimes};
use crate::solar::{SolarDay, duration_secs};
use crate::utils::{format_coordinates, format_signed_minutes};

/// Serializable snapshot of one day's prayer times.
#[derive(Debug, Serialize)]
pub struct PrayerReport {
    pub date: NaiveDate,
    pub method: CalculationMethod,
    pub asr: AsrMethod,
    pub timezone: String,
    pub times: Vec<TimeEntry>,
}

#[derive(Debug, Serialize)]
pub struct TimeEntry {
    pub name: Prayer,
    /// RFC 3339, rounded to the second.
    pub time: DateTime<FixedOffset>,
}

impl PrayerReport {
    pub fn new<Tz: TimeZone>(
        times: &PrayerTimes<Tz>,
        method: CalculationMethod,
        asr: AsrMethod,
        timezone: impl Into<String>,
    ) -> Self {
        Self {
            date: times.date(),
            method,
            asr,
            timezone: timezone.into(),
            times: times
                .iter()
                .map(|(name, time)| TimeEntry {
                    name,
                    time: time.fixed_offset().round_subsecs(0),
                })
                .collect(),
        }
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Log the prayer times as an aligned table.
///
/// Times falling on a later calendar day than the requested date are marked
/// with `(+1)`.
pub fn log_prayer_table<Tz>(times: &PrayerTimes<Tz>, time_format: &str)
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    log_block_start!("Prayer times for {}", times.date().format("%A, %-d %B %Y"));
    for (prayer, time) in times.iter() {
        let time = time.clone().round_subsecs(0);
        let marker = if time.date_naive() > times.date() {
            " (+1)"
        } else {
            ""
        };
        log_indented!(
            "{:<9} {}{marker}",
            prayer.label(),
            time.format(time_format)
        );
    }
}

/// Log where and how the times were computed.
pub fn log_calculation_summary(
    method: CalculationMethod,
    asr: AsrMethod,
    latitude: f64,
    longitude: f64,
    timezone: &str,
) {
    log_block_start!("{} ({})", method.description(), method.as_str());
    log_indented!("Asr: {}", asr.as_str());
    log_indented!("Location: {}", format_coordinates(latitude, longitude));
    log_indented!("Timezone: {timezone}");
}

/// Log solar diagnostics for the day: transit, equation of time, declination.
pub fn log_solar_debug_info(day: &SolarDay) -> Result<()> {
    let position = day.transit_position()?;

    log_pipe!();
    log_debug!("Solar calculation details:");
    log_indented!(
        "Transit (UTC):    {}",
        day.transit().round_subsecs(0).format("%Y-%m-%d %H:%M:%S")
    );
    log_indented!(
        "Equation of time: {} ({:.2}s)",
        format_signed_minutes(duration_secs(position.equation_of_time)),
        duration_secs(position.equation_of_time)
    );
    log_indented!(
        "Declination:      {:+.4}°",
        position.declination.to_degrees()
    );
    Ok(())
}
