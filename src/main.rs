//! Binary entry point.
//!
//! Parses arguments, merges them over the configuration file, computes the
//! prayer times and prints them as a table or as JSON.

use anyhow::{Context, Result};
use chrono::Utc;
use std::path::PathBuf;

use miqat::args::{self, CliAction, ParsedArgs, RunOptions};
use miqat::config::{self, Config, parse_timezone};
use miqat::config::validation::{validate_latitude, validate_longitude};
use miqat::constants::*;
use miqat::display::{
    PrayerReport, log_calculation_summary, log_prayer_table, log_solar_debug_info,
};
use miqat::logger::Log;
use miqat::prayer::PrayerCalculator;
use miqat::solar::SolarDay;
use miqat::{log_debug, log_end, log_error_exit, log_pipe, log_version, log_warning};

fn main() {
    let parsed = ParsedArgs::parse(std::env::args());

    match parsed.action {
        CliAction::ShowHelp => args::display_help(),
        CliAction::ShowVersion => args::display_version_info(),
        CliAction::ShowHelpDueToError => {
            args::display_help();
            std::process::exit(EXIT_FAILURE);
        }
        CliAction::Run(options) => {
            if let Err(e) = run(options) {
                if Log::is_enabled() {
                    log_error_exit!("{e:#}");
                    log_end!();
                } else {
                    eprintln!("error: {e:#}");
                }
                std::process::exit(EXIT_FAILURE);
            }
        }
    }
}

fn run(options: RunOptions) -> Result<()> {
    if options.json {
        Log::set_enabled(false);
    }

    log_version!();
    if options.debug_enabled {
        log_pipe!();
        log_debug!("Debug mode enabled - showing solar diagnostics");
    }

    config::set_config_dir(options.config_dir.as_ref().map(PathBuf::from))?;
    let config_path = config::get_config_path()?;
    let config = Config::load()?;
    if options.debug_enabled {
        config.log_config(Some(&config_path));
    }

    let method = options.method.unwrap_or(config.method());
    let asr = options.asr.unwrap_or(config.asr());

    let mut location = config.location()?;
    if let Some(lat) = options.latitude {
        validate_latitude(lat)?;
        location.latitude = lat;
    }
    if let Some(lon) = options.longitude {
        validate_longitude(lon)?;
        location.longitude = lon;
    }
    if let Some(ref name) = options.timezone {
        location.timezone = parse_timezone(name)?;
    }

    let location_from_cli =
        options.latitude.is_some() && options.longitude.is_some() && options.timezone.is_some();
    if config.uses_default_location() && !location_from_cli {
        log_pipe!();
        log_warning!(
            "No location configured, using defaults. Set latitude, longitude and timezone in {}",
            miqat::utils::private_path(&config_path)
        );
    }
    if location.latitude.abs() > HIGH_LATITUDE_WARNING {
        log_pipe!();
        log_warning!(
            "Latitude {:.2}° is high: twilight times may not exist on some dates",
            location.latitude
        );
    }

    let timezone = location.timezone;
    let date = options
        .date
        .unwrap_or_else(|| Utc::now().with_timezone(&timezone).date_naive());

    let calculator = PrayerCalculator::new(method, asr);
    let times = calculator
        .calc_times(date, &timezone, location.longitude, location.latitude)
        .with_context(|| format!("Failed to calculate prayer times for {date}"))?;

    if options.json {
        let report = PrayerReport::new(&times, method, asr, timezone.name());
        println!("{}", report.to_json()?);
        return Ok(());
    }

    log_calculation_summary(
        method,
        asr,
        location.latitude,
        location.longitude,
        timezone.name(),
    );
    log_prayer_table(&times, config.time_format());

    if options.debug_enabled {
        let day = SolarDay::new(date, location.longitude, location.latitude)?;
        log_solar_debug_info(&day)?;
    }

    log_end!();
    Ok(())
}
