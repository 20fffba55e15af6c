//! Configuration validation.
//!
//! Catches values the calculator would reject later, with messages that point
//! at the offending field.

use anyhow::Result;
use chrono::format::{Item, StrftimeItems};

use super::{Config, parse_timezone};
use crate::constants::*;

pub fn validate_config(config: &Config) -> Result<()> {
    if let Some(lat) = config.latitude {
        validate_latitude(lat)?;
    }

    if let Some(lon) = config.longitude {
        validate_longitude(lon)?;
    }

    if let Some(ref timezone) = config.timezone {
        parse_timezone(timezone)?;
    }

    if let Some(ref format) = config.time_format {
        validate_time_format(format)?;
    }

    Ok(())
}

pub fn validate_latitude(lat: f64) -> Result<()> {
    if !(MINIMUM_LATITUDE..=MAXIMUM_LATITUDE).contains(&lat) {
        anyhow::bail!(
            "latitude must be between {} and {} degrees (got {})",
            MINIMUM_LATITUDE,
            MAXIMUM_LATITUDE,
            lat
        );
    }
    Ok(())
}

pub fn validate_longitude(lon: f64) -> Result<()> {
    if !(MINIMUM_LONGITUDE..=MAXIMUM_LONGITUDE).contains(&lon) {
        anyhow::bail!(
            "longitude must be between {} and {} degrees (got {})",
            MINIMUM_LONGITUDE,
            MAXIMUM_LONGITUDE,
            lon
        );
    }
    Ok(())
}

/// Reject empty patterns and unknown `%` specifiers.
pub fn validate_time_format(format: &str) -> Result<()> {
    if format.trim().is_empty() {
        anyhow::bail!("time_format cannot be empty");
    }
    if StrftimeItems::new(format).any(|item| matches!(item, Item::Error)) {
        anyhow::bail!("time_format '{format}' is not a valid strftime pattern");
    }
    Ok(())
}
