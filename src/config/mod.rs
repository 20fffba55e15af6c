//! Configuration for miqat: calculation convention, output format and location.
//!
//! ## Configuration Sources
//!
//! `miqat.toml` is read from the directory given with `--config`, otherwise
//! from `$XDG_CONFIG_HOME/miqat/`. A default file is written on first run.
//! An optional `geo.toml` next to it overrides the location, so the main file
//! can be shared without publishing coordinates.
//!
//! ## Configuration Structure
//!
//! ```toml
//! #[Calculation]
//! method = "mwl"            # isna, mwl, egypt, karachi, makkah, tehran, jafari
//! asr = "standard"          # standard or hanafi
//! time_format = "%H:%M:%S"  # strftime pattern for the table
//!
//! #[Location]
//! latitude = 21.4225        # degrees north (-90 to 90)
//! longitude = 39.8262       # degrees east (-180 to 180)
//! timezone = "Asia/Riyadh"  # IANA timezone name
//! ```
//!
//! Every field is optional; missing fields use the defaults in
//! [`crate::constants`]. Values given on the command line take precedence.

pub mod builder;
pub mod loading;
pub mod validation;

use anyhow::{Context, Result};
use chrono_tz::Tz;
use serde::Deserialize;
use std::path::PathBuf;

use crate::constants::*;
use crate::prayer::{AsrMethod, CalculationMethod};
use crate::utils::{format_coordinates, private_path};

pub use builder::create_default_config;
pub use loading::{get_config_path, get_geo_path, load, load_from_path, set_config_dir};

/// Optional `geo.toml` contents.
#[derive(Debug, Deserialize, Clone, Default)]
pub(crate) struct GeoConfig {
    pub(crate) latitude: Option<f64>,
    pub(crate) longitude: Option<f64>,
    pub(crate) timezone: Option<String>,
}

/// Settings loaded from `miqat.toml`, possibly merged with `geo.toml`.
#[derive(Debug, Deserialize, Clone, Default, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    pub method: Option<CalculationMethod>,
    pub asr: Option<AsrMethod>,
    /// chrono strftime pattern used by the table output.
    pub time_format: Option<String>,
    pub latitude: Option<f64>,  // degrees north
    pub longitude: Option<f64>, // degrees east
    /// IANA timezone name, e.g. "Europe/Istanbul".
    pub timezone: Option<String>,

    /// Set when coordinates came from `geo.toml`. Not read from the file.
    #[serde(skip)]
    pub geo_override: bool,
}

/// Fully resolved location.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Location {
    pub latitude: f64,
    pub longitude: f64,
    pub timezone: Tz,
}

impl Config {
    pub fn method(&self) -> CalculationMethod {
        self.method.unwrap_or(DEFAULT_METHOD)
    }

    pub fn asr(&self) -> AsrMethod {
        self.asr.unwrap_or(DEFAULT_ASR)
    }

    pub fn time_format(&self) -> &str {
        self.time_format.as_deref().unwrap_or(DEFAULT_TIME_FORMAT)
    }

    /// Location with defaults filled in and the timezone parsed.
    pub fn location(&self) -> Result<Location> {
        let timezone_name = self.timezone.as_deref().unwrap_or(DEFAULT_TIMEZONE);
        let timezone = parse_timezone(timezone_name)?;
        Ok(Location {
            latitude: self.latitude.unwrap_or(DEFAULT_LATITUDE),
            longitude: self.longitude.unwrap_or(DEFAULT_LONGITUDE),
            timezone,
        })
    }

    /// Whether any part of the location was left at its default.
    pub fn uses_default_location(&self) -> bool {
        self.latitude.is_none() || self.longitude.is_none() || self.timezone.is_none()
    }

    pub fn load() -> Result<Self> {
        load()
    }

    pub fn log_config(&self, path: Option<&PathBuf>) {
        match path {
            Some(path) => log_block_start!("Loaded configuration from {}", private_path(path)),
            None => log_block_start!("Using built-in defaults"),
        }
        if self.geo_override {
            log_indented!("Location overridden by geo.toml");
        }

        let method = self.method();
        log_indented!("Method: {} ({})", method.description(), method.as_str());
        log_indented!("Asr: {}", self.asr().as_str());

        match self.location() {
            Ok(location) => {
                log_indented!(
                    "Location: {}",
                    format_coordinates(location.latitude, location.longitude)
                );
                log_indented!("Timezone: {}", location.timezone.name());
            }
            Err(e) => log_indented!("Location: invalid ({e})"),
        }
    }
}

/// Parse an IANA timezone name.
pub fn parse_timezone(name: &str) -> Result<Tz> {
    name.parse::<Tz>()
        .map_err(|e| anyhow::anyhow!("{e}"))
        .with_context(|| format!("Unknown timezone '{name}'"))
}
