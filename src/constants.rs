//! Application-wide constants and defaults.

use crate::prayer::{AsrMethod, CalculationMethod};

// # Astronomy

/// Depression of the sun's centre at sunrise and sunset: half the solar disc
/// plus standard atmospheric refraction, in degrees.
pub const SUNSET_ALTITUDE_DEG: f64 = 0.833;

// # Calculation defaults

pub const DEFAULT_METHOD: CalculationMethod = CalculationMethod::Mwl;
pub const DEFAULT_ASR: AsrMethod = AsrMethod::Standard;

/// strftime pattern for the table output.
pub const DEFAULT_TIME_FORMAT: &str = "%H:%M:%S";

// # Location defaults (the Kaaba, used until the user configures a location)

pub const DEFAULT_LATITUDE: f64 = 21.4225;
pub const DEFAULT_LONGITUDE: f64 = 39.8262;
pub const DEFAULT_TIMEZONE: &str = "Asia/Riyadh";

// # Validation limits

pub const MINIMUM_LATITUDE: f64 = -90.0;
pub const MAXIMUM_LATITUDE: f64 = 90.0;
pub const MINIMUM_LONGITUDE: f64 = -180.0;
pub const MAXIMUM_LONGITUDE: f64 = 180.0;

/// Above this latitude the sun fails to reach twilight depressions for part of
/// the year; the binary warns when configured beyond it.
pub const HIGH_LATITUDE_WARNING: f64 = 48.5;

// # Files

pub const CONFIG_DIR_NAME: &str = "miqat";
pub const CONFIG_FILE_NAME: &str = "miqat.toml";
pub const GEO_FILE_NAME: &str = "geo.toml";

// # Exit codes

pub const EXIT_FAILURE: i32 = 1;
