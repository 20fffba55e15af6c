//! # miqat
//!
//! Astronomical prayer time calculation.
//!
//! The library computes, for a date, a place and a timezone, the seven events
//! of a prayer day (fajr, sunrise, dhuhr, asr, maghrib, isha and midnight)
//! from a Keplerian model of the sun's apparent motion.
//!
//! ```no_run
//! use chrono::NaiveDate;
//! use miqat::prayer::{AsrMethod, CalculationMethod, PrayerCalculator};
//!
//! let calc = PrayerCalculator::new(CalculationMethod::Isna, AsrMethod::Standard);
//! let date = NaiveDate::from_ymd_opt(2024, 3, 11).unwrap();
//! let times = calc
//!     .calc_times(date, &chrono_tz::America::New_York, -74.006, 40.7128)
//!     .unwrap();
//! for (prayer, time) in times.iter() {
//!     println!("{prayer}: {}", time.format("%H:%M"));
//! }
//! ```
//!
//! ## Architecture
//!
//! - **Solar core**: `solar` module with the Kepler solver, solar position
//!   model, altitude geometry and secant root finder
//! - **Composition**: `prayer` module with conventions, overrides and the
//!   calculator
//! - **Calendar**: `calendar` module with the lunar month lookup
//! - **Application**: `config`, `args`, `display` and `logger` for the binary

// Import macros from logger module for use in all submodules
#[macro_use]
pub mod logger;

pub mod args;
pub mod calendar;
pub mod config;
pub mod constants;
pub mod display;
pub mod error;
pub mod prayer;
pub mod solar;
pub mod utils;

pub use error::SolarError;
pub use prayer::{AsrMethod, CalculationMethod, MethodConfig, Prayer, PrayerCalculator, PrayerTimes};
