//! Lunar calendar lookup used by calendar-dependent conventions.
//!
//! The prayer calculator only needs to know which lunar month a Gregorian date
//! falls in (Makkah uses a longer isha interval during Ramadan). The lookup is
//! a trait so callers can plug in an observation-based calendar; the default
//! is the Umm al-Qura calendar of Saudi Arabia.

use chrono::{Datelike, NaiveDate};

use crate::error::SolarError;

pub use hijri_date::HijriDate;

/// Ninth lunar month.
pub const RAMADAN: u32 = 9;

/// First Gregorian year covered by the Umm al-Qura tables.
pub const UMM_AL_QURA_MIN_YEAR: i32 = 1938;
/// Last Gregorian year covered by the Umm al-Qura tables.
pub const UMM_AL_QURA_MAX_YEAR: i32 = 2076;

/// Maps a Gregorian date to the lunar month it falls in.
#[cfg_attr(test, mockall::automock)]
pub trait LunarCalendar {
    /// Lunar month number in 1..=12.
    ///
    /// # Errors
    ///
    /// [`SolarError::UnsupportedDate`] when the calendar has no data for
    /// `date`.
    fn lunar_month(&self, date: NaiveDate) -> Result<u32, SolarError>;
}

/// Umm al-Qura calendar, the official calendar of Saudi Arabia.
///
/// Month starts come from the published tables, so Ramadan begins and ends
/// on the same days as in Makkah.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UmmAlQuraCalendar;

impl UmmAlQuraCalendar {
    /// Convert a Gregorian date inside the table range.
    pub fn to_hijri(&self, date: NaiveDate) -> Result<HijriDate, SolarError> {
        if !(UMM_AL_QURA_MIN_YEAR..=UMM_AL_QURA_MAX_YEAR).contains(&date.year()) {
            return Err(SolarError::UnsupportedDate(date));
        }
        // Year is positive after the range check
        HijriDate::from_gr(
            date.year() as usize,
            date.month() as usize,
            date.day() as usize,
        )
        .map_err(|_| SolarError::UnsupportedDate(date))
    }
}

impl LunarCalendar for UmmAlQuraCalendar {
    fn lunar_month(&self, date: NaiveDate) -> Result<u32, SolarError> {
        let month = self.to_hijri(date)?.month();
        u32::try_from(month).map_err(|_| SolarError::UnsupportedDate(date))
    }
}
