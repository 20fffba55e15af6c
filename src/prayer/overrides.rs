//! Per-convention replacements for individual base events.

use chrono::{DateTime, Duration, Utc};

use super::{EventSet, Prayer};
use crate::calendar::{LunarCalendar, RAMADAN};
use crate::error::SolarError;
use crate::solar::SolarDay;

/// Replacement rule for one or more events of the base set.
///
/// Every rule reads the unmodified base set, so rules never see each other's
/// results and their order only matters when two rules write the same event.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TimeOverride {
    /// Maghrib when the sun is this many degrees below the horizon, instead
    /// of at sunset.
    MaghribAltitude(f64),
    /// Midnight halfway between sunset and the next day's fajr, instead of
    /// the next day's sunrise.
    MidnightToFajr,
    /// Isha a fixed number of minutes after sunset; `ramadan_minutes` applies
    /// during the ninth lunar month.
    IshaAfterMaghrib { minutes: i64, ramadan_minutes: i64 },
}

/// Inputs available to overrides besides the base set.
pub(crate) struct OverrideContext<'a> {
    pub day: &'a SolarDay,
    pub fajr_altitude: f64,
    pub calendar: &'a dyn LunarCalendar,
}

impl TimeOverride {
    /// Compute the replacement events from the base set.
    pub(crate) fn apply(
        &self,
        base: &EventSet,
        ctx: &OverrideContext<'_>,
    ) -> Result<Vec<(Prayer, DateTime<Utc>)>, SolarError> {
        match *self {
            TimeOverride::MaghribAltitude(depression) => {
                let maghrib = ctx.day.mirror(ctx.day.rising_time(depression)?);
                Ok(vec![(Prayer::Maghrib, maghrib)])
            }
            TimeOverride::MidnightToFajr => {
                let sunset = base.get(Prayer::Maghrib);
                let next_fajr = ctx.day.next_day()?.rising_time(ctx.fajr_altitude)?;
                Ok(vec![(Prayer::Midnight, sunset + (next_fajr - sunset) / 2)])
            }
            TimeOverride::IshaAfterMaghrib {
                minutes,
                ramadan_minutes,
            } => {
                let minutes = if ctx.calendar.lunar_month(ctx.day.date())? == RAMADAN {
                    ramadan_minutes
                } else {
                    minutes
                };
                let isha = base.get(Prayer::Maghrib) + Duration::minutes(minutes);
                Ok(vec![(Prayer::Isha, isha)])
            }
        }
    }
}
