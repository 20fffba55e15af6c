use super::*;
use crate::calendar::MockLunarCalendar;
use chrono::{FixedOffset, NaiveDateTime, NaiveTime, Offset};

const KAABA: (f64, f64) = (39.8262, 21.4225);
const NYC: (f64, f64) = (-74.0060, 40.7128);

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn utc_plus(hours: i32) -> FixedOffset {
    FixedOffset::east_opt(hours * 3600).unwrap()
}

/// Seconds from local midnight of `day` to `instant`, in the instant's zone.
fn local_secs<Tz: TimeZone>(day: NaiveDate, instant: &DateTime<Tz>) -> f64 {
    let start: NaiveDateTime = day.and_time(NaiveTime::MIN);
    let delta = instant.naive_local() - start;
    delta.num_milliseconds() as f64 / 1000.0
}

fn hms(h: u32, m: u32, s: f64) -> f64 {
    f64::from(h * 3600 + m * 60) + s
}

fn assert_near<Tz: TimeZone>(
    day: NaiveDate,
    times: &PrayerTimes<Tz>,
    prayer: Prayer,
    expected: f64,
    tolerance: f64,
) {
    let actual = local_secs(day, times.get(prayer));
    assert!(
        (actual - expected).abs() <= tolerance,
        "{prayer}: got {actual:.2}s, expected {expected:.2}s (±{tolerance}s)"
    );
}

fn kaaba_times(method: CalculationMethod, asr: AsrMethod) -> PrayerTimes<FixedOffset> {
    let (lon, lat) = KAABA;
    PrayerCalculator::new(method, asr)
        .calc_times(date(2021, 1, 1), &utc_plus(3), lon, lat)
        .unwrap()
}

#[test]
fn test_isna_new_york_reference() {
    let day = date(2000, 1, 1);
    let (lon, lat) = NYC;
    let times = PrayerCalculator::new(CalculationMethod::Isna, AsrMethod::Standard)
        .calc_times(day, &utc_plus(-5), lon, lat)
        .unwrap();

    let expected = [
        (Prayer::Fajr, hms(5, 58, 15.22)),
        (Prayer::Sunrise, hms(7, 20, 9.30)),
        (Prayer::Dhuhr, hms(11, 59, 25.67)),
        (Prayer::Asr, hms(14, 20, 54.96)),
        (Prayer::Maghrib, hms(16, 38, 42.05)),
        (Prayer::Isha, hms(18, 0, 36.12)),
        (Prayer::Midnight, hms(23, 59, 29.07)),
    ];
    for (prayer, secs) in expected {
        assert_near(day, &times, prayer, secs, 1.0);
    }
    assert_eq!(times.date(), day);
}

#[test]
fn test_kaaba_isna_all_times() {
    let day = date(2021, 1, 1);
    let times = kaaba_times(CalculationMethod::Isna, AsrMethod::Standard);

    let expected = [
        (Prayer::Fajr, hms(5, 53, 9.0)),
        (Prayer::Sunrise, hms(6, 58, 42.0)),
        (Prayer::Dhuhr, hms(12, 24, 19.0)),
        (Prayer::Asr, hms(15, 29, 0.0)),
        (Prayer::Maghrib, hms(17, 49, 56.0)),
        (Prayer::Isha, hms(18, 55, 29.0)),
        // Past local midnight, on the following day
        (Prayer::Midnight, hms(24, 24, 28.0)),
    ];
    for (prayer, secs) in expected {
        assert_near(day, &times, prayer, secs, 1.5);
    }
}

#[test]
fn test_kaaba_against_published_timetable() {
    // Published timetable, rounded to the minute
    let day = date(2021, 1, 1);
    let published = [
        (
            CalculationMethod::Isna,
            [(5, 53), (6, 58), (12, 24), (15, 29), (17, 50), (18, 56)],
        ),
        (
            CalculationMethod::Mwl,
            [(5, 40), (6, 58), (12, 24), (15, 29), (17, 50), (19, 5)],
        ),
    ];

    for (method, rows) in published {
        let times = kaaba_times(method, AsrMethod::Standard);
        for (prayer, (h, m)) in Prayer::ALL.into_iter().zip(rows) {
            assert_near(day, &times, prayer, hms(h, m, 0.0), 60.0);
        }
    }
}

#[test]
fn test_twilight_depth_per_method() {
    let day = date(2021, 1, 1);
    let cases = [
        (CalculationMethod::Mwl, hms(5, 39, 32.0), hms(19, 4, 34.0)),
        (CalculationMethod::Egypt, hms(5, 32, 46.0), hms(19, 6, 50.0)),
    ];

    for (method, fajr, isha) in cases {
        let times = kaaba_times(method, AsrMethod::Standard);
        assert_near(day, &times, Prayer::Fajr, fajr, 1.5);
        assert_near(day, &times, Prayer::Isha, isha, 1.5);
    }
}

#[test]
fn test_tehran_overrides() {
    let day = date(2021, 1, 1);
    let times = kaaba_times(CalculationMethod::Tehran, AsrMethod::Standard);
    assert_near(day, &times, Prayer::Fajr, hms(5, 40, 54.0), 1.5);
    assert_near(day, &times, Prayer::Maghrib, hms(18, 7, 9.0), 1.5);
    assert_near(day, &times, Prayer::Isha, hms(18, 50, 56.0), 1.5);
    assert_near(day, &times, Prayer::Midnight, hms(23, 45, 36.0), 1.5);

    // Sunrise, dhuhr and asr are untouched
    let isna = kaaba_times(CalculationMethod::Isna, AsrMethod::Standard);
    for prayer in [Prayer::Sunrise, Prayer::Dhuhr, Prayer::Asr] {
        assert_eq!(times.get(prayer), isna.get(prayer));
    }
}

#[test]
fn test_jafari_overrides() {
    let day = date(2021, 1, 1);
    let times = kaaba_times(CalculationMethod::Jafari, AsrMethod::Standard);
    assert_near(day, &times, Prayer::Fajr, hms(5, 48, 36.0), 1.5);
    assert_near(day, &times, Prayer::Maghrib, hms(18, 4, 49.0), 1.5);
    assert_near(day, &times, Prayer::Isha, hms(18, 50, 56.0), 1.5);
    assert_near(day, &times, Prayer::Midnight, hms(23, 49, 27.0), 1.5);
}

#[test]
fn test_midnight_to_fajr_uses_sunset_not_override_maghrib() {
    let day = date(2021, 1, 1);
    let (lon, lat) = KAABA;
    let tz = utc_plus(3);
    let plain = MethodConfig::new(16.0, 14.0, AsrMethod::Standard);
    let sunset = *PrayerCalculator::from_config(plain.clone())
        .calc_times(day, &tz, lon, lat)
        .unwrap()
        .maghrib();

    let both = plain
        .clone()
        .with_override(TimeOverride::MaghribAltitude(4.0))
        .with_override(TimeOverride::MidnightToFajr);
    let times = PrayerCalculator::from_config(both)
        .calc_times(day, &tz, lon, lat)
        .unwrap();

    let next_fajr = *PrayerCalculator::from_config(plain)
        .calc_times(day.succ_opt().unwrap(), &tz, lon, lat)
        .unwrap()
        .fajr();
    assert_eq!(*times.midnight(), sunset + (next_fajr - sunset) / 2);
    assert!(*times.maghrib() > sunset);
}

#[test]
fn test_hanafi_asr_is_later() {
    let day = date(2021, 1, 1);
    let hanafi = kaaba_times(CalculationMethod::Mwl, AsrMethod::Hanafi);
    assert_near(day, &hanafi, Prayer::Asr, hms(16, 14, 13.0), 1.5);

    let standard = kaaba_times(CalculationMethod::Mwl, AsrMethod::Standard);
    assert!(hanafi.asr() > standard.asr());
    assert_eq!(hanafi.fajr(), standard.fajr());
}

#[test]
fn test_makkah_isha_outside_ramadan() {
    let mut calendar = MockLunarCalendar::new();
    calendar
        .expect_lunar_month()
        .withf(|d| *d == NaiveDate::from_ymd_opt(2021, 1, 1).unwrap())
        .times(1)
        .returning(|_| Ok(5));

    let (lon, lat) = KAABA;
    let calc = PrayerCalculator::with_calendar(
        CalculationMethod::Makkah.config(AsrMethod::Standard),
        calendar,
    );
    let times = calc.calc_times(date(2021, 1, 1), &utc_plus(3), lon, lat).unwrap();

    assert_eq!(*times.isha() - *times.maghrib(), chrono::Duration::minutes(90));
}

#[test]
fn test_makkah_isha_during_ramadan() {
    let mut calendar = MockLunarCalendar::new();
    calendar.expect_lunar_month().returning(|_| Ok(9));

    let (lon, lat) = KAABA;
    let calc = PrayerCalculator::with_calendar(
        CalculationMethod::Makkah.config(AsrMethod::Standard),
        calendar,
    );
    let times = calc.calc_times(date(2023, 4, 1), &utc_plus(3), lon, lat).unwrap();

    assert_eq!(*times.isha() - *times.maghrib(), chrono::Duration::minutes(120));
}

#[test]
fn test_makkah_with_umm_al_qura_calendar() {
    let (lon, lat) = KAABA;
    let calc = PrayerCalculator::new(CalculationMethod::Makkah, AsrMethod::Standard);
    let isha_gap = |d: NaiveDate| {
        let times = calc.calc_times(d, &utc_plus(3), lon, lat).unwrap();
        *times.isha() - *times.maghrib()
    };

    // 1 Ramadan 1443 and the day before
    assert_eq!(isha_gap(date(2022, 4, 1)), chrono::Duration::minutes(90));
    assert_eq!(isha_gap(date(2022, 4, 2)), chrono::Duration::minutes(120));
    // Last day of Ramadan 1444 and Eid al-Fitr
    assert_eq!(isha_gap(date(2023, 4, 20)), chrono::Duration::minutes(120));
    assert_eq!(isha_gap(date(2023, 4, 21)), chrono::Duration::minutes(90));
}

#[test]
fn test_makkah_outside_calendar_range_fails() {
    let (lon, lat) = KAABA;
    let calc = PrayerCalculator::new(CalculationMethod::Makkah, AsrMethod::Standard);
    let day = date(1900, 6, 1);

    let result = calc.calc_times(day, &utc_plus(3), lon, lat);
    assert_eq!(result.unwrap_err(), SolarError::UnsupportedDate(day));

    // Conventions without a calendar rule still work on that date
    let mwl = PrayerCalculator::new(CalculationMethod::Mwl, AsrMethod::Standard);
    assert!(mwl.calc_times(day, &utc_plus(3), lon, lat).is_ok());
}

#[test]
fn test_methods_without_calendar_rule_never_query_it() {
    let mut calendar = MockLunarCalendar::new();
    calendar.expect_lunar_month().never();

    let (lon, lat) = KAABA;
    let calc = PrayerCalculator::with_calendar(
        CalculationMethod::Tehran.config(AsrMethod::Standard),
        calendar,
    );
    assert!(calc.calc_times(date(2021, 1, 1), &utc_plus(3), lon, lat).is_ok());
}

#[test]
fn test_results_follow_daylight_saving() {
    let (lon, lat) = NYC;
    let calc = PrayerCalculator::new(CalculationMethod::Isna, AsrMethod::Standard);

    let summer = calc
        .calc_times(date(2024, 7, 1), &chrono_tz::America::New_York, lon, lat)
        .unwrap();
    let winter = calc
        .calc_times(date(2024, 1, 15), &chrono_tz::America::New_York, lon, lat)
        .unwrap();

    assert_eq!(summer.dhuhr().offset().fix().local_minus_utc(), -4 * 3600);
    assert_eq!(winter.dhuhr().offset().fix().local_minus_utc(), -5 * 3600);

    // Same instants whatever zone they are expressed in
    let utc = calc.calc_times(date(2024, 7, 1), &Utc, lon, lat).unwrap();
    for ((_, local), (_, universal)) in summer.iter().zip(utc.iter()) {
        assert_eq!(local.with_timezone(&Utc), *universal);
    }
}

#[test]
fn test_times_are_chronological() {
    let calc = PrayerCalculator::new(CalculationMethod::Mwl, AsrMethod::Hanafi);
    let places = [KAABA, NYC, (151.2093, -33.8688), (-0.1276, 45.0), (103.8, 1.35)];
    for (lon, lat) in places {
        for month in 1..=12 {
            let times = calc.calc_times(date(2024, month, 10), &Utc, lon, lat).unwrap();
            let instants: Vec<_> = times.iter().map(|(_, t)| *t).collect();
            assert!(
                instants.windows(2).all(|w| w[0] < w[1]),
                "out of order at ({lon}, {lat}) in month {month}: {instants:?}"
            );
        }
    }
}

#[test]
fn test_iter_order_and_names() {
    let times = kaaba_times(CalculationMethod::Mwl, AsrMethod::Standard);
    let names: Vec<_> = times.iter().map(|(p, _)| p.as_str()).collect();
    assert_eq!(
        names,
        ["fajr", "sunrise", "dhuhr", "asr", "maghrib", "isha", "midnight"]
    );
}

#[test]
fn test_polar_summer_twilight_is_error() {
    let calc = PrayerCalculator::new(CalculationMethod::Mwl, AsrMethod::Standard);
    let result = calc.calc_times(date(2024, 6, 21), &Utc, 25.0, 65.0);
    match result {
        Err(SolarError::UnreachableAltitude { latitude, .. }) => assert_eq!(latitude, 65.0),
        other => panic!("expected unreachable altitude, got {other:?}"),
    }
}

#[test]
fn test_invalid_locations() {
    let calc = PrayerCalculator::default();
    let day = date(2024, 1, 1);
    for (lon, lat) in [(0.0, 91.0), (181.0, 0.0), (f64::NAN, 0.0), (0.0, f64::INFINITY)] {
        assert!(matches!(
            calc.calc_times(day, &Utc, lon, lat),
            Err(SolarError::InvalidLocation(_))
        ));
    }
}

#[test]
fn test_calculator_is_send_and_sync() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<PrayerCalculator>();
    assert_send_sync::<PrayerTimes<chrono_tz::Tz>>();
}
