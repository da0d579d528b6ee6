//! Modified Julian Day conversions used to timestamp detections.

use chrono::{DateTime, Datelike, Timelike, Utc};
use log::debug;

const SECONDS_PER_DAY: f64 = 86400.0;

/// Gregorian calendar date to Modified Julian Day.
pub fn date_to_mjd(year: i64, month: i64, day: i64) -> i64 {
    367 * year
        - 7 * (year + (month + 9) / 12) / 4
        - 3 * ((year + (month - 9) / 7) / 100 + 1) / 4
        + 275 * month / 9
        + day
        + 1721028
        - 2400000
}

/// Modified Julian Day to Gregorian `(year, month, day)`.
///
/// Fliegel & van Flandern, CACM 11 (10), 1968.
pub fn mjd_to_date(mjd: i64) -> (i64, i64, i64) {
    let mut j = mjd + 2400001 + 68569;
    let c = 4 * j / 146097;
    j -= (146097 * c + 3) / 4;
    let y = 4000 * (j + 1) / 1461001;
    j = j - 1461 * y / 4 + 31;
    let m = 80 * j / 2447;
    let day = j - 2447 * m / 80;
    j = m / 11;
    let month = m + 2 - 12 * j;
    let year = 100 * (c - 49) + y + j;
    (year, month, day)
}

/// Fractional MJD of a UTC instant.
pub fn mjd_from_datetime(time: &DateTime<Utc>) -> f64 {
    let day = date_to_mjd(time.year() as i64, time.month() as i64, time.day() as i64);
    let seconds = time.num_seconds_from_midnight() as f64 + 1.0e-9 * time.nanosecond() as f64;
    day as f64 + seconds / SECONDS_PER_DAY
}

/// Source of detection timestamps.
pub trait MjdClock: Send {
    fn now_mjd(&self) -> f64;
}

/// Processing wall clock.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl MjdClock for SystemClock {
    fn now_mjd(&self) -> f64 {
        let now = Utc::now();
        debug!("Current time: {} UTC", now.format("%D %T%.9f"));
        mjd_from_datetime(&now)
    }
}

/// Always reports the same MJD.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub f64);

impl MjdClock for FixedClock {
    fn now_mjd(&self) -> f64 {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, TimeZone};

    #[test]
    fn test_mjd_epoch_and_j2000() {
        assert_eq!(date_to_mjd(1858, 11, 17), 0);
        assert_eq!(date_to_mjd(2000, 1, 1), 51544);
        assert_eq!(mjd_to_date(0), (1858, 11, 17));
        assert_eq!(mjd_to_date(51544), (2000, 1, 1));
    }

    #[test]
    fn test_date_to_mjd_matches_day_count() {
        let epoch = NaiveDate::from_ymd_opt(1858, 11, 17).unwrap();
        let mut date = NaiveDate::from_ymd_opt(1999, 12, 1).unwrap();
        for _ in 0..800 {
            let expected = (date - epoch).num_days();
            let mjd = date_to_mjd(date.year() as i64, date.month() as i64, date.day() as i64);
            assert_eq!(mjd, expected, "{}", date);
            assert_eq!(
                mjd_to_date(mjd),
                (date.year() as i64, date.month() as i64, date.day() as i64)
            );
            date = date.succ_opt().unwrap();
        }
    }

    #[test]
    fn test_fractional_day() {
        let noon = Utc.with_ymd_and_hms(2000, 1, 1, 12, 0, 0).unwrap();
        assert!((mjd_from_datetime(&noon) - 51544.5).abs() < 1e-9);

        let late = Utc.with_ymd_and_hms(2024, 2, 29, 18, 0, 0).unwrap()
            + chrono::Duration::milliseconds(500);
        let expected = date_to_mjd(2024, 2, 29) as f64 + (64800.5 / 86400.0);
        assert!((mjd_from_datetime(&late) - expected).abs() < 1e-9);
    }

    #[test]
    fn test_clocks() {
        assert_eq!(FixedClock(60000.25).now_mjd(), 60000.25);
        let now = SystemClock.now_mjd();
        // Any wall clock this runs on is well past 2020-01-01
        assert!(now > date_to_mjd(2020, 1, 1) as f64);
    }
}
