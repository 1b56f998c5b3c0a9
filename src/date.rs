//! Calendar dates and civil date-times, and their conversion from and to
//! Julian dates.
//!
//! All dates are in the proleptic Gregorian calendar.

use std::fmt;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::time_scales::{JulianDate, SECONDS_PER_DAY};

/// Floating-point slack, in seconds, added before truncating the time of day.
///
/// A Julian date near 2.4 million days can only hold the time of day to about
/// 40 µs, so a reading built from whole seconds may come back a hair short of
/// that second. A time of day less than this short of a whole second reads
/// as that second.
const TRUNCATION_SLACK: f64 = 1e-3;

/// Largest day number, either side of zero, a Julian date is read on.
///
/// Its Gregorian year is about 1.5 billion, well inside `i32`.
const DAY_NUMBER_LIMIT: f64 = (1u64 << 39) as f64;

/// A calendar-independant date, identified by its Julian day number (JDN).
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub struct Date {
    jdn: i64,
}

impl Date {
    /// Creates a `Date` with a Julian day number (JDN).
    pub fn from_jdn(jdn: i64) -> Self {
        Self { jdn }
    }
    /// Returns the Julian day number (JDN) of the date.
    pub fn jdn(&self) -> i64 {
        self.jdn
    }

    /// Creates a `Date` with a Gregorian calendar date.
    ///
    /// `year` should be an astronomical year number, i.e. 1 BC is `0`, 2
    /// BC is `-1`, etc. Dates before January 1, 4713 BC (proleptic Julian
    /// calendar) get negative day numbers.
    ///
    /// # Example
    ///
    /// ```
    /// use equisol::Date;
    ///
    /// let date = Date::from_gregorian(2000, 1, 1);
    /// assert_eq!(2451545, date.jdn());
    /// ```
    pub fn from_gregorian(year: i32, month: u32, day: u32) -> Self {
        let (m, d) = (i64::from(month), i64::from(day));
        // years counted from March 4801 BC, so January and February close the year
        let a = (14 - m) / 12;
        let y = i64::from(year) + 4800 - a;
        let m = m + 12 * a - 3;
        Self::from_jdn(
            d + (153 * m + 2) / 5 + 365 * y + y.div_euclid(4) - y.div_euclid(100)
                + y.div_euclid(400)
                - 32045,
        )
    }
    /// Represents the date in Gregorian calendar.
    ///
    /// Returns in `(year, month, day)` format. Day numbers whose year does
    /// not fit in `i32` saturate to `i32::MIN` or `i32::MAX`.
    ///
    /// # Example
    ///
    /// ```
    /// use equisol::Date;
    ///
    /// let date = Date::from_jdn(2451545);
    /// assert_eq!((2000, 1, 1), date.gregorian());
    /// ```
    pub fn gregorian(&self) -> (i32, u32, u32) {
        let jdn = i128::from(self.jdn);
        let f = jdn + 1401 + ((4 * jdn + 274277).div_euclid(146097) * 3).div_euclid(4) - 38;
        let e = 4 * f + 3;
        let g = e.rem_euclid(1461) / 4;
        let h = 5 * g + 2;
        let day = (h % 153) / 5 + 1;
        let month = (h / 153 + 2) % 12 + 1;
        let year = e.div_euclid(1461) - 4716 + (12 + 2 - month) / 12;
        let year = year.clamp(i32::MIN.into(), i32::MAX.into()) as i32;
        (year, month as u32, day as u32)
    }
}

/// Indicates whether a year is a leap year or common year.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum YearType {
    Common,
    Leap,
}

impl YearType {
    /// Determines if `year` is a leap year in Gregorian calendar.
    pub fn from_gregorian(year: i32) -> Self {
        if year % 4 == 0 && year % 100 != 0 || year % 400 == 0 {
            Self::Leap
        } else {
            Self::Common
        }
    }
    /// Returns `true` if `self` is `Leap`, otherwise `false`.
    pub fn is_leap(&self) -> bool {
        matches!(self, YearType::Leap)
    }
    /// Number of days in `month` (`1..=12`), `0` for any other month.
    pub fn days_in_month(&self, month: u32) -> u32 {
        match month {
            1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
            4 | 6 | 9 | 11 => 30,
            2 => 28 + self.is_leap() as u32,
            _ => 0,
        }
    }
}

/// A civil (wall-clock) reading in the proleptic Gregorian calendar, to the
/// whole second.
///
/// Readings compare chronologically, provided they belong to the same
/// timezone.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub struct CivilDateTime {
    pub year: i32,
    pub month: u32,
    pub day: u32,
    pub hour: u32,
    pub minute: u32,
    pub second: u32,
}

impl CivilDateTime {
    /// Creates a reading, checking every field against its calendar range.
    ///
    /// Returns `None` for a nonexistent reading such as February 30.
    ///
    /// # Example
    ///
    /// ```
    /// use equisol::CivilDateTime;
    ///
    /// assert!(CivilDateTime::new(2024, 2, 29, 12, 0, 0).is_some());
    /// assert!(CivilDateTime::new(2023, 2, 29, 12, 0, 0).is_none());
    /// ```
    pub fn new(
        year: i32,
        month: u32,
        day: u32,
        hour: u32,
        minute: u32,
        second: u32,
    ) -> Option<Self> {
        let days = YearType::from_gregorian(year).days_in_month(month);
        if day == 0 || day > days || hour > 23 || minute > 59 || second > 59 {
            return None;
        }
        Some(Self {
            year,
            month,
            day,
            hour,
            minute,
            second,
        })
    }

    /// Converts a Julian date into the civil reading it falls on.
    ///
    /// Every component is truncated, never rounded: sub-second fractions are
    /// discarded. A time of day that reaches 86400 seconds carries into the
    /// next day.
    ///
    /// The one exception is a time of day less than a millisecond short of a
    /// whole second, which reads as that second; a Julian date cannot tell
    /// the two apart reliably. Julian dates further than about 1.5 billion
    /// years from the epoch read as the day at that limit, and a `NaN` as
    /// midnight opening day number zero.
    ///
    /// # Example
    ///
    /// ```
    /// use equisol::{CivilDateTime, time_scales::JulianDate};
    ///
    /// let civil = CivilDateTime::from_julian(JulianDate(2451545.0));
    /// assert_eq!("2000-01-01T12:00:00", civil.to_string());
    /// ```
    pub fn from_julian(jd: JulianDate) -> Self {
        let shifted = jd.0 + 0.5;
        let mut day_number = shifted.floor();
        let mut seconds = ((shifted - day_number) * SECONDS_PER_DAY + TRUNCATION_SLACK).floor();
        if seconds >= SECONDS_PER_DAY {
            day_number += 1.0;
            seconds -= SECONDS_PER_DAY;
        }

        let day_number = day_number.clamp(-DAY_NUMBER_LIMIT, DAY_NUMBER_LIMIT) as i64;
        let (year, month, day) = Date::from_jdn(day_number).gregorian();
        let seconds = seconds as u32;
        Self {
            year,
            month,
            day,
            hour: seconds / 3600,
            minute: seconds / 60 % 60,
            second: seconds % 60,
        }
    }

    /// Converts the reading back into a Julian date.
    ///
    /// # Example
    ///
    /// ```
    /// use equisol::CivilDateTime;
    ///
    /// let civil = CivilDateTime::new(2000, 1, 1, 12, 0, 0).unwrap();
    /// assert_eq!(2451545.0, civil.to_julian().0);
    /// ```
    pub fn to_julian(&self) -> JulianDate {
        let jdn = self.date().jdn();
        let seconds = self.hour * 3600 + self.minute * 60 + self.second;
        JulianDate(jdn as f64 - 0.5 + f64::from(seconds) / SECONDS_PER_DAY)
    }

    /// The calendar date of the reading.
    pub fn date(&self) -> Date {
        Date::from_gregorian(self.year, self.month, self.day)
    }

    /// Minutes elapsed since midnight.
    pub fn minute_of_day(&self) -> u32 {
        self.hour * 60 + self.minute
    }

    /// The reading as a chrono naive date-time.
    pub fn to_naive(&self) -> Result<NaiveDateTime> {
        chrono::NaiveDate::from_ymd_opt(self.year, self.month, self.day)
            .and_then(|date| date.and_hms_opt(self.hour, self.minute, self.second))
            .ok_or(Error::InvalidCivilDateTime {
                year: self.year,
                month: self.month,
                day: self.day,
                hour: self.hour,
                minute: self.minute,
                second: self.second,
            })
    }
}

/// Formats the reading in ISO 8601 format.
impl fmt::Display for CivilDateTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:04}-{:02}-{:02}T{:02}:{:02}:{:02}",
            self.year, self.month, self.day, self.hour, self.minute, self.second
        )
    }
}
