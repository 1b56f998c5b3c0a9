//! Julian dates and the conversion from dynamical time into universal time.
//!
//! The mean/periodic method yields instants in dynamical time (TD). Up to the
//! caller's choice these are either taken as universal time directly, or
//! corrected by ΔT = TD − UT, see [`JulianDate::to_universal`].

use std::ops::{Add, Sub};

use serde::{Deserialize, Serialize};

/// Julian date of the J2000.0 epoch (2000-01-01T12:00 TD).
pub const J2000: f64 = 2451545.0;

/// Length of a Julian century in days.
pub const DAYS_PER_CENTURY: f64 = 36525.0;

/// Seconds in a day.
pub const SECONDS_PER_DAY: f64 = 86400.0;

/// A [Julian date](https://en.wikipedia.org/wiki/Julian_day): days and
/// fraction of a day since noon of January 1, 4713 BC (proleptic Julian
/// calendar).
///
/// Results are only meaningful for instants within the years 1000 to 3000 of
/// the Gregorian calendar. Outside that range nothing fails, the numbers are
/// simply extrapolated.
#[derive(Debug, Copy, Clone, PartialEq, PartialOrd, Serialize, Deserialize)]
pub struct JulianDate(pub f64);

impl JulianDate {
    /// Julian centuries elapsed since J2000.0.
    ///
    /// # Example
    ///
    /// ```
    /// use equisol::time_scales::JulianDate;
    ///
    /// assert_eq!(1.0, JulianDate(2451545.0 + 36525.0).centuries_since_j2000());
    /// ```
    pub fn centuries_since_j2000(&self) -> f64 {
        (self.0 - J2000) / DAYS_PER_CENTURY
    }

    /// Approximate decimal Gregorian year of the instant, good enough to pick
    /// a ΔT value.
    pub fn decimal_year(&self) -> f64 {
        2000.0 + (self.0 - J2000) / 365.25
    }

    /// Shifts the instant by a number of seconds.
    pub fn add_seconds(self, seconds: f64) -> Self {
        JulianDate(self.0 + seconds / SECONDS_PER_DAY)
    }

    /// Treats `self` as dynamical time and converts it into universal time
    /// by subtracting ΔT.
    ///
    /// # Example
    ///
    /// ```
    /// use equisol::time_scales::JulianDate;
    ///
    /// let td = JulianDate(2451545.0);
    /// let ut = td.to_universal();
    /// // ΔT was a little over a minute in 2000
    /// assert!((td.0 - ut.0) * 86400.0 > 63.0);
    /// assert!((td.0 - ut.0) * 86400.0 < 65.0);
    /// ```
    pub fn to_universal(self) -> Self {
        self.add_seconds(-delta_t_seconds(self.decimal_year()))
    }
}

impl Add<f64> for JulianDate {
    type Output = JulianDate;
    fn add(self, days: f64) -> Self::Output {
        JulianDate(self.0 + days)
    }
}

impl Sub<JulianDate> for JulianDate {
    type Output = f64;
    fn sub(self, rhs: JulianDate) -> Self::Output {
        self.0 - rhs.0
    }
}

/// ΔT = TD − UT in seconds for a decimal year.
///
/// Polynomial expressions by Espenak & Meeus (NASA Five Millennium Canon of
/// Solar Eclipses), covering the supported range piecewise. Years past 2150
/// use the long-term parabola; years before 500 use the 500–1600 expression,
/// which is only an extrapolation there.
pub fn delta_t_seconds(year: f64) -> f64 {
    let y = year;
    if y < 1600.0 {
        let u = (y - 1000.0) / 100.0;
        horner(
            u,
            &[
                1574.2,
                -556.01,
                71.23472,
                0.319781,
                -0.8503463,
                -0.005050998,
                0.0083572073,
            ],
        )
    } else if y < 1700.0 {
        let t = y - 1600.0;
        horner(t, &[120.0, -0.9808, -0.01532, 1.0 / 7129.0])
    } else if y < 1800.0 {
        let t = y - 1700.0;
        horner(t, &[8.83, 0.1603, -0.0059285, 0.00013336, -1.0 / 1174000.0])
    } else if y < 1860.0 {
        let t = y - 1800.0;
        horner(
            t,
            &[
                13.72,
                -0.332447,
                0.0068612,
                0.0041116,
                -0.00037436,
                0.0000121272,
                -0.0000001699,
                0.000000000875,
            ],
        )
    } else if y < 1900.0 {
        let t = y - 1860.0;
        horner(
            t,
            &[7.62, 0.5737, -0.251754, 0.01680668, -0.0004473624, 1.0 / 233174.0],
        )
    } else if y < 1920.0 {
        let t = y - 1900.0;
        horner(t, &[-2.79, 1.494119, -0.0598939, 0.0061966, -0.000197])
    } else if y < 1941.0 {
        let t = y - 1920.0;
        horner(t, &[21.20, 0.84493, -0.076100, 0.0020936])
    } else if y < 1961.0 {
        let t = y - 1950.0;
        horner(t, &[29.07, 0.407, -1.0 / 233.0, 1.0 / 2547.0])
    } else if y < 1986.0 {
        let t = y - 1975.0;
        horner(t, &[45.45, 1.067, -1.0 / 260.0, -1.0 / 718.0])
    } else if y < 2005.0 {
        let t = y - 2000.0;
        horner(
            t,
            &[
                63.86,
                0.3345,
                -0.060374,
                0.0017275,
                0.000651814,
                0.00002373599,
            ],
        )
    } else if y < 2050.0 {
        let t = y - 2000.0;
        horner(t, &[62.92, 0.32217, 0.005589])
    } else if y < 2150.0 {
        long_term(y) - 0.5628 * (2150.0 - y)
    } else {
        long_term(y)
    }
}

fn long_term(year: f64) -> f64 {
    let u = (year - 1820.0) / 100.0;
    -20.0 + 32.0 * u * u
}

/// Evaluates `coeffs[0] + coeffs[1]·x + coeffs[2]·x² + …`.
pub(crate) fn horner(x: f64, coeffs: &[f64]) -> f64 {
    coeffs.iter().rev().fold(0.0, |acc, &c| acc * x + c)
}
