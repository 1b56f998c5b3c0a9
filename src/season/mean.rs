//! Mean instants of the equinoxes and solstices.
//!
//! Meeus, *Astronomical Algorithms* (2nd ed.), table 27.B, valid for the
//! years 1000 to 3000.

use super::EventKind;
use crate::time_scales::{JulianDate, horner};

/// Coefficients of `JDE0 = c0 + c1·y + c2·y² + c3·y³ + c4·y⁴`, indexed by
/// [`EventKind::index`].
const MEAN_COEFFS: [[f64; 5]; 4] = [
    [2451623.80984, 365242.37404, 0.05169, -0.00411, -0.00057],
    [2451716.56767, 365241.62603, 0.00325, 0.00888, -0.00030],
    [2451810.21715, 365242.01767, -0.11575, 0.00337, 0.00078],
    [2451900.05952, 365242.74049, -0.06223, -0.00823, 0.00032],
];

/// Mean Julian date (dynamical time) of the event in `year`, before any
/// periodic correction.
///
/// Years outside 1000..=3000 are extrapolated, not rejected.
///
/// # Example
///
/// ```
/// use equisol::season::{EventKind, mean::mean_julian_date};
///
/// let jde0 = mean_julian_date(EventKind::Spring, 2000);
/// assert_eq!(2451623.80984, jde0.0);
/// ```
pub fn mean_julian_date(kind: EventKind, year: i32) -> JulianDate {
    let y = (f64::from(year) - 2000.0) / 1000.0;
    JulianDate(horner(y, &MEAN_COEFFS[kind.index()]))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn year_2000_is_the_constant_term() {
        for kind in EventKind::ALL {
            assert_eq!(MEAN_COEFFS[kind.index()][0], mean_julian_date(kind, 2000).0);
        }
    }

    #[test]
    fn meeus_example_27a() {
        // June solstice 1962: JDE0 = 2437837.38589
        let jde0 = mean_julian_date(EventKind::Summer, 1962);
        assert!((jde0.0 - 2437837.38589).abs() < 1e-5, "{}", jde0.0);
    }

    #[test]
    fn consecutive_years_are_a_tropical_year_apart() {
        for kind in EventKind::ALL {
            let step = mean_julian_date(kind, 2501) - mean_julian_date(kind, 2500);
            assert!((step - 365.2422).abs() < 0.001, "{kind}: {step}");
        }
    }

    #[test]
    fn extrapolates_without_failing() {
        let jd = mean_julian_date(EventKind::Winter, -5000);
        assert!(jd.0.is_finite());
        assert!(jd < mean_julian_date(EventKind::Winter, 1000));
    }
}
