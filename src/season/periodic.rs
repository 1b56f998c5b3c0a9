//! Periodic correction applied to the mean instants.
//!
//! Meeus, *Astronomical Algorithms* (2nd ed.), chapter 27: the sum `S` of
//! table 27.C, weighted by `Δλ` which follows the varying apparent speed of
//! the Sun.

/// One row of table 27.C: amplitude `A`, phase `B` (degrees) and rate `C`
/// (degrees per Julian century).
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct PeriodicTerm {
    pub amplitude: f64,
    pub phase: f64,
    pub rate: f64,
}

const fn term(amplitude: f64, phase: f64, rate: f64) -> PeriodicTerm {
    PeriodicTerm {
        amplitude,
        phase,
        rate,
    }
}

/// The 24 terms of table 27.C.
pub const PERIODIC_TERMS: [PeriodicTerm; 24] = [
    term(485.0, 324.96, 1934.136),
    term(203.0, 337.23, 32964.467),
    term(199.0, 342.08, 20.186),
    term(182.0, 27.85, 445267.112),
    term(156.0, 73.14, 45036.886),
    term(136.0, 171.52, 22518.443),
    term(77.0, 222.54, 65928.934),
    term(74.0, 296.72, 3034.906),
    term(70.0, 243.58, 9037.513),
    term(58.0, 119.81, 33718.147),
    term(52.0, 297.17, 150.678),
    term(50.0, 21.02, 2281.226),
    term(45.0, 247.54, 29929.562),
    term(44.0, 325.15, 31555.956),
    term(29.0, 60.93, 4443.417),
    term(18.0, 155.12, 67555.328),
    term(17.0, 288.79, 4562.452),
    term(16.0, 198.04, 62894.029),
    term(14.0, 199.76, 31436.921),
    term(12.0, 95.39, 14577.848),
    term(12.0, 287.11, 31931.756),
    term(12.0, 320.81, 34777.259),
    term(9.0, 227.73, 1222.114),
    term(8.0, 15.45, 16859.074),
];

/// Sum `S = Σ A·cos(B + C·T)` over [`PERIODIC_TERMS`], `t` in Julian
/// centuries since J2000.0.
pub fn periodic_sum(t: f64) -> f64 {
    PERIODIC_TERMS
        .iter()
        .map(|p| p.amplitude * (p.phase + p.rate * t).to_radians().cos())
        .sum()
}

/// Scale factor `Δλ = 1 + 0.0334·cos W + 0.0007·cos 2W` with
/// `W = 35999.373·T − 2.47` degrees.
///
/// Always between 0.9673 and 1.0341.
pub fn scale_factor(t: f64) -> f64 {
    let w = (35999.373 * t - 2.47).to_radians();
    1.0 + 0.0334 * w.cos() + 0.0007 * (2.0 * w).cos()
}

#[cfg(test)]
mod tests {
    use super::*;

    // Meeus, example 27.a (June solstice 1962)
    const T_1962: f64 = -0.37529402;

    #[test]
    fn sum_of_example_27a() {
        let s = periodic_sum(T_1962);
        assert!((s - 635.357).abs() < 0.01, "{s}");
    }

    #[test]
    fn scale_of_example_27a() {
        let dl = scale_factor(T_1962);
        assert!((dl - 0.96806).abs() < 1e-5, "{dl}");
    }

    #[test]
    fn sum_is_bounded_by_amplitudes() {
        let total: f64 = PERIODIC_TERMS.iter().map(|p| p.amplitude).sum();
        assert_eq!(1978.0, total);
        for i in -100..=100 {
            let t = f64::from(i) / 100.0;
            assert!(periodic_sum(t).abs() <= total, "{t}");
        }
    }

    #[test]
    fn scale_stays_near_one() {
        for i in -1000..=1000 {
            let t = f64::from(i) / 1000.0 * 10.0;
            let dl = scale_factor(t);
            assert!((0.967..=1.035).contains(&dl), "{t}: {dl}");
        }
    }
}
