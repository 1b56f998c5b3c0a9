//! Conversion of universal-time Julian dates into a timezone's local time.
//!
//! Offsets come from an [`OffsetProvider`]. [`TzDatabase`] answers from the
//! IANA database bundled by `chrono-tz`; [`FixedOffset`] answers a constant
//! and needs no database at all.

use std::ops::RangeInclusive;

use chrono::{DateTime, LocalResult, Offset, TimeZone};
use chrono_tz::Tz;
use tracing::trace;

use crate::date::{CivilDateTime, Date, YearType};
use crate::error::{Error, Result};
use crate::time_scales::JulianDate;

/// Identifier of the zone that needs no conversion.
pub const UTC: &str = "UTC";

/// Years looked up as they are. The bundled transitions stop at the end of
/// 2099, and chrono cannot represent years much before -262000.
const LOOKUP_YEARS: RangeInclusive<i32> = -200_000..=2099;

/// Source of UTC offsets for a zone at a given wall-clock reading.
pub trait OffsetProvider {
    /// Seconds the zone's local time is ahead (east) of UTC when its clocks
    /// show `civil`.
    fn offset_seconds(&self, zone: &str, civil: &CivilDateTime) -> Result<i32>;
}

/// Offsets from the IANA timezone database.
///
/// A reading that occurs twice (clocks turned back) resolves to the earlier
/// instant. A reading skipped by the clocks (turned forward) resolves to the
/// offset in force at that reading taken as UTC.
///
/// Readings after 2099, or too far back for chrono, are looked up in a year
/// of the same calendar: same weekday on January 1 and same leap status.
/// Rules such as "last Sunday of March" then land on the same date.
///
/// # Example
///
/// ```
/// use equisol::CivilDateTime;
/// use equisol::timezone::{OffsetProvider, TzDatabase};
///
/// let noon = CivilDateTime::new(2024, 7, 1, 12, 0, 0).unwrap();
/// assert_eq!(Ok(7200), TzDatabase.offset_seconds("Europe/Paris", &noon));
/// ```
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub struct TzDatabase;

impl OffsetProvider for TzDatabase {
    fn offset_seconds(&self, zone: &str, civil: &CivilDateTime) -> Result<i32> {
        let tz = parse_zone(zone)?;
        let naive = representable(civil).to_naive()?;
        let offset = match tz.from_local_datetime(&naive) {
            LocalResult::Single(dt) | LocalResult::Ambiguous(dt, _) => dt.offset().fix(),
            LocalResult::None => tz.offset_from_utc_datetime(&naive).fix(),
        };
        Ok(offset.local_minus_utc())
    }
}

fn representable(civil: &CivilDateTime) -> CivilDateTime {
    if LOOKUP_YEARS.contains(&civil.year) {
        return *civil;
    }
    // every calendar occurs within 28 years free of century years
    let start = if civil.year > 0 { 2072 } else { 1801 };
    let calendar = |year| {
        let weekday = Date::from_gregorian(year, 1, 1).jdn().rem_euclid(7);
        (weekday, YearType::from_gregorian(year))
    };
    let wanted = calendar(civil.year);
    let year = (start..start + 28)
        .find(|&year| calendar(year) == wanted)
        .unwrap_or(start);
    CivilDateTime { year, ..*civil }
}

/// A constant offset in seconds, whatever the zone name or reading.
///
/// # Example
///
/// ```
/// use equisol::CivilDateTime;
/// use equisol::timezone::{FixedOffset, OffsetProvider};
///
/// let noon = CivilDateTime::new(2024, 7, 1, 12, 0, 0).unwrap();
/// assert_eq!(Ok(-18000), FixedOffset(-18000).offset_seconds("anything", &noon));
/// ```
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub struct FixedOffset(pub i32);

impl OffsetProvider for FixedOffset {
    fn offset_seconds(&self, _zone: &str, _civil: &CivilDateTime) -> Result<i32> {
        Ok(self.0)
    }
}

/// Converts a universal-time Julian date into local time of `zone`.
///
/// [`UTC`] is returned unchanged without consulting `provider`. Otherwise the
/// offset is looked up at the UT civil reading, as if that reading were the
/// zone's wall-clock time. Events within a few hours of a DST transition may
/// therefore pick the offset from the wrong side of it.
///
/// # Example
///
/// ```
/// use equisol::time_scales::JulianDate;
/// use equisol::timezone::{to_local, TzDatabase};
///
/// let ut = JulianDate(2451545.0); // 2000-01-01T12:00 UT
/// let paris = to_local(ut, "Europe/Paris", &TzDatabase).unwrap();
/// assert!((paris.0 - ut.0 - 1.0 / 24.0).abs() < 1e-9);
/// ```
pub fn to_local<P: OffsetProvider>(
    ut: JulianDate,
    zone: &str,
    provider: &P,
) -> Result<JulianDate> {
    if zone == UTC {
        return Ok(ut);
    }
    let reading = CivilDateTime::from_julian(ut);
    let offset = provider.offset_seconds(zone, &reading)?;
    trace!(zone, %reading, offset, "resolved UTC offset");
    if offset == 0 {
        return Ok(ut);
    }
    Ok(ut.add_seconds(f64::from(offset)))
}

/// Attaches `zone` to a civil reading taken as that zone's wall-clock time.
///
/// Fails with [`Error::InvalidCivilDateTime`] for a reading chrono cannot
/// represent.
///
/// # Example
///
/// ```
/// use equisol::CivilDateTime;
/// use equisol::timezone::zoned;
///
/// let civil = CivilDateTime::new(2054, 3, 20, 10, 35, 41).unwrap();
/// let dt = zoned("Europe/Paris", &civil).unwrap();
/// assert_eq!("2054-03-20T10:35:41+01:00", dt.to_rfc3339());
/// ```
pub fn zoned(zone: &str, civil: &CivilDateTime) -> Result<DateTime<Tz>> {
    let tz = parse_zone(zone)?;
    let naive = civil.to_naive()?;
    let dt = match tz.from_local_datetime(&naive) {
        LocalResult::Single(dt) | LocalResult::Ambiguous(dt, _) => dt,
        LocalResult::None => tz.from_utc_datetime(&naive),
    };
    Ok(dt)
}

/// Looks `zone` up in the IANA database.
pub fn parse_zone(zone: &str) -> Result<Tz> {
    zone.parse().map_err(|_| Error::UnknownTimezone {
        name: zone.to_owned(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn civil(y: i32, mo: u32, d: u32, h: u32, mi: u32, s: u32) -> CivilDateTime {
        CivilDateTime::new(y, mo, d, h, mi, s).unwrap()
    }

    /// Counts lookups so tests can tell whether the provider was consulted.
    struct Counting(std::cell::Cell<u32>);

    impl OffsetProvider for Counting {
        fn offset_seconds(&self, _zone: &str, _civil: &CivilDateTime) -> Result<i32> {
            self.0.set(self.0.get() + 1);
            Ok(3600)
        }
    }

    #[test]
    fn utc_is_identity_without_lookup() {
        let provider = Counting(std::cell::Cell::new(0));
        let ut = JulianDate(2451623.81);
        assert_eq!(Ok(ut), to_local(ut, UTC, &provider));
        assert_eq!(0, provider.0.get());
        assert_eq!(Ok(JulianDate(ut.0 + 1.0 / 24.0)), to_local(ut, "X", &provider));
        assert_eq!(1, provider.0.get());
    }

    #[test]
    fn fixed_offsets_apply_with_sign() {
        let ut = civil(2024, 3, 20, 3, 6, 0).to_julian();
        for (offset, std) in [
            (3600, civil(2024, 3, 20, 4, 6, 0)),
            (-5 * 3600, civil(2024, 3, 19, 22, 6, 0)),
            (19800, civil(2024, 3, 20, 8, 36, 0)),
            (0, civil(2024, 3, 20, 3, 6, 0)),
        ] {
            let local = to_local(ut, "Etc/Test", &FixedOffset(offset)).unwrap();
            assert_eq!(std, CivilDateTime::from_julian(local), "{offset}");
        }
    }

    #[test]
    fn database_offsets() {
        let dataset = [
            ("Europe/Paris", civil(2024, 1, 15, 12, 0, 0), 3600),
            ("Europe/Paris", civil(2024, 7, 15, 12, 0, 0), 7200),
            ("America/New_York", civil(2024, 1, 15, 12, 0, 0), -18000),
            ("Asia/Kolkata", civil(2024, 1, 15, 12, 0, 0), 19800),
            ("UTC", civil(2024, 7, 15, 12, 0, 0), 0),
        ];
        for (zone, reading, std) in dataset {
            assert_eq!(Ok(std), TzDatabase.offset_seconds(zone, &reading), "{zone}");
        }
    }

    #[test]
    fn database_resolves_transitions() {
        // 2024-10-27 02:30 happens twice in Paris; the earlier one is CEST
        let ambiguous = civil(2024, 10, 27, 2, 30, 0);
        assert_eq!(Ok(7200), TzDatabase.offset_seconds("Europe/Paris", &ambiguous));
        // 2024-03-31 02:30 never happens in Paris; at 02:30 UTC CEST applies
        let skipped = civil(2024, 3, 31, 2, 30, 0);
        assert_eq!(Ok(7200), TzDatabase.offset_seconds("Europe/Paris", &skipped));
    }

    #[test]
    fn database_covers_years_beyond_chrono() {
        let dataset = [
            (civil(2500, 7, 1, 12, 0, 0), 7200),
            (civil(2500, 12, 1, 12, 0, 0), 3600),
            (civil(300_000, 7, 1, 12, 0, 0), 7200),
            (civil(300_000, 2, 29, 12, 0, 0), 3600),
            (civil(i32::MAX, 7, 1, 12, 0, 0), 7200),
            // local mean time, +0:09:21
            (civil(-300_000, 7, 1, 12, 0, 0), 561),
            (civil(i32::MIN, 1, 1, 0, 0, 0), 561),
        ];
        for (reading, std) in dataset {
            assert_eq!(Ok(std), TzDatabase.offset_seconds("Europe/Paris", &reading), "{reading}");
        }
    }

    #[test]
    fn lookup_reads_universal_time_as_wall_clock() {
        // 01:30 UT is 03:30 CEST, but 01:30 on Paris clocks is still CET
        let ut = civil(2024, 3, 31, 1, 30, 0).to_julian();
        let local = to_local(ut, "Europe/Paris", &TzDatabase).unwrap();
        assert_eq!(civil(2024, 3, 31, 2, 30, 0), CivilDateTime::from_julian(local));
        // 01:30 UT is 02:30 CET, but 01:30 on Paris clocks is still CEST
        let ut = civil(2024, 10, 27, 1, 30, 0).to_julian();
        let local = to_local(ut, "Europe/Paris", &TzDatabase).unwrap();
        assert_eq!(civil(2024, 10, 27, 3, 30, 0), CivilDateTime::from_julian(local));
    }

    #[test]
    fn unknown_zone_is_reported() {
        let ut = JulianDate(2451545.0);
        assert_eq!(
            Err(Error::UnknownTimezone {
                name: "Mars/Olympus_Mons".into()
            }),
            to_local(ut, "Mars/Olympus_Mons", &TzDatabase)
        );
        assert!(zoned("Nowhere", &civil(2000, 1, 1, 0, 0, 0)).is_err());
    }

    #[test]
    fn zoned_keeps_wall_clock() {
        let reading = civil(2054, 6, 21, 4, 48, 12);
        let dt = zoned("Europe/Paris", &reading).unwrap();
        assert_eq!("2054-06-21T04:48:12+02:00", dt.to_rfc3339());
    }
}
