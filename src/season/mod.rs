//! Equinoxes and solstices.
//!
//! Each event is found the way Meeus describes in chapter 27 of
//! *Astronomical Algorithms*: a mean instant from a polynomial in the year
//! ([`mean`]), corrected by a sum of periodic terms ([`periodic`]). The
//! result is then localized into the configured timezone and read as a civil
//! date-time.
//!
//! # Example
//!
//! ```
//! use equisol::{SeasonConfig, Seasons};
//!
//! let seasons = Seasons::new(SeasonConfig::new("Europe/Paris", 2054));
//! let all = seasons.all_four(None).unwrap();
//!
//! assert_eq!("2054-03-20T10:35:41", all.spring.civil.to_string());
//! ```

use std::fmt;
use std::ops::Index;
use std::str::FromStr;

use chrono::DateTime;
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use tracing::{debug, debug_span, trace};

use crate::config::SeasonConfig;
use crate::date::CivilDateTime;
use crate::error::{Error, Result};
use crate::time_scales::JulianDate;
use crate::timezone::{self, OffsetProvider, TzDatabase};

pub mod mean;
pub mod periodic;

/// The four events, named after the northern-hemisphere season they start.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventKind {
    /// March equinox.
    Spring,
    /// June solstice.
    Summer,
    /// September equinox.
    Autumn,
    /// December solstice.
    Winter,
}

impl EventKind {
    /// All events, in the order they occur within a year.
    pub const ALL: [EventKind; 4] = [Self::Spring, Self::Summer, Self::Autumn, Self::Winter];

    /// Position in [`EventKind::ALL`], `0..=3`.
    pub fn index(&self) -> usize {
        *self as usize
    }

    /// Lowercase name, e.g. `"spring"`.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Spring => "spring",
            Self::Summer => "summer",
            Self::Autumn => "autumn",
            Self::Winter => "winter",
        }
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Parses a season name, ignoring case.
///
/// ```
/// use equisol::EventKind;
///
/// assert_eq!(Ok(EventKind::Autumn), "Autumn".parse());
/// assert!("fall".parse::<EventKind>().is_err());
/// ```
impl FromStr for EventKind {
    type Err = Error;
    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| Error::UnknownEventKind { name: s.to_owned() })
    }
}

/// An event as seen in a timezone.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeasonEvent {
    pub kind: EventKind,
    /// Timezone the civil reading belongs to.
    pub timezone: String,
    /// Local Julian date, i.e. shifted by the timezone's offset.
    pub julian: JulianDate,
    /// Local wall-clock reading.
    pub civil: CivilDateTime,
}

impl SeasonEvent {
    /// The event as a chrono date-time in its timezone.
    pub fn to_zoned(&self) -> Result<DateTime<Tz>> {
        timezone::zoned(&self.timezone, &self.civil)
    }
}

impl fmt::Display for SeasonEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.civil, self.timezone)
    }
}

/// All four events of one year.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FourSeasons {
    pub spring: SeasonEvent,
    pub summer: SeasonEvent,
    pub autumn: SeasonEvent,
    pub winter: SeasonEvent,
}

impl FourSeasons {
    pub fn get(&self, kind: EventKind) -> &SeasonEvent {
        match kind {
            EventKind::Spring => &self.spring,
            EventKind::Summer => &self.summer,
            EventKind::Autumn => &self.autumn,
            EventKind::Winter => &self.winter,
        }
    }

    /// Events in the order they occur.
    pub fn iter(&self) -> impl Iterator<Item = &SeasonEvent> {
        EventKind::ALL.into_iter().map(move |kind| self.get(kind))
    }
}

impl Index<EventKind> for FourSeasons {
    type Output = SeasonEvent;
    fn index(&self, kind: EventKind) -> &SeasonEvent {
        self.get(kind)
    }
}

/// Instant of the event in `year`, in dynamical time, before localization.
///
/// # Example
///
/// ```
/// use equisol::season::{EventKind, event_julian_date};
///
/// // Meeus, example 27.a: June solstice 1962
/// let jde = event_julian_date(EventKind::Summer, 1962).unwrap();
/// assert!((jde.0 - 2437837.39245).abs() < 1e-5);
/// ```
pub fn event_julian_date(kind: EventKind, year: i32) -> Result<JulianDate> {
    let jde0 = mean::mean_julian_date(kind, year);
    let t = jde0.centuries_since_j2000();
    let dl = periodic::scale_factor(t);
    if dl.is_nan() || dl <= 0.0 {
        return Err(Error::DegenerateScaleFactor { t, value: dl });
    }
    let s = periodic::periodic_sum(t);
    trace!(jde0 = jde0.0, t, s, dl, "periodic correction");
    Ok(jde0 + 0.00001 * s / dl)
}

/// Computes one event with an explicit configuration and offset source.
pub fn compute<P: OffsetProvider>(
    kind: EventKind,
    year: i32,
    config: &SeasonConfig,
    provider: &P,
) -> Result<SeasonEvent> {
    let span = debug_span!("season", %kind, year, timezone = config.timezone());
    let _enter = span.enter();

    let mut ut = event_julian_date(kind, year)?;
    if config.delta_t() {
        ut = ut.to_universal();
        trace!(ut = ut.0, "applied delta T");
    }
    let julian = if config.is_utc() {
        ut
    } else {
        timezone::to_local(ut, config.timezone(), provider)?
    };
    let civil = CivilDateTime::from_julian(julian);
    debug!(%civil, "computed event");

    Ok(SeasonEvent {
        kind,
        timezone: config.timezone().to_owned(),
        julian,
        civil,
    })
}

/// Computes equinoxes and solstices for a configured timezone.
///
/// Every query is independent of the others; only the configuration is
/// kept between calls.
#[derive(Debug, Clone, Default)]
pub struct Seasons<P = TzDatabase> {
    config: SeasonConfig,
    provider: P,
}

impl Seasons {
    /// Uses the IANA timezone database for offsets.
    pub fn new(config: SeasonConfig) -> Self {
        Self::with_provider(config, TzDatabase)
    }
}

impl<P: OffsetProvider> Seasons<P> {
    /// Uses `provider` for offsets instead of the IANA database.
    ///
    /// # Example
    ///
    /// ```
    /// use equisol::{SeasonConfig, Seasons, EventKind};
    /// use equisol::timezone::FixedOffset;
    ///
    /// let config = SeasonConfig::new("Etc/Test", 2000);
    /// let seasons = Seasons::with_provider(config, FixedOffset(-3 * 3600));
    /// let spring = seasons.season(EventKind::Spring, None).unwrap();
    ///
    /// assert_eq!("2000-03-20T04:36:28", spring.civil.to_string());
    /// ```
    pub fn with_provider(config: SeasonConfig, provider: P) -> Self {
        Self { config, provider }
    }

    pub fn config(&self) -> &SeasonConfig {
        &self.config
    }

    pub fn config_mut(&mut self) -> &mut SeasonConfig {
        &mut self.config
    }

    /// Sets the timezone of later results. Not validated until used.
    pub fn set_timezone(&mut self, timezone: impl Into<String>) {
        self.config.set_timezone(timezone);
    }

    /// Sets the year used when a query does not name one.
    pub fn set_year(&mut self, year: i32) {
        self.config.set_year(year);
    }

    /// Universal-time instant of the event, before localization.
    ///
    /// Without the ΔT correction this is the dynamical-time instant taken
    /// as universal time.
    pub fn julian_date(&self, kind: EventKind, year: i32) -> Result<JulianDate> {
        let jde = event_julian_date(kind, year)?;
        Ok(if self.config.delta_t() {
            jde.to_universal()
        } else {
            jde
        })
    }

    /// Computes the event of `kind` in `year`.
    pub fn compute(&self, kind: EventKind, year: i32) -> Result<SeasonEvent> {
        compute(kind, year, &self.config, &self.provider)
    }

    /// Computes the event of `kind` in `year`, or in the configured year.
    pub fn season(&self, kind: EventKind, year: Option<i32>) -> Result<SeasonEvent> {
        self.compute(kind, self.config.resolve_year(year))
    }

    pub fn spring(&self, year: Option<i32>) -> Result<SeasonEvent> {
        self.season(EventKind::Spring, year)
    }

    pub fn summer(&self, year: Option<i32>) -> Result<SeasonEvent> {
        self.season(EventKind::Summer, year)
    }

    pub fn autumn(&self, year: Option<i32>) -> Result<SeasonEvent> {
        self.season(EventKind::Autumn, year)
    }

    pub fn winter(&self, year: Option<i32>) -> Result<SeasonEvent> {
        self.season(EventKind::Winter, year)
    }

    /// Computes all four events of `year`, or of the configured year.
    pub fn all_four(&self, year: Option<i32>) -> Result<FourSeasons> {
        let year = self.config.resolve_year(year);
        Ok(FourSeasons {
            spring: self.compute(EventKind::Spring, year)?,
            summer: self.compute(EventKind::Summer, year)?,
            autumn: self.compute(EventKind::Autumn, year)?,
            winter: self.compute(EventKind::Winter, year)?,
        })
    }
}
