//! Dates and times of the equinoxes and solstices.
//!
//! The four events of a year are computed with the method of chapter 27 of
//! Meeus' *Astronomical Algorithms* (2nd ed.), accurate to about a minute for
//! the years 1000 to 3000, and read as civil date-times in any IANA timezone.
//! Years outside that range are extrapolated rather than rejected.
//!
//! # Examples
//!
//! One event, in UTC:
//!
//! ```
//! use equisol::{EventKind, SeasonConfig, Seasons};
//!
//! let seasons = Seasons::new(SeasonConfig::new("UTC", 2000));
//! let spring = seasons.season(EventKind::Spring, None).unwrap();
//!
//! assert_eq!("2000-03-20T07:36:28", spring.civil.to_string());
//! ```
//!
//! All four events in a local timezone:
//!
//! ```
//! use equisol::{SeasonConfig, Seasons};
//!
//! let mut seasons = Seasons::new(SeasonConfig::default());
//! seasons.set_timezone("Europe/Paris");
//!
//! let all = seasons.all_four(Some(2054)).unwrap();
//! assert_eq!("2054-03-20T10:35:41", all.spring.civil.to_string());
//! assert_eq!("2054-06-21T04:48:12", all.summer.civil.to_string());
//! ```
//!
//! The method yields dynamical time. By default this is taken as universal
//! time, which puts results about a minute late around the year 2000;
//! [`SeasonConfig::with_delta_t`] subtracts ΔT first:
//!
//! ```
//! use equisol::{SeasonConfig, Seasons};
//!
//! let config = SeasonConfig::new("UTC", 2000).with_delta_t(true);
//! let spring = Seasons::new(config).spring(None).unwrap();
//! assert_eq!("2000-03-20T07:35:24", spring.civil.to_string());
//! ```
//!
//! The library logs through [`tracing`]; install a subscriber to see the
//! intermediate values of each computation.

pub mod config;
pub mod date;
pub mod error;
pub mod season;
pub mod time_scales;
pub mod timezone;

pub use config::SeasonConfig;
pub use date::{CivilDateTime, Date, YearType};
pub use error::{Error, Result};
pub use season::{EventKind, FourSeasons, SeasonEvent, Seasons};
pub use time_scales::JulianDate;
