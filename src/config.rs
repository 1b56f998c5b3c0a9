//! Configuration shared by every season computation.

use chrono::{Datelike, Utc};
use serde::{Deserialize, Serialize};

use crate::timezone::UTC;

/// Timezone and default year used by [`Seasons`](crate::Seasons).
///
/// Nothing is validated here: an unknown timezone is only reported when a
/// computation uses it.
///
/// # Example
///
/// ```
/// use equisol::SeasonConfig;
///
/// let config = SeasonConfig::default()
///     .with_timezone("Europe/Paris")
///     .with_year(2054);
///
/// assert_eq!("Europe/Paris", config.timezone());
/// assert_eq!(2054, config.year());
/// assert!(!config.delta_t());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SeasonConfig {
    /// IANA timezone identifier, or `"UTC"`.
    timezone: String,
    /// Year used when a query does not name one.
    year: i32,
    /// Subtract ΔT so that results are in universal time rather than
    /// dynamical time.
    delta_t: bool,
}

impl Default for SeasonConfig {
    /// `UTC`, the current calendar year, no ΔT correction.
    fn default() -> Self {
        Self {
            timezone: UTC.to_owned(),
            year: Utc::now().year(),
            delta_t: false,
        }
    }
}

impl SeasonConfig {
    /// Creates a configuration for `timezone` and default `year`.
    pub fn new(timezone: impl Into<String>, year: i32) -> Self {
        Self {
            timezone: timezone.into(),
            year,
            delta_t: false,
        }
    }

    /// Sets the timezone.
    pub fn with_timezone(mut self, timezone: impl Into<String>) -> Self {
        self.timezone = timezone.into();
        self
    }

    /// Sets the default year.
    pub fn with_year(mut self, year: i32) -> Self {
        self.year = year;
        self
    }

    /// Enables or disables the ΔT correction.
    pub fn with_delta_t(mut self, delta_t: bool) -> Self {
        self.delta_t = delta_t;
        self
    }

    pub fn set_timezone(&mut self, timezone: impl Into<String>) {
        self.timezone = timezone.into();
    }

    pub fn set_year(&mut self, year: i32) {
        self.year = year;
    }

    pub fn set_delta_t(&mut self, delta_t: bool) {
        self.delta_t = delta_t;
    }

    pub fn timezone(&self) -> &str {
        &self.timezone
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn delta_t(&self) -> bool {
        self.delta_t
    }

    /// `true` if results need no timezone conversion.
    pub fn is_utc(&self) -> bool {
        self.timezone == UTC
    }

    /// `year` if given, otherwise the configured default year.
    pub fn resolve_year(&self, year: Option<i32>) -> i32 {
        year.unwrap_or(self.year)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = SeasonConfig::default();
        assert_eq!("UTC", config.timezone());
        assert!(config.is_utc());
        assert_eq!(Utc::now().year(), config.year());
        assert!(!config.delta_t());
    }

    #[test]
    fn setters_do_not_validate() {
        let mut config = SeasonConfig::new("UTC", 2000);
        config.set_timezone("Not/A_Zone");
        config.set_year(-40000);
        config.set_delta_t(true);
        assert_eq!(SeasonConfig::new("Not/A_Zone", -40000).with_delta_t(true), config);
        assert!(!config.is_utc());
    }

    #[test]
    fn resolve_year() {
        let config = SeasonConfig::new("UTC", 2022);
        assert_eq!(2022, config.resolve_year(None));
        assert_eq!(2054, config.resolve_year(Some(2054)));
    }

    #[test]
    fn partial_document_fills_defaults() {
        let config: SeasonConfig =
            serde_json::from_str(r#"{"timezone": "Europe/Paris"}"#).unwrap();
        assert_eq!("Europe/Paris", config.timezone());
        assert_eq!(Utc::now().year(), config.year());
        assert!(!config.delta_t());

        let config: SeasonConfig =
            serde_json::from_str(r#"{"year": 2054, "delta_t": true}"#).unwrap();
        assert_eq!(SeasonConfig::new("UTC", 2054).with_delta_t(true), config);
    }

    #[test]
    fn serializes_field_names() {
        let json = serde_json::to_value(SeasonConfig::new("Asia/Tokyo", 2030)).unwrap();
        assert_eq!(
            serde_json::json!({"timezone": "Asia/Tokyo", "year": 2030, "delta_t": false}),
            json
        );
    }
}
