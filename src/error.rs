//! Error type shared by the whole crate.

/// Errors surfaced while computing or localizing season events.
///
/// The computation itself is total for any integer year; failures only come
/// from the timezone database.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum Error {
    /// The IANA timezone database does not know the identifier.
    #[error("unknown timezone {name:?}")]
    UnknownTimezone {
        /// The identifier as given by the caller.
        name: String,
    },

    /// The name is none of `spring`, `summer`, `autumn` or `winter`.
    #[error("unknown season {name:?}")]
    UnknownEventKind { name: String },

    /// A civil reading could not be expressed as a chrono date-time.
    #[error("invalid civil date-time {year:04}-{month:02}-{day:02}T{hour:02}:{minute:02}:{second:02}")]
    InvalidCivilDateTime {
        year: i32,
        month: u32,
        day: u32,
        hour: u32,
        minute: u32,
        second: u32,
    },

    /// The correction scale factor came out non-positive.
    #[error("scale factor {value} is not positive (T = {t})")]
    DegenerateScaleFactor {
        /// Julian centuries since J2000.0.
        t: f64,
        /// The offending factor.
        value: f64,
    },
}

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_timezone_message() {
        let e = Error::UnknownTimezone {
            name: "Mars/Olympus".into(),
        };
        assert_eq!(e.to_string(), "unknown timezone \"Mars/Olympus\"");
    }

    #[test]
    fn invalid_civil_message() {
        let e = Error::InvalidCivilDateTime {
            year: 2021,
            month: 2,
            day: 30,
            hour: 1,
            minute: 2,
            second: 3,
        };
        assert_eq!(e.to_string(), "invalid civil date-time 2021-02-30T01:02:03");
    }

    #[test]
    fn error_is_send_and_sync() {
        fn assert_impl<T: std::error::Error + Send + Sync>() {}
        assert_impl::<Error>();
    }
}
