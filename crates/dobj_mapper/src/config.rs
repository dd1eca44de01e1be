//! Engine configuration.
//!
//! The only setting is the default timezone. Temporal fields are converted
//! to it after parsing, and offset-less inputs are read in it.
//!
//! A process-wide [`Config`] is created on first use from the environment
//! (`DOBJ_TIMEZONE`, then `APP_TIMEZONE`) and can be replaced with [`set`].

use alloc::format;
use std::env;
use std::sync::{LazyLock, PoisonError, RwLock};

use chrono::{FixedOffset, Offset, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Environment variables consulted by [`Config::from_env`], in order.
pub const TIMEZONE_ENV_VARS: [&str; 2] = ["DOBJ_TIMEZONE", "APP_TIMEZONE"];

// -----------------------------------------------------------------------------
// Config

/// Engine configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Default timezone of temporal fields, serialized as `+05:00`.
    #[serde(with = "timezone_spec")]
    pub timezone: FixedOffset,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            timezone: Utc.fix(),
        }
    }
}

impl Config {
    /// Create a new config builder
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }

    /// Reads the configuration from the environment.
    ///
    /// Unset variables fall back to the defaults, a set but invalid
    /// variable is an [`Error::Config`].
    pub fn from_env() -> Result<Self> {
        let mut builder = Self::builder();
        for var in TIMEZONE_ENV_VARS {
            if let Ok(spec) = env::var(var) {
                builder = builder.timezone(parse_timezone(&spec)?);
                break;
            }
        }
        Ok(builder.build())
    }
}

/// Config builder for fluent API
#[derive(Debug, Default)]
pub struct ConfigBuilder {
    timezone: Option<FixedOffset>,
}

impl ConfigBuilder {
    /// Set the default timezone
    pub fn timezone(mut self, timezone: FixedOffset) -> Self {
        self.timezone = Some(timezone);
        self
    }

    /// Build the configuration
    pub fn build(self) -> Config {
        let defaults = Config::default();

        Config {
            timezone: self.timezone.unwrap_or(defaults.timezone),
        }
    }
}

// -----------------------------------------------------------------------------
// Global configuration

static GLOBAL: LazyLock<RwLock<Config>> = LazyLock::new(|| {
    let config = Config::from_env().unwrap_or_else(|err| {
        log::warn!("{err}, falling back to the default configuration");
        Config::default()
    });
    RwLock::new(config)
});

/// Returns a copy of the process-wide configuration.
pub fn get() -> Config {
    *GLOBAL.read().unwrap_or_else(PoisonError::into_inner)
}

/// Replaces the process-wide configuration.
pub fn set(config: Config) {
    *GLOBAL.write().unwrap_or_else(PoisonError::into_inner) = config;
}

/// Re-reads the process-wide configuration from the environment.
pub fn init_from_env() -> Result<()> {
    set(Config::from_env()?);
    Ok(())
}

/// The configured default timezone.
#[inline]
pub fn timezone() -> FixedOffset {
    get().timezone
}

/// Sets the default timezone from a specification such as `UTC` or `+05:00`.
pub fn set_timezone(spec: &str) -> Result<()> {
    let timezone = parse_timezone(spec)?;
    GLOBAL.write().unwrap_or_else(PoisonError::into_inner).timezone = timezone;
    Ok(())
}

/// Parses a timezone specification.
///
/// Accepted forms: `UTC`, `GMT`, `Z`, `+05:00`, `-0330`, `+5`, `+05`.
///
/// # Examples
///
/// ```
/// use dobj_mapper::config::parse_timezone;
///
/// assert_eq!(parse_timezone("+05:00").unwrap().local_minus_utc(), 5 * 3600);
/// assert_eq!(parse_timezone("-0330").unwrap().local_minus_utc(), -(3 * 3600 + 1800));
/// assert_eq!(parse_timezone("utc").unwrap().local_minus_utc(), 0);
/// assert!(parse_timezone("Mars/Olympus").is_err());
/// ```
pub fn parse_timezone(spec: &str) -> Result<FixedOffset> {
    let spec = spec.trim();
    let invalid = || Error::config(format!("unknown timezone `{spec}`"));

    if ["UTC", "GMT", "Z"].iter().any(|z| spec.eq_ignore_ascii_case(z)) {
        return Ok(Utc.fix());
    }

    let (sign, rest) = match spec.as_bytes().first() {
        Some(b'+') => (1, &spec[1..]),
        Some(b'-') => (-1, &spec[1..]),
        _ => return Err(invalid()),
    };

    let (hours, minutes) = match rest.split_once(':') {
        Some((h, m)) => (h, m),
        None if rest.len() == 4 && rest.is_ascii() => rest.split_at(2),
        None => (rest, "0"),
    };

    let hours: i32 = hours.parse().map_err(|_| invalid())?;
    let minutes: i32 = minutes.parse().map_err(|_| invalid())?;
    if !(0..24).contains(&hours) || !(0..60).contains(&minutes) {
        return Err(invalid());
    }

    FixedOffset::east_opt(sign * (hours * 3600 + minutes * 60)).ok_or_else(invalid)
}

mod timezone_spec {
    use alloc::string::String;

    use chrono::FixedOffset;
    use serde::{Deserialize, Deserializer, Serializer, de};

    pub fn serialize<S: Serializer>(tz: &FixedOffset, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(tz)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<FixedOffset, D::Error> {
        let spec = String::deserialize(deserializer)?;
        super::parse_timezone(&spec).map_err(de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use chrono::FixedOffset;

    use super::{Config, parse_timezone};

    #[test]
    fn test_config_builder() {
        let tz = FixedOffset::east_opt(5 * 3600).unwrap();
        let config = Config::builder().timezone(tz).build();
        assert_eq!(config.timezone, tz);
        assert_eq!(Config::builder().build(), Config::default());
    }

    #[test]
    fn timezone_forms() {
        let five = FixedOffset::east_opt(5 * 3600).unwrap();
        for spec in ["+05:00", "+0500", "+5", "+05", " +05:00 "] {
            assert_eq!(parse_timezone(spec).unwrap(), five, "{spec}");
        }
        assert_eq!(parse_timezone("Z").unwrap().local_minus_utc(), 0);
        assert_eq!(parse_timezone("-03:30").unwrap().local_minus_utc(), -12600);

        for bad in ["", "05:00", "+24:00", "+05:60", "+ab", "+1\u{e9}1", "Asia/Tashkent"] {
            assert!(parse_timezone(bad).is_err(), "{bad}");
        }
    }

    #[test]
    fn serde_uses_offset_strings() {
        let config = Config::builder()
            .timezone(FixedOffset::west_opt(3600 + 1800).unwrap())
            .build();

        let text = serde_json::to_string(&config).unwrap();
        assert_eq!(text, r#"{"timezone":"-01:30"}"#);

        let back: Config = serde_json::from_str(&text).unwrap();
        assert_eq!(back, config);
        assert!(serde_json::from_str::<Config>(r#"{"timezone":"nowhere"}"#).is_err());
    }
}
