use std::env;

use chrono_tz::Tz;
use indicative_core::calendar::CalendarError;
use indicative_core::export::DEFAULT_PROGRAM_NAME;

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Path to SQLite database file (default: "indicative.db")
    /// Note: Only used when the `sqlite` feature is enabled.
    #[cfg_attr(not(feature = "sqlite"), allow(dead_code))]
    pub sqlite_path: String,
    /// Zone calendar days are computed in (default: UTC)
    pub display_timezone: Tz,
    /// Program name printed on exports (default: "Program")
    pub program_name: String,
    /// Seed demo documents at startup (default: false)
    pub seed_demo_data: bool,
    /// Tenant key given to seeded documents (default: "DEMO")
    pub seed_tenant: String,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Environment variables:
    /// - `SQLITE_PATH` - SQLite database path (default: "indicative.db")
    /// - `DISPLAY_TIMEZONE` - IANA zone name (default: "UTC")
    /// - `PROGRAM_NAME` - Program name on exports (default: "Program")
    /// - `SEED_DEMO_DATA` - `true`/`1` to seed demo data (default: false)
    /// - `SEED_TENANT` - Tenant key for seeded data (default: "DEMO")
    ///
    /// Fails only when `DISPLAY_TIMEZONE` names an unknown zone.
    pub fn from_env() -> Result<Self, CalendarError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the configuration from any variable source.
    fn from_lookup(var: impl Fn(&str) -> Option<String>) -> Result<Self, CalendarError> {
        Ok(Self {
            sqlite_path: var("SQLITE_PATH").unwrap_or_else(|| "indicative.db".to_string()),
            display_timezone: match var("DISPLAY_TIMEZONE") {
                Some(name) => parse_timezone(&name)?,
                None => Tz::UTC,
            },
            program_name: var("PROGRAM_NAME")
                .filter(|v| !v.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_PROGRAM_NAME.to_string()),
            seed_demo_data: var("SEED_DEMO_DATA")
                .map(|v| parse_flag(&v))
                .unwrap_or(false),
            seed_tenant: var("SEED_TENANT").unwrap_or_else(|| "DEMO".to_string()),
        })
    }
}

/// Parses an IANA time zone name.
pub fn parse_timezone(name: &str) -> Result<Tz, CalendarError> {
    name.trim()
        .parse::<Tz>()
        .map_err(|_| CalendarError::UnknownTimeZone(name.to_string()))
}

fn parse_flag(value: &str) -> bool {
    matches!(
        value.trim().to_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}
