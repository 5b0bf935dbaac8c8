//! Runtime configuration read from the environment.

use chrono::{FixedOffset, Offset, Utc};

/// Offset of the zoo's local time from UTC, in minutes.
pub const UTC_OFFSET_ENV: &str = "ZOO_UTC_OFFSET_MINUTES";
/// Whether the demo binary seeds sample animals and enclosures.
pub const SEED_DEMO_ENV: &str = "ZOO_SEED_DEMO";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ZooConfig {
    pub utc_offset: FixedOffset,
    pub seed_demo: bool,
}

impl Default for ZooConfig {
    fn default() -> Self {
        Self {
            utc_offset: Utc.fix(),
            seed_demo: true,
        }
    }
}

impl ZooConfig {
    /// Read configuration from process environment variables.
    ///
    /// Invalid values are logged and replaced by their defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        let utc_offset = match lookup(UTC_OFFSET_ENV) {
            Some(raw) => parse_offset(&raw).unwrap_or_else(|| {
                tracing::warn!(value = %raw, "Invalid {}, using UTC", UTC_OFFSET_ENV);
                defaults.utc_offset
            }),
            None => defaults.utc_offset,
        };

        let seed_demo = match lookup(SEED_DEMO_ENV) {
            Some(raw) => parse_flag(&raw).unwrap_or_else(|| {
                tracing::warn!(value = %raw, "Invalid {}, using default", SEED_DEMO_ENV);
                defaults.seed_demo
            }),
            None => defaults.seed_demo,
        };

        Self {
            utc_offset,
            seed_demo,
        }
    }
}

fn parse_offset(raw: &str) -> Option<FixedOffset> {
    let minutes: i32 = raw.trim().parse().ok()?;
    FixedOffset::east_opt(minutes.checked_mul(60)?)
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
