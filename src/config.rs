//! Runtime configuration, read from the environment (and `.env` via `dotenvy`).

use chrono::FixedOffset;
use rust_decimal::Decimal;
use std::env;
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

pub const DEFAULT_DATABASE_URL: &str = "sqlite://parking.db?mode=rwc";
pub const DEFAULT_DATABASE_PATH: &str = "parking.db";
pub const DEFAULT_PORT: u16 = 3001;
pub const DEFAULT_UTC_OFFSET: &str = "+01:00";
pub const DEFAULT_OVERSTAY_RATE: i64 = 100;
pub const DEFAULT_BACKUP_INTERVAL_SECS: u64 = 12 * 60 * 60; // 12 hours

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("Invalid value for {name}: {value}")]
    Invalid { name: &'static str, value: String },
}

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    /// Path of the SQLite file on disk, uploaded by the backup job.
    pub database_path: PathBuf,
    pub port: u16,
    pub access_token: String,
    /// Civil timezone every timestamp is produced in.
    pub utc_offset: FixedOffset,
    /// Charge per hour past a ticket's expiry.
    pub overstay_rate: Decimal,
    pub backup_upload_url: Option<String>,
    pub backup_interval: Duration,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds a config from an arbitrary key lookup. `from_env` passes
    /// `std::env::var`; tests pass a map.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let access_token = lookup("ACCESS_TOKEN")
            .filter(|t| !t.is_empty())
            .ok_or(ConfigError::Missing("ACCESS_TOKEN"))?;

        let port = match lookup("PORT") {
            Some(v) => v.parse::<u16>().map_err(|_| ConfigError::Invalid {
                name: "PORT",
                value: v,
            })?,
            None => DEFAULT_PORT,
        };

        let offset_raw =
            lookup("LEDGER_UTC_OFFSET").unwrap_or_else(|| DEFAULT_UTC_OFFSET.to_string());
        let utc_offset = parse_utc_offset(&offset_raw).ok_or(ConfigError::Invalid {
            name: "LEDGER_UTC_OFFSET",
            value: offset_raw,
        })?;

        let overstay_rate = match lookup("OVERSTAY_RATE") {
            Some(v) => v.parse::<Decimal>().map_err(|_| ConfigError::Invalid {
                name: "OVERSTAY_RATE",
                value: v,
            })?,
            None => Decimal::from(DEFAULT_OVERSTAY_RATE),
        };

        let backup_interval_secs = match lookup("BACKUP_INTERVAL_SECS") {
            Some(v) => match v.parse::<u64>() {
                Ok(secs) if secs > 0 => secs,
                _ => {
                    return Err(ConfigError::Invalid {
                        name: "BACKUP_INTERVAL_SECS",
                        value: v,
                    });
                }
            },
            None => DEFAULT_BACKUP_INTERVAL_SECS,
        };

        Ok(Self {
            database_url: lookup("DATABASE_URL")
                .unwrap_or_else(|| DEFAULT_DATABASE_URL.to_string()),
            database_path: lookup("DATABASE_PATH")
                .unwrap_or_else(|| DEFAULT_DATABASE_PATH.to_string())
                .into(),
            port,
            access_token,
            utc_offset,
            overstay_rate,
            backup_upload_url: lookup("BACKUP_UPLOAD_URL").filter(|u| !u.is_empty()),
            backup_interval: Duration::from_secs(backup_interval_secs),
        })
    }
}

/// Parses `+HH:MM` / `-HH:MM` (also accepts `Z` for UTC).
fn parse_utc_offset(raw: &str) -> Option<FixedOffset> {
    let raw = raw.trim();
    if raw.eq_ignore_ascii_case("z") {
        return FixedOffset::east_opt(0);
    }

    let (sign, rest) = match raw.split_at_checked(1)? {
        ("+", rest) => (1, rest),
        ("-", rest) => (-1, rest),
        _ => return None,
    };
    let (hours, minutes) = rest.split_once(':')?;
    let hours: i32 = hours.parse().ok()?;
    let minutes: i32 = minutes.parse().ok()?;
    if hours > 23 || minutes > 59 {
        return None;
    }

    FixedOffset::east_opt(sign * (hours * 3600 + minutes * 60))
}
