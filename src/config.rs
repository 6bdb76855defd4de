use crate::error::{config_error, env_error, AgendaResult};
use dotenvy::dotenv;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::PathBuf;

/// Default calendar name allow-list
pub const DEFAULT_TARGET_CALENDARS: &str = "ODiE";

/// Calendars whose name starts with this prefix are treated as holiday calendars
pub const DEFAULT_HOLIDAY_PREFIX: &str = "Holidays in";

/// Default forecast window length in days
pub const DEFAULT_FORECAST_DAYS: u32 = 30;

/// Main configuration structure for the digest
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Google Calendar API client ID
    pub google_client_id: String,
    /// Google Calendar API client secret
    pub google_client_secret: String,
    /// Calendar names to include verbatim
    pub target_calendars: Vec<String>,
    /// Prefix identifying holiday calendars
    pub holiday_prefix: String,
    /// Default forecast window length in days
    pub forecast_days: u32,
    /// Path to the cached OAuth token file
    pub token_cache_path: PathBuf,
}

/// Optional on-disk override for the calendar allow-list
#[derive(Debug, Deserialize)]
struct CalendarsFile {
    target_calendars: Vec<String>,
}

impl Config {
    /// Load configuration from environment and config file
    pub fn load() -> AgendaResult<Self> {
        // Load .env file if it exists
        dotenv().ok();

        // Required environment variables
        let google_client_id =
            env::var("GOOGLE_CLIENT_ID").map_err(|_| env_error("GOOGLE_CLIENT_ID"))?;
        let google_client_secret =
            env::var("GOOGLE_CLIENT_SECRET").map_err(|_| env_error("GOOGLE_CLIENT_SECRET"))?;

        let mut target_calendars: Vec<String> = env::var("TARGET_CALENDARS")
            .unwrap_or_else(|_| String::from(DEFAULT_TARGET_CALENDARS))
            .split(',')
            .map(|name| name.trim().to_string())
            .filter(|name| !name.is_empty())
            .collect();

        let holiday_prefix =
            env::var("HOLIDAY_CALENDAR_PREFIX").unwrap_or_else(|_| String::from(DEFAULT_HOLIDAY_PREFIX));

        let forecast_days = match env::var("FORECAST_DAYS") {
            Ok(value) => value
                .parse::<u32>()
                .ok()
                .filter(|days| *days > 0)
                .ok_or_else(|| config_error("FORECAST_DAYS must be a positive integer"))?,
            Err(_) => DEFAULT_FORECAST_DAYS,
        };

        let token_cache_path = env::var("TOKEN_CACHE_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("token.json"));

        // The allow-list file takes precedence over the environment when present
        if let Ok(content) = fs::read_to_string("config/calendars.toml") {
            if let Ok(file) = toml::from_str::<CalendarsFile>(&content) {
                target_calendars = file.target_calendars;
            }
        }

        Ok(Config {
            google_client_id,
            google_client_secret,
            target_calendars,
            holiday_prefix,
            forecast_days,
            token_cache_path,
        })
    }
}
