use crate::error::{config_error, env_error, AppResult};
use chrono::{NaiveDate, Utc};
use chrono_tz::Tz;
use dotenvy::dotenv;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::Path;
use tracing::{debug, warn};

/// Default number of rows per table page
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// Default number of events shown in the selected-day panel
pub const DEFAULT_EVENTS_PANEL_LIMIT: usize = 5;

/// Location of the optional dashboard overlay file
pub const DASHBOARD_CONFIG_PATH: &str = "config/dashboard.toml";

/// Main configuration structure for the dashboard
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Base URL of the calendar backend, e.g. `https://calendar.example.com`
    pub calendar_api_base_url: String,
    /// API key sent as `x-api-key`
    pub calendar_api_key: String,
    /// Calendar whose events are shown
    pub calendar_id: String,
    /// IANA timezone used to decide what "today" is
    pub timezone: String,
    /// Rows per table page
    pub page_size: usize,
    /// Maximum events listed for the selected day
    pub events_panel_limit: usize,
    /// Only ask the backend for upcoming events
    pub upcoming_only: bool,
    /// Base URL of the voice agent backend, agent commands need it
    pub agent_api_base_url: Option<String>,
    /// API key for the agent backend, falls back to the calendar key
    pub agent_api_key: Option<String>,
    /// Organization whose agents are listed
    pub organization_id: Option<String>,
}

/// Optional values read from `config/dashboard.toml`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DashboardOverlay {
    pub page_size: Option<usize>,
    pub events_panel_limit: Option<usize>,
    pub upcoming_only: Option<bool>,
}

impl Config {
    /// Load configuration from environment and config file
    pub fn load() -> AppResult<Self> {
        // Load .env file if it exists
        dotenv().ok();

        let mut config = Self::from_vars(|key| env::var(key).ok())?;

        if Path::new(DASHBOARD_CONFIG_PATH).exists() {
            let content = fs::read_to_string(DASHBOARD_CONFIG_PATH)?;
            let overlay = toml::from_str::<DashboardOverlay>(&content)?;
            debug!("Applying overlay from {}", DASHBOARD_CONFIG_PATH);
            config.apply_overlay(overlay)?;
        }

        Ok(config)
    }

    /// Build configuration from a variable lookup
    pub fn from_vars<F>(lookup: F) -> AppResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let calendar_api_base_url =
            lookup("CALENDAR_API_BASE_URL").ok_or_else(|| env_error("CALENDAR_API_BASE_URL"))?;
        let calendar_api_key =
            lookup("CALENDAR_API_KEY").ok_or_else(|| env_error("CALENDAR_API_KEY"))?;
        let calendar_id = lookup("CALENDAR_ID").ok_or_else(|| env_error("CALENDAR_ID"))?;

        let timezone = lookup("TIMEZONE").unwrap_or_else(|| String::from("UTC"));
        parse_timezone(&timezone)?;

        let page_size = match lookup("PAGE_SIZE") {
            Some(raw) => raw
                .parse::<usize>()
                .map_err(|_| config_error("Invalid PAGE_SIZE format"))?,
            None => DEFAULT_PAGE_SIZE,
        };
        if page_size == 0 {
            return Err(config_error("PAGE_SIZE must be greater than zero"));
        }

        let events_panel_limit = match lookup("EVENTS_PANEL_LIMIT") {
            Some(raw) => raw
                .parse::<usize>()
                .map_err(|_| config_error("Invalid EVENTS_PANEL_LIMIT format"))?,
            None => DEFAULT_EVENTS_PANEL_LIMIT,
        };

        let upcoming_only = match lookup("UPCOMING_ONLY") {
            Some(raw) => parse_flag(&raw).ok_or_else(|| config_error("Invalid UPCOMING_ONLY value"))?,
            None => true,
        };

        let agent_api_base_url = lookup("AGENT_API_BASE_URL").filter(|v| !v.trim().is_empty());
        let agent_api_key = lookup("AGENT_API_KEY").filter(|v| !v.trim().is_empty());
        let organization_id = lookup("ORGANIZATION_ID").filter(|v| !v.trim().is_empty());

        Ok(Config {
            calendar_api_base_url,
            calendar_api_key,
            calendar_id,
            timezone,
            page_size,
            events_panel_limit,
            upcoming_only,
            agent_api_base_url,
            agent_api_key,
            organization_id,
        })
    }

    /// Merge values from the dashboard overlay file
    pub fn apply_overlay(&mut self, overlay: DashboardOverlay) -> AppResult<()> {
        if let Some(page_size) = overlay.page_size {
            if page_size == 0 {
                return Err(config_error("page_size must be greater than zero"));
            }
            self.page_size = page_size;
        }
        if let Some(limit) = overlay.events_panel_limit {
            self.events_panel_limit = limit;
        }
        if let Some(upcoming_only) = overlay.upcoming_only {
            self.upcoming_only = upcoming_only;
        }
        Ok(())
    }

    /// Parsed timezone, falling back to UTC if the stored name is invalid
    pub fn tz(&self) -> Tz {
        parse_timezone(&self.timezone).unwrap_or_else(|_| {
            warn!("Invalid timezone {}, using UTC", self.timezone);
            chrono_tz::UTC
        })
    }

    /// Agent backend URL and key, the key defaulting to the calendar key
    pub fn agent_api(&self) -> AppResult<(&str, &str)> {
        let base_url = self
            .agent_api_base_url
            .as_deref()
            .ok_or_else(|| env_error("AGENT_API_BASE_URL"))?;
        let api_key = self
            .agent_api_key
            .as_deref()
            .unwrap_or(&self.calendar_api_key);
        Ok((base_url, api_key))
    }

    /// Today's date in the configured timezone
    pub fn today(&self) -> NaiveDate {
        Utc::now().with_timezone(&self.tz()).date_naive()
    }
}

/// Parse an IANA timezone name
pub fn parse_timezone(name: &str) -> AppResult<Tz> {
    name.parse::<Tz>()
        .map_err(|_| config_error(&format!("Invalid timezone: {}", name)))
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
