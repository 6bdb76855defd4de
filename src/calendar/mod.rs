pub mod models;
pub mod token;

pub use models::{CalendarEntry, RawEvent};

use crate::config::Config;
use crate::error::{calendar_api_error, AgendaResult, Error};
use futures::future::try_join_all;
use reqwest::Client;
use serde_json::Value;
use self::token::TokenManager;
use std::sync::Arc;
use tokio::sync::OnceCell;
use tracing::info;
use url::Url;

/// Read-only client for the Google Calendar API
pub struct CalendarSource {
    config: Arc<Config>,
    token_manager: TokenManager,
    client: Client,
    access_token: OnceCell<String>,
}

impl CalendarSource {
    pub fn new(config: Arc<Config>) -> Self {
        let client = Client::new();

        Self {
            token_manager: TokenManager::new(Arc::clone(&config), client.clone()),
            config,
            client,
            access_token: OnceCell::new(),
        }
    }

    /// Get the access token, fetching it through the token manager on first use
    async fn access_token(&self) -> AgendaResult<&str> {
        let token = self
            .access_token
            .get_or_try_init(|| async {
                let token = self.token_manager.get_token().await?;
                token
                    .get("access_token")
                    .and_then(|t| t.as_str())
                    .map(|t| t.to_string())
                    .ok_or_else(|| calendar_api_error("No access token available"))
            })
            .await?;

        Ok(token)
    }

    /// Perform an authenticated GET request and return the parsed JSON body
    async fn get_json(&self, url: Url) -> AgendaResult<Value> {
        let access_token = self.access_token().await?;

        let response = self
            .client
            .get(url)
            .header("Authorization", format!("Bearer {}", access_token))
            .send()
            .await
            .map_err(|e| calendar_api_error(&format!("Request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_body = response
                .text()
                .await
                .unwrap_or_else(|_| "Could not read error response".to_string());
            return Err(calendar_api_error(&format!(
                "HTTP {} - {}",
                status, error_body
            )));
        }

        response
            .json()
            .await
            .map_err(|e| calendar_api_error(&format!("Failed to parse response: {}", e)))
    }

    /// Discover calendars matching the allow-list or the holiday prefix
    pub async fn discover_calendars(&self) -> AgendaResult<Vec<CalendarEntry>> {
        let url = Url::parse("https://www.googleapis.com/calendar/v3/users/me/calendarList")
            .map_err(|e| calendar_api_error(&format!("Failed to parse URL: {}", e)))?;

        let response_data = self.get_json(url).await?;

        let items = response_data
            .get("items")
            .and_then(|i| i.as_array())
            .ok_or_else(|| calendar_api_error("No items in calendar list response"))?;

        let mut calendars = Vec::new();
        for item in items {
            let id = item.get("id").and_then(|id| id.as_str()).unwrap_or("");
            let summary = item.get("summary").and_then(|s| s.as_str()).unwrap_or("");

            if id.is_empty() || summary.is_empty() {
                continue;
            }

            let targeted = self
                .config
                .target_calendars
                .iter()
                .any(|name| name.as_str() == summary)
                || summary.starts_with(&self.config.holiday_prefix);

            if targeted {
                info!("Found calendar '{}' with ID {}", summary, id);
                calendars.push(CalendarEntry {
                    id: id.to_string(),
                    display_name: summary.to_string(),
                });
            }
        }

        if calendars.is_empty() {
            return Err(Error::NoCalendarsFound);
        }

        Ok(calendars)
    }

    /// List events from one calendar, tagged with its display name
    pub async fn list_events(&self, entry: &CalendarEntry) -> AgendaResult<Vec<RawEvent>> {
        info!("Fetching events for '{}'", entry.display_name);

        let url_str = format!(
            "https://www.googleapis.com/calendar/v3/calendars/{}/events",
            entry.id
        );

        let mut url = Url::parse(&url_str)
            .map_err(|e| calendar_api_error(&format!("Failed to parse URL: {}", e)))?;

        url.query_pairs_mut()
            .append_pair("maxResults", "2500")
            .append_pair("singleEvents", "true")
            .append_pair("orderBy", "startTime");

        let response_data = self.get_json(url).await?;

        let events = response_data
            .get("items")
            .and_then(|i| i.as_array())
            .ok_or_else(|| calendar_api_error("No items in events response"))?;

        let raw_events = events
            .iter()
            .map(|event| parse_raw_event(event, &entry.display_name))
            .collect::<Vec<_>>();

        info!(
            "Fetched {} events from '{}'",
            raw_events.len(),
            entry.display_name
        );

        Ok(raw_events)
    }

    /// Discover matching calendars and fetch their events concurrently,
    /// flattened in discovery order
    pub async fn fetch_all_events(&self) -> AgendaResult<Vec<RawEvent>> {
        let calendars = self.discover_calendars().await?;

        let per_calendar =
            try_join_all(calendars.iter().map(|entry| self.list_events(entry))).await?;

        Ok(per_calendar.into_iter().flatten().collect())
    }
}

/// Convert one API event object into a RawEvent
fn parse_raw_event(event: &Value, source_calendar: &str) -> RawEvent {
    let summary = event
        .get("summary")
        .and_then(|s| s.as_str())
        .map(|s| s.to_string());

    let start_date_time = event
        .get("start")
        .and_then(|start| start.as_object())
        .and_then(|start| start.get("dateTime"))
        .and_then(|dt| dt.as_str())
        .map(|s| s.to_string());

    let start_date = event
        .get("start")
        .and_then(|start| start.as_object())
        .and_then(|start| start.get("date"))
        .and_then(|d| d.as_str())
        .map(|s| s.to_string());

    RawEvent {
        summary,
        start_date_time,
        start_date,
        source_calendar: source_calendar.to_string(),
    }
}
