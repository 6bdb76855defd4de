/// Calendar list entry from the discovery call
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct CalendarEntry {
    pub id: String,
    pub display_name: String,
}

/// Raw calendar event as fetched from the API, tagged with its source calendar
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize, Default)]
pub struct RawEvent {
    pub summary: Option<String>,
    pub start_date_time: Option<String>,
    pub start_date: Option<String>,
    pub source_calendar: String,
}
