use crate::calendar::RawEvent;
use crate::error::{malformed_event_error, AgendaResult};
use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime, Utc};

/// Normalized calendar event. The start instant is always UTC so that
/// comparisons and week grouping are consistent across source calendars.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CanonicalEvent {
    pub summary: String,
    pub start: DateTime<Utc>,
    pub all_day: bool,
    pub source_calendar: String,
}

impl CanonicalEvent {
    /// Normalize a raw event. Fails when neither a date nor a date-time
    /// start field is present, or when the start field cannot be parsed.
    pub fn from_raw(raw: &RawEvent) -> AgendaResult<Self> {
        let (start, all_day) = if let Some(date) = &raw.start_date {
            (parse_start_date(date)?, true)
        } else if let Some(date_time) = &raw.start_date_time {
            (parse_start_date_time(date_time)?, false)
        } else {
            return Err(malformed_event_error(&format!(
                "Event '{}' from '{}' has no start date or date-time",
                raw.summary.as_deref().unwrap_or(""),
                raw.source_calendar
            )));
        };

        Ok(Self {
            summary: raw.summary.clone().unwrap_or_default(),
            start,
            all_day,
            source_calendar: raw.source_calendar.clone(),
        })
    }

    /// (ISO year, ISO week) of the start instant's UTC date
    pub fn week_key(&self) -> (i32, u32) {
        let week = self.start.date_naive().iso_week();
        (week.year(), week.week())
    }

    /// Country name for events from a holiday calendar, if any
    pub fn holiday_country<'a>(&'a self, holiday_prefix: &str) -> Option<&'a str> {
        self.source_calendar
            .strip_prefix(holiday_prefix)
            .and_then(|rest| rest.strip_prefix(' '))
    }
}

/// Parse a date-only start (YYYY-MM-DD) as midnight UTC
fn parse_start_date(date: &str) -> AgendaResult<DateTime<Utc>> {
    let date = NaiveDate::parse_from_str(date, "%Y-%m-%d")
        .map_err(|e| malformed_event_error(&format!("Failed to parse date '{}': {}", date, e)))?;

    let midnight = date
        .and_hms_opt(0, 0, 0)
        .ok_or_else(|| malformed_event_error("Failed to create datetime"))?;

    Ok(midnight.and_utc())
}

/// Parse a date-time start, converting to UTC. A missing offset means UTC.
fn parse_start_date_time(date_time: &str) -> AgendaResult<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(date_time) {
        return Ok(dt.with_timezone(&Utc));
    }

    NaiveDateTime::parse_from_str(date_time, "%Y-%m-%dT%H:%M:%S%.f")
        .map(|dt| dt.and_utc())
        .map_err(|e| {
            malformed_event_error(&format!("Failed to parse datetime '{}': {}", date_time, e))
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Timelike};

    fn raw(summary: &str, date_time: Option<&str>, date: Option<&str>) -> RawEvent {
        RawEvent {
            summary: Some(summary.to_string()),
            start_date_time: date_time.map(|s| s.to_string()),
            start_date: date.map(|s| s.to_string()),
            source_calendar: "ODiE".to_string(),
        }
    }

    #[test]
    fn test_date_only_is_all_day_at_utc_midnight() {
        let event = CanonicalEvent::from_raw(&raw("Holiday", None, Some("2025-08-11"))).unwrap();

        assert!(event.all_day);
        assert_eq!(event.start, Utc.with_ymd_and_hms(2025, 8, 11, 0, 0, 0).unwrap());
    }

    #[test]
    fn test_date_time_without_offset_is_utc() {
        let event =
            CanonicalEvent::from_raw(&raw("Sync", Some("2025-08-04T10:30:00"), None)).unwrap();

        assert!(!event.all_day);
        assert_eq!(event.start, Utc.with_ymd_and_hms(2025, 8, 4, 10, 30, 0).unwrap());
    }

    #[test]
    fn test_date_time_with_offset_converts_to_utc() {
        let event =
            CanonicalEvent::from_raw(&raw("Sync", Some("2025-08-04T10:30:00+03:00"), None))
                .unwrap();

        assert_eq!(event.start.hour(), 7);
        assert_eq!(event.start.minute(), 30);
    }

    #[test]
    fn test_missing_start_is_malformed() {
        let result = CanonicalEvent::from_raw(&raw("Broken", None, None));
        assert!(result.is_err());
    }

    #[test]
    fn test_garbage_date_time_is_malformed() {
        let result = CanonicalEvent::from_raw(&raw("Broken", Some("not-a-date"), None));
        assert!(result.is_err());
    }

    #[test]
    fn test_missing_summary_defaults_to_empty() {
        let event = CanonicalEvent::from_raw(&RawEvent {
            summary: None,
            start_date: Some("2025-08-11".to_string()),
            start_date_time: None,
            source_calendar: "ODiE".to_string(),
        })
        .unwrap();

        assert_eq!(event.summary, "");
    }

    #[test]
    fn test_week_key() {
        // 2025-08-04 is a Monday in ISO week 32
        let event = CanonicalEvent::from_raw(&raw("Sync", None, Some("2025-08-04"))).unwrap();
        assert_eq!(event.week_key(), (2025, 32));

        // The following Monday is ISO week 33
        let event = CanonicalEvent::from_raw(&raw("Sync", None, Some("2025-08-11"))).unwrap();
        assert_eq!(event.week_key(), (2025, 33));
    }

    #[test]
    fn test_holiday_country() {
        let mut event = CanonicalEvent::from_raw(&raw("Day", None, Some("2025-08-11"))).unwrap();
        event.source_calendar = "Holidays in Japan".to_string();

        assert_eq!(event.holiday_country("Holidays in"), Some("Japan"));
        assert_eq!(event.holiday_country("Other prefix"), None);
    }

    #[test]
    fn test_non_holiday_calendar_has_no_country() {
        let event = CanonicalEvent::from_raw(&raw("Sync", None, Some("2025-08-11"))).unwrap();
        assert_eq!(event.holiday_country("Holidays in"), None);
    }
}
