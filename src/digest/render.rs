use super::event::CanonicalEvent;
use super::filter::ForecastWindow;
use chrono::NaiveDate;

/// Display format for event dates, e.g. "Monday, 04 August"
const DISPLAY_DATE_FORMAT: &str = "%A, %d %B";

/// Single-pass iterator over the digest's display lines.
///
/// Events must already be filtered and sorted. A blank line is emitted
/// between the last event of one ISO week and the first event of the next.
/// With no events at all, exactly one "no events found" notice is yielded.
pub struct DigestLines {
    events: std::vec::IntoIter<CanonicalEvent>,
    holiday_prefix: String,
    last_week: Option<(i32, u32)>,
    pending: Option<String>,
    notice: Option<String>,
}

/// Build the digest line iterator for already filtered and sorted events
pub fn digest_lines(
    events: Vec<CanonicalEvent>,
    holiday_prefix: &str,
    window: &ForecastWindow,
) -> DigestLines {
    let notice = if events.is_empty() {
        Some(format!(
            "No events found for the next {} days ({} to {}).",
            window.days,
            format_display_date(window.start),
            format_display_date(window.end)
        ))
    } else {
        None
    };

    DigestLines {
        events: events.into_iter(),
        holiday_prefix: holiday_prefix.to_string(),
        last_week: None,
        pending: None,
        notice,
    }
}

/// Format a calendar date for display, without any time of day
pub fn format_display_date(date: NaiveDate) -> String {
    date.format(DISPLAY_DATE_FORMAT).to_string()
}

impl DigestLines {
    fn format_line(&self, event: &CanonicalEvent) -> String {
        let mut line = format!(
            "{} - {}",
            format_display_date(event.start.date_naive()),
            event.summary
        );

        if let Some(country) = event.holiday_country(&self.holiday_prefix) {
            line.push_str(&format!(" ({})", country));
        }

        line
    }
}

impl Iterator for DigestLines {
    type Item = String;

    fn next(&mut self) -> Option<String> {
        if let Some(notice) = self.notice.take() {
            return Some(notice);
        }

        if let Some(line) = self.pending.take() {
            return Some(line);
        }

        let event = self.events.next()?;
        let week = event.week_key();
        let line = self.format_line(&event);

        match self.last_week.replace(week) {
            // Week boundary after at least one emitted line: separator first
            Some(previous) if previous != week => {
                self.pending = Some(line);
                Some(String::new())
            }
            _ => Some(line),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, Utc};

    fn event(start: &str, summary: &str, source_calendar: &str) -> CanonicalEvent {
        CanonicalEvent {
            summary: summary.to_string(),
            start: start.parse::<DateTime<Utc>>().unwrap(),
            all_day: false,
            source_calendar: source_calendar.to_string(),
        }
    }

    fn window() -> ForecastWindow {
        ForecastWindow::starting(NaiveDate::from_ymd_opt(2025, 8, 4).unwrap(), 30)
    }

    #[test]
    fn test_blank_line_between_weeks() {
        // Mondays of ISO weeks 32 and 33
        let lines: Vec<_> = digest_lines(
            vec![
                event("2025-08-04T10:00:00Z", "Week 32 sync", "ODiE"),
                event("2025-08-11T10:00:00Z", "Week 33 sync", "ODiE"),
            ],
            "Holidays in",
            &window(),
        )
        .collect();

        assert_eq!(
            lines,
            [
                "Monday, 04 August - Week 32 sync",
                "",
                "Monday, 11 August - Week 33 sync",
            ]
        );
    }

    #[test]
    fn test_no_blank_line_within_a_week() {
        let lines: Vec<_> = digest_lines(
            vec![
                event("2025-08-04T10:00:00Z", "Monday sync", "ODiE"),
                event("2025-08-06T10:00:00Z", "Wednesday review", "ODiE"),
            ],
            "Holidays in",
            &window(),
        )
        .collect();

        assert_eq!(
            lines,
            [
                "Monday, 04 August - Monday sync",
                "Wednesday, 06 August - Wednesday review",
            ]
        );
    }

    #[test]
    fn test_no_leading_blank_line() {
        let lines: Vec<_> = digest_lines(
            vec![event("2025-08-04T10:00:00Z", "Sync", "ODiE")],
            "Holidays in",
            &window(),
        )
        .collect();

        assert_eq!(lines.len(), 1);
        assert!(!lines[0].is_empty());
    }

    #[test]
    fn test_holiday_events_carry_country_suffix() {
        let lines: Vec<_> = digest_lines(
            vec![event(
                "2025-08-11T00:00:00Z",
                "Mountain Day",
                "Holidays in Japan",
            )],
            "Holidays in",
            &window(),
        )
        .collect();

        assert_eq!(lines, ["Monday, 11 August - Mountain Day (Japan)"]);
    }

    #[test]
    fn test_timed_events_render_date_only() {
        let lines: Vec<_> = digest_lines(
            vec![event("2025-08-04T15:45:00Z", "Afternoon sync", "ODiE")],
            "Holidays in",
            &window(),
        )
        .collect();

        assert_eq!(lines, ["Monday, 04 August - Afternoon sync"]);
    }

    #[test]
    fn test_empty_digest_yields_single_notice() {
        let window = ForecastWindow::starting(NaiveDate::from_ymd_opt(2025, 8, 4).unwrap(), 7);
        let lines: Vec<_> = digest_lines(Vec::new(), "Holidays in", &window).collect();

        assert_eq!(
            lines,
            ["No events found for the next 7 days (Monday, 04 August to Monday, 11 August)."]
        );
    }

    #[test]
    fn test_year_boundary_weeks_are_distinct() {
        // 2025-12-29 and 2026-01-02 share ISO week 1 of 2026: no separator.
        // 2026-01-05 starts ISO week 2: separator before it.
        let lines: Vec<_> = digest_lines(
            vec![
                event("2025-12-29T10:00:00Z", "Year-end review", "ODiE"),
                event("2026-01-02T10:00:00Z", "Kickoff", "ODiE"),
                event("2026-01-05T10:00:00Z", "Planning", "ODiE"),
            ],
            "Holidays in",
            &ForecastWindow::starting(NaiveDate::from_ymd_opt(2025, 12, 29).unwrap(), 30),
        )
        .collect();

        assert_eq!(
            lines,
            [
                "Monday, 29 December - Year-end review",
                "Friday, 02 January - Kickoff",
                "",
                "Monday, 05 January - Planning",
            ]
        );
    }
}
