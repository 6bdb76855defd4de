use super::event::CanonicalEvent;
use chrono::{Datelike, Days, NaiveDate, Weekday};

/// Summaries containing any of these (case-insensitive) are excluded
const EXCLUDED_KEYWORDS: [&str; 3] = ["PTO", "OOO", "HALF-DAY"];

/// Inclusive date range of the digest, `[today, today + days]` in UTC
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ForecastWindow {
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub days: u32,
}

impl ForecastWindow {
    pub fn starting(today: NaiveDate, days: u32) -> Self {
        let end = today
            .checked_add_days(Days::new(days as u64))
            .unwrap_or(NaiveDate::MAX);

        Self {
            start: today,
            end,
            days,
        }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }
}

/// Pure per-event inclusion predicate.
///
/// Weekend and range checks use the UTC calendar date of the start instant,
/// so a timed event near a UTC day boundary may be classified differently
/// than its local wall-clock date would suggest. Known limitation.
pub fn keep(event: &CanonicalEvent, window: &ForecastWindow) -> bool {
    let summary_upper = event.summary.to_uppercase();
    if EXCLUDED_KEYWORDS
        .iter()
        .any(|keyword| summary_upper.contains(keyword))
    {
        return false;
    }

    let date = event.start.date_naive();
    if matches!(date.weekday(), Weekday::Sat | Weekday::Sun) {
        return false;
    }

    window.contains(date)
}
