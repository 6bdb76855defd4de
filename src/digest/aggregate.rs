use super::event::CanonicalEvent;

/// Sort events ascending by start instant. The sort is stable, so events
/// with identical starts keep their fetch order.
pub fn sort_by_start(mut events: Vec<CanonicalEvent>) -> Vec<CanonicalEvent> {
    events.sort_by_key(|event| event.start);
    events
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, Utc};

    fn event(start: &str, summary: &str) -> CanonicalEvent {
        CanonicalEvent {
            summary: summary.to_string(),
            start: start.parse::<DateTime<Utc>>().unwrap(),
            all_day: false,
            source_calendar: "ODiE".to_string(),
        }
    }

    #[test]
    fn test_sorts_ascending_by_start() {
        let sorted = sort_by_start(vec![
            event("2025-08-06T10:00:00Z", "third"),
            event("2025-08-04T10:00:00Z", "first"),
            event("2025-08-05T10:00:00Z", "second"),
        ]);

        let summaries: Vec<_> = sorted.iter().map(|e| e.summary.as_str()).collect();
        assert_eq!(summaries, ["first", "second", "third"]);
    }

    #[test]
    fn test_identical_starts_keep_input_order() {
        let sorted = sort_by_start(vec![
            event("2025-08-04T10:00:00Z", "from calendar A"),
            event("2025-08-04T10:00:00Z", "from calendar B"),
            event("2025-08-04T09:00:00Z", "earlier"),
        ]);

        let summaries: Vec<_> = sorted.iter().map(|e| e.summary.as_str()).collect();
        assert_eq!(summaries, ["earlier", "from calendar A", "from calendar B"]);
    }
}
