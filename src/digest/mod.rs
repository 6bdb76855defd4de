pub mod aggregate;
pub mod event;
pub mod filter;
pub mod render;

pub use event::CanonicalEvent;
pub use filter::ForecastWindow;
pub use render::DigestLines;

use crate::calendar::{CalendarSource, RawEvent};
use crate::config::Config;
use crate::error::AgendaResult;
use chrono::{NaiveDate, Utc};
use std::sync::Arc;
use tracing::info;

/// Run the pure digest pipeline over already fetched events:
/// normalize, filter against the forecast window, sort, render.
///
/// Any malformed record aborts the whole digest. `today` is injected so
/// the pipeline is deterministic under test.
pub fn build_digest(
    raw_events: &[RawEvent],
    holiday_prefix: &str,
    today: NaiveDate,
    forecast_days: u32,
) -> AgendaResult<DigestLines> {
    let window = ForecastWindow::starting(today, forecast_days);

    let mut events = Vec::with_capacity(raw_events.len());
    for raw in raw_events {
        let event = CanonicalEvent::from_raw(raw)?;
        if filter::keep(&event, &window) {
            events.push(event);
        }
    }

    let events = aggregate::sort_by_start(events);

    Ok(render::digest_lines(events, holiday_prefix, &window))
}

/// Fetch events from all matching calendars and render the digest
/// for the next `forecast_days` days
pub async fn render_digest(config: Arc<Config>, forecast_days: u32) -> AgendaResult<DigestLines> {
    let source = CalendarSource::new(Arc::clone(&config));
    let raw_events = source.fetch_all_events().await?;

    let today = Utc::now().date_naive();
    let window = ForecastWindow::starting(today, forecast_days);
    info!(
        "Combined events for the next {} days ({} to {})",
        forecast_days,
        render::format_display_date(window.start),
        render::format_display_date(window.end)
    );

    build_digest(&raw_events, &config.holiday_prefix, today, forecast_days)
}
