use chrono::NaiveDate;
use events_models::{Category, Event, Status};
use serde::Serialize;

/// Number of upcoming events the dashboard previews.
pub const UPCOMING_PREVIEW_LIMIT: usize = 3;

/// Headline figures of the dashboard. Recomputed on every call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSnapshot {
    pub total_events: usize,
    pub upcoming_events: usize,
    pub total_attendees: u64,
    pub revenue: f64,
}

impl DashboardSnapshot {
    pub fn compute(events: &[Event], today: NaiveDate) -> Self {
        events.iter().fold(Self::default(), |mut snapshot, event| {
            snapshot.total_events += 1;
            if is_upcoming(event, today) {
                snapshot.upcoming_events += 1;
            }
            snapshot.total_attendees += u64::from(event.attendees);
            snapshot.revenue += event.revenue();
            snapshot
        })
    }
}

fn is_upcoming(event: &Event, today: NaiveDate) -> bool {
    event.status == Status::Published && event.is_on_or_after(today)
}

/// Published events dated today or later, in list order, at most `limit`.
pub fn upcoming_preview(
    events: &[Event], today: NaiveDate, limit: usize,
) -> Vec<&Event> {
    events
        .iter()
        .filter(|event| is_upcoming(event, today))
        .take(limit)
        .collect()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryLegendRow {
    pub name: &'static str,
    pub category: Category,
    pub count: usize,
    pub color: &'static str,
}

/// The dashboard's category legend. It lists four fixed categories with
/// their own colours; social and other events are not shown.
const LEGEND: [(&str, Category, &str); 4] = [
    ("Conferences", Category::Conference, "primary"),
    ("Workshops", Category::Workshop, "emerald"),
    ("Networking", Category::Networking, "amber"),
    ("Seminars", Category::Seminar, "red"),
];

pub fn category_summary(events: &[Event]) -> Vec<CategoryLegendRow> {
    LEGEND
        .iter()
        .map(|&(name, category, color)| CategoryLegendRow {
            name,
            category,
            count: events
                .iter()
                .filter(|event| event.category == category)
                .count(),
            color,
        })
        .collect()
}
