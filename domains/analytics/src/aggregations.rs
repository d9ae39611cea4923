use events_models::{Category, Event, Status};
use serde::Serialize;
use tracing::{debug, instrument};

/// How many events the top-performing ranking keeps.
pub const TOP_PERFORMING_LIMIT: usize = 5;

pub fn total_revenue(events: &[Event]) -> f64 {
    events.iter().map(Event::revenue).sum()
}

/// Mean attendees per event, `0.0` for an empty list.
pub fn average_attendance(events: &[Event]) -> f64 {
    if events.is_empty() {
        return 0.0;
    }
    let attendees: u64 = events.iter().map(|event| u64::from(event.attendees)).sum();
    attendees as f64 / events.len() as f64
}

/// Percentage of completed events, `0.0` for an empty list.
pub fn completion_rate(events: &[Event]) -> f64 {
    percentage(count_status(events, Status::Completed), events.len())
}

pub fn published_count(events: &[Event]) -> usize {
    count_status(events, Status::Published)
}

fn count_status(events: &[Event], status: Status) -> usize {
    events.iter().filter(|event| event.status == status).count()
}

fn percentage(part: usize, whole: usize) -> f64 {
    if whole == 0 {
        return 0.0;
    }
    part as f64 / whole as f64 * 100.0
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryShare {
    pub category: Category,
    pub count: usize,
    /// Share of all events, in percent.
    pub share: f64,
    pub color: &'static str,
}

/// Event count per category in order of first appearance.
pub fn category_distribution(events: &[Event]) -> Vec<CategoryShare> {
    let mut counts: Vec<(Category, usize)> = Vec::new();
    for event in events {
        match counts.iter_mut().find(|(category, _)| *category == event.category) {
            Some((_, count)) => *count += 1,
            None => counts.push((event.category, 1)),
        }
    }

    counts
        .into_iter()
        .map(|(category, count)| CategoryShare {
            category,
            count,
            share: percentage(count, events.len()),
            color: category.color(),
        })
        .collect()
}

/// Highest-revenue events first; ties keep list order.
pub fn top_performing(events: &[Event], limit: usize) -> Vec<&Event> {
    let mut ranked: Vec<&Event> = events.iter().collect();
    ranked.sort_by(|a, b| b.revenue().total_cmp(&a.revenue()));
    ranked.truncate(limit);
    ranked
}

/// Everything the analytics view shows, computed in one go.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsReport {
    pub total_events: usize,
    pub total_revenue: f64,
    pub average_attendance: f64,
    pub completion_rate: f64,
    pub published_events: usize,
    pub categories: Vec<CategoryShare>,
    pub top_performing: Vec<Event>,
}

impl AnalyticsReport {
    #[instrument(skip_all, fields(events = events.len()))]
    pub fn build(events: &[Event]) -> Self {
        let report = Self {
            total_events: events.len(),
            total_revenue: total_revenue(events),
            average_attendance: average_attendance(events),
            completion_rate: completion_rate(events),
            published_events: published_count(events),
            categories: category_distribution(events),
            top_performing: top_performing(events, TOP_PERFORMING_LIMIT)
                .into_iter()
                .cloned()
                .collect(),
        };
        debug!(revenue = report.total_revenue, "analytics report built");
        report
    }
}
