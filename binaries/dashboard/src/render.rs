use analytics::{
    AnalyticsReport, CategoryLegendRow, DashboardSnapshot,
    calendar::{WEEKDAY_LABELS, day_preview, events_on_day, is_today, upcoming_list},
    sample::{MonthlyTrend, TREND_BAR_MAX_EVENTS},
};
use chrono::{Datelike, NaiveDate};
use common_errors::ErrorNotice;
use dashboard_views::CalendarState;
use events_models::Event;

fn money(amount: f64) -> String { format!("${amount:.2}") }

fn bar(fraction: f64, width: usize) -> String {
    let filled = (fraction.clamp(0.0, 1.0) * width as f64).round() as usize;
    format!("{}{}", "#".repeat(filled), ".".repeat(width - filled))
}

pub fn event_line(event: &Event) -> String {
    format!(
        "{:<38} {:<10} {} {:<5} {:<11} {:<9} {:>9}  {}",
        event.id,
        event.date,
        event.category.label(),
        event.time,
        event.status.label(),
        event.capacity_label(),
        money(event.price),
        event.title,
    )
}

pub fn event_list(events: &[&Event]) -> String {
    if events.is_empty() {
        return "No events found\n".to_string();
    }
    let mut out = String::new();
    for event in events {
        out.push_str(&event_line(event));
        out.push('\n');
    }
    out
}

pub fn event_detail(event: &Event) -> String {
    let mut out = format!("{}\n{}\n\n", event.title, event.description);
    let fields = [
        ("id", event.id.clone()),
        ("when", format!("{} {}", event.date, event.time)),
        ("where", event.location.clone()),
        ("category", event.category.label().to_string()),
        ("status", event.status.label().to_string()),
        (
            "capacity",
            format!(
                "{} [{}]",
                event.capacity_label(),
                bar(event.fill_ratio(), 20)
            ),
        ),
        ("price", money(event.price)),
        ("revenue", money(event.revenue())),
        ("organizer", event.organizer.clone()),
        ("image", event.image.clone().unwrap_or_else(|| "-".to_string())),
        ("created", event.created_at.to_rfc3339()),
        ("updated", event.updated_at.to_rfc3339()),
    ];
    for (name, value) in fields {
        out.push_str(&format!("{name:>10}: {value}\n"));
    }
    out
}

pub fn dashboard(
    snapshot: &DashboardSnapshot, upcoming: &[&Event],
    legend: &[CategoryLegendRow],
) -> String {
    let mut out = format!(
        "Total events     {}\nUpcoming events  {}\nTotal attendees  {}\nRevenue          {}\n",
        snapshot.total_events,
        snapshot.upcoming_events,
        snapshot.total_attendees,
        money(snapshot.revenue),
    );

    out.push_str("\nUpcoming\n");
    if upcoming.is_empty() {
        out.push_str("  No upcoming events\n");
    }
    for event in upcoming {
        out.push_str(&format!(
            "  {} {}  {} ({})\n",
            event.date, event.time, event.title, event.location
        ));
    }

    out.push_str("\nCategories\n");
    for row in legend {
        out.push_str(&format!("  {:<12} {} events\n", row.name, row.count));
    }
    out
}

pub fn analytics(report: &AnalyticsReport, trend: Option<&[MonthlyTrend]>) -> String {
    let mut out = format!(
        "Total revenue       {}\nAverage attendance  {:.0}\nCompletion rate     {:.1}%\nPublished events    {}\n",
        money(report.total_revenue),
        report.average_attendance,
        report.completion_rate,
        report.published_events,
    );

    if let Some(trend) = trend {
        out.push_str("\nMonthly trend (sample data)\n");
        for month in trend {
            out.push_str(&format!(
                "  {} [{}] {} events, {} revenue\n",
                month.month,
                bar(
                    f64::from(month.events) / f64::from(TREND_BAR_MAX_EVENTS),
                    20
                ),
                month.events,
                money(month.revenue),
            ));
        }
    }

    out.push_str("\nEvent categories\n");
    for share in &report.categories {
        out.push_str(&format!(
            "  {:<11} [{}] {} events ({:.1}%)\n",
            share.category.label(),
            bar(share.share / 100.0, 20),
            share.count,
            share.share,
        ));
    }

    out.push_str("\nTop performing events\n");
    for event in &report.top_performing {
        out.push_str(&format!(
            "  {:<34} {} {:>9} {:>11} {}\n",
            event.title,
            event.date,
            event.capacity_label(),
            money(event.revenue()),
            event.status.label(),
        ));
    }
    out
}

pub fn calendar_month(
    state: &CalendarState, events: &[Event], today: NaiveDate,
) -> String {
    let (year, month) = (state.year(), state.month());
    let mut out = format!("{}\n", state.title());
    out.push_str(&WEEKDAY_LABELS.map(|label| format!("{label:<5}")).concat());
    out.push('\n');

    let mut overflow_notes = Vec::new();
    for (index, cell) in state.month_grid().iter().enumerate() {
        let text = match cell {
            None => String::new(),
            Some(day) => {
                let preview = day_preview(events, *day, month, year);
                let count = preview.shown.len() + preview.overflow;
                if preview.overflow > 0 {
                    overflow_notes.push((*day, preview.overflow));
                }
                let marker = if is_today(*day, month, year, today) { "*" } else { "" };
                if count > 0 {
                    format!("{day}{marker}({count})")
                }
                else {
                    format!("{day}{marker}")
                }
            }
        };
        out.push_str(&format!("{text:<5}"));
        if index % 7 == 6 {
            out.push('\n');
        }
    }
    out.push('\n');

    for (day, overflow) in overflow_notes {
        out.push_str(&format!("  {day}: +{overflow} more\n"));
    }
    out.push_str(&upcoming_section(events, today));
    out
}

pub fn calendar_week(
    state: &CalendarState, events: &[Event], today: NaiveDate,
) -> String {
    let mut out = format!("Week of {}\n", state.week()[0]);
    for (label, date) in WEEKDAY_LABELS.iter().zip(state.week()) {
        let marker = if date == today { " (today)" } else { "" };
        out.push_str(&format!("{label} {date}{marker}\n"));
        for event in events_on_day(events, date.day(), date.month(), date.year()) {
            out.push_str(&format!("    {} {}\n", event.time, event.title));
        }
    }
    out.push_str(&upcoming_section(events, today));
    out
}

fn upcoming_section(events: &[Event], today: NaiveDate) -> String {
    let mut out = "\nUpcoming\n".to_string();
    for event in upcoming_list(events, today) {
        out.push_str(&format!("  {} {}  {}\n", event.date, event.time, event.title));
    }
    out
}

pub fn notice(notice: &ErrorNotice) -> String {
    match notice.action() {
        Some(action) => format!("{notice}\n[{action}: run the command again]"),
        None => notice.to_string(),
    }
}
