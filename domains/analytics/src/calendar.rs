use chrono::{Datelike, Duration, NaiveDate};
use events_models::Event;

/// Number of events the calendar's upcoming list shows.
pub const UPCOMING_LIST_LIMIT: usize = 5;

/// Events a single day cell shows before collapsing into "+N more".
pub const DAY_PREVIEW_LIMIT: usize = 2;

pub const WEEKDAY_LABELS: [&str; 7] =
    ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];

const MONTH_NAMES: [&str; 12] = [
    "January", "February", "March", "April", "May", "June", "July", "August",
    "September", "October", "November", "December",
];

/// English name of a 1-based month.
pub fn month_name(month: u32) -> Option<&'static str> {
    let index = usize::try_from(month.checked_sub(1)?).ok()?;
    MONTH_NAMES.get(index).copied()
}

/// Grid cells for a month: one `None` per weekday before the 1st (weeks
/// start on Sunday), then `Some(1..=n)`. An invalid month yields nothing.
pub fn days_in_month(year: i32, month: u32) -> Vec<Option<u32>> {
    let Some(first) = NaiveDate::from_ymd_opt(year, month, 1) else {
        return Vec::new();
    };
    let leading = first.weekday().num_days_from_sunday() as usize;
    let length = month_length(first);

    let mut cells = vec![None; leading];
    cells.extend((1..=length).map(Some));
    cells
}

fn month_length(first: NaiveDate) -> u32 {
    let next = if first.month() == 12 {
        NaiveDate::from_ymd_opt(first.year() + 1, 1, 1)
    }
    else {
        NaiveDate::from_ymd_opt(first.year(), first.month() + 1, 1)
    };
    next.map_or(31, |next| next.signed_duration_since(first).num_days() as u32)
}

fn date_key(day: u32, month: u32, year: i32) -> String {
    format!("{year:04}-{month:02}-{day:02}")
}

/// Events whose stored date string is exactly that day.
pub fn events_on_day(
    events: &[Event], day: u32, month: u32, year: i32,
) -> Vec<&Event> {
    let key = date_key(day, month, year);
    events.iter().filter(|event| event.date == key).collect()
}

pub fn is_today(day: u32, month: u32, year: i32, today: NaiveDate) -> bool {
    NaiveDate::from_ymd_opt(year, month, day) == Some(today)
}

/// Events dated today or later regardless of status, in list order.
pub fn upcoming_list(events: &[Event], today: NaiveDate) -> Vec<&Event> {
    events
        .iter()
        .filter(|event| event.is_on_or_after(today))
        .take(UPCOMING_LIST_LIMIT)
        .collect()
}

/// What a day cell renders: the first few events plus how many were left out.
#[derive(Debug, Clone, PartialEq)]
pub struct DayPreview<'a> {
    pub shown: Vec<&'a Event>,
    pub overflow: usize,
}

pub fn day_preview(
    events: &[Event], day: u32, month: u32, year: i32,
) -> DayPreview<'_> {
    let mut shown = events_on_day(events, day, month, year);
    let overflow = shown.len().saturating_sub(DAY_PREVIEW_LIMIT);
    shown.truncate(DAY_PREVIEW_LIMIT);
    DayPreview { shown, overflow }
}

/// The Sunday-to-Saturday week containing `reference`.
pub fn week_days(reference: NaiveDate) -> [NaiveDate; 7] {
    let offset = i64::from(reference.weekday().num_days_from_sunday());
    let sunday = reference - Duration::days(offset);
    std::array::from_fn(|i| sunday + Duration::days(i as i64))
}
