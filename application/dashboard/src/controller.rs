use std::fmt;

use chrono::NaiveDate;
use events_queries::EventFilter;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::calendar::CalendarState;

/// Top-level screens of the dashboard.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum View {
    #[default]
    Dashboard,
    Events,
    Calendar,
    Analytics,
}

impl View {
    pub const ALL: [View; 4] =
        [View::Dashboard, View::Events, View::Calendar, View::Analytics];

    pub fn label(&self) -> &'static str {
        match self {
            View::Dashboard => "Dashboard",
            View::Events => "Events",
            View::Calendar => "Calendar",
            View::Analytics => "Analytics",
        }
    }
}

impl fmt::Display for View {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Where a navigation action points. Creating an event is a modal on top of
/// the current view rather than a view of its own.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavTarget {
    View(View),
    CreateEvent,
}

impl NavTarget {
    /// Maps a navigation id such as `"calendar"` or `"create-event"`.
    /// Unknown ids land on the dashboard.
    pub fn from_id(id: &str) -> Self {
        match id {
            "create-event" => NavTarget::CreateEvent,
            "events" => NavTarget::View(View::Events),
            "calendar" => NavTarget::View(View::Calendar),
            "analytics" => NavTarget::View(View::Analytics),
            _ => NavTarget::View(View::Dashboard),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ViewController {
    view: View,
    create_modal_open: bool,
    filter: EventFilter,
    calendar: CalendarState,
}

impl ViewController {
    pub fn new(today: NaiveDate) -> Self {
        Self {
            view: View::default(),
            create_modal_open: false,
            filter: EventFilter::default(),
            calendar: CalendarState::new(today),
        }
    }

    pub fn navigate(&mut self, target: NavTarget) {
        match target {
            NavTarget::CreateEvent => self.create_modal_open = true,
            NavTarget::View(view) => self.view = view,
        }
        debug!(view = %self.view, modal = self.create_modal_open, "navigated");
    }

    pub fn close_modal(&mut self) { self.create_modal_open = false; }

    pub fn view(&self) -> View { self.view }

    pub fn is_create_modal_open(&self) -> bool { self.create_modal_open }

    pub fn filter(&self) -> &EventFilter { &self.filter }

    pub fn filter_mut(&mut self) -> &mut EventFilter { &mut self.filter }

    pub fn calendar(&self) -> &CalendarState { &self.calendar }

    pub fn calendar_mut(&mut self) -> &mut CalendarState { &mut self.calendar }
}

#[cfg(test)]
mod tests {
    use events_models::Status;
    use events_queries::StatusFilter;

    use super::*;

    fn controller() -> ViewController {
        ViewController::new(NaiveDate::from_ymd_opt(2024, 3, 20).unwrap())
    }

    #[test]
    fn test_starts_on_dashboard_without_modal() {
        let controller = controller();

        assert_eq!(controller.view(), View::Dashboard);
        assert!(!controller.is_create_modal_open());
        assert!(controller.filter().is_empty());
    }

    #[test]
    fn test_create_event_opens_modal_and_keeps_view() {
        let mut controller = controller();
        controller.navigate(NavTarget::View(View::Calendar));

        controller.navigate(NavTarget::CreateEvent);

        assert_eq!(controller.view(), View::Calendar);
        assert!(controller.is_create_modal_open());

        controller.close_modal();
        assert!(!controller.is_create_modal_open());
        assert_eq!(controller.view(), View::Calendar);
    }

    #[test]
    fn test_navigation_ids() {
        assert_eq!(NavTarget::from_id("create-event"), NavTarget::CreateEvent);
        assert_eq!(
            NavTarget::from_id("analytics"),
            NavTarget::View(View::Analytics)
        );
        assert_eq!(
            NavTarget::from_id("settings"),
            NavTarget::View(View::Dashboard)
        );
    }

    #[test]
    fn test_filter_state_survives_navigation() {
        let mut controller = controller();
        controller.navigate(NavTarget::View(View::Events));
        controller.filter_mut().status = StatusFilter::Only(Status::Draft);

        controller.navigate(NavTarget::View(View::Analytics));
        controller.navigate(NavTarget::View(View::Events));

        assert_eq!(controller.filter().status, StatusFilter::Only(Status::Draft));
    }
}
