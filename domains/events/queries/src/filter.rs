use events_models::{Category, Event, Status};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum StatusFilter {
    #[default]
    All,
    Only(Status),
}

impl StatusFilter {
    pub fn matches(&self, status: Status) -> bool {
        match self {
            Self::All => true,
            Self::Only(wanted) => *wanted == status,
        }
    }
}

/// Client-side narrowing of the cached event list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EventFilter {
    pub status: StatusFilter,
    pub category: Option<Category>,
    /// Case-insensitive substring of title or description.
    pub search: Option<String>,
}

impl EventFilter {
    pub fn is_empty(&self) -> bool { self == &Self::default() }

    pub fn matches(&self, event: &Event) -> bool {
        if !self.status.matches(event.status) {
            return false;
        }
        if self.category.is_some_and(|category| category != event.category) {
            return false;
        }
        match self.search.as_deref().map(str::trim) {
            Some(needle) if !needle.is_empty() => {
                let needle = needle.to_lowercase();
                event.title.to_lowercase().contains(&needle)
                    || event.description.to_lowercase().contains(&needle)
            }
            _ => true,
        }
    }

    /// Keeps the order of `events`.
    pub fn apply<'a>(&self, events: &'a [Event]) -> Vec<&'a Event> {
        events.iter().filter(|event| self.matches(event)).collect()
    }
}
