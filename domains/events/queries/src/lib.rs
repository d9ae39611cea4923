pub mod filter;
pub mod list_events;

pub use filter::{EventFilter, StatusFilter};
pub use list_events::*;
