mod calendar;
mod controller;

pub use calendar::{CalendarMode, CalendarState};
pub use controller::{NavTarget, View, ViewController};
