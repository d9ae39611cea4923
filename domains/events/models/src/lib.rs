pub mod enums;
pub mod events;
pub mod requests;

pub use enums::{Category, Status};
pub use events::{
    DATE_FORMAT, DEFAULT_ORGANIZER, Event, EventRow, MAX_CAPACITY, RowDecodeError,
    count_column,
};
pub use requests::{
    CreateEventRequest, NewEvent, UpdateEventRequest, ValidationError,
};
