mod memory;
pub mod migrations;
mod postgres;
mod table;

pub use memory::MemoryEventTable;
pub use migrations::EVENT_MIGRATIONS;
pub use postgres::PgEventTable;
pub use table::EventTable;
